use serde::{Deserialize, Serialize};

use crate::pool::EntryId;
use crate::resolver::TierOrder;

// ---------------------------------------------------------------------------
// Record facets
// ---------------------------------------------------------------------------

/// Secondary exact-match identity, compared component-wise.
///
/// For named records this is typically (first name, last name, slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuralKey {
    pub primary: String,
    pub secondary: String,
    pub slot: String,
}

impl StructuralKey {
    pub fn new(
        primary: impl Into<String>,
        secondary: impl Into<String>,
        slot: impl Into<String>,
    ) -> Self {
        Self {
            primary: primary.into(),
            secondary: secondary.into(),
            slot: slot.into(),
        }
    }
}

/// The three facets the resolver looks at.
///
/// An empty stable id counts as absent.
pub trait Matchable {
    fn stable_id(&self) -> Option<&str>;
    fn structural_key(&self) -> Option<StructuralKey>;
    fn text(&self) -> &str;
}

impl<T: Matchable + ?Sized> Matchable for &T {
    fn stable_id(&self) -> Option<&str> {
        (**self).stable_id()
    }

    fn structural_key(&self) -> Option<StructuralKey> {
        (**self).structural_key()
    }

    fn text(&self) -> &str {
        (**self).text()
    }
}

/// Plain record for callers without their own domain type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stable_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural_key: Option<StructuralKey>,
    #[serde(default)]
    pub text: String,
}

impl Record {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_stable_id(mut self, id: impl Into<String>) -> Self {
        self.stable_id = Some(id.into());
        self
    }

    pub fn with_structural_key(mut self, key: StructuralKey) -> Self {
        self.structural_key = Some(key);
        self
    }
}

impl Matchable for Record {
    fn stable_id(&self) -> Option<&str> {
        self.stable_id.as_deref().filter(|id| !id.is_empty())
    }

    fn structural_key(&self) -> Option<StructuralKey> {
        self.structural_key.clone()
    }

    fn text(&self) -> &str {
        &self.text
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Identity,
    Structural,
    Fuzzy,
}

impl std::fmt::Display for MatchTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Structural => write!(f, "structural"),
            Self::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// A chosen candidate, borrowed from the pool it was found in.
#[derive(Debug)]
pub struct Matched<'a, R> {
    pub entry: EntryId,
    pub record: &'a R,
    pub tier: MatchTier,
    /// Normalized text distance; only set for the fuzzy tier.
    pub distance: Option<f64>,
}

#[derive(Debug)]
pub enum MatchResult<'a, R> {
    Matched(Matched<'a, R>),
    NoMatch,
}

impl<'a, R> MatchResult<'a, R> {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn tier(&self) -> Option<MatchTier> {
        match self {
            Self::Matched(m) => Some(m.tier),
            Self::NoMatch => None,
        }
    }

    pub fn matched(self) -> Option<Matched<'a, R>> {
        match self {
            Self::Matched(m) => Some(m),
            Self::NoMatch => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Migration pass
// ---------------------------------------------------------------------------

/// Decision for one current record.
#[derive(Debug, Clone)]
pub struct PairOutcome<P> {
    /// Position of the current record in the input slice.
    pub current_index: usize,
    /// The consumed previous record, if any tier matched.
    pub previous: Option<P>,
    pub tier: Option<MatchTier>,
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MigrationSummary {
    pub total: usize,
    pub identity: usize,
    pub structural: usize,
    pub fuzzy: usize,
    pub unmatched: usize,
    /// Previous records nothing claimed.
    pub leftover_previous: usize,
}

impl MigrationSummary {
    pub fn matched(&self) -> usize {
        self.identity + self.structural + self.fuzzy
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationMeta {
    pub engine_version: String,
    pub run_at: String,
    pub threshold: f64,
    pub tier_order: TierOrder,
}

#[derive(Debug, Clone)]
pub struct MigrationOutcome<P> {
    pub meta: MigrationMeta,
    pub pairs: Vec<PairOutcome<P>>,
    pub leftover: Vec<P>,
    pub summary: MigrationSummary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stable_id_is_absent() {
        let r = Record::new("x").with_stable_id("");
        assert_eq!(Matchable::stable_id(&r), None);
        let r = Record::new("x").with_stable_id("Id1");
        assert_eq!(Matchable::stable_id(&r), Some("Id1"));
    }

    #[test]
    fn record_serde_skips_absent_facets() {
        let r = Record::new("a red fox");
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"text":"a red fox"}"#);
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn tier_display_matches_serde() {
        for tier in [MatchTier::Identity, MatchTier::Structural, MatchTier::Fuzzy] {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{tier}\""));
        }
    }
}
