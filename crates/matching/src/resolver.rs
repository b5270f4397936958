//! Three-tier best-match resolution.
//!
//! Order of evaluation: exact stable id, exact structural key, then the
//! closest text by normalized edit distance. The first tier that finds a
//! candidate wins; within a tier the first candidate in pool order wins.

use serde::{Deserialize, Serialize};

use crate::distance::EditDistanceMeter;
use crate::error::MatchError;
use crate::model::{MatchResult, MatchTier, Matchable, Matched};
use crate::pool::{EntryId, MatchPool};

/// Pool size at which `DistanceMode::Auto` switches to banded distance.
pub const DEFAULT_BOUNDED_MIN_POOL: usize = 100;

/// Upper bound (exclusive) on normalized distance for a fuzzy match.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FuzzyThreshold(f64);

impl FuzzyThreshold {
    pub fn new(value: f64) -> Result<Self, MatchError> {
        if value.is_nan() || value < 0.0 {
            return Err(MatchError::InvalidThreshold(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for FuzzyThreshold {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Which exact tier runs first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierOrder {
    #[default]
    IdentityFirst,
    StructuralFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMode {
    /// Full table for every candidate.
    Exact,
    /// Banded table with early exit for every candidate.
    Bounded,
    /// Banded once the pool holds at least `min_pool` entries.
    Auto { min_pool: usize },
}

impl Default for DistanceMode {
    fn default() -> Self {
        Self::Auto {
            min_pool: DEFAULT_BOUNDED_MIN_POOL,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BestMatchResolver {
    meter: EditDistanceMeter,
    tier_order: TierOrder,
    mode: DistanceMode,
}

impl BestMatchResolver {
    pub fn new(meter: EditDistanceMeter) -> Self {
        Self {
            meter,
            tier_order: TierOrder::default(),
            mode: DistanceMode::default(),
        }
    }

    pub fn with_tier_order(mut self, tier_order: TierOrder) -> Self {
        self.tier_order = tier_order;
        self
    }

    pub fn with_distance_mode(mut self, mode: DistanceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn meter(&self) -> &EditDistanceMeter {
        &self.meter
    }

    pub fn tier_order(&self) -> TierOrder {
        self.tier_order
    }

    pub fn distance_mode(&self) -> DistanceMode {
        self.mode
    }

    /// Find the best candidate for `query` without touching the pool.
    ///
    /// Call [`MatchPool::consume`] with the returned entry to claim it.
    pub fn resolve<'p, Q, R>(
        &self,
        query: &Q,
        pool: &'p MatchPool<R>,
        threshold: FuzzyThreshold,
    ) -> MatchResult<'p, R>
    where
        Q: Matchable + ?Sized,
        R: Matchable,
    {
        if pool.is_empty() {
            return MatchResult::NoMatch;
        }

        let exact = match self.tier_order {
            TierOrder::IdentityFirst => {
                by_identity(query, pool).or_else(|| by_structure(query, pool))
            }
            TierOrder::StructuralFirst => {
                by_structure(query, pool).or_else(|| by_identity(query, pool))
            }
        };

        match exact.or_else(|| self.by_text(query, pool, threshold)) {
            Some(m) => MatchResult::Matched(m),
            None => MatchResult::NoMatch,
        }
    }

    fn uses_band(&self, pool_len: usize) -> bool {
        match self.mode {
            DistanceMode::Exact => false,
            DistanceMode::Bounded => true,
            DistanceMode::Auto { min_pool } => pool_len >= min_pool,
        }
    }

    fn by_text<'p, Q, R>(
        &self,
        query: &Q,
        pool: &'p MatchPool<R>,
        threshold: FuzzyThreshold,
    ) -> Option<Matched<'p, R>>
    where
        Q: Matchable + ?Sized,
        R: Matchable,
    {
        let limit = threshold.value();
        let banded = self.uses_band(pool.len());
        let query_text: Vec<char> = query.text().chars().collect();
        let mut best: Option<(EntryId, &'p R, f64)> = None;

        for (entry, candidate) in pool.iter() {
            let text: Vec<char> = candidate.text().chars().collect();
            let d = if banded {
                match self.meter.normalized_within(&query_text, &text, limit) {
                    Some(d) => d,
                    None => continue,
                }
            } else {
                self.meter.normalized_chars(&query_text, &text)
            };

            // Strict comparison keeps the first of equally close candidates
            if best.map_or(true, |(_, _, best_d)| d < best_d) {
                best = Some((entry, candidate, d));
            }
        }

        let (entry, record, d) = best?;
        if d < limit {
            log::trace!("fuzzy candidate {entry} accepted at {d:.3} (< {limit})");
            Some(Matched {
                entry,
                record,
                tier: MatchTier::Fuzzy,
                distance: Some(d),
            })
        } else {
            log::trace!("closest candidate {entry} rejected at {d:.3} (>= {limit})");
            None
        }
    }
}

fn by_identity<'p, Q, R>(query: &Q, pool: &'p MatchPool<R>) -> Option<Matched<'p, R>>
where
    Q: Matchable + ?Sized,
    R: Matchable,
{
    let id = query.stable_id()?;
    pool.iter()
        .find(|(_, candidate)| candidate.stable_id() == Some(id))
        .map(|(entry, record)| exact_match(entry, record, MatchTier::Identity))
}

fn by_structure<'p, Q, R>(query: &Q, pool: &'p MatchPool<R>) -> Option<Matched<'p, R>>
where
    Q: Matchable + ?Sized,
    R: Matchable,
{
    let key = query.structural_key()?;
    pool.iter()
        .find(|(_, candidate)| candidate.structural_key().as_ref() == Some(&key))
        .map(|(entry, record)| exact_match(entry, record, MatchTier::Structural))
}

fn exact_match<R>(entry: EntryId, record: &R, tier: MatchTier) -> Matched<'_, R> {
    Matched {
        entry,
        record,
        tier,
        distance: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Record, StructuralKey};

    fn threshold(v: f64) -> FuzzyThreshold {
        FuzzyThreshold::new(v).unwrap()
    }

    fn resolver() -> BestMatchResolver {
        BestMatchResolver::default()
    }

    #[test]
    fn threshold_rejects_negative_and_nan() {
        assert_eq!(
            FuzzyThreshold::new(-0.1).unwrap_err(),
            MatchError::InvalidThreshold(-0.1)
        );
        assert!(FuzzyThreshold::new(f64::NAN).is_err());
        assert!(FuzzyThreshold::new(0.0).is_ok());
    }

    #[test]
    fn empty_pool_is_no_match() {
        let pool: MatchPool<Record> = MatchPool::default();
        let query = Record::new("anything").with_stable_id("X");
        assert!(!resolver().resolve(&query, &pool, threshold(1.0)).is_match());
    }

    #[test]
    fn identity_short_circuits_text() {
        let pool = MatchPool::new(vec![
            Record::new("a red fox"),
            Record::new("completely unrelated prose").with_stable_id("X"),
        ]);
        let query = Record::new("a red fox").with_stable_id("X");

        let m = resolver().resolve(&query, &pool, threshold(0.2)).matched().unwrap();
        assert_eq!(m.tier, MatchTier::Identity);
        assert_eq!(m.record.text, "completely unrelated prose");
        assert_eq!(m.distance, None);
    }

    #[test]
    fn structural_key_when_identity_misses() {
        let key = StructuralKey::new("Tynan", "Sylvester", "Adulthood");
        let pool = MatchPool::new(vec![
            Record::new("old text").with_stable_id("Old1"),
            Record::new("rewritten text").with_structural_key(key.clone()),
        ]);
        let query = Record::new("zzz").with_stable_id("New1").with_structural_key(key);

        let m = resolver().resolve(&query, &pool, threshold(0.1)).matched().unwrap();
        assert_eq!(m.tier, MatchTier::Structural);
        assert_eq!(m.record.text, "rewritten text");
    }

    #[test]
    fn structural_key_compares_every_component() {
        let pool = MatchPool::new(vec![Record::new("x")
            .with_structural_key(StructuralKey::new("Tynan", "Sylvester", "Childhood"))]);
        let query = Record::new("y")
            .with_structural_key(StructuralKey::new("Tynan", "Sylvester", "Adulthood"));
        assert!(!resolver().resolve(&query, &pool, threshold(0.5)).is_match());
    }

    #[test]
    fn tier_order_structural_first() {
        let key = StructuralKey::new("Ann", "Lee", "Childhood");
        let pool = MatchPool::new(vec![
            Record::new("by id").with_stable_id("X"),
            Record::new("by key").with_structural_key(key.clone()),
        ]);
        let query = Record::new("q").with_stable_id("X").with_structural_key(key);

        let r = resolver();
        let m = r.resolve(&query, &pool, threshold(0.5)).matched().unwrap();
        assert_eq!(m.record.text, "by id");

        let r = resolver().with_tier_order(TierOrder::StructuralFirst);
        let m = r.resolve(&query, &pool, threshold(0.5)).matched().unwrap();
        assert_eq!(m.tier, MatchTier::Structural);
        assert_eq!(m.record.text, "by key");
    }

    #[test]
    fn fuzzy_within_threshold() {
        let pool = MatchPool::new(vec![Record::new("a red fax")]);
        let query = Record::new("a red fox");

        let m = resolver().resolve(&query, &pool, threshold(0.2)).matched().unwrap();
        assert_eq!(m.tier, MatchTier::Fuzzy);
        let d = m.distance.unwrap();
        assert!((d - 1.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn fuzzy_beyond_threshold() {
        let pool = MatchPool::new(vec![Record::new("a red fax")]);
        let query = Record::new("a red fox");
        assert!(!resolver().resolve(&query, &pool, threshold(0.05)).is_match());
    }

    #[test]
    fn fuzzy_threshold_is_strict() {
        // 1/4 == 0.25 is not below 0.25
        let pool = MatchPool::new(vec![Record::new("abcd")]);
        let query = Record::new("abce");
        assert!(!resolver().resolve(&query, &pool, threshold(0.25)).is_match());
    }

    #[test]
    fn fuzzy_picks_closest_then_first() {
        let pool = MatchPool::new(vec![
            Record::new("a rod fax").with_stable_id("two-edits"),
            Record::new("a red fax").with_stable_id("tie1"),
            Record::new("a red fix").with_stable_id("tie2"),
        ]);
        let query = Record::new("a red fox");
        let m = resolver().resolve(&query, &pool, threshold(0.5)).matched().unwrap();
        assert_eq!(m.record.stable_id.as_deref(), Some("tie1"));
    }

    #[test]
    fn empty_texts_match_each_other() {
        let pool = MatchPool::new(vec![Record::new("non-empty"), Record::new("")]);
        let query = Record::new("");
        let m = resolver().resolve(&query, &pool, threshold(0.1)).matched().unwrap();
        assert_eq!(m.record.text, "");
        assert_eq!(m.distance, Some(0.0));
    }

    #[test]
    fn empty_query_against_non_empty_pool() {
        let pool = MatchPool::new(vec![Record::new("abc"), Record::new("d")]);
        let query = Record::new("");
        assert!(!resolver().resolve(&query, &pool, threshold(0.99)).is_match());
    }

    #[test]
    fn bounded_and_exact_modes_agree() {
        let texts = [
            "He grew up on a glitterworld.",
            "She grew up on a glitterworld.",
            "He grew up in a medieval village.",
            "Raised by wolves.",
        ];
        let pool = MatchPool::new(texts.iter().map(|t| Record::new(*t)));
        let queries = [
            "They grew up on a glitterworld.",
            "Raised by wolfs.",
            "Nothing alike at all, really.",
        ];

        let exact = resolver().with_distance_mode(DistanceMode::Exact);
        let banded = resolver().with_distance_mode(DistanceMode::Bounded);
        for q in queries {
            let query = Record::new(q);
            let a = exact.resolve(&query, &pool, threshold(0.3)).matched().map(|m| m.entry);
            let b = banded.resolve(&query, &pool, threshold(0.3)).matched().map(|m| m.entry);
            assert_eq!(a, b, "query {q:?}");
        }
    }

    #[test]
    fn banded_mode_keeps_match_after_leading_insertion() {
        let pool = MatchPool::new(vec![Record::new("xyabcdefgh")]);
        let query = Record::new("abcdefgh");

        for mode in [DistanceMode::Exact, DistanceMode::Bounded] {
            let m = resolver()
                .with_distance_mode(mode)
                .resolve(&query, &pool, threshold(0.3))
                .matched()
                .unwrap();
            assert_eq!(m.tier, MatchTier::Fuzzy, "{mode:?}");
            assert_eq!(m.distance, Some(0.25), "{mode:?}");
        }
    }

    #[test]
    fn consumed_candidate_not_matched_again() {
        let mut pool = MatchPool::new(vec![Record::new("a red fax")]);
        let query = Record::new("a red fox");
        let r = resolver();

        let entry = r.resolve(&query, &pool, threshold(0.2)).matched().unwrap().entry;
        assert!(pool.consume(entry).is_some());
        assert!(!r.resolve(&query, &pool, threshold(0.2)).is_match());
    }
}
