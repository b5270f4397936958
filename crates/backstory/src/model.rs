use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;
use subtrans_matching::{Matchable, StructuralKey};

use crate::error::BackstoryError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum BackstorySlot {
    Childhood,
    Adulthood,
    #[default]
    Unknown,
}

impl BackstorySlot {
    /// Case-insensitive parse of a resource `slot` value.
    pub fn parse(value: &str) -> Result<Self, BackstoryError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "childhood" => Ok(Self::Childhood),
            "adulthood" => Ok(Self::Adulthood),
            _ => Err(BackstoryError::InvalidSlot(value.to_string())),
        }
    }
}

impl fmt::Display for BackstorySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Childhood => write!(f, "Childhood"),
            Self::Adulthood => write!(f, "Adulthood"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One backstory, from a resource file or a translation file.
///
/// Named ("solid") backstories come from player bios and carry first and
/// last names; regular ones only have titles and a description.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Backstory {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_female: Option<String>,
    pub title_short: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_short_female: Option<String>,
    pub description: String,
    pub slot: BackstorySlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Backstory {
    pub fn is_solid(&self) -> bool {
        self.first_name.is_some() && self.last_name.is_some()
    }

    /// Comment shown above the entry in a translation file.
    pub fn hint(&self) -> String {
        if !self.is_solid() {
            return self.category.clone().unwrap_or_default();
        }

        let mut hint = format!("{} ", self.first_name.as_deref().unwrap_or_default());
        if let Some(nick) = self.nick_name.as_deref().filter(|n| !n.is_empty()) {
            let _ = write!(hint, "\"{nick}\" ");
        }
        hint.push_str(self.last_name.as_deref().unwrap_or_default());
        if let Some(gender) = self.gender.as_deref().filter(|g| !g.is_empty()) {
            let _ = write!(hint, ", {gender}");
        }
        let _ = write!(hint, ", {}", self.slot);
        hint
    }
}

impl Matchable for Backstory {
    fn stable_id(&self) -> Option<&str> {
        Some(self.id.as_str()).filter(|id| !id.is_empty())
    }

    fn structural_key(&self) -> Option<StructuralKey> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => {
                Some(StructuralKey::new(first.as_str(), last.as_str(), self.slot.to_string()))
            }
            _ => None,
        }
    }

    fn text(&self) -> &str {
        &self.description
    }
}
