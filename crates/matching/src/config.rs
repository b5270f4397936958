use serde::{Deserialize, Serialize};

use crate::distance::EditDistanceMeter;
use crate::error::MatchError;
use crate::resolver::{
    BestMatchResolver, DistanceMode, FuzzyThreshold, TierOrder, DEFAULT_BOUNDED_MIN_POOL,
};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Matching settings, usually loaded from a `match.toml`.
///
/// Every section is optional; an empty document yields unit weights, a 0.5
/// fuzzy threshold and automatic banding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    #[serde(default)]
    pub tier_order: TierOrder,
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub fuzzy: FuzzyConfig,
}

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "unit_weight")]
    pub insertion: i64,
    #[serde(default = "unit_weight")]
    pub deletion: i64,
    #[serde(default = "unit_weight")]
    pub substitution: i64,
}

fn unit_weight() -> i64 {
    1
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            insertion: 1,
            deletion: 1,
            substitution: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Fuzzy tier
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyConfig {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub mode: DistanceModeName,
    #[serde(default = "default_bounded_min_pool")]
    pub bounded_min_pool: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceModeName {
    Exact,
    Bounded,
    #[default]
    Auto,
}

fn default_threshold() -> f64 {
    FuzzyThreshold::default().value()
}

fn default_bounded_min_pool() -> usize {
    DEFAULT_BOUNDED_MIN_POOL
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            mode: DistanceModeName::Auto,
            bounded_min_pool: DEFAULT_BOUNDED_MIN_POOL,
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl MatchConfig {
    pub fn from_toml(input: &str) -> Result<Self, MatchError> {
        let config: MatchConfig =
            toml::from_str(input).map_err(|e| MatchError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        self.meter()?;
        self.threshold()?;

        if self.fuzzy.mode == DistanceModeName::Auto && self.fuzzy.bounded_min_pool == 0 {
            return Err(MatchError::ConfigValidation(
                "fuzzy.bounded_min_pool must be at least 1 in auto mode".into(),
            ));
        }

        Ok(())
    }

    pub fn meter(&self) -> Result<EditDistanceMeter, MatchError> {
        let w = &self.weights;
        EditDistanceMeter::new(w.insertion, w.deletion, w.substitution)
    }

    pub fn threshold(&self) -> Result<FuzzyThreshold, MatchError> {
        FuzzyThreshold::new(self.fuzzy.threshold)
    }

    pub fn distance_mode(&self) -> DistanceMode {
        match self.fuzzy.mode {
            DistanceModeName::Exact => DistanceMode::Exact,
            DistanceModeName::Bounded => DistanceMode::Bounded,
            DistanceModeName::Auto => DistanceMode::Auto {
                min_pool: self.fuzzy.bounded_min_pool,
            },
        }
    }

    pub fn resolver(&self) -> Result<BestMatchResolver, MatchError> {
        Ok(BestMatchResolver::new(self.meter()?)
            .with_tier_order(self.tier_order)
            .with_distance_mode(self.distance_mode()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
