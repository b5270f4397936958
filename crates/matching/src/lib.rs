//! `subtrans-matching` - Approximate record matching engine.
//!
//! Pure engine crate: receives pre-built records, returns match decisions.
//! No CLI or IO dependencies.

pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod model;
pub mod pool;
pub mod resolver;

pub use config::MatchConfig;
pub use distance::EditDistanceMeter;
pub use engine::migrate;
pub use error::MatchError;
pub use model::{Matchable, MatchResult, MatchTier, Matched, Record, StructuralKey};
pub use pool::{EntryId, MatchPool};
pub use resolver::{BestMatchResolver, DistanceMode, FuzzyThreshold, TierOrder};
