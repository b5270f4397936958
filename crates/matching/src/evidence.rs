use crate::model::{MatchTier, MigrationSummary, PairOutcome};

/// Compute summary statistics from per-record outcomes.
pub fn compute_summary<P>(pairs: &[PairOutcome<P>], leftover_previous: usize) -> MigrationSummary {
    let mut summary = MigrationSummary {
        total: pairs.len(),
        leftover_previous,
        ..MigrationSummary::default()
    };

    for pair in pairs {
        match pair.tier {
            Some(MatchTier::Identity) => summary.identity += 1,
            Some(MatchTier::Structural) => summary.structural += 1,
            Some(MatchTier::Fuzzy) => summary.fuzzy += 1,
            None => summary.unmatched += 1,
        }
    }

    summary
}
