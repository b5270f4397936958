use crate::evidence::compute_summary;
use crate::model::{Matchable, MigrationMeta, MigrationOutcome, PairOutcome};
use crate::pool::MatchPool;
use crate::resolver::{BestMatchResolver, FuzzyThreshold};

/// Match every current record against the previous pool, in order.
///
/// Each match consumes its previous record, so the pairing is one-to-one
/// and first-come-first-served rather than globally optimal.
pub fn migrate<C, P>(
    current: &[C],
    mut pool: MatchPool<P>,
    resolver: &BestMatchResolver,
    threshold: FuzzyThreshold,
) -> MigrationOutcome<P>
where
    C: Matchable,
    P: Matchable,
{
    let mut pairs = Vec::with_capacity(current.len());

    for (current_index, record) in current.iter().enumerate() {
        let found = resolver
            .resolve(record, &pool, threshold)
            .matched()
            .map(|m| (m.entry, m.tier, m.distance));

        let pair = match found {
            Some((entry, tier, distance)) => {
                log::debug!(
                    "record {current_index} ({}): {tier} match on {entry}",
                    record.stable_id().unwrap_or("-"),
                );
                PairOutcome {
                    current_index,
                    previous: pool.consume(entry),
                    tier: Some(tier),
                    distance,
                }
            }
            None => {
                log::debug!(
                    "record {current_index} ({}): no match",
                    record.stable_id().unwrap_or("-"),
                );
                PairOutcome {
                    current_index,
                    previous: None,
                    tier: None,
                    distance: None,
                }
            }
        };
        pairs.push(pair);
    }

    let leftover = pool.into_remaining();
    let summary = compute_summary(&pairs, leftover.len());

    log::info!(
        "migrated {} record(s): {} identity, {} structural, {} fuzzy, {} unmatched, {} previous left over",
        summary.total,
        summary.identity,
        summary.structural,
        summary.fuzzy,
        summary.unmatched,
        summary.leftover_previous,
    );

    MigrationOutcome {
        meta: MigrationMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            threshold: threshold.value(),
            tier_order: resolver.tier_order(),
        },
        pairs,
        leftover,
        summary,
    }
}
