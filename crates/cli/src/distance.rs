//! `subtrans distance` - weighted edit distance between two strings.

use serde::Serialize;
use subtrans_matching::EditDistanceMeter;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistanceKind {
    Exact,
    Bounded(usize),
    Normalized,
    NormalizedBounded(f64),
}

impl DistanceKind {
    pub fn from_flags(bounded: Option<usize>, normalized: bool, normalized_bounded: Option<f64>) -> Self {
        match (bounded, normalized, normalized_bounded) {
            (Some(max), _, _) => Self::Bounded(max),
            (_, _, Some(max)) => Self::NormalizedBounded(max),
            (_, true, _) => Self::Normalized,
            _ => Self::Exact,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Bounded(_) => "bounded",
            Self::Normalized => "normalized",
            Self::NormalizedBounded(_) => "normalized_bounded",
        }
    }
}

#[derive(Debug, Serialize)]
struct DistanceOutput<'a> {
    a: &'a str,
    b: &'a str,
    mode: &'static str,
    weights: [usize; 3],
    distance: serde_json::Value,
}

pub fn cmd_distance(
    a: &str,
    b: &str,
    kind: DistanceKind,
    (insertion, deletion, substitution): (i64, i64, i64),
    json: bool,
) -> Result<(), CliError> {
    let meter = EditDistanceMeter::new(insertion, deletion, substitution)
        .map_err(|e| CliError::usage(e.to_string()))?;

    let value = match kind {
        DistanceKind::Exact => serde_json::Value::from(meter.distance(a, b)),
        DistanceKind::Bounded(max) => serde_json::Value::from(meter.bounded_distance(a, b, max)),
        DistanceKind::Normalized => serde_json::Value::from(meter.normalized_distance(a, b)),
        DistanceKind::NormalizedBounded(max) => {
            if max.is_nan() || max < 0.0 {
                return Err(CliError::usage(format!(
                    "--normalized-bounded must be a non-negative number, got {max}"
                )));
            }
            serde_json::Value::from(meter.normalized_bounded_distance(a, b, max))
        }
    };

    if json {
        let out = DistanceOutput {
            a,
            b,
            mode: kind.name(),
            weights: [
                meter.insertion_weight(),
                meter.deletion_weight(),
                meter.substitution_weight(),
            ],
            distance: value,
        };
        let text = serde_json::to_string_pretty(&out)
            .map_err(|e| CliError::general(format!("JSON serialization error: {e}")))?;
        println!("{text}");
    } else {
        println!("{value}");
    }
    Ok(())
}
