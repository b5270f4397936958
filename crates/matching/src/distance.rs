//! Weighted Levenshtein distance.
//!
//! Two modes: `distance` fills the whole recurrence, `bounded_distance`
//! restricts each row to a diagonal band and bails out once the diagonal
//! exceeds the bound. Strings are compared per Unicode scalar value with
//! ordinal equality.

use crate::error::MatchError;

const UNREACHABLE: usize = usize::MAX;

/// When a banded computation stops early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cutoff {
    /// Diagonal cell of the row exceeds the bound.
    Diagonal,
    /// Every cell of the row exceeds the bound; a lower bound on the result.
    RowMinimum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditDistanceMeter {
    insertion: usize,
    deletion: usize,
    substitution: usize,
}

impl Default for EditDistanceMeter {
    fn default() -> Self {
        Self {
            insertion: 1,
            deletion: 1,
            substitution: 1,
        }
    }
}

impl EditDistanceMeter {
    /// Create a meter with the given operation weights.
    ///
    /// Substituting a character for itself is always free; every other
    /// substitution costs `substitution`.
    pub fn new(insertion: i64, deletion: i64, substitution: i64) -> Result<Self, MatchError> {
        Ok(Self {
            insertion: weight("insertion", insertion)?,
            deletion: weight("deletion", deletion)?,
            substitution: weight("substitution", substitution)?,
        })
    }

    pub fn insertion_weight(&self) -> usize {
        self.insertion
    }

    pub fn deletion_weight(&self) -> usize {
        self.deletion
    }

    pub fn substitution_weight(&self) -> usize {
        self.substitution
    }

    /// Exact weighted edit distance from `a` to `b`.
    pub fn distance(&self, a: &str, b: &str) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.distance_chars(&a, &b)
    }

    /// Banded edit distance with early exit.
    ///
    /// The result never exceeds `max`. A result equal to `max` means the
    /// distance is at least `max` or was not computed exactly: once the
    /// diagonal cell of a row passes `max` the remaining rows are skipped.
    /// Equal to [`distance`](Self::distance) whenever the optimal edit path
    /// stays inside the band and costs at most `max`.
    pub fn bounded_distance(&self, a: &str, b: &str, max: usize) -> usize {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.bounded_chars(&a, &b, max, Cutoff::Diagonal)
    }

    /// Distance divided by the length of the shorter string.
    ///
    /// Two empty strings are identical (0.0); one empty string against a
    /// non-empty one is maximally dissimilar (1.0).
    pub fn normalized_distance(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        self.normalized_chars(&a, &b)
    }

    /// Bounded counterpart of [`normalized_distance`](Self::normalized_distance).
    ///
    /// `max_normalized` is scaled by the shorter length and truncated to an
    /// absolute bound for [`bounded_distance`](Self::bounded_distance).
    pub fn normalized_bounded_distance(&self, a: &str, b: &str, max_normalized: f64) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if let Some(degenerate) = degenerate_normalized(a.len(), b.len()) {
            return degenerate;
        }
        let shorter = a.len().min(b.len());
        // `as` saturates: negative and NaN bounds become 0.
        let max = (max_normalized * shorter as f64) as usize;
        self.bounded_chars(&a, &b, max, Cutoff::Diagonal) as f64 / shorter as f64
    }

    pub(crate) fn normalized_chars(&self, a: &[char], b: &[char]) -> f64 {
        if let Some(degenerate) = degenerate_normalized(a.len(), b.len()) {
            return degenerate;
        }
        let shorter = a.len().min(b.len());
        self.distance_chars(a, b) as f64 / shorter as f64
    }

    /// Normalized distance if it is strictly below `threshold`, else `None`.
    ///
    /// Uses the band one wider than the largest accepted absolute distance
    /// and stops only when a whole row exceeds it, so the answer always
    /// agrees with [`normalized_chars`](Self::normalized_chars). Free
    /// insertions or deletions make the band meaningless; those meters
    /// compute the full table.
    pub(crate) fn normalized_within(&self, a: &[char], b: &[char], threshold: f64) -> Option<f64> {
        if let Some(degenerate) = degenerate_normalized(a.len(), b.len()) {
            return (degenerate < threshold).then_some(degenerate);
        }
        if self.insertion == 0 || self.deletion == 0 {
            let d = self.normalized_chars(a, b);
            return (d < threshold).then_some(d);
        }
        let shorter = a.len().min(b.len());
        let limit = threshold * shorter as f64;
        let bound = (limit.floor() as usize).saturating_add(1);
        let d = self.bounded_chars(a, b, bound, Cutoff::RowMinimum);
        if d >= bound {
            return None;
        }
        let normalized = d as f64 / shorter as f64;
        (normalized < threshold).then_some(normalized)
    }

    fn distance_chars(&self, a: &[char], b: &[char]) -> usize {
        let n = b.len();
        let mut prev: Vec<usize> = (0..=n).map(|j| j.saturating_mul(self.insertion)).collect();
        let mut curr = vec![0; n + 1];

        for (i, ca) in a.iter().enumerate() {
            curr[0] = (i + 1).saturating_mul(self.deletion);
            for (j, cb) in b.iter().enumerate() {
                let substitution = if ca == cb { 0 } else { self.substitution };
                curr[j + 1] = prev[j + 1]
                    .saturating_add(self.deletion)
                    .min(curr[j].saturating_add(self.insertion))
                    .min(prev[j].saturating_add(substitution));
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[n]
    }

    fn bounded_chars(&self, a: &[char], b: &[char], max: usize, cutoff: Cutoff) -> usize {
        let (m, n) = (a.len(), b.len());
        // The band cannot reach the final cell.
        if m.abs_diff(n) > max {
            return max;
        }

        let mut prev: Vec<usize> = (0..=n).map(|j| j.saturating_mul(self.insertion)).collect();
        let mut curr = vec![UNREACHABLE; n + 1];

        for i in 1..=m {
            let lo = i.saturating_sub(max).max(1);
            let hi = n.min(i.saturating_add(max));

            curr[0] = i.saturating_mul(self.deletion);
            // Cells bordering the band may hold values from two rows ago.
            if lo > 1 {
                curr[lo - 1] = UNREACHABLE;
            }
            for j in lo..=hi {
                let substitution = if a[i - 1] == b[j - 1] { 0 } else { self.substitution };
                curr[j] = prev[j]
                    .saturating_add(self.deletion)
                    .min(curr[j - 1].saturating_add(self.insertion))
                    .min(prev[j - 1].saturating_add(substitution));
            }
            if hi < n {
                curr[hi + 1] = UNREACHABLE;
            }

            let exceeded = match cutoff {
                Cutoff::Diagonal => curr[i.min(n)] > max,
                Cutoff::RowMinimum => {
                    let band_min = curr[lo..=hi].iter().copied().min().unwrap_or(UNREACHABLE);
                    band_min.min(curr[0]) > max
                }
            };
            if exceeded {
                return max;
            }
            std::mem::swap(&mut prev, &mut curr);
        }

        prev[n].min(max)
    }
}

fn weight(operation: &'static str, value: i64) -> Result<usize, MatchError> {
    usize::try_from(value).map_err(|_| MatchError::InvalidWeight { operation, value })
}

fn degenerate_normalized(a_len: usize, b_len: usize) -> Option<f64> {
    match (a_len, b_len) {
        (0, 0) => Some(0.0),
        (0, _) | (_, 0) => Some(1.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> EditDistanceMeter {
        EditDistanceMeter::default()
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn kitten_sitting() {
        assert_eq!(unit().distance("kitten", "sitting"), 3);
    }

    #[test]
    fn empty_to_abc_is_three_insertions() {
        assert_eq!(unit().distance("", "abc"), 3);
        assert_eq!(unit().distance("abc", ""), 3);
    }

    #[test]
    fn identical_strings() {
        assert_eq!(unit().distance("backstory", "backstory"), 0);
        assert_eq!(unit().distance("", ""), 0);
    }

    #[test]
    fn weights_apply_per_operation() {
        let meter = EditDistanceMeter::new(2, 3, 5).unwrap();
        // Two insertions
        assert_eq!(meter.distance("", "ab"), 4);
        // Two deletions
        assert_eq!(meter.distance("ab", ""), 6);
        // Substitution and delete + insert both cost 5
        assert_eq!(meter.distance("a", "b"), 5);
        let cheap_sub = EditDistanceMeter::new(2, 3, 1).unwrap();
        assert_eq!(cheap_sub.distance("a", "b"), 1);
    }

    #[test]
    fn asymmetric_weights_are_asymmetric() {
        let meter = EditDistanceMeter::new(1, 4, 10).unwrap();
        assert_eq!(meter.distance("abc", "ab"), 4);
        assert_eq!(meter.distance("ab", "abc"), 1);
    }

    #[test]
    fn compares_scalar_values_not_bytes() {
        // Cyrillic: one substituted letter, each two bytes in UTF-8
        assert_eq!(unit().distance("ёж", "еж"), 1);
        assert_eq!(unit().normalized_distance("ёж", "еж"), 0.5);
    }

    #[test]
    fn negative_weight_rejected() {
        let err = EditDistanceMeter::new(1, -1, 1).unwrap_err();
        assert_eq!(err, MatchError::InvalidWeight { operation: "deletion", value: -1 });
        assert!(EditDistanceMeter::new(-3, 1, 1).is_err());
        assert!(EditDistanceMeter::new(0, 0, 0).is_ok());
    }

    #[test]
    fn bounded_matches_exact_within_band() {
        let m = unit();
        assert_eq!(m.bounded_distance("kitten", "sitting", 3), 3);
        assert_eq!(m.bounded_distance("a red fox", "a red fax", 1), 1);
        assert_eq!(m.bounded_distance("same", "same", 0), 0);
    }

    #[test]
    fn bounded_clamps_to_max() {
        let m = unit();
        assert_eq!(m.bounded_distance("kitten", "sitting", 2), 2);
    }

    #[test]
    fn bounded_early_exit_on_diagonal() {
        // Diagonal reaches 3 on row 3; exact distance is 6.
        let m = unit();
        assert_eq!(m.distance("abcdef", "uvwxyz"), 6);
        assert_eq!(m.bounded_distance("abcdef", "uvwxyz", 2), 2);
    }

    #[test]
    fn bounded_length_gap_beyond_band() {
        assert_eq!(unit().bounded_distance("a", "abcdef", 3), 3);
        assert_eq!(unit().bounded_distance("", "abcd", 2), 2);
    }

    #[test]
    fn bounded_longer_first_argument() {
        let m = unit();
        assert_eq!(m.distance("sitting", "kitten"), 3);
        assert_eq!(m.bounded_distance("sitting", "kitten", 3), 3);
        assert_eq!(m.bounded_distance("abcd", "", 4), 4);
    }

    #[test]
    fn normalized_degenerate_cases() {
        let m = unit();
        assert_eq!(m.normalized_distance("", ""), 0.0);
        assert_eq!(m.normalized_distance("", "abc"), 1.0);
        assert_eq!(m.normalized_distance("abc", ""), 1.0);
        assert_eq!(m.normalized_bounded_distance("", "", 0.5), 0.0);
        assert_eq!(m.normalized_bounded_distance("x", "", 0.5), 1.0);
    }

    #[test]
    fn normalized_uses_shorter_length() {
        let m = unit();
        let d = m.normalized_distance("a red fox", "a red fax");
        assert!((d - 1.0 / 9.0).abs() < 1e-9);
        // 2 insertions over shorter length 3
        let d = m.normalized_distance("abc", "abcde");
        assert!((d - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn normalized_bounded_truncates_bound() {
        let m = unit();
        // 0.25 * 6 = 1.5 -> bound 1; exact distance 3 is clipped to 1
        let d = m.normalized_bounded_distance("kitten", "sitting", 0.25);
        assert!((d - 1.0 / 6.0).abs() < 1e-9);
        let d = m.normalized_bounded_distance("kitten", "sitting", 1.0);
        assert!((d - 3.0 / 6.0).abs() < 1e-9);
    }

    #[test]
    fn within_never_accepts_clipped_results() {
        let m = unit();
        // 0.2 * 9 = 1.8: distance 1 accepted
        let d = m.normalized_within(&chars("a red fox"), &chars("a red fax"), 0.2);
        assert!(d.is_some());
        // distance 2 (0.22) rejected even though the truncated bound is 1
        assert_eq!(m.normalized_within(&chars("a red fox"), &chars("a rod fax"), 0.2), None);
        assert_eq!(m.normalized_within(&chars("a red fox"), &chars("a red fax"), 0.05), None);
    }

    #[test]
    fn within_survives_shift_that_trips_the_diagonal() {
        let m = unit();
        let (query, candidate) = (chars("abcdefgh"), chars("xyabcdefgh"));
        // Diagonal passes the bound of 3 on row 4 although the distance is 2
        assert_eq!(m.bounded_distance("abcdefgh", "xyabcdefgh", 3), 3);
        assert_eq!(m.normalized_within(&query, &candidate, 0.3), Some(0.25));
        assert_eq!(m.normalized_within(&candidate, &query, 0.3), Some(0.25));
    }

    #[test]
    fn within_with_free_insertions_matches_exact() {
        let m = EditDistanceMeter::new(0, 1, 1).unwrap();
        let (a, b) = (chars("ab"), chars("xxxxxxab"));
        assert_eq!(m.normalized_chars(&a, &b), 0.0);
        assert_eq!(m.normalized_within(&a, &b, 0.1), Some(0.0));
    }

    #[test]
    fn within_degenerate_cases() {
        let m = unit();
        assert_eq!(m.normalized_within(&[], &[], 0.1), Some(0.0));
        assert_eq!(m.normalized_within(&[], &chars("abc"), 0.5), None);
        assert_eq!(m.normalized_within(&[], &[], 0.0), None);
    }
}
