//! Key transition tables and the geometric table builder.
//!
//! A key transition expresses how likely it is to move from a reference
//! key to each of the 24 major/minor keys, in the same index layout as
//! key profiles (0-11 major, 12-23 minor). Tables come in families that
//! mutate differently, so each registry entry carries an explicit
//! [`TransitionKind`] tag set at creation and inherited by mutants.

use serde::{Deserialize, Serialize};

/// Number of entries in a key transition table.
pub const TRANSITION_LEN: usize = 24;

/// Index of the entry holding `ratio^1` in a geometric table. Geometric
/// mutation reads the raw ratio parameter back from this slot.
pub const RATIO_INDEX: usize = 13;

/// Mutation family of a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Built from integer powers of a single ratio parameter; mutates by
    /// redrawing the ratio and regenerating the whole table.
    Geometric,
    /// Free-form weights; mutates by transferring a fraction of one
    /// entry's weight to another.
    Swap,
    /// No mutation policy applies; entries of this kind always pass
    /// through unchanged.
    Other,
}

/// One key transition table plus its mutation family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyTransition {
    pub kind: TransitionKind,
    pub values: Vec<f64>,
}

/// Circle-of-fifths distance from the reference tonic for each of the 12
/// pitch classes (C, C#, D, ... B).
const FIFTHS_DISTANCE: [i32; 12] = [0, 5, 2, 3, 4, 1, 6, 1, 4, 3, 2, 5];

/// One more than the largest key distance, so the nearest key gets the
/// highest power of the ratio.
const MAX_DISTANCE: i32 = 7;

/// Build a geometric transition table for `ratio`.
///
/// Entry `j` is `ratio^(MAX_DISTANCE - d(j))` where `d` is the
/// circle-of-fifths distance of key `j` from the reference key; minor
/// keys pay an extra unit of distance for the mode change. The layout
/// puts `ratio^1` at [`RATIO_INDEX`], which is where geometric mutation
/// reads the parameter back from.
pub fn geometric_table(ratio: f64) -> KeyTransition {
    let values = (0..TRANSITION_LEN)
        .map(|j| {
            let distance = if j < 12 {
                FIFTHS_DISTANCE[j]
            } else {
                FIFTHS_DISTANCE[j - 12] + 1
            };
            ratio.powi(MAX_DISTANCE - distance)
        })
        .collect();
    KeyTransition {
        kind: TransitionKind::Geometric,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_table_holds_ratio_at_ratio_index() {
        for ratio in [2.0, 5.0, 9.0] {
            let table = geometric_table(ratio);
            assert_eq!(table.values.len(), TRANSITION_LEN);
            assert_eq!(table.values[RATIO_INDEX], ratio);
        }
    }

    #[test]
    fn geometric_table_peaks_at_reference_key() {
        let table = geometric_table(3.0);
        let max = table
            .values
            .iter()
            .cloned()
            .fold(f64::MIN, f64::max);
        // Reference key is at distance zero, so it carries the top power.
        assert_eq!(table.values[0], max);
        assert_eq!(table.values[0], 3.0f64.powi(7));
    }

    #[test]
    fn geometric_table_is_tagged_geometric() {
        assert_eq!(geometric_table(4.0).kind, TransitionKind::Geometric);
    }

    #[test]
    fn geometric_table_minor_keys_pay_mode_penalty() {
        let table = geometric_table(2.0);
        for pc in 0..12 {
            // Same tonic, minor mode: one extra distance step.
            assert_eq!(table.values[12 + pc], table.values[pc] / 2.0);
        }
    }
}
