//! Step 2: fold adjacent turns of the same role and kind together.

use crate::transcript::{domain::Turn, ports::repairer::RepairStats};

/// Merges adjacent turns sharing a role and a kind.
///
/// Kind means result-only versus result-free, so a call-bearing turn is never
/// folded into the result turn that answers it, and two result turns are only
/// merged when nothing separates them.
pub(crate) fn merge_adjacent(turns: Vec<Turn>, stats: &mut RepairStats) -> Vec<Turn> {
    let mut merged: Vec<Turn> = Vec::with_capacity(turns.len());
    for turn in turns {
        if let Some(last) = merged.last_mut()
            && can_merge(last, &turn)
        {
            last.extend_parts(turn.into_parts());
            stats.turns_merged += 1;
            continue;
        }
        merged.push(turn);
    }
    merged
}

fn can_merge(previous: &Turn, next: &Turn) -> bool {
    previous.role() == next.role() && previous.is_result_only() == next.is_result_only()
}
