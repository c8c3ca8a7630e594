//! Individual adjacency rule implementations.
//!
//! Each rule is a pure function that inspects one turn, together with the
//! state carried over from the turn before it, and returns the violations it
//! finds. The validator service threads that state through the transcript.

use std::collections::HashSet;

use crate::transcript::{
    domain::{ToolCallId, Turn},
    error::{Violation, ViolationKind},
};

/// Reports a turn that mixes tool results with any other part kind.
#[must_use]
pub fn check_mixed_turn(turn_index: usize, turn: &Turn) -> Option<Violation> {
    if !turn.is_mixed() {
        return None;
    }

    let other_parts = turn
        .parts()
        .iter()
        .filter(|part| !part.is_tool_result())
        .count();
    Some(Violation::for_turn(
        turn_index,
        ViolationKind::MixedResultTurn,
        format!("tool results share the turn with {other_parts} other part(s)"),
    ))
}

/// Tool calls opened by one turn, awaiting their results in the next.
///
/// Each id is kept once, at the position of its first call in the turn.
#[derive(Debug, Default)]
pub struct PendingCalls<'a> {
    turn_index: usize,
    calls: Vec<(usize, &'a ToolCallId)>,
    ids: HashSet<&'a ToolCallId>,
}

impl<'a> PendingCalls<'a> {
    /// Collects the distinct calls opened by `turn`, in order.
    #[must_use]
    pub fn opened_by(turn_index: usize, turn: &'a Turn) -> Self {
        let mut ids = HashSet::new();
        let calls = turn
            .tool_call_positions()
            .filter(|(_, id)| ids.insert(*id))
            .collect();
        Self {
            turn_index,
            calls,
            ids,
        }
    }

    /// Index of the turn that opened the calls.
    #[must_use]
    pub const fn turn_index(&self) -> usize {
        self.turn_index
    }

    /// Returns `true` if `id` is awaiting a result.
    #[must_use]
    pub fn contains(&self, id: &ToolCallId) -> bool {
        self.ids.contains(id)
    }

    /// Returns `true` if no call is awaiting a result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Iterates over the pending ids in call order.
    pub fn ids(&self) -> impl Iterator<Item = &'a ToolCallId> + '_ {
        self.calls.iter().map(|(_, id)| *id)
    }
}

/// Reports tool call ids already used by an earlier call.
///
/// `seen` accumulates every call id encountered so far and is updated with
/// the ids of `turn`.
pub fn check_duplicate_calls<'a>(
    turn_index: usize,
    turn: &'a Turn,
    seen: &mut HashSet<&'a ToolCallId>,
) -> Vec<Violation> {
    turn.tool_call_positions()
        .filter(|(_, id)| !seen.insert(*id))
        .map(|(position, id)| {
            Violation::for_call(
                turn_index,
                position,
                id.clone(),
                ViolationKind::DuplicateCallId,
                "tool call id is used by an earlier call",
            )
        })
        .collect()
}

/// Reports tool results that do not answer a call left pending by the
/// previous turn, including second answers to the same call.
#[must_use]
pub fn check_orphan_results(
    turn_index: usize,
    turn: &Turn,
    pending: &PendingCalls<'_>,
) -> Vec<Violation> {
    let mut answered: HashSet<&ToolCallId> = HashSet::new();
    let mut violations = Vec::new();

    for (position, id) in turn.tool_result_positions() {
        if !pending.contains(id) {
            violations.push(Violation::for_call(
                turn_index,
                position,
                id.clone(),
                ViolationKind::OrphanResult,
                "result answers no tool call from the previous turn",
            ));
        } else if !answered.insert(id) {
            violations.push(Violation::for_call(
                turn_index,
                position,
                id.clone(),
                ViolationKind::OrphanResult,
                "tool call is already answered in this turn",
            ));
        }
    }

    violations
}

/// Reports pending calls left unanswered by the following turn.
///
/// `next` is `None` when the calls sit in the last turn of the conversation.
/// Violations are reported against the turn and position of the call.
#[must_use]
pub fn check_pending_results(pending: &PendingCalls<'_>, next: Option<&Turn>) -> Vec<Violation> {
    if pending.is_empty() {
        return Vec::new();
    }
    let answered: HashSet<&ToolCallId> = next
        .map(|turn| turn.tool_result_ids().collect())
        .unwrap_or_default();
    let detail = if next.is_some() {
        "no matching result in the next turn"
    } else {
        "conversation ends before the result"
    };

    pending
        .calls
        .iter()
        .filter(|(_, id)| !answered.contains(*id))
        .map(|(position, id)| {
            Violation::for_call(
                pending.turn_index,
                *position,
                (*id).clone(),
                ViolationKind::MissingOrMisplacedResult,
                detail,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{
        domain::{ContentPart, Role},
        tests::fixtures::{call, id, result, text},
    };
    use rstest::rstest;

    #[rstest]
    fn mixed_turn_is_reported_once() {
        let turn = Turn::new(
            Role::Assistant,
            vec![text("a"), result("call-1"), text("b"), result("call-2")],
        );
        let violation = check_mixed_turn(3, &turn).expect("mixed turn");
        assert_eq!(violation.turn_index, 3);
        assert_eq!(violation.part_index, 0);
        assert_eq!(violation.kind, ViolationKind::MixedResultTurn);
        assert!(violation.tool_call_id.is_none());
    }

    #[rstest]
    #[case::results_only(vec![result("call-1"), result("call-2")])]
    #[case::no_results(vec![text("a"), call("call-1")])]
    #[case::empty(vec![])]
    fn unmixed_turns_pass(#[case] parts: Vec<ContentPart>) {
        let turn = Turn::new(Role::Assistant, parts);
        assert!(check_mixed_turn(0, &turn).is_none());
    }

    #[rstest]
    fn duplicate_calls_accumulate_across_turns() {
        let first = Turn::new(Role::Assistant, vec![call("call-1")]);
        let second = Turn::new(Role::Assistant, vec![call("call-2"), call("call-1")]);
        let mut seen = HashSet::new();

        assert!(check_duplicate_calls(0, &first, &mut seen).is_empty());
        let violations = check_duplicate_calls(2, &second, &mut seen);

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].tool_call_id, Some(id("call-1")));
        assert_eq!(violations[0].turn_index, 2);
        assert_eq!(violations[0].part_index, 1);
    }

    #[rstest]
    fn orphan_results_include_second_answers() {
        let opener = Turn::new(Role::Assistant, vec![call("call-1")]);
        let pending = PendingCalls::opened_by(0, &opener);
        let turn = Turn::new(
            Role::Tool,
            vec![result("call-1"), result("call-1"), result("call-9")],
        );

        let violations = check_orphan_results(1, &turn, &pending);

        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::OrphanResult));
        let positions: Vec<usize> = violations.iter().map(|v| v.part_index).collect();
        assert_eq!(positions, vec![1, 2]);
        assert_eq!(violations[1].tool_call_id, Some(id("call-9")));
    }

    #[rstest]
    fn pending_results_report_partial_resolution() {
        let opener = Turn::new(
            Role::Assistant,
            vec![text("checking"), call("call-a"), call("call-b")],
        );
        let pending = PendingCalls::opened_by(4, &opener);
        let next = Turn::new(Role::Tool, vec![result("call-b")]);

        let violations = check_pending_results(&pending, Some(&next));

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].tool_call_id, Some(id("call-a")));
        assert_eq!(violations[0].turn_index, 4);
        assert_eq!(violations[0].part_index, 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingOrMisplacedResult);
    }

    #[rstest]
    fn pending_results_at_end_of_conversation() {
        let opener = Turn::new(Role::Assistant, vec![call("call-a")]);
        let violations = check_pending_results(&PendingCalls::opened_by(0, &opener), None);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].detail.contains("ends"));
    }

    #[rstest]
    fn nothing_pending_reports_nothing() {
        assert!(check_pending_results(&PendingCalls::default(), None).is_empty());
    }

    #[rstest]
    fn pending_calls_are_distinct_and_ordered() {
        let turn = Turn::new(
            Role::Assistant,
            vec![call("call-2"), text("x"), call("call-1"), call("call-2")],
        );
        let pending = PendingCalls::opened_by(7, &turn);

        let ids: Vec<&str> = pending.ids().map(ToolCallId::as_str).collect();
        assert_eq!(ids, vec!["call-2", "call-1"]);
        assert_eq!(pending.turn_index(), 7);
        assert!(pending.contains(&id("call-1")));
        assert!(!pending.contains(&id("call-3")));
    }

    #[rstest]
    fn wide_parallel_groups_resolve_in_any_order() {
        let ids: Vec<String> = (0..2_000).map(|n| format!("call-{n}")).collect();
        let opener = Turn::new(Role::Assistant, ids.iter().map(|n| call(n)).collect());
        let answers = Turn::new(Role::Tool, ids.iter().rev().map(|n| result(n)).collect());
        let pending = PendingCalls::opened_by(0, &opener);

        assert!(check_orphan_results(1, &answers, &pending).is_empty());
        assert!(check_pending_results(&pending, Some(&answers)).is_empty());
    }
}
