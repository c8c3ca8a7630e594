//! Step 3: classify violations that survive regrouping.
//!
//! Classification looks at the stored transcript, not the regrouped one, to
//! tell genuine data defects apart from counterparts that exist but sit too
//! far away for adjacency-only repair.

use std::collections::HashMap;

use crate::transcript::{
    domain::{ContentPart, Conversation, ToolCallId},
    error::{StructuralError, UnresolvedCause, UnresolvedId, Violation, ViolationKind},
    ports::validator::ValidationReport,
};

/// Positions of calls and results in the stored transcript's part order.
#[derive(Debug, Default)]
struct Provenance<'a> {
    calls: HashMap<&'a ToolCallId, Vec<usize>>,
    results: HashMap<&'a ToolCallId, Vec<usize>>,
}

impl<'a> Provenance<'a> {
    fn of(conversation: &'a Conversation) -> Self {
        let mut provenance = Self::default();
        for (position, part) in conversation.parts().enumerate() {
            match part {
                ContentPart::ToolCall(call) => {
                    provenance.calls.entry(&call.id).or_default().push(position);
                }
                ContentPart::ToolResult(result) => {
                    provenance
                        .results
                        .entry(&result.tool_call_id)
                        .or_default()
                        .push(position);
                }
                ContentPart::Text(_) | ContentPart::Reasoning(_) => {}
            }
        }
        provenance
    }

    fn positions<'m>(
        map: &'m HashMap<&'a ToolCallId, Vec<usize>>,
        id: &ToolCallId,
    ) -> &'m [usize] {
        map.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    fn cause(&self, violation: &Violation) -> UnresolvedCause {
        let Some(id) = violation.tool_call_id.as_ref() else {
            return UnresolvedCause::NotAdjacent;
        };
        let calls = Self::positions(&self.calls, id);
        let results = Self::positions(&self.results, id);

        match violation.kind {
            ViolationKind::DuplicateCallId => UnresolvedCause::Duplicate,
            ViolationKind::MixedResultTurn => UnresolvedCause::NotAdjacent,
            ViolationKind::OrphanResult if results.len() > 1 => UnresolvedCause::Duplicate,
            ViolationKind::OrphanResult => {
                let called_earlier = results
                    .first()
                    .is_some_and(|result| calls.iter().any(|call| call < result));
                if called_earlier {
                    UnresolvedCause::NotAdjacent
                } else {
                    UnresolvedCause::Missing
                }
            }
            ViolationKind::MissingOrMisplacedResult => {
                let answered_later = calls
                    .first()
                    .is_some_and(|call| results.iter().any(|result| result > call));
                if answered_later {
                    UnresolvedCause::NotAdjacent
                } else {
                    UnresolvedCause::Missing
                }
            }
        }
    }
}

/// Builds the structural error for a regrouped transcript that still fails
/// validation.
pub(crate) fn unresolved(original: &Conversation, report: &ValidationReport) -> StructuralError {
    let provenance = Provenance::of(original);
    let entries = report
        .violations()
        .iter()
        .map(|violation| UnresolvedId {
            tool_call_id: violation.tool_call_id.clone(),
            kind: violation.kind,
            turn_index: violation.turn_index,
            cause: provenance.cause(violation),
        })
        .collect();
    StructuralError::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{
        domain::{Role, Turn},
        tests::fixtures::{call, result, text},
        validation::validate,
    };
    use rstest::rstest;

    fn causes(conversation: &Conversation) -> Vec<(ViolationKind, UnresolvedCause)> {
        let report = validate(conversation);
        unresolved(conversation, &report)
            .unresolved()
            .iter()
            .map(|entry| (entry.kind, entry.cause))
            .collect()
    }

    #[rstest]
    fn never_called_result_is_missing() {
        let conversation = Conversation::new(vec![
            Turn::new(Role::User, vec![text("hi")]),
            Turn::new(Role::Tool, vec![result("ghost")]),
        ]);
        assert_eq!(
            causes(&conversation),
            vec![(ViolationKind::OrphanResult, UnresolvedCause::Missing)]
        );
    }

    #[rstest]
    fn result_before_its_call_is_missing() {
        let conversation = Conversation::new(vec![
            Turn::new(Role::Tool, vec![result("call-1")]),
            Turn::new(Role::Assistant, vec![call("call-1")]),
        ]);
        assert_eq!(
            causes(&conversation),
            vec![
                (ViolationKind::OrphanResult, UnresolvedCause::Missing),
                (
                    ViolationKind::MissingOrMisplacedResult,
                    UnresolvedCause::Missing
                ),
            ]
        );
    }

    #[rstest]
    fn distant_result_is_not_adjacent() {
        let conversation = Conversation::new(vec![
            Turn::new(Role::Assistant, vec![call("call-1")]),
            Turn::new(Role::User, vec![text("still there?")]),
            Turn::new(Role::Tool, vec![result("call-1")]),
        ]);
        assert_eq!(
            causes(&conversation),
            vec![
                (
                    ViolationKind::MissingOrMisplacedResult,
                    UnresolvedCause::NotAdjacent
                ),
                (ViolationKind::OrphanResult, UnresolvedCause::NotAdjacent),
            ]
        );
    }

    #[rstest]
    fn repeated_call_id_is_duplicate() {
        let conversation = Conversation::new(vec![
            Turn::new(Role::Assistant, vec![call("call-1")]),
            Turn::new(Role::Tool, vec![result("call-1")]),
            Turn::new(Role::Assistant, vec![call("call-1")]),
            Turn::new(Role::Tool, vec![result("call-1")]),
        ]);
        assert!(
            causes(&conversation)
                .contains(&(ViolationKind::DuplicateCallId, UnresolvedCause::Duplicate))
        );
    }
}
