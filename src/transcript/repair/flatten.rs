//! Step 1: split stored turns into result-only and result-free turns.

use crate::transcript::{
    domain::{ContentPart, Role, Turn},
    ports::repairer::RepairStats,
};

/// A maximal run of parts of one structural kind.
#[derive(Debug, PartialEq)]
enum Run {
    Results(Vec<ContentPart>),
    Content(Vec<ContentPart>),
}

impl Run {
    const fn for_part(part: &ContentPart) -> Self {
        if part.is_tool_result() {
            Self::Results(Vec::new())
        } else {
            Self::Content(Vec::new())
        }
    }

    const fn accepts(&self, part: &ContentPart) -> bool {
        matches!(
            (self, part.is_tool_result()),
            (Self::Results(_), true) | (Self::Content(_), false)
        )
    }

    fn push(&mut self, part: ContentPart) {
        match self {
            Self::Results(parts) | Self::Content(parts) => parts.push(part),
        }
    }
}

/// Partitions ordered parts into maximal runs of only tool results or only
/// other parts.
fn split_runs(parts: Vec<ContentPart>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    for part in parts {
        match runs.last_mut() {
            Some(run) if run.accepts(&part) => run.push(part),
            _ => {
                let mut run = Run::for_part(&part);
                run.push(part);
                runs.push(run);
            }
        }
    }
    runs
}

/// Flattens every turn of a transcript.
///
/// Empty turns produce nothing. The stats record how many turns were split,
/// how many results were regrouped and how many result turns changed role.
pub(crate) fn flatten(turns: Vec<Turn>, carrier: Role, stats: &mut RepairStats) -> Vec<Turn> {
    let mut flattened = Vec::with_capacity(turns.len());
    for turn in turns {
        if turn.is_empty() {
            stats.empty_turns_dropped += 1;
            continue;
        }
        let produced = flatten_turn(turn, carrier, stats);
        if produced.len() > 1 {
            stats.turns_split += 1;
        }
        flattened.extend(produced);
    }
    flattened
}

/// Flattens one stored turn.
///
/// Result runs separated only by call-free content answer the same call
/// group, so they are gathered into the first of them; the content they
/// skipped over follows the gathered result turn in its original order.
fn flatten_turn(turn: Turn, carrier: Role, stats: &mut RepairStats) -> Vec<Turn> {
    let role = turn.role();
    let mut out = Vec::new();
    let mut gathered: Option<Vec<ContentPart>> = None;
    let mut deferred: Vec<Vec<ContentPart>> = Vec::new();

    for run in split_runs(turn.into_parts()) {
        match run {
            Run::Results(parts) => match gathered.as_mut() {
                Some(results) => {
                    stats.results_regrouped += parts.len();
                    results.extend(parts);
                }
                None => gathered = Some(parts),
            },
            Run::Content(parts)
                if gathered.is_some() && !parts.iter().any(ContentPart::is_tool_call) =>
            {
                deferred.push(parts);
            }
            Run::Content(parts) => {
                flush(&mut out, &mut gathered, &mut deferred, role, carrier, stats);
                out.push(Turn::new(role, parts));
            }
        }
    }
    flush(&mut out, &mut gathered, &mut deferred, role, carrier, stats);
    out
}

fn flush(
    out: &mut Vec<Turn>,
    gathered: &mut Option<Vec<ContentPart>>,
    deferred: &mut Vec<Vec<ContentPart>>,
    role: Role,
    carrier: Role,
    stats: &mut RepairStats,
) {
    if let Some(results) = gathered.take() {
        if role != carrier {
            stats.roles_reassigned += 1;
        }
        out.push(Turn::new(carrier, results));
    }
    out.extend(deferred.drain(..).map(|parts| Turn::new(role, parts)));
}
