//! BDD steps for preparing stored conversations for replay.

use std::sync::{Arc, Mutex};

use eyre::{WrapErr, eyre};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use turnstile::transcript::{
    adapters::InMemoryConversationStore,
    domain::ConversationId,
    error::ReplayError,
    ports::diagnostics::{DiagnosticsSink, RepairEvent},
    services::{Prepared, ReplayPreparer},
    validation::validate,
};

const SINGLE_MIXED_TURN: &str = r#"[
  {"role": "assistant", "parts": [
    {"type": "text", "text": "Let me check"},
    {"type": "tool_call", "id": "call-1", "name": "read_file", "arguments": {"path": "a.txt"}},
    {"type": "tool_result", "tool_call_id": "call-1", "name": "read_file", "payload": "contents"},
    {"type": "text", "text": "done"}
  ]}
]"#;

const INTERLEAVED_PARALLEL_RESULTS: &str = r#"[
  {"role": "assistant", "parts": [
    {"type": "tool_call", "id": "call-a", "name": "search", "arguments": {"q": "a"}},
    {"type": "tool_call", "id": "call-b", "name": "search", "arguments": {"q": "b"}}
  ]},
  {"role": "assistant", "parts": [
    {"type": "tool_result", "tool_call_id": "call-b", "name": "search", "payload": []},
    {"type": "text", "text": "noise"},
    {"type": "tool_result", "tool_call_id": "call-a", "name": "search", "payload": [], "is_error": true}
  ]}
]"#;

const ALREADY_VALID: &str = r#"[
  {"role": "assistant", "parts": [
    {"type": "tool_call", "id": "call-1", "name": "search", "arguments": {}}
  ]},
  {"role": "tool", "parts": [
    {"type": "tool_result", "tool_call_id": "call-1", "name": "search", "payload": "ok"}
  ]},
  {"role": "assistant", "parts": [{"type": "text", "text": "found it"}]}
]"#;

const NEVER_CALLED: &str = r#"[
  {"role": "user", "parts": [{"type": "text", "text": "hello"}]},
  {"role": "tool", "parts": [
    {"type": "tool_result", "tool_call_id": "call-ghost", "name": "search", "payload": "?"}
  ]}
]"#;

/// Sink that remembers which kinds of event it saw.
#[derive(Default)]
struct EventLog {
    names: Mutex<Vec<&'static str>>,
}

impl EventLog {
    fn contains(&self, name: &str) -> Result<bool, eyre::Report> {
        let names = self
            .names
            .lock()
            .map_err(|_| eyre!("event log lock poisoned"))?;
        Ok(names.contains(&name))
    }
}

impl DiagnosticsSink for EventLog {
    fn record(&self, event: &RepairEvent) {
        let name = match event {
            RepairEvent::Validated { .. } => "validated",
            RepairEvent::Repaired { .. } => "repaired",
            RepairEvent::Rejected { .. } => "rejected",
        };
        if let Ok(mut names) = self.names.lock() {
            names.push(name);
        }
    }
}

#[derive(Default)]
struct ReplayWorld {
    store: Arc<InMemoryConversationStore>,
    events: Arc<EventLog>,
    conversation_id: ConversationId,
    outcome: Option<Result<Prepared, ReplayError>>,
}

impl ReplayWorld {
    fn store_record(&self, record: &str) -> Result<(), eyre::Report> {
        self.store
            .insert_json(self.conversation_id, record)
            .wrap_err("stored record should decode")
    }

    fn prepared(&self) -> Result<&Prepared, eyre::Report> {
        match &self.outcome {
            Some(Ok(prepared)) => Ok(prepared),
            Some(Err(error)) => Err(eyre!("preparation failed: {error}")),
            None => Err(eyre!("conversation has not been prepared")),
        }
    }

    fn error(&self) -> Result<&ReplayError, eyre::Report> {
        match &self.outcome {
            Some(Err(error)) => Ok(error),
            Some(Ok(_)) => Err(eyre!("preparation unexpectedly succeeded")),
            None => Err(eyre!("conversation has not been prepared")),
        }
    }
}

#[fixture]
fn world() -> ReplayWorld {
    ReplayWorld::default()
}

fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

#[given("a stored conversation where one assistant turn holds a call and its result")]
fn single_mixed_turn(world: &mut ReplayWorld) -> Result<(), eyre::Report> {
    world.store_record(SINGLE_MIXED_TURN)
}

#[given("a stored conversation with parallel results interleaved with text")]
fn interleaved_parallel_results(world: &mut ReplayWorld) -> Result<(), eyre::Report> {
    world.store_record(INTERLEAVED_PARALLEL_RESULTS)
}

#[given("a stored conversation that is already valid")]
fn already_valid(world: &mut ReplayWorld) -> Result<(), eyre::Report> {
    world.store_record(ALREADY_VALID)
}

#[given("a stored conversation with a result for a call that was never made")]
fn never_called(world: &mut ReplayWorld) -> Result<(), eyre::Report> {
    world.store_record(NEVER_CALLED)
}

#[given("no stored conversation")]
fn nothing_stored(world: &mut ReplayWorld) {
    *world = ReplayWorld::default();
}

#[when("the conversation is prepared for replay")]
fn prepare_for_replay(world: &mut ReplayWorld) {
    let preparer = ReplayPreparer::new(Arc::clone(&world.store), Arc::clone(&world.events));
    world.outcome = Some(run_async(preparer.prepare(world.conversation_id)));
}

#[then("the prepared conversation satisfies the adjacency invariant")]
fn satisfies_invariant(world: &ReplayWorld) -> Result<(), eyre::Report> {
    let report = validate(&world.prepared()?.conversation);
    if !report.is_valid() {
        return Err(eyre!(
            "prepared conversation still has {} violation(s)",
            report.violations().len()
        ));
    }
    Ok(())
}

#[then(r"the prepared conversation has {count:usize} turns")]
fn has_turns(world: &ReplayWorld, count: usize) -> Result<(), eyre::Report> {
    let actual = world.prepared()?.conversation.len();
    if actual != count {
        return Err(eyre!("expected {count} turns, got {actual}"));
    }
    Ok(())
}

#[then("the conversation was repaired")]
fn was_repaired(world: &ReplayWorld) -> Result<(), eyre::Report> {
    let prepared = world.prepared()?;
    if !prepared.repaired || prepared.stats.is_noop() {
        return Err(eyre!("expected a repair, got {:?}", prepared.stats));
    }
    Ok(())
}

#[then("the conversation was not repaired")]
fn was_not_repaired(world: &ReplayWorld) -> Result<(), eyre::Report> {
    if world.prepared()?.repaired {
        return Err(eyre!("valid conversation should not be repaired"));
    }
    Ok(())
}

#[then(r#"the diagnostics recorded a "{event}" event"#)]
fn recorded_event(world: &ReplayWorld, event: String) -> Result<(), eyre::Report> {
    if !world.events.contains(&event)? {
        return Err(eyre!("no '{event}' event was recorded"));
    }
    Ok(())
}

#[then(r#"preparation fails with a structural error naming "{id}""#)]
fn fails_structurally(world: &ReplayWorld, id: String) -> Result<(), eyre::Report> {
    match world.error()? {
        ReplayError::Structural(error) if error.names(&id) => Ok(()),
        other => Err(eyre!("expected a structural error naming '{id}', got {other:?}")),
    }
}

#[then("preparation fails because the conversation is missing")]
fn fails_missing(world: &ReplayWorld) -> Result<(), eyre::Report> {
    match world.error()? {
        ReplayError::Store(_) => Ok(()),
        other => Err(eyre!("expected a store error, got {other:?}")),
    }
}

#[then(r#"the user sees "{message}""#)]
fn user_sees(world: &ReplayWorld, message: String) -> Result<(), eyre::Report> {
    let shown = world.error()?.user_message();
    if shown != message {
        return Err(eyre!("expected user message '{message}', got '{shown}'"));
    }
    Ok(())
}

#[scenario(
    path = "tests/features/replay_preparation.feature",
    name = "A tool call and its result stored in one assistant turn"
)]
#[tokio::test(flavor = "multi_thread")]
async fn single_mixed_turn_is_repaired(world: ReplayWorld) {
    // World parameter required for rstest-bdd fixture injection; step
    // definitions handle mutation.
    let _ = world;
}

#[scenario(
    path = "tests/features/replay_preparation.feature",
    name = "Parallel results interleaved with text"
)]
#[tokio::test(flavor = "multi_thread")]
async fn interleaved_results_are_gathered(world: ReplayWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/replay_preparation.feature",
    name = "A valid conversation is sent as stored"
)]
#[tokio::test(flavor = "multi_thread")]
async fn valid_conversation_is_unchanged(world: ReplayWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/replay_preparation.feature",
    name = "A result for a call that was never made"
)]
#[tokio::test(flavor = "multi_thread")]
async fn orphan_result_is_rejected(world: ReplayWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/replay_preparation.feature",
    name = "A conversation that was never stored"
)]
#[tokio::test(flavor = "multi_thread")]
async fn missing_conversation_is_reported(world: ReplayWorld) {
    let _ = world;
}
