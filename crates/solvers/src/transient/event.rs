use swing_core::Snapshot;

/// Event emitted by a transient solver for each accepted snapshot.
///
/// Step 0 is the initial state; steps `1..=N` follow each integration step.
#[derive(Debug, Clone)]
pub struct Event<I, O> {
    /// The step number.
    pub step: usize,

    /// Model input and output at this step.
    pub snapshot: Snapshot<I, O>,
}
