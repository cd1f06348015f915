use swing_core::Observer;

use crate::traits::{CanStopEarly, CheckFinite, HasStep};

/// Stops a solve at the first event carrying a non-finite number.
///
/// Pass `&mut FiniteGuard` to a solver to inspect [`tripped_at`] afterwards.
///
/// [`tripped_at`]: FiniteGuard::tripped_at
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FiniteGuard {
    tripped_at: Option<usize>,
}

impl FiniteGuard {
    /// Creates a guard that has not tripped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the step of the first non-finite event, if one was seen.
    #[must_use]
    pub fn tripped_at(&self) -> Option<usize> {
        self.tripped_at
    }
}

impl<E, A> Observer<E, A> for FiniteGuard
where
    E: CheckFinite + HasStep,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if event.is_finite() {
            return None;
        }
        self.tripped_at.get_or_insert(event.step());
        Some(A::stop_early())
    }
}

impl<E, A> Observer<E, A> for &mut FiniteGuard
where
    E: CheckFinite + HasStep,
    A: CanStopEarly,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        Observer::<E, A>::observe(&mut **self, event)
    }
}
