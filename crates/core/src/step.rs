/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets the generic solvers advance a state via
/// `state + derivative * delta`, where the derivative is taken with respect
/// to `Delta` (usually time in seconds).
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Shorthand for the derivative of a `StepIntegrable` type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;
