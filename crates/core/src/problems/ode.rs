use crate::{DerivativeOf, StepIntegrable};

/// Defines an ODE (ordinary differential equation) problem to be integrated.
///
/// An ODE problem tells a solver how to read a steppable state out of a
/// model input, how to turn a model input/output pair into the derivative of
/// that state, and how to rebuild a model input from a stepped state. This
/// keeps solvers generic over any model whose state implements
/// [`StepIntegrable`].
///
/// Multi-stage solvers call [`build_input`](OdeProblem::build_input) at
/// intermediate states (for example half steps), so implementations must
/// not assume `delta` is the full step size.
pub trait OdeProblem {
    type Input;
    type Output;
    type Delta;
    type State: StepIntegrable<Self::Delta>;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Extracts the state from model input.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the state cannot be extracted.
    fn state(&self, input: &Self::Input) -> Result<Self::State, Self::Error>;

    /// Computes the derivative of the state from model input and output.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the derivative cannot be computed.
    fn derivative(
        &self,
        input: &Self::Input,
        output: &Self::Output,
    ) -> Result<DerivativeOf<Self::State, Self::Delta>, Self::Error>;

    /// Builds model input from a stepped state.
    ///
    /// `base` is the input the step started from and `delta` is how far the
    /// state was advanced from it.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the input cannot be constructed.
    fn build_input(
        &self,
        base: &Self::Input,
        state: &Self::State,
        delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error>;

    /// Finalizes input after a step is accepted.
    ///
    /// Called once per completed step, never for intermediate stages. The
    /// default returns the input unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if finalization fails.
    fn finalize_step(
        &self,
        next_input: Self::Input,
        _prev_input: &Self::Input,
        _prev_output: &Self::Output,
        _step_delta: &Self::Delta,
    ) -> Result<Self::Input, Self::Error> {
        Ok(next_input)
    }
}
