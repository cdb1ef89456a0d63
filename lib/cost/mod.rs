//! The cost-function contract consumed by a gradient-based pulse optimizer.
//!
//! An optimization driver holds a heterogeneous collection of [`Cost`] terms
//! and accumulates their weighted values into a total objective: terms with
//! [`requires_step_evaluation`][Cost::requires_step_evaluation] set are
//! evaluated and summed at every time step of the evolution, the rest once
//! after the final step. That accumulation policy is the driver's job; terms
//! themselves are pure functions of `(params, states, step)`.

use ndarray as nd;
use num_complex::Complex64 as C64;
use thiserror::Error;

pub mod forbid_states;
pub use forbid_states::ForbidStates;

#[derive(Debug, Error)]
pub enum CostError {
    /// Constructed with no evolving states at all.
    #[error("at least one evolving state is required")]
    NoEvolvingStates,

    /// Constructed with an empty forbidden-state list for some evolving
    /// state, which would make its normalization divisor zero.
    #[error("evolving state {0} has an empty forbidden-state list")]
    EmptyForbiddenStates(usize),

    /// Constructed with a zero evolution step count.
    #[error("step count must be at least 1")]
    ZeroStepCount,

    /// Constructed with a negative weight.
    #[error("cost multiplier must be nonnegative; got {0}")]
    NegativeCostMultiplier(f64),

    /// Constructed with forbidden states of unequal dimension for the same
    /// evolving state.
    #[error(
        "forbidden states for evolving state {index} have unequal dimensions \
        ({expected} vs {got})"
    )]
    ForbiddenDimMismatch { index: usize, expected: usize, got: usize },

    /// Evaluated with a different number of evolving states than the term
    /// was constructed for.
    #[error("expected {expected} evolving states; got {got}")]
    StateCountMismatch { expected: usize, got: usize },

    /// Evaluated with an evolving state of a different dimension than the
    /// term was constructed for.
    #[error(
        "evolving state {index} has dimension {got}; expected {expected}"
    )]
    StateDimMismatch { index: usize, expected: usize, got: usize },
}
pub type CostResult<T> = Result<T, CostError>;

/// A single penalty term in the total objective.
///
/// Implementations must be pure in `cost` and both gradient methods: no
/// mutation of the inputs, no internal state, so that a driver may evaluate
/// any number of terms for the same step concurrently. A term applies its own
/// [`cost_multiplier`][Self::cost_multiplier] to its return value; callers
/// never re-weight.
///
/// A term whose value provably never depends on one of the two arguments
/// declares that gradient zero instead of deriving it; otherwise gradients
/// are the analytic derivatives of [`cost`][Self::cost].
pub trait Cost {
    /// Identifier for this term, unique within one optimization run. Used
    /// for reporting and ordering, not enforced here.
    fn name(&self) -> &str;

    /// `true` if the term must be evaluated and accumulated at every time
    /// step of the evolution; `false` if only once, after the final step.
    fn requires_step_evaluation(&self) -> bool { false }

    /// Nonnegative weight this term applies to its own output.
    fn cost_multiplier(&self) -> f64;

    /// Evaluate the penalty for the given control parameters and evolved
    /// states at time step `step`.
    fn cost(
        &self,
        params: &nd::ArrayD<C64>,
        states: &[nd::Array1<C64>],
        step: usize,
    ) -> CostResult<f64>;

    /// Gradient of [`cost`][Self::cost] with respect to the control
    /// parameters, shaped like `params`.
    fn gradient_wrt_params(
        &self,
        params: &nd::ArrayD<C64>,
        states: &[nd::Array1<C64>],
        step: usize,
    ) -> CostResult<nd::ArrayD<C64>>;

    /// Gradient of [`cost`][Self::cost] with respect to the evolving states,
    /// one array per state, each shaped like its state.
    ///
    /// For a real-valued cost `f` of a complex ket `s`, the returned
    /// components follow the convention `∂f/∂Re(s) + i ∂f/∂Im(s)`, the
    /// steepest-ascent direction in the complex plane.
    fn gradient_wrt_states(
        &self,
        params: &nd::ArrayD<C64>,
        states: &[nd::Array1<C64>],
        step: usize,
    ) -> CostResult<Vec<nd::Array1<C64>>>;
}
