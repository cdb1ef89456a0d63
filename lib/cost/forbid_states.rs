//! Penalty on fidelity overlap between the evolving states and per-state
//! lists of forbidden states.

use itertools::izip;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    cost::{ Cost, CostError, CostResult },
    nd_utils::conj,
};

/// Penalizes each evolving state for approaching its own list of forbidden
/// states, measured by fidelity `|⟨forbidden|state⟩|²`.
///
/// The penalty folds over the evolving states in index order: each state
/// contributes the running total plus a fresh fidelity against the newest
/// entry of its forbidden list, damped by that list's length; the folded
/// total is then normalized by the number of evolving states and the number
/// of evolution steps. Proximity to a forbidden state can occur transiently
/// mid-evolution, so this term is evaluated at every step.
///
/// The value never depends on the control parameters directly, so the
/// parameter gradient is identically zero.
#[derive(Clone, Debug)]
pub struct ForbidStates {
    cost_multiplier: f64,
    forbidden_states_dagger: Vec<Vec<nd::Array1<C64>>>,
    state_dims: Vec<usize>,
    step_count: usize,
}

impl ForbidStates {
    /// Create a new `ForbidStates` term with unit weight.
    ///
    /// `forbidden_states[i]` is the list of states that evolving state `i`
    /// is forbidden from; lists may have different lengths but must all be
    /// nonempty, and the states within one list must share a dimension.
    /// `step_count` is the total number of steps in an evolution.
    pub fn new(
        forbidden_states: Vec<Vec<nd::Array1<C64>>>,
        step_count: usize,
    ) -> CostResult<Self>
    {
        if forbidden_states.is_empty() {
            return Err(CostError::NoEvolvingStates);
        }
        if step_count == 0 {
            return Err(CostError::ZeroStepCount);
        }
        let mut state_dims: Vec<usize>
            = Vec::with_capacity(forbidden_states.len());
        for (index, state_forbidden) in forbidden_states.iter().enumerate() {
            let Some(first) = state_forbidden.first() else {
                return Err(CostError::EmptyForbiddenStates(index));
            };
            let dim = first.len();
            for forbidden in state_forbidden.iter() {
                if forbidden.len() != dim {
                    return Err(CostError::ForbiddenDimMismatch {
                        index, expected: dim, got: forbidden.len(),
                    });
                }
            }
            state_dims.push(dim);
        }
        let forbidden_states_dagger: Vec<Vec<nd::Array1<C64>>>
            = forbidden_states.iter()
            .map(|state_forbidden| {
                state_forbidden.iter().map(conj).collect()
            })
            .collect();
        Ok(Self {
            cost_multiplier: 1.0,
            forbidden_states_dagger,
            state_dims,
            step_count,
        })
    }

    /// Set the weight for this term.
    ///
    /// Fails if the weight is negative.
    pub fn with_cost_multiplier(mut self, cost_multiplier: f64)
        -> CostResult<Self>
    {
        if cost_multiplier < 0.0 {
            return Err(CostError::NegativeCostMultiplier(cost_multiplier));
        }
        self.cost_multiplier = cost_multiplier;
        Ok(self)
    }

    /// Return the number of evolving states this term was constructed for.
    pub fn num_states(&self) -> usize { self.state_dims.len() }

    fn check_states(&self, states: &[nd::Array1<C64>]) -> CostResult<()> {
        if states.len() != self.state_dims.len() {
            return Err(CostError::StateCountMismatch {
                expected: self.state_dims.len(),
                got: states.len(),
            });
        }
        for (index, dim, state) in izip!(0.., &self.state_dims, states) {
            if state.len() != *dim {
                return Err(CostError::StateDimMismatch {
                    index, expected: *dim, got: state.len(),
                });
            }
        }
        Ok(())
    }
}

impl Cost for ForbidStates {
    fn name(&self) -> &str { "forbid_states" }

    fn requires_step_evaluation(&self) -> bool { true }

    fn cost_multiplier(&self) -> f64 { self.cost_multiplier }

    fn cost(
        &self,
        _params: &nd::ArrayD<C64>,
        states: &[nd::Array1<C64>],
        _step: usize,
    ) -> CostResult<f64>
    {
        self.check_states(states)?;
        let mut total: f64 = 0.0;
        let iter = self.forbidden_states_dagger.iter().zip(states);
        for (state_forbidden_dagger, state) in iter {
            // the newest entry of each list carries the fresh overlap; the
            // running total rides along under the same per-list damping
            let fresh: f64
                = state_forbidden_dagger.last()
                .map(|forbidden_dagger| {
                    forbidden_dagger.dot(state).norm_sqr()
                })
                .unwrap_or(0.0);
            total += (total + fresh) / state_forbidden_dagger.len() as f64;
        }
        total
            /= (self.forbidden_states_dagger.len() * self.step_count) as f64;
        Ok(self.cost_multiplier * total)
    }

    fn gradient_wrt_params(
        &self,
        params: &nd::ArrayD<C64>,
        states: &[nd::Array1<C64>],
        _step: usize,
    ) -> CostResult<nd::ArrayD<C64>>
    {
        self.check_states(states)?;
        Ok(nd::ArrayD::zeros(params.raw_dim()))
    }

    fn gradient_wrt_states(
        &self,
        _params: &nd::ArrayD<C64>,
        states: &[nd::Array1<C64>],
        _step: usize,
    ) -> CostResult<Vec<nd::Array1<C64>>>
    {
        self.check_states(states)?;
        let n = self.forbidden_states_dagger.len();
        let base: f64 = self.cost_multiplier / (n * self.step_count) as f64;
        let counts: Vec<f64>
            = self.forbidden_states_dagger.iter()
            .map(|state_forbidden_dagger| state_forbidden_dagger.len() as f64)
            .collect();
        // each state's fresh overlap is re-amplified by every later fold of
        // the running total
        let mut chain: Vec<f64> = vec![1.0; n];
        for i in (0..n.saturating_sub(1)).rev() {
            chain[i] = chain[i + 1] * (1.0 + counts[i + 1].recip());
        }
        let grads: Vec<nd::Array1<C64>>
            = izip!(&self.forbidden_states_dagger, states, &counts, &chain)
            .map(|(state_forbidden_dagger, state, count, chain_i)| {
                let scale: f64 = base * chain_i / count;
                match state_forbidden_dagger.last() {
                    Some(forbidden_dagger) => {
                        let overlap: C64 = forbidden_dagger.dot(state);
                        forbidden_dagger.mapv(|fk| {
                            2.0 * overlap * fk.conj() * scale
                        })
                    },
                    None => nd::Array1::zeros(state.len()),
                }
            })
            .collect();
        Ok(grads)
    }
}
