//! Core pieces of a quantum optimal-control toolkit: generative operator
//! constants for building Hamiltonians and cost targets, a pluggable
//! cost-function contract consumed by a gradient-based pulse optimizer, and a
//! utility to combine a reverse-mode gradient primitive with the value of the
//! function it differentiates.
//!
//! Everything here is a pure function of its explicit inputs; the surrounding
//! optimizer loop, state propagation, and I/O live in external drivers.

pub mod nd_utils;
pub mod operators;
pub mod autodiff;
pub mod cost;
