//! Combine a reverse-mode gradient primitive with the value of the function
//! it differentiates.
//!
//! The reverse-mode engine itself is an external collaborator: callers hand
//! this module the engine's primitive, which at a point `x` produces both the
//! function's output and a vector-Jacobian-product (VJP) closure pulling an
//! output-shaped cotangent back to an input-shaped gradient. For functions of
//! several arguments, partially apply all arguments except the one under
//! differentiation before calling in.

use ndarray as nd;
use num_traits::{ Zero, One };
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutodiffError {
    /// The VJP closure produced a gradient whose shape disagrees with the
    /// argument being differentiated.
    #[error("vjp returned gradient of shape {got:?}; expected {expected:?}")]
    VjpShapeMismatch { expected: Vec<usize>, got: Vec<usize> },

    /// The stacked reverse passes could not be assembled into the declared
    /// Jacobian shape.
    #[error("jacobian assembly error: {0}")]
    JacobianShape(#[from] nd::ShapeError),
}
pub type AutodiffResult<T> = Result<T, AutodiffError>;

/// Compute both the value of a function and its full Jacobian with respect to
/// the argument `x`, given the reverse-mode primitive `make_vjp` for that
/// argument.
///
/// The Jacobian's shape is the output's shape followed by the argument's
/// shape, assembled by seeding the VJP once with each standard basis vector
/// of the output space (one reverse pass per output component) and stacking
/// the pulled-back gradients. A scalar-valued function should return its
/// output as a zero-dimensional array; the Jacobian is then shaped like the
/// argument itself.
///
/// Fails if a reverse pass yields a gradient not shaped like `x`. Errors
/// raised inside the primitive itself are the engine's to report; nothing is
/// caught here.
pub fn value_and_jacobian<A, F, V>(
    make_vjp: F,
    x: &nd::ArrayD<A>,
) -> AutodiffResult<(nd::ArrayD<A>, nd::ArrayD<A>)>
where
    A: Clone + Zero + One,
    F: FnOnce(&nd::ArrayD<A>) -> (nd::ArrayD<A>, V),
    V: Fn(&nd::ArrayD<A>) -> nd::ArrayD<A>,
{
    let (ans, vjp) = make_vjp(x);
    let jacobian_shape: Vec<usize>
        = ans.shape().iter().chain(x.shape()).copied().collect();
    let mut pulled: Vec<A> = Vec::with_capacity(ans.len() * x.len());
    for k in 0..ans.len() {
        let mut seed: nd::ArrayD<A> = nd::ArrayD::zeros(ans.raw_dim());
        if let Some(sk) = seed.iter_mut().nth(k) {
            *sk = A::one();
        }
        let grad = vjp(&seed);
        if grad.shape() != x.shape() {
            return Err(AutodiffError::VjpShapeMismatch {
                expected: x.shape().to_vec(),
                got: grad.shape().to_vec(),
            });
        }
        pulled.extend(grad.iter().cloned());
    }
    let jacobian
        = nd::ArrayD::from_shape_vec(nd::IxDyn(&jacobian_shape), pulled)?;
    Ok((ans, jacobian))
}
