//! Generative constants: fixed and parametric matrices used to assemble
//! Hamiltonians and cost-function targets.
//!
//! Every function here is a pure function of its arguments; outputs are safe
//! to cache and to build from any number of threads.

use ndarray as nd;
use num_complex::Complex64 as C64;
use thiserror::Error;
use crate::nd_utils::dagger;

#[derive(Debug, Error)]
pub enum OperatorError {
    /// Unit-matrix element index lies outside the matrix.
    #[error("element index ({i}, {j}) is out of range for size {size}")]
    IndexOutOfRange { i: usize, j: usize, size: usize },
}
pub type OperatorResult<T> = Result<T, OperatorError>;

/* Pauli operators ************************************************************/

/// Return the Pauli *x* operator.
pub fn sigma_x() -> nd::Array2<C64> {
    nd::array![
        [C64::new(0.0, 0.0), C64::new(1.0, 0.0)],
        [C64::new(1.0, 0.0), C64::new(0.0, 0.0)],
    ]
}

/// Return the Pauli *y* operator.
pub fn sigma_y() -> nd::Array2<C64> {
    nd::array![
        [C64::new(0.0, 0.0), C64::new(0.0, -1.0)],
        [C64::new(0.0, 1.0), C64::new(0.0,  0.0)],
    ]
}

/// Return the Pauli *z* operator.
pub fn sigma_z() -> nd::Array2<C64> {
    nd::array![
        [C64::new(1.0, 0.0), C64::new( 0.0, 0.0)],
        [C64::new(0.0, 0.0), C64::new(-1.0, 0.0)],
    ]
}

/// Return the raising combination σ+ = σx + i σy.
pub fn sigma_plus() -> nd::Array2<C64> {
    nd::array![
        [C64::new(0.0, 0.0), C64::new(2.0, 0.0)],
        [C64::new(0.0, 0.0), C64::new(0.0, 0.0)],
    ]
}

/// Return the lowering combination σ− = σx − i σy.
pub fn sigma_minus() -> nd::Array2<C64> {
    nd::array![
        [C64::new(0.0, 0.0), C64::new(0.0, 0.0)],
        [C64::new(2.0, 0.0), C64::new(0.0, 0.0)],
    ]
}

/* Ladder operators ***********************************************************/

/// Construct the creation operator truncated at level `size`.
///
/// Entries one below the main diagonal are `sqrt(k)` for `k = 1, ...,
/// size - 1`; all others are zero. `size == 1` gives the zero matrix.
pub fn creation_operator(size: usize) -> nd::Array2<C64> {
    let mut op: nd::Array2<C64> = nd::Array2::zeros((size, size));
    for k in 1..size {
        op[[k, k - 1]] = C64::from((k as f64).sqrt());
    }
    op
}

/// Construct the annihilation operator truncated at level `size`.
///
/// This is the conjugate transpose of [`creation_operator`] at the same
/// truncation.
pub fn annihilation_operator(size: usize) -> nd::Array2<C64> {
    dagger(&creation_operator(size))
}

/// Construct the `size × size` matrix that is zero everywhere except for a
/// single 1 at row `i`, column `j`.
///
/// Fails if `i` or `j` lies outside the matrix.
pub fn unit_matrix(i: usize, j: usize, size: usize)
    -> OperatorResult<nd::Array2<C64>>
{
    if i >= size || j >= size {
        return Err(OperatorError::IndexOutOfRange { i, j, size });
    }
    let mut eij: nd::Array2<C64> = nd::Array2::zeros((size, size));
    eij[[i, j]] = C64::from(1.0);
    Ok(eij)
}

#[cfg(test)]
mod test {
    use ndarray as nd;
    use num_complex::Complex64 as C64;
    use crate::nd_utils::dagger;
    use super::*;

    #[test]
    fn paulis_are_hermitian() {
        for sigma in [sigma_x(), sigma_y(), sigma_z()] {
            assert_eq!(dagger(&sigma), sigma);
        }
    }

    #[test]
    fn pauli_commutator_xy() {
        // [σx, σy] = 2i σz
        let lhs = sigma_x().dot(&sigma_y()) - sigma_y().dot(&sigma_x());
        let rhs = sigma_z().mapv(|a| C64::new(0.0, 2.0) * a);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn raising_lowering_combinations() {
        let i_sy = sigma_y().mapv(|a| C64::i() * a);
        assert_eq!(sigma_plus(), sigma_x() + &i_sy);
        assert_eq!(sigma_minus(), sigma_x() - &i_sy);
    }

    #[test]
    fn ladder_operators_are_mutual_daggers() {
        for size in 2..8 {
            let cr = creation_operator(size);
            let an = annihilation_operator(size);
            assert_eq!(dagger(&an), cr);
            assert_eq!(dagger(&cr), an);
        }
    }

    #[test]
    fn creation_operator_entries() {
        let cr = creation_operator(4);
        for ((i, j), v) in cr.indexed_iter() {
            if i == j + 1 {
                assert_eq!(*v, C64::from((i as f64).sqrt()));
            } else {
                assert_eq!(*v, C64::from(0.0));
            }
        }
        // no sub-diagonal exists at size 1
        assert_eq!(creation_operator(1), nd::Array2::zeros((1, 1)));
    }

    #[test]
    fn unit_matrix_single_entry() {
        let e12 = unit_matrix(1, 2, 4).unwrap();
        for ((i, j), v) in e12.indexed_iter() {
            let expected
                = if (i, j) == (1, 2) { C64::from(1.0) } else { C64::from(0.0) };
            assert_eq!(*v, expected);
        }
    }

    #[test]
    fn unit_matrix_rejects_bad_indices() {
        assert!(unit_matrix(4, 0, 4).is_err());
        assert!(unit_matrix(0, 4, 4).is_err());
        assert!(unit_matrix(0, 0, 4).is_ok());
    }
}
