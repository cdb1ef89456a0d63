//! Small helpers for complex-valued `ndarray` arrays.

use ndarray as nd;
use num_complex::Complex64 as C64;

/// Return the conjugate transpose of a 2D complex array.
pub fn dagger(a: &nd::Array2<C64>) -> nd::Array2<C64> {
    a.t().mapv(|ak| ak.conj())
}

/// Return the elementwise conjugate of a 1D complex array.
///
/// Applied to a ket, this gives the entries of the corresponding bra; the
/// inner product `⟨a|b⟩` is then an ordinary (non-conjugating) dot product.
pub fn conj(v: &nd::Array1<C64>) -> nd::Array1<C64> {
    v.mapv(|vk| vk.conj())
}

#[cfg(test)]
mod test {
    use ndarray as nd;
    use num_complex::Complex64 as C64;
    use super::*;

    #[test]
    fn dagger_transposes_and_conjugates() {
        let a: nd::Array2<C64>
            = nd::array![
                [C64::new(1.0,  2.0), C64::new(0.0, -1.0)],
                [C64::new(3.0,  0.0), C64::new(0.0,  4.0)],
            ];
        let ad = dagger(&a);
        assert_eq!(ad[[0, 1]], C64::new(3.0, 0.0));
        assert_eq!(ad[[1, 0]], C64::new(0.0, 1.0));
        assert_eq!(ad[[0, 0]], C64::new(1.0, -2.0));
        assert_eq!(dagger(&ad), a);
    }

    #[test]
    fn conj_gives_bra_entries() {
        let v: nd::Array1<C64>
            = nd::array![C64::new(1.0, 1.0), C64::new(0.0, -2.0)];
        let vc = conj(&v);
        assert_eq!(vc[0], C64::new(1.0, -1.0));
        assert_eq!(vc[1], C64::new(0.0, 2.0));
        // ⟨v|v⟩ is the squared norm
        assert_eq!(vc.dot(&v), C64::from(6.0));
    }
}
