use linfa::Float;
use ndarray::{Array1, ArrayBase, Data, Ix2};

/// Largest double strictly below the finite value `x`
pub(crate) fn prev_float(x: f64) -> f64 {
    if x > 0. {
        f64::from_bits(x.to_bits() - 1)
    } else if x < 0. {
        f64::from_bits(x.to_bits() + 1)
    } else {
        -f64::from_bits(1)
    }
}

/// Computes the pairwise distances between rows of a 2D-array
///
/// The result is the condensed upper triangle: distance of rows (i, j) with i < j,
/// ordered by i then j.
pub fn pdist<F: Float>(x: &ArrayBase<impl Data<Elem = F>, Ix2>) -> Array1<F> {
    let nrows = x.nrows();
    let mut res = Vec::with_capacity(nrows * nrows.saturating_sub(1) / 2);
    for i in 0..nrows {
        for j in (i + 1)..nrows {
            let diff = &x.row(i) - &x.row(j);
            res.push(diff.mapv(|v| v * v).sum().sqrt());
        }
    }
    Array1::from_vec(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_pdist() {
        let x = array![[1., 0., 0.], [0., 1., 0.], [0., 2., 0.], [3., 4., 5.]];
        #[allow(clippy::approx_constant)]
        let expected = array![1.41421356, 2.23606798, 6.70820393, 1., 6.55743852, 6.164414];
        let actual = pdist(&x);
        assert_abs_diff_eq!(actual, expected, epsilon = 1e-6);
    }

    #[test]
    fn test_pdist_single_row() {
        let x = array![[0.5, 0.5]];
        assert_eq!(pdist(&x).len(), 0);
    }

    #[test]
    fn test_prev_float() {
        assert_eq!(prev_float(1.), 1. - f64::EPSILON / 2.);
        assert_eq!(prev_float(2.), 2. - f64::EPSILON);
        assert_eq!(prev_float(-1.), -1. - f64::EPSILON);
        assert!(prev_float(0.) < 0.);
        assert!(prev_float(-0.) < 0.);
        assert_eq!(prev_float(f64::MIN_POSITIVE), f64::MIN_POSITIVE - f64::from_bits(1));
    }
}
