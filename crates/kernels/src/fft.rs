//! Host n-dimensional DFT built from per-axis `rustfft` plans.

use crate::config::Direction;
use ndarray::{ArrayD, Axis, Zip};
use num_complex::Complex;
use rustfft::{FftDirection, FftNum, FftPlanner};

impl From<Direction> for FftDirection {
    fn from(value: Direction) -> FftDirection {
        match value {
            Direction::Forward => FftDirection::Forward,
            Direction::Inverse => FftDirection::Inverse,
        }
    }
}

/// Applies the unscaled DFT along every axis in place.
///
/// Forward uses `exp(-2πi·jk/n)`, inverse uses `exp(+2πi·jk/n)`; neither
/// divides by the element count.
pub fn fftn_inplace<T: FftNum>(values: &mut ArrayD<Complex<T>>, direction: Direction) {
    let mut planner = FftPlanner::<T>::new();

    for axis in 0..values.ndim() {
        let len = values.len_of(Axis(axis));
        if len <= 1 {
            continue;
        }
        let fft = planner.plan_fft(len, direction.into());

        Zip::from(values.lanes_mut(Axis(axis))).par_for_each(|mut lane| {
            let mut buffer: Vec<Complex<T>> = lane.iter().copied().collect();
            fft.process(&mut buffer);
            for (slot, value) in lane.iter_mut().zip(buffer) {
                *slot = value;
            }
        });
    }
}

/// Out-of-place variant returning a row-major array.
pub fn fftn<T: FftNum>(values: &ArrayD<Complex<T>>, direction: Direction) -> ArrayD<Complex<T>> {
    let mut output = values.as_standard_layout().into_owned();
    fftn_inplace(&mut output, direction);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::IxDyn;
    use num_complex::Complex64;

    #[test]
    fn impulse_transforms_to_constant() {
        let mut values = ArrayD::<Complex64>::zeros(IxDyn(&[4, 4]));
        values[[0, 0]] = Complex64::new(1.0, 0.0);

        let output = fftn(&values, Direction::Forward);
        for value in output.iter() {
            assert_abs_diff_eq!(value.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(value.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn forward_uses_negative_exponent() {
        // x = [0, 1, 0, 0] -> X[k] = exp(-2πi k / 4), so X[1] = -i.
        let mut values = ArrayD::<Complex64>::zeros(IxDyn(&[4]));
        values[[1]] = Complex64::new(1.0, 0.0);

        let output = fftn(&values, Direction::Forward);
        assert_abs_diff_eq!(output[[1]].re, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(output[[1]].im, -1.0, epsilon = 1e-12);

        let inverse = fftn(&values, Direction::Inverse);
        assert_abs_diff_eq!(inverse[[1]].im, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_is_unscaled() {
        let values = ArrayD::from_elem(IxDyn(&[2, 3]), Complex64::new(1.0, 0.0));
        let output = fftn(&values, Direction::Inverse);
        assert_abs_diff_eq!(output[[0, 0]].re, 6.0, epsilon = 1e-12);
    }
}
