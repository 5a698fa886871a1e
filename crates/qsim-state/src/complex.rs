//! Complex arithmetic.
//!
//! Amplitudes are `num_complex::Complex64`, whose operator impls supply
//! addition, subtraction, multiplication, `conj()` and `norm_sqr()`.

pub use num_complex::Complex64;

/// Amplitude type used throughout the simulator.
pub type Complex = Complex64;

/// 0 + 0i
pub const ZERO: Complex = Complex::new(0.0, 0.0);
/// 1 + 0i
pub const ONE: Complex = Complex::new(1.0, 0.0);
/// 0 + 1i
pub const I: Complex = Complex::new(0.0, 1.0);

/// Component-wise comparison within `tol`.
#[inline]
pub fn approx_eq(a: Complex, b: Complex, tol: f64) -> bool {
    (a - b).norm() < tol
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let a = Complex::new(1.0, 2.0);
        let b = Complex::new(3.0, -1.0);

        assert_eq!(a + b, Complex::new(4.0, 1.0));
        assert_eq!(a - b, Complex::new(-2.0, 3.0));
        // (1+2i)(3-i) = 3 - i + 6i - 2i² = 5 + 5i
        assert_eq!(a * b, Complex::new(5.0, 5.0));
        assert_eq!(a.conj(), Complex::new(1.0, -2.0));
        assert_eq!(a.norm_sqr(), 5.0);
    }

    #[test]
    fn test_constants() {
        assert_eq!(I * I, -ONE);
        assert!(approx_eq(ONE + ZERO, ONE, 1e-15));
        assert!(!approx_eq(ONE, I, 1e-3));
    }
}
