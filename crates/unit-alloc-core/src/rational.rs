// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use ordered_float::OrderedFloat;

/// Snapping of a weight onto the nearest fraction with a bounded denominator.
///
/// Rebasing every weight this way before optimizing bounds the size of the
/// denominators that can appear in cycle sums, which keeps exact arithmetic
/// cheap and makes equal-looking weights compare equal.
pub trait LimitDenominator: Sized {
    fn limit_denominator(&self, max_denominator: u64) -> Self;
}

/// Returns the rational closest to `value` whose denominator does not exceed
/// `max_denominator` (values below one are treated as one).
///
/// Walks the continued-fraction convergents of `value` and compares the last
/// admissible convergent against the best semiconvergent. Ties go to the
/// convergent.
pub fn closest_rational(value: &BigRational, max_denominator: u64) -> BigRational {
    let max_den = BigInt::from(max_denominator.max(1));
    if value.denom() <= &max_den {
        return value.clone();
    }

    let (mut p0, mut q0) = (BigInt::zero(), BigInt::one());
    let (mut p1, mut q1) = (BigInt::one(), BigInt::zero());
    let mut n = value.numer().clone();
    let mut d = value.denom().clone();

    // The denominator of `value` exceeds `max_den`, so the loop always stops
    // before the expansion is exhausted and `d` never reaches zero here.
    loop {
        let a = n.div_floor(&d);
        let q2 = &q0 + &a * &q1;
        if q2 > max_den {
            break;
        }
        let p2 = &p0 + &a * &p1;
        p0 = std::mem::replace(&mut p1, p2);
        q0 = std::mem::replace(&mut q1, q2);
        let r = &n - &a * &d;
        n = std::mem::replace(&mut d, r);
    }

    let k = (&max_den - &q0).div_floor(&q1);
    let semiconvergent = BigRational::new(&p0 + &k * &p1, &q0 + &k * &q1);
    let convergent = BigRational::new(p1, q1);
    if (&convergent - value).abs() <= (&semiconvergent - value).abs() {
        convergent
    } else {
        semiconvergent
    }
}

fn rational_to_f64(r: &BigRational) -> Option<f64> {
    Some(r.numer().to_f64()? / r.denom().to_f64()?)
}

impl LimitDenominator for BigRational {
    #[inline]
    fn limit_denominator(&self, max_denominator: u64) -> Self {
        closest_rational(self, max_denominator)
    }
}

impl LimitDenominator for OrderedFloat<f64> {
    fn limit_denominator(&self, max_denominator: u64) -> Self {
        BigRational::from_float(self.0)
            .map(|exact| closest_rational(&exact, max_denominator))
            .and_then(|r| rational_to_f64(&r))
            .map(OrderedFloat)
            .unwrap_or(*self)
    }
}

impl LimitDenominator for i64 {
    #[inline]
    fn limit_denominator(&self, _max_denominator: u64) -> Self {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[inline]
    fn ratio(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[inline]
    fn exact(x: f64) -> BigRational {
        BigRational::from_f64(x).unwrap()
    }

    #[test]
    fn test_small_denominator_is_returned_unchanged() {
        assert_eq!(closest_rational(&ratio(3, 7), 10), ratio(3, 7));
        assert_eq!(closest_rational(&ratio(5, 1), 1), ratio(5, 1));
    }

    #[test]
    fn test_pi_approximations() {
        let pi = exact(std::f64::consts::PI);
        assert_eq!(closest_rational(&pi, 7), ratio(22, 7));
        assert_eq!(closest_rational(&pi, 100), ratio(311, 99));
        assert_eq!(closest_rational(&pi, 1000), ratio(355, 113));
    }

    #[test]
    fn test_float_noise_is_removed() {
        assert_eq!(closest_rational(&exact(0.1), 10), ratio(1, 10));
        assert_eq!(closest_rational(&exact(1.0 / 14.0), 100), ratio(1, 14));
        assert_eq!(closest_rational(&exact(2.0 / 7.0), 100), ratio(2, 7));
    }

    #[test]
    fn test_negative_values() {
        assert_eq!(closest_rational(&ratio(-3, 4), 3), ratio(-2, 3));
        assert_eq!(closest_rational(&exact(-0.5), 100), ratio(-1, 2));
    }

    #[test]
    fn test_zero_bound_behaves_like_one() {
        assert_eq!(closest_rational(&ratio(7, 3), 0), ratio(2, 1));
    }

    #[test]
    fn test_float_weights_snap_in_place() {
        let w = OrderedFloat(0.1 + 0.2);
        assert_eq!(w.limit_denominator(1000), OrderedFloat(0.3));
        let nan = OrderedFloat(f64::NAN);
        assert!(nan.limit_denominator(10).0.is_nan());
    }

    #[test]
    fn test_integer_weights_are_untouched() {
        assert_eq!(42i64.limit_denominator(3), 42);
    }
}
