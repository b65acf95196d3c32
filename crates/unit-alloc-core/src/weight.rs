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

use crate::rational::LimitDenominator;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use ordered_float::OrderedFloat;
use std::ops::{Add, Sub};

/// Arithmetic that reports leaving the representable range instead of
/// wrapping, panicking or saturating to infinity.
pub trait CheckedWeight: Sized {
    fn checked_add_weight(&self, rhs: &Self) -> Option<Self>;

    /// `self` added up `count` times.
    fn checked_mul_count(&self, count: u64) -> Option<Self>;
}

impl CheckedWeight for i64 {
    #[inline]
    fn checked_add_weight(&self, rhs: &Self) -> Option<Self> {
        self.checked_add(*rhs)
    }

    #[inline]
    fn checked_mul_count(&self, count: u64) -> Option<Self> {
        self.checked_mul(i64::try_from(count).ok()?)
    }
}

impl CheckedWeight for OrderedFloat<f64> {
    #[inline]
    fn checked_add_weight(&self, rhs: &Self) -> Option<Self> {
        Some(*self + *rhs).filter(|r| r.0.is_finite())
    }

    #[inline]
    fn checked_mul_count(&self, count: u64) -> Option<Self> {
        Some(OrderedFloat(self.0 * count as f64)).filter(|r| r.0.is_finite())
    }
}

impl CheckedWeight for BigRational {
    #[inline]
    fn checked_add_weight(&self, rhs: &Self) -> Option<Self> {
        Some(self + rhs)
    }

    #[inline]
    fn checked_mul_count(&self, count: u64) -> Option<Self> {
        Some(self * BigRational::from_integer(BigInt::from(count)))
    }
}

/// Numeric type carried by edge weights and cost deltas.
///
/// Implemented for `OrderedFloat<f64>` (floating), `BigRational` (exact) and
/// `i64` (exact integers). Only exact representations guarantee that the
/// cycle-canceling loop terminates: floating summation error can make a
/// zero-cost cycle look negative.
///
/// `ToPrimitive` lets loaders reject inputs a conversion silently rounded,
/// such as `2.9` read into an `i64`. `CheckedWeight` lets the allocator
/// refuse tables whose augmented sums leave the range of the type.
pub trait Weight:
    Clone
    + Ord
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Zero
    + One
    + FromPrimitive
    + ToPrimitive
    + LimitDenominator
    + CheckedWeight
    + Send
    + Sync
    + std::fmt::Debug
    + std::fmt::Display
    + 'static
{
}

impl<T> Weight for T where
    T: Clone
        + Ord
        + Add<Self, Output = Self>
        + Sub<Self, Output = Self>
        + Zero
        + One
        + FromPrimitive
        + ToPrimitive
        + LimitDenominator
        + CheckedWeight
        + Send
        + Sync
        + std::fmt::Debug
        + std::fmt::Display
        + 'static
{
}
