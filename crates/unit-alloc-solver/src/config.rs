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

use std::{num::NonZeroU64, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocatorConfig {
    /// Snap every weight to the closest fraction with at most this
    /// denominator before augmentation. `None` keeps weights untouched.
    pub rational_precision: Option<NonZeroU64>,
    /// Upper bound on applied rotations.
    pub max_iterations: Option<u64>,
    /// Wall-clock budget for a single solve.
    pub time_limit: Option<Duration>,
}

impl AllocatorConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_rational_precision(mut self, precision: NonZeroU64) -> Self {
        self.rational_precision = Some(precision);
        self
    }

    #[inline]
    pub fn with_max_iterations(mut self, limit: u64) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.max_iterations.is_some() || self.time_limit.is_some()
    }
}
