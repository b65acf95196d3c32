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

use crate::config::AllocatorConfig;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering::Relaxed};
use std::time::{Duration, Instant};

/// Cooperative stop flag that can be flipped from another thread while a
/// solve is running.
#[derive(Clone, Default, Debug)]
pub struct StopToken(Arc<AtomicBool>);

impl StopToken {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.load(Relaxed)
    }
    #[inline]
    pub fn request_stop(&self) {
        self.0.store(true, Relaxed)
    }
}

impl PartialEq for StopToken {
    /// Two tokens are equal when they share the same flag.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
impl Eq for StopToken {}

impl fmt::Display for StopToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StopToken(set: {})", self.is_set())
    }
}

/// How a solve ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// No negative cycle is left; the allocation is optimal.
    Converged,
    IterationLimit,
    TimeLimit,
    Stopped,
}

impl SolveStatus {
    #[inline]
    pub fn is_converged(&self) -> bool {
        matches!(self, SolveStatus::Converged)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SolveStatus::Converged => "converged",
            SolveStatus::IterationLimit => "iteration limit reached",
            SolveStatus::TimeLimit => "time limit reached",
            SolveStatus::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Guards the rotation loop against the limits of an [`AllocatorConfig`]
/// and an external [`StopToken`].
#[derive(Debug, Clone)]
pub struct Termination {
    stop: StopToken,
    max_iterations: Option<u64>,
    time_limit: Option<Duration>,
    start: Instant,
    iterations: u64,
}

impl Termination {
    #[inline]
    pub fn new(max_iterations: Option<u64>, time_limit: Option<Duration>, stop: StopToken) -> Self {
        Self {
            stop,
            max_iterations,
            time_limit,
            start: Instant::now(),
            iterations: 0,
        }
    }

    #[inline]
    pub fn from_config(config: &AllocatorConfig, stop: StopToken) -> Self {
        Self::new(config.max_iterations, config.time_limit, stop)
    }

    /// Call before applying a rotation. Returns the reason to stop, or
    /// `None` after counting the rotation as done.
    pub fn tick_iteration(&mut self) -> Option<SolveStatus> {
        if self.stop.is_set() {
            return Some(SolveStatus::Stopped);
        }
        if self.max_iterations.is_some_and(|max| self.iterations >= max) {
            return Some(SolveStatus::IterationLimit);
        }
        if self.time_exceeded() {
            return Some(SolveStatus::TimeLimit);
        }
        self.iterations += 1;
        None
    }

    #[inline]
    pub fn time_exceeded(&self) -> bool {
        self.time_limit.is_some_and(|limit| self.elapsed() >= limit)
    }

    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    #[inline]
    pub fn stop_token(&self) -> &StopToken {
        &self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_token_identity_and_behavior() {
        let a = StopToken::new();
        let b = a.clone();
        let c = StopToken::new();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_set());

        b.request_stop();
        assert!(a.is_set());
        assert!(!c.is_set());
        assert!(a.to_string().contains("set: true"));
    }

    #[test]
    fn test_unbounded_never_stops() {
        let mut term = Termination::new(None, None, StopToken::new());
        for _ in 0..1000 {
            assert_eq!(term.tick_iteration(), None);
        }
        assert_eq!(term.iterations(), 1000);
    }

    #[test]
    fn test_iteration_limit() {
        let mut term = Termination::new(Some(2), None, StopToken::new());
        assert_eq!(term.tick_iteration(), None);
        assert_eq!(term.tick_iteration(), None);
        assert_eq!(term.tick_iteration(), Some(SolveStatus::IterationLimit));
        assert_eq!(term.iterations(), 2);
    }

    #[test]
    fn test_zero_time_limit_stops_immediately() {
        let mut term = Termination::new(None, Some(Duration::ZERO), StopToken::new());
        assert_eq!(term.tick_iteration(), Some(SolveStatus::TimeLimit));
        assert_eq!(term.iterations(), 0);
    }

    #[test]
    fn test_stop_token_wins() {
        let stop = StopToken::new();
        let mut term = Termination::new(Some(0), None, stop.clone());
        stop.request_stop();
        assert_eq!(term.tick_iteration(), Some(SolveStatus::Stopped));
        assert_eq!(term.stop_token(), &stop);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(SolveStatus::Converged.to_string(), "converged");
        assert!(SolveStatus::Converged.is_converged());
        assert!(!SolveStatus::TimeLimit.is_converged());
    }
}
