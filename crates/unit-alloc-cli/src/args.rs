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

use clap::{ArgAction, Parser, ValueEnum};
use std::{num::NonZeroU64, path::PathBuf, time::Duration};
use unit_alloc_solver::prelude::AllocatorConfig;

#[derive(Debug, Parser)]
#[command(
    name = "unit-alloc",
    version,
    about = "Allocate source units to target slots at minimum total weight"
)]
pub struct Opts {
    /// YAML problem files. Several files are solved in parallel.
    #[arg(
        short = 'a',
        long = "allocate",
        value_name = "FILE",
        num_args = 1..,
        required = true
    )]
    pub allocate: Vec<PathBuf>,

    /// What to print for each solved file.
    #[arg(long, value_enum, default_value_t = OutputFormat::Term)]
    pub out: OutputFormat,

    /// Be (more) verbose: -v info, -vv debug, -vvv trace. RUST_LOG wins when set.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Snap weights to fractions with at most this denominator and solve in
    /// exact rational arithmetic. Guarantees termination.
    #[arg(long, value_name = "N")]
    pub rational_precision: Option<NonZeroU64>,

    /// Stop after this many rotations.
    #[arg(long, value_name = "N")]
    pub max_iterations: Option<u64>,

    /// Wall-clock budget per file.
    #[arg(long, value_name = "SECONDS", value_parser = parse_seconds)]
    pub time_limit: Option<Duration>,

    /// Edge table backend.
    #[arg(long, value_enum, default_value_t = TableKind::Indexed)]
    pub table: TableKind,

    /// Keep the first edge of a repeated (from, to) pair instead of failing.
    #[arg(long)]
    pub allow_duplicate_edges: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `source -> target` line per placement.
    Term,
    /// Nothing; only the exit status reports the result.
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableKind {
    Indexed,
    Scan,
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|e| format!("`{s}` is not a number of seconds: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("`{s}` is not a valid duration: {e}"))
}

impl Opts {
    pub fn allocator_config(&self) -> AllocatorConfig {
        AllocatorConfig {
            rational_precision: self.rational_precision,
            max_iterations: self.max_iterations,
            time_limit: self.time_limit,
        }
    }

    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
