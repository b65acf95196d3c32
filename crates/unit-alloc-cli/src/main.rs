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

mod args;
mod report;
mod run;

use anyhow::{Result, bail};
use args::{Opts, OutputFormat};
use clap::Parser;
use rayon::prelude::*;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

fn enable_tracing(opts: &Opts) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(opts.default_log_filter())),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    enable_tracing(&opts);

    let results: Vec<_> = opts
        .allocate
        .par_iter()
        .map(|path| run::solve_path(path, &opts))
        .collect();

    let header = opts.allocate.len() > 1;
    let mut out = io::stdout().lock();
    let mut failed = 0usize;
    let mut unconverged = 0usize;
    for result in results {
        match result {
            Ok(report) => {
                if !report.is_converged() {
                    tracing::warn!(
                        "{} did not converge: {} after {} rotations with {} placements",
                        report.path().display(),
                        report.status(),
                        report.iterations(),
                        report.placements().len()
                    );
                    unconverged += 1;
                }
                if opts.out == OutputFormat::Term {
                    report.write_term(&mut out, header)?;
                }
            }
            Err(err) => {
                tracing::error!("{:#}", err);
                failed += 1;
            }
        }
    }
    out.flush()?;

    if failed > 0 {
        bail!("{} of {} input(s) failed", failed, opts.allocate.len());
    }
    if unconverged > 0 {
        bail!("{} input(s) did not converge", unconverged);
    }
    Ok(())
}
