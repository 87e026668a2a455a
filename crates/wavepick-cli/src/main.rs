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

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};
use tracing_subscriber::EnvFilter;
use wavepick_core::prelude::Stopwatch;
use wavepick_model::prelude::{Problem, ProblemLoader, WaveSolution, validate};
use wavepick_solver::prelude::{Solver, SolverConfig};

fn enable_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[derive(Serialize)]
struct RunRecord {
    instance: String,
    start_ts: DateTime<Utc>,
    end_ts: DateTime<Utc>,
    runtime_ms: u128,
    selected_orders: usize,
    visited_corridors: usize,
    ratio: f64,
    feasible: bool,
}

fn main() -> ExitCode {
    enable_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [input, output] => {
            let input = Path::new(input);
            let output = Path::new(output);
            if input.is_dir() {
                run_batch(input, output)
            } else {
                run_single(input, output)
            }
        }
        _ => {
            eprintln!("usage: wavepick <instance.txt> <solution.txt>");
            eprintln!("       wavepick <instance-dir> <output-dir>");
            ExitCode::from(2)
        }
    }
}

fn run_single(input: &Path, output: &Path) -> ExitCode {
    // The global deadline counts from process start, so start the watch
    // before touching the instance.
    let stopwatch = Stopwatch::start_new();
    let (_, solution, record) = match solve_instance_file(input, stopwatch) {
        Ok(done) => done,
        Err(e) => {
            tracing::error!(instance = %input.display(), error = %e, "failed to solve");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = solution.write_to_path(output) {
        tracing::error!(path = %output.display(), error = %e, "failed to write solution");
        return ExitCode::FAILURE;
    }
    tracing::info!(
        path = %output.display(),
        ratio = record.ratio,
        runtime_ms = record.runtime_ms,
        "wrote solution"
    );
    ExitCode::SUCCESS
}

fn run_batch(input_dir: &Path, output_dir: &Path) -> ExitCode {
    let mut files: Vec<PathBuf> = match std::fs::read_dir(input_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.file_type().map(|ft| ft.is_file()).unwrap_or(false)
                    && e.path().extension().map(|x| x == "txt").unwrap_or(false)
            })
            .map(|e| e.path())
            .collect(),
        Err(e) => {
            tracing::error!(dir = %input_dir.display(), error = %e, "failed to read instance dir");
            return ExitCode::FAILURE;
        }
    };
    files.sort();

    if files.is_empty() {
        tracing::error!(dir = %input_dir.display(), "no .txt instances found");
        return ExitCode::FAILURE;
    }
    if let Err(e) = std::fs::create_dir_all(output_dir) {
        tracing::error!(dir = %output_dir.display(), error = %e, "failed to create output dir");
        return ExitCode::FAILURE;
    }

    let mut results: Vec<RunRecord> = Vec::new();
    for path in files {
        // Each instance gets its own full wall-clock budget.
        let stopwatch = Stopwatch::start_new();
        match solve_instance_file(&path, stopwatch) {
            Ok((_, solution, record)) => {
                let out_path = output_dir.join(path.file_name().unwrap_or_default());
                if let Err(e) = solution.write_to_path(&out_path) {
                    tracing::error!(path = %out_path.display(), error = %e, "failed to write solution");
                }
                results.push(record);
            }
            Err(e) => {
                tracing::error!(instance = %path.display(), error = %e, "failed to solve");
            }
        }
    }

    // Persist run records next to the outputs.
    let records_path = output_dir.join("solver_results.json");
    match File::create(&records_path).and_then(|mut f| {
        let json = serde_json::to_string_pretty(&results).expect("serialize run records");
        f.write_all(json.as_bytes())
    }) {
        Ok(()) => {
            tracing::info!(
                count = results.len(),
                path = %records_path.display(),
                "wrote run records"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(path = %records_path.display(), error = %e, "failed to write run records");
            ExitCode::FAILURE
        }
    }
}

fn solve_instance_file(
    path: &Path,
    stopwatch: Stopwatch,
) -> Result<(Problem, WaveSolution, RunRecord), Box<dyn std::error::Error>> {
    let problem = ProblemLoader::new().from_path(path)?;
    tracing::info!(
        instance = %path.display(),
        orders = problem.order_count(),
        corridors = problem.corridor_count(),
        items = problem.item_count(),
        "loaded instance"
    );

    let start_ts = Utc::now();
    let t0 = Instant::now();
    let solver = Solver::with_config(SolverConfig::from_env());
    let solution = solver.solve(&problem, stopwatch);
    let runtime = t0.elapsed();
    let end_ts = Utc::now();

    if let Err(e) = validate(&problem, &solution) {
        tracing::warn!(instance = %path.display(), error = %e, "solution failed validation");
    }

    let record = RunRecord {
        instance: path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        start_ts,
        end_ts,
        runtime_ms: runtime.as_millis(),
        selected_orders: solution.orders().len(),
        visited_corridors: solution.corridors().len(),
        ratio: solution.productivity(&problem),
        feasible: !solution.is_empty(),
    };
    tracing::info!(
        instance = %record.instance,
        ratio = record.ratio,
        orders = record.selected_orders,
        corridors = record.visited_corridors,
        runtime_ms = record.runtime_ms,
        "finished"
    );

    Ok((problem, solution, record))
}
