mod provenance;
mod report;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use cuckatoo::api::{solve, verify_tuples, SolveCfg, DEFAULT_TRIM_ROUNDS};
use report::{BuildInfo, CycleDoc, ParamsReport, SolveReport};

#[derive(Parser)]
#[command(name = "cuckatoo-cli")]
#[command(about = "Cuckatoo 42-cycle solver and verifier")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Search for a 42-cycle and print the result as JSON
    Solve(SolveArgs),
    /// Check a cycle (solve report or bare [[e,u,v],...] array) against a header
    Verify {
        /// Header in hex
        header: String,
        /// Graph size exponent (2^n edges)
        n: u32,
        /// JSON file holding the cycle
        cycle: PathBuf,
    },
    /// Repeat a solve and summarise timings
    Bench {
        #[command(flatten)]
        solve: SolveArgs,
        #[arg(long, default_value_t = 3)]
        repeat: u32,
    },
    /// Print build information
    Report,
}

#[derive(Args, Clone)]
struct SolveArgs {
    /// Header in hex (at most 64 bytes)
    #[arg(default_value = "0000000000000000000000000000000000000000000000000000000000000000")]
    header: String,
    /// Graph size exponent (2^n edges)
    #[arg(default_value_t = 8)]
    n: u32,
    /// Number of bins
    #[arg(default_value_t = 2)]
    k: u64,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    #[arg(long, default_value_t = 1)]
    max_attempts: u32,
    /// Wall-clock budget; absent runs to exhaustion
    #[arg(long)]
    time_budget_sec: Option<f64>,
    #[arg(long, default_value_t = DEFAULT_TRIM_ROUNDS)]
    trim_rounds: u32,
    /// Start edges per bin (default min(1000, bin survivors))
    #[arg(long)]
    max_starts: Option<usize>,
    /// Also write the JSON to this file plus a provenance sidecar
    #[arg(long)]
    out: Option<PathBuf>,
}

impl SolveArgs {
    fn header_bytes(&self) -> Result<Vec<u8>> {
        hex::decode(self.header.trim())
            .with_context(|| format!("header {:?} is not hex", self.header))
    }

    fn cfg(&self) -> Result<SolveCfg> {
        let time_budget = self
            .time_budget_sec
            .map(Duration::try_from_secs_f64)
            .transpose()
            .context("time budget must be a finite, non-negative number of seconds")?;
        Ok(SolveCfg {
            n: self.n,
            k: self.k,
            max_attempts: self.max_attempts,
            time_budget,
            trim_rounds: self.trim_rounds,
            max_starts_per_bin: self.max_starts,
            threads: self.threads,
            seed: self.seed,
            ..SolveCfg::default()
        })
    }
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve(args) => run_solve(&args),
        Action::Verify { header, n, cycle } => run_verify(&header, n, &cycle),
        Action::Bench { solve, repeat } => run_bench(&solve, repeat),
        Action::Report => {
            println!("{}", serde_json::to_string_pretty(&BuildInfo::current())?);
            Ok(())
        }
    }
}

fn run_solve(args: &SolveArgs) -> Result<()> {
    let header = args.header_bytes()?;
    let cfg = args.cfg()?;
    tracing::info!(n = cfg.n, k = cfg.k, threads = cfg.threads, "solve");
    let res = solve(&header, &cfg)?;
    let doc = serde_json::to_string(&SolveReport::new(&res))?;
    println!("{doc}");
    if let Some(out) = &args.out {
        write_artifact(out, doc.as_bytes())?;
        let sidecar = provenance::write_sidecar(out, &ParamsReport::new(&args.header, &cfg))?;
        tracing::info!(out = %out.display(), sidecar = %sidecar.display(), "wrote result");
    }
    Ok(())
}

fn run_verify(header_hex: &str, n: u32, cycle: &Path) -> Result<()> {
    let header = hex::decode(header_hex.trim()).context("header is not hex")?;
    let raw = std::fs::read(cycle).with_context(|| format!("reading {}", cycle.display()))?;
    let doc: CycleDoc = serde_json::from_slice(&raw)
        .with_context(|| format!("{} is not a cycle document", cycle.display()))?;
    let triples = doc.into_triples();
    let valid = verify_tuples(&header, n, &triples);
    tracing::info!(entries = triples.len(), valid, "verify");
    println!("{}", serde_json::json!({ "valid": valid, "entries": triples.len() }));
    Ok(())
}

fn run_bench(args: &SolveArgs, repeat: u32) -> Result<()> {
    if repeat == 0 {
        bail!("repeat must be >= 1");
    }
    let header = args.header_bytes()?;
    let cfg = args.cfg()?;
    let mut elapsed_ms = Vec::with_capacity(repeat as usize);
    let mut last = None;
    for run in 0..repeat {
        let res = solve(&header, &cfg)?;
        tracing::debug!(run, found = res.found, "bench run");
        elapsed_ms.push(res.elapsed.as_secs_f64() * 1e3);
        last = Some(res);
    }
    let Some(last) = last else {
        bail!("no bench runs executed");
    };
    let mean = elapsed_ms.iter().sum::<f64>() / elapsed_ms.len() as f64;
    let min = elapsed_ms.iter().copied().fold(f64::INFINITY, f64::min);
    let summary = serde_json::json!({
        "params": ParamsReport::new(&args.header, &cfg),
        "runs": repeat,
        "elapsed_ms": { "mean": mean, "min": min },
        "last": SolveReport::new(&last),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn write_artifact(out: &Path, bytes: &[u8]) -> Result<()> {
    provenance::ensure_parent(out)?;
    std::fs::write(out, bytes).with_context(|| format!("writing {}", out.display()))
}
