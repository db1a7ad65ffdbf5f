/*
 * SPDX-FileCopyrightText: 2023 Inria
 * SPDX-FileCopyrightText: 2023 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Command-line interface.
//!
//! The `sccdist` command reads an edge list, computes the strongly connected
//! components of the graph and prints their sizes on standard output. Logs go
//! to standard error, and their verbosity is controlled by `RUST_LOG`.

use crate::graph::DirectedGraph;
use crate::report::{RootsListing, SizeReport};
use crate::sccs::kosaraju;
use anyhow::{bail, Context, Result};
use clap::{Args, Parser};
use dsi_progress_logger::prelude::*;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// The number of vertices used when none is given on the command line.
pub const DEFAULT_NUM_NODES: usize = 875714;

/// The edge list read when no path is given on the command line.
pub const DEFAULT_PATH: &str = "SCC.txt";

/// Parses a duration such as `1m30s`: `d`, `h`, `m` and `s` suffixes, with
/// trailing bare digits counted as milliseconds.
fn parse_duration(value: &str) -> Result<Duration> {
    if value.trim().is_empty() {
        bail!("Empty duration: use `0` to log at every update");
    }
    let mut duration = Duration::ZERO;
    let mut digits = String::new();
    for c in value.chars().filter(|c| !c.is_whitespace()) {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let secs = match c {
            's' => 1,
            'm' => 60,
            'h' => 60 * 60,
            'd' => 60 * 60 * 24,
            _ => bail!("Invalid duration suffix: {}", c),
        };
        duration += Duration::from_secs(digits.parse::<u64>()? * secs);
        digits.clear();
    }
    if !digits.is_empty() {
        duration += Duration::from_millis(digits.parse()?);
    }
    Ok(duration)
}

/// Installs `env_logger` (default filter `info`), prefixing each record with
/// a timestamp and the time elapsed since startup.
pub fn init_env_logger() -> Result<()> {
    use jiff::fmt::friendly::{Designator, Spacing, SpanPrinter};
    use jiff::SpanRound;

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    let start = std::time::Instant::now();
    let printer = SpanPrinter::new()
        .spacing(Spacing::None)
        .designator(Designator::Compact);
    let span_round = SpanRound::new()
        .largest(jiff::Unit::Day)
        .smallest(jiff::Unit::Millisecond)
        .days_are_24_hours();

    builder.format(move |buf, record| {
        let Ok(ts) = jiff::Timestamp::try_from(SystemTime::now()) else {
            return Err(std::io::Error::other("Failed to get timestamp"));
        };
        let style = buf.default_level_style(record.level());
        let elapsed = start.elapsed();
        let span = jiff::Span::new()
            .seconds(elapsed.as_secs() as i64)
            .milliseconds(elapsed.subsec_millis() as i64)
            .round(span_round)
            .map_err(std::io::Error::other)?;
        writeln!(
            buf,
            "{} {} {style}{}{style:#} [{:?}] {} - {}",
            ts.strftime("%F %T%.3f"),
            printer.span_to_string(&span),
            record.level(),
            std::thread::current().id(),
            record.target(),
            record.args()
        )
    });
    builder.init();
    Ok(())
}

#[derive(Args, Debug)]
pub struct GlobalArgs {
    #[arg(long, value_parser = parse_duration, global=true, display_order = 1000)]
    /// How often to log progress (default 10s), e.g. "500", "30s" or "1m30s";
    /// bare numbers are milliseconds.
    pub log_interval: Option<Duration>,
}

#[derive(Args, Debug)]
pub struct CliArgs {
    #[arg(default_value_t = DEFAULT_NUM_NODES)]
    /// The number of vertices of the graph; vertex ids in the edge list must
    /// be between 1 and this number.
    pub num_nodes: usize,

    #[arg(default_value = DEFAULT_PATH)]
    /// The edge list: one arc per line, given by two whitespace-separated
    /// vertex ids (tail and head).
    pub path: PathBuf,

    #[arg(short, long)]
    /// Print also the leader of each vertex, one "leader vertex" pair per line.
    pub roots: bool,
}

#[derive(Parser, Debug)]
#[command(name = "sccdist", version)]
/// Computes the strongly connected components of a directed graph given as an
/// edge list. Prints the size of every component if the graph has fewer than
/// 13 vertices, and the five largest components otherwise.
pub struct Cli {
    #[clap(flatten)]
    pub global_args: GlobalArgs,
    #[clap(flatten)]
    pub args: CliArgs,
}

pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let start = std::time::Instant::now();
    let cli = Cli::parse_from(args);
    main(cli.global_args, cli.args)?;

    log::info!(
        "The command took {}",
        pretty_print_elapsed(start.elapsed().as_secs_f64())
    );

    Ok(())
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let stdout = std::io::stdout().lock();
    run(global_args, args, stdout)
}

/// Runs the command, writing the report on `out`.
pub fn run(global_args: GlobalArgs, args: CliArgs, mut out: impl Write) -> Result<()> {
    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    log::info!("Reading the graph from {}", args.path.display());
    let file = std::fs::File::open(&args.path)
        .with_context(|| format!("Could not open {}", args.path.display()))?;
    let graph = DirectedGraph::read_arcs(args.num_nodes, BufReader::new(file), &mut pl)
        .with_context(|| format!("Could not read the graph from {}", args.path.display()))?;

    let leaders = kosaraju(&graph, graph.transpose(), &mut pl);

    if args.roots {
        write!(out, "{}", RootsListing(&leaders)).context("Could not write the leaders")?;
    }
    writeln!(out, "{}", SizeReport::from_leaders(&leaders))
        .context("Could not write the report")?;
    out.flush()?;

    Ok(())
}

/// Formats elapsed seconds as weeks, days, hours, minutes and seconds,
/// omitting leading zero units.
fn pretty_print_elapsed(elapsed: f64) -> String {
    const UNITS: [(u64, &str); 4] = [
        (60 * 60 * 24 * 7, "week"),
        (60 * 60 * 24, "day"),
        (60 * 60, "hour"),
        (60, "minute"),
    ];
    let mut result = String::new();
    let mut rest = elapsed as u64;
    for (secs, name) in UNITS {
        let count = rest / secs;
        rest %= secs;
        match count {
            0 => {}
            1 => result.push_str(&format!("1 {} ", name)),
            _ => result.push_str(&format!("{} {}s ", count, name)),
        }
    }

    result.push_str(&format!("{:.3} seconds ({}s)", elapsed % 60.0, elapsed));
    result
}
