/*
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![cfg(feature = "cli")]

use anyhow::Result;
use clap::Parser;
use sccdist::cli::{run, Cli, CliArgs, GlobalArgs};
use sccdist::graph::GraphError;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

fn edge_file(content: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

fn run_on(num_nodes: usize, path: PathBuf, roots: bool) -> Result<String> {
    let mut out = vec![];
    run(
        GlobalArgs { log_interval: None },
        CliArgs {
            num_nodes,
            path,
            roots,
        },
        &mut out,
    )?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_small_graph() -> Result<()> {
    let file = edge_file("1 2\n2 1\n3 4\n4 3\n2 3\n")?;
    let output = run_on(4, file.path().to_owned(), false)?;
    assert_eq!(output, "{2=2, 4=2}\n");
    Ok(())
}

#[test]
fn test_roots() -> Result<()> {
    let file = edge_file("1 2\n2 1\n3 4\n4 3\n2 3\n")?;
    let output = run_on(4, file.path().to_owned(), true)?;
    assert_eq!(output, "2 1\n2 2\n4 3\n4 4\n{2=2, 4=2}\n");
    Ok(())
}

#[test]
fn test_large_graph() -> Result<()> {
    let mut content = String::new();
    // Components of size 6, 5, 4, 3, 2, plus isolated vertices
    let mut first = 1;
    for size in [6, 5, 4, 3, 2] {
        for v in first..first + size {
            let next = if v + 1 == first + size { first } else { v + 1 };
            content.push_str(&format!("{} {}\n", v, next));
        }
        first += size;
    }
    let file = edge_file(&content)?;
    let output = run_on(30, file.path().to_owned(), false)?;

    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("5 SCCs with maximum size:"));
    let sizes = lines
        .next()
        .unwrap()
        .trim_matches(|c| c == '{' || c == '}')
        .split(", ")
        .map(|entry| entry.split_once('=').unwrap().1.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;
    assert_eq!(sizes, vec![6, 5, 4, 3, 2]);
    Ok(())
}

#[test]
fn test_missing_file() {
    let err = run_on(4, PathBuf::from("/nonexistent/SCC.txt"), false).unwrap_err();
    assert!(err.to_string().contains("Could not open"));
}

#[test]
fn test_out_of_range_is_fatal() -> Result<()> {
    let file = edge_file("1 2\n2 5\n")?;
    let err = run_on(4, file.path().to_owned(), false).unwrap_err();
    let graph_err = err.downcast_ref::<GraphError>().unwrap();
    assert!(matches!(graph_err, GraphError::Line { line: 2, .. }));
    Ok(())
}

#[test]
fn test_malformed_line_is_fatal() -> Result<()> {
    let file = edge_file("1 2\n2,3\n")?;
    let err = run_on(4, file.path().to_owned(), false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GraphError>(),
        Some(GraphError::MalformedLine { line: 2, .. })
    ));
    Ok(())
}

#[test]
fn test_arguments() -> Result<()> {
    let cli = Cli::try_parse_from([
        "sccdist",
        "12",
        "graph.txt",
        "--roots",
        "--log-interval",
        "1s",
    ])?;
    assert_eq!(cli.args.num_nodes, 12);
    assert_eq!(cli.args.path, PathBuf::from("graph.txt"));
    assert!(cli.args.roots);
    assert_eq!(
        cli.global_args.log_interval,
        Some(std::time::Duration::from_secs(1))
    );

    assert!(Cli::try_parse_from(["sccdist", "-3", "graph.txt"]).is_err());
    assert!(Cli::try_parse_from(["sccdist", "3.5"]).is_err());
    Ok(())
}

#[test]
fn test_too_many_nodes_is_fatal() -> Result<()> {
    let file = edge_file("1 2\n")?;
    let err = run_on(usize::MAX / 2, file.path().to_owned(), false).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GraphError>(),
        Some(GraphError::Allocation { .. })
    ));
    Ok(())
}
