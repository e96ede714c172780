use crate::group::group_suites;
use crate::stats::{stats, Stats};
use crate::suite::{Suite, Test};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::io::{self, Write};

const INDENT: &str = "  ";
const STATS_INDENT: &[u8] = b"    ";

/// Full JSON output of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub root: Suite,
    pub stats: Stats,
}

impl Report {
    /// Groups per-source suites and counts the result.
    pub fn from_suites(suites: &[Suite]) -> Self {
        let root = group_suites(suites);
        Self { stats: stats(&root), root }
    }
}

fn write_tests<W: Write>(out: &mut W, tests: &[Test], depth: usize) -> io::Result<()> {
    let prefix = INDENT.repeat(depth);
    for test in tests {
        writeln!(out, "{prefix}{}", test.name)?;
    }
    Ok(())
}

/// Writes the children of `all` as an indented outline; `all` itself is not
/// printed.
pub fn write_tree<W: Write>(out: &mut W, all: &Suite, depth: usize) -> io::Result<()> {
    let prefix = INDENT.repeat(depth);
    for suite in &all.suites {
        writeln!(out, "{prefix}{}", suite.name)?;
        write_tests(out, &suite.tests, depth + 1)?;
        write_tree(out, suite, depth + 1)?;
    }
    Ok(())
}

/// The statistics block; its JSON is indented four spaces per level.
pub fn write_stats<W: Write>(out: &mut W, stats: &Stats) -> io::Result<()> {
    writeln!(out, "\nStatistics\n-----------")?;
    let mut ser = serde_json::Serializer::with_formatter(&mut *out, PrettyFormatter::with_indent(STATS_INDENT));
    stats.serialize(&mut ser)?;
    writeln!(out)
}

pub fn write_text_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    write_tree(out, &report.root, 0)?;
    write_stats(out, &report.stats)
}

pub fn write_json_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)
}
