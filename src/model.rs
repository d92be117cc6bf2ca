//! The result model: benchmarks, their results, and accumulation from a
//! stream of benchmark output.

use std::io::BufRead;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::name::parse_name;
use crate::output::Outputs;
use crate::record::{parse_line, Record};
use crate::value::Value;

/// A `name=value` input of a benchmark result.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: Value,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// One measured run of a benchmark under one combination of inputs.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BenchResult {
    pub parameters: Vec<Parameter>,
    pub sub_labels: Vec<String>,
    pub outputs: Outputs,
}

impl BenchResult {
    /// The first parameter called `name`.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A named benchmark and its results in input order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Benchmark {
    pub name: String,
    pub results: Vec<BenchResult>,
}

impl Benchmark {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            results: Vec::new(),
        }
    }
}

/// Accumulates records into one [`Benchmark`] per distinct name.
#[derive(Debug, Default)]
pub struct BenchmarkSet {
    benchmarks: IndexMap<String, Benchmark>,
}

impl BenchmarkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the record's identifier and append the result to its benchmark.
    pub fn insert(&mut self, record: &Record) -> Result<()> {
        let parsed = parse_name(&record.name)?;
        let result = BenchResult {
            parameters: parsed.parameters,
            sub_labels: parsed.sub_labels,
            outputs: record.outputs(),
        };
        self.benchmarks
            .entry(parsed.name)
            .or_insert_with_key(|name| Benchmark::new(name.clone()))
            .results
            .push(result);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }

    /// The benchmarks in order of first appearance.
    pub fn into_benchmarks(self) -> Vec<Benchmark> {
        self.benchmarks.into_values().collect()
    }
}

/// Read benchmark output and build one [`Benchmark`] per distinct name.
///
/// Lines that are not benchmark results are skipped. A result line whose
/// identifier cannot be parsed aborts the whole parse.
pub fn parse_benchmarks<R: BufRead>(reader: R) -> Result<Vec<Benchmark>> {
    let mut set = BenchmarkSet::new();
    let mut records = 0usize;
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let Some(record) = parse_line(&line) else {
            trace!(line = line_no + 1, "skipping non-benchmark line");
            continue;
        };
        set.insert(&record)?;
        records += 1;
    }
    debug!(records, benchmarks = set.len(), "parsed benchmark output");
    Ok(set.into_benchmarks())
}

/// Find the benchmark with the given name.
pub fn find_benchmark<'a>(benchmarks: &'a [Benchmark], name: &str) -> Result<&'a Benchmark> {
    benchmarks
        .iter()
        .find(|b| b.name == name)
        .ok_or_else(|| Error::UnknownBenchmark(name.to_string()))
}
