//! Parsing of benchmark identifiers such as
//! `BenchmarkMath/areaUnder/y=sin(x)/delta=0.001000/start_x=-2-4`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::Parameter;
use crate::value::Value;

/// Captures the identifier without its trailing `-<procs>` suffix.
///
/// The pattern is a literal, so compiling it cannot fail at runtime;
/// `test_name_pattern_compiles` checks it.
static BENCH_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Benchmark.+?)(?:-[0-9]+)?$").expect("valid benchmark name regex"));

/// A benchmark identifier split into its components.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedName {
    pub name: String,
    pub sub_labels: Vec<String>,
    pub parameters: Vec<Parameter>,
}

/// Split a raw identifier into the benchmark name, sub-labels and parameters.
///
/// A segment with exactly one `=` and a non-empty key becomes a parameter;
/// any other segment is kept verbatim as a sub-label. Both lists keep the
/// order in which the segments appear.
pub fn parse_name(raw: &str) -> Result<ParsedName> {
    let info = BENCH_NAME_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| Error::MalformedName(raw.to_string()))?
        .as_str();

    let mut segments = info.split('/');
    let name = match segments.next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return Err(Error::MalformedName(raw.to_string())),
    };

    let mut sub_labels = Vec::new();
    let mut parameters = Vec::new();
    for segment in segments {
        match parameter_segment(segment) {
            Some((key, value)) => parameters.push(Parameter::new(key, Value::infer(value))),
            None => sub_labels.push(segment.to_string()),
        }
    }

    Ok(ParsedName {
        name,
        sub_labels,
        parameters,
    })
}

fn parameter_segment(segment: &str) -> Option<(&str, &str)> {
    let mut parts = segment.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) if !key.is_empty() => Some((key, value)),
        _ => None,
    }
}
