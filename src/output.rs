//! Measured outputs of a single benchmark run and lookup by symbolic name.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::value::Value;

/// The measured values of one result line. Absent metrics are `None`, not zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Outputs {
    /// Number of iterations.
    pub iterations: u64,
    pub ns_per_op: Option<f64>,
    pub allocated_bytes_per_op: Option<u64>,
    pub allocs_per_op: Option<u64>,
    /// Throughput in MB/s.
    pub mb_per_s: Option<f64>,
}

/// The output names available for the y-axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputName {
    Runs,
    Time,
    MemAllocs,
    MemUsed,
    MemByTime,
}

type Extractor = fn(&Outputs) -> Option<Value>;

fn runs(o: &Outputs) -> Option<Value> {
    Some(Value::Uint(o.iterations))
}

fn time(o: &Outputs) -> Option<Value> {
    o.ns_per_op.map(Value::Float)
}

fn mem_allocs(o: &Outputs) -> Option<Value> {
    o.allocs_per_op.map(Value::Uint)
}

fn mem_used(o: &Outputs) -> Option<Value> {
    o.allocated_bytes_per_op.map(Value::Uint)
}

fn mem_by_time(o: &Outputs) -> Option<Value> {
    o.mb_per_s.map(Value::Float)
}

/// Every recognized output: its name, symbol and how to read it.
static OUTPUTS: [(OutputName, &str, Extractor); 5] = [
    (OutputName::Runs, "runs", runs),
    (OutputName::Time, "time", time),
    (OutputName::MemAllocs, "mem_allocs", mem_allocs),
    (OutputName::MemUsed, "mem_used", mem_used),
    (OutputName::MemByTime, "mem_by_time", mem_by_time),
];

impl OutputName {
    pub const ALL: [OutputName; 5] = [
        OutputName::Runs,
        OutputName::Time,
        OutputName::MemAllocs,
        OutputName::MemUsed,
        OutputName::MemByTime,
    ];

    fn entry(self) -> &'static (OutputName, &'static str, Extractor) {
        // OUTPUTS is indexed in declaration order.
        &OUTPUTS[self as usize]
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().1
    }
}

impl fmt::Display for OutputName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OUTPUTS
            .iter()
            .find(|(_, symbol, _)| *symbol == s)
            .map(|(name, _, _)| *name)
            .ok_or_else(|| Error::UnknownOutputName(s.to_string()))
    }
}

impl Outputs {
    /// Value of a recognized output, or `UnmeasuredOutput` if it was not recorded.
    pub fn value(&self, name: OutputName) -> Result<Value> {
        (name.entry().2)(self).ok_or(Error::UnmeasuredOutput(name))
    }

    /// Value of the output with the given symbol, e.g. `"time"`.
    pub fn value_by_name(&self, name: &str) -> Result<Value> {
        self.value(name.parse()?)
    }
}
