//! Line tokenizer for `go test -bench` style output.
//!
//! A result line looks like
//!
//! ```text
//! BenchmarkMath/areaUnder/y=2x+3/delta=1.000000-4   88335925   13.3 ns/op   0 B/op   0 allocs/op
//! ```
//!
//! i.e. the benchmark identifier, the iteration count, then `(value, unit)`
//! pairs. Anything that does not fit is skipped.

use serde::Serialize;

use crate::output::Outputs;

/// One tokenized result line.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub name: String,
    pub iterations: u64,
    pub ns_per_op: Option<f64>,
    pub allocated_bytes_per_op: Option<u64>,
    pub allocs_per_op: Option<u64>,
    pub mb_per_s: Option<f64>,
}

impl Record {
    pub fn outputs(&self) -> Outputs {
        Outputs {
            iterations: self.iterations,
            ns_per_op: self.ns_per_op,
            allocated_bytes_per_op: self.allocated_bytes_per_op,
            allocs_per_op: self.allocs_per_op,
            mb_per_s: self.mb_per_s,
        }
    }

    fn measurement(&mut self, value: &str, unit: &str) {
        match unit {
            "ns/op" => self.ns_per_op = value.parse().ok(),
            "MB/s" => self.mb_per_s = value.parse().ok(),
            "B/op" => self.allocated_bytes_per_op = value.parse().ok(),
            "allocs/op" => self.allocs_per_op = value.parse().ok(),
            _ => {}
        }
    }
}

/// Tokenize one line, returning `None` for lines that are not benchmark results.
pub fn parse_line(line: &str) -> Option<Record> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 || !fields[0].starts_with("Benchmark") {
        return None;
    }
    let iterations = fields[1].parse().ok()?;

    let mut record = Record {
        name: fields[0].to_string(),
        iterations,
        ns_per_op: None,
        allocated_bytes_per_op: None,
        allocs_per_op: None,
        mb_per_s: None,
    };
    for pair in fields[2..].chunks_exact(2) {
        record.measurement(pair[0], pair[1]);
    }
    Some(record)
}
