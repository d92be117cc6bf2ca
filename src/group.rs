//! Grouping of a benchmark's results by a subset of their inputs.

use std::collections::BTreeMap;

use crate::model::{BenchResult, Benchmark};

/// Results keyed by their group key, e.g. `"y=sin(x),delta=0.001"`.
///
/// Keys iterate in lexicographic order; results within a group keep the
/// benchmark's input order.
pub type GroupedResults = BTreeMap<String, Vec<BenchResult>>;

/// Build the group key of `result` for `group_by`.
///
/// The key lists `name=value` for each requested name in the order of
/// `group_by`, joined by commas. Returns `None` if any name is missing.
pub fn group_key(result: &BenchResult, group_by: &[String]) -> Option<String> {
    let mut parts = Vec::with_capacity(group_by.len());
    for name in group_by {
        let param = result.parameter(name)?;
        parts.push(format!("{}={}", param.name, param.value));
    }
    Some(parts.join(","))
}

impl Benchmark {
    /// Partition the results by the values of the `group_by` inputs.
    ///
    /// Results lacking any of the requested inputs are left out. With an
    /// empty `group_by` every result lands in the group keyed by `""`.
    pub fn group_results(&self, group_by: &[String]) -> GroupedResults {
        let mut grouped = GroupedResults::new();
        if group_by.is_empty() {
            grouped.insert(String::new(), self.results.clone());
            return grouped;
        }

        for result in &self.results {
            if let Some(key) = group_key(result, group_by) {
                grouped.entry(key).or_default().push(result.clone());
            }
        }
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{math_result, sample_benchmark};
    use crate::model::Parameter;
    use crate::value::Value;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_group_by_nothing_keeps_everything_in_order() {
        let bench = sample_benchmark();
        let grouped = bench.group_results(&[]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[""], bench.results);
    }

    #[test]
    fn test_group_by_single_input() {
        let bench = sample_benchmark();
        let grouped = bench.group_results(&names(&["y"]));

        let keys: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(keys, names(&["y=2x+3", "y=sin(x)"]));
        assert_eq!(grouped["y=sin(x)"], bench.results[..2].to_vec());
        assert_eq!(grouped["y=2x+3"], bench.results[2..].to_vec());
    }

    #[test]
    fn test_group_key_follows_requested_order() {
        let bench = sample_benchmark();

        let grouped = bench.group_results(&names(&["delta", "y"]));
        assert!(grouped.contains_key("delta=0.001,y=sin(x)"));
        assert!(grouped.contains_key("delta=0.01,y=2x+3"));

        let grouped = bench.group_results(&names(&["y", "delta"]));
        assert!(grouped.contains_key("y=sin(x),delta=0.001"));
        assert_eq!(grouped.len(), 4);
    }

    #[test]
    fn test_results_missing_an_input_are_excluded() {
        let mut bench = sample_benchmark();
        let mut partial = math_result("sin(x)", 0.1, 1, 1.0);
        partial.parameters.retain(|p| p.name != "delta");
        bench.results.push(partial);

        let grouped = bench.group_results(&names(&["y", "delta"]));
        let total: usize = grouped.values().map(Vec::len).sum();
        assert_eq!(total, 4);
        assert!(total < bench.results.len());

        let grouped = bench.group_results(&names(&["missing"]));
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_group_key_uses_first_duplicate() {
        let mut result = math_result("sin(x)", 0.1, 1, 1.0);
        result.parameters.push(Parameter::new("y", Value::from("cos(x)")));
        assert_eq!(group_key(&result, &names(&["y"])).unwrap(), "y=sin(x)");
    }
}
