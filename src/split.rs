//! Splitting results into the `(x, y)` values named by the caller.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::group::GroupedResults;
use crate::model::BenchResult;
use crate::output::OutputName;
use crate::value::Value;

/// The x input and y output of one result, still typed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SplitRes {
    pub x: Value,
    pub y: Value,
}

/// Split results keyed by group.
pub type SplitGrouped = BTreeMap<String, Vec<SplitRes>>;

impl BenchResult {
    /// Extract the input `x_name` and the output `y`.
    pub fn split_to(&self, x_name: &str, y: OutputName) -> Result<SplitRes> {
        let x = self
            .parameter(x_name)
            .ok_or_else(|| Error::UnknownInput(x_name.to_string()))?
            .value
            .clone();
        let y = self
            .outputs
            .value(y)
            .map_err(|e| e.context("error getting y value"))?;
        Ok(SplitRes { x, y })
    }
}

/// Split every grouped result; the first failure aborts the whole split.
pub fn split_grouped(grouped: &GroupedResults, x_name: &str, y_name: &str) -> Result<SplitGrouped> {
    let y: OutputName = y_name.parse()?;
    grouped
        .iter()
        .map(|(key, results)| -> Result<(String, Vec<SplitRes>)> {
            let split = results
                .iter()
                .map(|res| res.split_to(x_name, y))
                .collect::<Result<Vec<_>>>()?;
            Ok((key.clone(), split))
        })
        .collect()
}
