//! Numeric series built from split results: raw scatter points and
//! per-x averaged lines.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::split::{SplitGrouped, SplitRes};

/// The available plot kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotKind {
    Scatter,
    AvgLine,
}

impl PlotKind {
    pub const ALL: [PlotKind; 2] = [PlotKind::Scatter, PlotKind::AvgLine];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlotKind::Scatter => "scatter",
            PlotKind::AvgLine => "avg_line",
        }
    }
}

impl fmt::Display for PlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlotKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PlotKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownPlotKind(s.to_string()))
    }
}

/// Equal-length x and y coordinates of one group.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Series keyed by group, in group key order.
pub type SeriesMap = BTreeMap<String, Series>;

fn numeric_point(res: &SplitRes) -> Result<(f64, f64)> {
    let x = res
        .x
        .as_f64()
        .map_err(|e| e.context("cannot create plot from x data"))?;
    let y = res
        .y
        .as_f64()
        .map_err(|e| e.context("cannot create plot from y data"))?;
    Ok((x, y))
}

/// One point per split result, in input order.
pub fn scatter_series(split: &SplitGrouped) -> Result<SeriesMap> {
    let mut data = SeriesMap::new();
    for (group, results) in split {
        let mut series = Series::default();
        for res in results {
            let (x, y) = numeric_point(res)?;
            series.x.push(x);
            series.y.push(y);
        }
        data.insert(group.clone(), series);
    }
    Ok(data)
}

/// One point per distinct x, with y the mean of that x's values, sorted by x.
///
/// x values are bucketed by bit pattern, so `0.0` and `-0.0` stay apart.
pub fn avg_line_series(split: &SplitGrouped) -> Result<SeriesMap> {
    let mut data = SeriesMap::new();
    for (group, results) in split {
        let mut points = results
            .iter()
            .map(numeric_point)
            .collect::<Result<Vec<_>>>()?;
        // Stable, so each bucket is summed in input order.
        points.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut series = Series::default();
        for bucket in points.chunk_by(|a, b| a.0.to_bits() == b.0.to_bits()) {
            let total: f64 = bucket.iter().map(|p| p.1).sum();
            series.x.push(bucket[0].0);
            series.y.push(total / bucket.len() as f64);
        }
        data.insert(group.clone(), series);
    }
    Ok(data)
}

/// The plot kinds to draw when none were requested.
///
/// Numeric x data gets a scatter plot and an average line; anything else has
/// no sensible default.
pub fn default_plot_kinds(split: &SplitGrouped) -> Result<Vec<PlotKind>> {
    let numeric = split
        .values()
        .filter_map(|results| results.first())
        .any(|res| res.x.kind().is_numeric());
    if numeric {
        Ok(vec![PlotKind::Scatter, PlotKind::AvgLine])
    } else {
        Err(Error::NoDefaultPlotKind)
    }
}
