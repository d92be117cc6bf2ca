use indexmap::IndexSet;
use serde::Serialize;

use crate::error::Result;
use crate::model::Benchmark;
use crate::plot::Plotter;
use crate::series::{PlotKind, SeriesMap};

/// One captured call to a [`Plotter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotCall {
    pub kind: PlotKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub include_legend: bool,
    pub series: SeriesMap,
}

/// A [`Plotter`] that records every call instead of drawing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordingPlotter {
    pub calls: Vec<PlotCall>,
}

impl RecordingPlotter {
    fn record(
        &mut self,
        kind: PlotKind,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) {
        self.calls.push(PlotCall {
            kind,
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            include_legend,
            series: data.clone(),
        });
    }
}

impl Plotter for RecordingPlotter {
    fn plot_scatter(
        &mut self,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) -> Result<()> {
        self.record(PlotKind::Scatter, data, title, x_label, y_label, include_legend);
        Ok(())
    }

    fn plot_line(
        &mut self,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) -> Result<()> {
        self.record(PlotKind::AvgLine, data, title, x_label, y_label, include_legend);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub schema_version: u32,
    pub tool_version: String,
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            schema_version: 1,
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// The series computed for one plot request.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesReport {
    pub meta: ReportMeta,
    pub benchmark: String,
    pub group_by: Vec<String>,
    pub filter_by: Vec<String>,
    pub plots: Vec<PlotCall>,
}

/// What inputs a parsed benchmark offers for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkSummary {
    pub name: String,
    pub results: usize,
    /// Distinct input names in first-seen order.
    pub inputs: Vec<String>,
    /// Distinct sub-labels in first-seen order.
    pub sub_labels: Vec<String>,
}

impl From<&Benchmark> for BenchmarkSummary {
    fn from(b: &Benchmark) -> Self {
        let mut inputs = IndexSet::new();
        let mut sub_labels = IndexSet::new();
        for result in &b.results {
            inputs.extend(result.parameters.iter().map(|p| p.name.clone()));
            sub_labels.extend(result.sub_labels.iter().cloned());
        }
        Self {
            name: b.name.clone(),
            results: b.results.len(),
            inputs: inputs.into_iter().collect(),
            sub_labels: sub_labels.into_iter().collect(),
        }
    }
}
