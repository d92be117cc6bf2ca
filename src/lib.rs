//! Plot Go-style benchmark output.
//!
//! Benchmark identifiers such as `BenchmarkMath/areaUnder/y=sin(x)/delta=0.001-4`
//! carry the inputs of each run. Results are grouped and filtered by those
//! inputs, one input is plotted against a measured output, and the series are
//! handed to a [`Plotter`].

pub mod error;
pub mod filter;
pub mod group;
pub mod model;
pub mod name;
pub mod output;
pub mod plot;
pub mod record;
pub mod render;
pub mod schema;
pub mod series;
pub mod split;
pub mod value;

pub use error::{Error, Result};
pub use filter::{filter_results, Comparison, Filter};
pub use group::{group_key, GroupedResults};
pub use model::{find_benchmark, parse_benchmarks, BenchResult, Benchmark, BenchmarkSet, Parameter};
pub use name::{parse_name, ParsedName};
pub use output::{OutputName, Outputs};
pub use plot::{plot_benchmark, plot_named, PlotConfig, Plotter};
pub use record::{parse_line, Record};
pub use render::{ImageFormat, LegendPosition, SvgPlotter};
pub use schema::{BenchmarkSummary, PlotCall, RecordingPlotter, SeriesReport};
pub use series::{avg_line_series, default_plot_kinds, scatter_series, PlotKind, Series, SeriesMap};
pub use split::{split_grouped, SplitGrouped, SplitRes};
pub use value::{Value, ValueKind};
