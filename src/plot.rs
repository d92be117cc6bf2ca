//! Plotting a benchmark: group, filter, split, build series and hand them to
//! a [`Plotter`].

use tracing::debug;

use crate::error::{Error, Result, ResultExt};
use crate::filter::{filter_results, Filter};
use crate::model::Benchmark;
use crate::series::{avg_line_series, default_plot_kinds, scatter_series, PlotKind, SeriesMap};
use crate::split::split_grouped;

/// A rendering backend for benchmark series.
///
/// Both calls draw onto the same figure; `include_legend` is set only for the
/// first plot kind drawn.
pub trait Plotter {
    fn plot_scatter(
        &mut self,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) -> Result<()>;

    fn plot_line(
        &mut self,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) -> Result<()>;
}

/// How results are grouped, filtered and drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotConfig {
    /// Input names whose values form the group key.
    pub group_by: Vec<String>,
    /// Results must match every filter.
    pub filter_by: Vec<Filter>,
    /// Plot kinds to draw, in order. Empty means infer from the data.
    pub plot_kinds: Vec<PlotKind>,
}

impl PlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_group_by<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by = names.into_iter().map(Into::into).collect();
        self
    }

    /// Parse filter expressions such as `y==sin(x)`.
    pub fn with_filters<I, S>(mut self, exprs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filter_by = exprs
            .into_iter()
            .map(|e| e.as_ref().parse())
            .collect::<Result<_>>()?;
        Ok(self)
    }

    /// Parse plot kind names. The whole list is validated before anything
    /// is drawn, so one bad name fails the plot without partial output.
    pub fn with_plot_kinds<I, S>(mut self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.plot_kinds = names
            .into_iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<_>>()?;
        Ok(self)
    }
}

/// Plot `x_name` (an input) against `y_name` (an output) for one benchmark.
///
/// Any failure aborts the remaining plot kinds; kinds already drawn are not
/// rolled back.
pub fn plot_benchmark<P: Plotter + ?Sized>(
    benchmark: &Benchmark,
    plotter: &mut P,
    x_name: &str,
    y_name: &str,
    config: &PlotConfig,
) -> Result<()> {
    let grouped = benchmark.group_results(&config.group_by);
    let grouped = filter_results(grouped, &config.filter_by).context("err filtering results")?;
    let split = split_grouped(&grouped, x_name, y_name).context("err splitting grouped results")?;
    debug!(
        benchmark = %benchmark.name,
        groups = split.len(),
        "split grouped results"
    );

    let kinds = if config.plot_kinds.is_empty() {
        default_plot_kinds(&split)?
    } else {
        config.plot_kinds.clone()
    };

    let (title, x_label, y_label) = (benchmark.name.as_str(), x_name, y_name);
    for (i, kind) in kinds.iter().enumerate() {
        let include_legend = i == 0;
        debug!(%kind, include_legend, "plotting");
        match kind {
            PlotKind::Scatter => {
                let data = scatter_series(&split).context("error creating scatter plot")?;
                plotter
                    .plot_scatter(&data, title, x_label, y_label, include_legend)
                    .context("error creating scatter plot")?;
            }
            PlotKind::AvgLine => {
                let data = avg_line_series(&split).context("error creating average line plot")?;
                plotter
                    .plot_line(&data, title, x_label, y_label, include_legend)
                    .context("error creating average line plot")?;
            }
        }
    }
    Ok(())
}

/// Plot a benchmark chosen by name from a parsed set.
pub fn plot_named<P: Plotter + ?Sized>(
    benchmarks: &[Benchmark],
    bench_name: &str,
    plotter: &mut P,
    x_name: &str,
    y_name: &str,
    config: &PlotConfig,
) -> Result<()> {
    let benchmark = crate::model::find_benchmark(benchmarks, bench_name)?;
    plot_benchmark(benchmark, plotter, x_name, y_name, config)
        .map_err(|e: Error| e.context(format!("error plotting '{bench_name}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tests::{math_result, sample_benchmark};
    use crate::output::OutputName;
    use crate::schema::{PlotCall, RecordingPlotter};
    use crate::series::Series;
    use crate::value::ValueKind;

    fn series(x: &[f64], y: &[f64]) -> Series {
        Series {
            x: x.to_vec(),
            y: y.to_vec(),
        }
    }

    fn by_y(sin: Series, linear: Series) -> SeriesMap {
        SeriesMap::from([("y=sin(x)".to_string(), sin), ("y=2x+3".to_string(), linear)])
    }

    fn plot(x: &str, y: &str, config: PlotConfig) -> (Result<()>, Vec<PlotCall>) {
        let mut plotter = RecordingPlotter::default();
        let res = plot_benchmark(&sample_benchmark(), &mut plotter, x, y, &config);
        (res, plotter.calls)
    }

    #[test]
    fn test_scatter_float_x_float_y() {
        let config = PlotConfig::new()
            .with_group_by(["y"])
            .with_plot_kinds(["scatter"])
            .unwrap();
        let (res, calls) = plot("delta", "time", config);
        res.unwrap();

        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.kind, PlotKind::Scatter);
        assert_eq!(call.title, "BenchmarkMath");
        assert_eq!(call.x_label, "delta");
        assert_eq!(call.y_label, "time");
        assert!(call.include_legend);
        assert_eq!(
            call.series,
            by_y(
                series(&[0.001, 0.01], &[2000.0, 200.0]),
                series(&[0.001, 0.01], &[1000.0, 100.0])
            )
        );
    }

    #[test]
    fn test_scatter_int_x_runs_y() {
        let config = PlotConfig::new()
            .with_group_by(["y"])
            .with_plot_kinds(["scatter"])
            .unwrap();
        let (res, calls) = plot("start_x", "runs", config);
        res.unwrap();
        assert_eq!(
            calls[0].series,
            by_y(
                series(&[-2.0, -2.0], &[10.0, 100.0]),
                series(&[-2.0, -2.0], &[5.0, 10.0])
            )
        );
    }

    #[test]
    fn test_default_kinds_draw_scatter_then_line() {
        let config = PlotConfig::new().with_group_by(["y"]);
        let (res, calls) = plot("delta", "time", config);
        res.unwrap();

        let kinds: Vec<_> = calls.iter().map(|c| (c.kind, c.include_legend)).collect();
        assert_eq!(
            kinds,
            vec![(PlotKind::Scatter, true), (PlotKind::AvgLine, false)]
        );
        assert_eq!(calls[0].series, calls[1].series);
    }

    #[test]
    fn test_filter_before_split() {
        let config = PlotConfig::new()
            .with_filters(["y==2x+3"])
            .unwrap();
        let (res, calls) = plot("delta", "time", config);
        res.unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].series,
            SeriesMap::from([(String::new(), series(&[0.001, 0.01], &[1000.0, 100.0]))])
        );
    }

    #[test]
    fn test_invalid_filter_aborts_before_plotting() {
        let config = PlotConfig::new().with_filters(["y!=2"]).unwrap();
        let (res, calls) = plot("delta", "time", config);
        assert!(matches!(res.unwrap_err().root(), Error::FilterMismatch { .. }));
        assert!(calls.is_empty());
    }

    #[test]
    fn test_avg_line_merges_duplicate_x() {
        let mut bench = sample_benchmark();
        bench.results.push(math_result("sin(x)", 0.001, 10, 1000.0));
        let config = PlotConfig::new()
            .with_group_by(["y"])
            .with_plot_kinds(["avg_line"])
            .unwrap();

        let mut plotter = RecordingPlotter::default();
        plot_benchmark(&bench, &mut plotter, "delta", "time", &config).unwrap();
        assert_eq!(
            plotter.calls[0].series["y=sin(x)"],
            series(&[0.001, 0.01], &[1500.0, 200.0])
        );
        assert!(plotter.calls[0].include_legend);
    }

    #[test]
    fn test_string_x_fails() {
        let config = PlotConfig::new()
            .with_group_by(["start_x"])
            .with_plot_kinds(["scatter"])
            .unwrap();
        let (res, calls) = plot("y", "time", config);
        assert!(matches!(
            res.unwrap_err().root(),
            Error::UnsupportedValueKind(ValueKind::String)
        ));
        assert!(calls.is_empty());

        let (res, _) = plot("y", "time", PlotConfig::new());
        assert!(matches!(res.unwrap_err(), Error::NoDefaultPlotKind));
    }

    #[test]
    fn test_invalid_names() {
        let (res, _) = plot("invalid_name", "time", PlotConfig::new());
        let err = res.unwrap_err();
        assert!(matches!(err.root(), Error::UnknownInput(_)));
        assert!(err.to_string().starts_with("err splitting grouped results"));

        let (res, _) = plot("delta", "invalid_name", PlotConfig::new());
        assert!(matches!(res.unwrap_err().root(), Error::UnknownOutputName(_)));

        let (res, _) = plot("delta", "mem_by_time", PlotConfig::new());
        assert!(matches!(
            res.unwrap_err().root(),
            Error::UnmeasuredOutput(OutputName::MemByTime)
        ));
    }

    #[test]
    fn test_unknown_plot_kind_rejected_up_front() {
        let err = PlotConfig::new()
            .with_plot_kinds(["scatter", "invalid"])
            .unwrap_err();
        assert!(matches!(err, Error::UnknownPlotKind(name) if name == "invalid"));
    }

    /// Records scatter calls; every line call fails.
    #[derive(Default)]
    struct LineFails(RecordingPlotter);

    impl Plotter for LineFails {
        fn plot_scatter(
            &mut self,
            data: &SeriesMap,
            title: &str,
            x_label: &str,
            y_label: &str,
            include_legend: bool,
        ) -> Result<()> {
            self.0.plot_scatter(data, title, x_label, y_label, include_legend)
        }

        fn plot_line(&mut self, _: &SeriesMap, _: &str, _: &str, _: &str, _: bool) -> Result<()> {
            Err(Error::Render("boom".to_string()))
        }
    }

    #[test]
    fn test_plotter_error_stops_remaining_kinds() {
        let config = PlotConfig::new()
            .with_group_by(["y"])
            .with_plot_kinds(["scatter", "avg_line", "scatter"])
            .unwrap();
        let mut plotter = LineFails::default();
        let err = plot_benchmark(&sample_benchmark(), &mut plotter, "delta", "time", &config)
            .unwrap_err();

        assert!(matches!(err.root(), Error::Render(msg) if msg == "boom"));
        assert!(err.to_string().starts_with("error creating average line plot: "));
        let drawn: Vec<_> = plotter.0.calls.iter().map(|c| c.kind).collect();
        assert_eq!(drawn, vec![PlotKind::Scatter]);
    }

    #[test]
    fn test_plot_named() {
        let benchmarks = vec![sample_benchmark()];
        let mut plotter = RecordingPlotter::default();
        plot_named(&benchmarks, "BenchmarkMath", &mut plotter, "delta", "time", &PlotConfig::new())
            .unwrap();
        assert_eq!(plotter.calls.len(), 2);

        let err = plot_named(&benchmarks, "BenchmarkNope", &mut plotter, "delta", "time", &PlotConfig::new())
            .unwrap_err();
        assert!(matches!(err, Error::UnknownBenchmark(_)));
    }
}
