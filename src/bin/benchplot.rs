use benchplot::{
    find_benchmark, parse_benchmarks, plot_benchmark, Benchmark, BenchmarkSummary, LegendPosition,
    PlotConfig, RecordingPlotter, SeriesReport, SvgPlotter,
};
use clap::{Args, Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

const DEFAULT_IMAGE_EXT: &str = if cfg!(feature = "bitmap") { "png" } else { "svg" };

/// Which benchmark to plot and how to shape its results.
#[derive(Args, Debug)]
struct Selection {
    /// Benchmark name, e.g. `BenchmarkMath`.
    #[arg(long, value_name = "NAME")]
    bench: String,

    /// Input plotted on the x axis.
    #[arg(short = 'x', value_name = "INPUT")]
    x: String,

    /// Output plotted on the y axis (runs|time|mem_allocs|mem_used|mem_by_time).
    #[arg(short = 'y', default_value = "time", value_name = "OUTPUT")]
    y: String,

    /// Inputs whose values split results into separate series.
    #[arg(long, value_name = "INPUT", value_delimiter = ',', action = clap::ArgAction::Append)]
    group_by: Vec<String>,

    /// Keep only results matching EXPR, e.g. `y==sin(x)` or `delta<0.01`.
    #[arg(long, value_name = "EXPR", action = clap::ArgAction::Append)]
    filter_by: Vec<String>,

    /// Plot kinds to draw (scatter|avg_line). Inferred from the data if omitted.
    #[arg(long, value_name = "KIND", value_delimiter = ',', action = clap::ArgAction::Append)]
    plots: Vec<String>,

    /// Benchmark output to read; `-` or omitted reads stdin.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,
}

impl Selection {
    fn config(&self) -> benchplot::Result<PlotConfig> {
        PlotConfig::new()
            .with_group_by(self.group_by.iter().cloned())
            .with_filters(&self.filter_by)?
            .with_plot_kinds(&self.plots)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one benchmark to an image file (svg, png or jpg).
    Plot {
        #[command(flatten)]
        selection: Selection,

        /// Output image; the extension picks the format. Defaults to
        /// `<bench>.png` with the `bitmap` feature, `<bench>.svg` otherwise.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = 500)]
        width: u32,

        #[arg(long, default_value_t = 500)]
        height: u32,

        #[arg(long, value_enum, default_value_t = LegendPosition::UpperRight)]
        legend: LegendPosition,
    },

    /// Compute the plotted series and print them as JSON.
    Series {
        #[command(flatten)]
        selection: Selection,

        /// Where to write the JSON report. If omitted, prints to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List parsed benchmarks with their inputs (JSON output).
    List {
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Where to write the JSON summary. If omitted, prints to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "benchplot")]
#[command(about = "Plot Go benchmark output by benchmark inputs")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn read_benchmarks(input: Option<&Path>) -> benchplot::Result<Vec<Benchmark>> {
    match input {
        None => parse_benchmarks(io::stdin().lock()),
        Some(path) if path == Path::new("-") => parse_benchmarks(io::stdin().lock()),
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| benchplot::Error::from(e).context(format!("error opening {}", path.display())))?;
            parse_benchmarks(BufReader::new(file))
        }
    }
}

fn write_json<T: serde::Serialize>(value: &T, out: Option<&Path>) -> benchplot::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    match out {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

fn run(cli: Cli) -> benchplot::Result<()> {
    match cli.cmd {
        Command::Plot {
            selection,
            output,
            width,
            height,
            legend,
        } => {
            let config = selection.config()?;
            let benchmarks = read_benchmarks(selection.input.as_deref())?;
            let benchmark = find_benchmark(&benchmarks, &selection.bench)?;

            let mut plotter = SvgPlotter::new(legend);
            plot_benchmark(benchmark, &mut plotter, &selection.x, &selection.y, &config)?;

            let output = output
                .unwrap_or_else(|| PathBuf::from(format!("{}.{DEFAULT_IMAGE_EXT}", selection.bench)));
            plotter.save(&output, width, height)?;
            info!(path = %output.display(), "wrote plot");
        }
        Command::Series { selection, output } => {
            let config = selection.config()?;
            let benchmarks = read_benchmarks(selection.input.as_deref())?;
            let benchmark = find_benchmark(&benchmarks, &selection.bench)?;

            let mut plotter = RecordingPlotter::default();
            plot_benchmark(benchmark, &mut plotter, &selection.x, &selection.y, &config)?;

            let report = SeriesReport {
                meta: Default::default(),
                benchmark: benchmark.name.clone(),
                group_by: config.group_by,
                filter_by: config.filter_by.iter().map(ToString::to_string).collect(),
                plots: plotter.calls,
            };
            write_json(&report, output.as_deref())?;
        }
        Command::List { input, output } => {
            let benchmarks = read_benchmarks(input.as_deref())?;
            let summaries: Vec<BenchmarkSummary> = benchmarks.iter().map(Into::into).collect();
            write_json(&summaries, output.as_deref())?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
