//! Image rendering of plotted series with `plotters`.
//!
//! [`SvgPlotter`] collects every scatter and line call into layers and draws
//! them onto one figure when [`SvgPlotter::save`] is called. SVG is always
//! available; PNG and JPEG need the `bitmap` feature.

use std::fmt::{self, Display};
use std::ops::Range;
use std::path::Path;

use clap::ValueEnum;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::plot::Plotter;
use crate::series::{PlotKind, SeriesMap};

const TITLE_FONT_SIZE: u32 = 20;
const POINT_SIZE: u32 = 3;
const LINE_WIDTH: u32 = 2;

/// Where the legend is drawn.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum LegendPosition {
    #[default]
    UpperRight,
    UpperLeft,
    LowerRight,
    LowerLeft,
}

impl From<LegendPosition> for SeriesLabelPosition {
    fn from(p: LegendPosition) -> Self {
        match p {
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
            LegendPosition::LowerLeft => SeriesLabelPosition::LowerLeft,
        }
    }
}

/// Image formats [`SvgPlotter::save`] can write, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
    Jpeg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("svg") => Ok(ImageFormat::Svg),
            Some("png") => Ok(ImageFormat::Png),
            Some("jpg" | "jpeg") => Ok(ImageFormat::Jpeg),
            _ => Err(Error::Render(format!(
                "unsupported image format for '{}' (svg|png|jpg)",
                path.display()
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
struct Layer {
    kind: PlotKind,
    data: SeriesMap,
    include_legend: bool,
}

/// A [`Plotter`] that renders all layers into one image file.
#[derive(Clone, Debug, Default)]
pub struct SvgPlotter {
    pub legend: LegendPosition,
    title: String,
    x_label: String,
    y_label: String,
    layers: Vec<Layer>,
}

fn render_err<E: Display>(e: E) -> Error {
    Error::Render(e.to_string())
}

/// Axis range covering `values`, widened when empty or degenerate.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return 0.0..1.0;
    }
    let pad = if hi > lo {
        (hi - lo) / 20.0
    } else {
        lo.abs().max(1.0) * 0.5
    };
    (lo - pad)..(hi + pad)
}

impl SvgPlotter {
    pub fn new(legend: LegendPosition) -> Self {
        Self {
            legend,
            ..Default::default()
        }
    }

    fn add_layer(
        &mut self,
        kind: PlotKind,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) {
        self.title = title.to_string();
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self.layers.push(Layer {
            kind,
            data: data.clone(),
            include_legend,
        });
    }

    /// Group names across all layers, in key order; fixes each group's color.
    fn group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .layers
            .iter()
            .flat_map(|l| l.data.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Render every layer into an image at `path`; the format follows the
    /// file extension.
    pub fn save(&self, path: &Path, width: u32, height: u32) -> Result<()> {
        let format = ImageFormat::from_path(path)?;
        match format {
            ImageFormat::Svg => self.draw(SVGBackend::new(path, (width, height)).into_drawing_area())?,
            #[cfg(feature = "bitmap")]
            ImageFormat::Png | ImageFormat::Jpeg => {
                self.draw(BitMapBackend::new(path, (width, height)).into_drawing_area())?
            }
            #[cfg(not(feature = "bitmap"))]
            ImageFormat::Png | ImageFormat::Jpeg => {
                return Err(Error::Render(format!(
                    "{format} output requires the `bitmap` feature"
                )));
            }
        }
        debug!(path = %path.display(), %format, layers = self.layers.len(), "saved figure");
        Ok(())
    }

    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()>
    where
        DB::ErrorType: 'static,
    {
        let points = || self.layers.iter().flat_map(|l| l.data.values()).flat_map(|s| s.points());
        let x_range = axis_range(points().map(|p| p.0));
        let y_range = axis_range(points().map(|p| p.1));

        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(&self.title, ("sans-serif", TITLE_FONT_SIZE))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;
        chart
            .configure_mesh()
            .x_desc(self.x_label.as_str())
            .y_desc(self.y_label.as_str())
            .draw()
            .map_err(render_err)?;

        let groups = self.group_names();
        let mut has_legend = false;
        for layer in &self.layers {
            for (group, series) in &layer.data {
                let idx = groups.iter().position(|g| *g == group.as_str()).unwrap_or(0);
                let color = Palette99::pick(idx).mix(1.0);
                let label = if group.is_empty() {
                    self.y_label.clone()
                } else {
                    group.clone()
                };

                match layer.kind {
                    PlotKind::Scatter => {
                        let anno = chart
                            .draw_series(
                                series
                                    .points()
                                    .map(|p| Circle::new(p, POINT_SIZE, color.filled())),
                            )
                            .map_err(render_err)?;
                        if layer.include_legend {
                            anno.label(label).legend(move |(x, y)| {
                                Circle::new((x + 10, y), POINT_SIZE, color.filled())
                            });
                        }
                    }
                    PlotKind::AvgLine => {
                        let anno = chart
                            .draw_series(LineSeries::new(
                                series.points(),
                                color.stroke_width(LINE_WIDTH),
                            ))
                            .map_err(render_err)?;
                        if layer.include_legend {
                            anno.label(label).legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                            });
                        }
                    }
                }
                has_legend |= layer.include_legend;
            }
        }

        if has_legend {
            chart
                .configure_series_labels()
                .position(self.legend.into())
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
        Ok(())
    }
}

impl Plotter for SvgPlotter {
    fn plot_scatter(
        &mut self,
        data: &SeriesMap,
        title: &str,
        x_label: &str,
        y_label: &str,
        include_legend: bool,
    ) -> Result<()> {
        self.add_layer(PlotKind::Scatter, data, title, x_label, y_label, include_legend);
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
        self.add_layer(PlotKind::AvgLine, data, title, x_label, y_label, include_legend);
        Ok(())
    }
}
