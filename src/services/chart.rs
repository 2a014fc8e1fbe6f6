// src/services/chart.rs
//
// Line chart renderer: maps a labelled series onto pixel space and draws it
// onto any `Surface`.
use log::debug;
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PADDING: f64 = 40.0;

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("series must contain at least one value")]
    EmptySeries,
    #[error("series has {values} values but {labels} labels")]
    LengthMismatch { values: usize, labels: usize },
    #[error("series value at index {index} is not finite")]
    NonFiniteValue { index: usize },
}

/// Ordered values with one label per position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    values: Vec<f64>,
    labels: Vec<String>,
}

impl Series {
    pub fn new<S: Into<String>>(values: Vec<f64>, labels: Vec<S>) -> Result<Self, ChartError> {
        if values.is_empty() {
            return Err(ChartError::EmptySeries);
        }
        if values.len() != labels.len() {
            return Err(ChartError::LengthMismatch {
                values: values.len(),
                labels: labels.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ChartError::NonFiniteValue { index });
        }
        Ok(Series {
            values,
            labels: labels.into_iter().map(Into::into).collect(),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest value. Non-empty by construction.
    pub fn bounds(&self) -> (f64, f64) {
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color { red, green, blue }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
    pub color: Color,
}

/// Something a chart can be drawn onto.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self);
    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke);
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);
    /// Draws `text` horizontally centred on `anchor.x` with its baseline at `anchor.y`.
    fn fill_text(&mut self, text: &str, anchor: Point, font: &Font);
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub padding: f64,
    pub axis: Stroke,
    pub line: Stroke,
    pub marker_radius: f64,
    pub marker_color: Color,
    pub label_font: Font,
    /// Distance from the bottom axis down to the label baseline.
    pub label_offset: f64,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let accent = Color::rgb(0x66, 0x7e, 0xea);
        ChartStyle {
            padding: DEFAULT_PADDING,
            axis: Stroke {
                color: Color::rgb(0xe1, 0xe5, 0xe9),
                width: 1.0,
            },
            line: Stroke {
                color: accent,
                width: 3.0,
            },
            marker_radius: 4.0,
            marker_color: accent,
            label_font: Font {
                family: "Inter".to_string(),
                size_px: 12.0,
                color: Color::rgb(0x66, 0x66, 0x66),
            },
            label_offset: 20.0,
        }
    }
}

/// Maps every value of `series` to pixel coordinates.
///
/// A single point sits on the left padding edge. A flat series, where every
/// value is equal, is drawn along the vertical centre of the surface.
pub fn project(series: &Series, width: f64, height: f64, padding: f64) -> Vec<Point> {
    let n = series.len();
    let chart_width = width - 2.0 * padding;
    let chart_height = height - 2.0 * padding;
    let (min, max) = series.bounds();
    let range = max - min;

    series
        .values()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = if n > 1 {
                padding + (i as f64 / (n - 1) as f64) * chart_width
            } else {
                padding
            };
            let y = if range > 0.0 {
                (height - padding) - ((v - min) / range) * chart_height
            } else {
                height / 2.0
            };
            Point::new(x, y)
        })
        .collect()
}

/// Draws `series` as a line chart. A missing surface, or one with no room
/// inside the padding, is skipped.
pub fn draw_line_chart(surface: Option<&mut dyn Surface>, series: &Series, style: &ChartStyle) {
    let Some(surface) = surface else {
        debug!("No drawing surface available, skipping chart render");
        return;
    };
    let (width, height) = (surface.width() as f64, surface.height() as f64);
    let padding = style.padding;
    if width <= 2.0 * padding || height <= 2.0 * padding {
        debug!(
            "Drawing surface is {}x{}, too small for padding {}, skipping chart render",
            width, height, padding
        );
        return;
    }

    surface.clear();

    let axis = [
        Point::new(padding, padding),
        Point::new(padding, height - padding),
        Point::new(width - padding, height - padding),
    ];
    surface.stroke_polyline(&axis, style.axis);

    let points = project(series, width, height, padding);
    surface.stroke_polyline(&points, style.line);

    for point in &points {
        surface.fill_circle(*point, style.marker_radius, style.marker_color);
    }

    let label_y = height - padding + style.label_offset;
    for (label, point) in series.labels().iter().zip(&points) {
        surface.fill_text(label, Point::new(point.x, label_y), &style.label_font);
    }

    debug!("Rendered line chart with {} points on {}x{}", points.len(), width, height);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::svg::{DrawCommand, SvgSurface};
    use approx::assert_relative_eq;

    fn trend() -> Series {
        Series::new(
            vec![100.0, 102.0, 105.0, 104.0, 107.0, 108.5],
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun"],
        )
        .unwrap()
    }

    #[test]
    fn series_validation() {
        assert_eq!(
            Series::new(Vec::new(), Vec::<String>::new()),
            Err(ChartError::EmptySeries)
        );
        assert_eq!(
            Series::new(vec![1.0, 2.0], vec!["a"]),
            Err(ChartError::LengthMismatch { values: 2, labels: 1 })
        );
        assert_eq!(
            Series::new(vec![1.0, f64::NAN], vec!["a", "b"]),
            Err(ChartError::NonFiniteValue { index: 1 })
        );
        assert_eq!(trend().bounds(), (100.0, 108.5));
    }

    #[test]
    fn endpoints_span_the_padded_width() {
        let points = project(&trend(), 400.0, 200.0, 40.0);
        assert_eq!(points.len(), 6);
        assert_relative_eq!(points[0].x, 40.0);
        assert_relative_eq!(points[5].x, 360.0);
        assert_relative_eq!(points[1].x, 40.0 + 320.0 / 5.0);
        // min on the bottom axis, max on the top edge
        assert_relative_eq!(points[0].y, 160.0);
        assert_relative_eq!(points[5].y, 40.0);
        assert_relative_eq!(points[3].y, 160.0 - (4.0 / 8.5) * 120.0);
    }

    #[test]
    fn single_point_sits_on_left_padding() {
        let series = Series::new(vec![42.0], vec!["only"]).unwrap();
        let points = project(&series, 400.0, 200.0, 40.0);
        assert_eq!(points, vec![Point::new(40.0, 100.0)]);
    }

    #[test]
    fn flat_series_is_vertically_centred() {
        let series = Series::new(vec![7.0, 7.0, 7.0], vec!["a", "b", "c"]).unwrap();
        let points = project(&series, 300.0, 150.0, 40.0);
        assert!(points.iter().all(|p| p.y == 75.0));
        assert_relative_eq!(points[2].x, 260.0);
    }

    #[test]
    fn draws_axis_line_markers_and_labels_in_order() {
        let mut surface = SvgSurface::new(400, 200);
        draw_line_chart(Some(&mut surface), &trend(), &ChartStyle::default());

        let commands = surface.commands();
        assert_eq!(commands.len(), 2 + 6 + 6);
        match &commands[0] {
            DrawCommand::Polyline { points, stroke } => {
                assert_eq!(
                    points,
                    &vec![
                        Point::new(40.0, 40.0),
                        Point::new(40.0, 160.0),
                        Point::new(360.0, 160.0)
                    ]
                );
                assert_eq!(stroke.color.to_hex(), "#e1e5e9");
            }
            other => panic!("expected axis polyline, got {:?}", other),
        }
        assert!(matches!(&commands[1], DrawCommand::Polyline { points, .. } if points.len() == 6));
        assert!(matches!(&commands[2], DrawCommand::Circle { radius, .. } if *radius == 4.0));
        match &commands[13] {
            DrawCommand::Text { text, anchor, .. } => {
                assert_eq!(text, "Jun");
                assert_eq!(*anchor, Point::new(360.0, 180.0));
            }
            other => panic!("expected label, got {:?}", other),
        }
    }

    #[test]
    fn rendering_is_idempotent() {
        let style = ChartStyle::default();
        let mut first = SvgSurface::new(400, 200);
        let mut second = SvgSurface::new(400, 200);
        draw_line_chart(Some(&mut first), &trend(), &style);
        draw_line_chart(Some(&mut second), &trend(), &style);
        assert_eq!(first.to_svg(), second.to_svg());

        // Drawing again on a used surface clears it first.
        draw_line_chart(Some(&mut first), &trend(), &style);
        assert_eq!(first.to_svg(), second.to_svg());
    }

    #[test]
    fn missing_surface_is_a_no_op() {
        draw_line_chart(None, &trend(), &ChartStyle::default());

        let mut empty = SvgSurface::new(0, 200);
        draw_line_chart(Some(&mut empty), &trend(), &ChartStyle::default());
        assert!(empty.commands().is_empty());
    }

    #[test]
    fn surface_without_room_inside_padding_is_skipped() {
        let style = ChartStyle::default();
        for (w, h) in [(20, 20), (80, 200), (400, 80)] {
            let mut surface = SvgSurface::new(w, h);
            draw_line_chart(Some(&mut surface), &trend(), &style);
            assert!(surface.commands().is_empty(), "{}x{} should be skipped", w, h);
        }

        let mut narrow = SvgSurface::new(81, 200);
        draw_line_chart(Some(&mut narrow), &trend(), &style);
        let points = project(&trend(), 81.0, 200.0, style.padding);
        assert!(points.iter().all(|p| (40.0..=41.0).contains(&p.x)));
        assert!(points.iter().all(|p| (40.0..=160.0).contains(&p.y)));
        assert!(!narrow.commands().is_empty());
    }
}
