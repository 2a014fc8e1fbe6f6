// src/services/svg.rs
use crate::services::chart::{Color, Font, Point, Stroke, Surface};
use std::fmt::Write;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polyline { points: Vec<Point>, stroke: Stroke },
    Circle { center: Point, radius: f64, color: Color },
    Text { text: String, anchor: Point, font: Font },
}

/// In-memory surface that records commands and serialises them as SVG.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl SvgSurface {
    pub fn new(width: u32, height: u32) -> Self {
        SvgSurface {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn to_svg(&self) -> String {
        let mut out = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        );
        for command in &self.commands {
            // Writing into a String cannot fail.
            let _ = match command {
                DrawCommand::Polyline { points, stroke } => write!(
                    out,
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}" stroke-linejoin="round"/>"#,
                    points
                        .iter()
                        .map(|p| format!("{},{}", num(p.x), num(p.y)))
                        .collect::<Vec<_>>()
                        .join(" "),
                    stroke.color.to_hex(),
                    num(stroke.width)
                ),
                DrawCommand::Circle { center, radius, color } => write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
                    num(center.x),
                    num(center.y),
                    num(*radius),
                    color.to_hex()
                ),
                DrawCommand::Text { text, anchor, font } => write!(
                    out,
                    r#"<text x="{}" y="{}" text-anchor="middle" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
                    num(anchor.x),
                    num(anchor.y),
                    escape_markup(&font.family),
                    num(font.size_px),
                    font.color.to_hex(),
                    escape_markup(text)
                ),
            };
        }
        out.push_str("</svg>");
        out
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.commands.clear();
    }

    fn stroke_polyline(&mut self, points: &[Point], stroke: Stroke) {
        if points.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            stroke,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_text(&mut self, text: &str, anchor: Point, font: &Font) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            font: font.clone(),
        });
    }
}

/// Coordinates with at most two decimals, trailing zeros dropped.
fn num(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

pub fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
