//! A [`Surface`] that builds a standalone SVG document.

use std::f64::consts::TAU;
use std::fmt::Write as _;

use crate::surface::Surface;

const STROKE: &str = "#000000";
const BACKGROUND: &str = "#ffffff";
const FONT: &str = "font-family=\"monospace\" font-size=\"12\"";

#[derive(Debug, Clone, Copy)]
enum Segment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Circle(f64, f64, f64),
}

/// SVG output surface.
///
/// Clearing the whole surface drops every element drawn so far, so a full
/// redraw never accumulates stale elements.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    elements: Vec<String>,
    path: Vec<Segment>,
}

impl SvgSurface {
    /// Create an empty surface.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            elements: Vec::new(),
            path: Vec::new(),
        }
    }

    /// The current document.
    pub fn document(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = self.width,
            h = self.height
        );
        for element in &self.elements {
            out.push_str("  ");
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Consume the surface and return the document.
    pub fn finish(self) -> String {
        self.document()
    }

    /// Number of elements drawn since the last full clear.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn emit_path(&mut self, fill: &str, stroke: &str) {
        let mut d = String::new();
        let mut circles = Vec::new();
        for segment in &self.path {
            match *segment {
                Segment::MoveTo(x, y) => {
                    let _ = write!(d, "M{x} {y} ");
                }
                Segment::LineTo(x, y) => {
                    let _ = write!(d, "L{x} {y} ");
                }
                Segment::Circle(cx, cy, r) => circles.push((cx, cy, r)),
            }
        }

        let d = d.trim_end();
        if !d.is_empty() {
            self.elements
                .push(format!("<path d=\"{d}\" fill=\"{fill}\" stroke=\"{stroke}\"/>"));
        }
        for (cx, cy, r) in circles {
            self.elements.push(format!(
                "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{fill}\" stroke=\"{stroke}\"/>"
            ));
        }
    }
}

impl Surface for SvgSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if x <= 0.0 && y <= 0.0 && width >= self.width && height >= self.height {
            self.elements.clear();
        }
        self.elements.push(format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{BACKGROUND}\"/>"
        ));
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push(Segment::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push(Segment::LineTo(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        // Partial arcs degrade to their chord.
        if (end - start).abs() >= TAU {
            self.path.push(Segment::Circle(x, y, radius));
        } else {
            self.path.push(Segment::MoveTo(
                x + radius * start.cos(),
                y + radius * start.sin(),
            ));
            self.path.push(Segment::LineTo(
                x + radius * end.cos(),
                y + radius * end.sin(),
            ));
        }
    }

    fn stroke(&mut self) {
        self.emit_path("none", STROKE);
    }

    fn fill(&mut self) {
        self.emit_path(STROKE, "none");
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.elements.push(format!(
            "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"none\" stroke=\"{STROKE}\"/>"
        ));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.elements.push(format!(
            "<text x=\"{x}\" y=\"{y}\" {FONT} fill=\"{STROKE}\">{}</text>",
            escape(text)
        ));
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let svg = SvgSurface::new(120.0, 80.0).finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"120\" height=\"80\""));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_line_becomes_path() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.begin_path();
        surface.move_to(10.0, 20.0);
        surface.line_to(90.0, 20.0);
        surface.stroke();

        assert!(surface
            .document()
            .contains("<path d=\"M10 20 L90 20\" fill=\"none\" stroke=\"#000000\"/>"));
    }

    #[test]
    fn test_filled_circle() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.begin_path();
        surface.arc(50.0, 40.0, 5.0, 0.0, TAU);
        surface.fill();

        assert!(surface
            .document()
            .contains("<circle cx=\"50\" cy=\"40\" r=\"5\" fill=\"#000000\" stroke=\"none\"/>"));
    }

    #[test]
    fn test_full_clear_resets_elements() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.stroke_rect(0.0, 0.0, 10.0, 10.0);
        surface.fill_text("x", 1.0, 1.0);
        assert_eq!(surface.element_count(), 2);

        surface.clear_rect(0.0, 0.0, 100.0, 100.0);
        assert_eq!(surface.element_count(), 1);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut surface = SvgSurface::new(100.0, 100.0);
        surface.fill_text("a<b&c", 0.0, 0.0);
        assert!(surface.document().contains(">a&lt;b&amp;c</text>"));
    }
}
