//! Positioned drawing descriptors.

use serde::Serialize;

/// One drawing primitive produced by layout.
///
/// Primitives carry absolute surface coordinates and are executed in
/// order; later primitives draw over earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    /// Erase the whole surface.
    Clear { width: f64, height: f64 },
    /// Stroked straight line.
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Stroked, unfilled rectangle.
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    /// Full circle, either filled or stroked.
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        filled: bool,
    },
    /// Text with its baseline starting at `(x, y)`.
    Text { x: f64, y: f64, text: String },
}

impl Primitive {
    /// Whether this is a vertical line. Wires are horizontal, so every
    /// vertical line is a connector between rows.
    pub fn is_vertical_line(&self) -> bool {
        matches!(self, Primitive::Line { x1, x2, .. } if x1 == x2)
    }
}
