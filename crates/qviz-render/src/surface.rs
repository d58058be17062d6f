//! The drawing capability consumed by the renderer, and the effectful
//! execution phase.

use std::f64::consts::TAU;

use crate::layout::Layout;
use crate::primitive::Primitive;

/// Minimal 2D drawing surface, modeled on a canvas rendering context.
///
/// The renderer depends on nothing beyond these calls. Implementations
/// decide how (or whether) anything becomes pixels.
pub trait Surface {
    /// Surface width.
    fn width(&self) -> f64;

    /// Surface height.
    fn height(&self) -> f64;

    /// Erase a rectangle.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Start a new path, discarding the current one.
    fn begin_path(&mut self);

    /// Move the pen without drawing.
    fn move_to(&mut self, x: f64, y: f64);

    /// Add a straight segment to the current path.
    fn line_to(&mut self, x: f64, y: f64);

    /// Add a circular arc to the current path, from `start` to `end`
    /// radians.
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);

    /// Stroke the current path.
    fn stroke(&mut self);

    /// Fill the current path.
    fn fill(&mut self);

    /// Stroke an axis-aligned rectangle.
    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Draw text with its baseline starting at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
}

/// Run a layout against a surface, in order.
pub fn execute<S: Surface + ?Sized>(layout: &Layout, surface: &mut S) {
    for primitive in &layout.primitives {
        draw(primitive, surface);
    }
}

fn draw<S: Surface + ?Sized>(primitive: &Primitive, surface: &mut S) {
    match primitive {
        Primitive::Clear { width, height } => surface.clear_rect(0.0, 0.0, *width, *height),
        Primitive::Line { x1, y1, x2, y2 } => {
            surface.begin_path();
            surface.move_to(*x1, *y1);
            surface.line_to(*x2, *y2);
            surface.stroke();
        }
        Primitive::Rect {
            x,
            y,
            width,
            height,
        } => surface.stroke_rect(*x, *y, *width, *height),
        Primitive::Circle {
            cx,
            cy,
            radius,
            filled,
        } => {
            surface.begin_path();
            surface.arc(*cx, *cy, *radius, 0.0, TAU);
            if *filled {
                surface.fill();
            } else {
                surface.stroke();
            }
        }
        Primitive::Text { x, y, text } => surface.fill_text(text, *x, *y),
    }
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Arc {
        x: f64,
        y: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Stroke,
    Fill,
    StrokeRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
}

/// A surface that records every call, for tests and replay.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the surface empty.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    /// Replay the recorded calls onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, target: &mut S) {
        for call in &self.calls {
            match call {
                DrawCall::ClearRect {
                    x,
                    y,
                    width,
                    height,
                } => target.clear_rect(*x, *y, *width, *height),
                DrawCall::BeginPath => target.begin_path(),
                DrawCall::MoveTo { x, y } => target.move_to(*x, *y),
                DrawCall::LineTo { x, y } => target.line_to(*x, *y),
                DrawCall::Arc {
                    x,
                    y,
                    radius,
                    start,
                    end,
                } => target.arc(*x, *y, *radius, *start, *end),
                DrawCall::Stroke => target.stroke(),
                DrawCall::Fill => target.fill(),
                DrawCall::StrokeRect {
                    x,
                    y,
                    width,
                    height,
                } => target.stroke_rect(*x, *y, *width, *height),
                DrawCall::FillText { text, x, y } => target.fill_text(text, *x, *y),
            }
        }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::LineTo { x, y });
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.calls.push(DrawCall::Arc {
            x,
            y,
            radius,
            start,
            end,
        });
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::StrokeRect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::FillText {
            text: text.to_string(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(primitives: Vec<Primitive>) -> Layout {
        Layout {
            width: 100.0,
            height: 100.0,
            primitives,
            columns: Vec::new(),
        }
    }

    #[test]
    fn test_line_is_a_stroked_path() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        execute(
            &layout(vec![Primitive::Line {
                x1: 1.0,
                y1: 2.0,
                x2: 3.0,
                y2: 4.0,
            }]),
            &mut surface,
        );

        assert_eq!(
            surface.calls(),
            &[
                DrawCall::BeginPath,
                DrawCall::MoveTo { x: 1.0, y: 2.0 },
                DrawCall::LineTo { x: 3.0, y: 4.0 },
                DrawCall::Stroke,
            ]
        );
    }

    #[test]
    fn test_circles_fill_or_stroke() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        execute(
            &layout(vec![
                Primitive::Circle {
                    cx: 5.0,
                    cy: 5.0,
                    radius: 2.0,
                    filled: true,
                },
                Primitive::Circle {
                    cx: 5.0,
                    cy: 5.0,
                    radius: 2.0,
                    filled: false,
                },
            ]),
            &mut surface,
        );

        let calls = surface.calls();
        assert_eq!(calls.len(), 6);
        assert_eq!(calls[2], DrawCall::Fill);
        assert_eq!(calls[5], DrawCall::Stroke);
        assert!(matches!(calls[1], DrawCall::Arc { start, end, .. } if start == 0.0 && end == TAU));
    }

    #[test]
    fn test_clear_rect_and_text() {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        execute(
            &layout(vec![
                Primitive::Clear {
                    width: 100.0,
                    height: 50.0,
                },
                Primitive::Text {
                    x: 1.0,
                    y: 2.0,
                    text: "q0".into(),
                },
            ]),
            &mut surface,
        );

        assert_eq!(
            surface.take_calls(),
            vec![
                DrawCall::ClearRect {
                    x: 0.0,
                    y: 0.0,
                    width: 100.0,
                    height: 50.0
                },
                DrawCall::FillText {
                    text: "q0".into(),
                    x: 1.0,
                    y: 2.0
                },
            ]
        );
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_replay_reproduces_calls() {
        let mut first = RecordingSurface::new(100.0, 100.0);
        execute(
            &layout(vec![Primitive::Rect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            }]),
            &mut first,
        );

        let mut second = RecordingSurface::new(100.0, 100.0);
        first.replay(&mut second);
        assert_eq!(first, second);
    }
}
