//! Circuit Diagram Layout and Rendering for qviz
//!
//! Rendering happens in two phases:
//!
//! 1. [`compute_layout`] maps a [`Circuit`] onto an ordered list of
//!    positioned [`Primitive`]s. It is pure and deterministic: the same
//!    circuit, surface size and [`LayoutConfig`] always produce the same
//!    list.
//! 2. [`execute`] replays those primitives against any [`Surface`].
//!
//! [`render`] runs both against a surface, clearing it first. A circuit
//! with an unresolvable register reference fails in phase 1, so the
//! surface keeps whatever it showed before.
//!
//! # Diagram
//!
//! - One horizontal wire per qubit, then one double wire per classical bit,
//!   labelled `q<i>` / `c<j>` by global index.
//! - One column per operation, left to right in operation order.
//! - `cx` with two operands: filled control dot, `CX` box on the target,
//!   one vertical connector. Other gates: one labelled box per target wire.
//! - Measurements: a circle on the qubit wire connected down to the
//!   classical wire.
//!
//! # Example
//!
//! ```rust
//! use qviz_ir::Circuit;
//! use qviz_render::{LayoutConfig, RecordingSurface, SvgSurface, render};
//!
//! let circuit = Circuit::bell();
//! let config = LayoutConfig::default();
//! let (width, height) = config.preferred_size(&circuit);
//!
//! let mut svg = SvgSurface::new(width, height);
//! render(&mut svg, &circuit, &config).unwrap();
//! assert!(svg.finish().contains("CX"));
//!
//! let mut recording = RecordingSurface::new(width, height);
//! render(&mut recording, &circuit, &config).unwrap();
//! assert!(!recording.calls().is_empty());
//! ```

pub mod config;
pub mod error;
pub mod layout;
pub mod primitive;
pub mod surface;
pub mod svg;

pub use config::LayoutConfig;
pub use error::{RenderError, RenderResult};
pub use layout::{Layout, compute_layout};
pub use primitive::Primitive;
pub use surface::{DrawCall, RecordingSurface, Surface, execute};
pub use svg::SvgSurface;

use qviz_ir::Circuit;
use tracing::instrument;

/// Clear the surface and draw the circuit at the surface's size.
///
/// # Errors
///
/// Fails without touching the surface if layout fails; see
/// [`compute_layout`].
#[instrument(skip_all, fields(ops = circuit.num_ops()))]
pub fn render<S: Surface + ?Sized>(
    surface: &mut S,
    circuit: &Circuit,
    config: &LayoutConfig,
) -> RenderResult<()> {
    let layout = compute_layout(circuit, surface.width(), surface.height(), config)?;
    execute(&layout, surface);
    Ok(())
}
