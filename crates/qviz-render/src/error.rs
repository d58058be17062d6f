//! Error types for layout and rendering.

use qviz_ir::IrError;
use thiserror::Error;

/// Errors that can occur while laying out a circuit.
///
/// Layout fails before any primitive reaches a surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A reference names an undeclared register or an index past its width.
    #[error("Unresolved register: {0}")]
    UnresolvedRegister(#[from] IrError),

    /// Measurement whose source and target cover different wire counts.
    #[error("Measurement covers {sources} qubit(s) but {targets} classical bit(s)")]
    MeasureWidthMismatch { sources: u32, targets: u32 },

    /// Controlled gate whose operands are both wider than one wire but
    /// differ in width.
    #[error("Controlled gate pairs {controls} control(s) with {targets} target(s)")]
    ControlWidthMismatch { controls: u32, targets: u32 },

    /// The circuit has more wires than the layout allows.
    #[error("Circuit has {rows} wires, more than the limit of {limit}")]
    TooManyWires { rows: u64, limit: u32 },
}

/// Result type for layout and rendering.
pub type RenderResult<T> = Result<T, RenderError>;
