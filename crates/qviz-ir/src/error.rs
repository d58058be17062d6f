//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur when resolving or (de)serializing a circuit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// A reference names a register that was never declared.
    #[error("Register '{register}' is not declared")]
    UndeclaredRegister {
        /// The missing register name.
        register: String,
    },

    /// A reference indexes past the end of its register.
    #[error("Index {index} out of bounds for register '{register}' of width {width}")]
    IndexOutOfBounds {
        /// The register name.
        register: String,
        /// The requested local index.
        index: u32,
        /// The declared width.
        width: u32,
    },

    /// A reference lands on a wire past the last addressable flat index.
    #[error("Register '{register}' extends past the last addressable wire")]
    WireOverflow {
        /// The register name.
        register: String,
    },

    /// The circuit could not be converted to or from JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl IrError {
    /// Whether this error means a register reference could not be resolved
    /// to a wire.
    pub fn is_unresolved_register(&self) -> bool {
        matches!(
            self,
            IrError::UndeclaredRegister { .. }
                | IrError::IndexOutOfBounds { .. }
                | IrError::WireOverflow { .. }
        )
    }
}

impl From<serde_json::Error> for IrError {
    fn from(err: serde_json::Error) -> Self {
        IrError::Serialization(err.to_string())
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
