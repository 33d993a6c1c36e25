//! Errors raised by transition systems and hypotheses.

use asdl_core::AstError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// No transition system is registered under this name.
    #[error("unsupported language `{0}`")]
    UnsupportedLanguage(String),

    /// Productions were requested while the frontier field is primitive.
    #[error("frontier field `{0}` is primitive and has no continuing productions")]
    InvalidContinuationQuery(String),

    /// Copying was forced but the token is absent from the source.
    #[error("cannot copy primitive token `{0}` from source")]
    CopyTokenNotFound(String),

    /// An action sequence disagrees with the continuation oracle.
    #[error("action #{index} `{action}` is not a valid continuation: {reason}")]
    StructuralMismatch {
        index: usize,
        action: String,
        reason: String,
    },

    /// The action cannot be applied to the hypothesis in its current state.
    #[error("cannot apply `{action}`: {reason}")]
    InvalidAction { action: String, reason: String },

    /// A `single` field has no value to encode.
    #[error("field `{field}` of `{constructor}` has no value")]
    MissingValue { constructor: String, field: String },

    /// A primitive value is, or splits into, the reserved stop token.
    #[error("field `{field}` of `{constructor}` holds the reserved stop token")]
    ReservedToken { constructor: String, field: String },

    /// Surface code could not be converted to or from a tree.
    #[error("{language}: {message}")]
    SurfaceCode { language: String, message: String },

    #[error(transparent)]
    Ast(#[from] AstError),
}
