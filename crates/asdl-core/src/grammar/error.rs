/// Errors raised while reading or assembling a grammar.
#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("syntax error at line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("grammar has no productions")]
    Empty,

    #[error("duplicate constructor `{0}`")]
    DuplicateConstructor(String),

    #[error("primitive type `{0}` cannot have productions")]
    PrimitiveWithProductions(String),

    #[error("constructor `{constructor}` references type `{ty}`, which has no productions")]
    UndefinedType { ty: String, constructor: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary encoding error: {0}")]
    Binary(#[from] postcard::Error),
}
