/// Errors raised while building or parsing an [`Ast`](super::Ast).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AstError {
    #[error("constructor `{constructor}` has no field #{index}")]
    FieldOutOfRange { constructor: String, index: usize },

    #[error("field `{field}` of `{constructor}` is primitive and cannot hold a node")]
    NotComposite { constructor: String, field: String },

    #[error("field `{field}` of `{constructor}` is composite and cannot hold a token")]
    NotPrimitive { constructor: String, field: String },

    #[error("field `{field}` expects type `{expected}`, got production `{production}`")]
    TypeMismatch {
        field: String,
        expected: String,
        production: String,
    },

    #[error("field `{field}` of `{constructor}` does not accept more values")]
    SlotFilled { constructor: String, field: String },

    #[error("unknown constructor `{0}`")]
    UnknownConstructor(String),

    #[error("S-expression error at offset {offset}: {message}")]
    Sexp { offset: usize, message: String },
}
