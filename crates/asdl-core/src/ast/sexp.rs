//! Bracketed S-expression form of an [`Ast`].
//!
//! ```text
//! (If (Expr-cond (Var (ident-name x))) (Stmt*-body (Pass) (Pass)))
//! ```
//!
//! Each field is written as `(type<suffix>-name value ...)`. Primitive
//! values are atoms with spaces escaped as [`SPACE_ESCAPE`].
//!
//! An empty primitive value has no atom form: it renders as nothing and is
//! absent after parsing. Trees holding empty tokens do not round-trip.

use std::fmt;

use logos::Logos;

use crate::grammar::{Grammar, Production};

use super::error::AstError;
use super::tree::{Ast, NodeId};

/// Stand-in for a space inside a primitive value.
pub const SPACE_ESCAPE: &str = "-SPACE-";

impl fmt::Display for Ast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(f, self.root())
    }
}

impl Ast {
    fn write_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId) -> fmt::Result {
        let node = self.node(id);
        write!(f, "({}", node.production().name())?;
        for field in node.fields() {
            write!(f, " ({}{}-{}", field.field().ty, field.cardinality().suffix(), field.name())?;
            for &child in field.nodes() {
                f.write_str(" ")?;
                self.write_node(f, child)?;
            }
            for token in field.tokens() {
                write!(f, " {}", token.replace(' ', SPACE_ESCAPE))?;
            }
            f.write_str(")")?;
        }
        f.write_str(")")
    }

    /// Parse the S-expression form produced by `Display` back into a tree.
    pub fn from_sexp(grammar: &Grammar, text: &str) -> Result<Self, AstError> {
        let sexp = SexpParser::new(text).parse_document()?;
        let (production, fields) = resolve_node(grammar, &sexp)?;
        let mut ast = Ast::new(production.clone());
        let root = ast.root();
        ast.fill_fields(grammar, root, &production, fields)?;
        Ok(ast)
    }

    fn fill_fields(
        &mut self,
        grammar: &Grammar,
        id: NodeId,
        production: &Production,
        fields: &[Sexp],
    ) -> Result<(), AstError> {
        for (index, (field, sexp)) in production.fields().iter().zip(fields).enumerate() {
            let (offset, items) = sexp.as_list()?;
            let expected = format!("{}{}-{}", field.ty, field.cardinality.suffix(), field.name);
            match items.split_first() {
                Some((Sexp::Atom { text, .. }, _)) if *text == expected => {}
                _ => {
                    return Err(AstError::Sexp {
                        offset,
                        message: format!("expected field `{expected}`"),
                    });
                }
            }

            for value in &items[1..] {
                if field.ty.is_composite() {
                    let (child_production, child_fields) = resolve_node(grammar, value)?;
                    let child = self.attach(id, index, child_production.clone())?;
                    self.fill_fields(grammar, child, &child_production, child_fields)?;
                } else {
                    let Sexp::Atom { text, .. } = value else {
                        return Err(AstError::Sexp {
                            offset: value.offset(),
                            message: format!("expected token for field `{expected}`"),
                        });
                    };
                    self.add_token(id, index, text.replace(SPACE_ESCAPE, " "))?;
                }
            }
            if field.cardinality.is_reducible() {
                self.close_field(id, index)?;
            }
        }
        Ok(())
    }
}

/// `(Ctor field...)` to its production and one expression per field.
fn resolve_node<'a>(
    grammar: &Grammar,
    sexp: &'a Sexp<'a>,
) -> Result<(Production, &'a [Sexp<'a>]), AstError> {
    let (offset, items) = sexp.as_list()?;
    let Some((Sexp::Atom { text, .. }, fields)) = items.split_first() else {
        return Err(AstError::Sexp {
            offset,
            message: "expected constructor name".to_owned(),
        });
    };
    let production = grammar
        .production_by_constructor(text)
        .ok_or_else(|| AstError::UnknownConstructor((*text).to_owned()))?;
    if fields.len() != production.fields().len() {
        return Err(AstError::Sexp {
            offset,
            message: format!(
                "constructor `{}` takes {} fields, found {}",
                production.name(),
                production.fields().len(),
                fields.len()
            ),
        });
    }
    Ok((production.clone(), fields))
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[regex(r"[^ \t\n\r()]+", |lex| lex.slice())]
    Atom(&'src str),
}

#[derive(Debug)]
enum Sexp<'s> {
    Atom { text: &'s str, offset: usize },
    List { items: Vec<Sexp<'s>>, offset: usize },
}

impl<'s> Sexp<'s> {
    fn offset(&self) -> usize {
        match self {
            Self::Atom { offset, .. } | Self::List { offset, .. } => *offset,
        }
    }

    fn as_list(&self) -> Result<(usize, &[Sexp<'s>]), AstError> {
        match self {
            Self::List { items, offset } => Ok((*offset, items)),
            Self::Atom { text, offset } => Err(AstError::Sexp {
                offset: *offset,
                message: format!("expected `(`, found `{text}`"),
            }),
        }
    }
}

struct SexpParser<'src> {
    tokens: Vec<(Token<'src>, usize)>,
    pos: usize,
    end: usize,
}

impl<'src> SexpParser<'src> {
    fn new(source: &'src str) -> Self {
        // Every character is either skipped, a paren, or part of an atom.
        let tokens = Token::lexer(source)
            .spanned()
            .filter_map(|(result, span)| Some((result.ok()?, span.start)))
            .collect();
        Self {
            tokens,
            pos: 0,
            end: source.len(),
        }
    }

    fn parse_document(mut self) -> Result<Sexp<'src>, AstError> {
        let sexp = self.parse_expr()?;
        if let Some(&(token, offset)) = self.tokens.get(self.pos) {
            return Err(AstError::Sexp {
                offset,
                message: format!("unexpected `{}` after end of tree", token.text()),
            });
        }
        Ok(sexp)
    }

    fn parse_expr(&mut self) -> Result<Sexp<'src>, AstError> {
        let Some(&(token, offset)) = self.tokens.get(self.pos) else {
            return Err(self.eof_error());
        };
        self.pos += 1;
        match token {
            Token::Atom(text) => Ok(Sexp::Atom { text, offset }),
            Token::ParenOpen => {
                let mut items = Vec::new();
                loop {
                    match self.tokens.get(self.pos) {
                        Some((Token::ParenClose, _)) => {
                            self.pos += 1;
                            return Ok(Sexp::List { items, offset });
                        }
                        Some(_) => items.push(self.parse_expr()?),
                        None => return Err(self.eof_error()),
                    }
                }
            }
            Token::ParenClose => Err(AstError::Sexp {
                offset,
                message: "unexpected `)`".to_owned(),
            }),
        }
    }

    fn eof_error(&self) -> AstError {
        AstError::Sexp {
            offset: self.end,
            message: "unexpected end of input".to_owned(),
        }
    }
}

impl Token<'_> {
    fn text(&self) -> &str {
        match self {
            Self::ParenOpen => "(",
            Self::ParenClose => ")",
            Self::Atom(text) => text,
        }
    }
}
