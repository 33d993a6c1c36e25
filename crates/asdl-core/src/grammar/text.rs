//! Parser for the ASDL text format.
//!
//! ```text
//! # primitive types come first, comma separated
//! var, ent, num
//!
//! expr = Variable(var variable)
//!      | Apply(pred predicate, expr* arguments)
//! cmp_op = GreaterThan | Equal | LessThan
//! ```
//!
//! The grammar is newline-insensitive: a rule ends where the next
//! `Type =` begins. The first defined type is the root type.

use indexmap::IndexSet;

use super::error::GrammarError;
use super::lexer::{Token, TokenKind, lex, token_text};
use super::table::Grammar;
use super::types::{AsdlType, Cardinality, Constructor, Field, Production};

impl Grammar {
    /// Parse a grammar from ASDL text.
    pub fn from_text(text: &str) -> Result<Self, GrammarError> {
        let productions = Parser::new(text).parse()?;
        Grammar::new(productions)
    }
}

struct Parser<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    primitives: IndexSet<String>,
}

impl<'s> Parser<'s> {
    fn new(source: &'s str) -> Self {
        let tokens = lex(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            source,
            tokens,
            pos: 0,
            primitives: IndexSet::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<Production>, GrammarError> {
        self.parse_primitive_header()?;

        let mut productions = Vec::new();
        while !self.at_end() {
            self.parse_rule(&mut productions)?;
        }
        Ok(productions)
    }

    /// `ident (, ident)*` before the first rule. Absent when the text starts with `Type =`.
    fn parse_primitive_header(&mut self) -> Result<(), GrammarError> {
        if self.peek_kind() != Some(TokenKind::Id) || self.peek_nth_kind(1) == Some(TokenKind::Equals)
        {
            return Ok(());
        }

        loop {
            let name = self.expect_id("primitive type name")?;
            self.primitives.insert(name.to_owned());
            if !self.eat(TokenKind::Comma) {
                return Ok(());
            }
        }
    }

    fn parse_rule(&mut self, out: &mut Vec<Production>) -> Result<(), GrammarError> {
        let type_name = self.expect_id("type name")?;
        if !self.eat(TokenKind::Equals) {
            return Err(self.error(format!("expected `=` after type name `{type_name}`")));
        }

        let ty = self.resolve_type(type_name);
        // A leading `|` before the first constructor is tolerated.
        self.eat(TokenKind::Pipe);
        loop {
            let constructor = self.parse_constructor()?;
            out.push(Production::new(ty.clone(), constructor));
            if !self.eat(TokenKind::Pipe) {
                return Ok(());
            }
        }
    }

    fn parse_constructor(&mut self) -> Result<Constructor, GrammarError> {
        let name = self.expect_id("constructor name")?.to_owned();
        let mut fields = Vec::new();

        if self.eat(TokenKind::ParenOpen) {
            if !self.eat(TokenKind::ParenClose) {
                loop {
                    fields.push(self.parse_field()?);
                    if self.eat(TokenKind::ParenClose) {
                        break;
                    }
                    if !self.eat(TokenKind::Comma) {
                        return Err(
                            self.error(format!("expected `,` or `)` in constructor `{name}`"))
                        );
                    }
                }
            }
        }

        Ok(Constructor::new(name, fields))
    }

    fn parse_field(&mut self) -> Result<Field, GrammarError> {
        let type_name = self.expect_id("field type")?;
        let cardinality = if self.eat(TokenKind::Star) {
            Cardinality::Multiple
        } else if self.eat(TokenKind::Question) {
            Cardinality::Optional
        } else {
            Cardinality::Single
        };
        let ty = self.resolve_type(type_name);
        let name = self.expect_id(&format!("field name after `{type_name}`"))?;
        Ok(Field::new(name, ty, cardinality))
    }

    fn resolve_type(&self, name: &str) -> AsdlType {
        if self.primitives.contains(name) {
            AsdlType::Primitive(name.to_owned())
        } else {
            AsdlType::Composite(name.to_owned())
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    fn peek_nth_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.peek_kind() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_id(&mut self, what: &str) -> Result<&'s str, GrammarError> {
        match self.peek() {
            Some(token) if token.kind == TokenKind::Id => {
                let text = token_text(self.source, token);
                self.pos += 1;
                Ok(text)
            }
            _ => Err(self.error(format!("expected {what}"))),
        }
    }

    /// Error at the current token, quoting it when there is one.
    fn error(&self, message: String) -> GrammarError {
        let (offset, found) = match self.peek() {
            Some(token) => (
                token.span.start,
                format!(", found `{}`", token_text(self.source, token)),
            ),
            None => (self.source.len(), ", found end of input".to_owned()),
        };
        GrammarError::Syntax {
            line: line_of(self.source, offset),
            message: format!("{message}{found}"),
        }
    }
}

fn line_of(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}
