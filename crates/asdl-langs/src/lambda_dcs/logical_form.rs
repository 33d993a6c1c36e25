//! Bracketed logical form trees.

use std::fmt;

use asdl_transition::TransitionError;

use super::surface_error;

/// `name` or `( name child ... )`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogicalForm {
    Atom(String),
    List(String, Vec<LogicalForm>),
}

impl LogicalForm {
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Atom(name.into())
    }

    pub fn list(head: impl Into<String>, children: Vec<LogicalForm>) -> Self {
        Self::List(head.into(), children)
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Atom(name) | Self::List(name, _) => name,
        }
    }

    pub fn children(&self) -> &[LogicalForm] {
        match self {
            Self::Atom(_) => &[],
            Self::List(_, children) => children,
        }
    }

    /// Parse a whitespace-separated logical form. Parentheses need not be
    /// surrounded by spaces.
    pub fn parse(code: &str) -> Result<Self, TransitionError> {
        let spaced = code.replace('(', " ( ").replace(')', " ) ");
        let tokens: Vec<&str> = spaced.split_whitespace().collect();
        let mut pos = 0;
        let form = parse_form(&tokens, &mut pos)?;
        if let Some(extra) = tokens.get(pos) {
            return Err(surface_error(format!(
                "unexpected `{extra}` at token #{pos}"
            )));
        }
        Ok(form)
    }

    /// Same form with `and`/`or` arguments sorted, so argument order does
    /// not affect equality.
    pub fn canonical(&self) -> Self {
        match self {
            Self::Atom(_) => self.clone(),
            Self::List(head, children) => {
                let mut children: Vec<_> = children.iter().map(Self::canonical).collect();
                if head == "and" || head == "or" {
                    children.sort();
                }
                Self::List(head.clone(), children)
            }
        }
    }
}

fn parse_form(tokens: &[&str], pos: &mut usize) -> Result<LogicalForm, TransitionError> {
    let Some(&token) = tokens.get(*pos) else {
        return Err(surface_error("unexpected end of logical form"));
    };
    *pos += 1;
    match token {
        ")" => Err(surface_error(format!("unexpected `)` at token #{}", *pos - 1))),
        "(" => {
            let head = match tokens.get(*pos) {
                Some(&head) if head != "(" && head != ")" => head,
                Some(other) => {
                    return Err(surface_error(format!(
                        "expected a name after `(`, found `{other}`"
                    )));
                }
                None => return Err(surface_error("unexpected end of logical form")),
            };
            *pos += 1;
            let mut children = Vec::new();
            loop {
                match tokens.get(*pos) {
                    Some(&")") => {
                        *pos += 1;
                        return Ok(LogicalForm::list(head, children));
                    }
                    Some(_) => children.push(parse_form(tokens, pos)?),
                    None => return Err(surface_error(format!("unclosed `( {head}`"))),
                }
            }
        }
        name => Ok(LogicalForm::atom(name)),
    }
}

impl fmt::Display for LogicalForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(name) => f.write_str(name),
            Self::List(head, children) => {
                write!(f, "( {head}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                f.write_str(" )")
            }
        }
    }
}
