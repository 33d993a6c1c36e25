//! Logical forms to ASTs and back.

use asdl_core::{Ast, Grammar, NodeId, Production};
use asdl_transition::TransitionError;

use super::logical_form::LogicalForm;
use super::surface_error;

/// Quantifier-like heads binding a variable over a body: `( count $0 body )`.
const BINDERS: &[(&str, &str)] = &[
    ("count", "Count"),
    ("exists", "Exists"),
    ("max", "Max"),
    ("min", "Min"),
    ("the", "The"),
];

/// Heads binding a variable over a domain and a body: `( argmax $0 domain body )`.
const DOMAIN_BINDERS: &[(&str, &str)] = &[("argmax", "Argmax"), ("argmin", "Argmin"), ("sum", "Sum")];

const COMPARISONS: &[(&str, &str)] = &[(">", "GreaterThan"), ("=", "Equal"), ("<", "LessThan")];

fn ctor_for(table: &[(&'static str, &'static str)], head: &str) -> Option<&'static str> {
    table.iter().find(|(h, _)| *h == head).map(|&(_, ctor)| ctor)
}

fn head_for(table: &[(&'static str, &'static str)], ctor: &str) -> Option<&'static str> {
    table.iter().find(|(_, c)| *c == ctor).map(|&(head, _)| head)
}

pub(super) fn logical_form_to_ast(
    grammar: &Grammar,
    form: &LogicalForm,
) -> Result<Ast, TransitionError> {
    let mut ast = Ast::new(production_for(grammar, form)?);
    let root = ast.root();
    fill(grammar, &mut ast, root, form)?;
    Ok(ast)
}

fn production_for(grammar: &Grammar, form: &LogicalForm) -> Result<Production, TransitionError> {
    let ctor = match form {
        LogicalForm::Atom(name) if name.starts_with('$') => "Variable",
        LogicalForm::Atom(name) if is_number(name) => "Number",
        LogicalForm::Atom(_) => "Entity",
        LogicalForm::List(head, _) => match head.as_str() {
            "lambda" => "Lambda",
            "and" => "And",
            "or" => "Or",
            "not" => "Not",
            head => ctor_for(BINDERS, head)
                .or_else(|| ctor_for(DOMAIN_BINDERS, head))
                .or_else(|| ctor_for(COMPARISONS, head).map(|_| "Compare"))
                .unwrap_or("Apply"),
        },
    };
    constructor(grammar, ctor)
}

fn is_number(name: &str) -> bool {
    name.bytes().any(|b| b.is_ascii_digit()) && name.parse::<f64>().is_ok()
}

fn constructor(grammar: &Grammar, name: &str) -> Result<Production, TransitionError> {
    grammar
        .production_by_constructor(name)
        .cloned()
        .ok_or_else(|| surface_error(format!("grammar has no constructor `{name}`")))
}

fn field_index(ast: &Ast, node: NodeId, name: &str) -> Result<usize, TransitionError> {
    let production = ast.node(node).production();
    production.field_index(name).ok_or_else(|| {
        surface_error(format!("constructor `{}` has no field `{name}`", production.name()))
    })
}

fn arguments<const N: usize>(form: &LogicalForm) -> Result<&[LogicalForm; N], TransitionError> {
    form.children().try_into().map_err(|_| {
        surface_error(format!(
            "`{}` takes {N} arguments, found {}",
            form.name(),
            form.children().len()
        ))
    })
}

fn fill(
    grammar: &Grammar,
    ast: &mut Ast,
    node: NodeId,
    form: &LogicalForm,
) -> Result<(), TransitionError> {
    let ctor = ast.node(node).production().name().to_owned();
    match ctor.as_str() {
        "Variable" => set_token(ast, node, "variable", form)?,
        "Entity" => set_token(ast, node, "entity", form)?,
        "Number" => set_token(ast, node, "number", form)?,
        "Apply" => {
            let index = field_index(ast, node, "predicate")?;
            ast.add_token(node, index, form.name())?;
            for argument in form.children() {
                add_expr(grammar, ast, node, "arguments", argument)?;
            }
            close(ast, node, "arguments")?;
        }
        "And" | "Or" => {
            for argument in form.children() {
                add_expr(grammar, ast, node, "arguments", argument)?;
            }
            close(ast, node, "arguments")?;
        }
        "Not" => {
            let [argument] = arguments::<1>(form)?;
            add_expr(grammar, ast, node, "argument", argument)?;
        }
        "Lambda" => {
            let [variable, var_type, body] = arguments::<3>(form)?;
            set_token(ast, node, "variable", variable)?;
            set_token(ast, node, "type", var_type)?;
            add_expr(grammar, ast, node, "body", body)?;
        }
        "Compare" => {
            let [left, right] = arguments::<2>(form)?;
            let op = ctor_for(COMPARISONS, form.name())
                .ok_or_else(|| surface_error(format!("unknown comparison `{}`", form.name())))?;
            let index = field_index(ast, node, "op")?;
            ast.attach(node, index, constructor(grammar, op)?)?;
            add_expr(grammar, ast, node, "left", left)?;
            add_expr(grammar, ast, node, "right", right)?;
        }
        ctor if head_for(DOMAIN_BINDERS, ctor).is_some() => {
            let [variable, domain, body] = arguments::<3>(form)?;
            set_token(ast, node, "variable", variable)?;
            add_expr(grammar, ast, node, "domain", domain)?;
            add_expr(grammar, ast, node, "body", body)?;
        }
        ctor if head_for(BINDERS, ctor).is_some() => {
            let [variable, body] = arguments::<2>(form)?;
            set_token(ast, node, "variable", variable)?;
            add_expr(grammar, ast, node, "body", body)?;
        }
        other => return Err(surface_error(format!("unexpected constructor `{other}`"))),
    }
    Ok(())
}

/// A primitive field takes the atom's name.
fn set_token(
    ast: &mut Ast,
    node: NodeId,
    field: &str,
    form: &LogicalForm,
) -> Result<(), TransitionError> {
    let LogicalForm::Atom(name) = form else {
        return Err(surface_error(format!(
            "expected a name for `{field}`, found `{form}`"
        )));
    };
    let index = field_index(ast, node, field)?;
    ast.add_token(node, index, name.as_str())?;
    Ok(())
}

fn add_expr(
    grammar: &Grammar,
    ast: &mut Ast,
    node: NodeId,
    field: &str,
    form: &LogicalForm,
) -> Result<(), TransitionError> {
    let index = field_index(ast, node, field)?;
    let child = ast.attach(node, index, production_for(grammar, form)?)?;
    fill(grammar, ast, child, form)
}

fn close(ast: &mut Ast, node: NodeId, field: &str) -> Result<(), TransitionError> {
    let index = field_index(ast, node, field)?;
    ast.close_field(node, index)?;
    Ok(())
}

pub(super) fn ast_to_logical_form(ast: &Ast) -> Result<LogicalForm, TransitionError> {
    node_to_logical_form(ast, ast.root())
}

fn node_to_logical_form(ast: &Ast, node: NodeId) -> Result<LogicalForm, TransitionError> {
    let production = ast.node(node).production();
    let ctor = production.name();

    let form = match ctor {
        "Variable" => LogicalForm::atom(token(ast, node, "variable")?),
        "Entity" => LogicalForm::atom(token(ast, node, "entity")?),
        "Number" => LogicalForm::atom(token(ast, node, "number")?),
        "Apply" => LogicalForm::list(
            token(ast, node, "predicate")?,
            children(ast, node, "arguments")?,
        ),
        "And" | "Or" => LogicalForm::list(
            ctor.to_ascii_lowercase(),
            children(ast, node, "arguments")?,
        ),
        "Not" => LogicalForm::list("not", vec![child(ast, node, "argument")?]),
        "Lambda" => LogicalForm::list(
            "lambda",
            vec![
                LogicalForm::atom(token(ast, node, "variable")?),
                LogicalForm::atom(token(ast, node, "type")?),
                child(ast, node, "body")?,
            ],
        ),
        "Compare" => {
            let op = child_node(ast, node, "op")?;
            let op_name = ast.node(op).production().name();
            let symbol = head_for(COMPARISONS, op_name)
                .ok_or_else(|| surface_error(format!("unknown comparison `{op_name}`")))?;
            LogicalForm::list(
                symbol,
                vec![child(ast, node, "left")?, child(ast, node, "right")?],
            )
        }
        ctor => {
            if let Some(head) = head_for(DOMAIN_BINDERS, ctor) {
                LogicalForm::list(
                    head,
                    vec![
                        LogicalForm::atom(token(ast, node, "variable")?),
                        child(ast, node, "domain")?,
                        child(ast, node, "body")?,
                    ],
                )
            } else if let Some(head) = head_for(BINDERS, ctor) {
                LogicalForm::list(
                    head,
                    vec![
                        LogicalForm::atom(token(ast, node, "variable")?),
                        child(ast, node, "body")?,
                    ],
                )
            } else {
                return Err(surface_error(format!("unexpected constructor `{ctor}`")));
            }
        }
    };
    Ok(form)
}

fn token<'a>(ast: &'a Ast, node: NodeId, field: &str) -> Result<&'a str, TransitionError> {
    let index = field_index(ast, node, field)?;
    ast.node(node).fields()[index]
        .tokens()
        .first()
        .map(String::as_str)
        .ok_or_else(|| missing(ast, node, field))
}

fn child_node(ast: &Ast, node: NodeId, field: &str) -> Result<NodeId, TransitionError> {
    let index = field_index(ast, node, field)?;
    ast.node(node).fields()[index]
        .nodes()
        .first()
        .copied()
        .ok_or_else(|| missing(ast, node, field))
}

fn child(ast: &Ast, node: NodeId, field: &str) -> Result<LogicalForm, TransitionError> {
    node_to_logical_form(ast, child_node(ast, node, field)?)
}

fn children(ast: &Ast, node: NodeId, field: &str) -> Result<Vec<LogicalForm>, TransitionError> {
    let index = field_index(ast, node, field)?;
    ast.node(node).fields()[index]
        .nodes()
        .iter()
        .map(|&child| node_to_logical_form(ast, child))
        .collect()
}

fn missing(ast: &Ast, node: NodeId, field: &str) -> TransitionError {
    TransitionError::MissingValue {
        constructor: ast.node(node).production().name().to_owned(),
        field: field.to_owned(),
    }
}
