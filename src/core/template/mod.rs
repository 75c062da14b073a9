//! Pattern language for deciding which variables are indirections.
//!
//! Patterns use the `text/template` action syntax, so a pattern written for
//! other SSM env tools keeps working:
//!
//! ```text
//! {{ if hasPrefix .Value "ssm://" }}{{ trimPrefix .Value "ssm://" }}{{ end }}
//! ```
//!
//! A template sees two fields, `.Name` and `.Value`, and a small function
//! library (see [`functions`]). Its rendered output is the parameter name;
//! an empty output means the variable is left alone.
//!
//! Compilation validates syntax, field names and function names. Anything
//! that depends on the input values (argument counts of nested calls,
//! argument types) is checked during [`Template::render`].

mod functions;
mod lexer;
mod parser;

use functions::Value;
use parser::{Command, Field, Node, Operand, Pipeline};

use crate::error::TemplateError;

/// Variables visible to a template.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

/// A compiled template.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Compile template text.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Parse` with the byte offset of the problem.
    pub fn compile(text: &str) -> Result<Self, TemplateError> {
        let items = lexer::lex(text)?;
        let nodes = parser::parse(items)?;
        Ok(Self { nodes })
    }

    /// Render the template against one variable.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Eval` naming the variable being evaluated.
    pub fn render(&self, ctx: Context<'_>) -> Result<String, TemplateError> {
        let mut out = String::new();
        render_nodes(&self.nodes, ctx, &mut out).map_err(|message| TemplateError::Eval {
            variable: ctx.name.to_string(),
            message,
        })?;
        Ok(out)
    }
}

fn render_nodes(nodes: &[Node], ctx: Context<'_>, out: &mut String) -> Result<(), String> {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Output(pipeline) => out.push_str(&eval_pipeline(pipeline, ctx)?.to_string()),
            Node::If {
                branches,
                otherwise,
            } => {
                let mut taken = None;
                for (condition, body) in branches {
                    if eval_pipeline(condition, ctx)?.truthy() {
                        taken = Some(body);
                        break;
                    }
                }
                render_nodes(taken.unwrap_or(otherwise), ctx, out)?;
            }
        }
    }
    Ok(())
}

fn eval_pipeline(pipeline: &Pipeline, ctx: Context<'_>) -> Result<Value, String> {
    let mut piped = None;
    for command in &pipeline.commands {
        piped = Some(eval_command(command, ctx, piped)?);
    }
    // The parser never builds an empty pipeline.
    piped.ok_or_else(|| "empty pipeline".to_string())
}

fn eval_command(
    command: &Command,
    ctx: Context<'_>,
    piped: Option<Value>,
) -> Result<Value, String> {
    match command.operands.split_first() {
        Some((Operand::Func(name), rest)) if matches!(*name, "and" | "or") => {
            short_circuit(name, rest, ctx, piped)
        }
        Some((Operand::Func(name), rest)) => {
            let mut args = rest
                .iter()
                .map(|operand| eval_operand(operand, ctx))
                .collect::<Result<Vec<_>, _>>()?;
            args.extend(piped);
            functions::call(name, args)
        }
        Some((operand, [])) => eval_operand(operand, ctx),
        _ => Err("can't give argument to non-function".to_string()),
    }
}

/// `and` returns its first falsy argument, `or` its first truthy one, and
/// both fall back to the last. Arguments after the deciding one are never
/// evaluated. A piped value is the final argument.
fn short_circuit(
    name: &str,
    operands: &[Operand],
    ctx: Context<'_>,
    piped: Option<Value>,
) -> Result<Value, String> {
    let stop_on = name == "or";
    let mut last = None;
    for operand in operands {
        let value = eval_operand(operand, ctx)?;
        if value.truthy() == stop_on {
            return Ok(value);
        }
        last = Some(value);
    }
    piped
        .or(last)
        .ok_or_else(|| format!("wrong number of args for {}: want at least 1 got 0", name))
}

fn eval_operand(operand: &Operand, ctx: Context<'_>) -> Result<Value, String> {
    Ok(match operand {
        Operand::Field(Field::Name) => Value::Str(ctx.name.to_string()),
        Operand::Field(Field::Value) => Value::Str(ctx.value.to_string()),
        Operand::Str(s) => Value::Str(s.clone()),
        Operand::Int(n) => Value::Int(*n),
        Operand::Bool(b) => Value::Bool(*b),
        // A bare function name in argument position is called with no arguments.
        Operand::Func(name) => functions::call(name, Vec::new())?,
        Operand::Sub(pipeline) => eval_pipeline(pipeline, ctx)?,
    })
}
