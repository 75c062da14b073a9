//! Builds the template tree from lexed items.

use super::functions;
use super::lexer::{Item, Spanned, Token};
use crate::error::TemplateError;

/// Fields exposed to a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Field {
    Name,
    Value,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Operand {
    Field(Field),
    Str(String),
    Int(i64),
    Bool(bool),
    Func(&'static str),
    Sub(Pipeline),
}

/// One pipeline stage: an operand, or a function followed by its arguments.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Command {
    pub operands: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Pipeline {
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    Text(String),
    Output(Pipeline),
    If {
        branches: Vec<(Pipeline, Vec<Node>)>,
        otherwise: Vec<Node>,
    },
}

/// How a node list ended.
enum Terminator {
    Eof,
    End,
    Else(Option<Pipeline>),
}

fn error(message: impl Into<String>, offset: usize) -> TemplateError {
    TemplateError::Parse {
        message: message.into(),
        offset,
    }
}

pub(super) fn parse(items: Vec<Item>) -> Result<Vec<Node>, TemplateError> {
    let mut parser = Parser {
        items: items.into_iter(),
    };
    let (nodes, terminator, offset) = parser.list()?;
    match terminator {
        Terminator::Eof => Ok(nodes),
        Terminator::End => Err(error("unexpected {{end}}", offset)),
        Terminator::Else(_) => Err(error("unexpected {{else}}", offset)),
    }
}

struct Parser {
    items: std::vec::IntoIter<Item>,
}

impl Parser {
    /// Parse nodes until end of input or a control action that closes a block.
    fn list(&mut self) -> Result<(Vec<Node>, Terminator, usize), TemplateError> {
        let mut nodes = Vec::new();

        while let Some(item) = self.items.next() {
            let (tokens, offset) = match item {
                Item::Text(text) => {
                    nodes.push(Node::Text(text));
                    continue;
                }
                Item::Action { tokens, offset } => (tokens, offset),
            };

            match keyword(&tokens) {
                Some("if") => nodes.push(self.if_block(&tokens[1..], offset)?),
                Some("end") => {
                    expect_bare(&tokens, "end")?;
                    return Ok((nodes, Terminator::End, offset));
                }
                Some("else") => {
                    let rest = &tokens[1..];
                    let terminator = match keyword(rest) {
                        Some("if") => Terminator::Else(Some(pipeline(&rest[1..], offset)?)),
                        _ if rest.is_empty() => Terminator::Else(None),
                        _ => return Err(error("unexpected tokens after else", rest[0].offset)),
                    };
                    return Ok((nodes, terminator, offset));
                }
                _ => nodes.push(Node::Output(pipeline(&tokens, offset)?)),
            }
        }

        Ok((nodes, Terminator::Eof, 0))
    }

    fn if_block(&mut self, condition: &[Spanned], offset: usize) -> Result<Node, TemplateError> {
        let mut branches = Vec::new();
        let mut condition = pipeline(condition, offset)?;

        loop {
            let (body, terminator, _) = self.list()?;
            branches.push((condition, body));
            match terminator {
                Terminator::End => {
                    return Ok(Node::If {
                        branches,
                        otherwise: Vec::new(),
                    })
                }
                Terminator::Else(Some(next)) => condition = next,
                Terminator::Else(None) => {
                    let (otherwise, terminator, at) = self.list()?;
                    return match terminator {
                        Terminator::End => Ok(Node::If {
                            branches,
                            otherwise,
                        }),
                        Terminator::Else(_) => Err(error("expected {{end}}, found {{else}}", at)),
                        Terminator::Eof => Err(error("unexpected EOF: missing {{end}}", offset)),
                    };
                }
                Terminator::Eof => return Err(error("unexpected EOF: missing {{end}}", offset)),
            }
        }
    }
}

fn keyword(tokens: &[Spanned]) -> Option<&str> {
    match tokens.first() {
        Some(Spanned {
            token: Token::Ident(name),
            ..
        }) if matches!(name.as_str(), "if" | "else" | "end") => Some(name.as_str()),
        _ => None,
    }
}

fn expect_bare(tokens: &[Spanned], keyword: &str) -> Result<(), TemplateError> {
    if tokens.len() > 1 {
        return Err(error(
            format!("unexpected tokens after {}", keyword),
            tokens[1].offset,
        ));
    }
    Ok(())
}

/// Parse a full pipeline from a token slice.
fn pipeline(tokens: &[Spanned], offset: usize) -> Result<Pipeline, TemplateError> {
    if tokens.is_empty() {
        return Err(error("missing value for command", offset));
    }

    let mut commands = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, spanned) in tokens.iter().enumerate() {
        match spanned.token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| error("unexpected right paren", spanned.offset))?;
            }
            Token::Pipe if depth == 0 => {
                commands.push(command(&tokens[start..i], spanned.offset)?);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(error("unclosed left paren", offset));
    }
    let end = tokens.last().map(|t| t.offset).unwrap_or(offset);
    commands.push(command(&tokens[start..], end)?);

    for stage in &commands[1..] {
        if !matches!(stage.operands.first(), Some(Operand::Func(_))) {
            return Err(error("non-function command in pipeline", offset));
        }
    }

    Ok(Pipeline { commands })
}

fn command(tokens: &[Spanned], offset: usize) -> Result<Command, TemplateError> {
    if tokens.is_empty() {
        return Err(error("missing command in pipeline", offset));
    }

    let mut operands = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let spanned = &tokens[i];
        let operand = match &spanned.token {
            Token::Field(name) => match name.as_str() {
                "Name" => Operand::Field(Field::Name),
                "Value" => Operand::Field(Field::Value),
                other => {
                    return Err(error(
                        format!("can't evaluate field {}", other),
                        spanned.offset,
                    ))
                }
            },
            Token::Str(s) => Operand::Str(s.clone()),
            Token::Int(n) => Operand::Int(*n),
            Token::Ident(name) => match name.as_str() {
                "true" => Operand::Bool(true),
                "false" => Operand::Bool(false),
                "if" | "else" | "end" => {
                    return Err(error(
                        format!("unexpected keyword {} in command", name),
                        spanned.offset,
                    ))
                }
                other => match functions::lookup(other) {
                    Some(func) => Operand::Func(func),
                    None => {
                        return Err(error(
                            format!("function {:?} not defined", other),
                            spanned.offset,
                        ))
                    }
                },
            },
            Token::LParen => {
                let close = matching_paren(tokens, i)?;
                let inner = pipeline(&tokens[i + 1..close], spanned.offset)?;
                i = close;
                Operand::Sub(inner)
            }
            Token::RParen => return Err(error("unexpected right paren", spanned.offset)),
            Token::Pipe => return Err(error("unexpected pipe", spanned.offset)),
        };
        operands.push(operand);
        i += 1;
    }

    if operands.len() > 1 && !matches!(operands[0], Operand::Func(_)) {
        return Err(error("can't give argument to non-function", offset));
    }

    Ok(Command { operands })
}

fn matching_paren(tokens: &[Spanned], open: usize) -> Result<usize, TemplateError> {
    let mut depth = 0usize;
    for (i, spanned) in tokens.iter().enumerate().skip(open) {
        match spanned.token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(error("unclosed left paren", tokens[open].offset))
}
