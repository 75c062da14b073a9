//! Splits a template into literal text and tokenized actions.

use crate::error::TemplateError;

const LEFT_DELIM: &str = "{{";
const RIGHT_DELIM: &str = "}}";
const LEFT_COMMENT: &str = "/*";
const RIGHT_COMMENT: &str = "*/";

/// A token inside an action.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    /// `.Name`, `.Value`
    Field(String),
    /// Function names and keywords (`if`, `else`, `end`, `true`, `false`).
    Ident(String),
    Str(String),
    Int(i64),
    LParen,
    RParen,
    Pipe,
}

/// A token with its byte offset in the source.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Spanned {
    pub token: Token,
    pub offset: usize,
}

/// Top-level piece of a template.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Item {
    Text(String),
    Action { tokens: Vec<Spanned>, offset: usize },
}

fn error(message: impl Into<String>, offset: usize) -> TemplateError {
    TemplateError::Parse {
        message: message.into(),
        offset,
    }
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lex `src` into items, applying `{{-` / `-}}` whitespace trimming.
pub(super) fn lex(src: &str) -> Result<Vec<Item>, TemplateError> {
    let mut items = Vec::new();
    let mut pos = 0;
    let mut trim_next = false;

    while pos < src.len() {
        let rest = &src[pos..];
        let Some(start) = rest.find(LEFT_DELIM) else {
            push_text(&mut items, rest, trim_next, false);
            break;
        };

        let action_start = pos + start;
        let mut cursor = action_start + LEFT_DELIM.len();

        let trim_left = src[cursor..].starts_with('-')
            && src[cursor + 1..].starts_with(is_space);
        if trim_left {
            cursor += 1;
        }

        push_text(&mut items, &rest[..start], trim_next, trim_left);

        let after_ws = skip_space(src, cursor);
        if src[after_ws..].starts_with(LEFT_COMMENT) {
            let (end, trim_right) = lex_comment(src, after_ws, action_start)?;
            pos = end;
            trim_next = trim_right;
            continue;
        }

        let (tokens, end, trim_right) = lex_action(src, cursor, action_start)?;
        items.push(Item::Action {
            tokens,
            offset: action_start,
        });
        pos = end;
        trim_next = trim_right;
    }

    Ok(items)
}

fn push_text(items: &mut Vec<Item>, text: &str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start_matches(is_space);
    }
    if trim_end {
        text = text.trim_end_matches(is_space);
    }
    if !text.is_empty() {
        items.push(Item::Text(text.to_string()));
    }
}

fn skip_space(src: &str, mut pos: usize) -> usize {
    while let Some(c) = src[pos..].chars().next() {
        if !is_space(c) {
            break;
        }
        pos += c.len_utf8();
    }
    pos
}

/// Returns the offset just past the closing delimiter and whether the
/// comment carried a right trim marker.
fn lex_comment(
    src: &str,
    start: usize,
    action_start: usize,
) -> Result<(usize, bool), TemplateError> {
    let body = start + LEFT_COMMENT.len();
    let Some(close) = src[body..].find(RIGHT_COMMENT) else {
        return Err(error("unclosed comment", action_start));
    };
    let after = body + close + RIGHT_COMMENT.len();

    if src[after..].starts_with(RIGHT_DELIM) {
        return Ok((after + RIGHT_DELIM.len(), false));
    }
    let trimmed = skip_space(src, after);
    if trimmed > after && src[trimmed..].starts_with("-}}") {
        return Ok((trimmed + 3, true));
    }
    Err(error("comment closed without closing delimiter", after))
}

/// Tokenize one action. Returns the tokens, the offset just past the
/// closing delimiter and whether a right trim marker was present.
fn lex_action(
    src: &str,
    mut pos: usize,
    action_start: usize,
) -> Result<(Vec<Spanned>, usize, bool), TemplateError> {
    let mut tokens = Vec::new();

    loop {
        let before = pos;
        pos = skip_space(src, pos);
        let rest = &src[pos..];

        if rest.is_empty() {
            return Err(error("unclosed action", action_start));
        }
        if pos > before && rest.starts_with("-}}") {
            return Ok((tokens, pos + 3, true));
        }
        if rest.starts_with(RIGHT_DELIM) {
            return Ok((tokens, pos + RIGHT_DELIM.len(), false));
        }

        let offset = pos;
        let c = rest.chars().next().unwrap_or_default();
        let (token, len) = match c {
            '(' => (Token::LParen, 1),
            ')' => (Token::RParen, 1),
            '|' => (Token::Pipe, 1),
            '"' => lex_quoted(rest, offset)?,
            '`' => lex_raw(rest, offset)?,
            '.' => {
                let name: String = rest[1..].chars().take_while(|c| is_ident_char(*c)).collect();
                if name.is_empty() {
                    return Err(error("unsupported operand '.'", offset));
                }
                let len = 1 + name.len();
                (Token::Field(name), len)
            }
            '-' | '0'..='9' => lex_number(rest, offset)?,
            c if c.is_alphabetic() || c == '_' => {
                let name: String = rest.chars().take_while(|c| is_ident_char(*c)).collect();
                let len = name.len();
                (Token::Ident(name), len)
            }
            other => {
                return Err(error(format!("unexpected {:?} in action", other), offset));
            }
        };

        tokens.push(Spanned { token, offset });
        pos += len;
    }
}

fn lex_quoted(rest: &str, offset: usize) -> Result<(Token, usize), TemplateError> {
    let mut value = String::new();
    let mut chars = rest.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((Token::Str(value), i + 1)),
            '\n' => break,
            '\\' => {
                let Some((_, escaped)) = chars.next() else {
                    break;
                };
                value.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '\\' => '\\',
                    '"' => '"',
                    other => {
                        return Err(error(format!("unknown escape sequence \\{}", other), offset))
                    }
                });
            }
            c => value.push(c),
        }
    }

    Err(error("unterminated quoted string", offset))
}

fn lex_raw(rest: &str, offset: usize) -> Result<(Token, usize), TemplateError> {
    match rest[1..].find('`') {
        Some(end) => Ok((Token::Str(rest[1..1 + end].to_string()), end + 2)),
        None => Err(error("unterminated raw quoted string", offset)),
    }
}

fn lex_number(rest: &str, offset: usize) -> Result<(Token, usize), TemplateError> {
    let sign = usize::from(rest.starts_with('-'));
    let digits = rest[sign..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(error("bad number syntax", offset));
    }
    let len = sign + digits;
    let text = &rest[..len];
    let value = text
        .parse::<i64>()
        .map_err(|_| error(format!("bad number syntax: {}", text), offset))?;
    Ok((Token::Int(value), len))
}
