//! Values and the function library available to templates.

use std::fmt;

/// A runtime value.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Value {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl Value {
    pub fn truthy(&self) -> bool {
        match self {
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

const FUNCTIONS: &[&str] = &[
    // string library
    "contains",
    "hasPrefix",
    "hasSuffix",
    "trimPrefix",
    "trimSuffix",
    "trimSpace",
    "trimLeft",
    "trimRight",
    "trim",
    "title",
    "toTitle",
    "toLower",
    "toUpper",
    // builtins
    "and",
    "or",
    "not",
    "eq",
    "ne",
    "len",
    "print",
];

/// Resolve a function name at compile time.
pub(super) fn lookup(name: &str) -> Option<&'static str> {
    FUNCTIONS.iter().copied().find(|f| *f == name)
}

fn arity(name: &str, args: &[Value], want: usize) -> Result<(), String> {
    if args.len() != want {
        return Err(format!(
            "wrong number of args for {}: want {} got {}",
            name,
            want,
            args.len()
        ));
    }
    Ok(())
}

fn string<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, String> {
    match &args[index] {
        Value::Str(s) => Ok(s.as_str()),
        other => Err(format!(
            "wrong type for argument {} of {}: expected string, got {}",
            index + 1,
            name,
            other.kind()
        )),
    }
}

/// Apply `f` to a single string argument.
fn unary(name: &str, args: &[Value], f: impl Fn(&str) -> String) -> Result<Value, String> {
    arity(name, args, 1)?;
    Ok(Value::Str(f(string(name, args, 0)?)))
}

/// Apply `f` to two string arguments.
fn binary<T>(
    name: &str,
    args: &[Value],
    f: impl Fn(&str, &str) -> T,
) -> Result<T, String> {
    arity(name, args, 2)?;
    Ok(f(string(name, args, 0)?, string(name, args, 1)?))
}

fn trimmed(s: &str, cutset: &str, left: bool, right: bool) -> String {
    let in_set = |c: char| cutset.contains(c);
    let mut out = s;
    if left {
        out = out.trim_start_matches(in_set);
    }
    if right {
        out = out.trim_end_matches(in_set);
    }
    out.to_string()
}

/// Uppercase the first letter of every word.
fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_boundary = true;
    for c in s.chars() {
        if at_boundary && c.is_alphabetic() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_boundary = !(c.is_alphanumeric() || c == '_');
    }
    out
}

fn equal(left: &Value, right: &Value) -> Result<bool, String> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Int(a), Value::Int(b)) => Ok(a == b),
        (a, b) => Err(format!(
            "incompatible types for comparison: {} and {}",
            a.kind(),
            b.kind()
        )),
    }
}

/// Concatenate values, separating adjacent non-string operands with a space.
fn print(args: &[Value]) -> String {
    let mut out = String::new();
    for (i, arg) in args.iter().enumerate() {
        let is_str = matches!(arg, Value::Str(_));
        if i > 0 && !is_str && !matches!(args[i - 1], Value::Str(_)) {
            out.push(' ');
        }
        out.push_str(&arg.to_string());
    }
    out
}

/// Invoke a function by name. `name` is always one returned by [`lookup`].
pub(super) fn call(name: &str, args: Vec<Value>) -> Result<Value, String> {
    match name {
        "contains" => binary(name, &args, |s, sub| Value::Bool(s.contains(sub))),
        "hasPrefix" => binary(name, &args, |s, p| Value::Bool(s.starts_with(p))),
        "hasSuffix" => binary(name, &args, |s, p| Value::Bool(s.ends_with(p))),
        "trimPrefix" => binary(name, &args, |s, p| {
            Value::Str(s.strip_prefix(p).unwrap_or(s).to_string())
        }),
        "trimSuffix" => binary(name, &args, |s, p| {
            Value::Str(s.strip_suffix(p).unwrap_or(s).to_string())
        }),
        "trimSpace" => unary(name, &args, |s| s.trim().to_string()),
        "trimLeft" => binary(name, &args, |s, c| Value::Str(trimmed(s, c, true, false))),
        "trimRight" => binary(name, &args, |s, c| Value::Str(trimmed(s, c, false, true))),
        "trim" => binary(name, &args, |s, c| Value::Str(trimmed(s, c, true, true))),
        "title" => unary(name, &args, title),
        "toTitle" | "toUpper" => unary(name, &args, str::to_uppercase),
        "toLower" => unary(name, &args, str::to_lowercase),

        "and" | "or" => {
            if args.is_empty() {
                return Err(format!("wrong number of args for {}: want at least 1 got 0", name));
            }
            let stop_on = name == "or";
            let last = args.len() - 1;
            let pick = args
                .iter()
                .position(|a| a.truthy() == stop_on)
                .unwrap_or(last);
            Ok(args[pick].clone())
        }
        "not" => {
            arity(name, &args, 1)?;
            Ok(Value::Bool(!args[0].truthy()))
        }
        "eq" => {
            if args.len() < 2 {
                return Err(format!(
                    "wrong number of args for eq: want at least 2 got {}",
                    args.len()
                ));
            }
            for candidate in &args[1..] {
                if equal(&args[0], candidate)? {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        "ne" => {
            arity(name, &args, 2)?;
            Ok(Value::Bool(!equal(&args[0], &args[1])?))
        }
        "len" => {
            arity(name, &args, 1)?;
            let len = string(name, &args, 0)?.len();
            Ok(Value::Int(i64::try_from(len).unwrap_or(i64::MAX)))
        }
        "print" => Ok(Value::Str(print(&args))),

        other => Err(format!("function {:?} not defined", other)),
    }
}
