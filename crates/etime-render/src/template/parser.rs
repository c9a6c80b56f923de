//! Directive parser.
//!
//! Turns a template source into a [`CompiledTemplate`]: a flat list of literal
//! text runs and directives. A directive is everything between `{{` and the
//! next `}}` outside a quoted string:
//!
//! ```text
//! {{ Bold "USAGE" }}            function call with a string literal
//! {{ CommandName }}             function call without arguments
//! {{ Percent .Sureness 5 }}     field reference and number literal
//! {{ .Device.Name }}            print a field
//! {{ Bold CommandName }}        niladic function used as an argument
//! ```
//!
//! Argument tokens are separated by whitespace. Strings are double-quoted with
//! backslash escapes (`\"`, `\\`, `\n`, `\t`, `\r`) or backquoted raw strings.
//!
//! Everything that can be decided without data is decided here: unknown
//! function names and argument counts are parse errors. Argument types depend
//! on field values and are checked during execution.

use serde_json::Number;

use super::functions::{Function, FunctionRegistry};
use crate::error::{RenderError, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// A parsed template, ready to be executed any number of times.
///
/// Produced by [`DirectiveEngine::compile`](super::DirectiveEngine::compile).
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    nodes: Vec<Node>,
}

impl CompiledTemplate {
    /// Number of directives in the template.
    pub fn directive_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Action(_)))
            .count()
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Action(Action),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Action {
    /// 1-based line of the opening `{{`.
    pub(crate) line: usize,
    pub(crate) command: Command,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Command {
    Call { function: Function, args: Vec<Arg> },
    Print(Arg),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Arg {
    Str(String),
    Number(Number),
    Bool(bool),
    /// Dotted path into the data. Empty for `.` itself.
    Field(Vec<String>),
    Call(Function),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Number(Number),
    Field(Vec<String>),
}

/// Parses `source` against the functions in `registry`.
pub(crate) fn parse(source: &str, registry: &FunctionRegistry) -> Result<CompiledTemplate> {
    let mut nodes = Vec::new();
    let mut pos = 0;

    while let Some(found) = source[pos..].find(OPEN) {
        let open = pos + found;
        if open > pos {
            nodes.push(Node::Text(source[pos..open].to_string()));
        }

        let line = line_at(source, open);
        let (tokens, end) = lex_action(source, open + OPEN.len(), line)?;
        let command = build_command(tokens, registry, line)?;
        nodes.push(Node::Action(Action { line, command }));
        pos = end;
    }

    if pos < source.len() {
        nodes.push(Node::Text(source[pos..].to_string()));
    }

    Ok(CompiledTemplate { nodes })
}

fn line_at(source: &str, offset: usize) -> usize {
    source[..offset].matches('\n').count() + 1
}

/// Lexes the inside of a directive starting right after `{{`.
///
/// Returns the tokens and the byte offset just past the closing `}}`.
fn lex_action(source: &str, start: usize, line: usize) -> Result<(Vec<Token>, usize)> {
    let mut tokens = Vec::new();
    let mut pos = start;

    loop {
        let rest = &source[pos..];
        let trimmed = rest.trim_start();
        pos += rest.len() - trimmed.len();

        if trimmed.is_empty() {
            return Err(RenderError::parse(line, "unclosed action"));
        }
        if trimmed.starts_with(CLOSE) {
            return Ok((tokens, pos + CLOSE.len()));
        }

        let (token, len) = lex_token(trimmed, line)?;
        tokens.push(token);
        pos += len;

        let after = &source[pos..];
        if let Some(next) = after.chars().next() {
            if !next.is_whitespace() && !after.starts_with(CLOSE) {
                return Err(RenderError::parse(
                    line,
                    format!("unexpected {:?} in action: missing space between arguments", next),
                ));
            }
        }
    }
}

fn lex_token(s: &str, line: usize) -> Result<(Token, usize)> {
    let mut chars = s.chars();
    let first = chars.next().unwrap_or(' ');
    let second = chars.next();

    match first {
        '"' => lex_quoted(s, line),
        '`' => match s[1..].find('`') {
            Some(end) => Ok((Token::Str(s[1..1 + end].to_string()), end + 2)),
            None => Err(RenderError::parse(line, "unterminated raw quoted string")),
        },
        '.' if second.is_some_and(|c| c.is_ascii_digit()) => lex_number(s, line),
        '.' => lex_field(s, line),
        '+' | '-' if second.is_some_and(|c| c.is_ascii_digit() || c == '.') => lex_number(s, line),
        c if c.is_ascii_digit() => lex_number(s, line),
        c if is_ident_start(c) => {
            let len = s.find(|c: char| !is_ident_char(c)).unwrap_or(s.len());
            Ok((Token::Ident(s[..len].to_string()), len))
        }
        c => Err(RenderError::parse(line, format!("unexpected {:?} in action", c))),
    }
}

fn lex_quoted(s: &str, line: usize) -> Result<(Token, usize)> {
    let mut out = String::new();
    let mut chars = s.char_indices().skip(1);

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((Token::Str(out), i + 1)),
            '\\' => match chars.next() {
                Some((_, 'n')) => out.push('\n'),
                Some((_, 't')) => out.push('\t'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, '\\')) => out.push('\\'),
                Some((_, '"')) => out.push('"'),
                Some((_, '\'')) => out.push('\''),
                Some((_, other)) => {
                    return Err(RenderError::parse(
                        line,
                        format!("invalid escape \\{} in quoted string", other),
                    ))
                }
                None => break,
            },
            '\n' => break,
            c => out.push(c),
        }
    }

    Err(RenderError::parse(line, "unterminated quoted string"))
}

fn lex_number(s: &str, line: usize) -> Result<(Token, usize)> {
    let bytes = s.as_bytes();
    let mut len = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    while len < bytes.len() {
        let b = bytes[len];
        let exponent_sign = (b == b'+' || b == b'-') && matches!(bytes[len - 1], b'e' | b'E');
        if b.is_ascii_digit() || b == b'.' || b == b'e' || b == b'E' || exponent_sign {
            len += 1;
        } else {
            break;
        }
    }

    let text = &s[..len];
    let number = if text.contains(&['.', 'e', 'E'][..]) {
        text.parse::<f64>().ok().and_then(Number::from_f64)
    } else {
        // Integers beyond i64 are kept as floats
        text.parse::<i64>()
            .ok()
            .map(Number::from)
            .or_else(|| text.parse::<f64>().ok().and_then(Number::from_f64))
    };

    match number {
        Some(n) => Ok((Token::Number(n), len)),
        None => Err(RenderError::parse(line, format!("bad number syntax: {:?}", text))),
    }
}

fn lex_field(s: &str, line: usize) -> Result<(Token, usize)> {
    let mut path = Vec::new();
    let mut len = 0;

    while s[len..].starts_with('.') {
        let rest = &s[len + 1..];
        let ident_len = rest.find(|c: char| !is_ident_char(c)).unwrap_or(rest.len());
        if ident_len == 0 {
            break;
        }
        if !rest.starts_with(is_ident_start) {
            return Err(RenderError::parse(
                line,
                format!("bad field name {:?}", &rest[..ident_len]),
            ));
        }
        path.push(rest[..ident_len].to_string());
        len += 1 + ident_len;
    }

    if path.is_empty() {
        // `.` on its own: the whole data value
        return Ok((Token::Field(path), 1));
    }
    if s[len..].starts_with('.') {
        return Err(RenderError::parse(line, "unexpected '.' after field name"));
    }
    Ok((Token::Field(path), len))
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn build_command(tokens: Vec<Token>, registry: &FunctionRegistry, line: usize) -> Result<Command> {
    let mut tokens = tokens.into_iter();
    let first = tokens
        .next()
        .ok_or_else(|| RenderError::parse(line, "missing value for command"))?;

    match first {
        Token::Ident(name) if !is_bool(&name) => {
            let function = lookup(registry, &name, line)?;
            let args = tokens
                .map(|token| operand(token, registry, line))
                .collect::<Result<Vec<_>>>()?;
            if args.len() != function.arity() {
                return Err(RenderError::parse(
                    line,
                    format!(
                        "wrong number of args for {}: want {} got {}",
                        function.name(),
                        function.arity(),
                        args.len()
                    ),
                ));
            }
            Ok(Command::Call { function, args })
        }
        token => {
            let arg = operand(token, registry, line)?;
            if tokens.next().is_some() {
                return Err(RenderError::parse(
                    line,
                    "can't give argument to non-function",
                ));
            }
            Ok(Command::Print(arg))
        }
    }
}

fn operand(token: Token, registry: &FunctionRegistry, line: usize) -> Result<Arg> {
    Ok(match token {
        Token::Str(s) => Arg::Str(s),
        Token::Number(n) => Arg::Number(n),
        Token::Field(path) => Arg::Field(path),
        Token::Ident(name) if is_bool(&name) => Arg::Bool(name == "true"),
        Token::Ident(name) => {
            let function = lookup(registry, &name, line)?;
            if function.arity() != 0 {
                return Err(RenderError::parse(
                    line,
                    format!(
                        "wrong number of args for {}: want {} got 0",
                        function.name(),
                        function.arity()
                    ),
                ));
            }
            Arg::Call(function)
        }
    })
}

fn lookup(registry: &FunctionRegistry, name: &str, line: usize) -> Result<Function> {
    registry
        .get(name)
        .ok_or_else(|| RenderError::parse(line, format!("function {:?} not defined", name)))
}

fn is_bool(name: &str) -> bool {
    name == "true" || name == "false"
}
