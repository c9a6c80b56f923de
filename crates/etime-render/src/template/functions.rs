//! The fixed set of formatting functions callable from templates.
//!
//! | Function | Arguments | Output |
//! |----------|-----------|--------|
//! | `Bold` | `text` | `ESC[1m` + text + `ESC[0m` |
//! | `CommandName` | none | the program display name from the [`RenderContext`] |
//! | `Percent` | `ratio width` | `ratio * 100` with one decimal, justified to `width` |
//! | `Time` | `text width` | `text` justified to `width`, untouched otherwise |
//! | `Value` | `number width` | `number` with two decimals, justified to `width` |
//!
//! Widths follow printf's `%*` convention: negative values left-justify.
//!
//! The set is closed. [`Function`] enumerates it, and a [`FunctionRegistry`]
//! decides which of those functions a particular engine accepts when parsing.

use console::Style;
use serde_json::Value;

use crate::context::RenderContext;
use crate::util::justify;

/// Widths beyond this are rejected at execution time instead of allocating
/// an arbitrarily large padding buffer.
pub const MAX_WIDTH: i64 = 4096;

/// Type expected for a function parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A string value.
    String,
    /// Any number.
    Float,
    /// A number without a fractional part.
    Int,
}

impl ParamKind {
    fn as_str(self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Float => "number",
            ParamKind::Int => "integer",
        }
    }
}

/// A formatting function available to templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Bold,
    CommandName,
    Percent,
    Time,
    Value,
}

impl Function {
    /// Every function, in registry order.
    pub const ALL: [Function; 5] = [
        Function::Bold,
        Function::CommandName,
        Function::Percent,
        Function::Time,
        Function::Value,
    ];

    /// The name used to call this function from a template.
    pub fn name(self) -> &'static str {
        match self {
            Function::Bold => "Bold",
            Function::CommandName => "CommandName",
            Function::Percent => "Percent",
            Function::Time => "Time",
            Function::Value => "Value",
        }
    }

    /// Parameter types, in positional order.
    pub fn params(self) -> &'static [ParamKind] {
        match self {
            Function::Bold => &[ParamKind::String],
            Function::CommandName => &[],
            Function::Percent => &[ParamKind::Float, ParamKind::Int],
            Function::Time => &[ParamKind::String, ParamKind::Int],
            Function::Value => &[ParamKind::Float, ParamKind::Int],
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        self.params().len()
    }

    /// Invokes the function with already-evaluated arguments.
    ///
    /// The argument count is checked when the template is parsed, argument
    /// types here. Errors are plain messages; the executor attaches the
    /// template position.
    pub(crate) fn call(
        self,
        args: &[Value],
        context: &RenderContext,
    ) -> std::result::Result<String, String> {
        if args.len() != self.arity() {
            return Err(format!(
                "wrong number of args for {}: want {} got {}",
                self.name(),
                self.arity(),
                args.len()
            ));
        }

        let output = match self {
            Function::Bold => bold(self.string_arg(args, 0)?),
            Function::CommandName => context.program_name().to_string(),
            Function::Percent => percent(self.float_arg(args, 0)?, self.width_arg(args, 1)?),
            Function::Time => time(self.string_arg(args, 0)?, self.width_arg(args, 1)?),
            Function::Value => value(self.float_arg(args, 0)?, self.width_arg(args, 1)?),
        };
        Ok(output)
    }

    fn string_arg<'a>(self, args: &'a [Value], index: usize) -> std::result::Result<&'a str, String> {
        args[index]
            .as_str()
            .ok_or_else(|| self.type_error(index, ParamKind::String, &args[index]))
    }

    fn float_arg(self, args: &[Value], index: usize) -> std::result::Result<f64, String> {
        args[index]
            .as_f64()
            .ok_or_else(|| self.type_error(index, ParamKind::Float, &args[index]))
    }

    fn width_arg(self, args: &[Value], index: usize) -> std::result::Result<i64, String> {
        let width = match &args[index] {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            _ => None,
        }
        .ok_or_else(|| self.type_error(index, ParamKind::Int, &args[index]))?;

        if width.unsigned_abs() > MAX_WIDTH.unsigned_abs() {
            return Err(format!(
                "width {} for {} is out of range (limit {})",
                width,
                self.name(),
                MAX_WIDTH
            ));
        }
        Ok(width)
    }

    fn type_error(self, index: usize, expected: ParamKind, got: &Value) -> String {
        format!(
            "wrong type for argument {} of {}: expected {}, got {}",
            index + 1,
            self.name(),
            expected.as_str(),
            value_kind(got)
        )
    }
}

/// Names the JSON kind of a value for error messages.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The set of functions an engine accepts.
///
/// [`FunctionRegistry::standard`] holds all five functions and is what
/// every public rendering entry point uses. Narrower registries exist for
/// testing how templates behave when a function they call is unavailable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRegistry {
    functions: Vec<Function>,
}

impl FunctionRegistry {
    /// Registry with every function.
    pub fn standard() -> Self {
        Self {
            functions: Function::ALL.to_vec(),
        }
    }

    /// Registry restricted to the given functions.
    pub fn with_functions(functions: impl IntoIterator<Item = Function>) -> Self {
        let mut registry = Self {
            functions: Vec::new(),
        };
        for function in functions {
            if !registry.functions.contains(&function) {
                registry.functions.push(function);
            }
        }
        registry
    }

    /// Looks up a function by its template name.
    pub fn get(&self, name: &str) -> Option<Function> {
        self.functions.iter().copied().find(|f| f.name() == name)
    }

    /// Names of all registered functions.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.iter().map(|f| f.name())
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Wraps `text` in the ANSI bold and reset sequences.
///
/// Styling is always applied, whether or not the output is a terminal.
///
/// ```rust
/// assert_eq!(etime_render::bold("USAGE"), "\x1b[1mUSAGE\x1b[0m");
/// ```
pub fn bold(text: &str) -> String {
    Style::new()
        .bold()
        .force_styling(true)
        .apply_to(text)
        .to_string()
}

/// Formats `ratio` as a percentage with one decimal, justified to `width`.
///
/// ```rust
/// assert_eq!(etime_render::percent(0.615, 5), " 61.5");
/// ```
pub fn percent(ratio: f64, width: i64) -> String {
    justify(&format!("{:.1}", ratio * 100.0), width)
}

/// Justifies an already formatted time string to `width`.
pub fn time(preformatted: &str, width: i64) -> String {
    justify(preformatted, width)
}

/// Formats `number` with two decimals, justified to `width`.
///
/// ```rust
/// assert_eq!(etime_render::value(9.53, 6), "  9.53");
/// ```
pub fn value(number: f64, width: i64) -> String {
    justify(&format!("{:.2}", number), width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> RenderContext {
        RenderContext::new("etime")
    }

    #[test]
    fn test_bold_wraps_text() {
        assert_eq!(bold("World"), "\x1b[1mWorld\x1b[0m");
    }

    #[test]
    fn test_bold_empty_string() {
        assert_eq!(bold(""), "\x1b[1m\x1b[0m");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.615, 4), "61.5");
        assert_eq!(percent(0.615, 5), " 61.5");
        assert_eq!(percent(1.0, 6), " 100.0");
        assert_eq!(percent(0.615, -6), "61.5  ");
    }

    #[test]
    fn test_value() {
        assert_eq!(value(9.53, 6), "  9.53");
        assert_eq!(value(0.0, 12), "        0.00");
        assert_eq!(value(123.456, 2), "123.46");
    }

    #[test]
    fn test_time_is_pure_padding() {
        assert_eq!(time("12.00", 8), "   12.00");
        // No numeric reinterpretation
        assert_eq!(time("12.0000", 8), " 12.0000");
        assert_eq!(time("n/a", 5), "  n/a");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = FunctionRegistry::standard();
        assert_eq!(registry.get("Bold"), Some(Function::Bold));
        assert_eq!(registry.get("bold"), None);
        assert_eq!(registry.get("Unknown"), None);
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["Bold", "CommandName", "Percent", "Time", "Value"]
        );
    }

    #[test]
    fn test_restricted_registry() {
        let registry = FunctionRegistry::with_functions([Function::Bold, Function::Bold]);
        assert_eq!(registry.names().count(), 1);
        assert_eq!(registry.get("Percent"), None);
    }

    #[test]
    fn test_arities() {
        assert_eq!(Function::Bold.arity(), 1);
        assert_eq!(Function::CommandName.arity(), 0);
        assert_eq!(Function::Percent.arity(), 2);
        assert_eq!(Function::Time.arity(), 2);
        assert_eq!(Function::Value.arity(), 2);
    }

    #[test]
    fn test_call_dispatch() {
        let out = Function::Percent.call(&[json!(0.615), json!(5)], &ctx());
        assert_eq!(out, Ok(" 61.5".to_string()));

        let out = Function::CommandName.call(&[], &ctx());
        assert_eq!(out, Ok("etime".to_string()));
    }

    #[test]
    fn test_call_accepts_integral_float_width() {
        let out = Function::Value.call(&[json!(9.53), json!(6.0)], &ctx());
        assert_eq!(out, Ok("  9.53".to_string()));
    }

    #[test]
    fn test_call_type_mismatch() {
        let err = Function::Bold.call(&[json!(3)], &ctx()).unwrap_err();
        assert_eq!(
            err,
            "wrong type for argument 1 of Bold: expected string, got number"
        );

        let err = Function::Value.call(&[json!(1.0), json!(2.5)], &ctx()).unwrap_err();
        assert!(err.contains("expected integer"));

        let err = Function::Percent.call(&[json!("0.5"), json!(4)], &ctx()).unwrap_err();
        assert!(err.contains("expected number, got string"));
    }

    #[test]
    fn test_call_width_out_of_range() {
        let err = Function::Time
            .call(&[json!("x"), json!(1_000_000)], &ctx())
            .unwrap_err();
        assert!(err.contains("out of range"));
    }

    #[test]
    fn test_call_wrong_arity() {
        let err = Function::Bold.call(&[], &ctx()).unwrap_err();
        assert_eq!(err, "wrong number of args for Bold: want 1 got 0");
    }
}
