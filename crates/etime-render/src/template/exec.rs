//! Execution of compiled templates against data.

use serde_json::Value;

use super::functions::value_kind;
use super::parser::{Action, Arg, Command, CompiledTemplate, Node};
use crate::context::RenderContext;
use crate::error::{RenderError, Result};

impl CompiledTemplate {
    /// Executes the template against `data`.
    ///
    /// Rendering is all-or-nothing: if any directive fails, the text produced
    /// so far is dropped and only the error is returned.
    pub fn execute(&self, data: &Value, context: &RenderContext) -> Result<String> {
        let mut out = String::new();
        for node in self.nodes() {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Action(action) => out.push_str(&eval_action(action, data, context)?),
            }
        }
        Ok(out)
    }
}

fn eval_action(action: &Action, data: &Value, context: &RenderContext) -> Result<String> {
    match &action.command {
        Command::Call { function, args } => {
            let values = args
                .iter()
                .map(|arg| eval_arg(arg, data, context, action.line))
                .collect::<Result<Vec<_>>>()?;
            function
                .call(&values, context)
                .map_err(|message| RenderError::execution(action.line, message))
        }
        Command::Print(arg) => Ok(format_value(&eval_arg(arg, data, context, action.line)?)),
    }
}

fn eval_arg(arg: &Arg, data: &Value, context: &RenderContext, line: usize) -> Result<Value> {
    let value = match arg {
        Arg::Str(s) => Value::String(s.clone()),
        Arg::Number(n) => Value::Number(n.clone()),
        Arg::Bool(b) => Value::Bool(*b),
        Arg::Field(path) => resolve_field(data, path)
            .map_err(|message| RenderError::execution(line, message))?
            .clone(),
        Arg::Call(function) => Value::String(
            function
                .call(&[], context)
                .map_err(|message| RenderError::execution(line, message))?,
        ),
    };
    Ok(value)
}

/// Walks a dotted field path through nested objects.
fn resolve_field<'a>(data: &'a Value, path: &[String]) -> std::result::Result<&'a Value, String> {
    let mut current = data;

    for (depth, name) in path.iter().enumerate() {
        current = match current {
            Value::Object(map) => map
                .get(name)
                .ok_or_else(|| format!("no field {:?} in {}", name, describe(&path[..depth])))?,
            Value::Null => {
                return Err(format!(
                    "nil data; no entry for field {:?} in {}",
                    name,
                    describe(&path[..depth])
                ))
            }
            other => {
                return Err(format!(
                    "can't evaluate field {} in type {}",
                    name,
                    value_kind(other)
                ))
            }
        };
    }

    Ok(current)
}

fn describe(path: &[String]) -> String {
    if path.is_empty() {
        "data".to_string()
    } else {
        format!(".{}", path.join("."))
    }
}

/// Formats a value printed directly by a directive.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        // Arrays and objects print as JSON
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::super::functions::FunctionRegistry;
    use super::super::parser::parse;
    use super::*;
    use serde_json::json;

    fn run(source: &str, data: &Value) -> Result<String> {
        parse(source, &FunctionRegistry::standard())?.execute(data, &RenderContext::new("etime"))
    }

    fn exec_message(source: &str, data: &Value) -> String {
        match run(source, data).unwrap_err() {
            RenderError::Execution { message, .. } => message,
            other => panic!("expected an execution error, got {:?}", other),
        }
    }

    #[test]
    fn test_literal_text_passthrough() {
        assert_eq!(run("plain text", &Value::Null).unwrap(), "plain text");
    }

    #[test]
    fn test_bold_directive() {
        assert_eq!(
            run("Hello {{ Bold \"World\" }}", &Value::Null).unwrap(),
            "Hello \x1b[1mWorld\x1b[0m"
        );
    }

    #[test]
    fn test_command_name() {
        assert_eq!(
            run("$ {{ CommandName }} sleep 12", &Value::Null).unwrap(),
            "$ etime sleep 12"
        );
    }

    #[test]
    fn test_measurement_line_from_fields() {
        let data = json!({"real": "12.00", "watts": 9.53, "sure": 0.615});
        let output = run(
            "{{ Time .real 14 }} real\n{{ Value .watts 14 }} watt {{ Percent .sure 10 }}% sure",
            &data,
        )
        .unwrap();
        assert_eq!(
            output,
            "         12.00 real\n          9.53 watt       61.5% sure"
        );
    }

    #[test]
    fn test_nested_field_and_print() {
        let data = json!({"device": {"name": "plug-1", "id": 7, "on": true}});
        assert_eq!(
            run("{{ .device.name }}#{{ .device.id }} {{ .device.on }}", &data).unwrap(),
            "plug-1#7 true"
        );
    }

    #[test]
    fn test_print_dot_and_null() {
        assert_eq!(run("[{{ . }}]", &Value::Null).unwrap(), "[]");
        assert_eq!(run("{{ . }}", &json!("body")).unwrap(), "body");
        assert_eq!(run("{{ .items }}", &json!({"items": [1, 2]})).unwrap(), "[1,2]");
    }

    #[test]
    fn test_bold_of_command_name() {
        assert_eq!(
            run("{{ Bold CommandName }}", &Value::Null).unwrap(),
            "\x1b[1metime\x1b[0m"
        );
    }

    #[test]
    fn test_missing_field_fails() {
        assert_eq!(
            exec_message("{{ .missing }}", &json!({"present": 1})),
            "no field \"missing\" in data"
        );
        assert_eq!(
            exec_message("{{ .a.b }}", &json!({"a": {}})),
            "no field \"b\" in .a"
        );
    }

    #[test]
    fn test_field_on_nil_data_fails() {
        assert!(exec_message("{{ .Name }}", &Value::Null).contains("nil data"));
    }

    #[test]
    fn test_field_on_scalar_fails() {
        assert_eq!(
            exec_message("{{ .a.b }}", &json!({"a": 3})),
            "can't evaluate field b in type number"
        );
    }

    #[test]
    fn test_wrong_argument_type_fails() {
        let err = run("{{ Value .name 6 }}", &json!({"name": "x"})).unwrap_err();
        assert!(err.is_execution());
        assert!(err.to_string().contains("expected number, got string"));
    }

    #[test]
    fn test_failure_discards_partial_output() {
        let err = run("kept? {{ Bold \"yes\" }} {{ .nope }} tail", &json!({})).unwrap_err();
        assert!(matches!(err, RenderError::Execution { line: 1, .. }));
    }

    #[test]
    fn test_execution_error_line() {
        let err = run("a\nb\n{{ Time 5 4 }}", &Value::Null).unwrap_err();
        assert!(matches!(err, RenderError::Execution { line: 3, .. }));
    }
}
