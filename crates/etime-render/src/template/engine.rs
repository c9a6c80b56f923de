//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the seam between callers
//! and the template backend, and [`DirectiveEngine`], the implementation that
//! understands `{{ Function arg... }}` directives.

use std::collections::HashMap;

use tracing::debug;

use super::functions::FunctionRegistry;
use super::parser::{parse, CompiledTemplate};
use crate::context::RenderContext;
use crate::error::{RenderError, Result};

/// A template engine that can render templates with data.
///
/// Template engines handle:
/// - Template compilation and caching
/// - Directive evaluation against serialized data
pub trait TemplateEngine: Send + Sync {
    /// Renders a template string with the given data.
    ///
    /// This compiles and renders the template in one step. For repeated
    /// rendering of the same template, use [`add_template`](Self::add_template)
    /// and [`render_named`](Self::render_named).
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String>;

    /// Adds a named template to the engine.
    ///
    /// The template is compiled immediately, so syntax errors surface here
    /// rather than at render time.
    fn add_template(&mut self, name: &str, source: &str) -> Result<()>;

    /// Renders a previously registered template.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;
}

/// Engine for directive templates.
///
/// Holds the function registry used for parsing and the [`RenderContext`]
/// used by functions such as `CommandName`.
///
/// # Example
///
/// ```rust
/// use etime_render::{DirectiveEngine, RenderContext, TemplateEngine};
/// use serde_json::json;
///
/// let mut engine = DirectiveEngine::new(RenderContext::new("etime"));
/// engine
///     .add_template("energy", "{{ Value .watts 8 }} watt")
///     .unwrap();
///
/// let output = engine.render_named("energy", &json!({"watts": 9.53})).unwrap();
/// assert_eq!(output, "    9.53 watt");
/// ```
#[derive(Debug, Clone)]
pub struct DirectiveEngine {
    registry: FunctionRegistry,
    context: RenderContext,
    templates: HashMap<String, CompiledTemplate>,
}

impl DirectiveEngine {
    /// Creates an engine with the standard function registry.
    pub fn new(context: RenderContext) -> Self {
        Self::with_registry(FunctionRegistry::standard(), context)
    }

    /// Creates an engine that only accepts the functions in `registry`.
    pub fn with_registry(registry: FunctionRegistry, context: RenderContext) -> Self {
        Self {
            registry,
            context,
            templates: HashMap::new(),
        }
    }

    /// Parses `source` without executing it.
    pub fn compile(&self, source: &str) -> Result<CompiledTemplate> {
        let template = parse(source, &self.registry)?;
        debug!(directives = template.directive_count(), "compiled template");
        Ok(template)
    }

    /// The registry used when parsing.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// The context handed to template functions.
    pub fn context(&self) -> &RenderContext {
        &self.context
    }
}

impl TemplateEngine for DirectiveEngine {
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String> {
        self.compile(template)?.execute(data, &self.context)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        let compiled = self.compile(source)?;
        self.templates.insert(name.to_string(), compiled);
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound(name.to_string()))?;
        template.execute(data, &self.context)
    }

    fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::super::functions::Function;
    use super::*;
    use serde_json::json;

    fn engine() -> DirectiveEngine {
        DirectiveEngine::new(RenderContext::new("etime"))
    }

    #[test]
    fn test_render_template() {
        let output = engine()
            .render_template("{{ CommandName }} [flags]", &serde_json::Value::Null)
            .unwrap();
        assert_eq!(output, "etime [flags]");
    }

    #[test]
    fn test_named_template() {
        let mut engine = engine();
        engine.add_template("usage", "{{ Bold \"USAGE\" }}").unwrap();

        assert!(engine.has_template("usage"));
        let output = engine.render_named("usage", &serde_json::Value::Null).unwrap();
        assert_eq!(output, "\x1b[1mUSAGE\x1b[0m");
    }

    #[test]
    fn test_named_template_compiled_once_rendered_many() {
        let mut engine = engine();
        engine.add_template("sure", "{{ Percent .s 5 }}").unwrap();

        assert_eq!(engine.render_named("sure", &json!({"s": 0.5})).unwrap(), " 50.0");
        assert_eq!(engine.render_named("sure", &json!({"s": 1})).unwrap(), "100.0");
    }

    #[test]
    fn test_add_template_rejects_bad_syntax() {
        let mut engine = engine();
        let err = engine.add_template("bad", "{{ Bold }}").unwrap_err();
        assert!(err.is_parse());
        assert!(!engine.has_template("bad"));
    }

    #[test]
    fn test_named_template_not_found() {
        let err = engine()
            .render_named("missing", &serde_json::Value::Null)
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(_)));
    }

    #[test]
    fn test_restricted_registry() {
        let engine = DirectiveEngine::with_registry(
            FunctionRegistry::with_functions([Function::Bold]),
            RenderContext::new("etime"),
        );
        assert!(engine
            .render_template("{{ Bold \"ok\" }}", &serde_json::Value::Null)
            .is_ok());
        assert!(engine
            .render_template("{{ CommandName }}", &serde_json::Value::Null)
            .unwrap_err()
            .is_parse());
    }

    #[test]
    fn test_compile_counts_directives() {
        let compiled = engine().compile("{{ Bold \"a\" }} and {{ CommandName }}").unwrap();
        assert_eq!(compiled.directive_count(), 2);
    }
}
