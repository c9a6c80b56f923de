//! Directive templates: parsing, the function registry and execution.
//!
//! A template is literal text with `{{ ... }}` directives. Each directive calls
//! one of a fixed set of formatting functions or prints a field of the data:
//!
//! ```text
//! {{ Bold "USAGE" }}
//!   {{ CommandName }} [flags] <command> [args]
//!
//! {{ Time .real 14 }} real  {{ Value .watts 14 }} watt  {{ Percent .sure 5 }}% sure
//! ```
//!
//! Rendering happens in two steps. Parsing resolves function names and checks
//! argument counts; execution resolves fields and checks argument types.
//! Either step can fail, and a failed render never yields partial text.
//!
//! There are no loops, conditionals or includes.
//!
//! ## Key Types
//!
//! - [`DirectiveEngine`]: compiles and renders templates, optionally by name
//! - [`FunctionRegistry`] and [`Function`]: the callable functions
//! - [`CompiledTemplate`]: a parsed template
//!
//! ## See Also
//!
//! - [`crate::fallback`]: what to show when rendering fails
//! - [`crate::help`]: the etime help text built on both

mod engine;
mod exec;
pub mod functions;
mod parser;

use serde::Serialize;

pub use engine::{DirectiveEngine, TemplateEngine};
pub use functions::{Function, FunctionRegistry, ParamKind};
pub use parser::CompiledTemplate;

use crate::context::RenderContext;
use crate::error::Result;

/// Renders a template with the standard functions.
///
/// `data` is serialized to a JSON value first; fields referenced as `.name`
/// are looked up in it. Pass `&()` for templates that use no fields.
///
/// # Example
///
/// ```rust
/// use etime_render::{render, RenderContext};
///
/// let output = render("Hello {{ Bold \"World\" }}", &(), &RenderContext::new("etime")).unwrap();
/// assert_eq!(output, "Hello \x1b[1mWorld\x1b[0m");
/// ```
pub fn render<T: Serialize + ?Sized>(
    template: &str,
    data: &T,
    context: &RenderContext,
) -> Result<String> {
    let data = serde_json::to_value(data)?;
    DirectiveEngine::new(context.clone()).render_template(template, &data)
}

/// Checks that a template parses, without executing it.
///
/// Useful in tests to catch unknown functions or wrong argument counts
/// before the template is ever shown to a user. Field references cannot be
/// checked this way since they depend on the data.
///
/// ```rust
/// use etime_render::validate_template;
///
/// assert!(validate_template("{{ Bold \"ok\" }}").is_ok());
/// assert!(validate_template("{{ Bold }}").is_err());
/// ```
pub fn validate_template(template: &str) -> Result<()> {
    parser::parse(template, &FunctionRegistry::standard()).map(|_| ())
}
