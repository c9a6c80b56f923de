//! # etime-render - Help Text Templates With a Plain-Text Fallback
//!
//! `etime-render` turns template strings into terminal text for the `etime`
//! command (which measures the time and energy a command uses), and makes sure
//! the user sees readable text even when a template is broken.
//!
//! ## Core Concepts
//!
//! - [`render`]: parse a template and execute it against serializable data
//! - [`sanitize`]: the fallback, turning a raw template into readable text
//! - [`RenderContext`]: process information such as the program name
//! - [`DirectiveEngine`]: compile templates once, render them many times
//! - [`help`]: the bundled usage text and the render-or-sanitize flow
//!
//! ## Template Syntax
//!
//! Literal text is copied as-is. Directives call one of five functions:
//!
//! | Directive | Output |
//! |-----------|--------|
//! | `{{ Bold "text" }}` | `ESC[1m` text `ESC[0m` |
//! | `{{ CommandName }}` | the program name |
//! | `{{ Percent ratio width }}` | `ratio * 100`, one decimal, right-justified |
//! | `{{ Time "text" width }}` | text, right-justified |
//! | `{{ Value number width }}` | two decimals, right-justified |
//!
//! Arguments are string literals, numbers, or fields of the data (`.name`,
//! `.device.id`).
//!
//! ## Quick Start
//!
//! ```rust
//! use etime_render::{render, RenderContext};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Energy {
//!     watts: f64,
//!     sure: f64,
//! }
//!
//! let output = render(
//!     "{{ Value .watts 8 }} watt {{ Percent .sure 6 }}% sure",
//!     &Energy { watts: 9.53, sure: 0.615 },
//!     &RenderContext::new("etime"),
//! )
//! .unwrap();
//!
//! assert_eq!(output, "    9.53 watt   61.5% sure");
//! ```
//!
//! ## Falling Back
//!
//! Rendering is all-or-nothing. When it fails, show the sanitized source:
//!
//! ```rust
//! use etime_render::{render, sanitize, RenderContext};
//!
//! let template = "{{ Bold \"USAGE\" }}\n  {{ CommandName }} {{ Missing }}";
//! let text = render(template, &(), &RenderContext::new("etime"))
//!     .unwrap_or_else(|_| sanitize(template));
//!
//! assert_eq!(text, "USAGE\n  {{ CommandName }} {{ Missing }}");
//! ```
//!
//! [`help::render_help`] packages this pattern for the etime usage text.

pub mod context;
mod error;
pub mod fallback;
pub mod help;
pub mod template;
mod util;

// Error type
pub use error::{RenderError, Result};

pub use context::RenderContext;
pub use fallback::sanitize;

// Render module exports
pub use template::functions::{bold, percent, time, value, MAX_WIDTH};
pub use template::{
    render, validate_template, CompiledTemplate, DirectiveEngine, Function, FunctionRegistry,
    ParamKind, TemplateEngine,
};

// Utility exports
pub use util::justify;
