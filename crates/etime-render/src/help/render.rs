//! Help rendering functions.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, warn};

use super::config::HelpConfig;
use super::HELP_TEMPLATE;
use crate::context::RenderContext;
use crate::error::RenderError;
use crate::fallback::sanitize;
use crate::template::render;

/// Where a [`HelpText`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOrigin {
    /// The template rendered successfully.
    Rendered,
    /// Rendering failed with `error`; the text is the sanitized source.
    Sanitized(RenderError),
}

/// Help text ready to be shown, rendered or sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpText {
    text: String,
    origin: TextOrigin,
}

impl HelpText {
    /// The text, with one leading newline already removed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    pub fn origin(&self) -> &TextOrigin {
        &self.origin
    }

    /// True if the renderer failed and the text is the sanitized source.
    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, TextOrigin::Sanitized(_))
    }
}

impl fmt::Display for HelpText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Renders `template`, falling back to [`sanitize`] on any error.
///
/// Parse and execution failures are treated the same way. A single leading
/// newline is trimmed from the result, so templates can start on the line
/// after their opening quote.
pub fn render_or_sanitize<T: Serialize + ?Sized>(
    template: &str,
    data: &T,
    context: &RenderContext,
) -> HelpText {
    let (text, origin) = match render(template, data, context) {
        Ok(text) => {
            debug!("help template rendered");
            (text, TextOrigin::Rendered)
        }
        Err(err) => {
            warn!(error = %err, "help template failed to render, showing sanitized source");
            (sanitize(template), TextOrigin::Sanitized(err))
        }
    };

    let text = match text.strip_prefix('\n') {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    };
    HelpText { text, origin }
}

/// Renders the help text described by `config`.
///
/// Always returns text: see [`render_or_sanitize`].
pub fn render_help(config: Option<HelpConfig>) -> HelpText {
    let config = config.unwrap_or_default();
    let template = config.template.as_deref().unwrap_or(HELP_TEMPLATE);
    let context = config
        .program_name
        .map(RenderContext::new)
        .unwrap_or_else(RenderContext::from_env);
    let data = config.data.unwrap_or(serde_json::Value::Null);

    render_or_sanitize(template, &data, &context)
}

/// Writes help text to `out` as-is.
pub fn write_help<W: Write>(out: &mut W, help: &HelpText) -> io::Result<()> {
    out.write_all(help.as_str().as_bytes())?;
    out.flush()
}

/// Renders the help described by `config` and writes it to standard error.
pub fn print_help(config: Option<HelpConfig>) -> io::Result<HelpText> {
    let help = render_help(config);
    write_help(&mut io::stderr().lock(), &help)?;
    Ok(help)
}
