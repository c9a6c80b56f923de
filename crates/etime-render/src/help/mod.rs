//! The etime help text.
//!
//! [`HELP_TEMPLATE`] is the usage text shown by `etime --help`. It only uses
//! `Bold` and `CommandName`, so it needs no data.
//!
//! [`render_help`] renders it (or a custom template from [`HelpConfig`]) and
//! never fails: if the template does not render, the sanitized source is
//! returned instead, so the user always sees something readable.
//!
//! ```rust
//! use etime_render::help::{render_help, HelpConfig};
//!
//! let help = render_help(Some(HelpConfig::default().program_name("etime")));
//! assert!(help.as_str().starts_with("Measure the time and energy"));
//! assert!(help.as_str().contains("  etime [flags] <command> [args]"));
//! ```

mod config;
mod render;

pub use config::HelpConfig;
pub use render::{
    print_help, render_help, render_or_sanitize, write_help, HelpText, TextOrigin,
};

/// Usage text for etime.
pub const HELP_TEMPLATE: &str = include_str!("template.txt");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_template;

    #[test]
    fn test_bundled_template_is_valid() {
        validate_template(HELP_TEMPLATE).unwrap();
    }

    #[test]
    fn test_bundled_template_renders() {
        let help = render_help(Some(HelpConfig::default().program_name("etime")));
        assert!(!help.is_fallback());
        assert!(help.as_str().contains("\x1b[1mUSAGE\x1b[0m\n  etime [flags]"));
        assert!(help.as_str().contains("  $ etime sleep 12\n"));
        assert!(help.as_str().contains("61.5% sure"));
    }
}
