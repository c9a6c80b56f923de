//! Render-time information that does not come from the template data.
//!
//! Directives such as `CommandName` need values that belong to the running
//! process rather than to the body passed to [`render`](crate::render). Those
//! values are collected in a [`RenderContext`] and handed to the renderer
//! explicitly, so rendering stays a pure function of its inputs.

/// Information available to template functions at render time.
///
/// # Example
///
/// ```rust
/// use etime_render::{render, RenderContext};
///
/// let context = RenderContext::new("etime");
/// let output = render("usage: {{ CommandName }} <command>", &(), &context).unwrap();
/// assert_eq!(output, "usage: etime <command>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    program_name: String,
}

impl RenderContext {
    /// Creates a context with an explicit program display name.
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
        }
    }

    /// Creates a context from the running process.
    ///
    /// The program name is `argv[0]` exactly as the process was invoked
    /// (`./etime`, `/usr/local/bin/etime`, ...). Non UTF-8 names are converted
    /// lossily; a process without an `argv[0]` gets an empty name.
    pub fn from_env() -> Self {
        let program_name = std::env::args_os()
            .next()
            .map(|arg| arg.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { program_name }
    }

    /// The name returned by the `CommandName` function.
    pub fn program_name(&self) -> &str {
        &self.program_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_program_name() {
        let ctx = RenderContext::new("./etime");
        assert_eq!(ctx.program_name(), "./etime");
    }

    #[test]
    fn test_from_env_uses_argv0() {
        let expected = std::env::args().next().unwrap_or_default();
        assert_eq!(RenderContext::from_env().program_name(), expected);
    }
}
