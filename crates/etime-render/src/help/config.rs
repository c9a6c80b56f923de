//! Help rendering configuration.

/// Configuration for help rendering.
#[derive(Debug, Clone, Default)]
pub struct HelpConfig {
    /// Custom template string. If None, uses [`HELP_TEMPLATE`](super::HELP_TEMPLATE).
    pub template: Option<String>,
    /// Name returned by `CommandName`. If None, uses the process `argv[0]`.
    pub program_name: Option<String>,
    /// Data for field references. If None, the template gets a null body.
    pub data: Option<serde_json::Value>,
}

impl HelpConfig {
    /// Sets the template source.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the program display name.
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    /// Sets the template data.
    pub fn data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let config = HelpConfig::default();
        assert!(config.template.is_none());
        assert!(config.program_name.is_none());
        assert!(config.data.is_none());
    }

    #[test]
    fn test_builder_methods() {
        let config = HelpConfig::default()
            .template("{{ CommandName }}")
            .program_name("etime")
            .data(serde_json::json!({"a": 1}));
        assert_eq!(config.template.as_deref(), Some("{{ CommandName }}"));
        assert_eq!(config.program_name.as_deref(), Some("etime"));
        assert_eq!(config.data, Some(serde_json::json!({"a": 1})));
    }
}
