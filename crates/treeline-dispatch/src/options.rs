//! Invocation options and dispatch policy.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Per-call options passed to [`Dispatcher::invoke`](crate::Dispatcher::invoke).
///
/// ```rust
/// use treeline_dispatch::InvokeOptions;
///
/// let opts = InvokeOptions::new()
///     .clazz_name("Foo")
///     .dot_menu_file("/menus/foo.menu")
///     .instance_method(true);
/// assert_eq!(opts.clazz_name.as_deref(), Some("Foo"));
/// assert!(opts.instance_method);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvokeOptions {
    /// Source text handed to the evaluator on (re)load.
    pub code: Option<String>,
    /// Name to resolve after loading, when it differs from the handler's own.
    pub clazz_name: Option<String>,
    /// Candidate sibling menu file.
    pub dot_menu_file: Option<PathBuf>,
    /// Dispatch actions on a fresh instance rather than the handler itself.
    pub instance_method: bool,
}

impl InvokeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn clazz_name(mut self, name: impl Into<String>) -> Self {
        self.clazz_name = Some(name.into());
        self
    }

    pub fn dot_menu_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dot_menu_file = Some(path.into());
        self
    }

    pub fn instance_method(mut self, enabled: bool) -> Self {
        self.instance_method = enabled;
        self
    }
}

/// Dispatcher-wide policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Reload the handler through the evaluator on every call.
    ///
    /// When false, the handler passed to `invoke` is used as-is.
    pub always_reload: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            always_reload: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_config_defaults_to_reload() {
        assert!(DispatchConfig::default().always_reload);
        let parsed: DispatchConfig = serde_yaml::from_str("{}").unwrap();
        assert!(parsed.always_reload);
        let parsed: DispatchConfig = serde_yaml::from_str("always_reload: false").unwrap();
        assert!(!parsed.always_reload);
    }

    #[test]
    fn test_invoke_options_from_yaml() {
        let opts: InvokeOptions =
            serde_yaml::from_str("clazz_name: Foo\ninstance_method: true\n").unwrap();
        assert_eq!(opts, InvokeOptions::new().clazz_name("Foo").instance_method(true));
    }
}
