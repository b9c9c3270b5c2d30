//! Handler (re)loading.
//!
//! The dispatcher never caches a handler between calls: every invocation
//! asks an [`Evaluator`] for a fresh one. [`HandlerRegistry`] is the
//! in-process evaluator, mapping names to factories.

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::MenuHandler;
use crate::options::InvokeOptions;

/// Produces handlers by name.
///
/// Implementations must be safe to call from several threads at once if the
/// dispatcher is shared.
pub trait Evaluator: Send + Sync {
    /// Loads the handler called `handler`.
    ///
    /// `options.code` carries the source to evaluate and
    /// `options.clazz_name`, when set, names what to resolve afterwards.
    /// `Ok(None)` means nothing by that name exists.
    fn load(&self, handler: &str, options: &InvokeOptions) -> anyhow::Result<Option<MenuHandler>>;
}

/// Builds a handler, given the source text from `InvokeOptions::code`.
pub type HandlerFactory =
    Arc<dyn Fn(Option<&str>) -> anyhow::Result<MenuHandler> + Send + Sync>;

/// An evaluator backed by registered factories.
///
/// ```rust
/// use treeline_dispatch::{Evaluator, HandlerRegistry, InvokeOptions, MenuHandler};
///
/// let registry = HandlerRegistry::new()
///     .register("Echo", |_code| Ok(MenuHandler::new("Echo")));
///
/// let handler = registry.load("Echo", &InvokeOptions::new()).unwrap();
/// assert_eq!(handler.unwrap().name(), "Echo");
/// assert!(registry.load("Nope", &InvokeOptions::new()).unwrap().is_none());
/// ```
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    factories: HashMap<String, HandlerFactory>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory. It runs on every load.
    pub fn register<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn(Option<&str>) -> anyhow::Result<MenuHandler> + Send + Sync + 'static,
    {
        let factory: HandlerFactory = Arc::new(factory);
        self.factories.insert(name.into(), factory);
        self
    }

    /// Registers a fixed handler under its own name.
    ///
    /// Each load hands out a clone; the actions inside are shared.
    pub fn register_handler(self, handler: MenuHandler) -> Self {
        let name = handler.name().to_string();
        self.register(name, move |_code| Ok(handler.clone()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Evaluator for HandlerRegistry {
    fn load(&self, handler: &str, options: &InvokeOptions) -> anyhow::Result<Option<MenuHandler>> {
        let key = options.clazz_name.as_deref().unwrap_or(handler);
        match self.factories.get(key) {
            Some(factory) => {
                tracing::trace!(handler, key, "building handler");
                factory(options.code.as_deref()).map(Some)
            }
            None => Ok(None),
        }
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}
