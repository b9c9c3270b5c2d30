//! Menu handler descriptors.
//!
//! A [`MenuHandler`] is an explicit registry of everything a menu source
//! exposes: optional hooks, optional menu text, an optional sibling menu
//! file, and a table of named actions. Lookups are plain map queries that
//! answer present or absent; nothing is probed by attempting a call.
//!
//! # Class-level and instance-level actions
//!
//! Actions registered with [`MenuHandler::action`] are called on the handler
//! itself. A handler may also register an instance factory with
//! [`MenuHandler::instance`]: every call that dispatches in instance mode
//! builds a fresh [`ActionTable`] from it, so per-instance state never
//! outlives one invocation.
//!
//! ```rust
//! use treeline_dispatch::{ActionTable, MenuHandler};
//!
//! let handler = MenuHandler::new("Todo")
//!     .menu("- .add/\n- .list/\n")
//!     .action("add", |args, _ctx| Ok(format!("added {}\n", args.join(" "))))
//!     .action("list", |_args, _ctx| Ok(vec!["milk", "eggs"]))
//!     .instance(|| ActionTable::new().action("count", |_a, _c| Ok(2)));
//!
//! assert!(handler.has_action("add"));
//! assert!(!handler.has_action("count"));
//! assert_eq!(handler.instance_action_names(), vec!["count"]);
//! ```

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::hooks::{AfterHookFn, BeforeHookFn};
use crate::options::InvokeOptions;

/// A callable action. Returns a value that is normalized to text.
pub type ActionFn =
    Arc<dyn Fn(&[String], &mut ActionContext) -> anyhow::Result<Value> + Send + Sync>;

/// Builds a fresh table of instance-level actions.
pub type InstanceFactory = Arc<dyn Fn() -> ActionTable + Send + Sync>;

/// State handed to actions and hooks for one call.
///
/// Anything written with [`print`](Self::print) is captured as incidental
/// output, kept apart from the returned text.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// The handler being invoked.
    pub handler: String,
    /// The action being called (or the hook's name).
    pub action: String,
    /// The options the invocation was started with.
    pub options: InvokeOptions,
    output: String,
}

impl ActionContext {
    /// Creates a context for `handler`.
    pub fn new(handler: impl Into<String>, options: InvokeOptions) -> Self {
        Self {
            handler: handler.into(),
            action: String::new(),
            options,
            output: String::new(),
        }
    }

    /// Appends to the incidental output.
    pub fn print(&mut self, text: impl AsRef<str>) {
        self.output.push_str(text.as_ref());
    }

    /// Appends a line to the incidental output.
    pub fn println(&mut self, text: impl AsRef<str>) {
        self.output.push_str(text.as_ref());
        self.output.push('\n');
    }

    /// The incidental output captured so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    pub(crate) fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

/// Named actions, sorted by name.
#[derive(Clone, Default)]
pub struct ActionTable {
    actions: BTreeMap<String, ActionFn>,
}

impl ActionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action, builder style.
    ///
    /// The closure may return anything convertible into a JSON value:
    /// strings, numbers, `Vec`s, `Option`s, `()` or a `Value` itself.
    pub fn action<F, R>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[String], &mut ActionContext) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.insert(name, f);
        self
    }

    /// Registers an action, replacing any previous one with the same name.
    pub fn insert<F, R>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&[String], &mut ActionContext) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        let action: ActionFn = Arc::new(move |args: &[String], ctx: &mut ActionContext| {
            f(args, ctx).map(Into::into)
        });
        self.actions.insert(name.into(), action);
    }

    /// Looks up an action by name.
    pub fn get(&self, name: &str) -> Option<&ActionFn> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Action names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.actions.keys()).finish()
    }
}

/// Everything a menu source exposes to the dispatcher.
#[derive(Clone)]
pub struct MenuHandler {
    name: String,
    before: Option<BeforeHookFn>,
    after: Option<AfterHookFn>,
    menu: Option<String>,
    menu_hidden: Option<String>,
    menu_file: Option<PathBuf>,
    actions: ActionTable,
    instance: Option<InstanceFactory>,
}

impl MenuHandler {
    /// Creates an empty handler.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            before: None,
            after: None,
            menu: None,
            menu_hidden: None,
            menu_file: None,
            actions: ActionTable::new(),
            instance: None,
        }
    }

    /// Sets the public menu text (`MENU`).
    pub fn menu(mut self, text: impl Into<String>) -> Self {
        self.menu = Some(text.into());
        self
    }

    /// Sets the hidden routing menu (`MENU_HIDDEN`).
    ///
    /// It is never shown, but its routing decides which action runs.
    pub fn menu_hidden(mut self, text: impl Into<String>) -> Self {
        self.menu_hidden = Some(text.into());
        self
    }

    /// Sets the sibling menu file, used when there is no `MENU` text.
    pub fn menu_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.menu_file = Some(path.into());
        self
    }

    /// Registers a class-level action.
    pub fn action<F, R>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[String], &mut ActionContext) -> anyhow::Result<R> + Send + Sync + 'static,
        R: Into<Value>,
    {
        self.actions.insert(name, f);
        self
    }

    /// Replaces the class-level action table.
    pub fn actions(mut self, table: ActionTable) -> Self {
        self.actions = table;
        self
    }

    /// Registers the factory for instance-level actions.
    pub fn instance<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> ActionTable + Send + Sync + 'static,
    {
        let factory: InstanceFactory = Arc::new(factory);
        self.instance = Some(factory);
        self
    }

    /// Sets the before-hook (`menu_before`).
    pub fn before<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], &mut ActionContext) -> anyhow::Result<Option<String>>
            + Send
            + Sync
            + 'static,
    {
        let hook: BeforeHookFn = Arc::new(f);
        self.before = Some(hook);
        self
    }

    /// Sets the after-hook (`menu_after`).
    pub fn after<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &[String], &mut ActionContext) -> anyhow::Result<Option<String>>
            + Send
            + Sync
            + 'static,
    {
        let hook: AfterHookFn = Arc::new(f);
        self.after = Some(hook);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn before_hook(&self) -> Option<&BeforeHookFn> {
        self.before.as_ref()
    }

    pub fn after_hook(&self) -> Option<&AfterHookFn> {
        self.after.as_ref()
    }

    pub fn menu_text(&self) -> Option<&str> {
        self.menu.as_deref()
    }

    pub fn hidden_menu_text(&self) -> Option<&str> {
        self.menu_hidden.as_deref()
    }

    pub fn menu_file_path(&self) -> Option<&PathBuf> {
        self.menu_file.as_ref()
    }

    /// The class-level action table.
    pub fn action_table(&self) -> &ActionTable {
        &self.actions
    }

    /// Returns true if a class-level action with this name exists.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains(name)
    }

    /// Builds a fresh instance-level action table, if the handler has one.
    pub fn new_instance(&self) -> Option<ActionTable> {
        self.instance.as_ref().map(|factory| factory())
    }

    /// Instance-level action names, from a fresh instance.
    pub fn instance_action_names(&self) -> Vec<String> {
        self.new_instance()
            .map(|table| table.names().into_iter().map(String::from).collect())
            .unwrap_or_default()
    }
}

impl fmt::Debug for MenuHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuHandler")
            .field("name", &self.name)
            .field("has_before", &self.before.is_some())
            .field("has_after", &self.after.is_some())
            .field("menu", &self.menu)
            .field("menu_hidden", &self.menu_hidden)
            .field("menu_file", &self.menu_file)
            .field("actions", &self.actions)
            .field("has_instance", &self.instance.is_some())
            .finish()
    }
}
