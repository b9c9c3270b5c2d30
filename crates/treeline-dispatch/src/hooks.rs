//! Dispatch phases and the hook signatures that run at their edges.
//!
//! # Pipeline Position
//!
//! ```text
//! handler (re)load
//!   → BEFORE HOOK ← (may answer the whole request)
//!   → menu source lookup and routing
//!   → action resolution (or menuless listing)
//!   → action call
//!   → AFTER HOOK ← (may replace the text)
//! ```
//!
//! A before-hook that returns `Some(text)` short-circuits: nothing after it
//! runs, including the after-hook. An after-hook that returns `None` leaves
//! the text as it was. Errors from either become an exception report.

use std::fmt;
use std::sync::Arc;

use crate::handler::ActionContext;

/// The phases of one invocation, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Re-resolve the handler through the evaluator.
    LoadHandler,
    /// The handler's before-hook.
    BeforeHook,
    /// Find the `MENU` text or the sibling menu file.
    LoadMenuSource,
    /// Route the arguments through the menu source.
    RouteMenuSource,
    /// Route through `MENU_HIDDEN`, overriding the public menu's routing.
    HiddenMenuOverride,
    /// Pick the action and variables.
    ResolveAction,
    /// No menu source and no matching action: list actions or force-route.
    MenulessMode,
    /// Call the action.
    InvokeAction,
    /// The handler's after-hook.
    AfterHook,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::LoadHandler => "load-handler",
            Phase::BeforeHook => "before-hook",
            Phase::LoadMenuSource => "load-menu-source",
            Phase::RouteMenuSource => "route-menu-source",
            Phase::HiddenMenuOverride => "hidden-menu-override",
            Phase::ResolveAction => "resolve-action",
            Phase::MenulessMode => "menuless-mode",
            Phase::InvokeAction => "invoke-action",
            Phase::AfterHook => "after-hook",
        };
        f.write_str(name)
    }
}

/// Before-hook: receives the original args. `Some(text)` answers the request.
pub type BeforeHookFn =
    Arc<dyn Fn(&[String], &mut ActionContext) -> anyhow::Result<Option<String>> + Send + Sync>;

/// After-hook: receives the current text and the original args.
/// `Some(text)` replaces the text.
pub type AfterHookFn = Arc<
    dyn Fn(&str, &[String], &mut ActionContext) -> anyhow::Result<Option<String>> + Send + Sync,
>;
