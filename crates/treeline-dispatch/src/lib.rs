//! Dispatch of menu requests to handlers.
//!
//! A [`MenuHandler`] describes a menu source: hooks, optional menu text, and
//! named actions. The [`Dispatcher`] takes a handler and the args from a
//! parsed address and walks them through a fixed set of phases (see
//! [`Phase`]) until one of them produces the text to show.
//!
//! # Collaborators
//!
//! The dispatcher leans on four pluggable pieces:
//!
//! - [`Evaluator`]: (re)loads handlers by name. [`HandlerRegistry`] is the
//!   in-process implementation.
//! - [`MenuRouter`]: answers what lies under a path in menu text and which
//!   args name actions. [`OutlineRouter`] is the default.
//! - [`ReportRenderer`]: turns a failure into text.
//! - [`ValueNormalizer`]: turns an action's return value into text.
//!
//! # Example
//!
//! ```rust
//! use treeline_dispatch::{Dispatcher, HandlerRegistry, InvokeOptions, MenuHandler};
//!
//! let registry = HandlerRegistry::new().register("Docs", |_code| {
//!     Ok(MenuHandler::new("Docs")
//!         .menu("- intro/\n  - hello/\n- .open/\n")
//!         .action("open", |args, _ctx| Ok(format!("opening {:?}\n", args))))
//! });
//! let dispatcher = Dispatcher::new(registry);
//! let opts = InvokeOptions::new();
//!
//! let out = dispatcher.invoke_named("Docs", &["intro".to_string()], &opts).unwrap();
//! assert_eq!(out.text, "- hello/\n");
//!
//! let out = dispatcher.invoke_named("Docs", &["open".to_string(), "x".to_string()], &opts).unwrap();
//! assert_eq!(out.text, "opening [\"x\"]\n");
//! ```

mod action;
mod dispatch;
mod error;
mod evaluate;
mod handler;
mod hooks;
mod normalize;
mod options;
mod output;
mod report;
mod router;
mod serialize;
mod text;

pub use action::{actionify, normalize_action, ActionCall, DEFAULT_ACTION};
pub use dispatch::{Dispatcher, Invocation};
pub use error::DispatchError;
pub use evaluate::{Evaluator, HandlerFactory, HandlerRegistry};
pub use handler::{ActionContext, ActionFn, ActionTable, InstanceFactory, MenuHandler};
pub use hooks::{AfterHookFn, BeforeHookFn, Phase};
pub use normalize::{OutlineNormalizer, ValueNormalizer};
pub use options::{DispatchConfig, InvokeOptions};
pub use output::{OutputMode, UnknownOutputMode};
pub use report::{ExceptionReport, OutlineReportRenderer, ReportRenderer};
pub use router::{MenuRouter, NoRouting, OutlineRouter, NO_CHILDREN};
pub use serialize::{serialize_structured, SerializeError};
pub use text::{tidy, unindent};
