//! Outline menu addressing and dispatch.
//!
//! This crate bundles [`treeline_path`] (turning addresses into requests)
//! and [`treeline_dispatch`] (running requests against menu handlers), and
//! adds the configuration file and command line used by the `treeline`
//! binary.
//!
//! ```rust
//! use treeline::{parse, Dispatcher, HandlerRegistry, InvokeOptions, MenuHandler};
//!
//! let registry = HandlerRegistry::new().register("todo", |_code| {
//!     Ok(MenuHandler::new("todo").action("add", |args, _ctx| Ok(args.join(", "))))
//! });
//! let request = parse("todo/add/milk/");
//! let name = request.name.as_deref().unwrap();
//!
//! let out = Dispatcher::new(registry)
//!     .invoke_named(name, &request.items, &InvokeOptions::new())
//!     .unwrap();
//! assert_eq!(out.text, "milk");
//! ```

pub mod cli;
pub mod config;

pub use config::{ConfigError, TreelineConfig, CONFIG_ENV};
pub use treeline_dispatch::*;
pub use treeline_path::*;
