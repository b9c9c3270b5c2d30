//! The dispatch state machine.
//!
//! [`Dispatcher::invoke`] runs one request through a fixed sequence of
//! phases. The first phase that produces final text ends the run.
//!
//! ```text
//! LoadHandler          re-resolve through the evaluator (when always_reload)
//! BeforeHook           Some(text) answers the request; errors become a report
//! LoadMenuSource       MENU text, else the sibling menu file
//! RouteMenuSource      children(), falling back to dotify()
//! HiddenMenuOverride   MENU_HIDDEN's dotify() replaces the flags
//! ResolveAction        actionify(args, flags)
//! MenulessMode         without a menu: list actions, or force-route the first arg
//! InvokeAction         call the action; errors become a report
//! AfterHook            Some(text) replaces the text; errors become a report
//! ```
//!
//! Hook and action failures (including panics) never escape: they are
//! rendered into an [`ExceptionReport`] and returned as the text. Only
//! failures with nothing to render are returned as [`DispatchError`].

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use treeline_path::Request;

use crate::action::{actionify, ActionCall};
use crate::error::DispatchError;
use crate::evaluate::Evaluator;
use crate::handler::{ActionContext, ActionFn, MenuHandler};
use crate::hooks::Phase;
use crate::normalize::{OutlineNormalizer, ValueNormalizer};
use crate::options::{DispatchConfig, InvokeOptions};
use crate::report::{ExceptionReport, OutlineReportRenderer, ReportRenderer};
use crate::router::{MenuRouter, OutlineRouter, NO_CHILDREN};
use crate::text::tidy;

/// Action names hook failures are reported under.
const BEFORE_HOOK: &str = "menu_before";
const AFTER_HOOK: &str = "menu_after";

/// The outcome of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// The final text: menu output, action output, or a rendered report.
    pub text: String,
    /// Set when `text` is a rendered exception report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionReport>,
    /// Incidental output written through the `ActionContext`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub output: String,
}

impl Invocation {
    fn from_text(text: String, ctx: &mut ActionContext) -> Self {
        Self {
            text,
            exception: None,
            output: ctx.take_output(),
        }
    }

    /// Returns true if the text is an exception report.
    pub fn is_exception(&self) -> bool {
        self.exception.is_some()
    }
}

/// Runs menu handlers.
///
/// The collaborators are shared, so a dispatcher can be cloned cheaply and
/// used from several threads as long as the evaluator allows it.
///
/// ```rust
/// use treeline_dispatch::{Dispatcher, HandlerRegistry, InvokeOptions, MenuHandler};
///
/// let registry = HandlerRegistry::new().register("Todo", |_code| {
///     Ok(MenuHandler::new("Todo")
///         .action("add", |args, _ctx| Ok(format!("added {}\n", args.join(", "))))
///         .action("list", |_args, _ctx| Ok(vec!["milk", "eggs"])))
/// });
/// let dispatcher = Dispatcher::new(registry);
/// let todo = MenuHandler::new("Todo");
///
/// let listing = dispatcher.invoke(&todo, &[], &InvokeOptions::new()).unwrap();
/// assert_eq!(listing.text, "+ add/\n+ list/\n");
///
/// let args = vec!["add".to_string(), "milk".to_string()];
/// let added = dispatcher.invoke(&todo, &args, &InvokeOptions::new()).unwrap();
/// assert_eq!(added.text, "added milk\n");
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    evaluator: Arc<dyn Evaluator>,
    router: Arc<dyn MenuRouter>,
    renderer: Arc<dyn ReportRenderer>,
    normalizer: Arc<dyn ValueNormalizer>,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Creates a dispatcher with the outline router, renderer and normalizer.
    pub fn new(evaluator: impl Evaluator + 'static) -> Self {
        Self {
            evaluator: Arc::new(evaluator),
            router: Arc::new(OutlineRouter),
            renderer: Arc::new(OutlineReportRenderer),
            normalizer: Arc::new(OutlineNormalizer),
            config: DispatchConfig::default(),
        }
    }

    /// Replaces the router used for menu sources.
    pub fn with_router(mut self, router: impl MenuRouter + 'static) -> Self {
        self.router = Arc::new(router);
        self
    }

    /// Replaces the renderer that draws error reports.
    pub fn with_renderer(mut self, renderer: impl ReportRenderer + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    /// Replaces the normalizer applied to action return values.
    pub fn with_normalizer(mut self, normalizer: impl ValueNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// Sets the dispatch policy.
    pub fn with_config(mut self, config: DispatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The dispatch policy in effect.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Runs `handler` with `args`.
    ///
    /// With `always_reload` set (the default) the handler is resolved again
    /// through the evaluator by name and the passed value only supplies the
    /// name. Otherwise it is used as given.
    pub fn invoke(
        &self,
        handler: &MenuHandler,
        args: &[String],
        options: &InvokeOptions,
    ) -> Result<Invocation, DispatchError> {
        let span = tracing::debug_span!("invoke", handler = handler.name(), args = args.len());
        let _enter = span.enter();

        let handler = if self.config.always_reload {
            Cow::Owned(self.load(handler.name(), options)?)
        } else {
            tracing::trace!("reload disabled, using handler as given");
            Cow::Borrowed(handler)
        };
        self.dispatch(&handler, args, options)
    }

    /// Loads the handler called `name` and runs it with `args`.
    pub fn invoke_named(
        &self,
        name: &str,
        args: &[String],
        options: &InvokeOptions,
    ) -> Result<Invocation, DispatchError> {
        let span = tracing::debug_span!("invoke", handler = name, args = args.len());
        let _enter = span.enter();

        let handler = self.load(name, options)?;
        self.dispatch(&handler, args, options)
    }

    /// Runs `handler` with the request's items as args.
    pub fn invoke_request(
        &self,
        handler: &MenuHandler,
        request: &Request,
        options: &InvokeOptions,
    ) -> Result<Invocation, DispatchError> {
        self.invoke(handler, &request.items, options)
    }

    fn load(&self, name: &str, options: &InvokeOptions) -> Result<MenuHandler, DispatchError> {
        tracing::trace!(phase = %Phase::LoadHandler, "loading handler");
        match self.evaluator.load(name, options) {
            Ok(Some(handler)) => Ok(handler),
            Ok(None) => Err(DispatchError::HandlerNotFound {
                handler: name.to_string(),
            }),
            Err(e) => Err(DispatchError::load(name, e)),
        }
    }

    fn dispatch(
        &self,
        handler: &MenuHandler,
        args: &[String],
        options: &InvokeOptions,
    ) -> Result<Invocation, DispatchError> {
        let name = handler.name();
        let mut ctx = ActionContext::new(name, options.clone());

        if let Some(hook) = handler.before_hook() {
            tracing::trace!(phase = %Phase::BeforeHook, "calling before-hook");
            ctx.action = BEFORE_HOOK.to_string();
            match call_guarded(|| hook(args, &mut ctx)) {
                Err(err) => {
                    return Ok(self.report(name, Phase::BeforeHook, BEFORE_HOOK, args, &err, &mut ctx))
                }
                Ok(Some(text)) => {
                    tracing::debug!("before-hook answered the request");
                    return Ok(Invocation::from_text(tidy(text), &mut ctx));
                }
                Ok(None) => {}
            }
        }

        let source = self.menu_source(handler, options)?;
        let mut menu_found = source.is_some();

        let mut txt: Option<String> = None;
        let mut flags = vec![false; args.len()];

        if let Some(source) = &source {
            tracing::trace!(phase = %Phase::RouteMenuSource, "routing through menu");
            match self.router.children(source, args) {
                Some(children) if children != NO_CHILDREN => txt = Some(children),
                _ => flags = self.router.dotify(source, args),
            }
        }

        if txt.is_none() {
            if let Some(hidden) = handler.hidden_menu_text() {
                tracing::trace!(phase = %Phase::HiddenMenuOverride, "routing through hidden menu");
                flags = self.router.dotify(&tidy(hidden.to_string()), args);
                menu_found |= flags.contains(&true);
            }
        }

        if txt.is_none() {
            let mut call = actionify(args, &flags);
            tracing::trace!(phase = %Phase::ResolveAction, action = %call.action, "resolved action");

            let mut target = self.find_action(handler, &call.action, options.instance_method);
            if target.is_none() && !menu_found {
                if args.is_empty() {
                    txt = Some(self.listing(handler));
                } else {
                    let mut forced = vec![false; args.len()];
                    forced[0] = true;
                    call = actionify(args, &forced);
                    tracing::debug!(
                        phase = %Phase::MenulessMode,
                        action = %call.action,
                        "force-routing first arg as action"
                    );
                    target = self.find_action(handler, &call.action, options.instance_method);
                }
            }

            if txt.is_none() {
                let Some(action) = target else {
                    return Err(DispatchError::NoAction {
                        handler: name.to_string(),
                        action: call.action,
                    });
                };
                match self.call_action(&action, &call, &mut ctx) {
                    Ok(text) => txt = Some(text),
                    Err(err) => {
                        return Ok(self.report(
                            name,
                            Phase::InvokeAction,
                            &call.action,
                            &call.variables,
                            &err,
                            &mut ctx,
                        ))
                    }
                }
            }
        }

        let mut txt = txt.unwrap_or_default();

        if let Some(hook) = handler.after_hook() {
            tracing::trace!(phase = %Phase::AfterHook, "calling after-hook");
            ctx.action = AFTER_HOOK.to_string();
            match call_guarded(|| hook(&txt, args, &mut ctx)) {
                Err(err) => {
                    let mut hook_args = Vec::with_capacity(args.len() + 1);
                    hook_args.push(txt.clone());
                    hook_args.extend_from_slice(args);
                    return Ok(self.report(
                        name,
                        Phase::AfterHook,
                        AFTER_HOOK,
                        &hook_args,
                        &err,
                        &mut ctx,
                    ));
                }
                Ok(Some(replaced)) => txt = tidy(replaced),
                Ok(None) => {}
            }
        }

        let invocation = Invocation::from_text(txt, &mut ctx);
        if !invocation.output.is_empty() {
            tracing::debug!(output = %invocation.output, "captured incidental output");
        }
        Ok(invocation)
    }

    /// `MENU` text, else the sibling menu file. First found wins.
    fn menu_source(
        &self,
        handler: &MenuHandler,
        options: &InvokeOptions,
    ) -> Result<Option<String>, DispatchError> {
        if let Some(text) = handler.menu_text() {
            tracing::trace!(phase = %Phase::LoadMenuSource, "using MENU text");
            return Ok(Some(tidy(text.to_string())));
        }

        let path = handler
            .menu_file_path()
            .map(|p| p.as_path())
            .or(options.dot_menu_file.as_deref());
        match path {
            Some(path) => read_menu_file(path),
            None => Ok(None),
        }
    }

    /// Looks an action up on the handler or on a fresh instance.
    ///
    /// Class-level actions come first unless `instance_method` forces the
    /// instance.
    fn find_action(&self, handler: &MenuHandler, action: &str, instance_method: bool) -> Option<ActionFn> {
        if !instance_method {
            if let Some(found) = handler.action_table().get(action) {
                return Some(found.clone());
            }
        }
        handler
            .new_instance()
            .and_then(|table| table.get(action).cloned())
    }

    /// One `+ name/` line per action, sorted.
    ///
    /// Falls back to instance-level actions when the handler has no
    /// class-level ones.
    fn listing(&self, handler: &MenuHandler) -> String {
        let mut names: Vec<String> = handler
            .action_table()
            .names()
            .into_iter()
            .map(String::from)
            .collect();
        if names.is_empty() {
            tracing::debug!(phase = %Phase::MenulessMode, "listing instance actions");
            names = handler.instance_action_names();
        }
        names.sort();
        names.iter().map(|n| format!("+ {n}/\n")).collect()
    }

    fn call_action(
        &self,
        action: &ActionFn,
        call: &ActionCall,
        ctx: &mut ActionContext,
    ) -> anyhow::Result<String> {
        tracing::debug!(phase = %Phase::InvokeAction, action = %call.action, "calling action");
        ctx.action = call.action.clone();
        let value = call_guarded(|| action(&call.variables, ctx))?;
        Ok(tidy(self.normalizer.to_text(value)))
    }

    fn report(
        &self,
        handler: &str,
        phase: Phase,
        action: &str,
        args: &[String],
        err: &anyhow::Error,
        ctx: &mut ActionContext,
    ) -> Invocation {
        tracing::warn!(handler, %phase, action, error = %err, "menu call failed");
        let report = ExceptionReport::from_error(handler, phase, action, args, err);
        Invocation {
            text: self.renderer.render(&report),
            exception: Some(report),
            output: ctx.take_output(),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn read_menu_file(path: &Path) -> Result<Option<String>, DispatchError> {
    if !path.is_file() {
        tracing::trace!(path = %path.display(), "no menu file");
        return Ok(None);
    }
    tracing::trace!(phase = %Phase::LoadMenuSource, path = %path.display(), "reading menu file");
    std::fs::read_to_string(path)
        .map(|text| Some(tidy(text)))
        .map_err(|source| DispatchError::MenuFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Runs a user callable, turning a panic into an error.
fn call_guarded<T>(f: impl FnOnce() -> anyhow::Result<T>) -> anyhow::Result<T> {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(result) => result,
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Err(anyhow::anyhow!("panicked: {message}"))
        }
    }
}
