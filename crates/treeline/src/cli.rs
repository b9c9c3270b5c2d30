//! The `treeline` command line.
//!
//! Every subcommand returns its output as a string so it can be checked
//! without spawning the binary.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use treeline_dispatch::{
    actionify, serialize_structured, Dispatcher, InvokeOptions, OutputMode,
};
use treeline_path::{
    expand_file_path, parse, parse_nested, parse_with_items, BookmarkMap, NameArg, RealPathEnv,
    Request,
};

use crate::config::TreelineConfig;

/// Parse, expand and dispatch outline menu addresses.
#[derive(Debug, Parser)]
#[command(name = "treeline", version, about)]
pub struct Cli {
    /// Raise logging to debug (`TREELINE_LOG` sets finer filters)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to $TREELINE_CONFIG)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format: text, json, yaml, xml or csv
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Classify an address into its request fields
    Parse(ParseArgs),
    /// Expand a leading ~, ., .. or $bookmark in a file path
    Expand {
        /// The path to expand
        path: String,
    },
    /// Split args into an action name and variables
    Actionify {
        /// Positions (zero-based) that name the action
        #[arg(short, long = "action", value_name = "INDEX")]
        actions: Vec<usize>,
        /// The args
        args: Vec<String>,
    },
    /// Open a configured menu at an address
    Menu {
        /// Address such as `todo/add/milk/`
        address: String,
    },
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// One address, or several nested ones (outermost first)
    #[arg(required = true)]
    pub addresses: Vec<String>,

    /// Treat the address as a menu name followed by these items
    #[arg(long, num_args = 1.., value_name = "ITEM")]
    pub items: Option<Vec<String>>,

    /// With --items: the name is an identifier, so no path is recorded
    #[arg(long, requires = "items")]
    pub symbol: bool,
}

/// Runs a parsed command line and returns what it prints.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    match &cli.command {
        Command::Parse(args) => {
            let request = parse_command(args)?;
            render(&request, cli.output, request_text)
        }
        Command::Expand { path } => {
            let config = load_config(cli)?;
            let expanded = expand(path, &config.bookmarks)?;
            render(&expanded, cli.output, |s| format!("{s}\n"))
        }
        Command::Actionify { actions, args } => {
            let mut flags = vec![false; args.len()];
            for &i in actions {
                match flags.get_mut(i) {
                    Some(flag) => *flag = true,
                    None => bail!("action index {i} is out of range for {} args", args.len()),
                }
            }
            let call = actionify(args, &flags);
            render(&call, cli.output, |call| {
                format!("action: {}\nvariables: {:?}\n", call.action, call.variables)
            })
        }
        Command::Menu { address } => {
            let config = load_config(cli)?;
            let request = parse(address.as_str());
            let Some(name) = request.name.as_deref() else {
                bail!("'{address}' does not name a menu");
            };
            let dispatcher = Dispatcher::new(config.registry()).with_config(config.dispatch);
            let invocation = dispatcher
                .invoke_named(name, &request.items, &InvokeOptions::new())
                .with_context(|| format!("opening menu '{name}'"))?;
            render(&invocation, cli.output, |inv| inv.text.clone())
        }
    }
}

fn parse_command(args: &ParseArgs) -> anyhow::Result<Request> {
    match (&args.items, args.addresses.as_slice()) {
        (Some(items), [name]) if args.symbol => {
            Ok(parse_with_items(NameArg::Symbol(name.clone()), items))
        }
        (Some(items), [name]) => Ok(parse_with_items(name.as_str(), items)),
        (Some(_), _) => bail!("--items takes exactly one address"),
        (None, [address]) => Ok(parse(address.as_str())),
        (None, nested) => Ok(parse_nested(nested)),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<TreelineConfig> {
    TreelineConfig::discover(cli.config.as_deref()).context("loading configuration")
}

fn expand(path: &str, bookmarks: &BookmarkMap) -> anyhow::Result<String> {
    expand_file_path(path, &RealPathEnv, bookmarks).with_context(|| format!("expanding '{path}'"))
}

fn request_text(request: &Request) -> String {
    let text = request.to_string();
    if text.is_empty() {
        text
    } else {
        format!("{text}\n")
    }
}

fn render<T: Serialize>(
    data: &T,
    mode: OutputMode,
    text: impl FnOnce(&T) -> String,
) -> anyhow::Result<String> {
    if mode.is_structured() {
        let out = serialize_structured(data, mode)?;
        Ok(if out.ends_with('\n') { out } else { out + "\n" })
    } else {
        Ok(text(data))
    }
}
