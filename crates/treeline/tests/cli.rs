//! Command-line behavior, run in-process.

use clap::Parser;
use insta::assert_snapshot;
use serial_test::serial;
use std::path::Path;
use treeline::cli::{execute, Cli};
use treeline::CONFIG_ENV;

fn run(argv: &[&str]) -> anyhow::Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("treeline").chain(argv.iter().copied()))?;
    execute(&cli)
}

fn write_config(dir: &Path, yaml: &str) -> String {
    let path = dir.join("treeline.yaml");
    std::fs::write(&path, yaml).unwrap();
    path.to_string_lossy().into_owned()
}

const CONFIG: &str = "
bookmarks:
  d: /tmp/dir
menus:
  todo: |
    - docs/
      - intro/
    - .add/
";

// =============================================================================
// parse
// =============================================================================

#[test]
fn test_parse_menu_path() {
    assert_snapshot!(run(&["parse", "x/@a/b/c/"]).unwrap(), @r#"
    name: "a"
    path: "a/b/c/"
    items: ["b", "c"]
    ancestors: ["x/"]
    "#);
}

#[test]
fn test_parse_file_path() {
    assert_eq!(
        run(&["parse", "/tmp/a/b/"]).unwrap(),
        "file_path: \"/tmp/a/b/\"\n"
    );
}

#[test]
fn test_parse_menufied() {
    assert_eq!(run(&["parse", "/tmp/a//"]).unwrap(), "menufied: \"/tmp/a\"\n");
}

#[test]
fn test_parse_nested() {
    let out = run(&["parse", "outer/", "inner/", "a/b/"]).unwrap();
    assert!(out.contains("ancestors: [\"outer/\", \"inner/\"]"));
    assert!(out.contains("name: \"a\""));
}

#[test]
fn test_parse_with_items() {
    let out = run(&["parse", "todo", "--items", "a b", "c/"]).unwrap();
    assert!(out.contains("name: \"todo\""));
    assert!(out.contains("path: \"todo\""));
    assert!(out.contains("items: [\"a b\", \"c/\"]"));

    let symbol = run(&["parse", "todo", "--symbol", "--items", "x"]).unwrap();
    assert!(!symbol.contains("path:"));
}

#[test]
fn test_parse_items_needs_one_address() {
    let err = run(&["parse", "a", "b", "--items", "x"]).unwrap_err();
    assert_eq!(err.to_string(), "--items takes exactly one address");
}

#[test]
fn test_parse_json() {
    let out = run(&["parse", "--output", "json", "a/b/"]).unwrap();
    assert_snapshot!(out, @r#"
    {
      "name": "a",
      "path": "a/b/",
      "items": [
        "b"
      ]
    }
    "#);
}

#[test]
fn test_parse_yaml() {
    let out = run(&["parse", "-o", "yaml", "/tmp/x"]).unwrap();
    assert_eq!(out, "file_path: /tmp/x\n");
}

#[test]
fn test_unknown_output_mode_rejected() {
    assert!(run(&["parse", "-o", "toml", "a/"]).is_err());
}

// =============================================================================
// actionify
// =============================================================================

#[test]
fn test_actionify() {
    let out = run(&["actionify", "-a", "0", "Add Item", "milk"]).unwrap();
    assert_eq!(out, "action: add_item\nvariables: [\"milk\"]\n");
}

#[test]
fn test_actionify_defaults_to_menu() {
    let out = run(&["actionify", "a", "b"]).unwrap();
    assert_eq!(out, "action: menu\nvariables: [\"a\", \"b\"]\n");
}

#[test]
fn test_actionify_index_out_of_range() {
    let err = run(&["actionify", "-a", "3", "a"]).unwrap_err();
    assert!(err.to_string().contains("out of range"));
}

// =============================================================================
// expand and menu (config-dependent)
// =============================================================================

#[test]
#[serial]
fn test_expand_bookmark_from_config_flag() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    let out = run(&["expand", "--config", &config, "$d/a//b"]).unwrap();
    assert_eq!(out, "/tmp/dir/a//b\n");
}

#[test]
#[serial]
fn test_expand_bookmark_from_env() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    std::env::set_var(CONFIG_ENV, &config);
    let out = run(&["expand", "$d"]);
    std::env::remove_var(CONFIG_ENV);
    assert_eq!(out.unwrap(), "/tmp/dir\n");
}

#[test]
#[serial]
fn test_expand_unknown_bookmark() {
    std::env::remove_var(CONFIG_ENV);
    let err = run(&["expand", "$nope/x"]).unwrap_err();
    assert_eq!(err.to_string(), "expanding '$nope/x'");
    assert_eq!(err.root_cause().to_string(), "no bookmark named '$nope'");
}

#[test]
#[serial]
fn test_expand_home() {
    let saved = std::env::var_os("HOME");
    std::env::set_var("HOME", "/home/tester");
    let out = run(&["expand", "~/notes"]);
    match saved {
        Some(home) => std::env::set_var("HOME", home),
        None => std::env::remove_var("HOME"),
    }
    assert_eq!(out.unwrap(), "/home/tester/notes\n");
}

#[test]
#[serial]
fn test_bad_config_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "menus: [oops]\n");
    let err = run(&["expand", "--config", &config, "/x"]).unwrap_err();
    assert_eq!(err.to_string(), "loading configuration");
}

#[test]
#[serial]
fn test_menu_root_and_children() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);

    let root = run(&["menu", "--config", &config, "todo/"]).unwrap();
    assert_eq!(root, "- docs/\n  - intro/\n- .add/\n");

    let docs = run(&["menu", "--config", &config, "todo/docs/"]).unwrap();
    assert_eq!(docs, "- intro/\n");
}

#[test]
#[serial]
fn test_menu_unknown_action() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), CONFIG);
    let err = run(&["menu", "--config", &config, "todo/add/milk/"]).unwrap_err();
    assert_eq!(err.to_string(), "opening menu 'todo'");
    assert_eq!(
        err.root_cause().to_string(),
        "no menu or action 'add' found on 'todo'"
    );
}

#[test]
#[serial]
fn test_menu_needs_a_name() {
    std::env::remove_var(CONFIG_ENV);
    let err = run(&["menu", "/tmp/file"]).unwrap_err();
    assert_eq!(err.to_string(), "'/tmp/file' does not name a menu");
}
