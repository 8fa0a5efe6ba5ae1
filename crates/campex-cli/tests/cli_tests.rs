//! Integration tests for the `campex` binary.
//!
//! Theme and dry-run tests run against the fragments and demo project that
//! ship with the repository; export tests swap the toolchain for `sh`.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn repo_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(rel)
}

fn fragments() -> PathBuf {
    repo_path("fragments")
}

fn demo_draft() -> PathBuf {
    repo_path("demos/summer-sale/draft.json")
}

fn demo_template() -> PathBuf {
    repo_path("demos/summer-sale/template")
}

/// `campex` with a config that cannot leak in from the host.
fn campex(config: &Path) -> Command {
    let mut cmd = Command::cargo_bin("campex").unwrap();
    cmd.env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .env_remove("CAMPEX_FRAGMENTS_DIR")
        .env_remove("CAMPEX_CONFIG")
        .arg("--config")
        .arg(config);
    cmd
}

/// A config file whose toolchain runs `script` through `sh -c`.
fn config_with_toolchain(dir: &Path, script: &str) -> PathBuf {
    let path = dir.join("campex.toml");
    let toml = format!(
        "[toolchain]\nprogram = \"sh\"\nargs = [\"-c\", {}]\n",
        toml_string(script)
    );
    fs::write(&path, toml).unwrap();
    path
}

fn toml_string(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("empty.toml");
    fs::write(&path, "").unwrap();
    path
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("campex")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("theme"));
}

#[test]
fn version_flag() {
    Command::cargo_bin("campex")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_flag_exits_with_usage_error() {
    Command::cargo_bin("campex")
        .unwrap()
        .args(["export", "--no-such-flag"])
        .assert()
        .code(2);
}

#[test]
fn completions_for_bash() {
    Command::cargo_bin("campex")
        .unwrap()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("campex"));
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_get_reads_file_values() {
    let tmp = TempDir::new().unwrap();
    let config = config_with_toolchain(tmp.path(), "true");
    campex(&config)
        .args(["config", "get", "toolchain.program"])
        .assert()
        .success()
        .stdout("sh\n");
}

#[test]
fn config_env_overrides_file() {
    let tmp = TempDir::new().unwrap();
    let config = config_with_toolchain(tmp.path(), "true");
    campex(&config)
        .env("CAMPEX_TOOLCHAIN__PROGRAM", "pnpm")
        .args(["config", "get", "toolchain.program"])
        .assert()
        .success()
        .stdout("pnpm\n");
}

#[test]
fn config_get_unknown_key_is_configuration_error() {
    let tmp = TempDir::new().unwrap();
    campex(&empty_config(tmp.path()))
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn missing_config_file_is_configuration_error() {
    let tmp = TempDir::new().unwrap();
    campex(&tmp.path().join("absent.toml"))
        .args(["config", "list"])
        .assert()
        .code(4);
}

// ── theme ─────────────────────────────────────────────────────────────────────

#[test]
fn theme_css_for_demo_draft() {
    let tmp = TempDir::new().unwrap();
    campex(&empty_config(tmp.path()))
        .args(["theme"])
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .args(["--format", "css"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(":root {"))
        .stdout(predicate::str::contains("--colors-primary: #ea580c;"))
        .stdout(predicate::str::contains("--colors-background: #fff7ed;"))
        .stdout(predicate::str::contains("--geometry-radius: 1rem;"));
}

#[test]
fn theme_json_merges_presets_in_order() {
    let tmp = TempDir::new().unwrap();
    let assert = campex(&empty_config(tmp.path()))
        .arg("theme")
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .assert()
        .success();

    let theme: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    // override beats the sunset preset, which beats base
    assert_eq!(theme["colors"]["primary"], "#ea580c");
    assert_eq!(theme["colors"]["muted"], "#ffedd5");
    assert_eq!(theme["fonts"]["heading"][0], "Playfair Display");
    // base keys no preset touches survive
    assert_eq!(theme["geometry"]["borderWidth"], "1px");
}

#[test]
fn unknown_preset_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let draft = tmp.path().join("draft.json");
    fs::write(
        &draft,
        r#"{ "variantName": "x", "layoutConfig": [ { "name": "Hero" } ],
             "themeConfig": { "colorPreset": "neon" } }"#,
    )
    .unwrap();

    campex(&empty_config(tmp.path()))
        .arg("theme")
        .arg(&draft)
        .arg("--fragments")
        .arg(fragments())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("colors/neon"));
}

// ── export: input errors ──────────────────────────────────────────────────────

#[test]
fn export_missing_draft_is_not_found() {
    let tmp = TempDir::new().unwrap();
    campex(&empty_config(tmp.path()))
        .args(["export", "no-such-draft.json", "--fragments"])
        .arg(fragments())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Draft not found"));
}

#[test]
fn export_malformed_draft_is_user_error() {
    let tmp = TempDir::new().unwrap();
    let draft = tmp.path().join("draft.json");
    fs::write(&draft, "{ not json").unwrap();

    campex(&empty_config(tmp.path()))
        .arg("export")
        .arg(&draft)
        .arg("--fragments")
        .arg(fragments())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not parse draft"));
}

#[test]
fn export_refuses_to_overwrite_without_force() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("site.zip");
    fs::write(&out, "old").unwrap();

    campex(&empty_config(tmp.path()))
        .arg("export")
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    assert_eq!(fs::read_to_string(&out).unwrap(), "old");
}

#[test]
fn export_dry_run_lists_files_without_writing() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("site.zip");

    let assert = campex(&empty_config(tmp.path()))
        .args(["--output-format", "json", "export"])
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(&out)
        .arg("--dry-run")
        .assert()
        .success();

    let plan: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(plan["package_id"], "summer-sale");
    assert_eq!(plan["generated"].as_array().unwrap().len(), 7);

    let copied: Vec<String> = plan["copied"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p.as_str().unwrap().replace('\\', "/"))
        .collect();
    assert_eq!(copied.len(), 6);
    // dependencies come before the files that import them
    let pos = |suffix: &str| copied.iter().position(|p| p.ends_with(suffix)).unwrap();
    assert!(pos("lib/utils.ts") < pos("components/ui/Button.tsx"));
    assert!(pos("components/ui/Button.tsx") < pos("components/sections/Hero.tsx"));
    assert!(copied.last().unwrap().ends_with("components/layout/SectionRenderer.tsx"));

    assert!(!out.exists());
}

// ── export: full runs (the fake toolchain needs a POSIX shell) ────────────────

#[cfg(unix)]
#[test]
fn export_builds_and_packages() {
    let tmp = TempDir::new().unwrap();
    let config = config_with_toolchain(
        tmp.path(),
        "test -f package.json && test -d \"$SSG_CONTENT_OVERRIDE_DIR\" \
         && mkdir -p out && echo \"$BUILD_TARGET_CAMPAIGN_ID\" > out/campaign.txt",
    );
    let out = tmp.path().join("dist/summer.zip");

    let assert = campex(&config)
        .args(["--output-format", "json", "export"])
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(&out)
        .args(["--variant-id", "b"])
        .assert()
        .success();

    let summary: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["package_id"], "summer-sale");
    assert_eq!(summary["variant_id"], "b");
    assert_eq!(summary["files_generated"], 7);
    assert_eq!(summary["files_copied"], 6);
    assert!(summary.get("workspace").is_none());

    assert!(out.is_file());
    let bytes = fs::metadata(&out).unwrap().len();
    assert_eq!(summary["archive_bytes"], bytes);
}

#[cfg(unix)]
#[test]
fn export_keeps_workspace_on_request() {
    let tmp = TempDir::new().unwrap();
    let config = config_with_toolchain(tmp.path(), "mkdir -p out");
    let parent = tmp.path().join("workspaces");

    let assert = campex(&config)
        .args(["--output-format", "json", "export"])
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(tmp.path().join("site.zip"))
        .arg("--workspace-dir")
        .arg(&parent)
        .arg("--keep-workspace")
        .assert()
        .success();

    let summary: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    let workspace = PathBuf::from(summary["workspace"].as_str().unwrap());
    assert!(workspace.starts_with(&parent));
    assert!(workspace.join("content/theme.json").is_file());
    assert!(workspace.join("components/sections/Hero.tsx").is_file());
}

#[cfg(unix)]
#[test]
fn failed_build_reports_stderr_and_cleans_up() {
    let tmp = TempDir::new().unwrap();
    let config = config_with_toolchain(tmp.path(), "echo 'Type error in Hero.tsx' >&2; exit 3");
    let out = tmp.path().join("site.zip");
    let parent = tmp.path().join("workspaces");

    campex(&config)
        .arg("export")
        .arg(demo_draft())
        .arg("--fragments")
        .arg(fragments())
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(&out)
        .arg("--workspace-dir")
        .arg(&parent)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exit code 3"))
        .stderr(predicate::str::contains("Type error in Hero.tsx"));

    assert!(!out.exists());
    // the workspace guard removed its directory
    assert_eq!(fs::read_dir(&parent).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn incomplete_theme_fails_before_build() {
    let tmp = TempDir::new().unwrap();
    let config = config_with_toolchain(tmp.path(), "touch built-marker");
    let fragments = tmp.path().join("fragments");
    fs::create_dir_all(fragments.join("base")).unwrap();
    fs::write(
        fragments.join("base/default.json"),
        r##"{ "colors": { "primary": "#000" } }"##,
    )
    .unwrap();

    campex(&config)
        .arg("export")
        .arg(demo_draft())
        .arg("--fragments")
        .arg(&fragments)
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(tmp.path().join("site.zip"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("colors/sunset"));

    let draft = tmp.path().join("plain.json");
    fs::write(
        &draft,
        r#"{ "variantName": "Plain", "layoutConfig": [ { "name": "Hero" } ] }"#,
    )
    .unwrap();

    campex(&config)
        .arg("export")
        .arg(&draft)
        .arg("--fragments")
        .arg(&fragments)
        .arg("--source-root")
        .arg(demo_template())
        .arg("--out")
        .arg(tmp.path().join("plain.zip"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("schema validation"))
        .stderr(predicate::str::contains("fonts"))
        .stderr(predicate::str::contains("/colors"));

    assert!(!tmp.path().join("plain.zip").exists());
}
