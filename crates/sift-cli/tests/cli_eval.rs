//! End-to-end tests for `sift eval`.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SHIM: &str = "/project/node_modules/react-scan/dist/native.js";

fn project_with_defaults() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .args(["init"])
        .assert()
        .success();
    dir
}

#[test]
fn default_policy_scenarios() {
    cargo_bin_cmd!("sift")
        .args([
            "eval",
            "--default-policy",
            SHIM,
            "/project/src/app/main.js",
            "/project/node_modules/react-scan/dist/index.js",
            "node_modules/react-scan/dist/native.js.map",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("drop\t{SHIM}")))
        .stdout(predicate::str::contains("retain\t/project/src/app/main.js"))
        .stdout(predicate::str::contains(
            "retain\t/project/node_modules/react-scan/dist/index.js",
        ))
        .stdout(predicate::str::contains(
            "retain\tnode_modules/react-scan/dist/native.js.map",
        ));
}

#[test]
fn external_flag_does_not_change_verdict() {
    cargo_bin_cmd!("sift")
        .args(["eval", "--default-policy", "--external", SHIM])
        .assert()
        .success()
        .stdout(format!("drop\t{SHIM}\n"));
}

#[test]
fn empty_id_is_rejected() {
    cargo_bin_cmd!("sift")
        .args(["eval", "--default-policy", ""])
        .assert()
        .failure();
}

#[test]
fn configured_policy_matches_default() {
    let dir = project_with_defaults();
    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .args(["eval", SHIM, "/project/src/index.js"])
        .assert()
        .success()
        .stdout(format!("drop\t{SHIM}\nretain\t/project/src/index.js\n"));
}

#[test]
fn disabled_treeshake_retains_shim() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle]
input = ["app/main.js"]
treeshake = false
"#,
    )
    .expect("write config");

    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .args(["eval", SHIM])
        .assert()
        .success()
        .stdout(format!("retain\t{SHIM}\n"));
}

#[test]
fn profile_switches_policy() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle]
input = ["app/main.js"]

[profiles.lean.bundle.treeshake]
module_side_effects = false
"#,
    )
    .expect("write config");

    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .args(["eval", "/project/src/index.js"])
        .assert()
        .success()
        .stdout("retain\t/project/src/index.js\n");

    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .args(["--profile", "lean", "eval", "/project/src/index.js"])
        .assert()
        .success()
        .stdout("drop\t/project/src/index.js\n");
}

#[test]
fn unknown_profile_fails() {
    let dir = project_with_defaults();
    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .args(["--profile", "staging", "eval", SHIM])
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn json_output() {
    cargo_bin_cmd!("sift")
        .args(["eval", "--default-policy", "--json", SHIM])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"side_effects\": false"))
        .stdout(predicate::str::contains("\"external\": false"));
}

#[test]
fn configured_log_level_enables_debug_events() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("sift.toml"),
        r#"
[bundle]
input = ["app/main.js"]

[settings]
log_level = "debug"
"#,
    )
    .expect("write config");

    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--no-color", "eval", SHIM])
        .assert()
        .success()
        .stderr(predicate::str::contains("evaluated module"))
        .stderr(predicate::str::contains("module side-effect decision"));

    fs::write(
        dir.path().join("sift.toml"),
        "[bundle]\ninput = [\"app/main.js\"]\n",
    )
    .expect("write config");

    cargo_bin_cmd!("sift")
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .args(["--no-color", "eval", SHIM])
        .assert()
        .success()
        .stderr(predicate::str::contains("evaluated module").not());
}
