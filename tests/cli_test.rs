//! CLI contract tests driving the built binary.

use assert_cmd::Command;
use std::fs;

#[test]
fn missing_source_reports_exactly_one_error_and_touches_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::cargo_bin("cmc")
        .unwrap()
        .current_dir(dir.path())
        .arg("compile")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("a source folder must be defined"));
    assert_eq!(stderr.matches("ERROR").count(), 1);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn unknown_plugin_stops_before_compiling() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.js"), "import css from './a.css'\n").unwrap();
    fs::write(dir.path().join("a.css"), ".a { color: red; }\n").unwrap();

    let output = Command::cargo_bin("cmc")
        .unwrap()
        .arg("compile")
        .arg(dir.path())
        .args(["--plugins", "postcss-nested"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Cannot load plugin 'postcss-nested'"));
    assert!(dir.path().join("a.css").exists());
    assert!(!dir.path().join("styles.css").exists());
}

#[test]
fn compiles_a_source_tree_from_the_command_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Button.js"),
        "import css from './Button.css'\nexport const cls = css.btn\n",
    )
    .unwrap();
    fs::write(dir.path().join("Button.css"), ".btn { color: red; }\n").unwrap();

    Command::cargo_bin("cmc")
        .unwrap()
        .arg("compile")
        .arg(dir.path())
        .assert()
        .success();

    assert!(dir.path().join("styles.css").exists());
    assert!(!dir.path().join("Button.css").exists());
    let rewritten = fs::read_to_string(dir.path().join("Button.js")).unwrap();
    assert!(rewritten.contains("const css = { btn: \"btn\" };"));
}

#[test]
fn positional_source_yields_to_the_source_flag() {
    let dir = tempfile::tempdir().unwrap();
    let real = dir.path().join("real");
    fs::create_dir(&real).unwrap();
    fs::write(real.join("a.js"), "import css from './a.css'\nconst c = css.a\n").unwrap();
    fs::write(real.join("a.css"), ".a { color: red; }\n").unwrap();

    Command::cargo_bin("cmc")
        .unwrap()
        .arg("compile")
        .arg(dir.path().join("decoy"))
        .arg("--source")
        .arg(&real)
        .assert()
        .success();

    assert!(real.join("styles.css").exists());
}
