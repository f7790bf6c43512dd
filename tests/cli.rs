use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn get_atto_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_atto"))
}

/// Write `source` to a fresh file under the temp dir.
fn source_file(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("atto-cli-{}-{}.at", std::process::id(), name));
    fs::write(&path, source).expect("Failed to write source file");
    path
}

fn run_file(name: &str, source: &str, args: &[&str]) -> Output {
    let path = source_file(name, source);
    let output = get_atto_binary()
        .args(args)
        .arg(&path)
        .output()
        .expect("Failed to execute atto");
    fs::remove_file(&path).ok();
    output
}

#[test]
fn test_version_flag() {
    let output = get_atto_binary()
        .arg("--version")
        .output()
        .expect("Failed to execute atto");

    assert!(output.status.success(), "Version flag should succeed");
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("atto"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_runs_program() {
    let output = run_file("hello", r#"fn main is print "Hello, world" fn"#, &[]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Hello, world\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn test_no_main_exits_zero() {
    let output = run_file("no-main", "fn helper x is print x fn", &[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_runtime_error_exits_one() {
    let output = run_file("runtime-error", r#"fn main is head "abc" fn"#, &["--color", "never"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[E0203]"), "stderr: {}", stderr);
    assert!(stderr.contains("aborting due to 1 error"));
}

#[test]
fn test_parse_error_exits_one() {
    let output = run_file("parse-error", "fn main is print", &["--color", "never"]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[E0101]"), "stderr: {}", stderr);
}

#[test]
fn test_missing_file_exits_one() {
    let output = get_atto_binary()
        .arg("--color")
        .arg("never")
        .arg("/definitely/not/here.at")
        .output()
        .expect("Failed to execute atto");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cannot read"));
}

#[test]
fn test_missing_file_argument() {
    let output = get_atto_binary().output().expect("Failed to execute atto");
    assert!(!output.status.success());
}

#[test]
fn test_verbose_goes_to_stderr() {
    let source = r#"fn main is print double "2" fn fn double x is add x x fn"#;
    let output = run_file("verbose", source, &["--verbose"]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "4\n");
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("[atto:debug]"));
    assert!(stderr.contains("call `double`"), "stderr: {}", stderr);
    assert!(stderr.contains("main/0 double/1"), "stderr: {}", stderr);
}

#[test]
fn test_debug_alias() {
    let output = run_file("debug", r#"fn main is "quiet" fn"#, &["--debug"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr).unwrap().contains("[atto:debug]"));
}

#[test]
fn test_no_prelude() {
    let source = r#"fn main is print subtract "5" "3" fn"#;
    let with = run_file("with-prelude", source, &[]);
    assert_eq!(String::from_utf8(with.stdout).unwrap(), "2\n");

    // Without the prelude `subtract` is just a word and the body has too many tokens.
    let without = run_file("without-prelude", source, &["--no-prelude", "--color", "never"]);
    assert_eq!(without.status.code(), Some(1));
}

#[test]
fn test_max_depth() {
    let source = r#"
        fn count n is if lessOrEqual n "0" "done" count decrement n fn
        fn main is print count "50" fn
    "#;
    let ok = run_file("depth-ok", source, &[]);
    assert_eq!(String::from_utf8(ok.stdout).unwrap(), "done\n");

    let limited = run_file("depth-limited", source, &["--max-depth", "10", "--color", "never"]);
    assert_eq!(limited.status.code(), Some(1));
    let stderr = String::from_utf8(limited.stderr).unwrap();
    assert!(stderr.contains("error[E0205]"), "stderr: {}", stderr);
}

#[test]
fn test_read_line_from_stdin() {
    let path = source_file("stdin", r#"fn main is print concatenate "Hello, " readLine "Name: " fn"#);
    let mut child = get_atto_binary()
        .arg(&path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn atto");

    {
        let stdin = child.stdin.as_mut().expect("Failed to open stdin");
        stdin.write_all(b"World\n").expect("Failed to write to stdin");
    }

    let output = child.wait_with_output().expect("Failed to read output");
    fs::remove_file(&path).ok();
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Name: Hello, World\n");
}

#[test]
fn test_completions() {
    let output = get_atto_binary()
        .arg("complete")
        .arg("bash")
        .output()
        .expect("Failed to execute atto");
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("atto"));
}
