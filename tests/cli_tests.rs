use assert_cmd::Command;
use predicates::prelude::*;

fn fixture() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(dir.path().join("a/b")).unwrap();
    std::fs::write(
        dir.path().join("a/one.spec.js"),
        r#"describe("one", () => { it("works", () => {}); });"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("a/b/two.spec.js"),
        r#"describe("two", () => { it("a", () => {}); it("b", () => {}); });"#,
    )
    .unwrap();
    dir
}

#[test]
fn prints_outline_and_statistics() {
    let dir = fixture();
    let output = Command::cargo_bin("stitcher")
        .unwrap()
        .current_dir(dir.path())
        .args(["a/one.spec.js", "a/b/two.spec.js"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        &lines[..9],
        &[
            "a",
            "  b",
            "    a/b/two.spec.js",
            "      two",
            "        a",
            "        b",
            "  a/one.spec.js",
            "    one",
            "      works",
        ]
    );
    assert!(text.contains("Statistics\n-----------"));
    assert!(text.contains("\"tests\": 3"));
    assert!(text.contains("\"suites\": 6"));
}

#[test]
fn json_output() {
    let dir = fixture();
    let output = Command::cargo_bin("stitcher")
        .unwrap()
        .current_dir(dir.path())
        .args(["--json", "a/one.spec.js", "a/b/two.spec.js"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(report["root"]["name"], "root");
    assert_eq!(report["root"]["suites"][0]["name"], "a");
    assert_eq!(report["stats"]["counts"]["tests"], 3);
    assert_eq!(report["stats"]["counts"]["suites"], 6);
}

#[test]
fn verbose_reports_on_stderr() {
    let dir = fixture();
    Command::cargo_bin("stitcher")
        .unwrap()
        .current_dir(dir.path())
        .args(["-v", "a/one.spec.js"])
        .assert()
        .success()
        .stderr(predicate::str::contains("[stitcher] a/one.spec.js suites=1 tests=0"))
        .stderr(predicate::str::contains("[stitcher] sources=1"));
}

#[test]
fn unreadable_source_aborts_without_output() {
    let dir = fixture();
    Command::cargo_bin("stitcher")
        .unwrap()
        .current_dir(dir.path())
        .args(["a/one.spec.js", "a/missing.spec.js"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ERROR reading file"))
        .stderr(predicate::str::contains("a/missing.spec.js"));
}

#[test]
fn sources_are_required() {
    Command::cargo_bin("stitcher").unwrap().assert().failure();
}
