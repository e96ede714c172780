use stitcher::suite::{Suite, Test};

#[test]
fn empty_suite_is_empty() {
    assert!(Suite::empty().is_empty());
    assert!(!Suite::new("named").is_empty());
    assert!(!Suite { origin: "a.js".into(), ..Suite::empty() }.is_empty());
    assert!(!Suite { tests: vec![Test::new("t")], ..Suite::empty() }.is_empty());
}

#[test]
fn constructors_set_origin_as_expected() {
    assert_eq!(Suite::new("x").origin, "");
    let dir = Suite::with_origin("dir");
    assert_eq!(dir.name, "dir");
    assert_eq!(dir.origin, "dir");
}

#[test]
fn renamed_copy_takes_the_origin_as_name() {
    let mut input = Suite { origin: "dir/a.spec.js".into(), ..Suite::empty() };
    input.suites.push(Suite::new("inner"));
    input.tests.push(Test::new("t"));

    let mut copy = input.renamed_to_origin();
    assert_eq!(copy.name, "dir/a.spec.js");
    assert_eq!(copy.origin, input.origin);
    assert_eq!(copy.suites, input.suites);
    assert_eq!(copy.tests, input.tests);

    copy.suites.clear();
    assert_eq!(input.name, "");
    assert_eq!(input.suites.len(), 1);
}

#[test]
fn deserializes_with_missing_fields() {
    let suite: Suite = serde_json::from_str(r#"{"name":"only a name"}"#).unwrap();
    assert_eq!(suite, Suite::new("only a name"));
}
