// End-to-end over real files, the way the CLI drives the library.

mod common;
use common::normalized;
use std::fs;

#[test]
fn rewrite_file_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("A.java");
    fs::write(
        &path,
        r#"
class A {
    private int test() {
        return 0;
    }
}
"#,
    )
    .unwrap();

    let source = fs::read_to_string(&path).unwrap();
    let rewritten = jstatic::rewrite_source(&source).unwrap();
    fs::write(&path, &rewritten).unwrap();

    let result = fs::read_to_string(&path).unwrap();
    assert_eq!(
        result,
        normalized("class A { private static int test() { return 0; } }")
    );
}

#[test]
fn unparseable_file_reports_position() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Broken.java");
    fs::write(&path, "class A { int }").unwrap();

    let source = fs::read_to_string(&path).unwrap();
    let err = jstatic::rewrite_source(&source).unwrap_err();
    assert!(matches!(err, jstatic::Error::Parse { .. }));
}
