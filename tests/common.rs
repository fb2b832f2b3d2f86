// Common test utilities

use jstatic::ast::AstPrinter;
use jstatic::parser::parse_java;

/// Print of a parsed source: the formatting-independent comparison oracle.
/// Both sides of every assertion go through the same parser and printer, so
/// only tree differences can fail a test.
pub fn normalized(source: &str) -> String {
    let ast = parse_java(source).expect("failed to parse fixture");
    AstPrinter::new().print(&ast)
}

pub fn assert_promotes(input: &str, expected: &str) {
    let rewritten = jstatic::rewrite_source(input).expect("rewrite failed");
    assert_eq!(rewritten, normalized(expected));
}

pub fn assert_unchanged(input: &str) {
    let rewritten = jstatic::rewrite_source(input).expect("rewrite failed");
    assert_eq!(rewritten, normalized(input));
}
