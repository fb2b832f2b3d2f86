//! jstatic - promote non-overridable Java methods to static
//!
//! Analyzes Java source and re-qualifies `private` and `final` methods that
//! touch no instance state as `static`, so the method signature states what
//! the body already guarantees.
//!
//! ## Pipeline
//!
//! ```text
//! Java source -> Parser -> AST -> Symbol model -> Promotion analysis -> Rewrite -> Printer
//! ```
//!
//! A method is promoted only when neither it, nor (transitively) any sibling
//! non-overridable method it calls without a receiver, reads or writes
//! instance state. Unresolvable references keep a method out of the result:
//! the analysis fails closed rather than risk changing behavior.
//!
//! ## Example
//!
//! ```
//! let source = "class A { private int test() { return 0; } }";
//! let rewritten = jstatic::rewrite_source(source).unwrap();
//! assert!(rewritten.contains("private static int test()"));
//! ```

pub mod analysis;
pub mod ast;
pub mod error;
pub mod model;
pub mod parser;

pub use analysis::{analyze, rewrite, Promotion};
pub use error::{Error, Result};

use ast::AstPrinter;
use parser::parse_java;

/// Parse, analyze, rewrite, and print a compilation unit.
///
/// The output is the printer's rendering of the (possibly modified) tree;
/// source trivia is not preserved. A unit with nothing to promote round-trips
/// through the printer unchanged in meaning.
pub fn rewrite_source(source: &str) -> Result<String> {
    let mut ast = parse_java(source)?;
    let promoted = rewrite(&mut ast);
    log::debug!("rewrite_source: {} methods promoted", promoted);
    Ok(AstPrinter::new().print(&ast))
}
