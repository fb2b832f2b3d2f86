//! Promotion analysis pipeline
//!
//! The passes that decide which non-overridable methods can become static
//! and apply the result:
//!
//! - collect: filter a class's methods down to candidates
//! - classify: walk one candidate body for instance access
//! - resolve: fixpoint over candidate-to-candidate invocation edges
//! - driver: run the above per scope, accumulating the global eligible set
//! - rewrite: append `static` to the finalized methods

pub mod classify;
pub mod collect;
pub mod driver;
pub mod resolve;
pub mod rewrite;

pub use classify::Verdict;
pub use driver::Promotion;

use crate::ast::Ast;
use crate::model;

/// Analyze a compilation unit and report every method that can safely be
/// re-qualified as static, in traversal order. The tree is not modified.
pub fn analyze(ast: &Ast) -> Vec<Promotion> {
    let model = model::build(ast);
    driver::run(&model)
}

/// Analyze and rewrite in place; returns the number of methods promoted.
pub fn rewrite(ast: &mut Ast) -> usize {
    let promotions = analyze(ast);
    rewrite::apply(ast, &promotions)
}
