//! Traversal driver
//!
//! Runs every class-shaped scope through collect -> classify -> resolve in
//! canonical scope order (a class before its nested scopes, siblings in
//! declaration order) and accumulates the growing eligible set. Membership
//! finalized for a scope is never revisited: a later scope sees everything
//! proven before it, which is what lets a nested class call an already
//! eligible method of its enclosing class.

use super::{classify, collect, resolve};
use crate::model::{ClassId, MethodId, Model};
use std::collections::{HashMap, HashSet};

/// One method proven safe to re-qualify as static, located by its scope's
/// position in the canonical walk plus its member index, so the rewriter
/// needs no live borrow of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub scope_index: usize,
    pub member_index: usize,
    pub class_name: String,
    pub method_name: String,
    pub line: usize,
}

pub fn run(model: &Model<'_>) -> Vec<Promotion> {
    let mut eligible: HashSet<MethodId> = HashSet::new();
    let mut promotions = Vec::new();

    for index in 0..model.classes.len() {
        let class = ClassId(index as u32);
        let candidates = collect::collect(model, class);
        if candidates.is_empty() {
            continue;
        }
        log::debug!(
            "driver: {} candidates in {}",
            candidates.len(),
            model.display_name(class)
        );
        let mut verdicts: HashMap<MethodId, classify::Verdict> = HashMap::new();
        for &candidate in &candidates {
            let verdict = classify::classify(model, &eligible, candidate);
            log::debug!(
                "classify: {}.{} -> {:?}",
                model.display_name(class),
                model.method(candidate).name,
                verdict
            );
            verdicts.insert(candidate, verdict);
        }
        for id in resolve::resolve(&candidates, &verdicts, &eligible) {
            eligible.insert(id);
            let method = model.method(id);
            promotions.push(Promotion {
                scope_index: method.owner.0 as usize,
                member_index: method.member_index,
                class_name: model.display_name(method.owner),
                method_name: method.name.to_string(),
                line: method.span.start.line,
            });
        }
    }
    promotions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build;
    use crate::parser::parse_java;

    fn promoted(source: &str) -> Vec<String> {
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        run(&model)
            .into_iter()
            .map(|p| format!("{}.{}", p.class_name, p.method_name))
            .collect()
    }

    #[test]
    fn later_class_sees_earlier_promotions() {
        // B.helper is finalized before A is visited, so A.test's call to the
        // inherited (now static) helper does not block promotion
        let source = r#"
class B {
    final int helper() { return 0; }
}
class A extends B {
    private int test() { return helper(); }
}
"#;
        assert_eq!(promoted(source), ["B.helper", "A.test"]);
    }

    #[test]
    fn nested_class_calls_enclosing_eligible_method() {
        let source = r#"
class A {
    private int util() { return 1; }
    class Inner {
        private int test() { return util(); }
    }
}
"#;
        assert_eq!(promoted(source), ["A.util", "A.Inner.test"]);
    }

    #[test]
    fn eligible_set_grows_monotonically() {
        let source = r#"
class A {
    private int a() { return 0; }
}
class B {
    int x = 0;
    private int b() { return x; }
}
class C {
    private int c() { return 0; }
}
"#;
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        let promotions = run(&model);
        let scopes: Vec<usize> = promotions.iter().map(|p| p.scope_index).collect();
        let mut sorted = scopes.clone();
        sorted.sort_unstable();
        assert_eq!(scopes, sorted, "promotions must follow traversal order");
        assert_eq!(promotions.len(), 2);
    }
}
