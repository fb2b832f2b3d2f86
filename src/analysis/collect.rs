//! Candidate collection
//!
//! Filters one class's member methods down to the set worth analyzing:
//! non-constructor, not already static, private or final (so no subclass can
//! change the dispatch target), with a body to inspect, and not one of the
//! reserved serialization hooks.

use crate::model::{ClassId, MethodEntry, MethodId, Model, TypeKind};

/// Reserved signatures that must stay instance-dispatched on classes
/// declaring the serialization contract, regardless of what their bodies do:
/// the serialization runtime looks them up reflectively as instance methods.
const SERIALIZATION_HOOKS: &[(&str, &[&str])] = &[
    ("writeObject", &["ObjectOutputStream"]),
    ("readObject", &["ObjectInputStream"]),
    ("readObjectNoData", &[]),
];

pub fn collect(model: &Model<'_>, class: ClassId) -> Vec<MethodId> {
    let entry = model.class(class);
    if entry.kind == TypeKind::Interface {
        return Vec::new();
    }
    entry
        .methods
        .iter()
        .copied()
        .filter(|id| is_candidate(model, class, model.method(*id)))
        .collect()
}

fn is_candidate(model: &Model<'_>, class: ClassId, method: &MethodEntry<'_>) -> bool {
    !method.is_ctor
        && !method.is_static
        && method.is_non_overridable()
        && method.body.is_some()
        && !is_serialization_hook(model, class, method)
}

fn is_serialization_hook(model: &Model<'_>, class: ClassId, method: &MethodEntry<'_>) -> bool {
    if !model.implements_serializable(class) {
        return false;
    }
    SERIALIZATION_HOOKS.iter().any(|(name, params)| {
        method.name == *name
            && method.param_types.len() == params.len()
            && method
                .param_types
                .iter()
                .zip(params.iter())
                .all(|(have, want)| have == want)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build;
    use crate::parser::parse_java;

    fn candidate_names(source: &str) -> Vec<String> {
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        collect(&model, ClassId(0))
            .into_iter()
            .map(|id| model.method(id).name.to_string())
            .collect()
    }

    #[test]
    fn filters_by_modifiers() {
        let names = candidate_names(
            r#"
class A {
    public void pub() {}
    void pkg() {}
    protected void prot() {}
    private void priv() {}
    final void fin() {}
    private static void already() {}
    private native void nat();
    A() {}
}
"#,
        );
        assert_eq!(names, ["priv", "fin"]);
    }

    #[test]
    fn serialization_hooks_are_exempt() {
        let names = candidate_names(
            r#"
class A implements java.io.Serializable {
    private void writeObject(java.io.ObjectOutputStream out) throws java.io.IOException {}
    private void readObject(java.io.ObjectInputStream in) throws java.io.IOException {}
    private void readObjectNoData() throws java.io.ObjectStreamException {}
    private void helper() {}
}
"#,
        );
        assert_eq!(names, ["helper"]);
    }

    #[test]
    fn hooks_need_the_contract() {
        // Without Serializable the same signatures are ordinary candidates
        let names = candidate_names(
            r#"
class A {
    private void readObjectNoData() {}
}
"#,
        );
        assert_eq!(names, ["readObjectNoData"]);
    }

    #[test]
    fn hook_arity_must_match() {
        let names = candidate_names(
            r#"
class A implements java.io.Serializable {
    private void readObjectNoData(int x) {}
}
"#,
        );
        assert_eq!(names, ["readObjectNoData"]);
    }
}
