//! Resolution queries over the symbol model
//!
//! These answer the questions the classifier asks about references inside a
//! method body: what does a name resolve to, is it static, which class owns
//! it. Lookups search superclass chains with inherited `private` members
//! excluded, and "not found" is an ordinary answer the caller treats
//! conservatively.

use super::{ClassId, MethodId, Model, TypeKind};
use once_cell::sync::Lazy;
use std::collections::HashSet;

// Hierarchy walks are capped so a cyclic `extends` in broken input cannot loop
const MAX_HIERARCHY_STEPS: usize = 64;

/// Well-known simple names from java.lang and friends that appear as static
/// qualifiers (`System.out`, `Math.max`). `java`/`javax` cover the leading
/// segment of fully qualified references.
static WELL_KNOWN_TYPE_NAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "String", "Object", "System", "Math", "Objects", "Arrays", "Collections",
        "Integer", "Long", "Float", "Double", "Boolean", "Character", "Short", "Byte",
        "Void", "Number", "Thread", "Runtime", "Class", "Optional", "Stream",
        "StringBuilder", "StringBuffer", "Throwable", "Exception", "RuntimeException",
        "Error", "IllegalArgumentException", "IllegalStateException",
        "UnsupportedOperationException", "java", "javax",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldResolution {
    NotFound,
    Found { is_static: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodResolution {
    NotFound,
    /// The name exists but no declaration matches the call's arity; callers
    /// stop searching and fail closed.
    ArityMismatch,
    Found {
        id: MethodId,
        owner: ClassId,
        is_static: bool,
    },
}

impl<'a> Model<'a> {
    /// Field lookup in a class and its superclass chain, without enclosing
    /// scopes. Inherited private fields are not visible.
    pub fn resolve_field_here(&self, class: ClassId, name: &str) -> FieldResolution {
        let mut current = Some(class);
        let mut inherited = false;
        let mut steps = 0;
        while let Some(cid) = current {
            if steps >= MAX_HIERARCHY_STEPS {
                break;
            }
            steps += 1;
            let entry = self.class(cid);
            if let Some(field) = entry
                .fields
                .iter()
                .find(|f| f.name == name && (!inherited || !f.is_private))
            {
                return FieldResolution::Found {
                    is_static: field.is_static,
                };
            }
            current = self.superclass_of(cid);
            inherited = true;
        }
        FieldResolution::NotFound
    }

    /// Same as [`resolve_field_here`] but starting at the superclass, for
    /// `super.`-qualified references.
    pub fn resolve_field_super(&self, class: ClassId, name: &str) -> FieldResolution {
        match self.superclass_of(class) {
            Some(superclass) => {
                // The whole chain is inherited context; re-check privacy of
                // the first hop by treating it as inherited too.
                let mut current = Some(superclass);
                let mut steps = 0;
                while let Some(cid) = current {
                    if steps >= MAX_HIERARCHY_STEPS {
                        break;
                    }
                    steps += 1;
                    let entry = self.class(cid);
                    if let Some(field) = entry.fields.iter().find(|f| f.name == name && !f.is_private)
                    {
                        return FieldResolution::Found {
                            is_static: field.is_static,
                        };
                    }
                    current = self.superclass_of(cid);
                }
                FieldResolution::NotFound
            }
            None => FieldResolution::NotFound,
        }
    }

    /// Method lookup in a class and its superclass chain, without enclosing
    /// scopes. Constructors never participate; inherited private methods are
    /// not visible. Resolution stops at the first class declaring the name.
    pub fn resolve_method_here(&self, class: ClassId, name: &str, argc: usize) -> MethodResolution {
        let mut current = Some(class);
        let mut inherited = false;
        let mut steps = 0;
        while let Some(cid) = current {
            if steps >= MAX_HIERARCHY_STEPS {
                break;
            }
            steps += 1;
            let entry = self.class(cid);
            let named: Vec<MethodId> = entry
                .methods
                .iter()
                .copied()
                .filter(|id| {
                    let m = self.method(*id);
                    !m.is_ctor && m.name == name && (!inherited || !m.is_private)
                })
                .collect();
            if !named.is_empty() {
                for id in named {
                    let m = self.method(id);
                    if m.arity == argc {
                        return MethodResolution::Found {
                            id,
                            owner: cid,
                            is_static: m.is_static,
                        };
                    }
                }
                return MethodResolution::ArityMismatch;
            }
            current = self.superclass_of(cid);
            inherited = true;
        }
        MethodResolution::NotFound
    }

    /// Method lookup starting at the superclass, for `super.`-qualified calls.
    pub fn resolve_method_super(&self, class: ClassId, name: &str, argc: usize) -> MethodResolution {
        match self.superclass_of(class) {
            Some(superclass) => {
                let resolution = self.resolve_method_here(superclass, name, argc);
                // Private members of the superclass are invisible even though
                // the chain walk treats its own class as non-inherited.
                if let MethodResolution::Found { id, .. } = resolution {
                    if self.method(id).is_private {
                        return MethodResolution::NotFound;
                    }
                }
                resolution
            }
            None => MethodResolution::NotFound,
        }
    }

    /// In-unit superclass, if the written name resolves to a declared type.
    pub fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        let entry = self.class(class);
        let name = entry.superclass?;
        self.resolve_type(class, name)
    }

    /// Resolve a type name (possibly qualified; matched by simple name) to a
    /// declared scope visible from `from`: the lexical chain's direct member
    /// types, then top-level types. Only direct members are searched here -
    /// superclass chains would re-enter this resolution through
    /// [`superclass_of`].
    pub fn resolve_type(&self, from: ClassId, name: &str) -> Option<ClassId> {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let mut current = Some(from);
        let mut steps = 0;
        while let Some(cid) = current {
            if steps >= MAX_HIERARCHY_STEPS {
                break;
            }
            steps += 1;
            let entry = self.class(cid);
            if !entry.name.is_empty() && entry.name == simple {
                return Some(cid);
            }
            if let Some(found) = self.find_nested_direct(cid, simple) {
                return Some(found);
            }
            current = entry.owner;
        }
        self.top_level
            .iter()
            .copied()
            .find(|id| self.class(*id).name == simple)
    }

    /// Member type declared directly in `class`.
    fn find_nested_direct(&self, class: ClassId, simple: &str) -> Option<ClassId> {
        self.class(class)
            .nested
            .iter()
            .copied()
            .find(|id| self.class(*id).name == simple)
    }

    /// Member type of `class` or of a class on its superclass chain
    /// (inner classes are inherited).
    fn find_nested(&self, class: ClassId, simple: &str) -> Option<ClassId> {
        let mut current = Some(class);
        let mut steps = 0;
        while let Some(cid) = current {
            if steps >= MAX_HIERARCHY_STEPS {
                break;
            }
            steps += 1;
            if let Some(found) = self.find_nested_direct(cid, simple) {
                return Some(found);
            }
            current = self.superclass_of(cid);
        }
        None
    }

    /// Whether `name` denotes a type from where the classifier stands: a
    /// declared type visible on the lexical chain, an imported simple name,
    /// or a well-known platform name.
    pub fn is_type_name(&self, from: ClassId, name: &str) -> bool {
        if self.resolve_type(from, name).is_some() {
            return true;
        }
        if self.imports.contains(name) {
            return true;
        }
        WELL_KNOWN_TYPE_NAMES.contains(name)
    }

    /// True when creating `name` with no enclosing expression would capture
    /// an enclosing instance: the name resolves to a non-static member class
    /// reachable from the lexical chain.
    pub fn member_class_requires_instance(&self, from: ClassId, name: &str) -> bool {
        let simple = name.rsplit('.').next().unwrap_or(name);
        let mut current = Some(from);
        let mut steps = 0;
        while let Some(cid) = current {
            if steps >= MAX_HIERARCHY_STEPS {
                break;
            }
            steps += 1;
            if let Some(found) = self.find_nested(cid, simple) {
                let entry = self.class(found);
                return entry.kind == TypeKind::Class
                    && entry.origin == super::ClassOrigin::Member
                    && !entry.is_static;
            }
            current = self.class(cid).owner;
        }
        false
    }

    /// Direct `implements` clause names `Serializable`, simple or qualified.
    pub fn implements_serializable(&self, class: ClassId) -> bool {
        self.class(class)
            .interfaces
            .iter()
            .any(|n| n.rsplit('.').next().unwrap_or(n) == "Serializable")
    }
}
