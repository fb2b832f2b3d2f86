//! Instance-access classification
//!
//! One depth-first walk over a candidate method body decides whether the
//! method touches instance state. The walk stops the moment access is
//! established; otherwise it accumulates invocation edges to sibling
//! candidates, which the fixpoint resolver settles later.
//!
//! Anything that does not resolve is treated as instance access: an
//! unresolvable reference could be an inherited instance member, so the
//! method is kept out of the eligible set rather than risk an unsound
//! promotion.

use crate::ast::*;
use crate::model::{ClassId, FieldResolution, MethodId, MethodResolution, Model};
use std::collections::{BTreeSet, HashSet};

/// Outcome of classifying one candidate body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    InstanceAccess,
    /// No direct instance access; eligibility still depends on these callees.
    Clean { edges: BTreeSet<MethodId> },
}

pub fn classify(model: &Model<'_>, eligible: &HashSet<MethodId>, method: MethodId) -> Verdict {
    let entry = model.method(method);
    let body = match entry.body {
        Some(body) => body,
        // No body to prove anything about (e.g. native); fail closed.
        None => return Verdict::InstanceAccess,
    };
    // Local and anonymous classes capture the enclosing method's locals;
    // those names sit below the class's own member boundary, matching Java's
    // shadowing order.
    let owner_entry = model.class(entry.owner);
    let captured = Scope::Locals {
        vars: owner_entry.visible_locals.iter().copied().collect(),
        classes: owner_entry.visible_local_classes.iter().copied().collect(),
    };
    let mut classifier = Classifier {
        model,
        eligible,
        candidate_class: entry.owner,
        scopes: vec![captured, Scope::Class(entry.owner)],
        access: false,
        edges: BTreeSet::new(),
    };
    classifier.scopes.push(Scope::locals());
    for name in entry.param_names.iter().copied() {
        classifier.declare_var(name);
    }
    classifier.walk_block(body);
    if classifier.access {
        Verdict::InstanceAccess
    } else {
        Verdict::Clean {
            edges: classifier.edges,
        }
    }
}

enum Scope<'a> {
    /// Local variables and local class names of one block-ish region
    Locals {
        vars: HashSet<&'a str>,
        classes: HashSet<&'a str>,
    },
    /// Boundary pushed when the walk dives into a nested class body; member
    /// resolution runs against this class before falling through to outer
    /// locals, which mirrors Java's shadowing order.
    Class(ClassId),
}

impl<'a> Scope<'a> {
    fn locals() -> Self {
        Scope::Locals {
            vars: HashSet::new(),
            classes: HashSet::new(),
        }
    }
}

enum IdResolution {
    Local,
    LocalClass,
    Member { is_static: bool },
    TypeName,
    Unknown,
}

enum CallResolution {
    Found {
        id: MethodId,
        owner: ClassId,
        is_static: bool,
    },
    Unknown,
}

struct Classifier<'m, 'a> {
    model: &'m Model<'a>,
    eligible: &'m HashSet<MethodId>,
    candidate_class: ClassId,
    scopes: Vec<Scope<'a>>,
    access: bool,
    edges: BTreeSet<MethodId>,
}

impl<'m, 'a> Classifier<'m, 'a> {
    fn mark_access(&mut self) {
        self.access = true;
    }

    fn push_locals(&mut self) {
        self.scopes.push(Scope::locals());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare_var(&mut self, name: &'a str) {
        if let Some(Scope::Locals { vars, .. }) = self.scopes.last_mut() {
            vars.insert(name);
        }
    }

    fn declare_local_class(&mut self, name: &'a str) {
        if let Some(Scope::Locals { classes, .. }) = self.scopes.last_mut() {
            classes.insert(name);
        }
    }

    /// Class the walk currently stands in: the innermost dive boundary.
    fn current_class(&self) -> ClassId {
        for scope in self.scopes.iter().rev() {
            if let Scope::Class(cid) = scope {
                return *cid;
            }
        }
        self.candidate_class
    }

    fn is_local_class(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| match scope {
            Scope::Locals { classes, .. } => classes.contains(name),
            Scope::Class(_) => false,
        })
    }

    /// Resolve a bare identifier: innermost locals first, then each class
    /// boundary's own+superclass members, then the lexical owner chain.
    fn resolve_identifier(&self, name: &str) -> IdResolution {
        for scope in self.scopes.iter().rev() {
            match scope {
                Scope::Locals { vars, classes } => {
                    if vars.contains(name) {
                        return IdResolution::Local;
                    }
                    if classes.contains(name) {
                        return IdResolution::LocalClass;
                    }
                }
                Scope::Class(cid) => {
                    if let FieldResolution::Found { is_static } =
                        self.model.resolve_field_here(*cid, name)
                    {
                        return IdResolution::Member { is_static };
                    }
                }
            }
        }
        let mut owner = self.model.class(self.candidate_class).owner;
        while let Some(cid) = owner {
            if let FieldResolution::Found { is_static } = self.model.resolve_field_here(cid, name) {
                return IdResolution::Member { is_static };
            }
            owner = self.model.class(cid).owner;
        }
        if self.is_type_name(name) {
            return IdResolution::TypeName;
        }
        IdResolution::Unknown
    }

    fn is_type_name(&self, name: &str) -> bool {
        self.is_local_class(name) || self.model.is_type_name(self.current_class(), name)
    }

    /// Resolve a call with no explicit receiver along the same scope order.
    fn resolve_call(&self, name: &str, argc: usize) -> CallResolution {
        for scope in self.scopes.iter().rev() {
            if let Scope::Class(cid) = scope {
                match self.model.resolve_method_here(*cid, name, argc) {
                    MethodResolution::Found {
                        id,
                        owner,
                        is_static,
                    } => {
                        return CallResolution::Found {
                            id,
                            owner,
                            is_static,
                        }
                    }
                    MethodResolution::ArityMismatch => return CallResolution::Unknown,
                    MethodResolution::NotFound => {}
                }
            }
        }
        let mut owner = self.model.class(self.candidate_class).owner;
        while let Some(cid) = owner {
            match self.model.resolve_method_here(cid, name, argc) {
                MethodResolution::Found {
                    id,
                    owner,
                    is_static,
                } => {
                    return CallResolution::Found {
                        id,
                        owner,
                        is_static,
                    }
                }
                MethodResolution::ArityMismatch => return CallResolution::Unknown,
                MethodResolution::NotFound => {}
            }
            owner = self.model.class(cid).owner;
        }
        CallResolution::Unknown
    }

    // Statement walk

    fn walk_block(&mut self, block: &'a Block) {
        if self.access {
            return;
        }
        self.push_locals();
        for stmt in &block.statements {
            self.walk_stmt(stmt);
            if self.access {
                break;
            }
        }
        self.pop_scope();
    }

    fn walk_stmt(&mut self, stmt: &'a Stmt) {
        if self.access {
            return;
        }
        match stmt {
            Stmt::Expression(e) => self.walk_expr(&e.expr),
            Stmt::Declaration(d) => {
                for var in &d.variables {
                    if let Some(ref init) = var.initializer {
                        self.walk_expr(init);
                    }
                    self.declare_var(&var.name);
                }
            }
            Stmt::TypeDecl(t) => {
                self.declare_local_class(t.name());
                self.dive_type_decl(t);
            }
            Stmt::If(s) => {
                self.walk_expr(&s.condition);
                self.walk_stmt(&s.then_branch);
                if let Some(ref else_branch) = s.else_branch {
                    self.walk_stmt(else_branch);
                }
            }
            Stmt::While(s) => {
                self.walk_expr(&s.condition);
                self.walk_stmt(&s.body);
            }
            Stmt::For(s) => {
                self.push_locals();
                for init in &s.init {
                    self.walk_stmt(init);
                }
                if let Some(ref condition) = s.condition {
                    self.walk_expr(condition);
                }
                for update in &s.update {
                    self.walk_expr(update);
                }
                self.walk_stmt(&s.body);
                self.pop_scope();
            }
            Stmt::ForEach(s) => {
                self.push_locals();
                self.walk_expr(&s.iterable);
                self.declare_var(&s.name);
                self.walk_stmt(&s.body);
                self.pop_scope();
            }
            Stmt::Switch(s) => {
                self.walk_expr(&s.expression);
                self.push_locals();
                for case in &s.cases {
                    for label in &case.labels {
                        // Case labels are constants; a bare name here is an
                        // enum constant or constant field, never instance state
                        if !matches!(label, Expr::Identifier(_)) {
                            self.walk_expr(label);
                        }
                    }
                    for stmt in &case.statements {
                        self.walk_stmt(stmt);
                    }
                }
                self.pop_scope();
            }
            Stmt::Return(s) => {
                if let Some(ref value) = s.value {
                    self.walk_expr(value);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty => {}
            Stmt::Try(s) => {
                self.push_locals();
                for resource in &s.resources {
                    match resource {
                        TryResource::Var {
                            name, initializer, ..
                        } => {
                            self.walk_expr(initializer);
                            self.declare_var(name);
                        }
                        TryResource::Expr { expr, .. } => self.walk_expr(expr),
                    }
                }
                self.walk_block(&s.try_block);
                self.pop_scope();
                for catch in &s.catch_clauses {
                    self.push_locals();
                    self.declare_var(&catch.parameter.name);
                    self.walk_block(&catch.block);
                    self.pop_scope();
                }
                if let Some(ref finally) = s.finally_block {
                    self.walk_block(finally);
                }
            }
            Stmt::Throw(s) => self.walk_expr(&s.expr),
            Stmt::Assert(s) => {
                self.walk_expr(&s.condition);
                if let Some(ref message) = s.message {
                    self.walk_expr(message);
                }
            }
            Stmt::Synchronized(s) => {
                self.walk_expr(&s.lock);
                self.walk_block(&s.body);
            }
            Stmt::Labeled(s) => self.walk_stmt(&s.statement),
            Stmt::Block(b) => self.walk_block(b),
        }
    }

    // Expression walk

    fn walk_expr(&mut self, expr: &'a Expr) {
        if self.access {
            return;
        }
        match expr {
            Expr::Literal(_) => {}
            Expr::Identifier(id) => self.classify_identifier_use(&id.name),
            // `this`/`super` as a value; qualifier positions are consumed by
            // the parent nodes below and never reach here
            Expr::This(_) | Expr::Super(_) => self.mark_access(),
            Expr::Binary(b) => {
                self.walk_expr(&b.left);
                self.walk_expr(&b.right);
            }
            Expr::Unary(u) => self.walk_expr(&u.operand),
            Expr::Assignment(a) => {
                self.walk_expr(&a.target);
                self.walk_expr(&a.value);
            }
            Expr::MethodCall(call) => self.walk_method_call(call),
            Expr::FieldAccess(fa) => self.walk_field_access(fa),
            Expr::ArrayAccess(a) => {
                self.walk_expr(&a.array);
                self.walk_expr(&a.index);
            }
            Expr::Cast(c) => self.walk_expr(&c.expr),
            Expr::InstanceOf(i) => self.walk_expr(&i.expr),
            Expr::Conditional(c) => {
                self.walk_expr(&c.condition);
                self.walk_expr(&c.then_expr);
                self.walk_expr(&c.else_expr);
            }
            Expr::New(n) => self.walk_new(n),
            Expr::NewArray(n) => {
                for dim in &n.dims {
                    self.walk_expr(dim);
                }
                if let Some(ref init) = n.initializer {
                    self.walk_expr(init);
                }
            }
            Expr::MethodRef(mr) => self.walk_method_ref(mr),
            Expr::Parenthesized(e) => self.walk_expr(e),
            Expr::ArrayInitializer(a) => {
                for value in &a.values {
                    self.walk_expr(value);
                }
            }
        }
    }

    fn classify_identifier_use(&mut self, name: &str) {
        match self.resolve_identifier(name) {
            IdResolution::Local | IdResolution::LocalClass | IdResolution::TypeName => {}
            IdResolution::Member { is_static: true } => {}
            IdResolution::Member { is_static: false } => self.mark_access(),
            IdResolution::Unknown => self.mark_access(),
        }
    }

    fn walk_field_access(&mut self, fa: &'a FieldAccessExpr) {
        match &*fa.target {
            // `this.name` / `super.name`: classify the member itself; the
            // qualifier alone does not establish access
            Expr::This(_) => {
                match self.model.resolve_field_here(self.current_class(), &fa.name) {
                    FieldResolution::Found { is_static: true } => {}
                    _ => self.mark_access(),
                }
            }
            Expr::Super(_) => {
                match self.model.resolve_field_super(self.current_class(), &fa.name) {
                    FieldResolution::Found { is_static: true } => {}
                    _ => self.mark_access(),
                }
            }
            // Any other qualifier targets some other value; only the
            // left-most segment is evaluated, the tail never is
            target => self.walk_expr(target),
        }
    }

    fn walk_method_call(&mut self, call: &'a MethodCallExpr) {
        match &call.target {
            None => {
                // `this(...)`/`super(...)` constructor delegation only occurs
                // inside constructors of classes declared in this body
                if call.name != "this" && call.name != "super" {
                    self.classify_bare_call(&call.name, call.arguments.len());
                }
            }
            Some(target) => match &**target {
                Expr::This(_) => {
                    match self
                        .model
                        .resolve_method_here(self.current_class(), &call.name, call.arguments.len())
                    {
                        MethodResolution::Found { is_static: true, .. } => {}
                        _ => self.mark_access(),
                    }
                }
                Expr::Super(_) => {
                    match self.model.resolve_method_super(
                        self.current_class(),
                        &call.name,
                        call.arguments.len(),
                    ) {
                        MethodResolution::Found { is_static: true, .. } => {}
                        _ => self.mark_access(),
                    }
                }
                other => self.walk_expr(other),
            },
        }
        for arg in &call.arguments {
            self.walk_expr(arg);
        }
    }

    /// Call with no explicit receiver: static callees are harmless, callees
    /// already proven eligible are harmless, a sibling candidate becomes an
    /// invocation edge, and everything else is an implicit-this dispatch.
    fn classify_bare_call(&mut self, name: &str, argc: usize) {
        match self.resolve_call(name, argc) {
            CallResolution::Found { is_static: true, .. } => {}
            CallResolution::Found { id, owner, .. } => {
                let callee = self.model.method(id);
                if self.eligible.contains(&id) {
                    // finalized as static-safe by an earlier scope
                } else if owner == self.candidate_class
                    && callee.is_non_overridable()
                    && !callee.is_ctor
                {
                    self.edges.insert(id);
                } else {
                    self.mark_access();
                }
            }
            CallResolution::Unknown => self.mark_access(),
        }
    }

    fn walk_new(&mut self, n: &'a NewExpr) {
        match &n.enclosing {
            Some(enclosing) => {
                // `outer.new Inner()`: some other instance supplies the
                // enclosing object, so only the qualifier is examined
                self.walk_expr(enclosing);
            }
            None => {
                let created = &n.target_type.name;
                if !self.is_local_class(simple_name(created))
                    && self
                        .model
                        .member_class_requires_instance(self.current_class(), created)
                {
                    self.mark_access();
                }
            }
        }
        for arg in &n.arguments {
            self.walk_expr(arg);
        }
        if let Some(ref body) = n.anonymous_body {
            self.dive_class_body(body);
        }
    }

    fn walk_method_ref(&mut self, mr: &'a MethodRefExpr) {
        match &*mr.target {
            // A this-bound method reference captures the instance
            Expr::This(_) | Expr::Super(_) => self.mark_access(),
            Expr::Identifier(id) => match self.resolve_identifier(&id.name) {
                IdResolution::Local | IdResolution::LocalClass => {}
                IdResolution::TypeName => {
                    if mr.name == "new"
                        && self
                            .model
                            .member_class_requires_instance(self.current_class(), &id.name)
                    {
                        self.mark_access();
                    }
                }
                IdResolution::Member { is_static: true } => {}
                IdResolution::Member { is_static: false } => self.mark_access(),
                IdResolution::Unknown => self.mark_access(),
            },
            other => self.walk_expr(other),
        }
    }

    // Nested class bodies inside the candidate: the walk continues with the
    // nested class as the innermost member-resolution boundary, while outer
    // locals stay visible below it.

    fn dive_type_decl(&mut self, type_decl: &'a TypeDecl) {
        if self.access {
            return;
        }
        match type_decl {
            TypeDecl::Class(c) => self.dive_class_body(c),
            TypeDecl::Enum(e) => self.dive_enum_body(e),
            TypeDecl::Interface(i) => self.dive_interface_body(i),
        }
    }

    fn dive_class_body(&mut self, decl: &'a ClassDecl) {
        if self.access {
            return;
        }
        let key = decl as *const ClassDecl as usize;
        let Some(cid) = self.model.class_id_of(key) else {
            // A body the model does not know cannot be classified; fail closed.
            self.mark_access();
            return;
        };
        self.scopes.push(Scope::Class(cid));
        for member in &decl.body {
            if self.access {
                break;
            }
            self.dive_class_member(member);
        }
        self.pop_scope();
    }

    fn dive_enum_body(&mut self, decl: &'a EnumDecl) {
        if self.access {
            return;
        }
        let key = decl as *const EnumDecl as usize;
        let Some(cid) = self.model.class_id_of(key) else {
            self.mark_access();
            return;
        };
        self.scopes.push(Scope::Class(cid));
        for constant in &decl.constants {
            for arg in &constant.arguments {
                self.walk_expr(arg);
            }
        }
        for member in &decl.body {
            if self.access {
                break;
            }
            self.dive_class_member(member);
        }
        self.pop_scope();
    }

    fn dive_interface_body(&mut self, decl: &'a InterfaceDecl) {
        if self.access {
            return;
        }
        let key = decl as *const InterfaceDecl as usize;
        let Some(cid) = self.model.class_id_of(key) else {
            self.mark_access();
            return;
        };
        self.scopes.push(Scope::Class(cid));
        for member in &decl.body {
            if self.access {
                break;
            }
            match member {
                InterfaceMember::Field(f) => {
                    if let Some(ref init) = f.initializer {
                        self.walk_expr(init);
                    }
                }
                InterfaceMember::Method(m) => self.dive_method(m),
                InterfaceMember::TypeDecl(t) => self.dive_type_decl(t),
            }
        }
        self.pop_scope();
    }

    fn dive_class_member(&mut self, member: &'a ClassMember) {
        match member {
            ClassMember::Field(f) => {
                if let Some(ref init) = f.initializer {
                    self.walk_expr(init);
                }
            }
            ClassMember::Method(m) => self.dive_method(m),
            ClassMember::Constructor(c) => {
                self.push_locals();
                for p in &c.parameters {
                    self.declare_var(&p.name);
                }
                self.walk_block(&c.body);
                self.pop_scope();
            }
            ClassMember::Initializer(i) => self.walk_block(&i.body),
            ClassMember::TypeDecl(t) => self.dive_type_decl(t),
        }
    }

    fn dive_method(&mut self, m: &'a MethodDecl) {
        if let Some(ref body) = m.body {
            self.push_locals();
            for p in &m.parameters {
                self.declare_var(&p.name);
            }
            self.walk_block(body);
            self.pop_scope();
        }
    }
}

fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::build;
    use crate::parser::parse_java;

    /// Classify the first candidate-looking method of the named class.
    fn verdict_of(source: &str, class_name: &str, method_name: &str) -> Verdict {
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        let class = model
            .classes
            .iter()
            .position(|c| c.name == class_name)
            .expect("class not found");
        let id = model.classes[class]
            .methods
            .iter()
            .copied()
            .find(|m| model.method(*m).name == method_name)
            .expect("method not found");
        classify(&model, &HashSet::new(), id)
    }

    fn assert_access(source: &str, class_name: &str, method_name: &str) {
        assert_eq!(
            verdict_of(source, class_name, method_name),
            Verdict::InstanceAccess,
            "expected instance access in {}.{}",
            class_name,
            method_name
        );
    }

    fn assert_clean(source: &str, class_name: &str, method_name: &str) {
        match verdict_of(source, class_name, method_name) {
            Verdict::Clean { .. } => {}
            Verdict::InstanceAccess => {
                panic!("expected clean verdict for {}.{}", class_name, method_name)
            }
        }
    }

    #[test]
    fn literal_body_is_clean() {
        assert_clean("class A { private int test() { return 0; } }", "A", "test");
    }

    #[test]
    fn instance_field_read() {
        assert_access(
            "class A { int a = 0; private int test() { return a; } }",
            "A",
            "test",
        );
    }

    #[test]
    fn static_field_read_is_clean() {
        assert_clean(
            "class A { static int f = 0; private int test() { return f; } }",
            "A",
            "test",
        );
    }

    #[test]
    fn parameter_shadows_field() {
        assert_clean(
            "class A { int a = 0; private int test(int a) { return a; } }",
            "A",
            "test",
        );
    }

    #[test]
    fn local_shadows_field_after_declaration_only() {
        // `int i = a;` reads the field before `i` is in scope
        assert_access(
            "class A { int a = 0; private int test() { int i = a; return i; } }",
            "A",
            "test",
        );
    }

    #[test]
    fn this_as_value() {
        assert_access("class A { private A test() { return this; } }", "A", "test");
    }

    #[test]
    fn super_call_is_access() {
        assert_access(
            "class A { private int test() { return super.hashCode(); } }",
            "A",
            "test",
        );
    }

    #[test]
    fn explicit_this_instance_method() {
        assert_access(
            "class A { void method() {} private void test() { this.method(); } }",
            "A",
            "test",
        );
    }

    #[test]
    fn unknown_identifier_fails_closed() {
        assert_access("class A { private int test() { return mystery; } }", "A", "test");
    }

    #[test]
    fn other_instance_member_is_clean() {
        assert_clean(
            "class A { int field = 0; private int test(A a) { return a.field; } }",
            "A",
            "test",
        );
    }

    #[test]
    fn static_chain_qualifier_is_clean() {
        assert_clean(
            r#"
class A {
    class B {
        static int field = 0;
    }
    private int test() {
        return B.field;
    }
}
"#,
            "A",
            "test",
        );
    }

    #[test]
    fn sibling_candidate_becomes_edge() {
        let source = r#"
class A {
    private int a() { return b(); }
    private int b() { return 0; }
}
"#;
        match verdict_of(source, "A", "a") {
            Verdict::Clean { edges } => assert_eq!(edges.len(), 1),
            Verdict::InstanceAccess => panic!("expected clean verdict with an edge"),
        }
    }

    #[test]
    fn overridable_callee_is_access() {
        assert_access(
            "class A { void method() {} private void test() { method(); } }",
            "A",
            "test",
        );
    }

    #[test]
    fn inherited_instance_member_is_access() {
        assert_access(
            r#"
class B {
    protected int b = 0;
}
class A extends B {
    private int test() { return b; }
}
"#,
            "A",
            "test",
        );
    }

    #[test]
    fn inner_class_instantiation_is_access() {
        assert_access(
            "class A { class B {} private B test() { return new B(); } }",
            "A",
            "test",
        );
    }

    #[test]
    fn static_nested_instantiation_is_clean() {
        assert_clean(
            "class A { static class B {} private B test() { return new B(); } }",
            "A",
            "test",
        );
    }

    #[test]
    fn qualified_new_is_clean() {
        assert_clean(
            "class A { class B {} private B test(A a) { return a.new B(); } }",
            "A",
            "test",
        );
    }

    #[test]
    fn local_class_instantiation_is_clean() {
        assert_clean(
            r#"
class A {
    private void test() {
        class C {}
        C c = new C();
    }
}
"#,
            "A",
            "test",
        );
    }

    #[test]
    fn local_class_reading_enclosing_field_is_access() {
        assert_access(
            r#"
class A {
    int a = 0;
    private int test() {
        class C {
            int field = a;
        }
        C c = new C();
        return c.field;
    }
}
"#,
            "A",
            "test",
        );
    }

    #[test]
    fn anonymous_body_reading_outer_parameter_is_clean() {
        assert_clean(
            r#"
interface I {}
class A {
    private void test(int parameter) {
        I i = new I() {
            private int inner() { return parameter; }
        };
    }
}
"#,
            "A",
            "test",
        );
    }

    #[test]
    fn anonymous_candidate_resolves_captured_parameter() {
        // classified at the anonymous class's own scope, not as part of `a`
        let source = r#"
interface I {}
class A {
    int parameter = 1;
    void a(int parameter) {
        I i = new I() {
            private int test() { return parameter; }
        };
    }
}
"#;
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        let anon = model
            .classes
            .iter()
            .position(|c| c.name.is_empty())
            .expect("anonymous scope");
        let id = model.classes[anon].methods[0];
        // the captured method parameter shadows A's field of the same name
        match classify(&model, &HashSet::new(), id) {
            Verdict::Clean { edges } => assert!(edges.is_empty()),
            Verdict::InstanceAccess => panic!("captured parameter classified as member"),
        }
    }

    #[test]
    fn this_bound_method_reference_is_access() {
        assert_access(
            "class A { void run() {} private Runnable test() { return this::run; } }",
            "A",
            "test",
        );
    }
}
