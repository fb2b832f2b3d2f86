//! Symbol model - facts about classes, fields, and methods
//!
//! One canonical pre-order walk over every class-shaped scope (named classes,
//! interfaces, enums, local classes, anonymous class bodies) assigns dense
//! ids and records the member facts the analysis asks about. The same scope
//! order is replayed by the rewriter, so a `ClassId` doubles as the scope's
//! position in that walk.

mod facts;

pub use facts::{FieldResolution, MethodResolution};

use crate::ast::*;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassOrigin {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

#[derive(Debug)]
pub struct FieldEntry<'a> {
    pub name: &'a str,
    pub is_static: bool,
    pub is_private: bool,
}

#[derive(Debug)]
pub struct MethodEntry<'a> {
    pub owner: ClassId,
    pub name: &'a str,
    pub arity: usize,
    /// Simple names of the declared parameter types
    pub param_types: Vec<&'a str>,
    pub param_names: Vec<&'a str>,
    pub is_static: bool,
    pub is_private: bool,
    pub is_final: bool,
    pub is_ctor: bool,
    /// Position in the owning declaration's member list
    pub member_index: usize,
    pub body: Option<&'a Block>,
    pub span: Span,
}

impl MethodEntry<'_> {
    /// Private or final: no subclass can replace its dispatch target.
    pub fn is_non_overridable(&self) -> bool {
        self.is_private || self.is_final
    }
}

#[derive(Debug)]
pub struct ClassEntry<'a> {
    /// Empty for anonymous classes
    pub name: &'a str,
    pub kind: TypeKind,
    pub origin: ClassOrigin,
    /// Lexically enclosing class scope
    pub owner: Option<ClassId>,
    pub is_static: bool,
    /// Superclass name as written; for anonymous classes, the created type
    pub superclass: Option<&'a str>,
    /// Direct implemented interface names as written
    pub interfaces: Vec<&'a str>,
    pub fields: Vec<FieldEntry<'a>>,
    pub methods: Vec<MethodId>,
    /// Named member types declared directly in the body
    pub nested: Vec<ClassId>,
    /// Enclosing-method locals visible at the declaration site. Local and
    /// anonymous classes capture these; their candidates resolve such names
    /// as locals, not members.
    pub visible_locals: Vec<&'a str>,
    /// Local class names visible at the declaration site
    pub visible_local_classes: Vec<&'a str>,
}

#[derive(Debug, Default)]
pub struct Model<'a> {
    pub classes: Vec<ClassEntry<'a>>,
    pub methods: Vec<MethodEntry<'a>>,
    pub top_level: Vec<ClassId>,
    /// Simple names introduced by single-type imports
    pub imports: HashSet<&'a str>,
    /// AST declaration node address -> scope id, for re-entering scopes
    /// while walking method bodies
    decl_ids: HashMap<usize, ClassId>,
    /// Build-time lexical environment; flattened into each new entry's
    /// visible_locals / visible_local_classes
    env: Vec<EnvFrame<'a>>,
}

#[derive(Debug, Default)]
struct EnvFrame<'a> {
    vars: Vec<&'a str>,
    classes: Vec<&'a str>,
}

pub fn build(ast: &Ast) -> Model<'_> {
    let mut model = Model::default();
    for import in &ast.imports {
        if !import.is_wildcard && !import.is_static {
            model.imports.insert(import.simple_name());
        }
    }
    for type_decl in &ast.type_decls {
        let id = model.enter_type_decl(type_decl, None, ClassOrigin::TopLevel);
        model.top_level.push(id);
    }
    log::debug!(
        "model: {} scopes, {} methods",
        model.classes.len(),
        model.methods.len()
    );
    model
}

impl<'a> Model<'a> {
    pub fn class(&self, id: ClassId) -> &ClassEntry<'a> {
        &self.classes[id.0 as usize]
    }

    pub fn method(&self, id: MethodId) -> &MethodEntry<'a> {
        &self.methods[id.0 as usize]
    }

    /// Scope id previously assigned to a class-shaped declaration node.
    pub fn class_id_of(&self, key: usize) -> Option<ClassId> {
        self.decl_ids.get(&key).copied()
    }

    /// Dotted display name of a scope, e.g. `A.B` or `A.<anonymous>`.
    pub fn display_name(&self, id: ClassId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cid) = current {
            let entry = self.class(cid);
            if entry.name.is_empty() {
                parts.push("<anonymous>".to_string());
            } else {
                parts.push(entry.name.to_string());
            }
            current = entry.owner;
        }
        parts.reverse();
        parts.join(".")
    }

    fn enter_type_decl(
        &mut self,
        type_decl: &'a TypeDecl,
        owner: Option<ClassId>,
        origin: ClassOrigin,
    ) -> ClassId {
        match type_decl {
            TypeDecl::Class(c) => self.enter_class(c, owner, origin, None),
            TypeDecl::Interface(i) => self.enter_interface(i, owner, origin),
            TypeDecl::Enum(e) => self.enter_enum(e, owner, origin),
        }
    }

    fn push_class_entry(&mut self, mut entry: ClassEntry<'a>, key: usize) -> ClassId {
        entry.visible_locals = self.env.iter().flat_map(|f| f.vars.iter().copied()).collect();
        entry.visible_local_classes = self
            .env
            .iter()
            .flat_map(|f| f.classes.iter().copied())
            .collect();
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(entry);
        self.decl_ids.insert(key, id);
        id
    }

    fn env_push(&mut self) {
        self.env.push(EnvFrame::default());
    }

    fn env_pop(&mut self) {
        self.env.pop();
    }

    fn env_declare_var(&mut self, name: &'a str) {
        if let Some(frame) = self.env.last_mut() {
            frame.vars.push(name);
        }
    }

    fn env_declare_class(&mut self, name: &'a str) {
        if let Some(frame) = self.env.last_mut() {
            frame.classes.push(name);
        }
    }

    fn enter_class(
        &mut self,
        decl: &'a ClassDecl,
        owner: Option<ClassId>,
        origin: ClassOrigin,
        superclass_override: Option<&'a str>,
    ) -> ClassId {
        // Member types directly inside an interface are implicitly static.
        let owner_is_interface = owner
            .map(|o| self.class(o).kind == TypeKind::Interface)
            .unwrap_or(false);
        let superclass = superclass_override
            .or_else(|| decl.extends.as_ref().map(|t| t.name.as_str()));
        let id = self.push_class_entry(
            ClassEntry {
                name: &decl.name,
                kind: TypeKind::Class,
                origin,
                owner,
                is_static: decl.has_modifier(Modifier::Static) || owner_is_interface,
                superclass,
                interfaces: decl.implements.iter().map(|t| t.name.as_str()).collect(),
                fields: Vec::new(),
                methods: Vec::new(),
                nested: Vec::new(),
                visible_locals: Vec::new(),
                visible_local_classes: Vec::new(),
            },
            decl as *const ClassDecl as usize,
        );
        self.enter_class_members(id, &decl.body);
        id
    }

    fn enter_interface(
        &mut self,
        decl: &'a InterfaceDecl,
        owner: Option<ClassId>,
        origin: ClassOrigin,
    ) -> ClassId {
        let id = self.push_class_entry(
            ClassEntry {
                name: &decl.name,
                kind: TypeKind::Interface,
                origin,
                owner,
                is_static: true,
                superclass: None,
                interfaces: decl.extends.iter().map(|t| t.name.as_str()).collect(),
                fields: Vec::new(),
                methods: Vec::new(),
                nested: Vec::new(),
                visible_locals: Vec::new(),
                visible_local_classes: Vec::new(),
            },
            decl as *const InterfaceDecl as usize,
        );
        // Record member facts before any child scope gets an id.
        for (index, member) in decl.body.iter().enumerate() {
            match member {
                InterfaceMember::Field(f) => {
                    // Interface fields are implicitly public static final.
                    self.classes[id.0 as usize].fields.push(FieldEntry {
                        name: &f.name,
                        is_static: true,
                        is_private: false,
                    });
                }
                InterfaceMember::Method(m) => self.record_method(id, index, m),
                InterfaceMember::TypeDecl(_) => {}
            }
        }
        for member in &decl.body {
            match member {
                InterfaceMember::Field(f) => {
                    if let Some(ref init) = f.initializer {
                        self.enter_expr_scopes(init, id);
                    }
                }
                InterfaceMember::Method(m) => {
                    if let Some(ref body) = m.body {
                        self.env_push();
                        for p in &m.parameters {
                            self.env_declare_var(&p.name);
                        }
                        self.enter_block_scopes(body, id);
                        self.env_pop();
                    }
                }
                InterfaceMember::TypeDecl(t) => {
                    let child = self.enter_type_decl(t, Some(id), ClassOrigin::Member);
                    self.classes[id.0 as usize].nested.push(child);
                }
            }
        }
        id
    }

    fn enter_enum(
        &mut self,
        decl: &'a EnumDecl,
        owner: Option<ClassId>,
        origin: ClassOrigin,
    ) -> ClassId {
        let id = self.push_class_entry(
            ClassEntry {
                name: &decl.name,
                kind: TypeKind::Enum,
                origin,
                owner,
                is_static: true,
                superclass: None,
                interfaces: decl.implements.iter().map(|t| t.name.as_str()).collect(),
                fields: Vec::new(),
                methods: Vec::new(),
                nested: Vec::new(),
                visible_locals: Vec::new(),
                visible_local_classes: Vec::new(),
            },
            decl as *const EnumDecl as usize,
        );
        // Enum constants are implicitly public static final fields.
        for constant in &decl.constants {
            self.classes[id.0 as usize].fields.push(FieldEntry {
                name: &constant.name,
                is_static: true,
                is_private: false,
            });
        }
        for constant in &decl.constants {
            for arg in &constant.arguments {
                self.enter_expr_scopes(arg, id);
            }
        }
        self.enter_class_members(id, &decl.body);
        id
    }

    /// Record member facts, then visit child scopes in member order. The
    /// two passes keep sibling methods resolvable from any body in the class
    /// while child scope ids still follow source order.
    fn enter_class_members(&mut self, id: ClassId, body: &'a [ClassMember]) {
        self.record_member_facts(id, body);
        for member in body {
            match member {
                ClassMember::Field(f) => {
                    if let Some(ref init) = f.initializer {
                        self.enter_expr_scopes(init, id);
                    }
                }
                ClassMember::Method(m) => {
                    if let Some(ref body) = m.body {
                        self.env_push();
                        for p in &m.parameters {
                            self.env_declare_var(&p.name);
                        }
                        self.enter_block_scopes(body, id);
                        self.env_pop();
                    }
                }
                ClassMember::Constructor(c) => {
                    self.env_push();
                    for p in &c.parameters {
                        self.env_declare_var(&p.name);
                    }
                    self.enter_block_scopes(&c.body, id);
                    self.env_pop();
                }
                ClassMember::Initializer(i) => {
                    self.enter_block_scopes(&i.body, id);
                }
                ClassMember::TypeDecl(t) => {
                    let child = self.enter_type_decl(t, Some(id), ClassOrigin::Member);
                    self.classes[id.0 as usize].nested.push(child);
                }
            }
        }
    }

    fn record_member_facts(&mut self, id: ClassId, body: &'a [ClassMember]) {
        for (index, member) in body.iter().enumerate() {
            match member {
                ClassMember::Field(f) => {
                    self.classes[id.0 as usize].fields.push(FieldEntry {
                        name: &f.name,
                        is_static: f.has_modifier(Modifier::Static),
                        is_private: f.has_modifier(Modifier::Private),
                    });
                }
                ClassMember::Method(m) => self.record_method(id, index, m),
                ClassMember::Constructor(c) => {
                    let method_id = MethodId(self.methods.len() as u32);
                    self.methods.push(MethodEntry {
                        owner: id,
                        name: &c.name,
                        arity: c.parameters.len(),
                        param_types: c
                            .parameters
                            .iter()
                            .map(|p| p.type_ref.simple_name())
                            .collect(),
                        param_names: c.parameters.iter().map(|p| p.name.as_str()).collect(),
                        is_static: false,
                        is_private: c.modifiers.contains(&Modifier::Private),
                        is_final: false,
                        is_ctor: true,
                        member_index: index,
                        body: Some(&c.body),
                        span: c.span,
                    });
                    self.classes[id.0 as usize].methods.push(method_id);
                }
                ClassMember::Initializer(_) | ClassMember::TypeDecl(_) => {}
            }
        }
    }

    fn record_method(&mut self, id: ClassId, index: usize, m: &'a MethodDecl) {
        let method_id = MethodId(self.methods.len() as u32);
        self.methods.push(MethodEntry {
            owner: id,
            name: &m.name,
            arity: m.parameters.len(),
            param_types: m
                .parameters
                .iter()
                .map(|p| p.type_ref.simple_name())
                .collect(),
            param_names: m.parameters.iter().map(|p| p.name.as_str()).collect(),
            is_static: m.has_modifier(Modifier::Static),
            is_private: m.has_modifier(Modifier::Private),
            is_final: m.has_modifier(Modifier::Final),
            is_ctor: false,
            member_index: index,
            body: m.body.as_ref(),
            span: m.span,
        });
        self.classes[id.0 as usize].methods.push(method_id);
    }

    // Child scope discovery inside bodies. Collected scopes are entered in
    // source order; their own interiors are handled by their own entry.

    fn enter_block_scopes(&mut self, block: &'a Block, owner: ClassId) {
        self.env_push();
        for stmt in &block.statements {
            self.enter_stmt_scopes(stmt, owner);
        }
        self.env_pop();
    }

    fn enter_stmt_scopes(&mut self, stmt: &'a Stmt, owner: ClassId) {
        match stmt {
            Stmt::Expression(e) => self.enter_expr_scopes(&e.expr, owner),
            Stmt::Declaration(d) => {
                for var in &d.variables {
                    if let Some(ref init) = var.initializer {
                        self.enter_expr_scopes(init, owner);
                    }
                    self.env_declare_var(&var.name);
                }
            }
            Stmt::TypeDecl(t) => {
                self.env_declare_class(t.name());
                self.enter_type_decl(t, Some(owner), ClassOrigin::Local);
            }
            Stmt::If(s) => {
                self.enter_expr_scopes(&s.condition, owner);
                self.enter_stmt_scopes(&s.then_branch, owner);
                if let Some(ref else_branch) = s.else_branch {
                    self.enter_stmt_scopes(else_branch, owner);
                }
            }
            Stmt::While(s) => {
                self.enter_expr_scopes(&s.condition, owner);
                self.enter_stmt_scopes(&s.body, owner);
            }
            Stmt::For(s) => {
                self.env_push();
                for init in &s.init {
                    self.enter_stmt_scopes(init, owner);
                }
                if let Some(ref condition) = s.condition {
                    self.enter_expr_scopes(condition, owner);
                }
                for update in &s.update {
                    self.enter_expr_scopes(update, owner);
                }
                self.enter_stmt_scopes(&s.body, owner);
                self.env_pop();
            }
            Stmt::ForEach(s) => {
                self.env_push();
                self.enter_expr_scopes(&s.iterable, owner);
                self.env_declare_var(&s.name);
                self.enter_stmt_scopes(&s.body, owner);
                self.env_pop();
            }
            Stmt::Switch(s) => {
                self.enter_expr_scopes(&s.expression, owner);
                for case in &s.cases {
                    for label in &case.labels {
                        self.enter_expr_scopes(label, owner);
                    }
                    for stmt in &case.statements {
                        self.enter_stmt_scopes(stmt, owner);
                    }
                }
            }
            Stmt::Return(s) => {
                if let Some(ref value) = s.value {
                    self.enter_expr_scopes(value, owner);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty => {}
            Stmt::Try(s) => {
                self.env_push();
                for resource in &s.resources {
                    match resource {
                        TryResource::Var {
                            name, initializer, ..
                        } => {
                            self.enter_expr_scopes(initializer, owner);
                            self.env_declare_var(name);
                        }
                        TryResource::Expr { expr, .. } => self.enter_expr_scopes(expr, owner),
                    }
                }
                self.enter_block_scopes(&s.try_block, owner);
                self.env_pop();
                for catch in &s.catch_clauses {
                    self.env_push();
                    self.env_declare_var(&catch.parameter.name);
                    self.enter_block_scopes(&catch.block, owner);
                    self.env_pop();
                }
                if let Some(ref finally) = s.finally_block {
                    self.enter_block_scopes(finally, owner);
                }
            }
            Stmt::Throw(s) => self.enter_expr_scopes(&s.expr, owner),
            Stmt::Assert(s) => {
                self.enter_expr_scopes(&s.condition, owner);
                if let Some(ref message) = s.message {
                    self.enter_expr_scopes(message, owner);
                }
            }
            Stmt::Synchronized(s) => {
                self.enter_expr_scopes(&s.lock, owner);
                self.enter_block_scopes(&s.body, owner);
            }
            Stmt::Labeled(s) => self.enter_stmt_scopes(&s.statement, owner),
            Stmt::Block(b) => self.enter_block_scopes(b, owner),
        }
    }

    fn enter_expr_scopes(&mut self, expr: &'a Expr, owner: ClassId) {
        match expr {
            Expr::Literal(_) | Expr::Identifier(_) | Expr::This(_) | Expr::Super(_) => {}
            Expr::Binary(b) => {
                self.enter_expr_scopes(&b.left, owner);
                self.enter_expr_scopes(&b.right, owner);
            }
            Expr::Unary(u) => self.enter_expr_scopes(&u.operand, owner),
            Expr::Assignment(a) => {
                self.enter_expr_scopes(&a.target, owner);
                self.enter_expr_scopes(&a.value, owner);
            }
            Expr::MethodCall(c) => {
                if let Some(ref target) = c.target {
                    self.enter_expr_scopes(target, owner);
                }
                for arg in &c.arguments {
                    self.enter_expr_scopes(arg, owner);
                }
            }
            Expr::FieldAccess(f) => self.enter_expr_scopes(&f.target, owner),
            Expr::ArrayAccess(a) => {
                self.enter_expr_scopes(&a.array, owner);
                self.enter_expr_scopes(&a.index, owner);
            }
            Expr::Cast(c) => self.enter_expr_scopes(&c.expr, owner),
            Expr::InstanceOf(i) => self.enter_expr_scopes(&i.expr, owner),
            Expr::Conditional(c) => {
                self.enter_expr_scopes(&c.condition, owner);
                self.enter_expr_scopes(&c.then_expr, owner);
                self.enter_expr_scopes(&c.else_expr, owner);
            }
            Expr::New(n) => {
                if let Some(ref enclosing) = n.enclosing {
                    self.enter_expr_scopes(enclosing, owner);
                }
                for arg in &n.arguments {
                    self.enter_expr_scopes(arg, owner);
                }
                if let Some(ref body) = n.anonymous_body {
                    self.enter_class(
                        body,
                        Some(owner),
                        ClassOrigin::Anonymous,
                        Some(n.target_type.name.as_str()),
                    );
                }
            }
            Expr::NewArray(n) => {
                for dim in &n.dims {
                    self.enter_expr_scopes(dim, owner);
                }
                if let Some(ref init) = n.initializer {
                    self.enter_expr_scopes(init, owner);
                }
            }
            Expr::MethodRef(m) => self.enter_expr_scopes(&m.target, owner),
            Expr::Parenthesized(e) => self.enter_expr_scopes(e, owner),
            Expr::ArrayInitializer(a) => {
                for value in &a.values {
                    self.enter_expr_scopes(value, owner);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_java;

    #[test]
    fn scope_order_is_preorder() {
        let source = r#"
class A {
    class B {
        class C {}
    }
    class D {}
}
class E {}
"#;
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        let names: Vec<&str> = model.classes.iter().map(|c| c.name).collect();
        assert_eq!(names, ["A", "B", "C", "D", "E"]);
        assert_eq!(model.class(ClassId(1)).owner, Some(ClassId(0)));
        assert_eq!(model.class(ClassId(2)).owner, Some(ClassId(1)));
        assert_eq!(model.class(ClassId(4)).owner, None);
    }

    #[test]
    fn anonymous_and_local_scopes() {
        let source = r#"
interface I {}
class A {
    I i = new I() {
        int x = 0;
    };
    void m() {
        class Local {}
    }
}
"#;
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        assert_eq!(model.classes.len(), 4);
        let anon = &model.classes[2];
        assert_eq!(anon.origin, ClassOrigin::Anonymous);
        assert_eq!(anon.superclass, Some("I"));
        assert_eq!(anon.fields.len(), 1);
        let local = &model.classes[3];
        assert_eq!(local.origin, ClassOrigin::Local);
        assert_eq!(local.name, "Local");
    }

    #[test]
    fn method_facts() {
        let source = r#"
class A {
    static int s() { return 0; }
    private int p() { return 0; }
    final int f() { return 0; }
    A() {}
}
"#;
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        let class = model.class(ClassId(0));
        assert_eq!(class.methods.len(), 4);
        let s = model.method(class.methods[0]);
        assert!(s.is_static && !s.is_non_overridable());
        let p = model.method(class.methods[1]);
        assert!(p.is_private && p.is_non_overridable() && !p.is_static);
        let f = model.method(class.methods[2]);
        assert!(f.is_final && !f.is_private);
        let ctor = model.method(class.methods[3]);
        assert!(ctor.is_ctor);
        assert_eq!(ctor.member_index, 3);
    }

    #[test]
    fn local_scope_snapshots() {
        let source = r#"
interface I {}
class A {
    void m(int parameter) {
        int local = 0;
        class C {}
        I i = new I() {};
    }
}
"#;
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        let local = &model.classes[2];
        assert_eq!(local.name, "C");
        assert_eq!(local.visible_locals, ["parameter", "local"]);
        let anon = &model.classes[3];
        assert_eq!(anon.origin, ClassOrigin::Anonymous);
        assert_eq!(anon.visible_locals, ["parameter", "local"]);
        // the local class is visible to the later anonymous scope
        assert_eq!(anon.visible_local_classes, ["C"]);
        // member classes capture nothing
        assert!(model.classes[1].visible_locals.is_empty());
    }

    #[test]
    fn interface_fields_are_static() {
        let source = "interface I { int X = 1; }";
        let ast = parse_java(source).unwrap();
        let model = build(&ast);
        assert!(model.class(ClassId(0)).fields[0].is_static);
    }
}
