//! Rewriting: append the static qualifier
//!
//! Replays the canonical scope walk (the same order the model builder used
//! to assign scope ids) over the mutable tree and appends `static` to the
//! modifier list of every promoted method. Nothing else is touched, and a
//! method that already carries `static` is left alone, which together with
//! the collector's entry filter makes the whole pipeline idempotent.

use super::driver::Promotion;
use crate::ast::*;
use std::collections::HashSet;

pub fn apply(ast: &mut Ast, promotions: &[Promotion]) -> usize {
    let targets: HashSet<(usize, usize)> = promotions
        .iter()
        .map(|p| (p.scope_index, p.member_index))
        .collect();
    let mut rewriter = Rewriter {
        targets,
        next_scope: 0,
        added: 0,
    };
    for type_decl in &mut ast.type_decls {
        rewriter.rewrite_type_decl(type_decl);
    }
    rewriter.added
}

struct Rewriter {
    targets: HashSet<(usize, usize)>,
    next_scope: usize,
    added: usize,
}

impl Rewriter {
    fn enter_scope(&mut self) -> usize {
        let index = self.next_scope;
        self.next_scope += 1;
        index
    }

    fn rewrite_type_decl(&mut self, type_decl: &mut TypeDecl) {
        match type_decl {
            TypeDecl::Class(c) => self.rewrite_class(c),
            TypeDecl::Interface(i) => self.rewrite_interface(i),
            TypeDecl::Enum(e) => self.rewrite_enum(e),
        }
    }

    fn rewrite_class(&mut self, decl: &mut ClassDecl) {
        let scope = self.enter_scope();
        self.mark_members(scope, &mut decl.body);
        self.rewrite_members(&mut decl.body);
    }

    fn rewrite_interface(&mut self, decl: &mut InterfaceDecl) {
        // Interfaces contribute no promotions, but their scope index and the
        // scopes inside their bodies must advance exactly as in the model.
        self.enter_scope();
        for member in &mut decl.body {
            match member {
                InterfaceMember::Field(f) => {
                    if let Some(ref mut init) = f.initializer {
                        self.rewrite_expr(init);
                    }
                }
                InterfaceMember::Method(m) => {
                    if let Some(ref mut body) = m.body {
                        self.rewrite_block(body);
                    }
                }
                InterfaceMember::TypeDecl(t) => self.rewrite_type_decl(t),
            }
        }
    }

    fn rewrite_enum(&mut self, decl: &mut EnumDecl) {
        let scope = self.enter_scope();
        for constant in &mut decl.constants {
            for arg in &mut constant.arguments {
                self.rewrite_expr(arg);
            }
        }
        self.mark_members(scope, &mut decl.body);
        self.rewrite_members(&mut decl.body);
    }

    /// Append `static` to this scope's promoted methods.
    fn mark_members(&mut self, scope: usize, body: &mut [ClassMember]) {
        for (index, member) in body.iter_mut().enumerate() {
            if !self.targets.contains(&(scope, index)) {
                continue;
            }
            if let ClassMember::Method(method) = member {
                if !method.has_modifier(Modifier::Static) {
                    method.modifiers.push(Modifier::Static);
                    self.added += 1;
                }
            }
        }
    }

    fn rewrite_members(&mut self, body: &mut [ClassMember]) {
        for member in body.iter_mut() {
            match member {
                ClassMember::Field(f) => {
                    if let Some(ref mut init) = f.initializer {
                        self.rewrite_expr(init);
                    }
                }
                ClassMember::Method(m) => {
                    if let Some(ref mut body) = m.body {
                        self.rewrite_block(body);
                    }
                }
                ClassMember::Constructor(c) => self.rewrite_block(&mut c.body),
                ClassMember::Initializer(i) => self.rewrite_block(&mut i.body),
                ClassMember::TypeDecl(t) => self.rewrite_type_decl(t),
            }
        }
    }

    // The statement/expression scans below mirror the model builder's scope
    // discovery; both must enumerate nested scopes in the same order.

    fn rewrite_block(&mut self, block: &mut Block) {
        for stmt in &mut block.statements {
            self.rewrite_stmt(stmt);
        }
    }

    fn rewrite_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Expression(e) => self.rewrite_expr(&mut e.expr),
            Stmt::Declaration(d) => {
                for var in &mut d.variables {
                    if let Some(ref mut init) = var.initializer {
                        self.rewrite_expr(init);
                    }
                }
            }
            Stmt::TypeDecl(t) => self.rewrite_type_decl(t),
            Stmt::If(s) => {
                self.rewrite_expr(&mut s.condition);
                self.rewrite_stmt(&mut s.then_branch);
                if let Some(ref mut else_branch) = s.else_branch {
                    self.rewrite_stmt(else_branch);
                }
            }
            Stmt::While(s) => {
                self.rewrite_expr(&mut s.condition);
                self.rewrite_stmt(&mut s.body);
            }
            Stmt::For(s) => {
                for init in &mut s.init {
                    self.rewrite_stmt(init);
                }
                if let Some(ref mut condition) = s.condition {
                    self.rewrite_expr(condition);
                }
                for update in &mut s.update {
                    self.rewrite_expr(update);
                }
                self.rewrite_stmt(&mut s.body);
            }
            Stmt::ForEach(s) => {
                self.rewrite_expr(&mut s.iterable);
                self.rewrite_stmt(&mut s.body);
            }
            Stmt::Switch(s) => {
                self.rewrite_expr(&mut s.expression);
                for case in &mut s.cases {
                    for label in &mut case.labels {
                        self.rewrite_expr(label);
                    }
                    for stmt in &mut case.statements {
                        self.rewrite_stmt(stmt);
                    }
                }
            }
            Stmt::Return(s) => {
                if let Some(ref mut value) = s.value {
                    self.rewrite_expr(value);
                }
            }
            Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty => {}
            Stmt::Try(s) => {
                for resource in &mut s.resources {
                    match resource {
                        TryResource::Var { initializer, .. } => self.rewrite_expr(initializer),
                        TryResource::Expr { expr, .. } => self.rewrite_expr(expr),
                    }
                }
                self.rewrite_block(&mut s.try_block);
                for catch in &mut s.catch_clauses {
                    self.rewrite_block(&mut catch.block);
                }
                if let Some(ref mut finally) = s.finally_block {
                    self.rewrite_block(finally);
                }
            }
            Stmt::Throw(s) => self.rewrite_expr(&mut s.expr),
            Stmt::Assert(s) => {
                self.rewrite_expr(&mut s.condition);
                if let Some(ref mut message) = s.message {
                    self.rewrite_expr(message);
                }
            }
            Stmt::Synchronized(s) => {
                self.rewrite_expr(&mut s.lock);
                self.rewrite_block(&mut s.body);
            }
            Stmt::Labeled(s) => self.rewrite_stmt(&mut s.statement),
            Stmt::Block(b) => self.rewrite_block(b),
        }
    }

    fn rewrite_expr(&mut self, expr: &mut Expr) {
        match expr {
            Expr::Literal(_) | Expr::Identifier(_) | Expr::This(_) | Expr::Super(_) => {}
            Expr::Binary(b) => {
                self.rewrite_expr(&mut b.left);
                self.rewrite_expr(&mut b.right);
            }
            Expr::Unary(u) => self.rewrite_expr(&mut u.operand),
            Expr::Assignment(a) => {
                self.rewrite_expr(&mut a.target);
                self.rewrite_expr(&mut a.value);
            }
            Expr::MethodCall(c) => {
                if let Some(ref mut target) = c.target {
                    self.rewrite_expr(target);
                }
                for arg in &mut c.arguments {
                    self.rewrite_expr(arg);
                }
            }
            Expr::FieldAccess(f) => self.rewrite_expr(&mut f.target),
            Expr::ArrayAccess(a) => {
                self.rewrite_expr(&mut a.array);
                self.rewrite_expr(&mut a.index);
            }
            Expr::Cast(c) => self.rewrite_expr(&mut c.expr),
            Expr::InstanceOf(i) => self.rewrite_expr(&mut i.expr),
            Expr::Conditional(c) => {
                self.rewrite_expr(&mut c.condition);
                self.rewrite_expr(&mut c.then_expr);
                self.rewrite_expr(&mut c.else_expr);
            }
            Expr::New(n) => {
                if let Some(ref mut enclosing) = n.enclosing {
                    self.rewrite_expr(enclosing);
                }
                for arg in &mut n.arguments {
                    self.rewrite_expr(arg);
                }
                if let Some(ref mut body) = n.anonymous_body {
                    self.rewrite_class(body);
                }
            }
            Expr::NewArray(n) => {
                for dim in &mut n.dims {
                    self.rewrite_expr(dim);
                }
                if let Some(ref mut init) = n.initializer {
                    self.rewrite_expr(init);
                }
            }
            Expr::MethodRef(m) => self.rewrite_expr(&mut m.target),
            Expr::Parenthesized(e) => self.rewrite_expr(e),
            Expr::ArrayInitializer(a) => {
                for value in &mut a.values {
                    self.rewrite_expr(value);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::driver;
    use crate::model::build;
    use crate::parser::parse_java;

    fn rewrite_once(source: &str) -> (Ast, usize) {
        let mut ast = parse_java(source).unwrap();
        let promotions = {
            let model = build(&ast);
            driver::run(&model)
        };
        let added = apply(&mut ast, &promotions);
        (ast, added)
    }

    #[test]
    fn adds_static_to_promoted_method() {
        let (ast, added) = rewrite_once("class A { private int test() { return 0; } }");
        assert_eq!(added, 1);
        let TypeDecl::Class(ref class) = ast.type_decls[0] else {
            panic!("expected class");
        };
        let ClassMember::Method(ref m) = class.body[0] else {
            panic!("expected method");
        };
        assert_eq!(m.modifiers, vec![Modifier::Private, Modifier::Static]);
    }

    #[test]
    fn untouched_methods_keep_modifiers() {
        let (ast, added) =
            rewrite_once("class A { int a = 0; private int test() { return a; } }");
        assert_eq!(added, 0);
        let TypeDecl::Class(ref class) = ast.type_decls[0] else {
            panic!("expected class");
        };
        let ClassMember::Method(ref m) = class.body[1] else {
            panic!("expected method");
        };
        assert_eq!(m.modifiers, vec![Modifier::Private]);
    }

    #[test]
    fn rewrites_inside_anonymous_class() {
        let source = r#"
interface I {}
class A {
    I i = new I() {
        private int test() {
            return 0;
        }
    };
}
"#;
        let (ast, added) = rewrite_once(source);
        assert_eq!(added, 1);
        let TypeDecl::Class(ref class) = ast.type_decls[1] else {
            panic!("expected class");
        };
        let ClassMember::Field(ref field) = class.body[0] else {
            panic!("expected field");
        };
        let Some(Expr::New(ref new_expr)) = field.initializer else {
            panic!("expected new");
        };
        let body = new_expr.anonymous_body.as_ref().unwrap();
        let ClassMember::Method(ref m) = body.body[0] else {
            panic!("expected method");
        };
        assert!(m.has_modifier(Modifier::Static));
    }
}
