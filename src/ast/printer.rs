use super::nodes::*;
use super::Ast;

/// Prints an AST back to Java source.
///
/// Output is deterministic for a given tree, which makes printed trees the
/// comparison oracle for rewrite tests; no attempt is made to reproduce the
/// trivia of the original input.
pub struct AstPrinter {
    indent_level: usize,
    output: String,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            output: String::new(),
        }
    }

    pub fn print(&mut self, ast: &Ast) -> String {
        self.output.clear();
        if let Some(ref package) = ast.package_decl {
            self.writeln(&format!("package {};", package.name));
            self.output.push('\n');
        }
        for import in &ast.imports {
            let head = if import.is_static { "import static" } else { "import" };
            let tail = if import.is_wildcard { ".*" } else { "" };
            self.writeln(&format!("{} {}{};", head, import.name, tail));
        }
        if !ast.imports.is_empty() {
            self.output.push('\n');
        }
        for type_decl in &ast.type_decls {
            self.print_type_decl(type_decl);
        }
        self.output.clone()
    }

    fn indent(&mut self) {
        self.indent_level += 4;
    }

    fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(4);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push(' ');
        }
    }

    fn writeln(&mut self, s: &str) {
        self.write_indent();
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn print_type_decl(&mut self, type_decl: &TypeDecl) {
        match type_decl {
            TypeDecl::Class(c) => self.print_class_decl(c),
            TypeDecl::Interface(i) => self.print_interface_decl(i),
            TypeDecl::Enum(e) => self.print_enum_decl(e),
        }
    }

    fn print_class_decl(&mut self, class: &ClassDecl) {
        self.print_annotations(&class.annotations);
        let mut header = String::new();
        push_modifiers(&mut header, &class.modifiers);
        header.push_str("class ");
        header.push_str(&class.name);
        if let Some(ref extends) = class.extends {
            header.push_str(" extends ");
            header.push_str(&type_str(extends));
        }
        if !class.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&join_types(&class.implements));
        }
        header.push_str(" {");
        self.writeln(&header);
        self.indent();
        for member in &class.body {
            self.print_class_member(member);
        }
        self.dedent();
        self.writeln("}");
    }

    fn print_interface_decl(&mut self, interface: &InterfaceDecl) {
        self.print_annotations(&interface.annotations);
        let mut header = String::new();
        push_modifiers(&mut header, &interface.modifiers);
        header.push_str("interface ");
        header.push_str(&interface.name);
        if !interface.extends.is_empty() {
            header.push_str(" extends ");
            header.push_str(&join_types(&interface.extends));
        }
        header.push_str(" {");
        self.writeln(&header);
        self.indent();
        for member in &interface.body {
            match member {
                InterfaceMember::Field(f) => self.print_field_decl(f),
                InterfaceMember::Method(m) => self.print_method_decl(m),
                InterfaceMember::TypeDecl(t) => self.print_type_decl(t),
            }
        }
        self.dedent();
        self.writeln("}");
    }

    fn print_enum_decl(&mut self, enum_decl: &EnumDecl) {
        self.print_annotations(&enum_decl.annotations);
        let mut header = String::new();
        push_modifiers(&mut header, &enum_decl.modifiers);
        header.push_str("enum ");
        header.push_str(&enum_decl.name);
        if !enum_decl.implements.is_empty() {
            header.push_str(" implements ");
            header.push_str(&join_types(&enum_decl.implements));
        }
        header.push_str(" {");
        self.writeln(&header);
        self.indent();
        let constants: Vec<String> = enum_decl
            .constants
            .iter()
            .map(|c| {
                if c.arguments.is_empty() {
                    c.name.clone()
                } else {
                    format!("{}({})", c.name, self.expr_list(&c.arguments))
                }
            })
            .collect();
        if !constants.is_empty() || !enum_decl.body.is_empty() {
            self.writeln(&format!("{};", constants.join(", ")));
        }
        for member in &enum_decl.body {
            self.print_class_member(member);
        }
        self.dedent();
        self.writeln("}");
    }

    fn print_class_member(&mut self, member: &ClassMember) {
        match member {
            ClassMember::Field(f) => self.print_field_decl(f),
            ClassMember::Method(m) => self.print_method_decl(m),
            ClassMember::Constructor(c) => self.print_constructor_decl(c),
            ClassMember::Initializer(i) => {
                if i.is_static {
                    self.writeln("static {");
                } else {
                    self.writeln("{");
                }
                self.indent();
                for stmt in &i.body.statements {
                    self.print_stmt(stmt);
                }
                self.dedent();
                self.writeln("}");
            }
            ClassMember::TypeDecl(t) => self.print_type_decl(t),
        }
    }

    fn print_annotations(&mut self, annotations: &[Annotation]) {
        for a in annotations {
            self.writeln(&format!("@{}", a.name));
        }
    }

    fn print_field_decl(&mut self, field: &FieldDecl) {
        self.print_annotations(&field.annotations);
        let mut line = String::new();
        push_modifiers(&mut line, &field.modifiers);
        line.push_str(&type_str(&field.type_ref));
        line.push(' ');
        line.push_str(&field.name);
        if let Some(ref init) = field.initializer {
            line.push_str(" = ");
            line.push_str(&self.expr_str(init));
        }
        line.push(';');
        self.writeln(&line);
    }

    fn print_method_decl(&mut self, method: &MethodDecl) {
        self.print_annotations(&method.annotations);
        let mut header = String::new();
        push_modifiers(&mut header, &method.modifiers);
        match method.return_type {
            Some(ref t) => header.push_str(&type_str(t)),
            None => header.push_str("void"),
        }
        header.push(' ');
        header.push_str(&method.name);
        header.push('(');
        header.push_str(&self.param_list(&method.parameters));
        header.push(')');
        if !method.throws.is_empty() {
            header.push_str(" throws ");
            header.push_str(&join_types(&method.throws));
        }
        match method.body {
            Some(ref body) => {
                header.push_str(" {");
                self.writeln(&header);
                self.indent();
                for stmt in &body.statements {
                    self.print_stmt(stmt);
                }
                self.dedent();
                self.writeln("}");
            }
            None => {
                header.push(';');
                self.writeln(&header);
            }
        }
    }

    fn print_constructor_decl(&mut self, ctor: &ConstructorDecl) {
        self.print_annotations(&ctor.annotations);
        let mut header = String::new();
        push_modifiers(&mut header, &ctor.modifiers);
        header.push_str(&ctor.name);
        header.push('(');
        header.push_str(&self.param_list(&ctor.parameters));
        header.push(')');
        if !ctor.throws.is_empty() {
            header.push_str(" throws ");
            header.push_str(&join_types(&ctor.throws));
        }
        header.push_str(" {");
        self.writeln(&header);
        self.indent();
        for stmt in &ctor.body.statements {
            self.print_stmt(stmt);
        }
        self.dedent();
        self.writeln("}");
    }

    fn param_list(&self, parameters: &[Parameter]) -> String {
        parameters
            .iter()
            .map(|p| {
                let mut s = String::new();
                push_modifiers(&mut s, &p.modifiers);
                s.push_str(&type_str(&p.type_ref));
                s.push(' ');
                s.push_str(&p.name);
                s
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn print_block(&mut self, block: &Block) {
        self.writeln("{");
        self.indent();
        for stmt in &block.statements {
            self.print_stmt(stmt);
        }
        self.dedent();
        self.writeln("}");
    }

    fn print_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Expression(e) => {
                let s = self.expr_str(&e.expr);
                self.writeln(&format!("{};", s));
            }
            Stmt::Declaration(d) => {
                let mut line = String::new();
                push_modifiers(&mut line, &d.modifiers);
                line.push_str(&type_str(&d.type_ref));
                line.push(' ');
                let vars: Vec<String> = d
                    .variables
                    .iter()
                    .map(|v| {
                        let mut s = v.name.clone();
                        for _ in 0..v.array_dims {
                            s.push_str("[]");
                        }
                        if let Some(ref init) = v.initializer {
                            s.push_str(" = ");
                            s.push_str(&self.expr_str(init));
                        }
                        s
                    })
                    .collect();
                line.push_str(&vars.join(", "));
                line.push(';');
                self.writeln(&line);
            }
            Stmt::TypeDecl(t) => self.print_type_decl(t),
            Stmt::If(if_stmt) => {
                let cond = self.expr_str(&if_stmt.condition);
                self.writeln(&format!("if ({})", cond));
                self.print_branch(&if_stmt.then_branch);
                if let Some(ref else_branch) = if_stmt.else_branch {
                    self.writeln("else");
                    self.print_branch(else_branch);
                }
            }
            Stmt::While(while_stmt) => {
                let cond = self.expr_str(&while_stmt.condition);
                self.writeln(&format!("while ({})", cond));
                self.print_branch(&while_stmt.body);
            }
            Stmt::For(for_stmt) => {
                let init: Vec<String> = for_stmt.init.iter().map(|s| self.inline_stmt(s)).collect();
                let cond = for_stmt
                    .condition
                    .as_ref()
                    .map(|c| self.expr_str(c))
                    .unwrap_or_default();
                let update: Vec<String> =
                    for_stmt.update.iter().map(|e| self.expr_str(e)).collect();
                self.writeln(&format!(
                    "for ({}; {}; {})",
                    init.join(", "),
                    cond,
                    update.join(", ")
                ));
                self.print_branch(&for_stmt.body);
            }
            Stmt::ForEach(foreach) => {
                let iterable = self.expr_str(&foreach.iterable);
                self.writeln(&format!(
                    "for ({} {} : {})",
                    type_str(&foreach.type_ref),
                    foreach.name,
                    iterable
                ));
                self.print_branch(&foreach.body);
            }
            Stmt::Switch(switch_stmt) => {
                let scrutinee = self.expr_str(&switch_stmt.expression);
                self.writeln(&format!("switch ({}) {{", scrutinee));
                self.indent();
                for case in &switch_stmt.cases {
                    if case.labels.is_empty() {
                        self.writeln("default:");
                    } else {
                        for label in &case.labels {
                            let l = self.expr_str(label);
                            self.writeln(&format!("case {}:", l));
                        }
                    }
                    self.indent();
                    for s in &case.statements {
                        self.print_stmt(s);
                    }
                    self.dedent();
                }
                self.dedent();
                self.writeln("}");
            }
            Stmt::Return(ret) => match ret.value {
                Some(ref v) => {
                    let s = self.expr_str(v);
                    self.writeln(&format!("return {};", s));
                }
                None => self.writeln("return;"),
            },
            Stmt::Break(b) => match b.label {
                Some(ref l) => self.writeln(&format!("break {};", l)),
                None => self.writeln("break;"),
            },
            Stmt::Continue(c) => match c.label {
                Some(ref l) => self.writeln(&format!("continue {};", l)),
                None => self.writeln("continue;"),
            },
            Stmt::Try(try_stmt) => {
                if try_stmt.resources.is_empty() {
                    self.writeln("try {");
                } else {
                    let res: Vec<String> = try_stmt
                        .resources
                        .iter()
                        .map(|r| match r {
                            TryResource::Var { type_ref, name, initializer, .. } => format!(
                                "{} {} = {}",
                                type_str(type_ref),
                                name,
                                self.expr_str(initializer)
                            ),
                            TryResource::Expr { expr, .. } => self.expr_str(expr),
                        })
                        .collect();
                    self.writeln(&format!("try ({}) {{", res.join("; ")));
                }
                self.indent();
                for s in &try_stmt.try_block.statements {
                    self.print_stmt(s);
                }
                self.dedent();
                for catch in &try_stmt.catch_clauses {
                    let mut types = type_str(&catch.parameter.type_ref);
                    for alt in &catch.alt_types {
                        types.push_str(" | ");
                        types.push_str(&type_str(alt));
                    }
                    self.writeln(&format!("}} catch ({} {}) {{", types, catch.parameter.name));
                    self.indent();
                    for s in &catch.block.statements {
                        self.print_stmt(s);
                    }
                    self.dedent();
                }
                if let Some(ref finally) = try_stmt.finally_block {
                    self.writeln("} finally {");
                    self.indent();
                    for s in &finally.statements {
                        self.print_stmt(s);
                    }
                    self.dedent();
                }
                self.writeln("}");
            }
            Stmt::Throw(t) => {
                let s = self.expr_str(&t.expr);
                self.writeln(&format!("throw {};", s));
            }
            Stmt::Assert(a) => {
                let cond = self.expr_str(&a.condition);
                match a.message {
                    Some(ref m) => {
                        let msg = self.expr_str(m);
                        self.writeln(&format!("assert {} : {};", cond, msg));
                    }
                    None => self.writeln(&format!("assert {};", cond)),
                }
            }
            Stmt::Synchronized(s) => {
                let lock = self.expr_str(&s.lock);
                self.writeln(&format!("synchronized ({}) {{", lock));
                self.indent();
                for stmt in &s.body.statements {
                    self.print_stmt(stmt);
                }
                self.dedent();
                self.writeln("}");
            }
            Stmt::Labeled(l) => {
                self.writeln(&format!("{}:", l.label));
                self.print_stmt(&l.statement);
            }
            Stmt::Block(b) => self.print_block(b),
            Stmt::Empty => self.writeln(";"),
        }
    }

    /// Branch bodies print as blocks; a bare statement body is indented.
    fn print_branch(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(b) => self.print_block(b),
            other => {
                self.indent();
                self.print_stmt(other);
                self.dedent();
            }
        }
    }

    /// Statement rendered without trailing semicolon, for `for` headers.
    fn inline_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(e) => self.expr_str(&e.expr),
            Stmt::Declaration(d) => {
                let mut line = String::new();
                push_modifiers(&mut line, &d.modifiers);
                line.push_str(&type_str(&d.type_ref));
                line.push(' ');
                let vars: Vec<String> = d
                    .variables
                    .iter()
                    .map(|v| match v.initializer {
                        Some(ref init) => format!("{} = {}", v.name, self.expr_str(init)),
                        None => v.name.clone(),
                    })
                    .collect();
                line.push_str(&vars.join(", "));
                line
            }
            _ => String::new(),
        }
    }

    fn expr_list(&self, exprs: &[Expr]) -> String {
        exprs
            .iter()
            .map(|e| self.expr_str(e))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn expr_str(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(l) => literal_str(&l.value),
            Expr::Identifier(id) => id.name.clone(),
            Expr::This(_) => "this".to_string(),
            Expr::Super(_) => "super".to_string(),
            Expr::Binary(b) => format!(
                "{} {} {}",
                self.expr_str(&b.left),
                b.operator.as_str(),
                self.expr_str(&b.right)
            ),
            Expr::Unary(u) => {
                let operand = self.expr_str(&u.operand);
                match u.operator {
                    UnaryOp::Plus => format!("+{}", operand),
                    UnaryOp::Minus => format!("-{}", operand),
                    UnaryOp::Not => format!("!{}", operand),
                    UnaryOp::BitNot => format!("~{}", operand),
                    UnaryOp::PreInc => format!("++{}", operand),
                    UnaryOp::PreDec => format!("--{}", operand),
                    UnaryOp::PostInc => format!("{}++", operand),
                    UnaryOp::PostDec => format!("{}--", operand),
                }
            }
            Expr::Assignment(a) => format!(
                "{} {} {}",
                self.expr_str(&a.target),
                a.operator.as_str(),
                self.expr_str(&a.value)
            ),
            Expr::MethodCall(call) => {
                let args = self.expr_list(&call.arguments);
                match call.target {
                    Some(ref t) => format!("{}.{}({})", self.expr_str(t), call.name, args),
                    None => format!("{}({})", call.name, args),
                }
            }
            Expr::FieldAccess(fa) => format!("{}.{}", self.expr_str(&fa.target), fa.name),
            Expr::ArrayAccess(aa) => {
                format!("{}[{}]", self.expr_str(&aa.array), self.expr_str(&aa.index))
            }
            Expr::Cast(c) => format!("({}) {}", type_str(&c.target_type), self.expr_str(&c.expr)),
            Expr::InstanceOf(i) => format!(
                "{} instanceof {}",
                self.expr_str(&i.expr),
                type_str(&i.target_type)
            ),
            Expr::Conditional(c) => format!(
                "{} ? {} : {}",
                self.expr_str(&c.condition),
                self.expr_str(&c.then_expr),
                self.expr_str(&c.else_expr)
            ),
            Expr::New(n) => {
                let mut s = String::new();
                if let Some(ref enc) = n.enclosing {
                    s.push_str(&self.expr_str(enc));
                    s.push('.');
                }
                s.push_str("new ");
                s.push_str(&type_str(&n.target_type));
                s.push('(');
                s.push_str(&self.expr_list(&n.arguments));
                s.push(')');
                if let Some(ref body) = n.anonymous_body {
                    s.push_str(" {\n");
                    let mut inner = AstPrinter::new();
                    inner.indent_level = self.indent_level + 4;
                    for member in &body.body {
                        inner.print_class_member(member);
                    }
                    s.push_str(&inner.output);
                    for _ in 0..self.indent_level {
                        s.push(' ');
                    }
                    s.push('}');
                }
                s
            }
            Expr::NewArray(n) => {
                let mut s = format!("new {}", type_str(&n.element_type));
                for dim in &n.dims {
                    s.push('[');
                    s.push_str(&self.expr_str(dim));
                    s.push(']');
                }
                if let Some(ref init) = n.initializer {
                    if n.dims.is_empty() {
                        s.push_str("[]");
                    }
                    s.push(' ');
                    s.push_str(&self.expr_str(init));
                }
                s
            }
            Expr::MethodRef(mr) => format!("{}::{}", self.expr_str(&mr.target), mr.name),
            Expr::Parenthesized(e) => format!("({})", self.expr_str(e)),
            Expr::ArrayInitializer(a) => format!("{{ {} }}", self.expr_list(&a.values)),
        }
    }
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_modifiers(out: &mut String, modifiers: &[Modifier]) {
    for m in modifiers {
        out.push_str(m.as_str());
        out.push(' ');
    }
}

fn join_types(types: &[TypeRef]) -> String {
    types.iter().map(type_str).collect::<Vec<_>>().join(", ")
}

fn type_str(type_ref: &TypeRef) -> String {
    let mut s = type_ref.name.clone();
    if !type_ref.type_args.is_empty() {
        s.push('<');
        s.push_str(&join_types(&type_ref.type_args));
        s.push('>');
    }
    for _ in 0..type_ref.array_dims {
        s.push_str("[]");
    }
    s
}

fn literal_str(literal: &Literal) -> String {
    match literal {
        Literal::Integer(v) => v.to_string(),
        Literal::Long(v) => format!("{}L", v),
        Literal::Float(v) => v.to_string(),
        Literal::Boolean(v) => v.to_string(),
        Literal::String(v) => format!("\"{}\"", v),
        Literal::Char(v) => format!("'{}'", v),
        Literal::Null => "null".to_string(),
    }
}
