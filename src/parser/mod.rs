//! Parser module
//!
//! Lexical analysis and parsing of Java source into the AST.

pub mod lexer;
pub mod parser;

pub use lexer::{Lexer, LexicalToken, Token};
pub use parser::Parser;

use crate::ast::Ast;
use crate::error::Result;

/// Parse a Java compilation unit into an AST
pub fn parse_java(source: &str) -> Result<Ast> {
    parser::parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;

    #[test]
    fn parse_simple_class() {
        let source = r#"
package com.example;

public class HelloWorld {
    public static void main(String[] args) {
        System.out.println("Hello, World!");
    }
}
"#;
        let ast = parse_java(source).expect("Failed to parse");
        assert_eq!(ast.type_decls.len(), 1);
        assert_eq!(ast.type_decls[0].name(), "HelloWorld");
    }

    #[test]
    fn parse_imports() {
        let source = r#"
package com.example;

import java.util.List;
import java.util.ArrayList;
import java.io.*;

class TestClass {
    private List<String> items = new ArrayList<>();
}
"#;
        let ast = parse_java(source).expect("Failed to parse");
        assert_eq!(ast.imports.len(), 3);
        assert_eq!(ast.imports[0].simple_name(), "List");
        assert!(ast.imports[2].is_wildcard);
    }

    #[test]
    fn parse_field_declarator_list() {
        let source = "class A { int a = 0, b, c = 2; }";
        let ast = parse_java(source).expect("Failed to parse");
        let TypeDecl::Class(ref class) = ast.type_decls[0] else {
            panic!("expected class");
        };
        assert_eq!(class.body.len(), 3);
        let names: Vec<&str> = class
            .body
            .iter()
            .map(|m| match m {
                ClassMember::Field(f) => f.name.as_str(),
                _ => panic!("expected field"),
            })
            .collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn parse_modifiers_and_constructor() {
        let source = r#"
class A {
    private final int x;
    protected A(int x) {
        this.x = x;
    }
    private final int get() {
        return x;
    }
}
"#;
        let ast = parse_java(source).expect("Failed to parse");
        let TypeDecl::Class(ref class) = ast.type_decls[0] else {
            panic!("expected class");
        };
        assert!(matches!(class.body[1], ClassMember::Constructor(_)));
        let ClassMember::Method(ref m) = class.body[2] else {
            panic!("expected method");
        };
        assert!(m.has_modifier(Modifier::Private));
        assert!(m.has_modifier(Modifier::Final));
    }

    #[test]
    fn parse_anonymous_class() {
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
        let ast = parse_java(source).expect("Failed to parse");
        let TypeDecl::Class(ref class) = ast.type_decls[1] else {
            panic!("expected class");
        };
        let ClassMember::Field(ref field) = class.body[0] else {
            panic!("expected field");
        };
        let Some(Expr::New(ref new_expr)) = field.initializer else {
            panic!("expected new expression");
        };
        let body = new_expr.anonymous_body.as_ref().expect("anonymous body");
        assert_eq!(body.body.len(), 1);
    }

    #[test]
    fn parse_qualified_new() {
        let source = r#"
class A {
    class B {}
    private B test(A a) {
        return a.new B();
    }
}
"#;
        let ast = parse_java(source).expect("Failed to parse");
        let TypeDecl::Class(ref class) = ast.type_decls[0] else {
            panic!("expected class");
        };
        let ClassMember::Method(ref m) = class.body[1] else {
            panic!("expected method");
        };
        let body = m.body.as_ref().unwrap();
        let Stmt::Return(ref ret) = body.statements[0] else {
            panic!("expected return");
        };
        let Some(Expr::New(ref new_expr)) = ret.value else {
            panic!("expected new expression");
        };
        assert!(new_expr.enclosing.is_some());
    }

    #[test]
    fn parse_shift_vs_generics() {
        let source = r#"
import java.util.List;
import java.util.Map;

class A {
    Map<String, List<Integer>> table;
    private int test(int x) {
        return x >> 2 >>> 1;
    }
}
"#;
        parse_java(source).expect("Failed to parse");
    }

    #[test]
    fn parse_method_reference() {
        let source = r#"
class A {
    Runnable r = this::run;
    void run() {}
}
"#;
        let ast = parse_java(source).expect("Failed to parse");
        let TypeDecl::Class(ref class) = ast.type_decls[0] else {
            panic!("expected class");
        };
        let ClassMember::Field(ref field) = class.body[0] else {
            panic!("expected field");
        };
        assert!(matches!(field.initializer, Some(Expr::MethodRef(_))));
    }

    #[test]
    fn parse_error_has_position() {
        let err = parse_java("class A { int }").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line"), "unexpected error: {}", message);
    }
}
