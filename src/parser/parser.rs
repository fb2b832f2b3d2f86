use super::lexer::{Lexer, LexicalToken, Token};
use crate::ast::*;
use crate::error::{Error, Result};

/// Recursive descent parser for the analyzed Java subset.
pub struct Parser {
    tokens: Vec<LexicalToken>,
    pos: usize,
}

pub fn parse(source: &str) -> Result<Ast> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_compilation_unit()
}

impl Parser {
    pub fn new(tokens: Vec<LexicalToken>) -> Self {
        Self { tokens, pos: 0 }
    }

    // Token plumbing

    fn peek(&self) -> Option<&LexicalToken> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&LexicalToken> {
        self.tokens.get(self.pos + offset)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek().map(|t| t.is(token)).unwrap_or(false)
    }

    fn check_at(&self, offset: usize, token: &Token) -> bool {
        self.peek_at(offset).map(|t| t.is(token)).unwrap_or(false)
    }

    fn advance(&mut self) -> Option<LexicalToken> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token, what: &str) -> Result<LexicalToken> {
        if self.check(&token) {
            Ok(self.advance().unwrap())
        } else {
            Err(self.error_here(format!("expected {}", what)))
        }
    }

    fn location(&self) -> Location {
        self.peek()
            .map(|t| t.location)
            .or_else(|| self.tokens.last().map(|t| t.location))
            .unwrap_or_else(Location::start)
    }

    fn span_from(&self, start: Location) -> Span {
        let end = self
            .tokens
            .get(self.pos.saturating_sub(1))
            .map(|t| t.location)
            .unwrap_or(start);
        Span::new(start, end)
    }

    fn error_here(&self, message: impl Into<String>) -> Error {
        let loc = self.location();
        let message = message.into();
        let found = match self.peek() {
            Some(t) => format!("{} (found '{}')", message, t.lexeme),
            None => format!("{} (found end of input)", message),
        };
        Error::parse_error(loc.line, loc.column, found)
    }

    /// Two tokens with no whitespace between them, used to recognize `>>`
    /// as two adjacent `>` (the lexer never joins them, so generic closers work).
    fn adjacent(&self, a: usize, b: usize) -> bool {
        match (self.tokens.get(a), self.tokens.get(b)) {
            (Some(x), Some(y)) => x.location.offset + x.lexeme.len() == y.location.offset,
            _ => false,
        }
    }

    // Compilation unit

    pub fn parse_compilation_unit(&mut self) -> Result<Ast> {
        let start = self.location();
        let package_decl = if self.check(&Token::Package) {
            Some(self.parse_package_decl()?)
        } else {
            None
        };
        let mut imports = Vec::new();
        while self.check(&Token::Import) {
            imports.push(self.parse_import_decl()?);
        }
        let mut type_decls = Vec::new();
        while self.peek().is_some() {
            if self.eat(&Token::Semicolon) {
                continue;
            }
            type_decls.push(self.parse_type_decl()?);
        }
        Ok(Ast {
            package_decl,
            imports,
            type_decls,
            span: self.span_from(start),
        })
    }

    fn parse_package_decl(&mut self) -> Result<PackageDecl> {
        let start = self.location();
        self.expect(Token::Package, "'package'")?;
        let name = self.parse_dotted_name()?;
        self.expect(Token::Semicolon, "';' after package declaration")?;
        Ok(PackageDecl {
            name,
            span: self.span_from(start),
        })
    }

    fn parse_import_decl(&mut self) -> Result<ImportDecl> {
        let start = self.location();
        self.expect(Token::Import, "'import'")?;
        let is_static = self.eat(&Token::Static);
        let mut name = String::new();
        let mut is_wildcard = false;
        loop {
            let tok = self
                .advance()
                .ok_or_else(|| self.error_here("unexpected end of import"))?;
            match tok.token {
                Token::Identifier => name.push_str(&tok.lexeme),
                Token::Star => {
                    is_wildcard = true;
                    // trim the trailing dot before '*'
                    if name.ends_with('.') {
                        name.pop();
                    }
                }
                _ => {
                    return Err(Error::parse_error(
                        tok.location.line,
                        tok.location.column,
                        "invalid import declaration",
                    ));
                }
            }
            if self.eat(&Token::Semicolon) {
                break;
            }
            self.expect(Token::Dot, "'.' in import name")?;
            if !is_wildcard {
                name.push('.');
            }
        }
        Ok(ImportDecl {
            name,
            is_static,
            is_wildcard,
            span: self.span_from(start),
        })
    }

    fn parse_dotted_name(&mut self) -> Result<String> {
        let first = self.expect(Token::Identifier, "identifier")?;
        let mut name = first.lexeme;
        while self.check(&Token::Dot) && self.check_at(1, &Token::Identifier) {
            self.advance();
            let seg = self.advance().unwrap();
            name.push('.');
            name.push_str(&seg.lexeme);
        }
        Ok(name)
    }

    // Type declarations

    fn parse_type_decl(&mut self) -> Result<TypeDecl> {
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers();
        self.parse_type_decl_rest(annotations, modifiers)
    }

    fn parse_type_decl_rest(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeDecl> {
        if self.check(&Token::Class) {
            Ok(TypeDecl::Class(self.parse_class_decl(annotations, modifiers)?))
        } else if self.check(&Token::Interface) {
            Ok(TypeDecl::Interface(
                self.parse_interface_decl(annotations, modifiers)?,
            ))
        } else if self.check(&Token::Enum) {
            Ok(TypeDecl::Enum(self.parse_enum_decl(annotations, modifiers)?))
        } else {
            Err(self.error_here("expected type declaration"))
        }
    }

    fn parse_annotations(&mut self) -> Result<Vec<Annotation>> {
        let mut annotations = Vec::new();
        while self.check(&Token::At) {
            let start = self.location();
            self.advance();
            let name = self.parse_dotted_name()?;
            // Arguments are consumed but not retained
            if self.check(&Token::LParen) {
                self.skip_balanced(&Token::LParen, &Token::RParen)?;
            }
            annotations.push(Annotation {
                name,
                span: self.span_from(start),
            });
        }
        Ok(annotations)
    }

    fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while let Some(tok) = self.peek() {
            let modifier = match tok.token {
                Token::Public => Modifier::Public,
                Token::Protected => Modifier::Protected,
                Token::Private => Modifier::Private,
                Token::Abstract => Modifier::Abstract,
                Token::Static => Modifier::Static,
                Token::Final => Modifier::Final,
                Token::Native => Modifier::Native,
                Token::Synchronized => Modifier::Synchronized,
                Token::Transient => Modifier::Transient,
                Token::Volatile => Modifier::Volatile,
                Token::Strictfp => Modifier::Strictfp,
                Token::Default => Modifier::Default,
                _ => break,
            };
            // `static { ... }` initializer and `default:` switch labels are not modifiers
            if modifier == Modifier::Static && self.check_at(1, &Token::LBrace) {
                break;
            }
            if modifier == Modifier::Default && self.check_at(1, &Token::Colon) {
                break;
            }
            modifiers.push(modifier);
            self.advance();
        }
        modifiers
    }

    fn parse_class_decl(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<ClassDecl> {
        let start = self.location();
        self.expect(Token::Class, "'class'")?;
        let name = self.expect(Token::Identifier, "class name")?.lexeme;
        self.skip_type_params()?;
        let extends = if self.eat(&Token::Extends) {
            Some(self.parse_type_ref()?)
        } else {
            None
        };
        let implements = if self.eat(&Token::Implements) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        let body = self.parse_class_body(&name)?;
        Ok(ClassDecl {
            modifiers,
            annotations,
            name,
            extends,
            implements,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_interface_decl(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<InterfaceDecl> {
        let start = self.location();
        self.expect(Token::Interface, "'interface'")?;
        let name = self.expect(Token::Identifier, "interface name")?.lexeme;
        self.skip_type_params()?;
        let extends = if self.eat(&Token::Extends) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        self.expect(Token::LBrace, "'{' to open interface body")?;
        let mut body = Vec::new();
        while !self.check(&Token::RBrace) {
            if self.eat(&Token::Semicolon) {
                continue;
            }
            for member in self.parse_class_member(&name)? {
                match member {
                    ClassMember::Field(f) => body.push(InterfaceMember::Field(f)),
                    ClassMember::Method(m) => body.push(InterfaceMember::Method(m)),
                    ClassMember::TypeDecl(t) => body.push(InterfaceMember::TypeDecl(t)),
                    ClassMember::Constructor(_) | ClassMember::Initializer(_) => {
                        return Err(self.error_here("constructors are not allowed in interfaces"));
                    }
                }
            }
        }
        self.expect(Token::RBrace, "'}' to close interface body")?;
        Ok(InterfaceDecl {
            modifiers,
            annotations,
            name,
            extends,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_enum_decl(
        &mut self,
        annotations: Vec<Annotation>,
        modifiers: Vec<Modifier>,
    ) -> Result<EnumDecl> {
        let start = self.location();
        self.expect(Token::Enum, "'enum'")?;
        let name = self.expect(Token::Identifier, "enum name")?.lexeme;
        let implements = if self.eat(&Token::Implements) {
            self.parse_type_list()?
        } else {
            Vec::new()
        };
        self.expect(Token::LBrace, "'{' to open enum body")?;
        let mut constants = Vec::new();
        // Constant list runs until ';' (members follow) or '}' (constants only)
        while self.check(&Token::Identifier) {
            let const_start = self.location();
            let const_name = self.advance().unwrap().lexeme;
            let arguments = if self.check(&Token::LParen) {
                self.parse_argument_list()?
            } else {
                Vec::new()
            };
            constants.push(EnumConstant {
                name: const_name,
                arguments,
                span: self.span_from(const_start),
            });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.eat(&Token::Semicolon);
        let mut body = Vec::new();
        while !self.check(&Token::RBrace) {
            if self.eat(&Token::Semicolon) {
                continue;
            }
            body.extend(self.parse_class_member(&name)?);
        }
        self.expect(Token::RBrace, "'}' to close enum body")?;
        Ok(EnumDecl {
            modifiers,
            annotations,
            name,
            implements,
            constants,
            body,
            span: self.span_from(start),
        })
    }

    fn parse_class_body(&mut self, class_name: &str) -> Result<Vec<ClassMember>> {
        self.expect(Token::LBrace, "'{' to open class body")?;
        let mut body = Vec::new();
        while !self.check(&Token::RBrace) {
            if self.eat(&Token::Semicolon) {
                continue;
            }
            body.extend(self.parse_class_member(class_name)?);
        }
        self.expect(Token::RBrace, "'}' to close class body")?;
        Ok(body)
    }

    /// Parses one member declaration. A field with several declarators
    /// expands into sibling members, hence the Vec.
    fn parse_class_member(&mut self, class_name: &str) -> Result<Vec<ClassMember>> {
        let start = self.location();
        let annotations = self.parse_annotations()?;
        let modifiers = self.parse_modifiers();

        // Initializer block, optionally preceded by `static`
        if self.check(&Token::Static) && self.check_at(1, &Token::LBrace) {
            self.advance();
            let body = self.parse_block()?;
            return Ok(vec![ClassMember::Initializer(InitializerBlock {
                is_static: true,
                body,
                span: self.span_from(start),
            })]);
        }
        if self.check(&Token::LBrace) {
            let is_static = modifiers.contains(&Modifier::Static);
            let body = self.parse_block()?;
            return Ok(vec![ClassMember::Initializer(InitializerBlock {
                is_static,
                body,
                span: self.span_from(start),
            })]);
        }

        // Nested type declaration
        if self.check(&Token::Class) || self.check(&Token::Interface) || self.check(&Token::Enum) {
            return Ok(vec![ClassMember::TypeDecl(
                self.parse_type_decl_rest(annotations, modifiers)?,
            )]);
        }

        // Generic method type parameters
        self.skip_type_params()?;

        // Constructor: the declared name followed directly by '('
        if self.check(&Token::Identifier)
            && self.peek().map(|t| t.lexeme == class_name).unwrap_or(false)
            && self.check_at(1, &Token::LParen)
        {
            let name = self.advance().unwrap().lexeme;
            let parameters = self.parse_parameter_list()?;
            let throws = self.parse_throws()?;
            let body = self.parse_block()?;
            return Ok(vec![ClassMember::Constructor(ConstructorDecl {
                modifiers,
                annotations,
                name,
                parameters,
                throws,
                body,
                span: self.span_from(start),
            })]);
        }

        // Method or field: return type (or void) then name
        let return_type = if self.eat(&Token::Void) {
            None
        } else {
            Some(self.parse_type_ref()?)
        };
        let name = self.expect(Token::Identifier, "member name")?.lexeme;

        if self.check(&Token::LParen) {
            let parameters = self.parse_parameter_list()?;
            let throws = self.parse_throws()?;
            let body = if self.eat(&Token::Semicolon) {
                None
            } else {
                Some(self.parse_block()?)
            };
            return Ok(vec![ClassMember::Method(MethodDecl {
                modifiers,
                annotations,
                return_type,
                name,
                parameters,
                throws,
                body,
                span: self.span_from(start),
            })]);
        }

        // Field declaration; each declarator of `int a, b;` becomes its own
        // member with the shared modifiers and base type.
        let type_ref = return_type.ok_or_else(|| self.error_here("fields cannot be void"))?;
        let mut fields = Vec::new();
        let mut name = name;
        loop {
            let mut dims = 0;
            while self.check(&Token::LBracket) && self.check_at(1, &Token::RBracket) {
                self.advance();
                self.advance();
                dims += 1;
            }
            let initializer = if self.eat(&Token::Assign) {
                Some(self.parse_variable_initializer()?)
            } else {
                None
            };
            let mut field_type = type_ref.clone();
            field_type.array_dims += dims;
            fields.push(ClassMember::Field(FieldDecl {
                modifiers: modifiers.clone(),
                annotations: annotations.clone(),
                type_ref: field_type,
                name,
                initializer,
                span: self.span_from(start),
            }));
            if self.eat(&Token::Comma) {
                name = self.expect(Token::Identifier, "field name")?.lexeme;
            } else {
                break;
            }
        }
        self.expect(Token::Semicolon, "';' after field declaration")?;
        Ok(fields)
    }

    fn parse_parameter_list(&mut self) -> Result<Vec<Parameter>> {
        self.expect(Token::LParen, "'('")?;
        let mut parameters = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                let start = self.location();
                self.parse_annotations()?;
                let modifiers = self.parse_modifiers();
                let mut type_ref = self.parse_type_ref()?;
                if self.eat(&Token::Ellipsis) {
                    type_ref.array_dims += 1;
                }
                let name = self.expect(Token::Identifier, "parameter name")?.lexeme;
                while self.check(&Token::LBracket) && self.check_at(1, &Token::RBracket) {
                    self.advance();
                    self.advance();
                    type_ref.array_dims += 1;
                }
                parameters.push(Parameter {
                    modifiers,
                    type_ref,
                    name,
                    span: self.span_from(start),
                });
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(parameters)
    }

    fn parse_throws(&mut self) -> Result<Vec<TypeRef>> {
        if self.eat(&Token::Throws) {
            self.parse_type_list()
        } else {
            Ok(Vec::new())
        }
    }

    fn parse_type_list(&mut self) -> Result<Vec<TypeRef>> {
        let mut types = vec![self.parse_type_ref()?];
        while self.eat(&Token::Comma) {
            types.push(self.parse_type_ref()?);
        }
        Ok(types)
    }

    // Types

    fn parse_type_ref(&mut self) -> Result<TypeRef> {
        let start = self.location();
        let tok = self
            .peek()
            .ok_or_else(|| self.error_here("expected type"))?
            .clone();
        let name = if tok.token.is_primitive_type() {
            self.advance();
            tok.lexeme
        } else if tok.is(&Token::Identifier) {
            self.parse_dotted_name()?
        } else if tok.is(&Token::Question) {
            // Wildcard type argument, bound kept in the name for re-printing
            self.advance();
            let mut n = "?".to_string();
            if self.eat(&Token::Extends) {
                n.push_str(" extends ");
                n.push_str(&self.parse_type_ref().map(|t| type_display(&t))?);
            } else if self.eat(&Token::Super) {
                n.push_str(" super ");
                n.push_str(&self.parse_type_ref().map(|t| type_display(&t))?);
            }
            n
        } else {
            return Err(self.error_here("expected type"));
        };
        let type_args = if self.check(&Token::Lt) {
            self.parse_type_args()?
        } else {
            Vec::new()
        };
        let mut array_dims = 0;
        while self.check(&Token::LBracket) && self.check_at(1, &Token::RBracket) {
            self.advance();
            self.advance();
            array_dims += 1;
        }
        Ok(TypeRef {
            name,
            type_args,
            array_dims,
            span: self.span_from(start),
        })
    }

    fn parse_type_args(&mut self) -> Result<Vec<TypeRef>> {
        self.expect(Token::Lt, "'<'")?;
        let mut args = Vec::new();
        if self.eat(&Token::Gt) {
            return Ok(args); // diamond
        }
        loop {
            args.push(self.parse_type_ref()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(Token::Gt, "'>' to close type arguments")?;
            break;
        }
        Ok(args)
    }

    /// Declaration-site type parameters carry no analysis weight; skip them.
    fn skip_type_params(&mut self) -> Result<()> {
        if !self.check(&Token::Lt) {
            return Ok(());
        }
        let mut depth = 0usize;
        loop {
            let tok = self
                .advance()
                .ok_or_else(|| self.error_here("unterminated type parameter list"))?;
            match tok.token {
                Token::Lt => depth += 1,
                Token::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    fn skip_balanced(&mut self, open: &Token, close: &Token) -> Result<()> {
        let mut depth = 0usize;
        loop {
            let tok = self
                .advance()
                .ok_or_else(|| self.error_here("unterminated group"))?;
            if tok.is(open) {
                depth += 1;
            } else if tok.is(close) {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
        }
    }

    // Statements

    fn parse_block(&mut self) -> Result<Block> {
        let start = self.location();
        self.expect(Token::LBrace, "'{'")?;
        let mut statements = Vec::new();
        while !self.check(&Token::RBrace) {
            statements.push(self.parse_stmt()?);
        }
        self.expect(Token::RBrace, "'}'")?;
        Ok(Block {
            statements,
            span: self.span_from(start),
        })
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        let tok = self
            .peek()
            .ok_or_else(|| self.error_here("expected statement"))?
            .clone();
        match tok.token {
            Token::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            Token::Semicolon => {
                self.advance();
                Ok(Stmt::Empty)
            }
            Token::Class | Token::Interface | Token::Enum => {
                Ok(Stmt::TypeDecl(self.parse_type_decl()?))
            }
            Token::At => {
                // Annotated local class
                Ok(Stmt::TypeDecl(self.parse_type_decl()?))
            }
            Token::If => self.parse_if_stmt(),
            Token::While => self.parse_while_stmt(),
            Token::For => self.parse_for_stmt(),
            Token::Switch => self.parse_switch_stmt(),
            Token::Return => {
                let start = self.location();
                self.advance();
                let value = if self.check(&Token::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(Token::Semicolon, "';' after return")?;
                Ok(Stmt::Return(ReturnStmt {
                    value,
                    span: self.span_from(start),
                }))
            }
            Token::Break => {
                let start = self.location();
                self.advance();
                let label = if self.check(&Token::Identifier) {
                    Some(self.advance().unwrap().lexeme)
                } else {
                    None
                };
                self.expect(Token::Semicolon, "';' after break")?;
                Ok(Stmt::Break(BreakStmt {
                    label,
                    span: self.span_from(start),
                }))
            }
            Token::Continue => {
                let start = self.location();
                self.advance();
                let label = if self.check(&Token::Identifier) {
                    Some(self.advance().unwrap().lexeme)
                } else {
                    None
                };
                self.expect(Token::Semicolon, "';' after continue")?;
                Ok(Stmt::Continue(ContinueStmt {
                    label,
                    span: self.span_from(start),
                }))
            }
            Token::Try => self.parse_try_stmt(),
            Token::Throw => {
                let start = self.location();
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(Token::Semicolon, "';' after throw")?;
                Ok(Stmt::Throw(ThrowStmt {
                    expr,
                    span: self.span_from(start),
                }))
            }
            Token::Assert => {
                let start = self.location();
                self.advance();
                let condition = self.parse_expr()?;
                let message = if self.eat(&Token::Colon) {
                    Some(self.parse_expr()?)
                } else {
                    None
                };
                self.expect(Token::Semicolon, "';' after assert")?;
                Ok(Stmt::Assert(AssertStmt {
                    condition,
                    message,
                    span: self.span_from(start),
                }))
            }
            Token::Synchronized => {
                let start = self.location();
                self.advance();
                self.expect(Token::LParen, "'(' after synchronized")?;
                let lock = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                let body = self.parse_block()?;
                Ok(Stmt::Synchronized(SynchronizedStmt {
                    lock,
                    body,
                    span: self.span_from(start),
                }))
            }
            Token::Identifier
                if self.check_at(1, &Token::Colon) && !self.check_at(1, &Token::DoubleColon) =>
            {
                let start = self.location();
                let label = self.advance().unwrap().lexeme;
                self.advance(); // ':'
                let statement = Box::new(self.parse_stmt()?);
                Ok(Stmt::Labeled(LabeledStmt {
                    label,
                    statement,
                    span: self.span_from(start),
                }))
            }
            _ => {
                // Local class with leading modifiers (`final class C {}`),
                // otherwise a declaration or an expression statement.
                if tok.token.is_modifier() {
                    let saved = self.pos;
                    let modifiers = self.parse_modifiers();
                    if self.check(&Token::Class)
                        || self.check(&Token::Interface)
                        || self.check(&Token::Enum)
                    {
                        return Ok(Stmt::TypeDecl(
                            self.parse_type_decl_rest(Vec::new(), modifiers)?,
                        ));
                    }
                    self.pos = saved;
                }
                if let Some(decl) = self.try_parse_var_decl()? {
                    self.expect(Token::Semicolon, "';' after declaration")?;
                    return Ok(Stmt::Declaration(decl));
                }
                let start = self.location();
                let expr = self.parse_expr()?;
                self.expect(Token::Semicolon, "';' after expression")?;
                Ok(Stmt::Expression(ExprStmt {
                    expr,
                    span: self.span_from(start),
                }))
            }
        }
    }

    /// Speculatively parse `modifiers type name ...` as a local variable
    /// declaration (without the trailing ';'); rolls back on mismatch.
    fn try_parse_var_decl(&mut self) -> Result<Option<VarDeclStmt>> {
        let saved = self.pos;
        let start = self.location();
        let modifiers = self.parse_modifiers();
        let looks_like_type = self
            .peek()
            .map(|t| t.token.is_primitive_type() || t.is(&Token::Identifier))
            .unwrap_or(false);
        if !looks_like_type {
            self.pos = saved;
            return Ok(None);
        }
        let type_ref = match self.parse_type_ref() {
            Ok(t) => t,
            Err(_) => {
                self.pos = saved;
                return Ok(None);
            }
        };
        if !self.check(&Token::Identifier) {
            self.pos = saved;
            return Ok(None);
        }
        let mut variables = Vec::new();
        loop {
            let var_start = self.location();
            let name = self.expect(Token::Identifier, "variable name")?.lexeme;
            let mut array_dims = 0;
            while self.check(&Token::LBracket) && self.check_at(1, &Token::RBracket) {
                self.advance();
                self.advance();
                array_dims += 1;
            }
            let initializer = if self.eat(&Token::Assign) {
                Some(self.parse_variable_initializer()?)
            } else {
                None
            };
            variables.push(VariableDeclarator {
                name,
                array_dims,
                initializer,
                span: self.span_from(var_start),
            });
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        Ok(Some(VarDeclStmt {
            modifiers,
            type_ref,
            variables,
            span: self.span_from(start),
        }))
    }

    fn parse_variable_initializer(&mut self) -> Result<Expr> {
        if self.check(&Token::LBrace) {
            self.parse_array_initializer()
        } else {
            self.parse_expr()
        }
    }

    fn parse_array_initializer(&mut self) -> Result<Expr> {
        let start = self.location();
        self.expect(Token::LBrace, "'{'")?;
        let mut values = Vec::new();
        while !self.check(&Token::RBrace) {
            values.push(self.parse_variable_initializer()?);
            if !self.eat(&Token::Comma) {
                break;
            }
        }
        self.expect(Token::RBrace, "'}'")?;
        Ok(Expr::ArrayInitializer(ArrayInitializerExpr {
            values,
            span: self.span_from(start),
        }))
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt> {
        let start = self.location();
        self.expect(Token::If, "'if'")?;
        self.expect(Token::LParen, "'(' after if")?;
        let condition = self.parse_expr()?;
        self.expect(Token::RParen, "')'")?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.eat(&Token::Else) {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };
        Ok(Stmt::If(IfStmt {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        }))
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt> {
        let start = self.location();
        self.expect(Token::While, "'while'")?;
        self.expect(Token::LParen, "'(' after while")?;
        let condition = self.parse_expr()?;
        self.expect(Token::RParen, "')'")?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_for_stmt(&mut self) -> Result<Stmt> {
        let start = self.location();
        self.expect(Token::For, "'for'")?;
        self.expect(Token::LParen, "'(' after for")?;

        // Enhanced for: `for (Type name : expr)`
        if let Some(decl) = self.try_parse_var_decl()? {
            if self.eat(&Token::Colon) {
                if decl.variables.len() != 1 || decl.variables[0].initializer.is_some() {
                    return Err(self.error_here("malformed enhanced for header"));
                }
                let iterable = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                let body = Box::new(self.parse_stmt()?);
                return Ok(Stmt::ForEach(ForEachStmt {
                    type_ref: decl.type_ref,
                    name: decl.variables.into_iter().next().unwrap().name,
                    iterable,
                    body,
                    span: self.span_from(start),
                }));
            }
            self.expect(Token::Semicolon, "';' after for initializer")?;
            return self.parse_for_rest(vec![Stmt::Declaration(decl)], start);
        }

        let mut init = Vec::new();
        if !self.eat(&Token::Semicolon) {
            loop {
                let expr_start = self.location();
                let expr = self.parse_expr()?;
                init.push(Stmt::Expression(ExprStmt {
                    expr,
                    span: self.span_from(expr_start),
                }));
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
            self.expect(Token::Semicolon, "';' after for initializer")?;
        }
        self.parse_for_rest(init, start)
    }

    fn parse_for_rest(&mut self, init: Vec<Stmt>, start: Location) -> Result<Stmt> {
        let condition = if self.check(&Token::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(Token::Semicolon, "';' after for condition")?;
        let mut update = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                update.push(self.parse_expr()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        let body = Box::new(self.parse_stmt()?);
        Ok(Stmt::For(ForStmt {
            init,
            condition,
            update,
            body,
            span: self.span_from(start),
        }))
    }

    fn parse_switch_stmt(&mut self) -> Result<Stmt> {
        let start = self.location();
        self.expect(Token::Switch, "'switch'")?;
        self.expect(Token::LParen, "'(' after switch")?;
        let expression = self.parse_expr()?;
        self.expect(Token::RParen, "')'")?;
        self.expect(Token::LBrace, "'{' to open switch body")?;
        let mut cases = Vec::new();
        while !self.check(&Token::RBrace) {
            let case_start = self.location();
            let mut labels = Vec::new();
            loop {
                if self.eat(&Token::Case) {
                    labels.push(self.parse_expr()?);
                    self.expect(Token::Colon, "':' after case label")?;
                } else if self.eat(&Token::Default) {
                    self.expect(Token::Colon, "':' after default")?;
                } else {
                    break;
                }
                if !self.check(&Token::Case) && !self.check(&Token::Default) {
                    break;
                }
            }
            let mut statements = Vec::new();
            while !self.check(&Token::Case)
                && !self.check(&Token::Default)
                && !self.check(&Token::RBrace)
            {
                statements.push(self.parse_stmt()?);
            }
            cases.push(SwitchCase {
                labels,
                statements,
                span: self.span_from(case_start),
            });
        }
        self.expect(Token::RBrace, "'}' to close switch body")?;
        Ok(Stmt::Switch(SwitchStmt {
            expression,
            cases,
            span: self.span_from(start),
        }))
    }

    fn parse_try_stmt(&mut self) -> Result<Stmt> {
        let start = self.location();
        self.expect(Token::Try, "'try'")?;
        let mut resources = Vec::new();
        if self.eat(&Token::LParen) {
            loop {
                let res_start = self.location();
                if let Some(decl) = self.try_parse_var_decl()? {
                    let mut vars = decl.variables;
                    if vars.len() != 1 || vars[0].initializer.is_none() {
                        return Err(self.error_here("malformed try resource"));
                    }
                    let var = vars.remove(0);
                    resources.push(TryResource::Var {
                        type_ref: decl.type_ref,
                        name: var.name,
                        initializer: var.initializer.unwrap(),
                        span: self.span_from(res_start),
                    });
                } else {
                    let expr = self.parse_expr()?;
                    resources.push(TryResource::Expr {
                        expr,
                        span: self.span_from(res_start),
                    });
                }
                if !self.eat(&Token::Semicolon) {
                    break;
                }
                if self.check(&Token::RParen) {
                    break;
                }
            }
            self.expect(Token::RParen, "')' to close try resources")?;
        }
        let try_block = self.parse_block()?;
        let mut catch_clauses = Vec::new();
        while self.check(&Token::Catch) {
            let catch_start = self.location();
            self.advance();
            self.expect(Token::LParen, "'(' after catch")?;
            self.parse_modifiers();
            let first_type = self.parse_type_ref()?;
            let mut alt_types = Vec::new();
            while self.eat(&Token::Pipe) {
                alt_types.push(self.parse_type_ref()?);
            }
            let param_start = self.location();
            let name = self.expect(Token::Identifier, "catch parameter name")?.lexeme;
            self.expect(Token::RParen, "')'")?;
            let block = self.parse_block()?;
            catch_clauses.push(CatchClause {
                parameter: Parameter {
                    modifiers: Vec::new(),
                    type_ref: first_type,
                    name,
                    span: self.span_from(param_start),
                },
                alt_types,
                block,
                span: self.span_from(catch_start),
            });
        }
        let finally_block = if self.eat(&Token::Finally) {
            Some(self.parse_block()?)
        } else {
            None
        };
        if catch_clauses.is_empty() && finally_block.is_none() && resources.is_empty() {
            return Err(self.error_here("try statement needs catch, finally, or resources"));
        }
        Ok(Stmt::Try(TryStmt {
            resources,
            try_block,
            catch_clauses,
            finally_block,
            span: self.span_from(start),
        }))
    }

    // Expressions

    pub fn parse_expr(&mut self) -> Result<Expr> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr> {
        let start = self.location();
        let target = self.parse_conditional()?;
        let op = match self.peek().map(|t| &t.token) {
            Some(Token::Assign) => Some(AssignmentOp::Assign),
            Some(Token::AddAssign) => Some(AssignmentOp::Add),
            Some(Token::SubAssign) => Some(AssignmentOp::Sub),
            Some(Token::MulAssign) => Some(AssignmentOp::Mul),
            Some(Token::DivAssign) => Some(AssignmentOp::Div),
            Some(Token::ModAssign) => Some(AssignmentOp::Mod),
            Some(Token::AndAssign) => Some(AssignmentOp::And),
            Some(Token::OrAssign) => Some(AssignmentOp::Or),
            Some(Token::XorAssign) => Some(AssignmentOp::Xor),
            Some(Token::ShlAssign) => Some(AssignmentOp::Shl),
            Some(Token::ShrAssign) => Some(AssignmentOp::Shr),
            Some(Token::UShrAssign) => Some(AssignmentOp::UShr),
            _ => None,
        };
        if let Some(operator) = op {
            self.advance();
            let value = self.parse_assignment()?;
            return Ok(Expr::Assignment(AssignmentExpr {
                target: Box::new(target),
                operator,
                value: Box::new(value),
                span: self.span_from(start),
            }));
        }
        Ok(target)
    }

    fn parse_conditional(&mut self) -> Result<Expr> {
        let start = self.location();
        let condition = self.parse_binary(0)?;
        if self.eat(&Token::Question) {
            let then_expr = self.parse_expr()?;
            self.expect(Token::Colon, "':' in conditional expression")?;
            let else_expr = self.parse_conditional()?;
            return Ok(Expr::Conditional(ConditionalExpr {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                span: self.span_from(start),
            }));
        }
        Ok(condition)
    }

    /// Binary operator precedence climbing; level 0 is `||`.
    fn parse_binary(&mut self, level: usize) -> Result<Expr> {
        const TOP_LEVEL: usize = 9;
        if level > TOP_LEVEL {
            return self.parse_unary();
        }
        let start = self.location();
        let mut left = self.parse_binary(level + 1)?;
        loop {
            // instanceof sits at relational precedence
            if level == 6 && self.check(&Token::InstanceOf) {
                self.advance();
                let target_type = self.parse_type_ref()?;
                left = Expr::InstanceOf(InstanceOfExpr {
                    expr: Box::new(left),
                    target_type,
                    span: self.span_from(start),
                });
                continue;
            }
            let op = match self.binary_op_at_level(level) {
                Some(op) => op,
                None => break,
            };
            let consumed = match op {
                BinaryOp::Shr => 2,
                BinaryOp::UShr => 3,
                _ => 1,
            };
            for _ in 0..consumed {
                self.advance();
            }
            let right = self.parse_binary(level + 1)?;
            left = Expr::Binary(BinaryExpr {
                left: Box::new(left),
                operator: op,
                right: Box::new(right),
                span: self.span_from(start),
            });
        }
        Ok(left)
    }

    fn binary_op_at_level(&self, level: usize) -> Option<BinaryOp> {
        let tok = self.peek()?;
        match (level, &tok.token) {
            (0, Token::PipePipe) => Some(BinaryOp::Or),
            (1, Token::AndAnd) => Some(BinaryOp::And),
            (2, Token::Pipe) => Some(BinaryOp::BitOr),
            (3, Token::Caret) => Some(BinaryOp::BitXor),
            (4, Token::Amp) => Some(BinaryOp::BitAnd),
            (5, Token::Eq) => Some(BinaryOp::Eq),
            (5, Token::Ne) => Some(BinaryOp::Ne),
            (6, Token::Lt) => Some(BinaryOp::Lt),
            (6, Token::Le) => Some(BinaryOp::Le),
            (6, Token::Ge) => Some(BinaryOp::Ge),
            (6, Token::Gt) => {
                // A lone '>'; adjacent '>' pairs are shift operators
                if self.check_at(1, &Token::Gt) && self.adjacent(self.pos, self.pos + 1) {
                    None
                } else {
                    Some(BinaryOp::Gt)
                }
            }
            (7, Token::Shl) => Some(BinaryOp::Shl),
            (7, Token::Gt) => {
                if self.check_at(1, &Token::Gt) && self.adjacent(self.pos, self.pos + 1) {
                    if self.check_at(2, &Token::Gt) && self.adjacent(self.pos + 1, self.pos + 2) {
                        Some(BinaryOp::UShr)
                    } else {
                        Some(BinaryOp::Shr)
                    }
                } else {
                    None
                }
            }
            (8, Token::Plus) => Some(BinaryOp::Add),
            (8, Token::Minus) => Some(BinaryOp::Sub),
            (9, Token::Star) => Some(BinaryOp::Mul),
            (9, Token::Slash) => Some(BinaryOp::Div),
            (9, Token::Percent) => Some(BinaryOp::Mod),
            _ => None,
        }
    }

    fn parse_unary(&mut self) -> Result<Expr> {
        let start = self.location();
        let tok = self
            .peek()
            .ok_or_else(|| self.error_here("expected expression"))?
            .clone();
        let prefix = match tok.token {
            Token::Plus => Some(UnaryOp::Plus),
            Token::Minus => Some(UnaryOp::Minus),
            Token::Bang => Some(UnaryOp::Not),
            Token::Tilde => Some(UnaryOp::BitNot),
            Token::Inc => Some(UnaryOp::PreInc),
            Token::Dec => Some(UnaryOp::PreDec),
            _ => None,
        };
        if let Some(operator) = prefix {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary(UnaryExpr {
                operator,
                operand: Box::new(operand),
                span: self.span_from(start),
            }));
        }
        if let Some(cast) = self.try_parse_cast()? {
            return Ok(cast);
        }
        self.parse_postfix()
    }

    /// `(Type) operand` casts, disambiguated from parenthesized expressions
    /// by speculative type parsing plus a lookahead on the operand token.
    fn try_parse_cast(&mut self) -> Result<Option<Expr>> {
        if !self.check(&Token::LParen) {
            return Ok(None);
        }
        let saved = self.pos;
        let start = self.location();
        self.advance();
        let primitive = self
            .peek()
            .map(|t| t.token.is_primitive_type())
            .unwrap_or(false);
        let target_type = match self.parse_type_ref() {
            Ok(t) => t,
            Err(_) => {
                self.pos = saved;
                return Ok(None);
            }
        };
        if !self.eat(&Token::RParen) {
            self.pos = saved;
            return Ok(None);
        }
        let begins_operand = match self.peek().map(|t| &t.token) {
            Some(Token::Identifier)
            | Some(Token::This)
            | Some(Token::Super)
            | Some(Token::New)
            | Some(Token::LParen)
            | Some(Token::StringLiteral)
            | Some(Token::CharLiteral)
            | Some(Token::DecimalInteger)
            | Some(Token::HexInteger)
            | Some(Token::FloatLiteral)
            | Some(Token::True)
            | Some(Token::False)
            | Some(Token::Null)
            | Some(Token::Bang)
            | Some(Token::Tilde) => true,
            // `(x) - y` is subtraction unless x is a primitive type
            Some(Token::Plus) | Some(Token::Minus) => primitive,
            _ => false,
        };
        if !begins_operand {
            self.pos = saved;
            return Ok(None);
        }
        let expr = self.parse_unary()?;
        Ok(Some(Expr::Cast(CastExpr {
            target_type,
            expr: Box::new(expr),
            span: self.span_from(start),
        })))
    }

    fn parse_postfix(&mut self) -> Result<Expr> {
        let start = self.location();
        let mut expr = self.parse_primary()?;
        loop {
            if self.check(&Token::Dot) {
                // `expr.new Inner(...)` qualified creation
                if self.check_at(1, &Token::New) {
                    self.advance();
                    self.advance();
                    let target_type = self.parse_type_ref()?;
                    let arguments = self.parse_argument_list()?;
                    let anonymous_body = self.parse_optional_anonymous_body()?;
                    expr = Expr::New(NewExpr {
                        enclosing: Some(Box::new(expr)),
                        target_type,
                        arguments,
                        anonymous_body,
                        span: self.span_from(start),
                    });
                    continue;
                }
                if self.check_at(1, &Token::Identifier) {
                    self.advance();
                    let name = self.advance().unwrap().lexeme;
                    if self.check(&Token::LParen) {
                        let arguments = self.parse_argument_list()?;
                        expr = Expr::MethodCall(MethodCallExpr {
                            target: Some(Box::new(expr)),
                            name,
                            arguments,
                            span: self.span_from(start),
                        });
                    } else {
                        expr = Expr::FieldAccess(FieldAccessExpr {
                            target: Box::new(expr),
                            name,
                            span: self.span_from(start),
                        });
                    }
                    continue;
                }
                // `.this` / `.class` and friends are outside the subset
                return Err(self.error_here("unsupported member access"));
            }
            if self.check(&Token::LBracket) {
                self.advance();
                let index = self.parse_expr()?;
                self.expect(Token::RBracket, "']'")?;
                expr = Expr::ArrayAccess(ArrayAccessExpr {
                    array: Box::new(expr),
                    index: Box::new(index),
                    span: self.span_from(start),
                });
                continue;
            }
            if self.check(&Token::DoubleColon) {
                self.advance();
                let name = if self.eat(&Token::New) {
                    "new".to_string()
                } else {
                    self.expect(Token::Identifier, "method reference name")?.lexeme
                };
                expr = Expr::MethodRef(MethodRefExpr {
                    target: Box::new(expr),
                    name,
                    span: self.span_from(start),
                });
                continue;
            }
            if self.check(&Token::Inc) {
                self.advance();
                expr = Expr::Unary(UnaryExpr {
                    operator: UnaryOp::PostInc,
                    operand: Box::new(expr),
                    span: self.span_from(start),
                });
                continue;
            }
            if self.check(&Token::Dec) {
                self.advance();
                expr = Expr::Unary(UnaryExpr {
                    operator: UnaryOp::PostDec,
                    operand: Box::new(expr),
                    span: self.span_from(start),
                });
                continue;
            }
            break;
        }
        Ok(expr)
    }

    fn parse_primary(&mut self) -> Result<Expr> {
        let start = self.location();
        let tok = self
            .peek()
            .ok_or_else(|| self.error_here("expected expression"))?
            .clone();
        match tok.token {
            Token::DecimalInteger | Token::HexInteger => {
                self.advance();
                let value = parse_integer(&tok.lexeme)
                    .ok_or_else(|| self.error_here("invalid integer literal"))?;
                let literal = if tok.lexeme.ends_with('l') || tok.lexeme.ends_with('L') {
                    Literal::Long(value)
                } else {
                    Literal::Integer(value)
                };
                Ok(Expr::Literal(LiteralExpr {
                    value: literal,
                    span: self.span_from(start),
                }))
            }
            Token::FloatLiteral => {
                self.advance();
                let trimmed = tok.lexeme.trim_end_matches(['f', 'F', 'd', 'D']);
                let value: f64 = trimmed
                    .parse()
                    .map_err(|_| self.error_here("invalid float literal"))?;
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Float(value),
                    span: self.span_from(start),
                }))
            }
            Token::StringLiteral => {
                self.advance();
                let inner = tok.lexeme[1..tok.lexeme.len() - 1].to_string();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::String(inner),
                    span: self.span_from(start),
                }))
            }
            Token::CharLiteral => {
                self.advance();
                let inner = tok.lexeme[1..tok.lexeme.len() - 1].to_string();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Char(inner),
                    span: self.span_from(start),
                }))
            }
            Token::True | Token::False => {
                self.advance();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Boolean(tok.is(&Token::True)),
                    span: self.span_from(start),
                }))
            }
            Token::Null => {
                self.advance();
                Ok(Expr::Literal(LiteralExpr {
                    value: Literal::Null,
                    span: self.span_from(start),
                }))
            }
            Token::This => {
                self.advance();
                if self.check(&Token::LParen) {
                    // explicit constructor invocation `this(...)`
                    let arguments = self.parse_argument_list()?;
                    return Ok(Expr::MethodCall(MethodCallExpr {
                        target: None,
                        name: "this".to_string(),
                        arguments,
                        span: self.span_from(start),
                    }));
                }
                Ok(Expr::This(ThisExpr {
                    span: self.span_from(start),
                }))
            }
            Token::Super => {
                self.advance();
                if self.check(&Token::LParen) {
                    // explicit constructor invocation `super(...)`
                    let arguments = self.parse_argument_list()?;
                    return Ok(Expr::MethodCall(MethodCallExpr {
                        target: None,
                        name: "super".to_string(),
                        arguments,
                        span: self.span_from(start),
                    }));
                }
                Ok(Expr::Super(SuperExpr {
                    span: self.span_from(start),
                }))
            }
            Token::New => {
                self.advance();
                self.parse_new_rest(None, start)
            }
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(Token::RParen, "')'")?;
                Ok(Expr::Parenthesized(Box::new(inner)))
            }
            Token::Identifier => {
                self.advance();
                if self.check(&Token::LParen) {
                    let arguments = self.parse_argument_list()?;
                    return Ok(Expr::MethodCall(MethodCallExpr {
                        target: None,
                        name: tok.lexeme,
                        arguments,
                        span: self.span_from(start),
                    }));
                }
                Ok(Expr::Identifier(IdentifierExpr {
                    name: tok.lexeme,
                    span: self.span_from(start),
                }))
            }
            _ => Err(self.error_here("expected expression")),
        }
    }

    fn parse_new_rest(&mut self, enclosing: Option<Box<Expr>>, start: Location) -> Result<Expr> {
        let target_type = self.parse_type_ref()?;
        // Array creation
        if self.check(&Token::LBracket) {
            let mut dims = Vec::new();
            while self.eat(&Token::LBracket) {
                if self.eat(&Token::RBracket) {
                    continue;
                }
                dims.push(self.parse_expr()?);
                self.expect(Token::RBracket, "']'")?;
            }
            let initializer = if self.check(&Token::LBrace) {
                Some(Box::new(self.parse_array_initializer()?))
            } else {
                None
            };
            return Ok(Expr::NewArray(NewArrayExpr {
                element_type: target_type,
                dims,
                initializer,
                span: self.span_from(start),
            }));
        }
        let arguments = self.parse_argument_list()?;
        let anonymous_body = self.parse_optional_anonymous_body()?;
        Ok(Expr::New(NewExpr {
            enclosing,
            target_type,
            arguments,
            anonymous_body,
            span: self.span_from(start),
        }))
    }

    fn parse_optional_anonymous_body(&mut self) -> Result<Option<Box<ClassDecl>>> {
        if !self.check(&Token::LBrace) {
            return Ok(None);
        }
        let start = self.location();
        let body = self.parse_class_body("")?;
        Ok(Some(Box::new(ClassDecl {
            modifiers: Vec::new(),
            annotations: Vec::new(),
            name: String::new(),
            extends: None,
            implements: Vec::new(),
            body,
            span: self.span_from(start),
        })))
    }

    fn parse_argument_list(&mut self) -> Result<Vec<Expr>> {
        self.expect(Token::LParen, "'('")?;
        let mut arguments = Vec::new();
        if !self.check(&Token::RParen) {
            loop {
                arguments.push(self.parse_expr()?);
                if !self.eat(&Token::Comma) {
                    break;
                }
            }
        }
        self.expect(Token::RParen, "')'")?;
        Ok(arguments)
    }
}

fn parse_integer(lexeme: &str) -> Option<i64> {
    let cleaned: String = lexeme
        .trim_end_matches(['l', 'L'])
        .chars()
        .filter(|c| *c != '_')
        .collect();
    if let Some(hex) = cleaned.strip_prefix("0x").or_else(|| cleaned.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|v| v as i64);
    }
    cleaned.parse::<i64>().ok()
}

fn type_display(t: &TypeRef) -> String {
    let mut s = t.name.clone();
    for _ in 0..t.array_dims {
        s.push_str("[]");
    }
    s
}
