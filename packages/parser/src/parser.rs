use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::tokenizer::{tokenize, Token};

/// Parser for the typed-source subset
///
/// Top-level declarations are parsed structurally; function bodies, call
/// arguments and class bodies are skipped by token balancing. Unrecognized
/// top-level statements are skipped rather than rejected, so a unit full of
/// constructs outside the subset still yields its imports, declarations and
/// type definitions.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<(Token<'src>, std::ops::Range<usize>)>,
    pos: usize,
}

/// Parse a source string into a module
pub fn parse(source: &str) -> ParseResult<Module> {
    Parser::new(source).parse_module()
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        let tokens = tokenize(source);
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    /// Parse a complete module
    pub fn parse_module(&mut self) -> ParseResult<Module> {
        let mut module = Module::new();

        while !self.is_at_end() {
            match self.peek_token() {
                Some(Token::Import) => {
                    module.imports.push(self.parse_import()?);
                }
                Some(Token::Export) => {
                    self.parse_export(&mut module)?;
                }
                Some(Token::Function) => {
                    let decl = self.parse_function(false, false)?;
                    module.declarations.push(decl);
                }
                Some(Token::Async) if self.peek_token_at(1) == Some(&Token::Function) => {
                    self.advance();
                    let decl = self.parse_function(false, false)?;
                    module.declarations.push(decl);
                }
                Some(Token::Class) => {
                    let decl = self.parse_class(false, false)?;
                    module.declarations.push(decl);
                }
                Some(Token::Interface) => {
                    let decl = self.parse_interface(false)?;
                    module.interfaces.push(decl);
                }
                Some(Token::Type) => {
                    let decl = self.parse_type_alias(false)?;
                    module.type_aliases.push(decl);
                }
                Some(Token::Const) | Some(Token::Let) | Some(Token::Var) => {
                    self.parse_var_decls(false, &mut module.declarations)?;
                }
                _ => {
                    // Outside the subset (expression statements, enums,
                    // decorators, ...) - skip to the next statement
                    self.skip_statement();
                }
            }
        }

        Ok(module)
    }

    /// Parse whatever follows an `export` keyword
    fn parse_export(&mut self, module: &mut Module) -> ParseResult<()> {
        self.expect(Token::Export)?;

        match self.peek_token() {
            Some(Token::Default) => {
                self.advance();
                match self.peek_token() {
                    Some(Token::Function) => {
                        let decl = self.parse_function(true, true)?;
                        module.declarations.push(decl);
                    }
                    Some(Token::Async) if self.peek_token_at(1) == Some(&Token::Function) => {
                        self.advance();
                        let decl = self.parse_function(true, true)?;
                        module.declarations.push(decl);
                    }
                    Some(Token::Class) => {
                        let decl = self.parse_class(true, true)?;
                        module.declarations.push(decl);
                    }
                    _ => {
                        // `export default <expr>` - nothing to classify
                        self.skip_statement();
                    }
                }
            }
            Some(Token::Function) => {
                let decl = self.parse_function(true, false)?;
                module.declarations.push(decl);
            }
            Some(Token::Async) if self.peek_token_at(1) == Some(&Token::Function) => {
                self.advance();
                let decl = self.parse_function(true, false)?;
                module.declarations.push(decl);
            }
            Some(Token::Class) => {
                let decl = self.parse_class(true, false)?;
                module.declarations.push(decl);
            }
            Some(Token::Interface) => {
                let decl = self.parse_interface(true)?;
                module.interfaces.push(decl);
            }
            Some(Token::Type) => {
                let decl = self.parse_type_alias(true)?;
                module.type_aliases.push(decl);
            }
            Some(Token::Const) | Some(Token::Let) | Some(Token::Var) => {
                self.parse_var_decls(true, &mut module.declarations)?;
            }
            Some(Token::LBrace) | Some(Token::Star) => {
                // Re-export lists are not followed
                self.skip_statement();
            }
            _ => {
                self.skip_statement();
            }
        }

        Ok(())
    }

    /// Parse an import statement
    fn parse_import(&mut self) -> ParseResult<Import> {
        let start = self.current_pos();
        self.expect(Token::Import)?;

        // Side-effect import: `import "./styles.css"`
        if matches!(self.peek_token(), Some(Token::String(_))) {
            let specifier = self.expect_string()?;
            self.match_token(Token::Semicolon);
            return Ok(Import {
                specifier,
                default: None,
                namespace: None,
                named: Vec::new(),
                span: Span::new(start, self.prev_end()),
            });
        }

        // `import type { ... }` binds types only, but resolves the same way
        self.match_token(Token::Type);

        let mut default = None;
        let mut namespace = None;
        let mut named = Vec::new();

        if matches!(self.peek_token(), Some(Token::Ident(_))) {
            default = Some(self.expect_ident()?);
            self.match_token(Token::Comma);
        }

        if self.match_token(Token::LBrace) {
            while !self.check(Token::RBrace) && !self.is_at_end() {
                self.match_token(Token::Type);
                let imported = self.expect_import_name()?;
                let local = if self.match_token(Token::As) {
                    self.expect_ident()?
                } else {
                    imported.clone()
                };
                named.push(ImportedName { imported, local });
                if !self.check(Token::RBrace) {
                    self.match_token(Token::Comma);
                }
            }
            self.expect(Token::RBrace)?;
        } else if self.match_token(Token::Star) {
            self.expect(Token::As)?;
            namespace = Some(self.expect_ident()?);
        }

        self.expect(Token::From)?;
        let specifier = self.expect_string()?;
        self.match_token(Token::Semicolon);

        Ok(Import {
            specifier,
            default,
            namespace,
            named,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Parse a function declaration, skipping its body
    fn parse_function(&mut self, exported: bool, is_default: bool) -> ParseResult<Declaration> {
        let start = self.current_pos();
        self.expect(Token::Function)?;
        self.match_token(Token::Star); // generator

        let name = match self.peek_token() {
            Some(Token::Ident(n)) => {
                let name = n.to_string();
                self.advance();
                name
            }
            _ if is_default => "default".to_string(),
            _ => {
                return Err(ParseError::invalid_syntax(
                    self.current_pos(),
                    "Expected function name",
                ));
            }
        };

        if self.check(Token::LAngle) {
            self.skip_angles();
        }

        let params = self.parse_params()?;

        if self.match_token(Token::Colon) {
            // Return type is parsed for position, not kept
            self.parse_type()?;
        }

        if self.check(Token::LBrace) {
            self.skip_braces();
        }

        Ok(Declaration {
            exported,
            name,
            kind: DeclKind::Function,
            params,
            type_ann: None,
            initializer: None,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Parse a class declaration, skipping heritage and body
    fn parse_class(&mut self, exported: bool, is_default: bool) -> ParseResult<Declaration> {
        let start = self.current_pos();
        self.expect(Token::Class)?;

        let name = match self.peek_token() {
            Some(Token::Ident(n)) => {
                let name = n.to_string();
                self.advance();
                name
            }
            _ if is_default => "default".to_string(),
            _ => {
                return Err(ParseError::invalid_syntax(
                    self.current_pos(),
                    "Expected class name",
                ));
            }
        };

        // Heritage clause may carry generics with object types in them, so
        // the body brace is the first `{` at angle depth zero
        let mut angle_depth = 0usize;
        while !self.is_at_end() {
            match self.peek_token() {
                Some(Token::LBrace) if angle_depth == 0 => break,
                Some(Token::LAngle) => angle_depth += 1,
                Some(Token::RAngle) => angle_depth = angle_depth.saturating_sub(1),
                _ => {}
            }
            self.advance();
        }

        if self.check(Token::LBrace) {
            self.skip_braces();
        }

        Ok(Declaration {
            exported,
            name,
            kind: DeclKind::Class,
            params: Vec::new(),
            type_ann: None,
            initializer: None,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Parse one `const`/`let`/`var` statement, which may declare several
    /// variables
    fn parse_var_decls(
        &mut self,
        exported: bool,
        out: &mut Vec<Declaration>,
    ) -> ParseResult<()> {
        let start = self.current_pos();
        self.advance(); // const / let / var

        loop {
            let name = self.expect_ident()?;
            self.match_token(Token::Bang);

            let type_ann = if self.match_token(Token::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };

            let initializer = if self.match_token(Token::Equals) {
                Some(self.parse_initializer()?)
            } else {
                None
            };

            out.push(Declaration {
                exported,
                name,
                kind: DeclKind::Variable,
                params: Vec::new(),
                type_ann,
                initializer,
                span: Span::new(start, self.prev_end()),
            });

            if !self.match_token(Token::Comma) {
                break;
            }
        }

        self.match_token(Token::Semicolon);
        Ok(())
    }

    /// Parse a variable initializer, shallowly
    fn parse_initializer(&mut self) -> ParseResult<Initializer> {
        let start = self.current_pos();

        // `async (...) =>` and `async x =>`
        if self.check(Token::Async)
            && matches!(
                self.peek_token_at(1),
                Some(Token::LParen) | Some(Token::Ident(_))
            )
        {
            self.advance();
        }

        match self.peek_token() {
            Some(Token::LParen) if self.paren_group_starts_arrow() => {
                let params = self.parse_params()?;
                if self.match_token(Token::Colon) {
                    self.parse_type()?;
                }
                self.expect(Token::FatArrow)?;
                self.skip_arrow_body();
                Ok(Initializer::Arrow {
                    params,
                    span: Span::new(start, self.prev_end()),
                })
            }
            Some(Token::Ident(_)) => self.parse_ident_initializer(start),
            _ => Ok(self.skip_initializer_text(start)),
        }
    }

    /// Initializer starting with an identifier: a call, a single-parameter
    /// arrow, or plain expression text
    fn parse_ident_initializer(&mut self, start: usize) -> ParseResult<Initializer> {
        let saved = self.pos;

        let mut callee = self.expect_ident()?;
        while self.check(Token::Dot) && matches!(self.peek_token_at(1), Some(Token::Ident(_))) {
            self.advance();
            callee.push('.');
            callee.push_str(&self.expect_ident()?);
        }

        if self.check(Token::LAngle) {
            // Either explicit call type arguments or a comparison; try the
            // call reading and fall back to raw text
            if let Ok(type_args) = self.try_parse_type_args() {
                if self.check(Token::LParen) {
                    self.skip_parens();
                    self.match_token(Token::Bang);
                    return Ok(Initializer::Call {
                        callee,
                        type_args,
                        span: Span::new(start, self.prev_end()),
                    });
                }
            }
            self.pos = saved;
            return Ok(self.skip_initializer_text(start));
        }

        if self.check(Token::LParen) {
            self.skip_parens();
            // A call followed by more expression (chaining, operators) is
            // beyond the shallow view; keep the call itself
            self.match_token(Token::Bang);
            return Ok(Initializer::Call {
                callee,
                type_args: Vec::new(),
                span: Span::new(start, self.prev_end()),
            });
        }

        if self.check(Token::FatArrow) && !callee.contains('.') {
            let param_span = Span::new(start, self.prev_end());
            self.advance();
            self.skip_arrow_body();
            return Ok(Initializer::Arrow {
                params: vec![Param {
                    name: callee,
                    optional: false,
                    type_ann: None,
                    span: param_span,
                }],
                span: Span::new(start, self.prev_end()),
            });
        }

        self.pos = saved;
        Ok(self.skip_initializer_text(start))
    }

    /// Parse `<T1, T2, ...>` in call position
    fn try_parse_type_args(&mut self) -> ParseResult<Vec<TypeExpr>> {
        self.expect(Token::LAngle)?;
        let mut args = Vec::new();
        loop {
            args.push(self.parse_type()?);
            if self.match_token(Token::Comma) {
                continue;
            }
            self.expect(Token::RAngle)?;
            break;
        }
        Ok(args)
    }

    /// Consume expression tokens until the end of the declarator and keep
    /// the raw text
    fn skip_initializer_text(&mut self, start: usize) -> Initializer {
        self.skip_expression();
        let end = self.prev_end().max(start);
        Initializer::Other {
            text: self.source[start..end].trim().to_string(),
            span: Span::new(start, end),
        }
    }

    /// Parse a parameter list
    fn parse_params(&mut self) -> ParseResult<Vec<Param>> {
        self.expect(Token::LParen)?;
        let mut params = Vec::new();

        while !self.check(Token::RParen) && !self.is_at_end() {
            let start = self.current_pos();

            // Rest parameter
            while self.match_token(Token::Dot) {}

            let name = match self.peek_token() {
                Some(Token::Ident(n)) => {
                    let name = n.to_string();
                    self.advance();
                    name
                }
                Some(Token::LBrace) => {
                    self.skip_braces();
                    "_".to_string()
                }
                Some(Token::LBracket) => {
                    self.skip_brackets();
                    "_".to_string()
                }
                _ => {
                    return Err(ParseError::invalid_syntax(
                        self.current_pos(),
                        "Expected parameter name",
                    ));
                }
            };

            let optional = self.match_token(Token::Question);

            let type_ann = if self.match_token(Token::Colon) {
                Some(self.parse_type()?)
            } else {
                None
            };

            if self.match_token(Token::Equals) {
                self.skip_default_value();
            }

            params.push(Param {
                name,
                optional,
                type_ann,
                span: Span::new(start, self.prev_end()),
            });

            if !self.check(Token::RParen) {
                self.match_token(Token::Comma);
            }
        }

        self.expect(Token::RParen)?;
        Ok(params)
    }

    /// Parse an interface declaration
    fn parse_interface(&mut self, exported: bool) -> ParseResult<InterfaceDecl> {
        let start = self.current_pos();
        self.expect(Token::Interface)?;
        let name = self.expect_ident()?;
        let type_params = self.parse_type_params_opt()?;

        let mut extends = Vec::new();
        if self.match_token(Token::Extends) {
            extends.push(self.parse_type()?);
            while self.match_token(Token::Comma) {
                extends.push(self.parse_type()?);
            }
        }

        let members = self.parse_object_members()?;

        Ok(InterfaceDecl {
            exported,
            name,
            type_params,
            extends,
            members,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Parse a type alias declaration
    fn parse_type_alias(&mut self, exported: bool) -> ParseResult<TypeAliasDecl> {
        let start = self.current_pos();
        self.expect(Token::Type)?;
        let name = self.expect_ident()?;
        let type_params = self.parse_type_params_opt()?;
        self.expect(Token::Equals)?;
        let value = self.parse_type()?;
        self.match_token(Token::Semicolon);

        Ok(TypeAliasDecl {
            exported,
            name,
            type_params,
            value,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Parse `<T, U extends V = W>` keeping only the parameter names
    fn parse_type_params_opt(&mut self) -> ParseResult<Vec<String>> {
        let mut params = Vec::new();
        if !self.match_token(Token::LAngle) {
            return Ok(params);
        }

        loop {
            params.push(self.expect_ident()?);

            // Skip constraint and default up to the next `,` or closing `>`
            let mut angle_depth = 0usize;
            while !self.is_at_end() {
                match self.peek_token() {
                    Some(Token::Comma) | Some(Token::RAngle) if angle_depth == 0 => break,
                    Some(Token::LAngle) => angle_depth += 1,
                    Some(Token::RAngle) => angle_depth -= 1,
                    _ => {}
                }
                self.advance();
            }

            if self.match_token(Token::Comma) {
                continue;
            }
            self.expect(Token::RAngle)?;
            break;
        }

        Ok(params)
    }

    // ---- type expressions ----

    /// Parse a type expression (union level)
    pub fn parse_type(&mut self) -> ParseResult<TypeExpr> {
        let start = self.current_pos();
        self.match_token(Token::Pipe); // leading `|`

        let first = self.parse_intersection()?;
        if !self.check(Token::Pipe) {
            return Ok(first);
        }

        let mut arms = vec![first];
        while self.match_token(Token::Pipe) {
            arms.push(self.parse_intersection()?);
        }

        Ok(TypeExpr::Union {
            arms,
            span: Span::new(start, self.prev_end()),
        })
    }

    fn parse_intersection(&mut self) -> ParseResult<TypeExpr> {
        let start = self.current_pos();
        let first = self.parse_postfix()?;
        if !self.check(Token::Ampersand) {
            return Ok(first);
        }

        let mut arms = vec![first];
        while self.match_token(Token::Ampersand) {
            arms.push(self.parse_postfix()?);
        }

        Ok(TypeExpr::Intersection {
            arms,
            span: Span::new(start, self.prev_end()),
        })
    }

    fn parse_postfix(&mut self) -> ParseResult<TypeExpr> {
        let start = self.current_pos();
        let mut ty = self.parse_primary_type()?;

        while self.check(Token::LBracket) {
            if self.peek_token_at(1) == Some(&Token::RBracket) {
                self.advance();
                self.advance();
                ty = TypeExpr::Array {
                    element: Box::new(ty),
                    span: Span::new(start, self.prev_end()),
                };
            } else {
                // Indexed access `T["key"]` does not decompose; keep it
                // textually
                self.advance();
                self.parse_type()?;
                self.expect(Token::RBracket)?;
                ty = TypeExpr::Literal {
                    text: self.source[start..self.prev_end()].trim().to_string(),
                    span: Span::new(start, self.prev_end()),
                };
            }
        }

        Ok(ty)
    }

    fn parse_primary_type(&mut self) -> ParseResult<TypeExpr> {
        let start = self.current_pos();

        match self.peek_token() {
            Some(Token::LBrace) => {
                let members = self.parse_object_members()?;
                Ok(TypeExpr::Object {
                    members,
                    span: Span::new(start, self.prev_end()),
                })
            }

            Some(Token::LBracket) => {
                self.advance();
                let mut elements = Vec::new();
                while !self.check(Token::RBracket) && !self.is_at_end() {
                    elements.push(self.parse_type()?);
                    if !self.check(Token::RBracket) {
                        self.match_token(Token::Comma);
                    }
                }
                self.expect(Token::RBracket)?;
                Ok(TypeExpr::Tuple {
                    elements,
                    span: Span::new(start, self.prev_end()),
                })
            }

            Some(Token::LParen) => {
                if self.paren_group_starts_arrow() {
                    // Function type `(a: T) => U`
                    self.skip_parens();
                    if self.match_token(Token::Colon) {
                        self.parse_type()?;
                    }
                    self.expect(Token::FatArrow)?;
                    self.parse_type()?;
                    Ok(TypeExpr::Function {
                        text: self.source[start..self.prev_end()].trim().to_string(),
                        span: Span::new(start, self.prev_end()),
                    })
                } else {
                    self.advance();
                    let inner = self.parse_type()?;
                    self.expect(Token::RParen)?;
                    Ok(inner)
                }
            }

            Some(Token::String(s)) => {
                let text = s.to_string();
                self.advance();
                Ok(TypeExpr::Literal {
                    text,
                    span: Span::new(start, self.prev_end()),
                })
            }

            Some(Token::Number(n)) => {
                let text = n.to_string();
                self.advance();
                Ok(TypeExpr::Literal {
                    text,
                    span: Span::new(start, self.prev_end()),
                })
            }

            Some(Token::Minus) => {
                self.advance();
                let n = match self.peek_token() {
                    Some(Token::Number(n)) => n.to_string(),
                    _ => {
                        return Err(ParseError::invalid_syntax(
                            self.current_pos(),
                            "Expected number after '-' in type position",
                        ));
                    }
                };
                self.advance();
                Ok(TypeExpr::Literal {
                    text: format!("-{}", n),
                    span: Span::new(start, self.prev_end()),
                })
            }

            Some(Token::Ident(first)) => {
                let text_literal = matches!(*first, "true" | "false");
                let mut name = self.expect_ident()?;

                if text_literal {
                    return Ok(TypeExpr::Literal {
                        text: name,
                        span: Span::new(start, self.prev_end()),
                    });
                }

                // `typeof X` and `keyof T` degrade to opaque named forms
                if (name == "typeof" || name == "keyof")
                    && matches!(self.peek_token(), Some(Token::Ident(_)))
                {
                    let operand = self.parse_primary_type()?;
                    let end = operand.span().end;
                    return Ok(TypeExpr::Named {
                        name: format!("{} {}", name, self.source[operand.span().start..end].trim()),
                        type_args: Vec::new(),
                        span: Span::new(start, end),
                    });
                }

                while self.check(Token::Dot)
                    && matches!(self.peek_token_at(1), Some(Token::Ident(_)))
                {
                    self.advance();
                    name.push('.');
                    name.push_str(&self.expect_ident()?);
                }

                let type_args = if self.check(Token::LAngle) {
                    self.try_parse_type_args()?
                } else {
                    Vec::new()
                };

                Ok(TypeExpr::Named {
                    name,
                    type_args,
                    span: Span::new(start, self.prev_end()),
                })
            }

            Some(other) => Err(ParseError::unexpected_token(
                self.current_pos(),
                "type expression",
                other.to_string(),
            )),

            None => Err(ParseError::unexpected_eof(self.current_pos())),
        }
    }

    /// Parse `{ name?: T; readonly other: U; ... }`, dropping index and call
    /// signatures
    fn parse_object_members(&mut self) -> ParseResult<Vec<Member>> {
        self.expect(Token::LBrace)?;
        let mut members = Vec::new();

        while !self.check(Token::RBrace) && !self.is_at_end() {
            if let Some(member) = self.parse_member()? {
                members.push(member);
            }
            while self.match_token(Token::Semicolon) || self.match_token(Token::Comma) {}
        }

        self.expect(Token::RBrace)?;
        Ok(members)
    }

    fn parse_member(&mut self) -> ParseResult<Option<Member>> {
        let start = self.current_pos();
        let mut readonly = self.match_token(Token::Readonly);

        // Index signature `[key: string]: T` has no name to report
        if self.check(Token::LBracket) {
            self.skip_brackets();
            if self.match_token(Token::Colon) {
                self.parse_type()?;
            }
            return Ok(None);
        }

        // Call signature `(): T`
        if self.check(Token::LParen) {
            self.skip_parens();
            if self.match_token(Token::Colon) {
                self.parse_type()?;
            }
            return Ok(None);
        }

        let name = match self.member_name() {
            Some(name) => name,
            None if readonly && (self.check(Token::Colon) || self.check(Token::Question)) => {
                // The modifier was actually a member named `readonly`
                readonly = false;
                "readonly".to_string()
            }
            None => {
                return Err(ParseError::invalid_syntax(
                    self.current_pos(),
                    "Expected member name",
                ));
            }
        };

        let optional = self.match_token(Token::Question);

        // Method signature `name<T>(...): R` keeps its textual form
        if self.check(Token::LAngle) || self.check(Token::LParen) {
            let sig_start = self.current_pos();
            if self.check(Token::LAngle) {
                self.skip_angles();
            }
            self.skip_parens();
            if self.match_token(Token::Colon) {
                self.parse_type()?;
            }
            let end = self.prev_end();
            return Ok(Some(Member {
                name,
                optional,
                readonly,
                type_ann: TypeExpr::Function {
                    text: self.source[sig_start..end].trim().to_string(),
                    span: Span::new(sig_start, end),
                },
                span: Span::new(start, end),
            }));
        }

        self.expect(Token::Colon)?;
        let type_ann = self.parse_type()?;

        Ok(Some(Member {
            name,
            optional,
            readonly,
            type_ann,
            span: Span::new(start, self.prev_end()),
        }))
    }

    /// Take the current token as a member name if it can be one
    fn member_name(&mut self) -> Option<String> {
        let name = match self.peek_token()? {
            Token::Ident(s) => s.to_string(),
            Token::String(s) => s[1..s.len() - 1].to_string(),
            Token::Number(n) => n.to_string(),
            // Keywords are valid member names
            Token::Type => "type".to_string(),
            Token::Default => "default".to_string(),
            Token::From => "from".to_string(),
            Token::As => "as".to_string(),
            Token::Import => "import".to_string(),
            Token::Export => "export".to_string(),
            Token::Function => "function".to_string(),
            Token::Class => "class".to_string(),
            Token::Interface => "interface".to_string(),
            Token::Extends => "extends".to_string(),
            Token::Implements => "implements".to_string(),
            Token::Const => "const".to_string(),
            Token::Let => "let".to_string(),
            Token::Var => "var".to_string(),
            Token::Async => "async".to_string(),
            _ => return None,
        };
        self.advance();
        Some(name)
    }

    fn expect_import_name(&mut self) -> ParseResult<String> {
        if self.match_token(Token::Default) {
            return Ok("default".to_string());
        }
        self.expect_ident()
    }

    // ---- lookahead and skipping ----

    /// Whether the parenthesized group at the cursor is an arrow head:
    /// `(...) =>` or `(...): R =>`
    fn paren_group_starts_arrow(&self) -> bool {
        debug_assert!(self.check(Token::LParen));
        let mut idx = self.pos;
        let mut depth = 0usize;

        while let Some((token, _)) = self.tokens.get(idx) {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return matches!(
                            self.tokens.get(idx + 1).map(|(t, _)| t),
                            Some(Token::FatArrow) | Some(Token::Colon)
                        );
                    }
                }
                _ => {}
            }
            idx += 1;
        }

        false
    }

    /// Skip an arrow function body
    fn skip_arrow_body(&mut self) {
        if self.check(Token::LBrace) {
            self.skip_braces();
        } else {
            self.skip_expression();
        }
    }

    /// Skip expression tokens until the current declarator ends: a `;` or
    /// `,` at bracket depth zero, or the start of the next top-level
    /// statement (for semicolon-free sources)
    fn skip_expression(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek_token() {
                Some(Token::Semicolon) | Some(Token::Comma) if depth == 0 => break,
                Some(token) if depth == 0 && is_statement_start(token) => break,
                Some(Token::LParen) | Some(Token::LBrace) | Some(Token::LBracket) => depth += 1,
                Some(Token::RParen) | Some(Token::RBrace) | Some(Token::RBracket) => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a default parameter value up to the next `,` or `)` at depth
    /// zero
    fn skip_default_value(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.peek_token() {
                Some(Token::Comma) | Some(Token::RParen) if depth == 0 => break,
                Some(Token::LParen) | Some(Token::LBrace) | Some(Token::LBracket) => depth += 1,
                Some(Token::RParen) | Some(Token::RBrace) | Some(Token::RBracket) => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip a statement outside the subset
    fn skip_statement(&mut self) {
        let mut consumed = false;
        while !self.is_at_end() {
            if consumed {
                if let Some(token) = self.peek_token() {
                    if is_statement_start(token) {
                        break;
                    }
                }
            }
            match self.peek_token() {
                Some(Token::Semicolon) => {
                    self.advance();
                    break;
                }
                Some(Token::LBrace) => {
                    self.skip_braces();
                    consumed = true;
                }
                Some(Token::LParen) => {
                    self.skip_parens();
                    consumed = true;
                }
                Some(Token::LBracket) => {
                    self.skip_brackets();
                    consumed = true;
                }
                _ => {
                    self.advance();
                    consumed = true;
                }
            }
        }
    }

    fn skip_braces(&mut self) {
        self.skip_group(Token::LBrace, Token::RBrace);
    }

    fn skip_parens(&mut self) {
        self.skip_group(Token::LParen, Token::RParen);
    }

    fn skip_brackets(&mut self) {
        self.skip_group(Token::LBracket, Token::RBracket);
    }

    fn skip_angles(&mut self) {
        self.skip_group(Token::LAngle, Token::RAngle);
    }

    /// Consume a balanced group, tolerating EOF
    fn skip_group(&mut self, open: Token<'src>, close: Token<'src>) {
        if !self.match_token(open.clone()) {
            return;
        }
        let mut depth = 1usize;
        while depth > 0 && !self.is_at_end() {
            if self.check(open.clone()) {
                depth += 1;
            } else if self.check(close.clone()) {
                depth -= 1;
            }
            self.advance();
        }
    }

    // ---- primitives ----

    fn peek(&self) -> Option<&(Token<'src>, std::ops::Range<usize>)> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_token_at(&self, offset: usize) -> Option<&Token<'src>> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, token: Token<'src>) -> bool {
        self.peek_token() == Some(&token)
    }

    fn match_token(&mut self, token: Token<'src>) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: Token<'src>) -> ParseResult<()> {
        if self.match_token(token.clone()) {
            Ok(())
        } else {
            match self.peek() {
                Some((found, range)) => Err(ParseError::unexpected_token(
                    range.start,
                    token.to_string(),
                    found.to_string(),
                )),
                None => Err(ParseError::unexpected_eof(self.current_pos())),
            }
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::Ident(name), _)) => {
                let name = name.to_string();
                self.advance();
                Ok(name)
            }
            Some((found, range)) => Err(ParseError::unexpected_token(
                range.start,
                "identifier",
                found.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(self.current_pos())),
        }
    }

    fn expect_string(&mut self) -> ParseResult<String> {
        match self.peek() {
            Some((Token::String(raw), _)) => {
                let value = raw[1..raw.len() - 1].to_string();
                self.advance();
                Ok(value)
            }
            Some((found, range)) => Err(ParseError::unexpected_token(
                range.start,
                "string literal",
                found.to_string(),
            )),
            None => Err(ParseError::unexpected_eof(self.current_pos())),
        }
    }

    fn current_pos(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, range)| range.start)
            .unwrap_or(self.source.len())
    }

    fn prev_end(&self) -> usize {
        if self.pos == 0 {
            return 0;
        }
        self.tokens
            .get(self.pos - 1)
            .map(|(_, range)| range.end)
            .unwrap_or(self.source.len())
    }
}

/// Tokens that can begin a top-level statement; used as recovery barriers
/// for semicolon-free sources
fn is_statement_start(token: &Token) -> bool {
    matches!(
        token,
        Token::Import
            | Token::Export
            | Token::Function
            | Token::Class
            | Token::Interface
            | Token::Type
            | Token::Const
            | Token::Let
            | Token::Var
    )
}
