//! Go declaration parser
//!
//! Reads the package clause and every top-level type declaration. Other
//! declarations (imports, constants, variables, functions) are skipped by
//! bracket-balanced scanning; their bodies are never interpreted.

use std::path::Path;

use crate::error::{ValidgenError, ValidgenResult};
use crate::models::{EntityDecl, FieldDecl};
use crate::types::{ChanDir, GoType, Param, StructField};

use super::lexer::{tokenize, unquote, Token, TokenKind};
use super::struct_tag;

/// A parameter entry before named/unnamed resolution
enum ParamEntry {
    /// Lone identifier: a parameter name or a type name
    Ambiguous(String),
    Typed {
        name: Option<String>,
        ty: GoType,
        variadic: bool,
    },
}

pub(crate) struct Parser<'a> {
    src: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    file: &'a Path,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(src: &'a str, file: &'a Path) -> ValidgenResult<Self> {
        let tokens = tokenize(src).map_err(|e| ValidgenError::Source {
            file: file.to_path_buf(),
            line: e.line,
            column: e.column,
            message: e.message,
        })?;
        Ok(Self {
            src,
            tokens,
            pos: 0,
            file,
        })
    }

    fn peek(&self) -> Token<'a> {
        self.tokens[self.pos]
    }

    fn peek_nth(&self, n: usize) -> Token<'a> {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + n).min(last)]
    }

    fn advance(&mut self) -> Token<'a> {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    fn error_at(&self, tok: Token<'_>, message: impl Into<String>) -> ValidgenError {
        ValidgenError::Source {
            file: self.file.to_path_buf(),
            line: tok.line,
            column: tok.column,
            message: message.into(),
        }
    }

    fn expected(&self, what: &str) -> ValidgenError {
        let tok = self.peek();
        self.error_at(tok, format!("expected {}, found {}", what, tok))
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.peek().is_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_op(&mut self, op: &str) -> ValidgenResult<()> {
        if self.eat_op(op) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", op)))
        }
    }

    fn expect_ident(&mut self) -> ValidgenResult<&'a str> {
        let tok = self.peek();
        if tok.kind == TokenKind::Ident {
            self.advance();
            Ok(tok.text)
        } else {
            Err(self.expected("identifier"))
        }
    }

    /// `;` may be omitted before a closing `)` or `}`
    fn expect_semicolon(&mut self) -> ValidgenResult<()> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Semicolon => {
                self.advance();
                Ok(())
            }
            TokenKind::Eof => Ok(()),
            _ if tok.is_op(")") || tok.is_op("}") => Ok(()),
            _ => Err(self.expected("';'")),
        }
    }

    fn skip_semicolons(&mut self) {
        while self.peek().kind == TokenKind::Semicolon {
            self.advance();
        }
    }

    /// Parse the whole file into its package name and struct declarations
    pub(crate) fn parse_file(&mut self, tag_key: &str) -> ValidgenResult<(String, Vec<EntityDecl>)> {
        self.skip_semicolons();
        if !self.peek().is_keyword("package") {
            return Err(self.expected("'package'"));
        }
        self.advance();
        let package = self.expect_ident()?.to_string();
        self.expect_semicolon()?;

        let mut entities = Vec::new();
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => break,
                TokenKind::Semicolon => {
                    self.advance();
                }
                TokenKind::Keyword if tok.text == "type" => {
                    self.advance();
                    self.type_decl(&mut entities, tag_key)?;
                }
                TokenKind::Keyword if matches!(tok.text, "import" | "const" | "var" | "func") => {
                    self.skip_decl()?;
                }
                _ => return Err(self.expected("declaration")),
            }
        }
        Ok((package, entities))
    }

    fn skip_decl(&mut self) -> ValidgenResult<()> {
        let mut depth = 0usize;
        loop {
            let tok = self.advance();
            match tok.kind {
                TokenKind::Eof if depth == 0 => return Ok(()),
                TokenKind::Eof => return Err(self.error_at(tok, "unexpected EOF")),
                TokenKind::Semicolon if depth == 0 => return Ok(()),
                TokenKind::Op if matches!(tok.text, "(" | "[" | "{") => depth += 1,
                TokenKind::Op if matches!(tok.text, ")" | "]" | "}") => {
                    if depth == 0 {
                        return Err(self.error_at(tok, format!("unexpected {}", tok)));
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
    }

    fn type_decl(&mut self, entities: &mut Vec<EntityDecl>, tag_key: &str) -> ValidgenResult<()> {
        if self.eat_op("(") {
            loop {
                self.skip_semicolons();
                if self.eat_op(")") {
                    break;
                }
                self.type_spec(entities, tag_key)?;
                self.expect_semicolon()?;
            }
        } else {
            self.type_spec(entities, tag_key)?;
        }
        self.expect_semicolon()
    }

    fn type_spec(&mut self, entities: &mut Vec<EntityDecl>, tag_key: &str) -> ValidgenResult<()> {
        let name = self.expect_ident()?.to_string();
        let type_params = if self.looks_like_type_params() {
            self.type_params()?
        } else {
            Vec::new()
        };
        // Aliases (`type A = B`) declare the same shape as a definition
        self.eat_op("=");

        if let GoType::Struct { fields } = self.parse_type()? {
            let fields = fields
                .into_iter()
                .map(|field| field_decl(field, tag_key))
                .collect();
            entities.push(EntityDecl {
                name,
                type_params,
                fields,
            });
        }
        Ok(())
    }

    /// `type T[P any]` versus the array type in `type T [N]int`
    fn looks_like_type_params(&self) -> bool {
        if !self.peek().is_op("[") || self.peek_nth(1).kind != TokenKind::Ident {
            return false;
        }
        let after = self.peek_nth(2);
        match after.kind {
            TokenKind::Ident => true,
            TokenKind::Keyword => matches!(after.text, "interface" | "func" | "map" | "chan" | "struct"),
            TokenKind::Op => matches!(after.text, "~" | "[" | "," | "("),
            _ => false,
        }
    }

    fn type_params(&mut self) -> ValidgenResult<Vec<String>> {
        self.expect_op("[")?;
        let mut names = Vec::new();
        loop {
            names.push(self.expect_ident()?.to_string());
            if self.eat_op(",") {
                continue;
            }
            self.skip_constraint()?;
            if self.eat_op(",") {
                if self.eat_op("]") {
                    break;
                }
                continue;
            }
            self.expect_op("]")?;
            break;
        }
        Ok(names)
    }

    /// Skip a type constraint up to the `,` or `]` that ends it
    fn skip_constraint(&mut self) -> ValidgenResult<()> {
        let mut depth = 0usize;
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof => return Err(self.expected("']'")),
                TokenKind::Op if depth == 0 && matches!(tok.text, "," | "]") => return Ok(()),
                TokenKind::Op if matches!(tok.text, "(" | "[" | "{") => depth += 1,
                TokenKind::Op if matches!(tok.text, ")" | "]" | "}") => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.advance();
        }
    }

    pub(crate) fn parse_type(&mut self) -> ValidgenResult<GoType> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Ident => self.named_type(),
            TokenKind::Keyword => match tok.text {
                "map" => {
                    self.advance();
                    self.expect_op("[")?;
                    let key = self.parse_type()?;
                    self.expect_op("]")?;
                    let value = self.parse_type()?;
                    Ok(GoType::map(key, value))
                }
                "chan" => {
                    self.advance();
                    let dir = if self.eat_op("<-") {
                        ChanDir::Send
                    } else {
                        ChanDir::Both
                    };
                    Ok(GoType::chan(dir, self.parse_type()?))
                }
                "func" => {
                    self.advance();
                    self.signature()
                }
                "interface" => {
                    self.advance();
                    self.interface_body()
                }
                "struct" => {
                    self.advance();
                    self.struct_body()
                }
                _ => Err(self.expected("type")),
            },
            TokenKind::Op => match tok.text {
                "*" => {
                    self.advance();
                    Ok(GoType::pointer(self.parse_type()?))
                }
                "[" => self.sequence_type(),
                "<-" => {
                    self.advance();
                    if !self.peek().is_keyword("chan") {
                        return Err(self.expected("'chan'"));
                    }
                    self.advance();
                    Ok(GoType::chan(ChanDir::Recv, self.parse_type()?))
                }
                "(" => {
                    self.advance();
                    let ty = self.parse_type()?;
                    self.expect_op(")")?;
                    Ok(ty)
                }
                _ => Err(self.expected("type")),
            },
            _ => Err(self.expected("type")),
        }
    }

    fn named_type(&mut self) -> ValidgenResult<GoType> {
        let first = self.expect_ident()?.to_string();
        let (package, name) = if self.eat_op(".") {
            (Some(first), self.expect_ident()?.to_string())
        } else {
            (None, first)
        };

        let mut args = Vec::new();
        if self.peek().is_op("[") && !self.peek_nth(1).is_op("]") {
            self.advance();
            loop {
                args.push(self.parse_type()?);
                if !self.eat_op(",") {
                    break;
                }
                if self.peek().is_op("]") {
                    break;
                }
            }
            self.expect_op("]")?;
        }
        Ok(GoType::Named {
            package,
            name,
            args,
        })
    }

    fn sequence_type(&mut self) -> ValidgenResult<GoType> {
        self.expect_op("[")?;
        if self.eat_op("]") {
            return Ok(GoType::slice(self.parse_type()?));
        }

        let first = self.peek();
        let mut last = first;
        let mut depth = 0usize;
        loop {
            let tok = self.peek();
            match tok.kind {
                TokenKind::Eof | TokenKind::Semicolon => return Err(self.expected("']'")),
                TokenKind::Op if tok.text == "]" && depth == 0 => break,
                TokenKind::Op if matches!(tok.text, "(" | "[" | "{") => depth += 1,
                TokenKind::Op if matches!(tok.text, ")" | "]" | "}") => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            last = self.advance();
        }
        self.expect_op("]")?;
        let len = self.src[first.start..last.end].to_string();
        Ok(GoType::array(len, self.parse_type()?))
    }

    fn signature(&mut self) -> ValidgenResult<GoType> {
        let params = self.param_list()?;
        let results = if self.peek().is_op("(") {
            self.param_list()?
        } else if starts_type(self.peek()) {
            vec![Param {
                name: None,
                ty: self.parse_type()?,
                variadic: false,
            }]
        } else {
            Vec::new()
        };
        Ok(GoType::Func { params, results })
    }

    fn param_list(&mut self) -> ValidgenResult<Vec<Param>> {
        let open = self.peek();
        self.expect_op("(")?;
        let mut entries = Vec::new();
        loop {
            if self.eat_op(")") {
                break;
            }
            entries.push(self.param_entry()?);
            if !self.eat_op(",") {
                self.expect_op(")")?;
                break;
            }
        }
        self.resolve_params(entries, open)
    }

    fn param_entry(&mut self) -> ValidgenResult<ParamEntry> {
        let tok = self.peek();
        if tok.is_op("...") {
            self.advance();
            return Ok(ParamEntry::Typed {
                name: None,
                ty: self.parse_type()?,
                variadic: true,
            });
        }
        if tok.kind == TokenKind::Ident {
            let next = self.peek_nth(1);
            if next.is_op(",") || next.is_op(")") {
                self.advance();
                return Ok(ParamEntry::Ambiguous(tok.text.to_string()));
            }
            if next.is_op("...") {
                self.advance();
                self.advance();
                return Ok(ParamEntry::Typed {
                    name: Some(tok.text.to_string()),
                    ty: self.parse_type()?,
                    variadic: true,
                });
            }
            if !next.is_op(".") && starts_type(next) {
                self.advance();
                return Ok(ParamEntry::Typed {
                    name: Some(tok.text.to_string()),
                    ty: self.parse_type()?,
                    variadic: false,
                });
            }
        }
        Ok(ParamEntry::Typed {
            name: None,
            ty: self.parse_type()?,
            variadic: false,
        })
    }

    /// Group `a, b int` style names with the type that follows them
    fn resolve_params(&self, entries: Vec<ParamEntry>, open: Token<'_>) -> ValidgenResult<Vec<Param>> {
        let named = entries
            .iter()
            .any(|e| matches!(e, ParamEntry::Typed { name: Some(_), .. }));

        if !named {
            return Ok(entries
                .into_iter()
                .map(|entry| match entry {
                    ParamEntry::Ambiguous(name) => Param {
                        name: None,
                        ty: GoType::named(name),
                        variadic: false,
                    },
                    ParamEntry::Typed { ty, variadic, .. } => Param {
                        name: None,
                        ty,
                        variadic,
                    },
                })
                .collect());
        }

        let mixed = || self.error_at(open, "mixed named and unnamed parameters");
        let mut params = Vec::new();
        let mut pending = Vec::new();
        for entry in entries {
            match entry {
                ParamEntry::Ambiguous(name) => pending.push(name),
                ParamEntry::Typed {
                    name: Some(name),
                    ty,
                    variadic,
                } => {
                    for pending_name in pending.drain(..) {
                        params.push(Param {
                            name: Some(pending_name),
                            ty: ty.clone(),
                            variadic: false,
                        });
                    }
                    params.push(Param {
                        name: Some(name),
                        ty,
                        variadic,
                    });
                }
                ParamEntry::Typed { name: None, .. } => return Err(mixed()),
            }
        }
        if !pending.is_empty() {
            return Err(mixed());
        }
        Ok(params)
    }

    fn interface_body(&mut self) -> ValidgenResult<GoType> {
        self.expect_op("{")?;
        let mut methods = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat_op("}") {
                break;
            }
            let first = self.peek();
            let mut last = first;
            let mut depth = 0usize;
            loop {
                let tok = self.peek();
                match tok.kind {
                    TokenKind::Eof => return Err(self.expected("'}'")),
                    TokenKind::Semicolon if depth == 0 => break,
                    TokenKind::Op if tok.text == "}" && depth == 0 => break,
                    TokenKind::Op if matches!(tok.text, "(" | "[" | "{") => depth += 1,
                    TokenKind::Op if matches!(tok.text, ")" | "]" | "}") => {
                        depth = depth.saturating_sub(1);
                    }
                    _ => {}
                }
                last = self.advance();
            }
            let text = &self.src[first.start..last.end];
            methods.push(text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        Ok(GoType::Interface { methods })
    }

    fn struct_body(&mut self) -> ValidgenResult<GoType> {
        self.expect_op("{")?;
        let mut fields = Vec::new();
        loop {
            self.skip_semicolons();
            if self.eat_op("}") {
                break;
            }
            fields.extend(self.field_group()?);
            self.expect_semicolon()?;
        }
        Ok(GoType::Struct { fields })
    }

    /// One field declaration line: `A, B int "tag"` or an embedded field
    fn field_group(&mut self) -> ValidgenResult<Vec<StructField>> {
        let tok = self.peek();
        let embedded = tok.is_op("*")
            || (tok.kind == TokenKind::Ident && {
                let next = self.peek_nth(1);
                next.is_op(".")
                    || next.is_op("}")
                    || next.kind == TokenKind::String
                    || next.kind == TokenKind::Semicolon
            });

        if embedded {
            let ty = self.parse_type()?;
            if ty.embedded_name().is_none() {
                return Err(self.error_at(tok, "expected embedded type name"));
            }
            let tag = self.field_tag()?;
            return Ok(vec![StructField {
                name: None,
                ty,
                tag,
            }]);
        }

        let mut names = vec![self.expect_ident()?.to_string()];
        while self.eat_op(",") {
            names.push(self.expect_ident()?.to_string());
        }
        let ty = self.parse_type()?;
        let tag = self.field_tag()?;
        Ok(names
            .into_iter()
            .map(|name| StructField {
                name: Some(name),
                ty: ty.clone(),
                tag: tag.clone(),
            })
            .collect())
    }

    fn field_tag(&mut self) -> ValidgenResult<Option<String>> {
        let tok = self.peek();
        if tok.kind != TokenKind::String {
            return Ok(None);
        }
        self.advance();
        if unquote(tok.text).is_none() {
            return Err(self.error_at(tok, format!("invalid struct tag {}", tok.text)));
        }
        Ok(Some(tok.text.to_string()))
    }
}

/// Whether a token can begin a type expression
fn starts_type(tok: Token<'_>) -> bool {
    match tok.kind {
        TokenKind::Ident => true,
        TokenKind::Keyword => matches!(tok.text, "map" | "chan" | "func" | "interface" | "struct"),
        TokenKind::Op => matches!(tok.text, "*" | "[" | "<-" | "("),
        _ => false,
    }
}

fn field_decl(field: StructField, tag_key: &str) -> FieldDecl {
    let name = field
        .name
        .clone()
        .or_else(|| field.ty.embedded_name().map(str::to_string))
        .unwrap_or_default();
    let tag = field
        .tag
        .as_deref()
        .and_then(unquote)
        .and_then(|tag| struct_tag::lookup(&tag, tag_key))
        .unwrap_or_default();
    FieldDecl::new(name, field.ty, tag)
}
