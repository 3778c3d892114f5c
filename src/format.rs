//! Output checker and normalizer
//!
//! Generated text is parsed with a restricted Go grammar before it is
//! written: package clause, imports, function declarations, and the `if`,
//! `return` and assignment statements the renderer emits, over the full Go
//! expression syntax. Constraint arguments are pasted into the output
//! verbatim, so a tag such as `min=` or `default=1)` is caught here instead of
//! by the Go compiler.

use crate::error::{ValidgenError, ValidgenResult};
use crate::source::lexer::{tokenize, Token, TokenKind};

/// A syntax error in checked Go source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

type CheckResult<T> = Result<T, SyntaxError>;

/// Shape of a parsed primary expression, as far as composite literals care
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// Identifier, selector or index expression: may name a type
    Name,
    /// Array, slice, map or struct type
    LiteralType,
    Other,
}

struct Checker<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Below zero inside an `if` header, where `T{` opens the block
    expr_lev: i32,
}

impl<'a> Checker<'a> {
    fn new(src: &'a str) -> CheckResult<Self> {
        let tokens = tokenize(src).map_err(|e| SyntaxError {
            line: e.line,
            column: e.column,
            message: e.message,
        })?;
        Ok(Self {
            tokens,
            pos: 0,
            expr_lev: 0,
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

    fn expected(&self, what: &str) -> SyntaxError {
        let tok = self.peek();
        SyntaxError {
            line: tok.line,
            column: tok.column,
            message: format!("expected {}, found {}", what, tok),
        }
    }

    fn eat_op(&mut self, op: &str) -> bool {
        if self.peek().is_op(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_op(&mut self, op: &str) -> CheckResult<()> {
        if self.eat_op(op) {
            Ok(())
        } else {
            Err(self.expected(&format!("'{}'", op)))
        }
    }

    fn expect_ident(&mut self) -> CheckResult<()> {
        if self.peek().kind == TokenKind::Ident {
            self.advance();
            Ok(())
        } else {
            Err(self.expected("identifier"))
        }
    }

    fn expect_semicolon(&mut self) -> CheckResult<()> {
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

    /// Run `f` with composite literals allowed again
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> CheckResult<T>) -> CheckResult<T> {
        let saved = self.expr_lev;
        self.expr_lev = saved.max(0) + 1;
        let result = f(self);
        self.expr_lev = saved;
        result
    }

    fn file(&mut self) -> CheckResult<()> {
        self.skip_semicolons();
        if !self.peek().is_keyword("package") {
            return Err(self.expected("'package'"));
        }
        self.advance();
        self.expect_ident()?;
        self.expect_semicolon()?;

        self.skip_semicolons();
        while self.peek().is_keyword("import") {
            self.advance();
            self.import_decl()?;
            self.expect_semicolon()?;
            self.skip_semicolons();
        }

        loop {
            self.skip_semicolons();
            let tok = self.peek();
            if tok.kind == TokenKind::Eof {
                return Ok(());
            }
            if !tok.is_keyword("func") {
                return Err(self.expected("declaration"));
            }
            self.advance();
            self.func_decl()?;
            self.expect_semicolon()?;
        }
    }

    fn import_decl(&mut self) -> CheckResult<()> {
        if self.eat_op("(") {
            loop {
                self.skip_semicolons();
                if self.eat_op(")") {
                    return Ok(());
                }
                self.import_spec()?;
                self.expect_semicolon()?;
            }
        }
        self.import_spec()
    }

    fn import_spec(&mut self) -> CheckResult<()> {
        let tok = self.peek();
        if tok.kind == TokenKind::Ident || tok.is_op(".") {
            self.advance();
        }
        if self.peek().kind != TokenKind::String {
            return Err(self.expected("import path"));
        }
        self.advance();
        Ok(())
    }

    fn func_decl(&mut self) -> CheckResult<()> {
        if self.peek().is_op("(") {
            self.params()?;
        }
        self.expect_ident()?;
        self.signature()?;
        self.block()
    }

    fn signature(&mut self) -> CheckResult<()> {
        self.params()?;
        if self.peek().is_op("(") {
            self.params()
        } else if starts_type(self.peek()) {
            self.ty()
        } else {
            Ok(())
        }
    }

    fn params(&mut self) -> CheckResult<()> {
        self.expect_op("(")?;
        loop {
            if self.eat_op(")") {
                return Ok(());
            }
            let tok = self.peek();
            if tok.kind == TokenKind::Ident {
                let next = self.peek_nth(1);
                if next.is_op("...") || (!next.is_op(".") && starts_type(next)) {
                    self.advance();
                }
            }
            self.eat_op("...");
            self.ty()?;
            if !self.eat_op(",") {
                return self.expect_op(")");
            }
        }
    }

    fn ty(&mut self) -> CheckResult<()> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Ident => {
                self.advance();
                if self.eat_op(".") {
                    self.expect_ident()?;
                }
                if self.peek().is_op("[") && !self.peek_nth(1).is_op("]") {
                    self.advance();
                    self.nested(|c| {
                        loop {
                            c.ty()?;
                            if !c.eat_op(",") || c.peek().is_op("]") {
                                break;
                            }
                        }
                        c.expect_op("]")
                    })?;
                }
                Ok(())
            }
            TokenKind::Keyword => match tok.text {
                "map" => {
                    self.advance();
                    self.expect_op("[")?;
                    self.ty()?;
                    self.expect_op("]")?;
                    self.ty()
                }
                "chan" => {
                    self.advance();
                    self.eat_op("<-");
                    self.ty()
                }
                "func" => {
                    self.advance();
                    self.signature()
                }
                "struct" | "interface" => {
                    self.advance();
                    self.balanced_braces()
                }
                _ => Err(self.expected("type")),
            },
            TokenKind::Op => match tok.text {
                "*" => {
                    self.advance();
                    self.ty()
                }
                "[" => self.array_or_slice_type(),
                "<-" => {
                    self.advance();
                    if !self.peek().is_keyword("chan") {
                        return Err(self.expected("'chan'"));
                    }
                    self.advance();
                    self.ty()
                }
                "(" => {
                    self.advance();
                    self.ty()?;
                    self.expect_op(")")
                }
                _ => Err(self.expected("type")),
            },
            _ => Err(self.expected("type")),
        }
    }

    fn array_or_slice_type(&mut self) -> CheckResult<()> {
        self.expect_op("[")?;
        if !self.eat_op("]") {
            if !self.eat_op("...") {
                self.nested(|c| c.expr())?;
            }
            self.expect_op("]")?;
        }
        self.ty()
    }

    /// Struct and interface bodies are only checked for balance
    fn balanced_braces(&mut self) -> CheckResult<()> {
        self.expect_op("{")?;
        let mut depth = 1usize;
        while depth > 0 {
            let tok = self.advance();
            match tok.kind {
                TokenKind::Eof => return Err(self.expected("'}'")),
                _ if tok.is_op("{") => depth += 1,
                _ if tok.is_op("}") => depth -= 1,
                _ => {}
            }
        }
        Ok(())
    }

    fn block(&mut self) -> CheckResult<()> {
        self.expect_op("{")?;
        let saved = self.expr_lev;
        self.expr_lev = 0;
        let result = self.statements();
        self.expr_lev = saved;
        result?;
        self.expect_op("}")
    }

    fn statements(&mut self) -> CheckResult<()> {
        loop {
            self.skip_semicolons();
            let tok = self.peek();
            if tok.is_op("}") || tok.kind == TokenKind::Eof {
                return Ok(());
            }
            self.statement()?;
            self.expect_semicolon()?;
        }
    }

    fn statement(&mut self) -> CheckResult<()> {
        let tok = self.peek();
        if tok.is_keyword("if") {
            self.advance();
            return self.if_stmt();
        }
        if tok.is_keyword("return") {
            self.advance();
            let next = self.peek();
            if next.kind == TokenKind::Semicolon || next.is_op("}") {
                return Ok(());
            }
            return self.expr_list();
        }
        if tok.is_op("{") {
            return self.block();
        }
        self.simple_stmt()
    }

    fn if_stmt(&mut self) -> CheckResult<()> {
        let saved = self.expr_lev;
        self.expr_lev = -1;
        let header = self.if_header();
        self.expr_lev = saved;
        header?;

        self.block()?;
        if self.peek().is_keyword("else") {
            self.advance();
            if self.peek().is_keyword("if") {
                self.advance();
                return self.if_stmt();
            }
            return self.block();
        }
        Ok(())
    }

    fn if_header(&mut self) -> CheckResult<()> {
        if self.peek().is_op("{") {
            return Err(self.expected("condition"));
        }
        self.simple_stmt()?;
        if self.peek().kind == TokenKind::Semicolon {
            self.advance();
            self.expr()?;
        }
        Ok(())
    }

    fn simple_stmt(&mut self) -> CheckResult<()> {
        self.expr_list()?;
        let tok = self.peek();
        if tok.kind != TokenKind::Op {
            return Ok(());
        }
        match tok.text {
            "++" | "--" => {
                self.advance();
                Ok(())
            }
            "=" | ":=" | "+=" | "-=" | "*=" | "/=" | "%=" | "&=" | "|=" | "^=" | "<<=" | ">>="
            | "&^=" => {
                self.advance();
                self.expr_list()
            }
            _ => Ok(()),
        }
    }

    fn expr_list(&mut self) -> CheckResult<()> {
        self.expr()?;
        while self.eat_op(",") {
            self.expr()?;
        }
        Ok(())
    }

    fn expr(&mut self) -> CheckResult<()> {
        self.binary_expr(1).map(|_| ())
    }

    fn binary_expr(&mut self, min_prec: u8) -> CheckResult<Shape> {
        let mut shape = self.unary_expr()?;
        loop {
            let tok = self.peek();
            let prec = if tok.kind == TokenKind::Op {
                binary_precedence(tok.text)
            } else {
                0
            };
            if prec == 0 || prec < min_prec {
                return Ok(shape);
            }
            self.advance();
            self.binary_expr(prec + 1)?;
            shape = Shape::Other;
        }
    }

    fn unary_expr(&mut self) -> CheckResult<Shape> {
        let tok = self.peek();
        if tok.kind == TokenKind::Op && matches!(tok.text, "+" | "-" | "!" | "^" | "*" | "&" | "<-") {
            self.advance();
            self.unary_expr()?;
            return Ok(Shape::Other);
        }
        self.primary_expr()
    }

    fn operand(&mut self) -> CheckResult<Shape> {
        let tok = self.peek();
        match tok.kind {
            TokenKind::Int
            | TokenKind::Float
            | TokenKind::Imag
            | TokenKind::Char
            | TokenKind::String => {
                self.advance();
                Ok(Shape::Other)
            }
            TokenKind::Ident => {
                self.advance();
                Ok(Shape::Name)
            }
            TokenKind::Op if tok.text == "(" => {
                self.advance();
                let shape = self.nested(|c| c.binary_expr(1))?;
                self.expect_op(")")?;
                Ok(shape)
            }
            TokenKind::Op if tok.text == "[" => {
                self.array_or_slice_type()?;
                Ok(Shape::LiteralType)
            }
            TokenKind::Keyword => match tok.text {
                "func" => {
                    self.advance();
                    self.signature()?;
                    if self.peek().is_op("{") {
                        self.block()?;
                    }
                    Ok(Shape::Other)
                }
                "map" | "struct" => {
                    self.ty()?;
                    Ok(Shape::LiteralType)
                }
                "chan" | "interface" => {
                    self.ty()?;
                    Ok(Shape::Other)
                }
                _ => Err(self.expected("expression")),
            },
            _ => Err(self.expected("expression")),
        }
    }

    fn primary_expr(&mut self) -> CheckResult<Shape> {
        let mut shape = self.operand()?;
        loop {
            let tok = self.peek();
            if tok.kind != TokenKind::Op {
                return Ok(shape);
            }
            match tok.text {
                "." => {
                    self.advance();
                    if self.peek().kind == TokenKind::Ident {
                        self.advance();
                        shape = Shape::Name;
                    } else if self.eat_op("(") {
                        if self.peek().is_keyword("type") {
                            self.advance();
                        } else {
                            self.nested(|c| c.ty())?;
                        }
                        self.expect_op(")")?;
                        shape = Shape::Other;
                    } else {
                        return Err(self.expected("selector or type assertion"));
                    }
                }
                "[" => {
                    self.advance();
                    self.nested(|c| c.index_or_slice())?;
                    shape = Shape::Name;
                }
                "(" => {
                    self.advance();
                    self.nested(|c| c.call_args())?;
                    shape = Shape::Other;
                }
                "{" => {
                    let allowed = match shape {
                        Shape::LiteralType => true,
                        Shape::Name => self.expr_lev >= 0,
                        Shape::Other => false,
                    };
                    if !allowed {
                        return Ok(shape);
                    }
                    self.literal_value()?;
                    shape = Shape::Other;
                }
                _ => return Ok(shape),
            }
        }
    }

    /// Expression or type, as accepted in call arguments and index lists
    fn expr_or_type(&mut self) -> CheckResult<()> {
        let tok = self.peek();
        let type_only = match tok.kind {
            TokenKind::Keyword => matches!(tok.text, "chan" | "interface"),
            TokenKind::Op => tok.text == "<-" && self.peek_nth(1).is_keyword("chan"),
            _ => false,
        };
        if type_only {
            self.ty()
        } else {
            self.expr()
        }
    }

    fn index_or_slice(&mut self) -> CheckResult<()> {
        if !self.peek().is_op(":") {
            self.expr_or_type()?;
        }
        if self.peek().is_op(":") {
            for _ in 0..2 {
                if !self.eat_op(":") {
                    break;
                }
                let next = self.peek();
                if !next.is_op(":") && !next.is_op("]") {
                    self.expr()?;
                }
            }
        } else {
            while self.eat_op(",") {
                if self.peek().is_op("]") {
                    break;
                }
                self.expr_or_type()?;
            }
        }
        self.expect_op("]")
    }

    fn call_args(&mut self) -> CheckResult<()> {
        loop {
            if self.eat_op(")") {
                return Ok(());
            }
            self.expr_or_type()?;
            self.eat_op("...");
            if !self.eat_op(",") {
                return self.expect_op(")");
            }
        }
    }

    fn literal_value(&mut self) -> CheckResult<()> {
        self.expect_op("{")?;
        self.nested(|c| {
            loop {
                if c.eat_op("}") {
                    return Ok(());
                }
                c.element()?;
                if c.eat_op(":") {
                    c.element()?;
                }
                if !c.eat_op(",") {
                    if c.peek().kind == TokenKind::Semicolon {
                        return Err(c.expected("',' or '}'"));
                    }
                    return c.expect_op("}");
                }
            }
        })
    }

    fn element(&mut self) -> CheckResult<()> {
        if self.peek().is_op("{") {
            self.literal_value()
        } else {
            self.expr()
        }
    }
}

fn binary_precedence(op: &str) -> u8 {
    match op {
        "||" => 1,
        "&&" => 2,
        "==" | "!=" | "<" | "<=" | ">" | ">=" => 3,
        "+" | "-" | "|" | "^" => 4,
        "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" => 5,
        _ => 0,
    }
}

fn starts_type(tok: Token<'_>) -> bool {
    match tok.kind {
        TokenKind::Ident => true,
        TokenKind::Keyword => matches!(tok.text, "map" | "chan" | "func" | "interface" | "struct"),
        TokenKind::Op => matches!(tok.text, "*" | "[" | "<-" | "("),
        _ => false,
    }
}

/// Check that `src` is a well-formed generated Go file
pub fn check(src: &str) -> Result<(), SyntaxError> {
    Checker::new(src)?.file()
}

/// Trim trailing whitespace, collapse blank-line runs, end with one newline
pub fn normalize(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    let mut blank_run = false;
    for line in src.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            if out.is_empty() || blank_run {
                continue;
            }
            blank_run = true;
        } else {
            if blank_run {
                out.push('\n');
            }
            blank_run = false;
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Check generated text and return it normalized.
///
/// Fails with [`ValidgenError::Format`], carrying the unmodified text, when
/// the text does not parse.
pub fn format_source(src: &str) -> ValidgenResult<String> {
    check(src).map_err(|e| ValidgenError::Format {
        line: e.line,
        message: e.message,
        output: src.to_string(),
    })?;
    Ok(normalize(src))
}
