//! Go lexer
//!
//! Produces the Go token stream, including the semicolons the language
//! inserts automatically at line ends. Comments are dropped; a general comment
//! that spans lines counts as a newline.

use std::fmt;

/// Category of a lexed token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Keyword,
    Int,
    Float,
    Imag,
    Char,
    String,
    /// Operator or delimiter other than `;`
    Op,
    /// Explicit `;` or one inserted at a line end (text `"\n"`)
    Semicolon,
    Eof,
}

/// A token borrowed from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    /// 1-based line
    pub line: usize,
    /// 1-based byte column
    pub column: usize,
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl Token<'_> {
    pub fn is_op(&self, op: &str) -> bool {
        self.kind == TokenKind::Op && self.text == op
    }

    pub fn is_keyword(&self, keyword: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == keyword
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Int | TokenKind::Float | TokenKind::Imag | TokenKind::Char | TokenKind::String
        )
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::Semicolon if self.text == "\n" => f.write_str("newline"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Lexing failure with its position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Operators ordered so that longer spellings match first
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^", "+", "-", "*", "/", "%", "&", "|",
    "^", "<", ">", "=", "!", "(", ")", "[", "]", "{", "}", ",", ".", ":", "~",
];

pub fn is_keyword(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
    tokens: Vec<Token<'a>>,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            line_start: 0,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn error(&self, line: usize, column: usize, message: impl Into<String>) -> LexError {
        LexError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Whether a newline after the last token ends the statement
    fn needs_semicolon(&self) -> bool {
        match self.tokens.last() {
            None => false,
            Some(tok) => match tok.kind {
                TokenKind::Ident
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Imag
                | TokenKind::Char
                | TokenKind::String => true,
                TokenKind::Keyword => {
                    matches!(tok.text, "break" | "continue" | "fallthrough" | "return")
                }
                TokenKind::Op => matches!(tok.text, "++" | "--" | ")" | "]" | "}"),
                TokenKind::Semicolon | TokenKind::Eof => false,
            },
        }
    }

    fn insert_semicolon(&mut self, line: usize, column: usize) {
        if self.needs_semicolon() {
            self.tokens.push(Token {
                kind: TokenKind::Semicolon,
                text: "\n",
                line,
                column,
                start: self.pos,
                end: self.pos,
            });
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, line: usize, column: usize) {
        self.tokens.push(Token {
            kind,
            text: &self.src[start..self.pos],
            line,
            column,
            start,
            end: self.pos,
        });
    }

    fn run(mut self) -> Result<Vec<Token<'a>>, LexError> {
        while let Some(c) = self.peek() {
            let start = self.pos;
            let line = self.line;
            let column = self.pos - self.line_start + 1;

            match c {
                '\n' => {
                    self.insert_semicolon(line, column);
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek_second() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.bump();
                    }
                }
                '/' if self.peek_second() == Some('*') => {
                    self.bump();
                    self.bump();
                    let mut spans_lines = false;
                    loop {
                        match self.bump() {
                            None => return Err(self.error(line, column, "comment not terminated")),
                            Some('*') if self.peek() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some('\n') => spans_lines = true,
                            Some(_) => {}
                        }
                    }
                    if spans_lines {
                        self.insert_semicolon(line, column);
                    }
                }
                c if c.is_alphabetic() || c == '_' => {
                    while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
                        self.bump();
                    }
                    let kind = if is_keyword(&self.src[start..self.pos]) {
                        TokenKind::Keyword
                    } else {
                        TokenKind::Ident
                    };
                    self.push(kind, start, line, column);
                }
                c if c.is_ascii_digit()
                    || (c == '.' && matches!(self.peek_second(), Some(d) if d.is_ascii_digit())) =>
                {
                    let kind = self.number();
                    self.push(kind, start, line, column);
                }
                '"' => {
                    self.bump();
                    self.quoted('"', line, column, "string literal not terminated")?;
                    self.push(TokenKind::String, start, line, column);
                }
                '\'' => {
                    self.bump();
                    self.quoted('\'', line, column, "rune literal not terminated")?;
                    self.push(TokenKind::Char, start, line, column);
                }
                '`' => {
                    self.bump();
                    loop {
                        match self.bump() {
                            None => {
                                return Err(self.error(
                                    line,
                                    column,
                                    "raw string literal not terminated",
                                ))
                            }
                            Some('`') => break,
                            Some(_) => {}
                        }
                    }
                    self.push(TokenKind::String, start, line, column);
                }
                ';' => {
                    self.bump();
                    self.push(TokenKind::Semicolon, start, line, column);
                }
                _ => {
                    let rest = &self.src[self.pos..];
                    let op = OPERATORS
                        .iter()
                        .find(|op| rest.starts_with(**op))
                        .ok_or_else(|| {
                            self.error(line, column, format!("invalid character {:?}", c))
                        })?;
                    self.pos += op.len();
                    self.push(TokenKind::Op, start, line, column);
                }
            }
        }

        let column = self.pos - self.line_start + 1;
        self.insert_semicolon(self.line, column);
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            text: "",
            line: self.line,
            column,
            start: self.pos,
            end: self.pos,
        });
        Ok(self.tokens)
    }

    fn quoted(
        &mut self,
        quote: char,
        line: usize,
        column: usize,
        unterminated: &str,
    ) -> Result<(), LexError> {
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error(line, column, unterminated)),
                Some('\\') => {
                    self.bump();
                    if matches!(self.peek(), None | Some('\n')) {
                        return Err(self.error(line, column, unterminated));
                    }
                    self.bump();
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    fn number(&mut self) -> TokenKind {
        let mut kind = TokenKind::Int;
        let hex = self.peek() == Some('0') && matches!(self.peek_second(), Some('x' | 'X'));
        if hex {
            self.bump();
            self.bump();
        }
        let exponent = |c: char| if hex { matches!(c, 'p' | 'P') } else { matches!(c, 'e' | 'E') };

        while let Some(c) = self.peek() {
            if c == '.' {
                kind = TokenKind::Float;
                self.bump();
            } else if exponent(c) {
                kind = TokenKind::Float;
                self.bump();
                if matches!(self.peek(), Some('+' | '-')) {
                    self.bump();
                }
            } else if c.is_ascii_alphanumeric() || c == '_' {
                if c == 'i' {
                    self.bump();
                    return TokenKind::Imag;
                }
                self.bump();
            } else {
                break;
            }
        }
        kind
    }
}

/// Tokenize Go source, ending with a `TokenKind::Eof` token
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(src).run()
}

/// Decode a Go string literal token (interpreted or raw) to its value
pub fn unquote(literal: &str) -> Option<String> {
    if let Some(raw) = literal
        .strip_prefix('`')
        .and_then(|rest| rest.strip_suffix('`'))
    {
        return Some(raw.replace('\r', ""));
    }

    let body = literal.strip_prefix('"')?.strip_suffix('"')?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = match chars.next()? {
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\u{b}',
            '\\' => '\\',
            '"' => '"',
            'x' => hex_escape(&mut chars, 2)?,
            'u' => hex_escape(&mut chars, 4)?,
            'U' => hex_escape(&mut chars, 8)?,
            d @ '0'..='7' => {
                let mut value = d.to_digit(8)?;
                for _ in 0..2 {
                    value = value * 8 + chars.next()?.to_digit(8)?;
                }
                char::from_u32(value)?
            }
            _ => return None,
        };
        out.push(escaped);
    }
    Some(out)
}

fn hex_escape(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let mut value = 0u32;
    for _ in 0..digits {
        value = value * 16 + chars.next()?.to_digit(16)?;
    }
    char::from_u32(value)
}
