// Copyright 2024 OctoFHIR Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tokenizer for Go declaration files
//!
//! Produces zero-copy tokens over the input and performs Go's automatic
//! semicolon insertion: a line break after an identifier, a literal or a
//! closing bracket ends the statement. Everything the declaration parser
//! does not look at (operators inside function bodies, for instance) is
//! still tokenized so that it can be skipped structurally.

use super::error::{ParseError, ParseResult};
use super::lexer::{is_identifier_continue, is_identifier_start};
use super::span::Spanned;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Go token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'input> {
    /// Identifier, including predeclared names and non-declaration keywords
    Identifier(&'input str),
    /// String literal contents without quotes (interpreted or raw)
    String(&'input str),
    /// Rune literal contents without quotes
    Rune(&'input str),
    /// Numeric literal as written
    Number(&'input str),

    // Keywords the declaration grammar cares about
    /// `package`
    Package,
    /// `import`
    Import,
    /// `type`
    Type,
    /// `interface`
    Interface,
    /// `struct`
    Struct,
    /// `func`
    Func,
    /// `var`
    Var,
    /// `const`
    Const,
    /// `map`
    Map,
    /// `chan`
    Chan,

    /// Left parenthesis (
    LeftParen,
    /// Right parenthesis )
    RightParen,
    /// Left square bracket [
    LeftBracket,
    /// Right square bracket ]
    RightBracket,
    /// Left curly brace {
    LeftBrace,
    /// Right curly brace }
    RightBrace,
    /// Selector dot (.)
    Dot,
    /// Variadic marker (...)
    Ellipsis,
    /// Comma (,)
    Comma,
    /// Semicolon, written or inserted at a line break
    Semicolon,
    /// Pointer marker or multiplication (*)
    Star,
    /// Assignment or alias marker (=)
    Assign,
    /// Approximation element in type constraints (~)
    Tilde,
    /// Union element in type constraints (|)
    Pipe,
    /// Any other operator character
    Operator(&'input str),
}

impl Token<'_> {
    /// Check if a line break after this token ends the statement
    fn ends_statement(&self) -> bool {
        matches!(
            self,
            Token::Identifier(_)
                | Token::String(_)
                | Token::Rune(_)
                | Token::Number(_)
                | Token::RightParen
                | Token::RightBracket
                | Token::RightBrace
        )
    }

    /// Check if this token is a keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Package
                | Token::Import
                | Token::Type
                | Token::Interface
                | Token::Struct
                | Token::Func
                | Token::Var
                | Token::Const
                | Token::Map
                | Token::Chan
        )
    }

    /// Get the identifier text if this is an identifier
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Token::Identifier(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Identifier(name) => write!(f, "identifier '{name}'"),
            Token::String(text) => write!(f, "string \"{text}\""),
            Token::Rune(text) => write!(f, "rune '{text}'"),
            Token::Number(text) => write!(f, "number {text}"),
            Token::Package => write!(f, "'package'"),
            Token::Import => write!(f, "'import'"),
            Token::Type => write!(f, "'type'"),
            Token::Interface => write!(f, "'interface'"),
            Token::Struct => write!(f, "'struct'"),
            Token::Func => write!(f, "'func'"),
            Token::Var => write!(f, "'var'"),
            Token::Const => write!(f, "'const'"),
            Token::Map => write!(f, "'map'"),
            Token::Chan => write!(f, "'chan'"),
            Token::LeftParen => write!(f, "'('"),
            Token::RightParen => write!(f, "')'"),
            Token::LeftBracket => write!(f, "'['"),
            Token::RightBracket => write!(f, "']'"),
            Token::LeftBrace => write!(f, "'{{'"),
            Token::RightBrace => write!(f, "'}}'"),
            Token::Dot => write!(f, "'.'"),
            Token::Ellipsis => write!(f, "'...'"),
            Token::Comma => write!(f, "','"),
            Token::Semicolon => write!(f, "';' or newline"),
            Token::Star => write!(f, "'*'"),
            Token::Assign => write!(f, "'='"),
            Token::Tilde => write!(f, "'~'"),
            Token::Pipe => write!(f, "'|'"),
            Token::Operator(op) => write!(f, "'{op}'"),
        }
    }
}

/// Keyword lookup table
static KEYWORD_TABLE: Lazy<FxHashMap<&'static str, Token<'static>>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("package", Token::Package);
    map.insert("import", Token::Import);
    map.insert("type", Token::Type);
    map.insert("interface", Token::Interface);
    map.insert("struct", Token::Struct);
    map.insert("func", Token::Func);
    map.insert("var", Token::Var);
    map.insert("const", Token::Const);
    map.insert("map", Token::Map);
    map.insert("chan", Token::Chan);
    map
});

/// Tokenizer over a single source text
pub struct Tokenizer<'input> {
    input: &'input str,
    bytes: &'input [u8],
    pos: usize,
    end: usize,
    /// Whether a line break at the current position ends a statement
    insert_semicolon: bool,
}

impl<'input> Tokenizer<'input> {
    /// Create a new tokenizer
    pub fn new(input: &'input str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            end: input.len(),
            insert_semicolon: false,
        }
    }

    /// Current byte offset
    pub fn position(&self) -> usize {
        self.pos
    }

    fn keyword_lookup(ident: &str) -> Option<Token<'input>> {
        KEYWORD_TABLE.get(ident).copied()
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    /// Skip whitespace and comments.
    ///
    /// Returns the offset of the first line break crossed, if any.
    fn skip_trivia(&mut self) -> ParseResult<Option<usize>> {
        let mut newline = None;
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'\n' => {
                    newline.get_or_insert(self.pos);
                    self.pos += 1;
                }
                b' ' | b'\t' | b'\r' => self.pos += 1,
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'/') => {
                    while self.pos < self.end && self.bytes[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                b'/' if self.bytes.get(self.pos + 1) == Some(&b'*') => {
                    let start = self.pos;
                    let close = self.input[start + 2..].find("*/").ok_or(
                        ParseError::UnclosedLiteral {
                            kind: "comment",
                            position: start,
                        },
                    )?;
                    let body_end = start + 2 + close;
                    if let Some(offset) = self.input[start..body_end].find('\n') {
                        newline.get_or_insert(start + offset);
                    }
                    self.pos = body_end + 2;
                }
                _ => break,
            }
        }
        Ok(newline)
    }

    fn parse_identifier(&mut self) -> &'input str {
        let start = self.pos;
        while let Some(ch) = self.current_char() {
            if !is_identifier_continue(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn parse_number(&mut self) -> &'input str {
        let start = self.pos;
        while self.pos < self.end {
            let byte = self.bytes[self.pos];
            let exponent_sign = matches!(byte, b'+' | b'-')
                && matches!(self.bytes[self.pos - 1], b'e' | b'E' | b'p' | b'P');
            if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.') || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        &self.input[start..self.pos]
    }

    /// Parse a quoted literal with backslash escapes, stopping at `quote`
    fn parse_quoted(&mut self, quote: u8, kind: &'static str) -> ParseResult<&'input str> {
        let start = self.pos;
        self.pos += 1;
        while self.pos < self.end {
            match self.bytes[self.pos] {
                b'\\' => self.pos += 2,
                b'\n' => break,
                byte if byte == quote => {
                    let content = &self.input[start + 1..self.pos];
                    self.pos += 1;
                    return Ok(content);
                }
                _ => self.pos += 1,
            }
        }
        Err(ParseError::UnclosedLiteral {
            kind,
            position: start,
        })
    }

    fn parse_raw_string(&mut self) -> ParseResult<&'input str> {
        let start = self.pos;
        let close = self.input[start + 1..]
            .find('`')
            .ok_or(ParseError::UnclosedLiteral {
                kind: "raw string",
                position: start,
            })?;
        self.pos = start + 1 + close + 1;
        Ok(&self.input[start + 1..start + 1 + close])
    }

    fn single(&mut self, token: Token<'input>) -> Token<'input> {
        self.pos += 1;
        token
    }

    /// Produce the next token, or `None` at the end of input
    pub fn next_token(&mut self) -> ParseResult<Option<Spanned<Token<'input>>>> {
        let newline = self.skip_trivia()?;

        if self.insert_semicolon && (newline.is_some() || self.pos >= self.end) {
            self.insert_semicolon = false;
            let at = newline.unwrap_or(self.pos);
            return Ok(Some(Spanned::new(Token::Semicolon, at, at)));
        }

        if self.pos >= self.end {
            return Ok(None);
        }

        let start = self.pos;
        let token = match self.bytes[self.pos] {
            b'(' => self.single(Token::LeftParen),
            b')' => self.single(Token::RightParen),
            b'[' => self.single(Token::LeftBracket),
            b']' => self.single(Token::RightBracket),
            b'{' => self.single(Token::LeftBrace),
            b'}' => self.single(Token::RightBrace),
            b',' => self.single(Token::Comma),
            b';' => self.single(Token::Semicolon),
            b'*' => self.single(Token::Star),
            b'~' => self.single(Token::Tilde),
            b'.' if self.input[start..].starts_with("...") => {
                self.pos += 3;
                Token::Ellipsis
            }
            b'.' if self.bytes.get(start + 1).is_some_and(u8::is_ascii_digit) => {
                Token::Number(self.parse_number())
            }
            b'.' => self.single(Token::Dot),
            b'"' => Token::String(self.parse_quoted(b'"', "string")?),
            b'\'' => Token::Rune(self.parse_quoted(b'\'', "rune")?),
            b'`' => Token::String(self.parse_raw_string()?),
            b'0'..=b'9' => Token::Number(self.parse_number()),
            b'=' if self.bytes.get(start + 1) != Some(&b'=') => self.single(Token::Assign),
            b'|' if self.bytes.get(start + 1) != Some(&b'|') => self.single(Token::Pipe),
            byte if byte.is_ascii_punctuation() => {
                self.pos += 1;
                // Keep two-character operators together so `++`/`--` can end statements
                if matches!(
                    (byte, self.bytes.get(self.pos)),
                    (b'+', Some(b'+')) | (b'-', Some(b'-')) | (b'=', Some(b'=')) | (b'|', Some(b'|'))
                ) {
                    self.pos += 1;
                }
                Token::Operator(&self.input[start..self.pos])
            }
            _ => match self.current_char() {
                Some(ch) if is_identifier_start(ch) => {
                    let ident = self.parse_identifier();
                    Self::keyword_lookup(ident).unwrap_or(Token::Identifier(ident))
                }
                Some(ch) => {
                    return Err(ParseError::InvalidCharacter {
                        ch,
                        position: start,
                    });
                }
                None => return Ok(None),
            },
        };

        self.insert_semicolon =
            token.ends_statement() || matches!(token, Token::Operator("++" | "--"));
        Ok(Some(Spanned::new(token, start, self.pos)))
    }

    /// Tokenize the whole input
    pub fn tokenize_all(&mut self) -> ParseResult<Vec<Spanned<Token<'input>>>> {
        let mut tokens = Vec::with_capacity(self.end / 4);
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

/// Tokenize a source text
pub fn tokenize(input: &str) -> ParseResult<Vec<Spanned<Token<'_>>>> {
    Tokenizer::new(input).tokenize_all()
}
