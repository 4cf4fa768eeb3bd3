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

//! Lexical analysis utilities

use super::error::{ParseError, ParseResult};
use super::span::Spanned;
use super::tokenizer::Token;
use std::mem::discriminant;

/// Check if a character can start an identifier
pub fn is_identifier_start(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_start(c) || c == '_'
}

/// Check if a character can continue an identifier
pub fn is_identifier_continue(c: char) -> bool {
    unicode_xid::UnicodeXID::is_xid_continue(c)
}

/// Token stream with lookahead capability
#[derive(Debug)]
pub struct TokenStream<'input> {
    tokens: Vec<Spanned<Token<'input>>>,
    position: usize,
    /// Byte offset of the end of input
    end: usize,
}

impl<'input> TokenStream<'input> {
    /// Create a new token stream
    pub fn new(tokens: Vec<Spanned<Token<'input>>>, end: usize) -> Self {
        Self {
            tokens,
            position: 0,
            end,
        }
    }

    /// Peek at the current token without consuming
    pub fn peek(&self) -> Option<&Spanned<Token<'input>>> {
        self.tokens.get(self.position)
    }

    /// Peek at the value of a token n positions ahead
    pub fn peek_ahead(&self, n: usize) -> Option<Token<'input>> {
        self.tokens.get(self.position + n).map(|t| t.value)
    }

    /// Consume and return the current token
    pub fn next(&mut self) -> Option<Spanned<Token<'input>>> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Check if we're at the end of the stream
    pub fn is_eof(&self) -> bool {
        self.position >= self.tokens.len()
    }

    /// Byte offset of the current token, or of the end of input
    pub fn offset(&self) -> usize {
        self.peek().map_or(self.end, |t| t.start)
    }

    /// Check whether the current token has the same kind as `expected`
    pub fn check(&self, expected: Token<'_>) -> bool {
        self.peek()
            .is_some_and(|t| discriminant(&t.value) == discriminant(&expected))
    }

    /// Consume a token if it matches the predicate
    pub fn consume_if<F>(&mut self, predicate: F) -> Option<Spanned<Token<'input>>>
    where
        F: FnOnce(&Token<'input>) -> bool,
    {
        match self.peek() {
            Some(token) if predicate(&token.value) => self.next(),
            _ => None,
        }
    }

    /// Consume a token of the same kind as `expected`
    pub fn eat(&mut self, expected: Token<'_>) -> bool {
        let matched = self.check(expected);
        if matched {
            self.position += 1;
        }
        matched
    }

    /// Expect a token of the same kind as `expected`
    pub fn expect(&mut self, expected: Token<'_>) -> ParseResult<Spanned<Token<'input>>> {
        if self.check(expected) {
            if let Some(token) = self.next() {
                return Ok(token);
            }
        }
        Err(self.error_expected(expected.to_string()))
    }

    /// Expect an identifier and return its text with its start offset
    pub fn expect_identifier(&mut self) -> ParseResult<Spanned<&'input str>> {
        match self.peek() {
            Some(Spanned {
                value: Token::Identifier(name),
                start,
                end,
            }) => {
                let spanned = Spanned::new(*name, *start, *end);
                self.position += 1;
                Ok(spanned)
            }
            _ => Err(self.error_expected("identifier")),
        }
    }

    /// Build an error describing what was found instead of `expected`
    pub fn error_expected(&self, expected: impl Into<String>) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::ExpectedToken {
                expected: expected.into(),
                found: token.value.to_string(),
                position: token.start,
            },
            None => ParseError::UnexpectedEndOfInput {
                expected: expected.into(),
                position: self.end,
            },
        }
    }

    /// Skip tokens until the current token is a `;` or closing bracket at
    /// nesting depth zero. The terminator itself is not consumed.
    pub fn skip_balanced(&mut self) -> ParseResult<()> {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            match token.value {
                Token::LeftParen | Token::LeftBracket | Token::LeftBrace => depth += 1,
                Token::RightParen | Token::RightBracket | Token::RightBrace => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                }
                Token::Semicolon if depth == 0 => return Ok(()),
                _ => {}
            }
            self.position += 1;
        }
        if depth > 0 {
            return Err(self.error_expected("closing bracket"));
        }
        Ok(())
    }
}
