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

//! Parser error types

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Position, SourceLocation};
use thiserror::Error;

/// Result type for parser operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse error with location information
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Unexpected token
    #[error("unexpected {token} at position {position}")]
    UnexpectedToken {
        /// Description of the token that was found
        token: String,
        /// Byte offset where the token was found
        position: usize,
    },

    /// Expected token
    #[error("expected {expected}, found {found} at position {position}")]
    ExpectedToken {
        /// The expected token description
        expected: String,
        /// Description of the token that was found
        found: String,
        /// Byte offset where the token was expected
        position: usize,
    },

    /// Unexpected end of input
    #[error("unexpected end of input at position {position}, expected {expected}")]
    UnexpectedEndOfInput {
        /// The expected token description
        expected: String,
        /// Byte offset of the end of input
        position: usize,
    },

    /// Unclosed string, rune or comment
    #[error("unclosed {kind} starting at position {position}")]
    UnclosedLiteral {
        /// What was left open
        kind: &'static str,
        /// Byte offset where it started
        position: usize,
    },

    /// Character that cannot start any token
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter {
        /// The character
        ch: char,
        /// Byte offset of the character
        position: usize,
    },
}

impl ParseError {
    /// Byte offset the error points at
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { position, .. }
            | ParseError::ExpectedToken { position, .. }
            | ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::UnclosedLiteral { position, .. }
            | ParseError::InvalidCharacter { position, .. } => *position,
        }
    }

    /// Convert to a diagnostic located in the named source
    pub fn to_diagnostic(&self, unit: &str, source: &str) -> Diagnostic {
        let code = match self {
            ParseError::UnexpectedToken { .. }
            | ParseError::UnexpectedEndOfInput { .. }
            | ParseError::InvalidCharacter { .. } => DiagnosticCode::UnexpectedToken,
            ParseError::ExpectedToken { expected, .. } => {
                DiagnosticCode::ExpectedToken(expected.clone())
            }
            ParseError::UnclosedLiteral { .. } => DiagnosticCode::UnclosedLiteral,
        };
        let position = Position::from_offset(source, self.position());

        DiagnosticBuilder::error(code)
            .with_message(self.to_string())
            .with_source_location(
                SourceLocation::with_file(position, unit).with_source_line(source),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_to_diagnostic() {
        let source = "package a\n\ntype B interface {\n\tRun(f #)\n}\n";
        let error = ParseError::InvalidCharacter {
            ch: '#',
            position: source.find('#').unwrap(),
        };

        let diagnostic = error.to_diagnostic("b.go", source);
        assert!(diagnostic.is_error());
        assert_eq!(diagnostic.code, DiagnosticCode::UnexpectedToken);
        let location = diagnostic.location.unwrap();
        assert_eq!(location.to_string(), "b.go:4:8");
        assert_eq!(location.source_line.as_deref(), Some("\tRun(f #)"));
    }
}
