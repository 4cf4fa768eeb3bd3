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

//! Go declaration parser
//!
//! Converts the text of one Go source file into a [`SourceUnit`]: its
//! package clause, imports and top-level type declarations.

#![warn(missing_docs)]

pub mod declarations;
pub mod error;
pub mod lexer;
pub mod span;
pub mod tokenizer;

pub use declarations::DeclParser;
pub use error::{ParseError, ParseResult};
pub use span::{LineIndex, Spanned};
pub use tokenizer::{Token, Tokenizer};

use crate::ast::SourceUnit;

/// Parse one declaration file into a source unit named `name`
pub fn parse_unit(name: &str, source: &str) -> ParseResult<SourceUnit> {
    log::debug!("parsing declaration unit {name} ({} bytes)", source.len());
    DeclParser::new(source)?.parse_source_unit(name)
}
