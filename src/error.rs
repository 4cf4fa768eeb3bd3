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

//! Error types for fake generation

use crate::diagnostics::{Diagnostic, DiagnosticBuilder, DiagnosticCode};
use crate::model::Role;
use crate::parser::ParseError;
use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, FakegenError>;

/// Errors raised while extracting, resolving or synthesizing contracts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FakegenError {
    /// A declaration unit could not be parsed
    #[error("failed to parse {unit}: {source}")]
    Parse {
        /// Unit name
        unit: String,
        /// Underlying parse error
        #[source]
        source: ParseError,
    },

    /// The units declare more than one package
    #[error("declaration units belong to more than one package: {}", packages.join(", "))]
    AmbiguousPackage {
        /// Package names in first-seen order
        packages: Vec<String>,
    },

    /// Nothing was given to extract from
    #[error("no declaration units to extract contracts from")]
    NoDeclarations,

    /// A contract embeds itself
    #[error("{} embeds itself through {}", chain.first().map_or("", String::as_str), chain.join(" -> "))]
    CyclicEmbedding {
        /// Contracts along the cycle, first and last equal
        chain: Vec<String>,
    },

    /// A method signature uses a type that cannot be faked
    #[error("method {method} uses an unsupported {construct}: {text}")]
    UnsupportedType {
        /// Method whose signature holds the type
        method: String,
        /// Description of the construct
        construct: String,
        /// Source text of the type
        text: String,
    },

    /// A value has no name and none can be derived from its type
    #[error("{role} {position} of method {method} has no name and no name can be derived from its type")]
    UnnamedValue {
        /// Method the value belongs to
        method: String,
        /// Argument or result
        role: Role,
        /// 1-based position in its list
        position: usize,
    },

    /// Two values of one list would share a name
    #[error("{role} name {name} is declared twice in method {method}")]
    DuplicateValue {
        /// Method the values belong to
        method: String,
        /// Argument or result
        role: Role,
        /// Shared name
        name: String,
    },

    /// Two synthesized identifiers collide
    #[error("generated identifier {name} is produced twice for contract {contract}")]
    NameCollision {
        /// Contract being synthesized
        contract: String,
        /// Colliding identifier
        name: String,
    },

    /// Two contracts of one run generate the same package-level name
    #[error("generated identifier {name} of contract {contract} is already generated for contract {owner}")]
    SharedName {
        /// Contract whose fake was dropped
        contract: String,
        /// Colliding identifier or file name
        name: String,
        /// Contract that generated the name first
        owner: String,
    },

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FakegenError {
    /// Diagnostic code for this error
    pub fn code(&self) -> DiagnosticCode {
        match self {
            FakegenError::Parse { source, .. } => match source {
                ParseError::UnclosedLiteral { .. } => DiagnosticCode::UnclosedLiteral,
                ParseError::ExpectedToken { expected, .. } => {
                    DiagnosticCode::ExpectedToken(expected.clone())
                }
                _ => DiagnosticCode::UnexpectedToken,
            },
            FakegenError::AmbiguousPackage { .. } => DiagnosticCode::AmbiguousPackage,
            FakegenError::NoDeclarations => DiagnosticCode::NoDeclarations,
            FakegenError::CyclicEmbedding { .. } => DiagnosticCode::CyclicEmbedding,
            FakegenError::UnsupportedType { .. } => DiagnosticCode::UnsupportedSyntax,
            FakegenError::UnnamedValue { .. } => DiagnosticCode::UnnamedValue,
            FakegenError::DuplicateValue { .. } => DiagnosticCode::DuplicateValue,
            FakegenError::NameCollision { .. } | FakegenError::SharedName { .. } => {
                DiagnosticCode::NameCollision
            }
            FakegenError::Config(_) => DiagnosticCode::InvalidConfig,
        }
    }

    /// Convert to an error diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let message = match self {
            FakegenError::Config(reason) => reason.clone(),
            other => other.to_string(),
        };
        let builder = DiagnosticBuilder::error(self.code()).with_message(message);
        let builder = match self {
            FakegenError::Parse { unit, .. } => builder.with_file_path(unit.as_str()),
            FakegenError::CyclicEmbedding { chain } => match chain.first() {
                Some(head) => builder.with_subject(head.as_str()),
                None => builder,
            },
            FakegenError::NameCollision { contract, .. }
            | FakegenError::SharedName { contract, .. } => builder.with_subject(contract.as_str()),
            _ => builder,
        };
        builder.build()
    }
}
