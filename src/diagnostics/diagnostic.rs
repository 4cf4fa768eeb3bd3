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

//! Core diagnostic types

use super::location::SourceLocation;
use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - the declaration was processed with something left out
    Warning,
    /// Error - the declaration could not be processed
    Error,
}

/// Diagnostic codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    // Parsing errors
    /// Unexpected token in a declaration
    UnexpectedToken,
    /// Expected a specific token
    ExpectedToken(String),
    /// Unclosed string, rune or comment
    UnclosedLiteral,
    /// Construct outside the supported declaration subset
    UnsupportedSyntax,

    // Package errors
    /// More than one package among the units
    AmbiguousPackage,
    /// Nothing to extract from
    NoDeclarations,
    /// Same top-level identifier declared twice
    DuplicateDeclaration,
    /// A signature refers to the source package but no import path is known
    MissingSourceImport,

    // Embedding errors
    /// Embedded name does not resolve to a contract in the package
    UnresolvedEmbedding,
    /// Contract embeds itself through a chain of embeddings
    CyclicEmbedding,
    /// Two embedded contracts contribute the same method name
    DuplicateMethod,

    // Naming errors
    /// Value has neither a name nor a derivable type name
    UnnamedValue,
    /// Two values of one list bind the same identifier
    DuplicateValue,
    /// Two synthesized identifiers collide
    NameCollision,

    // Selection
    /// A selected contract does not exist
    UnknownContract,

    // Configuration
    /// Configuration file or flags hold an invalid value
    InvalidConfig,
}

/// A diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity of the diagnostic
    pub severity: Severity,
    /// Diagnostic code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Declaration the diagnostic is about
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Source location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
    /// Simple contextual help message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(code: DiagnosticCode, severity: Severity, message: impl Into<String>) -> Self {
        let help = Self::generate_help(&code);
        Self {
            severity,
            code,
            message: message.into(),
            subject: None,
            location: None,
            help,
        }
    }

    /// Generate simple contextual help based on diagnostic code
    fn generate_help(code: &DiagnosticCode) -> Option<String> {
        match code {
            DiagnosticCode::UnsupportedSyntax => Some(
                "Only method sets whose signatures use identifiers, qualified names, slices, \
                 arrays, pointers, maps and variadic parameters can be faked"
                    .to_string(),
            ),
            DiagnosticCode::AmbiguousPackage => {
                Some("Point the generator at a single package directory".to_string())
            }
            DiagnosticCode::MissingSourceImport => {
                Some("Pass the import path of the package with --source-import".to_string())
            }
            DiagnosticCode::UnresolvedEmbedding => Some(
                "Only interfaces declared in the same package can be embedded".to_string(),
            ),
            DiagnosticCode::CyclicEmbedding => {
                Some("Remove one of the embeddings that close the cycle".to_string())
            }
            DiagnosticCode::DuplicateMethod => {
                Some("The first declaration of the method is kept".to_string())
            }
            DiagnosticCode::UnnamedValue => {
                Some("Give the parameter a name or a named type".to_string())
            }
            DiagnosticCode::NameCollision => {
                Some("Rename one of the methods of the contract".to_string())
            }
            _ => None,
        }
    }

    /// Set the declaration the diagnostic is about
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the source location
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }

    /// Get the diagnostic code as a string
    pub fn code_string(&self) -> String {
        match &self.code {
            DiagnosticCode::UnexpectedToken => "F001".to_string(),
            DiagnosticCode::ExpectedToken(_) => "F002".to_string(),
            DiagnosticCode::UnclosedLiteral => "F003".to_string(),
            DiagnosticCode::UnsupportedSyntax => "F004".to_string(),
            DiagnosticCode::AmbiguousPackage => "F100".to_string(),
            DiagnosticCode::NoDeclarations => "F101".to_string(),
            DiagnosticCode::DuplicateDeclaration => "F102".to_string(),
            DiagnosticCode::MissingSourceImport => "F103".to_string(),
            DiagnosticCode::UnresolvedEmbedding => "F200".to_string(),
            DiagnosticCode::CyclicEmbedding => "F201".to_string(),
            DiagnosticCode::DuplicateMethod => "F202".to_string(),
            DiagnosticCode::UnnamedValue => "F300".to_string(),
            DiagnosticCode::DuplicateValue => "F301".to_string(),
            DiagnosticCode::NameCollision => "F302".to_string(),
            DiagnosticCode::UnknownContract => "F400".to_string(),
            DiagnosticCode::InvalidConfig => "F500".to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            match self.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARN",
            },
            self.code,
            self.message
        )
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCode::UnexpectedToken => write!(f, "unexpected token"),
            DiagnosticCode::ExpectedToken(token) => write!(f, "expected {token}"),
            DiagnosticCode::UnclosedLiteral => write!(f, "unclosed literal"),
            DiagnosticCode::UnsupportedSyntax => write!(f, "unsupported syntax"),
            DiagnosticCode::AmbiguousPackage => write!(f, "ambiguous package"),
            DiagnosticCode::NoDeclarations => write!(f, "no declarations"),
            DiagnosticCode::DuplicateDeclaration => write!(f, "duplicate declaration"),
            DiagnosticCode::MissingSourceImport => write!(f, "missing source import"),
            DiagnosticCode::UnresolvedEmbedding => write!(f, "unresolved embedding"),
            DiagnosticCode::CyclicEmbedding => write!(f, "cyclic embedding"),
            DiagnosticCode::DuplicateMethod => write!(f, "duplicate method"),
            DiagnosticCode::UnnamedValue => write!(f, "unnamed value"),
            DiagnosticCode::DuplicateValue => write!(f, "duplicate value"),
            DiagnosticCode::NameCollision => write!(f, "name collision"),
            DiagnosticCode::UnknownContract => write!(f, "unknown contract"),
            DiagnosticCode::InvalidConfig => write!(f, "invalid configuration"),
        }
    }
}
