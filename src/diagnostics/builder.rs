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

//! Builder for diagnostics

use super::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use super::location::{Position, SourceLocation};

/// Builder for creating diagnostics
#[derive(Debug, Clone)]
pub struct DiagnosticBuilder {
    severity: Severity,
    code: DiagnosticCode,
    message: String,
    subject: Option<String>,
    location: Option<SourceLocation>,
}

impl DiagnosticBuilder {
    fn with_severity(severity: Severity, code: DiagnosticCode) -> Self {
        Self {
            severity,
            code,
            message: String::new(),
            subject: None,
            location: None,
        }
    }

    /// Create a new error diagnostic builder
    pub fn error(code: DiagnosticCode) -> Self {
        Self::with_severity(Severity::Error, code)
    }

    /// Create a new warning diagnostic builder
    pub fn warning(code: DiagnosticCode) -> Self {
        Self::with_severity(Severity::Warning, code)
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Set the declaration the diagnostic is about
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Set the location from a position
    pub fn with_position(mut self, position: Position) -> Self {
        match &mut self.location {
            Some(location) => location.position = position,
            None => self.location = Some(SourceLocation::new(position)),
        }
        self
    }

    /// Set the complete source location
    pub fn with_source_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Add file path to the location
    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.location
            .get_or_insert_with(SourceLocation::default)
            .file_path = Some(path.into());
        self
    }

    /// Build the diagnostic
    pub fn build(self) -> Diagnostic {
        let mut diagnostic = Diagnostic::new(self.code, self.severity, self.message);
        diagnostic.subject = self.subject;
        diagnostic.location = self.location;
        diagnostic
    }
}
