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

//! Collecting diagnostics across a generation run

use super::diagnostic::{Diagnostic, DiagnosticCode, Severity};
use serde::Serialize;
use std::fmt;

/// Summary statistics for a set of diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticSummary {
    /// Number of error diagnostics
    pub error_count: usize,
    /// Number of warning diagnostics
    pub warning_count: usize,
    /// Highest severity present
    pub overall_severity: Option<Severity>,
}

/// Ordered collection of diagnostics produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic, logging it as it arrives
    pub fn push(&mut self, diagnostic: Diagnostic) {
        log::warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic of another report
    pub fn extend(&mut self, other: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in other {
            self.push(diagnostic);
        }
    }

    /// Check if any error was recorded
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of recorded diagnostics
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// All diagnostics in recording order
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Iterate over the diagnostics carrying a code
    pub fn with_code<'a>(
        &'a self,
        code: &'a DiagnosticCode,
    ) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| &d.code == code)
    }

    /// Compute summary statistics
    pub fn summary(&self) -> DiagnosticSummary {
        let mut summary = DiagnosticSummary::default();
        for diagnostic in &self.diagnostics {
            match diagnostic.severity {
                Severity::Error => summary.error_count += 1,
                Severity::Warning => summary.warning_count += 1,
            }
            summary.overall_severity = summary.overall_severity.max(Some(diagnostic.severity));
        }
        summary
    }

    /// Consume the report
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl IntoIterator for DiagnosticReport {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.error_count, self.warning_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticBuilder;

    #[test]
    fn test_report_summary() {
        let mut report = DiagnosticReport::new();
        assert!(report.is_empty());
        assert_eq!(report.summary().overall_severity, None);

        report.push(
            DiagnosticBuilder::warning(DiagnosticCode::DuplicateMethod)
                .with_message("method Close declared twice")
                .build(),
        );
        assert!(!report.has_errors());

        report.push(
            DiagnosticBuilder::error(DiagnosticCode::CyclicEmbedding)
                .with_message("A embeds itself through A -> A")
                .build(),
        );

        let summary = report.summary();
        assert!(report.has_errors());
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.warning_count, 1);
        assert_eq!(summary.overall_severity, Some(Severity::Error));
        assert_eq!(summary.to_string(), "1 error(s), 1 warning(s)");
        assert_eq!(report.with_code(&DiagnosticCode::DuplicateMethod).count(), 1);
    }
}
