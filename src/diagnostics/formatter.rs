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

//! Formatting diagnostics for different output formats

use super::diagnostic::Diagnostic;
#[cfg(feature = "terminal")]
use super::diagnostic::Severity;

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format
    Json,
    /// Compact single-line format
    Compact,
}

/// Formatter for diagnostics
#[derive(Debug, Clone)]
pub struct DiagnosticFormatter {
    format: Format,
    show_code: bool,
    show_help: bool,
    #[cfg(feature = "terminal")]
    use_color: bool,
}

impl DiagnosticFormatter {
    /// Create a new formatter
    pub fn new(format: Format) -> Self {
        Self {
            format,
            show_code: true,
            show_help: true,
            #[cfg(feature = "terminal")]
            use_color: false,
        }
    }

    /// Set whether to show diagnostic codes
    pub fn with_code(mut self, show: bool) -> Self {
        self.show_code = show;
        self
    }

    /// Set whether to show help lines
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    /// Set whether to use color (terminal feature only)
    #[cfg(feature = "terminal")]
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Format a diagnostic
    pub fn format(&self, diagnostic: &Diagnostic) -> String {
        match self.format {
            Format::Text => self.format_text(diagnostic),
            Format::Json => to_json(diagnostic),
            Format::Compact => self.format_compact(diagnostic),
        }
    }

    /// Format multiple diagnostics
    pub fn format_all(&self, diagnostics: &[Diagnostic]) -> String {
        match self.format {
            Format::Text => diagnostics
                .iter()
                .map(|d| self.format_text(d))
                .collect::<Vec<_>>()
                .join("\n"),
            Format::Json => to_json(diagnostics),
            Format::Compact => diagnostics
                .iter()
                .map(|d| self.format_compact(d))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn severity_label(&self, diagnostic: &Diagnostic) -> String {
        #[cfg(feature = "terminal")]
        if self.use_color {
            use colored::Colorize;
            let label = diagnostic.severity.to_string();
            return match diagnostic.severity {
                Severity::Error => label.red().bold().to_string(),
                Severity::Warning => label.yellow().bold().to_string(),
            };
        }
        diagnostic.severity.to_string()
    }

    fn format_text(&self, diagnostic: &Diagnostic) -> String {
        let mut result = self.severity_label(diagnostic);
        if self.show_code {
            result.push_str(&format!("[{}]", diagnostic.code_string()));
        }
        result.push_str(&format!(": {}\n", diagnostic.message));

        if let Some(location) = &diagnostic.location {
            result.push_str(&format!(" --> {location}\n"));

            if let Some(line) = &location.source_line {
                let (line_no, _) = location.position.to_display();
                let width = line_no.to_string().len();
                result.push_str(&format!("{:width$} |\n", ""));
                result.push_str(&format!("{line_no} | {line}\n"));

                let column = location.position.column.min(line.len());
                let token_len = line[column..]
                    .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                    .unwrap_or(line.len() - column)
                    .max(1);
                result.push_str(&format!(
                    "{:width$} | {}{}\n",
                    "",
                    " ".repeat(column),
                    "^".repeat(token_len)
                ));
            }
        }

        if self.show_help {
            if let Some(help) = &diagnostic.help {
                result.push_str(&format!("  = help: {help}\n"));
            }
        }

        result
    }

    fn format_compact(&self, diagnostic: &Diagnostic) -> String {
        let code = if self.show_code {
            format!("[{}] ", diagnostic.code_string())
        } else {
            String::new()
        };
        let prefix = match (&diagnostic.location, &diagnostic.subject) {
            (Some(location), _) => format!("{location}: "),
            (None, Some(subject)) => format!("{subject}: "),
            (None, None) => String::new(),
        };

        format!(
            "{prefix}{}: {code}{}",
            diagnostic.severity, diagnostic.message
        )
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize diagnostics: {e}\"}}"))
}

impl Default for DiagnosticFormatter {
    fn default() -> Self {
        Self::new(Format::Text)
    }
}

/// Extension trait for formatting diagnostics
pub trait DiagnosticFormat {
    /// Format as human-readable text
    fn to_text(&self) -> String;

    /// Format as JSON
    fn to_json(&self) -> String;

    /// Format as compact single line
    fn to_compact(&self) -> String;
}

impl DiagnosticFormat for Diagnostic {
    fn to_text(&self) -> String {
        DiagnosticFormatter::new(Format::Text).format(self)
    }

    fn to_json(&self) -> String {
        DiagnosticFormatter::new(Format::Json).format(self)
    }

    fn to_compact(&self) -> String {
        DiagnosticFormatter::new(Format::Compact).format(self)
    }
}
