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

//! State threaded through one generation run

use crate::config::GeneratorConfig;
use crate::diagnostics::{Diagnostic, DiagnosticReport};

/// Configuration and collected diagnostics of one run.
///
/// Every run builds its own context; nothing is shared between runs.
#[derive(Debug, Clone, Default)]
pub struct GenerationContext {
    /// Run configuration
    pub config: GeneratorConfig,
    /// Diagnostics recorded so far
    pub diagnostics: DiagnosticReport,
}

impl GenerationContext {
    /// Create a context for a run
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            diagnostics: DiagnosticReport::new(),
        }
    }

    /// Record a diagnostic
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Check if an error diagnostic was recorded
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }
}
