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

//! Configuration for fake generation

use crate::error::{FakegenError, Result};
use crate::naming::is_identifier;
use serde::{Deserialize, Serialize};

/// Package name used for generated files unless configured otherwise
pub const DEFAULT_PACKAGE: &str = "fake";

/// Configuration for a generation run
///
/// Can be read from a TOML document:
///
/// ```toml
/// package = "fakes"
/// select = ["Runner"]
/// source_import = "example.com/app/runner"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Package clause of the generated files
    pub package: String,
    /// Contracts to generate; empty means all
    pub select: Vec<String>,
    /// Import path of the package being faked, used when a signature refers
    /// to a type declared in that package
    pub source_import: Option<String>,
    /// Whether to emit the "generated code" header comment
    pub header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
            select: Vec::new(),
            source_import: None,
            header: true,
        }
    }
}

impl GeneratorConfig {
    /// Create a config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig =
            toml::from_str(content).map_err(|e| FakegenError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the output package
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Restrict generation to the named contracts
    pub fn with_select<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the import path of the source package
    pub fn with_source_import(mut self, path: impl Into<String>) -> Self {
        self.source_import = Some(path.into());
        self
    }

    /// Enable or disable the header comment
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Check whether a contract passes the selection filter
    pub fn is_selected(&self, contract: &str) -> bool {
        self.select.is_empty() || self.select.iter().any(|name| name == contract)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.package) {
            return Err(FakegenError::Config(format!(
                "package must be an identifier, got {:?}",
                self.package
            )));
        }
        if let Some(name) = self.select.iter().find(|name| !is_identifier(name)) {
            return Err(FakegenError::Config(format!(
                "selected contract must be an identifier, got {name:?}"
            )));
        }
        if self.source_import.as_deref().is_some_and(|path| path.trim().is_empty()) {
            return Err(FakegenError::Config(
                "source_import must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
