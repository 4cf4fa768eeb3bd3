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

//! Package-level symbol table

use crate::ast::{SourceUnit, TypeDecl};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticCode, DiagnosticReport, SourceLocation};
use indexmap::IndexMap;

/// A declaration together with where it was found
#[derive(Debug, Clone, Copy)]
pub struct ScopeEntry<'a> {
    /// Index of the declaring unit
    pub unit: usize,
    /// Index of the declaration inside its unit
    pub index: usize,
    /// The declaration
    pub decl: &'a TypeDecl,
}

/// Top-level identifiers of every unit of one package
#[derive(Debug, Default)]
pub struct PackageScope<'a> {
    entries: IndexMap<&'a str, ScopeEntry<'a>>,
}

impl<'a> PackageScope<'a> {
    /// Merge the declarations of all units.
    ///
    /// A name declared twice keeps the later declaration; the duplicate is
    /// reported as an error.
    pub fn build(units: &[&'a SourceUnit], diagnostics: &mut DiagnosticReport) -> Self {
        let mut entries: IndexMap<&'a str, ScopeEntry<'a>> = IndexMap::new();

        for (unit_index, unit) in units.iter().enumerate() {
            for (index, decl) in unit.decls.iter().enumerate() {
                let entry = ScopeEntry {
                    unit: unit_index,
                    index,
                    decl,
                };
                if let Some(previous) = entries.insert(decl.name.as_str(), entry) {
                    diagnostics.push(
                        DiagnosticBuilder::error(DiagnosticCode::DuplicateDeclaration)
                            .with_message(format!(
                                "{} redeclared in package {} (previous declaration in {} at {})",
                                decl.name,
                                unit.package,
                                units[previous.unit].name,
                                previous.decl.position
                            ))
                            .with_subject(decl.name.as_str())
                            .with_source_location(SourceLocation::with_file(
                                decl.position,
                                unit.name.as_str(),
                            ))
                            .build(),
                    );
                }
            }
        }

        Self { entries }
    }

    /// Look up a top-level identifier
    pub fn get(&self, name: &str) -> Option<ScopeEntry<'a>> {
        self.entries.get(name).copied()
    }

    /// Check whether an identifier names a package-level type
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Check whether a declaration is the one the scope kept for its name
    pub fn is_visible(&self, unit: usize, index: usize, name: &str) -> bool {
        self.entries
            .get(name)
            .is_some_and(|entry| entry.unit == unit && entry.index == index)
    }

    /// Number of identifiers in scope
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the scope is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
