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

//! Generation pipeline
//!
//! Runs extraction, name resolution and synthesis over the units of one
//! package. Problems local to a single contract are recorded as diagnostics
//! and only that contract is skipped; problems affecting the whole package
//! are returned as errors.

pub mod context;

pub use context::GenerationContext;

use crate::ast::{DeclKind, SourceUnit};
use crate::config::GeneratorConfig;
use crate::diagnostics::{DiagnosticBuilder, DiagnosticCode, DiagnosticReport};
use crate::error::{FakegenError, Result};
use crate::extractor::extract;
use crate::model::{Contract, ImportSpec};
use crate::naming::camel_to_snake;
use crate::parser::parse_unit;
use crate::render::Renderer;
use crate::resolver::resolve_contract;
use crate::synth::{Decl, synthesize};
use rustc_hash::FxHashMap;

/// Import every generated file needs for its locks
pub const SYNC_IMPORT: &str = "sync";

/// One generated fake, ready to be rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Contract the fake stands in for
    pub contract: String,
    /// Output file name (`runner.go`)
    pub file_name: String,
    /// Package clause
    pub package: String,
    /// Imports used by the declarations
    pub imports: Vec<ImportSpec>,
    /// Declarations in output order
    pub decls: Vec<Decl>,
}

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GenerationOutput {
    /// Name of the package the contracts were read from
    pub package: String,
    /// Resolved contracts that passed the selection filter
    pub contracts: Vec<Contract>,
    /// One file per successfully synthesized contract
    pub files: Vec<GeneratedFile>,
    /// Everything recorded along the way
    pub diagnostics: DiagnosticReport,
}

impl GenerationOutput {
    /// Check if any error diagnostic was recorded
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// Look up the file generated for a contract
    pub fn file(&self, contract: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|file| file.contract == contract)
    }

    /// Render every file as `(file name, source text)`
    pub fn render(&self, renderer: &Renderer) -> Vec<(String, String)> {
        self.files
            .iter()
            .map(|file| (file.file_name.clone(), renderer.render_file(file)))
            .collect()
    }
}

/// Generate fakes for every selected contract of a package
pub fn generate(units: &[SourceUnit], config: GeneratorConfig) -> Result<GenerationOutput> {
    config.validate()?;
    let mut ctx = GenerationContext::new(config);

    let package = extract(units, &mut ctx)?;
    report_unknown_selections(units, &mut ctx);

    let mut contracts = Vec::new();
    let mut files = Vec::new();
    let mut owners = NameOwners::default();
    for contract in &package.contracts {
        if !ctx.config.is_selected(&contract.name) {
            log::debug!("skipping unselected contract {}", contract.name);
            continue;
        }

        let generated = generate_contract(contract, &ctx.config)
            .and_then(|generated| owners.claim(&generated.1).map(|()| generated));
        match generated {
            Ok((resolved, file)) => {
                contracts.push(resolved);
                files.push(file);
            }
            Err(error) => ctx.report(error.to_diagnostic().with_subject(contract.name.as_str())),
        }
    }

    log::debug!(
        "generated {} fake(s) for package {}",
        files.len(),
        package.name
    );
    Ok(GenerationOutput {
        package: package.name,
        contracts,
        files,
        diagnostics: ctx.diagnostics,
    })
}

/// Parse `(name, source)` pairs and generate fakes from them.
///
/// The first unit that fails to parse aborts the run.
pub fn from_sources<N, S>(sources: &[(N, S)], config: GeneratorConfig) -> Result<GenerationOutput>
where
    N: AsRef<str>,
    S: AsRef<str>,
{
    let units = sources
        .iter()
        .map(|(name, source)| {
            parse_unit(name.as_ref(), source.as_ref()).map_err(|source| FakegenError::Parse {
                unit: name.as_ref().to_string(),
                source,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    generate(&units, config)
}

fn generate_contract(
    contract: &Contract,
    config: &GeneratorConfig,
) -> Result<(Contract, GeneratedFile)> {
    let resolved = resolve_contract(contract)?;
    let decls = synthesize(&resolved)?;
    let imports = file_imports(&resolved)?;

    let file = GeneratedFile {
        contract: resolved.name.clone(),
        file_name: format!("{}.go", camel_to_snake(&resolved.name)),
        package: config.package.clone(),
        imports,
        decls,
    };
    Ok((resolved, file))
}

/// Package-level names and file names already taken by earlier fakes.
/// Every fake of a run shares one output package.
#[derive(Debug, Default)]
struct NameOwners {
    owners: FxHashMap<String, String>,
}

impl NameOwners {
    /// Take every name of a file, or none of them if one is already taken
    fn claim(&mut self, file: &GeneratedFile) -> Result<()> {
        let names: Vec<&str> = file
            .decls
            .iter()
            .filter(|decl| decl.is_package_level())
            .map(Decl::name)
            .chain(std::iter::once(file.file_name.as_str()))
            .collect();

        if let Some((name, owner)) = names
            .iter()
            .find_map(|name| self.owners.get(*name).map(|owner| (*name, owner)))
        {
            return Err(FakegenError::SharedName {
                contract: file.contract.clone(),
                name: name.to_string(),
                owner: owner.clone(),
            });
        }

        for name in names {
            self.owners.insert(name.to_string(), file.contract.clone());
        }
        Ok(())
    }
}

fn file_imports(contract: &Contract) -> Result<Vec<ImportSpec>> {
    let sync = ImportSpec::new(SYNC_IMPORT);
    if let Some(clash) = contract
        .imports
        .iter()
        .find(|import| import.local_name() == SYNC_IMPORT && import.path != SYNC_IMPORT)
    {
        return Err(FakegenError::NameCollision {
            contract: contract.name.clone(),
            name: format!("{} (import {:?})", SYNC_IMPORT, clash.path),
        });
    }

    let mut imports = contract.imports.clone();
    if !imports.contains(&sync) {
        imports.push(sync);
    }
    imports.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(imports)
}

fn report_unknown_selections(units: &[SourceUnit], ctx: &mut GenerationContext) {
    let unknown: Vec<String> = ctx
        .config
        .select
        .iter()
        .filter(|name| {
            !units.iter().any(|unit| {
                unit.decl(name).is_some_and(|decl| {
                    matches!(decl.kind, DeclKind::Interface(_) | DeclKind::Unsupported { .. })
                })
            })
        })
        .cloned()
        .collect();

    for name in unknown {
        ctx.report(
            DiagnosticBuilder::warning(DiagnosticCode::UnknownContract)
                .with_message(format!("selected contract {name} is not declared"))
                .with_subject(name)
                .build(),
        );
    }
}
