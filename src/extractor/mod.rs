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

//! Contract extraction
//!
//! Turns the parsed units of one package into flattened [`Contract`]s. The
//! package scope is built from every unit before any embedding is resolved,
//! so an interface may embed one declared later or in another file.

pub mod scope;

pub use scope::{PackageScope, ScopeEntry};

use crate::ast::{
    DeclKind, InterfaceMember, MethodSig, Param, SourceUnit, TypeDecl, TypeRef, TypeSyntax,
};
use crate::diagnostics::{DiagnosticBuilder, DiagnosticCode, Position, SourceLocation};
use crate::error::{FakegenError, Result};
use crate::model::{Contract, ImportSpec, Method, TypeExpr, Value};
use crate::pipeline::GenerationContext;
use rustc_hash::FxHashSet;
use serde::Serialize;

/// Contracts extracted from one package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Package name shared by all units
    pub name: String,
    /// Contracts in unit order, then declaration order
    pub contracts: Vec<Contract>,
}

/// A method together with the unit that declared it
struct LocatedMethod {
    method: Method,
    unit: usize,
}

/// Extract every interface of a package.
///
/// Units are processed in name order. Recoverable problems are recorded in
/// the context; a contract that embeds itself is left out of the result.
pub fn extract(units: &[SourceUnit], ctx: &mut GenerationContext) -> Result<Package> {
    if units.is_empty() {
        return Err(FakegenError::NoDeclarations);
    }

    let mut sorted: Vec<&SourceUnit> = units.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let mut packages: Vec<String> = Vec::new();
    for unit in &sorted {
        if !packages.contains(&unit.package) {
            packages.push(unit.package.clone());
        }
    }
    if packages.len() > 1 {
        return Err(FakegenError::AmbiguousPackage { packages });
    }
    let package = packages.remove(0);

    let scope = PackageScope::build(&sorted, &mut ctx.diagnostics);
    log::debug!(
        "package {package}: {} unit(s), {} declaration(s)",
        sorted.len(),
        scope.len()
    );

    let extractor = Extractor {
        package: &package,
        units: &sorted,
        scope: &scope,
    };

    let mut contracts = Vec::new();
    for (unit_index, unit) in sorted.iter().enumerate() {
        for (index, decl) in unit.decls.iter().enumerate() {
            if !scope.is_visible(unit_index, index, &decl.name) {
                continue;
            }
            if let DeclKind::Unsupported { construct } = &decl.kind {
                if ctx.config.is_selected(&decl.name) {
                    ctx.report(
                        DiagnosticBuilder::warning(DiagnosticCode::UnsupportedSyntax)
                            .with_message(format!(
                                "{} is a {construct}; no fake is generated for it",
                                decl.name
                            ))
                            .with_subject(decl.name.as_str())
                            .with_source_location(extractor.location(unit_index, decl.position))
                            .build(),
                    );
                }
                continue;
            }
            if decl.members().is_none() {
                continue;
            }
            match extractor.contract(unit_index, decl, ctx) {
                Ok(contract) => {
                    log::debug!(
                        "extracted contract {} with {} method(s)",
                        contract.name,
                        contract.methods.len()
                    );
                    contracts.push(contract);
                }
                Err(error) if ctx.config.is_selected(&decl.name) => ctx.report(
                    error
                        .to_diagnostic()
                        .with_subject(decl.name.as_str())
                        .with_location(SourceLocation::with_file(
                            decl.position,
                            unit.name.as_str(),
                        )),
                ),
                Err(error) => log::debug!("skipping unselected contract {}: {error}", decl.name),
            }
        }
    }

    Ok(Package {
        name: package,
        contracts,
    })
}

struct Extractor<'a> {
    package: &'a str,
    units: &'a [&'a SourceUnit],
    scope: &'a PackageScope<'a>,
}

impl<'a> Extractor<'a> {
    fn contract(
        &self,
        unit: usize,
        decl: &'a TypeDecl,
        ctx: &mut GenerationContext,
    ) -> Result<Contract> {
        let mut chain = Vec::new();
        let located = self.flatten(unit, decl, &mut chain, Some(&mut *ctx))?;
        let imports = self.collect_imports(&decl.name, &located, ctx);

        Ok(Contract::new(
            decl.name.as_str(),
            located.into_iter().map(|located| located.method),
        )
        .with_imports(imports))
    }

    /// Collect the methods of an interface with every embedding spliced in
    /// place. Diagnostics are only recorded for the outermost interface;
    /// nested ones report their own problems when they are extracted.
    fn flatten(
        &self,
        unit: usize,
        decl: &'a TypeDecl,
        chain: &mut Vec<String>,
        mut ctx: Option<&mut GenerationContext>,
    ) -> Result<Vec<LocatedMethod>> {
        if let Some(start) = chain.iter().position(|name| name == &decl.name) {
            let mut cycle = chain[start..].to_vec();
            cycle.push(decl.name.clone());
            return Err(FakegenError::CyclicEmbedding { chain: cycle });
        }
        chain.push(decl.name.clone());

        let mut methods: Vec<LocatedMethod> = Vec::new();
        let mut seen: FxHashSet<String> = FxHashSet::default();

        for member in decl.members().unwrap_or_default() {
            let incoming = match member {
                InterfaceMember::Method(sig) => vec![LocatedMethod {
                    method: self.method(unit, sig)?,
                    unit,
                }],
                InterfaceMember::Embedded(reference) => {
                    match self.resolve_embedding(unit, reference) {
                        Some(entry) => self.flatten(entry.unit, entry.decl, chain, None)?,
                        None => {
                            if let Some(ctx) = ctx.as_deref_mut() {
                                ctx.report(
                                    DiagnosticBuilder::warning(DiagnosticCode::UnresolvedEmbedding)
                                        .with_message(format!(
                                            "embedded interface {reference} in {} is not declared in package {}; skipping it",
                                            decl.name, self.package
                                        ))
                                        .with_subject(decl.name.as_str())
                                        .with_source_location(self.location(unit, reference.position))
                                        .build(),
                                );
                            }
                            Vec::new()
                        }
                    }
                }
            };

            for located in incoming {
                if seen.insert(located.method.name.clone()) {
                    methods.push(located);
                } else if let Some(ctx) = ctx.as_deref_mut() {
                    ctx.report(
                        DiagnosticBuilder::warning(DiagnosticCode::DuplicateMethod)
                            .with_message(format!(
                                "method {} of {} is declared more than once; keeping the first declaration",
                                located.method.name, decl.name
                            ))
                            .with_subject(decl.name.as_str())
                            .with_source_location(self.location(unit, decl.position))
                            .build(),
                    );
                }
            }
        }

        chain.pop();
        Ok(methods)
    }

    /// Resolve an embedded name against the embedding unit first, then the
    /// whole package. Only interfaces resolve.
    fn resolve_embedding(&self, unit: usize, reference: &TypeRef) -> Option<ScopeEntry<'a>> {
        if reference.package.is_some() {
            return None;
        }
        let local = self.units[unit]
            .decls
            .iter()
            .enumerate()
            .find(|(_, decl)| decl.name == reference.name)
            .map(|(index, decl)| ScopeEntry { unit, index, decl });

        local
            .or_else(|| self.scope.get(&reference.name))
            .filter(|entry| entry.decl.members().is_some())
    }

    fn location(&self, unit: usize, position: Position) -> SourceLocation {
        SourceLocation::with_file(position, self.units[unit].name.as_str())
    }

    fn method(&self, unit: usize, sig: &MethodSig) -> Result<Method> {
        let unsupported = sig
            .params
            .iter()
            .chain(&sig.results)
            .find_map(|param| param.ty.unsupported_part());
        if let Some((construct, text)) = unsupported {
            return Err(FakegenError::UnsupportedType {
                method: sig.name.clone(),
                construct: construct.to_string(),
                text: text.to_string(),
            });
        }

        let convert = |param: &Param| {
            let ty = self.type_expr(&param.ty);
            match &param.name {
                Some(name) => Value::named(name.as_str(), ty),
                None => Value::unnamed(ty),
            }
        };
        log::trace!("converting method {} of unit {}", sig.name, self.units[unit].name);
        Ok(Method::new(
            sig.name.as_str(),
            sig.params.iter().map(convert),
            sig.results.iter().map(convert),
        ))
    }

    /// Convert a syntax type, qualifying names declared in this package
    fn type_expr(&self, ty: &TypeSyntax) -> TypeExpr {
        match ty {
            TypeSyntax::Name { name } if self.scope.contains(name) => {
                TypeExpr::qualified(self.package, name.as_str())
            }
            TypeSyntax::Name { name } => TypeExpr::named(name.as_str()),
            TypeSyntax::Qualified { package, name } => {
                TypeExpr::qualified(package.as_str(), name.as_str())
            }
            TypeSyntax::Slice { element } => TypeExpr::sequence(self.type_expr(element)),
            TypeSyntax::Array { len, element } => {
                TypeExpr::array(len.as_str(), self.type_expr(element))
            }
            TypeSyntax::Pointer { element } => TypeExpr::pointer(self.type_expr(element)),
            TypeSyntax::Map { key, value } => {
                TypeExpr::map(self.type_expr(key), self.type_expr(value))
            }
            TypeSyntax::Variadic { element } => TypeExpr::variadic(self.type_expr(element)),
            // Rejected by `method` before conversion
            TypeSyntax::Unsupported { text, .. } => TypeExpr::named(text.as_str()),
        }
    }

    /// Imports needed by the method signatures, in first-use order
    fn collect_imports(
        &self,
        contract: &str,
        methods: &[LocatedMethod],
        ctx: &mut GenerationContext,
    ) -> Vec<ImportSpec> {
        let mut imports: Vec<ImportSpec> = Vec::new();
        let mut missing_source = false;

        let values = methods.iter().flat_map(|located| {
            located
                .method
                .args
                .iter()
                .chain(located.method.rets.iter())
                .map(move |value| (located.unit, value))
        });

        for (unit, value) in values {
            for namespace in value.ty.namespaces() {
                if imports.iter().any(|import| import.local_name() == namespace) {
                    continue;
                }
                let import = if namespace == self.package {
                    match ctx.config.source_import.as_deref() {
                        Some(path) => Some(source_import(self.package, path)),
                        None => {
                            missing_source = true;
                            None
                        }
                    }
                } else {
                    self.units[unit].import_for(namespace).cloned()
                };
                match import {
                    Some(import) => imports.push(import),
                    None if namespace != self.package => log::debug!(
                        "qualifier {namespace} in {contract} does not name an import of {}",
                        self.units[unit].name
                    ),
                    None => {}
                }
            }
        }

        if missing_source {
            ctx.report(
                DiagnosticBuilder::warning(DiagnosticCode::MissingSourceImport)
                    .with_message(format!(
                        "{contract} refers to types of package {} but no source import path is configured",
                        self.package
                    ))
                    .with_subject(contract)
                    .build(),
            );
        }

        imports
    }
}

/// Import spec for the package being faked, aliased when its path does not
/// end in the package name
fn source_import(package: &str, path: &str) -> ImportSpec {
    let import = ImportSpec::new(path);
    if import.local_name() == package {
        import
    } else {
        ImportSpec::aliased(package, path)
    }
}
