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

//! Contracts, methods and values extracted from interface declarations

use super::types::TypeExpr;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Ordered argument or return list of a method
pub type ValueList = SmallVec<[Value; 4]>;

/// Which side of a signature a value sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Method argument
    Arg,
    /// Method return value
    Result,
}

impl Role {
    /// Suffix appended to bindings of this role
    pub const fn suffix(self) -> &'static str {
        match self {
            Role::Arg => "Arg",
            Role::Result => "Result",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Arg => write!(f, "argument"),
            Role::Result => write!(f, "result"),
        }
    }
}

/// Name of a value as declared or as derived by the resolver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum ValueName {
    /// Name written in the declaration, kept verbatim
    Explicit(String),
    /// Name derived from the type, already carrying the role suffix (`stringArg`)
    Derived(String),
    /// No name yet; the resolver has not run
    Missing,
}

/// An argument or return value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Value {
    /// Declared or derived name
    pub name: ValueName,
    /// Value type
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// Disambiguation index, only set when a derived name repeats in its list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl Value {
    /// Create a value with an explicit name
    pub fn named(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: ValueName::Explicit(name.into()),
            ty,
            index: None,
        }
    }

    /// Create a value without a name
    pub fn unnamed(ty: TypeExpr) -> Self {
        Self {
            name: ValueName::Missing,
            ty,
            index: None,
        }
    }

    /// Check if the value was declared without a name
    pub fn is_explicit(&self) -> bool {
        matches!(self.name, ValueName::Explicit(_))
    }

    /// Full identifier of the value (`d`, `stringArg`, `stringArg2`)
    pub fn ident(&self) -> Option<String> {
        match &self.name {
            ValueName::Explicit(name) => Some(name.clone()),
            ValueName::Derived(name) => Some(match self.index {
                Some(index) => format!("{name}{index}"),
                None => name.clone(),
            }),
            ValueName::Missing => None,
        }
    }

    /// Identifier used for this value in synthesized code.
    ///
    /// Explicit names get the role suffix appended (`distance` ->
    /// `distanceArg`); derived names already carry it.
    pub fn binding(&self, role: Role) -> Option<String> {
        match &self.name {
            ValueName::Explicit(name) => Some(format!("{name}{}", role.suffix())),
            ValueName::Derived(_) => self.ident(),
            ValueName::Missing => None,
        }
    }
}

/// A single contract method
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    /// Method name
    pub name: String,
    /// Arguments in declaration order
    pub args: ValueList,
    /// Return values in declaration order
    pub rets: ValueList,
}

impl Method {
    /// Create a method
    pub fn new(
        name: impl Into<String>,
        args: impl IntoIterator<Item = Value>,
        rets: impl IntoIterator<Item = Value>,
    ) -> Self {
        Self {
            name: name.into(),
            args: args.into_iter().collect(),
            rets: rets.into_iter().collect(),
        }
    }

    /// Values of the given role
    pub fn values(&self, role: Role) -> &[Value] {
        match role {
            Role::Arg => &self.args,
            Role::Result => &self.rets,
        }
    }
}

/// Import needed by a type referenced from a contract
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ImportSpec {
    /// Local alias, when the import is renamed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    /// Import path
    pub path: String,
}

impl ImportSpec {
    /// Create an unaliased import
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            alias: None,
            path: path.into(),
        }
    }

    /// Create an aliased import
    pub fn aliased(alias: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            path: path.into(),
        }
    }

    /// Name the import is referred to by in source.
    ///
    /// Without an alias this is the last path element, minus a gopkg.in style
    /// `.vN` version suffix.
    pub fn local_name(&self) -> &str {
        if let Some(alias) = &self.alias {
            return alias;
        }
        let last = self.path.rsplit('/').next().unwrap_or(&self.path);
        match last.rsplit_once(".v") {
            Some((name, version))
                if !name.is_empty()
                    && !version.is_empty()
                    && version.chars().all(|c| c.is_ascii_digit()) =>
            {
                name
            }
            _ => last,
        }
    }
}

/// A flattened contract ready for synthesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contract {
    /// Contract name
    pub name: String,
    /// Methods, embedded contracts spliced in declaration position
    pub methods: Vec<Method>,
    /// Imports referenced by the method signatures, in first-use order
    pub imports: Vec<ImportSpec>,
}

impl Contract {
    /// Create a contract without imports
    pub fn new(name: impl Into<String>, methods: impl IntoIterator<Item = Method>) -> Self {
        Self {
            name: name.into(),
            methods: methods.into_iter().collect(),
            imports: Vec::new(),
        }
    }

    /// Attach imports
    pub fn with_imports(mut self, imports: impl IntoIterator<Item = ImportSpec>) -> Self {
        self.imports = imports.into_iter().collect();
        self
    }

    /// Find a method by name
    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|method| method.name == name)
    }
}
