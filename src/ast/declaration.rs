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

//! Top-level declarations of a source unit

use super::syntax::TypeSyntax;
use crate::diagnostics::Position;
use crate::model::ImportSpec;
use serde::Serialize;

/// One parsed declaration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceUnit {
    /// Unit name, usually the file name
    pub name: String,
    /// Declared package name
    pub package: String,
    /// Import specs in declaration order
    pub imports: Vec<ImportSpec>,
    /// Top-level type declarations in declaration order
    pub decls: Vec<TypeDecl>,
}

impl SourceUnit {
    /// Create an empty unit
    pub fn new(name: impl Into<String>, package: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            imports: Vec::new(),
            decls: Vec::new(),
        }
    }

    /// Add an import
    pub fn with_import(mut self, import: ImportSpec) -> Self {
        self.imports.push(import);
        self
    }

    /// Add a declaration
    pub fn with_decl(mut self, decl: TypeDecl) -> Self {
        self.decls.push(decl);
        self
    }

    /// Find a declaration by name
    pub fn decl(&self, name: &str) -> Option<&TypeDecl> {
        self.decls.iter().find(|decl| decl.name == name)
    }

    /// Resolve a package qualifier to the import it names
    pub fn import_for(&self, qualifier: &str) -> Option<&ImportSpec> {
        self.imports
            .iter()
            .find(|import| import.local_name() == qualifier)
    }
}

/// A top-level `type` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    /// Declared identifier
    pub name: String,
    /// What the declaration introduces
    pub kind: DeclKind,
    /// Position of the identifier
    pub position: Position,
}

impl TypeDecl {
    /// Create an interface declaration
    pub fn interface(name: impl Into<String>, members: Vec<InterfaceMember>) -> Self {
        Self {
            name: name.into(),
            kind: DeclKind::Interface(members),
            position: Position::default(),
        }
    }

    /// Create a non-interface declaration
    pub fn other(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            position: Position::default(),
        }
    }

    /// Set the position
    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Interface members, if this declares an interface
    pub fn members(&self) -> Option<&[InterfaceMember]> {
        match &self.kind {
            DeclKind::Interface(members) => Some(members),
            _ => None,
        }
    }
}

/// Kind of a type declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "members", rename_all = "snake_case")]
pub enum DeclKind {
    /// Interface with its members in declaration order
    Interface(Vec<InterfaceMember>),
    /// Struct type, body not inspected
    Struct,
    /// Any other defined type or alias
    Other,
    /// Interface that cannot become a contract, such as a type constraint
    Unsupported {
        /// Description of the construct
        construct: String,
    },
}

/// Member of an interface body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterfaceMember {
    /// Method specification
    Method(MethodSig),
    /// Embedded interface
    Embedded(TypeRef),
}

/// Method specification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSig {
    /// Method name
    pub name: String,
    /// Parameters in declaration order
    pub params: Vec<Param>,
    /// Results in declaration order
    pub results: Vec<Param>,
    /// Position of the method name
    pub position: Position,
}

impl MethodSig {
    /// Create a method signature
    pub fn new(name: impl Into<String>, params: Vec<Param>, results: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
            results,
            position: Position::default(),
        }
    }
}

/// Parameter or result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    /// Declared name; `None` for unnamed and blank (`_`) parameters
    pub name: Option<String>,
    /// Declared type
    #[serde(rename = "type")]
    pub ty: TypeSyntax,
}

impl Param {
    /// Create a named parameter
    pub fn named(name: impl Into<String>, ty: TypeSyntax) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    /// Create an unnamed parameter
    pub fn unnamed(ty: TypeSyntax) -> Self {
        Self { name: None, ty }
    }
}

/// Reference to an embedded interface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Package qualifier, when written as `pkg.Name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package: Option<String>,
    /// Referenced identifier
    pub name: String,
    /// Position of the reference
    pub position: Position,
}

impl TypeRef {
    /// Reference a name in the current package
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            package: None,
            name: name.into(),
            position: Position::default(),
        }
    }

    /// Reference a name in another package
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: Some(package.into()),
            name: name.into(),
            position: Position::default(),
        }
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{package}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}
