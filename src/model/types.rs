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

//! Type expressions carried by contract values
//!
//! A [`TypeExpr`] only knows enough about a type to print it back out and to
//! derive a readable base name from it. It never tries to understand what the
//! type means.

use crate::naming::{is_identifier, lower_first};
use serde::Serialize;
use std::fmt;

/// Marker appended to the base name of sequence types
pub const SEQUENCE_MARKER: &str = "Arr";
/// Marker appended to the base name of variadic types
pub const VARIADIC_MARKER: &str = "Var";
/// Marker appended to the base name of map types
pub const MAP_MARKER: &str = "Map";

/// Shape of a value's type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// Bare type name (`int`, `error`, `Duration`)
    Named {
        /// Type name
        name: String,
    },
    /// Namespaced type (`time.Duration`)
    Qualified {
        /// Package qualifier
        namespace: String,
        /// Member name inside the package
        name: String,
    },
    /// Sequence of elements (`[]T`)
    Sequence {
        /// Element type
        element: Box<TypeExpr>,
    },
    /// Fixed-length array (`[N]T`); the length is kept as written
    Array {
        /// Length expression
        len: String,
        /// Element type
        element: Box<TypeExpr>,
    },
    /// Trailing variadic parameter (`...T`)
    Variadic {
        /// Element type
        element: Box<TypeExpr>,
    },
    /// Pointer to a type (`*T`)
    Pointer {
        /// Pointee type
        element: Box<TypeExpr>,
    },
    /// Map from key to value (`map[K]V`)
    Map {
        /// Key type
        key: Box<TypeExpr>,
        /// Value type
        value: Box<TypeExpr>,
    },
}

impl TypeExpr {
    /// Create a named type
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named { name: name.into() }
    }

    /// Create a qualified type
    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Create a sequence type
    pub fn sequence(element: TypeExpr) -> Self {
        Self::Sequence {
            element: Box::new(element),
        }
    }

    /// Create an array type
    pub fn array(len: impl Into<String>, element: TypeExpr) -> Self {
        Self::Array {
            len: len.into(),
            element: Box::new(element),
        }
    }

    /// Create a variadic type
    pub fn variadic(element: TypeExpr) -> Self {
        Self::Variadic {
            element: Box::new(element),
        }
    }

    /// Create a pointer type
    pub fn pointer(element: TypeExpr) -> Self {
        Self::Pointer {
            element: Box::new(element),
        }
    }

    /// Create a map type
    pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Check if this is a variadic type
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic { .. })
    }

    /// The type a value of this shape is stored as.
    ///
    /// A variadic parameter arrives as a sequence, everything else is stored
    /// unchanged.
    pub fn storage(&self) -> TypeExpr {
        if let Self::Variadic { element } = self {
            return Self::Sequence {
                element: element.clone(),
            };
        }
        self.clone()
    }

    /// Derive the lowercase base name used for unnamed values.
    ///
    /// Returns `None` when the type carries no usable identifier.
    pub fn base_name(&self) -> Option<String> {
        match self {
            Self::Named { name } if name == "error" => Some("err".to_string()),
            Self::Named { name } => is_identifier(name).then(|| lower_first(name)),
            Self::Qualified { name, .. } => is_identifier(name).then(|| lower_first(name)),
            Self::Sequence { element } | Self::Array { element, .. } => element
                .base_name()
                .map(|base| with_marker(base, SEQUENCE_MARKER)),
            Self::Variadic { element } => element
                .base_name()
                .map(|base| format!("{base}{VARIADIC_MARKER}")),
            Self::Pointer { element } => element.base_name(),
            Self::Map { value, .. } => value.base_name().map(|base| with_marker(base, MAP_MARKER)),
        }
    }

    /// Collect the namespaces referenced anywhere inside this type
    pub fn namespaces(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_namespaces(&mut out);
        out
    }

    fn collect_namespaces<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Self::Qualified { namespace, .. } = self {
            out.push(namespace.as_str());
        }
        for child in self.children() {
            child.collect_namespaces(out);
        }
    }

    fn children(&self) -> Vec<&TypeExpr> {
        if let Self::Map { key, value } = self {
            return vec![key.as_ref(), value.as_ref()];
        }
        self.element().into_iter().collect()
    }

    fn element(&self) -> Option<&TypeExpr> {
        if let Self::Sequence { element }
        | Self::Array { element, .. }
        | Self::Variadic { element }
        | Self::Pointer { element } = self
        {
            return Some(element.as_ref());
        }
        None
    }
}

fn with_marker(base: String, marker: &str) -> String {
    if base.ends_with(marker) {
        base
    } else {
        base + marker
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name } => write!(f, "{name}"),
            Self::Qualified { namespace, name } => write!(f, "{namespace}.{name}"),
            Self::Sequence { element } => write!(f, "[]{element}"),
            Self::Array { len, element } => write!(f, "[{len}]{element}"),
            Self::Variadic { element } => write!(f, "...{element}"),
            Self::Pointer { element } => write!(f, "*{element}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
        }
    }
}
