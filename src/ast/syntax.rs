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

//! Type syntax as written in method signatures

use serde::Serialize;
use std::fmt;

/// A type as it appears in source, before package-local names are qualified
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeSyntax {
    /// Identifier (`int`, `Runner`), or an empty `interface{}` / `struct{}`
    Name {
        /// Identifier text
        name: String,
    },
    /// Package-qualified identifier (`time.Duration`)
    Qualified {
        /// Package name as written
        package: String,
        /// Exported identifier
        name: String,
    },
    /// Slice (`[]T`)
    Slice {
        /// Element type
        element: Box<TypeSyntax>,
    },
    /// Fixed-size array (`[N]T`)
    Array {
        /// Length expression as written
        len: String,
        /// Element type
        element: Box<TypeSyntax>,
    },
    /// Pointer (`*T`)
    Pointer {
        /// Pointee type
        element: Box<TypeSyntax>,
    },
    /// Map (`map[K]V`)
    Map {
        /// Key type
        key: Box<TypeSyntax>,
        /// Value type
        value: Box<TypeSyntax>,
    },
    /// Variadic parameter (`...T`)
    Variadic {
        /// Element type
        element: Box<TypeSyntax>,
    },
    /// Valid type that cannot be faked (`func()`, `chan T`, `List[T]`)
    Unsupported {
        /// Description of the construct
        construct: String,
        /// Source text of the type
        text: String,
    },
}

impl TypeSyntax {
    /// Create an identifier type
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name { name: name.into() }
    }

    /// Create a qualified type
    pub fn qualified(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Qualified {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Create a slice type
    pub fn slice(element: TypeSyntax) -> Self {
        Self::Slice {
            element: Box::new(element),
        }
    }

    /// Create a pointer type
    pub fn pointer(element: TypeSyntax) -> Self {
        Self::Pointer {
            element: Box::new(element),
        }
    }

    /// Create a map type
    pub fn map(key: TypeSyntax, value: TypeSyntax) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Create a variadic type
    pub fn variadic(element: TypeSyntax) -> Self {
        Self::Variadic {
            element: Box::new(element),
        }
    }

    /// Create an unsupported type
    pub fn unsupported(construct: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
            text: text.into(),
        }
    }

    /// First unsupported construct anywhere inside this type
    pub fn unsupported_part(&self) -> Option<(&str, &str)> {
        match self {
            Self::Unsupported { construct, text } => Some((construct.as_str(), text.as_str())),
            Self::Name { .. } | Self::Qualified { .. } => None,
            Self::Slice { element }
            | Self::Array { element, .. }
            | Self::Pointer { element }
            | Self::Variadic { element } => element.unsupported_part(),
            Self::Map { key, value } => key.unsupported_part().or_else(|| value.unsupported_part()),
        }
    }

    /// Check if this is a variadic type
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::Variadic { .. })
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name { name } => write!(f, "{name}"),
            Self::Qualified { package, name } => write!(f, "{package}.{name}"),
            Self::Slice { element } => write!(f, "[]{element}"),
            Self::Array { len, element } => write!(f, "[{len}]{element}"),
            Self::Pointer { element } => write!(f, "*{element}"),
            Self::Map { key, value } => write!(f, "map[{key}]{value}"),
            Self::Variadic { element } => write!(f, "...{element}"),
            Self::Unsupported { text, .. } => write!(f, "{text}"),
        }
    }
}
