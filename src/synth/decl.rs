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

//! Declaration tree of a synthesized fake
//!
//! A deliberately small subset of Go: struct and function types, functions
//! and methods, and the handful of statements and expressions the fake's
//! operations are made of.

use crate::model::TypeExpr;

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// `type Name struct { ... }`
    Struct(StructDecl),
    /// `type Name func(...) ...`
    FuncType(FuncTypeDecl),
    /// Function or method
    Func(FuncDecl),
}

impl Decl {
    /// Declared identifier
    pub fn name(&self) -> &str {
        match self {
            Decl::Struct(decl) => &decl.name,
            Decl::FuncType(decl) => &decl.name,
            Decl::Func(decl) => &decl.name,
        }
    }

    /// Check whether the name is declared at package level, that is
    /// everything except methods
    pub fn is_package_level(&self) -> bool {
        !matches!(self, Decl::Func(func) if func.receiver.is_some())
    }

    /// Return the struct declaration, if this is one
    pub fn as_struct(&self) -> Option<&StructDecl> {
        match self {
            Decl::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    /// Return the function declaration, if this is one
    pub fn as_func(&self) -> Option<&FuncDecl> {
        match self {
            Decl::Func(decl) => Some(decl),
            _ => None,
        }
    }
}

/// Named, typed slot: struct field, parameter or named result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Identifier
    pub name: String,
    /// Type
    pub ty: TypeExpr,
}

impl Field {
    /// Create a field
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Struct type declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    /// Type name
    pub name: String,
    /// Field groups, separated by a blank line when rendered
    pub groups: Vec<Vec<Field>>,
}

impl StructDecl {
    /// All fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.groups.iter().flatten()
    }

    /// Look up a field
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|field| field.name == name)
    }
}

/// Function type declaration with unnamed parameters and results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncTypeDecl {
    /// Type name
    pub name: String,
    /// Parameter types
    pub params: Vec<TypeExpr>,
    /// Result types
    pub results: Vec<TypeExpr>,
}

/// Function or method declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDecl {
    /// Method receiver
    pub receiver: Option<Field>,
    /// Function name
    pub name: String,
    /// Parameters
    pub params: Vec<Field>,
    /// Named results
    pub results: Vec<Field>,
    /// Function body
    pub body: Vec<Stmt>,
}

impl FuncDecl {
    /// Check whether this is a method of the given type
    pub fn is_method_of(&self, type_name: &str) -> bool {
        let Some(receiver) = &self.receiver else {
            return false;
        };
        match &receiver.ty {
            TypeExpr::Pointer { element } => {
                matches!(element.as_ref(), TypeExpr::Named { name } if name == type_name)
            }
            TypeExpr::Named { name } => name == type_name,
            _ => false,
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `a, b := value`
    Define {
        /// Declared identifiers
        names: Vec<String>,
        /// Assigned expression
        value: Expr,
    },
    /// `target = value`
    Assign {
        /// Assignment target
        target: Expr,
        /// Assigned expression
        value: Expr,
    },
    /// `target++`
    Increment(Expr),
    /// Expression statement, usually a call
    Expr(Expr),
    /// `return a, b`
    Return(Vec<Expr>),
    /// `if cond { ... }`
    If {
        /// Condition
        cond: Expr,
        /// Statements run when the condition holds
        then: Vec<Stmt>,
    },
    /// `for _, value := range over { ... }`
    Range {
        /// Element identifier
        value: String,
        /// Ranged expression
        over: Expr,
        /// Loop body
        body: Vec<Stmt>,
    },
}

impl Stmt {
    /// Create a define statement
    pub fn define<I, S>(names: I, value: Expr) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Define {
            names: names.into_iter().map(Into::into).collect(),
            value,
        }
    }

    /// Create an assignment
    pub fn assign(target: Expr, value: Expr) -> Self {
        Self::Assign { target, value }
    }

    /// Create a call statement
    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Self::Expr(Expr::call(func, args))
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Identifier
    Ident(String),
    /// `base.field`
    Selector {
        /// Operand
        base: Box<Expr>,
        /// Selected field or method
        field: String,
    },
    /// `base[index]`
    Index {
        /// Indexed operand
        base: Box<Expr>,
        /// Index
        index: Box<Expr>,
    },
    /// `func(args...)`
    Call {
        /// Callee
        func: Box<Expr>,
        /// Arguments
        args: Vec<Expr>,
    },
    /// Integer literal
    Int(i64),
    /// `true` or `false`
    Bool(bool),
    /// `!operand`
    Not(Box<Expr>),
    /// `&operand`
    AddressOf(Box<Expr>),
    /// Empty composite literal `T{}`
    Composite(TypeExpr),
    /// `make(T)`
    Make(TypeExpr),
}

impl Expr {
    /// Create an identifier
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    /// Create a selector
    pub fn selector(base: Expr, field: impl Into<String>) -> Self {
        Self::Selector {
            base: Box::new(base),
            field: field.into(),
        }
    }

    /// Create an index expression
    pub fn index(base: Expr, index: Expr) -> Self {
        Self::Index {
            base: Box::new(base),
            index: Box::new(index),
        }
    }

    /// Create a call
    pub fn call(func: Expr, args: Vec<Expr>) -> Self {
        Self::Call {
            func: Box::new(func),
            args,
        }
    }

    /// Create a negation
    pub fn not(operand: Expr) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Create an address-of expression
    pub fn address_of(operand: Expr) -> Self {
        Self::AddressOf(Box::new(operand))
    }

    /// Return the identifier, if this is one
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }
}
