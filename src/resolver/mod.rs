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

//! Name resolution for contract values
//!
//! Every argument and return value ends up with a binding that is unique in
//! its list. Declared names are kept. Unnamed values get a name derived from
//! their type plus the role suffix (`stringArg`, `errResult`); when such a
//! derived name occurs more than once, or clashes with a declared binding,
//! every occurrence is numbered from 1 in list order (`stringArg1`,
//! `stringArg2`).

use crate::error::{FakegenError, Result};
use crate::model::{Contract, Method, Role, Value, ValueList, ValueName};
use rustc_hash::{FxHashMap, FxHashSet};

/// Resolve one argument or return list of `method`
pub fn resolve_values(method: &str, values: &[Value], role: Role) -> Result<ValueList> {
    let mut explicit: FxHashSet<String> = FxHashSet::default();
    for value in values {
        if let ValueName::Explicit(name) = &value.name {
            let binding = format!("{name}{}", role.suffix());
            if !explicit.insert(binding) {
                return Err(FakegenError::DuplicateValue {
                    method: method.to_string(),
                    role,
                    name: name.clone(),
                });
            }
        }
    }

    let mut counts: FxHashMap<String, u32> = FxHashMap::default();
    let mut resolved = ValueList::with_capacity(values.len());
    for (position, value) in values.iter().enumerate() {
        let name = match &value.name {
            ValueName::Explicit(name) => ValueName::Explicit(name.clone()),
            ValueName::Derived(_) | ValueName::Missing => {
                let base = value
                    .ty
                    .base_name()
                    .ok_or_else(|| FakegenError::UnnamedValue {
                        method: method.to_string(),
                        role,
                        position: position + 1,
                    })?;
                let derived = format!("{base}{}", role.suffix());
                *counts.entry(derived.clone()).or_default() += 1;
                ValueName::Derived(derived)
            }
        };
        resolved.push(Value {
            name,
            ty: value.ty.clone(),
            index: None,
        });
    }

    let mut next_index: FxHashMap<String, u32> = FxHashMap::default();
    for value in resolved.iter_mut() {
        let ValueName::Derived(name) = &value.name else {
            continue;
        };
        if counts[name] < 2 && !explicit.contains(name) {
            continue;
        }
        let index = next_index.entry(name.clone()).or_default();
        loop {
            *index += 1;
            let candidate = format!("{name}{index}");
            if !explicit.contains(&candidate) && !counts.contains_key(&candidate) {
                break;
            }
        }
        value.index = Some(*index);
    }

    Ok(resolved)
}

/// Resolve both value lists of a method
pub fn resolve_method(method: &Method) -> Result<Method> {
    Ok(Method {
        name: method.name.clone(),
        args: resolve_values(&method.name, &method.args, Role::Arg)?,
        rets: resolve_values(&method.name, &method.rets, Role::Result)?,
    })
}

/// Resolve every method of a contract; the first failure aborts it
pub fn resolve_contract(contract: &Contract) -> Result<Contract> {
    let methods = contract
        .methods
        .iter()
        .map(resolve_method)
        .collect::<Result<Vec<_>>>()?;

    Ok(Contract {
        name: contract.name.clone(),
        methods,
        imports: contract.imports.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeExpr;
    use pretty_assertions::assert_eq;

    fn idents(values: &[Value], role: Role) -> Vec<String> {
        values
            .iter()
            .map(|v| v.binding(role).unwrap_or_default())
            .collect()
    }

    fn string() -> TypeExpr {
        TypeExpr::named("string")
    }

    #[test]
    fn test_repeated_types_are_numbered() {
        let values = [Value::unnamed(string()), Value::unnamed(string())];
        let resolved = resolve_values("Join", &values, Role::Arg).unwrap();
        assert_eq!(idents(&resolved, Role::Arg), vec!["stringArg1", "stringArg2"]);
        assert_eq!(resolved[0].index, Some(1));
    }

    #[test]
    fn test_sole_type_keeps_plain_name() {
        let values = [
            Value::unnamed(string()),
            Value::unnamed(TypeExpr::named("int")),
            Value::unnamed(TypeExpr::named("error")),
        ];
        let resolved = resolve_values("Do", &values, Role::Result).unwrap();
        assert_eq!(
            idents(&resolved, Role::Result),
            vec!["stringResult", "intResult", "errResult"]
        );
        assert!(resolved.iter().all(|v| v.index.is_none()));
    }

    #[test]
    fn test_numbering_is_list_global() {
        let values = [
            Value::unnamed(string()),
            Value::unnamed(TypeExpr::named("int")),
            Value::unnamed(string()),
            Value::unnamed(TypeExpr::sequence(string())),
        ];
        let resolved = resolve_values("Mix", &values, Role::Arg).unwrap();
        assert_eq!(
            idents(&resolved, Role::Arg),
            vec!["stringArg1", "intArg", "stringArg2", "stringArrArg"]
        );
    }

    #[test]
    fn test_derived_name_colliding_with_declared_binding() {
        let values = [
            Value::named("string", string()),
            Value::unnamed(string()),
        ];
        let resolved = resolve_values("Odd", &values, Role::Arg).unwrap();
        assert_eq!(idents(&resolved, Role::Arg), vec!["stringArg", "stringArg1"]);
    }

    #[test]
    fn test_explicit_names_are_kept() {
        let values = [Value::named("distance", TypeExpr::named("int"))];
        let resolved = resolve_values("Run", &values, Role::Arg).unwrap();
        assert_eq!(resolved[0].name, ValueName::Explicit("distance".to_string()));
        assert_eq!(idents(&resolved, Role::Arg), vec!["distanceArg"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let values = [Value::unnamed(string()), Value::unnamed(string())];
        let once = resolve_values("Join", &values, Role::Arg).unwrap();
        let twice = resolve_values("Join", &once, Role::Arg).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_errors() {
        let unnamed = [Value::unnamed(TypeExpr::named(""))];
        assert_eq!(
            resolve_values("Do", &unnamed, Role::Arg),
            Err(FakegenError::UnnamedValue {
                method: "Do".to_string(),
                role: Role::Arg,
                position: 1,
            })
        );

        let duplicate = [
            Value::named("a", string()),
            Value::named("a", TypeExpr::named("int")),
        ];
        assert!(matches!(
            resolve_values("Do", &duplicate, Role::Result),
            Err(FakegenError::DuplicateValue { .. })
        ));
    }

    #[test]
    fn test_lists_are_independent() {
        let method = Method::new(
            "Copy",
            [Value::unnamed(string())],
            [Value::unnamed(string())],
        );
        let resolved = resolve_method(&method).unwrap();
        assert_eq!(idents(&resolved.args, Role::Arg), vec!["stringArg"]);
        assert_eq!(idents(&resolved.rets, Role::Result), vec!["stringResult"]);
    }
}
