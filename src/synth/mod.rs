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

//! Fake synthesis
//!
//! Builds the declaration tree of a thread-safe, inspectable fake for one
//! resolved contract. For a contract `Runner` with a method `Run` this is:
//!
//! - the state struct `Runner` holding, per method, a map of call records,
//!   a read/write lock and a call counter;
//! - the record struct `RunnerRunMethod` (arguments, `Called`, results);
//! - the constructor `NewRunner`;
//! - the operations `Run`, `RunReturns`, `RunGetArgs`, `RunForCall` and the
//!   callback type `RunnerRunFunc`.
//!
//! Record 0 doubles as the default: results configured by `RunReturns` are
//! returned by every call that has no record of its own.

pub mod decl;

pub use decl::{Decl, Expr, Field, FuncDecl, FuncTypeDecl, Stmt, StructDecl};

use crate::error::{FakegenError, Result};
use crate::model::{Contract, Method, Role, TypeExpr, Value};
use crate::naming::{lower_first, upper_first};
use rustc_hash::FxHashSet;

/// Receiver identifier of every generated method
pub const RECEIVER: &str = "fake";
/// Local holding the record being read or written
pub const RECORD_VAR: &str = "fakeMethod";
/// Record field set by every invocation
pub const CALLED_FIELD: &str = "Called";

const OK_VAR: &str = "ok";
const CALL_PARAM: &str = "call";
const FNS_PARAM: &str = "fns";
const FN_VAR: &str = "fn";

/// Synthesize the declarations of a fake for a resolved contract.
///
/// Fails with [`FakegenError::UnnamedValue`] when a value was never resolved
/// and with [`FakegenError::NameCollision`] when two generated identifiers
/// would clash.
pub fn synthesize(contract: &Contract) -> Result<Vec<Decl>> {
    let plans = contract
        .methods
        .iter()
        .map(|method| MethodPlan::new(&contract.name, method))
        .collect::<Result<Vec<_>>>()?;

    check_names(&contract.name, &plans)?;

    let mut decls = Vec::with_capacity(2 + plans.len() * 6);
    decls.push(Decl::Struct(state_struct(&contract.name, &plans)));
    decls.extend(plans.iter().map(|plan| Decl::Struct(plan.record_struct())));
    decls.push(Decl::Func(constructor(&contract.name, &plans)));

    for plan in &plans {
        decls.push(Decl::Func(plan.invocation()));
        decls.push(Decl::Func(plan.returns_setter()));
        decls.push(Decl::Func(plan.args_getter()));
        decls.push(Decl::FuncType(plan.callback_type()));
        decls.push(Decl::Func(plan.for_call()));
    }

    log::debug!(
        "synthesized fake {} with {} declaration(s)",
        contract.name,
        decls.len()
    );
    Ok(decls)
}

/// A value with its generated identifiers
#[derive(Debug, Clone)]
struct Binding {
    /// Parameter or named result identifier (`distanceArg`)
    ident: String,
    /// Record field (`DistanceArg`)
    field: String,
    /// Declared type
    ty: TypeExpr,
}

impl Binding {
    fn new(method: &str, index: usize, value: &Value, role: Role) -> Result<Self> {
        let ident = value
            .binding(role)
            .ok_or_else(|| FakegenError::UnnamedValue {
                method: method.to_string(),
                role,
                position: index + 1,
            })?;
        Ok(Self {
            field: upper_first(&ident),
            ident,
            ty: value.ty.clone(),
        })
    }

    fn bindings(method: &str, values: &[Value], role: Role) -> Result<Vec<Self>> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| Self::new(method, index, value, role))
            .collect()
    }
}

/// Generated identifiers of one method
#[derive(Debug)]
struct MethodPlan {
    contract: String,
    method: String,
    record: String,
    callback: String,
    map_field: String,
    mutex_field: String,
    calls_field: String,
    args: Vec<Binding>,
    rets: Vec<Binding>,
}

impl MethodPlan {
    fn new(contract: &str, method: &Method) -> Result<Self> {
        let local = lower_first(&method.name);
        Ok(Self {
            contract: contract.to_string(),
            method: method.name.clone(),
            record: format!("{contract}{}Method", method.name),
            callback: format!("{contract}{}Func", method.name),
            map_field: format!("{local}Method"),
            mutex_field: format!("{local}Mutex"),
            calls_field: format!("{local}Calls"),
            args: Binding::bindings(&method.name, &method.args, Role::Arg)?,
            rets: Binding::bindings(&method.name, &method.rets, Role::Result)?,
        })
    }

    fn returns_name(&self) -> String {
        format!("{}Returns", self.method)
    }

    fn getter_name(&self) -> String {
        format!("{}GetArgs", self.method)
    }

    fn for_call_name(&self) -> String {
        format!("{}ForCall", self.method)
    }

    fn receiver(&self) -> Field {
        Field::new(RECEIVER, state_pointer(&self.contract))
    }

    fn state_field(&self, field: &str) -> Expr {
        Expr::selector(Expr::ident(RECEIVER), field)
    }

    fn records(&self) -> Expr {
        self.state_field(&self.map_field)
    }

    fn lock(&self, method: &str) -> Stmt {
        Stmt::call(
            Expr::selector(self.state_field(&self.mutex_field), method),
            Vec::new(),
        )
    }

    fn record_struct(&self) -> StructDecl {
        let mut groups = Vec::with_capacity(2);
        if !self.args.is_empty() {
            groups.push(
                self.args
                    .iter()
                    .map(|arg| Field::new(arg.field.as_str(), arg.ty.storage()))
                    .collect(),
            );
        }

        let mut tail = Vec::with_capacity(self.rets.len() + 1);
        tail.push(Field::new(CALLED_FIELD, TypeExpr::named("bool")));
        tail.extend(
            self.rets
                .iter()
                .map(|ret| Field::new(ret.field.as_str(), ret.ty.clone())),
        );
        groups.push(tail);

        StructDecl {
            name: self.record.clone(),
            groups,
        }
    }

    fn invocation(&self) -> FuncDecl {
        let record = || Expr::ident(RECORD_VAR);
        let current = || self.state_field(&self.calls_field);

        let mut body = vec![
            self.lock("Lock"),
            Stmt::define(
                [RECORD_VAR, OK_VAR],
                Expr::index(self.records(), current()),
            ),
            Stmt::If {
                cond: Expr::not(Expr::ident(OK_VAR)),
                then: vec![Stmt::assign(
                    record(),
                    Expr::index(self.records(), Expr::Int(0)),
                )],
            },
        ];
        body.extend(self.args.iter().map(|arg| {
            Stmt::assign(
                Expr::selector(record(), arg.field.as_str()),
                Expr::ident(arg.ident.as_str()),
            )
        }));
        body.push(Stmt::assign(
            Expr::selector(record(), CALLED_FIELD),
            Expr::Bool(true),
        ));
        body.push(Stmt::assign(Expr::index(self.records(), current()), record()));
        body.push(Stmt::Increment(current()));
        body.push(self.lock("Unlock"));
        if !self.rets.is_empty() {
            body.push(Stmt::Return(
                self.rets
                    .iter()
                    .map(|ret| Expr::selector(record(), ret.field.as_str()))
                    .collect(),
            ));
        }

        FuncDecl {
            receiver: Some(self.receiver()),
            name: self.method.clone(),
            params: fields(&self.args),
            results: fields(&self.rets),
            body,
        }
    }

    fn returns_setter(&self) -> FuncDecl {
        let record = || Expr::ident(RECORD_VAR);

        let mut body = vec![
            self.lock("Lock"),
            Stmt::define([RECORD_VAR], Expr::index(self.records(), Expr::Int(0))),
        ];
        body.extend(self.rets.iter().map(|ret| {
            Stmt::assign(
                Expr::selector(record(), ret.field.as_str()),
                Expr::ident(ret.ident.as_str()),
            )
        }));
        body.push(Stmt::assign(
            Expr::index(self.records(), Expr::Int(0)),
            record(),
        ));
        body.push(self.lock("Unlock"));
        body.push(Stmt::Return(vec![Expr::ident(RECEIVER)]));

        FuncDecl {
            receiver: Some(self.receiver()),
            name: self.returns_name(),
            params: fields(&self.rets),
            results: vec![Field::new("", state_pointer(&self.contract))],
            body,
        }
    }

    fn args_getter(&self) -> FuncDecl {
        let mut body = vec![self.lock("RLock")];
        body.extend(self.args.iter().map(|arg| {
            Stmt::assign(
                Expr::ident(arg.ident.as_str()),
                Expr::selector(
                    Expr::index(self.records(), Expr::Int(0)),
                    arg.field.as_str(),
                ),
            )
        }));
        body.push(self.lock("RUnlock"));
        if !self.args.is_empty() {
            body.push(Stmt::Return(
                self.args
                    .iter()
                    .map(|arg| Expr::ident(arg.ident.as_str()))
                    .collect(),
            ));
        }

        FuncDecl {
            receiver: Some(self.receiver()),
            name: self.getter_name(),
            params: Vec::new(),
            results: self
                .args
                .iter()
                .map(|arg| Field::new(arg.ident.as_str(), arg.ty.storage()))
                .collect(),
            body,
        }
    }

    fn callback_type(&self) -> FuncTypeDecl {
        FuncTypeDecl {
            name: self.callback.clone(),
            params: vec![TypeExpr::named(self.record.as_str())],
            results: vec![TypeExpr::named(self.record.as_str())],
        }
    }

    fn for_call(&self) -> FuncDecl {
        let at_call = || Expr::index(self.records(), Expr::ident(CALL_PARAM));

        let body = vec![
            self.lock("Lock"),
            Stmt::Range {
                value: FN_VAR.to_string(),
                over: Expr::ident(FNS_PARAM),
                body: vec![
                    Stmt::define([RECORD_VAR], at_call()),
                    Stmt::assign(
                        at_call(),
                        Expr::call(Expr::ident(FN_VAR), vec![Expr::ident(RECORD_VAR)]),
                    ),
                ],
            },
            self.lock("Unlock"),
            Stmt::Return(vec![Expr::ident(RECEIVER)]),
        ];

        FuncDecl {
            receiver: Some(self.receiver()),
            name: self.for_call_name(),
            params: vec![
                Field::new(CALL_PARAM, TypeExpr::named("int")),
                Field::new(
                    FNS_PARAM,
                    TypeExpr::variadic(TypeExpr::named(self.callback.as_str())),
                ),
            ],
            results: vec![Field::new("", state_pointer(&self.contract))],
            body,
        }
    }
}

fn fields(bindings: &[Binding]) -> Vec<Field> {
    bindings
        .iter()
        .map(|binding| Field::new(binding.ident.as_str(), binding.ty.clone()))
        .collect()
}

fn state_pointer(contract: &str) -> TypeExpr {
    TypeExpr::pointer(TypeExpr::named(contract))
}

fn state_struct(contract: &str, plans: &[MethodPlan]) -> StructDecl {
    let fields = plans
        .iter()
        .flat_map(|plan| {
            [
                Field::new(
                    plan.map_field.as_str(),
                    TypeExpr::map(TypeExpr::named("int"), TypeExpr::named(plan.record.as_str())),
                ),
                Field::new(
                    plan.mutex_field.as_str(),
                    TypeExpr::qualified("sync", "RWMutex"),
                ),
                Field::new(plan.calls_field.as_str(), TypeExpr::named("int")),
            ]
        })
        .collect();

    StructDecl {
        name: contract.to_string(),
        groups: vec![fields],
    }
}

fn constructor(contract: &str, plans: &[MethodPlan]) -> FuncDecl {
    let mut body = vec![Stmt::define(
        [RECEIVER],
        Expr::address_of(Expr::Composite(TypeExpr::named(contract))),
    )];
    body.extend(plans.iter().map(|plan| {
        Stmt::assign(
            plan.records(),
            Expr::Make(TypeExpr::map(
                TypeExpr::named("int"),
                TypeExpr::named(plan.record.as_str()),
            )),
        )
    }));
    body.push(Stmt::Return(vec![Expr::ident(RECEIVER)]));

    FuncDecl {
        receiver: None,
        name: constructor_name(contract),
        params: Vec::new(),
        results: vec![Field::new("", state_pointer(contract))],
        body,
    }
}

/// Name of the constructor generated for a contract
pub fn constructor_name(contract: &str) -> String {
    format!("New{contract}")
}

/// Claim every generated identifier once, per namespace
fn check_names(contract: &str, plans: &[MethodPlan]) -> Result<()> {
    let collision = |name: &str| FakegenError::NameCollision {
        contract: contract.to_string(),
        name: name.to_string(),
    };

    // Package-level identifiers
    let mut top_level: FxHashSet<String> = FxHashSet::default();
    let claim = |set: &mut FxHashSet<String>, name: String| {
        if set.insert(name.clone()) {
            Ok(())
        } else {
            Err(collision(&name))
        }
    };
    claim(&mut top_level, contract.to_string())?;
    claim(&mut top_level, constructor_name(contract))?;

    // Fields and methods of the state type share one selector namespace
    let mut members: FxHashSet<String> = FxHashSet::default();

    for plan in plans {
        claim(&mut top_level, plan.record.clone())?;
        claim(&mut top_level, plan.callback.clone())?;

        for name in [
            plan.map_field.clone(),
            plan.mutex_field.clone(),
            plan.calls_field.clone(),
            plan.method.clone(),
            plan.returns_name(),
            plan.getter_name(),
            plan.for_call_name(),
        ] {
            claim(&mut members, name)?;
        }

        let mut record_fields: FxHashSet<String> = FxHashSet::default();
        claim(&mut record_fields, CALLED_FIELD.to_string())?;
        for binding in plan.args.iter().chain(&plan.rets) {
            claim(&mut record_fields, binding.field.clone())?;
        }
    }

    Ok(())
}
