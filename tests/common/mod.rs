//! Shared helpers for integration tests
//!
//! [`Interpreter`] executes a synthesized declaration tree with Go semantics
//! close enough to check what a fake does at run time: value copies of
//! records, maps shared by reference, zero values on missing keys, and
//! read/write locks that panic when misused.

#![allow(dead_code)]

use fakegen::synth::{Decl, Expr, FuncDecl, Stmt, StructDecl};
use fakegen::{GeneratedFile, GeneratorConfig, TypeExpr, from_sources};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

pub const RUNNER_SOURCE: &str = r#"package runner

import "time"

// Runner runs a distance.
type Runner interface {
	Run(distance int) (time.Duration, error)
}
"#;

/// Generate the fake for `contract` from a single source file
pub fn generate_one(source: &str, contract: &str) -> GeneratedFile {
    let output = from_sources(&[("source.go", source)], GeneratorConfig::default())
        .expect("generation succeeds");
    assert!(
        !output.has_errors(),
        "unexpected diagnostics: {:?}",
        output.diagnostics
    );
    output
        .file(contract)
        .cloned()
        .unwrap_or_else(|| panic!("no fake generated for {contract}"))
}

#[derive(Debug, Default)]
pub struct LockState {
    writer: bool,
    readers: usize,
}

pub struct MapData {
    entries: RefCell<BTreeMap<i64, Value>>,
    zero: Value,
}

pub type Callback = Rc<dyn Fn(Value) -> Value>;

#[derive(Clone)]
pub enum Value {
    Nil,
    Int(i64),
    Bool(bool),
    Str(String),
    Slice(Vec<Value>),
    Record(BTreeMap<String, Value>),
    Map(Option<Rc<MapData>>),
    Object(Rc<RefCell<BTreeMap<String, Value>>>),
    Mutex(Rc<RefCell<LockState>>),
    Func(Callback),
}

impl Value {
    pub fn func(f: impl Fn(Value) -> Value + 'static) -> Self {
        Value::Func(Rc::new(f))
    }

    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn field(&self, name: &str) -> Value {
        match self {
            Value::Record(fields) => fields
                .get(name)
                .cloned()
                .unwrap_or_else(|| panic!("record has no field {name}")),
            Value::Object(object) => object
                .borrow()
                .get(name)
                .cloned()
                .unwrap_or_else(|| panic!("object has no field {name}")),
            other => panic!("cannot select {name} from {other:?}"),
        }
    }

    pub fn with_field(&self, name: &str, value: Value) -> Value {
        match self {
            Value::Record(fields) => {
                let mut fields = fields.clone();
                assert!(fields.contains_key(name), "record has no field {name}");
                fields.insert(name.to_string(), value);
                Value::Record(fields)
            }
            other => panic!("cannot set {name} on {other:?}"),
        }
    }

    pub fn as_int(&self) -> i64 {
        match self {
            Value::Int(value) => *value,
            other => panic!("expected int, got {other:?}"),
        }
    }

    pub fn map_len(&self) -> usize {
        match self {
            Value::Map(Some(data)) => data.entries.borrow().len(),
            Value::Map(None) => 0,
            other => panic!("expected map, got {other:?}"),
        }
    }

    pub fn map_get(&self, key: i64) -> Option<Value> {
        match self {
            Value::Map(Some(data)) => data.entries.borrow().get(&key).cloned(),
            Value::Map(None) => None,
            other => panic!("expected map, got {other:?}"),
        }
    }

    fn is_locked(&self) -> bool {
        match self {
            Value::Mutex(state) => {
                let state = state.borrow();
                state.writer || state.readers > 0
            }
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Slice(a), Value::Slice(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Map(None), Value::Map(None)) => true,
            (Value::Map(Some(a)), Value::Map(Some(b))) => *a.entries.borrow() == *b.entries.borrow(),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Mutex(a), Value::Mutex(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Bool(value) => write!(f, "{value}"),
            Value::Str(value) => write!(f, "{value:?}"),
            Value::Slice(items) => f.debug_list().entries(items).finish(),
            Value::Record(fields) => f.debug_map().entries(fields).finish(),
            Value::Map(None) => write!(f, "map(nil)"),
            Value::Map(Some(data)) => f.debug_map().entries(data.entries.borrow().iter()).finish(),
            Value::Object(_) => write!(f, "&object"),
            Value::Mutex(state) => write!(f, "{:?}", state.borrow()),
            Value::Func(_) => write!(f, "func"),
        }
    }
}

#[derive(Default)]
struct Frame {
    locals: HashMap<String, Value>,
}

enum Flow {
    Next,
    Return(Vec<Value>),
}

/// Executes synthesized declarations
pub struct Interpreter {
    decls: Vec<Decl>,
    lock_log: RefCell<Vec<String>>,
}

impl Interpreter {
    pub fn new(decls: Vec<Decl>) -> Self {
        Self {
            decls,
            lock_log: RefCell::new(Vec::new()),
        }
    }

    pub fn from_file(file: &GeneratedFile) -> Self {
        Self::new(file.decls.clone())
    }

    /// Lock operations performed so far, as `field.Op`
    pub fn lock_log(&self) -> Vec<String> {
        self.lock_log.borrow().clone()
    }

    pub fn clear_lock_log(&self) {
        self.lock_log.borrow_mut().clear();
    }

    /// Call a top-level function such as the constructor
    pub fn call_function(&self, name: &str, args: Vec<Value>) -> Vec<Value> {
        let func = self
            .decls
            .iter()
            .filter_map(Decl::as_func)
            .find(|f| f.receiver.is_none() && f.name == name)
            .unwrap_or_else(|| panic!("no function {name}"));
        self.invoke(func, None, args)
    }

    /// Call a method on a fake; panics if a lock is still held afterwards
    pub fn call(&self, fake: &Value, method: &str, args: Vec<Value>) -> Vec<Value> {
        let func = self
            .decls
            .iter()
            .filter_map(Decl::as_func)
            .find(|f| f.receiver.is_some() && f.name == method)
            .unwrap_or_else(|| panic!("no method {method}"));
        let results = self.invoke(func, Some(fake.clone()), args);

        if let Value::Object(object) = fake {
            for (name, value) in object.borrow().iter() {
                assert!(!value.is_locked(), "{name} still locked after {method}");
            }
        }
        results
    }

    fn structure(&self, name: &str) -> Option<&StructDecl> {
        self.decls
            .iter()
            .filter_map(Decl::as_struct)
            .find(|s| s.name == name)
    }

    pub fn zero(&self, ty: &TypeExpr) -> Value {
        match ty {
            TypeExpr::Named { name } => match name.as_str() {
                "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16"
                | "uint32" | "uint64" | "byte" | "rune" => Value::Int(0),
                "bool" => Value::Bool(false),
                "string" => Value::str(""),
                other => match self.structure(other) {
                    Some(decl) => Value::Record(self.zero_fields(decl)),
                    None => Value::Nil,
                },
            },
            TypeExpr::Qualified { namespace, name } => match (namespace.as_str(), name.as_str()) {
                ("sync", "RWMutex") => Value::Mutex(Rc::new(RefCell::new(LockState::default()))),
                ("time", "Duration") => Value::Int(0),
                _ => Value::Nil,
            },
            TypeExpr::Sequence { .. } | TypeExpr::Variadic { .. } => Value::Slice(Vec::new()),
            TypeExpr::Array { len, element } => {
                let len: usize = len.parse().unwrap_or_else(|_| panic!("array length {len}"));
                Value::Slice(vec![self.zero(element); len])
            }
            TypeExpr::Map { .. } => Value::Map(None),
            TypeExpr::Pointer { .. } => Value::Nil,
        }
    }

    fn zero_fields(&self, decl: &StructDecl) -> BTreeMap<String, Value> {
        decl.fields()
            .map(|field| (field.name.clone(), self.zero(&field.ty)))
            .collect()
    }

    fn invoke(&self, func: &FuncDecl, receiver: Option<Value>, args: Vec<Value>) -> Vec<Value> {
        let mut frame = Frame::default();
        if let (Some(field), Some(value)) = (&func.receiver, receiver) {
            frame.locals.insert(field.name.clone(), value);
        }

        let mut args = args.into_iter();
        for param in &func.params {
            let value = if param.ty.is_variadic() {
                Value::Slice(args.by_ref().collect())
            } else {
                args.next()
                    .unwrap_or_else(|| panic!("missing argument {}", param.name))
            };
            frame.locals.insert(param.name.clone(), value);
        }
        assert!(args.next().is_none(), "too many arguments for {}", func.name);

        for result in func.results.iter().filter(|r| !r.name.is_empty()) {
            frame.locals.insert(result.name.clone(), self.zero(&result.ty));
        }

        match self.exec_block(&func.body, &mut frame) {
            Flow::Return(values) => values,
            Flow::Next => {
                assert!(
                    func.results.is_empty(),
                    "{} fell off the end without returning",
                    func.name
                );
                Vec::new()
            }
        }
    }

    fn exec_block(&self, body: &[Stmt], frame: &mut Frame) -> Flow {
        for stmt in body {
            if let Flow::Return(values) = self.exec(stmt, frame) {
                return Flow::Return(values);
            }
        }
        Flow::Next
    }

    fn exec(&self, stmt: &Stmt, frame: &mut Frame) -> Flow {
        match stmt {
            Stmt::Define { names, value } => match names.as_slice() {
                [name] => {
                    let value = self.eval(value, frame);
                    frame.locals.insert(name.clone(), value);
                }
                [name, ok] => {
                    let (value, found) = self.lookup(value, frame);
                    frame.locals.insert(name.clone(), value);
                    frame.locals.insert(ok.clone(), Value::Bool(found));
                }
                _ => panic!("unsupported define of {names:?}"),
            },
            Stmt::Assign { target, value } => {
                let value = self.eval(value, frame);
                self.assign(target, value, frame);
            }
            Stmt::Increment(target) => {
                let value = self.eval(target, frame).as_int();
                self.assign(target, Value::Int(value + 1), frame);
            }
            Stmt::Expr(value) => {
                self.eval(value, frame);
            }
            Stmt::Return(values) => {
                return Flow::Return(values.iter().map(|v| self.eval(v, frame)).collect());
            }
            Stmt::If { cond, then } => {
                if self.eval(cond, frame) == Value::Bool(true) {
                    return self.exec_block(then, frame);
                }
            }
            Stmt::Range { value, over, body } => {
                let Value::Slice(items) = self.eval(over, frame) else {
                    panic!("range over non-slice");
                };
                for item in items {
                    frame.locals.insert(value.clone(), item);
                    if let Flow::Return(values) = self.exec_block(body, frame) {
                        return Flow::Return(values);
                    }
                }
            }
        }
        Flow::Next
    }

    /// Comma-ok map lookup
    fn lookup(&self, value: &Expr, frame: &mut Frame) -> (Value, bool) {
        let Expr::Index { base, index } = value else {
            panic!("comma-ok define of non-index expression");
        };
        let key = self.eval(index, frame).as_int();
        let Value::Map(Some(data)) = self.eval(base, frame) else {
            panic!("lookup in a nil map or non-map");
        };
        let found = data.entries.borrow().get(&key).cloned();
        match found {
            Some(found) => (found, true),
            None => (data.zero.clone(), false),
        }
    }

    fn assign(&self, target: &Expr, value: Value, frame: &mut Frame) {
        match target {
            Expr::Ident(name) => {
                frame.locals.insert(name.clone(), value);
            }
            Expr::Selector { base, field } => {
                if let Expr::Ident(name) = base.as_ref() {
                    if let Some(Value::Record(fields)) = frame.locals.get_mut(name) {
                        assert!(fields.contains_key(field), "record has no field {field}");
                        fields.insert(field.clone(), value);
                        return;
                    }
                }
                match self.eval(base, frame) {
                    Value::Object(object) => {
                        object.borrow_mut().insert(field.clone(), value);
                    }
                    other => panic!("cannot assign {field} on {other:?}"),
                }
            }
            Expr::Index { base, index } => {
                let key = self.eval(index, frame).as_int();
                match self.eval(base, frame) {
                    Value::Map(Some(data)) => {
                        data.entries.borrow_mut().insert(key, value);
                    }
                    Value::Map(None) => panic!("assignment to entry in nil map"),
                    other => panic!("cannot index {other:?}"),
                }
            }
            other => panic!("cannot assign to {other:?}"),
        }
    }

    fn eval(&self, value: &Expr, frame: &mut Frame) -> Value {
        match value {
            Expr::Ident(name) => frame
                .locals
                .get(name)
                .cloned()
                .unwrap_or_else(|| panic!("undefined: {name}")),
            Expr::Selector { base, field } => self.eval(base, frame).field(field),
            Expr::Index { base, index } => {
                let key = self.eval(index, frame).as_int();
                let Value::Map(Some(data)) = self.eval(base, frame) else {
                    panic!("cannot index a nil map or non-map");
                };
                let found = data.entries.borrow().get(&key).cloned();
                found.unwrap_or_else(|| data.zero.clone())
            }
            Expr::Call { func, args } => self.eval_call(func, args, frame),
            Expr::Int(value) => Value::Int(*value),
            Expr::Bool(value) => Value::Bool(*value),
            Expr::Not(operand) => match self.eval(operand, frame) {
                Value::Bool(value) => Value::Bool(!value),
                other => panic!("cannot negate {other:?}"),
            },
            Expr::AddressOf(operand) => match operand.as_ref() {
                Expr::Composite(ty) => match self.zero(ty) {
                    Value::Record(fields) => Value::Object(Rc::new(RefCell::new(fields))),
                    other => panic!("cannot take address of {other:?}"),
                },
                other => panic!("cannot take address of {other:?}"),
            },
            Expr::Composite(ty) => self.zero(ty),
            Expr::Make(ty) => match ty {
                TypeExpr::Map { value, .. } => Value::Map(Some(Rc::new(MapData {
                    entries: RefCell::new(BTreeMap::new()),
                    zero: self.zero(value),
                }))),
                other => panic!("cannot make {other}"),
            },
        }
    }

    fn eval_call(&self, func: &Expr, args: &[Expr], frame: &mut Frame) -> Value {
        if let Expr::Selector { base, field: op } = func {
            if let Value::Mutex(state) = self.eval(base, frame) {
                let name = match base.as_ref() {
                    Expr::Selector { field, .. } => field.clone(),
                    _ => "mutex".to_string(),
                };
                self.lock_log.borrow_mut().push(format!("{name}.{op}"));
                let mut state = state.borrow_mut();
                match op.as_str() {
                    "Lock" => {
                        assert!(!state.writer && state.readers == 0, "{name} already locked");
                        state.writer = true;
                    }
                    "Unlock" => {
                        assert!(state.writer, "{name} unlocked while not write-locked");
                        state.writer = false;
                    }
                    "RLock" => {
                        assert!(!state.writer, "{name} read-locked while write-locked");
                        state.readers += 1;
                    }
                    "RUnlock" => {
                        assert!(state.readers > 0, "{name} read-unlocked while not read-locked");
                        state.readers -= 1;
                    }
                    other => panic!("unknown mutex operation {other}"),
                }
                return Value::Nil;
            }
        }

        match self.eval(func, frame) {
            Value::Func(callback) => {
                let [arg] = args else {
                    panic!("callbacks take one argument");
                };
                let arg = self.eval(arg, frame);
                callback(arg)
            }
            other => panic!("cannot call {other:?}"),
        }
    }
}
