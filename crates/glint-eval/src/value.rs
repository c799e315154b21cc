// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::rc::Rc;

use glint_ast::{Block, Identifier};
use indexmap::IndexMap;

use crate::builtins::Builtin;
use crate::environment::Environment;
use crate::hashkey::HashKey;

/// A closure: its parameter list, body, and the environment it was
/// defined in (§3.3 `FUNCTION`, §4.6 "capture the current environment by
/// reference"). Wrapped in `Rc` so cloning a `Value::Function` is cheap
/// and two closures compare equal only when they are the same closure.
#[derive(Debug)]
pub struct FunctionData {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub env: Environment,
}

/// The closed set of runtime value variants (§3.3).
///
/// `Array` and `Map` are reference-counted and never mutated in place —
/// `push`/`pop` and map-literal evaluation always build a fresh
/// collection, so sharing a `Value` by cloning the `Rc` is always safe
/// (§5, "Memory model").
#[derive(Debug, Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Str(String),
    Null,
    Array(Rc<Vec<Value>>),
    Map(Rc<IndexMap<HashKey, (Value, Value)>>),
    Function(Rc<FunctionData>),
    Builtin(Builtin),
    /// Control value: wraps the operand of a `return` until a function
    /// call site or the top-level program unwraps it (§3.3, §4.6).
    Return(Box<Value>),
    /// Control value: a runtime error message. Never stored in an
    /// environment, always propagated until something prints it.
    Error(String),
}

impl Value {
    pub const TRUE: Value = Value::Boolean(true);
    pub const FALSE: Value = Value::Boolean(false);

    /// The stable type tag used in user-visible error strings (§3.3).
    pub fn type_tag(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Str(_) => "STRING",
            Value::Null => "NULL",
            Value::Array(_) => "ARRAY",
            Value::Map(_) => "MAP",
            Value::Function(_) => "FUNCTION",
            Value::Builtin(_) => "BUILTIN_FUNCTION",
            Value::Return(_) => "RETURN",
            Value::Error(_) => "ERROR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// "Truthy" per the glossary: everything except `false` and `null`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Boolean(false) | Value::Null)
    }

    /// The host-visible rendering used by the REPL and by `prints` (§3.3
    /// `Inspect()` column).
    pub fn inspect(&self) -> String {
        match self {
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Str(s) => s.clone(),
            Value::Null => "null".to_string(),
            Value::Array(elems) => {
                let parts: Vec<String> = elems.iter().map(Value::inspect).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(pairs) => {
                let parts: Vec<String> =
                    pairs.values().map(|(k, v)| format!("{}: {}", k.inspect(), v.inspect())).collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Function(data) => {
                let params: Vec<String> = data.parameters.iter().map(|p| p.name.clone()).collect();
                format!("fn({}) {{\n{}\n}}", params.join(", "), data.body)
            }
            Value::Builtin(_) => "builtin function".to_string(),
            Value::Return(inner) => inner.inspect(),
            Value::Error(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inspect())
    }
}

/// Equality used by `==`/`!=` for value pairs that are not both
/// `INTEGER` or both `STRING` (§4.6): booleans and `null` compare by
/// value, everything else compares by reference identity, and mismatched
/// tags are never equal.
pub fn values_identical(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Boolean(x), Value::Boolean(y)) => x == y,
        (Value::Null, Value::Null) => true,
        (Value::Array(x), Value::Array(y)) => Rc::ptr_eq(x, y),
        (Value::Map(x), Value::Map(y)) => Rc::ptr_eq(x, y),
        (Value::Function(x), Value::Function(y)) => Rc::ptr_eq(x, y),
        (Value::Builtin(x), Value::Builtin(y)) => x == y,
        _ => false,
    }
}
