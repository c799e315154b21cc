// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The tree-walking evaluator (§4.6).
//!
//! `RETURN` and `ERROR` are control values carried as ordinary
//! [`Value`] variants rather than host exceptions (§9): [`eval_block`]
//! re-emits them unexamined so an enclosing call site can see the
//! wrapper, while [`eval`] (the `Program` rule) and [`apply_function`]
//! are the only two places that unwrap a `RETURN` or stop on an
//! `ERROR`.

use std::rc::Rc;

use glint_ast::{Block, Expression, Program, Statement};
use indexmap::IndexMap;

use crate::builtins;
use crate::environment::Environment;
use crate::hashkey::HashKey;
use crate::value::{values_identical, FunctionData, Value};

/// §1's `eval(Program, Environment) -> Value` entry point.
pub fn eval(program: &Program, env: &Environment) -> Value {
    let mut result = Value::Null;
    for stmt in &program.statements {
        tracing::trace!(stmt = %stmt, "evaluating top-level statement");
        result = eval_statement(stmt, env);
        match result {
            Value::Return(inner) => return *inner,
            Value::Error(_) => return result,
            _ => {}
        }
    }
    result
}

fn eval_block(block: &Block, env: &Environment) -> Value {
    let mut result = Value::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env);
        if matches!(result, Value::Return(_) | Value::Error(_)) {
            return result;
        }
    }
    result
}

fn eval_statement(stmt: &Statement, env: &Environment) -> Value {
    match stmt {
        Statement::Let(let_stmt) => {
            let value = eval_expr(&let_stmt.value, env);
            if value.is_error() {
                return value;
            }
            env.set(let_stmt.name.name.clone(), value);
            Value::Null
        }
        Statement::Return(ret) => {
            let value = eval_expr(&ret.value, env);
            if value.is_error() {
                return value;
            }
            Value::Return(Box::new(value))
        }
        Statement::Expression(expr_stmt) => eval_expr(&expr_stmt.expr, env),
        Statement::Block(block) => eval_block(block, env),
    }
}

fn eval_expr(expr: &Expression, env: &Environment) -> Value {
    match expr {
        Expression::IntLiteral(n) => Value::Integer(n.value),
        Expression::BoolLiteral(b) => {
            if b.value {
                Value::TRUE
            } else {
                Value::FALSE
            }
        }
        Expression::StrLiteral(s) => Value::Str(s.value.clone()),
        Expression::Identifier(ident) => eval_identifier(&ident.name, env),
        Expression::ArrLiteral(arr) => match eval_expr_list(&arr.elements, env) {
            Ok(elems) => Value::Array(Rc::new(elems)),
            Err(err) => err,
        },
        Expression::MapLiteral(map) => eval_map_literal(map, env),
        Expression::Prefix(prefix) => {
            let right = eval_expr(&prefix.right, env);
            if right.is_error() {
                return right;
            }
            eval_prefix_expr(&prefix.op, right)
        }
        Expression::Infix(infix) => {
            let left = eval_expr(&infix.left, env);
            if left.is_error() {
                return left;
            }
            let right = eval_expr(&infix.right, env);
            if right.is_error() {
                return right;
            }
            eval_infix_expr(&infix.op, left, right)
        }
        Expression::If(if_expr) => {
            let condition = eval_expr(&if_expr.condition, env);
            if condition.is_error() {
                return condition;
            }
            if condition.is_truthy() {
                eval_block(&if_expr.consequence, env)
            } else if let Some(alt) = &if_expr.alternative {
                eval_block(alt, env)
            } else {
                Value::Null
            }
        }
        Expression::FunctionLiteral(func) => Value::Function(Rc::new(FunctionData {
            parameters: func.parameters.clone(),
            body: func.body.clone(),
            env: env.clone(),
        })),
        Expression::Call(call) => {
            let func = eval_expr(&call.function, env);
            if func.is_error() {
                return func;
            }
            match eval_expr_list(&call.arguments, env) {
                Ok(args) => apply_function(func, args),
                Err(err) => err,
            }
        }
        Expression::Index(index) => {
            let left = eval_expr(&index.left, env);
            if left.is_error() {
                return left;
            }
            let idx = eval_expr(&index.index, env);
            if idx.is_error() {
                return idx;
            }
            eval_index_expr(left, idx)
        }
    }
}

/// Evaluates each expression left to right, stopping at the first
/// `ERROR` value rather than discarding the partial sequence (§9
/// corrects the source's one-element-sequence shortcut here).
fn eval_expr_list(exprs: &[Expression], env: &Environment) -> Result<Vec<Value>, Value> {
    let mut values = Vec::with_capacity(exprs.len());
    for expr in exprs {
        let value = eval_expr(expr, env);
        if value.is_error() {
            return Err(value);
        }
        values.push(value);
    }
    Ok(values)
}

fn eval_identifier(name: &str, env: &Environment) -> Value {
    if let Some(value) = env.get(name) {
        return value;
    }
    if let Some(builtin) = builtins::lookup(name) {
        return builtin;
    }
    Value::Error(format!("identifier not found: {name}"))
}

fn eval_map_literal(map: &glint_ast::MapLiteral, env: &Environment) -> Value {
    let mut pairs = IndexMap::new();
    for (key_expr, value_expr) in &map.pairs {
        let key = eval_expr(key_expr, env);
        if key.is_error() {
            return key;
        }
        let hash_key = match HashKey::for_value(&key) {
            Some(hash_key) => hash_key,
            None => return Value::Error(format!("unusable as hash key: {}", key.type_tag())),
        };
        let value = eval_expr(value_expr, env);
        if value.is_error() {
            return value;
        }
        pairs.insert(hash_key, (key, value));
    }
    Value::Map(Rc::new(pairs))
}

fn eval_prefix_expr(op: &str, right: Value) -> Value {
    match op {
        "!" => Value::Boolean(!right.is_truthy()),
        "-" => match right {
            Value::Integer(n) => Value::Integer(-n),
            other => Value::Error(format!("unknown operator: -{}", other.type_tag())),
        },
        _ => Value::Error(format!("unknown operator: {op}{}", right.type_tag())),
    }
}

fn eval_infix_expr(op: &str, left: Value, right: Value) -> Value {
    match (&left, &right) {
        (Value::Integer(l), Value::Integer(r)) => eval_integer_infix(op, *l, *r),
        (Value::Str(l), Value::Str(r)) => eval_string_infix(op, l, r),
        _ if op == "==" => Value::Boolean(values_identical(&left, &right)),
        _ if op == "!=" => Value::Boolean(!values_identical(&left, &right)),
        _ if left.type_tag() != right.type_tag() => {
            Value::Error(format!("type mismatch: {} {op} {}", left.type_tag(), right.type_tag()))
        }
        _ => Value::Error(format!("unknown operator: {} {op} {}", left.type_tag(), right.type_tag())),
    }
}

fn eval_integer_infix(op: &str, l: i64, r: i64) -> Value {
    match op {
        "+" => Value::Integer(l + r),
        "-" => Value::Integer(l - r),
        "*" => Value::Integer(l * r),
        "/" => {
            if r == 0 {
                Value::Error("division by zero".into())
            } else {
                Value::Integer(l / r)
            }
        }
        "<" => Value::Boolean(l < r),
        ">" => Value::Boolean(l > r),
        "==" => Value::Boolean(l == r),
        "!=" => Value::Boolean(l != r),
        _ => Value::Error(format!("unknown operator: INTEGER {op} INTEGER")),
    }
}

fn eval_string_infix(op: &str, l: &str, r: &str) -> Value {
    match op {
        "+" => Value::Str(format!("{l}{r}")),
        _ => Value::Error(format!("unknown operator: STRING {op} STRING")),
    }
}

fn eval_index_expr(left: Value, index: Value) -> Value {
    match (&left, &index) {
        (Value::Array(elems), Value::Integer(i)) => {
            if *i < 0 || *i as usize >= elems.len() {
                Value::Error("index out of range".into())
            } else {
                elems[*i as usize].clone()
            }
        }
        (Value::Map(pairs), _) => match HashKey::for_value(&index) {
            Some(key) => pairs.get(&key).map(|(_, v)| v.clone()).unwrap_or(Value::Null),
            None => Value::Error(format!("unusable as hash key: {}", index.type_tag())),
        },
        _ => Value::Error(format!("index operator not supported: {}", left.type_tag())),
    }
}

fn apply_function(func: Value, args: Vec<Value>) -> Value {
    match func {
        Value::Function(data) => {
            if args.len() != data.parameters.len() {
                return Value::Error(format!(
                    "wrong number of arguments: got {}, want {}",
                    args.len(),
                    data.parameters.len()
                ));
            }
            let call_env = Environment::enclosed(&data.env);
            for (param, arg) in data.parameters.iter().zip(args) {
                call_env.set(param.name.clone(), arg);
            }
            unwrap_return(eval_block(&data.body, &call_env))
        }
        Value::Builtin(builtin) => builtin.call(&args),
        other => Value::Error(format!("not a function: {}", other.type_tag())),
    }
}

fn unwrap_return(value: Value) -> Value {
    match value {
        Value::Return(inner) => *inner,
        other => other,
    }
}
