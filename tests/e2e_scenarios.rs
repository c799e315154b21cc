//! End-to-end REPL-shaped scenarios (§8 "Concrete end-to-end scenarios"),
//! driving the embedding API (`glint::parse` + `glint::eval`) the same
//! way the REPL binary does for one line at a time.

use glint::{eval, parse, Environment, Value};

fn eval_ok(source: &str) -> Value {
    let (program, errors) = parse(source);
    assert!(errors.is_empty(), "unexpected parse errors for {source:?}: {errors:?}");
    eval(&program, &Environment::new())
}

#[test]
fn scenario_1_arithmetic_precedence() {
    assert!(matches!(eval_ok("let x = 5 * 2 + 1; x;"), Value::Integer(11)));
}

#[test]
fn scenario_2_recursive_factorial() {
    let source = "let fact = fn(n) { if (n < 2) { return 1; } return n * fact(n - 1); }; fact(5);";
    assert!(matches!(eval_ok(source), Value::Integer(120)));
}

#[test]
fn scenario_3_array_builtins_compose() {
    let source = "let a = [1, 2, 3]; len(a) + first(a) + last(a);";
    assert!(matches!(eval_ok(source), Value::Integer(7)));
}

#[test]
fn scenario_4_map_index_then_type_mismatch() {
    let hit = eval_ok(r#"let m = {"one": 1, "two": 2}; m["two"];"#);
    assert!(matches!(hit, Value::Integer(2)));

    let miss = eval_ok(r#"let m = {"one": 1, "two": 2}; m["missing"];"#);
    assert!(matches!(miss, Value::Null));

    // `m["two"] + m["missing"] == null` parses as `(m["two"] + m["missing"]) == null`
    // (SUM binds tighter than EQUALS); the `+` between INTEGER and NULL fails
    // before the outer `==` (or the undeclared `null` identifier) is reached.
    let combined = eval_ok(r#"let m = {"one": 1, "two": 2}; m["two"] + m["missing"] == null;"#);
    assert_eq!(combined.inspect(), "type mismatch: INTEGER + NULL");
}

#[test]
fn scenario_5_if_else_branch_selection() {
    assert!(matches!(eval_ok("if (true) { 10 } else { 20 };"), Value::Integer(10)));
    assert!(matches!(eval_ok("if (false) { 10 };"), Value::Null));
}

#[test]
fn scenario_6_precedence_canonical_print() {
    let (program, errors) = parse("a + b * c + d / e - f");
    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "(((a + (b * c)) + (d / e)) - f);\n");
}

#[test]
fn closures_capture_the_defining_environment() {
    let source = "let c = fn(x){ fn(y){ x + y } }; let add2 = c(2); add2(3);";
    assert!(matches!(eval_ok(source), Value::Integer(5)));
}

#[test]
fn parse_errors_are_reported_without_invoking_the_evaluator() {
    let (_, errors) = parse("let x 5;");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].to_string(), "expected next token to be ASSIGN, got INT instead");
}
