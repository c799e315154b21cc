// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The REPL binary (§6.1, §6.2).
//!
//! Takes no arguments and reads no configuration beyond `RUST_LOG`
//! (§[ADDED] 3 CONFIGURATION): it greets the current OS user, then loops
//! reading one line at a time, lexing and parsing it, echoing the
//! canonical AST form, and printing the evaluated value's `Inspect()`.
//! Environment bindings persist for the life of the process.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use glint_eval::Environment;

/// The REPL's line prompt, matching the reference implementation's
/// literal `code>> ` convention (§[ADDED] 5).
const PROMPT: &str = "code>> ";

fn main() -> anyhow::Result<()> {
    init_logging();

    let username = current_username();
    println!("Hello {}! This is the glint programming language.", username.bold());
    println!("Feel free to type in commands.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    let env = Environment::new();
    loop {
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => return Ok(()),
        };

        run_line(&line, &env, &mut stdout)?;
    }
}

/// Lexes, parses and (if parsing succeeded) evaluates a single line, per
/// the REPL protocol in §6.2.
fn run_line(line: &str, env: &Environment, out: &mut impl Write) -> anyhow::Result<()> {
    let (program, errors) = glint_parser::parse(line);
    tracing::debug!(%line, error_count = errors.len(), "parsed repl input");

    if !errors.is_empty() {
        for err in &errors {
            writeln!(out, "\t{err}")?;
        }
        return Ok(());
    }

    write!(out, "{program}")?;
    writeln!(out)?;

    let value = glint_eval::eval(&program, env);
    if !matches!(value, glint_eval::Value::Null) {
        writeln!(out, "{}", value.inspect())?;
    }
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false).compact()).init();
}

/// Identifies the current OS user for the launch greeting (§6.1). This is
/// the one piece of the launcher spec.md deliberately leaves as an
/// external collaborator (§1) rather than a language feature: it reads
/// the host environment, never the language's own environment chain.
fn current_username() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "user".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_lines_are_tab_indented() {
        let env = Environment::new();
        let mut out = Vec::new();
        run_line("let x 5;", &env, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.starts_with('\t'));
    }

    #[test]
    fn a_null_result_prints_no_trailing_value_line() {
        let env = Environment::new();
        let mut out = Vec::new();
        run_line("if (false) { 10 };", &env, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(!rendered.trim_end().ends_with("10"), "expected no inspect line, got: {rendered:?}");

        out.clear();
        run_line("if (true) { 10 } else { 20 };", &env, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.trim_end().ends_with("10"));
    }

    #[test]
    fn bindings_persist_across_lines_in_the_same_environment() {
        let env = Environment::new();
        let mut out = Vec::new();
        run_line("let x = 5;", &env, &mut out).unwrap();
        out.clear();
        run_line("x;", &env, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.ends_with("5\n"));
    }

    #[test]
    fn a_runtime_error_does_not_poison_the_environment() {
        let env = Environment::new();
        let mut out = Vec::new();
        run_line("let a = 1 + true;", &env, &mut out).unwrap();
        out.clear();
        run_line("let b = 2; b;", &env, &mut out).unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.ends_with("2\n"));
    }
}
