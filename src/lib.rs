// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `glint`: a tree-walking interpreter for a small, dynamically typed,
//! expression-oriented scripting language (§1 PURPOSE & SCOPE).
//!
//! This crate is a thin re-export over the workspace's component crates,
//! exposing exactly the two entry points §1 names for embedding:
//! [`parse`] (source text to AST plus parse errors) and [`eval`]
//! (AST plus environment to a value). The REPL binary (`src/main.rs`)
//! is the only other consumer of this pipeline; it adds nothing the
//! embedding API doesn't already expose.

pub use glint_ast::{Program, Token, TokenKind};
pub use glint_errors::ParserError;
pub use glint_eval::{eval, Environment, Value};
pub use glint_parser::parse;
