// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Parser diagnostics.
//!
//! Parsing never aborts on the first problem: malformed input is recorded
//! as a [`ParserError`] and parsing continues, the way a hand-written
//! recursive-descent parser recovers from a bad statement and moves on to
//! the next one. A [`Handler`] is the side channel errors are emitted
//! into, rather than a `Result` threaded through every parse function.

use glint_span::Span;
use std::fmt;

/// A single parser diagnostic.
///
/// Every variant owns exactly the data its message needs; message text is
/// produced by `Display`, not assembled ad hoc at call sites.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    /// A structural token (`=`, `)`, `}`, ...) the grammar requires was not
    /// found where expected.
    #[error("expected next token to be {expected}, got {got} instead")]
    ExpectedToken { expected: String, got: String, span: Span },

    /// No prefix parse function is registered for the current token, i.e.
    /// it cannot begin an expression.
    #[error("no prefix parse function for {kind}")]
    NoPrefixParseFn { kind: String, span: Span },

    /// An `INT` token's lexeme did not fit in a signed 64-bit integer.
    #[error("could not parse {literal:?} as an integer")]
    IntegerOverflow { literal: String, span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::ExpectedToken { span, .. } => *span,
            ParserError::NoPrefixParseFn { span, .. } => *span,
            ParserError::IntegerOverflow { span, .. } => *span,
        }
    }
}

/// Accumulates parser errors in the order they were raised.
///
/// Mirrors the teacher's `Handler`/`emit_err` side channel: parse
/// functions call [`Handler::emit`] and keep going rather than returning
/// early, so that a single REPL line can report every problem it has
/// instead of just the first.
#[derive(Debug, Default)]
pub struct Handler {
    errors: Vec<ParserError>,
}

impl Handler {
    pub fn new() -> Self {
        Handler::default()
    }

    pub fn emit(&mut self, err: ParserError) {
        self.errors.push(err);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParserError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParserError> {
        self.errors
    }

    /// Renders each accumulated error as a human-oriented message string,
    /// in emission order, for the REPL boundary described in §6.2/§7.1.
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }
}

impl fmt::Display for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for msg in self.messages() {
            writeln!(f, "\t{msg}")?;
        }
        Ok(())
    }
}
