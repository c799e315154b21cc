// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

use glint_ast::*;
use glint_errors::{Handler, ParserError};

use crate::lexer::Lexer;

/// Operator precedence ladder (§4.2), lowest to highest. Each infix token
/// kind maps onto one of these; the Pratt loop keeps consuming infix
/// operators while the next one binds tighter than the level the caller
/// is parsing at.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Index,
    Call,
}

fn precedence_of(kind: TokenKind) -> Precedence {
    use TokenKind::*;
    match kind {
        Eq | NotEq => Precedence::Equals,
        Lt | Gt => Precedence::LessGreater,
        Plus | Minus => Precedence::Sum,
        Asterisk | Slash => Precedence::Product,
        LBracket => Precedence::Index,
        LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

/// A Pratt (operator-precedence) recursive-descent parser. Holds the
/// current and peek tokens, advancing one at a time from the lexer; it
/// never looks further ahead than that.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur: Token,
    peek: Token,
    handler: &'a mut Handler,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str, handler: &'a mut Handler) -> Self {
        let mut lexer = Lexer::new(input);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser { lexer, cur, peek, handler }
    }

    fn advance(&mut self) {
        self.cur = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn cur_is(&self, kind: TokenKind) -> bool {
        self.cur.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Advances past the peek token if it matches `kind`; otherwise emits
    /// an `ExpectedToken` error and leaves the cursor where it is.
    fn expect_peek(&mut self, kind: TokenKind) -> bool {
        if self.peek_is(kind) {
            self.advance();
            true
        } else {
            let err = ParserError::ExpectedToken {
                expected: kind.to_string(),
                got: self.peek.kind.to_string(),
                span: self.peek.span,
            };
            tracing::debug!(%err, "parser error");
            self.handler.emit(err);
            false
        }
    }

    fn peek_precedence(&self) -> Precedence {
        precedence_of(self.peek.kind)
    }

    fn cur_precedence(&self) -> Precedence {
        precedence_of(self.cur.kind)
    }

    pub fn parse_program(mut self) -> Program {
        tracing::trace!("parsing program");
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::Eof) {
            if self.cur_is(TokenKind::Semicolon) {
                self.advance();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }
        Program { statements }
    }

    fn parse_statement(&mut self) -> Option<Statement> {
        match self.cur.kind {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Option<Statement> {
        let start = self.cur.span;
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = Identifier { name: self.cur.literal.clone(), span: self.cur.span };
        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        let end = self.cur.span;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Let(LetStatement { name, value, span: start + end }))
    }

    fn parse_return_statement(&mut self) -> Option<Statement> {
        let start = self.cur.span;
        self.advance();
        let value = self.parse_expression(Precedence::Lowest)?;
        let end = self.cur.span;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Return(ReturnStatement { value, span: start + end }))
    }

    fn parse_expression_statement(&mut self) -> Option<Statement> {
        let start = self.cur.span;
        let expr = self.parse_expression(Precedence::Lowest)?;
        let end = self.cur.span;
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
        Some(Statement::Expression(ExpressionStatement { expr, span: start + end }))
    }

    fn parse_block(&mut self) -> Block {
        let start = self.cur.span;
        self.advance();
        let mut statements = Vec::new();
        while !self.cur_is(TokenKind::RBrace) && !self.cur_is(TokenKind::Eof) {
            if self.cur_is(TokenKind::Semicolon) {
                self.advance();
                continue;
            }
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }
        let span = start + self.cur.span;
        Block { statements, span }
    }

    /// The Pratt loop (§4.2): find a prefix handler for the current token,
    /// then keep folding in infix operators that bind tighter than
    /// `precedence`.
    fn parse_expression(&mut self, precedence: Precedence) -> Option<Expression> {
        let mut left = self.parse_prefix()?;
        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            self.advance();
            left = self.parse_infix(left)?;
        }
        Some(left)
    }

    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::Ident => Some(Expression::Identifier(Identifier {
                name: self.cur.literal.clone(),
                span: self.cur.span,
            })),
            TokenKind::Int => self.parse_int_literal(),
            TokenKind::True | TokenKind::False => Some(Expression::BoolLiteral(BoolLiteral {
                value: self.cur_is(TokenKind::True),
                span: self.cur.span,
            })),
            TokenKind::String => Some(Expression::StrLiteral(StrLiteral {
                value: self.cur.literal.clone(),
                span: self.cur.span,
            })),
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_map_literal(),
            TokenKind::LParen => self.parse_grouped_expression(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            TokenKind::Bang | TokenKind::Minus => self.parse_prefix_expression(),
            kind => {
                let err = ParserError::NoPrefixParseFn { kind: kind.to_string(), span: self.cur.span };
                tracing::debug!(%err, "parser error");
                self.handler.emit(err);
                None
            }
        }
    }

    fn parse_infix(&mut self, left: Expression) -> Option<Expression> {
        match self.cur.kind {
            TokenKind::LParen => self.parse_call_expression(left),
            TokenKind::LBracket => self.parse_index_expression(left),
            _ => self.parse_infix_expression(left),
        }
    }

    fn parse_int_literal(&mut self) -> Option<Expression> {
        match self.cur.literal.parse::<i64>() {
            Ok(value) => Some(Expression::IntLiteral(IntLiteral { value, span: self.cur.span })),
            Err(_) => {
                let err = ParserError::IntegerOverflow { literal: self.cur.literal.clone(), span: self.cur.span };
                tracing::debug!(%err, "parser error");
                self.handler.emit(err);
                None
            }
        }
    }

    fn parse_prefix_expression(&mut self) -> Option<Expression> {
        let start = self.cur.span;
        let op = self.cur.literal.clone();
        self.advance();
        let right = self.parse_expression(Precedence::Prefix)?;
        let span = start + right.span();
        Some(Expression::Prefix(PrefixExpression { op, right: Box::new(right), span }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Option<Expression> {
        let op = self.cur.literal.clone();
        let precedence = self.cur_precedence();
        self.advance();
        let right = self.parse_expression(precedence)?;
        let span = left.span() + right.span();
        Some(Expression::Infix(InfixExpression { op, left: Box::new(left), right: Box::new(right), span }))
    }

    fn parse_grouped_expression(&mut self) -> Option<Expression> {
        self.advance();
        let expr = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(expr)
    }

    fn parse_if_expression(&mut self) -> Option<Expression> {
        let start = self.cur.span;
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        self.advance();
        let condition = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let consequence = self.parse_block();
        let mut span = start + consequence.span;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return None;
            }
            let alt = self.parse_block();
            span = span + alt.span;
            Some(alt)
        } else {
            None
        };

        Some(Expression::If(IfExpression { condition: Box::new(condition), consequence, alternative, span }))
    }

    fn parse_function_literal(&mut self) -> Option<Expression> {
        let start = self.cur.span;
        if !self.expect_peek(TokenKind::LParen) {
            return None;
        }
        let parameters = self.parse_function_parameters()?;
        if !self.expect_peek(TokenKind::LBrace) {
            return None;
        }
        let body = self.parse_block();
        let span = start + body.span;
        Some(Expression::FunctionLiteral(FunctionLiteral { parameters, body, span }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<Identifier>> {
        let mut params = Vec::new();
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Some(params);
        }
        self.advance();
        params.push(Identifier { name: self.cur.literal.clone(), span: self.cur.span });
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            params.push(Identifier { name: self.cur.literal.clone(), span: self.cur.span });
        }
        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(params)
    }

    fn parse_call_expression(&mut self, function: Expression) -> Option<Expression> {
        let start = function.span();
        let arguments = self.parse_expression_list(TokenKind::RParen)?;
        let span = start + self.cur.span;
        Some(Expression::Call(CallExpression { function: Box::new(function), arguments, span }))
    }

    fn parse_index_expression(&mut self, left: Expression) -> Option<Expression> {
        let start = left.span();
        self.advance();
        let index = self.parse_expression(Precedence::Lowest)?;
        if !self.expect_peek(TokenKind::RBracket) {
            return None;
        }
        let span = start + self.cur.span;
        Some(Expression::Index(IndexExpression { left: Box::new(left), index: Box::new(index), span }))
    }

    fn parse_array_literal(&mut self) -> Option<Expression> {
        let start = self.cur.span;
        let elements = self.parse_expression_list(TokenKind::RBracket)?;
        let span = start + self.cur.span;
        Some(Expression::ArrLiteral(ArrLiteral { elements, span }))
    }

    /// Shared by call arguments and array elements: a comma-separated,
    /// possibly-empty list terminated by `end`.
    fn parse_expression_list(&mut self, end: TokenKind) -> Option<Vec<Expression>> {
        let mut list = Vec::new();
        if self.peek_is(end) {
            self.advance();
            return Some(list);
        }
        self.advance();
        list.push(self.parse_expression(Precedence::Lowest)?);
        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }
        if !self.expect_peek(end) {
            return None;
        }
        Some(list)
    }

    fn parse_map_literal(&mut self) -> Option<Expression> {
        let start = self.cur.span;
        let mut pairs = Vec::new();
        while !self.peek_is(TokenKind::RBrace) {
            self.advance();
            let key = self.parse_expression(Precedence::Lowest)?;
            if !self.expect_peek(TokenKind::Colon) {
                return None;
            }
            self.advance();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek_is(TokenKind::RBrace) && !self.expect_peek(TokenKind::Comma) {
                return None;
            }
        }
        if !self.expect_peek(TokenKind::RBrace) {
            return None;
        }
        let span = start + self.cur.span;
        Some(Expression::MapLiteral(MapLiteral { pairs, span }))
    }
}

/// Parses a full program, returning it together with any errors collected
/// along the way (§1's `parse(source) -> (Program, [Error])` entry point).
pub fn parse(source: &str) -> (Program, Vec<ParserError>) {
    let mut handler = Handler::new();
    let program = {
        let parser = Parser::new(source, &mut handler);
        parser.parse_program()
    };
    (program, handler.into_errors())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(input: &str) -> Program {
        let (program, errors) = parse(input);
        assert!(errors.is_empty(), "unexpected parse errors: {errors:?}");
        program
    }

    #[test]
    fn let_statements_parse() {
        let program = parse_ok("let x = 5; let y = true; let z = y;");
        assert_eq!(program.statements.len(), 3);
        assert_eq!(program.to_string(), "let x = 5;\nlet y = true;\nlet z = y;\n");
    }

    #[test]
    fn return_statement_parses() {
        let program = parse_ok("return 10;");
        assert_eq!(program.to_string(), "return 10;\n");
    }

    #[test]
    fn operator_precedence_matches_the_documented_ladder() {
        let cases = vec![
            ("-a * b", "((-a) * b)\n"),
            ("!-a", "(!(-a))\n"),
            ("a + b + c", "((a + b) + c)\n"),
            ("a + b - c", "((a + b) - c)\n"),
            ("a * b * c", "((a * b) * c)\n"),
            ("a * b / c", "((a * b) / c)\n"),
            ("a + b / c", "(a + (b / c))\n"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)\n"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))\n"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))\n"),
            ("3 + 4 * 5 == 3 * 1 + 4 * 5", "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))\n"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)\n"),
            ("(5 + 5) * 2", "((5 + 5) * 2)\n"),
            ("-(5 + 5)", "(-(5 + 5))\n"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)\n"),
            ("a * [1, 2, 3, 4][b * c] * d", "((a * ([1, 2, 3, 4][(b * c)])) * d)\n"),
        ];
        for (input, expected) in cases {
            let program = parse_ok(input);
            assert_eq!(program.to_string(), expected, "input: {input}");
        }
    }

    #[test]
    fn if_else_expression_parses() {
        let program = parse_ok("if (x < y) { x } else { y }");
        assert_eq!(program.to_string(), "if (x < y) {\n\tx;\n} else {\n\ty;\n}\n");
    }

    #[test]
    fn function_literal_parses_parameters_and_body() {
        let program = parse_ok("fn(x, y) { x + y; }");
        assert_eq!(program.to_string(), "fn(x, y) {\n\t(x + y);\n}\n");
    }

    #[test]
    fn call_expression_parses_arguments() {
        let program = parse_ok("add(1, 2 * 3, 4 + 5);");
        assert_eq!(program.to_string(), "add(1, (2 * 3), (4 + 5));\n");
    }

    #[test]
    fn array_and_index_expressions_parse() {
        let program = parse_ok("[1, 2 * 2, 3 + 3][1]");
        assert_eq!(program.to_string(), "([1, (2 * 2), (3 + 3)][1]);\n");
    }

    #[test]
    fn map_literal_parses_with_string_keys() {
        let program = parse_ok(r#"{"one": 1, "two": 2}"#);
        assert_eq!(program.to_string(), "{one:1, two:2};\n");
    }

    #[test]
    fn empty_map_literal_parses() {
        let program = parse_ok("{}");
        assert_eq!(program.to_string(), "{};\n");
    }

    #[test]
    fn missing_let_assign_token_is_recorded_as_an_error() {
        let (_, errors) = parse("let x 5;");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParserError::ExpectedToken { .. }));
    }

    #[test]
    fn integer_overflow_is_recorded_as_an_error() {
        let (_, errors) = parse("99999999999999999999;");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParserError::IntegerOverflow { .. }));
    }

    #[test]
    fn a_bare_semicolon_statement_is_silently_skipped() {
        let program = parse_ok(";;;let x = 1;;;");
        assert_eq!(program.statements.len(), 1);
    }
}
