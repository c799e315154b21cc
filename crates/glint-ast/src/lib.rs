// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tokens and abstract syntax tree for the glint language (§3.1, §3.2).
//!
//! Every node is built once by the parser and never mutated afterwards;
//! canonical textual forms (via `Display`) are pinned exactly by tests and
//! echoed by the REPL (§4.3, §6.3).

pub mod expression;
pub mod node;
pub mod program;
pub mod statement;
pub mod token;

pub use expression::*;
pub use node::Node;
pub use program::Program;
pub use statement::*;
pub use token::{lookup_ident, Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use glint_span::Span;

    fn ident(name: &str) -> Identifier {
        Identifier { name: name.into(), span: Span::dummy() }
    }

    fn int(value: i64) -> Expression {
        Expression::IntLiteral(IntLiteral { value, span: Span::dummy() })
    }

    #[test]
    fn let_statement_prints_canonically() {
        let stmt = Statement::Let(LetStatement { name: ident("x"), value: int(5), span: Span::dummy() });
        assert_eq!(stmt.to_string(), "let x = 5;\n");
    }

    #[test]
    fn return_statement_prints_canonically() {
        let stmt = Statement::Return(ReturnStatement { value: int(5), span: Span::dummy() });
        assert_eq!(stmt.to_string(), "return 5;\n");
    }

    #[test]
    fn block_with_one_statement_indents_and_closes_without_trailing_newline() {
        let block = Block {
            statements: vec![Statement::Expression(ExpressionStatement { expr: int(1), span: Span::dummy() })],
            span: Span::dummy(),
        };
        assert_eq!(block.to_string(), "{\n\t1;\n}");
    }

    #[test]
    fn prefix_expression_has_no_space_between_operator_and_operand() {
        let expr = Expression::Prefix(PrefixExpression { op: "-".into(), right: Box::new(int(5)), span: Span::dummy() });
        assert_eq!(expr.to_string(), "(-5)");
    }

    #[test]
    fn infix_expression_has_single_spaces() {
        let expr = Expression::Infix(InfixExpression {
            op: "+".into(),
            left: Box::new(int(1)),
            right: Box::new(int(2)),
            span: Span::dummy(),
        });
        assert_eq!(expr.to_string(), "(1 + 2)");
    }

    #[test]
    fn array_and_map_literals_preserve_order() {
        let arr = Expression::ArrLiteral(ArrLiteral { elements: vec![int(1), int(2)], span: Span::dummy() });
        assert_eq!(arr.to_string(), "[1, 2]");

        let map = Expression::MapLiteral(MapLiteral {
            pairs: vec![
                (Expression::StrLiteral(StrLiteral { value: "b".into(), span: Span::dummy() }), int(2)),
                (Expression::StrLiteral(StrLiteral { value: "a".into(), span: Span::dummy() }), int(1)),
            ],
            span: Span::dummy(),
        });
        assert_eq!(map.to_string(), "{b:2, a:1}");
    }
}
