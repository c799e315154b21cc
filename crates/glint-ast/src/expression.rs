// Copyright (c) the glint contributors.
// Licensed under the MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>
// or the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0>,
// at your option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::node::{simple_node, Node};
use crate::statement::Block;
use glint_span::Span;
use std::fmt;

/// A bound name, e.g. the `x` in `let x = 5;` or a variable reference.
#[derive(Clone, Debug, PartialEq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

simple_node!(Identifier);

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IntLiteral {
    pub value: i64,
    pub span: Span,
}
simple_node!(IntLiteral);
impl fmt::Display for IntLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoolLiteral {
    pub value: bool,
    pub span: Span,
}
simple_node!(BoolLiteral);
impl fmt::Display for BoolLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrLiteral {
    pub value: String,
    pub span: Span,
}
simple_node!(StrLiteral);
impl fmt::Display for StrLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrLiteral {
    pub elements: Vec<Expression>,
    pub span: Span,
}
simple_node!(ArrLiteral);
impl fmt::Display for ArrLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let elems: Vec<String> = self.elements.iter().map(|e| e.to_string()).collect();
        write!(f, "[{}]", elems.join(", "))
    }
}

/// A map literal's key/value pairs, kept in source (insertion) order so
/// canonical printing and `Inspect()` are stable (§3.2, §4.3).
#[derive(Clone, Debug, PartialEq)]
pub struct MapLiteral {
    pub pairs: Vec<(Expression, Expression)>,
    pub span: Span,
}
simple_node!(MapLiteral);
impl fmt::Display for MapLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self.pairs.iter().map(|(k, v)| format!("{k}:{v}")).collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PrefixExpression {
    pub op: String,
    pub right: Box<Expression>,
    pub span: Span,
}
simple_node!(PrefixExpression);
impl fmt::Display for PrefixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}{})", self.op, self.right)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct InfixExpression {
    pub op: String,
    pub left: Box<Expression>,
    pub right: Box<Expression>,
    pub span: Span,
}
simple_node!(InfixExpression);
impl fmt::Display for InfixExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {} {})", self.left, self.op, self.right)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfExpression {
    pub condition: Box<Expression>,
    pub consequence: Block,
    pub alternative: Option<Block>,
    pub span: Span,
}
simple_node!(IfExpression);
impl fmt::Display for IfExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "if {} {}", self.condition, self.consequence)?;
        if let Some(alt) = &self.alternative {
            write!(f, " else {alt}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: Block,
    pub span: Span,
}
simple_node!(FunctionLiteral);
impl fmt::Display for FunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.name.clone()).collect();
        write!(f, "fn({}) {}", params.join(", "), self.body)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CallExpression {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
    pub span: Span,
}
simple_node!(CallExpression);
impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let args: Vec<String> = self.arguments.iter().map(|a| a.to_string()).collect();
        write!(f, "{}({})", self.function, args.join(", "))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IndexExpression {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
    pub span: Span,
}
simple_node!(IndexExpression);
impl fmt::Display for IndexExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}[{}])", self.left, self.index)
    }
}

/// Every expression-position AST node (§3.2).
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    IntLiteral(IntLiteral),
    BoolLiteral(BoolLiteral),
    StrLiteral(StrLiteral),
    ArrLiteral(ArrLiteral),
    MapLiteral(MapLiteral),
    Prefix(PrefixExpression),
    Infix(InfixExpression),
    If(IfExpression),
    FunctionLiteral(FunctionLiteral),
    Call(CallExpression),
    Index(IndexExpression),
}

impl Node for Expression {
    fn span(&self) -> Span {
        use Expression::*;
        match self {
            Identifier(n) => n.span(),
            IntLiteral(n) => n.span(),
            BoolLiteral(n) => n.span(),
            StrLiteral(n) => n.span(),
            ArrLiteral(n) => n.span(),
            MapLiteral(n) => n.span(),
            Prefix(n) => n.span(),
            Infix(n) => n.span(),
            If(n) => n.span(),
            FunctionLiteral(n) => n.span(),
            Call(n) => n.span(),
            Index(n) => n.span(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expression::*;
        match self {
            Identifier(n) => n.fmt(f),
            IntLiteral(n) => n.fmt(f),
            BoolLiteral(n) => n.fmt(f),
            StrLiteral(n) => n.fmt(f),
            ArrLiteral(n) => n.fmt(f),
            MapLiteral(n) => n.fmt(f),
            Prefix(n) => n.fmt(f),
            Infix(n) => n.fmt(f),
            If(n) => n.fmt(f),
            FunctionLiteral(n) => n.fmt(f),
            Call(n) => n.fmt(f),
            Index(n) => n.fmt(f),
        }
    }
}
