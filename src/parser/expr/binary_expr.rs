//! 二項演算式の解析
//!
//! 演算子の優先順位に従って二項演算式を解析する。すべて左結合。

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

type OperandParser = fn(&mut Parser) -> ParseResult<Expression>;

const OR_OPS: &[(Token, BinaryOp)] = &[(Token::Or, BinaryOp::Or), (Token::OrOr, BinaryOp::Or)];

const AND_OPS: &[(Token, BinaryOp)] = &[(Token::And, BinaryOp::And), (Token::AndAnd, BinaryOp::And)];

const EQUALITY_OPS: &[(Token, BinaryOp)] =
    &[(Token::EqEq, BinaryOp::Eq), (Token::NotEq, BinaryOp::Ne)];

const RELATIONAL_OPS: &[(Token, BinaryOp)] = &[
    (Token::Lt, BinaryOp::Lt),
    (Token::LtEq, BinaryOp::Le),
    (Token::Gt, BinaryOp::Gt),
    (Token::GtEq, BinaryOp::Ge),
    (Token::In, BinaryOp::In),
];

const SET_OPS: &[(Token, BinaryOp)] = &[
    (Token::Union, BinaryOp::Union),
    (Token::Intersect, BinaryOp::Intersect),
    (Token::Diff, BinaryOp::Diff),
    (Token::SymDiff, BinaryOp::SymDiff),
];

const ADDITIVE_OPS: &[(Token, BinaryOp)] = &[
    (Token::Plus, BinaryOp::Add),
    (Token::Minus, BinaryOp::Subtract),
    (Token::PlusPlus, BinaryOp::Concat),
];

const MULTIPLICATIVE_OPS: &[(Token, BinaryOp)] = &[
    (Token::Star, BinaryOp::Multiply),
    (Token::Slash, BinaryOp::Divide),
    (Token::Percent, BinaryOp::Modulo),
];

impl Parser {
    /// OR式を解析
    pub(crate) fn parse_or_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_and_expression, OR_OPS)
    }

    /// AND式を解析
    pub(crate) fn parse_and_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_equality_expression, AND_OPS)
    }

    /// 等価式を解析
    pub(crate) fn parse_equality_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_relational_expression, EQUALITY_OPS)
    }

    /// 比較式・所属判定を解析
    pub(crate) fn parse_relational_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_set_expression, RELATIONAL_OPS)
    }

    /// 集合演算式を解析
    pub(crate) fn parse_set_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_additive_expression, SET_OPS)
    }

    /// 加減算式を解析
    pub(crate) fn parse_additive_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_multiplicative_expression, ADDITIVE_OPS)
    }

    /// 乗除算式を解析
    pub(crate) fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression> {
        self.parse_left_assoc(Parser::parse_cast_expression, MULTIPLICATIVE_OPS)
    }

    /// 型変換式を解析
    pub(crate) fn parse_cast_expression(&mut self) -> ParseResult<Expression> {
        let mut expr = self.parse_unary_expression()?;

        while self.match_token(&Token::As) {
            let target = self.parse_type()?;
            let span = self.span_from(expr.span());
            expr = Expression::Cast(CastExpr {
                id: self.next_id(),
                expr: Box::new(expr),
                target,
                span,
            });
        }

        Ok(expr)
    }

    fn parse_left_assoc(
        &mut self,
        operand: OperandParser,
        ops: &[(Token, BinaryOp)],
    ) -> ParseResult<Expression> {
        let mut left = operand(self)?;

        while let Some(op) = self.match_binary_op(ops) {
            let right = operand(self)?;
            let span = left.span().to(right.span());
            left = Expression::Binary(BinaryExpr {
                id: self.next_id(),
                left: Box::new(left),
                op,
                right: Box::new(right),
                span,
            });
        }

        Ok(left)
    }

    fn match_binary_op(&mut self, ops: &[(Token, BinaryOp)]) -> Option<BinaryOp> {
        let op = ops
            .iter()
            .find(|(token, _)| self.check(token))
            .map(|(_, op)| *op)?;
        self.advance();
        Some(op)
    }
}
