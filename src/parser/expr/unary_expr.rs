//! 単項演算式の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// 単項演算式を解析
    pub(crate) fn parse_unary_expression(&mut self) -> ParseResult<Expression> {
        let start = self.current_span();
        let op = match self.current_token() {
            Some(Token::Minus) => UnaryOp::Negate,
            Some(Token::Not) | Some(Token::Bang) => UnaryOp::Not,
            _ => return self.parse_primary_expression(),
        };
        self.advance();

        // 符号付きでしか書けないi32::MINはリテラルに畳み込む
        if op == UnaryOp::Negate {
            if let Some(Token::Integer(value)) = self.current_token() {
                if *value == -i64::from(i32::MIN) {
                    self.advance();
                    return Ok(Expression::Integer(IntegerLit {
                        id: self.next_id(),
                        value: i32::MIN,
                        span: self.span_from(start),
                    }));
                }
            }
        }

        let expr = self.parse_unary_expression()?;
        Ok(Expression::Unary(UnaryExpr {
            id: self.next_id(),
            op,
            expr: Box::new(expr),
            span: self.span_from(start),
        }))
    }
}
