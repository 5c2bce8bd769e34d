//! 式の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 式を解析（内部実装）
    pub(super) fn parse_expression_internal(&mut self) -> ParseResult<Expression> {
        self.parse_or_expression()
    }

    /// カンマ区切りの式リストを解析（終端トークンは消費しない）
    pub(super) fn parse_argument_list(&mut self, terminator: &Token) -> ParseResult<Vec<Expression>> {
        let mut args = Vec::new();
        if self.check(terminator) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression_internal()?);
            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        Ok(args)
    }
}
