//! 宣言の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 関数宣言を解析
    pub(super) fn parse_function_decl(&mut self) -> ParseResult<FunctionDecl> {
        let start = self.current_span();
        self.expect(Token::Fn)?;
        let id = self.next_id();
        let name = self.expect_identifier()?;

        self.expect(Token::LeftParen)?;
        let params = self.parse_parameters()?;
        self.expect(Token::RightParen)?;

        let return_type = if self.match_token(&Token::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(FunctionDecl {
            id,
            name,
            params,
            return_type,
            body,
            span: self.span_from(start),
        })
    }

    /// パラメータリストを解析
    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();

        if self.check(&Token::RightParen) {
            return Ok(params);
        }

        loop {
            let start = self.current_span();
            let id = self.next_id();
            let name = self.expect_identifier()?;
            self.expect(Token::Colon)?;
            let ty = self.parse_type()?;
            params.push(Parameter {
                id,
                name,
                ty,
                span: self.span_from(start),
            });

            if !self.match_token(&Token::Comma) {
                break;
            }
        }

        Ok(params)
    }
}
