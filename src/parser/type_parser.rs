//! 型の解析

use crate::ast::Type;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 型名を解析
    pub(super) fn parse_type(&mut self) -> ParseResult<Type> {
        match self.current_token() {
            Some(Token::TypeName(ty)) => {
                let ty = *ty;
                self.advance();
                Ok(ty)
            }
            _ => Err(self.unexpected("type name")),
        }
    }
}
