//! リテラルと一次式の解析

use crate::ast::*;
use crate::lexer::Token;
use crate::parser::{ParseResult, Parser};

impl Parser {
    /// 一次式を解析
    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<Expression> {
        let span = self.current_span();
        let token = match self.current_token() {
            Some(token) => token.clone(),
            None => return Err(self.unexpected("expression")),
        };

        match token {
            Token::Integer(value) => {
                self.advance();
                let value = i32::try_from(value).map_err(|_| {
                    self.error(format!("integer literal {} is out of range", value), span)
                })?;
                Ok(Expression::Integer(IntegerLit {
                    id: self.next_id(),
                    value,
                    span,
                }))
            }
            Token::Float(value) => {
                self.advance();
                Ok(Expression::Float(FloatLit {
                    id: self.next_id(),
                    value,
                    span,
                }))
            }
            Token::String(value) => {
                self.advance();
                Ok(Expression::String(StringLit {
                    id: self.next_id(),
                    value,
                    span,
                }))
            }
            Token::True | Token::False => {
                self.advance();
                Ok(Expression::Boolean(BooleanLit {
                    id: self.next_id(),
                    value: token == Token::True,
                    span,
                }))
            }
            Token::Identifier(name) => {
                self.advance();
                if self.check(&Token::LeftParen) {
                    self.parse_call(name, span)
                } else {
                    Ok(Expression::Identifier(Identifier {
                        id: self.next_id(),
                        name,
                        span,
                    }))
                }
            }
            // 組み込み関数 node/arc/graph は型名と同じ綴り
            Token::TypeName(ty) if self.peek(1) == Some(&Token::LeftParen) => {
                self.advance();
                self.parse_call(ty.name().to_string(), span)
            }
            Token::LeftParen => self.parse_paren_or_tuple(),
            Token::LeftBrace => self.parse_set_literal(),
            _ => Err(self.unexpected("expression")),
        }
    }

    /// 関数呼び出しを解析（呼び出し先の名前は読み終えている）
    fn parse_call(&mut self, callee: String, start: Span) -> ParseResult<Expression> {
        self.expect(Token::LeftParen)?;
        let args = self.parse_argument_list(&Token::RightParen)?;
        self.expect(Token::RightParen)?;

        Ok(Expression::Call(CallExpr {
            id: self.next_id(),
            callee,
            args,
            span: self.span_from(start),
        }))
    }

    /// 括弧式またはタプルを解析
    ///
    /// `(e)`は括弧式、`()`と`(a, b, ...)`はタプル。
    fn parse_paren_or_tuple(&mut self) -> ParseResult<Expression> {
        let start = self.current_span();
        self.expect(Token::LeftParen)?;

        if self.match_token(&Token::RightParen) {
            return Ok(Expression::Tuple(TupleExpr {
                id: self.next_id(),
                elements: Vec::new(),
                span: self.span_from(start),
            }));
        }

        let first = self.parse_expression_internal()?;
        if self.match_token(&Token::RightParen) {
            return Ok(first);
        }

        let mut elements = vec![first];
        while self.match_token(&Token::Comma) {
            if self.check(&Token::RightParen) {
                break;
            }
            elements.push(self.parse_expression_internal()?);
        }
        self.expect(Token::RightParen)?;

        Ok(Expression::Tuple(TupleExpr {
            id: self.next_id(),
            elements,
            span: self.span_from(start),
        }))
    }

    /// 集合リテラルを解析
    fn parse_set_literal(&mut self) -> ParseResult<Expression> {
        let start = self.current_span();
        self.expect(Token::LeftBrace)?;
        let elements = self.parse_argument_list(&Token::RightBrace)?;
        self.expect(Token::RightBrace)?;

        Ok(Expression::Set(SetExpr {
            id: self.next_id(),
            elements,
            span: self.span_from(start),
        }))
    }
}
