//! 文の解析

use crate::ast::*;
use crate::lexer::Token;

use super::{ParseResult, Parser};

impl Parser {
    /// 文を解析（内部実装）
    pub(super) fn parse_statement_internal(&mut self) -> ParseResult<Statement> {
        let stmt = match self.current_token() {
            Some(Token::Let) => Statement::Let(self.parse_let_statement()?),
            Some(Token::Return) => Statement::Return(self.parse_return_statement()?),
            Some(Token::If) => Statement::If(self.parse_if_statement()?),
            Some(Token::While) => Statement::While(self.parse_while_statement(LoopKind::While)?),
            Some(Token::Until) => Statement::While(self.parse_while_statement(LoopKind::Until)?),
            Some(Token::For) => Statement::For(self.parse_for_statement()?),
            Some(Token::Switch) => Statement::Switch(self.parse_switch_statement()?),
            Some(Token::Break) => {
                let span = self.current_span();
                self.advance();
                Statement::Break(BreakStatement { span })
            }
            Some(Token::Print) => Statement::Print(self.parse_print_statement()?),
            Some(Token::LeftBrace) => Statement::Block(self.parse_block()?),
            Some(Token::Identifier(_)) if self.peek(1) == Some(&Token::Assign) => {
                Statement::Assignment(self.parse_assignment()?)
            }
            Some(_) => Statement::Expression(self.parse_expression_internal()?),
            None => return Err(self.unexpected("statement")),
        };
        self.skip_semicolons();
        Ok(stmt)
    }

    /// ブロックを解析
    pub(super) fn parse_block(&mut self) -> ParseResult<Block> {
        let start = self.current_span();
        self.expect(Token::LeftBrace)?;

        let mut statements = Vec::new();
        while !self.check(&Token::RightBrace) && !self.is_at_end() {
            statements.push(self.parse_statement_internal()?);
        }

        self.expect(Token::RightBrace)?;
        Ok(Block {
            statements,
            span: self.span_from(start),
        })
    }

    /// let文を解析
    fn parse_let_statement(&mut self) -> ParseResult<LetStatement> {
        let start = self.current_span();
        self.expect(Token::Let)?;
        let id = self.next_id();
        let name = self.expect_identifier()?;

        let ty = if self.match_token(&Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let init = if self.match_token(&Token::Assign) {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };

        let span = self.span_from(start);
        if ty.is_none() && init.is_none() {
            return Err(self.error(
                format!("'let {}' needs a type annotation or an initializer", name),
                span,
            ));
        }

        Ok(LetStatement {
            id,
            name,
            ty,
            init,
            span,
        })
    }

    /// 代入文を解析
    fn parse_assignment(&mut self) -> ParseResult<AssignStatement> {
        let start = self.current_span();
        let id = self.next_id();
        let name = self.expect_identifier()?;
        self.expect(Token::Assign)?;
        let value = self.parse_expression_internal()?;

        Ok(AssignStatement {
            id,
            name,
            value,
            span: self.span_from(start),
        })
    }

    /// return文を解析
    fn parse_return_statement(&mut self) -> ParseResult<ReturnStatement> {
        let start = self.current_span();
        self.expect(Token::Return)?;

        let value = if self.starts_expression() {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };

        Ok(ReturnStatement {
            value,
            span: self.span_from(start),
        })
    }

    /// 値なしの`return`を判別する
    ///
    /// `}`、`;`、終端、または次の文の開始キーワードが続く場合は値なし。
    fn starts_expression(&self) -> bool {
        !matches!(
            self.current_token(),
            None | Some(
                Token::RightBrace
                    | Token::Semicolon
                    | Token::Let
                    | Token::Return
                    | Token::If
                    | Token::While
                    | Token::Until
                    | Token::For
                    | Token::Switch
                    | Token::Break
                    | Token::Print
                    | Token::Fn
            )
        )
    }

    /// if文を解析
    fn parse_if_statement(&mut self) -> ParseResult<IfStatement> {
        let start = self.current_span();
        self.expect(Token::If)?;

        let condition = self.parse_expression_internal()?;
        let then_branch = self.parse_block()?;

        let else_branch = if self.match_token(&Token::Else) {
            if self.check(&Token::If) {
                Some(ElseBranch::If(Box::new(self.parse_if_statement()?)))
            } else {
                Some(ElseBranch::Block(self.parse_block()?))
            }
        } else {
            None
        };

        Ok(IfStatement {
            condition,
            then_branch,
            else_branch,
            span: self.span_from(start),
        })
    }

    /// while/until文を解析
    fn parse_while_statement(&mut self, kind: LoopKind) -> ParseResult<WhileStatement> {
        let start = self.current_span();
        self.advance();

        let condition = self.parse_expression_internal()?;
        let body = self.parse_block()?;

        Ok(WhileStatement {
            kind,
            condition,
            body,
            span: self.span_from(start),
        })
    }

    /// for文を解析
    fn parse_for_statement(&mut self) -> ParseResult<ForStatement> {
        let start = self.current_span();
        self.expect(Token::For)?;
        let id = self.next_id();
        let variable = self.expect_identifier()?;
        self.expect(Token::In)?;

        let range_start = self.parse_expression_internal()?;
        self.expect(Token::DotDot)?;
        let range_end = self.parse_expression_internal()?;

        let step = if self.match_token(&Token::Step) {
            Some(self.parse_expression_internal()?)
        } else {
            None
        };

        let body = self.parse_block()?;

        Ok(ForStatement {
            id,
            variable,
            start: range_start,
            end: range_end,
            step,
            body,
            span: self.span_from(start),
        })
    }

    /// switch文を解析
    fn parse_switch_statement(&mut self) -> ParseResult<SwitchStatement> {
        let start = self.current_span();
        self.expect(Token::Switch)?;

        let subject = self.parse_expression_internal()?;
        self.expect(Token::LeftBrace)?;

        let mut cases = Vec::new();
        let mut default = None;
        loop {
            let case_start = self.current_span();
            if self.match_token(&Token::Case) {
                let value = self.parse_expression_internal()?;
                let body = self.parse_block()?;
                cases.push(SwitchCase {
                    value,
                    body,
                    span: self.span_from(case_start),
                });
            } else if self.match_token(&Token::Default) {
                if default.is_some() {
                    return Err(self.error(
                        "a switch may have only one default".to_string(),
                        case_start,
                    ));
                }
                default = Some(self.parse_block()?);
            } else {
                break;
            }
            self.skip_semicolons();
        }

        self.expect(Token::RightBrace)?;
        Ok(SwitchStatement {
            subject,
            cases,
            default,
            span: self.span_from(start),
        })
    }

    /// print文を解析
    fn parse_print_statement(&mut self) -> ParseResult<PrintStatement> {
        let start = self.current_span();
        self.expect(Token::Print)?;
        self.expect(Token::LeftParen)?;
        let args = self.parse_argument_list(&Token::RightParen)?;
        self.expect(Token::RightParen)?;

        Ok(PrintStatement {
            args,
            span: self.span_from(start),
        })
    }
}
