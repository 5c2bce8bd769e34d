//! メインパーサー構造とユーティリティ

use crate::ast::*;
use crate::error::ParserError;
use crate::lexer::{Token, TokenWithPosition};

use super::{ParseError, ParseResult};

/// Amimeパーサー
///
/// ノードIDは解析順に0から振られる。
pub struct Parser {
    pub(super) tokens: Vec<TokenWithPosition>,
    pub(super) current: usize,
    next_id: u32,
}

impl Parser {
    pub fn new(tokens: Vec<TokenWithPosition>) -> Self {
        Self {
            tokens,
            current: 0,
            next_id: 0,
        }
    }

    /// 完全なプログラムを解析
    pub fn parse(&mut self) -> ParseResult<Program> {
        let start = self.current_span();
        let mut items = Vec::new();
        while !self.is_at_end() {
            items.push(self.parse_item()?);
        }

        Ok(Program {
            items,
            span: self.span_from(start),
        })
    }

    /// 単一の式を解析
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_expression_internal()
    }

    /// 単一の文を解析
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        self.parse_statement_internal()
    }

    /// トップレベルアイテムを解析
    fn parse_item(&mut self) -> ParseResult<Item> {
        if self.check(&Token::Fn) {
            Ok(Item::Function(self.parse_function_decl()?))
        } else {
            Ok(Item::Statement(self.parse_statement_internal()?))
        }
    }

    // ==================== ユーティリティメソッド ====================

    /// 新しいノードIDを払い出す
    pub(super) fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// 現在のトークンを取得
    pub(super) fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.current).map(|t| &t.token)
    }

    /// 特定のオフセット先のトークンを取得
    pub(super) fn peek(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.current + offset).map(|t| &t.token)
    }

    /// 現在のスパンを取得（終端では最後のトークンの直後）
    pub(super) fn current_span(&self) -> Span {
        match self.tokens.get(self.current) {
            Some(t) => t.span,
            None => self
                .tokens
                .last()
                .map(|t| Span::new(t.span.end, t.span.end, t.span.line, t.span.column))
                .unwrap_or_else(|| Span::new(0, 0, 1, 1)),
        }
    }

    /// 開始位置から直前のトークンまでのスパンを作成
    pub(super) fn span_from(&self, start: Span) -> Span {
        let end = if self.current > 0 {
            self.tokens
                .get(self.current - 1)
                .map(|t| t.span.end)
                .unwrap_or(start.end)
        } else {
            start.end
        };
        Span::new(start.start, end.max(start.start), start.line, start.column)
    }

    /// 次のトークンに進む
    pub(super) fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    /// 終端に到達したかチェック
    pub(super) fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// 特定のトークンをチェック（進まない）
    pub(super) fn check(&self, token_type: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(token) == std::mem::discriminant(token_type)
        } else {
            false
        }
    }

    /// 特定のトークンにマッチしたら進む
    pub(super) fn match_token(&mut self, token_type: &Token) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// 特定のトークンを期待
    pub(super) fn expect(&mut self, token_type: Token) -> ParseResult<()> {
        if self.check(&token_type) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(&token_type.to_string()))
        }
    }

    /// 識別子を期待
    pub(super) fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current_token() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// 文末の`;`を読み飛ばす（省略可能）
    pub(super) fn skip_semicolons(&mut self) {
        while self.match_token(&Token::Semicolon) {}
    }

    /// 期待と異なるトークンのエラーを作成
    pub(super) fn unexpected(&self, expected: &str) -> ParseError {
        match self.current_token() {
            Some(token) => ParserError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.to_string(),
                span: self.current_span(),
            },
            None => ParserError::UnexpectedEof {
                expected: expected.to_string(),
                span: self.current_span(),
            },
        }
    }

    /// エラーを作成
    pub(super) fn error(&self, message: String, span: Span) -> ParseError {
        ParserError::SyntaxError { message, span }
    }
}
