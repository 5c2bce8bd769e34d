//! レキサーのメイン実装

use logos::{Lexer as LogosLexer, Logos};

use super::literal_parser::unescape_string;
use super::token::Token;
use crate::ast::Span;
use crate::error::LexerError;

/// 位置情報付きトークン
#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithPosition {
    pub token: Token,
    pub span: Span,
}

/// Amime言語のレキサー
///
/// logosのバイト範囲から行・列を計算しながらトークンを返す。
pub struct Lexer<'a> {
    inner: LogosLexer<'a, Token>,
    input: &'a str,
    line: usize,
    column: usize,
    last_end: usize,
}

impl<'a> Lexer<'a> {
    /// 新しいレキサーを作成
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: Token::lexer(input),
            input,
            line: 1,
            column: 1,
            last_end: 0,
        }
    }

    /// すべてのトークンを収集（最初のエラーで停止）
    pub fn collect_tokens(self) -> Result<Vec<TokenWithPosition>, LexerError> {
        self.collect()
    }

    fn advance_to(&mut self, offset: usize) {
        if offset <= self.last_end {
            return;
        }
        for ch in self.input[self.last_end..offset].chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.last_end = offset;
    }

    fn finish(&self, token: Token, span: Span) -> Result<TokenWithPosition, LexerError> {
        let token = match token {
            Token::String(raw) => match unescape_string(&raw) {
                Ok(value) => Token::String(value),
                Err(sequence) => return Err(LexerError::InvalidEscape { sequence, span }),
            },
            Token::UnterminatedString => return Err(LexerError::UnterminatedString { span }),
            // `-2147483648`の絶対値までは通し、範囲はパーサーで確定する
            Token::Integer(value) if value > i64::from(i32::MAX) + 1 => {
                return Err(LexerError::InvalidNumber {
                    message: format!("{} does not fit in a 32-bit int", value),
                    span,
                })
            }
            other => other,
        };
        Ok(TokenWithPosition { token, span })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<TokenWithPosition, LexerError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let range = self.inner.span();

        self.advance_to(range.start);
        let span = Span::new(range.start, range.end, self.line, self.column);
        self.advance_to(range.end);

        Some(match result {
            Ok(token) => self.finish(token, span),
            Err(()) => {
                let text = &self.input[range.start..range.end];
                if text.chars().all(|c| c.is_ascii_digit() || c == '.') {
                    Err(LexerError::InvalidNumber {
                        message: format!("'{}' is out of range", text),
                        span,
                    })
                } else {
                    Err(LexerError::UnrecognizedToken {
                        token: text.to_string(),
                        span,
                    })
                }
            }
        })
    }
}

/// ソースコードをトークン化
pub fn tokenize(input: &str) -> Result<Vec<TokenWithPosition>, LexerError> {
    Lexer::new(input).collect_tokens()
}

/// デバッグ用：トークンストリームを文字列として出力
pub fn format_tokens(tokens: &[TokenWithPosition]) -> String {
    tokens
        .iter()
        .map(|t| format!("{:>3}:{:<3} {:?}", t.span.line, t.span.column, t.token))
        .collect::<Vec<_>>()
        .join("\n")
}
