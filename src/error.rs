//! 統一的なエラーハンドリングモジュール
//!
//! このモジュールは、Amimeコンパイラ全体で使用されるエラー型と
//! 診断情報（Diagnostics）の蓄積・報告の仕組みを提供します。
//!
//! - 字句解析・構文解析・コード生成のエラーは`AmimeError`として即座に伝播する。
//! - 意味解析のエラーは`AnalyzerError`として`Diagnostics`に蓄積され、
//!   解析自体は継続する。
//! - パーサーとの契約違反（解釈できない木の形）だけは`AmimeError::MalformedTree`
//!   として解析を中断する。

use crate::ast::Span;
use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label};
use std::fmt;
use thiserror::Error;

/// Amimeコンパイラの統一エラー型
#[derive(Error, Debug, Clone)]
pub enum AmimeError {
    /// レキサーエラー
    #[error("lexical error: {0}")]
    Lexer(#[from] LexerError),

    /// パーサーエラー
    #[error("syntax error: {0}")]
    Parser(#[from] ParserError),

    /// 解釈できない構文木（パーサー契約違反）
    #[error("malformed syntax tree: {message}")]
    MalformedTree { message: String, span: Span },

    /// コード生成エラー
    #[error("code generation error: {0}")]
    Codegen(#[from] CodegenError),

    /// ファイルI/Oエラー
    #[error("I/O error: {0}")]
    Io(String),

    /// その他のエラー
    #[error("{0}")]
    Other(String),
}

/// レキサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexerError {
    #[error("unrecognized token '{token}'")]
    UnrecognizedToken { token: String, span: Span },

    #[error("unterminated string literal")]
    UnterminatedString { span: Span },

    #[error("invalid number literal: {message}")]
    InvalidNumber { message: String, span: Span },

    #[error("invalid escape sequence '{sequence}'")]
    InvalidEscape { sequence: String, span: Span },
}

impl LexerError {
    pub fn span(&self) -> Span {
        match self {
            LexerError::UnrecognizedToken { span, .. }
            | LexerError::UnterminatedString { span }
            | LexerError::InvalidNumber { span, .. }
            | LexerError::InvalidEscape { span, .. } => *span,
        }
    }
}

/// パーサーエラーの詳細
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParserError {
    #[error("expected {expected}, found {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String, span: Span },

    #[error("{message}")]
    SyntaxError { message: String, span: Span },
}

impl ParserError {
    pub fn span(&self) -> Span {
        match self {
            ParserError::UnexpectedToken { span, .. }
            | ParserError::UnexpectedEof { span, .. }
            | ParserError::SyntaxError { span, .. } => *span,
        }
    }
}

/// セマンティック解析エラーの詳細
///
/// いずれもローカルに回復可能で、`Diagnostics`に記録される。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyzerError {
    #[error("'{name}' is already declared in this scope")]
    DuplicateSymbol { name: String, span: Span },

    #[error("function '{name}' is already defined")]
    DuplicateFunction { name: String, span: Span },

    #[error("undeclared variable '{name}'")]
    UndeclaredVariable { name: String, span: Span },

    #[error("undeclared function '{name}'")]
    UndeclaredFunction { name: String, span: Span },

    #[error("wrong number of arguments to '{name}': expected {expected}, got {found}")]
    ArityMismatch {
        name: String,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("type mismatch: {message}")]
    TypeMismatch { message: String, span: Span },

    #[error("condition of '{construct}' must be bool, found {found}")]
    InvalidConditionType {
        construct: String,
        found: String,
        span: Span,
    },

    #[error("unreachable code")]
    UnreachableCode { span: Span },

    #[error("'break' outside of a loop or switch")]
    BreakOutsideLoop { span: Span },

    #[error("{message}")]
    ReturnTypeMismatch { message: String, span: Span },

    #[error("cannot cast {from} to {to}")]
    InvalidCast { from: String, to: String, span: Span },
}

impl AnalyzerError {
    pub fn span(&self) -> Span {
        match self {
            AnalyzerError::DuplicateSymbol { span, .. }
            | AnalyzerError::DuplicateFunction { span, .. }
            | AnalyzerError::UndeclaredVariable { span, .. }
            | AnalyzerError::UndeclaredFunction { span, .. }
            | AnalyzerError::ArityMismatch { span, .. }
            | AnalyzerError::TypeMismatch { span, .. }
            | AnalyzerError::InvalidConditionType { span, .. }
            | AnalyzerError::UnreachableCode { span }
            | AnalyzerError::BreakOutsideLoop { span }
            | AnalyzerError::ReturnTypeMismatch { span, .. }
            | AnalyzerError::InvalidCast { span, .. } => *span,
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            AnalyzerError::DuplicateSymbol { .. } => DiagnosticKind::DuplicateSymbol,
            AnalyzerError::DuplicateFunction { .. } => DiagnosticKind::DuplicateFunction,
            AnalyzerError::UndeclaredVariable { .. } => DiagnosticKind::UndeclaredVariable,
            AnalyzerError::UndeclaredFunction { .. } => DiagnosticKind::UndeclaredFunction,
            AnalyzerError::ArityMismatch { .. } => DiagnosticKind::ArityMismatch,
            AnalyzerError::TypeMismatch { .. } => DiagnosticKind::TypeMismatch,
            AnalyzerError::InvalidConditionType { .. } => DiagnosticKind::InvalidConditionType,
            AnalyzerError::UnreachableCode { .. } => DiagnosticKind::UnreachableCode,
            AnalyzerError::BreakOutsideLoop { .. } => DiagnosticKind::BreakOutsideLoop,
            AnalyzerError::ReturnTypeMismatch { .. } => DiagnosticKind::ReturnTypeMismatch,
            AnalyzerError::InvalidCast { .. } => DiagnosticKind::InvalidCast,
        }
    }

    /// ラベルに添える短い説明
    fn label_message(&self) -> &'static str {
        match self {
            AnalyzerError::DuplicateSymbol { .. } | AnalyzerError::DuplicateFunction { .. } => {
                "duplicate definition"
            }
            AnalyzerError::UndeclaredVariable { .. } => "not found in this scope",
            AnalyzerError::UndeclaredFunction { .. } => "no function with this name",
            AnalyzerError::ArityMismatch { .. } => "called here",
            AnalyzerError::TypeMismatch { .. } | AnalyzerError::InvalidCast { .. } => {
                "incompatible types"
            }
            AnalyzerError::InvalidConditionType { .. } => "expected bool",
            AnalyzerError::UnreachableCode { .. } => "this statement is never executed",
            AnalyzerError::BreakOutsideLoop { .. } => "cannot break here",
            AnalyzerError::ReturnTypeMismatch { .. } => "in this function",
        }
    }
}

/// コード生成エラーの詳細
///
/// チェック済みの木に対しては発生しないはずの内部エラー。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    #[error("internal error: {message}")]
    Internal { message: String },

    #[error("no type recorded for expression {node}")]
    MissingAnnotation { node: crate::ast::NodeId },

    #[error("no storage slot for '{name}'")]
    UnresolvedSymbol { name: String, span: Span },
}

/// 診断の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    DuplicateSymbol,
    DuplicateFunction,
    UndeclaredVariable,
    UndeclaredFunction,
    ArityMismatch,
    TypeMismatch,
    InvalidConditionType,
    UnreachableCode,
    BreakOutsideLoop,
    ReturnTypeMismatch,
    InvalidCast,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// 診断の重大度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// 構造化された診断情報
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub error: AnalyzerError,
}

impl Diagnostic {
    pub fn error(error: AnalyzerError) -> Self {
        Self {
            severity: Severity::Error,
            kind: error.kind(),
            message: error.to_string(),
            span: error.span(),
            error,
        }
    }

    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn column(&self) -> usize {
        self.span.column
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_codespan(&self, file_id: usize) -> CodespanDiagnostic<usize> {
        let base = match self.severity {
            Severity::Error => CodespanDiagnostic::error(),
            Severity::Warning => CodespanDiagnostic::warning(),
        };
        base.with_message(&self.message)
            .with_code(self.kind.to_string())
            .with_labels(vec![Label::primary(file_id, self.span.start..self.span.end)
                .with_message(self.error.label_message())])
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}]",
            self.line(),
            self.column(),
            self.message,
            self.kind
        )
    }
}

/// 診断情報を蓄積するためのコレクター
///
/// 追加のみ可能。出力時は`in_source_order`で位置順に並べる。
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// エラーを追加
    pub fn push(&mut self, error: AnalyzerError) {
        log::debug!("diagnostic at {}:{}: {}", error.span().line, error.span().column, error);
        self.entries.push(Diagnostic::error(error));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 追加された順で列挙
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// ソース位置順（同位置は追加順）
    pub fn in_source_order(&self) -> Vec<&Diagnostic> {
        let mut sorted: Vec<&Diagnostic> = self.entries.iter().collect();
        sorted.sort_by_key(|d| (d.line(), d.column()));
        sorted
    }

    /// 指定した種類の診断の数
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.entries.iter().filter(|d| d.kind == kind).count()
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.entries.iter().map(|d| d.kind).collect()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl AmimeError {
    /// 木の形が解釈できない場合のエラーを作成
    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        AmimeError::MalformedTree {
            message: message.into(),
            span,
        }
    }

    fn span(&self) -> Option<Span> {
        match self {
            AmimeError::Lexer(e) => Some(e.span()),
            AmimeError::Parser(e) => Some(e.span()),
            AmimeError::MalformedTree { span, .. } => Some(*span),
            AmimeError::Codegen(CodegenError::UnresolvedSymbol { span, .. }) => Some(*span),
            AmimeError::Codegen(_) | AmimeError::Io(_) | AmimeError::Other(_) => None,
        }
    }

    /// codespan-reportingのDiagnosticに変換
    pub fn to_diagnostic(&self, file_id: usize) -> CodespanDiagnostic<usize> {
        let labels = match self.span() {
            Some(span) if span.end > span.start => {
                vec![Label::primary(file_id, span.start..span.end)]
            }
            _ => vec![],
        };
        CodespanDiagnostic::error()
            .with_message(self.to_string())
            .with_labels(labels)
    }
}

impl From<std::io::Error> for AmimeError {
    fn from(e: std::io::Error) -> Self {
        AmimeError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for AmimeError {
    fn from(e: serde_json::Error) -> Self {
        AmimeError::MalformedTree {
            message: e.to_string(),
            span: Span::new(0, 0, e.line(), e.column()),
        }
    }
}

/// Result型のエイリアス
pub type AmimeResult<T> = Result<T, AmimeError>;
