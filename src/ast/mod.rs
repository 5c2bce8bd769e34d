//! Abstract Syntax Tree (AST) definitions for the Amime language.
//!
//! 木はこのクレートの`parser`、またはJSONを出力する外部パーサーが構築する。
//! 各式・宣言ノードはパーサーが振った`NodeId`を持ち、意味解析の結果は
//! このIDをキーとするサイドテーブルに記録される。

use serde::{Deserialize, Serialize};

mod expressions;
mod program;
mod statements;
mod types;

pub use expressions::*;
pub use program::*;
pub use statements::*;
pub use types::*;

/// Span information for source location tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    /// 1始まりの行番号
    pub line: usize,
    /// 1始まりの列番号
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    pub fn dummy() -> Self {
        Self {
            start: 0,
            end: 0,
            line: 0,
            column: 0,
        }
    }

    /// 2つのスパンを覆うスパン（位置は`self`側を使う）
    pub fn to(self, other: Span) -> Span {
        Span {
            start: self.start,
            end: other.end.max(self.end),
            line: self.line,
            column: self.column,
        }
    }
}

/// ノード識別子
///
/// 1つの木の中で一意であることがパーサーとの契約。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
