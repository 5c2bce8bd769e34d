//! プログラム構造

use serde::{Deserialize, Serialize};

use super::{Block, NodeId, Span, Statement, Type};

/// ASTのルートノード（完全なAmimeプログラムを表す）
///
/// トップレベルには関数宣言と文が混在できる。文はソース順に
/// エントリポイント`main`の本体になる。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub items: Vec<Item>,
    pub span: Span,
}

impl Program {
    /// 関数宣言をソース順に列挙
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDecl> {
        self.items.iter().filter_map(|item| match item {
            Item::Function(func) => Some(func),
            Item::Statement(_) => None,
        })
    }

    /// トップレベルの文をソース順に列挙
    pub fn top_level_statements(&self) -> impl Iterator<Item = &Statement> {
        self.items.iter().filter_map(|item| match item {
            Item::Statement(stmt) => Some(stmt),
            Item::Function(_) => None,
        })
    }
}

/// Top-level items in a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Item {
    Function(FunctionDecl),
    Statement(Statement),
}

/// 関数宣言
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub id: NodeId,
    pub name: String,
    pub params: Vec<Parameter>,
    /// 省略時はvoid
    pub return_type: Option<Type>,
    pub body: Block,
    pub span: Span,
}

impl FunctionDecl {
    pub fn return_type(&self) -> Type {
        self.return_type.unwrap_or(Type::Void)
    }
}

/// 関数パラメータ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: NodeId,
    pub name: String,
    pub ty: Type,
    pub span: Span,
}
