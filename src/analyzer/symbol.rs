//! シンボルおよび関連するデータ構造

use crate::ast::Span;

use super::scope::ScopeId;
use super::types::TypeTag;

/// シンボルの識別子（シンボルアリーナのインデックス）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub usize);

/// シンボルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
}

/// シンボル情報
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub ty: TypeTag,
    /// 宣言されたスコープ（`define`時に設定される）
    pub scope: ScopeId,
    pub span: Span,
}

impl Symbol {
    pub fn new(name: impl Into<String>, kind: SymbolKind, ty: TypeTag, span: Span) -> Self {
        Self {
            name: name.into(),
            kind,
            ty,
            scope: ScopeId::GLOBAL,
            span,
        }
    }
}

/// 関数シグネチャ情報
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub params: Vec<(String, TypeTag)>,
    pub return_type: TypeTag,
    pub span: Span,
    /// ランタイムが提供する組み込み関数か
    pub builtin: bool,
}

impl FunctionSignature {
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn param_types(&self) -> impl Iterator<Item = TypeTag> + '_ {
        self.params.iter().map(|(_, ty)| *ty)
    }
}

/// 文・ブロックの終了状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Termination {
    /// 後続の文に制御が流れる
    #[default]
    None,
    /// breakで抜ける
    Break,
    /// すべての経路でreturnする
    Return,
}

impl Termination {
    pub fn is_terminated(self) -> bool {
        self != Termination::None
    }

    /// 両方の分岐の合流（if/else）
    pub fn join(self, other: Termination) -> Termination {
        match (self, other) {
            (Termination::Return, Termination::Return) => Termination::Return,
            (a, b) if a.is_terminated() && b.is_terminated() => Termination::Break,
            _ => Termination::None,
        }
    }
}
