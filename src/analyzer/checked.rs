//! 検査済みプログラム
//!
//! コード生成器は`CheckedProgram`しか受け取らないため、診断が一件でも
//! あればコード生成に進めない。

use std::collections::{BTreeSet, HashMap};

use super::annotations::TypeAnnotations;
use super::function_table::FunctionTable;
use super::symbol::{Symbol, SymbolId};
use super::types::TypeTag;
use crate::ast::{NodeId, Program};
use crate::error::Diagnostics;

/// 意味解析の結果
#[derive(Debug)]
pub struct AnalysisOutcome<'p> {
    pub(super) checked: CheckedProgram<'p>,
    pub(super) diagnostics: Diagnostics,
}

impl<'p> AnalysisOutcome<'p> {
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// 診断がなければ検査済みプログラムを返す
    pub fn into_checked(self) -> Result<CheckedProgram<'p>, Diagnostics> {
        if self.diagnostics.is_empty() {
            Ok(self.checked)
        } else {
            Err(self.diagnostics)
        }
    }
}

/// 診断なしで検査を通過したプログラムと、その解析結果
#[derive(Debug)]
pub struct CheckedProgram<'p> {
    pub(super) program: &'p Program,
    pub(super) annotations: TypeAnnotations,
    pub(super) functions: FunctionTable,
    pub(super) symbols: Vec<Symbol>,
    /// 宣言ノード → シンボル（let、暗黙宣言の代入、for変数、パラメータ、関数）
    pub(super) declarations: HashMap<NodeId, SymbolId>,
    /// 参照ノード → シンボル（識別子、既存変数への代入）
    pub(super) references: HashMap<NodeId, SymbolId>,
    /// 関数本体から参照されるグローバル変数
    pub(super) captured_globals: BTreeSet<SymbolId>,
    /// 関数ID → 本体がすべての経路でreturnするか
    pub(super) always_returns: HashMap<NodeId, bool>,
    pub(super) main_always_returns: bool,
}

impl<'p> CheckedProgram<'p> {
    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn annotations(&self) -> &TypeAnnotations {
        &self.annotations
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// 式ノードの型
    pub fn type_of(&self, id: NodeId) -> Option<TypeTag> {
        self.annotations.get(id)
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn declaration(&self, node: NodeId) -> Option<SymbolId> {
        self.declarations.get(&node).copied()
    }

    pub fn reference(&self, node: NodeId) -> Option<SymbolId> {
        self.references.get(&node).copied()
    }

    /// 代入文の対象（暗黙宣言なら宣言、そうでなければ参照）
    pub fn assignment_target(&self, node: NodeId) -> Option<SymbolId> {
        self.declaration(node).or_else(|| self.reference(node))
    }

    pub fn captured_globals(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.captured_globals.iter().copied()
    }

    pub fn is_captured(&self, id: SymbolId) -> bool {
        self.captured_globals.contains(&id)
    }

    pub fn always_returns(&self, function: NodeId) -> bool {
        self.always_returns.get(&function).copied().unwrap_or(false)
    }

    pub fn main_always_returns(&self) -> bool {
        self.main_always_returns
    }
}
