//! セマンティック解析器のメイン実装

use std::collections::{BTreeSet, HashMap};

use crate::ast::*;
use crate::error::{AmimeError, AmimeResult, AnalyzerError, Diagnostics};

use super::annotations::TypeAnnotations;
use super::checked::{AnalysisOutcome, CheckedProgram};
use super::function_table::FunctionTable;
use super::scope::ScopeManager;
use super::symbol::{SymbolId, Termination};
use super::type_checker::TypeChecker;
use super::types::TypeTag;

// サブモジュール
mod declarations;
mod expressions;
mod statements;

/// 検査中の関数の文脈
#[derive(Debug, Clone)]
pub(super) struct FunctionContext {
    pub name: String,
    pub return_type: TypeTag,
    /// トップレベル文（エントリポイント）を検査中か
    pub is_main: bool,
}

impl FunctionContext {
    fn main() -> Self {
        Self {
            name: "main".to_string(),
            return_type: TypeTag::Void,
            is_main: true,
        }
    }
}

/// ブロック内の到達可能性の追跡
#[derive(Debug, Default)]
pub(super) struct BlockFlow {
    pub termination: Termination,
    reported_unreachable: bool,
}

/// セマンティック解析器
///
/// 1回のコンパイル専用。状態はすべてこの構造体が所有する。
pub struct SemanticAnalyzer {
    /// スコープとシンボル
    pub(super) scopes: ScopeManager,
    /// 関数シグネチャ
    pub(super) functions: FunctionTable,
    /// 型チェッカー
    pub(super) type_checker: TypeChecker,
    /// 式の型
    pub(super) annotations: TypeAnnotations,
    /// 収集された診断
    pub(super) diagnostics: Diagnostics,
    pub(super) declarations: HashMap<NodeId, SymbolId>,
    pub(super) references: HashMap<NodeId, SymbolId>,
    pub(super) captured_globals: BTreeSet<SymbolId>,
    pub(super) always_returns: HashMap<NodeId, bool>,
    /// 現在の関数の文脈（return文のチェック用）
    pub(super) current_function: FunctionContext,
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self {
            scopes: ScopeManager::new(),
            functions: FunctionTable::new(),
            type_checker: TypeChecker::new(),
            annotations: TypeAnnotations::new(),
            diagnostics: Diagnostics::new(),
            declarations: HashMap::new(),
            references: HashMap::new(),
            captured_globals: BTreeSet::new(),
            always_returns: HashMap::new(),
            current_function: FunctionContext::main(),
        }
    }

    /// プログラム全体を解析する
    ///
    /// ユーザーのエラーは`AnalysisOutcome`の診断に入る。`Err`は木の形が
    /// 解釈できない場合のみ。
    pub fn analyze(mut self, program: &Program) -> AmimeResult<AnalysisOutcome<'_>> {
        // 第一パス: 関数シグネチャを収集
        for func in program.functions() {
            self.collect_function_signature(func)?;
        }

        // 第二パス: ソース順に関数本体とトップレベル文を解析
        let mut main_flow = BlockFlow::default();
        for item in &program.items {
            match item {
                Item::Function(func) => self.analyze_function(func)?,
                Item::Statement(stmt) => {
                    self.current_function = FunctionContext::main();
                    self.analyze_statement_in_flow(&mut main_flow, stmt)?;
                }
            }
        }

        log::debug!(
            "analysis finished: {} annotated expressions, {} diagnostics",
            self.annotations.len(),
            self.diagnostics.len()
        );

        let checked = CheckedProgram {
            program,
            annotations: self.annotations,
            functions: self.functions,
            symbols: self.scopes.into_symbols(),
            declarations: self.declarations,
            references: self.references,
            captured_globals: self.captured_globals,
            always_returns: self.always_returns,
            main_always_returns: main_flow.termination == Termination::Return,
        };

        Ok(AnalysisOutcome {
            checked,
            diagnostics: self.diagnostics,
        })
    }

    /// 診断を記録
    pub(super) fn report(&mut self, error: AnalyzerError) {
        self.diagnostics.push(error);
    }

    /// 到達可能性を追跡しながら1文を解析
    ///
    /// 終了済みのブロックで最初に現れた文だけを到達不能として報告する。
    pub(super) fn analyze_statement_in_flow(
        &mut self,
        flow: &mut BlockFlow,
        stmt: &Statement,
    ) -> AmimeResult<()> {
        if flow.termination.is_terminated() && !flow.reported_unreachable {
            self.report(AnalyzerError::UnreachableCode { span: stmt.span() });
            flow.reported_unreachable = true;
        }

        let termination = self.analyze_statement(stmt)?;
        if !flow.termination.is_terminated() {
            flow.termination = termination;
        }
        Ok(())
    }

    /// 宣言ノードとシンボルを結び付ける
    pub(super) fn record_declaration(&mut self, node: NodeId, id: SymbolId, span: Span) -> AmimeResult<()> {
        self.ensure_unbound(node, span)?;
        self.declarations.insert(node, id);
        Ok(())
    }

    /// 参照ノードとシンボルを結び付ける
    pub(super) fn record_reference(&mut self, node: NodeId, id: SymbolId, span: Span) -> AmimeResult<()> {
        self.ensure_unbound(node, span)?;
        self.references.insert(node, id);
        Ok(())
    }

    fn ensure_unbound(&self, node: NodeId, span: Span) -> AmimeResult<()> {
        if self.declarations.contains_key(&node) || self.references.contains_key(&node) {
            return Err(AmimeError::malformed(
                format!("node id {} appears more than once", node),
                span,
            ));
        }
        Ok(())
    }

    /// 変数の使用を記録（関数本体から見えるグローバル変数は捕捉扱い）
    pub(super) fn note_variable_use(&mut self, id: SymbolId) {
        if !self.current_function.is_main && self.scopes.is_global_variable(id) {
            self.captured_globals.insert(id);
        }
    }
}
