//! スコープ管理
//!
//! スコープはアリーナに保持し、親へのインデックスで連鎖させる。
//! 親スコープの束縛をコピーせず、検索は連鎖を内側から外側へたどる。

use indexmap::IndexMap;

use super::symbol::{Symbol, SymbolId, SymbolKind};
use crate::error::AnalyzerError;

/// スコープの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

/// スコープの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Function,
    Block,
    Loop,
    Switch,
}

/// 単一のスコープ
#[derive(Debug)]
struct Scope {
    kind: ScopeKind,
    /// 検索専用の親リンク
    parent: Option<ScopeId>,
    names: IndexMap<String, SymbolId>,
}

/// 入れ子のシンボルテーブル
#[derive(Debug)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    symbols: Vec<Symbol>,
    current: ScopeId,
}

impl Default for ScopeManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeManager {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Global,
                parent: None,
                names: IndexMap::new(),
            }],
            symbols: Vec::new(),
            current: ScopeId::GLOBAL,
        }
    }

    pub fn enter_scope(&mut self, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            kind,
            parent: Some(self.current),
            names: IndexMap::new(),
        });
        self.current = id;
        log::trace!("enter {:?} scope {}", kind, id.0);
        id
    }

    /// 現在のスコープを抜ける（グローバルスコープでは何もしない）
    pub fn exit_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0].parent {
            log::trace!("exit scope {}", self.current.0);
            self.current = parent;
        }
    }

    /// 現在のスコープにシンボルを定義
    ///
    /// 同じ名前が現在のスコープにある場合のみ失敗する。外側の同名は隠される。
    pub fn define(&mut self, mut symbol: Symbol) -> Result<SymbolId, AnalyzerError> {
        let scope = &mut self.scopes[self.current.0];
        if scope.names.contains_key(&symbol.name) {
            return Err(AnalyzerError::DuplicateSymbol {
                name: symbol.name,
                span: symbol.span,
            });
        }

        let id = SymbolId(self.symbols.len());
        symbol.scope = self.current;
        scope.names.insert(symbol.name.clone(), id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// 内側から外側へ名前を検索
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let current = &self.scopes[id.0];
            if let Some(symbol) = current.names.get(name) {
                return Some(*symbol);
            }
            scope = current.parent;
        }
        None
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    pub fn current_kind(&self) -> ScopeKind {
        self.scopes[self.current.0].kind
    }

    /// 関数境界より内側にループまたはswitchがあるか
    pub fn in_breakable(&self) -> bool {
        let mut scope = Some(self.current);
        while let Some(id) = scope {
            let current = &self.scopes[id.0];
            match current.kind {
                ScopeKind::Loop | ScopeKind::Switch => return true,
                ScopeKind::Function | ScopeKind::Global => return false,
                ScopeKind::Block => scope = current.parent,
            }
        }
        false
    }

    /// グローバルスコープで宣言された変数か
    pub fn is_global_variable(&self, id: SymbolId) -> bool {
        let symbol = self.symbol(id);
        symbol.scope == ScopeId::GLOBAL && symbol.kind == SymbolKind::Variable
    }

    /// シンボルアリーナを取り出す
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}
