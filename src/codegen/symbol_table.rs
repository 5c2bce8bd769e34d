//! 変数の格納場所の割り当て
//!
//! 命令を出力する前に関数本体を前順走査し、宣言ごとにローカル番号を決める。
//! パラメータは`0..n-1`、最初のローカルは`n`になる。

use std::collections::HashMap;
use std::fmt;

use crate::analyzer::{CheckedProgram, SymbolId};
use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use super::types::{value_type, ValType};

/// 変数の格納場所
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageSlot {
    ArgumentIndex(u32),
    LocalIndex(u32),
    /// `$`を除いたグローバル名
    GlobalName(String),
}

impl StorageSlot {
    /// 値を読み出す命令
    pub fn load(&self) -> String {
        match self {
            StorageSlot::ArgumentIndex(index) | StorageSlot::LocalIndex(index) => {
                format!("local.get {}", index)
            }
            StorageSlot::GlobalName(name) => format!("global.get ${}", name),
        }
    }

    /// 値を書き込む命令
    pub fn store(&self) -> String {
        match self {
            StorageSlot::ArgumentIndex(index) | StorageSlot::LocalIndex(index) => {
                format!("local.set {}", index)
            }
            StorageSlot::GlobalName(name) => format!("global.set ${}", name),
        }
    }
}

impl fmt::Display for StorageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageSlot::ArgumentIndex(index) => write!(f, "arg {}", index),
            StorageSlot::LocalIndex(index) => write!(f, "local {}", index),
            StorageSlot::GlobalName(name) => write!(f, "global ${}", name),
        }
    }
}

/// 捕捉されたグローバル変数の名前
pub fn global_name(name: &str) -> String {
    format!("g_{}", name)
}

/// 1関数分の格納場所表
#[derive(Debug, Default)]
pub struct SlotTable {
    slots: HashMap<SymbolId, StorageSlot>,
    params: u32,
    /// パラメータより後ろのローカルの型（番号順）
    locals: Vec<ValType>,
}

impl SlotTable {
    /// 捕捉されたグローバルだけを登録した表
    pub fn new(checked: &CheckedProgram<'_>) -> Self {
        let mut table = Self::default();
        for id in checked.captured_globals() {
            let name = global_name(&checked.symbol(id).name);
            table.slots.insert(id, StorageSlot::GlobalName(name));
        }
        table
    }

    /// ユーザー関数の表: パラメータとローカル宣言を割り当てる
    pub fn for_function(checked: &CheckedProgram<'_>, func: &FunctionDecl) -> AmimeResult<Self> {
        let mut table = Self::new(checked);
        for param in &func.params {
            let id = declared(checked, param.id, &param.name, param.span)?;
            table.slots.insert(id, StorageSlot::ArgumentIndex(table.params));
            table.params += 1;
        }
        table.scan_block(checked, &func.body)?;
        Ok(table)
    }

    /// エントリ関数の表: トップレベル文のローカル宣言を割り当てる
    pub fn for_main(checked: &CheckedProgram<'_>) -> AmimeResult<Self> {
        let mut table = Self::new(checked);
        for stmt in checked.program().top_level_statements() {
            table.scan_statement(checked, stmt)?;
        }
        Ok(table)
    }

    /// 作業用ローカルを末尾に確保する
    pub fn alloc_scratch(&mut self, ty: ValType) -> u32 {
        self.push_local(ty)
    }

    /// シンボルの格納場所
    pub fn slot(&self, id: SymbolId, name: &str, span: Span) -> AmimeResult<&StorageSlot> {
        self.slots.get(&id).ok_or_else(|| {
            CodegenError::UnresolvedSymbol {
                name: name.to_string(),
                span,
            }
            .into()
        })
    }

    pub fn param_count(&self) -> u32 {
        self.params
    }

    /// パラメータ以外のローカルの型（番号順）
    pub fn locals(&self) -> &[ValType] {
        &self.locals
    }

    fn push_local(&mut self, ty: ValType) -> u32 {
        let index = self.params + self.locals.len() as u32;
        self.locals.push(ty);
        index
    }

    /// 宣言を初出順に割り当てる（グローバル化された変数は除く）
    fn declare(&mut self, checked: &CheckedProgram<'_>, id: SymbolId) -> AmimeResult<()> {
        if self.slots.contains_key(&id) {
            return Ok(());
        }
        let ty = value_type(checked.symbol(id).ty)?;
        let index = self.push_local(ty);
        log::trace!("slot {} -> local {}", checked.symbol(id).name, index);
        self.slots.insert(id, StorageSlot::LocalIndex(index));
        Ok(())
    }

    fn scan_block(&mut self, checked: &CheckedProgram<'_>, block: &Block) -> AmimeResult<()> {
        for stmt in &block.statements {
            self.scan_statement(checked, stmt)?;
        }
        Ok(())
    }

    fn scan_statement(&mut self, checked: &CheckedProgram<'_>, stmt: &Statement) -> AmimeResult<()> {
        match stmt {
            Statement::Let(let_stmt) => {
                let id = declared(checked, let_stmt.id, &let_stmt.name, let_stmt.span)?;
                self.declare(checked, id)
            }
            Statement::Assignment(assign) => match checked.declaration(assign.id) {
                Some(id) => self.declare(checked, id),
                None => Ok(()),
            },
            Statement::For(for_stmt) => {
                let id = declared(checked, for_stmt.id, &for_stmt.variable, for_stmt.span)?;
                self.declare(checked, id)?;
                self.scan_block(checked, &for_stmt.body)
            }
            Statement::If(if_stmt) => self.scan_if(checked, if_stmt),
            Statement::While(while_stmt) => self.scan_block(checked, &while_stmt.body),
            Statement::Switch(switch) => {
                for case in &switch.cases {
                    self.scan_block(checked, &case.body)?;
                }
                match &switch.default {
                    Some(default) => self.scan_block(checked, default),
                    None => Ok(()),
                }
            }
            Statement::Block(block) => self.scan_block(checked, block),
            Statement::Return(_)
            | Statement::Break(_)
            | Statement::Print(_)
            | Statement::Expression(_) => Ok(()),
        }
    }

    fn scan_if(&mut self, checked: &CheckedProgram<'_>, if_stmt: &IfStatement) -> AmimeResult<()> {
        self.scan_block(checked, &if_stmt.then_branch)?;
        match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => self.scan_block(checked, block),
            Some(ElseBranch::If(nested)) => self.scan_if(checked, nested),
            None => Ok(()),
        }
    }
}

/// 宣言ノードのシンボル
fn declared(checked: &CheckedProgram<'_>, node: NodeId, name: &str, span: Span) -> AmimeResult<SymbolId> {
    checked.declaration(node).ok_or_else(|| {
        CodegenError::UnresolvedSymbol {
            name: name.to_string(),
            span,
        }
        .into()
    })
}
