//! 分岐ラベルの払い出し
//!
//! ラベル番号は関数ごとに0から振り、各ラベルは一度だけ定義される。

use std::collections::HashSet;

use crate::error::{AmimeResult, CodegenError};

/// ラベルの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Else,
    End,
    Start,
    Case(usize),
}

/// 構文要素1つ分のラベル群
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelGroup(u32);

impl LabelGroup {
    pub fn label(self, kind: LabelKind) -> String {
        match kind {
            LabelKind::Else => format!("$else_{}", self.0),
            LabelKind::End => format!("$end_{}", self.0),
            LabelKind::Start => format!("$start_{}", self.0),
            LabelKind::Case(index) => format!("$case_{}_{}", self.0, index),
        }
    }
}

/// ラベルアロケータ
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: u32,
    defined: HashSet<String>,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいラベル群を払い出す
    pub fn fresh(&mut self) -> LabelGroup {
        let group = LabelGroup(self.next);
        self.next += 1;
        group
    }

    /// ラベルを定義する（二重定義は内部エラー）
    pub fn define(&mut self, group: LabelGroup, kind: LabelKind) -> AmimeResult<String> {
        let label = group.label(kind);
        if !self.defined.insert(label.clone()) {
            return Err(CodegenError::Internal {
                message: format!("label {} defined twice", label),
            }
            .into());
        }
        Ok(label)
    }
}
