//! 式ノードの型を記録するサイドテーブル

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::types::TypeTag;
use crate::ast::{NodeId, Span};
use crate::error::{AmimeError, AmimeResult};

/// ノードID → 型タグ
///
/// 検査パスで各ノードにつき一度だけ書き込まれ、以後は読み取り専用。
#[derive(Debug, Default, Clone)]
pub struct TypeAnnotations {
    types: HashMap<NodeId, TypeTag>,
}

impl TypeAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// 型を記録する
    ///
    /// 同じノードへの二度目の記録はノードIDが一意でない木を意味するため致命的。
    pub fn record(&mut self, id: NodeId, tag: TypeTag, span: Span) -> AmimeResult<()> {
        match self.types.entry(id) {
            Entry::Occupied(_) => Err(AmimeError::malformed(
                format!("node id {} appears more than once", id),
                span,
            )),
            Entry::Vacant(slot) => {
                slot.insert(tag);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: NodeId) -> Option<TypeTag> {
        self.types.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
