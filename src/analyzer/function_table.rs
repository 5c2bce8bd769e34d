//! 関数シグネチャのカタログ
//!
//! 本体の検査より前に全体を走査して構築するため、前方参照・相互再帰の
//! 呼び出しを検査できる。

use indexmap::IndexMap;

use super::symbol::FunctionSignature;
use super::types::TypeTag;
use crate::ast::Span;
use crate::error::AnalyzerError;

/// 名前から関数シグネチャへの表
#[derive(Debug, Clone)]
pub struct FunctionTable {
    signatures: IndexMap<String, FunctionSignature>,
}

impl Default for FunctionTable {
    fn default() -> Self {
        let mut table = Self {
            signatures: IndexMap::new(),
        };
        table.register_builtin_functions();
        table
    }
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// ビルトイン関数を登録
    fn register_builtin_functions(&mut self) {
        let builtins: [(&str, &[(&str, TypeTag)], TypeTag); 5] = [
            ("node", &[("name", TypeTag::String)], TypeTag::NODE),
            ("arc", &[("from", TypeTag::NODE), ("to", TypeTag::NODE)], TypeTag::ARC),
            ("graph", &[], TypeTag::GRAPH),
            ("size", &[("set", TypeTag::Set)], TypeTag::Int),
            ("len", &[("text", TypeTag::String)], TypeTag::Int),
        ];

        for (name, params, return_type) in builtins {
            self.signatures.insert(
                name.to_string(),
                FunctionSignature {
                    name: name.to_string(),
                    params: params
                        .iter()
                        .map(|(param, ty)| (param.to_string(), *ty))
                        .collect(),
                    return_type,
                    span: Span::dummy(),
                    builtin: true,
                },
            );
        }
    }

    /// 関数を登録
    ///
    /// 同名が既にあれば拒否し、最初の宣言を残す。
    pub fn register(&mut self, signature: FunctionSignature) -> Result<(), AnalyzerError> {
        if self.signatures.contains_key(&signature.name) {
            return Err(AnalyzerError::DuplicateFunction {
                name: signature.name,
                span: signature.span,
            });
        }
        self.signatures.insert(signature.name.clone(), signature);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.get(name)
    }

    /// ユーザー定義関数を登録順に列挙
    pub fn user_functions(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.signatures.values().filter(|sig| !sig.builtin)
    }
}
