//! リテラルと識別子のコード生成

use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use crate::codegen::code_generator::{CodeGenerator, FunctionContext};
use crate::codegen::runtime::RuntimeFn;

impl<'a, 'p> CodeGenerator<'a, 'p> {
    /// 文字列リテラル: 定数プールの(オフセット, 長さ)からランタイムの文字列を作る
    pub(super) fn compile_string_literal(&mut self, ctx: &mut FunctionContext, lit: &StringLit) -> AmimeResult<()> {
        let (offset, len) = self.constants.intern(&lit.value);
        ctx.emit(format!("i32.const {}", offset));
        ctx.emit(format!("i32.const {}", len));
        let call = self.runtime.call(RuntimeFn::StrNew);
        ctx.emit(call);
        Ok(())
    }

    /// 変数の読み出し
    pub(super) fn compile_identifier(&mut self, ctx: &mut FunctionContext, ident: &Identifier) -> AmimeResult<()> {
        let id = self
            .checked
            .reference(ident.id)
            .ok_or_else(|| CodegenError::UnresolvedSymbol {
                name: ident.name.clone(),
                span: ident.span,
            })?;
        let load = self.slot(ctx, id, ident.span)?.load();
        ctx.emit(load);
        Ok(())
    }
}
