//! 集合・タプルリテラルのコード生成

use crate::ast::*;
use crate::error::AmimeResult;

use crate::codegen::code_generator::{CodeGenerator, FunctionContext};
use crate::codegen::runtime::RuntimeFn;
use crate::codegen::types::{value_type, ValType};

impl<'a, 'p> CodeGenerator<'a, 'p> {
    /// `{a, b}`: 空集合に要素を順に追加
    pub(super) fn compile_set_literal(&mut self, ctx: &mut FunctionContext, set: &SetExpr) -> AmimeResult<()> {
        let call = self.runtime.call(RuntimeFn::SetNew);
        ctx.emit(call);
        for element in &set.elements {
            self.compile_expression(ctx, element)?;
            let call = self.runtime.call(RuntimeFn::SetAdd);
            ctx.emit(call);
        }
        Ok(())
    }

    /// `(a, b)`: 空タプルに要素を順に追加
    pub(super) fn compile_tuple_literal(&mut self, ctx: &mut FunctionContext, tuple: &TupleExpr) -> AmimeResult<()> {
        let call = self.runtime.call(RuntimeFn::TupleNew);
        ctx.emit(call);
        for element in &tuple.elements {
            self.compile_expression(ctx, element)?;
            let push = match value_type(self.type_of(element)?)? {
                ValType::I32 => RuntimeFn::TuplePushI32,
                ValType::F64 => RuntimeFn::TuplePushF64,
            };
            let call = self.runtime.call(push);
            ctx.emit(call);
        }
        Ok(())
    }
}
