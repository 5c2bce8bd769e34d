//! 型変換のコード生成

use crate::analyzer::TypeTag;
use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use crate::codegen::code_generator::{CodeGenerator, FunctionContext};
use crate::codegen::runtime::RuntimeFn;

impl<'a, 'p> CodeGenerator<'a, 'p> {
    pub(super) fn compile_cast_expr(&mut self, ctx: &mut FunctionContext, cast: &CastExpr) -> AmimeResult<()> {
        self.compile_expression(ctx, &cast.expr)?;
        let from = self.type_of(&cast.expr)?;
        let to = TypeTag::from(cast.target);

        if from == to {
            return Ok(());
        }
        match (from, to) {
            (TypeTag::Int, TypeTag::Float) => ctx.emit("f64.convert_i32_s"),
            (TypeTag::Float, TypeTag::Int) => ctx.emit("i32.trunc_f64_s"),
            (TypeTag::Int, TypeTag::Bool) => {
                ctx.emit("i32.const 0");
                ctx.emit("i32.ne");
            }
            // boolは0/1のi32なのでそのまま
            (TypeTag::Bool, TypeTag::Int) => {}
            (TypeTag::Int, TypeTag::String) => self.emit_runtime(ctx, RuntimeFn::StrFromInt),
            (TypeTag::Float, TypeTag::String) => self.emit_runtime(ctx, RuntimeFn::StrFromFloat),
            (TypeTag::Bool, TypeTag::String) => self.emit_runtime(ctx, RuntimeFn::StrFromBool),
            (TypeTag::String, TypeTag::Int) => self.emit_runtime(ctx, RuntimeFn::StrToInt),
            _ => {
                return Err(CodegenError::Internal {
                    message: format!("no conversion from {} to {}", from, to),
                }
                .into())
            }
        }
        Ok(())
    }

    fn emit_runtime(&mut self, ctx: &mut FunctionContext, function: RuntimeFn) {
        let call = self.runtime.call(function);
        ctx.emit(call);
    }
}
