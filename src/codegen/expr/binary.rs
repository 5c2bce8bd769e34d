//! 二項演算のコード生成

use crate::analyzer::{AggregateKind, TypeTag};
use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use crate::codegen::code_generator::{CodeGenerator, FunctionContext};
use crate::codegen::runtime::RuntimeFn;
use crate::codegen::stmt_codegen::comparison_type;

impl<'a, 'p> CodeGenerator<'a, 'p> {
    /// 二項演算をコンパイル
    pub(super) fn compile_binary_expr(&mut self, ctx: &mut FunctionContext, binary: &BinaryExpr) -> AmimeResult<()> {
        match binary.op {
            BinaryOp::And | BinaryOp::Or => return self.compile_logical_expr(ctx, binary),
            _ => {}
        }

        let left = self.type_of(&binary.left)?;
        let right = self.type_of(&binary.right)?;
        let result = self.type_of_binary(binary)?;

        // オペランドの型: 算術はfloat結果ならfloat、比較は混在時のみfloat
        let operand = match binary.op {
            BinaryOp::Add | BinaryOp::Subtract | BinaryOp::Multiply | BinaryOp::Divide
                if result == TypeTag::Float =>
            {
                TypeTag::Float
            }
            BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne => {
                comparison_type(left, right)
            }
            _ => left,
        };

        self.compile_expression_as(ctx, &binary.left, operand)?;
        self.compile_expression_as(ctx, &binary.right, operand)?;

        match binary.op {
            BinaryOp::Eq | BinaryOp::Ne => self.emit_equality(ctx, operand, binary.op),
            op => {
                let instruction = self.binary_instruction(op, operand, right)?;
                ctx.emit(instruction);
                Ok(())
            }
        }
    }

    /// `and`/`or`の短絡評価
    fn compile_logical_expr(&mut self, ctx: &mut FunctionContext, binary: &BinaryExpr) -> AmimeResult<()> {
        self.compile_expression(ctx, &binary.left)?;
        ctx.open("if (result i32)");
        if binary.op == BinaryOp::And {
            self.compile_expression(ctx, &binary.right)?;
            ctx.else_arm();
            ctx.emit("i32.const 0");
        } else {
            ctx.emit("i32.const 1");
            ctx.else_arm();
            self.compile_expression(ctx, &binary.right)?;
        }
        ctx.close();
        Ok(())
    }

    /// 演算子と型に対応する命令
    fn binary_instruction(&mut self, op: BinaryOp, operand: TypeTag, right: TypeTag) -> AmimeResult<String> {
        use AggregateKind::{Arc, Graph, Node};

        let native = match (op, operand) {
            (BinaryOp::Add, TypeTag::Int) => Some("i32.add"),
            (BinaryOp::Subtract, TypeTag::Int) => Some("i32.sub"),
            (BinaryOp::Multiply, TypeTag::Int) => Some("i32.mul"),
            (BinaryOp::Divide, TypeTag::Int) => Some("i32.div_s"),
            (BinaryOp::Modulo, TypeTag::Int) => Some("i32.rem_s"),
            (BinaryOp::Lt, TypeTag::Int) => Some("i32.lt_s"),
            (BinaryOp::Gt, TypeTag::Int) => Some("i32.gt_s"),
            (BinaryOp::Le, TypeTag::Int) => Some("i32.le_s"),
            (BinaryOp::Ge, TypeTag::Int) => Some("i32.ge_s"),
            (BinaryOp::Add, TypeTag::Float) => Some("f64.add"),
            (BinaryOp::Subtract, TypeTag::Float) => Some("f64.sub"),
            (BinaryOp::Multiply, TypeTag::Float) => Some("f64.mul"),
            (BinaryOp::Divide, TypeTag::Float) => Some("f64.div"),
            (BinaryOp::Lt, TypeTag::Float) => Some("f64.lt"),
            (BinaryOp::Gt, TypeTag::Float) => Some("f64.gt"),
            (BinaryOp::Le, TypeTag::Float) => Some("f64.le"),
            (BinaryOp::Ge, TypeTag::Float) => Some("f64.ge"),
            _ => None,
        };
        if let Some(native) = native {
            return Ok(native.to_string());
        }

        let runtime = match (op, operand, right) {
            (BinaryOp::Add, TypeTag::String, _) => RuntimeFn::StrConcat,
            (BinaryOp::Union, _, _) => RuntimeFn::SetUnion,
            (BinaryOp::Intersect, _, _) => RuntimeFn::SetIntersect,
            (BinaryOp::Diff, _, _) => RuntimeFn::SetDiff,
            (BinaryOp::SymDiff, _, _) => RuntimeFn::SetSymDiff,
            (BinaryOp::Concat, _, _) => RuntimeFn::TupleConcat,
            (BinaryOp::In, TypeTag::Int, _) => RuntimeFn::SetContains,
            (BinaryOp::In, TypeTag::Aggregate(Node), _) => RuntimeFn::GraphContains,
            (BinaryOp::Add, TypeTag::Aggregate(Graph), TypeTag::Aggregate(Arc)) => RuntimeFn::GraphAddArc,
            (BinaryOp::Subtract, TypeTag::Aggregate(Graph), TypeTag::Aggregate(Arc)) => {
                RuntimeFn::GraphRemoveArc
            }
            (BinaryOp::Multiply, TypeTag::Aggregate(Graph), TypeTag::Aggregate(Node)) => {
                RuntimeFn::GraphAddNode
            }
            (BinaryOp::Divide, TypeTag::Aggregate(Graph), TypeTag::Aggregate(Node)) => {
                RuntimeFn::GraphRemoveNode
            }
            _ => {
                return Err(CodegenError::Internal {
                    message: format!("no instruction for operator '{}' on {}", op, operand),
                }
                .into())
            }
        };
        Ok(self.runtime.call(runtime))
    }

    fn type_of_binary(&self, binary: &BinaryExpr) -> AmimeResult<TypeTag> {
        match self.checked.type_of(binary.id) {
            Some(ty) => Ok(ty),
            None => Err(CodegenError::MissingAnnotation { node: binary.id }.into()),
        }
    }
}
