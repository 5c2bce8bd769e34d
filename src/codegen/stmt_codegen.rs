//! 文のコード生成

use crate::analyzer::{SymbolId, TypeTag};
use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use super::code_generator::{CodeGenerator, FunctionContext};
use super::labels::LabelKind;
use super::runtime::RuntimeFn;
use super::types::{value_type, ValType};

impl<'a, 'p> CodeGenerator<'a, 'p> {
    /// ブロックをコンパイル
    pub(super) fn compile_block(&mut self, ctx: &mut FunctionContext, block: &Block) -> AmimeResult<()> {
        for stmt in &block.statements {
            self.compile_statement(ctx, stmt)?;
        }
        Ok(())
    }

    /// 文をコンパイル
    pub(super) fn compile_statement(&mut self, ctx: &mut FunctionContext, stmt: &Statement) -> AmimeResult<()> {
        match stmt {
            Statement::Let(let_stmt) => self.compile_let_statement(ctx, let_stmt),
            Statement::Assignment(assign) => self.compile_assignment(ctx, assign),
            Statement::Return(ret) => self.compile_return(ctx, ret),
            Statement::If(if_stmt) => self.compile_if_statement(ctx, if_stmt),
            Statement::While(while_stmt) => self.compile_while_statement(ctx, while_stmt),
            Statement::For(for_stmt) => self.compile_for_statement(ctx, for_stmt),
            Statement::Switch(switch) => self.compile_switch_statement(ctx, switch),
            Statement::Break(brk) => {
                let target = ctx.break_targets.last().cloned().ok_or_else(|| {
                    CodegenError::Internal {
                        message: format!("break at {}:{} has no target", brk.span.line, brk.span.column),
                    }
                })?;
                ctx.emit(format!("br {}", target));
                Ok(())
            }
            Statement::Print(print) => self.compile_print(ctx, print),
            Statement::Expression(expr) => {
                self.compile_expression(ctx, expr)?;
                if self.type_of(expr)? != TypeTag::Void {
                    ctx.emit("drop");
                }
                Ok(())
            }
            Statement::Block(block) => self.compile_block(ctx, block),
        }
    }

    /// let文をコンパイル（初期化式がなければゼロ値）
    fn compile_let_statement(&mut self, ctx: &mut FunctionContext, let_stmt: &LetStatement) -> AmimeResult<()> {
        let id = self.declared_symbol(let_stmt.id, &let_stmt.name, let_stmt.span)?;
        let target = self.checked.symbol(id).ty;
        match &let_stmt.init {
            Some(init) => self.compile_expression_as(ctx, init, target)?,
            None => ctx.emit(value_type(target)?.zero()),
        }
        self.store(ctx, id, let_stmt.span)
    }

    /// 代入文をコンパイル
    fn compile_assignment(&mut self, ctx: &mut FunctionContext, assign: &AssignStatement) -> AmimeResult<()> {
        let id = self
            .checked
            .assignment_target(assign.id)
            .ok_or_else(|| CodegenError::UnresolvedSymbol {
                name: assign.name.clone(),
                span: assign.span,
            })?;
        let target = self.checked.symbol(id).ty;
        self.compile_expression_as(ctx, &assign.value, target)?;
        self.store(ctx, id, assign.span)
    }

    /// return文をコンパイル
    fn compile_return(&mut self, ctx: &mut FunctionContext, ret: &ReturnStatement) -> AmimeResult<()> {
        if let Some(value) = &ret.value {
            let return_type = ctx.return_type;
            self.compile_expression_as(ctx, value, return_type)?;
        }
        ctx.emit("return");
        Ok(())
    }

    /// if文をコンパイル
    ///
    /// ```text
    /// block $end_N
    ///   block $else_N
    ///     cond, i32.eqz, br_if $else_N
    ///     then, br $end_N
    ///   end
    ///   else
    /// end
    /// ```
    fn compile_if_statement(&mut self, ctx: &mut FunctionContext, if_stmt: &IfStatement) -> AmimeResult<()> {
        let group = ctx.labels.fresh();
        let end = ctx.labels.define(group, LabelKind::End)?;
        let else_label = ctx.labels.define(group, LabelKind::Else)?;

        ctx.open(format!("block {}", end));
        ctx.open(format!("block {}", else_label));
        self.compile_expression(ctx, &if_stmt.condition)?;
        ctx.emit("i32.eqz");
        ctx.emit(format!("br_if {}", else_label));
        self.compile_block(ctx, &if_stmt.then_branch)?;
        ctx.emit(format!("br {}", end));
        ctx.close();

        match &if_stmt.else_branch {
            Some(ElseBranch::Block(block)) => self.compile_block(ctx, block)?,
            Some(ElseBranch::If(nested)) => self.compile_if_statement(ctx, nested)?,
            None => {}
        }
        ctx.close();
        Ok(())
    }

    /// while/until文をコンパイル（untilは条件が真になったら抜ける）
    fn compile_while_statement(&mut self, ctx: &mut FunctionContext, while_stmt: &WhileStatement) -> AmimeResult<()> {
        let group = ctx.labels.fresh();
        let end = ctx.labels.define(group, LabelKind::End)?;
        let start = ctx.labels.define(group, LabelKind::Start)?;

        ctx.open(format!("block {}", end));
        ctx.open(format!("loop {}", start));
        self.compile_expression(ctx, &while_stmt.condition)?;
        if while_stmt.kind == LoopKind::While {
            ctx.emit("i32.eqz");
        }
        ctx.emit(format!("br_if {}", end));

        ctx.break_targets.push(end.clone());
        self.compile_block(ctx, &while_stmt.body)?;
        ctx.break_targets.pop();

        ctx.emit(format!("br {}", start));
        ctx.close();
        ctx.close();
        Ok(())
    }

    /// for文をコンパイル
    ///
    /// 終端と増分は一度だけ評価して作業用ローカルに置く。
    fn compile_for_statement(&mut self, ctx: &mut FunctionContext, for_stmt: &ForStatement) -> AmimeResult<()> {
        let var = self.declared_symbol(for_stmt.id, &for_stmt.variable, for_stmt.span)?;
        let load_var = self.slot(ctx, var, for_stmt.span)?.load();

        self.compile_expression(ctx, &for_stmt.start)?;
        self.store(ctx, var, for_stmt.span)?;

        let end_value = ctx.slots.alloc_scratch(ValType::I32);
        self.compile_expression(ctx, &for_stmt.end)?;
        ctx.emit(format!("local.set {}", end_value));

        let step_value = ctx.slots.alloc_scratch(ValType::I32);
        match &for_stmt.step {
            Some(step) => self.compile_expression(ctx, step)?,
            None => ctx.emit("i32.const 1"),
        }
        ctx.emit(format!("local.set {}", step_value));

        let group = ctx.labels.fresh();
        let end = ctx.labels.define(group, LabelKind::End)?;
        let start = ctx.labels.define(group, LabelKind::Start)?;

        ctx.open(format!("block {}", end));
        ctx.open(format!("loop {}", start));
        ctx.emit(load_var.clone());
        ctx.emit(format!("local.get {}", end_value));
        ctx.emit("i32.lt_s");
        ctx.emit("i32.eqz");
        ctx.emit(format!("br_if {}", end));

        ctx.break_targets.push(end.clone());
        self.compile_block(ctx, &for_stmt.body)?;
        ctx.break_targets.pop();

        ctx.emit(load_var);
        ctx.emit(format!("local.get {}", step_value));
        ctx.emit("i32.add");
        self.store(ctx, var, for_stmt.span)?;
        ctx.emit(format!("br {}", start));
        ctx.close();
        ctx.close();
        Ok(())
    }

    /// switch文をコンパイル
    ///
    /// 先頭から順に比較し、最初に一致したcaseへ分岐する。各本体の後は
    /// 共通の`$end_N`へ抜ける。
    fn compile_switch_statement(&mut self, ctx: &mut FunctionContext, switch: &SwitchStatement) -> AmimeResult<()> {
        let subject_type = self.type_of(&switch.subject)?;
        let subject = ctx.slots.alloc_scratch(value_type(subject_type)?);
        self.compile_expression(ctx, &switch.subject)?;
        ctx.emit(format!("local.set {}", subject));

        let group = ctx.labels.fresh();
        let end = ctx.labels.define(group, LabelKind::End)?;
        ctx.open(format!("block {}", end));

        let mut case_labels = Vec::with_capacity(switch.cases.len());
        for index in 0..switch.cases.len() {
            case_labels.push(ctx.labels.define(group, LabelKind::Case(index))?);
        }
        for label in case_labels.iter().rev() {
            ctx.open(format!("block {}", label));
        }

        // ディスパッチ
        for (case, label) in switch.cases.iter().zip(&case_labels) {
            let case_type = self.type_of(&case.value)?;
            let operand = comparison_type(subject_type, case_type);
            ctx.emit(format!("local.get {}", subject));
            self.promote(ctx, subject_type, operand);
            self.compile_expression_as(ctx, &case.value, operand)?;
            self.emit_equality(ctx, operand, BinaryOp::Eq)?;
            ctx.emit(format!("br_if {}", label));
        }

        ctx.break_targets.push(end.clone());
        if let Some(default) = &switch.default {
            self.compile_block(ctx, default)?;
        }
        ctx.emit(format!("br {}", end));

        for case in &switch.cases {
            ctx.close();
            self.compile_block(ctx, &case.body)?;
            ctx.emit(format!("br {}", end));
        }
        ctx.break_targets.pop();

        ctx.close();
        Ok(())
    }

    /// print文をコンパイル（引数を空白区切りで出力して改行）
    fn compile_print(&mut self, ctx: &mut FunctionContext, print: &PrintStatement) -> AmimeResult<()> {
        for (index, arg) in print.args.iter().enumerate() {
            if index > 0 {
                let call = self.runtime.call(RuntimeFn::PrintSpace);
                ctx.emit(call);
            }
            self.compile_expression(ctx, arg)?;
            let printer = match self.type_of(arg)? {
                TypeTag::Int => RuntimeFn::PrintInt,
                TypeTag::Float => RuntimeFn::PrintFloat,
                TypeTag::Bool => RuntimeFn::PrintBool,
                TypeTag::String => RuntimeFn::PrintStr,
                TypeTag::Set => RuntimeFn::PrintSet,
                TypeTag::Tuple => RuntimeFn::PrintTuple,
                TypeTag::Aggregate(_) => RuntimeFn::PrintAggregate,
                other => {
                    return Err(CodegenError::Internal {
                        message: format!("cannot print a value of type {}", other),
                    }
                    .into())
                }
            };
            let call = self.runtime.call(printer);
            ctx.emit(call);
        }
        let call = self.runtime.call(RuntimeFn::PrintNewline);
        ctx.emit(call);
        Ok(())
    }

    // ==================== ユーティリティメソッド ====================

    /// スタック上の値を変数に格納
    fn store(&self, ctx: &mut FunctionContext, id: SymbolId, span: Span) -> AmimeResult<()> {
        let store = self.slot(ctx, id, span)?.store();
        ctx.emit(store);
        Ok(())
    }

    /// 宣言ノードのシンボル
    fn declared_symbol(&self, node: NodeId, name: &str, span: Span) -> AmimeResult<SymbolId> {
        self.checked.declaration(node).ok_or_else(|| {
            CodegenError::UnresolvedSymbol {
                name: name.to_string(),
                span,
            }
            .into()
        })
    }
}

/// 比較に使う型（数値が混在すればfloat）
pub(super) fn comparison_type(left: TypeTag, right: TypeTag) -> TypeTag {
    if left.is_numeric() && right.is_numeric() && left != right {
        TypeTag::Float
    } else {
        left
    }
}
