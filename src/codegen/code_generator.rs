//! メインコード生成器

use crate::analyzer::{CheckedProgram, SymbolId, TypeTag};
use crate::ast::*;
use crate::error::{AmimeResult, CodegenError};

use super::constant_pool::ConstantPool;
use super::labels::LabelAllocator;
use super::runtime::RuntimeManager;
use super::symbol_table::{global_name, SlotTable, StorageSlot};
use super::types::{result_type, value_type};

/// エントリ関数の内部名（ユーザー識別子は`.`を含まないため衝突しない）
pub const MAIN_FUNCTION: &str = "$amime.main";

/// 関数1つ分のコード生成状態
///
/// 関数ごとに新しく作り、すべての生成メソッドに明示的に渡す。
pub struct FunctionContext {
    pub name: String,
    pub return_type: TypeTag,
    pub slots: SlotTable,
    pub labels: LabelAllocator,
    /// breakの飛び先（最も内側が末尾）
    pub break_targets: Vec<String>,
    code: Vec<String>,
    depth: usize,
}

impl FunctionContext {
    pub fn new(name: impl Into<String>, return_type: TypeTag, slots: SlotTable) -> Self {
        Self {
            name: name.into(),
            return_type,
            slots,
            labels: LabelAllocator::new(),
            break_targets: Vec::new(),
            code: Vec::new(),
            depth: 0,
        }
    }

    /// 命令を1行出力
    pub fn emit(&mut self, instruction: impl Into<String>) {
        let indent = "  ".repeat(self.depth + 2);
        self.code.push(format!("{}{}", indent, instruction.into()));
    }

    /// `block`/`loop`/`if`を開く
    pub fn open(&mut self, instruction: impl Into<String>) {
        self.emit(instruction);
        self.depth += 1;
    }

    /// 構造化命令を閉じる
    pub fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.emit("end");
    }

    /// 中断して`else`に切り替える
    pub fn else_arm(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.emit("else");
        self.depth += 1;
    }

    pub fn instructions(&self) -> &[String] {
        &self.code
    }
}

/// メインコード生成器構造体
///
/// 診断のない`CheckedProgram`からWAT形式のモジュールを生成する。
pub struct CodeGenerator<'a, 'p> {
    pub(super) checked: &'a CheckedProgram<'p>,
    pub(super) runtime: RuntimeManager,
    pub(super) constants: ConstantPool,
    /// 生成済みの関数定義
    functions: Vec<String>,
}

impl<'a, 'p> CodeGenerator<'a, 'p> {
    pub fn new(checked: &'a CheckedProgram<'p>) -> Self {
        Self {
            checked,
            runtime: RuntimeManager::new(),
            constants: ConstantPool::new(),
            functions: Vec::new(),
        }
    }

    /// モジュール全体を生成
    pub fn generate(mut self) -> AmimeResult<String> {
        let program = self.checked.program();

        for func in program.functions() {
            self.compile_function(func)?;
        }
        self.compile_main()?;

        self.assemble()
    }

    /// ユーザー関数をコンパイル
    fn compile_function(&mut self, func: &FunctionDecl) -> AmimeResult<()> {
        log::debug!("generating function '{}'", func.name);
        let return_type = TypeTag::from(func.return_type());
        let slots = SlotTable::for_function(self.checked, func)?;
        let mut ctx = FunctionContext::new(format!("${}", func.name), return_type, slots);

        for stmt in &func.body.statements {
            self.compile_statement(&mut ctx, stmt)?;
        }
        let last_is_return = matches!(func.body.statements.last(), Some(Statement::Return(_)));
        finish_function(&mut ctx, last_is_return, self.checked.always_returns(func.id));

        let header = function_header(&ctx, &func.params, None)?;
        self.functions.push(render_function(header, &ctx));
        Ok(())
    }

    /// トップレベル文をエントリ関数としてコンパイル
    fn compile_main(&mut self) -> AmimeResult<()> {
        log::debug!("generating entry function");
        let slots = SlotTable::for_main(self.checked)?;
        let mut ctx = FunctionContext::new(MAIN_FUNCTION, TypeTag::Void, slots);

        let statements: Vec<&Statement> = self.checked.program().top_level_statements().collect();
        for stmt in &statements {
            self.compile_statement(&mut ctx, stmt)?;
        }
        let last_is_return = matches!(statements.last(), Some(Statement::Return(_)));
        finish_function(&mut ctx, last_is_return, self.checked.main_always_returns());

        let header = function_header(&ctx, &[], Some("main"))?;
        self.functions.push(render_function(header, &ctx));
        Ok(())
    }

    /// モジュールを組み立てる
    fn assemble(&self) -> AmimeResult<String> {
        let mut out = String::from("(module\n");
        for import in self.runtime.imports() {
            out.push_str(&format!("  {}\n", import));
        }
        out.push_str(&format!(
            "  (memory (export \"memory\") {})\n",
            self.constants.pages()
        ));
        if let Some(data) = self.constants.data_segment() {
            out.push_str(&format!("  {}\n", data));
        }
        for id in self.checked.captured_globals() {
            out.push_str(&format!("  {}\n", self.global_decl(id)?));
        }
        for function in &self.functions {
            out.push_str(function);
        }
        out.push_str(")\n");
        Ok(out)
    }

    /// 捕捉されたグローバル変数の宣言
    fn global_decl(&self, id: SymbolId) -> AmimeResult<String> {
        let symbol = self.checked.symbol(id);
        let ty = value_type(symbol.ty)?;
        Ok(format!(
            "(global ${} (mut {}) ({}))",
            global_name(&symbol.name),
            ty,
            ty.zero()
        ))
    }

    // ==================== ユーティリティメソッド ====================

    /// 式ノードに記録された型
    pub(super) fn type_of(&self, expr: &Expression) -> AmimeResult<TypeTag> {
        match self.checked.type_of(expr.id()) {
            Some(TypeTag::Unknown) => Err(CodegenError::Internal {
                message: format!("expression {} has an unresolved type", expr.id()),
            }
            .into()),
            Some(ty) => Ok(ty),
            None => Err(CodegenError::MissingAnnotation { node: expr.id() }.into()),
        }
    }

    /// シンボルの格納場所
    pub(super) fn slot<'c>(
        &self,
        ctx: &'c FunctionContext,
        id: SymbolId,
        span: Span,
    ) -> AmimeResult<&'c StorageSlot> {
        ctx.slots.slot(id, &self.checked.symbol(id).name, span)
    }
}

/// 関数末尾の処理
///
/// すべての経路がreturnする本体の末尾が`return`文でなければ`unreachable`、
/// 制御が抜けうるvoid関数には`return`を置く。
fn finish_function(ctx: &mut FunctionContext, last_is_return: bool, always_returns: bool) {
    if always_returns {
        if !last_is_return {
            ctx.emit("unreachable");
        }
    } else if ctx.return_type == TypeTag::Void {
        ctx.emit("return");
    }
}

/// `(func $name (param ...) (result ...)`
fn function_header(
    ctx: &FunctionContext,
    params: &[Parameter],
    export: Option<&str>,
) -> AmimeResult<String> {
    let mut header = format!("(func {}", ctx.name);
    if let Some(export) = export {
        header.push_str(&format!(" (export \"{}\")", export));
    }
    if !params.is_empty() {
        let params = params
            .iter()
            .map(|p| value_type(TypeTag::from(p.ty)).map(|t| t.as_str()))
            .collect::<AmimeResult<Vec<_>>>()?;
        header.push_str(&format!(" (param {})", params.join(" ")));
    }
    if let Some(result) = result_type(ctx.return_type)? {
        header.push_str(&format!(" (result {})", result));
    }
    Ok(header)
}

/// 関数定義のテキスト
fn render_function(header: String, ctx: &FunctionContext) -> String {
    let mut out = format!("  {}\n", header);
    if !ctx.slots.locals().is_empty() {
        let locals: Vec<&str> = ctx.slots.locals().iter().map(|t| t.as_str()).collect();
        out.push_str(&format!("    (local {})\n", locals.join(" ")));
    }
    for line in ctx.instructions() {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("  )\n");
    out
}
