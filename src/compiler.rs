//! コンパイラのメイン処理モジュール
//!
//! 入力の読み込みから、意味解析・診断のゲート・コード生成までの
//! パイプライン全体を管理します。コアはI/Oを行わず、ファイルの読み書きは
//! `CompilationState`とCLIが担当します。

use std::fs;
use std::path::Path;

use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use crate::analyzer::SemanticAnalyzer;
use crate::ast::Program;
use crate::codegen::generate_wat;
use crate::error::{AmimeError, AmimeResult, Diagnostics};
use crate::parser::parse_source;

/// 出力する成果物の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmitKind {
    /// WebAssemblyテキスト形式
    #[default]
    Wat,
    /// 構文木のJSON
    Ast,
}

impl EmitKind {
    /// 出力ファイルの既定の拡張子
    pub fn extension(self) -> &'static str {
        match self {
            EmitKind::Wat => "wat",
            EmitKind::Ast => "json",
        }
    }
}

/// コンパイルオプション
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub emit: EmitKind,
}

/// コンパイルの結果
#[derive(Debug)]
pub enum CompileOutcome {
    /// 生成されたテキスト
    Emitted(String),
    /// 診断があったためコード生成を行わなかった
    Rejected(Diagnostics),
}

impl CompileOutcome {
    pub fn output(&self) -> Option<&str> {
        match self {
            CompileOutcome::Emitted(text) => Some(text),
            CompileOutcome::Rejected(_) => None,
        }
    }

    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            CompileOutcome::Emitted(_) => None,
            CompileOutcome::Rejected(diagnostics) => Some(diagnostics),
        }
    }
}

/// 構文木を検査し、診断を返す
pub fn check_program(program: &Program) -> AmimeResult<Diagnostics> {
    log::debug!("starting semantic analysis");
    let outcome = SemanticAnalyzer::new().analyze(program)?;
    Ok(outcome.diagnostics().clone())
}

/// 構文木をコンパイル
///
/// 診断が一件でもあればコード生成は行わない。
pub fn compile_program(program: &Program, options: &CompileOptions) -> AmimeResult<CompileOutcome> {
    if options.emit == EmitKind::Ast {
        return Ok(CompileOutcome::Emitted(serde_json::to_string_pretty(program)?));
    }

    log::debug!("starting semantic analysis");
    let outcome = SemanticAnalyzer::new().analyze(program)?;
    let checked = match outcome.into_checked() {
        Ok(checked) => checked,
        Err(diagnostics) => {
            log::debug!("{} diagnostics, skipping code generation", diagnostics.len());
            return Ok(CompileOutcome::Rejected(diagnostics));
        }
    };

    log::debug!("starting code generation");
    Ok(CompileOutcome::Emitted(generate_wat(&checked)?))
}

/// ソースコードをコンパイル
pub fn compile_source(source: &str, options: &CompileOptions) -> AmimeResult<CompileOutcome> {
    let program = parse_source(source)?;
    compile_program(&program, options)
}

/// JSONにシリアライズされた構文木を読み込む
pub fn load_tree(json: &str) -> AmimeResult<Program> {
    Ok(serde_json::from_str(json)?)
}

/// コンパイル状態を管理する構造体
///
/// 入力ファイルを保持し、エラーと診断の報告先になる。
pub struct CompilationState {
    pub source_file: String,
    pub source: String,
    pub files: SimpleFiles<String, String>,
    pub file_id: usize,
    /// 入力がJSONの構文木か（スパンは元のソースを指す）
    pub tree_input: bool,
}

impl CompilationState {
    /// ファイルから作成
    pub fn new<P: AsRef<Path>>(source_file: P) -> AmimeResult<Self> {
        let path = source_file.as_ref();
        let source = fs::read_to_string(path)
            .map_err(|e| AmimeError::Io(format!("failed to read {}: {}", path.display(), e)))?;
        let tree_input = path.extension().is_some_and(|ext| ext == "json");
        Ok(Self::with_source(path.display().to_string(), source, tree_input))
    }

    /// 文字列から作成
    pub fn new_from_string(filename: &str, source: String) -> Self {
        Self::with_source(filename.to_string(), source, false)
    }

    fn with_source(source_file: String, source: String, tree_input: bool) -> Self {
        let mut files = SimpleFiles::new();
        let file_id = files.add(source_file.clone(), source.clone());
        Self {
            source_file,
            source,
            files,
            file_id,
            tree_input,
        }
    }

    /// 入力を構文木にする
    pub fn load_program(&self) -> AmimeResult<Program> {
        if self.tree_input {
            log::debug!("loading syntax tree from {}", self.source_file);
            load_tree(&self.source)
        } else {
            log::debug!("parsing {}", self.source_file);
            parse_source(&self.source)
        }
    }

    /// 診断をソース位置順に報告
    pub fn report_diagnostics(&self, diagnostics: &Diagnostics) -> AmimeResult<()> {
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();

        for diagnostic in diagnostics.in_source_order() {
            if self.tree_input {
                eprintln!("{}:{}", self.source_file, diagnostic);
                continue;
            }
            codespan_reporting::term::emit(
                &mut writer.lock(),
                &config,
                &self.files,
                &diagnostic.to_codespan(self.file_id),
            )
            .map_err(|e| AmimeError::Io(format!("failed to emit diagnostic: {}", e)))?;
        }
        Ok(())
    }

    /// 致命的なエラーを報告
    pub fn report_error(&self, error: &AmimeError) -> AmimeResult<()> {
        if self.tree_input {
            eprintln!("{}: {}", self.source_file, error);
            return Ok(());
        }
        let writer = StandardStream::stderr(ColorChoice::Auto);
        let config = codespan_reporting::term::Config::default();
        codespan_reporting::term::emit(
            &mut writer.lock(),
            &config,
            &self.files,
            &error.to_diagnostic(self.file_id),
        )
        .map_err(|e| AmimeError::Io(format!("failed to emit diagnostic: {}", e)))?;
        Ok(())
    }
}
