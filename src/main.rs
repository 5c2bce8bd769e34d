use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use amime::compiler::{compile_program, CompilationState, CompileOptions, CompileOutcome, EmitKind};
use amime::lexer::{format_tokens, tokenize};

#[derive(Parser)]
#[command(name = "amime")]
#[command(author, version, about = "The Amime language compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmitType {
    /// Emit WebAssembly text (.wat, default)
    #[value(name = "wat")]
    Wat,
    /// Emit the syntax tree as JSON (.json)
    #[value(name = "ast")]
    Ast,
}

impl From<EmitType> for EmitKind {
    fn from(emit: EmitType) -> Self {
        match emit {
            EmitType::Wat => EmitKind::Wat,
            EmitType::Ast => EmitKind::Ast,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compile an Amime source file (or a JSON syntax tree)
    Compile {
        /// The source file to compile
        input: PathBuf,

        /// Output file
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// What to emit
        #[arg(long = "emit", value_enum, default_value = "wat")]
        emit: EmitType,

        /// Dump the AST to stdout
        #[arg(long)]
        dump_ast: bool,

        /// Dump tokens to stdout
        #[arg(long)]
        dump_tokens: bool,
    },

    /// Check an Amime source file for errors without compiling
    Check {
        /// The source file to check
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logger before parsing CLI args
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbose flag
    if cli.verbose {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            emit,
            dump_ast,
            dump_tokens,
        } => compile(input, output, emit, dump_ast, dump_tokens, cli.verbose),
        Commands::Check { input } => check(input),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Load the input as a syntax tree, reporting fatal errors with source context.
fn load(state: &CompilationState) -> Result<amime::Program> {
    match state.load_program() {
        Ok(program) => Ok(program),
        Err(e) => {
            state.report_error(&e)?;
            anyhow::bail!("failed to load {}", state.source_file);
        }
    }
}

fn compile(
    input: PathBuf,
    output: Option<PathBuf>,
    emit: EmitType,
    dump_ast: bool,
    dump_tokens: bool,
    verbose: bool,
) -> Result<()> {
    if verbose {
        println!("{}: Compiling {:?}", "info".blue().bold(), input);
    }

    let state = CompilationState::new(&input)
        .with_context(|| format!("Failed to read source file: {:?}", input))?;

    if dump_tokens && !state.tree_input {
        let tokens = tokenize(&state.source)?;
        println!("{}", "=== Tokens ===".blue().bold());
        print!("{}", format_tokens(&tokens));
        println!();
    }

    let program = load(&state)?;

    if dump_ast {
        println!("{}", "=== AST ===".blue().bold());
        println!("{}", serde_json::to_string_pretty(&program)?);
        println!();
    }

    let options = CompileOptions { emit: emit.into() };
    let text = match compile_program(&program, &options) {
        Ok(CompileOutcome::Emitted(text)) => text,
        Ok(CompileOutcome::Rejected(diagnostics)) => {
            state.report_diagnostics(&diagnostics)?;
            anyhow::bail!("compilation failed with {} error(s)", diagnostics.len());
        }
        Err(e) => {
            state.report_error(&e)?;
            anyhow::bail!("compilation aborted");
        }
    };

    let output_path = output.unwrap_or_else(|| input.with_extension(options.emit.extension()));
    if verbose {
        println!("{}: Writing {:?}", "step".cyan().bold(), output_path);
    }
    write_atomically(&output_path, &text)?;
    println!("{}: Created {:?}", "success".green().bold(), output_path);
    Ok(())
}

/// Write through a temporary file in the destination directory so that a failed
/// run never leaves a truncated artifact behind.
fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).with_context(|| format!("Failed to create directory {:?}", dir))?;

    let mut file = NamedTempFile::new_in(&dir).context("Failed to create temporary file")?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {:?}", path))?;
    file.persist(path)
        .with_context(|| format!("Failed to write output file {:?}", path))?;
    Ok(())
}

fn check(input: PathBuf) -> Result<()> {
    log::info!("Checking {:?}", input);

    let state = CompilationState::new(&input)
        .with_context(|| format!("Failed to read source file: {:?}", input))?;
    let program = load(&state)?;

    log::debug!("Starting semantic analysis");
    let diagnostics = match amime::compiler::check_program(&program) {
        Ok(diagnostics) => diagnostics,
        Err(e) => {
            state.report_error(&e)?;
            anyhow::bail!("semantic analysis aborted");
        }
    };

    if !diagnostics.is_empty() {
        state.report_diagnostics(&diagnostics)?;
        anyhow::bail!("found {} error(s)", diagnostics.len());
    }

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}
