//! Amime Language Compiler Library
//!
//! Front end, semantic analysis and WebAssembly text generation for the
//! Amime toy language.

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod compiler;
pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use analyzer::{AnalysisOutcome, CheckedProgram, SemanticAnalyzer, TypeTag};
pub use ast::{Expression, Program, Statement};
pub use codegen::{generate_wat, CodeGenerator};
pub use compiler::{compile_program, compile_source, CompileOptions, CompileOutcome, EmitKind};
pub use error::{AmimeError, AmimeResult, Diagnostic, DiagnosticKind, Diagnostics};
pub use lexer::{Lexer, Token, TokenWithPosition};
pub use parser::{parse_source, ParseError, ParseResult, Parser};
