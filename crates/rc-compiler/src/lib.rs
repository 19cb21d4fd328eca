//! Redirect Compactor List Compiler
//!
//! This crate compiles flat redirect lists into consolidated redirect tables.

pub mod parser;
pub mod compile;
pub mod builder;

pub use builder::{build_report_json, build_table_json};
pub use compile::{
    compile_redirects, CompileError, CompileOptions, CompileOutput, CompileStats, StrategyReport, VerifyPolicy,
};
pub use parser::{parse_redirect_list, parse_table, InputFormat, ParseError};
