//! Redirect Compactor CLI
//!
//! CLI tool for compiling redirect lists into consolidated redirect tables.

mod table;

use std::path::Path;
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use rc_compiler::{
    build_report_json, build_table_json, compile_redirects, CompileError, CompileOptions, InputFormat, VerifyPolicy,
};
use rc_core::{ConversionError, Strategy};

#[derive(Parser)]
#[command(name = "rc-cli")]
#[command(about = "Redirect Compactor: consolidate and verify redirect tables")]
struct Cli {
    /// Verbose logging (per-group decisions)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Consolidate a redirect list into a redirect table
    Compile {
        /// Input redirect list (JSON array or `<from> <to>` lines)
        #[arg(short, long)]
        input: String,

        /// Output table file
        #[arg(short, long, default_value = "newRedirects.json")]
        output: String,

        /// Consolidation strategy
        #[arg(long, value_enum, default_value_t = StrategyArg::Iterative)]
        strategy: StrategyArg,

        /// What to do when the table does not reproduce the input
        #[arg(long, value_enum, default_value_t = PolicyArg::Fail)]
        on_mismatch: PolicyArg,

        /// Also run and verify the other strategy
        #[arg(long)]
        cross_check: bool,

        /// Input format (detected from extension and content by default)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Write verification findings as JSON
        #[arg(long)]
        report: Option<String>,
    },

    /// Check a redirect table against the list it was built from
    Verify {
        /// Original redirect list
        #[arg(short, long)]
        input: String,

        /// Table to check
        #[arg(short, long)]
        table: String,

        /// Input format (detected from extension and content by default)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Write verification findings as JSON
        #[arg(long)]
        report: Option<String>,
    },

    /// Show where request paths end up under a table
    Resolve {
        /// Table to evaluate
        #[arg(short, long)]
        table: String,

        /// Request paths
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Dump table info
    Info {
        /// Table to inspect
        #[arg(short, long)]
        table: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum StrategyArg {
    Iterative,
    Legacy,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Iterative => Strategy::Iterative,
            StrategyArg::Legacy => Strategy::Legacy,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum PolicyArg {
    Fail,
    Warn,
}

impl From<PolicyArg> for VerifyPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Fail => VerifyPolicy::Fail,
            PolicyArg::Warn => VerifyPolicy::Warn,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum FormatArg {
    Json,
    Lines,
}

impl From<FormatArg> for InputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => InputFormat::Json,
            FormatArg::Lines => InputFormat::Lines,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Compile {
            input,
            output,
            strategy,
            on_mismatch,
            cross_check,
            format,
            report,
        } => {
            let options = CompileOptions {
                strategy: strategy.into(),
                policy: on_mismatch.into(),
                cross_check,
            };
            cmd_compile(&input, &output, &options, format.map(Into::into), report.as_deref())
        }
        Commands::Verify {
            input,
            table,
            format,
            report,
        } => cmd_verify(&input, &table, format.map(Into::into), report.as_deref()),
        Commands::Resolve { table, paths } => cmd_resolve(&table, &paths),
        Commands::Info { table } => cmd_info(&table),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_compile(
    input: &str,
    output: &str,
    options: &CompileOptions,
    format: Option<InputFormat>,
    report: Option<&str>,
) -> Result<(), String> {
    let start = Instant::now();
    let redirects = table::read_redirects(Path::new(input), format)?;
    info!("Loaded {} redirects from '{}'", redirects.len(), input);

    let out = match compile_redirects(&redirects, options) {
        Ok(out) => out,
        Err(CompileError::Verification { strategy, errors }) => {
            print_findings(&errors);
            write_report(report, &errors)?;
            return Err(format!(
                "{} consolidation failed verification with {} finding(s); no table written",
                strategy,
                errors.len()
            ));
        }
        Err(e) => return Err(e.to_string()),
    };

    let json = build_table_json(&out.table).map_err(|e| format!("Failed to serialize table: {}", e))?;
    table::write_text(Path::new(output), &json)?;
    write_report(report, &out.errors)?;

    let stats = out.stats;
    println!("Compiled {} redirects to '{}'", stats.rules_before, output);
    println!("  Strategy: {}", options.strategy.name());
    println!(
        "  Rules:    {} -> {} ({} exact, {} prefix, {} absolute)",
        stats.rules_before, stats.rules_after, stats.exact, stats.prefix, stats.absolute
    );
    if let Some(other) = &out.cross_check {
        println!(
            "  Compare:  {} -> {} with {} ({} finding(s))",
            other.stats.rules_before,
            other.stats.rules_after,
            other.strategy.name(),
            other.errors.len()
        );
    }
    if !out.errors.is_empty() {
        println!("  Findings: {} (table written anyway)", out.errors.len());
    }
    println!("  Time:     {:.1}ms", start.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}

fn cmd_verify(input: &str, table_path: &str, format: Option<InputFormat>, report: Option<&str>) -> Result<(), String> {
    let redirects = table::read_redirects(Path::new(input), format)?;
    let table = table::read_table(Path::new(table_path))?;

    let errors = table.verify(&redirects);
    write_report(report, &errors)?;

    if errors.is_empty() {
        println!(
            "Table '{}' reproduces all {} redirects ({} rules)",
            table_path,
            redirects.len(),
            table.len()
        );
        return Ok(());
    }

    print_findings(&errors);
    Err(format!("{} finding(s) in '{}'", errors.len(), table_path))
}

fn cmd_resolve(table_path: &str, paths: &[String]) -> Result<(), String> {
    let table = table::read_table(Path::new(table_path))?;
    for path in paths {
        match table.resolve(path) {
            Some(to) => println!("{} -> {}", path, to),
            None => println!("{} (no redirect)", path),
        }
    }
    Ok(())
}

fn cmd_info(table_path: &str) -> Result<(), String> {
    let table = table::read_table(Path::new(table_path))?;
    let absolute = table.rules().iter().filter(|r| r.is_absolute()).count();

    println!("Table: {}", table_path);
    println!("  Rules:       {}", table.len());
    println!("  Exact:       {}", table.exact_count());
    println!("  Prefix:      {}", table.prefix_count());
    println!("  Absolute:    {}", absolute);

    Ok(())
}

fn print_findings(errors: &[ConversionError]) {
    for error in errors {
        eprintln!("  {}", error);
    }
}

fn write_report(path: Option<&str>, errors: &[ConversionError]) -> Result<(), String> {
    let Some(path) = path else { return Ok(()) };
    let json = build_report_json(errors).map_err(|e| format!("Failed to serialize report: {}", e))?;
    table::write_text(Path::new(path), &json)
}
