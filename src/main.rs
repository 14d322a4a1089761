use std::fs;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use colored::Colorize;
use log::{Level, LevelFilter, Log, Metadata, Record};
use unicode_segmentation::UnicodeSegmentation;

use tyck::typechecker::{self, CheckerConfig, Compatibility, TypeChecker, TypeEnv};
use tyck::{Error, Term};

#[derive(ClapParser)]
#[command(name = "tyck")]
#[command(version = tyck::VERSION)]
#[command(about = "Static type checker for a small structurally-typed language", long_about = None)]
struct Cli {
    /// Increase log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type-check one or more source files
    Check {
        /// The source files to check
        #[arg(required = true)]
        files: Vec<String>,

        /// Accept subtypes for call arguments and conditional branches
        #[arg(long)]
        subtyping: bool,
    },
    /// Parse a file and print the program back (for debugging)
    Parse {
        /// The source file to parse
        file: String,

        /// Print the syntax tree instead of source text
        #[arg(long)]
        debug: bool,
    },
    /// Start a REPL session that prints the type of each input
    Repl {
        /// Accept subtypes for call arguments and conditional branches
        #[arg(long)]
        subtyping: bool,
    },
}

/// Colored stderr logger behind the `log` facade
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let level = match record.level() {
            Level::Error => "error".bright_red(),
            Level::Warn => "warn".bright_yellow(),
            Level::Info => "info".bright_green(),
            Level::Debug => "debug".bright_cyan(),
            Level::Trace => "trace".bright_magenta(),
        };
        eprintln!("[{}] {}", level, record.args());
    }

    fn flush(&self) {}
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn checker_for(subtyping: bool) -> TypeChecker {
    let compatibility = if subtyping {
        Compatibility::Subtype
    } else {
        Compatibility::Exact
    };
    TypeChecker::new(CheckerConfig::new().with_compatibility(compatibility))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check { files, subtyping } => check_files(&files, &checker_for(subtyping)),
        Commands::Parse { file, debug } => parse_file(&file, debug),
        Commands::Repl { subtyping } => run_repl(&checker_for(subtyping)),
    }
}

fn check_files(filenames: &[String], checker: &TypeChecker) -> Result<()> {
    let mut sources = Vec::with_capacity(filenames.len());
    for filename in filenames {
        let source = fs::read_to_string(filename)
            .with_context(|| format!("Failed to read file: {}", filename))?;
        sources.push(source);
    }

    let mut failed = 0;
    let mut parsed: Vec<(usize, Term)> = Vec::new();
    for (index, source) in sources.iter().enumerate() {
        match tyck::parse(source) {
            Ok(term) => parsed.push((index, term)),
            Err(error) => {
                failed += 1;
                report_error(&filenames[index], source, &error);
            }
        }
    }

    let terms: Vec<Term> = parsed.iter().map(|(_, term)| term.clone()).collect();
    let results = if terms.len() > 1 {
        typechecker::check_batch(checker, &terms, &TypeEnv::new())
    } else {
        terms
            .iter()
            .map(|term| checker.check(term, &TypeEnv::new()))
            .collect()
    };

    for ((index, _), result) in parsed.iter().zip(results) {
        let filename = &filenames[*index];
        match result {
            Ok(ty) => println!("{} {}: {}", "✓".bright_green(), filename, ty),
            Err(error) => {
                failed += 1;
                report_error(filename, &sources[*index], &Error::Type(error));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} files failed to check", failed, filenames.len());
    }
    Ok(())
}

/// Print an error with the offending source line and a caret under it
fn report_error(filename: &str, source: &str, error: &Error) {
    match error {
        Error::Lex(errors) => {
            for e in errors {
                print_diagnostic(filename, source, e.line, e.column, &e.message);
                if let Some(suggestion) = &e.suggestion {
                    eprintln!("  {} {}", "help:".bright_cyan(), suggestion);
                }
            }
        }
        Error::Parse(e) => print_diagnostic(filename, source, e.line(), e.column(), &e.get_message()),
        Error::Type(e) => print_diagnostic(filename, source, e.line, e.column, &e.message()),
    }
}

fn print_diagnostic(filename: &str, source: &str, line: usize, column: usize, message: &str) {
    eprintln!(
        "{} {}:{}:{}: {}",
        "✗".bright_red(),
        filename,
        line,
        column,
        message.bright_red()
    );

    if let Some(context) = get_line_context(source, line) {
        let gutter = " ".repeat(line.to_string().len());
        let prefix: String = context.chars().take(column.saturating_sub(1)).collect();
        let offset = prefix.graphemes(true).count();
        eprintln!("  {} |", gutter);
        eprintln!("  {} | {}", line, context);
        eprintln!("  {} | {}{}", gutter, " ".repeat(offset), "^".bright_red());
    }
}

// Helper function to get a line of context from source code
fn get_line_context(source: &str, line_num: usize) -> Option<String> {
    if line_num == 0 {
        return None;
    }
    source.lines().nth(line_num - 1).map(str::to_string)
}

fn parse_file(filename: &str, debug: bool) -> Result<()> {
    let source = fs::read_to_string(filename)
        .with_context(|| format!("Failed to read file: {}", filename))?;

    match tyck::parse(&source) {
        Ok(term) => {
            if debug {
                println!("{:#?}", term);
            } else {
                println!("{}", term);
            }
            Ok(())
        }
        Err(error) => {
            report_error(filename, &source, &error);
            bail!("Failed to parse '{}'", filename)
        }
    }
}

fn run_repl(checker: &TypeChecker) -> Result<()> {
    println!("{}", "tyck REPL".bright_green());
    println!("Type 'exit' or press Ctrl+D to exit");

    let mut input_buffer = String::new();
    let mut paren_level = 0;
    let mut brace_level = 0;

    loop {
        let prompt = if !input_buffer.is_empty() {
            "... ".bright_yellow().to_string()
        } else {
            ">>> ".bright_green().to_string()
        };

        print!("{}", prompt);
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim_end();

        if input_buffer.is_empty() && input == "exit" {
            break;
        }

        input_buffer.push_str(input);
        input_buffer.push('\n');

        update_repl_state(input, &mut paren_level, &mut brace_level);

        if paren_level > 0 || brace_level > 0 {
            continue;
        }

        let complete_input = input_buffer.trim();
        if !complete_input.is_empty() {
            let result = tyck::parse(complete_input)
                .and_then(|term| Ok(checker.check(&term, &TypeEnv::new())?));
            match result {
                Ok(ty) => println!("{}", ty.to_string().bright_cyan()),
                Err(error) => report_error("<repl>", complete_input, &error),
            }
        }

        input_buffer.clear();
        paren_level = 0;
        brace_level = 0;
    }

    println!("Goodbye!");
    Ok(())
}

/// Updates the REPL nesting levels based on the current line of input
fn update_repl_state(input: &str, paren_level: &mut usize, brace_level: &mut usize) {
    for c in input.chars() {
        match c {
            '(' => *paren_level += 1,
            ')' => *paren_level = paren_level.saturating_sub(1),
            '{' => *brace_level += 1,
            '}' => *brace_level = brace_level.saturating_sub(1),
            _ => {}
        }
    }
}
