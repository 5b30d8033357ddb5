//! The ae Command-Line Interface.
//!
//! This module is the entry point for all CLI commands. It reads source text,
//! hands it to the library pipeline, and turns the first error into a
//! diagnostic and a non-zero exit status.

use std::io::Read;
use std::path::Path;
use std::{fs, io, process};

use clap::Parser;
use log::{debug, info};

use crate::cli::args::{AeArgs, Command};
use crate::diagnostics::AeError;
use crate::discovery::discover_source_files;
use crate::syntax::{parse_source, tokenize};

pub mod args;
pub mod diagnostics;
pub mod output;

/// Name used for source read from standard input.
pub const STDIN_NAME: &str = "<stdin>";

/// The main entry point for the CLI.
pub fn run() {
    let args = AeArgs::parse();
    init_logging(args.verbose);

    let result = match &args.command {
        Command::Tokens { file, json } => handle_tokens(file, *json),
        Command::Ast { file, json } => handle_ast(file, *json),
        Command::Check { path } => handle_check(path, args.plain),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            output::print_error(e, args.plain);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Reads a whole source file, or standard input for `-`.
///
/// Returns the display name of the source alongside its text.
pub fn read_source(path: &Path) -> Result<(String, String), AeError> {
    if path == Path::new("-") {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| AeError::Io {
                path: STDIN_NAME.to_string(),
                source,
            })?;
        return Ok((STDIN_NAME.to_string(), text));
    }

    let name = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|source| AeError::Io {
        path: name.clone(),
        source,
    })?;
    debug!("read {} bytes from {}", text.len(), name);
    Ok((name, text))
}

/// Handles the `tokens` subcommand.
fn handle_tokens(path: &Path, json: bool) -> Result<bool, AeError> {
    let (name, text) = read_source(path)?;
    let tokens = tokenize(&text).map_err(|e| e.with_source(&name, &text))?;
    if json {
        output::print_json(&tokens)?;
    } else {
        output::print_tokens(&tokens);
    }
    Ok(true)
}

/// Handles the `ast` subcommand.
fn handle_ast(path: &Path, json: bool) -> Result<bool, AeError> {
    let (name, text) = read_source(path)?;
    let program = parse_source(&name, &text)?;
    if json {
        output::print_json(&program)?;
    } else {
        output::print_ast(&program);
    }
    Ok(true)
}

/// Handles the `check` subcommand. Every file is checked; the result is
/// `false` if any of them failed.
fn handle_check(path: &Path, plain: bool) -> Result<bool, AeError> {
    let files = discover_source_files(path)?;
    info!("checking {} files under {}", files.len(), path.display());

    let mut failed = 0;
    for file in &files {
        let outcome = read_source(file).and_then(|(name, text)| parse_source(&name, &text));
        match outcome {
            Ok(program) => output::print_check_ok(file, program.len()),
            Err(e) => {
                failed += 1;
                output::print_check_failed(file);
                output::print_error(e, plain);
            }
        }
    }

    output::print_check_summary(files.len(), failed);
    Ok(failed == 0)
}
