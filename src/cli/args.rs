//! Defines the command-line arguments and subcommands for the ae CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "ae",
    version,
    about = "Tokenize, parse and check ae schema files."
)]
pub struct AeArgs {
    /// Render errors as plain text instead of a rich report.
    #[arg(long, global = true)]
    pub plain: bool,

    /// Log pipeline progress to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the token listing of a file.
    Tokens {
        /// The ae file to tokenize, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
        /// Print JSON instead of the `line:col KIND value` listing.
        #[arg(long)]
        json: bool,
    },
    /// Show the Abstract Syntax Tree (AST) for a file.
    Ast {
        /// The ae file to parse, or `-` for stdin.
        #[arg(required = true)]
        file: PathBuf,
        /// Print JSON instead of the indented tree.
        #[arg(long)]
        json: bool,
    },
    /// Parse a file, or every `.ae` file under a directory, and report failures.
    Check {
        /// The file or directory to check.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}
