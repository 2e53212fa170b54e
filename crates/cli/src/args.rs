//! Command-line arguments

use clap::Parser;
use std::path::PathBuf;

/// Treesum - SHA-1 fingerprints for every file under a path
#[derive(Debug, Parser)]
#[command(name = "treesum")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File or directory to fingerprint
    pub path: PathBuf,

    /// Log traversal details to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Exit with status 1 if any file or directory could not be read
    #[arg(long)]
    pub strict: bool,
}
