use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::pipeline::CommentStyle;

#[derive(Parser)]
#[command(name = "codenote")]
#[command(author, version, about = "Annotate source files with AI-generated comments")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize codenote in the current directory
    Init,

    /// Annotate project files with AI-generated comments
    Annotate {
        /// Glob pattern selecting files to annotate (e.g. "src/**/*.js").
        /// When omitted, all discovered project files are annotated.
        pattern: Option<String>,

        /// Annotate only these files (may be repeated); overrides the pattern
        #[arg(short, long = "file")]
        file: Vec<PathBuf>,

        /// Comment verbosity
        #[arg(short, long, value_enum, default_value_t = CommentStyle::Basic)]
        style: CommentStyle,
    },

    /// Send a sample snippet to the completion service and print the reply
    Test,
}
