use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Render form submissions into filled or summary PDF documents.
#[derive(Debug, Parser)]
#[command(name = "formfill", about, version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a submission into a PDF (template fill or fallback summary)
    Render {
        /// Path to the submission data JSON file
        #[arg(value_name = "DATA")]
        data: PathBuf,

        /// Mapping configuration: a JSON file or a directory of JSON files
        #[arg(long, value_name = "PATH")]
        mappings: PathBuf,

        /// Form type to render (e.g. 'I-130')
        #[arg(long, value_name = "TYPE")]
        form: String,

        /// Supplemental data JSON merged under the primary data
        #[arg(long, value_name = "FILE")]
        supplemental: Option<PathBuf>,

        /// Output path. Default: the derived filename in the current directory
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Base URL of the fill backend service
        #[arg(long, value_name = "URL")]
        backend_url: Option<String>,

        /// Bearer token for the fill backend
        #[arg(long, value_name = "TOKEN")]
        backend_token: Option<String>,
    },

    /// Print the field-data map a template fill would send
    Fields {
        /// Path to the submission data JSON file
        #[arg(value_name = "DATA")]
        data: PathBuf,

        /// Mapping configuration: a JSON file or a directory of JSON files
        #[arg(long, value_name = "PATH")]
        mappings: PathBuf,

        /// Form type to build field data for
        #[arg(long, value_name = "TYPE")]
        form: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List form types the fill backend has a template for
    Templates {
        /// Base URL of the fill backend service
        #[arg(long, value_name = "URL")]
        backend_url: String,

        /// Bearer token for the fill backend
        #[arg(long, value_name = "TOKEN")]
        backend_token: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Output format for tabular results.
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Plain text, one entry per line
    Text,
    /// One JSON object
    Json,
}
