use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seat-plan")]
#[command(about = "Examination seating arrangement generator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose log output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (default: ~/.config/seat-plan/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Students per block (overrides the configuration)
    #[arg(long, global = true)]
    pub block_size: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Partition a roster into seating blocks and write the result as JSON
    Process {
        /// Roster file (.csv, .xlsx, .xls, .ods)
        #[arg(required = true)]
        input: PathBuf,

        /// Output JSON file (default: <roster>.seating.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate PDF/Excel from a seating JSON file
    Export {
        /// Seating JSON file
        #[arg(required = true)]
        input: PathBuf,

        /// Output format (pdf/excel/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export only this block (number or letter, e.g. 3 or C)
        #[arg(short, long)]
        block: Option<String>,
    },

    /// Partition a roster and export in one pass
    Run {
        /// Roster file (.csv, .xlsx, .xls, .ods)
        #[arg(required = true)]
        input: PathBuf,

        /// Output format (pdf/excel/both)
        #[arg(short, long, default_value = "both")]
        format: ExportFormat,

        /// Output file or directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a block summary of a seating JSON file
    Show {
        /// Seating JSON file
        #[arg(required = true)]
        input: PathBuf,

        /// Also print the desk/PRN list of every block
        #[arg(long)]
        students: bool,
    },

    /// Show or initialise the configuration
    Config {
        /// Print the effective configuration
        #[arg(long)]
        show: bool,

        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
    #[default]
    Both,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" | "xlsx" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            _ => Err(format!("Unknown format: {}. Use pdf, excel, or both", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Pdf => write!(f, "pdf"),
            ExportFormat::Excel => write!(f, "excel"),
            ExportFormat::Both => write!(f, "both"),
        }
    }
}
