use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "sharpcop", version, about = "A fast C# style checker")]
pub struct Args {
    /// Files or directories to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "quiet"])]
    pub format: String,

    /// Run only the specified rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,

    /// Exclude the specified rules (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub except: Vec<String>,

    /// List all registered rule names, one per line, then exit
    #[arg(long)]
    pub list_rules: bool,

    /// Read source from stdin, use PATH for display purposes
    #[arg(long, value_name = "PATH")]
    pub stdin: Option<PathBuf>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}
