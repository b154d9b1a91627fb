use std::process;

use clap::Parser;

use sharpcop::cli::Args;

fn main() {
    let args = Args::parse();
    match sharpcop::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
