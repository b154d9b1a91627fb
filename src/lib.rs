pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod formatter;
pub mod fs;
pub mod linter;
pub mod rule;
pub mod syntax;
pub mod testutil;

use std::io::Read;

use anyhow::Result;

use cli::Args;
use config::load_config;
use formatter::create_formatter;
use fs::discover_files;
use linter::{lint_source, run_linter};
use rule::registry::RuleRegistry;
use syntax::source::SourceFile;

/// Run the checker. Returns the exit code: 0 = clean, 1 = offenses found.
pub fn run(args: Args) -> Result<i32> {
    let config = load_config(args.config.as_deref())?;
    let registry = RuleRegistry::default_registry();

    // --list-rules: print all registered rule names and exit
    if args.list_rules {
        let mut names = registry.names();
        names.sort();
        for name in names {
            println!("{name}");
        }
        return Ok(0);
    }

    // --stdin: read from stdin and check a single file
    if let Some(ref display_path) = args.stdin {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        let source = SourceFile::from_string(display_path.clone(), input);
        let diagnostics = lint_source(&source, &config, &registry, &args);
        create_formatter(&args.format).print(&diagnostics, 1);
        return if diagnostics.is_empty() { Ok(0) } else { Ok(1) };
    }

    let files = discover_files(&args.paths, &config)?;

    if args.debug {
        eprintln!("debug: {} files to check", files.len());
        eprintln!("debug: {} rules registered", registry.len());
    }

    let result = run_linter(&files, &config, &registry, &args);
    create_formatter(&args.format).print(&result.diagnostics, result.file_count);

    if result.diagnostics.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}
