//! covpaint CLI: render coverage-painted source rows
//!
//! ## Usage
//!
//! ```bash
//! covpaint render coverage.json --source-root . -o target/covpaint
//! covpaint render coverage.json --file src/Foo.java     # rows to stdout
//! covpaint summary coverage.json --format json
//! ```

use clap::Parser;
use covpaint_cli::{
    handlers::{execute_render, execute_summary},
    logging::init_logging,
    Cli, CliConfig, CliResult, ColorChoice, Commands, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    let use_color = config.color.should_color();
    console::set_colors_enabled(use_color);
    console::set_colors_enabled_stderr(use_color);
    init_logging(config.verbosity, use_color);

    match cli.command {
        Commands::Render(args) => {
            let mut config = config.with_jobs(args.jobs);
            if let Some(ref dir) = args.output {
                config = config.with_output_dir(dir);
            }
            execute_render(&config, &args).map(|_| ())
        }
        Commands::Summary(args) => execute_summary(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        Verbosity::from_occurrences(cli.verbose)
    };

    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new().with_verbosity(verbosity).with_color(color)
}
