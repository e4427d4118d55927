use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use syllex::cli::{Cli, Commands};
use syllex::config::Config;
use syllex::pipeline;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;

    // Apply CLI overrides
    if let Some(root) = cli.root {
        config.corpus.root = root;
    }
    if let Some(name) = cli.name {
        config.corpus.name = name;
    }
    if let Some(speakers) = cli.speakers {
        config.corpus.speaker_csv = Some(speakers);
    }
    if let Some(output) = cli.output {
        config.export.path = output;
    }

    let result = match cli.command {
        None | Some(Commands::Run) => pipeline::run_all(&config, cli.quiet, cli.verbose),
        Some(Commands::Import) => pipeline::run_import(&config, cli.quiet, cli.verbose),
        Some(Commands::Enrich { min_pause }) => {
            pipeline::run_enrich(&config, min_pause, cli.quiet, cli.verbose)
        }
        Some(Commands::Analyze { no_formants }) => {
            pipeline::run_analyze(&config, no_formants, cli.quiet, cli.verbose)
        }
        Some(Commands::Export) => pipeline::run_export(&config, cli.quiet),
        Some(Commands::Inspect) => pipeline::run_inspect(&config, cli.quiet),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "syllex",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }

    if !cli.quiet {
        eprintln!("{}", "Done.".green());
    }
    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/syllex/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        // Load from custom path
        Config::load(path)?
    } else {
        // Try default path, fall back to defaults
        let default_path = Config::default_path();
        Config::load_or_default(&default_path)
    };

    // Apply environment variable overrides
    Ok(config.with_env_overrides())
}
