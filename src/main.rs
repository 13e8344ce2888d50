use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stgp_rules::config::ConfigManager;
use stgp_rules::functions::registry;
use stgp_rules::rules::{builtin_rules, explain_rule, Rule};
use stgp_rules::Snapshot;

#[derive(Parser, Debug)]
#[command(name = "stgp-rules", about = "Typed symbolic rule engine runner")]
struct Cli {
    /// TOML or JSON config file, layered under STGP__ environment variables
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a persisted rule against a snapshot
    Run { rule: PathBuf, snapshot: PathBuf },
    /// Describe a persisted rule in plain language
    Explain { rule: PathBuf },
    /// Print the built-in rule catalog as JSON
    Builtins,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let manager = ConfigManager::new();
    manager
        .load_layered(cli.config.as_deref())
        .context("loading configuration")?;
    let config = manager.get();

    // RUST_LOG still wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    match cli.command {
        Command::Run { rule, snapshot } => {
            let loaded = Rule::from_file(&rule, &config.engine)
                .with_context(|| format!("loading rule {}", rule.display()))?;
            let snapshot = Snapshot::from_file(&snapshot)
                .with_context(|| format!("loading snapshot {}", snapshot.display()))?;
            let score = loaded.execute_with(&snapshot, &config.engine)?;
            println!("{} {} {}", loaded.id(), loaded.purpose(), score);
        }
        Command::Explain { rule } => {
            let loaded = Rule::from_file(&rule, &config.engine)
                .with_context(|| format!("loading rule {}", rule.display()))?;
            println!("{}", explain_rule(&loaded));
        }
        Command::Builtins => {
            let rules = builtin_rules(&registry::read())?;
            let records: Vec<_> = rules.iter().map(Rule::to_persisted_form).collect();
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
    }

    Ok(())
}
