//! finweb main entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use finweb_client::HttpOptionSource;
use finweb_config::{Config, ConfigError};
use finweb_core::{
    DependentSelectLoader, LoadOutcome, LogNotifier, MemorySelect, OptionId, ParentSelection,
    SelectTarget,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

type Loader = DependentSelectLoader<HttpOptionSource, LogNotifier>;

#[derive(Parser, Debug)]
#[command(name = "finweb")]
#[command(version = "0.1.0")]
#[command(about = "Load subcategory options for a category from the finance app", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the subcategories of one category and print the select
    Load {
        /// Category id (omit for no selection)
        category: Option<String>,
        /// Subcategory id to preselect
        #[arg(short, long)]
        selected: Option<String>,
    },
    /// Read category ids from stdin, one per line, loading each as it arrives
    Watch {
        /// Subcategory id to preselect
        #[arg(short, long)]
        selected: Option<String>,
    },
    /// Print the default configuration
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Command::InitConfig = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, found) = load_config(&args.config)?;

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    if found {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    log::info!(
        "Backend: {} (race policy: {})",
        config.api.base_url,
        config.loader.race_policy
    );

    // One thread, like the browser event loop the loader was written for
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(run(args.command, config))
}

/// Load the config file, falling back to defaults when it does not exist
fn load_config(path: &PathBuf) -> anyhow::Result<(Config, bool)> {
    match Config::load(path.clone()) {
        Ok(config) => Ok((config, true)),
        Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), false)),
        Err(e) => Err(anyhow::anyhow!("{}", e.to_details())),
    }
}

async fn run(command: Command, config: Config) -> anyhow::Result<()> {
    let source = HttpOptionSource::new(config.clone()).context("creating HTTP client")?;
    let loader: Arc<Loader> = Arc::new(DependentSelectLoader::from_config(source, LogNotifier, &config));
    let target = Arc::new(SelectTarget::new(MemorySelect::new()));

    match command {
        Command::Load { category, selected } => {
            let parent = ParentSelection::from(category.as_deref());
            let preselect = selected.map(OptionId::new);

            let outcome = loader.load(&target, &parent, preselect.as_ref()).await;
            print_control(&target, &parent, &outcome);

            if let LoadOutcome::Failed(error) = outcome {
                anyhow::bail!("{}", error.to_details());
            }
        }
        Command::Watch { selected } => {
            let preselect = selected.map(OptionId::new);
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            let mut tasks = JoinSet::new();

            // Each line is a change event; loads are not awaited before the next one
            while let Some(line) = lines.next_line().await? {
                let loader = loader.clone();
                let target = target.clone();
                let preselect = preselect.clone();
                tasks.spawn(async move {
                    let parent = ParentSelection::from(line);
                    let outcome = loader.load(&target, &parent, preselect.as_ref()).await;
                    print_control(&target, &parent, &outcome);
                });
            }

            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    log::error!("load task failed: {}", e);
                }
            }
        }
        Command::InitConfig => {}
    }

    Ok(())
}

fn print_control(target: &SelectTarget<MemorySelect>, parent: &ParentSelection, outcome: &LoadOutcome) {
    let parent = parent.id().unwrap_or("-");
    if let LoadOutcome::Superseded = outcome {
        println!("[{}] superseded by a newer selection", parent);
        return;
    }
    println!("[{}] {}", parent, target.state());
    print!("{}", target.with_control(|control| control.render()));
}
