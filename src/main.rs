use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kaisetsu::app::App;
use kaisetsu::config::Config;
use kaisetsu::draft::state::{FormData, WizardStep};
use kaisetsu::draft::store::{DraftStore, FileDraftStore};
use kaisetsu::logging::init_logging;
use kaisetsu::validate;

#[derive(Parser)]
#[command(
    name = "kaisetsu",
    about = "Terminal wizard for drafting a Japanese company-incorporation filing",
    version
)]
struct Cli {
    /// Path to a config file (overrides the user config)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Force debug-level logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of the stored draft
    Status,
    /// Run every step's validation rules against the stored draft
    Validate,
    /// Delete the stored draft
    Reset {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let _logging = init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        None => App::new(&config).run().await,
        Some(Commands::Status) => cmd_status(&config),
        Some(Commands::Validate) => cmd_validate(&config),
        Some(Commands::Reset { yes }) => cmd_reset(&config, yes),
    }
}

fn draft_store(config: &Config) -> FileDraftStore {
    FileDraftStore::new(&config.data_path())
}

fn load_draft(config: &Config) -> Result<Option<(kaisetsu::draft::state::DraftSnapshot, FormData)>> {
    let snapshot = draft_store(config)
        .load()
        .context("Failed to read the stored draft")?;
    Ok(snapshot.map(|s| {
        let data = s.data.clone().merge_over(&FormData::default());
        (s, data)
    }))
}

fn cmd_status(config: &Config) -> Result<()> {
    let Some((snapshot, data)) = load_draft(config)? else {
        println!("No draft saved.");
        return Ok(());
    };

    println!("Draft {}", snapshot.draft_id);
    println!(
        "  step:     {} ({} of {})",
        snapshot.step.label(),
        snapshot.step.index() + 1,
        WizardStep::all().len()
    );
    match snapshot.saved_at {
        Some(saved_at) => println!("  saved at: {}", saved_at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  saved at: never synced"),
    }
    println!();
    for step in WizardStep::all() {
        match validate::validate_step(*step, &data) {
            None => println!("  [ok] {}", step.label()),
            Some(message) => println!("  [--] {}: {}", step.label(), message),
        }
    }
    Ok(())
}

fn cmd_validate(config: &Config) -> Result<()> {
    let data = match load_draft(config)? {
        Some((_, data)) => data,
        None => {
            println!("No draft saved; validating a blank form.");
            FormData::default()
        }
    };

    let mut failures = 0;
    for step in WizardStep::all() {
        match validate::validate_step(*step, &data) {
            None => println!("ok    {}", step.label()),
            Some(message) => {
                failures += 1;
                println!("FAIL  {}: {}", step.label(), message);
            }
        }
    }
    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_reset(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        eprintln!("This deletes the stored draft. Re-run with -y to confirm.");
        std::process::exit(1);
    }
    draft_store(config)
        .delete()
        .context("Failed to delete the stored draft")?;
    println!("Draft deleted.");
    Ok(())
}
