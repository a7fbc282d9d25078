use bedrock_surgery::alloc::GenesisAlloc;
use bedrock_surgery::cli::{Cli, Command, MigrateArgs};
use bedrock_surgery::engine::{self, MigrationConfig};
use bedrock_surgery::witness::WitnessStore;

use clap::Parser;
use eyre::{Context, Result};
use std::fs;
use std::io::Write;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check(args) => check(args),
        Command::Migrate(args) => migrate(args),
    }
}

fn check(args: MigrateArgs) -> Result<()> {
    let alloc = load_alloc(&args)?;
    let witness = load_witness(&args)?;
    let config = migration_config(&args);

    let withdrawals = engine::pre_check(&alloc, &witness, &config)?;
    info!(
        accounts = alloc.len(),
        holders = witness.balance_holders().len(),
        withdrawals = withdrawals.len(),
        "witness check passed",
    );
    Ok(())
}

fn migrate(args: MigrateArgs) -> Result<()> {
    let mut alloc = load_alloc(&args)?;
    let witness = load_witness(&args)?;
    let config = migration_config(&args);

    engine::migrate(&mut alloc, &witness, &config)?;

    if config.dry_run {
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&alloc)?;
    match &args.out {
        Some(path) => {
            fs::write(path, json).wrap_err_with(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote migrated allocation");
        }
        None => {
            std::io::stdout().write_all(json.as_bytes())?;
        }
    }
    Ok(())
}

fn migration_config(args: &MigrateArgs) -> MigrationConfig {
    MigrationConfig {
        chain_id: args.chain_id,
        l1_cross_domain_messenger: args.l1_cross_domain_messenger,
        dry_run: args.dry_run,
        no_check: args.no_check,
        expected_supply_delta: args.expected_supply_delta,
    }
}

fn load_alloc(args: &MigrateArgs) -> Result<GenesisAlloc> {
    let raw = fs::read_to_string(&args.alloc)
        .wrap_err_with(|| format!("reading {}", args.alloc.display()))?;
    let alloc: GenesisAlloc =
        serde_json::from_str(&raw).wrap_err("parsing genesis allocation")?;
    info!(accounts = alloc.len(), "loaded genesis allocation");
    Ok(alloc)
}

fn load_witness(args: &MigrateArgs) -> Result<WitnessStore> {
    let mut witness = WitnessStore::new();
    if let Some(path) = &args.witness {
        let raw =
            fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
        witness.read_witness_data(&raw)?;
    }
    if let Some(path) = &args.addresses {
        let raw =
            fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
        witness.read_addresses_json(&raw)?;
    }
    if let Some(path) = &args.allowances {
        let raw =
            fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
        witness.read_allowances_json(&raw)?;
    }
    if let Some(path) = &args.messages {
        let raw =
            fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
        witness.read_messages_json(&raw)?;
    }
    witness.include_sentinels();
    info!(
        holders = witness.balance_holders().len(),
        allowances = witness.allowances().len(),
        "loaded witness data",
    );
    Ok(witness)
}
