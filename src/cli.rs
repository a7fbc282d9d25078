use alloy_primitives::{Address, U256};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the migration tool
#[derive(Parser, Debug)]
#[command(name = "bedrock-surgery", about = "Legacy state migration tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the witness data against the genesis allocation without
    /// mutating anything.
    Check(MigrateArgs),
    /// Run the full migration and write the migrated allocation.
    Migrate(MigrateArgs),
}

#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Path to the genesis allocation JSON (address -> account map).
    #[arg(long)]
    pub alloc: PathBuf,

    /// Path to the line-oriented witness file (ETH/MSG entries).
    #[arg(long)]
    pub witness: Option<PathBuf>,

    /// Path to the JSON array of balance-holder addresses.
    #[arg(long)]
    pub addresses: Option<PathBuf>,

    /// Path to the JSON array of {"fr","to"} allowance pairs.
    #[arg(long)]
    pub allowances: Option<PathBuf>,

    /// Path to the JSON array of {"who","msg"} pre-EVM sent messages.
    #[arg(long)]
    pub messages: Option<PathBuf>,

    /// L2 chain id; must have registered chain parameters.
    #[arg(long, default_value = "901")]
    pub chain_id: u64,

    /// Address of the L1 cross-domain messenger migrated withdrawals target.
    /// Defaults to the chain's canonical messenger; required for chains
    /// without one.
    #[arg(long)]
    pub l1_cross_domain_messenger: Option<Address>,

    /// Where to write the migrated allocation (migrate only). Defaults to
    /// stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Run every phase but do not write the result.
    #[arg(long)]
    pub dry_run: bool,

    /// Downgrade witness-completeness failures to warnings. Supply and
    /// balance-overwrite failures still abort.
    #[arg(long)]
    pub no_check: bool,

    /// Override the chain's expected supply delta (decimal wei).
    #[arg(long)]
    pub expected_supply_delta: Option<U256>,
}
