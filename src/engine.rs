//! Migration orchestrator.
//!
//! Runs the phases in a fixed order — pre-check, balance migration,
//! withdrawal migration — against a scratch copy of the allocation, and
//! commits the copy only when every phase succeeds. A failed or dry run
//! leaves the caller's allocation untouched.

use crate::alloc::GenesisAlloc;
use crate::balances::migrate_balances;
use crate::crossdomain::LegacyWithdrawal;
use crate::errors::MigrationError;
use crate::params::params_for_chain;
use crate::precheck;
use crate::withdrawals::migrate_withdrawals;
use crate::witness::WitnessStore;
use alloy_primitives::{Address, U256};
use tracing::info;

/// Configuration for a migration run.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// L2 chain id; must have registered [`ChainParams`](crate::params::ChainParams).
    pub chain_id: u64,
    /// Override the chain's canonical L1 cross-domain messenger.
    pub l1_cross_domain_messenger: Option<Address>,
    /// Run every phase but discard the result.
    pub dry_run: bool,
    /// Downgrade witness-completeness failures to warnings.
    pub no_check: bool,
    /// Override the chain's expected supply delta.
    pub expected_supply_delta: Option<U256>,
}

/// Chain parameters after applying the config's overrides.
struct ResolvedParams {
    supply_delta: U256,
    l1_cross_domain_messenger: Address,
}

impl MigrationConfig {
    fn resolve(&self) -> Result<ResolvedParams, MigrationError> {
        let params = params_for_chain(self.chain_id).ok_or(MigrationError::UnknownChain {
            chain_id: self.chain_id,
        })?;
        let l1_cross_domain_messenger = self
            .l1_cross_domain_messenger
            .or(params.l1_cross_domain_messenger)
            .ok_or(MigrationError::MissingL1Messenger {
                chain_id: self.chain_id,
            })?;
        Ok(ResolvedParams {
            supply_delta: self
                .expected_supply_delta
                .unwrap_or(params.expected_supply_delta),
            l1_cross_domain_messenger,
        })
    }
}

/// Validate the witness against the allocation without mutating it.
///
/// Returns the filtered withdrawals that a full migration would process.
pub fn pre_check(
    alloc: &GenesisAlloc,
    witness: &WitnessStore,
    config: &MigrationConfig,
) -> Result<Vec<LegacyWithdrawal>, MigrationError> {
    // Fail on a bad chain id before doing any work. The messenger address
    // is not needed until migration, so it is not resolved here.
    params_for_chain(config.chain_id).ok_or(MigrationError::UnknownChain {
        chain_id: config.chain_id,
    })?;
    precheck::pre_check(alloc, witness, config.no_check)
}

/// Run the full migration.
///
/// All mutation happens on a clone; `alloc` is only replaced after every
/// phase has succeeded, and never under `dry_run`.
pub fn migrate(
    alloc: &mut GenesisAlloc,
    witness: &WitnessStore,
    config: &MigrationConfig,
) -> Result<(), MigrationError> {
    let params = config.resolve()?;

    let mut scratch = alloc.clone();
    let withdrawals = precheck::pre_check(&scratch, witness, config.no_check)?;
    migrate_balances(&mut scratch, witness, params.supply_delta, config.no_check)?;
    migrate_withdrawals(
        &mut scratch,
        &withdrawals,
        params.l1_cross_domain_messenger,
        config.no_check,
    )?;

    if config.dry_run {
        info!("dry run complete, discarding migrated allocation");
        return Ok(());
    }

    *alloc = scratch;
    info!(chain_id = config.chain_id, "migration complete");
    Ok(())
}
