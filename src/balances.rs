//! Legacy ETH balance migration.
//!
//! Walks the legacy ERC-20 contract's storage, credits each witnessed
//! holder's native balance, deletes the migrated slots, and proves that the
//! migrated total reconciles with the recorded totalSupply before zeroing it.

use crate::alloc::GenesisAlloc;
use crate::constants::LEGACY_ERC20_ETH_ADDRESS;
use crate::errors::MigrationError;
use crate::precheck::{expected_slot_index, SlotKind};
use crate::slots::{decode_u256, is_ignored_slot};
use crate::witness::WitnessStore;
use alloy_primitives::{Address, B256, U256};
use tracing::{debug, info, warn};

/// One pending balance credit, collected before any mutation happens.
struct BalanceUpdate {
    address: Address,
    balance: U256,
    slot: B256,
}

/// Migrate every witnessed ERC-20 balance into native balances.
///
/// `expected_supply_delta` is the amount by which the recorded totalSupply is
/// allowed to exceed the sum of migrated balances. Any other difference
/// aborts with a supply mismatch; that failure is never downgraded, and
/// neither is a holder that already carries a native balance.
pub fn migrate_balances(
    alloc: &mut GenesisAlloc,
    witness: &WitnessStore,
    expected_supply_delta: U256,
    no_check: bool,
) -> Result<(), MigrationError> {
    let index = expected_slot_index(witness);

    // Read-only collection pass. Nothing is written until every slot has
    // been classified.
    let mut updates = Vec::new();
    let mut total_migrated = U256::ZERO;
    for (slot, value) in alloc.storage_iter(&LEGACY_ERC20_ETH_ADDRESS) {
        if is_ignored_slot(slot) {
            continue;
        }
        match index.get(slot) {
            Some(SlotKind::Balance(holder)) => {
                let balance = decode_u256(*value);
                let existing = alloc.balance(holder);
                if !existing.is_zero() {
                    return Err(MigrationError::NonZeroPreExistingBalance {
                        address: *holder,
                        balance: existing,
                    });
                }
                total_migrated = total_migrated.checked_add(balance).ok_or(
                    MigrationError::BalanceTotalOverflow {
                        address: *holder,
                        balance,
                    },
                )?;
                updates.push(BalanceUpdate {
                    address: *holder,
                    balance,
                    slot: *slot,
                });
            }
            // Allowance slots are validated but left in place.
            Some(SlotKind::Allowance { .. }) => {}
            None => {
                let err = MigrationError::UnknownStorageSlot { slot: *slot };
                if no_check {
                    warn!(%err, "skipping unexplained slot");
                    continue;
                }
                return Err(err);
            }
        }
    }

    let total_supply = alloc.total_supply();
    let delta = total_supply.checked_sub(total_migrated);
    if delta != Some(expected_supply_delta) {
        return Err(MigrationError::SupplyMismatch {
            total_supply,
            migrated: total_migrated,
            expected: expected_supply_delta,
        });
    }

    let migrated_accounts = updates.len();
    for update in updates {
        debug!(address = %update.address, balance = %update.balance, "migrating balance");
        alloc.set_balance(update.address, update.balance, update.slot);
    }
    alloc.zero_total_supply();

    info!(
        accounts = migrated_accounts,
        total = %total_migrated,
        "migrated legacy ETH balances",
    );
    Ok(())
}
