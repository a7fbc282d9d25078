//! Pre-flight validation: proves the witness data and the legacy state
//! explain each other before anything is mutated.
//!
//! Three checks run in order:
//!   1. every live slot in the legacy ERC-20 contract is derivable from a
//!      witness entry (or is a known scalar slot),
//!   2. every witnessed balance holder has a live slot in state,
//!   3. every set flag in the legacy message passer corresponds to a
//!      witnessed withdrawal.
//!
//! On success the witnessed withdrawals are returned, filtered down to the
//! ones actually sent through the cross-domain messenger.

use crate::alloc::GenesisAlloc;
use crate::constants::{
    ABI_TRUE, L2_CROSS_DOMAIN_MESSENGER_ADDRESS, LEGACY_ERC20_ETH_ADDRESS,
    LEGACY_MESSAGE_PASSER_ADDRESS, SEQUENCER_ENTRYPOINT_ADDRESS,
};
use crate::crossdomain::LegacyWithdrawal;
use crate::errors::MigrationError;
use crate::slots::{allowance_slot, balance_slot, is_ignored_slot};
use crate::witness::WitnessStore;
use alloy_primitives::{Address, B256};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

/// What a witnessed storage slot of the legacy ERC-20 contract holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// `balances[holder]`.
    Balance(Address),
    /// `allowances[owner][spender]`.
    Allowance {
        owner: Address,
        spender: Address,
    },
}

/// Derive the slot → kind index for every witnessed holder and allowance
/// pair. The sequencer-entrypoint sentinel is always included, whether or
/// not the witness lists it.
pub fn expected_slot_index(witness: &WitnessStore) -> HashMap<B256, SlotKind> {
    let mut index = HashMap::new();
    index.insert(
        balance_slot(SEQUENCER_ENTRYPOINT_ADDRESS),
        SlotKind::Balance(SEQUENCER_ENTRYPOINT_ADDRESS),
    );
    for holder in witness.balance_holders() {
        index.insert(balance_slot(*holder), SlotKind::Balance(*holder));
    }
    for pair in witness.allowances() {
        index.insert(
            allowance_slot(pair.owner, pair.spender),
            SlotKind::Allowance {
                owner: pair.owner,
                spender: pair.spender,
            },
        );
    }
    index
}

/// Validate the witness against the allocation without mutating anything.
///
/// Returns the witnessed withdrawals that were sent through the L2
/// cross-domain messenger, in witness order. With `no_check` the
/// completeness failures degrade to warnings; decode failures and bad
/// inputs still abort.
pub fn pre_check(
    alloc: &GenesisAlloc,
    witness: &WitnessStore,
    no_check: bool,
) -> Result<Vec<LegacyWithdrawal>, MigrationError> {
    let index = expected_slot_index(witness);

    // 1. No live ERC-20 slot may be unexplained.
    for (slot, _) in alloc.storage_iter(&LEGACY_ERC20_ETH_ADDRESS) {
        if is_ignored_slot(slot) {
            continue;
        }
        if !index.contains_key(slot) {
            let err = MigrationError::UnknownStorageSlot { slot: *slot };
            if no_check {
                warn!(%err, "continuing past unexplained slot");
                continue;
            }
            return Err(err);
        }
    }

    // 2. Every witnessed holder must be live in state. The sequencer
    // entrypoint sentinel is exempt: it is added unconditionally and many
    // chains never funded it.
    for holder in witness.balance_holders() {
        if *holder == SEQUENCER_ENTRYPOINT_ADDRESS {
            continue;
        }
        let slot = balance_slot(*holder);
        if alloc
            .storage_value(&LEGACY_ERC20_ETH_ADDRESS, &slot)
            .is_none()
        {
            let err = MigrationError::MissingSlotInWitness {
                address: *holder,
                slot,
            };
            if no_check {
                warn!(%err, "continuing past missing holder slot");
                continue;
            }
            return Err(err);
        }
    }

    // 3. Every set flag in the legacy message passer must be witnessed.
    let withdrawals = witness.legacy_withdrawals()?;
    let witnessed_slots: HashSet<B256> =
        withdrawals.iter().map(LegacyWithdrawal::storage_slot).collect();
    for (slot, value) in alloc.storage_iter(&LEGACY_MESSAGE_PASSER_ADDRESS) {
        if *value != ABI_TRUE {
            continue;
        }
        if !witnessed_slots.contains(slot) {
            let err = MigrationError::MissingWithdrawalWitness { slot: *slot };
            if no_check {
                warn!(%err, "continuing past unwitnessed withdrawal flag");
                continue;
            }
            return Err(err);
        }
    }

    // Only messages passed by the cross-domain messenger are real
    // withdrawals; anything else wrote to the passer directly and cannot be
    // relayed on L1.
    let filtered: Vec<LegacyWithdrawal> = withdrawals
        .into_iter()
        .filter(|wd| {
            if wd.message_sender == L2_CROSS_DOMAIN_MESSENGER_ADDRESS {
                true
            } else {
                debug!(
                    sender = %wd.message_sender,
                    "skipping withdrawal not sent through the messenger",
                );
                false
            }
        })
        .collect();

    Ok(filtered)
}
