use alloy_primitives::{Address, B256, U256};
use thiserror::Error;

/// Errors surfaced by the migration engine. The engine never retries; every
/// failure aborts the run and the orchestrator discards the allocation.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// A live storage slot in the legacy ERC-20 contract is not explained by
    /// any witness entry.
    #[error("unknown storage slot in state: {slot}")]
    UnknownStorageSlot {
        /// The unexplained slot key.
        slot: B256,
    },

    /// The witness claims a balance holder whose slot is absent from state.
    #[error("witness balance slot {slot} for {address} is missing from state")]
    MissingSlotInWitness {
        /// The witnessed holder.
        address: Address,
        /// Its derived balance slot.
        slot: B256,
    },

    /// The legacy message passer has a set slot no witness entry accounts for.
    #[error("legacy message passer slot {slot} is set but has no witness entry")]
    MissingWithdrawalWitness {
        /// The unexplained withdrawal slot.
        slot: B256,
    },

    /// The target account already holds a native balance; migrating on top of
    /// it would silently drop value.
    #[error("account {address} has pre-existing balance {balance}, refusing to overwrite")]
    NonZeroPreExistingBalance {
        /// The account being migrated into.
        address: Address,
        /// Its current native balance.
        balance: U256,
    },

    /// The legacy total supply minus the sum of migrated balances does not
    /// match the per-chain expected delta.
    #[error(
        "supply mismatch: supply {total_supply} minus migrated {migrated} \
         does not leave expected delta {expected}"
    )]
    SupplyMismatch {
        /// Value of the legacy totalSupply slot before zeroing.
        total_supply: U256,
        /// Sum of all migrated balance slots.
        migrated: U256,
        /// The allowed per-chain delta.
        expected: U256,
    },

    /// The running sum of migrated balances does not fit in 256 bits.
    #[error("migrated balance total overflowed adding {balance} for {address}")]
    BalanceTotalOverflow {
        /// The holder whose balance tipped the sum over.
        address: Address,
        /// That holder's balance.
        balance: U256,
    },

    /// A filtered withdrawal's pre-image slot is not set in the legacy
    /// message passer's storage.
    #[error("legacy withdrawal slot {slot} not found in legacy message passer storage")]
    LegacySlotNotFound {
        /// The expected legacy slot.
        slot: B256,
    },

    /// The legacy relayMessage payload cannot be decoded.
    #[error("malformed cross-domain message data: {reason}")]
    MalformedXDomainData {
        /// What failed to decode.
        reason: String,
    },

    /// No chain parameters are registered for the given chain id.
    #[error("no chain parameters for chain id {chain_id}")]
    UnknownChain {
        /// The unrecognized chain id.
        chain_id: u64,
    },

    /// The chain has no canonical L1 cross-domain messenger and none was
    /// supplied.
    #[error("no L1 cross-domain messenger known for chain id {chain_id}, pass one explicitly")]
    MissingL1Messenger {
        /// The chain id lacking a messenger address.
        chain_id: u64,
    },
}
