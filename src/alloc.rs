//! In-memory genesis allocation.
//!
//! `GenesisAlloc` is the single mutable structure the engine operates on: a
//! map from address to account record (balance, nonce, code, storage). The
//! orchestrator owns it; the migrators borrow it mutably in sequence.

use crate::constants::LEGACY_ERC20_ETH_ADDRESS;
use crate::slots::{decode_u256, total_supply_slot};
use alloy_genesis::GenesisAccount;
use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable address → account mapping for the genesis template, with helpers
/// for the storage reads and writes the migration performs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenesisAlloc {
    accounts: BTreeMap<Address, GenesisAccount>,
}

impl GenesisAlloc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an allocation from raw account entries.
    pub fn from_accounts(accounts: BTreeMap<Address, GenesisAccount>) -> Self {
        Self { accounts }
    }

    /// Number of accounts in the allocation.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Get an account, if present.
    pub fn account(&self, addr: &Address) -> Option<&GenesisAccount> {
        self.accounts.get(addr)
    }

    /// Insert or replace an account wholesale.
    pub fn insert_account(&mut self, addr: Address, account: GenesisAccount) {
        self.accounts.insert(addr, account);
    }

    /// Native balance of an account; zero if the account does not exist.
    pub fn balance(&self, addr: &Address) -> U256 {
        self.accounts.get(addr).map(|a| a.balance).unwrap_or(U256::ZERO)
    }

    /// Read a storage word. Absent accounts and absent slots read as `None`.
    pub fn storage_value(&self, addr: &Address, slot: &B256) -> Option<B256> {
        self.accounts
            .get(addr)?
            .storage
            .as_ref()?
            .get(slot)
            .copied()
    }

    /// Iterate an account's storage; empty iterator if the account or its
    /// storage map is absent.
    pub fn storage_iter(&self, addr: &Address) -> impl Iterator<Item = (&B256, &B256)> {
        self.accounts
            .get(addr)
            .and_then(|a| a.storage.as_ref())
            .into_iter()
            .flatten()
    }

    /// Write a storage word, creating the account and its storage map if
    /// needed.
    pub fn set_storage(&mut self, addr: Address, slot: B256, value: B256) {
        self.accounts
            .entry(addr)
            .or_default()
            .storage
            .get_or_insert_with(BTreeMap::new)
            .insert(slot, value);
    }

    /// Remove a storage slot entirely. No-op if absent.
    pub fn remove_storage(&mut self, addr: &Address, slot: &B256) {
        if let Some(storage) = self.accounts.get_mut(addr).and_then(|a| a.storage.as_mut()) {
            storage.remove(slot);
        }
    }

    /// Move a migrated legacy balance into an account's native balance and
    /// delete the source slot from the legacy ERC-20 contract's storage.
    ///
    /// The caller has already verified the account holds no native balance,
    /// so the add never drops value.
    pub fn set_balance(&mut self, addr: Address, balance: U256, migrated_slot: B256) {
        let account = self.accounts.entry(addr).or_default();
        account.balance = account.balance.saturating_add(balance);
        self.remove_storage(&LEGACY_ERC20_ETH_ADDRESS, &migrated_slot);
    }

    /// Value of the legacy totalSupply slot; zero if unset.
    pub fn total_supply(&self) -> U256 {
        self.storage_value(&LEGACY_ERC20_ETH_ADDRESS, &total_supply_slot())
            .map(decode_u256)
            .unwrap_or(U256::ZERO)
    }

    /// Overwrite the legacy totalSupply slot with the zero word. The slot
    /// stays present so the post-migration state shows an explicit zero.
    pub fn zero_total_supply(&mut self) {
        self.set_storage(LEGACY_ERC20_ETH_ADDRESS, total_supply_slot(), B256::ZERO);
    }
}
