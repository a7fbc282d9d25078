//! Per-chain migration parameters.

use alloy_primitives::{address, Address, U256};

/// OP mainnet.
pub const OP_MAINNET_CHAIN_ID: u64 = 10;
/// OP goerli testnet.
pub const OP_GOERLI_CHAIN_ID: u64 = 420;
/// Local devnet.
pub const DEVNET_CHAIN_ID: u64 = 901;

/// Chain-specific knobs for the migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainParams {
    /// The L2 chain id these parameters apply to.
    pub chain_id: u64,
    /// Amount by which the legacy totalSupply is allowed to exceed the sum
    /// of migrated balances. Zero for every known chain; a non-zero value
    /// only enters through the CLI override.
    pub expected_supply_delta: U256,
    /// The chain's L1 cross-domain messenger, if it has a canonical one.
    /// Migrated withdrawals target this address unless overridden.
    pub l1_cross_domain_messenger: Option<Address>,
}

const CHAIN_PARAMS: &[ChainParams] = &[
    ChainParams {
        chain_id: OP_MAINNET_CHAIN_ID,
        expected_supply_delta: U256::ZERO,
        l1_cross_domain_messenger: Some(address!("25ace71c97B33Cc4729CF772ae268934F7ab5fA1")),
    },
    ChainParams {
        chain_id: OP_GOERLI_CHAIN_ID,
        expected_supply_delta: U256::ZERO,
        l1_cross_domain_messenger: Some(address!("5086d1eEF304eb5284A0f6720f79403b4e9bE294")),
    },
    ChainParams {
        chain_id: DEVNET_CHAIN_ID,
        expected_supply_delta: U256::ZERO,
        // Devnets deploy a fresh messenger; the address must be passed in.
        l1_cross_domain_messenger: None,
    },
];

/// Look up the parameters for a chain id.
pub fn params_for_chain(chain_id: u64) -> Option<&'static ChainParams> {
    CHAIN_PARAMS.iter().find(|p| p.chain_id == chain_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chains_resolve() {
        for id in [OP_MAINNET_CHAIN_ID, OP_GOERLI_CHAIN_ID, DEVNET_CHAIN_ID] {
            let params = params_for_chain(id).unwrap();
            assert_eq!(params.chain_id, id);
            assert_eq!(params.expected_supply_delta, U256::ZERO);
        }
    }

    #[test]
    fn test_mainnet_has_canonical_messenger() {
        let params = params_for_chain(OP_MAINNET_CHAIN_ID).unwrap();
        assert!(params.l1_cross_domain_messenger.is_some());
    }

    #[test]
    fn test_devnet_requires_explicit_messenger() {
        let params = params_for_chain(DEVNET_CHAIN_ID).unwrap();
        assert!(params.l1_cross_domain_messenger.is_none());
    }

    #[test]
    fn test_unknown_chain_is_none() {
        assert!(params_for_chain(1).is_none());
    }
}
