//! Cross-domain withdrawal records and their migration.
//!
//! A legacy withdrawal is a `relayMessage(target, sender, message, nonce)`
//! call fingerprinted by the legacy message passer. Migration re-encodes it
//! as a bedrock withdrawal transaction relayed through the versioned
//! cross-domain messenger and installs the new fingerprint in the bedrock
//! message passer.

mod legacy;
mod withdrawal;

pub use legacy::{LegacyWithdrawal, SentMessage};
pub use withdrawal::Withdrawal;

use crate::constants::{
    L2_CROSS_DOMAIN_MESSENGER_ADDRESS, MAX_WITHDRAWAL_GAS_LIMIT, TX_DATA_NON_ZERO_GAS,
    TX_DATA_ZERO_GAS, WITHDRAWAL_GAS_OVERHEAD,
};
use crate::errors::MigrationError;
use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};

sol! {
    /// Pre-bedrock cross-domain messenger relay entrypoint. Its calldata,
    /// with the caller appended, is the pre-image of the legacy
    /// `sentMessages` fingerprint.
    contract LegacyMessenger {
        function relayMessage(
            address target,
            address sender,
            bytes message,
            uint256 messageNonce
        ) external;
    }

    /// Bedrock cross-domain messenger relay entrypoint (versioned nonces,
    /// explicit value and gas limit).
    contract BedrockMessenger {
        function relayMessage(
            uint256 nonce,
            address sender,
            address target,
            uint256 value,
            uint256 minGasLimit,
            bytes message
        ) external payable;
    }

    /// Legacy standard-bridge ETH withdrawal finalizer. When the relayed
    /// message is one of these, its `amount` is the withdrawal's value.
    contract StandardBridge {
        function finalizeETHWithdrawal(
            address from,
            address to,
            uint256 amount,
            bytes extraData
        ) external;
    }
}

/// Nonces are versioned in their upper 16 bits; the low 240 bits carry the
/// sequential nonce.
pub fn encode_versioned_nonce(nonce: U256, version: U256) -> U256 {
    (version << 240) | (nonce & nonce_mask())
}

/// Split a versioned nonce into `(nonce, version)`.
pub fn decode_versioned_nonce(versioned: U256) -> (U256, U256) {
    (versioned & nonce_mask(), versioned >> 240)
}

fn nonce_mask() -> U256 {
    U256::MAX >> 16
}

/// Translate a legacy withdrawal into its bedrock form.
///
/// The migrated withdrawal is a version-0 `relayMessage` call from the L2
/// cross-domain messenger predeploy to the given L1 cross-domain messenger,
/// wrapping the original envelope unchanged.
pub fn migrate_withdrawal(
    withdrawal: &LegacyWithdrawal,
    l1_cross_domain_messenger: Address,
) -> Result<Withdrawal, MigrationError> {
    let value = withdrawal.value()?;
    let versioned_nonce = encode_versioned_nonce(withdrawal.xdomain_nonce, U256::ZERO);

    let data = BedrockMessenger::relayMessageCall {
        nonce: versioned_nonce,
        sender: withdrawal.xdomain_sender,
        target: withdrawal.xdomain_target,
        value,
        minGasLimit: U256::ZERO,
        message: withdrawal.xdomain_data.clone(),
    }
    .abi_encode();

    let gas_limit = migrate_withdrawal_gas_limit(&data);

    Ok(Withdrawal {
        nonce: versioned_nonce,
        sender: L2_CROSS_DOMAIN_MESSENGER_ADDRESS,
        target: l1_cross_domain_messenger,
        value,
        gas_limit: U256::from(gas_limit),
        data: data.into(),
    })
}

/// Gas limit for a migrated withdrawal: calldata cost (16 gas per non-zero
/// byte, 4 per zero byte) plus a flat 200k overhead, capped at 25M.
pub fn migrate_withdrawal_gas_limit(data: &[u8]) -> u64 {
    let calldata_cost: u64 = data
        .iter()
        .map(|byte| {
            if *byte == 0 {
                TX_DATA_ZERO_GAS
            } else {
                TX_DATA_NON_ZERO_GAS
            }
        })
        .sum();
    (WITHDRAWAL_GAS_OVERHEAD + calldata_cost).min(MAX_WITHDRAWAL_GAS_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes};

    fn sample_withdrawal() -> LegacyWithdrawal {
        LegacyWithdrawal::new(
            L2_CROSS_DOMAIN_MESSENGER_ADDRESS,
            address!("00000000000000000000000000000000000000aa"),
            address!("00000000000000000000000000000000000000bb"),
            Bytes::from(vec![0x01, 0x02, 0x03]),
            U256::from(0x11u64),
        )
    }

    #[test]
    fn test_versioned_nonce_round_trip() {
        let nonce = U256::from(0x1234u64);
        let version = U256::from(1u64);
        let versioned = encode_versioned_nonce(nonce, version);
        assert_eq!(decode_versioned_nonce(versioned), (nonce, version));
    }

    #[test]
    fn test_version_zero_nonce_is_unchanged() {
        let nonce = U256::from(42u64);
        assert_eq!(encode_versioned_nonce(nonce, U256::ZERO), nonce);
    }

    #[test]
    fn test_oversized_nonce_is_masked() {
        let versioned = encode_versioned_nonce(U256::MAX, U256::ZERO);
        let (nonce, version) = decode_versioned_nonce(versioned);
        assert_eq!(version, U256::ZERO);
        assert_eq!(nonce, U256::MAX >> 16);
    }

    #[test]
    fn test_gas_limit_counts_zero_and_nonzero_bytes() {
        // 3 non-zero + 2 zero bytes: 200_000 + 3*16 + 2*4 = 200_056
        let data = [0x01, 0x02, 0x03, 0x00, 0x00];
        assert_eq!(migrate_withdrawal_gas_limit(&data), 200_056);
    }

    #[test]
    fn test_gas_limit_empty_data_is_overhead_only() {
        assert_eq!(migrate_withdrawal_gas_limit(&[]), WITHDRAWAL_GAS_OVERHEAD);
    }

    #[test]
    fn test_gas_limit_is_capped() {
        let data = vec![0xffu8; 2_000_000];
        assert_eq!(migrate_withdrawal_gas_limit(&data), MAX_WITHDRAWAL_GAS_LIMIT);
    }

    #[test]
    fn test_migrated_withdrawal_routing() {
        let l1_xdm = address!("00000000000000000000000000000000000000cc");
        let migrated = migrate_withdrawal(&sample_withdrawal(), l1_xdm).unwrap();

        assert_eq!(migrated.sender, L2_CROSS_DOMAIN_MESSENGER_ADDRESS);
        assert_eq!(migrated.target, l1_xdm);
        assert_eq!(migrated.nonce, U256::from(0x11u64));
        assert_eq!(migrated.value, U256::ZERO);
        assert_eq!(
            migrated.gas_limit,
            U256::from(migrate_withdrawal_gas_limit(&migrated.data)),
        );
    }

    #[test]
    fn test_migrated_data_is_bedrock_relay_call() {
        let l1_xdm = address!("00000000000000000000000000000000000000cc");
        let migrated = migrate_withdrawal(&sample_withdrawal(), l1_xdm).unwrap();

        let call = BedrockMessenger::relayMessageCall::abi_decode(&migrated.data).unwrap();
        assert_eq!(call.nonce, U256::from(0x11u64));
        assert_eq!(call.sender, address!("00000000000000000000000000000000000000bb"));
        assert_eq!(call.target, address!("00000000000000000000000000000000000000aa"));
        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.minGasLimit, U256::ZERO);
        assert_eq!(call.message, Bytes::from(vec![0x01, 0x02, 0x03]));
    }

    #[test]
    fn test_migrated_value_from_eth_finalizer() {
        let inner = StandardBridge::finalizeETHWithdrawalCall {
            from: address!("0000000000000000000000000000000000000001"),
            to: address!("0000000000000000000000000000000000000002"),
            amount: U256::from(1_000u64),
            extraData: Bytes::new(),
        }
        .abi_encode();

        let wd = LegacyWithdrawal::new(
            L2_CROSS_DOMAIN_MESSENGER_ADDRESS,
            address!("00000000000000000000000000000000000000aa"),
            address!("00000000000000000000000000000000000000bb"),
            inner.into(),
            U256::from(1u64),
        );

        let migrated = migrate_withdrawal(&wd, Address::ZERO).unwrap();
        assert_eq!(migrated.value, U256::from(1_000u64));
    }
}
