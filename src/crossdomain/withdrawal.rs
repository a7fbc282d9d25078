use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolValue;

/// A bedrock withdrawal transaction as fingerprinted by the L2-to-L1 message
/// passer. Immutable once built by [`migrate_withdrawal`](super::migrate_withdrawal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    /// Versioned message nonce.
    pub nonce: U256,
    /// L2 sender (the cross-domain messenger predeploy for migrated entries).
    pub sender: Address,
    /// L1 target (the L1 cross-domain messenger for migrated entries).
    pub target: Address,
    /// ETH value moved by the withdrawal.
    pub value: U256,
    /// Gas limit for the L1 execution.
    pub gas_limit: U256,
    /// Relay calldata.
    pub data: Bytes,
}

impl Withdrawal {
    /// ABI encoding of `(nonce, sender, target, value, gasLimit, data)`,
    /// the hash pre-image used by both the message passer and the portal.
    pub fn encode(&self) -> Vec<u8> {
        (
            self.nonce,
            self.sender,
            self.target,
            self.value,
            self.gas_limit,
            self.data.clone(),
        )
            .abi_encode_params()
    }

    pub fn hash(&self) -> B256 {
        keccak256(self.encode())
    }

    /// Storage slot of this withdrawal's flag in the new message passer.
    /// `sentMessages` sits at slot 0: `keccak256(hash ‖ leftPad32(0))`.
    pub fn storage_slot(&self) -> B256 {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(self.hash().as_slice());
        keccak256(preimage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn sample() -> Withdrawal {
        Withdrawal {
            nonce: U256::from(1u64),
            sender: address!("4200000000000000000000000000000000000007"),
            target: address!("00000000000000000000000000000000000000cc"),
            value: U256::ZERO,
            gas_limit: U256::from(200_000u64),
            data: Bytes::from(vec![0x01, 0x02, 0x03]),
        }
    }

    #[test]
    fn test_encode_layout() {
        let encoded = sample().encode();
        // 6 head words plus a 2-word bytes tail.
        assert_eq!(encoded.len(), 6 * 32 + 64);
        // The data offset points past the head.
        assert_eq!(encoded[5 * 32 + 31], 0xc0);
    }

    #[test]
    fn test_hash_changes_with_any_field() {
        let base = sample();
        let mut changed = sample();
        changed.value = U256::from(1u64);
        assert_ne!(base.hash(), changed.hash());

        let mut changed = sample();
        changed.nonce = U256::from(2u64);
        assert_ne!(base.hash(), changed.hash());
    }

    #[test]
    fn test_storage_slot_is_hash_at_mapping_zero() {
        let wd = sample();
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(wd.hash().as_slice());
        assert_eq!(wd.storage_slot(), keccak256(preimage));
    }
}
