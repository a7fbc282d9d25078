//! Storage-slot derivation for the legacy ERC-20 ETH contract.
//!
//! Layout (see `contracts/LegacyERC20ETH`):
//!   slot 0: `mapping(address => uint256) balances`
//!   slot 1: `mapping(address => mapping(address => uint256)) allowances`
//!   slot 2: `uint256 totalSupply`
//!   slots 3..=6: name, symbol, decimals, bridge — plain scalars
//!
//! Mapping entries live at `keccak256(leftPad32(key) ‖ leftPad32(slot))`.

use alloy_primitives::{Address, Keccak256, B256, U256};

/// Slot index of the balances mapping.
const BALANCES_SLOT: u64 = 0;
/// Slot index of the allowances mapping.
const ALLOWANCES_SLOT: u64 = 1;
/// Slot index of the totalSupply scalar.
const TOTAL_SUPPLY_SLOT: u64 = 2;

/// Scalar slots of the legacy ERC-20 contract that hold non-balance values
/// and are left alone by the migration: totalSupply, name, symbol, decimals,
/// and the bridge address.
pub const IGNORED_SLOTS: [B256; 5] = [
    u64_slot(2),
    u64_slot(3),
    u64_slot(4),
    u64_slot(5),
    u64_slot(6),
];

const fn u64_slot(n: u64) -> B256 {
    let mut out = [0u8; 32];
    let be = n.to_be_bytes();
    let mut i = 0;
    while i < 8 {
        out[24 + i] = be[i];
        i += 1;
    }
    B256::new(out)
}

/// Whether `slot` is one of the fixed scalar slots the migration skips.
pub fn is_ignored_slot(slot: &B256) -> bool {
    IGNORED_SLOTS.contains(slot)
}

/// Storage slot holding `balances[addr]`:
/// `keccak256(leftPad32(addr) ‖ leftPad32(0))`.
pub fn balance_slot(addr: Address) -> B256 {
    mapping_slot(encode_address(addr), u64_slot(BALANCES_SLOT))
}

/// Storage slot holding `allowances[owner][spender]`. Nested mapping: the
/// inner slot is derived from the owner, the outer from the spender.
pub fn allowance_slot(owner: Address, spender: Address) -> B256 {
    let inner = mapping_slot(encode_address(owner), u64_slot(ALLOWANCES_SLOT));
    mapping_slot(encode_address(spender), inner)
}

/// Storage slot of the legacy totalSupply scalar: `leftPad32(2)`.
pub fn total_supply_slot() -> B256 {
    u64_slot(TOTAL_SUPPLY_SLOT)
}

fn mapping_slot(key: B256, slot: B256) -> B256 {
    let mut hasher = Keccak256::new();
    hasher.update(key.as_slice());
    hasher.update(slot.as_slice());
    hasher.finalize()
}

/// Encode an address into a storage word (left-padded).
pub fn encode_address(addr: Address) -> B256 {
    let mut bytes = [0u8; 32];
    bytes[12..32].copy_from_slice(addr.as_slice());
    B256::from(bytes)
}

/// Decode an address from a storage word (left-padded with zeros).
pub fn decode_address(value: B256) -> Address {
    Address::from_slice(&value[12..32])
}

/// Interpret a storage word as a big-endian unsigned integer.
pub fn decode_u256(value: B256) -> U256 {
    U256::from_be_bytes(value.0)
}

/// Encode an unsigned integer into a storage word.
pub fn encode_u256(value: U256) -> B256 {
    B256::from(value.to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, b256};

    fn addr(n: u8) -> Address {
        Address::from([n; 20])
    }

    #[test]
    fn test_balance_slot_matches_preimage() {
        // balanceSlot(A) == keccak256(leftPad32(A) ++ leftPad32(0))
        let a = Address::with_last_byte(1);
        let mut hasher = Keccak256::new();
        let mut preimage = [0u8; 64];
        preimage[12..32].copy_from_slice(a.as_slice());
        hasher.update(preimage);
        assert_eq!(balance_slot(a), hasher.finalize());
    }

    #[test]
    fn test_allowance_slot_matches_preimage() {
        let owner = addr(1);
        let spender = addr(2);

        let mut inner = Keccak256::new();
        inner.update(encode_address(owner).as_slice());
        inner.update(u64_slot(1).as_slice());
        let inner = inner.finalize();

        let mut outer = Keccak256::new();
        outer.update(encode_address(spender).as_slice());
        outer.update(inner.as_slice());

        assert_eq!(allowance_slot(owner, spender), outer.finalize());
    }

    #[test]
    fn test_total_supply_slot_is_two() {
        assert_eq!(
            total_supply_slot(),
            b256!("0000000000000000000000000000000000000000000000000000000000000002")
        );
    }

    #[test]
    fn test_ignored_slots_cover_scalars() {
        assert_eq!(IGNORED_SLOTS.len(), 5);
        assert!(is_ignored_slot(&total_supply_slot()));
        assert!(is_ignored_slot(&u64_slot(6)));
        assert!(!is_ignored_slot(&u64_slot(0)));
        assert!(!is_ignored_slot(&balance_slot(addr(1))));
    }

    #[test]
    fn test_distinct_addresses_get_distinct_slots() {
        assert_ne!(balance_slot(addr(1)), balance_slot(addr(2)));
        assert_ne!(allowance_slot(addr(1), addr(2)), allowance_slot(addr(2), addr(1)));
        assert_ne!(balance_slot(addr(1)), allowance_slot(addr(1), addr(1)));
    }

    #[test]
    fn test_encode_decode_address_round_trip() {
        let a = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        assert_eq!(decode_address(encode_address(a)), a);
    }

    #[test]
    fn test_decode_u256() {
        let word = b256!("00000000000000000000000000000000000000000000000000000000000000ff");
        assert_eq!(decode_u256(word), U256::from(255u64));
        assert_eq!(encode_u256(U256::from(255u64)), word);
    }
}
