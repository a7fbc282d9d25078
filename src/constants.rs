use alloy_primitives::{address, b256, Address, B256};

/// Address of the legacy ERC-20 ETH predeploy. Native ETH balances were held
/// as token balances in this contract before the migration.
pub const LEGACY_ERC20_ETH_ADDRESS: Address =
    address!("DeadDeAddeAddEAddeadDEaDDEAdDeaDDeAD0000");
/// Address of the legacy message passer predeploy (pre-bedrock withdrawals).
pub const LEGACY_MESSAGE_PASSER_ADDRESS: Address =
    address!("4200000000000000000000000000000000000000");
/// Address of the retired sequencer entrypoint. It can hold a legacy ETH
/// balance that no witness file accounts for.
pub const SEQUENCER_ENTRYPOINT_ADDRESS: Address =
    address!("4200000000000000000000000000000000000005");
/// Address of the L2 cross-domain messenger predeploy. Only withdrawals sent
/// through it are migrated.
pub const L2_CROSS_DOMAIN_MESSENGER_ADDRESS: Address =
    address!("4200000000000000000000000000000000000007");
/// Address of the bedrock L2-to-L1 message passer predeploy. Migrated
/// withdrawal flags are installed in its storage.
pub const L2_TO_L1_MESSAGE_PASSER_ADDRESS: Address =
    address!("4200000000000000000000000000000000000016");

/// ABI encoding of boolean `true`, the "sent" marker in message-passer storage.
pub const ABI_TRUE: B256 =
    b256!("0000000000000000000000000000000000000000000000000000000000000001");

/// Flat gas overhead added to every migrated withdrawal.
pub const WITHDRAWAL_GAS_OVERHEAD: u64 = 200_000;
/// Upper bound on a migrated withdrawal's gas limit.
pub const MAX_WITHDRAWAL_GAS_LIMIT: u64 = 25_000_000;
/// Calldata gas per non-zero byte (EIP-2028).
pub const TX_DATA_NON_ZERO_GAS: u64 = 16;
/// Calldata gas per zero byte.
pub const TX_DATA_ZERO_GAS: u64 = 4;
