use super::{LegacyMessenger, StandardBridge};
use crate::errors::MigrationError;
use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};

/// A withdrawal recorded by the legacy message passer: a V0 cross-domain
/// envelope plus the account that passed it to L1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyWithdrawal {
    /// Account that called the legacy message passer. For real withdrawals
    /// this is the L2 cross-domain messenger predeploy.
    pub message_sender: Address,
    /// L1 target of the relayed call.
    pub xdomain_target: Address,
    /// L2 sender recorded in the envelope.
    pub xdomain_sender: Address,
    /// Inner message carried by the envelope.
    pub xdomain_data: Bytes,
    /// Cross-domain message nonce.
    pub xdomain_nonce: U256,
}

impl LegacyWithdrawal {
    pub fn new(
        message_sender: Address,
        xdomain_target: Address,
        xdomain_sender: Address,
        xdomain_data: Bytes,
        xdomain_nonce: U256,
    ) -> Self {
        Self {
            message_sender,
            xdomain_target,
            xdomain_sender,
            xdomain_data,
            xdomain_nonce,
        }
    }

    /// Fingerprint pre-image: the V0 `relayMessage` calldata with the raw
    /// caller address appended, exactly as the legacy message passer hashed
    /// it.
    pub fn encode(&self) -> Vec<u8> {
        let call = LegacyMessenger::relayMessageCall {
            target: self.xdomain_target,
            sender: self.xdomain_sender,
            message: self.xdomain_data.clone(),
            messageNonce: self.xdomain_nonce,
        };
        let mut out = call.abi_encode();
        out.extend_from_slice(self.message_sender.as_slice());
        out
    }

    pub fn hash(&self) -> B256 {
        keccak256(self.encode())
    }

    /// Storage slot of this withdrawal's flag in the legacy message passer.
    /// The `sentMessages` mapping sits at slot 0, so the slot is
    /// `keccak256(hash ‖ leftPad32(0))`.
    pub fn storage_slot(&self) -> B256 {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(self.hash().as_slice());
        keccak256(preimage)
    }

    /// ETH value the migrated withdrawal must carry. The legacy envelope has
    /// no value field; the convention is that a relayed
    /// `finalizeETHWithdrawal(from, to, amount, extraData)` call moves
    /// `amount` wei and every other message moves none.
    pub fn value(&self) -> Result<U256, MigrationError> {
        if self.xdomain_data.len() < 4
            || self.xdomain_data[..4] != StandardBridge::finalizeETHWithdrawalCall::SELECTOR
        {
            return Ok(U256::ZERO);
        }
        let call = StandardBridge::finalizeETHWithdrawalCall::abi_decode(&self.xdomain_data)
            .map_err(|err| MigrationError::MalformedXDomainData {
                reason: format!("finalizeETHWithdrawal: {err}"),
            })?;
        Ok(call.amount)
    }
}

/// One `sentMessages` witness entry: the raw relayed calldata and whoever
/// passed it to the legacy message passer. This is the shape of both the
/// JSON legacy-messages file and the `MSG` lines of the witness file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    /// Caller of the legacy message passer.
    pub who: Address,
    /// V0 `relayMessage` calldata.
    pub msg: Bytes,
}

impl SentMessage {
    pub fn new(who: Address, msg: Bytes) -> Self {
        Self { who, msg }
    }

    /// Decode the calldata into a [`LegacyWithdrawal`].
    pub fn to_legacy_withdrawal(&self) -> Result<LegacyWithdrawal, MigrationError> {
        let call = LegacyMessenger::relayMessageCall::abi_decode(&self.msg).map_err(|err| {
            MigrationError::MalformedXDomainData {
                reason: format!("relayMessage: {err}"),
            }
        })?;
        Ok(LegacyWithdrawal::new(
            self.who,
            call.target,
            call.sender,
            call.message,
            call.messageNonce,
        ))
    }
}
