//! Witness data: the out-of-band enumeration of balance holders, allowance
//! pairs, and outbound cross-domain messages whose slots should exist in
//! legacy storage.
//!
//! Four input formats feed a [`WitnessStore`]:
//!   - the line-oriented witness file (`ETH <addr>` / `MSG <addr> <hexbytes>`),
//!   - a JSON array of holder addresses,
//!   - a JSON array of `{"fr", "to"}` allowance pairs,
//!   - a JSON array of `{"who", "msg"}` pre-EVM sent messages.
//!
//! The store itself does no I/O; the CLI reads files and feeds strings in.

use crate::constants::SEQUENCER_ENTRYPOINT_ADDRESS;
use crate::crossdomain::{LegacyWithdrawal, SentMessage};
use crate::errors::MigrationError;
use alloy_primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// An `allowances[owner][spender]` witness entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowancePair {
    /// Mapping owner (outer key).
    #[serde(rename = "fr")]
    pub owner: Address,
    /// Approved spender (inner key).
    #[serde(rename = "to")]
    pub spender: Address,
}

/// Errors produced while parsing witness input files.
#[derive(Debug, Error)]
pub enum WitnessParseError {
    /// A witness-file line starts with an unrecognized tag.
    #[error("unknown witness entry prefix {prefix:?} on line {line}")]
    UnknownPrefix {
        /// The offending tag.
        prefix: String,
        /// 1-based line number.
        line: usize,
    },

    /// A witness-file line has the wrong number of fields for its tag.
    #[error("malformed {prefix} entry on line {line}: expected {expected} fields")]
    MalformedEntry {
        /// The entry tag.
        prefix: &'static str,
        /// 1-based line number.
        line: usize,
        /// Expected field count including the tag.
        expected: usize,
    },

    /// An address or hex-bytes field failed to parse.
    #[error("invalid hex on line {line}: {reason}")]
    InvalidHex {
        /// 1-based line number.
        line: usize,
        /// Underlying parse failure.
        reason: String,
    },

    /// A JSON side-file failed to parse.
    #[error("invalid witness JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parsed witness data. Constructed once at load time, immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct WitnessStore {
    balance_holders: Vec<Address>,
    seen_holders: HashSet<Address>,
    allowances: Vec<AllowancePair>,
    /// Pre-EVM era sent messages (JSON legacy-messages file).
    ovm_messages: Vec<SentMessage>,
    /// EVM era sent messages (`MSG` witness lines).
    evm_messages: Vec<SentMessage>,
}

impl WitnessStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a balance holder. Duplicates collapse on first sight with a
    /// warning.
    pub fn add_balance_holder(&mut self, addr: Address) {
        if !self.seen_holders.insert(addr) {
            warn!(address = %addr, "duplicate balance holder in witness, ignoring");
            return;
        }
        self.balance_holders.push(addr);
    }

    pub fn add_allowance(&mut self, pair: AllowancePair) {
        self.allowances.push(pair);
    }

    /// Witnessed balance holders, first-seen order, duplicates collapsed.
    pub fn balance_holders(&self) -> &[Address] {
        &self.balance_holders
    }

    pub fn allowances(&self) -> &[AllowancePair] {
        &self.allowances
    }

    /// EVM-era sent messages as recorded in the witness file.
    pub fn evm_messages(&self) -> &[SentMessage] {
        &self.evm_messages
    }

    /// All witnessed withdrawals, pre-EVM entries first, decoded into legacy
    /// withdrawal records.
    pub fn legacy_withdrawals(&self) -> Result<Vec<LegacyWithdrawal>, MigrationError> {
        self.ovm_messages
            .iter()
            .chain(self.evm_messages.iter())
            .map(SentMessage::to_legacy_withdrawal)
            .collect()
    }

    /// Add the sentinel addresses that hold legacy ETH without appearing in
    /// any witness file. Currently just the retired sequencer entrypoint.
    pub fn include_sentinels(&mut self) {
        self.add_balance_holder(SEQUENCER_ENTRYPOINT_ADDRESS);
    }

    /// Parse the line-oriented witness file. One entry per line,
    /// whitespace-separated, tagged `ETH` (balance holder) or `MSG`
    /// (EVM-era sent message). Unknown tags are an error.
    pub fn read_witness_data(&mut self, input: &str) -> Result<(), WitnessParseError> {
        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            match fields[0] {
                "ETH" => {
                    if fields.len() != 2 {
                        return Err(WitnessParseError::MalformedEntry {
                            prefix: "ETH",
                            line: line_no,
                            expected: 2,
                        });
                    }
                    self.add_balance_holder(parse_address(fields[1], line_no)?);
                }
                "MSG" => {
                    if fields.len() != 3 {
                        return Err(WitnessParseError::MalformedEntry {
                            prefix: "MSG",
                            line: line_no,
                            expected: 3,
                        });
                    }
                    let who = parse_address(fields[1], line_no)?;
                    let msg = parse_bytes(fields[2], line_no)?;
                    self.evm_messages.push(SentMessage::new(who, msg));
                }
                other => {
                    return Err(WitnessParseError::UnknownPrefix {
                        prefix: other.to_string(),
                        line: line_no,
                    });
                }
            }
        }
        Ok(())
    }

    /// Parse the JSON addresses file: an array of 0x-prefixed addresses.
    /// Duplicates are tolerated and collapse.
    pub fn read_addresses_json(&mut self, input: &str) -> Result<(), WitnessParseError> {
        let addresses: Vec<Address> = serde_json::from_str(input)?;
        for addr in addresses {
            self.add_balance_holder(addr);
        }
        Ok(())
    }

    /// Parse the JSON allowances file: an array of `{"fr", "to"}` objects.
    pub fn read_allowances_json(&mut self, input: &str) -> Result<(), WitnessParseError> {
        let pairs: Vec<AllowancePair> = serde_json::from_str(input)?;
        self.allowances.extend(pairs);
        Ok(())
    }

    /// Parse the JSON legacy-messages file: an array of `{"who", "msg"}`
    /// objects from the pre-EVM era.
    pub fn read_messages_json(&mut self, input: &str) -> Result<(), WitnessParseError> {
        let messages: Vec<SentMessage> = serde_json::from_str(input)?;
        self.ovm_messages.extend(messages);
        Ok(())
    }
}

fn parse_address(field: &str, line: usize) -> Result<Address, WitnessParseError> {
    Address::from_str(field).map_err(|err| WitnessParseError::InvalidHex {
        line,
        reason: err.to_string(),
    })
}

fn parse_bytes(field: &str, line: usize) -> Result<Bytes, WitnessParseError> {
    Bytes::from_str(field).map_err(|err| WitnessParseError::InvalidHex {
        line,
        reason: err.to_string(),
    })
}
