//! # Bedrock Surgery - Legacy State Migration Engine
//!
//! Rewrites a pre-bedrock L2 genesis allocation in place: legacy ERC-20 ETH
//! balances become native balances, and legacy withdrawal fingerprints are
//! re-installed in the bedrock L2-to-L1 message passer. Every mutation is
//! proven against out-of-band witness data before it is committed.

pub mod alloc;
pub mod balances;
pub mod cli;
pub mod constants;
pub mod crossdomain;
pub mod engine;
pub mod errors;
pub mod params;
pub mod precheck;
pub mod slots;
pub mod withdrawals;
pub mod witness;
