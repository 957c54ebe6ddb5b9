//! Program-wide constants.

/// Fees are expressed in basis points; 10_000 bps = 100%.
pub const BPS_DENOMINATOR: u16 = 10_000;

// PDA seed prefixes.
pub const POOL_SEED: &[u8] = b"pool";
pub const POSITION_SEED: &[u8] = b"position";
