//! Program constants for the Inflation Staking program.
//!
//! This module defines the PDA seeds, the day length used to index reward
//! history, the fixed-point format and the bounds on every variable-length
//! record field.

/// Seed for deriving the central state PDA (also the mint authority)
pub const CENTRAL_STATE_SEED: &[u8] = b"central_state";

/// Seed for deriving stake pool PDAs
pub const STAKE_POOL_SEED: &[u8] = b"stake_pool";

/// Seed for deriving the pool vault PDA
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault";

/// Seed for deriving stake account PDAs
pub const STAKE_ACCOUNT_SEED: &[u8] = b"stake_account";

/// Seed for deriving bond account PDAs
pub const BOND_ACCOUNT_SEED: &[u8] = b"bond_account";

/// Seed for deriving airdrop account PDAs
pub const AIRDROP_SEED: &[u8] = b"airdrop";

/// Seed for deriving the protocol fee vault PDA
pub const FEE_VAULT_SEED: &[u8] = b"fee_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of days of reward history kept by the central state and by each
/// pool (~9 months).
///
/// A position that stays unsettled for longer than this only receives the
/// rewards of the most recent `HISTORY_LEN` days.
pub const HISTORY_LEN: usize = 274;

/// Maximum number of pending unstake requests per stake account
pub const MAX_UNSTAKE_REQUESTS: usize = 10;

/// Maximum number of pending entries in an airdrop ladder
pub const MAX_AIRDROP_UNLOCKS: usize = 10;

/// Maximum number of authorized bond sellers
pub const MAX_BOND_SELLERS: usize = 5;

/// Maximum number of recipients of the protocol fee split
pub const MAX_FEE_RECIPIENTS: usize = 10;

/// Seconds after a fee distribution during which the split may be replaced
pub const MAX_FEE_SPLIT_SETUP_DELAY: i64 = 5 * 60;

/// Stake fee set at creation, in basis points of the staked amount (2%)
pub const DEFAULT_FEE_BASIS_POINTS: u16 = 200;

/// Basis points denominator (100% = 10_000)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Share of an unrewarded airdrop counted in the rewardable totals, in percent.
///
/// A fixed protocol-wide discount: pools do not scale it by their
/// `stakers_part`, so the owner of a pool earns on 60% of every unrewarded
/// airdrop whatever split the pool uses. Tunable, and only read through
/// [`crate::math::unrewarded_weight`].
pub const UNREWARDED_AIRDROP_WEIGHT_PERCENT: u64 = 60;

/// Percentage denominator (100% = 100)
pub const PERCENT_DENOMINATOR: u64 = 100;

/// Number of fractional bits of every reward accumulator
pub const FP_SHIFT: u32 = 64;
