//! Error types for the Inflation Staking program.
//!
//! Every condition is detected before any token leaves a vault, and any error
//! aborts the whole transaction.
//!
//! ## Error Code Groups
//! - 6000-6005: Pool lifecycle errors
//! - 6006-6012: Settlement and balance errors
//! - 6013-6023: Airdrop and bond errors
//! - 6024: Math errors
//! - 6025-6030: Authorization and account validation errors
//! - 6031-6034: Protocol fee and program freeze errors

use anchor_lang::prelude::*;

/// Custom error codes for the Inflation Staking program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Pool Lifecycle Errors ==========

    /// [6000] The pool is not initialized, not activated yet, or closed.
    #[msg("Stake pool is not ready")]
    PoolNotReady,

    /// [6001] The pool was already activated.
    #[msg("Stake pool is already activated")]
    AlreadyActivated,

    /// [6002] The pool record is already initialized.
    #[msg("Stake pool already exists")]
    PoolExists,

    /// [6003] The stakers part must be within 0..=100.
    #[msg("Stakers part must be between 0 and 100")]
    StakersPartOutOfBounds,

    /// [6004] The pool is frozen and does not accept new inflows.
    #[msg("Stake pool is frozen")]
    PoolFrozen,

    /// [6005] The pool still holds staked, bonded or airdropped tokens.
    #[msg("Stake pool must be empty")]
    StakePoolNotEmpty,

    // ========== Settlement/Balance Errors ==========

    /// [6006] Rewards accrued since the last settlement must be claimed first.
    #[msg("Rewards must be claimed first")]
    UnclaimedRewards,

    /// [6007] Nothing accrued since the last settlement.
    #[msg("No rewards to claim")]
    NoClaimableRewards,

    /// [6008] Zero amount, or a balance that would fall below the retained minimum.
    #[msg("Invalid amount")]
    InvalidAmount,

    /// [6009] The requested amount exceeds the available balance.
    #[msg("Insufficient balance")]
    InsufficientBalance,

    /// [6010] The unstake queue is full.
    #[msg("Too many pending unstake requests")]
    TooManyUnstakeRequests,

    /// [6011] No pending unstake request has matured.
    #[msg("Unstake period not over")]
    CannotUnstake,

    /// [6012] The stake account still holds tokens or pending requests.
    #[msg("Stake account must be empty")]
    StakeAccountNotEmpty,

    // ========== Airdrop/Bond Errors ==========

    /// [6013] No ladder entry has reached its unlock timestamp.
    #[msg("No airdrop entry has matured")]
    AirdropNotReady,

    /// [6014] An unlock timestamp is not in the future.
    #[msg("Invalid timestamp")]
    InvalidTimestamp,

    /// [6015] The signer is not one of the authorized bond sellers.
    #[msg("Unauthorized seller")]
    UnauthorizedSeller,

    /// [6016] The seller already signed this bond.
    #[msg("Bond seller has already signed")]
    SellerAlreadySigned,

    /// [6017] The bond already carries enough signatures.
    #[msg("Bond is already fully signed")]
    BondFullySigned,

    /// [6018] The bond does not carry enough seller signatures.
    #[msg("The bond does not have enough sellers")]
    NotEnoughSellers,

    /// [6019] The bond is not active yet.
    #[msg("Bond is not active")]
    BondNotActive,

    /// [6020] The bond was already claimed.
    #[msg("Bond is already active")]
    BondAlreadyActive,

    /// [6021] Zero unlock period or zero amounts.
    #[msg("Invalid vesting schedule")]
    InvalidVestingSchedule,

    /// [6022] No vesting period has elapsed since the last unlock.
    #[msg("Bond tokens are still locked")]
    TokensLocked,

    /// [6023] All bond tokens have been unlocked.
    #[msg("All bond tokens have been unlocked")]
    BondFullyUnlocked,

    // ========== Math Errors ==========

    /// [6024] Arithmetic overflow in a reward accumulator or counter.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Authorization/Account Errors ==========

    /// [6025] The signer does not own the record.
    #[msg("Unauthorized")]
    Unauthorized,

    /// [6026] The token account or mint is not the protocol token.
    #[msg("Token mint mismatch")]
    MintMismatch,

    /// [6027] The vault does not belong to the pool.
    #[msg("Stake pool vault mismatch")]
    VaultMismatch,

    /// [6028] The record does not belong to the given pool.
    #[msg("Stake pool mismatch")]
    PoolMismatch,

    /// [6029] The token mint authority is not the central state.
    #[msg("Mint authority must be the central state")]
    InvalidMintAuthority,

    /// [6030] Too many bond sellers, or a threshold outside 1..=sellers.
    #[msg("Invalid bond seller configuration")]
    TooManySellers,

    // ========== Fee/Freeze Errors ==========

    /// [6031] The instruction is disabled by the program gate.
    #[msg("Instruction is frozen")]
    InstructionFrozen,

    /// [6032] Empty or oversized recipient list, or shares outside 1..=100.
    #[msg("Invalid fee split")]
    InvalidFeeSplit,

    /// [6033] The fee split can only change shortly after a distribution.
    #[msg("Fees must be distributed before changing the split")]
    FeesNotDistributed,

    /// [6034] A recipient token account is missing or belongs to someone else.
    #[msg("Fee recipient account mismatch")]
    FeeRecipientMismatch,
}
