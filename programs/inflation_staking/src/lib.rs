//! # Inflation Staking Program
//!
//! A staking program distributing a daily token inflation across staking
//! pools. Each day's inflation is shared between pools in proportion to their
//! rewardable weight, then split inside each pool between its owner and its
//! stakers.
//!
//! - **Pools** keep cumulative per-token rewards and a 274-day history ring,
//!   so claims are O(1) however late they happen
//! - **Stake accounts** stake, unstake (optionally through a delay queue) and
//!   claim rewards
//! - **Bonds** sell tokens that stay staked until a vesting schedule releases
//!   them
//! - **Airdrops** grant laddered unlocks that either earn rewards or only add
//!   weight to their pool
//!
//! ## Features
//! - Lazy accrual: any instruction touching a pool cranks it to the current day
//! - A protocol-wide reward per weight keeps lazily cranked pools in step
//! - Inflation changes take effect at the next day boundary
//! - Stake fees collected in a vault and split between fee recipients
//! - An instruction gate to freeze the program
//! - Deterministic fixed-point math with overflow protection

use anchor_lang::prelude::*;

declare_id!("7wtzUmacBhmNNMW5iuTeRk38WjLzPHi6byug84kA8CYG");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

use instructions::*;
use state::{AirdropUnlock, BondTerms, FeeRecipient};

#[program]
pub mod inflation_staking {
    use super::*;

    /// Creates the central state.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for creation
    /// * `daily_inflation` - Tokens minted protocol-wide per day
    ///
    /// # Errors
    /// Returns an error if the mint authority is not the central state.
    pub fn create_central_state(ctx: Context<CreateCentralState>, daily_inflation: u64) -> Result<()> {
        instructions::create_central_state::handler(ctx, daily_inflation)
    }

    /// Admin function to schedule a new daily inflation from the next day.
    pub fn set_daily_inflation(ctx: Context<AdminControl>, daily_inflation: u64) -> Result<()> {
        instructions::admin::set_daily_inflation_handler(ctx, daily_inflation)
    }

    /// Admin function to transfer authority to a new address.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current admin
    /// - New authority is zero address
    pub fn set_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::set_authority_handler(ctx, new_authority)
    }

    /// Admin function to set the key allowed to freeze the program.
    pub fn set_freeze_authority(ctx: Context<AdminControl>, freeze_authority: Pubkey) -> Result<()> {
        instructions::admin::set_freeze_authority_handler(ctx, freeze_authority)
    }

    /// Opens or closes the instruction gate.
    ///
    /// # Arguments
    /// * `ctx` - The context containing the signer and the central state
    /// * `ix_gate` - Bit `i` set allows the instruction of kind `i`
    ///
    /// # Errors
    /// Returns an error if the signer is not the authority, or is the freeze
    /// authority and `ix_gate` is not zero.
    pub fn program_freeze(ctx: Context<ProgramFreeze>, ix_gate: u128) -> Result<()> {
        instructions::program_freeze::handler(ctx, ix_gate)
    }

    /// Admin function to set the stake fee, in basis points.
    pub fn set_protocol_fee(ctx: Context<AdminControl>, fee_basis_points: u16) -> Result<()> {
        instructions::admin::set_protocol_fee_handler(ctx, fee_basis_points)
    }

    /// Admin function to replace the fee split.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The recipients are empty, too many, or hold a zero share
    /// - The shares add up to more than 100
    /// - Fees were not distributed in the last five minutes
    pub fn setup_fee_split(ctx: Context<AdminControl>, recipients: Vec<FeeRecipient>) -> Result<()> {
        instructions::admin::setup_fee_split_handler(ctx, recipients)
    }

    /// Pays the fee vault out to the fee split recipients.
    pub fn distribute_fees<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeFees<'info>>,
    ) -> Result<()> {
        instructions::distribute_fees::handler(ctx)
    }

    /// Admin function to replace the authorized bond sellers.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `sellers` - Authorized sellers
    /// * `threshold` - Signatures required before a bond can be claimed
    pub fn set_bond_sellers(
        ctx: Context<AdminControl>,
        sellers: Vec<Pubkey>,
        threshold: u8,
    ) -> Result<()> {
        instructions::admin::set_bond_sellers_handler(ctx, sellers, threshold)
    }

    /// Admin function to mint tokens outside of the inflation schedule.
    pub fn admin_mint(ctx: Context<AdminMint>, amount: u64) -> Result<()> {
        instructions::admin_mint::handler(ctx, amount)
    }

    /// Creates an inactive stake pool owned by the signer.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for creation
    /// * `minimum_stake_amount` - Smallest balance a stake account may hold
    /// * `stakers_part` - Percentage of the pool's rewards paid to stakers
    /// * `unstake_period` - Seconds between an unstake and its payout
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool already exists
    /// - The stakers part is above 100
    pub fn create_pool(
        ctx: Context<CreatePool>,
        minimum_stake_amount: u64,
        stakers_part: u64,
        unstake_period: i64,
    ) -> Result<()> {
        instructions::create_pool::handler(ctx, minimum_stake_amount, stakers_part, unstake_period)
    }

    /// Admin function to activate a pool.
    pub fn activate_pool(ctx: Context<PoolAdmin>) -> Result<()> {
        instructions::pool_admin::activate_pool_handler(ctx)
    }

    /// Admin function to freeze or unfreeze a pool.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `frozen` - True to freeze, false to unfreeze
    pub fn freeze_pool(ctx: Context<PoolAdmin>, frozen: bool) -> Result<()> {
        instructions::pool_admin::freeze_pool_handler(ctx, frozen)
    }

    /// Pool owner function to set the minimum stake amount.
    pub fn set_minimum_stake_amount(ctx: Context<PoolOwnerControl>, amount: u64) -> Result<()> {
        instructions::pool_settings::set_minimum_stake_amount_handler(ctx, amount)
    }

    /// Pool owner function to set the stakers' share of the pool's rewards.
    ///
    /// # Errors
    /// Returns an error if the stakers part is above 100.
    pub fn set_stakers_part(ctx: Context<PoolOwnerControl>, stakers_part: u64) -> Result<()> {
        instructions::pool_settings::set_stakers_part_handler(ctx, stakers_part)
    }

    /// Pool owner function to close an empty pool.
    pub fn close_pool(ctx: Context<PoolOwnerControl>) -> Result<()> {
        instructions::pool_settings::close_pool_handler(ctx)
    }

    /// Pays the pool owner's rewards.
    pub fn claim_pool_rewards(ctx: Context<ClaimPoolRewards>, allow_zero_rewards: bool) -> Result<()> {
        instructions::claim_pool_rewards::handler(ctx, allow_zero_rewards)
    }

    /// Opens a stake account in a pool.
    pub fn create_stake_account(ctx: Context<CreateStakeAccount>) -> Result<()> {
        instructions::create_stake_account::handler(ctx)
    }

    /// Stakes tokens in a pool.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Amount of tokens to stake
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool is not active or frozen
    /// - Amount is zero or below the minimum
    /// - Rewards were left unclaimed
    pub fn stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, amount)
    }

    /// Unstakes tokens, paid at once or after the pool's unstake period.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for unstaking
    /// * `amount` - Amount of tokens to unstake
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero or exceeds the staked balance
    /// - The remaining balance is below the retained minimum
    /// - Rewards were left unclaimed
    pub fn unstake(ctx: Context<Unstake>, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, amount)
    }

    /// Pays out every matured unstake request.
    pub fn execute_unstake(ctx: Context<ExecuteUnstake>) -> Result<()> {
        instructions::execute_unstake::handler(ctx)
    }

    /// Claims the rewards of a stake account.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for claiming
    /// * `allow_zero_rewards` - Succeed even when nothing accrued
    pub fn claim_rewards(ctx: Context<ClaimRewards>, allow_zero_rewards: bool) -> Result<()> {
        instructions::claim_rewards::handler(ctx, allow_zero_rewards)
    }

    /// Closes an empty stake account.
    pub fn close_stake_account(ctx: Context<CloseStakeAccount>) -> Result<()> {
        instructions::close_stake_account::handler(ctx)
    }

    /// Authorized seller function to offer a bond to a buyer.
    pub fn create_bond(ctx: Context<CreateBond>, terms: BondTerms) -> Result<()> {
        instructions::create_bond::handler(ctx, terms)
    }

    /// Authorized seller function to approve a bond.
    pub fn sign_bond(ctx: Context<SignBond>) -> Result<()> {
        instructions::sign_bond::handler(ctx)
    }

    /// Pays for a fully signed bond and stakes its principal.
    pub fn claim_bond(ctx: Context<ClaimBond>) -> Result<()> {
        instructions::claim_bond::handler(ctx)
    }

    /// Claims the rewards of a bond.
    pub fn claim_bond_rewards(ctx: Context<ClaimBondRewards>, allow_zero_rewards: bool) -> Result<()> {
        instructions::claim_bond_rewards::handler(ctx, allow_zero_rewards)
    }

    /// Releases vested bond tokens.
    pub fn unlock_bond_tokens(ctx: Context<UnlockBondTokens>) -> Result<()> {
        instructions::unlock_bond_tokens::handler(ctx)
    }

    /// Admin function to grant an airdrop.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for the grant
    /// * `rewarded` - Whether the airdrop earns the stakers' reward
    /// * `entries` - Ladder of unlocks to append
    pub fn airdrop(ctx: Context<Airdrop>, rewarded: bool, entries: Vec<AirdropUnlock>) -> Result<()> {
        instructions::airdrop::handler(ctx, rewarded, entries)
    }

    /// Releases matured airdrop entries.
    pub fn unlock_airdrop(ctx: Context<UnlockAirdrop>) -> Result<()> {
        instructions::unlock_airdrop::handler(ctx)
    }

    /// Admin function to take back the remaining entries of an airdrop.
    pub fn revoke_airdrop(ctx: Context<RevokeAirdrop>) -> Result<()> {
        instructions::revoke_airdrop::handler(ctx)
    }

    /// Claims the rewards of a rewarded airdrop.
    pub fn claim_airdrop_rewards(
        ctx: Context<ClaimAirdropRewards>,
        allow_zero_rewards: bool,
    ) -> Result<()> {
        instructions::claim_airdrop_rewards::handler(ctx, allow_zero_rewards)
    }

    /// Advances a pool's reward history to the current day.
    pub fn crank(ctx: Context<Crank>) -> Result<()> {
        instructions::crank::handler(ctx)
    }
}
