//! Claim bond instruction handler.
//!
//! The buyer pays the quote amount to the seller. The principal is minted
//! into the pool vault and starts earning as a staked position.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::BondActivated;
use crate::state::{BondAccount, CentralState, InstructionKind, StakePool};
use crate::utils::{crank_pool, mint_from_central, transfer_from_signer};

/// Accounts required to claim a bond.
#[derive(Accounts)]
pub struct ClaimBond<'info> {
    /// The buyer.
    pub buyer: Signer<'info>,

    /// The central state, mint authority of the staking token.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = token_mint @ StakingError::MintMismatch
    )]
    pub central_state: Account<'info, CentralState>,

    /// The pool the bond stakes into.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump,
        has_one = vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The bond to claim.
    #[account(
        mut,
        has_one = stake_pool @ StakingError::PoolMismatch,
        has_one = seller_token_account @ StakingError::Unauthorized,
        constraint = bond_account.owner == buyer.key() @ StakingError::Unauthorized
    )]
    pub bond_account: Box<Account<'info, BondAccount>>,

    /// Buyer's token account paying the quote amount.
    #[account(
        mut,
        constraint = buyer_quote_account.mint == bond_account.quote_mint @ StakingError::MintMismatch,
        constraint = buyer_quote_account.owner == buyer.key() @ StakingError::Unauthorized
    )]
    pub buyer_quote_account: Account<'info, TokenAccount>,

    /// Seller's token account receiving the quote amount.
    #[account(
        mut,
        constraint = seller_token_account.mint == bond_account.quote_mint @ StakingError::MintMismatch
    )]
    pub seller_token_account: Account<'info, TokenAccount>,

    /// The staking token mint.
    #[account(mut)]
    pub token_mint: Account<'info, Mint>,

    /// The pool's vault receiving the principal.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Claim a fully signed bond.
///
/// # Errors
/// Returns an error if the bond lacks signatures, is already active, or the
/// pool does not accept new stake.
pub fn handler(mut ctx: Context<ClaimBond>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    accounts
        .central_state
        .assert_instruction_allowed(InstructionKind::ClaimBond)?;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;
    accounts.bond_account.activate(
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;

    transfer_from_signer(
        &accounts.token_program,
        &accounts.buyer_quote_account,
        &accounts.seller_token_account,
        &accounts.buyer,
        accounts.bond_account.total_quote_amount,
    )?;
    mint_from_central(
        &accounts.token_program,
        &accounts.token_mint,
        &accounts.vault,
        &accounts.central_state,
        accounts.bond_account.total_amount_sold,
    )?;

    msg!(
        "Bond activated: {} tokens staked for {} quote tokens",
        accounts.bond_account.total_amount_sold,
        accounts.bond_account.total_quote_amount
    );
    emit!(BondActivated {
        bond: accounts.bond_account.key(),
        owner: accounts.buyer.key(),
        stake_pool: pool_key,
        amount: accounts.bond_account.total_amount_sold,
        quote_amount: accounts.bond_account.total_quote_amount,
    });

    Ok(())
}
