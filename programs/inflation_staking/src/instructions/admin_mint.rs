//! Admin mint instruction handler.

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::CentralState;
use crate::utils::mint_from_central;

/// Accounts required to mint tokens outside of the inflation schedule.
#[derive(Accounts)]
pub struct AdminMint<'info> {
    /// The admin authority.
    pub authority: Signer<'info>,

    /// The central state, mint authority of the staking token.
    #[account(
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = authority @ StakingError::Unauthorized,
        has_one = token_mint @ StakingError::MintMismatch
    )]
    pub central_state: Account<'info, CentralState>,

    /// The staking token mint.
    #[account(mut)]
    pub token_mint: Account<'info, Mint>,

    /// Account receiving the minted tokens.
    #[account(
        mut,
        constraint = destination.mint == token_mint.key() @ StakingError::MintMismatch
    )]
    pub destination: Account<'info, TokenAccount>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Mint `amount` tokens to `destination`.
pub fn handler(ctx: Context<AdminMint>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    mint_from_central(
        &ctx.accounts.token_program,
        &ctx.accounts.token_mint,
        &ctx.accounts.destination,
        &ctx.accounts.central_state,
        amount,
    )?;

    msg!("Admin minted {} tokens to {}", amount, ctx.accounts.destination.key());

    Ok(())
}
