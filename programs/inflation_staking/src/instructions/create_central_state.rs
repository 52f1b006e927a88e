//! Create central state instruction handler.
//!
//! Creates the protocol singleton that owns the mint authority of the staking
//! token and holds the daily inflation schedule, together with the vault
//! collecting the stake fees.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::state::CentralState;

/// Accounts required to create the central state.
#[derive(Accounts)]
pub struct CreateCentralState<'info> {
    /// The administrator of the protocol.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The central state to be created.
    #[account(
        init,
        payer = authority,
        space = CentralState::LEN,
        seeds = [CENTRAL_STATE_SEED],
        bump
    )]
    pub central_state: Account<'info, CentralState>,

    /// The staking token. Its mint authority must already be the central state.
    #[account(
        constraint = token_mint.mint_authority == COption::Some(central_state.key())
            @ StakingError::InvalidMintAuthority
    )]
    pub token_mint: Account<'info, Mint>,

    /// Vault collecting the stake fees until they are distributed.
    #[account(
        init,
        payer = authority,
        seeds = [FEE_VAULT_SEED],
        bump,
        token::mint = token_mint,
        token::authority = central_state
    )]
    pub fee_vault: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,

    /// Rent sysvar.
    pub rent: Sysvar<'info, Rent>,
}

/// Create the central state.
///
/// # Arguments
/// * `ctx` - CreateCentralState accounts context
/// * `daily_inflation` - Tokens minted protocol-wide per day
pub fn handler(ctx: Context<CreateCentralState>, daily_inflation: u64) -> Result<()> {
    let clock = Clock::get()?;
    let central_state = &mut ctx.accounts.central_state;

    central_state.initialize(
        ctx.accounts.authority.key(),
        ctx.accounts.token_mint.key(),
        daily_inflation,
        clock.unix_timestamp,
        ctx.bumps.central_state,
    );

    msg!("Central state created");
    msg!("Admin: {}", ctx.accounts.authority.key());
    msg!("Mint: {}", ctx.accounts.token_mint.key());
    msg!("Daily inflation: {}", daily_inflation);
    msg!("Fee vault: {}", ctx.accounts.fee_vault.key());

    Ok(())
}
