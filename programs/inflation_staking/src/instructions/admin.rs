//! Admin instruction handlers.
//!
//! Handles the central state settings reserved to the protocol authority.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::InflationChanged;
use crate::state::{CentralState, FeeRecipient};

/// Accounts required for admin operations.
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    pub authority: Signer<'info>,

    /// The central state to modify.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = authority @ StakingError::Unauthorized
    )]
    pub central_state: Account<'info, CentralState>,
}

/// Schedule a new daily inflation for the next day boundary.
///
/// Days already elapsed keep the rate in force when they ran, even for pools
/// that crank them later.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `daily_inflation` - New number of tokens minted per day
pub fn set_daily_inflation_handler(ctx: Context<AdminControl>, daily_inflation: u64) -> Result<()> {
    let central_state = &mut ctx.accounts.central_state;
    let clock = Clock::get()?;

    let previous = central_state.inflation_for_day(central_state.current_offset(clock.unix_timestamp));
    let effective_day = central_state.set_daily_inflation(daily_inflation, clock.unix_timestamp)?;

    msg!(
        "Daily inflation: {} -> {} from day {}",
        previous,
        daily_inflation,
        effective_day
    );
    emit!(InflationChanged {
        daily_inflation,
        effective_day,
    });

    Ok(())
}

/// Transfer admin authority to a new address.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_authority` - New admin pubkey
pub fn set_authority_handler(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
    require!(
        new_authority != Pubkey::default(),
        StakingError::Unauthorized
    );

    let central_state = &mut ctx.accounts.central_state;
    let old_authority = central_state.authority;
    central_state.authority = new_authority;

    msg!("Authority transferred: {} -> {}", old_authority, new_authority);

    Ok(())
}

/// Set the key allowed to freeze the whole program.
pub fn set_freeze_authority_handler(
    ctx: Context<AdminControl>,
    freeze_authority: Pubkey,
) -> Result<()> {
    let central_state = &mut ctx.accounts.central_state;
    central_state.freeze_authority = freeze_authority;

    msg!("Freeze authority: {}", freeze_authority);

    Ok(())
}

/// Replace the authorized bond sellers and the number of signatures a bond
/// needs before it can be claimed.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `sellers` - Authorized sellers, at most `MAX_BOND_SELLERS`
/// * `threshold` - Required signatures, within `1..=sellers.len()`
pub fn set_bond_sellers_handler(
    ctx: Context<AdminControl>,
    sellers: Vec<Pubkey>,
    threshold: u8,
) -> Result<()> {
    let central_state = &mut ctx.accounts.central_state;
    central_state.set_bond_sellers(sellers, threshold)?;

    msg!(
        "Bond sellers updated: {} sellers, {} signatures required",
        central_state.bond_sellers.len(),
        threshold
    );

    Ok(())
}

/// Set the stake fee, in basis points of the staked amount.
///
/// # Errors
/// Returns an error if the fee is above 10_000 basis points.
pub fn set_protocol_fee_handler(ctx: Context<AdminControl>, fee_basis_points: u16) -> Result<()> {
    let central_state = &mut ctx.accounts.central_state;
    let previous = central_state.fee_basis_points;
    central_state.set_fee_basis_points(fee_basis_points)?;

    msg!("Protocol fee: {} -> {} bps", previous, fee_basis_points);

    Ok(())
}

/// Replace the recipients of the fee vault.
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `recipients` - Owners and percentages, at most `MAX_FEE_RECIPIENTS`
///
/// # Errors
/// Returns an error if:
/// - The list is empty, too long, or holds a zero share
/// - The shares add up to more than 100
/// - The last distribution is older than `MAX_FEE_SPLIT_SETUP_DELAY`
pub fn setup_fee_split_handler(
    ctx: Context<AdminControl>,
    recipients: Vec<FeeRecipient>,
) -> Result<()> {
    let clock = Clock::get()?;
    let central_state = &mut ctx.accounts.central_state;
    central_state.setup_fee_split(recipients, clock.unix_timestamp)?;

    msg!("Fee split updated: {} recipients", central_state.fee_recipients.len());

    Ok(())
}
