//! Airdrop instruction handler.
//!
//! Grants a recipient a ladder of unlocks in a pool, funded by the protocol
//! authority into the pool vault.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::AirdropGranted;
use crate::state::{AirdropAccount, AirdropUnlock, CentralState, StakeAccount, StakePool};
use crate::utils::{crank_pool, transfer_from_signer};

/// Accounts required to grant an airdrop.
#[derive(Accounts)]
#[instruction(rewarded: bool)]
pub struct Airdrop<'info> {
    /// The admin authority funding the airdrop.
    #[account(mut)]
    pub authority: Signer<'info>,

    /// The central state.
    #[account(
        mut,
        seeds = [CENTRAL_STATE_SEED],
        bump = central_state.bump,
        has_one = authority @ StakingError::Unauthorized
    )]
    pub central_state: Account<'info, CentralState>,

    /// CHECK: Only used as a seed and recorded as the recipient.
    pub recipient: UncheckedAccount<'info>,

    /// The pool the airdrop is attributed to.
    #[account(
        mut,
        seeds = [STAKE_POOL_SEED, stake_pool.owner.as_ref()],
        bump = stake_pool.bump,
        has_one = vault @ StakingError::VaultMismatch
    )]
    pub stake_pool: Box<Account<'info, StakePool>>,

    /// The recipient's airdrop account for this pool and class.
    #[account(
        init_if_needed,
        payer = authority,
        space = AirdropAccount::LEN,
        seeds = [
            AIRDROP_SEED,
            recipient.key().as_ref(),
            stake_pool.key().as_ref(),
            [rewarded as u8].as_ref()
        ],
        bump
    )]
    pub airdrop_account: Account<'info, AirdropAccount>,

    /// CHECK: The recipient's stake account address in this pool, read only
    /// when the account has been created.
    #[account(
        seeds = [STAKE_ACCOUNT_SEED, recipient.key().as_ref(), stake_pool.key().as_ref()],
        bump
    )]
    pub stake_account: UncheckedAccount<'info>,

    /// Authority's token account funding the airdrop.
    #[account(
        mut,
        constraint = source.mint == central_state.token_mint @ StakingError::MintMismatch,
        constraint = source.owner == authority.key() @ StakingError::Unauthorized
    )]
    pub source: Account<'info, TokenAccount>,

    /// The pool's vault.
    #[account(mut)]
    pub vault: Account<'info, TokenAccount>,

    /// System program.
    pub system_program: Program<'info, System>,

    /// Token program.
    pub token_program: Program<'info, Token>,
}

/// Grant an airdrop.
///
/// # Arguments
/// * `ctx` - Airdrop accounts context
/// * `rewarded` - Whether the airdrop earns the stakers' reward
/// * `entries` - Ladder of `(amount, unlock_time)` to append
///
/// # Errors
/// Returns an error if:
/// - The ladder is empty, holds a zero amount or grows above `MAX_AIRDROP_UNLOCKS`
/// - An unlock time is not in the future
/// - A rewarded recipient has rewards left unsettled on the airdrop or on
///   its stake account
pub fn handler(mut ctx: Context<Airdrop>, rewarded: bool, entries: Vec<AirdropUnlock>) -> Result<()> {
    let clock = Clock::get()?;
    let accounts = &mut ctx.accounts;
    let pool_key = accounts.stake_pool.key();

    crank_pool(
        pool_key,
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        clock.unix_timestamp,
    )?;

    if accounts.airdrop_account.recipient == Pubkey::default() {
        accounts.airdrop_account.initialize(
            accounts.recipient.key(),
            pool_key,
            rewarded,
            accounts.stake_pool.current_day_index,
            ctx.bumps.airdrop_account,
        );
    }
    let stake_account = existing_stake_account(&accounts.stake_account)?;
    let amount = accounts.airdrop_account.grant(
        &mut accounts.stake_pool,
        &mut accounts.central_state,
        stake_account.as_ref(),
        &entries,
        clock.unix_timestamp,
    )?;

    transfer_from_signer(
        &accounts.token_program,
        &accounts.source,
        &accounts.vault,
        &accounts.authority,
        amount,
    )?;

    msg!(
        "Airdropped {} tokens ({}) to {}",
        amount,
        if rewarded { "rewarded" } else { "unrewarded" },
        accounts.recipient.key()
    );
    emit!(AirdropGranted {
        recipient: accounts.recipient.key(),
        stake_pool: pool_key,
        rewarded,
        amount,
        remaining: accounts.airdrop_account.remaining,
    });

    Ok(())
}

/// Reads a stake account, or `None` when it was never created or was closed.
fn existing_stake_account(info: &AccountInfo) -> Result<Option<StakeAccount>> {
    if info.owner != &crate::ID || info.data_is_empty() {
        return Ok(None);
    }
    let data = info.try_borrow_data()?;
    StakeAccount::try_deserialize(&mut &data[..]).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stake_account_info<'a>(
        key: &'a Pubkey,
        owner: &'a Pubkey,
        lamports: &'a mut u64,
        data: &'a mut [u8],
    ) -> AccountInfo<'a> {
        AccountInfo::new(key, false, false, lamports, data, owner, false, 0)
    }

    #[test]
    fn test_existing_stake_account() {
        let key = Pubkey::new_unique();
        let mut lamports = 0;

        let mut stake_account = StakeAccount::default();
        stake_account.initialize(Pubkey::new_unique(), Pubkey::new_unique(), 3, 1);
        stake_account.stake_amount = 42;
        let mut data = Vec::new();
        stake_account.try_serialize(&mut data).unwrap();

        let info = stake_account_info(&key, &crate::ID, &mut lamports, &mut data);
        let read = existing_stake_account(&info).unwrap().unwrap();
        assert_eq!(read.stake_amount, 42);
        assert_eq!(read.last_settled_day, 3);

        // Never created
        let system = anchor_lang::system_program::ID;
        let mut lamports = 0;
        let mut empty: Vec<u8> = Vec::new();
        let info = stake_account_info(&key, &system, &mut lamports, &mut empty);
        assert!(existing_stake_account(&info).unwrap().is_none());
    }
}
