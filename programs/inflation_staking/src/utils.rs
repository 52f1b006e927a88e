//! Helpers shared by the instruction handlers: crank reporting, the backing
//! counted towards a stake minimum and the token movements signed by the
//! program PDAs.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, MintTo, Token, TokenAccount, Transfer};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::PoolCranked;
use crate::state::{AirdropAccount, BondAccount, CentralState, CrankOutcome, StakePool};

/// Cranks a pool and reports the days it advanced.
pub fn crank_pool(
    pool_key: Pubkey,
    stake_pool: &mut StakePool,
    central_state: &mut CentralState,
    now: i64,
) -> Result<CrankOutcome> {
    let outcome = stake_pool.crank(central_state, now)?;
    if outcome.days() > 0 {
        msg!(
            "Cranked pool {} from day {} to day {}",
            pool_key,
            outcome.from_day,
            outcome.to_day
        );
        emit!(PoolCranked {
            stake_pool: pool_key,
            from_day: outcome.from_day,
            to_day: outcome.to_day,
            cumulative_pool_reward: stake_pool.cumulative_pool_reward,
            cumulative_stakers_reward: stake_pool.cumulative_stakers_reward,
        });
    }
    Ok(outcome)
}

/// Tokens a staker also holds in a pool through airdrops and a bond.
pub fn stake_backing(
    rewarded_airdrop: Option<&AirdropAccount>,
    unrewarded_airdrop: Option<&AirdropAccount>,
    bond_account: Option<&BondAccount>,
) -> Result<u64> {
    rewarded_airdrop
        .into_iter()
        .chain(unrewarded_airdrop)
        .map(|airdrop| airdrop.remaining)
        .chain(bond_account.map(|bond| bond.total_staked))
        .try_fold(0u64, |total, amount| {
            total
                .checked_add(amount)
                .ok_or_else(|| error!(StakingError::MathOverflow))
        })
}

/// Moves tokens out of a signer's token account.
pub fn transfer_from_signer<'info>(
    token_program: &Program<'info, Token>,
    from: &Account<'info, TokenAccount>,
    to: &Account<'info, TokenAccount>,
    authority: &Signer<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let cpi_accounts = Transfer {
        from: from.to_account_info(),
        to: to.to_account_info(),
        authority: authority.to_account_info(),
    };
    let cpi_ctx = CpiContext::new(token_program.to_account_info(), cpi_accounts);
    token::transfer(cpi_ctx, amount)
}

/// Moves tokens out of a pool vault, signed by the pool PDA.
pub fn transfer_from_pool_vault<'info>(
    token_program: &Program<'info, Token>,
    vault: &Account<'info, TokenAccount>,
    destination: &Account<'info, TokenAccount>,
    stake_pool: &Account<'info, StakePool>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let seeds = &[
        STAKE_POOL_SEED,
        stake_pool.owner.as_ref(),
        &[stake_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: vault.to_account_info(),
        to: destination.to_account_info(),
        authority: stake_pool.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}

/// Mints protocol tokens, signed by the central state PDA.
pub fn mint_from_central<'info>(
    token_program: &Program<'info, Token>,
    token_mint: &Account<'info, Mint>,
    destination: &Account<'info, TokenAccount>,
    central_state: &Account<'info, CentralState>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let seeds = &[CENTRAL_STATE_SEED, &[central_state.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = MintTo {
        mint: token_mint.to_account_info(),
        to: destination.to_account_info(),
        authority: central_state.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::mint_to(cpi_ctx, amount)
}

/// Moves tokens out of the fee vault, signed by the central state PDA.
pub fn transfer_from_fee_vault<'info>(
    token_program: &Program<'info, Token>,
    fee_vault: &Account<'info, TokenAccount>,
    destination: AccountInfo<'info>,
    central_state: &Account<'info, CentralState>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }
    let seeds = &[CENTRAL_STATE_SEED, &[central_state.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: fee_vault.to_account_info(),
        to: destination,
        authority: central_state.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(
        token_program.to_account_info(),
        cpi_accounts,
        signer_seeds,
    );
    token::transfer(cpi_ctx, amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stake_backing_sums_positions() {
        let mut rewarded = AirdropAccount::default();
        rewarded.remaining = 100;
        let mut unrewarded = AirdropAccount::default();
        unrewarded.remaining = 20;
        let mut bond = BondAccount::default();
        bond.total_staked = 3;

        assert_eq!(stake_backing(None, None, None).unwrap(), 0);
        assert_eq!(stake_backing(Some(&rewarded), None, Some(&bond)).unwrap(), 103);
        assert_eq!(
            stake_backing(Some(&rewarded), Some(&unrewarded), Some(&bond)).unwrap(),
            123
        );

        bond.total_staked = u64::MAX;
        assert!(stake_backing(Some(&rewarded), None, Some(&bond)).is_err());
    }
}
