use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, StakePool};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnstakeRequest {
    pub amount: u64,
    pub unlock_time: i64,
}

/// Result of an unstake: paid at once, or queued until `unlock_time`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnstakeOutcome {
    Immediate(u64),
    Queued(UnstakeRequest),
}

#[account]
#[derive(Default)]
pub struct StakeAccount {
    pub owner: Pubkey,
    pub stake_pool: Pubkey,

    pub stake_amount: u64,
    pub last_settled_day: u64,
    /// Floor the balance may not fall under, fixed when it leaves zero
    pub minimum_at_join: u64,

    pub pending_unstake_requests: Vec<UnstakeRequest>,

    pub bump: u8,
}

impl StakeAccount {
    pub const LEN: usize = 8 + (32 * 2) + (8 * 3) + (4 + 16 * MAX_UNSTAKE_REQUESTS) + 1;

    pub fn initialize(&mut self, owner: Pubkey, stake_pool: Pubkey, current_day: u64, bump: u8) {
        self.owner = owner;
        self.stake_pool = stake_pool;
        self.stake_amount = 0;
        self.last_settled_day = current_day;
        self.minimum_at_join = 0;
        self.pending_unstake_requests = Vec::new();
        self.bump = bump;
    }

    /// Credits `amount` and returns the fee owed on top of it.
    ///
    /// `backing` is what the owner also holds in the pool through airdrops
    /// and bonds, and counts towards the minimum.
    pub fn stake(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        amount: u64,
        backing: u64,
        now: i64,
    ) -> Result<u64> {
        pool.crank(central, now)?;
        require!(amount > 0, StakingError::InvalidAmount);
        pool.assert_accepts_inflows()?;
        pool.assert_settled(self.last_settled_day, self.stake_amount)?;

        let minimum = if self.stake_amount == 0 {
            pool.minimum_stake_amount
        } else {
            self.minimum_at_join
        };
        let new_amount = self
            .stake_amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        require!(
            meets_minimum(new_amount, backing, minimum)?,
            StakingError::InvalidAmount
        );

        pool.add_staked(central, amount)?;
        self.stake_amount = new_amount;
        self.minimum_at_join = minimum;
        self.last_settled_day = pool.current_day_index;

        central.stake_fee(amount)
    }

    pub fn unstake(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        amount: u64,
        backing: u64,
        now: i64,
    ) -> Result<UnstakeOutcome> {
        pool.crank(central, now)?;
        require!(amount > 0, StakingError::InvalidAmount);
        require!(
            amount <= self.stake_amount,
            StakingError::InsufficientBalance
        );
        pool.assert_settled(self.last_settled_day, self.stake_amount)?;

        let remaining = self.stake_amount - amount;
        require!(
            remaining == 0 || meets_minimum(remaining, backing, self.minimum_at_join)?,
            StakingError::InvalidAmount
        );

        let outcome = if pool.unstake_period == 0 {
            UnstakeOutcome::Immediate(amount)
        } else {
            require!(
                self.pending_unstake_requests.len() < MAX_UNSTAKE_REQUESTS,
                StakingError::TooManyUnstakeRequests
            );
            let request = UnstakeRequest {
                amount,
                unlock_time: now
                    .checked_add(pool.unstake_period)
                    .ok_or(StakingError::MathOverflow)?,
            };
            self.pending_unstake_requests.push(request);
            UnstakeOutcome::Queued(request)
        };

        pool.remove_staked(central, amount)?;
        self.stake_amount = remaining;
        if remaining == 0 {
            self.minimum_at_join = 0;
        }
        self.last_settled_day = pool.current_day_index;

        Ok(outcome)
    }

    /// Removes every matured request and returns the amount to pay out.
    pub fn execute_unstake(&mut self, now: i64) -> Result<u64> {
        let mut matured: u64 = 0;
        for request in self
            .pending_unstake_requests
            .iter()
            .filter(|request| request.unlock_time <= now)
        {
            matured = matured
                .checked_add(request.amount)
                .ok_or(StakingError::MathOverflow)?;
        }
        require!(matured > 0, StakingError::CannotUnstake);

        self.pending_unstake_requests
            .retain(|request| request.unlock_time > now);
        Ok(matured)
    }

    pub fn claim_rewards(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
        allow_zero_rewards: bool,
    ) -> Result<u64> {
        pool.crank(central, now)?;
        pool.settle(
            &mut self.last_settled_day,
            self.stake_amount,
            allow_zero_rewards,
        )
    }

    pub fn assert_closable(&self) -> Result<()> {
        require!(
            self.stake_amount == 0 && self.pending_unstake_requests.is_empty(),
            StakingError::StakeAccountNotEmpty
        );
        Ok(())
    }
}

fn meets_minimum(stake_amount: u64, backing: u64, minimum: u64) -> Result<bool> {
    let total = stake_amount
        .checked_add(backing)
        .ok_or(StakingError::MathOverflow)?;
    Ok(total >= minimum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{active_pool, assert_err, central, DAY, INFLATION};

    const AMOUNT: u64 = 10_000_000_000;

    fn account(pool: &StakePool) -> StakeAccount {
        let mut account = StakeAccount::default();
        account.initialize(Pubkey::new_unique(), Pubkey::new_unique(), pool.current_day_index, 1);
        account
    }

    #[test]
    fn test_stake_then_claim_next_day() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut account = account(&pool);

        let fee = account.stake(&mut pool, &mut central, AMOUNT, 0, 10).unwrap();
        assert_eq!(fee, 200_000_000);
        assert_eq!(pool.total_staked, AMOUNT);
        assert_eq!(central.total_staked, AMOUNT);

        let reward = account.claim_rewards(&mut pool, &mut central, DAY + 10, false).unwrap();
        assert_eq!(reward, INFLATION * 40 / 100);
        assert_err(
            account.claim_rewards(&mut pool, &mut central, DAY + 20, false),
            StakingError::NoClaimableRewards,
        );
    }

    #[test]
    fn test_stake_validation() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut account = account(&pool);

        assert_err(account.stake(&mut pool, &mut central, 0, 0, 0), StakingError::InvalidAmount);

        pool.minimum_stake_amount = AMOUNT;
        assert_err(
            account.stake(&mut pool, &mut central, AMOUNT - 1, 0, 0),
            StakingError::InvalidAmount,
        );

        pool.freeze(true).unwrap();
        assert_err(account.stake(&mut pool, &mut central, AMOUNT, 0, 0), StakingError::PoolFrozen);
    }

    #[test]
    fn test_settlement_gate() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut account = account(&pool);
        account.stake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap();

        assert_err(
            account.stake(&mut pool, &mut central, 1, 0, DAY),
            StakingError::UnclaimedRewards,
        );
        assert_err(
            account.unstake(&mut pool, &mut central, 1, 0, DAY),
            StakingError::UnclaimedRewards,
        );

        account.claim_rewards(&mut pool, &mut central, DAY, false).unwrap();
        account.stake(&mut pool, &mut central, 1, 0, DAY).unwrap();
        assert_eq!(account.stake_amount, AMOUNT + 1);
    }

    #[test]
    fn test_retained_minimum() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        pool.minimum_stake_amount = 10_000 * 1_000_000;
        let mut account = account(&pool);
        account.stake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap();

        pool.set_minimum_stake_amount(&mut central, 5_000 * 1_000_000, 0).unwrap();

        // Still bound by the floor in force when the position opened
        assert_err(
            account.unstake(&mut pool, &mut central, 3_000 * 1_000_000, 0, 0),
            StakingError::InvalidAmount,
        );

        assert_eq!(
            account.unstake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap(),
            UnstakeOutcome::Immediate(AMOUNT)
        );
        assert_eq!(account.minimum_at_join, 0);

        // Re-entry picks up the lowered minimum
        account.stake(&mut pool, &mut central, 5_000 * 1_000_000, 0, 0).unwrap();
        assert_eq!(account.minimum_at_join, 5_000 * 1_000_000);
    }

    #[test]
    fn test_backing_counts_towards_minimum() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        pool.minimum_stake_amount = 1_000_000_000;
        let mut account = account(&pool);

        // An airdrop covering the whole minimum
        account.stake(&mut pool, &mut central, 500_000_000, 1_000_000_000, 0).unwrap();
        account.unstake(&mut pool, &mut central, 100_000_000, 1_000_000_000, 0).unwrap();
        assert_eq!(account.stake_amount, 400_000_000);

        // A partial airdrop
        let mut other = StakeAccount::default();
        other.initialize(Pubkey::new_unique(), Pubkey::new_unique(), 0, 1);
        assert_err(
            other.stake(&mut pool, &mut central, 800_000_000, 100_000_000, 0),
            StakingError::InvalidAmount,
        );
        other.stake(&mut pool, &mut central, 900_000_000, 100_000_000, 0).unwrap();
        assert_err(
            other.unstake(&mut pool, &mut central, 200_000_000, 100_000_000, 0),
            StakingError::InvalidAmount,
        );
        other.unstake(&mut pool, &mut central, 900_000_000, 100_000_000, 0).unwrap();
    }

    #[test]
    fn test_fee_follows_protocol_setting() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut account = account(&pool);
        central.set_fee_basis_points(25).unwrap();
        assert_eq!(
            account.stake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap(),
            25_000_000
        );
    }

    #[test]
    fn test_unstake_validation() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut account = account(&pool);
        account.stake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap();

        assert_err(account.unstake(&mut pool, &mut central, 0, 0, 0), StakingError::InvalidAmount);
        assert_err(
            account.unstake(&mut pool, &mut central, AMOUNT + 1, 0, 0),
            StakingError::InsufficientBalance,
        );
    }

    #[test]
    fn test_queued_unstake() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        pool.unstake_period = 7 * DAY;
        let mut account = account(&pool);
        account.stake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap();

        for i in 0..MAX_UNSTAKE_REQUESTS as i64 {
            account.unstake(&mut pool, &mut central, 1, 0, i).unwrap();
        }
        assert_err(
            account.unstake(&mut pool, &mut central, 1, 0, 100),
            StakingError::TooManyUnstakeRequests,
        );
        assert_eq!(pool.total_staked, AMOUNT - MAX_UNSTAKE_REQUESTS as u64);

        assert_err(account.execute_unstake(7 * DAY - 1), StakingError::CannotUnstake);
        assert_eq!(account.execute_unstake(7 * DAY + 4).unwrap(), 5);
        assert_eq!(account.pending_unstake_requests.len(), 5);
        assert_err(account.assert_closable(), StakingError::StakeAccountNotEmpty);
    }

    #[test]
    fn test_close_after_full_exit() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut account = account(&pool);
        account.stake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap();
        assert_err(account.assert_closable(), StakingError::StakeAccountNotEmpty);

        account.unstake(&mut pool, &mut central, AMOUNT, 0, 0).unwrap();
        account.assert_closable().unwrap();
    }
}
