use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::math::{self, DailyRates};
use crate::state::CentralState;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PoolStatus {
    #[default]
    Uninitialized,
    Inactive,
    Active,
    Frozen,
    Closed,
}

/// Cumulative rewards of a pool at the start of a day.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardSnapshot {
    pub pool_reward: u128,
    pub stakers_reward: u128,
}

/// Days covered by one crank, `from_day..to_day`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CrankOutcome {
    pub from_day: u64,
    pub to_day: u64,
}

impl CrankOutcome {
    pub fn days(&self) -> u64 {
        self.to_day - self.from_day
    }
}

#[account]
#[derive(Default)]
pub struct StakePool {
    pub owner: Pubkey,
    pub vault: Pubkey,
    pub status: PoolStatus,

    pub minimum_stake_amount: u64,
    /// Percentage of the pool share paid to stakers, the rest goes to the owner
    pub stakers_part: u64,
    /// Seconds between an unstake and its payout, zero pays out at once
    pub unstake_period: i64,

    /// Staked tokens, bonds included
    pub total_staked: u64,
    pub total_rewarded_airdrops: u64,
    pub total_unrewarded_airdrops: u64,

    /// First day not yet added to the cumulative rewards
    pub current_day_index: u64,
    pub last_owner_claim_day: u64,

    pub cumulative_pool_reward: u128,
    pub cumulative_stakers_reward: u128,
    /// `history[d % HISTORY_LEN]` holds the cumulative rewards at the start of day `d`
    pub history: Vec<RewardSnapshot>,

    pub bump: u8,
    pub vault_bump: u8,
}

impl StakePool {
    pub const LEN: usize = 8
        + (32 * 2)
        + 1
        + (8 * 3)
        + (8 * 3)
        + (8 * 2)
        + (16 * 2)
        + (4 + 32 * HISTORY_LEN)
        + 2;

    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        owner: Pubkey,
        vault: Pubkey,
        minimum_stake_amount: u64,
        stakers_part: u64,
        unstake_period: i64,
        bump: u8,
        vault_bump: u8,
    ) -> Result<()> {
        require!(
            self.status == PoolStatus::Uninitialized,
            StakingError::PoolExists
        );
        require!(
            stakers_part <= PERCENT_DENOMINATOR,
            StakingError::StakersPartOutOfBounds
        );
        require!(unstake_period >= 0, StakingError::InvalidTimestamp);

        self.owner = owner;
        self.vault = vault;
        self.status = PoolStatus::Inactive;
        self.minimum_stake_amount = minimum_stake_amount;
        self.stakers_part = stakers_part;
        self.unstake_period = unstake_period;
        self.total_staked = 0;
        self.total_rewarded_airdrops = 0;
        self.total_unrewarded_airdrops = 0;
        self.current_day_index = 0;
        self.last_owner_claim_day = 0;
        self.cumulative_pool_reward = 0;
        self.cumulative_stakers_reward = 0;
        self.history = vec![RewardSnapshot::default(); HISTORY_LEN];
        self.bump = bump;
        self.vault_bump = vault_bump;
        Ok(())
    }

    /// Starts accrual at the current day.
    pub fn activate(&mut self, central: &CentralState, now: i64) -> Result<()> {
        match self.status {
            PoolStatus::Inactive => {}
            PoolStatus::Active | PoolStatus::Frozen => {
                return err!(StakingError::AlreadyActivated)
            }
            PoolStatus::Uninitialized | PoolStatus::Closed => {
                return err!(StakingError::PoolNotReady)
            }
        }
        self.current_day_index = central.current_offset(now);
        self.last_owner_claim_day = self.current_day_index;
        self.status = PoolStatus::Active;
        Ok(())
    }

    pub fn freeze(&mut self, frozen: bool) -> Result<()> {
        require!(self.is_accruing(), StakingError::PoolNotReady);
        self.status = if frozen {
            PoolStatus::Frozen
        } else {
            PoolStatus::Active
        };
        Ok(())
    }

    /// Active and frozen pools accrue rewards.
    pub fn is_accruing(&self) -> bool {
        matches!(self.status, PoolStatus::Active | PoolStatus::Frozen)
    }

    pub fn assert_accepts_inflows(&self) -> Result<()> {
        match self.status {
            PoolStatus::Active => Ok(()),
            PoolStatus::Frozen => err!(StakingError::PoolFrozen),
            _ => err!(StakingError::PoolNotReady),
        }
    }

    pub fn cumulative(&self) -> RewardSnapshot {
        RewardSnapshot {
            pool_reward: self.cumulative_pool_reward,
            stakers_reward: self.cumulative_stakers_reward,
        }
    }

    /// Rewardable weight of the pool in the protocol total.
    pub fn weight(&self) -> Result<u64> {
        let weight = self
            .total_staked
            .checked_add(self.total_rewarded_airdrops)
            .ok_or(StakingError::MathOverflow)?
            .checked_add(math::unrewarded_weight(self.total_unrewarded_airdrops)?)
            .ok_or(StakingError::MathOverflow)?;
        Ok(weight)
    }

    /// Advances the reward history to the current day.
    ///
    /// The central state is advanced first. Each missing day then records the
    /// cumulative rewards at its start in the history ring and adds the pool's
    /// share of that day's protocol reward per weight. Days that have already
    /// left the history ring can no longer be claimed and are skipped.
    pub fn crank(&mut self, central: &mut CentralState, now: i64) -> Result<CrankOutcome> {
        require!(self.is_accruing(), StakingError::PoolNotReady);

        let offset = central.advance(now)?;
        let from_day = self.current_day_index;
        if from_day >= offset {
            return Ok(CrankOutcome {
                from_day,
                to_day: from_day,
            });
        }

        let weight = self.weight()?;
        let mut day = from_day.max(offset.saturating_sub(HISTORY_LEN as u64));
        let mut start = central.reward_per_weight_at(day)?;
        while day < offset {
            let snapshot = self.cumulative();
            *self.history_entry_mut(day)? = snapshot;
            let end = central.reward_per_weight_at(day + 1)?;
            self.accrue(
                end.checked_sub(start).ok_or(StakingError::MathOverflow)?,
                weight,
            )?;
            start = end;
            day += 1;
        }

        self.current_day_index = offset;
        Ok(CrankOutcome {
            from_day,
            to_day: offset,
        })
    }

    fn accrue(&mut self, reward_per_weight: u128, weight: u64) -> Result<()> {
        let rates: DailyRates = math::pool_rates(reward_per_weight, self.stakers_part, weight)?;
        self.cumulative_pool_reward = self
            .cumulative_pool_reward
            .checked_add(rates.pool_reward)
            .ok_or(StakingError::MathOverflow)?;
        self.cumulative_stakers_reward = self
            .cumulative_stakers_reward
            .checked_add(rates.stakers_reward)
            .ok_or(StakingError::MathOverflow)?;
        Ok(())
    }

    fn history_entry_mut(&mut self, day: u64) -> Result<&mut RewardSnapshot> {
        self.history
            .get_mut(day as usize % HISTORY_LEN)
            .ok_or_else(|| error!(StakingError::PoolNotReady))
    }

    /// Cumulative rewards at the start of `day`.
    ///
    /// Days older than the history ring resolve to its oldest entry, which
    /// caps any claim to the most recent `HISTORY_LEN` days.
    pub fn snapshot_at(&self, day: u64) -> Result<RewardSnapshot> {
        if day >= self.current_day_index {
            return Ok(self.cumulative());
        }
        let oldest = self.current_day_index.saturating_sub(HISTORY_LEN as u64);
        let day = day.max(oldest);
        self.history
            .get(day as usize % HISTORY_LEN)
            .copied()
            .ok_or_else(|| error!(StakingError::PoolNotReady))
    }

    /// Stakers' reward of `amount` rewardable tokens since `day`.
    pub fn stakers_reward_since(&self, day: u64, amount: u64) -> Result<u64> {
        let from = self.snapshot_at(day)?.stakers_reward;
        math::fp_to_amount(math::accrued(amount, from, self.cumulative_stakers_reward)?)
    }

    /// Owner's reward since `day`.
    pub fn pool_reward_since(&self, day: u64) -> Result<u64> {
        let from = self.snapshot_at(day)?.pool_reward;
        math::fp_to_amount(
            self.cumulative_pool_reward
                .checked_sub(from)
                .ok_or(StakingError::MathOverflow)?,
        )
    }

    /// Fails when a position of `amount` tokens has rewards left unsettled.
    pub fn assert_settled(&self, last_settled_day: u64, amount: u64) -> Result<()> {
        require!(
            amount == 0 || last_settled_day >= self.current_day_index,
            StakingError::UnclaimedRewards
        );
        Ok(())
    }

    /// Settles a position up to the current day and returns its reward.
    ///
    /// Without `allow_zero_rewards`, settling twice on the same day or a zero
    /// reward fails with `NoClaimableRewards`.
    pub fn settle(
        &self,
        last_settled_day: &mut u64,
        amount: u64,
        allow_zero_rewards: bool,
    ) -> Result<u64> {
        let reward = self.stakers_reward_since(*last_settled_day, amount)?;
        if !allow_zero_rewards {
            require!(
                *last_settled_day < self.current_day_index && reward > 0,
                StakingError::NoClaimableRewards
            );
        }
        *last_settled_day = self.current_day_index;
        Ok(reward)
    }

    pub fn claim_owner_rewards(
        &mut self,
        central: &mut CentralState,
        now: i64,
        allow_zero_rewards: bool,
    ) -> Result<u64> {
        self.crank(central, now)?;
        let reward = self.pool_reward_since(self.last_owner_claim_day)?;
        if !allow_zero_rewards {
            require!(
                self.last_owner_claim_day < self.current_day_index && reward > 0,
                StakingError::NoClaimableRewards
            );
        }
        self.last_owner_claim_day = self.current_day_index;
        Ok(reward)
    }

    /// Applies `change` to the pool totals and carries the weight difference
    /// into the protocol total.
    fn reweigh<F>(&mut self, central: &mut CentralState, change: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let old_weight = self.weight()?;
        change(self)?;
        central.reweigh(old_weight, self.weight()?)
    }

    pub fn add_staked(&mut self, central: &mut CentralState, amount: u64) -> Result<()> {
        self.reweigh(central, |pool| {
            pool.total_staked = pool
                .total_staked
                .checked_add(amount)
                .ok_or(StakingError::MathOverflow)?;
            Ok(())
        })
    }

    pub fn remove_staked(&mut self, central: &mut CentralState, amount: u64) -> Result<()> {
        self.reweigh(central, |pool| {
            pool.total_staked = pool
                .total_staked
                .checked_sub(amount)
                .ok_or(StakingError::MathOverflow)?;
            Ok(())
        })
    }

    pub fn add_airdrop(
        &mut self,
        central: &mut CentralState,
        rewarded: bool,
        amount: u64,
    ) -> Result<()> {
        self.reweigh(central, |pool| {
            let total = pool.airdrop_total_mut(rewarded);
            *total = total.checked_add(amount).ok_or(StakingError::MathOverflow)?;
            Ok(())
        })
    }

    pub fn remove_airdrop(
        &mut self,
        central: &mut CentralState,
        rewarded: bool,
        amount: u64,
    ) -> Result<()> {
        self.reweigh(central, |pool| {
            let total = pool.airdrop_total_mut(rewarded);
            *total = total.checked_sub(amount).ok_or(StakingError::MathOverflow)?;
            Ok(())
        })
    }

    fn airdrop_total_mut(&mut self, rewarded: bool) -> &mut u64 {
        if rewarded {
            &mut self.total_rewarded_airdrops
        } else {
            &mut self.total_unrewarded_airdrops
        }
    }

    /// Cranks accruing pools so that parameter changes only apply from now on.
    fn crank_before_update(&mut self, central: &mut CentralState, now: i64) -> Result<()> {
        if self.is_accruing() {
            self.crank(central, now)?;
        } else {
            require!(
                self.status == PoolStatus::Inactive,
                StakingError::PoolNotReady
            );
        }
        Ok(())
    }

    pub fn set_minimum_stake_amount(
        &mut self,
        central: &mut CentralState,
        amount: u64,
        now: i64,
    ) -> Result<()> {
        self.crank_before_update(central, now)?;
        self.minimum_stake_amount = amount;
        Ok(())
    }

    pub fn set_stakers_part(
        &mut self,
        central: &mut CentralState,
        stakers_part: u64,
        now: i64,
    ) -> Result<()> {
        require!(
            stakers_part <= PERCENT_DENOMINATOR,
            StakingError::StakersPartOutOfBounds
        );
        self.crank_before_update(central, now)?;
        self.stakers_part = stakers_part;
        Ok(())
    }

    /// Marks an empty pool closed once the owner has collected every reward.
    pub fn mark_closed(&mut self, central: &mut CentralState, now: i64) -> Result<()> {
        self.crank_before_update(central, now)?;
        require!(
            self.total_staked == 0
                && self.total_rewarded_airdrops == 0
                && self.total_unrewarded_airdrops == 0,
            StakingError::StakePoolNotEmpty
        );
        if self.status != PoolStatus::Inactive {
            require!(
                self.pool_reward_since(self.last_owner_claim_day)? == 0,
                StakingError::UnclaimedRewards
            );
        }
        self.status = PoolStatus::Closed;
        Ok(())
    }
}
