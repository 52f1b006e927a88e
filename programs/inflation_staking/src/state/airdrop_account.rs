use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, StakeAccount, StakePool};

/// One rung of an airdrop ladder.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AirdropUnlock {
    pub amount: u64,
    pub unlock_time: i64,
}

#[account]
#[derive(Default)]
pub struct AirdropAccount {
    pub recipient: Pubkey,
    pub stake_pool: Pubkey,
    /// Rewarded airdrops earn the stakers' reward on their full balance
    pub rewarded: bool,

    pub remaining: u64,
    pub last_settled_day: u64,

    pub schedule: Vec<AirdropUnlock>,

    pub bump: u8,
}

impl AirdropAccount {
    pub const LEN: usize = 8 + (32 * 2) + 1 + (8 * 2) + (4 + 16 * MAX_AIRDROP_UNLOCKS) + 1;

    pub fn initialize(
        &mut self,
        recipient: Pubkey,
        stake_pool: Pubkey,
        rewarded: bool,
        current_day: u64,
        bump: u8,
    ) {
        self.recipient = recipient;
        self.stake_pool = stake_pool;
        self.rewarded = rewarded;
        self.remaining = 0;
        self.last_settled_day = current_day;
        self.schedule = Vec::new();
        self.bump = bump;
    }

    /// Balance earning the stakers' reward.
    pub fn rewardable_amount(&self) -> u64 {
        if self.rewarded {
            self.remaining
        } else {
            0
        }
    }

    /// Appends `entries` to the ladder and returns the amount to fund.
    ///
    /// A rewarded grant also requires the recipient's stake account in the
    /// pool, if any, to be settled.
    pub fn grant(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        stake_account: Option<&StakeAccount>,
        entries: &[AirdropUnlock],
        now: i64,
    ) -> Result<u64> {
        pool.crank(central, now)?;
        pool.assert_accepts_inflows()?;
        require!(
            !entries.is_empty() && self.schedule.len() + entries.len() <= MAX_AIRDROP_UNLOCKS,
            StakingError::InvalidAmount
        );

        let mut total: u64 = 0;
        for entry in entries {
            require!(entry.amount > 0, StakingError::InvalidAmount);
            require!(entry.unlock_time > now, StakingError::InvalidTimestamp);
            total = total
                .checked_add(entry.amount)
                .ok_or(StakingError::MathOverflow)?;
        }
        pool.assert_settled(self.last_settled_day, self.rewardable_amount())?;
        if let Some(stake_account) = stake_account.filter(|_| self.rewarded) {
            pool.assert_settled(stake_account.last_settled_day, stake_account.stake_amount)?;
        }

        pool.add_airdrop(central, self.rewarded, total)?;
        self.remaining = self
            .remaining
            .checked_add(total)
            .ok_or(StakingError::MathOverflow)?;
        self.schedule.extend_from_slice(entries);
        self.last_settled_day = pool.current_day_index;
        Ok(total)
    }

    /// Releases every matured entry and returns the amount to pay out.
    pub fn unlock(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
    ) -> Result<u64> {
        pool.crank(central, now)?;
        pool.assert_settled(self.last_settled_day, self.rewardable_amount())?;

        let mut matured: u64 = 0;
        for entry in self.schedule.iter().filter(|entry| entry.unlock_time <= now) {
            matured = matured
                .checked_add(entry.amount)
                .ok_or(StakingError::MathOverflow)?;
        }
        require!(matured > 0, StakingError::AirdropNotReady);

        pool.remove_airdrop(central, self.rewarded, matured)?;
        self.remaining = self
            .remaining
            .checked_sub(matured)
            .ok_or(StakingError::MathOverflow)?;
        self.schedule.retain(|entry| entry.unlock_time > now);
        self.last_settled_day = pool.current_day_index;
        Ok(matured)
    }

    /// Removes the whole remaining ladder and returns the amount taken back.
    ///
    /// Rewards left unsettled are forfeited. The pool is cranked even when
    /// nothing remains.
    pub fn revoke(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
    ) -> Result<u64> {
        pool.crank(central, now)?;
        if self.remaining == 0 {
            return Ok(0);
        }

        let revoked = self.remaining;
        pool.remove_airdrop(central, self.rewarded, revoked)?;
        self.remaining = 0;
        self.schedule.clear();
        self.last_settled_day = pool.current_day_index;
        Ok(revoked)
    }

    pub fn claim_rewards(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
        allow_zero_rewards: bool,
    ) -> Result<u64> {
        pool.crank(central, now)?;
        let amount = self.rewardable_amount();
        pool.settle(&mut self.last_settled_day, amount, allow_zero_rewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{active_pool, assert_err, central, DAY, INFLATION};

    const AMOUNT: u64 = 10_000_000_000;

    fn airdrop(pool: &StakePool, rewarded: bool) -> AirdropAccount {
        let mut airdrop = AirdropAccount::default();
        airdrop.initialize(Pubkey::new_unique(), Pubkey::new_unique(), rewarded, pool.current_day_index, 1);
        airdrop
    }

    fn entry(amount: u64, unlock_time: i64) -> AirdropUnlock {
        AirdropUnlock {
            amount,
            unlock_time,
        }
    }

    #[test]
    fn test_rewarded_airdrop_earns_and_unlocks() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut airdrop = airdrop(&pool, true);

        let funded = airdrop.grant(&mut pool, &mut central, None, &[entry(AMOUNT, DAY)], 0).unwrap();
        assert_eq!(funded, AMOUNT);
        assert_eq!(pool.total_rewarded_airdrops, AMOUNT);

        assert_err(
            airdrop.unlock(&mut pool, &mut central, 3 * DAY),
            StakingError::UnclaimedRewards,
        );
        let reward = airdrop.claim_rewards(&mut pool, &mut central, 3 * DAY, false).unwrap();
        assert_eq!(reward, 3 * (INFLATION * 40 / 100));

        assert_eq!(airdrop.unlock(&mut pool, &mut central, 3 * DAY).unwrap(), AMOUNT);
        assert_eq!(airdrop.remaining, 0);
        assert_eq!(central.total_staked, 0);
    }

    #[test]
    fn test_unrewarded_airdrop_only_weighs() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut airdrop = airdrop(&pool, false);

        airdrop.grant(&mut pool, &mut central, None, &[entry(AMOUNT, DAY)], 0).unwrap();
        assert_eq!(pool.weight().unwrap(), AMOUNT * 60 / 100);
        assert_eq!(central.total_staked, AMOUNT * 60 / 100);

        assert_err(
            airdrop.claim_rewards(&mut pool, &mut central, 2 * DAY, false),
            StakingError::NoClaimableRewards,
        );
        // The owner still earns on the discounted weight
        assert_eq!(pool.pool_reward_since(0).unwrap(), 2 * (INFLATION * 60 / 100));
        assert_eq!(airdrop.unlock(&mut pool, &mut central, 2 * DAY).unwrap(), AMOUNT);
    }

    #[test]
    fn test_grant_validation() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut airdrop = airdrop(&pool, true);

        assert_err(airdrop.grant(&mut pool, &mut central, None, &[], 0), StakingError::InvalidAmount);
        assert_err(
            airdrop.grant(&mut pool, &mut central, None, &[entry(0, DAY)], 0),
            StakingError::InvalidAmount,
        );
        assert_err(
            airdrop.grant(&mut pool, &mut central, None, &[entry(1, 0)], 0),
            StakingError::InvalidTimestamp,
        );
        let too_many = vec![entry(1, DAY); MAX_AIRDROP_UNLOCKS + 1];
        assert_err(
            airdrop.grant(&mut pool, &mut central, None, &too_many, 0),
            StakingError::InvalidAmount,
        );

        airdrop.grant(&mut pool, &mut central, None, &[entry(AMOUNT, 5 * DAY)], 0).unwrap();
        assert_err(
            airdrop.grant(&mut pool, &mut central, None, &[entry(AMOUNT, 5 * DAY)], DAY),
            StakingError::UnclaimedRewards,
        );
        assert_err(
            airdrop.unlock(&mut pool, &mut central, DAY),
            StakingError::UnclaimedRewards,
        );
        airdrop.claim_rewards(&mut pool, &mut central, DAY, false).unwrap();
        assert_err(
            airdrop.unlock(&mut pool, &mut central, DAY),
            StakingError::AirdropNotReady,
        );
    }

    #[test]
    fn test_revoke_forfeits_rewards() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut airdrop = airdrop(&pool, true);
        airdrop
            .grant(&mut pool, &mut central, None, &[entry(AMOUNT / 2, DAY), entry(AMOUNT / 2, 2 * DAY)], 0)
            .unwrap();

        assert_eq!(airdrop.revoke(&mut pool, &mut central, 3 * DAY).unwrap(), AMOUNT);
        assert!(airdrop.schedule.is_empty());
        assert_eq!(pool.total_rewarded_airdrops, 0);
        assert_err(
            airdrop.claim_rewards(&mut pool, &mut central, 3 * DAY, false),
            StakingError::NoClaimableRewards,
        );

        // Nothing left, only the crank runs
        assert_eq!(airdrop.revoke(&mut pool, &mut central, 4 * DAY).unwrap(), 0);
        assert_eq!(pool.current_day_index, 4);
        assert_eq!(central.current_day_index, 4);
    }

    #[test]
    fn test_rewarded_grant_requires_settled_stake() {
        let mut central = central();
        let mut pool = active_pool(&central, 40, 0);
        let mut stake_account = StakeAccount::default();
        stake_account.initialize(Pubkey::new_unique(), Pubkey::new_unique(), 0, 1);
        stake_account
            .stake(&mut pool, &mut central, AMOUNT, 0, 0)
            .unwrap();

        let mut rewarded = airdrop(&pool, true);
        assert_err(
            rewarded.grant(&mut pool, &mut central, Some(&stake_account), &[entry(AMOUNT, 5 * DAY)], 2 * DAY),
            StakingError::UnclaimedRewards,
        );

        // Unrewarded grants do not touch the stakers' rewards
        let mut unrewarded = airdrop(&pool, false);
        unrewarded
            .grant(&mut pool, &mut central, Some(&stake_account), &[entry(AMOUNT, 5 * DAY)], 2 * DAY)
            .unwrap();

        stake_account
            .claim_rewards(&mut pool, &mut central, 2 * DAY, false)
            .unwrap();
        rewarded
            .grant(&mut pool, &mut central, Some(&stake_account), &[entry(AMOUNT, 5 * DAY)], 2 * DAY)
            .unwrap();
        assert_eq!(pool.total_rewarded_airdrops, AMOUNT);
    }
}
