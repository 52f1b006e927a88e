use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::state::{CentralState, StakePool};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BondStatus {
    #[default]
    Inactive,
    Active,
}

/// Sale and vesting terms chosen by the seller creating a bond.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BondTerms {
    pub total_amount_sold: u64,
    pub total_quote_amount: u64,
    pub quote_mint: Pubkey,
    pub seller_token_account: Pubkey,
    pub unlock_start_date: i64,
    pub unlock_period: i64,
    pub unlock_amount: u64,
}

#[account]
#[derive(Default)]
pub struct BondAccount {
    /// Buyer of the bond
    pub owner: Pubkey,
    /// Seller that created the bond
    pub seller: Pubkey,
    pub stake_pool: Pubkey,
    pub status: BondStatus,

    pub total_amount_sold: u64,
    /// Bonded tokens not vested yet, counted in the pool's stake
    pub total_staked: u64,
    pub total_quote_amount: u64,
    pub quote_mint: Pubkey,
    pub seller_token_account: Pubkey,

    pub unlock_start_date: i64,
    pub unlock_period: i64,
    pub unlock_amount: u64,
    pub last_unlock_time: i64,
    pub total_unlocked_amount: u64,

    pub last_settled_day: u64,

    pub sellers: Vec<Pubkey>,

    pub bump: u8,
}

impl BondAccount {
    pub const LEN: usize = 8
        + (32 * 5)
        + 1
        + (8 * 3)
        + (8 * 5)
        + 8
        + (4 + 32 * MAX_BOND_SELLERS)
        + 1;

    pub fn create(
        &mut self,
        central: &CentralState,
        owner: Pubkey,
        seller: Pubkey,
        stake_pool: Pubkey,
        terms: BondTerms,
        bump: u8,
    ) -> Result<()> {
        require!(
            central.is_authorized_seller(&seller),
            StakingError::UnauthorizedSeller
        );
        require!(
            terms.unlock_period > 0 && terms.total_amount_sold > 0 && terms.unlock_amount > 0,
            StakingError::InvalidVestingSchedule
        );

        self.owner = owner;
        self.seller = seller;
        self.stake_pool = stake_pool;
        self.status = BondStatus::Inactive;
        self.total_amount_sold = terms.total_amount_sold;
        self.total_staked = 0;
        self.total_quote_amount = terms.total_quote_amount;
        self.quote_mint = terms.quote_mint;
        self.seller_token_account = terms.seller_token_account;
        self.unlock_start_date = terms.unlock_start_date;
        self.unlock_period = terms.unlock_period;
        self.unlock_amount = terms.unlock_amount;
        self.last_unlock_time = terms.unlock_start_date;
        self.total_unlocked_amount = 0;
        self.last_settled_day = 0;
        self.sellers = vec![seller];
        self.bump = bump;
        Ok(())
    }

    pub fn sign(&mut self, central: &CentralState, seller: Pubkey) -> Result<()> {
        require!(
            central.is_authorized_seller(&seller),
            StakingError::UnauthorizedSeller
        );
        require!(
            self.status == BondStatus::Inactive,
            StakingError::BondAlreadyActive
        );
        require!(
            !self.sellers.contains(&seller),
            StakingError::SellerAlreadySigned
        );
        require!(
            self.sellers.len() < central.bond_signer_threshold as usize,
            StakingError::BondFullySigned
        );
        self.sellers.push(seller);
        Ok(())
    }

    /// Turns a fully signed bond into a staked position of its pool.
    pub fn activate(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
    ) -> Result<()> {
        require!(
            self.status == BondStatus::Inactive,
            StakingError::BondAlreadyActive
        );
        require!(
            self.sellers.len() >= central.bond_signer_threshold as usize,
            StakingError::NotEnoughSellers
        );
        pool.crank(central, now)?;
        pool.assert_accepts_inflows()?;

        pool.add_staked(central, self.total_amount_sold)?;
        self.total_staked = self.total_amount_sold;
        self.last_settled_day = pool.current_day_index;
        self.status = BondStatus::Active;
        Ok(())
    }

    pub fn claim_rewards(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
        allow_zero_rewards: bool,
    ) -> Result<u64> {
        require!(
            self.status == BondStatus::Active,
            StakingError::BondNotActive
        );
        pool.crank(central, now)?;
        pool.settle(
            &mut self.last_settled_day,
            self.total_staked,
            allow_zero_rewards,
        )
    }

    /// Releases every whole vesting period elapsed since the last unlock.
    pub fn unlock(
        &mut self,
        pool: &mut StakePool,
        central: &mut CentralState,
        now: i64,
    ) -> Result<u64> {
        require!(
            self.status == BondStatus::Active,
            StakingError::BondNotActive
        );
        pool.crank(central, now)?;
        require!(self.total_staked > 0, StakingError::BondFullyUnlocked);
        pool.assert_settled(self.last_settled_day, self.total_staked)?;
        require!(now >= self.unlock_start_date, StakingError::TokensLocked);

        let periods = now
            .checked_sub(self.last_unlock_time)
            .ok_or(StakingError::MathOverflow)?
            / self.unlock_period;
        require!(periods >= 1, StakingError::TokensLocked);

        let amount = (periods as u64)
            .saturating_mul(self.unlock_amount)
            .min(self.total_staked);

        pool.remove_staked(central, amount)?;
        self.total_staked -= amount;
        self.total_unlocked_amount = self
            .total_unlocked_amount
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.last_unlock_time = self
            .last_unlock_time
            .checked_add(
                periods
                    .checked_mul(self.unlock_period)
                    .ok_or(StakingError::MathOverflow)?,
            )
            .ok_or(StakingError::MathOverflow)?;
        self.last_settled_day = pool.current_day_index;
        Ok(amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{active_pool, assert_err, central, DAY, INFLATION};

    const SOLD: u64 = 10_000_000_000;

    fn terms() -> BondTerms {
        BondTerms {
            total_amount_sold: SOLD,
            total_quote_amount: 1_000_000,
            quote_mint: Pubkey::new_unique(),
            seller_token_account: Pubkey::new_unique(),
            unlock_start_date: 10 * DAY,
            unlock_period: DAY,
            unlock_amount: SOLD / 4,
        }
    }

    fn sellers(central: &mut CentralState, threshold: u8) -> Vec<Pubkey> {
        let sellers: Vec<Pubkey> = (0..3).map(|_| Pubkey::new_unique()).collect();
        central.set_bond_sellers(sellers.clone(), threshold).unwrap();
        sellers
    }

    #[test]
    fn test_signatures() {
        let mut central = central();
        let sellers = sellers(&mut central, 2);
        let mut bond = BondAccount::default();

        assert_err(
            bond.create(&central, Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique(), terms(), 1),
            StakingError::UnauthorizedSeller,
        );
        let mut invalid = terms();
        invalid.unlock_period = 0;
        assert_err(
            bond.create(&central, Pubkey::new_unique(), sellers[0], Pubkey::new_unique(), invalid, 1),
            StakingError::InvalidVestingSchedule,
        );

        bond.create(&central, Pubkey::new_unique(), sellers[0], Pubkey::new_unique(), terms(), 1)
            .unwrap();
        assert_err(bond.sign(&central, sellers[0]), StakingError::SellerAlreadySigned);
        assert_err(bond.sign(&central, Pubkey::new_unique()), StakingError::UnauthorizedSeller);
        bond.sign(&central, sellers[1]).unwrap();
        assert_err(bond.sign(&central, sellers[2]), StakingError::BondFullySigned);
    }

    #[test]
    fn test_activation_requires_threshold() {
        let mut central = central();
        let sellers = sellers(&mut central, 2);
        let mut pool = active_pool(&central, 40, 0);
        let mut bond = BondAccount::default();
        bond.create(&central, Pubkey::new_unique(), sellers[0], Pubkey::new_unique(), terms(), 1)
            .unwrap();

        assert_err(bond.activate(&mut pool, &mut central, 0), StakingError::NotEnoughSellers);
        assert_err(bond.claim_rewards(&mut pool, &mut central, 0, true), StakingError::BondNotActive);

        bond.sign(&central, sellers[1]).unwrap();
        bond.activate(&mut pool, &mut central, 0).unwrap();
        assert_eq!(bond.total_staked, SOLD);
        assert_eq!(pool.total_staked, SOLD);
        assert_eq!(central.total_staked, SOLD);
        assert_err(bond.activate(&mut pool, &mut central, 0), StakingError::BondAlreadyActive);
    }

    #[test]
    fn test_vesting() {
        let mut central = central();
        let sellers = sellers(&mut central, 1);
        let mut pool = active_pool(&central, 40, 0);
        let mut bond = BondAccount::default();
        bond.create(&central, Pubkey::new_unique(), sellers[0], Pubkey::new_unique(), terms(), 1)
            .unwrap();
        bond.activate(&mut pool, &mut central, 0).unwrap();

        // Rewards accrue like a stake account
        let reward = bond.claim_rewards(&mut pool, &mut central, DAY, false).unwrap();
        assert_eq!(reward, INFLATION * 40 / 100);

        assert_err(bond.unlock(&mut pool, &mut central, DAY), StakingError::TokensLocked);
        assert_err(
            bond.unlock(&mut pool, &mut central, 11 * DAY),
            StakingError::UnclaimedRewards,
        );

        bond.claim_rewards(&mut pool, &mut central, 11 * DAY, false).unwrap();
        assert_eq!(bond.unlock(&mut pool, &mut central, 11 * DAY).unwrap(), SOLD / 4);
        assert_err(
            bond.unlock(&mut pool, &mut central, 11 * DAY + 1),
            StakingError::TokensLocked,
        );

        // Two more periods at once, then the remainder is capped
        bond.claim_rewards(&mut pool, &mut central, 13 * DAY, false).unwrap();
        assert_eq!(bond.unlock(&mut pool, &mut central, 13 * DAY).unwrap(), SOLD / 2);

        bond.claim_rewards(&mut pool, &mut central, 20 * DAY, false).unwrap();
        assert_eq!(bond.unlock(&mut pool, &mut central, 20 * DAY).unwrap(), SOLD / 4);
        assert_eq!(bond.total_unlocked_amount, SOLD);
        assert_eq!(pool.total_staked, 0);
        assert_eq!(central.total_staked, 0);

        assert_err(
            bond.unlock(&mut pool, &mut central, 30 * DAY),
            StakingError::BondFullyUnlocked,
        );
    }
}
