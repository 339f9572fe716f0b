#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

mod external;
mod rewards;
mod staking;
mod types;
mod users;

pub use types::*;

#[contract]
pub struct SmartHousingContract;

#[contractimpl]
impl SmartHousingContract {
    /// Wires the privileged coinbase actor and the funding contract.
    pub fn initialize(env: Env, coinbase: Address, project_funding: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Coinbase) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Coinbase, &coinbase);
        env.storage()
            .instance()
            .set(&DataKey::ProjectFunding, &project_funding);
        env.storage()
            .instance()
            .set(&DataKey::ShtPhase, &SetupPhase::Pending);
        Ok(())
    }

    pub fn set_up_sht(env: Env, caller: Address, payment: TokenPayment) -> Result<(), Error> {
        rewards::set_up_sht(env, caller, payment)
    }

    pub fn add_project(env: Env, caller: Address, project_address: Address) -> Result<(), Error> {
        users::add_project(env, caller, project_address)
    }

    // Referral graph

    pub fn create_ref_id_via_proxy(
        env: Env,
        caller: Address,
        user: Address,
        referrer_id: u64,
    ) -> Result<u64, Error> {
        users::create_ref_id_via_proxy(env, caller, user, referrer_id)
    }

    pub fn get_user_id(env: Env, user: Address) -> u64 {
        users::get_user_id(&env, &user)
    }

    pub fn get_user_address(env: Env, user_id: u64) -> Option<Address> {
        users::get_user_address(&env, user_id)
    }

    pub fn get_referrer(env: Env, user: Address) -> ReferrerRecord {
        users::get_referrer(&env, &user)
    }

    pub fn get_referrer_address(env: Env, user: Address) -> Option<Address> {
        users::get_referrer(&env, &user).referrer_address
    }

    pub fn get_referrals(env: Env, user: Address) -> Vec<Address> {
        users::get_referrals(&env, &user)
    }

    pub fn user_count(env: Env) -> u64 {
        users::user_count(&env)
    }

    // Staking ledger

    pub fn stake(
        env: Env,
        user: Address,
        payments: Vec<StakingPayment>,
        epochs_lock: u64,
        referrer_id: u64,
    ) -> Result<u64, Error> {
        staking::stake(env, user, payments, epochs_lock, referrer_id)
    }

    pub fn claim_rewards(
        env: Env,
        user: Address,
        stake_nonce: u64,
        referrer_id: u64,
    ) -> Result<i128, Error> {
        staking::claim_rewards(env, user, stake_nonce, referrer_id)
    }

    pub fn user_can_claim(env: Env, user: Address, nonce: u64) -> bool {
        staking::user_can_claim(&env, user, nonce)
    }

    pub fn get_stake_position(env: Env, user: Address, nonce: u64) -> Result<StakePosition, Error> {
        staking::get_stake_position(&env, user, nonce)
    }

    pub fn pending_rewards(env: Env, user: Address, nonce: u64) -> Result<i128, Error> {
        staking::pending_rewards(&env, user, nonce)
    }

    // Views

    pub fn sht_token(env: Env) -> Result<Address, Error> {
        rewards::sht_token(&env)
    }

    pub fn total_stake_weight(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalStakeWeight)
            .unwrap_or(0)
    }

    pub fn reward_per_share(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::RewardPerShare)
            .unwrap_or(0)
    }

    pub fn rewards_reserve(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::RewardsReserve)
            .unwrap_or(0)
    }

    pub fn permitted_projects(env: Env) -> Vec<Address> {
        users::permitted_projects(&env)
    }

    pub fn project_funding_address(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::ProjectFunding)
            .ok_or(Error::NotInitialized)
    }

    pub fn coinbase_address(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Coinbase)
            .ok_or(Error::NotInitialized)
    }
}
