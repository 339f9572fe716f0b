#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, String};

mod external;
mod funding;
mod locked_sht;
mod projects;
mod types;

pub use types::*;

#[contract]
pub struct ProjectFundingContract;

#[contractimpl]
impl ProjectFundingContract {
    /// Wires the privileged coinbase actor and the SmartHousing hub.
    pub fn initialize(env: Env, coinbase: Address, smart_housing: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Coinbase) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Coinbase, &coinbase);
        env.storage()
            .instance()
            .set(&DataKey::SmartHousing, &smart_housing);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn init_first_project(
        env: Env,
        payment: TokenPayment,
        name: String,
        symbol: String,
        project_address: Address,
        funding_token: Address,
        funding_goal: i128,
        funding_deadline: u64,
    ) -> Result<u32, Error> {
        projects::init_first_project(
            env,
            payment,
            name,
            symbol,
            project_address,
            funding_token,
            funding_goal,
            funding_deadline,
        )
    }

    pub fn deploy_project(
        env: Env,
        name: String,
        symbol: String,
        project_address: Address,
        funding_token: Address,
        funding_goal: i128,
        funding_deadline: u64,
    ) -> Result<u32, Error> {
        projects::deploy_project(
            env,
            name,
            symbol,
            project_address,
            funding_token,
            funding_goal,
            funding_deadline,
        )
    }

    pub fn fund_project(
        env: Env,
        funder: Address,
        payment: TokenPayment,
        project_id: u32,
        referrer_id: u64,
    ) -> Result<(), Error> {
        funding::fund_project(env, funder, payment, project_id, referrer_id)
    }

    pub fn claim_project_tokens(env: Env, claimer: Address, project_id: u32) -> Result<u64, Error> {
        funding::claim_project_tokens(env, claimer, project_id)
    }

    pub fn add_project_to_ecosystem(env: Env, project_id: u32) -> Result<(), Error> {
        projects::add_project_to_ecosystem(env, project_id)
    }

    pub fn set_project_token(env: Env, project_id: u32) -> Result<(), Error> {
        projects::set_project_token(env, project_id)
    }

    pub fn transfer_locked_sht(
        env: Env,
        from: Address,
        to: Address,
        nonce: u64,
    ) -> Result<u64, Error> {
        locked_sht::transfer_locked_sht(env, from, to, nonce)
    }

    pub fn redeem_locked_sht(env: Env, owner: Address, nonce: u64) -> Result<i128, Error> {
        locked_sht::redeem_locked_sht(env, owner, nonce)
    }

    // Views

    pub fn get_project_data(env: Env, project_id: u32) -> Result<ProjectData, Error> {
        projects::get_project(&env, project_id)
    }

    pub fn is_tokens_claimable(env: Env, project_id: u32) -> Result<bool, Error> {
        let project = projects::get_project(&env, project_id)?;
        Ok(projects::is_tokens_claimable(&project))
    }

    pub fn projects_count(env: Env) -> u32 {
        projects::projects_count(&env)
    }

    pub fn user_deposit(env: Env, project_id: u32, user: Address) -> i128 {
        funding::user_deposit(&env, project_id, user)
    }

    pub fn locked_sht(env: Env, owner: Address, nonce: u64) -> Result<LockedShtAttributes, Error> {
        locked_sht::locked_sht(&env, owner, nonce)
    }

    pub fn coinbase(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Coinbase)
            .ok_or(Error::NotInitialized)
    }
}
