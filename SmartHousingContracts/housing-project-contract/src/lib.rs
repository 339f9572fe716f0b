#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

mod external;
mod rent;
mod sft;
mod types;

pub use types::*;

#[contract]
pub struct HousingProjectContract;

#[contractimpl]
impl HousingProjectContract {
    /// Wires the contract to its collaborators. The funding contract is the
    /// sole minter; the SmartHousing hub answers referral lookups.
    pub fn initialize(
        env: Env,
        project_funding: Address,
        smart_housing: Address,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::ProjectFunding) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage()
            .instance()
            .set(&DataKey::ProjectFunding, &project_funding);
        env.storage()
            .instance()
            .set(&DataKey::SmartHousing, &smart_housing);
        Ok(())
    }

    /// One-shot token configuration, pushed in by the funding contract once
    /// the funding round resolves.
    pub fn set_token_details(
        env: Env,
        name: String,
        symbol: String,
        amount_raised: i128,
        sht_token: Address,
    ) -> Result<(), Error> {
        let project_funding: Address = env
            .storage()
            .instance()
            .get(&DataKey::ProjectFunding)
            .ok_or(Error::NotInitialized)?;
        project_funding.require_auth();

        if env.storage().instance().has(&DataKey::Details) {
            return Err(Error::DetailsAlreadySet);
        }
        if amount_raised <= 0 {
            return Err(Error::InsufficientDeposit);
        }
        env.storage().instance().set(
            &DataKey::Details,
            &ProjectDetails {
                name,
                symbol,
                amount_raised,
                sht_token,
            },
        );
        Ok(())
    }

    pub fn mint_sft(env: Env, depositor: Address, deposit_amount: i128) -> Result<u64, Error> {
        sft::mint_sft(env, depositor, deposit_amount)
    }

    pub fn transfer_sft(env: Env, from: Address, to: Address, nonce: u64) -> Result<u64, Error> {
        sft::transfer_sft(env, from, to, nonce)
    }

    pub fn receive_rent(env: Env, tenant: Address, payment: TokenPayment) -> Result<(), Error> {
        rent::receive_rent(env, tenant, payment)
    }

    pub fn claim_rent_reward(env: Env, caller: Address, nonce: u64) -> Result<u64, Error> {
        rent::claim_rent_reward(env, caller, nonce)
    }

    pub fn rent_claimable(env: Env, owner: Address, nonce: u64) -> Result<i128, Error> {
        rent::rent_claimable(env, owner, nonce)
    }

    pub fn balance_of(env: Env, owner: Address, nonce: u64) -> i128 {
        sft::balance_of(env, owner, nonce)
    }

    pub fn get_user_sft(env: Env, owner: Address, nonce: u64) -> Result<HousingAttributes, Error> {
        sft::get_user_sft(env, owner, nonce)
    }

    pub fn active_nonces(env: Env, owner: Address) -> Vec<u64> {
        sft::active_nonces(env, owner)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
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

    pub fn facility_funds(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::FacilityFunds)
            .unwrap_or(0)
    }

    pub fn total_rent_received(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalRentReceived)
            .unwrap_or(0)
    }

    pub fn project_details(env: Env) -> Result<ProjectDetails, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Details)
            .ok_or(Error::DetailsNotSet)
    }
}

#[cfg(test)]
mod test;
