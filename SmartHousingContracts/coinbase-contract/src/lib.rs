#![no_std]
use soroban_sdk::{contract, contractimpl, Address, Env, String};

mod external;
mod ico;
mod types;

pub use types::*;

#[contract]
pub struct CoinbaseContract;

#[contractimpl]
impl CoinbaseContract {
    /// Wires the privileged owner and the SHT token whose genesis supply
    /// this contract holds.
    pub fn initialize(env: Env, owner: Address, sht: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Owner) {
            return Err(Error::AlreadyInitialized);
        }
        env.storage().instance().set(&DataKey::Owner, &owner);
        env.storage().instance().set(&DataKey::Sht, &sht);
        env.storage()
            .instance()
            .set(&DataKey::Phase, &DistributionPhase::Pending);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn start_ico(
        env: Env,
        caller: Address,
        name: String,
        symbol: String,
        project_funding: Address,
        project_address: Address,
        funding_token: Address,
        funding_goal: i128,
        funding_deadline: u64,
    ) -> Result<u32, Error> {
        ico::start_ico(
            env,
            caller,
            name,
            symbol,
            project_funding,
            project_address,
            funding_token,
            funding_goal,
            funding_deadline,
        )
    }

    pub fn feed_smart_housing(
        env: Env,
        caller: Address,
        smart_housing: Address,
    ) -> Result<(), Error> {
        ico::feed_smart_housing(env, caller, smart_housing)
    }

    // Views

    pub fn owner(env: Env) -> Result<Address, Error> {
        ico::owner(&env)
    }

    pub fn sht_token(env: Env) -> Result<Address, Error> {
        ico::sht_token(&env)
    }

    pub fn phase(env: Env) -> DistributionPhase {
        ico::current_phase(&env)
    }
}
