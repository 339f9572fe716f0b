use soroban_sdk::{contractclient, Address, String};

/// SmartHousing hub operations invoked by this contract.
#[allow(dead_code)]
#[contractclient(name = "SmartHousingClient")]
pub trait SmartHousingHub {
    /// Registers `user` with the referral graph on first interaction.
    /// `caller` must be a permitted proxy; returns the user's id.
    fn create_ref_id_via_proxy(caller: Address, user: Address, referrer_id: u64) -> u64;

    /// Registers a funded project with the ecosystem.
    fn add_project(caller: Address, project_address: Address);
}

/// Housing project operations invoked by this contract.
#[allow(dead_code)]
#[contractclient(name = "HousingProjectClient")]
pub trait HousingProject {
    /// Converts a funding deposit into an SFT position for `depositor`.
    fn mint_sft(depositor: Address, deposit_amount: i128) -> u64;

    /// One-shot token configuration after the funding round resolves.
    fn set_token_details(name: String, symbol: String, amount_raised: i128, sht_token: Address);
}
