use soroban_sdk::{contractclient, contracttype, Address, String};

/// A fungible payment attached to a call, mirrored from the collaborator
/// contracts' type.
#[contracttype]
#[derive(Clone)]
pub struct TokenPayment {
    pub token: Address,
    pub amount: i128,
}

/// Funding contract operations the coinbase drives.
#[allow(dead_code)]
#[contractclient(name = "ProjectFundingClient")]
pub trait ProjectFunding {
    /// Registers the ICO round; the payment is the full ICO allocation.
    #[allow(clippy::too_many_arguments)]
    fn init_first_project(
        payment: TokenPayment,
        name: String,
        symbol: String,
        project_address: Address,
        funding_token: Address,
        funding_goal: i128,
        funding_deadline: u64,
    ) -> u32;
}

/// SmartHousing hub operations the coinbase drives.
#[allow(dead_code)]
#[contractclient(name = "SmartHousingClient")]
pub trait SmartHousingHub {
    /// Hands over the ecosystem allocation that backs staking rewards.
    fn set_up_sht(caller: Address, payment: TokenPayment);
}
