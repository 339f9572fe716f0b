use soroban_sdk::{contractclient, contracttype, Address};

/// Attributes of a housing project SFT position, mirrored from the
/// project contract's type (field-compatible for cross-contract calls).
#[contracttype]
#[derive(Clone)]
pub struct HousingAttributes {
    pub rewards_per_share: i128,
    pub token_weight: i128,
    pub original_owner: Address,
}

/// An LkSHT record, mirrored from the funding contract's type.
#[contracttype]
#[derive(Clone)]
pub struct LockedShtAttributes {
    pub amount: i128,
    pub original_owner: Address,
}

/// Housing project operations used by the staking ledger.
#[allow(dead_code)]
#[contractclient(name = "HousingProjectClient")]
pub trait HousingProject {
    /// Reads a live position's attributes.
    fn get_user_sft(owner: Address, nonce: u64) -> HousingAttributes;

    /// Moves a position between holders; returns the new nonce.
    fn transfer_sft(from: Address, to: Address, nonce: u64) -> u64;
}

/// Funding contract operations used by the staking ledger for LkSHT
/// custody and redemption.
#[allow(dead_code)]
#[contractclient(name = "ProjectFundingClient")]
pub trait ProjectFunding {
    fn locked_sht(owner: Address, nonce: u64) -> LockedShtAttributes;

    fn transfer_locked_sht(from: Address, to: Address, nonce: u64) -> u64;

    /// Burns the holder's record and releases the backing SHT to them.
    fn redeem_locked_sht(owner: Address, nonce: u64) -> i128;
}
