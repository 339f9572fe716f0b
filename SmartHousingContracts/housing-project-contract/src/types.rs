use soroban_sdk::{contracterror, contracttype, Address, String};

/// Units of ownership a fully funded project is divided into.
pub const MAX_SUPPLY: i128 = 1_000_000;

/// Fixed-point scale for the rewards-per-share accumulator.
pub const RPS_SCALE: i128 = 1_000_000_000_000_000_000;

/// Rent split: 75% to the rewards reserve, 7% to the facility fund,
/// the remainder (18% plus integer dust) is burned.
pub const RENT_REWARD_PERCENT: i128 = 75;
pub const RENT_FACILITY_PERCENT: i128 = 7;

/// Referral carve-out taken from each rent payout, in basis points.
pub const REFERRAL_BONUS_BPS: i128 = 30;
pub const BPS_DENOMINATOR: i128 = 10_000;

/// A fungible payment attached to a call.
#[contracttype]
#[derive(Clone)]
pub struct TokenPayment {
    pub token: Address,
    pub amount: i128,
}

/// Attributes of one SFT position. Immutable once written; a claim retires
/// the nonce and appends a fresh one with an updated snapshot.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HousingAttributes {
    pub rewards_per_share: i128, // Accumulator snapshot at mint/last claim
    pub token_weight: i128,      // Share count, fixed at mint
    pub original_owner: Address, // First holder, survives transfers
}

/// Token details pushed in by the funding contract once funding resolves.
#[contracttype]
#[derive(Clone)]
pub struct ProjectDetails {
    pub name: String,
    pub symbol: String,
    pub amount_raised: i128,
    pub sht_token: Address,
}

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    ProjectFunding,         // Funding contract, sole minter
    SmartHousing,           // Platform hub, referral lookups
    Details,                // ProjectDetails, set once
    NextSftNonce,           // Global nonce counter
    Sft(Address, u64),      // (owner, nonce) -> HousingAttributes
    ActiveNonces(Address),  // Owner -> live nonces
    TotalSupply,            // Sum of live token weights
    RewardPerShare,         // Scaled cumulative reward per share unit
    RewardsReserve,         // Undrawn rent rewards held for holders
    FacilityFunds,          // Maintenance allocation
    TotalRentReceived,      // Lifetime rent inflow
    UndistributedRewards,   // Rent reward share held while supply is zero
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,      // Contract not initialized
    AlreadyInitialized = 2,  // Contract already set up
    Unauthorized = 3,        // Caller is not the funding contract
    DetailsAlreadySet = 4,   // Token details already configured
    DetailsNotSet = 5,       // Token details missing
    InvalidPaymentToken = 6, // Rent paid in the wrong token
    InsufficientRent = 7,    // Zero or negative rent amount
    InsufficientDeposit = 8, // Deposit too small to mint a share unit
    MaxSupplyExceeded = 9,   // Mint would overflow the share supply
    InvalidSftNonce = 10,    // No live position at (owner, nonce)
    MathOverflow = 11,       // Checked arithmetic failed
}
