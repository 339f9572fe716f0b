use soroban_sdk::{contracterror, contracttype, Address, String};

/// SHT allocation moved in at ICO start; backs all LkSHT ever minted.
pub const ICO_FUNDS: i128 = 7_350_000_000_000_000_000_000_000; // 7,350,000 * 10^18

/// A fungible payment attached to a call.
#[contracttype]
#[derive(Clone)]
pub struct TokenPayment {
    pub token: Address,
    pub amount: i128,
}

/// One funding round. Claimability is derived, never stored:
/// `collected_funds >= funding_goal`.
#[contracttype]
#[derive(Clone)]
pub struct ProjectData {
    pub id: u32,
    pub name: String,
    pub symbol: String,
    pub project_address: Address, // Deployed housing-project contract
    pub funding_token: Address,   // Accepted payment asset
    pub funding_goal: i128,
    pub funding_deadline: u64,
    pub collected_funds: i128,
}

/// A locked-SHT record held by an ICO participant (or by the staking
/// ledger while the position is staked).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LockedShtAttributes {
    pub amount: i128,
    pub original_owner: Address,
}

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    Coinbase,               // Privileged actor
    SmartHousing,           // Platform hub
    Sht,                    // SHT token address, set at ICO start
    ProjectsCount,          // Sequential project ids, 1-based
    Project(u32),           // Project id -> ProjectData
    Deposit(u32, Address),  // (project, funder) -> accumulated deposit
    NextLkNonce,            // LkSHT nonce counter
    LockedSht(Address, u64), // (owner, nonce) -> LockedShtAttributes
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,          // Contract not initialized
    AlreadyInitialized = 2,      // Contract already set up
    Unauthorized = 3,            // Caller is not the coinbase
    FirstProjectInitialized = 4, // init_first_project called twice
    WrongAmount = 5,             // ICO payment is not the exact allocation
    InvalidProjectId = 6,        // Unknown project id
    FundingDeadlinePassed = 7,   // Funding attempted after the deadline
    InvalidPaymentToken = 8,     // Payment in a token the project rejects
    InsufficientPayment = 9,     // Zero or negative payment
    InvalidFundingGoal = 10,     // Goal must be positive
    InvalidDeadline = 11,        // Deadline must be in the future
    ProjectNotSuccessful = 12,   // Goal not met, tokens not claimable
    NothingToClaim = 13,         // No deposit recorded, or already claimed
    InvalidLkNonce = 14,         // No LkSHT record at (owner, nonce)
    MathOverflow = 15,           // Checked arithmetic failed
    FundingGoalExceeded = 16,    // Payment would push collected funds past the goal
}
