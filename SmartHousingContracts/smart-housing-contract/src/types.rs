use soroban_sdk::{contracterror, contracttype, Address, Vec};

/// SHT allocation dispatched once from the coinbase; released to stakers
/// linearly at `REWARDS_PER_EPOCH` until exhausted.
pub const ECOSYSTEM_DISTRIBUTION_FUNDS: i128 = 13_650_000_000_000_000_000_000_000; // 13,650,000 * 10^18
pub const REWARD_EMISSION_EPOCHS: u64 = 2_000;
pub const REWARDS_PER_EPOCH: i128 = ECOSYSTEM_DISTRIBUTION_FUNDS / REWARD_EMISSION_EPOCHS as i128;

/// One epoch of lock time, in seconds.
pub const EPOCH_LENGTH: u64 = 86_400;
pub const MIN_EPOCHS_LOCK: u64 = 10;
pub const MAX_EPOCHS_LOCK: u64 = 1_000;

/// Fixed-point scale for the staking rewards-per-share accumulator.
pub const RPS_SCALE: i128 = 1_000_000_000_000_000_000;

/// Referral carve-out taken from each staking payout, in basis points.
pub const REFERRAL_BONUS_BPS: i128 = 30;
pub const BPS_DENOMINATOR: i128 = 10_000;

/// A fungible payment attached to a call.
#[contracttype]
#[derive(Clone)]
pub struct TokenPayment {
    pub token: Address,
    pub amount: i128,
}

/// Asset classes the staking ledger accepts, each with its own
/// normalization rule to the common weight unit.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AssetKind {
    Sht,        // Base token, weight = amount
    LockedSht,  // LkSHT record in the funding contract, weight = face value
    ProjectSft, // Housing project position, weight = token weight
}

/// One deposited asset in a stake call. `token` is the asset's contract
/// (the funding contract for LkSHT, the project contract for SFTs);
/// `nonce` identifies the semi-fungible record and is 0 for SHT.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakingPayment {
    pub kind: AssetKind,
    pub token: Address,
    pub nonce: u64,
    pub amount: i128,
}

/// A locked stake. `deposits` records the assets held in custody under
/// their custody nonces so they can be handed back at claim time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakePosition {
    pub token_weight: i128,
    pub epochs_locked: u64,
    pub unlock_timestamp: u64,
    pub rewards_per_share: i128, // Accumulator snapshot at stake time
    pub claimed: bool,
    pub deposits: Vec<StakingPayment>,
}

/// Referral bookkeeping for one user. Id 0 means "no referrer".
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReferrerRecord {
    pub referrer_id: u64,
    pub referrer_address: Option<Address>,
}

/// One-shot SHT configuration guard.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SetupPhase {
    Pending,
    Configured,
}

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    Coinbase,                  // Privileged actor
    ProjectFunding,            // Funding contract, referral proxy
    Sht,                       // Base token address, set by set_up_sht
    ShtPhase,                  // SetupPhase state machine
    PermittedProjects,         // Ecosystem project contracts
    UserCount,                 // Sequential user ids, 1-based
    UserId(Address),           // Address -> id
    UserAddress(u64),          // Id -> address
    Referrer(Address),         // User -> ReferrerRecord
    Referrals(Address),        // Referrer -> referred addresses
    NextStakeNonce,            // Stake nonce counter
    StakePosition(Address, u64), // (owner, nonce) -> StakePosition
    TotalStakeWeight,          // Sum of unclaimed stake weights
    RewardPerShare,            // Scaled cumulative reward per weight unit
    RewardsReserve,            // SHT custody backing staking payouts
    EmittedRewards,            // Allocation already released to the pool
    LastEmissionEpoch,         // Epoch of the last emission run
    UndistributedRewards,      // Emission held while stake weight is zero
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,      // Contract not initialized
    AlreadyInitialized = 2,  // Contract already set up
    Unauthorized = 3,        // Caller is not a permitted actor
    ShtAlreadySet = 4,       // set_up_sht called twice
    ShtNotSet = 5,           // Staking before SHT configuration
    WrongAmount = 6,         // Dispatch payment is not the allocation
    InvalidReferrerId = 7,   // Unknown referrer id
    SelfReferral = 8,        // User referring themselves
    ProjectAlreadyAdded = 9, // Project already in the ecosystem
    NoPayments = 10,         // Stake with an empty payment list
    InvalidLockPeriod = 11,  // epochs_lock outside the allowed range
    InvalidPaymentToken = 12, // Payment token does not match its kind
    InsufficientPayment = 13, // Zero or negative amount/weight
    UnknownProject = 14,     // SFT from a contract outside the ecosystem
    StakeNotFound = 15,      // No stake at (owner, nonce)
    LockNotExpired = 16,     // Claim before the unlock timestamp
    AlreadyClaimed = 17,     // Stake already paid out
    MathOverflow = 18,       // Checked arithmetic failed
}
