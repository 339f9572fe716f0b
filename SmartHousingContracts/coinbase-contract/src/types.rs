use soroban_sdk::{contracterror, contracttype};

/// SHT genesis allocations, fixed at 35% / 65% of the 21M supply. The
/// coinbase holds both until the lifecycle calls move them out.
pub const ICO_FUNDS: i128 = 7_350_000_000_000_000_000_000_000; // 7,350,000 * 10^18
pub const ECOSYSTEM_DISTRIBUTION_FUNDS: i128 = 13_650_000_000_000_000_000_000_000; // 13,650,000 * 10^18

/// Lifecycle of the genesis supply. Each step runs exactly once, in order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DistributionPhase {
    Pending,
    IcoStarted,
    Dispatched,
}

/// Storage keys for contract data
#[contracttype]
pub enum DataKey {
    Owner, // Privileged operator
    Sht,   // Base token address
    Phase, // DistributionPhase state machine
}

/// Contract error types
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,    // Contract not initialized
    AlreadyInitialized = 2, // Contract already set up
    Unauthorized = 3,      // Caller is not the owner
    IcoAlreadyStarted = 4, // start_ico called twice
    IcoNotStarted = 5,     // Dispatch before the ICO round exists
    AlreadyDispatched = 6, // feed_smart_housing called twice
}
