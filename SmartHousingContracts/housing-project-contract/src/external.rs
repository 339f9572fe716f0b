use soroban_sdk::{contractclient, Address};

/// Interface of the SmartHousing hub consumed by this contract.
///
/// Only the referral lookup is needed here: rent claims route a small
/// carve-out to the claimer's referrer when one exists.
#[allow(dead_code)]
#[contractclient(name = "SmartHousingClient")]
pub trait SmartHousingHub {
    /// Returns the referrer's address for `user`, or `None` when the user
    /// is unknown or has no referrer bound.
    fn get_referrer_address(user: Address) -> Option<Address>;
}
