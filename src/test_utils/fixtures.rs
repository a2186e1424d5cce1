//! Address fixtures shared by the test suite.

use super::MockValidator;
use crate::address::{Network, PaymentId};

/// Standard testnet address.
pub const STANDARD_ADDRESS: &str =
    "9tTLtauaEKSj7xoVXytVH32R1pLZBk4VV4mZFGEh4wkXhDWqw1soPyf3fGixf1kni31VznEZkWNEza9d5TvjWwq5PaohYHC";

/// Testnet subaddress.
pub const SUBADDRESS: &str =
    "BZ9V9tb4SeHJWjyt8iuUFthv5vk91GZRJ9q27Si9qKVDEx8M4Wg4oyUAfyDc2VZtdnt471mYHRGd1Nn4ZmVv9K5N2bU8bFB";

/// Testnet integrated address embedding [`INTEGRATED_PAYMENT_ID`].
pub const INTEGRATED_ADDRESS: &str =
    "A4A1uPj4qaxj7xoVXytVH32R1pLZBk4VV4mZFGEh4wkXhDWqw1soPyf3fGixf1kni31VznEZkWNEza9d5TvjWwq5acaPMJfMbn3ReTsBpp";

/// A second testnet integrated address, with a different payment ID.
pub const INTEGRATED_ADDRESS_2: &str =
    "48UktANa1g71SkdXhHJ72kp4GZf2tvKwBzXjRSe5SZbFxjrjDwpT7obRksYzYpy5KN5wUGagY7q2aqFUDDhYSnA5Z6J82B5XZQGkDox9a";

/// Standard mainnet address.
pub const MAINNET_ADDRESS: &str =
    "44AFFq5kSiGBoZ4NMDwYtN18obc8AemS33DBLWs3H7otXft3XjrpDtQGv7SqSsaBYBb98uNbr2VBBEt7f2wfn3RVGQBEP3A";

/// Payment ID embedded in [`INTEGRATED_ADDRESS`].
pub const INTEGRATED_PAYMENT_ID: &str = "f612cac0b6cb1cda";

/// Payment ID embedded in [`INTEGRATED_ADDRESS_2`].
pub const INTEGRATED_PAYMENT_ID_2: &str = "8ca523f5e9506fed";

fn payment_id(hex: &str) -> PaymentId {
    // fixture hex is known-good
    PaymentId::from_hex(hex).unwrap()
}

/// Validator recognizing every testnet fixture plus the mainnet address.
pub fn testnet_validator() -> MockValidator {
    MockValidator::new()
        .with_standard(STANDARD_ADDRESS, Network::Testnet)
        .with_subaddress(SUBADDRESS, Network::Testnet)
        .with_integrated(
            INTEGRATED_ADDRESS,
            Network::Testnet,
            payment_id(INTEGRATED_PAYMENT_ID),
        )
        .with_integrated(
            INTEGRATED_ADDRESS_2,
            Network::Testnet,
            payment_id(INTEGRATED_PAYMENT_ID_2),
        )
        .with_standard(MAINNET_ADDRESS, Network::Mainnet)
}
