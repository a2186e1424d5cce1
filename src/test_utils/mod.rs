//! Test utilities: a configurable mock address validator and fixtures.
//!
//! Only available in test builds or with the `test-utils` feature.

pub mod fixtures;

use crate::address::{AddressInfo, AddressValidator, Network, PaymentId};
use std::collections::HashMap;

/// Mock [`AddressValidator`] backed by an explicit address table.
///
/// Each registered address exists on exactly one network; lookups on any
/// other network fail, which makes the network trial order observable.
///
/// # Example
///
/// ```
/// use monero_uri::{AddressValidator, Network};
/// use monero_uri::test_utils::MockValidator;
///
/// let validator = MockValidator::new().with_standard("addr-1", Network::Mainnet);
/// assert!(validator.parse_address("addr-1", Network::Mainnet).is_some());
/// assert!(validator.parse_address("addr-1", Network::Testnet).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct MockValidator {
    entries: HashMap<String, AddressInfo>,
}

impl MockValidator {
    /// Creates a validator that rejects everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a standard address on `network`.
    pub fn with_standard(mut self, address: impl Into<String>, network: Network) -> Self {
        self.entries
            .insert(address.into(), AddressInfo::standard(network));
        self
    }

    /// Registers a subaddress on `network`.
    pub fn with_subaddress(mut self, address: impl Into<String>, network: Network) -> Self {
        self.entries
            .insert(address.into(), AddressInfo::subaddress(network));
        self
    }

    /// Registers an integrated address on `network` embedding `payment_id`.
    pub fn with_integrated(
        mut self,
        address: impl Into<String>,
        network: Network,
        payment_id: PaymentId,
    ) -> Self {
        self.entries
            .insert(address.into(), AddressInfo::integrated(network, payment_id));
        self
    }
}

impl AddressValidator for MockValidator {
    fn parse_address(&self, address: &str, network: Network) -> Option<AddressInfo> {
        self.entries
            .get(address)
            .filter(|info| info.network == network)
            .copied()
    }
}
