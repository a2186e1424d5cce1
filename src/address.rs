//! Address validation and resolution capabilities.
//!
//! The codec does not parse addresses cryptographically. Callers inject an
//! [`AddressValidator`]; the codec only asks it whether a string is a valid
//! address on a given network and whether it embeds a short payment ID.
//! Name resolution (e.g. OpenAlias) is an optional second capability used by
//! the destination materializer.

use crate::{Result, UriError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Network an address belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    /// Production network.
    Mainnet,
    /// Public test network.
    Testnet,
    /// Staging network.
    Stagenet,
    /// Local fake chain used by functional tests.
    Fakechain,
}

impl Network {
    /// Trial order used when no expected network is given: the first network
    /// that accepts an address wins.
    pub const TRIAL_ORDER: [Network; 4] = [
        Network::Mainnet,
        Network::Testnet,
        Network::Stagenet,
        Network::Fakechain,
    ];
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Stagenet => "stagenet",
            Network::Fakechain => "fakechain",
        };
        write!(f, "{}", name)
    }
}

/// Short payment identifier embedded in an integrated address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaymentId(pub [u8; 8]);

impl PaymentId {
    /// Parses a 16-character hex string.
    pub fn from_hex(text: &str) -> Result<Self> {
        let mut bytes = [0u8; 8];
        hex::decode_to_slice(text, &mut bytes)
            .map_err(|_| UriError::InvalidInteger(text.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// What a validator learned about an address string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    /// Network the address parsed on.
    pub network: Network,
    /// True for subaddresses.
    pub is_subaddress: bool,
    /// Embedded short payment ID, present only for integrated addresses.
    pub payment_id: Option<PaymentId>,
}

impl AddressInfo {
    /// Info for a standard address.
    pub fn standard(network: Network) -> Self {
        Self {
            network,
            is_subaddress: false,
            payment_id: None,
        }
    }

    /// Info for a subaddress.
    pub fn subaddress(network: Network) -> Self {
        Self {
            network,
            is_subaddress: true,
            payment_id: None,
        }
    }

    /// Info for an integrated address with the given payment ID.
    pub fn integrated(network: Network, payment_id: PaymentId) -> Self {
        Self {
            network,
            is_subaddress: false,
            payment_id: Some(payment_id),
        }
    }

    /// True when the address embeds a payment ID.
    pub fn is_integrated(&self) -> bool {
        self.payment_id.is_some()
    }
}

/// Injected capability to validate address strings.
///
/// Implementations are expected to be cheap, deterministic, and safe for
/// concurrent use; the codec may call them several times per URI.
pub trait AddressValidator {
    /// Parses `address` as an address on `network`. Returns `None` when the
    /// string is not a valid address on that network.
    fn parse_address(&self, address: &str, network: Network) -> Option<AddressInfo>;
}

impl<T: AddressValidator + ?Sized> AddressValidator for &T {
    fn parse_address(&self, address: &str, network: Network) -> Option<AddressInfo> {
        (**self).parse_address(address, network)
    }
}

/// Injected capability to resolve a human-readable name into an address.
///
/// `candidates` carries any alternative records already known for the name
/// and `confirm` asks the implementation to require user confirmation when
/// the resolution channel is untrusted. Returns the chosen address string.
pub trait AddressResolver {
    /// Resolves `name` into a concrete address string, or `None` when the
    /// name cannot be resolved.
    fn resolve(&self, name: &str, candidates: &[String], confirm: bool) -> Option<String>;
}

impl<F> AddressResolver for F
where
    F: Fn(&str, &[String], bool) -> Option<String>,
{
    fn resolve(&self, name: &str, candidates: &[String], confirm: bool) -> Option<String> {
        self(name, candidates, confirm)
    }
}

/// Validates against the expected network, or against every network in
/// [`Network::TRIAL_ORDER`] when none is given.
pub(crate) fn validate<V: AddressValidator + ?Sized>(
    validator: &V,
    address: &str,
    expected: Option<Network>,
) -> Option<AddressInfo> {
    match expected {
        Some(network) => validator.parse_address(address, network),
        None => Network::TRIAL_ORDER
            .iter()
            .find_map(|network| validator.parse_address(address, *network)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockValidator;

    #[test]
    fn payment_id_hex_round_trip() {
        let id = PaymentId::from_hex("f612cac0b6cb1cda").unwrap();
        assert_eq!(id.to_string(), "f612cac0b6cb1cda");
        assert!(PaymentId::from_hex("12345").is_err());
        assert!(PaymentId::from_hex("zzzzzzzzzzzzzzzz").is_err());
    }

    #[test]
    fn any_network_walks_the_trial_order() {
        let validator = MockValidator::new().with_standard("stage-addr", Network::Stagenet);

        let info = validate(&validator, "stage-addr", None).unwrap();
        assert_eq!(info.network, Network::Stagenet);
        assert!(validate(&validator, "stage-addr", Some(Network::Mainnet)).is_none());
    }

    #[test]
    fn expected_network_is_enforced() {
        let validator = MockValidator::new().with_standard("addr", Network::Testnet);
        assert!(validate(&validator, "addr", Some(Network::Testnet)).is_some());
        assert!(validate(&validator, "addr", Some(Network::Mainnet)).is_none());
        assert_eq!(
            validate(&validator, "addr", None).unwrap().network,
            Network::Testnet
        );
    }

    #[test]
    fn closures_act_as_resolvers() {
        let resolver = |name: &str, _: &[String], _: bool| {
            (name == "donate.example").then(|| "resolved-address".to_string())
        };
        assert_eq!(
            resolver.resolve("donate.example", &[], true).as_deref(),
            Some("resolved-address")
        );
        assert!(resolver.resolve("unknown.example", &[], true).is_none());
    }
}
