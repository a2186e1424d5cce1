//! Translation of parsed payments into network-facing destinations.
//!
//! The materializer narrows every amount to the native 64-bit atomic-unit
//! width, re-validates (or resolves) every address, and reconciles the short
//! payment IDs embedded in integrated addresses: one payment carries at most
//! one payment ID, shared by every integrated address in it.

use crate::address::{validate, AddressInfo, AddressResolver, AddressValidator, Network, PaymentId};
use crate::currency::BASE_CURRENCY;
use crate::uri::UriCodec;
use crate::{Result, UriError};
use serde::{Deserialize, Serialize};

/// One transaction output to be funded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Validator output for the resolved address.
    pub info: AddressInfo,
    /// The address text as it appeared in the URI (before resolution).
    pub address: String,
    /// Amount in atomic units.
    pub amount: u64,
    /// True when the destination is a subaddress.
    pub is_subaddress: bool,
    /// True when the destination is an integrated address.
    pub is_integrated: bool,
}

/// Materialized payment: destinations plus payment-wide metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPayment {
    /// One destination per recipient, in URI order.
    pub destinations: Vec<Destination>,
    /// The shared short payment ID, when any destination is integrated.
    pub payment_id: Option<PaymentId>,
    /// Decoded `tx_description`, when present.
    pub description: Option<String>,
    /// Raw unrecognized `key=value` tokens, in encounter order.
    pub unrecognized: Vec<String>,
}

impl<V: AddressValidator> UriCodec<V> {
    /// Parses a URI and materializes it into transaction destinations.
    ///
    /// Only XMR amounts can be materialized; any other currency is a hard
    /// failure. When `resolver` is given, recipient strings that do not
    /// validate directly are handed to it (e.g. for OpenAlias names) and the
    /// resolved address is validated instead.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, uri, resolver), fields(uri_len = uri.len()))
    )]
    pub fn parse_to_destinations(
        &self,
        uri: &str,
        network: Option<Network>,
        resolver: Option<&dyn AddressResolver>,
    ) -> Result<ResolvedPayment> {
        let payment = self.parse(uri, network)?;

        for recipient in &payment.recipients {
            if !recipient.amount.is_zero() && recipient.amount.currency != BASE_CURRENCY {
                return Err(UriError::DestinationCurrency(
                    recipient.amount.currency.clone(),
                ));
            }
        }

        let mut payment_id: Option<PaymentId> = None;
        let mut destinations = Vec::with_capacity(payment.recipients.len());
        for recipient in payment.recipients {
            let info = self
                .resolve_address(&recipient.address, network, resolver)
                .ok_or_else(|| UriError::InvalidAddress(recipient.address.clone()))?;

            if let Some(id) = info.payment_id {
                reconcile_payment_id(&mut payment_id, id)?;
            }

            let amount =
                u64::try_from(recipient.amount.minor).map_err(|_| UriError::AmountTooLarge)?;
            destinations.push(Destination {
                info,
                address: recipient.address,
                amount,
                is_subaddress: info.is_subaddress,
                is_integrated: info.is_integrated(),
            });
        }

        Ok(ResolvedPayment {
            destinations,
            payment_id,
            description: payment.description,
            unrecognized: payment.unrecognized,
        })
    }

    fn resolve_address(
        &self,
        address: &str,
        network: Option<Network>,
        resolver: Option<&dyn AddressResolver>,
    ) -> Option<AddressInfo> {
        if let Some(info) = validate(self.validator(), address, network) {
            return Some(info);
        }
        let resolved = resolver?.resolve(address, &[], true)?;
        validate(self.validator(), &resolved, network)
    }
}

/// First integrated address sets the payment ID; every later one must carry
/// the identical ID.
fn reconcile_payment_id(seen: &mut Option<PaymentId>, id: PaymentId) -> Result<()> {
    match seen {
        None => {
            *seen = Some(id);
            Ok(())
        }
        Some(existing) if *existing == id => Ok(()),
        Some(_) => Err(UriError::ConflictingPaymentIds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixtures, MockValidator};
    use crate::uri::UriCodec;

    fn codec() -> UriCodec<MockValidator> {
        UriCodec::new(fixtures::testnet_validator())
    }

    const ADDR: &str = fixtures::STANDARD_ADDRESS;
    const NET: Option<Network> = Some(Network::Testnet);

    #[test]
    fn materializes_amounts_and_metadata() {
        let uri = format!(
            "monero:{ADDR}?version=2.0&amount=0.5XMR&address={ADDR}&amount=0.2XMR&tx_description=rent"
        );
        let resolved = codec().parse_to_destinations(&uri, NET, None).unwrap();
        assert_eq!(resolved.destinations.len(), 2);
        assert_eq!(resolved.destinations[0].amount, 500_000_000_000);
        assert_eq!(resolved.destinations[1].amount, 200_000_000_000);
        assert_eq!(resolved.destinations[0].address, ADDR);
        assert_eq!(resolved.description.as_deref(), Some("rent"));
        assert_eq!(resolved.payment_id, None);
    }

    #[test]
    fn rejects_non_base_amounts() {
        let uri = format!("monero:{ADDR}?version=2.0&amount=1BTC");
        assert_eq!(
            codec().parse_to_destinations(&uri, NET, None),
            Err(UriError::DestinationCurrency("BTC".into()))
        );
    }

    #[test]
    fn integrated_address_sets_the_payment_id() {
        let uri = format!("monero:{}", fixtures::INTEGRATED_ADDRESS);
        let resolved = codec().parse_to_destinations(&uri, NET, None).unwrap();
        assert_eq!(
            resolved.payment_id,
            Some(PaymentId::from_hex(fixtures::INTEGRATED_PAYMENT_ID).unwrap())
        );
        assert!(resolved.destinations[0].is_integrated);
    }

    #[test]
    fn payment_id_reconciliation() {
        let id_a = PaymentId::from_hex("f612cac0b6cb1cda").unwrap();
        let id_b = PaymentId::from_hex("0011223344556677").unwrap();

        let mut seen = None;
        reconcile_payment_id(&mut seen, id_a).unwrap();
        assert_eq!(seen, Some(id_a));
        // the identical ID is tolerated
        reconcile_payment_id(&mut seen, id_a).unwrap();
        assert_eq!(
            reconcile_payment_id(&mut seen, id_b),
            Err(UriError::ConflictingPaymentIds)
        );
    }

    #[test]
    fn resolver_recovers_unvalidated_names() {
        let codec = codec();
        let resolver = move |name: &str, _: &[String], _: bool| {
            (name == "donate.example").then(|| ADDR.to_string())
        };

        // a name the validator rejects falls back to the resolver
        let info = codec
            .resolve_address("donate.example", NET, Some(&resolver))
            .unwrap();
        assert_eq!(info.network, Network::Testnet);

        // without a resolver the same name stays invalid
        assert!(codec.resolve_address("donate.example", NET, None).is_none());

        // direct validation short-circuits the resolver
        assert!(codec.resolve_address(ADDR, NET, Some(&resolver)).is_some());
    }

    #[test]
    fn subaddress_flag_is_carried_through() {
        let uri = format!(
            "monero:{ADDR}?version=2.0&address={}",
            fixtures::SUBADDRESS
        );
        let resolved = codec().parse_to_destinations(&uri, NET, None).unwrap();
        assert!(!resolved.destinations[0].is_subaddress);
        assert!(resolved.destinations[1].is_subaddress);
    }
}
