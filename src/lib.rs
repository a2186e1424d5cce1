//! Encoder and decoder for `monero:` payment request URIs.
//!
//! This crate intentionally stays free of wallet state and delegates address
//! validation and name resolution to callers through trait-based dependency
//! injection.
//!
//! # Features
//!
//! - **Legacy URIs**: Single-recipient requests with `tx_amount`,
//!   `recipient_name` and `tx_description` parameters
//! - **Multi-recipient URIs**: Versioned requests (`version=2.0`) carrying
//!   repeated `address`/`amount`/`label` groups
//! - **Multi-currency amounts**: Fiat and foreign-chain denominations resolved
//!   through a pluggable [`CurrencyRegistry`]
//!
//! # Example
//!
//! ```ignore
//! use monero_uri::{Network, PaymentRequest, UriCodec};
//!
//! // Wallet code supplies the address validator.
//! let codec = UriCodec::new(wallet_validator);
//!
//! let request = PaymentRequest::from_base_units(
//!     vec!["4Address...".into()],
//!     &[1_000_000_000_000],
//!     vec!["Alice".into()],
//!     "donation",
//! );
//! let uri = codec.encode(&request, Some(Network::Mainnet))?;
//! let parsed = codec.parse(&uri, Some(Network::Mainnet))?;
//! assert_eq!(parsed.primary().address, "4Address...");
//! ```

pub mod address;
pub mod amount;
pub mod currency;
pub mod destinations;
pub mod errors;
pub mod text;
pub mod uri;

/// Test utilities for URI testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use address::{AddressInfo, AddressResolver, AddressValidator, Network, PaymentId};
pub use amount::{
    decimal_to_minor, format_base_amount, minor_to_decimal, parse_amount_with_unit,
    parse_base_amount, parse_u128, PaymentAmount,
};
pub use currency::{CurrencyInfo, CurrencyRegistry, BASE_CURRENCY, BASE_DECIMALS};
pub use destinations::{Destination, ResolvedPayment};
pub use errors::{Result, UriError};
pub use text::{percent_decode, percent_encode};
pub use uri::{
    ParsedPayment, PaymentRequest, RecipientRequest, UriCodec, SCHEME, SCHEME_PREFIX, URI_VERSION,
};
