//! Payment request URI codec.
//!
//! Two grammar variants share the `monero:` scheme:
//!
//! - the legacy single-recipient form,
//!   `monero:<address>[?tx_amount=..&recipient_name=..&tx_description=..]`;
//! - the versioned multi-recipient form, introduced by a leading
//!   `version=2.0` parameter, where each `address=` token opens a new
//!   recipient slot and `amount=`/`label=` apply to the most recent slot.
//!
//! Decoding accumulates recipients with a left-to-right fold over query
//! tokens; encoding picks the variant from the recipient count. Both
//! directions share one amount grammar and one validation capability, so a
//! URI produced by [`UriCodec::encode`] always parses back to its input.

use crate::address::{validate, AddressValidator, Network};
use crate::amount::{format_amount_for_uri, parse_amount_with_unit, PaymentAmount};
use crate::currency::{CurrencyRegistry, BASE_CURRENCY};
use crate::text::{percent_decode, percent_encode};
use crate::{Result, UriError};
use serde::{Deserialize, Serialize};

/// URI scheme, without the trailing colon.
pub const SCHEME: &str = "monero";

/// The one supported multi-recipient grammar version.
pub const URI_VERSION: &str = "2.0";

/// Scheme prefix including the colon.
pub const SCHEME_PREFIX: &str = "monero:";

/// One payment destination decoded from a URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientRequest {
    /// Address exactly as it appeared in the URI.
    pub address: String,
    /// Requested amount; zero when the URI named none.
    pub amount: PaymentAmount,
    /// Decoded label, `None` when the URI named none.
    pub label: Option<String>,
}

/// Fully decoded payment request.
///
/// Only produced whole: a parse failure never leaves a partially filled
/// value behind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedPayment {
    /// Ordered recipients; index 0 is the primary (path) recipient.
    pub recipients: Vec<RecipientRequest>,
    /// Decoded `tx_description`, when present.
    pub description: Option<String>,
    /// Raw `key=value` tokens the grammar does not know, in encounter order.
    pub unrecognized: Vec<String>,
}

impl ParsedPayment {
    /// The primary recipient (the URI path address).
    pub fn primary(&self) -> &RecipientRequest {
        // the parser never yields an empty recipient list
        &self.recipients[0]
    }
}

/// Encoder input: parallel per-recipient arrays plus a shared description.
///
/// `amounts` and `labels` may be shorter than `addresses`; the encoder pads
/// them with zero amounts (in the currency of the first given amount) and
/// empty labels.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Recipient addresses, primary first.
    pub addresses: Vec<String>,
    /// Per-recipient amounts, possibly shorter than `addresses`.
    pub amounts: Vec<PaymentAmount>,
    /// Per-recipient labels, possibly shorter than `addresses`.
    pub labels: Vec<String>,
    /// Free-text payment description; empty means absent.
    pub description: String,
}

impl PaymentRequest {
    /// Creates a request with addresses only.
    pub fn new(addresses: Vec<String>) -> Self {
        Self {
            addresses,
            ..Self::default()
        }
    }

    /// Convenience constructor taking native atomic-unit XMR amounts.
    pub fn from_base_units(
        addresses: Vec<String>,
        atomic_amounts: &[u64],
        labels: Vec<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            addresses,
            amounts: atomic_amounts
                .iter()
                .map(|&a| PaymentAmount::from_base_units(a))
                .collect(),
            labels,
            description: description.into(),
        }
    }
}

/// Bidirectional codec for payment request URIs.
///
/// Holds the immutable currency table and the injected address validator;
/// carries no other state, so one codec value can serve any number of
/// concurrent encode/decode calls.
///
/// # Example
///
/// ```
/// use monero_uri::{AddressInfo, AddressValidator, Network, PaymentRequest, UriCodec};
///
/// // any address validation scheme can be injected; this one accepts
/// // everything as a standard mainnet address
/// struct AcceptAll;
/// impl AddressValidator for AcceptAll {
///     fn parse_address(&self, _address: &str, network: Network) -> Option<AddressInfo> {
///         (network == Network::Mainnet).then(|| AddressInfo::standard(network))
///     }
/// }
///
/// let codec = UriCodec::new(AcceptAll);
/// let request = PaymentRequest::from_base_units(
///     vec!["4Address".into()],
///     &[250_000_000_000],
///     vec!["Dave".into()],
///     "quarter",
/// );
/// let uri = codec.encode(&request, Some(Network::Mainnet))?;
/// let parsed = codec.parse(&uri, Some(Network::Mainnet))?;
/// assert_eq!(parsed.primary().amount.minor, 250_000_000_000);
/// # Ok::<(), monero_uri::UriError>(())
/// ```
pub struct UriCodec<V> {
    currencies: CurrencyRegistry,
    validator: V,
}

impl<V: AddressValidator> UriCodec<V> {
    /// Creates a codec with the default currency table.
    pub fn new(validator: V) -> Self {
        Self::with_currencies(validator, CurrencyRegistry::with_defaults())
    }

    /// Creates a codec with a caller-supplied currency table.
    pub fn with_currencies(validator: V, currencies: CurrencyRegistry) -> Self {
        Self {
            currencies,
            validator,
        }
    }

    /// The codec's currency table.
    pub fn currencies(&self) -> &CurrencyRegistry {
        &self.currencies
    }

    /// The injected address validator.
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Parses a payment request URI.
    ///
    /// `network` pins address validation to one network; `None` accepts the
    /// first network in the fixed trial order that validates each address.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, uri), fields(uri_len = uri.len()))
    )]
    pub fn parse(&self, uri: &str, network: Option<Network>) -> Result<ParsedPayment> {
        let remainder = uri
            .strip_prefix(SCHEME_PREFIX)
            .ok_or_else(|| UriError::WrongScheme(uri.to_string()))?;

        let (path, query) = match remainder.split_once('?') {
            Some((path, query)) => (path, query),
            None => (remainder, ""),
        };

        if path.is_empty() {
            return Err(UriError::MissingAddress);
        }
        let primary_info = validate(&self.validator, path, network)
            .ok_or_else(|| UriError::InvalidAddress(path.to_string()))?;

        let state = ParseState::new(path, primary_info.is_integrated());
        if query.is_empty() {
            // bare-address form
            return state.finish();
        }

        let tokens: Vec<&str> = query.split('&').collect();
        if let Some((key, value)) = tokens[0].split_once('=') {
            if key == "version" && value != URI_VERSION {
                return Err(UriError::UnsupportedVersion(value.to_string()));
            }
        }

        tokens
            .iter()
            .enumerate()
            .try_fold(state, |state, (index, token)| {
                self.apply_token(state, index, token, network)
            })?
            .finish()
    }

    fn apply_token(
        &self,
        mut state: ParseState,
        index: usize,
        token: &str,
        network: Option<Network>,
    ) -> Result<ParseState> {
        if token.is_empty() {
            return Ok(state);
        }
        let (key, value) = token
            .split_once('=')
            .ok_or_else(|| UriError::BadParameter(token.to_string()))?;

        match key {
            "version" => {
                if index != 0 {
                    return Err(UriError::VersionNotFirst);
                }
            }
            "address" => {
                if value.is_empty() {
                    return Err(UriError::EmptyAddress);
                }
                let info = validate(&self.validator, value, network)
                    .ok_or_else(|| UriError::InvalidAddress(value.to_string()))?;
                if info.is_integrated() {
                    if state.integrated_seen {
                        return Err(UriError::MultipleIntegratedAddresses);
                    }
                    state.integrated_seen = true;
                }
                state.push_recipient(value);
            }
            "amount" | "tx_amount" => {
                let amount = parse_amount_with_unit(&self.currencies, value)?;
                if state.amount_set[state.cursor] {
                    return Err(UriError::DuplicateAmount);
                }
                state.recipients[state.cursor].amount = amount;
                state.amount_set[state.cursor] = true;
            }
            "label" | "recipient_name" => {
                if state.recipients[state.cursor].label.is_some() {
                    return Err(UriError::DuplicateLabel);
                }
                state.recipients[state.cursor].label = Some(percent_decode(value));
            }
            "tx_description" => {
                if state.description.is_some() {
                    return Err(UriError::DuplicateDescription);
                }
                state.description = Some(percent_decode(value));
            }
            _ => state.unrecognized.push(token.to_string()),
        }
        Ok(state)
    }

    /// Serializes a payment request into a URI string.
    ///
    /// One address produces the legacy form, more than one the versioned
    /// form; see the module docs for the two grammars.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, request), fields(recipients = request.addresses.len()))
    )]
    pub fn encode(&self, request: &PaymentRequest, network: Option<Network>) -> Result<String> {
        if request.addresses.is_empty() {
            return Err(UriError::NoRecipients);
        }

        let mut amounts = request.amounts.clone();
        if amounts.len() < request.addresses.len() {
            let pad_currency = match amounts.first() {
                Some(first) if !first.currency.is_empty() => first.currency.clone(),
                _ => BASE_CURRENCY.to_string(),
            };
            amounts.resize(request.addresses.len(), PaymentAmount::zero(pad_currency));
        }
        let mut labels = request.labels.clone();
        if labels.len() < request.addresses.len() {
            labels.resize(request.addresses.len(), String::new());
        }

        if amounts.len() != request.addresses.len() || labels.len() != request.addresses.len() {
            return Err(UriError::CountMismatch {
                addresses: request.addresses.len(),
                amounts: request.amounts.len(),
                labels: request.labels.len(),
            });
        }

        if request.addresses.len() == 1 {
            self.encode_single(request, &amounts, &labels, network)
        } else {
            self.encode_multi(request, &amounts, &labels, network)
        }
    }

    fn encode_single(
        &self,
        request: &PaymentRequest,
        amounts: &[PaymentAmount],
        labels: &[String],
        network: Option<Network>,
    ) -> Result<String> {
        let address = &request.addresses[0];
        if validate(&self.validator, address, network).is_none() {
            return Err(UriError::InvalidAddress(address.clone()));
        }

        let mut uri = format!("{SCHEME_PREFIX}{address}");
        let mut n_fields = 0usize;

        if !amounts[0].is_zero() {
            if amounts[0].currency != BASE_CURRENCY {
                return Err(UriError::LegacyCurrency(amounts[0].currency.clone()));
            }
            let atomic = u64::try_from(amounts[0].minor).map_err(|_| UriError::AmountTooLarge)?;
            // the legacy form carries the full twelve-digit rendering
            push_field(
                &mut uri,
                &mut n_fields,
                "tx_amount",
                &crate::amount::format_base_amount(atomic),
            );
        }
        if !labels[0].is_empty() {
            push_field(
                &mut uri,
                &mut n_fields,
                "recipient_name",
                &percent_encode(&labels[0]),
            );
        }
        if !request.description.is_empty() {
            push_field(
                &mut uri,
                &mut n_fields,
                "tx_description",
                &percent_encode(&request.description),
            );
        }
        Ok(uri)
    }

    fn encode_multi(
        &self,
        request: &PaymentRequest,
        amounts: &[PaymentAmount],
        labels: &[String],
        network: Option<Network>,
    ) -> Result<String> {
        let primary = &request.addresses[0];
        let primary_info = validate(&self.validator, primary, network)
            .ok_or_else(|| UriError::InvalidAddress(primary.clone()))?;
        let mut integrated_seen = primary_info.is_integrated();

        let mut uri = format!("{SCHEME_PREFIX}{primary}?version={URI_VERSION}");

        if !amounts[0].is_zero() {
            let formatted = format_amount_for_uri(&self.currencies, &amounts[0])?;
            uri.push_str("&amount=");
            uri.push_str(&formatted);
        }
        if !labels[0].is_empty() {
            uri.push_str("&label=");
            uri.push_str(&percent_encode(&labels[0]));
        }

        for i in 1..request.addresses.len() {
            let address = &request.addresses[i];
            let info = validate(&self.validator, address, network)
                .ok_or_else(|| UriError::InvalidAddress(address.clone()))?;
            if info.is_integrated() {
                if integrated_seen {
                    return Err(UriError::MultipleIntegratedAddresses);
                }
                integrated_seen = true;
            }

            uri.push_str("&address=");
            uri.push_str(address);
            if !amounts[i].is_zero() {
                let formatted = format_amount_for_uri(&self.currencies, &amounts[i])?;
                uri.push_str("&amount=");
                uri.push_str(&formatted);
            }
            if !labels[i].is_empty() {
                uri.push_str("&label=");
                uri.push_str(&percent_encode(&labels[i]));
            }
        }

        if !request.description.is_empty() {
            uri.push_str("&tx_description=");
            uri.push_str(&percent_encode(&request.description));
        }
        Ok(uri)
    }
}

fn push_field(uri: &mut String, n_fields: &mut usize, key: &str, value: &str) {
    uri.push(if *n_fields == 0 { '?' } else { '&' });
    *n_fields += 1;
    uri.push_str(key);
    uri.push('=');
    uri.push_str(value);
}

/// Accumulator for the token fold: the recipient list under construction
/// plus the cursor the next `amount=`/`label=` token applies to.
struct ParseState {
    recipients: Vec<RecipientRequest>,
    amount_set: Vec<bool>,
    description: Option<String>,
    unrecognized: Vec<String>,
    integrated_seen: bool,
    cursor: usize,
}

impl ParseState {
    fn new(primary_address: &str, primary_integrated: bool) -> Self {
        let mut state = Self {
            recipients: Vec::new(),
            amount_set: Vec::new(),
            description: None,
            unrecognized: Vec::new(),
            integrated_seen: primary_integrated,
            cursor: 0,
        };
        state.push_recipient(primary_address);
        state
    }

    fn push_recipient(&mut self, address: &str) {
        self.recipients.push(RecipientRequest {
            address: address.to_string(),
            amount: PaymentAmount::zero(BASE_CURRENCY),
            label: None,
        });
        self.amount_set.push(false);
        self.cursor = self.recipients.len() - 1;
    }

    fn finish(self) -> Result<ParsedPayment> {
        // per-recipient bookkeeping must stay in lockstep
        if self.recipients.len() != self.amount_set.len() {
            return Err(UriError::Internal(format!(
                "parsed recipient bookkeeping mismatch: {} recipients, {} amount slots",
                self.recipients.len(),
                self.amount_set.len()
            )));
        }
        Ok(ParsedPayment {
            recipients: self.recipients,
            description: self.description,
            unrecognized: self.unrecognized,
        })
    }
}
