//! Error types for URI encoding and decoding.
//!
//! Every expected validation failure is surfaced as a [`UriError`] variant
//! with a human-readable message; the codec never returns partial results
//! alongside an error.

/// Common result alias for codec operations.
pub type Result<T> = std::result::Result<T, UriError>;

/// Comprehensive error type for payment URI operations.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum UriError {
    /// The input does not start with the `monero:` scheme.
    #[error("URI has wrong scheme (expected \"monero:\"): {0}")]
    WrongScheme(String),

    /// The URI path (primary address) is empty.
    #[error("URI missing initial monero address")]
    MissingAddress,

    /// An address failed validation against the expected network(s).
    #[error("URI contains improper address: {0}")]
    InvalidAddress(String),

    /// An `address=` parameter carried no value.
    #[error("address parameter missing address value")]
    EmptyAddress,

    /// A query token without a `=` separator.
    #[error("bad parameter: {0}")]
    BadParameter(String),

    /// `version=` carried anything other than the supported version string.
    #[error("unsupported version: {0}")]
    UnsupportedVersion(String),

    /// `version=` appeared anywhere other than the first query position.
    #[error("version parameter must appear first when present")]
    VersionNotFirst,

    /// More than one amount for the same recipient.
    #[error("duplicate amount for the same recipient")]
    DuplicateAmount,

    /// More than one label for the same recipient.
    #[error("duplicate label for the same recipient")]
    DuplicateLabel,

    /// More than one `tx_description=` parameter.
    #[error("duplicate tx_description parameter")]
    DuplicateDescription,

    /// A payment may reference at most one integrated address.
    #[error("multiple integrated addresses are not supported")]
    MultipleIntegratedAddresses,

    /// Two integrated addresses embedded different payment IDs.
    #[error("multiple integrated addresses with different payment IDs are not supported")]
    ConflictingPaymentIds,

    /// An amount value was empty after trimming.
    #[error("empty amount value")]
    EmptyAmount,

    /// A numeric literal failed the strict XMR amount grammar.
    #[error("invalid XMR amount: {0}")]
    InvalidBaseAmount(String),

    /// Non-digit characters in the named part of a decimal amount.
    #[error("invalid characters in amount {0} part")]
    InvalidAmountCharacters(&'static str),

    /// A minor-unit integer literal was malformed.
    #[error("invalid unsigned integer: {0}")]
    InvalidInteger(String),

    /// A currency code is not present in the registry.
    #[error("unsupported currency: {0}")]
    UnsupportedCurrency(String),

    /// An amount unit suffix did not map to any registered currency.
    #[error("unsupported amount unit: {0}")]
    UnsupportedUnit(String),

    /// The fractional part exceeds the currency's decimal-digit count.
    #[error("too many fractional digits for {currency} (max {max})")]
    TooManyFractionalDigits {
        /// Currency whose precision was exceeded.
        currency: String,
        /// The currency's decimal-digit count.
        max: u32,
    },

    /// An arithmetic step would exceed the 128-bit maximum.
    #[error("amount {0} part causes overflow")]
    Overflow(&'static str),

    /// An XMR amount does not fit the native 64-bit wire width.
    #[error("XMR amount too large to encode")]
    AmountTooLarge,

    /// Legacy single-recipient URIs carry XMR amounts only.
    #[error("single recipient URI cannot have a currency apart from XMR due to compatibility issues")]
    LegacyCurrency(String),

    /// Destinations only understand XMR amounts.
    #[error("destinations only support XMR amounts (URI had {0})")]
    DestinationCurrency(String),

    /// Encoder input arrays disagree even after padding.
    #[error("the counts of addresses ({addresses}), amounts ({amounts}), and labels ({labels}) do not match")]
    CountMismatch {
        /// Number of addresses given.
        addresses: usize,
        /// Number of amounts given before padding.
        amounts: usize,
        /// Number of labels given before padding.
        labels: usize,
    },

    /// The encoder was given no recipients at all.
    #[error("no recipient addresses were provided")]
    NoRecipients,

    /// A broken internal invariant; should never surface.
    #[error("internal error: {0}")]
    Internal(String),
}
