//! Currency registry.
//!
//! A [`CurrencyRegistry`] is an immutable mapping from uppercase currency
//! code to decimal precision, constructed once and read for the lifetime of
//! the codec. Stored keys are matched case-sensitively; unit-suffix lookups
//! normalize to uppercase first.

use crate::{Result, UriError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Currency code of the base (on-chain) currency.
pub const BASE_CURRENCY: &str = "XMR";

/// Decimal digits of the base currency (1 XMR = 10^12 atomic units).
pub const BASE_DECIMALS: u32 = 12;

/// Precision descriptor for a single currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyInfo {
    /// Uppercase currency code, e.g. `"BTC"`.
    pub code: String,
    /// Number of decimal digits in the human-readable form.
    pub decimals: u32,
    /// Minor units per major unit (`10^decimals`).
    pub scale: u128,
}

/// Registry of currencies the codec can express amounts in.
///
/// # Example
///
/// ```
/// use monero_uri::CurrencyRegistry;
///
/// let currencies = CurrencyRegistry::with_defaults();
/// assert_eq!(currencies.get("ETH").unwrap().decimals, 18);
/// assert!(currencies.get("eth").is_none()); // stored keys are uppercase
/// assert!(currencies.get_unit("eth").is_some()); // unit lookups normalize
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrencyRegistry {
    entries: HashMap<String, CurrencyInfo>,
}

impl CurrencyRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Creates a registry with the built-in currency table.
    ///
    /// XMR (12 digits), BTC (8), ETH (18), USD (2), EUR (2).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for (code, decimals) in [
            (BASE_CURRENCY, BASE_DECIMALS),
            ("BTC", 8),
            ("ETH", 18),
            ("USD", 2),
            ("EUR", 2),
        ] {
            // 10^18 at most here, cannot overflow
            let _ = registry.register(code, decimals);
        }
        registry
    }

    /// Registers a currency, replacing any previous entry for the same code.
    ///
    /// Fails when `10^decimals` does not fit the 128-bit scale.
    pub fn register(&mut self, code: impl Into<String>, decimals: u32) -> Result<()> {
        let scale = 10u128
            .checked_pow(decimals)
            .ok_or(UriError::Overflow("scale"))?;
        let code = code.into();
        self.entries.insert(
            code.clone(),
            CurrencyInfo {
                code,
                decimals,
                scale,
            },
        );
        Ok(())
    }

    /// Looks up a currency by its exact (case-sensitive) code.
    pub fn get(&self, code: &str) -> Option<&CurrencyInfo> {
        self.entries.get(code)
    }

    /// Looks up a currency by a unit suffix, normalized to uppercase.
    ///
    /// An empty suffix maps to the base currency.
    pub fn get_unit(&self, suffix: &str) -> Option<&CurrencyInfo> {
        if suffix.is_empty() {
            self.get(BASE_CURRENCY)
        } else {
            self.entries.get(&suffix.to_uppercase())
        }
    }

    /// Returns the registered currency codes.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Returns the number of registered currencies.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no currencies are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
