//! Immutable quote collection.

use crate::config::ConfigError;
use rand::Rng;

/// Ordered, non-empty list of reminder quotes fixed at startup.
#[derive(Debug, Clone)]
pub struct QuoteStore {
    quotes: Vec<String>,
}

impl QuoteStore {
    /// Build a store. Fails on an empty or blank entry.
    pub fn new<I, S>(quotes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let quotes: Vec<String> = quotes.into_iter().map(Into::into).collect();
        if quotes.is_empty() {
            return Err(ConfigError::NoQuotes);
        }
        if let Some(index) = quotes.iter().position(|q| q.trim().is_empty()) {
            return Err(ConfigError::BlankQuote { index });
        }
        Ok(Self { quotes })
    }

    /// Uniformly random quote.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        // Non-empty by construction.
        &self.quotes[rng.gen_range(0..self.quotes.len())]
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.quotes.iter().map(String::as_str)
    }
}
