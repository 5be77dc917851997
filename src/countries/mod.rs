//! Country lookup used only for display labels and flags.
//!
//! Where the list comes from is a [`CountrySource`] chosen at startup; the
//! simulator never sees any of this.

mod fallback;
mod flag_feed;

use std::collections::HashSet;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use fallback::StaticCountries;
pub use flag_feed::{FlagFeed, COUNTRIES_NOW_URL};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    /// Lowercase ISO 3166-1 alpha-2 code.
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag_url: Option<String>,
}

impl Country {
    pub fn new(code: impl Into<String>, name: impl Into<String>, flag_url: Option<String>) -> Self {
        Self {
            code: code.into().to_ascii_lowercase(),
            name: name.into(),
            flag_url,
        }
    }
}

pub trait CountrySource {
    fn name(&self) -> &str;
    fn load(&self) -> Result<Vec<Country>>;
}

/// Tries `primary` first and falls back when it fails or comes back empty.
pub struct WithFallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P: CountrySource, F: CountrySource> WithFallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: CountrySource, F: CountrySource> CountrySource for WithFallback<P, F> {
    fn name(&self) -> &str {
        self.primary.name()
    }

    fn load(&self) -> Result<Vec<Country>> {
        match self.primary.load() {
            Ok(countries) if !countries.is_empty() => Ok(countries),
            Ok(_) => {
                log::warn!(
                    "country source '{}' returned no entries, using '{}'",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.fallback.load()
            }
            Err(err) => {
                log::warn!(
                    "country source '{}' failed ({err:#}), using '{}'",
                    self.primary.name(),
                    self.fallback.name()
                );
                self.fallback.load()
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CountryDirectory {
    countries: Vec<Country>,
}

impl CountryDirectory {
    /// Sorts by name and drops repeated codes, keeping the first occurrence.
    pub fn new(countries: Vec<Country>) -> Self {
        let mut seen = HashSet::new();
        let mut countries: Vec<Country> = countries
            .into_iter()
            .filter(|country| !country.code.is_empty() && seen.insert(country.code.clone()))
            .collect();
        countries.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.code.cmp(&b.code))
        });
        Self { countries }
    }

    pub fn from_source(source: &dyn CountrySource) -> Result<Self> {
        let directory = Self::new(source.load()?);
        log::info!(
            "loaded {} countries from '{}'",
            directory.len(),
            source.name()
        );
        Ok(directory)
    }

    pub fn lookup(&self, code: &str) -> Option<&Country> {
        let code = code.trim();
        self.countries
            .iter()
            .find(|country| country.code.eq_ignore_ascii_case(code))
    }

    /// Display name for `code`, or an empty string when the code is unknown.
    pub fn name_of(&self, code: &str) -> &str {
        self.lookup(code).map(|c| c.name.as_str()).unwrap_or("")
    }

    /// Codes preselected in the two pickers.
    pub fn default_pair(&self) -> Option<(&str, &str)> {
        if self.lookup("br").is_some() && self.lookup("ar").is_some() {
            return Some(("br", "ar"));
        }
        match self.countries.as_slice() {
            [first, second, ..] => Some((first.code.as_str(), second.code.as_str())),
            _ => None,
        }
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}
