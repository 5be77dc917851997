use anyhow::Result;

use super::{Country, CountrySource};

const COUNTRIES: &[(&str, &str)] = &[
    ("ar", "Argentina"),
    ("au", "Australia"),
    ("bd", "Bangladesh"),
    ("bo", "Bolivia"),
    ("br", "Brazil"),
    ("ca", "Canada"),
    ("cl", "Chile"),
    ("cn", "China"),
    ("co", "Colombia"),
    ("eg", "Egypt"),
    ("et", "Ethiopia"),
    ("fr", "France"),
    ("de", "Germany"),
    ("in", "India"),
    ("id", "Indonesia"),
    ("it", "Italy"),
    ("jp", "Japan"),
    ("mx", "Mexico"),
    ("ng", "Nigeria"),
    ("pk", "Pakistan"),
    ("py", "Paraguay"),
    ("pe", "Peru"),
    ("pt", "Portugal"),
    ("ru", "Russia"),
    ("za", "South Africa"),
    ("es", "Spain"),
    ("gb", "United Kingdom"),
    ("us", "United States"),
    ("uy", "Uruguay"),
    ("ve", "Venezuela"),
];

/// Built-in list used when no feed is configured or the feed is unusable.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCountries;

impl CountrySource for StaticCountries {
    fn name(&self) -> &str {
        "static"
    }

    fn load(&self) -> Result<Vec<Country>> {
        Ok(COUNTRIES
            .iter()
            .map(|(code, name)| {
                Country::new(
                    *code,
                    *name,
                    Some(format!("https://flagcdn.com/w80/{code}.png")),
                )
            })
            .collect())
    }
}
