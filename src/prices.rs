//! Price series input.

use std::{ffi::OsStr, fmt::Debug, fs, path::Path};

use serde::Deserialize;

use crate::{prelude::*, quantity::Cost};

#[derive(Deserialize)]
struct PriceFile {
    prices: Vec<Cost>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonPrices {
    Bare(Vec<Cost>),
    Wrapped(PriceFile),
}

/// Read the price series, one price per slot.
///
/// TOML files must contain a `prices` array. JSON files contain either a bare array
/// or an object with the `prices` array.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn load<P: AsRef<Path> + Debug>(path: P) -> Result<Vec<Cost>> {
    let path = path.as_ref();
    let parse: fn(&str) -> Result<Vec<Cost>> = match path.extension().and_then(OsStr::to_str) {
        Some("toml") => parse_toml,
        Some("json") => parse_json,
        _ => bail!("unsupported price file extension: `{}`", path.display()),
    };
    let contents =
        fs::read_to_string(path).with_context(|| format!("failed to read `{}`", path.display()))?;
    let prices = parse(&contents).with_context(|| format!("failed to parse `{}`", path.display()))?;
    info!(n_prices = prices.len(), "loaded prices");
    Ok(prices)
}

pub fn parse_toml(contents: &str) -> Result<Vec<Cost>> {
    ensure_finite(toml::from_str::<PriceFile>(contents)?.prices)
}

pub fn parse_json(contents: &str) -> Result<Vec<Cost>> {
    let prices = match serde_json::from_str(contents)? {
        JsonPrices::Bare(prices) | JsonPrices::Wrapped(PriceFile { prices }) => prices,
    };
    ensure_finite(prices)
}

fn ensure_finite(prices: Vec<Cost>) -> Result<Vec<Cost>> {
    if let Some((index, price)) = prices.iter().enumerate().find(|(_, price)| !price.is_finite())
    {
        bail!("price #{index} is not finite: {price:?}");
    }
    Ok(prices)
}
