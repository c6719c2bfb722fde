use anyhow::{Context, Result, bail};
use oink_soccer_game::seed_from_entropy;
use serde::Serialize;

/// Where a resolved seed came from, kept so reports can echo the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text")]
pub enum SeedSource {
    Numeric,
    Hex,
    /// Text hashed into a seed, e.g. a block hash.
    Entropy(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedInfo {
    pub seed: u64,
    pub source: SeedSource,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            source: SeedSource::Numeric,
        }
    }
}

/// Resolve a CLI seed argument.
///
/// Accepts decimal integers (negative values use their magnitude), `0x`
/// prefixed hex, and `hash:<text>` which derives the seed from the text bytes.
pub fn parse_seed_token(token: &str) -> Result<SeedInfo> {
    let token = token.trim();
    if token.is_empty() {
        bail!("seed must not be empty");
    }

    if let Some(text) = token.strip_prefix("hash:") {
        if text.is_empty() {
            bail!("hash seed needs text after `hash:`");
        }
        return Ok(SeedInfo {
            seed: seed_from_entropy(text.as_bytes()),
            source: SeedSource::Entropy(text.to_string()),
        });
    }

    if let Some(hex) = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
    {
        let seed = u64::from_str_radix(&hex.replace('_', ""), 16)
            .with_context(|| format!("invalid hex seed: {token}"))?;
        return Ok(SeedInfo {
            seed,
            source: SeedSource::Hex,
        });
    }

    if let Ok(value) = token.parse::<u64>() {
        return Ok(SeedInfo::from_numeric(value));
    }

    if let Ok(value) = token.parse::<i64>() {
        return Ok(SeedInfo::from_numeric(value.unsigned_abs()));
    }

    bail!("Unrecognized seed token: {token}");
}
