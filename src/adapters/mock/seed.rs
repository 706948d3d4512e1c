//! Seed entries for the in-memory catalog and directory.
//!
//! Entries are `uuid:value` pairs separated by commas, for example
//! `SEED_CARS="6f1c...:89.90,0b2e...:120"` or `SEED_USERS="4d0a...:staff"`.

use std::fmt::Display;
use std::str::FromStr;
use uuid::Uuid;

/// Parse a comma separated list of `uuid:value` entries.
///
/// Blank input yields no entries; surrounding whitespace is ignored.
pub fn parse_seed<T>(input: &str) -> Result<Vec<(Uuid, T)>, String>
where
    T: FromStr,
    T::Err: Display,
{
    input
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, value) = entry
                .split_once(':')
                .ok_or_else(|| format!("Seed entry '{}' is not uuid:value", entry))?;
            let id = Uuid::parse_str(id.trim())
                .map_err(|e| format!("Seed entry '{}': {}", entry, e))?;
            let value = value
                .trim()
                .parse::<T>()
                .map_err(|e| format!("Seed entry '{}': {}", entry, e))?;
            Ok((id, value))
        })
        .collect()
}
