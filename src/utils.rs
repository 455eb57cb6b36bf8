use crate::{errors::EtherscanError, Result};
use serde::{de, Deserialize, Deserializer};
use std::str::FromStr;

fn is_hex_of_len(value: &str, len: usize) -> bool {
    match value.strip_prefix("0x") {
        Some(hex) => hex.len() == len && hex.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Checks that `address` is a `0x`-prefixed 20-byte hex string.
pub fn validate_address(address: &str) -> Result<()> {
    if is_hex_of_len(address, 40) {
        Ok(())
    } else {
        Err(EtherscanError::InvalidAddress(address.to_string()))
    }
}

/// Checks that `hash` is a `0x`-prefixed 32-byte hex string.
pub fn validate_tx_hash(hash: &str) -> Result<()> {
    if is_hex_of_len(hash, 64) {
        Ok(())
    } else {
        Err(EtherscanError::InvalidTxHash(hash.to_string()))
    }
}

/// Checks that `value` is a block parameter the proxy endpoints accept:
/// one of the named tags or a `0x`-prefixed hex quantity.
pub fn validate_block_number(value: &str) -> Result<()> {
    match value {
        "latest" | "earliest" | "pending" => Ok(()),
        _ => match value.strip_prefix("0x") {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => Ok(()),
            _ => Err(EtherscanError::InvalidBlockNumber(value.to_string())),
        },
    }
}

pub(crate) fn parse_hex_u64(value: &str) -> Result<u64> {
    let hex = value
        .strip_prefix("0x")
        .ok_or_else(|| EtherscanError::InvalidHexQuantity(value.to_string()))?;
    u64::from_str_radix(hex, 16).map_err(|_| EtherscanError::InvalidHexQuantity(value.to_string()))
}

pub(crate) fn parse_hex_u128(value: &str) -> Result<u128> {
    let hex = value
        .strip_prefix("0x")
        .ok_or_else(|| EtherscanError::InvalidHexQuantity(value.to_string()))?;
    u128::from_str_radix(hex, 16).map_err(|_| EtherscanError::InvalidHexQuantity(value.to_string()))
}

/// The gas oracle reports `gasUsedRatio` as a comma-joined list of floats.
pub(crate) fn deserialize_f64_vec<'de, D>(deserializer: D) -> core::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let str_sequence = String::deserialize(deserializer)?;
    str_sequence
        .split(',')
        .map(|item| f64::from_str(item).map_err(|err| de::Error::custom(err.to_string())))
        .collect()
}
