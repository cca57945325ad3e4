//! ABI helpers for the fixed set of ERC-20 read calls
//!
//! The scanner only ever issues a handful of zero-argument view calls, so
//! calldata is just the 4-byte selector and return data is decoded by hand:
//! uint256 / address / bool words, dynamic strings, and the bytes32-string
//! layout some older tokens use for name/symbol.

use alloy_primitives::{Address, U256};
use eyre::{bail, eyre, Result};

/// name()
pub const SEL_NAME: &str = "0x06fdde03";
/// symbol()
pub const SEL_SYMBOL: &str = "0x95d89b41";
/// decimals()
pub const SEL_DECIMALS: &str = "0x313ce567";
/// totalSupply()
pub const SEL_TOTAL_SUPPLY: &str = "0x18160ddd";
/// owner()
pub const SEL_OWNER: &str = "0x8da5cb5b";
/// getOwner() - legacy BEP-20 accessor
pub const SEL_GET_OWNER: &str = "0x893d20e8";
/// paused()
pub const SEL_PAUSED: &str = "0x5c975abb";

fn strip_hex(data: &str) -> &str {
    data.strip_prefix("0x").unwrap_or(data)
}

fn decode_words(data: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(strip_hex(data)).map_err(|e| eyre!("bad return hex: {}", e))?;
    if bytes.is_empty() {
        bail!("empty return data");
    }
    Ok(bytes)
}

/// Decode a single uint256 return word.
pub fn decode_u256(data: &str) -> Result<U256> {
    let bytes = decode_words(data)?;
    if bytes.len() < 32 {
        bail!("return data shorter than one word");
    }
    Ok(U256::from_be_slice(&bytes[..32]))
}

/// Decode a uint8 return word (reverts on values that overflow u8).
pub fn decode_u8(data: &str) -> Result<u8> {
    let value = decode_u256(data)?;
    u8::try_from(value).map_err(|_| eyre!("value {} does not fit in u8", value))
}

/// Decode an address return word (last 20 bytes of the first word).
pub fn decode_address(data: &str) -> Result<Address> {
    let bytes = decode_words(data)?;
    if bytes.len() < 32 {
        bail!("return data shorter than one word");
    }
    Ok(Address::from_slice(&bytes[12..32]))
}

/// Decode a bool return word.
pub fn decode_bool(data: &str) -> Result<bool> {
    Ok(decode_u256(data)? != U256::ZERO)
}

/// Decode a string return value.
///
/// Handles both the standard dynamic-string encoding (offset word, length
/// word, payload) and the single-word bytes32 layout used by older tokens
/// such as MKR.
pub fn decode_string(data: &str) -> Result<String> {
    let bytes = decode_words(data)?;

    // bytes32 fallback: one word, NUL-padded ASCII
    if bytes.len() == 32 {
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(32);
        return String::from_utf8(bytes[..end].to_vec())
            .map_err(|e| eyre!("bytes32 string is not UTF-8: {}", e));
    }

    if bytes.len() < 64 {
        bail!("string return data too short");
    }

    // Offset and length words come straight off the wire; checked
    // arithmetic keeps hostile values from wrapping past the bounds checks.
    let offset =
        usize::try_from(U256::from_be_slice(&bytes[..32])).map_err(|_| eyre!("bad offset"))?;
    let start = offset
        .checked_add(32)
        .filter(|&start| start <= bytes.len())
        .ok_or_else(|| eyre!("string offset out of bounds"))?;
    let len = usize::try_from(U256::from_be_slice(&bytes[offset..start]))
        .map_err(|_| eyre!("bad length"))?;
    let end = start
        .checked_add(len)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| eyre!("string length out of bounds"))?;

    String::from_utf8(bytes[start..end].to_vec())
        .map_err(|e| eyre!("string payload is not UTF-8: {}", e))
}

/// Format a raw token amount as a decimal string scaled by `decimals`.
/// Trailing fractional zeros are trimmed.
pub fn format_units(value: U256, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let base = U256::from(10).pow(U256::from(decimals));
    let integer = value / base;
    let remainder = value % base;
    if remainder.is_zero() {
        return integer.to_string();
    }
    let fraction = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    format!("{}.{}", integer, fraction)
}
