//! Address helpers. Addresses travel as hex strings; comparisons ignore case
//! so checksummed and lowercase forms match.

/// Left-pads an address to a 32 byte log topic.
pub fn address_to_topic(address: &str) -> String {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(address);
    format!("0x{:0>64}", hex.to_lowercase())
}

pub fn addresses_equal(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
