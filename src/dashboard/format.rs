//! Display formatting helpers for the dashboard and text summary.

use rust_decimal::Decimal;

/// Format an ETH amount with thousands separators and 4 decimal places
pub fn format_eth(value: Decimal) -> String {
    let rounded = value.round_dp(4);
    let text = rounded.to_string();

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), ""),
    };

    let mut formatted = group_thousands(int_part);
    if !frac_part.is_empty() {
        formatted.push('.');
        formatted.push_str(frac_part);
    }
    formatted
}

/// Format an integer count with thousands separators
pub fn format_count(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// Format a share fraction as a percentage string
pub fn format_share(share: Decimal) -> String {
    let percent = (share * Decimal::from(100)).round_dp(1);
    format!("{}%", percent)
}

/// Shorten an address for display: 0xabcdef…1234
pub fn short_address(address: &str) -> String {
    if address.len() <= 14 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}…{}", &address[..8], &address[address.len() - 4..])
}

/// Etherscan explorer link for an address
pub fn etherscan_address_link(address: &str) -> String {
    format!("https://etherscan.io/address/{}", address)
}

/// Escape text for embedding in HTML
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Insert separators into a plain integer string
///
/// **Private** - sign-aware; the input never has a fraction part
fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}", sign, grouped)
}
