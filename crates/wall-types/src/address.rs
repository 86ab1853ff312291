//! # Address Helpers
//!
//! Lowercase normalization plus the display keys derived from an address:
//! shortened form, two-character initials and a deterministic identicon.
//!
//! Addresses are compared case-insensitively everywhere; `normalize_address`
//! is applied at every boundary where an address enters the system.

use serde::{Deserialize, Serialize};

/// Identicon grid dimension (5x5 cells).
pub const IDENTICON_GRID: usize = 5;

/// Normalize a wallet address for storage and comparison.
#[must_use]
pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Shorten an address for display: `0x1234...abcd`.
///
/// `chars` is the number of hex characters kept on each side (the leading
/// `0x` is kept in addition). Returns an empty string for an empty address.
#[must_use]
pub fn shorten_address(address: &str, chars: usize) -> String {
    if address.is_empty() {
        return String::new();
    }
    let total: Vec<char> = address.chars().collect();
    if total.len() <= chars * 2 + 2 {
        return address.to_owned();
    }
    let head: String = total[..chars + 2].iter().collect();
    let tail: String = total[total.len() - chars..].iter().collect();
    format!("{head}...{tail}")
}

/// Two-character display initials: the first two hex characters after `0x`,
/// uppercased. `??` for addresses too short to carry them.
#[must_use]
pub fn initials(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() < 4 {
        return "??".to_owned();
    }
    chars[2..4].iter().collect::<String>().to_uppercase()
}

/// A deterministic avatar derived from an address.
///
/// `hue` selects the base color (degrees on the color wheel); `cells` is a
/// 5x5 fill mask. Rendering is up to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identicon {
    pub hue: u16,
    pub cells: [[bool; IDENTICON_GRID]; IDENTICON_GRID],
}

/// Derive the identicon for an address.
///
/// Uses the 16 hex characters following the `0x` prefix as entropy: the
/// first six select the hue, and per-cell fill comes from digit parity.
/// Non-hex input degrades to hue 0 and unfilled cells.
#[must_use]
pub fn identicon(address: &str) -> Identicon {
    let chars: Vec<char> = address.chars().skip(2).take(16).collect();

    let hue_src: String = chars.iter().take(6).collect();
    let hue = u32::from_str_radix(&hue_src, 16)
        .map(|v| (v % 360) as u16)
        .unwrap_or(0);

    let mut cells = [[false; IDENTICON_GRID]; IDENTICON_GRID];
    if !chars.is_empty() {
        for (i, row) in cells.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                let index = i * IDENTICON_GRID + j;
                let digit = chars[index % chars.len()].to_digit(16);
                *cell = matches!(digit, Some(d) if d % 2 == 0);
            }
        }
    }

    Identicon { hue, cells }
}
