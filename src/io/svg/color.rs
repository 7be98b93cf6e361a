//! Color values for SVG fills.

use std::{fmt, str::FromStr};

use anyhow::{bail, ensure, Context, Result};

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    /// Parse `#rgb` or `#rrggbb`.
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().strip_prefix('#')
            .with_context(|| format!("[svg::color] expected '#' prefix in {s:?}"))?;

        let channel = |digits: &str| u8::from_str_radix(digits, 16)
            .with_context(|| format!("[svg::color] invalid hex digits in {s:?}"));

        ensure!(hex.is_ascii(), "[svg::color] expected hex digits in {s:?}");

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..i + 1].repeat(2));
                Ok(Self { r: expand(0)?, g: expand(1)?, b: expand(2)? })
            }
            6 => Ok(Self { r: channel(&hex[0..2])?, g: channel(&hex[2..4])?, b: channel(&hex[4..6])? }),
            _ => bail!("[svg::color] expected 3 or 6 hex digits in {s:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Rgb::new(0x98, 0x00, 0x43).to_string(), "#980043");
    }

    #[test]
    fn parse_short_and_long_forms() {
        assert_eq!("#ccc".parse::<Rgb>().unwrap(), Rgb::new(0xcc, 0xcc, 0xcc));
        assert_eq!("#D4B9DA".parse::<Rgb>().unwrap(), Rgb::new(0xd4, 0xb9, 0xda));
        assert!("d4b9da".parse::<Rgb>().is_err());
        assert!("#12345".parse::<Rgb>().is_err());
    }

    #[test]
    fn non_ascii_input_is_an_error() {
        assert!("#aé".parse::<Rgb>().is_err());
        assert!("#ééé".parse::<Rgb>().is_err());
    }
}
