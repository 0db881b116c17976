//! Stellar spectral types accepted by the simulator's stellar model library.
//!
//! The external simulator keys its PHOENIX stellar SEDs by lowercase tokens such
//! as `"a5v"` or `"k0iii"`: a Morgan-Keenan class letter, a numeric subclass and
//! a luminosity class. Only the tokens in [`PHOENIX_KEYS`] have an SED behind
//! them, so star construction validates against that vocabulary rather than
//! accepting any well-formed token.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Spectral type tokens with a PHOENIX SED in the simulator's reference data.
#[rustfmt::skip]
pub const PHOENIX_KEYS: &[&str] = &[
    // Dwarfs
    "o3v", "o5v", "o7v", "o9v",
    "b0v", "b1v", "b3v", "b5v", "b8v",
    "a0v", "a1v", "a3v", "a5v",
    "f0v", "f2v", "f5v", "f8v",
    "g0v", "g2v", "g5v", "g8v",
    "k0v", "k2v", "k5v", "k7v",
    "m0v", "m2v", "m5v",
    // Giants
    "b0iii", "b5iii", "g0iii", "g5iii", "k0iii", "k5iii", "m0iii",
    // Supergiants
    "o6i", "o8i", "b0i", "b5i", "a0i", "a5i", "f0i", "f5i", "g0i", "g5i", "k0i", "k5i", "m0i", "m2i",
];

static VOCABULARY: Lazy<HashSet<&'static str>> =
    Lazy::new(|| PHOENIX_KEYS.iter().copied().collect());

/// Harvard spectral class, hottest to coolest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'o' => Some(SpectralClass::O),
            'b' => Some(SpectralClass::B),
            'a' => Some(SpectralClass::A),
            'f' => Some(SpectralClass::F),
            'g' => Some(SpectralClass::G),
            'k' => Some(SpectralClass::K),
            'm' => Some(SpectralClass::M),
            _ => None,
        }
    }
}

impl fmt::Display for SpectralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SpectralClass::O => 'O',
                SpectralClass::B => 'B',
                SpectralClass::A => 'A',
                SpectralClass::F => 'F',
                SpectralClass::G => 'G',
                SpectralClass::K => 'K',
                SpectralClass::M => 'M',
            }
        )
    }
}

/// Luminosity class present in the stellar model vocabulary.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LuminosityClass {
    /// Supergiant
    I,
    /// Giant
    III,
    /// Dwarf (main sequence)
    V,
}

impl LuminosityClass {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "i" => Some(LuminosityClass::I),
            "iii" => Some(LuminosityClass::III),
            "v" => Some(LuminosityClass::V),
            _ => None,
        }
    }

    fn token(&self) -> &'static str {
        match self {
            LuminosityClass::I => "i",
            LuminosityClass::III => "iii",
            LuminosityClass::V => "v",
        }
    }
}

impl fmt::Display for LuminosityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let str = match self {
            LuminosityClass::I => "I",
            LuminosityClass::III => "III",
            LuminosityClass::V => "V",
        };
        write!(f, "{str}")
    }
}

/// A validated spectral type such as A5V.
///
/// Parsing is case-insensitive; the canonical form (`Display`, serde) is the
/// lowercase simulator key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SpectralType {
    pub class: SpectralClass,
    pub subclass: u8,
    pub luminosity: LuminosityClass,
}

impl SpectralType {
    /// Lowercase key used by the simulator to look up the stellar SED
    pub fn key(&self) -> String {
        format!(
            "{}{}{}",
            self.class.to_string().to_ascii_lowercase(),
            self.subclass,
            self.luminosity.token()
        )
    }

    /// All spectral types the simulator has a stellar model for
    pub fn vocabulary() -> impl Iterator<Item = SpectralType> {
        PHOENIX_KEYS.iter().filter_map(|key| key.parse().ok())
    }
}

impl FromStr for SpectralType {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        let invalid = || SceneError::InvalidSpectralType(s.to_string());

        if !VOCABULARY.contains(token.as_str()) {
            return Err(invalid());
        }

        let mut chars = token.chars();
        let class = chars.next().and_then(SpectralClass::from_char).ok_or_else(invalid)?;
        let rest = chars.as_str();
        let digits_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(invalid)?;
        let subclass = rest[..digits_end].parse::<u8>().map_err(|_| invalid())?;
        let luminosity = LuminosityClass::from_token(&rest[digits_end..]).ok_or_else(invalid)?;

        Ok(Self {
            class,
            subclass,
            luminosity,
        })
    }
}

impl TryFrom<String> for SpectralType {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SpectralType> for String {
    fn from(value: SpectralType) -> Self {
        value.key()
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
