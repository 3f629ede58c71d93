//! Closed sets of values attached to a product.
//!
//! Each classification round-trips through a fixed textual form, which is used
//! both on the wire and in storage.

use std::{fmt::Display, str::FromStr};

/// The error returned when text does not name a variant of a classification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// The classification that was being parsed
    pub kind: &'static str,
    /// The offending text
    pub value: String,
}

macro_rules! text_enum {
    ($enum:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $enum {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The canonical textual form of this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $enum {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant {
                        kind: $kind,
                        value: s.to_owned(),
                    }),
                }
            }
        }
    };
}

/// How a product reaches its buyer.
///
/// This is a two-valued classification derived from the `isPhysical` flag of a
/// request; it is never supplied directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// A release shipped as a physical item
    Physical,
    /// A release delivered as a download
    Digital,
}

text_enum!(Distribution, "distribution", {
    Physical => "physical",
    Digital => "digital",
});

impl From<bool> for Distribution {
    /// `true` means physical, `false` means digital.
    fn from(is_physical: bool) -> Self {
        if is_physical {
            Self::Physical
        } else {
            Self::Digital
        }
    }
}

/// The medium a release is sold on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaFormat {
    /// Vinyl record
    Vinyl,
    /// Compact disc
    Cd,
    /// Compact cassette
    Cassette,
    /// MPEG-1 Audio Layer III file
    Mp3,
    /// Free Lossless Audio Codec file
    Flac,
    /// Waveform audio file
    Wav,
    /// Advanced Audio Coding file
    Aac,
}

text_enum!(MediaFormat, "format", {
    Vinyl => "VINYL",
    Cd => "CD",
    Cassette => "CASSETTE",
    Mp3 => "MP3",
    Flac => "FLAC",
    Wav => "WAV",
    Aac => "AAC",
});

/// The currencies a price may be quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Pound sterling
    Gbp,
    /// Euro
    Eur,
    /// United States dollar
    Usd,
}

text_enum!(Currency, "currency", {
    Gbp => "GBP",
    Eur => "EUR",
    Usd => "USD",
});
