//! The closed set of allergen rating dimensions.

use std::fmt;
use std::str::FromStr;

/// One of the three allergy dimensions a review can rate.
///
/// The public API spells the dairy dimension `"Diary"` — the spelling the
/// platform launched with, preserved verbatim so stored links and clients
/// keep working. Parsing is case-sensitive and accepts exactly `"Peanut"`,
/// `"Egg"` and `"Diary"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Allergen {
    /// Peanut allergy rating dimension.
    Peanut,
    /// Egg allergy rating dimension.
    Egg,
    /// Dairy allergy rating dimension (wire spelling `Diary`).
    Dairy,
}

/// Error returned when an allergen filter value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAllergen(pub String);

impl fmt::Display for UnknownAllergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown allergen filter: {}", self.0)
    }
}

impl std::error::Error for UnknownAllergen {}

impl Allergen {
    /// Wire name of the dimension, matching the rating field suffixes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Peanut => "Peanut",
            Self::Egg => "Egg",
            Self::Dairy => "Diary",
        }
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Allergen {
    type Err = UnknownAllergen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Peanut" => Ok(Self::Peanut),
            "Egg" => Ok(Self::Egg),
            "Diary" => Ok(Self::Dairy),
            other => Err(UnknownAllergen(other.to_owned())),
        }
    }
}
