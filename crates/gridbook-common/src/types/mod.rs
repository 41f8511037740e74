//! Car catalog choice sets shared across Gridbook
//!
//! Each submitted car is described by a closed set of mechanical choices.
//! The enums here own the canonical stored spelling (`as_str`) and parse it
//! back with `FromStr`, so the database stores plain text/integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GridbookError;

macro_rules! text_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, { $($variant:ident => $text:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = GridbookError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(GridbookError::invalid_choice(
                        $field,
                        other,
                        concat!($($text, " "),+),
                    )),
                }
            }
        }
    };
}

text_choice!(
    /// Engine layout
    EngineType, "engine_type", {
        V => "V",
        W => "W",
        Inline => "i",
        Boxer => "Boxer",
        Wankel => "Wankle",
        Electric => "Electric",
        Hybrid => "Hybrid",
    }
);

text_choice!(
    /// Gearbox kind
    Transmission, "transmission", {
        Manual => "Manual",
        Automatic => "Automatic",
    }
);

text_choice!(
    FuelType, "fuel_type", {
        Gas => "Gas",
        Diesel => "Diesel",
        Hybrid => "Hybrid",
    }
);

text_choice!(
    /// Driven wheels
    DriveType, "drive_type", {
        Rwd => "RWD",
        Fwd => "FWD",
        Awd => "AWD",
        FourWheel => "4WD",
    }
);

text_choice!(
    /// Moderation lifecycle of a car submission. New submissions start as `Draft`.
    SubmissionStatus, "status", {
        Draft => "Draft",
        Accepted => "Accepted",
        Declined => "Declined",
    }
);

impl Default for SubmissionStatus {
    fn default() -> Self {
        SubmissionStatus::Draft
    }
}

/// Cylinder count, restricted to the counts the catalog accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct Cylinders(i16);

impl Cylinders {
    pub const ALLOWED: [i16; 8] = [16, 12, 10, 8, 6, 5, 4, 3];

    pub fn get(self) -> i16 {
        self.0
    }
}

impl TryFrom<i16> for Cylinders {
    type Error = GridbookError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&value) {
            Ok(Cylinders(value))
        } else {
            Err(GridbookError::invalid_choice(
                "cylinders",
                value,
                "16 12 10 8 6 5 4 3",
            ))
        }
    }
}

impl From<Cylinders> for i16 {
    fn from(value: Cylinders) -> Self {
        value.0
    }
}

impl fmt::Display for Cylinders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
