//! Job positions and shift numbers for station workers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of job positions a station worker can hold.
///
/// The Cyrillic labels are what operators see on menus and what the
/// database stores; the variants exist so the rest of the code never
/// passes raw label strings around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    /// Station duty officer, "ДСП".
    StationMaster,
    /// Ticket hall operator, "Оператор".
    Operator,
    /// Cashier, "Кассир".
    Cashier,
    /// Duty attendant, "Дежурный".
    Attendant,
}

impl Position {
    /// Every position, in menu display order.
    pub const ALL: [Self; 4] = [
        Self::StationMaster,
        Self::Operator,
        Self::Cashier,
        Self::Attendant,
    ];

    /// The label shown to users and stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StationMaster => "ДСП",
            Self::Operator => "Оператор",
            Self::Cashier => "Кассир",
            Self::Attendant => "Дежурный",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPosition {
    pub label: String,
}

impl fmt::Display for UnknownPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown position: {}", self.label)
    }
}

impl std::error::Error for UnknownPosition {}

impl FromStr for Position {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| UnknownPosition {
                label: s.to_string(),
            })
    }
}

impl TryFrom<String> for Position {
    type Error = UnknownPosition;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}

/// A work shift number, constrained to 1 through 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Shift(u8);

impl Shift {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    /// Every shift, in menu display order.
    pub const ALL: [Self; 4] = [Self(1), Self(2), Self(3), Self(4)];

    /// Creates a shift if the number is within range.
    #[must_use]
    pub const fn new(number: u8) -> Option<Self> {
        if number >= Self::MIN && number <= Self::MAX {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Returns the shift number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a number is outside the valid shift range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidShift {
    pub number: u8,
}

impl fmt::Display for InvalidShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shift must be between {} and {}, got {}",
            Shift::MIN,
            Shift::MAX,
            self.number
        )
    }
}

impl std::error::Error for InvalidShift {}

impl TryFrom<u8> for Shift {
    type Error = InvalidShift;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Self::new(number).ok_or(InvalidShift { number })
    }
}

impl From<Shift> for u8 {
    fn from(shift: Shift) -> Self {
        shift.0
    }
}

impl FromStr for Shift {
    type Err = InvalidShift;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number: u8 = s.trim().parse().map_err(|_| InvalidShift { number: 0 })?;
        number.try_into()
    }
}
