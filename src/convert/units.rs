//! Unit tables.

use std::fmt;
use std::str::FromStr;

use super::ConvertError;

/// Family of units a conversion operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Length,
    Temperature,
}

impl Domain {
    /// Stable lowercase label.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Temperature => "temperature",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Domain {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(Self::Length),
            "temperature" | "temp" => Ok(Self::Temperature),
            _ => Err(ConvertError::UnknownDomain {
                domain: s.to_string(),
            }),
        }
    }
}

/// Length units, expressed as multiples of one metre.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Meter,
    Kilometer,
    Centimeter,
    Millimeter,
    Foot,
    Inch,
    Yard,
    Mile,
}

impl LengthUnit {
    /// How many of this unit make one metre.
    #[must_use]
    pub fn per_meter(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Kilometer => 0.001,
            Self::Centimeter => 100.0,
            Self::Millimeter => 1000.0,
            Self::Foot => 3.28084,
            Self::Inch => 39.3701,
            Self::Yard => 1.09361,
            Self::Mile => 0.000_621_371,
        }
    }

    /// Short symbol (`m`, `km`, ...).
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Meter => "m",
            Self::Kilometer => "km",
            Self::Centimeter => "cm",
            Self::Millimeter => "mm",
            Self::Foot => "ft",
            Self::Inch => "in",
            Self::Yard => "yd",
            Self::Mile => "mi",
        }
    }

    /// Converts `value` in `self` to `to`.
    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        value / self.per_meter() * to.per_meter()
    }
}

impl FromStr for LengthUnit {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "m" => Ok(Self::Meter),
            "km" => Ok(Self::Kilometer),
            "cm" => Ok(Self::Centimeter),
            "mm" => Ok(Self::Millimeter),
            "ft" => Ok(Self::Foot),
            "in" => Ok(Self::Inch),
            "yd" => Ok(Self::Yard),
            "mi" => Ok(Self::Mile),
            _ => Err(ConvertError::unknown_unit(Domain::Length.as_str(), s)),
        }
    }
}

/// Temperature scales, converted through Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    fn to_celsius(self, value: f64) -> f64 {
        match self {
            Self::Celsius => value,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
            Self::Kelvin => value - 273.15,
        }
    }

    fn celsius_as(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
            Self::Kelvin => celsius + 273.15,
        }
    }

    /// Short symbol (`c`, `f`, `k`).
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "c",
            Self::Fahrenheit => "f",
            Self::Kelvin => "k",
        }
    }

    /// Converts `value` in `self` to `to`.
    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        to.celsius_as(self.to_celsius(value))
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" => Ok(Self::Celsius),
            "f" => Ok(Self::Fahrenheit),
            "k" => Ok(Self::Kelvin),
            _ => Err(ConvertError::unknown_unit(Domain::Temperature.as_str(), s)),
        }
    }
}
