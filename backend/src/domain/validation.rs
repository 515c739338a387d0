//! Single-field value rules.
//!
//! Each type here can only be built from input that satisfies its rule, so
//! entities holding them never carry an unchecked value.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::fields::RuleViolation;

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("pattern {pattern} failed to compile: {error}"))
    })
}

fn alpha_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, "^[a-zA-Z ]+$")
}

fn person_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, "^[a-zA-Z]+$")
}

fn country_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, "^[A-Z][A-Z]$")
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    compiled(&RE, "^[a-zA-Z0-9+_.-]+@[a-zA-Z0-9.-]+$")
}

macro_rules! string_value {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

/// Non-blank name made of ASCII letters and spaces.
///
/// Used for country, city and place names. The input is stored verbatim.
///
/// # Examples
/// ```
/// use hbnb::domain::AlphaName;
///
/// assert!(AlphaName::new("New Zealand").is_ok());
/// assert!(AlphaName::new("R2D2").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlphaName(String);

impl AlphaName {
    pub fn new(raw: impl Into<String>) -> Result<Self, RuleViolation> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(RuleViolation::Empty);
        }
        if !alpha_name_regex().is_match(&raw) {
            return Err(RuleViolation::InvalidCharacters);
        }
        Ok(Self(raw))
    }
}

string_value!(AlphaName);

/// Non-blank personal name made of ASCII letters only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName(String);

impl PersonName {
    pub fn new(raw: impl Into<String>) -> Result<Self, RuleViolation> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(RuleViolation::Empty);
        }
        if !person_name_regex().is_match(&raw) {
            return Err(RuleViolation::InvalidCharacters);
        }
        Ok(Self(raw))
    }
}

string_value!(PersonName);

/// Two uppercase ASCII letters, e.g. `AU`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(raw: impl Into<String>) -> Result<Self, RuleViolation> {
        let raw = raw.into();
        if !country_code_regex().is_match(&raw) {
            return Err(RuleViolation::InvalidFormat);
        }
        Ok(Self(raw))
    }
}

string_value!(CountryCode);

/// Email address of the simple `local@domain` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: impl Into<String>) -> Result<Self, RuleViolation> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(RuleViolation::Empty);
        }
        if !email_regex().is_match(&raw) {
            return Err(RuleViolation::InvalidFormat);
        }
        Ok(Self(raw))
    }
}

string_value!(Email);

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN: usize = 6;

/// Account password.
///
/// Stored and returned as given; the marketplace has no authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> Result<Self, RuleViolation> {
        let raw = raw.into();
        if raw.chars().count() < PASSWORD_MIN {
            return Err(RuleViolation::TooShort { min: PASSWORD_MIN });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.0
    }
}

/// Amenity label: any string that is not blank once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AmenityName(String);

impl AmenityName {
    pub fn new(raw: impl Into<String>) -> Result<Self, RuleViolation> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(RuleViolation::Empty);
        }
        Ok(Self(raw))
    }
}

string_value!(AmenityName);

macro_rules! bounded_coordinate {
    ($name:ident, $limit:expr) => {
        #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
        pub struct $name(f64);

        impl $name {
            pub const LIMIT: f64 = $limit;

            pub fn new(value: f64) -> Result<Self, RuleViolation> {
                if !(-Self::LIMIT..=Self::LIMIT).contains(&value) {
                    return Err(RuleViolation::OutOfRange {
                        min: -Self::LIMIT,
                        max: Self::LIMIT,
                    });
                }
                Ok(Self(value))
            }

            pub fn get(self) -> f64 {
                self.0
            }
        }
    };
}

bounded_coordinate!(Latitude, 90.0);
bounded_coordinate!(Longitude, 180.0);

/// Strictly positive whole number: rooms, bathrooms, guests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PositiveCount(u32);

impl PositiveCount {
    pub fn new(value: i64) -> Result<Self, RuleViolation> {
        if value <= 0 {
            return Err(RuleViolation::MustBePositive);
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| RuleViolation::OutOfRange {
                min: 1.0,
                max: f64::from(u32::MAX),
            })
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

/// Nightly price: finite and not negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct NightlyPrice(f64);

impl NightlyPrice {
    pub fn new(value: f64) -> Result<Self, RuleViolation> {
        if !value.is_finite() {
            return Err(RuleViolation::NotANumber);
        }
        if value < 0.0 {
            return Err(RuleViolation::MustNotBeNegative);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// Review score from 1 to 5 inclusive.
///
/// # Examples
/// ```
/// use hbnb::domain::Rating;
///
/// assert_eq!(Rating::new(4).expect("in range").get(), 4);
/// assert!(Rating::new(6).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Result<Self, RuleViolation> {
        u8::try_from(value)
            .ok()
            .filter(|score| (Self::MIN..=Self::MAX).contains(score))
            .map(Self)
            .ok_or(RuleViolation::OutOfRange {
                min: f64::from(Self::MIN),
                max: f64::from(Self::MAX),
            })
    }

    pub fn get(self) -> u8 {
        self.0
    }
}
