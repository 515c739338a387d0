//! Decoding of loosely typed field maps into validated values.
//!
//! Transport adapters hand the domain a JSON object. [`Fields`] reads named
//! members out of it, checks the JSON type, and runs a value rule, reporting
//! failures as [`FieldError`] so callers learn which field was rejected and
//! why.

use std::fmt;

use serde_json::{Map, Value, json};

use super::entity::{EntityId, EntityKind};
use super::error::Error;

/// Raw input for create and update operations.
pub type FieldMap = Map<String, Value>;

/// Why a field value was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleViolation {
    Empty,
    InvalidCharacters,
    InvalidFormat,
    OutOfRange { min: f64, max: f64 },
    MustBePositive,
    MustNotBeNegative,
    TooShort { min: usize },
    NotAString,
    NotAnInteger,
    NotANumber,
    NotAList,
    UnknownReference { kind: EntityKind },
}

impl RuleViolation {
    /// Stable snake_case identifier reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::InvalidCharacters => "invalid_characters",
            Self::InvalidFormat => "invalid_format",
            Self::OutOfRange { .. } => "out_of_range",
            Self::MustBePositive => "must_be_positive",
            Self::MustNotBeNegative => "must_not_be_negative",
            Self::TooShort { .. } => "too_short",
            Self::NotAString => "not_a_string",
            Self::NotAnInteger => "not_an_integer",
            Self::NotANumber => "not_a_number",
            Self::NotAList => "not_a_list",
            Self::UnknownReference { .. } => "unknown_reference",
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "must not be empty"),
            Self::InvalidCharacters => write!(f, "contains characters that are not allowed"),
            Self::InvalidFormat => write!(f, "is not in the expected format"),
            Self::OutOfRange { min, max } => write!(f, "must be between {min} and {max}"),
            Self::MustBePositive => write!(f, "must be greater than zero"),
            Self::MustNotBeNegative => write!(f, "must not be negative"),
            Self::TooShort { min } => write!(f, "must be at least {min} characters"),
            Self::NotAString => write!(f, "must be a string"),
            Self::NotAnInteger => write!(f, "must be an integer"),
            Self::NotANumber => write!(f, "must be a number"),
            Self::NotAList => write!(f, "must be a list of strings"),
            Self::UnknownReference { kind } => {
                write!(f, "does not reference an existing {kind}")
            }
        }
    }
}

/// A named field that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    field: &'static str,
    violation: RuleViolation,
    value: Value,
}

impl FieldError {
    pub fn new(field: &'static str, violation: RuleViolation, value: impl Into<Value>) -> Self {
        Self {
            field,
            violation,
            value: value.into(),
        }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn violation(&self) -> &RuleViolation {
        &self.violation
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid {} specified: {} ({})",
            self.field, self.value, self.violation
        )
    }
}

impl std::error::Error for FieldError {}

impl From<FieldError> for Error {
    fn from(err: FieldError) -> Self {
        let message = err.to_string();
        Error::invalid_field(err.field, err.violation.code(), message, err.value)
    }
}

/// Typed, rule-checked access to the members of a [`FieldMap`].
///
/// Every accessor returns `Ok(None)` when the member is absent so the same
/// reader serves both create (all required) and update (all optional).
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a FieldMap,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a FieldMap) -> Self {
        Self { map }
    }

    /// Fail with a missing-field error naming the first absent key.
    ///
    /// Keys are checked in the order given.
    ///
    /// # Examples
    /// ```
    /// use hbnb::domain::{ErrorCode, FieldMap, Fields};
    /// use serde_json::json;
    ///
    /// let map: FieldMap = serde_json::from_value(json!({ "email": "a@b.c" })).expect("object");
    /// let err = Fields::new(&map)
    ///     .require(&["first_name", "email", "password"])
    ///     .expect_err("first_name is absent");
    /// assert_eq!(err.code(), ErrorCode::MissingField);
    /// assert_eq!(err.field(), Some("first_name"));
    /// ```
    pub fn require(&self, names: &[&'static str]) -> Result<(), Error> {
        match names.iter().find(|name| !self.map.contains_key(**name)) {
            Some(name) => Err(Error::missing_field(name)),
            None => Ok(()),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// First key from `names` that is present in the map.
    pub fn first_present(&self, names: &[&'static str]) -> Option<&'static str> {
        names.iter().copied().find(|name| self.map.contains_key(*name))
    }

    /// Read a string member and pass it through `rule`.
    pub fn string_with<T>(
        &self,
        name: &'static str,
        rule: impl FnOnce(String) -> Result<T, RuleViolation>,
    ) -> Result<Option<T>, FieldError> {
        let Some(value) = self.map.get(name) else {
            return Ok(None);
        };
        let text = value
            .as_str()
            .ok_or_else(|| FieldError::new(name, RuleViolation::NotAString, value.clone()))?;
        rule(text.to_owned())
            .map(Some)
            .map_err(|violation| FieldError::new(name, violation, value.clone()))
    }

    /// Read a string member verbatim.
    pub fn string(&self, name: &'static str) -> Result<Option<String>, FieldError> {
        self.string_with(name, Ok)
    }

    /// Read an integral member and pass it through `rule`.
    ///
    /// Floating-point values are rejected even when they have no fraction.
    pub fn integer_with<T>(
        &self,
        name: &'static str,
        rule: impl FnOnce(i64) -> Result<T, RuleViolation>,
    ) -> Result<Option<T>, FieldError> {
        let Some(value) = self.map.get(name) else {
            return Ok(None);
        };
        let number = value
            .as_i64()
            .ok_or_else(|| FieldError::new(name, RuleViolation::NotAnInteger, value.clone()))?;
        rule(number)
            .map(Some)
            .map_err(|violation| FieldError::new(name, violation, value.clone()))
    }

    /// Read a numeric member (integral or not) and pass it through `rule`.
    pub fn number_with<T>(
        &self,
        name: &'static str,
        rule: impl FnOnce(f64) -> Result<T, RuleViolation>,
    ) -> Result<Option<T>, FieldError> {
        let Some(value) = self.map.get(name) else {
            return Ok(None);
        };
        let number = value
            .as_f64()
            .ok_or_else(|| FieldError::new(name, RuleViolation::NotANumber, value.clone()))?;
        rule(number)
            .map(Some)
            .map_err(|violation| FieldError::new(name, violation, value.clone()))
    }

    /// Read a list of strings.
    pub fn string_list(&self, name: &'static str) -> Result<Option<Vec<String>>, FieldError> {
        let Some(value) = self.map.get(name) else {
            return Ok(None);
        };
        let not_a_list = || FieldError::new(name, RuleViolation::NotAList, value.clone());
        let items = value.as_array().ok_or_else(not_a_list)?;
        items
            .iter()
            .map(|item| item.as_str().map(str::to_owned).ok_or_else(not_a_list))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Read a reference to a record of `kind`.
    ///
    /// Values that are not identifiers can never resolve, so they are
    /// reported as unknown references.
    pub fn reference(
        &self,
        name: &'static str,
        kind: EntityKind,
    ) -> Result<Option<EntityId>, FieldError> {
        self.string_with(name, |text| {
            text.parse::<EntityId>()
                .map_err(|_| RuleViolation::UnknownReference { kind })
        })
    }
}

/// Unwrap a value whose presence was established by [`Fields::require`].
pub(crate) fn present<T>(name: &'static str, value: Option<T>) -> Result<T, Error> {
    value.ok_or_else(|| Error::missing_field(name))
}

/// Report an unknown reference for `field`.
pub(crate) fn unknown_reference(field: &'static str, kind: EntityKind, value: &str) -> Error {
    FieldError::new(field, RuleViolation::UnknownReference { kind }, json!(value)).into()
}
