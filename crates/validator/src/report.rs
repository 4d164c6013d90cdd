//! Error accumulation and reports
//!
//! A validation run writes one message per failing member into an
//! [`ErrorAccumulator`], keyed by the member's full name. When the run is
//! over the accumulator is frozen into an [`ErrorReport`].

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::foundation::ContractError;

// ============================================================================
// ERROR ACCUMULATOR
// ============================================================================

/// Collects `full name -> message` pairs during one validation run.
#[derive(Debug, Clone, Default)]
pub struct ErrorAccumulator {
    entries: IndexMap<Arc<str>, String>,
}

impl ErrorAccumulator {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the message of a failed member.
    ///
    /// # Errors
    ///
    /// [`ContractError::DuplicateError`] if `full_name` already has a message
    /// in this run.
    pub fn add(
        &mut self,
        full_name: impl Into<Arc<str>>,
        message: impl Into<String>,
    ) -> Result<(), ContractError> {
        match self.entries.entry(full_name.into()) {
            Entry::Occupied(occupied) => Err(ContractError::duplicate_error(&**occupied.key())),
            Entry::Vacant(vacant) => {
                vacant.insert(message.into());
                Ok(())
            }
        }
    }

    /// Returns true if a message was recorded for `full_name`.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.entries.contains_key(full_name)
    }

    /// Number of recorded messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Freezes the accumulated messages into a report.
    #[must_use]
    pub fn build_error_tree(self) -> ErrorReport {
        ErrorReport {
            entries: self.entries,
        }
    }
}

// ============================================================================
// ERROR REPORT
// ============================================================================

/// Immutable result of a validation run.
///
/// Entries keep the order in which members were evaluated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorReport {
    entries: IndexMap<Arc<str>, String>,
}

impl ErrorReport {
    /// The message recorded for `full_name`.
    #[must_use]
    pub fn get(&self, full_name: &str) -> Option<&str> {
        self.entries.get(full_name).map(String::as_str)
    }

    /// Returns true if `full_name` failed.
    #[must_use]
    pub fn contains(&self, full_name: &str) -> bool {
        self.entries.contains_key(full_name)
    }

    /// Number of failed members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if every member passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(full name, message)` in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, message)| (&**name, message.as_str()))
    }

    /// Entries for `prefix` itself and every member nested below it
    /// (`address`, `address.zip`, `address[0]`).
    pub fn under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.iter().filter(move |(name, _)| {
            name.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with('['))
        })
    }

    /// `Ok(value)` if the report is empty, the report otherwise.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ErrorReport> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }

    /// Serializes the report as a JSON object.
    #[cfg(feature = "serde")]
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(name, message)| (name.to_string(), serde_json::Value::from(message.as_str())))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.entries.len())?;
        for (i, (name, message)) in self.iter().enumerate() {
            writeln!(f, "  {}. [{}] {}", i + 1, name, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

#[cfg(feature = "serde")]
impl serde::Serialize for ErrorReport {
    fn serialize<Ser: serde::Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, message) in self.iter() {
            map.serialize_entry(name, message)?;
        }
        map.end()
    }
}

// ============================================================================
// TESTS
// ============================================================================
