use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;
use std::str::FromStr;

/// Field carrying the loan term; the only field with a rule beyond positivity.
pub const TERM_YEARS: &str = "term_years";

/// Longest term the client accepts before asking the server.
pub const MAX_TERM_YEARS: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// The raw form state collected on a submit.
///
/// Values are kept exactly as entered and serialized as strings; numeric
/// interpretation happens in the validator. Field order is the order the
/// fields were collected in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanInput {
    fields: Vec<(String, String)>,
}

impl LoanInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing an earlier entry of the same name
    /// in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Numeric reading of a field, `None` if absent, blank or not a number.
    pub fn number(&self, name: &str) -> Option<FormNumber> {
        self.get(name).and_then(read_number)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LoanInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut input = LoanInput::new();
        for (name, value) in iter {
            input.insert(name, value);
        }
        input
    }
}

impl Serialize for LoanInput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A form value read as a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FormNumber {
    Exact(Decimal),
    /// Finite, but beyond what `Decimal` holds (e.g. `1e30`).
    Approx(f64),
}

impl FormNumber {
    pub fn is_positive(&self) -> bool {
        match self {
            FormNumber::Exact(value) => *value > Decimal::ZERO,
            FormNumber::Approx(value) => *value > 0.0,
        }
    }

    pub fn exceeds(&self, bound: Decimal) -> bool {
        match self {
            FormNumber::Exact(value) => *value > bound,
            FormNumber::Approx(value) => bound.to_f64().is_some_and(|bound| *value > bound),
        }
    }
}

/// Reads a raw form value, falling back to a float when it parses but is
/// out of `Decimal` range. Non-finite values do not count as numbers.
pub fn read_number(raw: &str) -> Option<FormNumber> {
    if let Some(value) = parse_number(raw) {
        return Some(FormNumber::Exact(value));
    }
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(FormNumber::Approx)
}

/// Parses a raw form value, accepting scientific notation as browsers do.
pub fn parse_number(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}
