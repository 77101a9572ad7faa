//! Validated primitive types shared across the MedFlow crates.
//!
//! These wrappers guarantee their invariants at construction time so that
//! downstream code never has to re-check them.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` and ensures it contains at least one non-whitespace
/// character. The input is trimmed of leading and trailing whitespace during
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the
    /// trimmed result is empty, an error is returned.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing a CPF.
#[derive(Debug, thiserror::Error)]
pub enum CpfError {
    /// The input did not match the `###.###.###-##` pattern
    #[error("CPF must match the pattern ###.###.###-##")]
    Format,
}

/// A Brazilian national id (CPF) in its canonical formatted form.
///
/// The value is guaranteed to match `###.###.###-##`: three groups of three
/// digits separated by dots, a dash, and two digits. Digit-sum verification
/// is intentionally not performed: registration accepts whatever document
/// the patient presents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cpf(String);

impl Cpf {
    /// Parses a CPF from its formatted representation.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, CpfError> {
        let raw = input.as_ref().trim();
        if !Self::is_formatted(raw) {
            return Err(CpfError::Format);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Returns the formatted CPF as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_formatted(raw: &str) -> bool {
        let bytes = raw.as_bytes();
        if bytes.len() != 14 {
            return false;
        }
        bytes.iter().enumerate().all(|(i, b)| match i {
            3 | 7 => *b == b'.',
            11 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
    }
}

impl std::fmt::Display for Cpf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Cpf {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for Cpf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Cpf::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_and_accepts_content() {
        let text = NonEmptyText::new("  120/80 mmHg  ").expect("should accept non-empty input");
        assert_eq!(text.as_str(), "120/80 mmHg");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        let err = NonEmptyText::new("   ").expect_err("whitespace-only input should fail");
        assert!(matches!(err, TextError::Empty));
    }

    #[test]
    fn cpf_accepts_canonical_format() {
        let cpf = Cpf::parse("123.456.789-00").expect("formatted CPF should parse");
        assert_eq!(cpf.as_str(), "123.456.789-00");
    }

    #[test]
    fn cpf_rejects_wrong_separators_and_lengths() {
        for bad in ["12345678900", "123.456.789_00", "123.456.78-900", "123.456.789-0"] {
            let err = Cpf::parse(bad).expect_err("malformed CPF should fail");
            assert!(matches!(err, CpfError::Format), "input: {bad}");
        }
    }

    #[test]
    fn cpf_round_trips_through_serde() {
        let cpf = Cpf::parse("111.222.333-44").unwrap();
        let json = serde_json::to_string(&cpf).unwrap();
        assert_eq!(json, "\"111.222.333-44\"");
        let back: Cpf = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cpf);
    }
}
