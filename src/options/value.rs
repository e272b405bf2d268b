//! Typed option values and text coercion.

/// A coerced option value as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl std::fmt::Display for OptionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Integer(i) => write!(f, "{}", i),
            OptionValue::Text(s) => f.write_str(s),
        }
    }
}

/// A declared option type: how raw text is coerced and what its zero value is.
pub trait OptionType: Sized + Clone {
    /// Human readable type name used in coercion errors.
    const TYPE_NAME: &'static str;

    /// Parse raw text. `None` means the text is not a valid `Self`.
    fn parse(raw: &str) -> Option<Self>;

    fn from_value(value: &OptionValue) -> Option<Self>;

    fn into_value(self) -> OptionValue;

    /// Value returned when a key is neither set nor defaulted.
    fn zero() -> Self;
}

impl OptionType for bool {
    const TYPE_NAME: &'static str = "boolean";

    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Bool(self)
    }

    fn zero() -> Self {
        false
    }
}

impl OptionType for i64 {
    const TYPE_NAME: &'static str = "integer";

    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Integer(self)
    }

    fn zero() -> Self {
        0
    }
}

impl OptionType for String {
    const TYPE_NAME: &'static str = "string";

    fn parse(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }

    fn from_value(value: &OptionValue) -> Option<Self> {
        match value {
            OptionValue::Text(s) => Some(s.clone()),
            _ => None,
        }
    }

    fn into_value(self) -> OptionValue {
        OptionValue::Text(self)
    }

    fn zero() -> Self {
        String::new()
    }
}
