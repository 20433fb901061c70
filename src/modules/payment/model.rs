use std::fmt;

/// Insertion-ordered field set for a gateway request or notification.
///
/// PayFast recomputes signatures over fields in the order they were
/// declared (outbound) or received (inbound), so the order is part of
/// the protocol and the pairs are never sorted.
#[derive(Clone, Debug, Default)]
pub struct FieldSet {
    entries: Vec<(String, String)>,
}

#[derive(Debug, PartialEq)]
pub enum ParseError {
    InvalidEncoding(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEncoding(component) => {
                write!(f, "invalid encoding in component {}", component)
            }
        }
    }
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parses a form-encoded body, preserving pair order. A pair
    /// without `=` is treated as a name with an empty value.
    pub fn from_form_body(body: &str) -> Result<Self, ParseError> {
        let mut fields = Self::new();

        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            fields.push(decode_component(name)?, decode_component(value)?);
        }

        Ok(fields)
    }
}

// `+` means space in form bodies, so it is rewritten to `%20` before
// the percent-escapes are decoded; a literal plus arrives as `%2B`.
fn decode_component(raw: &str) -> Result<String, ParseError> {
    urlencoding::decode(&raw.replace('+', "%20"))
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ParseError::InvalidEncoding(raw.to_string()))
}
