use std::fmt;

/// Positional and named values appended after a record label.
///
/// Renders as `" 1, 2, status=ok"`: positional values first, then
/// `name=value` pairs, in insertion order. An empty set renders as nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Values {
    positional: Vec<String>,
    named: Vec<(String, String)>,
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional value.
    pub fn arg(mut self, value: impl fmt::Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Append a named value.
    pub fn named(mut self, name: impl Into<String>, value: impl fmt::Display) -> Self {
        self.named.push((name.into(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl fmt::Display for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sep = " ";
        for value in &self.positional {
            write!(f, "{}{}", sep, value)?;
            sep = ", ";
        }
        for (name, value) in &self.named {
            write!(f, "{}{}={}", sep, name, value)?;
            sep = ", ";
        }
        Ok(())
    }
}

/// Parse a `label=value` pair from the command line into a label and values.
///
/// A pair without `=` is a bare label.
pub fn parse_record(raw: &str) -> (String, Values) {
    match raw.split_once('=') {
        Some((label, value)) => (label.trim().to_string(), Values::new().arg(value.trim())),
        None => (raw.trim().to_string(), Values::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_positional_then_named() {
        let values = Values::new().arg(1).named("status", "ok").arg("x");
        assert_eq!(values.to_string(), " 1, x, status=ok");
    }

    #[test]
    fn empty_values_render_nothing() {
        assert!(Values::new().is_empty());
        assert_eq!(Values::new().to_string(), "");
    }

    #[test]
    fn parse_record_splits_on_first_equals() {
        let (label, values) = parse_record("accuracy=0.93=rounded");
        assert_eq!(label, "accuracy");
        assert_eq!(values.to_string(), " 0.93=rounded");

        let (label, values) = parse_record("done");
        assert_eq!(label, "done");
        assert!(values.is_empty());
    }
}
