//! Attribute bag for elements.

use std::collections::BTreeMap;

/// Element attributes (string keys, string values).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    /// Create an empty attribute set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Set an attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Get an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Get a non-empty attribute.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Get a numeric attribute.
    ///
    /// Only plain ASCII digit strings count; anything else (signs, spaces,
    /// overflow) is treated as if the attribute were absent.
    pub fn get_number(&self, key: &str) -> Option<u64> {
        let value = self.get(key)?;
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        value.parse().ok()
    }

    /// Check if an attribute exists.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterate over attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Check if the attribute set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_number_digits_only() {
        let attrs: Attributes = [("a", "42"), ("b", "-1"), ("c", " 7"), ("d", ""), ("e", "x9")]
            .into_iter()
            .collect();
        assert_eq!(attrs.get_number("a"), Some(42));
        assert_eq!(attrs.get_number("b"), None);
        assert_eq!(attrs.get_number("c"), None);
        assert_eq!(attrs.get_number("d"), None);
        assert_eq!(attrs.get_number("e"), None);
        assert_eq!(attrs.get_number("missing"), None);
    }

    #[test]
    fn test_get_number_overflow_is_absent() {
        let mut attrs = Attributes::new();
        attrs.set("id", "99999999999999999999999");
        assert_eq!(attrs.get_number("id"), None);
    }

    #[test]
    fn test_iter_in_key_order() {
        let attrs: Attributes = [("user_id", "3"), ("author", "bob")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["author", "user_id"]);
    }

    #[test]
    fn test_get_non_empty() {
        let mut attrs = Attributes::new();
        attrs.set("author", "");
        assert_eq!(attrs.get("author"), Some(""));
        assert_eq!(attrs.get_non_empty("author"), None);
    }
}
