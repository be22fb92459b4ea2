// SPDX-FileCopyrightText: 2026 Confidante Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only navigation over a config tree.

use confidante_core::{ConfidanteError, ConfigTree};

/// A borrowed view into a [`ConfigTree`].
///
/// Views never copy or own the tree; every accessor returns another view or
/// a reference with the same lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfigView<'a> {
    value: &'a ConfigTree,
}

impl<'a> ConfigView<'a> {
    pub fn new(value: &'a ConfigTree) -> Self {
        Self { value }
    }

    /// The child under `key`, if this is a mapping that has it.
    pub fn get(&self, key: &str) -> Option<ConfigView<'a>> {
        self.value.as_object()?.get(key).map(ConfigView::new)
    }

    /// The element at `index`, if this is a sequence long enough.
    pub fn at(&self, index: usize) -> Option<ConfigView<'a>> {
        self.value.as_array()?.get(index).map(ConfigView::new)
    }

    /// Like [`get`](Self::get) but fails with [`ConfidanteError::MissingKey`].
    pub fn lookup(&self, key: &str) -> Result<ConfigView<'a>, ConfidanteError> {
        self.get(key)
            .ok_or_else(|| ConfidanteError::MissingKey(key.to_string()))
    }

    /// Dotted lookup, e.g. `"credentials.api_key"` or `"servers.0.host"`.
    ///
    /// Numeric segments index into sequences. The error names the path up
    /// to and including the first segment that is absent.
    pub fn path(&self, dotted: &str) -> Result<ConfigView<'a>, ConfidanteError> {
        let mut current = *self;
        let mut walked = 0;
        for (index, segment) in dotted.split('.').enumerate() {
            walked += segment.len() + usize::from(index > 0);
            let next = match current.value {
                ConfigTree::Array(_) => segment.parse().ok().and_then(|i| current.at(i)),
                _ => current.get(segment),
            };
            current = next.ok_or_else(|| ConfidanteError::MissingKey(dotted[..walked].to_string()))?;
        }
        Ok(current)
    }

    /// The string value, if this is a string scalar.
    pub fn as_str(&self) -> Option<&'a str> {
        self.value.as_str()
    }

    /// The underlying tree node.
    pub fn as_value(&self) -> &'a ConfigTree {
        self.value
    }

    pub fn is_mapping(&self) -> bool {
        self.value.is_object()
    }

    /// Mapping keys in stored order; empty for anything else.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + use<'a> {
        self.value
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ConfigTree {
        json!({
            "service": {"url": "http://x", "debug": false},
            "servers": [{"host": "a"}, {"host": "b"}],
            "port": 8080,
        })
    }

    #[test]
    fn get_and_at_navigate_without_copying() {
        let tree = sample();
        let view = ConfigView::new(&tree);
        let url = view.get("service").and_then(|s| s.get("url")).unwrap();
        assert_eq!(url.as_str(), Some("http://x"));
        assert!(std::ptr::eq(url.as_value(), &tree["service"]["url"]));

        let host = view.get("servers").and_then(|s| s.at(1)).and_then(|s| s.get("host"));
        assert_eq!(host.and_then(|h| h.as_str()), Some("b"));
        assert!(view.get("port").and_then(|p| p.get("x")).is_none());
        assert!(view.at(0).is_none());
    }

    #[test]
    fn lookup_reports_missing_key() {
        let tree = sample();
        let err = ConfigView::new(&tree).lookup("nope").unwrap_err();
        assert_eq!(err.to_string(), "no such configuration key: nope");
    }

    #[test]
    fn dotted_path_walks_mappings_and_sequences() {
        let tree = sample();
        let view = ConfigView::new(&tree);
        assert_eq!(view.path("servers.0.host").unwrap().as_str(), Some("a"));
        assert_eq!(view.path("service.debug").unwrap().as_value(), &json!(false));
        assert_eq!(view.path("port").unwrap().as_value(), &json!(8080));
    }

    #[test]
    fn dotted_path_error_names_the_missing_prefix() {
        let tree = sample();
        let view = ConfigView::new(&tree);
        match view.path("service.tls.cert").unwrap_err() {
            ConfidanteError::MissingKey(key) => assert_eq!(key, "service.tls"),
            other => panic!("expected MissingKey, got {other:?}"),
        }
        assert!(view.path("servers.9.host").is_err());
        assert!(view.path("servers.first").is_err());
    }

    #[test]
    fn keys_lists_mapping_keys_in_order() {
        let tree = sample();
        let view = ConfigView::new(&tree);
        assert_eq!(view.keys().collect::<Vec<_>>(), ["service", "servers", "port"]);
        assert_eq!(view.lookup("port").unwrap().keys().count(), 0);
        assert!(view.is_mapping());
    }
}
