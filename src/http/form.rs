//! Form body decoding
//!
//! Decodes `application/x-www-form-urlencoded` bodies and groups bracketed keys
//! such as `contact[name]` under their namespace. Later duplicates win.

use std::collections::HashMap;

/// Decoded form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    fields: HashMap<String, String>,
    namespaces: HashMap<String, HashMap<String, String>>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in form_urlencoded::parse(body) {
            form.insert(&key, value.into_owned());
        }
        form
    }

    fn insert(&mut self, key: &str, value: String) {
        match split_nested(key) {
            Some((ns, inner)) => {
                self.namespaces
                    .entry(ns.to_string())
                    .or_default()
                    .insert(inner.to_string(), value);
            }
            None => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    /// Top-level field value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Fields sent as `ns[...]`
    pub fn namespace(&self, ns: &str) -> Option<&HashMap<String, String>> {
        self.namespaces.get(ns)
    }
}

/// Split `ns[inner]` into `(ns, inner)`; anything else is a plain key
fn split_nested(key: &str) -> Option<(&str, &str)> {
    let open = key.find('[')?;
    let rest = key[open + 1..].strip_suffix(']')?;
    let ns = &key[..open];
    if ns.is_empty() || rest.contains('[') || rest.contains(']') {
        return None;
    }
    Some((ns, rest))
}
