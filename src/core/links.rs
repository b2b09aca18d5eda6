//! Outgoing link annotations
//!
//! A link tells the server which related object(s) to associate when the
//! entity is written back. Links are either attached explicitly by the
//! caller or promoted from read-time relations.

use serde_json::Value;

/// Link metadata attached when an object is linked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkConfig {
    /// Payload key the link is written under
    pub name: String,
    /// Whether the link carries a collection rather than a single object
    pub multiple: bool,
}

impl LinkConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiple: false,
        }
    }

    pub fn multiple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            multiple: true,
        }
    }
}

/// One named link
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub name: String,
    pub value: Value,
    pub multiple: bool,
}

/// Named links held by an entity, in attachment order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkSet {
    links: Vec<Link>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a value under the config's name.
    ///
    /// Linking under an existing name replaces that link in place, so
    /// repeated attachment is idempotent.
    pub fn link(&mut self, value: Value, config: LinkConfig) {
        let link = Link {
            name: config.name,
            value,
            multiple: config.multiple,
        };
        match self.links.iter().position(|l| l.name == link.name) {
            Some(idx) => self.links[idx] = link,
            None => self.links.push(link),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_link_and_get() {
        let mut links = LinkSet::new();
        links.link(json!({"name": "Acme"}), LinkConfig::new("agent"));
        assert_eq!(links.get("agent").unwrap().value, json!({"name": "Acme"}));
        assert!(!links.get("agent").unwrap().multiple);
    }

    #[test]
    fn test_relink_replaces_in_place() {
        let mut links = LinkSet::new();
        links.link(json!(1), LinkConfig::new("agent"));
        links.link(json!([1, 2]), LinkConfig::multiple("positions"));
        links.link(json!(2), LinkConfig::new("agent"));

        assert_eq!(links.len(), 2);
        assert_eq!(links.get("agent").unwrap().value, json!(2));
        // attachment order is kept on replacement
        let names: Vec<&str> = links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["agent", "positions"]);
    }
}
