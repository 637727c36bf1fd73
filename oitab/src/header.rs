// Copyright 2026 the oitab developers and collaborators
// Licensed under the MIT License.

//! Header cards of a table.

use crate::value::Value;

/// A single header entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Card {
    pub name: String,
    pub value: Value,
    pub comment: String,
}

/// An ordered set of header cards with unique, upper-case names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Header {
    cards: Vec<Card>,
}

impl Header {
    pub fn new() -> Self {
        Header { cards: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        let name = name.to_ascii_uppercase();
        self.cards.iter().find(|c| c.name == name).map(|c| &c.value)
    }

    /// Get a string-valued card. Cards of other types yield None.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Set a card, keeping its position and comment if it already exists.
    pub fn set<V: Into<Value>>(&mut self, name: &str, value: V) {
        let name = name.to_ascii_uppercase();
        let value = value.into();

        match self.cards.iter_mut().find(|c| c.name == name) {
            Some(card) => card.value = value,
            None => self.cards.push(Card {
                name,
                value,
                comment: String::new(),
            }),
        }
    }

    /// Set a card and its comment.
    pub fn set_with_comment<V: Into<Value>>(&mut self, name: &str, value: V, comment: &str) {
        self.set(name, value);
        let name = name.to_ascii_uppercase();

        if let Some(card) = self.cards.iter_mut().find(|c| c.name == name) {
            card.comment = comment.to_owned();
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let name = name.to_ascii_uppercase();
        let index = self.cards.iter().position(|c| c.name == name)?;
        Some(self.cards.remove(index).value)
    }
}

impl<'a, V: Into<Value>> FromIterator<(&'a str, V)> for Header {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut header = Header::new();

        for (name, value) in iter {
            header.set(name, value);
        }

        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut h = Header::new();
        h.set("insname", "GRAVITY_SC");
        h.set_with_comment("OI_REVN", 2i64, "revision");
        assert_eq!(h.get_str("INSNAME"), Some("GRAVITY_SC"));
        assert_eq!(h.get("oi_revn"), Some(&Value::Int(2)));
        assert_eq!(h.get_str("OI_REVN"), None);

        h.set("INSNAME", "PIONIER");
        assert_eq!(h.len(), 2);
        assert_eq!(h.iter().next().map(|c| c.name.as_str()), Some("INSNAME"));

        assert_eq!(h.remove("INSNAME"), Some(Value::from("PIONIER")));
        assert!(!h.contains("INSNAME"));
    }

    #[test]
    fn collect() {
        let h: Header = vec![("ARRNAME", "VLTI"), ("INSNAME", "PIONIER")]
            .into_iter()
            .collect();
        assert_eq!(h.len(), 2);
    }
}
