//! The LSD document tree.

use indexmap::IndexMap;

/// Leaf text of an LSD document.
///
/// Values carry no intrinsic type: `10` is the two-character string `"10"`,
/// and `{x}` appearing in a value position is the literal three characters.
pub type Value = String;

/// Ordered sequence of nodes (`[ ... ]`), addressed by position.
pub type List = Vec<Lsd>;

/// Insertion-ordered mapping from keys to nodes (`{ ... }`).
///
/// Keys are unique within one level; iteration follows first insertion.
pub type Level = IndexMap<Value, Lsd>;

/// A node of a parsed LSD document.
///
/// The root of a successful parse is always a [`Lsd::List`] or a
/// [`Lsd::Level`], never a bare value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lsd {
    /// Opaque text.
    Value(Value),

    /// Ordered items.
    List(List),

    /// Keyed entries.
    Level(Level),
}

impl Default for Lsd {
    /// The empty level, which is also what an empty document parses to.
    fn default() -> Self {
        Self::Level(Level::default())
    }
}

impl PartialEq<&Lsd> for Lsd {
    fn eq(&self, other: &&Lsd) -> bool {
        *self == **other
    }
}

impl PartialEq<Lsd> for &Lsd {
    fn eq(&self, other: &Lsd) -> bool {
        **self == *other
    }
}

impl Lsd {
    /// Get the text, if this node is a value.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Lsd::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Mutable version of [`Lsd::as_value`].
    pub fn as_value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Lsd::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Get the items, if this node is a list.
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Lsd::List(list) => Some(list),
            _ => None,
        }
    }

    /// Mutable version of [`Lsd::as_list`].
    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Lsd::List(list) => Some(list),
            _ => None,
        }
    }

    /// Get the entries, if this node is a level.
    pub fn as_level(&self) -> Option<&Level> {
        match self {
            Lsd::Level(level) => Some(level),
            _ => None,
        }
    }

    /// Mutable version of [`Lsd::as_level`].
    pub fn as_level_mut(&mut self) -> Option<&mut Level> {
        match self {
            Lsd::Level(level) => Some(level),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_empty_level() {
        assert_eq!(Lsd::default(), Lsd::Level(Level::new()));
    }

    #[test]
    fn accessors_match_variants() {
        let value = Lsd::Value("10".to_string());
        assert_eq!(value.as_value().map(String::as_str), Some("10"));
        assert_eq!(value.as_list(), None);
        assert_eq!(value.as_level(), None);

        let list = Lsd::List(vec![Lsd::Value("a".to_string())]);
        assert_eq!(list.as_list().map(Vec::len), Some(1));
        assert_eq!(list.as_value(), None);

        let level = Lsd::Level(Level::from([("a".to_string(), Lsd::default())]));
        assert_eq!(level.as_level().map(Level::len), Some(1));
        assert_eq!(level.as_list(), None);
    }

    #[test]
    fn mutable_accessors_reach_through() {
        let mut node = Lsd::Value("one".to_string());
        node.as_value_mut().unwrap().push_str(" more");
        assert_eq!(node.as_value().map(String::as_str), Some("one more"));

        let mut node = Lsd::List(List::new());
        node.as_list_mut().unwrap().push(Lsd::default());
        assert_eq!(node.as_list().map(Vec::len), Some(1));

        let mut node = Lsd::default();
        node.as_level_mut()
            .unwrap()
            .insert("k".to_string(), Lsd::Value("v".to_string()));
        assert_eq!(node.as_level().map(Level::len), Some(1));
    }

    #[test]
    fn level_iteration_follows_insertion() {
        let mut level = Level::new();
        level.insert("z".to_string(), Lsd::Value("1".to_string()));
        level.insert("a".to_string(), Lsd::Value("2".to_string()));
        level.insert("m".to_string(), Lsd::Value("3".to_string()));
        let keys: Vec<_> = level.keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
