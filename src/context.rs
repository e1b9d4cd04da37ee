use alloc::string::String;

/// Binding name for the even-position flag.
pub const EVEN_NAME: &str = "$even";
/// Binding name for the odd-position flag.
pub const ODD_NAME: &str = "$odd";

/// The names under which an item and its position are visible to templates.
///
/// Each list instance picks its own scheme; the default is `item` / `index`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContextNames {
    pub alias: String,
    pub index: String,
}

impl ContextNames {
    pub fn new(alias: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            index: index.into(),
        }
    }
}

impl Default for ContextNames {
    fn default() -> Self {
        Self::new("item", "index")
    }
}

/// A value bound in an [`ItemContext`].
#[derive(Debug, PartialEq)]
pub enum ContextValue<'a, T> {
    Item(&'a T),
    Index(usize),
    Flag(bool),
}

impl<T> Clone for ContextValue<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ContextValue<'_, T> {}

/// The bindings a condition or render function runs against.
///
/// Built fresh for every selection/patch call and never retained.
#[derive(Debug)]
pub struct ItemContext<'a, T> {
    names: &'a ContextNames,
    item: &'a T,
    index: usize,
}

impl<T> Clone for ItemContext<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ItemContext<'_, T> {}

impl<'a, T> ItemContext<'a, T> {
    pub fn build(item: &'a T, index: usize, names: &'a ContextNames) -> Self {
        Self { names, item, index }
    }

    pub fn item(&self) -> &'a T {
        self.item
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_even(&self) -> bool {
        self.index % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    pub fn names(&self) -> &'a ContextNames {
        self.names
    }

    /// Resolves a binding by name: the alias, the index name, `$even` or `$odd`.
    ///
    /// The alias wins if a list configures the same name for alias and index.
    pub fn get(&self, name: &str) -> Option<ContextValue<'a, T>> {
        if name == self.names.alias {
            Some(ContextValue::Item(self.item))
        } else if name == self.names.index {
            Some(ContextValue::Index(self.index))
        } else if name == EVEN_NAME {
            Some(ContextValue::Flag(self.is_even()))
        } else if name == ODD_NAME {
            Some(ContextValue::Flag(self.is_odd()))
        } else {
            None
        }
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for ItemContext<'_, T> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry(&self.names.alias, self.item)?;
        map.serialize_entry(&self.names.index, &self.index)?;
        map.serialize_entry(EVEN_NAME, &self.is_even())?;
        map.serialize_entry(ODD_NAME, &self.is_odd())?;
        map.end()
    }
}
