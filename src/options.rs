use alloc::string::String;

use crate::ContextNames;

/// Name of the fallback template.
pub const DEFAULT_TEMPLATE: &str = "default";

/// Configuration for one list instance.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BridgeOptions {
    /// How the item and its position are named inside template contexts.
    pub names: ContextNames,
    /// Selected when no conditional template matches.
    pub default_template: String,
}

impl BridgeOptions {
    pub fn new() -> Self {
        Self {
            names: ContextNames::default(),
            default_template: String::from(DEFAULT_TEMPLATE),
        }
    }

    pub fn with_names(mut self, names: ContextNames) -> Self {
        self.names = names;
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.names.alias = alias.into();
        self
    }

    pub fn with_index_name(mut self, index: impl Into<String>) -> Self {
        self.names.index = index.into();
        self
    }

    pub fn with_default_template(mut self, name: impl Into<String>) -> Self {
        self.default_template = name.into();
        self
    }
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self::new()
    }
}
