//! Shared read-only context handed to the playground widgets.

use crate::config::CapabilityDefinition;
use std::collections::BTreeMap;

/// Capability entry the model selector reads.
pub const MODEL_CAPABILITY: &str = "image_generation";

/// Result of looking up a capability by name.
///
/// `Missing` is kept distinct from an empty option list so a misspelled
/// capability key is observable instead of being masked as "no options".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityLookup<'a> {
    Found(&'a [String]),
    Missing,
}

impl<'a> CapabilityLookup<'a> {
    /// Options to render; a missing capability renders as an empty list.
    pub fn options(self) -> &'a [String] {
        match self {
            CapabilityLookup::Found(options) => options,
            CapabilityLookup::Missing => &[],
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, CapabilityLookup::Missing)
    }
}

/// Read-only state shared across widgets: the capability map scoping what
/// may be configured, and whether the session may change anything at all.
#[derive(Debug, Clone, Default)]
pub struct SharedContext {
    capabilities: BTreeMap<String, Vec<String>>,
    is_authorized: bool,
}

impl SharedContext {
    pub fn new(capabilities: BTreeMap<String, Vec<String>>, is_authorized: bool) -> Self {
        Self {
            capabilities,
            is_authorized,
        }
    }

    /// Build the context from persisted capability definitions.
    pub fn from_definitions(definitions: &[CapabilityDefinition], is_authorized: bool) -> Self {
        let capabilities = definitions
            .iter()
            .map(|definition| (definition.name.clone(), definition.options.clone()))
            .collect();
        Self::new(capabilities, is_authorized)
    }

    /// Whether the current session may change gated settings.
    pub fn is_authorized(&self) -> bool {
        self.is_authorized
    }

    pub fn capability_options(&self, name: &str) -> CapabilityLookup<'_> {
        match self.capabilities.get(name) {
            Some(options) => CapabilityLookup::Found(options),
            None => CapabilityLookup::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(name: &str, options: &[&str]) -> SharedContext {
        let mut capabilities = BTreeMap::new();
        capabilities.insert(
            name.to_string(),
            options.iter().map(|s| s.to_string()).collect(),
        );
        SharedContext::new(capabilities, true)
    }

    #[test]
    fn test_lookup_found_preserves_order() {
        let context = context_with(MODEL_CAPABILITY, &["dall-e-3", "dall-e-2"]);

        let lookup = context.capability_options(MODEL_CAPABILITY);
        assert_eq!(lookup.options(), ["dall-e-3", "dall-e-2"]);
        assert!(!lookup.is_missing());
    }

    #[test]
    fn test_lookup_missing_is_distinct_from_empty() {
        let context = context_with(MODEL_CAPABILITY, &[]);

        let found = context.capability_options(MODEL_CAPABILITY);
        assert!(!found.is_missing(), "empty list is still Found");
        assert!(found.options().is_empty());

        let missing = context.capability_options("image_generaton");
        assert!(missing.is_missing(), "misspelled key must surface as Missing");
        assert!(missing.options().is_empty());
    }

    #[test]
    fn test_from_definitions() {
        let definitions = vec![CapabilityDefinition {
            name: MODEL_CAPABILITY.to_string(),
            options: vec!["gpt-image-1".to_string()],
            builtin: true,
        }];

        let context = SharedContext::from_definitions(&definitions, false);

        assert!(!context.is_authorized());
        assert_eq!(
            context.capability_options(MODEL_CAPABILITY).options(),
            ["gpt-image-1"]
        );
    }
}
