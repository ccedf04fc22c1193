//! Item code to GL account resolution.

use tracing::debug;

use crate::models::record::GlAccount;

/// Lookup of GL accounts by exact item code.
pub trait ReferenceLookup {
    /// Find the account for `item_code`, if the table has one.
    fn lookup(&self, item_code: &str) -> Option<&GlAccount>;
}

/// Resolves item codes against a reference lookup with a sentinel fallback.
pub struct ItemResolver<'a> {
    lookup: &'a dyn ReferenceLookup,
}

impl<'a> ItemResolver<'a> {
    pub fn new(lookup: &'a dyn ReferenceLookup) -> Self {
        Self { lookup }
    }

    /// Resolve `item_code`; unknown codes get the `ASK BOSS` account.
    pub fn resolve(&self, item_code: &str) -> GlAccount {
        match self.lookup.lookup(item_code) {
            Some(account) => account.clone(),
            None => {
                debug!("Item code {} not in reference table", item_code);
                GlAccount::unresolved()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    impl ReferenceLookup for HashMap<String, GlAccount> {
        fn lookup(&self, item_code: &str) -> Option<&GlAccount> {
            self.get(item_code)
        }
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let mut table = HashMap::new();
        table.insert("123456".to_string(), GlAccount::new("500100", "Food"));
        let resolver = ItemResolver::new(&table);

        assert_eq!(resolver.resolve("123456"), GlAccount::new("500100", "Food"));
        assert_eq!(
            resolver.resolve("999999"),
            GlAccount::new("ASK BOSS", "ASK BOSS FOR PROPER GL")
        );
        // Exact match only
        assert!(resolver.resolve("0123456").is_unresolved());
        assert!(resolver.resolve("12345").is_unresolved());
    }
}
