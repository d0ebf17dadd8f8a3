use std::collections::HashMap;

use heck::{ToKebabCase, ToLowerCamelCase};
use indexmap::{IndexMap, IndexSet};

use crate::error::Error::{DuplicateAlias, ReservedAlias};
use crate::error::Result;
use crate::question::{Item, Kind};

/// Aliases taken by `-h/--help` and `-v/--version`.
const RESERVED_ALIASES: [&str; 2] = ["h", "v"];

/// The options a question set accepts, keyed by question key.
///
/// The table knows names only. Whether repeated values accumulate is
/// decided per question once it is built, since a dynamic item's kind is
/// not known until its closure runs.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    keys: IndexSet<String>,
    aliases: HashMap<String, String>,
}

impl OptionTable {
    /// Builds the table from declared items. Static task questions take no
    /// value and are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if an alias is reserved, repeated, or shadows a key.
    pub fn build(items: &IndexMap<String, Item>) -> Result<Self> {
        let mut table = Self::default();

        for (key, item) in items {
            let kind = item.static_question().map(|question| question.kind());
            if kind == Some(Kind::Task) {
                continue;
            }

            table.keys.insert(key.clone());

            if let Some(alias) = &item.alias {
                if RESERVED_ALIASES.contains(&alias.as_str()) {
                    return Err(ReservedAlias(alias.clone()));
                }

                let taken = table.aliases.contains_key(alias)
                    || (items.contains_key(alias) && alias != key);
                if taken {
                    return Err(DuplicateAlias {
                        alias: alias.clone(),
                        key: key.clone(),
                    });
                }

                table.aliases.insert(alias.clone(), key.clone());
            }
        }

        Ok(table)
    }

    /// Resolves an option name (without leading dashes) to its question key.
    ///
    /// Tried in order: the key itself, an alias, the camelCase form of a
    /// kebab-case name, and finally any key whose kebab-case form matches.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        if let Some(key) = self.keys.get(name) {
            return Some(key);
        }

        if let Some(key) = self.aliases.get(name) {
            return Some(key);
        }

        let camel = name.to_lower_camel_case();
        if let Some(key) = self.keys.get(camel.as_str()) {
            return Some(key);
        }

        self.keys
            .iter()
            .find(|key| key.to_kebab_case() == name)
            .map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn alias_of(&self, key: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(_, target)| target.as_str() == key)
            .map(|(alias, _)| alias.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

/// The long option a key is given with, e.g. `userName` → `--user-name`.
pub fn option_name(key: &str) -> String {
    format!("--{}", key.to_kebab_case())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::{Choice, Question};
    use crate::task::{Task, TaskOutcome};

    fn items() -> IndexMap<String, Item> {
        let mut items = IndexMap::new();
        items.insert(
            "userName".to_string(),
            Item::new("Name of the user", Question::text("Name?")).alias("u"),
        );
        items.insert(
            "fruits".to_string(),
            Item::new(
                "Fruits",
                Question::multiselect("Fruits?").choice(Choice::new("apple")),
            ),
        );
        items.insert(
            "install".to_string(),
            Item::new(
                "Install",
                Question::task("Installing", Task::new(|_| Ok(TaskOutcome::new("ok")))),
            ),
        );
        items
    }

    #[test]
    fn test_lookup_variants() {
        let table = OptionTable::build(&items()).unwrap();

        assert_eq!(table.lookup("userName"), Some("userName"));
        assert_eq!(table.lookup("user-name"), Some("userName"));
        assert_eq!(table.lookup("u"), Some("userName"));
        assert_eq!(table.lookup("fruits"), Some("fruits"));
        assert_eq!(table.lookup("unknown"), None);
    }

    #[test]
    fn test_kebab_key_matches_kebab_option() {
        let mut items = IndexMap::new();
        items.insert(
            "user-name".to_string(),
            Item::new("Name", Question::text("Name?")),
        );
        let table = OptionTable::build(&items).unwrap();
        assert_eq!(table.lookup("user-name"), Some("user-name"));
    }

    #[test]
    fn test_tasks_take_no_option() {
        let table = OptionTable::build(&items()).unwrap();
        assert_eq!(table.lookup("install"), None);
        assert!(table.contains("fruits"));
        assert!(table.contains("userName"));
        assert!(!table.contains("install"));
    }

    #[test]
    fn test_reserved_alias() {
        let mut items = IndexMap::new();
        items.insert(
            "verbose".to_string(),
            Item::new("Verbose", Question::confirm("Verbose?")).alias("v"),
        );
        let result = OptionTable::build(&items);
        assert!(matches!(result, Err(ReservedAlias(alias)) if alias == "v"));
    }

    #[test]
    fn test_duplicate_alias() {
        let mut items = IndexMap::new();
        items.insert(
            "name".to_string(),
            Item::new("Name", Question::text("Name?")).alias("n"),
        );
        items.insert(
            "nickname".to_string(),
            Item::new("Nickname", Question::text("Nickname?")).alias("n"),
        );
        let result = OptionTable::build(&items);
        assert!(matches!(result, Err(DuplicateAlias { .. })));
    }

    #[test]
    fn test_option_name() {
        assert_eq!(option_name("userName"), "--user-name");
        assert_eq!(option_name("drink"), "--drink");
        assert_eq!(option_name("user-name"), "--user-name");
    }
}
