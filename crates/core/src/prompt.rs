//! Question set construction.

use indexmap::IndexMap;
use log::debug;

use crate::arguments::positional::parse_all;
use crate::arguments::{OptionTable, Positional};
use crate::error::Error::{DuplicateQuestion, NoChoices};
use crate::error::Result;
use crate::question::{Item, Question};

/// An immutable, validated question set. Call [`Prompt::show`] to run it.
pub struct Prompt {
    pub(crate) positionals: Vec<Positional>,
    pub(crate) items: IndexMap<String, Item>,
    pub(crate) options: OptionTable,
}

impl Prompt {
    pub fn builder() -> PromptBuilder {
        PromptBuilder::default()
    }

    pub fn positionals(&self) -> &[Positional] {
        &self.positionals
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(key, item)| (key.as_str(), item))
    }

    pub fn options(&self) -> &OptionTable {
        &self.options
    }
}

#[derive(Default)]
pub struct PromptBuilder {
    positionals: Vec<String>,
    questions: Vec<(String, Item)>,
}

impl PromptBuilder {
    /// Declares a positional argument: `<name>` is required, `[name]` optional.
    #[must_use]
    pub fn positional(mut self, declaration: impl Into<String>) -> Self {
        self.positionals.push(declaration.into());
        self
    }

    #[must_use]
    pub fn question(mut self, key: impl Into<String>, item: Item) -> Self {
        self.questions.push((key.into(), item));
        self
    }

    /// Validates the declarations.
    ///
    /// # Errors
    ///
    /// Returns an error if a positional is malformed or out of order, a key
    /// or alias repeats, or a static select question has no choices.
    pub fn build(self) -> Result<Prompt> {
        let positionals = parse_all(&self.positionals)?;

        let mut items = IndexMap::with_capacity(self.questions.len());
        for (key, item) in self.questions {
            if let Some(Question::Select(select)) = item.static_question() {
                if select.all_choices().is_empty() {
                    return Err(NoChoices(key));
                }
            }

            if items.contains_key(&key) {
                return Err(DuplicateQuestion(key));
            }
            items.insert(key, item);
        }

        let options = OptionTable::build(&items)?;
        debug!(
            "Built question set with {} positionals and {} questions",
            positionals.len(),
            items.len()
        );

        Ok(Prompt {
            positionals,
            items,
            options,
        })
    }
}
