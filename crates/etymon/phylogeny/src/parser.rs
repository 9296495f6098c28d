//! Parser for the indented language-tree format.
//!
//! ```text
//! Germanic
//!  NorthGermanic
//!   OldNorse
//!  WestGermanic
//!   OldEnglish <- OldNorse
//! ```
//!
//! Leading spaces give the depth; the optional suffix after the contact
//! separator lists languages with a contact edge into the line's language.

use crate::error::PhylogenyResult;
use crate::indent::{indented_lines, IndentStack};
use crate::phylogeny::Phylogeny;
use crate::types::{LanguageId, TreeSyntax};
use tracing::debug;

/// Reads language-tree text into a [`Phylogeny`].
#[derive(Clone, Debug, Default)]
pub struct PhylogenyParser {
    syntax: TreeSyntax,
}

impl PhylogenyParser {
    pub fn new(syntax: TreeSyntax) -> Self {
        Self { syntax }
    }

    pub fn syntax(&self) -> &TreeSyntax {
        &self.syntax
    }

    pub fn parse(&self, input: &str) -> PhylogenyResult<Phylogeny> {
        let mut phylogeny = Phylogeny::new();
        let mut stack: IndentStack<LanguageId> = IndentStack::new();
        // Contacts may point forward in the file; resolved after all lines are in.
        let mut contacts: Vec<(usize, LanguageId, LanguageId)> = Vec::new();

        for line in indented_lines(input) {
            let line = line?;
            let (name, contact_list) = match line.content.split_once(self.syntax.contact_separator.as_str()) {
                Some((name, rest)) => (name.trim(), Some(rest)),
                None => (line.content, None),
            };

            let parent = stack
                .parent_for(line.number, line.depth)?
                .cloned()
                .unwrap_or_else(LanguageId::root);
            let language = LanguageId::new(name);
            phylogeny
                .add_language(language.clone(), &parent)
                .map_err(|e| e.at_line(line.number))?;

            if let Some(list) = contact_list {
                for contact in list
                    .split(self.syntax.contact_delimiter)
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                {
                    contacts.push((line.number, LanguageId::new(contact), language.clone()));
                }
            }
            stack.push(line.depth, language);
        }

        for (line, source, target) in &contacts {
            phylogeny
                .add_influence(source, target)
                .map_err(|e| e.at_line(*line))?;
        }

        debug!(
            languages = phylogeny.len(),
            contacts = phylogeny.influence_count(),
            "Parsed language tree"
        );
        Ok(phylogeny)
    }
}

/// Parse language-tree text with the default syntax.
pub fn parse_phylogeny(input: &str) -> PhylogenyResult<Phylogeny> {
    PhylogenyParser::default().parse(input)
}
