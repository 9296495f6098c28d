//! Parser for the indented descent format.
//!
//! ```text
//! p1
//!  w1
//!   w3
//!  -> w2
//!  L7:w1
//! ```
//!
//! Depth-0 lines attach to the virtual root and open a new concept anchor.
//! Deeper lines attach to the closest shallower line above them; the
//! borrowing marker turns the edge into a borrowing edge. An explicit
//! `language:` prefix names the form's language, otherwise it is derived
//! from the id.

use crate::error::DescentResult;
use crate::tree::DescentTree;
use crate::types::{DescentConfig, EdgeKind, FormId};
use etymon_phylogeny::indent::{indented_lines, IndentStack};
use etymon_phylogeny::{LanguageId, Phylogeny};
use tracing::debug;

/// Reads descent text into a [`DescentTree`].
#[derive(Clone, Debug, Default)]
pub struct DescentParser {
    config: DescentConfig,
}

impl DescentParser {
    pub fn new(config: DescentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// Parse the descent text. Forms are not yet marked known.
    pub fn parse(&self, input: &str) -> DescentResult<DescentTree> {
        let mut tree = DescentTree::new();
        let mut stack: IndentStack<FormId> = IndentStack::new();
        let mut borrowings = 0usize;

        for line in indented_lines(input) {
            let line = line?;
            let borrowed = line.content.contains(self.config.borrowing_marker.as_str());
            let token = if borrowed {
                line.content.replace(self.config.borrowing_marker.as_str(), "")
            } else {
                line.content.to_string()
            };
            let id = FormId::new(token.trim());
            let language = self.language_of(&id);

            let source = stack.parent_for(line.number, line.depth)?.cloned();
            let attached = match &source {
                None => tree.attach_root(id.clone(), language, self.config.root_cost),
                Some(parent) => {
                    let edge = if borrowed {
                        borrowings += 1;
                        EdgeKind::Borrowing
                    } else {
                        EdgeKind::Inheritance
                    };
                    tree.attach_child(
                        id.clone(),
                        language,
                        parent,
                        edge,
                        self.config.edge_cost(edge),
                    )
                }
            };
            attached.map_err(|e| e.at_line(line.number))?;
            stack.push(line.depth, id);
        }

        debug!(
            forms = tree.len(),
            pegs = tree.pegs().len(),
            borrowings,
            "Parsed descent tree"
        );
        Ok(tree)
    }

    /// Parse the descent text and mark forms of leaf languages as known.
    pub fn parse_against(&self, input: &str, phylogeny: &Phylogeny) -> DescentResult<DescentTree> {
        let mut tree = self.parse(input)?;
        let known = tree.mark_known(phylogeny)?;
        debug!(known, "Marked attested forms");
        Ok(tree)
    }

    fn language_of(&self, id: &FormId) -> LanguageId {
        match id.as_str().split_once(self.config.language_separator) {
            Some((language, _)) => LanguageId::new(language.trim()),
            None => self.config.language_derivation.derive(id.as_str()),
        }
    }
}

/// Parse descent text with the default configuration.
pub fn parse_descent(input: &str) -> DescentResult<DescentTree> {
    DescentParser::default().parse(input)
}
