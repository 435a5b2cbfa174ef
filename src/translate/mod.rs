//! Spanish display labels for tagger and parser output.

mod markup;
pub mod tables;

pub use markup::localize_markup;
pub use tables::{dep_label, dep_label_or_code, pos_label, pos_label_or_code};

use crate::nlp::ParsedSentence;
use crate::render::DepTree;

/// One `(<label>: <token>)` line per token, in pipeline order.
pub fn breakdown(parsed: &ParsedSentence) -> String {
    parsed
        .tokens
        .iter()
        .map(|token| format!("({}: {})", pos_label_or_code(&token.pos), token.text))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Translate arc labels, then word tags, of a tree that has not been rendered yet.
/// Word text is left alone even when it spells a code.
pub fn localize_tree(tree: &mut DepTree) {
    for arc in &mut tree.arcs {
        if let Some(spanish) = dep_label(&arc.label) {
            arc.label = spanish.to_string();
        }
    }
    for word in &mut tree.words {
        if let Some(spanish) = pos_label(&word.tag) {
            word.tag = spanish.to_string();
        }
    }
}
