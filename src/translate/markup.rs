use super::tables::{dep_label, pos_label};

/// Translate element text in already-rendered markup.
///
/// Only text nodes that consist exactly of a known code are replaced;
/// attributes, tag names and partial matches are left untouched. Dependency
/// labels are checked before POS tags.
pub fn localize_markup(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + markup.len() / 4);
    let mut rest = markup;

    while let Some(gt) = rest.find('>') {
        out.push_str(&rest[..=gt]);
        rest = &rest[gt + 1..];

        let Some(lt) = rest.find('<') else {
            break;
        };
        let text = &rest[..lt];
        out.push_str(dep_label(text).or_else(|| pos_label(text)).unwrap_or(text));
        rest = &rest[lt..];
    }

    out.push_str(rest);
    out
}
