use crate::model::NormalizedProduct;

/// Decides whether a normalized listing title refers to `product`.
///
/// With a family the title must contain the family and the model as a whole
/// token. Without one, a plain substring hit on the model is enough.
pub fn matches(product: &NormalizedProduct, title: &str) -> bool {
    let model = product.model.as_str();
    if model.is_empty() {
        return false;
    }

    match product.family.as_deref() {
        Some(family) => title.contains(family) && contains_word_bounded(title, model),
        None => title.contains(model),
    }
}

/// True if `needle` occurs in `haystack` with no word character directly
/// before or after it. The needle is matched literally.
fn contains_word_bounded(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }

    let mut from = 0;
    while let Some(offset) = haystack[from..].find(needle) {
        let start = from + offset;
        let end = start + needle.len();

        let before = haystack[..start].chars().next_back();
        let after = haystack[end..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }

        // occurrences may overlap, step one char
        from = start + haystack[start..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
