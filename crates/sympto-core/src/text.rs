//! Text normalization shared by the vocabulary builder and the matcher.
//!
//! Both sides of a match must see the same transform, otherwise a symptom
//! cleaned at build time could never be found at query time.

/// Characters kept verbatim besides ASCII lowercase letters, digits and whitespace.
const KEPT_PUNCTUATION: [char; 3] = ['/', ',', '-'];

/// Separators between discrete symptoms inside one free-text cell.
pub const FRAGMENT_SEPARATORS: [char; 3] = [',', ';', '/'];

/// Normalize a cell or a query: lowercase, replace every character outside
/// `[a-z0-9\s/,-]` with a space, collapse whitespace and trim.
pub fn clean_text(raw: &str) -> String {
    let mapped: String = raw
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || KEPT_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split a free-text symptom cell on runs of `,` `;` `/` and clean every
/// fragment. Empty fragments are dropped.
pub fn split_symptom_cell(cell: &str) -> Vec<String> {
    cell.split(|c: char| FRAGMENT_SEPARATORS.contains(&c))
        .map(clean_text)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize a header: trim, lowercase, spaces to underscores.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Title-case a cleaned name for display ("fungal infection" -> "Fungal Infection").
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when the text holds nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_strips_punctuation_and_case() {
        assert_eq!(clean_text("  Skin_Rash!! "), "skin rash");
        assert_eq!(clean_text("Pain\r\nin   the CHEST"), "pain in the chest");
        assert_eq!(clean_text("(vertigo) Paroymsal  Positional Vertigo"), "vertigo paroymsal positional vertigo");
    }

    #[test]
    fn clean_text_keeps_allowed_punctuation() {
        assert_eq!(clean_text("back-pain, fever/chills"), "back-pain, fever/chills");
    }

    #[test]
    fn clean_text_of_symbols_is_empty() {
        assert_eq!(clean_text("?!*"), "");
        assert_eq!(clean_text(""), "");
    }

    #[test]
    fn split_cell_on_every_separator() {
        assert_eq!(
            split_symptom_cell(" itching; skin_rash,,nodal skin eruptions / "),
            vec!["itching", "skin rash", "nodal skin eruptions"]
        );
    }

    #[test]
    fn column_names_are_normalized() {
        assert_eq!(normalize_column_name(" Symptom 1 "), "symptom_1");
        assert_eq!(normalize_column_name("Disease"), "disease");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("fungal infection"), "Fungal Infection");
        assert_eq!(title_case(""), "");
    }
}
