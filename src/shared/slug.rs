//! URL-safe slugs derived from display names.

/// Lower-case, hyphenate and transliterate `input` into a slug.
///
/// Any script is transliterated to ASCII (`Электроника` becomes
/// `elektronika`), `&` becomes `and` and apostrophes are dropped. Every other
/// run of non-alphanumeric characters collapses to a single `-`. Never fails;
/// the result is empty only when `input` has nothing to keep. Slugifying a
/// slug returns it unchanged.
pub fn slugify(input: &str) -> String {
    let prepared: String = input
        .chars()
        .filter(|ch| !matches!(ch, '\'' | '\u{2019}'))
        .map(|ch| match ch {
            '&' => " and ".to_string(),
            other => other.to_string(),
        })
        .collect();

    slug::slugify(prepared)
}
