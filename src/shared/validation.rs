use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Control characters (NUL, escapes, line breaks...) that text stored in
    /// or compared against Postgres `TEXT` columns must not contain
    pub static ref CONTROL_CHAR_REGEX: Regex = Regex::new(r"\p{Cc}").unwrap();
}

#[cfg(test)]
lazy_static! {
    /// Regex for non-empty slugs produced by [`crate::shared::slug::slugify`]
    /// Lowercase alphanumeric segments joined by single hyphens
    /// - Valid: "electronics", "home-appliances", "4k-tvs"
    /// - Invalid: "-tv", "tv-", "tv--sets", "TV", "tv_sets", ""
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}
