//! Slug derivation for catalogue entities
//!
//! Slugs are deterministic from the display name: folded to ASCII,
//! lowercased, runs of non-alphanumerics collapsed to a single `-`, capped
//! at [`MAX_SLUG_LEN`] characters. Uniqueness is the owning store's problem;
//! [`disambiguate`] appends a numeric suffix until the caller stops
//! reporting collisions.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Longest slug the catalogue accepts.
pub const MAX_SLUG_LEN: usize = 50;

lazy_static! {
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a slug from a display name.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase();
    let dashed = NON_ALNUM.replace_all(&folded, "-");
    let mut slug = dashed.trim_matches('-').to_string();
    slug.truncate(MAX_SLUG_LEN);
    slug.trim_end_matches('-').to_string()
}

/// Resolve a slug collision by appending `-1`, `-2`, ... until `is_taken`
/// stops matching. The base itself is returned when it is free.
pub fn disambiguate<F>(base: &str, is_taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !is_taken(base) {
        return base.to_string();
    }
    let mut n = 1u32;
    loop {
        let candidate = format!("{}-{}", base, n);
        if !is_taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ACME Conf", "acme-conf")]
    #[case("Simpósio Brasileiro", "simposio-brasileiro")]
    #[case("  Workshop -- on / Testing!  ", "workshop-on-testing")]
    #[case("2024", "2024")]
    fn slugify_cases(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn slugify_caps_length() {
        let long = "x".repeat(80);
        assert_eq!(slugify(&long).len(), MAX_SLUG_LEN);
    }

    #[test]
    fn disambiguate_appends_suffix() {
        let taken = ["acme-conf", "acme-conf-1"];
        assert_eq!(
            disambiguate("acme-conf", |s| taken.contains(&s)),
            "acme-conf-2"
        );
        assert_eq!(disambiguate("fresh", |s| taken.contains(&s)), "fresh");
    }
}
