/// One entry of the static language catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub native_name: &'static str,
}

// Codes are unique by construction; the selectors render this order as-is.
const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", native_name: "English" },
    Language { code: "ta", name: "Tamil", native_name: "தமிழ்" },
    Language { code: "hi", name: "Hindi", native_name: "हिन्दी" },
    Language { code: "es", name: "Spanish", native_name: "Español" },
    Language { code: "fr", name: "French", native_name: "Français" },
    Language { code: "de", name: "German", native_name: "Deutsch" },
    Language { code: "ja", name: "Japanese", native_name: "日本語" },
];

pub fn all() -> &'static [Language] {
    LANGUAGES
}

pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|language| language.code == code)
}

/// Display name for a code, falling back to the code itself for tags
/// outside the catalog.
pub fn display_name(code: &str) -> &str {
    find(code).map(|language| language.name).unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_seven_unique_codes() {
        assert_eq!(all().len(), 7);
        let codes: HashSet<_> = all().iter().map(|l| l.code).collect();
        assert_eq!(codes.len(), all().len());
    }

    #[test]
    fn find_known_and_unknown() {
        assert_eq!(find("ta").map(|l| l.name), Some("Tamil"));
        assert!(find("xx").is_none());
    }

    #[test]
    fn display_name_falls_back_to_code() {
        assert_eq!(display_name("fr"), "French");
        assert_eq!(display_name("tlh"), "tlh");
    }
}
