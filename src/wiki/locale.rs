//! Supported query locales.

use anyhow::Result;

use crate::ui::Style;

/// A language edition of the encyclopedia.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    /// Subdomain code, e.g. `en`.
    pub code: &'static str,
    /// English display name.
    pub name: &'static str,
    /// One-line description of the writing system.
    pub script: &'static str,
}

/// Default locale when neither the CLI nor the config file sets one.
pub const DEFAULT_LOCALE: &str = "en";

/// Supported locales, in display order.
pub const LOCALES: &[Locale] = &[
    Locale {
        code: "en",
        name: "English",
        script: "Uses the Latin alphabet with 26 letters.",
    },
    Locale {
        code: "es",
        name: "Spanish",
        script: "Uses the Latin alphabet with additional characters like 'ñ'.",
    },
    Locale {
        code: "zh",
        name: "Chinese",
        script: "Uses logograms (characters) representing words or morphemes.",
    },
    Locale {
        code: "hi",
        name: "Hindi",
        script: "Uses the Devanagari script with 48 characters.",
    },
    Locale {
        code: "ar",
        name: "Arabic",
        script: "Uses the Arabic script, written from right to left.",
    },
    Locale {
        code: "fr",
        name: "French",
        script: "Uses the Latin alphabet with diacritics like 'é' and 'ç'.",
    },
    Locale {
        code: "ja",
        name: "Japanese",
        script: "Uses a combination of Kanji, Hiragana, and Katakana scripts.",
    },
    Locale {
        code: "ru",
        name: "Russian",
        script: "Uses the Cyrillic alphabet with 33 letters.",
    },
];

/// Looks up a locale by code. Codes are case sensitive.
pub fn describe(code: &str) -> Option<&'static Locale> {
    LOCALES.iter().find(|locale| locale.code == code)
}

pub fn is_supported(code: &str) -> bool {
    describe(code).is_some()
}

pub const fn list_all() -> &'static [Locale] {
    LOCALES
}

/// Prints the locale table to stdout.
pub fn print_locales() {
    println!("{}", Style::header("Supported languages"));
    println!(
        "  {}{}{}",
        Style::label(format!("{:6}", "Code")),
        Style::label(format!("{:10}", "Name")),
        Style::label("Description")
    );
    for locale in list_all() {
        println!(
            "  {}{}{}",
            Style::code(format!("{:6}", locale.code)),
            Style::name(format!("{:10}", locale.name)),
            Style::secondary(locale.script)
        );
    }
}

/// Validates that the given locale code is supported.
///
/// # Errors
///
/// Returns an error if the code is not in the supported list.
pub fn validate_locale(code: &str) -> Result<()> {
    if is_supported(code) {
        Ok(())
    } else {
        let codes: Vec<&str> = LOCALES.iter().map(|l| l.code).collect();
        anyhow::bail!(
            "Invalid language code: '{code}'\n\n\
             Supported codes: {}\n\
             Run 'wikifetch languages' to see their descriptions.",
            codes.join(", ")
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_locale_is_described() {
        for locale in LOCALES {
            let described = describe(locale.code).unwrap();
            assert!(!described.name.is_empty());
            assert!(!described.script.is_empty());
            assert!(is_supported(locale.code));
        }
    }

    #[test]
    fn test_registry_has_eight_entries_in_stable_order() {
        let codes: Vec<&str> = list_all().iter().map(|l| l.code).collect();
        assert_eq!(codes, ["en", "es", "zh", "hi", "ar", "fr", "ja", "ru"]);
    }

    #[test]
    fn test_unsupported_codes() {
        assert!(!is_supported("de"));
        assert!(!is_supported(""));
        assert!(!is_supported("EN")); // Case sensitive
        assert!(describe("xx").is_none());
    }

    #[test]
    fn test_default_locale_is_supported() {
        assert!(is_supported(DEFAULT_LOCALE));
    }

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("ja").is_ok());

        let err = validate_locale("klingon").unwrap_err();
        assert!(err.to_string().contains("Invalid language code"));
    }
}
