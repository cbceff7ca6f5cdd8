use serde::Serialize;

/// A language target bound to one dictionary file in the base directory.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub label: &'static str,
    pub filename: &'static str,
}

pub const PROFILES: [LanguageProfile; 5] = [
    LanguageProfile {
        code: "en",
        label: "EN (English)",
        filename: "dictionary_en.txt",
    },
    LanguageProfile {
        code: "ko",
        label: "KO (한국어)",
        filename: "dictionary_ko.txt",
    },
    LanguageProfile {
        code: "es",
        label: "ES (Español)",
        filename: "dictionary_es.txt",
    },
    LanguageProfile {
        code: "pt",
        label: "PT (Português)",
        filename: "dictionary_pt.txt",
    },
    LanguageProfile {
        code: "fr",
        label: "FR (Français)",
        filename: "dictionary_fr.txt",
    },
];

pub fn default_profile() -> &'static LanguageProfile {
    &PROFILES[0]
}

/// Looks a profile up by code, ignoring ASCII case ("KO" and "ko" both work).
pub fn find(code: &str) -> Option<&'static LanguageProfile> {
    let code = code.trim();
    PROFILES.iter().find(|p| p.code.eq_ignore_ascii_case(code))
}

pub fn filenames() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|p| p.filename)
}
