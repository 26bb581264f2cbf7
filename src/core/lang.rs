//! Language name resolution to DeepL language codes

/// Alias table mapping human-readable language names to DeepL codes.
///
/// Keys are lower-cased; lookup normalizes the input the same way. Several
/// aliases may point at the same code ("english" and "american english"
/// both resolve to EN-US).
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("english", "EN-US"),
    ("british english", "EN-GB"),
    ("american english", "EN-US"),
    ("japanese", "JA"),
    ("german", "DE"),
    ("french", "FR"),
    ("spanish", "ES"),
    ("italian", "IT"),
    ("dutch", "NL"),
    ("polish", "PL"),
    ("portuguese", "PT-PT"),
    ("brazilian portuguese", "PT-BR"),
    ("russian", "RU"),
    ("chinese", "ZH-HANS"),
    ("simplified chinese", "ZH-HANS"),
    ("traditional chinese", "ZH-HANT"),
    ("korean", "KO"),
    ("indonesian", "ID"),
    ("turkish", "TR"),
    ("ukrainian", "UK"),
    ("czech", "CS"),
    ("danish", "DA"),
    ("finnish", "FI"),
    ("greek", "EL"),
    ("hungarian", "HU"),
    ("norwegian", "NB"),
    ("romanian", "RO"),
    ("slovak", "SK"),
    ("swedish", "SV"),
    ("bulgarian", "BG"),
    ("estonian", "ET"),
    ("latvian", "LV"),
    ("lithuanian", "LT"),
    ("slovenian", "SL"),
];

/// Resolve a language name or code to a DeepL language code.
///
/// Known aliases ("Japanese", "brazilian portuguese") map through the alias
/// table; anything else passes through upper-cased and trimmed, so codes
/// like "de" or "en-us" stay usable. With `for_source` set, region suffixes
/// are stripped because DeepL source codes never carry one (PT-BR becomes
/// PT). Unrecognized codes are not rejected here; the API rejects them.
pub fn resolve_language_code(lang: &str, for_source: bool) -> String {
    let normalized = lang.trim().to_lowercase();
    let code = LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == normalized)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| lang.trim().to_uppercase());

    if for_source {
        if let Some((base, _)) = code.split_once('-') {
            return base.to_string();
        }
    }

    code
}
