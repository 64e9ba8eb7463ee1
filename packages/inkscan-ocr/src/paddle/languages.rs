//! Language code to recognition-script mapping.

use crate::engine::OcrError;

/// Family of languages served by one recognition model and dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    Latin,
    Chinese,
    Japanese,
    Korean,
    Cyrillic,
}

impl Script {
    /// Suffix used in `rec_<name>.onnx` / `dict_<name>.txt`.
    pub fn name(self) -> &'static str {
        match self {
            Script::Latin => "latin",
            Script::Chinese => "chinese",
            Script::Japanese => "japanese",
            Script::Korean => "korean",
            Script::Cyrillic => "cyrillic",
        }
    }

    pub fn for_language(code: &str) -> Option<Self> {
        let script = match code.to_ascii_lowercase().as_str() {
            "en" | "fr" | "de" | "es" | "it" | "pt" | "nl" | "sv" | "da" | "no" | "fi" | "pl"
            | "cs" | "sk" | "sl" | "hr" | "hu" | "ro" | "tr" | "id" | "ms" | "vi" | "la"
            | "ga" | "is" | "et" | "lv" | "lt" | "sq" | "af" | "sw" | "tl" => Script::Latin,
            "ch_sim" | "ch_tra" | "zh" => Script::Chinese,
            "ja" => Script::Japanese,
            "ko" => Script::Korean,
            "ru" | "uk" | "be" | "bg" | "sr" | "mn" => Script::Cyrillic,
            _ => return None,
        };
        Some(script)
    }
}

/// Resolves the single script able to serve every requested language.
///
/// English is accepted alongside any script, as the non-latin models carry
/// latin characters too.
pub fn resolve_script(languages: &[String]) -> Result<Script, OcrError> {
    if languages.is_empty() {
        return Err(OcrError::InvalidInput("no languages requested".to_string()));
    }

    let mut resolved: Option<Script> = None;
    for code in languages {
        let script = Script::for_language(code)
            .ok_or_else(|| OcrError::UnsupportedLanguage(code.clone()))?;
        if code.eq_ignore_ascii_case("en") {
            continue;
        }
        match resolved {
            None => resolved = Some(script),
            Some(existing) if existing == script => {}
            Some(_) => return Err(OcrError::IncompatibleLanguages(languages.to_vec())),
        }
    }

    Ok(resolved.unwrap_or(Script::Latin))
}
