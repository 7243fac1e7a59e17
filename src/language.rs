use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source language translated to English, identified on the wire by a fixed code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LanguagePair {
    #[default]
    #[serde(rename = "es-en")]
    SpanishToEnglish,
    #[serde(rename = "po-en")]
    PortugueseToEnglish,
    #[serde(rename = "fr-en")]
    FrenchToEnglish,
    #[serde(rename = "de-en")]
    GermanToEnglish,
    #[serde(rename = "it-en")]
    ItalianToEnglish,
    #[serde(rename = "tr-en")]
    TurkishToEnglish,
    #[serde(rename = "ru-en")]
    RussianToEnglish,
    #[serde(rename = "nl-en")]
    DutchToEnglish,
    #[serde(rename = "ar-en")]
    ArabicToEnglish,
    #[serde(rename = "zh-en")]
    ChineseToEnglish,
    #[serde(rename = "jap-en")]
    JapaneseToEnglish,
    #[serde(rename = "ko-en")]
    KoreanToEnglish,
    #[serde(rename = "ur-en")]
    UrduToEnglish,
    #[serde(rename = "hi-en")]
    HindiToEnglish,
    #[serde(rename = "id-en")]
    IndonesianToEnglish,
}

/// Selector entry as presented to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported language pair: {0}")]
pub struct UnknownLanguagePair(pub String);

impl LanguagePair {
    /// Selector order.
    pub const ALL: [LanguagePair; 15] = [
        LanguagePair::SpanishToEnglish,
        LanguagePair::PortugueseToEnglish,
        LanguagePair::FrenchToEnglish,
        LanguagePair::GermanToEnglish,
        LanguagePair::ItalianToEnglish,
        LanguagePair::TurkishToEnglish,
        LanguagePair::RussianToEnglish,
        LanguagePair::DutchToEnglish,
        LanguagePair::ArabicToEnglish,
        LanguagePair::ChineseToEnglish,
        LanguagePair::JapaneseToEnglish,
        LanguagePair::KoreanToEnglish,
        LanguagePair::UrduToEnglish,
        LanguagePair::HindiToEnglish,
        LanguagePair::IndonesianToEnglish,
    ];

    pub fn code(self) -> &'static str {
        match self {
            LanguagePair::SpanishToEnglish => "es-en",
            LanguagePair::PortugueseToEnglish => "po-en",
            LanguagePair::FrenchToEnglish => "fr-en",
            LanguagePair::GermanToEnglish => "de-en",
            LanguagePair::ItalianToEnglish => "it-en",
            LanguagePair::TurkishToEnglish => "tr-en",
            LanguagePair::RussianToEnglish => "ru-en",
            LanguagePair::DutchToEnglish => "nl-en",
            LanguagePair::ArabicToEnglish => "ar-en",
            LanguagePair::ChineseToEnglish => "zh-en",
            LanguagePair::JapaneseToEnglish => "jap-en",
            LanguagePair::KoreanToEnglish => "ko-en",
            LanguagePair::UrduToEnglish => "ur-en",
            LanguagePair::HindiToEnglish => "hi-en",
            LanguagePair::IndonesianToEnglish => "id-en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LanguagePair::SpanishToEnglish => "Spanish to English",
            LanguagePair::PortugueseToEnglish => "Portuguese to English",
            LanguagePair::FrenchToEnglish => "French to English",
            LanguagePair::GermanToEnglish => "German to English",
            LanguagePair::ItalianToEnglish => "Italian to English",
            LanguagePair::TurkishToEnglish => "Turkish to English",
            LanguagePair::RussianToEnglish => "Russian to English",
            LanguagePair::DutchToEnglish => "Dutch to English",
            LanguagePair::ArabicToEnglish => "Arabic to English",
            LanguagePair::ChineseToEnglish => "Chinese to English",
            LanguagePair::JapaneseToEnglish => "Japanese to English",
            LanguagePair::KoreanToEnglish => "Korean to English",
            LanguagePair::UrduToEnglish => "Urdu to English",
            LanguagePair::HindiToEnglish => "Hindi to English",
            LanguagePair::IndonesianToEnglish => "Indonesian to English",
        }
    }

    pub fn options() -> Vec<LanguageOption> {
        Self::ALL
            .iter()
            .map(|pair| LanguageOption {
                code: pair.code(),
                label: pair.label(),
            })
            .collect()
    }
}

impl FromStr for LanguagePair {
    type Err = UnknownLanguagePair;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|pair| pair.code() == s)
            .ok_or_else(|| UnknownLanguagePair(s.to_string()))
    }
}

impl fmt::Display for LanguagePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
