//! Language identifiers accepted by the segmenters

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages known to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Language {
    /// Japanese
    Japanese,
    /// Korean
    Korean,
    /// Chinese, script unspecified
    Chinese,
    /// Simplified Chinese (mainland)
    ChineseSimplified,
    /// Traditional Chinese (Taiwan)
    ChineseTraditional,
    /// Traditional Chinese (Hong Kong)
    ChineseHongKong,
}

impl Language {
    /// All known languages
    pub const ALL: [Language; 6] = [
        Language::Japanese,
        Language::Korean,
        Language::Chinese,
        Language::ChineseSimplified,
        Language::ChineseTraditional,
        Language::ChineseHongKong,
    ];

    /// Parse a language code such as `ja` or `zh-TW`
    pub fn from_code(code: &str) -> Result<Self, EngineError> {
        match code.to_ascii_lowercase().replace('_', "-").as_str() {
            "ja" | "jpn" | "japanese" => Ok(Language::Japanese),
            "ko" | "kor" | "korean" => Ok(Language::Korean),
            "zh" | "zho" | "chinese" => Ok(Language::Chinese),
            "zh-cn" | "zh-hans" => Ok(Language::ChineseSimplified),
            "zh-tw" | "zh-hant" => Ok(Language::ChineseTraditional),
            "zh-hk" => Ok(Language::ChineseHongKong),
            _ => Err(EngineError::UnknownLanguage(code.to_string())),
        }
    }

    /// Canonical language code
    pub fn code(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::Korean => "ko",
            Language::Chinese => "zh",
            Language::ChineseSimplified => "zh-CN",
            Language::ChineseTraditional => "zh-TW",
            Language::ChineseHongKong => "zh-HK",
        }
    }

    /// Key of the embedded table set this language uses
    pub(crate) fn table_key(&self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::Korean => "ko",
            _ => "zh",
        }
    }
}

impl FromStr for Language {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
    }
}

impl TryFrom<String> for Language {
    type Error = EngineError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Language::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
