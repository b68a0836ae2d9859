//! Font style types

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Font weight: a keyword or a numeric weight (100-900)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Lighter,
    Bolder,
    Numeric(u16),
}

impl FontWeight {
    /// Check if the weight renders bold
    pub fn is_bold(&self) -> bool {
        match self {
            FontWeight::Bold | FontWeight::Bolder => true,
            FontWeight::Numeric(n) => *n >= 600,
            FontWeight::Normal | FontWeight::Lighter => false,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FontWeight::Normal => f.write_str("normal"),
            FontWeight::Bold => f.write_str("bold"),
            FontWeight::Lighter => f.write_str("lighter"),
            FontWeight::Bolder => f.write_str("bolder"),
            FontWeight::Numeric(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for FontWeight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(FontWeight::Normal),
            "bold" => Ok(FontWeight::Bold),
            "lighter" => Ok(FontWeight::Lighter),
            "bolder" => Ok(FontWeight::Bolder),
            other => other
                .parse::<u16>()
                .ok()
                .filter(|n| (1..=1000).contains(n))
                .map(FontWeight::Numeric)
                .ok_or_else(|| Error::other(format!("Invalid font weight: {}", s))),
        }
    }
}

impl Serialize for FontWeight {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            FontWeight::Numeric(n) => serializer.serialize_u16(*n),
            keyword => serializer.collect_str(keyword),
        }
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u16),
            Keyword(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(FontWeight::Numeric(n)),
            Repr::Keyword(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Font slant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSlant {
    #[default]
    Normal,
    Italic,
}

/// Text decoration line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}
