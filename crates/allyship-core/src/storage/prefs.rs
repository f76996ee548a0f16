//! Display and prompt preferences.
//!
//! Stored as the `prefs` blob:
//! `{contrast, fontSize, useSpecialFont, theme, cadence, cadenceStart}`.
//! Missing or unreadable fields fall back to their defaults and unknown
//! fields are ignored, so an old or hand-edited blob never fails to load.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

use super::lenient;
use crate::cadence::{Cadence, CadenceConfig};
use crate::dates::{format_iso, iso_date, parse_iso};
use crate::error::ValidationError;
use crate::prompts::ThemeFilter;

/// Contrast mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Contrast {
    #[default]
    Normal,
    High,
}

impl FromStr for Contrast {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "normal" => Ok(Contrast::Normal),
            "high" => Ok(Contrast::High),
            other => Err(ValidationError::InvalidValue {
                field: "contrast".to_string(),
                message: format!("expected normal or high, got '{other}'"),
            }),
        }
    }
}

/// Text scale factor, kept within the range the display offers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FontScale(f64);

impl FontScale {
    pub const MIN: f64 = 0.9;
    pub const MAX: f64 = 1.4;

    /// Clamp `value` into range; non-finite values reset to 1.0.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(Self::MIN, Self::MAX))
        } else {
            Self::default()
        }
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

impl Default for FontScale {
    fn default() -> Self {
        Self(1.0)
    }
}

impl<'de> Deserialize<'de> for FontScale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(FontScale::new)
    }
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prefs {
    #[serde(default, deserialize_with = "lenient")]
    pub contrast: Contrast,
    #[serde(default, deserialize_with = "lenient")]
    pub font_size: FontScale,
    #[serde(
        default = "default_true",
        alias = "useLexend",
        deserialize_with = "lenient_bool_true"
    )]
    pub use_special_font: bool,
    #[serde(default, deserialize_with = "lenient")]
    pub theme: ThemeFilter,
    #[serde(default, deserialize_with = "lenient")]
    pub cadence: Cadence,
    #[serde(
        default,
        serialize_with = "iso_date::option::serialize",
        deserialize_with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub cadence_start: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

fn lenient_bool_true<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or(true))
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| parse_iso(s).ok()))
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            contrast: Contrast::Normal,
            font_size: FontScale::default(),
            use_special_font: true,
            theme: ThemeFilter::All,
            cadence: Cadence::SelfPaced,
            cadence_start: None,
        }
    }
}

impl Prefs {
    /// Known keys, in stored order.
    pub const KEYS: [&'static str; 6] = [
        "contrast",
        "fontSize",
        "useSpecialFont",
        "theme",
        "cadence",
        "cadenceStart",
    ];

    /// The cadence anchored at `cadenceStart`, or at `fallback_start` when
    /// no start has been chosen.
    pub fn cadence_config(&self, fallback_start: NaiveDate) -> CadenceConfig {
        CadenceConfig::new(self.cadence, self.cadence_start.unwrap_or(fallback_start))
    }

    /// Get a value as a string by its stored key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match json.get(key) {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            // Known key that is currently unset.
            None if Self::KEYS.contains(&key) => Some(String::new()),
            None => None,
        }
    }

    /// Set a value by its stored key, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not parse.
    /// Font sizes outside the display range are clamped, not rejected.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ValidationError> {
        let invalid = |message: String| ValidationError::InvalidValue {
            field: key.to_string(),
            message,
        };
        match key {
            "contrast" => self.contrast = value.parse()?,
            "fontSize" => {
                let raw: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                self.font_size = FontScale::new(raw);
            }
            "useSpecialFont" => {
                self.use_special_font = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?;
            }
            "theme" => self.theme = value.parse()?,
            "cadence" => self.cadence = value.parse()?,
            "cadenceStart" => {
                self.cadence_start = if value.trim().is_empty() {
                    None
                } else {
                    Some(parse_iso(value.trim()).map_err(|e| invalid(e.to_string()))?)
                };
            }
            _ => {
                return Err(ValidationError::InvalidValue {
                    field: key.to_string(),
                    message: "unknown preference key".to_string(),
                })
            }
        }
        Ok(())
    }

    /// Key/value pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        Self::KEYS
            .iter()
            .map(|k| (*k, self.get(k).unwrap_or_default()))
            .collect()
    }

    pub fn cadence_start_iso(&self) -> Option<String> {
        self.cadence_start.as_ref().map(format_iso)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::Theme;

    #[test]
    fn default_values() {
        let prefs = Prefs::default();
        assert_eq!(prefs.contrast, Contrast::Normal);
        assert_eq!(prefs.font_size.get(), 1.0);
        assert!(prefs.use_special_font);
        assert_eq!(prefs.theme, ThemeFilter::All);
        assert_eq!(prefs.cadence, Cadence::SelfPaced);
        assert_eq!(prefs.cadence_start, None);
    }

    #[test]
    fn missing_and_unknown_fields_are_defaulted() {
        let prefs: Prefs = serde_json::from_str(r#"{"contrast":"high","mystery":42}"#).unwrap();
        assert_eq!(prefs.contrast, Contrast::High);
        assert_eq!(prefs.cadence, Cadence::SelfPaced);
    }

    #[test]
    fn bad_field_values_fall_back_individually() {
        let prefs: Prefs = serde_json::from_str(
            r#"{"contrast":"neon","fontSize":"big","useSpecialFont":"yes","theme":"Gardening",
                "cadence":"weekly","cadenceStart":"2025-02-30"}"#,
        )
        .unwrap();
        assert_eq!(prefs.contrast, Contrast::Normal);
        assert_eq!(prefs.font_size, FontScale::default());
        assert!(prefs.use_special_font);
        assert_eq!(prefs.theme, ThemeFilter::All);
        assert_eq!(prefs.cadence, Cadence::Weekly);
        assert_eq!(prefs.cadence_start, None);
    }

    #[test]
    fn reads_legacy_font_flag() {
        let prefs: Prefs = serde_json::from_str(r#"{"useLexend":false,"fontSize":2.5}"#).unwrap();
        assert!(!prefs.use_special_font);
        assert_eq!(prefs.font_size.get(), FontScale::MAX);
    }

    #[test]
    fn serializes_stored_layout() {
        let mut prefs = Prefs::default();
        prefs.set("cadenceStart", "2025-03-03").unwrap();
        prefs.set("theme", "Visibility").unwrap();
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["cadenceStart"], "2025-03-03");
        assert_eq!(json["theme"], "Visibility");
        assert_eq!(json["contrast"], "normal");
        assert_eq!(json["fontSize"], 1.0);
        assert_eq!(json["useSpecialFont"], true);
        assert_eq!(json["cadence"], "self");

        let back: Prefs = serde_json::from_value(json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn set_validates_values() {
        let mut prefs = Prefs::default();
        prefs.set("cadence", "3x").unwrap();
        assert_eq!(prefs.cadence, Cadence::ThreeTimesWeekly);
        prefs.set("theme", "advocacy").unwrap();
        assert_eq!(prefs.theme, ThemeFilter::Only(Theme::Advocacy));
        prefs.set("fontSize", "0.5").unwrap();
        assert_eq!(prefs.font_size.get(), FontScale::MIN);
        prefs.set("useSpecialFont", "false").unwrap();
        assert!(!prefs.use_special_font);

        assert!(prefs.set("cadence", "monthly").is_err());
        assert!(prefs.set("fontSize", "huge").is_err());
        assert!(prefs.set("cadenceStart", "tomorrow").is_err());
        assert!(prefs.set("volume", "11").is_err());
    }

    #[test]
    fn get_returns_strings_for_all_keys() {
        let prefs = Prefs::default();
        assert_eq!(prefs.get("contrast").as_deref(), Some("normal"));
        assert_eq!(prefs.get("fontSize").as_deref(), Some("1.0"));
        assert_eq!(prefs.get("useSpecialFont").as_deref(), Some("true"));
        assert_eq!(prefs.get("cadenceStart").as_deref(), Some(""));
        assert!(prefs.get("missing").is_none());
        assert_eq!(prefs.entries().len(), 6);
    }

    #[test]
    fn cadence_config_uses_fallback_start() {
        let mut prefs = Prefs::default();
        prefs.set("cadence", "weekly").unwrap();
        let fallback = parse_iso("2025-01-01").unwrap();
        assert_eq!(prefs.cadence_config(fallback).start_date, fallback);
        prefs.set("cadenceStart", "2025-02-03").unwrap();
        assert_eq!(
            prefs.cadence_config(fallback).start_date,
            parse_iso("2025-02-03").unwrap()
        );
    }
}
