//! Game settings and preferences
//!
//! Read once at startup from JSON or from the page's query string. Never
//! written back.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MUSIC_URL, MUSIC_VOLUME};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Number of drifting background stars
    pub fn drift_stars(&self) -> usize {
        match self {
            QualityPreset::Low => 100,
            QualityPreset::Medium => 200,
            QualityPreset::High => 300,
        }
    }

    /// Number of flickering background stars
    pub fn flicker_stars(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 50,
            QualityPreset::High => 80,
        }
    }

    /// Triangles per full circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 24,
            QualityPreset::High => 48,
        }
    }

    /// Whether asteroid trails are drawn
    pub fn trails_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Draw the background starfield
    pub starfield: bool,

    /// Soundtrack location
    pub music_url: String,
    /// Soundtrack volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start muted
    pub muted: bool,

    /// Fixed RNG seed; the host picks one from the clock when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            starfield: true,
            music_url: MUSIC_URL.to_owned(),
            music_volume: MUSIC_VOLUME,
            muted: false,
            seed: None,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Apply `key=value` pairs from a URL query string such as `?quality=low&muted=1`
    ///
    /// Unknown keys and unparsable values are skipped with a warning.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        for pair in query.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let applied = match key {
                "quality" => QualityPreset::parse(value).map(|q| settings.quality = q),
                "muted" => parse_flag(value).map(|m| settings.muted = m),
                "stars" => parse_flag(value).map(|s| settings.starfield = s),
                "volume" => value.parse::<f32>().ok().map(|v| settings.music_volume = v),
                "seed" => value.parse::<u64>().ok().map(|s| settings.seed = Some(s)),
                _ => None,
            };
            if applied.is_none() {
                log::warn!("Ignoring setting '{}'", pair);
            }
        }
        settings.sanitized()
    }

    fn sanitized(mut self) -> Self {
        self.music_volume = if self.music_volume.is_finite() {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            MUSIC_VOLUME
        };
        self
    }

    /// The fixed seed if one was given, otherwise one drawn from `clock`
    pub fn run_seed(&self, clock: impl FnOnce() -> u64) -> u64 {
        self.seed.unwrap_or_else(clock)
    }

    /// Star counts after applying the starfield toggle
    pub fn star_counts(&self) -> (usize, usize) {
        if self.starfield {
            (self.quality.drift_stars(), self.quality.flicker_stars())
        } else {
            (0, 0)
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value {
        "" | "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert_eq!(s.quality, QualityPreset::Medium);
        assert_eq!(s.star_counts(), (200, 50));
        assert_eq!(s.music_volume, 0.5);
        assert!(!s.muted);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"quality":"low","music_volume":3.0}"#).unwrap();
        assert_eq!(s.quality, QualityPreset::Low);
        assert_eq!(s.music_volume, 1.0);
        assert!(s.starfield);
        assert_eq!(s.music_url, MUSIC_URL);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Settings::from_json("{quality"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_query_string() {
        let s = Settings::from_query("?quality=high&muted&seed=42&volume=0.25&bogus=1");
        assert_eq!(s.quality, QualityPreset::High);
        assert!(s.muted);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.music_volume, 0.25);

        let s = Settings::from_query("stars=0");
        assert_eq!(s.star_counts(), (0, 0));
    }

    #[test]
    fn test_preset_round_trip_names() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            assert_eq!(QualityPreset::parse(preset.as_str()), Some(preset));
        }
        assert!(!QualityPreset::Low.trails_enabled());
    }

    #[test]
    fn test_fixed_seed_survives_restart() {
        let fixed = Settings::from_query("seed=42");
        assert_eq!(fixed.run_seed(|| 7), 42);
        assert_eq!(fixed.run_seed(|| 8), 42);
        assert_eq!(Settings::default().run_seed(|| 7), 7);
    }

    #[test]
    fn test_from_preset_scales_detail() {
        let low = Settings::from_preset(QualityPreset::Low);
        let high = Settings::from_preset(QualityPreset::High);
        assert_eq!(low.quality, QualityPreset::Low);
        assert_eq!(low.music_volume, Settings::default().music_volume);
        assert!(low.star_counts().0 < high.star_counts().0);
        assert!(low.quality.circle_segments() < high.quality.circle_segments());
        assert_eq!(Settings::from_preset(QualityPreset::Medium), Settings::default());
    }
}
