//! Fixed weighting presets.
//!
//! The constants here are part of the scoring contract: results are only
//! comparable across runs when the preset table matches exactly.

use serde::Serialize;

/// Weighting configuration for [`score_candidate`](super::score_candidate).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Preset {
    /// Weight of the naturalness signal (centroid similarity).
    pub w_naturalness: f32,
    /// Weight of the proximity signal (top-k reference similarity).
    pub w_proximity: f32,
    /// How many top reference similarities the proximity mean covers.
    pub top_k: usize,
}

/// The shipped, named presets. Not user-editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Balanced,
    Naturalness,
    Reference,
    Strict,
    Broad,
}

impl PresetName {
    /// Every shipped preset, in display order.
    pub const ALL: [PresetName; 5] = [
        PresetName::Balanced,
        PresetName::Naturalness,
        PresetName::Reference,
        PresetName::Strict,
        PresetName::Broad,
    ];

    /// Resolves the name to its fixed configuration.
    pub fn preset(self) -> Preset {
        match self {
            PresetName::Balanced => Preset {
                w_naturalness: 0.5,
                w_proximity: 0.5,
                top_k: 5,
            },
            PresetName::Naturalness => Preset {
                w_naturalness: 0.7,
                w_proximity: 0.3,
                top_k: 5,
            },
            PresetName::Reference => Preset {
                w_naturalness: 0.3,
                w_proximity: 0.7,
                top_k: 5,
            },
            PresetName::Strict => Preset {
                w_naturalness: 0.5,
                w_proximity: 0.5,
                top_k: 3,
            },
            PresetName::Broad => Preset {
                w_naturalness: 0.5,
                w_proximity: 0.5,
                top_k: 7,
            },
        }
    }

    /// The lowercase name used on the CLI and in config.
    pub fn as_str(self) -> &'static str {
        match self {
            PresetName::Balanced => "balanced",
            PresetName::Naturalness => "naturalness",
            PresetName::Reference => "reference",
            PresetName::Strict => "strict",
            PresetName::Broad => "broad",
        }
    }
}

impl std::fmt::Display for PresetName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PresetName {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balanced" => Ok(PresetName::Balanced),
            "naturalness" => Ok(PresetName::Naturalness),
            "reference" => Ok(PresetName::Reference),
            "strict" => Ok(PresetName::Strict),
            "broad" => Ok(PresetName::Broad),
            other => Err(UnknownPreset {
                name: other.to_string(),
            }),
        }
    }
}

/// Error for a preset name outside the shipped table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{name}' (expected one of: balanced, naturalness, reference, strict, broad)")]
pub struct UnknownPreset {
    pub name: String,
}
