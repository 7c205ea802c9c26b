//! One-click color-grading presets.
//!
//! Each preset maps a stable identifier to the instruction text that is sent
//! verbatim as the generation prompt.

use serde::Serialize;

use crate::error::CoreError;

/// A named, fixed instruction string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preset {
    /// Stable identifier used by the CLI and the catalog endpoint.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Short description shown next to the name.
    pub description: &'static str,
    /// Instruction text submitted as the prompt.
    pub prompt: &'static str,
}

/* --------------------------------------------------------------------------
   Catalog
   -------------------------------------------------------------------------- */

pub const CINEMATIC: Preset = Preset {
    id: "cinematic",
    name: "Cinematic",
    description: "Hollywood movie look with rich colors",
    prompt: "Apply professional cinematic color grading with deep shadows, rich highlights, \
             warm skin tones, and film-like quality. Create a Hollywood blockbuster aesthetic \
             with enhanced contrast and saturation.",
};

pub const WARM_SUNSET: Preset = Preset {
    id: "warm",
    name: "Warm Sunset",
    description: "Golden hour warmth",
    prompt: "Apply warm sunset color grading with golden hour lighting, orange and yellow tones, \
             soft warm glow, enhanced warmth in highlights, and dreamy sunset atmosphere.",
};

pub const COOL_MOOD: Preset = Preset {
    id: "cool",
    name: "Cool Mood",
    description: "Cool blue tones",
    prompt: "Apply cool moody color grading with blue and teal tones, dramatic shadows, \
             cinematic look, reduced warmth, and atmospheric cool palette.",
};

pub const VINTAGE_FILM: Preset = Preset {
    id: "vintage",
    name: "Vintage Film",
    description: "Classic retro film look",
    prompt: "Apply vintage film color grading with faded colors, warm nostalgic tones, slight \
             grain texture, retro aesthetic, reduced saturation, and classic film photography look.",
};

pub const VIBRANT_POP: Preset = Preset {
    id: "vibrant",
    name: "Vibrant Pop",
    description: "Punchy vivid colors",
    prompt: "Apply vibrant pop color grading with boosted saturation, punchy colors, enhanced \
             vibrancy, bright and energetic palette, increased clarity and sharpness.",
};

pub const NATURAL_HDR: Preset = Preset {
    id: "natural",
    name: "Natural HDR",
    description: "Enhanced natural look",
    prompt: "Apply natural HDR color grading with balanced exposure, enhanced dynamic range, \
             natural color reproduction, perfect white balance, and professional landscape \
             photography look.",
};

pub const ULTRA_4K_HDR: Preset = Preset {
    id: "4k-hdr",
    name: "4K HDR Ultra",
    description: "Maximum quality enhancement",
    prompt: "Enhance to 4K HDR quality with ultra-high definition details, maximum sharpness, \
             professional color depth, expanded dynamic range, perfect clarity, enhanced texture \
             details, and cinematic 4K resolution quality.",
};

pub const ULTRA_SHARP: Preset = Preset {
    id: "ultra-sharp",
    name: "Ultra Sharp",
    description: "Crystal clear enhancement",
    prompt: "Apply ultra-sharp enhancement with maximum detail clarity, professional sharpening, \
             enhanced edge definition, crystal clear focus, texture enhancement, and \
             high-definition quality improvement.",
};

/// All presets in display order.
pub const PRESETS: &[Preset] = &[
    CINEMATIC,
    WARM_SUNSET,
    COOL_MOOD,
    VINTAGE_FILM,
    VIBRANT_POP,
    NATURAL_HDR,
    ULTRA_4K_HDR,
    ULTRA_SHARP,
];

impl Preset {
    /// Look up a preset by identifier.
    pub fn find(id: &str) -> Option<&'static Preset> {
        PRESETS.iter().find(|p| p.id == id)
    }

    /// Like [`Preset::find`], but reports unknown ids as a validation error.
    pub fn require(id: &str) -> Result<&'static Preset, CoreError> {
        Self::find(id).ok_or_else(|| {
            CoreError::Validation(format!(
                "Unknown preset '{id}'. Must be one of: {}",
                PRESETS.iter().map(|p| p.id).collect::<Vec<_>>().join(", ")
            ))
        })
    }
}
