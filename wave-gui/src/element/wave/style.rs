use core::error::Error;
use core::fmt::{Display, Formatter};
use embedded_graphics::pixelcolor::BinaryColor;
use crate::time::Duration;

pub const DEFAULT_WAVE_LENGTH_DP: u32 = 10;
pub const DEFAULT_WAVE_HEIGHT_DP: u32 = 3;
pub const DEFAULT_STROKE_WIDTH_DP: u32 = 2;
pub const DEFAULT_DURATION_MS: u32 = 1000;

/// Colours are 32-bit ARGB, the same encoding style attributes use.
pub const BLACK: u32 = 0xFF00_0000;
pub const GRAY: u32 = 0xFF88_8888;
pub const WHITE: u32 = 0xFFFF_FFFF;

/// The clip region the wave is drawn in.
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default, serde::Serialize, serde::Deserialize, strum::FromRepr)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle = 0,
    Rectangle = 1,
}

/// Style attributes as supplied by the host. Anything left unset falls back to a default when
/// resolved. Dimensions given here are in pixels; the defaults are in dp and scale with density.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleAttrs {
    pub wave_length: Option<u32>,
    pub wave_height: Option<u32>,
    pub stroke_width: Option<u32>,
    pub stroke_color: Option<u32>,
    pub fill_color: Option<u32>,
    /// Shape code, `0` for a circle and `1` for a rectangle.
    pub shape: Option<u8>,
    /// Length of one animation cycle in milliseconds.
    pub wave_duration: Option<u32>,
}

/// A fully resolved, immutable wave style.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WaveStyle<C> {
    pub wave_length: u32,
    pub wave_height: u32,
    pub stroke_width: u32,
    pub stroke_color: C,
    pub fill_color: C,
    pub shape: Shape,
    pub duration: Duration,
}

#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StyleError {
    /// The wave length in pixels is too short to split into arcs.
    WaveLengthTooShort(u32),
    ZeroDuration,
    UnknownShape(u8),
}

impl Display for StyleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::WaveLengthTooShort(px) => write!(f, "wave length must be at least 2px, got {px}px"),
            Self::ZeroDuration => write!(f, "wave duration must be non-zero"),
            Self::UnknownShape(code) => write!(f, "unknown shape code {code}"),
        }
    }
}

impl Error for StyleError {}

/// Convert density-independent pixels to pixels, truncating.
pub fn dp_to_px(dp: u32, density: f32) -> u32 {
    (dp as f32 * density) as u32
}

/// Map an ARGB colour onto a 1-bit panel: anything darker than light grey is ink.
pub fn binary_color(argb: u32) -> BinaryColor {
    let r = (argb >> 16) & 0xFF;
    let g = (argb >> 8) & 0xFF;
    let b = argb & 0xFF;
    let luma = (299 * r + 587 * g + 114 * b) / 1000;
    BinaryColor::from(luma < 0xC0)
}

impl StyleAttrs {
    /// Fill in defaults for `density` and validate the result.
    pub fn resolve(&self, density: f32) -> Result<WaveStyle<u32>, StyleError> {
        let shape = match self.shape {
            Some(code) => Shape::from_repr(code).ok_or(StyleError::UnknownShape(code))?,
            None => Shape::default(),
        };

        let style = WaveStyle {
            wave_length: self.wave_length.unwrap_or_else(|| dp_to_px(DEFAULT_WAVE_LENGTH_DP, density)),
            wave_height: self.wave_height.unwrap_or_else(|| dp_to_px(DEFAULT_WAVE_HEIGHT_DP, density)),
            stroke_width: self.stroke_width.unwrap_or_else(|| dp_to_px(DEFAULT_STROKE_WIDTH_DP, density)),
            stroke_color: self.stroke_color.unwrap_or(BLACK),
            fill_color: self.fill_color.unwrap_or(GRAY),
            shape,
            duration: Duration::millis(self.wave_duration.unwrap_or(DEFAULT_DURATION_MS) as u64),
        };

        style.validate()?;
        Ok(style)
    }
}

impl<C> WaveStyle<C> {
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.wave_length < 2 {
            return Err(StyleError::WaveLengthTooShort(self.wave_length));
        }

        if self.duration.ticks() == 0 {
            return Err(StyleError::ZeroDuration);
        }

        Ok(())
    }

    /// Convert both colours, e.g. from ARGB into the target's colour type.
    pub fn map_color<D>(self, f: impl Fn(C) -> D) -> WaveStyle<D> {
        WaveStyle {
            wave_length: self.wave_length,
            wave_height: self.wave_height,
            stroke_width: self.stroke_width,
            stroke_color: f(self.stroke_color),
            fill_color: f(self.fill_color),
            shape: self.shape,
            duration: self.duration,
        }
    }
}
