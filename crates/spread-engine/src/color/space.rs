//! Optimization color spaces and their channel schemas
//!
//! Each [`ColorSpace`] carries a fixed, ordered list of three channels with
//! the numeric range used to normalize them into `[0, 1]`. The order is
//! positional: parameter vectors, bounds and channel triples all index
//! channels the same way.

use std::fmt;
use std::str::FromStr;

use super::cielab::{Lab, Lch};
use super::hsl::Hsl;
use super::linear_rgb::LinearRgb;
use super::oklab::{Oklab, Oklch};
use super::srgb::Srgb;

/// What a channel means to the optimizer.
///
/// The objective applies a different bounded transform per role, and the
/// bounds builder picks its quantiles by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelRole {
    /// Lightness-like; new colors are kept in increasing order along it.
    Lightness,
    /// Saturation (HSL) or chroma (LCh, OKLCh).
    Chroma,
    /// Circular hue angle.
    Hue,
    /// Any other bounded axis (Lab/OKLab a and b).
    Other,
}

/// One channel of a color space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub role: ChannelRole,
}

impl Channel {
    const fn new(name: &'static str, min: f64, max: f64, role: ChannelRole) -> Self {
        Self {
            name,
            min,
            max,
            role,
        }
    }

    /// Whether this channel wraps around (hue).
    #[inline]
    pub fn is_circular(&self) -> bool {
        self.role == ChannelRole::Hue
    }

    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    #[inline]
    pub fn unscale(&self, normalized: f64) -> f64 {
        self.min + normalized * (self.max - self.min)
    }
}

use ChannelRole::{Chroma, Hue, Lightness, Other};

const HSL_CHANNELS: [Channel; 3] = [
    Channel::new("h", 0.0, 360.0, Hue),
    Channel::new("s", 0.0, 100.0, Chroma),
    Channel::new("l", 0.0, 100.0, Lightness),
];

const LAB_CHANNELS: [Channel; 3] = [
    Channel::new("l", 0.0, 100.0, Lightness),
    Channel::new("a", -128.0, 127.0, Other),
    Channel::new("b", -128.0, 127.0, Other),
];

const LCH_CHANNELS: [Channel; 3] = [
    Channel::new("l", 0.0, 100.0, Lightness),
    Channel::new("c", 0.0, 140.0, Chroma),
    Channel::new("h", 0.0, 360.0, Hue),
];

const OKLAB_CHANNELS: [Channel; 3] = [
    Channel::new("l", 0.0, 1.0, Lightness),
    Channel::new("a", -0.5, 0.5, Other),
    Channel::new("b", -0.5, 0.5, Other),
];

const OKLCH_CHANNELS: [Channel; 3] = [
    Channel::new("l", 0.0, 1.0, Lightness),
    Channel::new("c", 0.0, 0.4, Chroma),
    Channel::new("h", 0.0, 360.0, Hue),
];

/// Channel values of one color, in the order of [`ColorSpace::channels`].
pub type Channels = [f64; 3];

/// A color space the optimizer can search in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    Hsl,
    Lab,
    Lch,
    #[default]
    Oklab,
    Oklch,
}

impl ColorSpace {
    /// Every supported space, in display order.
    pub const ALL: [ColorSpace; 5] = [
        ColorSpace::Hsl,
        ColorSpace::Lab,
        ColorSpace::Lch,
        ColorSpace::Oklab,
        ColorSpace::Oklch,
    ];

    /// Lowercase identifier (`hsl`, `lab`, `lch`, `oklab`, `oklch`).
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Hsl => "hsl",
            ColorSpace::Lab => "lab",
            ColorSpace::Lch => "lch",
            ColorSpace::Oklab => "oklab",
            ColorSpace::Oklch => "oklch",
        }
    }

    /// The ordered channel schema.
    pub fn channels(self) -> &'static [Channel; 3] {
        match self {
            ColorSpace::Hsl => &HSL_CHANNELS,
            ColorSpace::Lab => &LAB_CHANNELS,
            ColorSpace::Lch => &LCH_CHANNELS,
            ColorSpace::Oklab => &OKLAB_CHANNELS,
            ColorSpace::Oklch => &OKLCH_CHANNELS,
        }
    }

    /// Position of the first channel with the given role, if any.
    pub fn channel_index(self, role: ChannelRole) -> Option<usize> {
        self.channels().iter().position(|c| c.role == role)
    }

    /// Decode an sRGB color into this space's channels (real units).
    pub fn decode(self, color: Srgb) -> Channels {
        let linear = LinearRgb::from(color);
        match self {
            ColorSpace::Hsl => {
                let hsl = Hsl::from(color);
                [hsl.h, hsl.s, hsl.l]
            }
            ColorSpace::Lab => {
                let lab = Lab::from(linear);
                [lab.l, lab.a, lab.b]
            }
            ColorSpace::Lch => {
                let lch = Lch::from(Lab::from(linear));
                [lch.l, lch.c, lch.h]
            }
            ColorSpace::Oklab => {
                let lab = Oklab::from(linear);
                [lab.l, lab.a, lab.b]
            }
            ColorSpace::Oklch => {
                let lch = Oklch::from(Oklab::from(linear));
                [lch.l, lch.c, lch.h]
            }
        }
    }

    /// Encode channels (real units) back to sRGB, clamped into gamut.
    pub fn encode(self, channels: Channels) -> Srgb {
        let [x, y, z] = channels;
        let rgb = match self {
            ColorSpace::Hsl => Srgb::from(Hsl::new(x, y, z)),
            ColorSpace::Lab => Srgb::from(LinearRgb::from(Lab::new(x, y, z))),
            ColorSpace::Lch => Srgb::from(LinearRgb::from(Lab::from(Lch::new(x, y, z)))),
            ColorSpace::Oklab => Srgb::from(LinearRgb::from(Oklab::new(x, y, z))),
            ColorSpace::Oklch => Srgb::from(LinearRgb::from(Oklab::from(Oklch::new(x, y, z)))),
        };
        rgb.clamped()
    }

    /// Map real channel values into `[0, 1]` per the declared ranges.
    ///
    /// Values outside the declared range map outside `[0, 1]`; nothing is
    /// clamped here.
    pub fn normalize(self, channels: Channels) -> Channels {
        let table = self.channels();
        [
            table[0].normalize(channels[0]),
            table[1].normalize(channels[1]),
            table[2].normalize(channels[2]),
        ]
    }

    /// Inverse of [`normalize`](Self::normalize).
    pub fn unscale(self, normalized: Channels) -> Channels {
        let table = self.channels();
        [
            table[0].unscale(normalized[0]),
            table[1].unscale(normalized[1]),
            table[2].unscale(normalized[2]),
        ]
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown color space name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown color space '{0}' (expected one of hsl, lab, lch, oklab, oklch)")]
pub struct UnknownColorSpace(pub String);

impl FromStr for ColorSpace {
    type Err = UnknownColorSpace;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ColorSpace::ALL
            .into_iter()
            .find(|space| space.name() == wanted)
            .ok_or_else(|| UnknownColorSpace(s.to_string()))
    }
}
