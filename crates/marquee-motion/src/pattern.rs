//! Motion pattern kinds and the cosmetic color palette.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the six procedural motion patterns a label can follow.
///
/// The pattern is chosen once when the label's motion is generated and never
/// changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PatternKind {
    /// Slow orbit around the drifting base position.
    Circular,
    /// Fast drift with a rectified vertical hop.
    Bounce,
    /// Fast drift with a horizontal sway.
    Zigzag,
    /// Orbit with a capped radius and a faster angular rate.
    Spiral,
    /// Wide horizontal swing with a shallow vertical dip.
    Pendulum,
    /// Lissajous figure with a 1:2 frequency ratio.
    Figure8,
}

impl PatternKind {
    /// All pattern kinds, in a stable order.
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Circular,
        PatternKind::Bounce,
        PatternKind::Zigzag,
        PatternKind::Spiral,
        PatternKind::Pendulum,
        PatternKind::Figure8,
    ];

    /// Returns the drift class that governs how fast this pattern's base
    /// position travels and where it reflects.
    pub fn drift_class(self) -> DriftClass {
        match self {
            Self::Circular | Self::Spiral | Self::Pendulum | Self::Figure8 => DriftClass::Orbiting,
            Self::Bounce | Self::Zigzag => DriftClass::Fast,
        }
    }

    /// Lowercase identifier, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Circular => "circular",
            Self::Bounce => "bounce",
            Self::Zigzag => "zigzag",
            Self::Spiral => "spiral",
            Self::Pendulum => "pendulum",
            Self::Figure8 => "figure8",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Drift-rate class of a pattern.
///
/// Orbiting patterns already carry a large oscillatory overlay, so their base
/// position drifts slowly inside a tighter box. Fast patterns travel across
/// most of the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DriftClass {
    /// Circular, Spiral, Pendulum and Figure8.
    Orbiting,
    /// Bounce and Zigzag.
    Fast,
}

impl fmt::Display for DriftClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Orbiting => f.write_str("orbiting"),
            Self::Fast => f.write_str("fast"),
        }
    }
}

/// Cosmetic color tag from a fixed 8-entry palette.
///
/// Each tag names a two-stop gradient; renderers decide how to draw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ColorTag {
    PurplePink,
    BlueCyan,
    GreenEmerald,
    OrangeRed,
    YellowOrange,
    IndigoPurple,
    PinkRose,
    TealGreen,
}

impl ColorTag {
    /// The full palette, in a stable order.
    pub const PALETTE: [ColorTag; 8] = [
        ColorTag::PurplePink,
        ColorTag::BlueCyan,
        ColorTag::GreenEmerald,
        ColorTag::OrangeRed,
        ColorTag::YellowOrange,
        ColorTag::IndigoPurple,
        ColorTag::PinkRose,
        ColorTag::TealGreen,
    ];

    /// Returns the `(from, to)` gradient stops as color-scale names.
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            Self::PurplePink => ("purple-500", "pink-500"),
            Self::BlueCyan => ("blue-500", "cyan-500"),
            Self::GreenEmerald => ("green-500", "emerald-500"),
            Self::OrangeRed => ("orange-500", "red-500"),
            Self::YellowOrange => ("yellow-500", "orange-500"),
            Self::IndigoPurple => ("indigo-500", "purple-500"),
            Self::PinkRose => ("pink-500", "rose-500"),
            Self::TealGreen => ("teal-500", "green-500"),
        }
    }

    /// Returns the gradient as a utility-class string (`from-x to-y`).
    pub fn class_name(self) -> String {
        let (from, to) = self.gradient();
        format!("from-{from} to-{to}")
    }
}

impl fmt::Display for ColorTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (from, to) = self.gradient();
        write!(f, "{from}/{to}")
    }
}
