// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal/vertical alignment pairs.

/// Horizontal placement of content within available slack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HAlign {
    /// Flush with the left edge.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush with the right edge.
    Right,
}

impl HAlign {
    /// Fraction of horizontal slack placed to the *left* of the content.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Vertical placement of content within available slack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VAlign {
    /// Flush with the top edge.
    Top,
    /// Centered.
    #[default]
    Center,
    /// Flush with the bottom edge.
    Bottom,
}

impl VAlign {
    /// Fraction of vertical slack placed *above* the content.
    #[must_use]
    pub const fn fraction(self) -> f64 {
        match self {
            Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

/// A combined alignment pair.
///
/// Used both for how a node's own content is offset from its pivot and for
/// how a layout manager places a child within its allotted cell. The default
/// is centered on both axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alignment {
    /// Horizontal component.
    pub horizontal: HAlign,
    /// Vertical component.
    pub vertical: VAlign,
}

impl Alignment {
    /// Centered on both axes.
    pub const CENTER: Self = Self {
        horizontal: HAlign::Center,
        vertical: VAlign::Center,
    };

    /// Creates an alignment from its two components.
    #[must_use]
    pub const fn new(vertical: VAlign, horizontal: HAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Parses the declarative `"vertical-horizontal"` form used by scripting
    /// hosts, for example `"top-left"` or `"center-center"`.
    ///
    /// Returns `None` for anything else; callers at the property boundary are
    /// expected to fall back to [`Alignment::default`] rather than error.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let (v, h) = value.split_once('-')?;
        let vertical = match v {
            "top" => VAlign::Top,
            "center" => VAlign::Center,
            "bottom" => VAlign::Bottom,
            _ => return None,
        };
        let horizontal = match h {
            "left" => HAlign::Left,
            "center" => HAlign::Center,
            "right" => HAlign::Right,
            _ => return None,
        };
        Some(Self {
            horizontal,
            vertical,
        })
    }
}
