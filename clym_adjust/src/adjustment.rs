// Copyright 2026 the Clym Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The closed set of adjustments and their parameters.

use alloc::string::{String, ToString};

macro_rules! adjustments {
    ($($(#[$doc:meta])* $variant:ident => $id:literal, $class:literal;)*) => {
        /// A single named accessibility adjustment.
        ///
        /// Ids are SCREAMING_SNAKE strings (`"FONT_SIZE"`), body classes are the
        /// kebab-case id with a `clym-` prefix (`"clym-font-size"`).
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(rename_all = "SCREAMING_SNAKE_CASE")
        )]
        pub enum Adjustment {
            $($(#[$doc])* $variant,)*
        }

        impl Adjustment {
            /// Every adjustment, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Number of adjustments.
            pub const COUNT: usize = Self::ALL.len();

            /// The adjustment id, for example `"STOP_ANIMATIONS"`.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $id,)*
                }
            }

            /// The body class toggled for this adjustment.
            pub const fn class_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $class,)*
                }
            }

            /// Look up an adjustment by id. Unknown ids yield `None`.
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $($id => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

adjustments! {
    /// Scale font sizes by a signed level.
    FontSize => "FONT_SIZE", "clym-font-size";
    /// Scale letter spacing by a signed level.
    LetterSpacing => "LETTER_SPACING", "clym-letter-spacing";
    /// Scale line height by a signed level.
    LineHeight => "LINE_HEIGHT", "clym-line-height";
    /// Swap the page font for a readable or dyslexia-friendly face.
    FontChange => "FONT_CHANGE", "clym-font-change";
    /// Force text alignment.
    TextAlign => "TEXT_ALIGN", "clym-text-align";
    /// Outline headings.
    HighlightTitles => "HIGHLIGHT_TITLES", "clym-highlight-titles";
    /// Outline links.
    HighlightLinks => "HIGHLIGHT_LINKS", "clym-highlight-links";
    /// Strong outline around the focused element.
    HighlightFocus => "HIGHLIGHT_FOCUS", "clym-highlight-focus";
    /// Hide images and other graphics.
    HideImages => "HIDE_IMAGES", "clym-hide-images";
    /// Mute every audio and video element.
    MuteSounds => "MUTE_SOUNDS", "clym-mute-sounds";
    /// Pause CSS animations, transitions and playing videos.
    StopAnimations => "STOP_ANIMATIONS", "clym-stop-animations";
    /// Enlarged cursor.
    Cursor => "CURSOR", "clym-cursor";
    /// Root saturation filter.
    Saturation => "SATURATION", "clym-saturation";
    /// Root contrast filter.
    Contrast => "CONTRAST", "clym-contrast";
    /// Page brightness filter.
    Brightness => "BRIGHTNESS", "clym-brightness";
    /// Background color override.
    BackgroundColor => "BACKGROUND_COLOR", "clym-background-color";
    /// Heading color override.
    HeadingsColor => "HEADINGS_COLOR", "clym-headings-color";
    /// Body text color override.
    ContentColor => "CONTENT_COLOR", "clym-content-color";
    /// Hover tooltip showing enlarged text.
    TextMagnifier => "TEXT_MAGNIFIER", "clym-text-magnifier";
    /// Isolated, distraction-free view of the page's text.
    ReadingMode => "READING_MODE", "clym-reading-mode";
    /// Pointer-following horizontal bar.
    ReadingGuide => "READING_GUIDE", "clym-reading-guide";
    /// Pointer-following window with shaded surroundings.
    ReadingMask => "READING_MASK", "clym-reading-mask";
    /// Single-key landmark navigation.
    KeyboardNavigation => "KEYBOARD_NAVIGATION", "clym-keyboard-navigation";
}

impl Adjustment {
    /// Position of this adjustment in [`Adjustment::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl core::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter of an adjustment.
///
/// `Off`, `Flag(false)`, `Level(0)` and `Value("")` are *falsy*: applying a
/// falsy parameter resets the adjustment to neutral.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Param {
    /// Inactive.
    #[default]
    Off,
    /// Boolean switch.
    Flag(bool),
    /// Signed step, used by the text scalers.
    Level(i32),
    /// Free-form value such as `"low"` or `"#ffcc00"`.
    Value(String),
}

impl Param {
    /// Whether this parameter activates its adjustment.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Off => false,
            Self::Flag(on) => *on,
            Self::Level(level) => *level != 0,
            Self::Value(v) => !v.is_empty(),
        }
    }

    /// The string value, if this is a [`Param::Value`].
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    /// The signed level, if this is a [`Param::Level`].
    pub fn as_level(&self) -> Option<i32> {
        match self {
            Self::Level(l) => Some(*l),
            _ => None,
        }
    }

    /// Suffix used in style element ids; flags and `Off` have none.
    pub fn id_suffix(&self) -> Option<String> {
        match self {
            Self::Off | Self::Flag(_) => None,
            Self::Level(l) => Some(l.to_string()),
            Self::Value(v) => Some(v.clone()),
        }
    }
}

impl core::fmt::Display for Param {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Off => f.write_str("null"),
            Self::Flag(on) => write!(f, "{on}"),
            Self::Level(level) => write!(f, "{level}"),
            Self::Value(v) => f.write_str(v),
        }
    }
}

impl From<bool> for Param {
    fn from(on: bool) -> Self {
        Self::Flag(on)
    }
}

impl From<i32> for Param {
    fn from(level: i32) -> Self {
        Self::Level(level)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Self::Value(value.into())
    }
}

impl<T: Into<Self>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Off)
    }
}
