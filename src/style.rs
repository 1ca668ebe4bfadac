//! Semantic button palette for the panel layout.
//!
//! The panel-controller stores colors as single decimal values,
//! `r + g * 256 + b * 65536`. The palette is a fixed lookup from semantic
//! category to a style descriptor; compilers receive it through
//! [`ButtonStyle::spec`] rather than reading ambient globals.

const WHITE: u32 = 16_777_215;
const DIM_GRAY: u32 = 5_592_405;

const fn rgb(r: u32, g: u32, b: u32) -> u32 {
    r + g * 256 + b * 65536
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Lighting,
    Audio,
    Video,
    System,
    Go,
    Stop,
    Header,
    Blank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StyleSpec {
    /// Background color, panel decimal encoding.
    pub bg: u32,
    /// Text color, panel decimal encoding.
    pub text: u32,
}

impl ButtonStyle {
    /// Maps a cue-type label to its palette entry. Unrecognized labels fall
    /// back to [`ButtonStyle::Blank`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "lighting" => Self::Lighting,
            "audio" => Self::Audio,
            "video" => Self::Video,
            "system" => Self::System,
            "go" => Self::Go,
            "stop" => Self::Stop,
            "header" => Self::Header,
            _ => Self::Blank,
        }
    }

    pub fn spec(self) -> StyleSpec {
        match self {
            Self::Lighting => StyleSpec {
                bg: rgb(204, 153, 0), // amber
                text: 0,
            },
            Self::Audio => StyleSpec {
                bg: rgb(0, 153, 204), // teal
                text: 0,
            },
            Self::Video => StyleSpec {
                bg: rgb(51, 102, 204), // blue
                text: WHITE,
            },
            Self::System => StyleSpec {
                bg: rgb(153, 51, 153), // purple
                text: WHITE,
            },
            Self::Go => StyleSpec {
                bg: rgb(0, 204, 0), // green
                text: 0,
            },
            Self::Stop => StyleSpec {
                bg: rgb(204, 0, 0), // red
                text: WHITE,
            },
            Self::Header => StyleSpec {
                bg: rgb(40, 40, 40), // dark gray
                text: WHITE,
            },
            Self::Blank => StyleSpec {
                bg: 0,
                text: DIM_GRAY,
            },
        }
    }

    /// Header buttons hide the panel's top bar.
    pub fn is_header(self) -> bool {
        self == Self::Header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_panel_encoding() {
        assert_eq!(ButtonStyle::Lighting.spec().bg, 204 + 153 * 256);
        assert_eq!(ButtonStyle::Stop.spec().bg, 204);
        assert_eq!(ButtonStyle::Go.spec().bg, 204 * 256);
        assert_eq!(ButtonStyle::Video.spec().text, 16_777_215);
    }

    #[test]
    fn unrecognized_label_falls_back_to_blank() {
        assert_eq!(ButtonStyle::from_label("pyro"), ButtonStyle::Blank);
        assert_eq!(ButtonStyle::from_label("lighting"), ButtonStyle::Lighting);
    }
}
