use std::{fmt, str::FromStr};

/// ABGR color packed as u32 value (most of the platforms are little-endian)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct RGBA(u32);

impl RGBA {
    pub const BLACK: RGBA = RGBA::new(0, 0, 0, 255);
    pub const WHITE: RGBA = RGBA::new(255, 255, 255, 255);
    pub const RED: RGBA = RGBA::new(255, 0, 0, 255);
    pub const GREEN: RGBA = RGBA::new(0, 255, 0, 255);
    pub const BLUE: RGBA = RGBA::new(0, 0, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32))
    }

    /// Opaque color from red, green and blue components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn alpha(self) -> u8 {
        ((self.0 >> 24) & 0xff) as u8
    }

    pub const fn blue(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub const fn green(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    /// Convert color to sRGBA list
    pub fn to_rgba(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Convert color to sRGB list (alpha is discarded)
    pub fn to_rgb(self) -> [u8; 3] {
        let [r, g, b, _] = self.to_rgba();
        [r, g, b]
    }

    /// Relative luminance as defined by WCAG 2.0 (alpha is ignored)
    pub fn relative_luminance(self) -> f32 {
        let [r, g, b] = self.to_rgb();
        0.2126 * srgb_to_linear(r as f32 / 255.0)
            + 0.7152 * srgb_to_linear(g as f32 / 255.0)
            + 0.0722 * srgb_to_linear(b as f32 / 255.0)
    }

    /// WCAG contrast ratio between two colors, value in `[1, 21]`
    pub fn contrast_ratio(self, other: Self) -> f32 {
        let l0 = self.relative_luminance();
        let l1 = other.relative_luminance();
        let (bright, dark) = if l0 > l1 { (l0, l1) } else { (l1, l0) };
        (bright + 0.05) / (dark + 0.05)
    }

    /// Pick color that produces the best contrast with self
    ///
    /// `c1` is picked only if its contrast is strictly better than that of `c0`.
    pub fn best_contrast(self, c0: Self, c1: Self) -> Self {
        if self.contrast_ratio(c1) > self.contrast_ratio(c0) {
            c1
        } else {
            c0
        }
    }
}

impl fmt::Debug for RGBA {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [bg_r, bg_g, bg_b] = self.to_rgb();
        let [fg_r, fg_g, fg_b] = self.best_contrast(RGBA::WHITE, RGBA::BLACK).to_rgb();
        write!(
            fmt,
            "\x1b[38;2;{};{};{};48;2;{};{};{}m",
            fg_r, fg_g, fg_b, bg_r, bg_g, bg_b
        )?;
        write!(fmt, "{}", self)?;
        write!(fmt, "\x1b[m")
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for RGBA {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        if color.starts_with('#') && (color.len() == 7 || color.len() == 9) {
            // #RRGGBB(AA)
            let bytes: &[u8] = color[1..].as_ref();
            let digit = |byte| match byte {
                b'A'..=b'F' => Ok(byte - b'A' + 10),
                b'a'..=b'f' => Ok(byte - b'a' + 10),
                b'0'..=b'9' => Ok(byte - b'0'),
                _ => Err(ColorError::HexExpected),
            };
            let mut hex = bytes
                .chunks(2)
                .map(|pair| Ok((digit(pair[0])? << 4) | digit(pair[1])?));
            Ok(RGBA::new(
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(0))?,
                hex.next().unwrap_or(Ok(255))?,
            ))
        } else {
            Err(ColorError::HexExpected)
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RGBA {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for RGBA {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = std::borrow::Cow::<'de, str>::deserialize(deserializer)?;
        color.parse().map_err(serde::de::Error::custom)
    }
}

/// Convert SRGB color component into a linear color component
///
/// Uses the `0.03928` threshold from WCAG 2.0 relative luminance definition.
#[inline]
pub fn srgb_to_linear(value: f32) -> f32 {
    if value <= 0.03928 {
        value / 12.92
    } else {
        ((value + 0.055) / 1.055).powf(2.4)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    HexExpected,
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::HexExpected => {
                write!(f, "Color expected to be #RRGGBB(AA) in hexidemical format")
            }
        }
    }
}

impl std::error::Error for ColorError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_color_u8() {
        let c = RGBA::new(1, 2, 3, 4);
        assert_eq!([1, 2, 3, 4], c.to_rgba());
        assert_eq!([1, 2, 3], c.to_rgb());
        assert_eq!(1, c.red());
        assert_eq!(2, c.green());
        assert_eq!(3, c.blue());
        assert_eq!(4, c.alpha());
    }

    #[test]
    fn test_color_u8_parse() -> Result<(), ColorError> {
        assert_eq!(RGBA::new(1, 2, 3, 4), "#01020304".parse::<RGBA>()?);
        assert_eq!(RGBA::new(170, 187, 204, 255), "#aabbcc".parse::<RGBA>()?);
        assert_eq!(RGBA::new(170, 187, 204, 255), "#AABBCC".parse::<RGBA>()?);
        assert_eq!(RGBA::BLACK, "#000000".parse::<RGBA>()?);
        assert_eq!(RGBA::RED, "#ff0000".parse::<RGBA>()?);
        assert_eq!(RGBA::BLUE, "#0000ff".parse::<RGBA>()?);
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("000000".parse::<RGBA>(), Err(ColorError::HexExpected));
        assert_eq!("#fff".parse::<RGBA>(), Err(ColorError::HexExpected));
        assert_eq!("#gg0000".parse::<RGBA>(), Err(ColorError::HexExpected));
        assert_eq!("#00000".parse::<RGBA>(), Err(ColorError::HexExpected));
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: RGBA = "#01020304".parse()?;
        assert_eq!(c, RGBA::new(1, 2, 3, 4));
        assert_eq!(c.to_string(), "#01020304");

        let c: RGBA = "#010203".parse()?;
        assert_eq!(c, RGBA::new(1, 2, 3, 255));
        assert_eq!(c.to_string(), "#010203");

        assert_eq!(RGBA::RED.to_string(), "#ff0000");
        assert_eq!(RGBA::GREEN.to_string(), "#00ff00");
        Ok(())
    }

    #[test]
    fn test_contrast() {
        assert_approx_eq!(RGBA::BLACK.relative_luminance(), 0.0, 1e-6);
        assert_approx_eq!(RGBA::WHITE.relative_luminance(), 1.0, 1e-5);
        assert_approx_eq!(RGBA::WHITE.contrast_ratio(RGBA::BLACK), 21.0, 1e-3);
        assert_approx_eq!(RGBA::BLACK.contrast_ratio(RGBA::WHITE), 21.0, 1e-3);
        assert_approx_eq!(RGBA::RED.contrast_ratio(RGBA::RED), 1.0, 1e-6);

        // labels on dark swatches are white, on light swatches black
        assert_eq!(
            RGBA::BLACK.best_contrast(RGBA::WHITE, RGBA::BLACK),
            RGBA::WHITE
        );
        assert_eq!(
            RGBA::BLUE.best_contrast(RGBA::WHITE, RGBA::BLACK),
            RGBA::WHITE
        );
        assert_eq!(
            RGBA::rgb(255, 255, 0).best_contrast(RGBA::WHITE, RGBA::BLACK),
            RGBA::BLACK
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() -> Result<(), serde_json::Error> {
        let text = serde_json::to_string(&RGBA::RED)?;
        assert_eq!(text, "\"#ff0000\"");
        let color: RGBA = serde_json::from_str("\"#0000ff80\"")?;
        assert_eq!(color, RGBA::new(0, 0, 255, 128));
        assert!(serde_json::from_str::<RGBA>("\"blue\"").is_err());
        Ok(())
    }
}
