//! Drawing session configuration
use crate::{Scalar, RGBA};
use std::fmt;

/// Tool defaults and limits of a drawing session
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Pen color selected when session starts
    pub default_color: RGBA,
    /// Tool width selected when session starts
    pub default_width: Scalar,
    /// Smallest selectable tool width
    pub min_width: Scalar,
    /// Largest selectable tool width
    pub max_width: Scalar,
    /// Pen colors offered to the user
    pub palette: Vec<RGBA>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_color: RGBA::BLACK,
            default_width: 4.0,
            min_width: 1.0,
            max_width: 30.0,
            palette: vec![RGBA::BLACK, RGBA::RED, RGBA::BLUE],
        }
    }
}

impl SessionConfig {
    /// Check that width limits are sane and contain the default width
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            min_width,
            max_width,
            default_width,
            ..
        } = *self;
        if !(min_width.is_finite() && max_width.is_finite())
            || min_width <= 0.0
            || min_width > max_width
        {
            return Err(ConfigError::InvalidWidthRange {
                min: min_width,
                max: max_width,
            });
        }
        if !(min_width..=max_width).contains(&default_width) {
            return Err(ConfigError::InvalidDefaultWidth(default_width));
        }
        Ok(())
    }

    /// Parse configuration from JSON, missing fields take default values
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    /// Width limits are not positive finite numbers with `min <= max`
    InvalidWidthRange { min: Scalar, max: Scalar },
    /// Default width is outside of the width limits
    InvalidDefaultWidth(Scalar),
    /// JSON error
    #[cfg(feature = "serde")]
    Json(serde_json::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidWidthRange { min, max } => {
                write!(f, "invalid tool width range: [{}, {}]", min, max)
            }
            ConfigError::InvalidDefaultWidth(width) => {
                write!(f, "default tool width is out of range: {}", width)
            }
            #[cfg(feature = "serde")]
            ConfigError::Json(error) => write!(f, "invalid configuration: {}", error),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for ConfigError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = SessionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_width, 4.0);
        assert_eq!(config.palette.len(), 3);
    }

    #[test]
    fn test_validate() {
        let config = SessionConfig {
            min_width: 10.0,
            max_width: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWidthRange { .. })
        ));

        let config = SessionConfig {
            min_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWidthRange { .. })
        ));

        let config = SessionConfig {
            default_width: 31.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDefaultWidth(w)) if w == 31.0
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_from_json() -> Result<(), ConfigError> {
        let config = SessionConfig::from_json(
            r##"{ "default_color": "#ff0000", "max_width": 12, "palette": ["#ff0000", "#00ff00"] }"##,
        )?;
        assert_eq!(config.default_color, RGBA::RED);
        assert_eq!(config.max_width, 12.0);
        assert_eq!(config.min_width, 1.0);
        assert_eq!(config.palette, vec![RGBA::RED, RGBA::GREEN]);

        assert!(matches!(
            SessionConfig::from_json(r#"{ "default_width": 50 }"#),
            Err(ConfigError::InvalidDefaultWidth(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{ "default_color": "red" }"#),
            Err(ConfigError::Json(_))
        ));
        Ok(())
    }
}
