use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Viewport dimensions for a screenshot capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Error)]
pub enum ViewportParseError {
    #[error("Invalid viewport format: expected WIDTHxHEIGHT (e.g., 800x600)")]
    InvalidFormat,
    #[error("Width must be positive")]
    ZeroWidth,
    #[error("Height must be positive")]
    ZeroHeight,
}

impl FromStr for Viewport {
    type Err = ViewportParseError;

    // Accepts exactly <digits>x<digits> or <digits>X<digits>.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or(ViewportParseError::InvalidFormat)?;

        if w.is_empty()
            || h.is_empty()
            || !w.bytes().all(|b| b.is_ascii_digit())
            || !h.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ViewportParseError::InvalidFormat);
        }

        let width: u32 = w.parse().map_err(|_| ViewportParseError::InvalidFormat)?;
        let height: u32 = h.parse().map_err(|_| ViewportParseError::InvalidFormat)?;

        if width == 0 {
            return Err(ViewportParseError::ZeroWidth);
        }
        if height == 0 {
            return Err(ViewportParseError::ZeroHeight);
        }

        Ok(Viewport { width, height })
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let vp: Viewport = "800x600".parse().unwrap();
        assert_eq!(vp.width, 800);
        assert_eq!(vp.height, 600);
    }

    #[test]
    fn test_parse_uppercase_separator() {
        let vp: Viewport = "320X480".parse().unwrap();
        assert_eq!(vp.width, 320);
        assert_eq!(vp.height, 480);
    }

    #[test]
    fn test_parse_invalid_format() {
        assert!("800Z600".parse::<Viewport>().is_err());
        assert!("abcxdef".parse::<Viewport>().is_err());
        assert!("".parse::<Viewport>().is_err());
        assert!("800".parse::<Viewport>().is_err());
        assert!("x600".parse::<Viewport>().is_err());
        assert!("800x".parse::<Viewport>().is_err());
        assert!("800x600x2".parse::<Viewport>().is_err());
    }

    #[test]
    fn test_parse_rejects_spaces() {
        assert!(" 800x600".parse::<Viewport>().is_err());
        assert!("800 x 600".parse::<Viewport>().is_err());
    }

    #[test]
    fn test_parse_rejects_signs() {
        assert!("+800x600".parse::<Viewport>().is_err());
        assert!("800x-600".parse::<Viewport>().is_err());
    }

    #[test]
    fn test_parse_zero_dimensions() {
        assert!(matches!(
            "0x600".parse::<Viewport>(),
            Err(ViewportParseError::ZeroWidth)
        ));
        assert!(matches!(
            "800x0".parse::<Viewport>(),
            Err(ViewportParseError::ZeroHeight)
        ));
    }

    #[test]
    fn test_display() {
        let vp = Viewport {
            width: 1920,
            height: 1080,
        };
        assert_eq!(format!("{}", vp), "1920x1080");
    }
}
