use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// A display mode's pixel dimensions.
///
/// Both sides are always positive. Two resolutions are equal iff width and
/// height match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: NonZeroU32,
    height: NonZeroU32,
}

impl Resolution {
    /// Returns `None` if either side is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            width: NonZeroU32::new(width)?,
            height: NonZeroU32::new(height)?,
        })
    }

    pub const fn from_nonzero(width: NonZeroU32, height: NonZeroU32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width.get()
    }

    pub fn height(&self) -> u32 {
        self.height.get()
    }

    /// The menu label, `"<width> x <height>"`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// The config file line, `"<width> <height>"`, without a newline.
    pub fn to_line(&self) -> String {
        format!("{} {}", self.width, self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected two positive integers `<width> <height>`")]
pub struct ParseResolutionError;

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    /// Parses a config line: two whitespace-separated positive integers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(width), Some(height), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ParseResolutionError);
        };

        let width = width.parse::<u32>().map_err(|_| ParseResolutionError)?;
        let height = height.parse::<u32>().map_err(|_| ParseResolutionError)?;
        Resolution::new(width, height).ok_or(ParseResolutionError)
    }
}

/// Shorthand for tests and constant tables.
///
/// Panics on a zero side.
pub const fn res(width: u32, height: u32) -> Resolution {
    match (NonZeroU32::new(width), NonZeroU32::new(height)) {
        (Some(width), Some(height)) => Resolution::from_nonzero(width, height),
        _ => panic!("resolution sides must be positive"),
    }
}
