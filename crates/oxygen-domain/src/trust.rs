//! Trust score value object

use std::fmt;

/// A user's trust score, always within [0, 100]
///
/// The score is read by every eligibility rule. Nothing in the application
/// mutates it in response to user actions; it is supplied from outside
/// (see [`crate::traits::TrustSource`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TrustScore(u8);

impl TrustScore {
    /// Highest possible score
    pub const MAX: TrustScore = TrustScore(100);

    /// Score every new session starts with until a real source replaces it
    pub const SEED: TrustScore = TrustScore(45);

    /// Create a trust score, saturating values above 100
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Get the raw percentage value
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Points missing to reach `required`, or `None` if already there
    pub fn shortfall_to(&self, required: u8) -> Option<u8> {
        if self.0 >= required {
            None
        } else {
            Some(required - self.0)
        }
    }
}

impl From<u8> for TrustScore {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for TrustScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl std::str::FromStr for TrustScore {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('%');
        let value: u8 = trimmed
            .parse()
            .map_err(|_| format!("Invalid trust score: {}", s))?;
        if value > 100 {
            return Err(format!("Trust score must be in [0, 100], got {}", value));
        }
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturates_above_hundred() {
        assert_eq!(TrustScore::new(250).value(), 100);
        assert_eq!(TrustScore::new(100), TrustScore::MAX);
    }

    #[test]
    fn test_shortfall() {
        let score = TrustScore::new(15);
        assert_eq!(score.shortfall_to(25), Some(10));
        assert_eq!(score.shortfall_to(15), None);
        assert_eq!(score.shortfall_to(0), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("45".parse::<TrustScore>().unwrap(), TrustScore::SEED);
        assert_eq!("60%".parse::<TrustScore>().unwrap().value(), 60);
        assert!("101".parse::<TrustScore>().is_err());
        assert!("abc".parse::<TrustScore>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(TrustScore::new(45).to_string(), "45%");
    }
}
