//! Naira formatting and the show/hide toggle for amounts

use std::fmt;

/// Currency symbol prefixed to every amount
pub const NAIRA: char = '₦';

/// Replacement digits shown while amounts are hidden
pub const MASK: &str = "******";

/// Format an amount as `₦` followed by the comma-grouped integer
///
/// # Examples
///
/// ```
/// use oxygen_domain::format_naira;
///
/// assert_eq!(format_naira(1_234_567), "₦1,234,567");
/// assert_eq!(format_naira(500), "₦500");
/// ```
pub fn format_naira(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + NAIRA.len_utf8());
    grouped.push(NAIRA);

    let offset = digits.len() % 3;
    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// An amount paired with its visibility flag
///
/// Toggling only flips the flag. The amount itself is never touched, so
/// hiding and then showing again yields exactly the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskedAmount {
    amount: u64,
    visible: bool,
}

impl MaskedAmount {
    /// A visible amount
    pub fn new(amount: u64) -> Self {
        Self {
            amount,
            visible: true,
        }
    }

    /// Set the visibility flag explicitly
    pub fn with_visibility(amount: u64, visible: bool) -> Self {
        Self { amount, visible }
    }

    /// Flip visibility
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Copy with visibility flipped
    pub fn toggled(self) -> Self {
        Self {
            visible: !self.visible,
            ..self
        }
    }

    /// The underlying amount, regardless of visibility
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// Whether the digits are currently shown
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Render for display
    pub fn render(&self) -> String {
        if self.visible {
            format_naira(self.amount)
        } else {
            format!("{}{}", NAIRA, MASK)
        }
    }
}

impl fmt::Display for MaskedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouping() {
        assert_eq!(format_naira(0), "₦0");
        assert_eq!(format_naira(999), "₦999");
        assert_eq!(format_naira(1000), "₦1,000");
        assert_eq!(format_naira(25_000), "₦25,000");
        assert_eq!(format_naira(134_200), "₦134,200");
        assert_eq!(format_naira(1_250_000), "₦1,250,000");
    }

    #[test]
    fn test_mask_keeps_prefix() {
        let hidden = MaskedAmount::new(134_200).toggled();
        assert_eq!(hidden.render(), "₦******");
        assert_eq!(hidden.amount(), 134_200);
    }

    #[test]
    fn test_double_toggle_restores() {
        let mut amount = MaskedAmount::new(1_234_567);
        let original = amount.render();
        amount.toggle();
        assert_ne!(amount.render(), original);
        amount.toggle();
        assert_eq!(amount.render(), original);
    }
}
