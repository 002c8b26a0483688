use super::Vector3;

/// Opening and closing characters wrapped around a formatted vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brackets {
    pub left: char,
    pub right: char,
}

impl Brackets {
    /// `<` and `>`, used for directions and differentials.
    pub const ANGLE: Self = Self::new('<', '>');
    /// `(` and `)`, used for positions.
    pub const PARENS: Self = Self::new('(', ')');

    /// Creates a bracket pair.
    #[must_use]
    pub const fn new(left: char, right: char) -> Self {
        Self { left, right }
    }
}

impl Default for Brackets {
    fn default() -> Self {
        Self::ANGLE
    }
}

/// Formats a vector as `<x, y, z>` with each component `{:>6.3}`.
///
/// Negative zero prints as `0.000`. Fixed widths keep consecutive readouts
/// aligned in a monospace panel.
#[must_use]
pub fn format_vector(vector: &Vector3, brackets: Brackets) -> String {
    format!(
        "{}{}, {}, {}{}",
        brackets.left,
        component(vector.x),
        component(vector.y),
        component(vector.z),
        brackets.right
    )
}

/// Formats a scalar with three decimals.
#[must_use]
pub fn format_scalar(value: f64) -> String {
    format!("{:.3}", positive_zero(value))
}

fn component(value: f64) -> String {
    format!("{:>6.3}", positive_zero(value))
}

fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_brackets() {
        let s = format_vector(&Vector3::new(1.0, -2.5, 0.0), Brackets::default());
        assert_eq!(s, "< 1.000, -2.500,  0.000>");
    }

    #[test]
    fn parentheses() {
        let s = format_vector(&Vector3::new(0.25, 10.0, -0.0), Brackets::PARENS);
        assert_eq!(s, "( 0.250, 10.000,  0.000)");
    }

    #[test]
    fn wide_values_are_not_truncated() {
        let s = format_vector(&Vector3::new(-123.4567, 0.0005, 1.0), Brackets::new('[', ']'));
        assert_eq!(s, "[-123.457,  0.001,  1.000]");
    }

    #[test]
    fn nan_components() {
        let s = format_vector(&Vector3::repeat(f64::NAN), Brackets::PARENS);
        assert_eq!(s, "(   NaN,    NaN,    NaN)");
    }

    #[test]
    fn scalar() {
        assert_eq!(format_scalar(6.283_185), "6.283");
        assert_eq!(format_scalar(-0.0), "0.000");
        assert_eq!(format_scalar(-1.0), "-1.000");
    }
}
