use std::fmt;

use crate::kinematics::KinematicSample;
use crate::math::format::{format_scalar, format_vector, Brackets};
use crate::operations::query::CurvaturePeak;

/// Human-readable values for the status panel, one string per row.
///
/// Positions use parentheses; directions and differentials use angle brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReadout {
    pub current_value: String,
    pub next_value: String,
    pub scaled_differential: String,
    pub unit_tangent: String,
    pub cart_rotation: String,
    pub next_scaled_differential: String,
    pub scaled_second_differential: String,
    pub curvature: String,
    pub max_curvature_point: String,
    pub max_curvature: String,
    pub arc_length: String,
}

impl StatusReadout {
    /// Formats one tick's sample together with the running statistics.
    #[must_use]
    pub fn new(sample: &KinematicSample, peak: &CurvaturePeak, arc_length: f64) -> Self {
        Self {
            current_value: format_vector(&sample.position, Brackets::PARENS),
            next_value: format_vector(&sample.next_position, Brackets::PARENS),
            scaled_differential: format_vector(&sample.scaled_differential, Brackets::ANGLE),
            unit_tangent: format_vector(&sample.unit_tangent, Brackets::ANGLE),
            cart_rotation: format_vector(&sample.orientation.to_vector(), Brackets::ANGLE),
            next_scaled_differential: format_vector(
                &sample.next_scaled_differential,
                Brackets::ANGLE,
            ),
            scaled_second_differential: format_vector(
                &sample.scaled_second_differential,
                Brackets::ANGLE,
            ),
            curvature: format_scalar(sample.curvature),
            max_curvature_point: format_vector(&peak.point, Brackets::PARENS),
            max_curvature: format_scalar(peak.curvature),
            arc_length: format_scalar(arc_length),
        }
    }

    /// `(label, value)` pairs in display order.
    #[must_use]
    pub fn rows(&self) -> [(&'static str, &str); 11] {
        [
            ("Current value", self.current_value.as_str()),
            ("Next value", self.next_value.as_str()),
            ("Scaled differential", self.scaled_differential.as_str()),
            ("Unit tangent", self.unit_tangent.as_str()),
            ("Cart rotation", self.cart_rotation.as_str()),
            ("Next scaled differential", self.next_scaled_differential.as_str()),
            ("Scaled second differential", self.scaled_second_differential.as_str()),
            ("Curvature", self.curvature.as_str()),
            ("Max curvature point", self.max_curvature_point.as_str()),
            ("Max curvature", self.max_curvature.as_str()),
            ("Arc length", self.arc_length.as_str()),
        ]
    }
}

impl fmt::Display for StatusReadout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in self.rows() {
            writeln!(f, "{label:<28}{value}")?;
        }
        Ok(())
    }
}
