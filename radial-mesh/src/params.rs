//! Pending geometry parameters with change detection
//!
//! Setters report whether the stored value actually changed, so a caller can
//! write every parameter each frame and only pay for regeneration when
//! something moved.

use serde::{Deserialize, Serialize};

use crate::vertex::Color;

/// Geometry-affecting parameters of a radial mesh
///
/// Negative or zero extents are accepted and produce degenerate geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadialParams {
    /// Subdivisions per quarter turn; total steps is four times this
    pub steps_per_quarter: u32,
    /// Outer half extent along X
    pub width: f32,
    /// Outer half extent along Y
    pub height: f32,
    /// Thickness subtracted from the outer extents (bar mode only)
    pub border_size: f32,
    /// Hollow ring of quads instead of a filled fan
    pub as_bar: bool,
    /// Rectangle outline instead of an ellipse
    pub as_square: bool,
    /// Uniform vertex tint
    pub color: Color,
}

impl RadialParams {
    /// Parameters with the given resolution and everything else zeroed
    pub fn with_steps(steps_per_quarter: u32) -> Self {
        Self {
            steps_per_quarter,
            ..Self::default()
        }
    }

    /// Total number of steps around the outline
    pub fn total_steps(&self) -> usize {
        self.steps_per_quarter as usize * 4
    }

    pub fn set_steps_per_quarter(&mut self, value: u32) -> bool {
        write_exact(&mut self.steps_per_quarter, value)
    }

    pub fn set_width(&mut self, value: f32) -> bool {
        write_float(&mut self.width, value)
    }

    pub fn set_height(&mut self, value: f32) -> bool {
        write_float(&mut self.height, value)
    }

    pub fn set_border_size(&mut self, value: f32) -> bool {
        write_float(&mut self.border_size, value)
    }

    pub fn set_as_bar(&mut self, value: bool) -> bool {
        write_exact(&mut self.as_bar, value)
    }

    pub fn set_as_square(&mut self, value: bool) -> bool {
        write_exact(&mut self.as_square, value)
    }

    pub fn set_color(&mut self, value: Color) -> bool {
        write_exact(&mut self.color, value)
    }

    /// Apply every field of `other` through the individual setters
    ///
    /// Returns true if any field changed.
    pub fn apply(&mut self, other: &RadialParams) -> bool {
        // Non-short-circuiting `|` so every field is written
        self.set_steps_per_quarter(other.steps_per_quarter)
            | self.set_width(other.width)
            | self.set_height(other.height)
            | self.set_border_size(other.border_size)
            | self.set_as_bar(other.as_bar)
            | self.set_as_square(other.as_square)
            | self.set_color(other.color)
    }
}

/// Store `value` if it differs from `field`
///
/// `0.0` and `-0.0` compare equal, as do two NaNs.
fn write_float(field: &mut f32, value: f32) -> bool {
    let unchanged = *field == value || (field.is_nan() && value.is_nan());
    if !unchanged {
        *field = value;
        true
    } else {
        false
    }
}

/// Store `value` if it differs from `field`
fn write_exact<T: PartialEq>(field: &mut T, value: T) -> bool {
    if *field != value {
        *field = value;
        true
    } else {
        false
    }
}
