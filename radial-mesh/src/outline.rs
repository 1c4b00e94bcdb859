//! Circle and square perimeter walks
//!
//! Both walks start at the top of the shape, `(0, height)`, and proceed
//! clockwise in screen space, so switching outlines keeps the first vertex
//! and fill direction in place. In bar mode each step emits its inner point
//! immediately before its outer point.

use glam::Vec3;

use crate::params::RadialParams;

/// Append perimeter points for the configured outline
pub fn push_outline(vertices: &mut Vec<Vec3>, params: &RadialParams) {
    if params.as_square {
        push_square(vertices, params);
    } else {
        push_circle(vertices, params);
    }
}

/// Elliptical outline: `total_steps` equally spaced angles over a full turn
pub fn push_circle(vertices: &mut Vec<Vec3>, params: &RadialParams) {
    let total_steps = params.total_steps();
    if total_steps == 0 {
        return;
    }

    let step_size = 360.0 / total_steps as f32;
    let inner_width = params.width - params.border_size;
    let inner_height = params.height - params.border_size;

    for i in 0..total_steps {
        let (sin, cos) = (i as f32 * step_size).to_radians().sin_cos();

        if params.as_bar {
            vertices.push(Vec3::new(sin * inner_width, cos * inner_height, 0.0));
        }
        vertices.push(Vec3::new(sin * params.width, cos * params.height, 0.0));
    }
}

/// Rectangular outline walked in five edge segments
///
/// Positions along an edge are measured in half-steps: with `n` steps per
/// quarter, an edge coordinate `k` (in half-steps) maps to `k * extent / n`,
/// so the corners land exactly on `(±width, ±height)`.
///
/// With an odd `n` the top edge is split unevenly around its midpoint and
/// the walk emits one point more than `4n`; the extra point sits on the top
/// edge and is never referenced by the generated indices.
pub fn push_square(vertices: &mut Vec<Vec3>, params: &RadialParams) {
    let n = params.steps_per_quarter as i64;
    if n == 0 {
        return;
    }

    let RadialParams {
        width,
        height,
        border_size,
        as_bar,
        ..
    } = *params;

    let scale = |half_steps: i64, extent: f32| half_steps as f32 * extent / n as f32;

    let mut push = |inner: Vec3, outer: Vec3| {
        if as_bar {
            vertices.push(inner);
        }
        vertices.push(outer);
    };

    // Top middle -> top right
    for x in (0..n).step_by(2) {
        push(
            Vec3::new(scale(x, width - border_size), height - border_size, 0.0),
            Vec3::new(scale(x, width), height, 0.0),
        );
    }

    // Top right -> bottom right
    for y in descending(n, -n) {
        push(
            Vec3::new(width - border_size, scale(y, height - border_size), 0.0),
            Vec3::new(width, scale(y, height), 0.0),
        );
    }

    // Bottom right -> bottom left
    for x in descending(n, -n) {
        push(
            Vec3::new(scale(x, width - border_size), -height + border_size, 0.0),
            Vec3::new(scale(x, width), -height, 0.0),
        );
    }

    // Bottom left -> top left
    for y in (-n..n).step_by(2) {
        push(
            Vec3::new(-width + border_size, scale(y, height - border_size), 0.0),
            Vec3::new(-width, scale(y, height), 0.0),
        );
    }

    // Top left -> top middle
    for x in (-n..0).step_by(2) {
        push(
            Vec3::new(scale(x, width - border_size), height - border_size, 0.0),
            Vec3::new(scale(x, width), height, 0.0),
        );
    }
}

/// `from, from - 2, ...` while the value stays above `to`
fn descending(from: i64, to: i64) -> impl Iterator<Item = i64> {
    (0..)
        .map(move |i| from - 2 * i)
        .take_while(move |&value| value > to)
}

/// Number of perimeter points `push_outline` emits per rail
pub fn outline_point_count(params: &RadialParams) -> usize {
    let n = params.steps_per_quarter as usize;
    if params.as_square && n % 2 == 1 {
        4 * n + 1
    } else {
        4 * n
    }
}
