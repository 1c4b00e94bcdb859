//! Per-step winding templates and index generation
//!
//! A template describes one step of the shape relative to that step's base
//! index: 3 entries for a fan triangle, 6 entries for a strip quad.
//!
//! Fan indices (pie mode) reference the shared center vertex at index 0 and
//! perimeter vertices `1..=steps`. Strip indices (bar mode) reference
//! inner/outer vertex pairs with no reserved index.

/// Quad template, normal winding: `(inner, next outer, outer)`, `(inner, next inner, next outer)`
pub const NORMAL_SQUARE_INDICES: [usize; 6] = [0, 3, 1, 0, 2, 3];
/// Quad template, reversed winding
pub const REVERSE_SQUARE_INDICES: [usize; 6] = [0, 1, 3, 0, 3, 2];
/// Fan triangle template, normal winding: `(center, next, current)`
pub const NORMAL_TRI_INDICES: [usize; 3] = [0, 2, 1];
/// Fan triangle template, reversed winding
pub const REVERSE_TRI_INDICES: [usize; 3] = [0, 1, 2];

/// Indices emitted per step in bar mode (two triangles)
pub const QUAD_INDICES_PER_STEP: usize = NORMAL_SQUARE_INDICES.len();
/// Indices emitted per step in pie mode (one triangle)
pub const TRI_INDICES_PER_STEP: usize = NORMAL_TRI_INDICES.len();

/// Winding order selected once per mesh
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Winding {
    #[default]
    Normal,
    Reverse,
}

impl Winding {
    /// Winding for a mesh constructed with the given flip flag
    pub fn from_flip(flip_normals: bool) -> Self {
        if flip_normals {
            Self::Reverse
        } else {
            Self::Normal
        }
    }

    /// The opposite winding
    pub fn flipped(self) -> Self {
        match self {
            Self::Normal => Self::Reverse,
            Self::Reverse => Self::Normal,
        }
    }

    /// Quad and triangle templates for this winding
    pub fn templates(self) -> IndexTemplates {
        match self {
            Self::Normal => IndexTemplates {
                quad: &NORMAL_SQUARE_INDICES,
                tri: &NORMAL_TRI_INDICES,
            },
            Self::Reverse => IndexTemplates {
                quad: &REVERSE_SQUARE_INDICES,
                tri: &REVERSE_TRI_INDICES,
            },
        }
    }
}

/// A matched pair of quad and triangle templates
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IndexTemplates {
    pub quad: &'static [usize; 6],
    pub tri: &'static [usize; 3],
}

/// Build quad-strip indices for `steps` steps of inner/outer vertex pairs
///
/// Every index wraps modulo `steps * 2`, the vertex count of the strip.
///
/// Callers must ensure `steps * 2 <= 65536`.
pub fn strip_indices(steps: usize, template: &[usize; 6]) -> Vec<u16> {
    let vertices_per_step = template.len() / 3;
    let total = steps * vertices_per_step;
    let mut indices = Vec::with_capacity(steps * template.len());

    for base in (0..total).step_by(vertices_per_step) {
        for &offset in template {
            indices.push(((base + offset) % total) as u16);
        }
    }

    indices
}

/// Build fan indices for `steps` triangles sharing the center vertex 0
///
/// Index 0 is reserved for the center: a perimeter slot that wraps onto 0
/// keeps its unwrapped value instead, so the last step's perimeter vertex
/// (`steps`) is never aliased onto the center.
///
/// Callers must ensure `steps + 1 <= 65536`.
pub fn fan_indices(steps: usize, template: &[usize; 3]) -> Vec<u16> {
    let mut indices = Vec::with_capacity(steps * template.len());

    for base in 0..steps {
        indices.push(0);
        for &offset in &template[1..] {
            let raw = base + offset;
            let wrapped = raw % steps;
            let value = if wrapped == 0 { raw } else { wrapped };
            indices.push(value as u16);
        }
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winding_from_flip() {
        assert_eq!(Winding::from_flip(false), Winding::Normal);
        assert_eq!(Winding::from_flip(true), Winding::Reverse);
        assert_eq!(Winding::Normal.flipped(), Winding::Reverse);
        assert_eq!(Winding::Reverse.flipped().flipped(), Winding::Reverse);
    }

    #[test]
    fn test_templates_pair_up() {
        let normal = Winding::Normal.templates();
        assert_eq!(normal.quad, &NORMAL_SQUARE_INDICES);
        assert_eq!(normal.tri, &NORMAL_TRI_INDICES);

        let reverse = Winding::Reverse.templates();
        assert_eq!(reverse.quad, &REVERSE_SQUARE_INDICES);
        assert_eq!(reverse.tri, &REVERSE_TRI_INDICES);
    }

    #[test]
    fn test_fan_indices_four_steps() {
        let indices = fan_indices(4, &NORMAL_TRI_INDICES);
        assert_eq!(indices, vec![0, 2, 1, 0, 3, 2, 0, 4, 3, 0, 1, 4]);
    }

    #[test]
    fn test_fan_indices_reverse_four_steps() {
        let indices = fan_indices(4, &REVERSE_TRI_INDICES);
        assert_eq!(indices, vec![0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1]);
    }

    #[test]
    fn test_fan_never_aliases_center() {
        for steps in [2, 3, 4, 7, 16, 400] {
            for template in [&NORMAL_TRI_INDICES, &REVERSE_TRI_INDICES] {
                let indices = fan_indices(steps, template);
                for tri in indices.chunks(3) {
                    let zeros = tri.iter().filter(|&&i| i == 0).count();
                    assert_eq!(zeros, 1, "steps={steps} triangle {tri:?}");
                    assert!(tri.iter().all(|&i| (i as usize) <= steps));
                }
            }
        }
    }

    #[test]
    fn test_strip_indices_four_steps() {
        let indices = strip_indices(4, &NORMAL_SQUARE_INDICES);
        assert_eq!(indices.len(), 24);
        assert_eq!(&indices[0..6], &[0, 3, 1, 0, 2, 3]);
        // Last quad wraps onto the first inner/outer pair
        assert_eq!(&indices[18..24], &[6, 1, 7, 6, 0, 1]);
        assert!(indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn test_strip_indices_reverse() {
        let indices = strip_indices(2, &REVERSE_SQUARE_INDICES);
        assert_eq!(indices, vec![0, 1, 3, 0, 3, 2, 2, 3, 1, 2, 1, 0]);
    }

    #[test]
    fn test_zero_steps_is_empty() {
        assert!(fan_indices(0, &NORMAL_TRI_INDICES).is_empty());
        assert!(strip_indices(0, &NORMAL_SQUARE_INDICES).is_empty());
    }
}
