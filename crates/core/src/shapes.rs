//! Shape catalog - canonical masks and colors for the seven pieces
//!
//! Masks are given at spawn orientation; rotation is derived on demand
//! with [`Mask::rotate`].

use crate::mask::Mask;
use crate::rng::ShapeSource;
use crate::types::{Rgb, ShapeId, EMPTY_ACTIVE_COLOR, EMPTY_COLOR};

const X: bool = true;
const O: bool = false;

pub const L_MASK: Mask = Mask::from_array([[X, X], [X, O], [X, O]]);
pub const MIRRORED_L_MASK: Mask = Mask::from_array([[X, X], [O, X], [O, X]]);
pub const I_MASK: Mask = Mask::from_array([[X], [X], [X], [X]]);
pub const O_MASK: Mask = Mask::from_array([[X, X], [X, X]]);
pub const T_MASK: Mask = Mask::from_array([[X, O], [X, X], [X, O]]);
pub const S_MASK: Mask = Mask::from_array([[O, X], [X, X], [X, O]]);
pub const MIRRORED_S_MASK: Mask = Mask::from_array([[X, O], [X, X], [O, X]]);

/// Catalog lookups on a shape identifier.
pub trait ShapeCatalog {
    /// Canonical spawn mask.
    fn mask(&self) -> Mask;
    /// Color while falling.
    fn active_color(&self) -> Rgb;
    /// Color once locked into the grid.
    fn color(&self) -> Rgb;
}

impl ShapeCatalog for ShapeId {
    fn mask(&self) -> Mask {
        match self {
            ShapeId::L => L_MASK,
            ShapeId::MirroredL => MIRRORED_L_MASK,
            ShapeId::I => I_MASK,
            ShapeId::O => O_MASK,
            ShapeId::T => T_MASK,
            ShapeId::S => S_MASK,
            ShapeId::MirroredS => MIRRORED_S_MASK,
            ShapeId::Empty => {
                tracing::warn!(shape = ?self, "no mask for shape, using the L mask");
                L_MASK
            }
        }
    }

    fn active_color(&self) -> Rgb {
        match self {
            ShapeId::L => Rgb::short_hex(0xd50),
            ShapeId::MirroredL => Rgb::short_hex(0xa0a),
            ShapeId::I => Rgb::short_hex(0xaa0),
            ShapeId::O => Rgb::short_hex(0x00a),
            ShapeId::T => Rgb::short_hex(0xd05),
            ShapeId::S => Rgb::short_hex(0x0a0),
            ShapeId::MirroredS => Rgb::short_hex(0xa00),
            ShapeId::Empty => EMPTY_ACTIVE_COLOR,
        }
    }

    fn color(&self) -> Rgb {
        match self {
            ShapeId::L => Rgb::short_hex(0xf70),
            ShapeId::MirroredL => Rgb::short_hex(0xf0f),
            ShapeId::I => Rgb::short_hex(0xff0),
            ShapeId::O => Rgb::short_hex(0x00f),
            ShapeId::T => Rgb::short_hex(0xf07),
            ShapeId::S => Rgb::short_hex(0x0f0),
            ShapeId::MirroredS => Rgb::short_hex(0xf00),
            ShapeId::Empty => EMPTY_COLOR,
        }
    }
}

/// Draw a random real shape.
pub fn random_shape(source: &mut ShapeSource) -> ShapeId {
    source.draw()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells() {
        for shape in ShapeId::ALL {
            assert_eq!(shape.mask().occupied().len(), 4, "{:?}", shape);
        }
    }

    #[test]
    fn spawn_masks_fit_the_preview_box() {
        for shape in ShapeId::ALL {
            let mask = shape.mask();
            assert!(mask.rows() <= 4 && mask.cols() <= 2, "{:?}", shape);
        }
    }

    #[test]
    fn empty_falls_back_to_l_mask() {
        assert_eq!(ShapeId::Empty.mask(), L_MASK);
    }

    #[test]
    fn locked_and_active_colors_differ() {
        for shape in ShapeId::ALL {
            assert_ne!(shape.color(), shape.active_color(), "{:?}", shape);
        }
        assert_eq!(ShapeId::Empty.color(), EMPTY_COLOR);
    }

    #[test]
    fn mirrored_pairs_are_reflections() {
        let flip = |m: Mask| -> Vec<Vec<bool>> {
            m.to_rows()
                .into_iter()
                .map(|row| row.into_iter().rev().collect())
                .collect()
        };
        assert_eq!(flip(L_MASK), MIRRORED_L_MASK.to_rows());
        assert_eq!(flip(S_MASK), MIRRORED_S_MASK.to_rows());
    }
}
