// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The matrix used to place tiles in clip space.

use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use peniko::kurbo;

/// A 4x4 matrix stored column-major.
///
/// The memory layout matches WGSL's `mat4x4<f32>`, so the matrix can be
/// uploaded to a uniform buffer as is. Vectors are treated as columns and
/// multiplied on the right: `clip = m * v`.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Builds a matrix from row-major data, for callers that store matrices
    /// the other way around.
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { cols: rows }.transpose()
    }

    pub fn transpose(&self) -> Self {
        let mut cols = [[0.0; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, value) in col.iter_mut().enumerate() {
                *value = self.cols[r][c];
            }
        }
        Self { cols }
    }

    /// Orthographic projection from pixel space of a `width` by `height`
    /// target (origin top left, y down) to clip space.
    ///
    /// `(0, 0)` lands on `(-1, 1)` and `(width, height)` on `(1, -1)`. The z
    /// coordinate passes through unchanged.
    pub fn orthographic(width: f32, height: f32) -> Self {
        Self::from_cols([
            [2.0 / width, 0.0, 0.0, 0.0],
            [0.0, -2.0 / height, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [-1.0, 1.0, 0.0, 1.0],
        ])
    }

    /// Embeds a kurbo affine transform in the xy plane.
    ///
    /// The coefficients are narrowed to `f32`; z passes through unchanged.
    pub fn from_kurbo(transform: &kurbo::Affine) -> Self {
        let [a, b, c, d, e, f] = transform.as_coeffs().map(|x| x as f32);
        Self::from_cols([
            [a, b, 0.0, 0.0],
            [c, d, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [e, f, 0.0, 1.0],
        ])
    }

    #[inline]
    pub fn mul_vec4(&self, v: [f32; 4]) -> [f32; 4] {
        let m = &self.cols;
        let mut out = [0.0; 4];
        for (r, value) in out.iter_mut().enumerate() {
            *value = m[0][r] * v[0] + m[1][r] * v[1] + m[2][r] * v[2] + m[3][r] * v[3];
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|x| x.is_finite())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self {
            cols: other.cols.map(|col| self.mul_vec4(col)),
        }
    }
}
