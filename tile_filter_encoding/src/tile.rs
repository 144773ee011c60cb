// Copyright 2026 the Vello Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use bytemuck::{Pod, Zeroable};
use peniko::kurbo::Rect;

/// Location of a tile in the logical tile grid.
///
/// This must be kept in sync with the `@location(0)` vertex input in
/// `shader/tile_filter.wgsl`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Zeroable, Pod)]
#[repr(C)]
pub struct TilePosition {
    pub x: i32,
    pub y: i32,
}

impl TilePosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for TilePosition {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<(i16, i16)> for TilePosition {
    fn from((x, y): (i16, i16)) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// A rectangle of tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TileRect {
    pub origin: TilePosition,
    pub width: u32,
    pub height: u32,
}

impl TileRect {
    pub const fn new(origin: TilePosition, width: u32, height: u32) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }

    /// The smallest tile rectangle containing `bounds`.
    ///
    /// Empty, inverted or non-finite bounds (and non-positive tile sizes)
    /// produce an empty rectangle at the origin. So do bounds whose tile
    /// corners fall outside the `i32` range of [`TilePosition`].
    pub fn covering(bounds: Rect, tile_size: [f32; 2]) -> Self {
        let [tw, th] = tile_size.map(f64::from);
        let finite = [bounds.x0, bounds.y0, bounds.x1, bounds.y1, tw, th]
            .iter()
            .all(|v| v.is_finite());
        if !finite || tw <= 0.0 || th <= 0.0 || bounds.x1 <= bounds.x0 || bounds.y1 <= bounds.y0
        {
            return Self::default();
        }
        let corners = [
            (bounds.x0 / tw).floor(),
            (bounds.y0 / th).floor(),
            (bounds.x1 / tw).ceil(),
            (bounds.y1 / th).ceil(),
        ];
        let range = f64::from(i32::MIN)..=f64::from(i32::MAX);
        if !corners.iter().all(|c| range.contains(c)) {
            return Self::default();
        }
        let [x0, y0, x1, y1] = corners.map(|c| c as i32);
        Self {
            origin: TilePosition::new(x0, y0),
            width: x1.abs_diff(x0),
            height: y1.abs_diff(y0),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Number of tiles in the rectangle.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn contains(&self, pos: TilePosition) -> bool {
        let dx = i64::from(pos.x) - i64::from(self.origin.x);
        let dy = i64::from(pos.y) - i64::from(self.origin.y);
        (0..i64::from(self.width)).contains(&dx) && (0..i64::from(self.height)).contains(&dy)
    }

    /// Row-major index of `pos` within the rectangle.
    pub fn index_of(&self, pos: TilePosition) -> Option<u64> {
        if !self.contains(pos) {
            return None;
        }
        let dx = u64::from(pos.x.abs_diff(self.origin.x));
        let dy = u64::from(pos.y.abs_diff(self.origin.y));
        Some(dy * u64::from(self.width) + dx)
    }

    /// Tile positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = TilePosition> {
        grid(self.origin, self.width.into(), self.height.into())
    }

    /// Positions of the tile corners in row-major order.
    ///
    /// There is one more corner than tiles along each axis; an empty
    /// rectangle has no corners.
    pub fn corner_positions(&self) -> impl Iterator<Item = TilePosition> {
        let (width, height) = if self.is_empty() {
            (0, 0)
        } else {
            (u64::from(self.width) + 1, u64::from(self.height) + 1)
        };
        grid(self.origin, width, height)
    }
}

/// Positions past `i32::MAX` wrap around, which only happens for rectangles
/// built by hand that reach beyond the tile coordinate range.
fn grid(origin: TilePosition, width: u64, height: u64) -> impl Iterator<Item = TilePosition> {
    let offset = |base: i32, d: u64| base.wrapping_add(d as i32);
    (0..height).flat_map(move |dy| {
        (0..width).map(move |dx| TilePosition::new(offset(origin.x, dx), offset(origin.y, dy)))
    })
}
