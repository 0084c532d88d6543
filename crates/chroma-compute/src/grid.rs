//! Dispatch grid descriptor.
//!
//! The keying kernel runs over fixed 16x16 tiles; the grid describes how
//! many tile groups cover a destination surface. It is derived purely from
//! the destination extent and must be recomputed whenever that extent
//! changes - dispatching with a grid computed for an older, smaller
//! surface would silently leave edge pixels unprocessed, so backends
//! reject such a grid ([`DispatchGrid::covers`]).

/// Tile edge length per workgroup, in pixels.
pub const TILE: u32 = 16;

/// Workgroup counts covering a destination surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchGrid {
    groups: (u32, u32, u32),
    extent: (u32, u32),
}

impl DispatchGrid {
    /// Computes the grid for a destination extent: `ceil(dim / 16)` groups
    /// per axis, one layer deep.
    pub fn for_extent(width: u32, height: u32) -> Self {
        Self {
            groups: (width.div_ceil(TILE), height.div_ceil(TILE), 1),
            extent: (width, height),
        }
    }

    /// Workgroup counts as (x, y, z).
    #[inline]
    pub fn groups(&self) -> (u32, u32, u32) {
        self.groups
    }

    /// The destination extent the grid was computed for.
    #[inline]
    pub fn extent(&self) -> (u32, u32) {
        self.extent
    }

    /// Whether the tiles reach every pixel of the given extent.
    ///
    /// False means the grid is stale - recompute before dispatching.
    #[inline]
    pub fn covers(&self, width: u32, height: u32) -> bool {
        self.groups.0 * TILE >= width && self.groups.1 * TILE >= height
    }

    /// Pixel extent actually reachable by the tiles.
    #[inline]
    pub fn covered_extent(&self) -> (u32, u32) {
        (self.groups.0 * TILE, self.groups.1 * TILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_division() {
        let grid = DispatchGrid::for_extent(812, 375);
        assert_eq!(grid.groups(), (51, 24, 1));
    }

    #[test]
    fn test_exact_multiple() {
        let grid = DispatchGrid::for_extent(640, 480);
        assert_eq!(grid.groups(), (40, 30, 1));
    }

    #[test]
    fn test_covers_own_extent() {
        let grid = DispatchGrid::for_extent(812, 375);
        assert!(grid.covers(812, 375));
        // Over-dispatch on a smaller surface is harmless.
        assert!(grid.covers(800, 300));
    }

    #[test]
    fn test_stale_after_growth() {
        let grid = DispatchGrid::for_extent(812, 375);
        assert!(!grid.covers(900, 375));
        assert!(!grid.covers(812, 400));
    }
}
