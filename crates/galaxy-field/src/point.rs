//! Point record and the immutable cloud that owns them.

use rayon::prelude::*;

/// One rendered point. Must match the vertex layout in `galaxy_points.wgsl`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Point {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Bytes between consecutive points in a vertex buffer.
pub const POINT_STRIDE: usize = 24;
/// Byte offset of `position` inside a record.
pub const POSITION_OFFSET: usize = 0;
/// Byte offset of `color` inside a record.
pub const COLOR_OFFSET: usize = 12;

const _: [(); POINT_STRIDE] = [(); core::mem::size_of::<Point>()];
const _: [(); POSITION_OFFSET] = [(); core::mem::offset_of!(Point, position)];
const _: [(); COLOR_OFFSET] = [(); core::mem::offset_of!(Point, color)];

/// Axis-aligned bounding box over point positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// An ordered, fully initialised set of points. No mutating access after construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    points: Vec<Point>,
}

impl PointCloud {
    pub(crate) fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Raw bytes in `POINT_STRIDE` records, ready for a vertex buffer upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Position bounds, or `None` for an empty cloud.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.points.is_empty() {
            return None;
        }

        let (min, max) = self
            .points
            .par_iter()
            .map(|p| (p.position, p.position))
            .reduce(
                || ([f32::INFINITY; 3], [f32::NEG_INFINITY; 3]),
                |(a_min, a_max), (b_min, b_max)| {
                    (
                        [
                            a_min[0].min(b_min[0]),
                            a_min[1].min(b_min[1]),
                            a_min[2].min(b_min[2]),
                        ],
                        [
                            a_max[0].max(b_max[0]),
                            a_max[1].max(b_max[1]),
                            a_max[2].max(b_max[2]),
                        ],
                    )
                },
            );

        Some(Bounds { min, max })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_bytes_follow_position_then_color() {
        let cloud = PointCloud::from_points(vec![Point {
            position: [1.0, 2.0, 3.0],
            color: [0.25, 0.5, 0.75],
        }]);

        let bytes = cloud.as_bytes();
        assert_eq!(bytes.len(), POINT_STRIDE);

        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[1.0, 2.0, 3.0, 0.25, 0.5, 0.75]);
        assert_eq!(
            f32::from_ne_bytes(bytes[COLOR_OFFSET..COLOR_OFFSET + 4].try_into().unwrap()),
            0.25
        );
    }

    #[test]
    fn bounds_cover_all_positions() {
        let cloud = PointCloud::from_points(vec![
            Point { position: [-5.0, 0.0, 2.0], color: [0.0; 3] },
            Point { position: [3.0, -7.0, 9.0], color: [0.0; 3] },
            Point { position: [1.0, 4.0, -1.0], color: [0.0; 3] },
        ]);

        let b = cloud.bounds().unwrap();
        assert_eq!(b.min, [-5.0, -7.0, -1.0]);
        assert_eq!(b.max, [3.0, 4.0, 9.0]);
    }

    #[test]
    fn empty_cloud_has_no_bounds() {
        let cloud = PointCloud::default();
        assert!(cloud.is_empty());
        assert!(cloud.bounds().is_none());
        assert!(cloud.as_bytes().is_empty());
    }
}
