//! Projection of the pointer ray onto the invisible reference plane.
//!
//! The reference plane is a quad at `z = 0`, the same size as the particle
//! grid and perpendicular to the default view axis. It exists only to turn
//! a 3D pointer ray into a stable 2D coordinate on the trail surface.

use glam::Vec2;

use crate::camera::Ray;

/// Reference plane for cursor projection.
#[derive(Debug, Clone, Copy)]
pub struct ReferencePlane {
    half_extent: f32,
}

impl ReferencePlane {
    /// Create a plane covering `extent`×`extent` world units, centered on
    /// the origin.
    pub fn new(extent: f32) -> Self {
        Self {
            half_extent: extent * 0.5,
        }
    }

    /// Intersect a ray with the plane. Returns the hit's UV in [0, 1]², or
    /// `None` when the ray is parallel, points away, or hits outside the
    /// quad.
    pub fn intersect_uv(&self, ray: &Ray) -> Option<Vec2> {
        if ray.dir.z.abs() < 1e-6 {
            return None;
        }
        let t = -ray.origin.z / ray.dir.z;
        if t <= 0.0 {
            return None;
        }
        let hit = ray.origin + ray.dir * t;
        let u = hit.x / (2.0 * self.half_extent) + 0.5;
        let v = hit.y / (2.0 * self.half_extent) + 0.5;
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }
        Some(Vec2::new(u, v))
    }

    /// Project a ray to trail-surface texel space.
    ///
    /// `tx = u * w`, `ty = (1 - v) * h`: the v axis flips because imprint
    /// space has its origin top-left while plane UV has it bottom-left.
    /// Returns `None` on miss, in which case the caller must keep the
    /// previous cursor position unchanged.
    pub fn project(&self, ray: &Ray, surface_width: u32, surface_height: u32) -> Option<Vec2> {
        let uv = self.intersect_uv(ray)?;
        Some(Vec2::new(
            uv.x * surface_width as f32,
            (1.0 - uv.y) * surface_height as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn straight_down_z(origin: Vec3) -> Ray {
        Ray {
            origin,
            dir: Vec3::new(0.0, 0.0, -1.0),
        }
    }

    #[test]
    fn test_center_hit_maps_to_surface_center() {
        let plane = ReferencePlane::new(10.0);
        let ray = straight_down_z(Vec3::new(0.0, 0.0, 18.0));
        let texel = plane.project(&ray, 128, 128).unwrap();
        assert_eq!(texel, Vec2::new(64.0, 64.0));
    }

    #[test]
    fn test_v_flip() {
        let plane = ReferencePlane::new(10.0);
        // Hit near the top edge of the plane (y = +4.9) should land near
        // texel row 0.
        let ray = straight_down_z(Vec3::new(0.0, 4.9, 18.0));
        let texel = plane.project(&ray, 128, 128).unwrap();
        assert!(texel.y < 2.0, "texel = {:?}", texel);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let plane = ReferencePlane::new(10.0);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 18.0),
            dir: Vec3::new(1.0, 0.0, 0.0),
        };
        assert!(plane.intersect_uv(&ray).is_none());
    }

    #[test]
    fn test_ray_pointing_away_misses() {
        let plane = ReferencePlane::new(10.0);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 18.0),
            dir: Vec3::new(0.0, 0.0, 1.0),
        };
        assert!(plane.intersect_uv(&ray).is_none());
    }

    #[test]
    fn test_hit_outside_quad_misses() {
        let plane = ReferencePlane::new(10.0);
        let ray = straight_down_z(Vec3::new(7.0, 0.0, 18.0));
        assert!(plane.intersect_uv(&ray).is_none());
    }

    #[test]
    fn test_corner_uv() {
        let plane = ReferencePlane::new(10.0);
        let ray = straight_down_z(Vec3::new(-5.0, -5.0, 18.0));
        let uv = plane.intersect_uv(&ray).unwrap();
        assert!(uv.x.abs() < 1e-6);
        assert!(uv.y.abs() < 1e-6);
        // Bottom-left UV corner lands on the bottom texel row.
        let texel = plane.project(&ray, 128, 128).unwrap();
        assert_eq!(texel, Vec2::new(0.0, 128.0));
    }
}
