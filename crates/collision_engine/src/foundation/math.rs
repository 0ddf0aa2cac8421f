//! Math utilities and types
//!
//! Provides the vector types used by the collision core.

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Clamp every component of `point` into `[min, max]`
    pub fn clamp_vec(point: &Vec3, min: &Vec3, max: &Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(min.x, max.x),
            point.y.clamp(min.y, max.y),
            point.z.clamp(min.z, max.z),
        )
    }

    /// Check that every component is finite
    pub fn is_finite(v: &Vec3) -> bool {
        v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
    }
}
