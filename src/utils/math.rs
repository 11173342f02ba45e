//! Fixed-length vector helpers.
//!
//! Render state records own their vectors for their whole lifetime; these
//! helpers build that storage once and then overwrite it in place.

use glam::Vec3;

/// Builds a new 3-element vector from raw components.
#[inline]
#[must_use]
pub fn vec3(values: [f32; 3]) -> Vec3 {
    Vec3::from_array(values)
}

/// Overwrites `target` with `values` without replacing its storage.
#[inline]
pub fn assign_vec3(target: &mut Vec3, values: [f32; 3]) {
    target.x = values[0];
    target.y = values[1];
    target.z = values[2];
}

/// Writes `values` into `target`, or `fallback` when `values` is `None`.
#[inline]
pub fn assign_vec3_or(target: &mut Vec3, values: Option<[f32; 3]>, fallback: [f32; 3]) {
    assign_vec3(target, values.unwrap_or(fallback));
}
