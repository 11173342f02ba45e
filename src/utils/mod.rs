//! Utility Module
//!
//! - [`math`]: fixed-length vector construction and in-place assignment
//!
//! ```rust,ignore
//! use lumen::utils::math;
//!
//! let mut color = math::vec3([0.7, 0.7, 0.8]);
//! math::assign_vec3(&mut color, [1.0, 0.0, 0.0]); // same storage, new values
//! ```

pub mod math;
