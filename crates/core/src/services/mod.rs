//! Algorithms: minimal set cover, identifying test-batch design, and logical
//! diagnosis of failed groups.

pub mod cover;
pub mod design;
pub mod diagnosis;
