//! Utility helpers shared by every layer.

pub mod email;
