//! Data models

pub mod features;
pub mod form;

pub use features::*;
pub use form::*;
