//! # cloudfrontier-template
//!
//! The base resource fragment every deployment starts from, its typed
//! model, and the deep merge folding a prepared fragment into the larger
//! deployment template.

pub mod loader;
pub mod merge;
pub mod model;

pub use loader::load_base_fragment;
pub use merge::deep_merge;
pub use model::FragmentDocument;
