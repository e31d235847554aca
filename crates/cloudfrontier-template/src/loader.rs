//! Loads the base resource fragment shipped with the crate.
//!
//! The fragment defines the skeletal distribution and DNS record every
//! deployment starts from, including the default sections the mutation
//! pipeline expects to find and overwrite. It is embedded at compile time;
//! a parse failure means the shipped fragment is corrupt, which is a
//! packaging defect rather than a user error.

use cloudfrontier_common::error::{CloudfrontierError, Result};

use crate::model::FragmentDocument;

const BASE_FRAGMENT: &str = include_str!("../resources.yml");

/// Parses the embedded base fragment into its typed model.
///
/// # Errors
///
/// Returns [`CloudfrontierError::Fragment`] if the embedded document does
/// not parse against the fragment model.
pub fn load_base_fragment() -> Result<FragmentDocument> {
    serde_yaml::from_str(BASE_FRAGMENT).map_err(|e| CloudfrontierError::Fragment {
        message: e.to_string(),
    })
}
