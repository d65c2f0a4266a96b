use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;

use crate::error::MetadataError;

/// Best-effort track length lookup.
pub trait MetadataReader {
    fn duration(&self, path: &Path) -> Result<Duration, MetadataError>;
}

/// Reads durations from file headers with `lofty`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyMetadata;

impl MetadataReader for LoftyMetadata {
    fn duration(&self, path: &Path) -> Result<Duration, MetadataError> {
        let tagged = lofty::read_from_path(path).map_err(|e| MetadataError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let duration = tagged.properties().duration();
        if duration.is_zero() {
            return Err(MetadataError::Unknown {
                path: path.to_path_buf(),
            });
        }
        Ok(duration)
    }
}
