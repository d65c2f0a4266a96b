//! The play queue and its on-disk form.

mod persist;
mod store;

pub use persist::{LoadReport, QUEUE_FILE_EXTENSION, QueueDocument, read_queue_document, save_queue};
pub use store::Queue;
