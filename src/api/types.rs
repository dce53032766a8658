//! Shared state for the API layer.

use std::sync::Arc;

use crate::classifier::Classifier;
use crate::reference::ReferenceTable;

/// Shared context for all API routes.
///
/// Built once at startup and cloned into every handler. Both the table and
/// the classifier are immutable after construction, so no locking happens
/// at this level.
#[derive(Clone)]
pub struct ApiContext {
    pub table: Arc<ReferenceTable>,
    pub classifier: Arc<dyn Classifier>,
    pub max_upload_bytes: usize,
}

impl ApiContext {
    pub fn new(
        table: Arc<ReferenceTable>,
        classifier: Arc<dyn Classifier>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            table,
            classifier,
            max_upload_bytes,
        }
    }
}
