use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use elecdash_core::ViewId;

/// Receives cache invalidations for the keys a view declares.
pub trait RefreshSink {
    fn invalidate(&self, view: ViewId, keys: &[&'static str]);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub view: ViewId,
    pub keys: Vec<&'static str>,
}

/// Keeps every invalidation; clones share the same record.
#[derive(Debug, Clone, Default)]
pub struct RecordingRefreshSink {
    record: Arc<Mutex<Vec<Invalidation>>>,
}

impl RecordingRefreshSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Invalidation> {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RefreshSink for RecordingRefreshSink {
    fn invalidate(&self, view: ViewId, keys: &[&'static str]) {
        tracing::info!(%view, keys = ?keys, "invalidating cached data");
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Invalidation {
                view,
                keys: keys.to_vec(),
            });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn clones_share_the_record() {
        let sink = RecordingRefreshSink::new();
        let handle = sink.clone();
        sink.invalidate(ViewId::Team, &["employees"]);
        assert_eq!(
            handle.snapshot(),
            vec![Invalidation {
                view: ViewId::Team,
                keys: vec!["employees"],
            }]
        );
    }
}
