//! Test utilities & fixtures.
//! A recording host implementation shared by the integration tests: shared
//! config lives in memory, and every theme application and notification the
//! plugin hands over is captured for assertions.
#![allow(dead_code)] // Not every test binary touches every helper.

use std::collections::HashMap;

use serde_json::Value;
use taskquest::gamify::{GamifyError, ProgressionEvent, SharedStore};
use taskquest::plugin::{HostApi, ThemeDescriptor};

#[derive(Default)]
pub struct MemoryBlobStore {
    pub blobs: HashMap<String, Value>,
}

impl SharedStore for MemoryBlobStore {
    fn get_blob(&self, key: &str) -> Result<Option<Value>, GamifyError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn put_blob(&mut self, key: &str, value: Value) -> Result<(), GamifyError> {
        self.blobs.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingHost {
    pub shared: MemoryBlobStore,
    pub applied_themes: Vec<ThemeDescriptor>,
    pub removed_styles: Vec<String>,
    pub notifications: Vec<ProgressionEvent>,
}

impl HostApi for RecordingHost {
    fn shared_store(&mut self) -> &mut dyn SharedStore {
        &mut self.shared
    }

    fn apply_theme(&mut self, theme: &ThemeDescriptor) {
        self.applied_themes.push(theme.clone());
    }

    fn remove_theme(&mut self, style_id: &str) {
        self.removed_styles.push(style_id.to_string());
    }

    fn notify(&mut self, event: ProgressionEvent) {
        self.notifications.push(event);
    }
}
