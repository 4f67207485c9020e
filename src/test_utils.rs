use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{Mutex, Once};

use zip::write::SimpleFileOptions;

use crate::types::events::{LogLevel, LogPayload, ProgressPayload, ShellEmitter};

static INIT: Once = Once::new();

/// Initialize the test logger once per process.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Write a ZIP archive at `path` containing `entries` as (name, contents)
/// pairs, in order. A name ending in `/` becomes a directory entry.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).expect("Failed to create zip fixture");
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, contents) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.trim_end_matches('/'), options)
                .expect("Failed to add directory entry");
        } else {
            writer
                .start_file(*name, options)
                .expect("Failed to start zip entry");
            writer
                .write_all(contents.as_bytes())
                .expect("Failed to write zip entry");
        }
    }

    writer.finish().expect("Failed to finish zip fixture");
}

/// Emitter that records every event for assertions.
#[derive(Default)]
pub struct CaptureEmitter {
    pub progress: Mutex<Vec<ProgressPayload>>,
    pub logs: Mutex<Vec<LogPayload>>,
}

impl ShellEmitter for CaptureEmitter {
    fn emit_progress(&self, payload: ProgressPayload) {
        self.progress.lock().unwrap().push(payload);
    }

    fn emit_log(&self, payload: LogPayload) {
        self.logs.lock().unwrap().push(payload);
    }
}

impl CaptureEmitter {
    /// Messages logged at the given level, in emission order.
    pub fn messages_at(&self, level: LogLevel) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.level == level)
            .map(|l| l.message.clone())
            .collect()
    }

    /// Progress fractions in emission order.
    pub fn fractions(&self) -> Vec<f64> {
        self.progress
            .lock()
            .unwrap()
            .iter()
            .map(|p| p.fraction)
            .collect()
    }
}
