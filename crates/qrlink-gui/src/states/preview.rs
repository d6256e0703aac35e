use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Id tagging every message a live scan session sends back.
pub type ScanId = u64;

struct ActiveScan {
    id: ScanId,
    cancel: Arc<AtomicBool>,
}

/// Textures shown on the main screen and the running scan session.
#[derive(Default)]
pub struct PreviewState {
    pub generated: Option<egui::TextureHandle>,
    pub camera: Option<egui::TextureHandle>,
    active: Option<ActiveScan>,
    next_id: ScanId,
}

impl PreviewState {
    pub fn is_scanning(&self) -> bool {
        self.active.is_some()
    }

    /// `true` when `id` names the session currently running.
    pub fn is_current(&self, id: ScanId) -> bool {
        self.active.as_ref().is_some_and(|scan| scan.id == id)
    }

    /// Cancel any running session and register a new one.
    pub fn begin_scan(&mut self) -> (ScanId, Arc<AtomicBool>) {
        self.cancel_scan();
        self.next_id += 1;
        let cancel = Arc::new(AtomicBool::new(false));
        self.active = Some(ActiveScan {
            id: self.next_id,
            cancel: cancel.clone(),
        });
        (self.next_id, cancel)
    }

    /// Ask the running session to stop.
    pub fn cancel_scan(&mut self) {
        if let Some(scan) = self.active.take() {
            scan.cancel.store(true, Ordering::Relaxed);
        }
        self.camera = None;
    }

    /// Clear session `id` if it is still the current one. Returns `false`
    /// for a session already replaced or cancelled.
    pub fn scan_finished(&mut self, id: ScanId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        self.active = None;
        self.camera = None;
        true
    }
}
