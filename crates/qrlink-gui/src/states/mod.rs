mod preview;
mod ui;

pub use preview::{PreviewState, ScanId};
pub use ui::{Route, UIState};
