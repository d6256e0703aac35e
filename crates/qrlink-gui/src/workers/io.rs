use std::path::Path;
use std::sync::mpsc;

use qrlink_core::config::{EncodeConfig, StorageConfig};
use qrlink_core::decode::ScanOutcome;
use qrlink_core::encode::generate;
use qrlink_core::io::image_io::save_to_pictures;
use qrlink_core::scan::scan_file;

use crate::convert::gray_to_color_image;
use crate::messages::WorkerResult;

use super::{send, send_error, send_log, GeneratedCache};

pub(super) fn handle_generate(
    text: &str,
    config: &EncodeConfig,
    cache: &mut GeneratedCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match generate(text, config) {
        Ok(code) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Generated {0}x{0} code ({1} modules, {2})",
                    code.image.width(),
                    code.modules,
                    config.ec_level
                ),
            );
            send(
                tx,
                ctx,
                WorkerResult::Generated {
                    image: gray_to_color_image(&code.image),
                    modules: code.modules,
                },
            );
            cache.code = Some(code);
        }
        Err(e) => send_error(tx, ctx, format!("Error generating QR Code: {e}")),
    }
}

pub(super) fn handle_save_image(
    storage: &StorageConfig,
    cache: &GeneratedCache,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let Some(ref code) = cache.code else {
        send_error(tx, ctx, "Generate a QR code first");
        return;
    };

    match save_to_pictures(&code.image, storage) {
        Ok(path) => send(tx, ctx, WorkerResult::ImageSaved { path }),
        Err(e) => send_error(tx, ctx, format!("Error saving image: {e}")),
    }
}

pub(super) fn handle_scan_image(path: &Path, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match scan_file(path) {
        Ok(ScanOutcome::Found(text)) => send(tx, ctx, WorkerResult::Decoded { text }),
        Ok(ScanOutcome::NotFound) => send(
            tx,
            ctx,
            WorkerResult::NotFound {
                message: "No QR code found in image".into(),
            },
        ),
        Err(e) => send_error(tx, ctx, e.to_string()),
    }
}
