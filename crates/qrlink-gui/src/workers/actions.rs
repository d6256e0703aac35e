use std::sync::mpsc;

use qrlink_core::actions::{open_link, share_text};
use qrlink_core::config::RemoteConfig;
use qrlink_core::remote::RemoteSender;
use tokio::runtime::Runtime;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_send(
    runtime: &Runtime,
    text: &str,
    remote: &RemoteConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let sender = match RemoteSender::new(remote) {
        Ok(sender) => sender,
        Err(e) => {
            send_error(tx, ctx, format!("Failed to send QR: {e}"));
            return;
        }
    };

    match runtime.block_on(sender.send(text)) {
        Ok(outcome) => send(tx, ctx, WorkerResult::Sent { outcome }),
        Err(e) => send_error(tx, ctx, format!("Failed to send QR: {e}")),
    }
}

pub(super) fn handle_open_link(text: &str, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match open_link(text) {
        Ok(url) => send(
            tx,
            ctx,
            WorkerResult::Toast {
                message: format!("Opening {url}"),
            },
        ),
        Err(e) => send_error(tx, ctx, e.to_string()),
    }
}

pub(super) fn handle_share(text: &str, tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context) {
    match share_text(text) {
        Ok(_) => send(
            tx,
            ctx,
            WorkerResult::Toast {
                message: "Share draft opened".into(),
            },
        ),
        Err(e) => send_error(tx, ctx, e.to_string()),
    }
}
