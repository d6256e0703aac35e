use std::sync::mpsc;

use qrlink_core::encode::GeneratedCode;
use tracing::warn;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{actions, io, scan};

/// Last generated code, kept on the worker thread for "Save Image".
#[derive(Default)]
pub(crate) struct GeneratedCache {
    pub code: Option<GeneratedCode>,
}

/// Spawn the worker thread. Returns the command sender.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> std::io::Result<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("qrlink-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx);
        })?;

    Ok(cmd_tx)
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    let mut cache = GeneratedCache::default();
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => Some(rt),
        Err(e) => {
            warn!("network runtime unavailable: {e}");
            None
        }
    };

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Generate { text, config } => {
                io::handle_generate(&text, &config, &mut cache, &tx, &ctx);
            }
            WorkerCommand::SaveImage { storage } => {
                io::handle_save_image(&storage, &cache, &tx, &ctx);
            }
            WorkerCommand::ScanImage { path } => {
                io::handle_scan_image(&path, &tx, &ctx);
            }
            WorkerCommand::StartScan {
                session,
                source,
                options,
                cancel,
            } => {
                scan::handle_start_scan(session, source, options, cancel, &tx, &ctx);
            }
            WorkerCommand::SendRemote { text, remote } => match runtime {
                Some(ref rt) => actions::handle_send(rt, &text, &remote, &tx, &ctx),
                None => send_error(&tx, &ctx, "Network runtime unavailable"),
            },
            WorkerCommand::OpenLink { text } => {
                actions::handle_open_link(&text, &tx, &ctx);
            }
            WorkerCommand::Share { text } => {
                actions::handle_share(&text, &tx, &ctx);
            }
        }
    }
}
