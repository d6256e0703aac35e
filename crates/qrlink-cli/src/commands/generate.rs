use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use qrlink_core::config::{AppConfig, EcLevelChoice};
use qrlink_core::encode::{generate, render_terminal};
use qrlink_core::io::image_io::{save_png, save_to_pictures};

#[derive(Clone, Copy, ValueEnum)]
pub enum EcArg {
    L,
    M,
    Q,
    H,
}

impl From<EcArg> for EcLevelChoice {
    fn from(arg: EcArg) -> Self {
        match arg {
            EcArg::L => Self::Low,
            EcArg::M => Self::Medium,
            EcArg::Q => Self::Quartile,
            EcArg::H => Self::High,
        }
    }
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Text to encode
    pub text: String,

    /// Output PNG path. Defaults to a timestamped file in the pictures directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image edge length in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Error correction level
    #[arg(long, value_enum)]
    pub ec: Option<EcArg>,

    /// Also draw the code in the terminal
    #[arg(long)]
    pub print: bool,
}

pub fn run(args: &GenerateArgs, config: &AppConfig) -> Result<()> {
    let mut encode = config.encode.clone();
    if let Some(size) = args.size {
        encode.size = size;
    }
    if let Some(ec) = args.ec {
        encode.ec_level = ec.into();
    }

    let code = generate(&args.text, &encode)?;

    if args.print {
        println!("{}", render_terminal(&args.text, encode.ec_level)?);
    }

    let path = match args.output {
        Some(ref path) => {
            save_png(&code.image, path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            path.clone()
        }
        None => save_to_pictures(&code.image, &config.storage)
            .context("Failed to save QR image to the pictures directory")?,
    };

    crate::summary::print_generated(&code, &encode, &path);
    Ok(())
}
