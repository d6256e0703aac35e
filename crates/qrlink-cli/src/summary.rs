use std::path::Path;

use console::Style;
use qrlink_core::config::EncodeConfig;
use qrlink_core::encode::GeneratedCode;
use qrlink_core::payload::{classify, PayloadKind};
use qrlink_core::remote::SendOutcome;
use qrlink_core::scan::SessionReport;

pub struct Styles {
    pub title: Style,
    pub label: Style,
    pub value: Style,
    pub link: Style,
    pub path: Style,
    pub ok: Style,
    pub error: Style,
    pub dim: Style,
}

impl Styles {
    pub fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            link: Style::new().blue().underlined(),
            path: Style::new().underlined(),
            ok: Style::new().green(),
            error: Style::new().red().bold(),
            dim: Style::new().dim().yellow(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_generated(code: &GeneratedCode, config: &EncodeConfig, path: &Path) {
    let s = Styles::new();
    print_title(&s, "QR Code Generated");

    println!(
        "  {:<12}{}",
        s.label.apply_to("Saved"),
        s.path.apply_to(path.display())
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Size"),
        s.value.apply_to(format!("{0}x{0} px", code.image.width()))
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("Modules"),
        s.value.apply_to(code.modules)
    );
    println!(
        "  {:<12}{}",
        s.label.apply_to("EC level"),
        s.value.apply_to(config.ec_level)
    );
    println!();
}

/// The decoded payload, link-styled when it is a URL.
pub fn print_result(text: &str) {
    let s = Styles::new();
    print_title(&s, "QR Code Result");

    let kind = classify(text);
    let styled = match kind {
        PayloadKind::Url(_) => s.link.apply_to(text),
        PayloadKind::Text => s.value.apply_to(text),
    };
    println!("  {:<12}{}", s.label.apply_to("Kind"), kind.label());
    println!("  {:<12}{}", s.label.apply_to("Content"), styled);
    println!();
}

pub fn print_session(report: &SessionReport) {
    let s = Styles::new();
    println!(
        "  {:<12}{} captured, {} analyzed, {}",
        s.label.apply_to("Frames"),
        s.value.apply_to(report.frames_captured),
        s.value.apply_to(report.frames_analyzed),
        s.dim.apply_to(format!("{} skipped", report.frames_dropped))
    );
}

pub fn print_send_outcome(outcome: &SendOutcome) {
    let s = Styles::new();
    if outcome.is_delivered() {
        println!("  {}", s.ok.apply_to(outcome));
    } else {
        println!("  {}", s.error.apply_to(outcome));
    }
}
