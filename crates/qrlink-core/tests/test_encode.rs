#[allow(dead_code)]
mod common;

use qrlink_core::config::{EcLevelChoice, EncodeConfig};
use qrlink_core::decode::{decode_luma, ScanOutcome};
use qrlink_core::encode::{generate, render_terminal};
use qrlink_core::error::QrLinkError;

#[test]
fn test_generate_default_is_512_square() {
    let code = generate("hello", &EncodeConfig::default()).unwrap();
    assert_eq!(code.image.dimensions(), (512, 512));
    assert_eq!(code.text, "hello");
    // Version 1 symbol at level H
    assert_eq!(code.modules, 21);
}

#[test]
fn test_generate_is_pure_black_and_white() {
    let code = generate("https://example.com", &EncodeConfig::default()).unwrap();
    assert!(code.image.pixels().all(|p| p[0] == 0 || p[0] == 255));
    assert!(code.image.pixels().any(|p| p[0] == 0));
}

#[test]
fn test_generate_keeps_quiet_zone_light() {
    let code = generate("quiet", &EncodeConfig::default()).unwrap();
    // 21 modules + 8 quiet = 29, scale = 512 / 29 = 17, offset = (512 - 357) / 2 = 77
    for i in 0..77 {
        assert_eq!(code.image.get_pixel(i, i)[0], 255, "pixel {i} should be light");
    }
    // Top-left finder pattern corner is dark.
    assert_eq!(code.image.get_pixel(77, 77)[0], 0);
}

#[test]
fn test_generate_rejects_empty_text() {
    let err = generate("", &EncodeConfig::default()).unwrap_err();
    assert!(matches!(err, QrLinkError::EmptyInput));
}

#[test]
fn test_generate_rejects_oversized_payload() {
    let text = "x".repeat(4000);
    let err = generate(&text, &EncodeConfig::default()).unwrap_err();
    assert!(matches!(err, QrLinkError::Encode(_)), "got: {err}");
}

#[test]
fn test_lower_ec_level_yields_smaller_symbol() {
    let text = "The quick brown fox jumps over the lazy dog";
    let high = generate(text, &EncodeConfig::default()).unwrap();
    let low = generate(
        text,
        &EncodeConfig {
            ec_level: EcLevelChoice::Low,
            ..EncodeConfig::default()
        },
    )
    .unwrap();
    assert!(low.modules < high.modules);
}

#[test]
fn test_generated_code_scans_back() {
    let text = "Olá, QR! ✓";
    let code = generate(text, &EncodeConfig::default()).unwrap();
    assert_eq!(
        decode_luma(code.image).unwrap(),
        ScanOutcome::Found(text.to_string())
    );
}

#[test]
fn test_render_terminal_has_one_line_per_two_rows() {
    let rendered = render_terminal("hi", EcLevelChoice::High).unwrap();
    let lines: Vec<&str> = rendered.lines().collect();
    // 21 modules + 8 quiet zone rows, two rows per line, rounded up
    assert_eq!(lines.len(), 15);
}

#[test]
fn test_generate_rejects_oversized_quiet_zone() {
    let config = EncodeConfig {
        quiet_zone: u32::MAX,
        ..EncodeConfig::default()
    };
    let err = generate("hello", &config).unwrap_err();
    assert!(matches!(err, QrLinkError::Encode(_)), "got: {err}");
}
