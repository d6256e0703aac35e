use std::time::{Duration, Instant};

use qrlink_core::actions::{copy_and_hold, open_link, share_url};
use qrlink_core::error::QrLinkError;

#[test]
fn test_share_url_builds_mail_draft() {
    let url = share_url("see https://example.com/a?b=1 & more").unwrap();
    assert_eq!(url.scheme(), "mailto");
    assert_eq!(
        url.as_str(),
        "mailto:?subject=QR%20Code&body=see%20https%3A%2F%2Fexample.com%2Fa%3Fb%3D1%20%26%20more"
    );
}

#[test]
fn test_share_url_encodes_non_ascii() {
    let url = share_url("olá").unwrap();
    assert!(url.as_str().ends_with("body=ol%C3%A1"), "got: {url}");
}

#[test]
fn test_open_link_rejects_plain_text() {
    let err = open_link("just some words").unwrap_err();
    assert!(matches!(err, QrLinkError::NotAUrl(ref text) if text == "just some words"));
}

#[test]
fn test_copy_and_hold_returns_within_hold() {
    let started = Instant::now();
    match copy_and_hold("held text", Duration::from_millis(200)) {
        Ok(()) => {}
        // Headless machines have no clipboard to own.
        Err(QrLinkError::Clipboard(_)) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
    assert!(started.elapsed() < Duration::from_secs(5));
}
