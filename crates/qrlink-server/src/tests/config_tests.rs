use super::{merge_settings, Settings};

#[test]
fn defaults_to_all_interfaces_on_8000() {
    assert_eq!(merge_settings(None, None), Settings::default());
    assert_eq!(Settings::default().bind_addr, "0.0.0.0:8000");
}

#[test]
fn file_overrides_default() {
    let settings = merge_settings(Some("bind_addr = \"127.0.0.1:9000\"\n"), None);
    assert_eq!(settings.bind_addr, "127.0.0.1:9000");
}

#[test]
fn env_overrides_file() {
    let settings = merge_settings(
        Some("bind_addr = \"127.0.0.1:9000\"\n"),
        Some("10.0.0.2:8080".into()),
    );
    assert_eq!(settings.bind_addr, "10.0.0.2:8080");
}

#[test]
fn malformed_file_keeps_defaults() {
    let settings = merge_settings(Some("bind_addr = [1, 2"), None);
    assert_eq!(settings, Settings::default());
}
