//! The HTML listing served at `/`.

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Received QR Codes</title>
    <style>
        body { font-family: Arial, sans-serif; margin: 40px; }
        h1 { color: #333; }
        ul { list-style-type: none; padding: 0; }
        li { padding: 8px 0; border-bottom: 1px solid #ccc; }
    </style>
</head>
<body>
    <h1>Received QR Codes</h1>
"#;

const TAIL: &str = "</body>\n</html>\n";

pub fn render_codes(codes: &[String]) -> String {
    let mut html = String::from(HEAD);
    if codes.is_empty() {
        html.push_str("    <p>No QR codes received yet.</p>\n");
    } else {
        html.push_str("    <ul>\n");
        for code in codes {
            html.push_str("        <li>");
            html.push_str(&escape_html(code));
            html.push_str("</li>\n");
        }
        html.push_str("    </ul>\n");
    }
    html.push_str(TAIL);
    html
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn empty_listing_has_placeholder() {
        let html = render_codes(&[]);
        assert!(html.contains("No QR codes received yet."));
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn listing_keeps_arrival_order() {
        let html = render_codes(&["first".into(), "second".into()]);
        let first = html.find("<li>first</li>").unwrap();
        let second = html.find("<li>second</li>").unwrap();
        assert!(first < second);
    }
}
