//! Share targets, QR code URLs and the clipboard path
//!
//! Share targets are plain outbound URLs to third-party endpoints,
//! parameterized by the page URL and the static share caption. A terminal
//! cannot navigate a browser, so selecting a target copies the constructed
//! URL instead. Copying tries the system clipboard first and falls back to
//! the OSC 52 terminal escape sequence; if both fail the caller shows no
//! confirmation and moves on.

use std::io::Write;

use base64::Engine;
use reqwest::Url;

use crate::config;

/// One entry of the share modal
pub struct ShareTarget {
    pub name: &'static str,
    pub url: String,
}

/// The four share targets of the share modal, in display order.
pub fn share_targets() -> Vec<ShareTarget> {
    let page = config::PAGE_URL;
    let text = config::SHARE_TEXT;
    vec![
        ShareTarget {
            name: "WhatsApp",
            url: build_url("https://wa.me/", &[("text", format!("{text} - {page}"))]),
        },
        ShareTarget {
            name: "Facebook",
            url: build_url(
                "https://www.facebook.com/sharer/sharer.php",
                &[("u", page.to_string())],
            ),
        },
        ShareTarget {
            name: "Twitter",
            url: build_url(
                "https://x.com/intent/tweet",
                &[("text", text.to_string()), ("url", page.to_string())],
            ),
        },
        ShareTarget {
            name: "Telegram",
            url: build_url(
                "https://t.me/share/url",
                &[("url", page.to_string()), ("text", text.to_string())],
            ),
        },
    ]
}

/// URL of the rendered QR image for the page, `size` pixels square.
pub fn qr_image_url(size: u32) -> String {
    build_url(
        "https://api.qrserver.com/v1/create-qr-code/",
        &[
            ("size", format!("{size}x{size}")),
            ("data", config::PAGE_URL.to_string()),
        ],
    )
}

fn build_url(base: &str, params: &[(&str, String)]) -> String {
    match Url::parse_with_params(base, params) {
        Ok(url) => url.to_string(),
        Err(e) => {
            // Static bases parse; reaching this means a config typo.
            tracing::error!(base, error = %e, "failed to build share url");
            base.to_string()
        }
    }
}

/// Copy `text` for the user, returning whether any path succeeded.
///
/// The system clipboard is attempted first; environments without one (SSH,
/// bare consoles) fall back to the OSC 52 escape sequence, which asks the
/// terminal emulator itself to set the clipboard.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => {
            tracing::debug!(len = text.len(), "copied via system clipboard");
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "system clipboard unavailable, trying OSC 52");
            osc52_copy(text)
        }
    }
}

fn osc52_copy(text: &str) -> bool {
    let payload = base64::engine::general_purpose::STANDARD.encode(text);
    let sequence = format!("\x1b]52;c;{payload}\x07");
    let mut stdout = std::io::stdout();
    let written = stdout
        .write_all(sequence.as_bytes())
        .and_then(|_| stdout.flush());
    match written {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "OSC 52 write failed, copy dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_targets_point_at_known_endpoints() {
        let targets = share_targets();
        assert_eq!(targets.len(), 4);
        assert!(targets[0].url.starts_with("https://wa.me/?text="));
        assert!(targets[1]
            .url
            .starts_with("https://www.facebook.com/sharer/sharer.php?u="));
        assert!(targets[2].url.starts_with("https://x.com/intent/tweet?text="));
        assert!(targets[3].url.starts_with("https://t.me/share/url?url="));
    }

    #[test]
    fn share_urls_encode_the_page_url() {
        let targets = share_targets();
        // The page URL must arrive query-encoded, never raw.
        assert!(targets[1].url.contains("u=https%3A%2F%2F"));
        assert!(targets[2].url.contains("url=https%3A%2F%2F"));
        assert!(!targets[2].url.contains("url=https://"));
    }

    #[test]
    fn whatsapp_text_joins_caption_and_url() {
        let targets = share_targets();
        let expected_prefix = "https://wa.me/?text=";
        let query = &targets[0].url[expected_prefix.len()..];
        // Caption comes first, then the separator, then the encoded page URL.
        assert!(query.starts_with("Yardan"));
        assert!(query.contains("https%3A%2F%2F"));
    }

    #[test]
    fn qr_url_carries_requested_size() {
        let url = qr_image_url(250);
        assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=250x250"));
        assert!(url.contains("data=https%3A%2F%2F"));

        let large = qr_image_url(500);
        assert!(large.contains("size=500x500"));
    }
}
