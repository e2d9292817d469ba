//! Bodies the landing endpoint can answer with.

pub const PAGE_NOT_FOUND_HTML: &str = "Error: page not found!";
pub const UNDER_CONSTRUCTION_HTML: &str = "This page is under construction.";
pub const ACK_SCRIPT: &str =
    "<script>alert('Thank you! Your information was received successfully.');</script>";

const BODY_CLOSE: &str = "</body>";

/// Page body for a GET.
pub fn view_body(html: &str) -> String {
    if html.is_empty() {
        UNDER_CONSTRUCTION_HTML.to_string()
    } else {
        html.to_string()
    }
}

/// Page body for a POST: the redirect target when one is set, otherwise the
/// page with the acknowledgment script injected.
pub fn submit_body(html: &str, redirect_uri: Option<&str>) -> String {
    match redirect_uri.map(str::trim).filter(|uri| !uri.is_empty()) {
        Some(uri) => uri.to_string(),
        None => inject_ack_script(&view_body(html)),
    }
}

/// Inserts [`ACK_SCRIPT`] right before the last `</body>` (any case), or
/// appends it when the markup has no closing body tag.
pub fn inject_ack_script(html: &str) -> String {
    // ASCII lowercasing keeps byte offsets aligned with the original.
    match html.to_ascii_lowercase().rfind(BODY_CLOSE) {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + ACK_SCRIPT.len());
            out.push_str(&html[..pos]);
            out.push_str(ACK_SCRIPT);
            out.push_str(&html[pos..]);
            out
        }
        None => format!("{html}{ACK_SCRIPT}"),
    }
}
