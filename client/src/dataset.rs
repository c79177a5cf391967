use crate::dom;

/// `<script type="application/json">` element the page embeds shelters in.
pub const SHELTERS_ELEMENT_ID: &str = "sheltersData";
/// Fallback source when the page embeds nothing.
pub const SHELTERS_API_URL: &str = "/api/shelters";

pub fn embedded_payload() -> Option<String> {
    dom::element_text(SHELTERS_ELEMENT_ID)
}

pub async fn fetch_payload() -> Result<String, String> {
    let resp = gloo_net::http::Request::get(SHELTERS_API_URL)
        .send()
        .await
        .map_err(|e| format!("fetch error: {e}"))?;
    if !resp.ok() {
        return Err(format!("HTTP {}", resp.status()));
    }
    resp.text().await.map_err(|e| format!("read error: {e}"))
}
