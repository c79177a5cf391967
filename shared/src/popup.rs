use std::fmt::Write;

use crate::shelter::Shelter;

/// Shown instead of a head count when the provider has none.
pub const CAPACITY_PLACEHOLDER: &str = "不明";

pub fn capacity_label(capacity: Option<u32>) -> String {
    match capacity {
        Some(count) => format!("{count}人"),
        None => CAPACITY_PLACEHOLDER.to_string(),
    }
}

/// HTML fragment bound to a shelter's marker popup.
pub fn popup_html(shelter: &Shelter) -> String {
    let mut html = String::with_capacity(256);
    html.push_str(r#"<div class="shelter-popup">"#);
    let _ = write!(html, "<strong>{}</strong>", escape_html(&shelter.name));
    if let Some(kind) = &shelter.other {
        let _ = write!(
            html,
            r#"<div class="shelter-popup-kind">{}</div>"#,
            escape_html(kind)
        );
    }
    let _ = write!(
        html,
        "<div>収容人数: {}</div><div>住所: {}</div>",
        escape_html(&capacity_label(shelter.capacity)),
        escape_html(&shelter.address)
    );
    let _ = write!(
        html,
        r#"<a href="{}">詳細を見る</a></div>"#,
        escape_html(&shelter.detail_path())
    );
    html
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
