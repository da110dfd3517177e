use crate::utils::error::{BotError, Result};
use scraper::{Html, Selector};

/// Pull an anti-forgery token out of a login page. Checks the hidden input
/// the portal names in its config first, then falls back to a csrf meta tag
/// (the usual Laravel layout).
pub fn extract_csrf_token(html: &str, field: &str) -> Option<String> {
    let document = Html::parse_document(html);

    if let Ok(input_selector) = Selector::parse(&format!(r#"input[name="{}"]"#, field)) {
        if let Some(element) = document.select(&input_selector).next() {
            if let Some(value) = element.value().attr("value") {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }

    let meta_selector = Selector::parse("meta[name][content]").ok()?;
    for element in document.select(&meta_selector) {
        let name = element.value().attr("name").unwrap_or_default();
        if name.to_ascii_lowercase().contains("csrf") {
            if let Some(content) = element.value().attr("content") {
                if !content.is_empty() {
                    return Some(content.to_string());
                }
            }
        }
    }

    None
}

/// Locate the points value on the scraped page with the configured selector.
/// First match wins; its text is trimmed and returned as-is.
pub fn extract_points(html: &str, selector: &str) -> Result<String> {
    let parsed_selector = Selector::parse(selector).map_err(|e| BotError::InvalidConfigValue {
        field: "portal.points_selector".to_string(),
        value: selector.to_string(),
        reason: format!("Invalid CSS selector: {:?}", e),
    })?;

    let document = Html::parse_document(html);
    let element = document
        .select(&parsed_selector)
        .next()
        .ok_or_else(|| BotError::Parse {
            what: format!("points selector `{}`", selector),
        })?;

    let text = element.text().collect::<String>().trim().to_string();
    if text.is_empty() {
        return Err(BotError::Parse {
            what: format!("text under points selector `{}`", selector),
        });
    }

    Ok(text)
}
