use url::Url;

pub fn join_url(base_url: &str, path: &str) -> Result<Url, url::ParseError> {
    let parsed_base_url = Url::parse(base_url)?;
    let joined_url = parsed_base_url.join(path)?;
    Ok(joined_url)
}

/// Treats a blank form value as absent.
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}
