use url::Url;

/// Resolve a possibly relative reference against the page URL
pub fn resolve_url(base: &Url, reference: &str) -> Option<String> {
    match base.join(reference.trim()) {
        Ok(url) => Some(url.into()),
        Err(e) => {
            ::log::debug!("Could not resolve {:?} against {}: {}", reference, base, e);
            None
        }
    }
}

/// Parse a `sizes` attribute such as `"152x152"` into (width, height)
pub fn parse_sizes(sizes: &str) -> Option<(u32, u32)> {
    let first = sizes.split_whitespace().next()?;
    let (width, height) = first.split_once(['x', 'X'])?;
    Some((width.parse().ok()?, height.parse().ok()?))
}

/// Collapse runs of whitespace into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
