use crate::results::{PageSummary, PreviewImage};
use crate::utils::{collapse_whitespace, parse_sizes, resolve_url};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts page summary metadata from the `<head>` of an HTML document.
///
/// Open Graph properties win over their plain HTML counterparts (`<title>`,
/// `<meta name="description">`). Relative URLs are resolved against `page_url`.
pub fn extract_summary(html: &str, page_url: &Url) -> PageSummary {
    let doc = Html::parse_document(html);
    let mut summary = PageSummary::default();
    let mut fallback_description = None;

    let meta_selector = Selector::parse("head meta").unwrap();
    for meta in doc.select(&meta_selector) {
        let element = meta.value();
        let Some(key) = element.attr("property").or_else(|| element.attr("name")) else {
            continue;
        };
        let content = element.attr("content").unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }

        match key.trim() {
            "og:type" => summary.kind = Some(content.to_string()),
            "og:url" => summary.url = resolve_url(page_url, content),
            "og:title" => summary.title = Some(content.to_string()),
            "og:site_name" => summary.site_name = Some(content.to_string()),
            "og:description" => summary.description = Some(content.to_string()),
            "description" => fallback_description = Some(content.to_string()),
            "author" => summary.author = Some(content.to_string()),
            "keywords" => summary.keywords = split_keywords(content),
            "og:image" => {
                if let Some(url) = resolve_url(page_url, content) {
                    summary.images.push(PreviewImage::with_url(url));
                }
            }
            key => {
                if let Some(property) = key.strip_prefix("og:image:") {
                    apply_image_property(&mut summary.images, property, content, page_url);
                }
            }
        }
    }

    if summary.title.is_none() {
        summary.title = extract_title(&doc);
    }
    if summary.description.is_none() {
        summary.description = fallback_description;
    }
    summary.icon = extract_icon(&doc, page_url);

    ::log::debug!(
        "Summary for {}: title={:?}, {} images, {} keywords",
        page_url,
        summary.title,
        summary.images.len(),
        summary.keywords.len()
    );

    summary
}

/// Applies an `og:image:*` structured property to the most recent image
fn apply_image_property(
    images: &mut Vec<PreviewImage>,
    property: &str,
    content: &str,
    page_url: &Url,
) {
    if property == "url" {
        let Some(url) = resolve_url(page_url, content) else {
            return;
        };
        match images.last_mut() {
            Some(current) if current.url.as_deref() == Some(url.as_str()) => {}
            _ => images.push(PreviewImage::with_url(url)),
        }
        return;
    }

    let Some(current) = images.last_mut() else {
        ::log::debug!("Ignoring og:image:{} before any og:image", property);
        return;
    };

    match property {
        "secure_url" => current.secure_url = resolve_url(page_url, content),
        "type" => current.kind = Some(content.to_string()),
        "width" => current.width = content.parse().ok(),
        "height" => current.height = content.parse().ok(),
        "alt" => current.alt = Some(content.to_string()),
        _ => {}
    }
}

fn split_keywords(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(String::from)
        .collect()
}

fn extract_title(doc: &Html) -> Option<String> {
    let title_selector = Selector::parse("head title").unwrap();
    doc.select(&title_selector)
        .map(|title| collapse_whitespace(&title.text().collect::<String>()))
        .find(|title| !title.is_empty())
}

/// Builds the icon from the first `<link>` whose rel includes `icon`
fn extract_icon(doc: &Html, page_url: &Url) -> Option<PreviewImage> {
    let link_selector = Selector::parse("head link[rel][href]").unwrap();
    let link = doc.select(&link_selector).find(is_icon_link)?;
    let element = link.value();

    let mut icon = PreviewImage {
        url: resolve_url(page_url, element.attr("href")?),
        kind: element
            .attr("type")
            .map(str::trim)
            .filter(|kind| !kind.is_empty())
            .map(String::from),
        ..PreviewImage::default()
    };
    if let Some((width, height)) = element.attr("sizes").and_then(parse_sizes) {
        icon.width = Some(width);
        icon.height = Some(height);
    }
    Some(icon)
}

fn is_icon_link(link: &ElementRef) -> bool {
    link.value()
        .attr("rel")
        .is_some_and(|rel| rel.split_whitespace().any(|t| t.eq_ignore_ascii_case("icon")))
}
