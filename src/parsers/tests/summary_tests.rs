use crate::parsers::extract_summary;
use crate::results::{PageSummary, PreviewImage};
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("https://example.com/articles/launch.html").unwrap()
    }

    #[test]
    fn test_open_graph_properties() {
        let html = r#"<!DOCTYPE html>
    <html>
    <head>
        <title>Plain Title</title>
        <meta property="og:type" content="article">
        <meta property="og:url" content="/articles/launch">
        <meta property="og:title" content="Launch Day">
        <meta property="og:site_name" content="Example News">
        <meta property="og:description" content="We launched.">
        <meta name="description" content="Plain description">
        <meta name="author" content="Jane Doe">
        <meta name="keywords" content="launch, rockets , , space">
    </head>
    <body><p>Body text</p></body>
    </html>"#;

        let summary = extract_summary(html, &page_url());

        assert_eq!(
            summary,
            PageSummary {
                kind: Some("article".to_string()),
                url: Some("https://example.com/articles/launch".to_string()),
                title: Some("Launch Day".to_string()),
                site_name: Some("Example News".to_string()),
                description: Some("We launched.".to_string()),
                author: Some("Jane Doe".to_string()),
                keywords: vec![
                    "launch".to_string(),
                    "rockets".to_string(),
                    "space".to_string()
                ],
                icon: None,
                images: vec![],
            }
        );
    }

    #[test]
    fn test_plain_html_fallbacks() {
        let html = r#"<html><head>
            <title>
                Plain   Title
            </title>
            <meta name="description" content="Plain description">
            <meta property="og:title" content="">
        </head><body></body></html>"#;

        let summary = extract_summary(html, &page_url());

        assert_eq!(summary.title.as_deref(), Some("Plain Title"));
        assert_eq!(summary.description.as_deref(), Some("Plain description"));
        assert_eq!(summary.kind, None);
    }

    #[test]
    fn test_structured_images() {
        let html = r#"<html><head>
            <meta property="og:image:width" content="10">
            <meta property="og:image" content="/img/first.png">
            <meta property="og:image:secure_url" content="https://cdn.example.com/first.png">
            <meta property="og:image:type" content="image/png">
            <meta property="og:image:width" content="400">
            <meta property="og:image:height" content="300">
            <meta property="og:image:alt" content="The first image">
            <meta property="og:image" content="http://other.example.org/second.jpg">
            <meta property="og:image:width" content="wide">
            <meta property="og:image:url" content="http://other.example.org/second.jpg">
            <meta property="og:image:url" content="third.gif">
        </head></html>"#;

        let summary = extract_summary(html, &page_url());

        assert_eq!(
            summary.images,
            vec![
                PreviewImage {
                    url: Some("https://example.com/img/first.png".to_string()),
                    secure_url: Some("https://cdn.example.com/first.png".to_string()),
                    kind: Some("image/png".to_string()),
                    width: Some(400),
                    height: Some(300),
                    alt: Some("The first image".to_string()),
                },
                PreviewImage::with_url("http://other.example.org/second.jpg"),
                PreviewImage::with_url("https://example.com/articles/third.gif"),
            ]
        );
    }

    #[test]
    fn test_icon_link() {
        let html = r#"<html><head>
            <link rel="stylesheet" href="/style.css">
            <link rel="Shortcut Icon" href="/favicon.png" type="image/png" sizes="32x16">
            <link rel="icon" href="/other.ico">
        </head></html>"#;

        let summary = extract_summary(html, &page_url());

        assert_eq!(
            summary.icon,
            Some(PreviewImage {
                url: Some("https://example.com/favicon.png".to_string()),
                kind: Some("image/png".to_string()),
                width: Some(32),
                height: Some(16),
                ..PreviewImage::default()
            })
        );
    }

    #[test]
    fn test_icon_with_any_size() {
        let html = r#"<html><head><link rel="icon" href="icon.svg" sizes="any"></head></html>"#;

        let summary = extract_summary(html, &page_url());

        assert_eq!(
            summary.icon,
            Some(PreviewImage::with_url("https://example.com/articles/icon.svg"))
        );
    }

    #[test]
    fn test_page_without_metadata() {
        let summary = extract_summary("<p>just a fragment</p>", &page_url());
        assert_eq!(summary, PageSummary::default());

        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, "{}");
    }
}
