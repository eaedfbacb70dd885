//! Home page rendering.

use crate::rosbridge::TopicListing;

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Render the topic overview for the bridge at `rosbridge_url`.
pub fn render_topics_page(rosbridge_url: &str, listing: &TopicListing) -> String {
    let mut body = String::new();

    if let Some(error) = &listing.error {
        body.push_str(&format!(
            "<div class=\"error\">{}</div>\n",
            escape_html(error)
        ));
    }

    if listing.topics.is_empty() {
        body.push_str("<p>Топики не найдены</p>\n");
    } else {
        body.push_str(&format!("<p>Найдено топиков: {}</p>\n", listing.count()));
        body.push_str("<ul>\n");
        for topic in &listing.topics {
            body.push_str(&format!("  <li><code>{}</code></li>\n", escape_html(topic)));
        }
        body.push_str("</ul>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="ru">
<head>
<meta charset="utf-8">
<title>Топики робота</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem; }}
  .error {{ color: #b00020; border: 1px solid #b00020; padding: 0.5rem; }}
</style>
</head>
<body>
<h1>Топики робота</h1>
<p>rosbridge: <code>{url}</code></p>
{body}</body>
</html>
"#,
        url = escape_html(rosbridge_url),
        body = body,
    )
}
