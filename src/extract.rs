//! Pulls the strip markup out of a comic page without a full HTML parser:
//! case-insensitive tag search scoped to the first element carrying the
//! marker class, attribute parsing that accepts either quote style and any
//! attribute order. Selectors this narrow survive markup noise better than
//! full-document patterns.

use url::Url;

/// Marker classes the site puts on the strip image and its canonical link.
const IMAGE_CLASS: &str = "img-comic";
const LINK_CLASS: &str = "img-comic-link";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripMarkup {
    /// Absolute image URL, resolved against the page URL. The site serves
    /// protocol-relative `//host/...` sources; resolution pins them to the
    /// page's scheme.
    pub image_src: String,
    /// The image's `alt` text, entity-decoded.
    pub caption: String,
    /// The canonical strip link, resolved against the page URL.
    pub link_href: String,
}

/// Returns `None` when the page does not carry the strip markup at all.
pub fn extract_strip(html: &str, page_url: &Url) -> Option<StripMarkup> {
    let image_attrs = find_tag(html, "img", IMAGE_CLASS)?;
    let link_attrs = find_tag(html, "a", LINK_CLASS)?;

    let src = attr_value(image_attrs, "src")?;
    let caption = attr_value(image_attrs, "alt")
        .map(|alt| decode_entities(&alt))
        .unwrap_or_default();
    let href = attr_value(link_attrs, "href")?;

    Some(StripMarkup {
        image_src: page_url.join(&src).ok()?.to_string(),
        caption,
        link_href: page_url.join(&href).ok()?.to_string(),
    })
}

/// Attribute text of the first `<tag ...>` whose class list contains `class`.
fn find_tag<'a>(html: &'a str, tag: &str, class: &str) -> Option<&'a str> {
    let lower = html.to_ascii_lowercase();
    let open = format!("<{tag}");
    let mut from = 0;
    while let Some(pos) = lower[from..].find(&open) {
        let start = from + pos;
        let after = start + open.len();
        from = after;

        // Boundary check so "<a" does not match "<abbr".
        let at_boundary = lower
            .as_bytes()
            .get(after)
            .is_some_and(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
        if !at_boundary {
            continue;
        }

        if let Some(end) = html[after..].find('>') {
            let attrs = &html[after..after + end];
            if has_class(attrs, class) {
                return Some(attrs);
            }
        }
    }
    None
}

fn has_class(attrs: &str, class: &str) -> bool {
    attr_value(attrs, "class")
        .map(|value| value.split_ascii_whitespace().any(|token| token == class))
        .unwrap_or(false)
}

/// Case-insensitive attribute lookup inside a tag's attribute text.
fn attr_value(attrs: &str, name: &str) -> Option<String> {
    let lower = attrs.to_ascii_lowercase();
    let needle = name.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find(&needle) {
        let start = from + pos;
        let end = start + needle.len();
        from = end;

        let starts_word = start == 0
            || lower
                .as_bytes()
                .get(start - 1)
                .is_some_and(|b| b.is_ascii_whitespace());
        if !starts_word {
            continue;
        }

        let rest = attrs[end..].trim_start();
        if let Some(value) = rest.strip_prefix('=') {
            return Some(parse_attr_token(value.trim_start()));
        }
    }
    None
}

fn parse_attr_token(value: &str) -> String {
    match value.chars().next() {
        Some(quote @ ('"' | '\'')) => value[1..]
            .split(quote)
            .next()
            .unwrap_or_default()
            .to_string(),
        _ => value
            .split(|c: char| c.is_ascii_whitespace())
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

fn decode_entities(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        let (decoded, consumed) = if rest.starts_with("&amp;") {
            ('&', 5)
        } else if rest.starts_with("&lt;") {
            ('<', 4)
        } else if rest.starts_with("&gt;") {
            ('>', 4)
        } else if rest.starts_with("&quot;") {
            ('"', 6)
        } else if rest.starts_with("&#39;") {
            ('\'', 5)
        } else {
            ('&', 1)
        };
        out.push(decoded);
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}
