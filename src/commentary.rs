use crate::config::Config;
use crate::types::PostSnapshot;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static RE_SHORT_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)https?://t\.co/[a-z0-9]+").unwrap());
static RE_TAG_OR_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\S+)|@([A-Za-z0-9_]+)").unwrap());

/// Short-URL token to replacement. Media tokens map to the empty string since
/// the media is already carried by the resolved image URLs.
fn substitutions(post: &PostSnapshot) -> HashMap<&str, &str> {
    let mut map: HashMap<&str, &str> = post
        .entities
        .urls
        .iter()
        .map(|(short, expanded)| (short.as_str(), expanded.as_str()))
        .collect();
    for media in &post.extended_media {
        if let Some(ref token) = media.source_url {
            map.insert(token.as_str(), "");
        }
    }
    map
}

fn prepare(text: &str) -> String {
    let text: String = text.nfkc().collect();
    html_escape::decode_html_entities(&text).into_owned()
}

/// Splits `text` around short-URL tokens. Plain runs go through `on_text`,
/// tokens are swapped by exact lookup and inserted verbatim.
fn expand_short_urls(
    text: &str,
    map: &HashMap<&str, &str>,
    mut on_text: impl FnMut(&str, &mut String),
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in RE_SHORT_URL.find_iter(text) {
        on_text(&text[last..m.start()], &mut out);
        match map.get(m.as_str()) {
            Some(replacement) => out.push_str(replacement),
            None => {
                tracing::debug!(token = m.as_str(), "short url without expansion, left as is");
                out.push_str(m.as_str());
            }
        }
        last = m.end();
    }
    on_text(&text[last..], &mut out);
    out
}

fn link_markup(text: &str, config: &Config) -> String {
    RE_TAG_OR_MENTION
        .replace_all(text, |caps: &Captures| {
            if let Some(tag) = caps.get(1) {
                format!("\"#{}\":[{}]", tag.as_str(), config.hashtag_url(tag.as_str()))
            } else {
                let handle = &caps[2];
                format!("\"@{}\":[{}]", handle, config.profile_url(handle))
            }
        })
        .into_owned()
}

/// Post text with short URLs expanded and media links dropped, without markup.
pub fn plain(snapshot: Option<&PostSnapshot>) -> String {
    let Some(post) = snapshot.filter(|p| !p.full_text.is_empty()) else {
        return String::new();
    };
    let map = substitutions(post);
    let text = prepare(&post.full_text);
    expand_short_urls(&text, &map, |run, out| out.push_str(run))
        .trim()
        .to_string()
}

/// Post text rendered as markup: short URLs expanded, media links dropped,
/// hashtags and mentions turned into `"label":[url]` links.
pub fn format(snapshot: Option<&PostSnapshot>, config: &Config) -> String {
    let Some(post) = snapshot.filter(|p| !p.full_text.is_empty()) else {
        return String::new();
    };
    let map = substitutions(post);
    let text = prepare(&post.full_text);
    expand_short_urls(&text, &map, |run, out| out.push_str(&link_markup(run, config)))
        .trim()
        .to_string()
}
