use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

const PROXY_HOSTS: [&str; 2] = ["o.twimg.com", "image-proxy-origin.twimg.com"];

const LENIENT: GeneralPurposeConfig = GeneralPurposeConfig::new()
    .with_decode_padding_mode(DecodePaddingMode::Indifferent)
    .with_decode_allow_trailing_bits(true);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

static RE_PROXY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^/\d/proxy\.jpg$").unwrap());
static RE_EMBEDDED_URL: LazyLock<regex::bytes::Regex> = LazyLock::new(|| {
    regex::bytes::Regex::new(r"(?i)https?://[A-Za-z0-9\-._~:/?#\[\]@!$&'()*+,;=%]+").unwrap()
});
static RE_TWITPIC_LARGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://twitpic\.com/show/large/[a-z0-9]+").unwrap());
static RE_SHOW_LARGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)show/large/").unwrap());

/// Returns the `t=` token of a proxy URL, or `None` for any other URL.
fn proxy_token(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if parsed.scheme() != "https" {
        return None;
    }
    let host = parsed.host_str()?;
    if !PROXY_HOSTS.contains(&host) || !RE_PROXY_PATH.is_match(parsed.path()) {
        return None;
    }
    // Form decoding turns `+` into a space; base64 never contains spaces.
    parsed
        .query_pairs()
        .find(|(key, _)| key == "t")
        .map(|(_, token)| token.replace(' ', "+"))
        .filter(|token| !token.is_empty())
}

pub fn is_proxy_url(url: &str) -> bool {
    proxy_token(url).is_some()
}

pub fn decode_proxy_url(url: &str) -> Option<String> {
    let token = proxy_token(url)?;
    let engine = if token.contains(['-', '_']) {
        &URL_SAFE_LENIENT
    } else {
        &STANDARD_LENIENT
    };
    let bytes = match engine.decode(&token) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(%url, error = %e, "undecodable proxy token");
            return None;
        }
    };

    let Some(found) = RE_EMBEDDED_URL.find(&bytes) else {
        tracing::debug!(%url, "proxy token carries no embedded url");
        return None;
    };
    let source = String::from_utf8_lossy(found.as_bytes()).into_owned();

    if RE_TWITPIC_LARGE.is_match(&source) {
        return Some(twitpic_page(&source));
    }
    Some(source)
}

/// `http://twitpic.com/show/large/abc.jpg` -> `http://twitpic.com/abc`
fn twitpic_page(source: &str) -> String {
    let page = RE_SHOW_LARGE.replace(source, "").into_owned();
    let last_slash = page.rfind('/').unwrap_or(0);
    match page.rfind('.') {
        Some(dot) if dot > last_slash => page[..dot].to_string(),
        _ => page,
    }
}
