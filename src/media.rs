use crate::config::Config;
use crate::types::{MediaItem, MediaKind, ParsedUrlHint, PostSnapshot, Variant};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedMedia {
    pub image_urls: Vec<String>,
    pub preview_urls: Vec<String>,
}

pub fn resolve(
    snapshot: Option<&PostSnapshot>,
    hint: &ParsedUrlHint,
    config: &Config,
) -> ResolvedMedia {
    if hint.is_direct_image_url {
        let url = hint.orig_image_url.as_deref().unwrap_or(&hint.url);
        return from_full_urls(vec![url.to_string()], config);
    }

    match snapshot {
        Some(post) => {
            let mut resolved = ResolvedMedia::default();
            for item in &post.extended_media {
                if let Some((full, preview)) = resolve_item(item, config) {
                    resolved.image_urls.push(full);
                    resolved.preview_urls.push(preview);
                }
            }
            resolved
        }
        None => from_full_urls(vec![hint.url.clone()], config),
    }
}

fn resolve_item(item: &MediaItem, config: &Config) -> Option<(String, String)> {
    match item.kind {
        MediaKind::Photo => Some((
            format!("{}:{}", item.media_url, config.full_size),
            format!("{}:{}", item.media_url, config.preview_size),
        )),
        MediaKind::Video | MediaKind::AnimatedGif => match best_mp4_variant(&item.variants) {
            Some(variant) => Some((variant.url.clone(), preview_url(&variant.url, config))),
            None => {
                tracing::debug!(media_url = %item.media_url, "no mp4 variant, skipping media item");
                None
            }
        },
        MediaKind::Unknown => {
            tracing::debug!(media_url = %item.media_url, "unknown media kind, skipping media item");
            None
        }
    }
}

/// Highest-bitrate `video/mp4` variant. Ties keep the first seen; a missing
/// bitrate ranks below any known one.
pub fn best_mp4_variant(variants: &[Variant]) -> Option<&Variant> {
    variants
        .iter()
        .filter(|v| v.content_type == "video/mp4")
        .fold(None::<&Variant>, |best, v| match best {
            Some(b) if v.bitrate <= b.bitrate => Some(b),
            _ => Some(v),
        })
}

/// Swaps a trailing full-size suffix for the preview one.
pub fn preview_url(url: &str, config: &Config) -> String {
    let full_suffix = format!(":{}", config.full_size);
    match url.strip_suffix(&full_suffix) {
        Some(base) => format!("{}:{}", base, config.preview_size),
        None => url.to_string(),
    }
}

fn from_full_urls(image_urls: Vec<String>, config: &Config) -> ResolvedMedia {
    let preview_urls = image_urls.iter().map(|u| preview_url(u, config)).collect();
    ResolvedMedia {
        image_urls,
        preview_urls,
    }
}
