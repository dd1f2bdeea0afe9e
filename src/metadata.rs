use crate::commentary;
use crate::config::Config;
use crate::media;
use crate::proxy;
use crate::tags;
use crate::types::{NormalizedMetadata, ParsedUrlHint, PostSnapshot};

/// Combines the URL hint and the optional snapshot; snapshot fields win.
pub fn normalize(
    hint: &ParsedUrlHint,
    snapshot: Option<&PostSnapshot>,
    config: &Config,
) -> NormalizedMetadata {
    let resolved = media::resolve(snapshot, hint, config);

    let author = snapshot.map(|p| &p.author);
    let handle = author
        .and_then(|a| a.handle.as_deref())
        .filter(|h| !h.is_empty())
        .or(hint.username.as_deref().filter(|h| !h.is_empty()));
    let status_id = snapshot
        .map(|p| p.id.as_str())
        .filter(|id| !id.is_empty())
        .or(hint.status_id.as_deref().filter(|id| !id.is_empty()));

    let page_url = status_id.map(|id| match handle {
        Some(h) => format!("{}/{}/status/{}", config.site(), h, id),
        None => format!("{}/i/web/status/{}", config.site(), id),
    });
    let profile_url = handle.map(|h| config.profile_url(h));
    let intent_url = author
        .and_then(|a| a.id.as_deref())
        .map(|id| format!("{}/intent/user?user_id={}", config.site(), id));

    let hashtags: Vec<&str> = snapshot
        .map(|p| p.entities.hashtags.iter().map(|t| t.text.as_str()).collect())
        .unwrap_or_default();
    let tag_links = hashtags
        .iter()
        .map(|t| (t.to_string(), config.hashtag_url(t)))
        .collect();

    let canonical_source_url = page_url
        .clone()
        .or_else(|| proxy::decode_proxy_url(&hint.url));

    tracing::trace!(
        url = %hint.url,
        has_snapshot = snapshot.is_some(),
        images = resolved.image_urls.len(),
        "normalized post metadata"
    );

    NormalizedMetadata {
        image_urls: resolved.image_urls,
        preview_urls: resolved.preview_urls,
        page_url,
        profile_url,
        intent_url,
        tag_name: handle.unwrap_or_default().to_string(),
        artist_name: author
            .and_then(|a| a.display_name.clone())
            .unwrap_or_default(),
        commentary_plain: commentary::plain(snapshot),
        commentary_formatted: commentary::format(snapshot, config),
        tags: tag_links,
        normalized_tags: tags::normalize_tags(hashtags.iter().copied()),
        canonical_source_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Author, Hashtag, MediaItem, MediaKind};

    fn snapshot() -> PostSnapshot {
        let mut post = PostSnapshot {
            id: "1234".to_string(),
            author: Author {
                id: Some("42".to_string()),
                handle: Some("alice".to_string()),
                display_name: Some("Alice".to_string()),
            },
            full_text: "new piece #初音ミク生誕祭2020 https://t.co/m".to_string(),
            ..Default::default()
        };
        post.entities.hashtags.push(Hashtag {
            text: "初音ミク生誕祭2020".to_string(),
        });
        post.extended_media.push(MediaItem {
            kind: MediaKind::Photo,
            media_url: "https://pbs.twimg.com/media/A.jpg".to_string(),
            source_url: Some("https://t.co/m".to_string()),
            variants: Vec::new(),
        });
        post
    }

    #[test]
    fn test_full_snapshot() {
        let hint = ParsedUrlHint {
            url: "https://twitter.com/alice/status/1234".to_string(),
            username: Some("alice".to_string()),
            status_id: Some("1234".to_string()),
            ..Default::default()
        };
        let post = snapshot();
        let meta = normalize(&hint, Some(&post), &Config::default());

        assert_eq!(meta.image_urls, vec!["https://pbs.twimg.com/media/A.jpg:orig"]);
        assert_eq!(meta.preview_urls, vec!["https://pbs.twimg.com/media/A.jpg:small"]);
        assert_eq!(meta.page_url.as_deref(), Some("https://twitter.com/alice/status/1234"));
        assert_eq!(meta.profile_url.as_deref(), Some("https://twitter.com/alice"));
        assert_eq!(
            meta.intent_url.as_deref(),
            Some("https://twitter.com/intent/user?user_id=42")
        );
        assert_eq!(meta.tag_name, "alice");
        assert_eq!(meta.artist_name, "Alice");
        assert_eq!(meta.commentary_plain, "new piece #初音ミク生誕祭2020");
        assert_eq!(
            meta.commentary_formatted,
            r##"new piece "#初音ミク生誕祭2020":[https://twitter.com/hashtag/初音ミク生誕祭2020]"##
        );
        assert_eq!(
            meta.tags,
            vec![(
                "初音ミク生誕祭2020".to_string(),
                "https://twitter.com/hashtag/初音ミク生誕祭2020".to_string()
            )]
        );
        assert_eq!(meta.normalized_tags, vec!["初音ミク"]);
        assert_eq!(meta.canonical_source_url, meta.page_url);
    }

    #[test]
    fn test_hint_only() {
        let hint = ParsedUrlHint {
            url: "https://twitter.com/bob/status/99".to_string(),
            username: Some("bob".to_string()),
            status_id: Some("99".to_string()),
            ..Default::default()
        };
        let meta = normalize(&hint, None, &Config::default());

        assert_eq!(meta.image_urls, vec!["https://twitter.com/bob/status/99"]);
        assert_eq!(meta.page_url.as_deref(), Some("https://twitter.com/bob/status/99"));
        assert_eq!(meta.profile_url.as_deref(), Some("https://twitter.com/bob"));
        assert_eq!(meta.intent_url, None);
        assert_eq!(meta.tag_name, "bob");
        assert_eq!(meta.artist_name, "");
        assert_eq!(meta.commentary_formatted, "");
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn test_empty_snapshot_identity_falls_back_to_hint() {
        let hint = ParsedUrlHint {
            url: "https://twitter.com/bob/status/9".to_string(),
            username: Some("bob".to_string()),
            status_id: Some("9".to_string()),
            ..Default::default()
        };
        let post = PostSnapshot {
            id: String::new(),
            author: Author {
                handle: Some(String::new()),
                ..Default::default()
            },
            ..Default::default()
        };
        let meta = normalize(&hint, Some(&post), &Config::default());
        assert_eq!(meta.tag_name, "bob");
        assert_eq!(meta.page_url.as_deref(), Some("https://twitter.com/bob/status/9"));
        assert_eq!(meta.profile_url.as_deref(), Some("https://twitter.com/bob"));
    }

    #[test]
    fn test_status_without_handle() {
        let hint = ParsedUrlHint {
            url: "https://twitter.com/i/web/status/99".to_string(),
            status_id: Some("99".to_string()),
            ..Default::default()
        };
        let meta = normalize(&hint, None, &Config::default());
        assert_eq!(meta.page_url.as_deref(), Some("https://twitter.com/i/web/status/99"));
        assert_eq!(meta.profile_url, None);
        assert_eq!(meta.tag_name, "");
    }

    #[test]
    fn test_proxy_url_becomes_canonical_source() {
        let hint = ParsedUrlHint {
            url: "https://o.twimg.com/1/proxy.jpg?t=c2VlIGh0dHA6Ly90d2l0cGljLmNvbS9zaG93L2xhcmdlL2FiYzEyMy5qcGc=&s=x".to_string(),
            ..Default::default()
        };
        let meta = normalize(&hint, None, &Config::default());
        assert_eq!(meta.page_url, None);
        assert_eq!(meta.canonical_source_url.as_deref(), Some("http://twitpic.com/abc123"));
    }

    #[test]
    fn test_direct_image_without_anything_else() {
        let hint = ParsedUrlHint {
            url: "https://pbs.twimg.com/media/XYZ.jpg".to_string(),
            is_direct_image_url: true,
            orig_image_url: Some("https://pbs.twimg.com/media/XYZ.jpg:orig".to_string()),
            ..Default::default()
        };
        let meta = normalize(&hint, None, &Config::default());
        assert_eq!(meta.image_urls, vec!["https://pbs.twimg.com/media/XYZ.jpg:orig"]);
        assert_eq!(meta.preview_urls, vec!["https://pbs.twimg.com/media/XYZ.jpg:small"]);
        assert_eq!(meta.canonical_source_url, None);
    }
}
