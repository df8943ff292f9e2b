//! Episode selection.

use super::Episode;
use crate::debug;

/// Keep published items that carry a usable podcast media reference.
///
/// Order is preserved. Excluded items are only reported in verbose mode.
pub fn select_episodes(articles: Vec<Episode>) -> Vec<Episode> {
    articles
        .into_iter()
        .filter(|article| {
            if !article.is_published() {
                debug!("feed"; "skip {}: status `{}`", article.url, article.status);
                return false;
            }
            match article.podcast.as_ref().map(|media| media.to_text()) {
                Some(Ok(_)) => true,
                Some(Err(kind)) => {
                    debug!("feed"; "skip {}: podcast reference is a {}", article.url, kind);
                    false
                }
                None => {
                    debug!("feed"; "skip {}: no podcast reference", article.url);
                    false
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn urls(episodes: &[Episode]) -> Vec<&str> {
        episodes.iter().map(|e| e.url.as_str()).collect()
    }

    #[test]
    fn test_keeps_published_podcasts_in_order() {
        let articles = vec![
            Episode::new("C", "c", "2024-03-01").with_podcast("c.mp3"),
            Episode::new("A", "a", "2024-01-01").with_podcast("a.mp3"),
            Episode::new("B", "b", "2024-02-01").with_podcast("b.mp3"),
        ];
        assert_eq!(urls(&select_episodes(articles)), ["c", "a", "b"]);
    }

    #[test]
    fn test_status_any_case() {
        let mut episode = Episode::new("A", "a", "2024-01-01").with_podcast("a.mp3");
        episode.status = "Published".into();
        assert_eq!(select_episodes(vec![episode]).len(), 1);
    }

    #[test]
    fn test_excludes_drafts_and_plain_articles() {
        let mut draft = Episode::new("Draft", "draft", "2024-01-01").with_podcast("d.mp3");
        draft.status = "draft".into();
        let plain = Episode::new("Post", "post", "2024-01-01");
        let keep = Episode::new("Ep", "ep", "2024-01-01").with_podcast("ep.mp3");

        assert_eq!(urls(&select_episodes(vec![draft, plain, keep])), ["ep"]);
    }

    #[test]
    fn test_excludes_unrepresentable_media() {
        let mut odd = Episode::new("Odd", "odd", "2024-01-01");
        odd.podcast = Some(json!(["a.mp3", "b.mp3"]).into());
        assert!(select_episodes(vec![odd]).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(select_episodes(Vec::new()).is_empty());
    }
}
