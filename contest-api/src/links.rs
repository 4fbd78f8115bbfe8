use url::Url;

use crate::EntryId;

/// Query parameter marking a request as wanting only the comment fragment
pub const AJAX_PARAM: &str = "ajax";

pub const SECTION_ID_PREFIX: &str = "comments-section-";

/// Query keys of the form `comments_<entry id>` carry the comment page number
const PAGE_PARAM_PREFIX: &str = "comments_";

/// Id of the element holding the comment section of an entry
pub fn section_id(entry: EntryId) -> String {
    format!("{SECTION_ID_PREFIX}{entry}")
}

/// Appends `ajax=1` to an absolute pagination url, replacing any previous marker
pub fn mark_ajax(href: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(href)?;
    let kept = url
        .query_pairs()
        .filter(|(k, _)| k != AJAX_PARAM)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();
    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .append_pair(AJAX_PARAM, "1");
    Ok(url)
}

fn parse_maybe_relative(url: &str) -> Option<Url> {
    // only the path and query matter, so any base does
    let base = Url::parse("http://localhost/").ok()?;
    Url::options().base_url(Some(&base)).parse(url).ok()
}

/// Entry id embedded in a comment form action, eg. `/entries/42/comment/`
///
/// This is the first path segment made only of digits.
pub fn entry_id_from_action(action: &str) -> Option<EntryId> {
    let url = parse_maybe_relative(action)?;
    let mut segments = url.path_segments()?;
    segments
        .find(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .map(EntryId)
}

/// Entry id of a pagination link that lacks `data-entry-id`, read from its
/// `comments_<entry id>` page parameter
pub fn entry_id_from_href(href: &str) -> Option<EntryId> {
    let url = parse_maybe_relative(href)?;
    url.query_pairs()
        .find_map(|(k, _)| k.strip_prefix(PAGE_PARAM_PREFIX)?.parse().ok())
        .map(EntryId)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_ids() {
        assert_eq!(section_id(EntryId(42)), "comments-section-42");
    }

    #[test]
    fn ajax_marker_is_appended_once() {
        let u = mark_ajax("https://example.org/?comments_42=2").unwrap();
        assert_eq!(u.as_str(), "https://example.org/?comments_42=2&ajax=1");
        let u = mark_ajax(u.as_str()).unwrap();
        assert_eq!(u.as_str(), "https://example.org/?comments_42=2&ajax=1");
        let u = mark_ajax("https://example.org/page").unwrap();
        assert_eq!(u.as_str(), "https://example.org/page?ajax=1");
    }

    #[test]
    fn relative_hrefs_cannot_be_marked() {
        assert!(mark_ajax("?comments_42=2").is_err());
    }

    #[test]
    fn entry_from_action() {
        assert_eq!(entry_id_from_action("/entries/42/comment/"), Some(EntryId(42)));
        assert_eq!(
            entry_id_from_action("https://example.org/rounds/entries/42/comment/?next=/3/"),
            Some(EntryId(42))
        );
        assert_eq!(entry_id_from_action("/comments/new/"), None);
        assert_eq!(entry_id_from_action(""), None);
    }

    #[test]
    fn entry_from_href() {
        assert_eq!(entry_id_from_href("?comments_42=2"), Some(EntryId(42)));
        assert_eq!(
            entry_id_from_href("https://example.org/?foo=bar&comments_7=3"),
            Some(EntryId(7))
        );
        assert_eq!(entry_id_from_href("?page=2"), None);
    }

    #[test]
    fn marked_urls_always_end_with_the_marker() {
        bolero::check!()
            .with_type::<(String, String)>()
            .for_each(|(k, v)| {
                let mut u = Url::parse("https://example.org/").unwrap();
                u.query_pairs_mut().append_pair(k, v);
                let marked = mark_ajax(u.as_str()).unwrap();
                let pairs = marked.query_pairs().collect::<Vec<_>>();
                assert_eq!(
                    pairs.iter().filter(|(k, _)| k == AJAX_PARAM).count(),
                    1,
                    "{marked}"
                );
                assert_eq!(pairs.last().map(|(_, v)| v.as_ref()), Some("1"));
            });
    }
}
