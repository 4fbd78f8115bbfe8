mod common;

use common::{server_with, Harness};
use contest_client::{
    api::{self, EntryId},
    bind_pagination, notice, CommentList, Config, Method, PaginationLink,
};
use contest_mock_server::{Failure, MockPage, CSRF_TOKEN};

#[test]
fn link_swaps_section_contents() {
    let mut h = Harness::new(server_with(42, &["1", "2", "3", "4"]));
    let section = h.page.section_by_id("comments-section-42").unwrap();
    let first_list = section.list();
    assert_eq!(first_list.comment_ids(), vec!["4", "3", "2"]);
    bind_pagination(&h.ctl);

    let links = section.links();
    assert_eq!(links.len(), 1);
    assert!(links[0].click());
    h.settle();

    let reqs = h.transport.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, Method::Get);
    let url = url_of(&reqs[0].url);
    assert!(url
        .query_pairs()
        .any(|(k, v)| k == api::AJAX_PARAM && v == "1"));
    assert!(url.query_pairs().any(|(k, v)| k == "comments_42" && v == "2"));
    assert_eq!(reqs[0].header(api::REQUESTED_WITH_HEADER), Some("XMLHttpRequest"));

    assert!(!first_list.is_attached());
    assert_eq!(section.list().comment_ids(), vec!["1"]);
    assert!(h.browser.alerts().is_empty());
}

#[test]
fn swapped_in_links_are_bound() {
    let mut h = Harness::new(server_with(42, &["1", "2", "3", "4"]));
    let section = h.page.section_by_id("comments-section-42").unwrap();
    bind_pagination(&h.ctl);
    section.links()[0].click();
    h.settle();

    let back = section.links();
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].entry_id(), Some(EntryId(42)));
    assert!(back[0].click());
    h.settle();
    assert_eq!(h.transport.num_requests(), 2);
    assert_eq!(section.list().comment_ids(), vec!["4", "3", "2"]);
}

#[test]
fn rebinding_does_not_duplicate_handlers() {
    let mut h = Harness::new(server_with(42, &["1", "2", "3", "4"]));
    bind_pagination(&h.ctl);
    bind_pagination(&h.ctl);
    bind_pagination(&h.ctl);

    let section = h.page.section_by_id("comments-section-42").unwrap();
    section.links()[0].click();
    h.settle();
    assert_eq!(h.transport.num_requests(), 1);
}

#[test]
fn placeholder_only_fragment() {
    let server = server_with(7, &[]);
    let page = MockPage::new();
    // stale page linking to a second page that no longer exists, the link
    // lacking its entry id attribute
    let section = page.add_section(
        "comments-section-7",
        Some(CSRF_TOKEN),
        concat!(
            r#"<div class="list-group comment-list"></div>"#,
            r#"<nav class="comment-pagination">"#,
            r#"<a class="page-link" href="http://testserver/?comments_7=2">2</a>"#,
            r#"</nav>"#,
        ),
    );
    let mut h = Harness::with_page(server, page, Config::default());
    bind_pagination(&h.ctl);
    let links = section.links();
    let link = &links[0];
    assert_eq!(link.entry_id(), None);
    link.click();
    h.settle();

    let list = section.list();
    assert_eq!(list.num_nodes(), 1);
    assert_eq!(list.num_placeholders(), 1);
    assert!(section.links().is_empty());
    assert!(h.browser.alerts().is_empty());
}

#[test]
fn fragment_replaces_single_comment_with_placeholder() {
    let mut h = Harness::new(server_with(42, &["1", "2", "3", "4"]));
    let section = h.page.section_by_id("comments-section-42").unwrap();
    bind_pagination(&h.ctl);
    section.links()[0].click();
    h.settle();
    assert_eq!(section.list().comment_ids(), vec!["1"]);

    let fragment = format!(
        "<div class=\"list-group comment-list\">\n{}\n</div>\n",
        api::render::placeholder()
    );
    h.transport.answer_next(200, &fragment);
    section.links()[0].click();
    h.settle();

    let list = section.list();
    assert_eq!(list.num_nodes(), 1);
    assert_eq!(list.num_placeholders(), 1);
    assert_eq!(section.html(), fragment);
}

#[test]
fn failed_fetch_leaves_section() {
    for failure in [Failure::Status(500), Failure::Network] {
        let mut h = Harness::new(server_with(42, &["1", "2", "3", "4"]));
        let section = h.page.section_by_id("comments-section-42").unwrap();
        let list = section.list();
        bind_pagination(&h.ctl);
        h.transport.fail_next(failure.clone());
        section.links()[0].click();
        h.settle();

        assert_eq!(h.browser.alerts(), vec![notice::PAGINATE_FAILED], "{failure:?}");
        assert!(list.is_attached(), "{failure:?}");
        assert_eq!(section.list().comment_ids(), vec!["4", "3", "2"]);
    }
}

#[test]
fn sections_are_independent() {
    let mut server = server_with(1, &["a", "b", "c", "d"]);
    server.add_entry(EntryId(2));
    for t in ["e", "f", "g", "h"] {
        server.seed_comment(EntryId(2), "Alice", t);
    }
    let mut h = Harness::new(server);
    let one = h.page.section_by_id("comments-section-1").unwrap();
    let two = h.page.section_by_id("comments-section-2").unwrap();
    let two_list = two.list();
    bind_pagination(&h.ctl);
    one.links()[0].click();
    h.settle();

    assert_eq!(one.list().comment_ids(), vec!["1"]);
    assert!(two_list.is_attached());
    assert_eq!(two.list().comment_ids(), vec!["8", "7", "6"]);
}

fn url_of(s: &str) -> url::Url {
    url::Url::parse(s).unwrap()
}
