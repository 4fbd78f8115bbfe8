mod common;

use std::time::Duration;

use common::{server_with, Harness};
use contest_client::Config;

#[test]
fn preview_shows_full_image() {
    let h = Harness::new(server_with(1, &[]));
    h.ctl.open_preview(Some("/media/entries/full/42.jpg"));
    let overlay = h.page.overlay().unwrap();
    assert_eq!(overlay.src().as_deref(), Some("/media/entries/full/42.jpg"));
    assert_eq!(overlay.times_shown(), 1);

    h.ctl.open_preview(Some("/media/entries/full/43.jpg"));
    assert_eq!(overlay.src().as_deref(), Some("/media/entries/full/43.jpg"));
    assert_eq!(overlay.times_shown(), 2);
}

#[test]
fn preview_without_url_opens_empty() {
    let h = Harness::new(server_with(1, &[]));
    h.ctl.open_preview(None);
    let overlay = h.page.overlay().unwrap();
    assert_eq!(overlay.src().as_deref(), Some(""));
    assert_eq!(overlay.times_shown(), 1);
}

#[test]
fn preview_without_overlay_is_harmless() {
    let h = Harness::new(server_with(1, &[]));
    h.page.remove_overlay();
    h.ctl.open_preview(Some("/media/x.jpg"));
    assert!(h.browser.alerts().is_empty());
}

#[test]
fn join_notifies_then_redirects() {
    let mut h = Harness::new(server_with(1, &[]));
    assert!(h.page.toasts().is_none());
    let ctl = h.ctl.clone();
    h.run(ctl.notify_and_redirect("/contests/3/"));

    let toasts = h.page.toasts().unwrap();
    assert_eq!(toasts.messages(), vec![Config::default().join_message]);
    assert_eq!(h.browser.sleeps(), vec![Duration::from_millis(1500)]);
    assert_eq!(h.browser.navigations(), vec!["/contests/3/"]);
    assert_eq!(h.transport.num_requests(), 0);
}

#[test]
fn join_reuses_notification_region() {
    let config = Config {
        join_redirect_delay_ms: 10,
        join_message: String::from("On your way"),
        ..Config::default()
    };
    let mut h = Harness::with_config(server_with(1, &[]), config);
    let ctl = h.ctl.clone();
    h.run(ctl.notify_and_redirect("/contests/3/"));
    h.run(ctl.notify_and_redirect("/contests/3/"));

    assert_eq!(h.page.toast_regions_created(), 1);
    assert_eq!(
        h.page.toasts().unwrap().messages(),
        vec!["On your way", "On your way"]
    );
    assert_eq!(h.browser.sleeps(), vec![Duration::from_millis(10); 2]);
    assert_eq!(h.browser.navigations().len(), 2);
}
