use super::HookedHost;
use crate::*;

fn content(title: &str) -> ModalContent {
    ModalContent::new(title, format!("{title} description"))
}

#[test]
fn open_installs_exactly_one_escape_listener() {
    let mut page = HeadlessPage::new();
    let modal = ModalStore::new();
    assert_eq!(modal.state(), ModalState::Closed);

    assert_eq!(modal.open(&mut page, content("A")), Transition::Opened);
    assert_eq!(modal.open(&mut page, content("B")), Transition::Replaced);
    assert_eq!(page.escape_listeners(), 1);
    assert_eq!(page.modal(), Some(&content("B")));
    assert_eq!(modal.state(), ModalState::Open(content("B")));
}

#[test]
fn replacing_content_never_passes_through_closed() {
    let mut page = HeadlessPage::new();
    let modal = ModalStore::new();
    modal.open(&mut page, content("A"));
    modal.open(&mut page, content("B"));
    assert!(modal.is_open());
    assert_eq!(page.modal_shows(), 2);
}

#[test]
fn identical_activation_is_unchanged() {
    let mut page = HeadlessPage::new();
    let modal = ModalStore::new();
    modal.open(&mut page, content("A"));
    assert_eq!(modal.open(&mut page, content("A")), Transition::Unchanged);
    assert_eq!(page.modal_shows(), 1);
}

#[test]
fn escape_closes_only_when_open() {
    let mut page = HeadlessPage::new();
    let modal = ModalStore::new();

    assert_eq!(
        modal.handle(&mut page, ModalEvent::Key(Key::Escape)),
        Transition::Ignored
    );
    assert_eq!(page.escape_listeners(), 0);

    modal.open(&mut page, content("A"));
    assert_eq!(
        modal.handle(&mut page, ModalEvent::Key(Key::Enter)),
        Transition::Ignored
    );
    assert_eq!(
        modal.handle(&mut page, ModalEvent::Key(Key::from_dom("Escape"))),
        Transition::Closed
    );
    assert_eq!(modal.state(), ModalState::Closed);
    assert_eq!(page.modal(), None);
    assert_eq!(page.escape_listeners(), 0);
}

#[test]
fn backdrop_and_close_button_dismiss_but_panel_clicks_do_not() {
    let mut page = HeadlessPage::new();
    let modal = ModalStore::new();

    modal.open(&mut page, content("A"));
    assert_eq!(
        modal.handle(&mut page, ModalEvent::PanelClick),
        Transition::Ignored
    );
    assert!(modal.is_open());
    assert_eq!(
        modal.handle(&mut page, ModalEvent::Backdrop),
        Transition::Closed
    );

    modal.open(&mut page, content("B"));
    assert_eq!(
        modal.handle(&mut page, ModalEvent::CloseButton),
        Transition::Closed
    );
    assert_eq!(
        modal.handle(&mut page, ModalEvent::CloseButton),
        Transition::Ignored
    );
}

#[test]
fn listeners_do_not_leak_across_cycles() {
    let mut page = HeadlessPage::new();
    let modal = ModalStore::new();
    for i in 0..50 {
        modal.open(&mut page, content(&format!("S{i}")));
        assert_eq!(page.escape_listeners(), 1);
        modal.dismiss(&mut page);
        assert_eq!(page.escape_listeners(), 0);
    }
    assert!(!modal.has_escape_listener());
}

#[test]
fn clones_share_one_store() {
    let mut page = HeadlessPage::new();
    let a = ModalStore::new();
    let b = a.clone();
    a.open(&mut page, content("A"));
    assert_eq!(b.open(&mut page, content("B")), Transition::Replaced);
    assert_eq!(a.state(), ModalState::Open(content("B")));
    assert_eq!(b.dismiss(&mut page), Transition::Closed);
    assert!(!a.is_open());
}

#[test]
fn host_callbacks_may_read_the_store() {
    let store = ModalStore::new();
    let mut host = HookedHost {
        store: store.clone(),
        ..HookedHost::default()
    };

    assert_eq!(store.open(&mut host, content("A")), Transition::Opened);
    assert_eq!(store.handle(&mut host, ModalEvent::Backdrop), Transition::Closed);
    assert_eq!(host.open_seen_on_show, [true]);
    assert_eq!(host.open_seen_on_hide, [false]);
    assert_eq!(host.inner.escape_listeners(), 0);
}

#[test]
fn closing_from_inside_show_leaves_no_listener_behind() {
    let store = ModalStore::new();
    let mut host = HookedHost {
        store: store.clone(),
        close_on_show: true,
        ..HookedHost::default()
    };

    assert_eq!(store.open(&mut host, content("A")), Transition::Opened);
    assert!(!store.is_open());
    assert!(!store.has_escape_listener());
    assert_eq!(host.inner.escape_listeners(), 0);
    assert_eq!(host.inner.modal(), None);
}
