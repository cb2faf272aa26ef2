use crate::interaction::Key;
use crate::page::{ListenerId, Page};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub description: String,
}

impl ModalContent {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(ModalContent),
}

/// Input delivered to the modal overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// Click on the backdrop outside the panel.
    Backdrop,
    /// Click inside the panel. Never dismisses.
    PanelClick,
    /// The explicit close control.
    CloseButton,
    /// Key routed from the window-level listener.
    Key(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Opened,
    /// Open → Open with new content, no intermediate close.
    Replaced,
    /// Open with identical content; nothing was re-shown.
    Unchanged,
    Closed,
    Ignored,
}

#[derive(Debug, Default)]
struct ModalInner {
    state: ModalState,
    escape_listener: Option<ListenerId>,
}

/// Page-wide detail modal, shared by every diagram instance.
///
/// Cloning yields another handle to the same store. At most one panel is open at a time; any
/// instance may replace its content (last activation wins, no queuing).
#[derive(Debug, Clone, Default)]
pub struct ModalStore {
    inner: Rc<RefCell<ModalInner>>,
}

impl ModalStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.inner.borrow().state.clone()
    }

    pub fn is_open(&self) -> bool {
        matches!(self.inner.borrow().state, ModalState::Open(_))
    }

    /// Whether the store currently holds the window `Escape` listener.
    pub fn has_escape_listener(&self) -> bool {
        self.inner.borrow().escape_listener.is_some()
    }

    /// Page calls happen after the store is updated, so a host may read or drive the store from
    /// inside its callbacks.
    pub fn open(&self, page: &mut dyn Page, content: ModalContent) -> Transition {
        let (transition, needs_listener) = {
            let mut inner = self.inner.borrow_mut();
            let transition = match &inner.state {
                ModalState::Open(current) if *current == content => return Transition::Unchanged,
                ModalState::Open(_) => Transition::Replaced,
                ModalState::Closed => Transition::Opened,
            };
            inner.state = ModalState::Open(content.clone());
            (transition, inner.escape_listener.is_none())
        };

        tracing::debug!(title = %content.title, ?transition, "modal open");
        page.show_modal(&content);
        if needs_listener {
            let listener = page.add_escape_listener();
            let stale = {
                let mut inner = self.inner.borrow_mut();
                let still_open = matches!(inner.state, ModalState::Open(_));
                if still_open && inner.escape_listener.is_none() {
                    inner.escape_listener = Some(listener);
                    None
                } else {
                    Some(listener)
                }
            };
            // Closed (or already listening) again while the host ran its callbacks.
            if let Some(stale) = stale {
                page.remove_escape_listener(stale);
            }
        }
        transition
    }

    pub fn dismiss(&self, page: &mut dyn Page) -> Transition {
        let listener = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == ModalState::Closed {
                return Transition::Ignored;
            }
            inner.state = ModalState::Closed;
            inner.escape_listener.take()
        };

        page.hide_modal();
        if let Some(listener) = listener {
            page.remove_escape_listener(listener);
        }
        tracing::debug!("modal closed");
        Transition::Closed
    }

    pub fn handle(&self, page: &mut dyn Page, event: ModalEvent) -> Transition {
        match event {
            ModalEvent::Backdrop | ModalEvent::CloseButton => self.dismiss(page),
            ModalEvent::Key(Key::Escape) if self.has_escape_listener() => self.dismiss(page),
            ModalEvent::Key(_) | ModalEvent::PanelClick => Transition::Ignored,
        }
    }
}
