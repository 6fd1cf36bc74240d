use super::NoteError;
use leptos::prelude::*;

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) const TOAST_TTL_MS: u64 = 3000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Transient notifications shown in the corner of the app.
#[derive(Clone, Copy)]
pub(crate) struct Toaster {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl Toaster {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(vec![]),
            next_id: RwSignal::new(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastKind::Error, message.into());
    }

    /// Reports a failed note write. Unauthorized failures are already
    /// handled by the redirect and stay silent.
    pub fn note_error(&self, err: &NoteError, failure: &str) {
        match err {
            e if e.is_unauthorized() => {}
            NoteError::InFlight { .. } => {
                self.error("Another save for this note is still in progress")
            }
            NoteError::Api(_) => self.error(failure),
        }
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|x| x.id != id));
    }

    fn push(&self, kind: ToastKind, message: String) -> u64 {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| t.push(Toast { id, kind, message }));

        #[cfg(target_arch = "wasm32")]
        {
            let toaster = *self;
            set_timeout(
                move || toaster.dismiss(id),
                std::time::Duration::from_millis(TOAST_TTL_MS),
            );
        }

        id
    }
}

impl Default for Toaster {
    fn default() -> Self {
        Self::new()
    }
}
