use crate::api::Transport;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Spinner, Textarea};
use crate::models::NotePayload;
use crate::state::{AppContext, EditorDraft, EditorState, NoteCollection, Toaster};
use icons::{FileText, Save, X};
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use tracing::debug;

/// Creates or updates depending on `target`, reporting the outcome as a toast.
/// Returns whether the note was saved.
pub(crate) async fn save_note<T: Transport>(
    notes: &NoteCollection<T>,
    toaster: Toaster,
    target: &EditorState,
    payload: NotePayload,
) -> bool {
    let result = match target {
        EditorState::Editing(id) => notes
            .update(id, payload)
            .await
            .map(|_| "Note updated successfully!")
            .map_err(|e| (e, "Failed to update note")),
        _ => notes
            .create(payload)
            .await
            .map(|_| "Note created successfully!")
            .map_err(|e| (e, "Failed to create note")),
    };

    match result {
        Ok(message) => {
            toaster.success(message);
            true
        }
        Err((e, message)) => {
            toaster.note_error(&e, message);
            false
        }
    }
}

/// Modal editor. Mounted only while `state` is open; reads its initial
/// fields from the cached note being edited.
#[component]
pub fn NoteEditor(state: RwSignal<EditorState>, notes: StoredValue<NoteCollection>) -> impl IntoView {
    let toaster = expect_context::<AppContext>().0.toaster;

    let target = state.get_untracked();
    let existing = target.editing_id().and_then(|id| {
        notes.with_value(|c| {
            c.notes
                .with_untracked(|list| list.iter().find(|n| n.id == id).cloned())
        })
    });
    let heading = if existing.is_some() { "Edit Note" } else { "New Note" };

    let draft = EditorDraft::from_note(existing.as_ref());
    let title = RwSignal::new(draft.title.clone());
    let content = RwSignal::new(draft.content.clone());
    let saving = RwSignal::new(false);

    // Pull the server copy; it only replaces the fields while they are untouched.
    if let Some(id) = target.editing_id().map(str::to_string) {
        let collection = notes.get_value();
        spawn_local(async move {
            match collection.refresh_note(&id).await {
                Ok(Some(fresh)) => {
                    let untouched = title.try_get_untracked().as_ref() == Some(&draft.title)
                        && content.try_get_untracked().as_ref() == Some(&draft.content);
                    if untouched {
                        title.set(fresh.title);
                        content.set(fresh.content);
                    }
                }
                Ok(None) => {}
                Err(e) => debug!(note_id = %id, error = %e, "could not refresh note"),
            }
        });
    }

    let close = move || state.set(EditorState::Closed);

    let save = move || {
        if saving.get_untracked() {
            return;
        }
        let draft = EditorDraft {
            title: title.get_untracked(),
            content: content.get_untracked(),
        };
        let Some(payload) = draft.to_payload() else {
            return;
        };

        let target = state.get_untracked();
        let collection = notes.get_value();
        saving.set(true);
        spawn_local(async move {
            let saved = save_note(&collection, toaster, &target, payload).await;
            saving.set(false);
            if saved {
                state.set(EditorState::Closed);
            }
        });
    };

    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            close();
        } else if (ev.ctrl_key() || ev.meta_key()) && ev.key().eq_ignore_ascii_case("s") {
            ev.prevent_default();
            save();
        }
    });
    on_cleanup(move || handle.remove());

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/50 p-4 backdrop-blur-sm"
            on:click=move |_| close()
        >
            <div
                role="dialog"
                aria-modal="true"
                class="flex h-[80vh] w-full max-w-4xl flex-col overflow-hidden rounded-2xl border bg-background shadow-lg"
                on:click=|ev| ev.stop_propagation()
            >
                <div class="flex items-center justify-between border-b p-6">
                    <div class="flex items-center gap-3">
                        <FileText class="size-5 text-primary" />
                        <h2 class="text-lg font-semibold">{heading}</h2>
                    </div>
                    <div class="flex items-center gap-2">
                        <Button
                            attr:disabled=move || saving.get()
                            on:click=move |_| save()
                        >
                            <Show
                                when=move || saving.get()
                                fallback=|| view! { <Save class="size-4" /> }
                            >
                                <Spinner />
                            </Show>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </Button>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:aria-label="Close editor"
                            on:click=move |_| close()
                        >
                            <X class="size-5" />
                        </Button>
                    </div>
                </div>

                <div class="flex flex-1 flex-col gap-4 p-6">
                    <Input
                        id="note-title"
                        placeholder="Note title..."
                        bind_value=title
                        autofocus=true
                        class="border-none px-0 text-xl font-semibold shadow-none focus-visible:ring-0"
                    />
                    <Textarea
                        id="note-content"
                        placeholder="Start writing your note..."
                        bind_value=content
                        class="flex-1 border-none px-0 font-mono text-sm leading-relaxed shadow-none focus-visible:ring-0"
                    />
                    <div class="flex justify-between text-xs text-muted-foreground">
                        <span>"Press Ctrl+S to save, Esc to close"</span>
                        <span>{move || format!("{} characters", content.with(|c| c.chars().count()))}</span>
                    </div>
                </div>
            </div>
        </div>
    }
}
