use crate::components::ui::{Button, ButtonSize, ButtonVariant, NoteTile};
use crate::models::Note;
use crate::util::{format_date, truncate_content};
use icons::{Calendar, Pencil, Trash2};
use leptos::prelude::*;

#[component]
pub fn NoteCard(
    note: Note,
    #[prop(into)] busy: Signal<bool>,
    on_edit: Callback<String>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let title = note.display_title().to_string();
    let preview = truncate_content(&note.content);
    let modified = format!("Modified {}", format_date(&note.modified_at));

    let edit_id = note.id.clone();
    let open_id = note.id.clone();
    let delete_id = note.id;

    view! {
        <NoteTile>
            <div class="flex items-start justify-between gap-2">
                <h3 class="truncate text-lg font-semibold">{title}</h3>
                <div class="flex gap-1 opacity-0 transition-opacity group-hover:opacity-100">
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label="Edit note"
                        attr:disabled=move || busy.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_edit.run(edit_id.clone());
                        }
                    >
                        <Pencil class="size-4 text-primary" />
                    </Button>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        attr:aria-label="Delete note"
                        attr:disabled=move || busy.get()
                        on:click=move |ev| {
                            ev.stop_propagation();
                            on_delete.run(delete_id.clone());
                        }
                    >
                        <Trash2 class="size-4 text-destructive" />
                    </Button>
                </div>
            </div>

            <p
                class="cursor-pointer whitespace-pre-wrap text-sm text-muted-foreground"
                on:click=move |_| on_edit.run(open_id.clone())
            >
                {preview}
            </p>

            <div class="mt-auto flex items-center gap-1 text-xs text-muted-foreground">
                <Calendar class="size-3" />
                <span>{modified}</span>
            </div>
        </NoteTile>
    }
}
