use crate::components::ui::Input;
use icons::{Search, X};
use leptos::prelude::*;

#[component]
pub fn SearchBar(term: RwSignal<String>) -> impl IntoView {
    view! {
        <div class="relative w-full sm:w-72">
            <Search class="pointer-events-none absolute left-3 top-1/2 size-4 -translate-y-1/2 text-muted-foreground" />
            <Input
                id="note-search"
                placeholder="Search notes..."
                bind_value=term
                class="pl-9 pr-8"
            />
            <Show when=move || !term.get().is_empty() fallback=|| ().into_view()>
                <button
                    type="button"
                    class="absolute right-2 top-1/2 -translate-y-1/2 rounded-sm p-1 text-muted-foreground hover:text-foreground"
                    aria-label="Clear search"
                    on:click=move |_| term.set(String::new())
                >
                    <X class="size-3" />
                </button>
            </Show>
        </div>
    }
}
