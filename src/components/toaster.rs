use crate::state::toast::{Toast, ToastKind};
use crate::state::AppContext;
use leptos::prelude::*;

#[component]
pub fn ToastViewport() -> impl IntoView {
    let toaster = expect_context::<AppContext>().0.toaster;

    view! {
        <div class="fixed right-4 top-4 z-[200] flex w-80 flex-col gap-2" aria-live="polite">
            <For
                each=move || toaster.toasts()
                key=|t: &Toast| t.id
                children=move |t: Toast| {
                    let class = match t.kind {
                        ToastKind::Success => "border-success/40 bg-card text-foreground",
                        ToastKind::Error => "border-destructive/40 bg-card text-destructive",
                    };
                    let id = t.id;
                    view! {
                        <div
                            role="status"
                            class=format!("cursor-pointer rounded-lg border px-4 py-3 text-sm shadow-lg {class}")
                            on:click=move |_| toaster.dismiss(id)
                        >
                            {t.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
