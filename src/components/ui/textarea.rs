use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Multi-line counterpart of `Input`, bound the same way.
#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] id: String,
    #[prop(optional, into)] disabled: Signal<bool>,
    #[prop(optional)] rows: Option<u32>,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional, into)] on_keydown: Option<Callback<web_sys::KeyboardEvent>>,
    #[prop(optional)] node_ref: NodeRef<html::Textarea>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground border-input flex w-full min-w-0 rounded-md border bg-transparent px-3 py-2 text-base shadow-xs outline-none resize-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        if let Some(target) = ev.target() {
            if let Some(area) = target.dyn_ref::<web_sys::HtmlTextAreaElement>() {
                bind_value.set(area.value());
            }
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            id=id
            rows=rows.unwrap_or(3)
            disabled=move || disabled.get()
            prop:value=move || bind_value.get()
            on:input=on_input
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                if let Some(cb) = on_keydown {
                    cb.run(ev);
                }
            }
            node_ref=node_ref
        />
    }
    .into_any()
}
