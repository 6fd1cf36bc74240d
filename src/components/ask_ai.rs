use crate::chat::{ask, format_time, ChatMessage, ChatRole, Transcript};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Textarea};
use crate::state::AppContext;
use icons::{Bot, Send as SendIcon, User as UserIcon, X};
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
fn MessageBubble(message: ChatMessage) -> impl IntoView {
    let from_user = message.role == ChatRole::User;
    let row = if from_user { "flex flex-row-reverse gap-2" } else { "flex gap-2" };
    let bubble = match (from_user, message.failed) {
        (true, _) => "bg-primary text-primary-foreground",
        (false, true) => "bg-destructive/10 text-destructive",
        (false, false) => "bg-muted",
    };

    view! {
        <div class=row>
            <div class="flex size-7 shrink-0 items-center justify-center rounded-full bg-muted">
                {if from_user {
                    view! { <UserIcon class="size-4" /> }.into_any()
                } else {
                    view! { <Bot class="size-4 text-primary" /> }.into_any()
                }}
            </div>
            <div class=format!("max-w-[80%] rounded-lg px-3 py-2 text-sm {bubble}")>
                <p class="whitespace-pre-wrap">{message.text}</p>
                <span class="mt-1 block text-[10px] opacity-60">
                    {format_time(&message.sent_at)}
                </span>
            </div>
        </div>
    }
}

/// Floating assistant chat. The transcript lives as long as the panel.
#[component]
pub fn AskAiPanel(open: RwSignal<bool>) -> impl IntoView {
    let api = StoredValue::new(expect_context::<AppContext>().0.api_client);
    let transcript = RwSignal::new(Transcript::new());
    let input = RwSignal::new(String::new());
    let pending = Memo::new(move |_| transcript.with(|t| t.is_pending()));
    let list_ref = NodeRef::<html::Div>::new();

    let send = move || {
        let text = input.get_untracked();
        if text.trim().is_empty() || pending.get_untracked() {
            return;
        }
        input.set(String::new());
        let api = api.get_value();
        spawn_local(async move {
            ask(transcript, &api, &text).await;
        });
    };

    let on_keydown = Callback::new(move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            send();
        }
    });

    Effect::new(move |_| {
        transcript.track();
        if let Some(list) = list_ref.get() {
            list.set_scroll_top(list.scroll_height());
        }
    });

    view! {
        <div class="fixed bottom-4 right-4 z-50 flex h-[32rem] w-96 flex-col rounded-2xl border bg-background shadow-xl">
            <div class="flex items-center justify-between border-b px-4 py-3">
                <div class="flex items-center gap-2">
                    <Bot class="size-5 text-primary" />
                    <span class="font-semibold">"Ask AI"</span>
                </div>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:aria-label="Close assistant"
                    on:click=move |_| open.set(false)
                >
                    <X class="size-4" />
                </Button>
            </div>

            <div node_ref=list_ref class="flex flex-1 flex-col gap-3 overflow-y-auto p-4">
                <For
                    each=move || transcript.with(|t| t.messages().to_vec())
                    key=|m: &ChatMessage| m.id
                    children=|m: ChatMessage| view! { <MessageBubble message=m /> }
                />
                <Show when=move || pending.get() fallback=|| ().into_view()>
                    <div class="flex items-center gap-2 text-xs text-muted-foreground">
                        <Bot class="size-4 animate-pulse" />
                        "Thinking..."
                    </div>
                </Show>
            </div>

            <div class="flex items-end gap-2 border-t p-3">
                <Textarea
                    placeholder="Ask about your notes..."
                    bind_value=input
                    rows=2
                    disabled=Signal::derive(move || pending.get())
                    on_keydown=on_keydown
                />
                <Button
                    size=ButtonSize::Icon
                    attr:aria-label="Send question"
                    attr:disabled=move || pending.get() || input.with(|i| i.trim().is_empty())
                    on:click=move |_| send()
                >
                    <SendIcon class="size-4" />
                </Button>
            </div>
        </div>
    }
}
