use crate::components::AskAiPanel;
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::state::AppContext;
use crate::util::LOGIN_PATH;
use icons::{LogOut, NotebookPen, Sparkles};
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

#[component]
pub fn Header(ask_open: RwSignal<bool>) -> impl IntoView {
    let session = StoredValue::new(expect_context::<AppContext>().0.session);
    let navigate = use_navigate();

    let email = move || {
        session
            .with_value(|s| s.user())
            .map(|u| u.email)
            .unwrap_or_default()
    };

    let on_logout = move |_| {
        session.with_value(|s| s.logout());
        navigate(LOGIN_PATH, Default::default());
    };

    view! {
        <header class="sticky top-0 z-40 border-b bg-background/80 backdrop-blur">
            <div class="container mx-auto flex h-16 items-center justify-between px-4">
                <div class="flex items-center gap-2">
                    <NotebookPen class="size-6 text-primary" />
                    <span class="text-xl font-bold">"NoteFlow"</span>
                </div>

                <div class="flex items-center gap-3">
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        on:click=move |_| ask_open.update(|open| *open = !*open)
                    >
                        <Sparkles class="size-4" />
                        "Ask AI"
                    </Button>
                    <span class="hidden text-sm text-muted-foreground sm:inline">{email}</span>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        attr:aria-label="Sign out"
                        on:click=on_logout
                    >
                        <LogOut class="size-4" />
                    </Button>
                </div>
            </div>
        </header>
    }
}

/// Chrome around every signed-in page: header, page body and the
/// Ask AI panel.
#[component]
pub fn AppLayout(children: Children) -> impl IntoView {
    let ask_open = RwSignal::new(false);

    view! {
        <div class="min-h-screen bg-background">
            <Header ask_open=ask_open />
            <main class="container mx-auto px-4 py-8">{children()}</main>
            <Show when=move || ask_open.get() fallback=|| ().into_view()>
                <AskAiPanel open=ask_open />
            </Show>
        </div>
    }
}
