use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardFooter, CardHeader, CardTitle, FullPageSpinner, Spinner,
};
use crate::components::{AppLayout, NoteCard, NoteEditor, SearchBar};
use crate::models::Note;
use crate::search::{filter_notes, summarize_count};
use crate::session::{guard_decision, GuardDecision, SessionStore};
use crate::state::{AppContext, EditorState, NoteCollection, ViewMode};
use crate::util::{confirm, current_fragment, navigate_full, DASHBOARD_PATH, LOGIN_PATH};
use icons::{Cloud, FileText, LayoutGrid, List, NotebookPen, Plus, RefreshCw, Sparkles, Zap};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;
use strum::IntoEnumIterator;

/// Admits its children only for a signed-in user. While the stored
/// session is still being read nothing but a spinner is shown.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<AppContext>().0.session;
    let decision = Memo::new(move |_| guard_decision(&session.state()));

    // Store children so the view macro sees an `Fn` (not an `FnOnce`).
    let children = StoredValue::new(children);

    move || match decision.get() {
        GuardDecision::Pending => view! { <FullPageSpinner /> }.into_any(),
        GuardDecision::Admit => view! {
            <AppLayout>
                {children.with_value(|c| c())}
            </AppLayout>
        }
        .into_any(),
        GuardDecision::RedirectToLogin => view! { <Redirect path=LOGIN_PATH /> }.into_any(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let session = app_state.0.session.clone();
    let oauth_url = app_state.0.config.oauth_url();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.is_authenticated() {
            navigate(DASHBOARD_PATH, Default::default());
        }
    });

    let features = [
        (view! { <Zap class="size-4 text-primary" /> }.into_any(), "Capture ideas the moment they happen"),
        (view! { <Sparkles class="size-4 text-primary" /> }.into_any(), "Ask AI questions about your notes"),
        (view! { <Cloud class="size-4 text-primary" /> }.into_any(), "Your notes, on every device"),
    ];

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex min-h-screen w-full max-w-sm flex-col justify-center px-4 py-10">
                <div class="mb-6 flex items-center justify-center gap-2">
                    <NotebookPen class="size-7 text-primary" />
                    <span class="text-2xl font-bold">"NoteFlow"</span>
                </div>

                <Card>
                    <CardHeader>
                        <CardTitle class="text-lg">"Welcome back"</CardTitle>
                        <CardDescription class="text-xs">"Sign in to reach your notes."</CardDescription>
                    </CardHeader>

                    <CardContent>
                        <ul class="flex flex-col gap-3 text-sm">
                            {features
                                .into_iter()
                                .map(|(icon, text)| view! {
                                    <li class="flex items-center gap-2">{icon}<span>{text}</span></li>
                                })
                                .collect_view()}
                        </ul>
                    </CardContent>

                    <CardFooter>
                        <Button
                            class="w-full"
                            variant=ButtonVariant::Light
                            size=ButtonSize::Lg
                            on:click=move |_| navigate_full(&oauth_url)
                        >
                            "Continue with Google"
                        </Button>
                    </CardFooter>
                </Card>
            </div>
        </div>
    }
}

/// Signs in from the callback fragment and picks where to go next.
pub(crate) fn finish_auth_callback(session: &SessionStore, fragment: &str) -> &'static str {
    if session.complete_callback(fragment) {
        DASHBOARD_PATH
    } else {
        LOGIN_PATH
    }
}

/// Landing route of the OAuth redirect; the fragment carries the session.
#[component]
pub fn AuthCallbackPage() -> impl IntoView {
    let session = expect_context::<AppContext>().0.session;
    let navigate = use_navigate();

    Effect::new(move |_| {
        let target = finish_auth_callback(&session, &current_fragment());
        // Replace, so the token fragment does not stay in history.
        navigate(
            target,
            NavigateOptions {
                replace: true,
                ..Default::default()
            },
        );
    });

    view! {
        <div class="flex min-h-screen flex-col items-center justify-center gap-3">
            <Spinner class="size-8 text-primary" />
            <p class="text-sm text-muted-foreground">"Completing authentication..."</p>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toaster = app_state.0.toaster;
    let notes = StoredValue::new(NoteCollection::new(app_state.0.api_client.clone()));
    let (list, loading, error) = notes.with_value(|c| (c.notes, c.loading, c.error));

    spawn_local(async move {
        notes.get_value().fetch_all().await;
    });

    let search = RwSignal::new(String::new());
    let view_mode = RwSignal::new(ViewMode::default());
    let editor = RwSignal::new(EditorState::Closed);

    let filtered = Memo::new(move |_| list.with(|n| search.with(|t| filter_notes(n, t))));
    let summary = move || search.with(|t| summarize_count(filtered.with(|f| f.len()), t));
    let first_load = move || loading.get() && list.with(|n| n.is_empty());

    let on_edit = Callback::new(move |id: String| editor.set(EditorState::Editing(id)));
    let on_delete = Callback::new(move |id: String| {
        if !confirm("Are you sure you want to delete this note?") {
            return;
        }
        let collection = notes.get_value();
        spawn_local(async move {
            match collection.delete(&id).await {
                Ok(()) => toaster.success("Note deleted successfully!"),
                Err(e) => toaster.note_error(&e, "Failed to delete note"),
            }
        });
    });
    let on_create = Callback::new(move |_: ()| editor.set(EditorState::Creating));
    let on_retry = move |_| {
        spawn_local(async move {
            notes.get_value().refetch().await;
        });
    };

    view! {
        <div class="flex flex-col gap-6">
            <div class="flex flex-col gap-4 sm:flex-row sm:items-end sm:justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"My Notes"</h1>
                    <p class="text-sm text-muted-foreground">{summary}</p>
                </div>

                <div class="flex flex-col gap-2 sm:flex-row sm:items-center">
                    <SearchBar term=search />
                    <div class="flex rounded-md border p-0.5">
                        {ViewMode::iter()
                            .map(|mode| {
                                let label: &'static str = mode.into();
                                view! {
                                    <Button
                                        variant=ButtonVariant::Ghost
                                        size=ButtonSize::IconSm
                                        class="data-[active=true]:bg-muted"
                                        attr:data-active=move || (view_mode.get() == mode).to_string()
                                        attr:aria-label=label
                                        on:click=move |_| view_mode.set(mode)
                                    >
                                        {match mode {
                                            ViewMode::Grid => view! { <LayoutGrid class="size-4" /> }.into_any(),
                                            ViewMode::List => view! { <List class="size-4" /> }.into_any(),
                                        }}
                                    </Button>
                                }
                            })
                            .collect_view()}
                    </div>
                    <Button on:click=move |_| on_create.run(())>
                        <Plus class="size-4" />
                        "New Note"
                    </Button>
                </div>
            </div>

            <Show when=move || error.with(|e| e.is_some()) fallback=|| ().into_view()>
                <Alert class="flex items-center justify-between gap-4">
                    <AlertDescription>{move || error.get().unwrap_or_default()}</AlertDescription>
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=on_retry>
                        <RefreshCw class="size-4" />
                        "Retry"
                    </Button>
                </Alert>
            </Show>

            <Show
                when=move || !first_load()
                fallback=|| view! {
                    <div class="flex justify-center py-24">
                        <Spinner class="size-8 text-primary" />
                    </div>
                }
            >
                <Show
                    when=move || filtered.with(|f| !f.is_empty())
                    fallback=move || view! {
                        <EmptyNotes
                            searching=Signal::derive(move || !search.get().is_empty())
                            on_create=on_create
                        />
                    }
                >
                    <div class=move || match view_mode.get() {
                        ViewMode::Grid => "grid grid-cols-1 gap-6 md:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4",
                        ViewMode::List => "flex flex-col gap-4",
                    }>
                        <For
                            each=move || filtered.get()
                            key=|n: &Note| (n.id.clone(), n.modified_at.clone())
                            children=move |note: Note| {
                                let id = note.id.clone();
                                let busy = Signal::derive(move || notes.with_value(|c| c.is_busy(&id)));
                                view! { <NoteCard note=note busy=busy on_edit=on_edit on_delete=on_delete /> }
                            }
                        />
                    </div>
                </Show>
            </Show>

            <Show when=move || editor.with(|e| e.is_open()) fallback=|| ().into_view()>
                <NoteEditor state=editor notes=notes />
            </Show>
        </div>
    }
}

#[component]
fn EmptyNotes(
    #[prop(into)] searching: Signal<bool>,
    on_create: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center gap-3 py-24 text-center">
            <FileText class="size-12 text-muted-foreground" />
            <Show
                when=move || searching.get()
                fallback=move || view! {
                    <h3 class="text-lg font-semibold">"No notes yet"</h3>
                    <p class="text-sm text-muted-foreground">"Create your first note to get started."</p>
                    <Button on:click=move |_| on_create.run(())>
                        <Plus class="size-4" />
                        "Create note"
                    </Button>
                }
            >
                <h3 class="text-lg font-semibold">"No notes found"</h3>
                <p class="text-sm text-muted-foreground">"Try a different search term."</p>
            </Show>
        </div>
    }
}
