use crate::components::ToastViewport;
use crate::config::EnvConfig;
use crate::pages::{AuthCallbackPage, DashboardPage, LoginPage, ProtectedRoute};
use crate::state::{AppContext, AppState};
use crate::util::DASHBOARD_PATH;
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App(config: EnvConfig) -> impl IntoView {
    provide_context(AppContext(AppState::new(config)));

    // Router hooks (navigate, redirect) need the <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("login") view=LoginPage />
                <Route path=path!("auth/callback") view=AuthCallbackPage />
                <Route path=path!("dashboard") view=move || view! {
                    <ProtectedRoute>
                        <DashboardPage />
                    </ProtectedRoute>
                } />
                <Route path=path!("") view=|| view! { <Redirect path=DASHBOARD_PATH /> } />
            </Routes>
        </Router>
        <ToastViewport />
    }
}
