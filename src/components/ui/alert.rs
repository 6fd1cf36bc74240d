use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border border-destructive/30 px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm text-destructive [&_p]:leading-relaxed"}
}

pub use components::*;
