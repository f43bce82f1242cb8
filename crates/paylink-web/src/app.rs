//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::CheckoutPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <header class="site-header">
                <h1>"Pay Link"</h1>
            </header>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=CheckoutPage />
                </Routes>
            </main>
        </Router>
    }
}
