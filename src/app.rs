/// Main application entry point for Pavilion Reviews.
/// Routes between the catalog and the per-pavilion detail page.
use leptos::*;
use leptos_meta::*;
use leptos_router::*;
use crate::components::{catalog_page::CatalogPage, detail_page::DetailPage};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/pavilion-reviews.css" />
        <Title text="Pavilion Reviews" />
        <Router>
            <header class="site-header">
                <A href="/">{ "Pavilion Reviews" }</A>
            </header>
            <main>
                <Routes>
                    <Route path="/" view=CatalogPage />
                    <Route path="/pavilion/:id" view=DetailPage />
                    <Route path="/*any" view=PageNotFound />
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn PageNotFound() -> impl IntoView {
    view! { <h1>{ "Page not found" }</h1> }
}
