use leptos::*;
use leptos_meta::Title;

use crate::components::pavilion_list::PavilionList;
use crate::components::pavilion_modal::PavilionModal;
use crate::models::review::Review;
use crate::store::ApiClient;
use crate::views::catalog::{fetch_catalog, Catalog, Layout, SortOrder};

#[component]
pub fn CatalogPage() -> impl IntoView {
    let catalog = create_rw_signal(Catalog::default());

    // Fetch once on mount; the toggles below only re-derive from this data.
    create_effect(move |_| {
        spawn_local(async move {
            let data = fetch_catalog(&ApiClient::default()).await;
            catalog.update(|c| c.populate(data));
        });
    });

    let on_select = Callback::new(move |id: i64| catalog.update(|c| c.select(id)));
    let on_close = Callback::new(move |_: ()| catalog.update(|c| c.clear_selection()));
    let on_review = Callback::new(move |review: Review| catalog.update(|c| c.record_review(review)));

    view! {
        <Title text="Pavilions" />
        <h1>{ "Pavilions" }</h1>
        <div class="toolbar">
            <div class="toggle" role="group" aria-label="Layout">
                <button
                    class:active=move || catalog.with(|c| c.layout() == Layout::List)
                    on:click=move |_| catalog.update(|c| c.set_layout(Layout::List))
                >
                    { "List" }
                </button>
                <button
                    class:active=move || catalog.with(|c| c.layout() == Layout::Block)
                    on:click=move |_| catalog.update(|c| c.set_layout(Layout::Block))
                >
                    { "Grid" }
                </button>
            </div>
            <div class="toggle" role="group" aria-label="Order">
                <button
                    class:active=move || catalog.with(|c| c.order() == SortOrder::Default)
                    on:click=move |_| catalog.update(|c| c.set_order(SortOrder::Default))
                >
                    { "Default order" }
                </button>
                <button
                    class:active=move || catalog.with(|c| c.order() == SortOrder::Rating)
                    on:click=move |_| catalog.update(|c| c.set_order(SortOrder::Rating))
                >
                    { "By rating" }
                </button>
            </div>
        </div>
        {move || {
            if !catalog.with(|c| c.is_loaded()) {
                return view! { <p class="loading">{ "Loading..." }</p> }.into_view();
            }
            let (cards, layout) = catalog.with(|c| (c.cards(), c.layout()));
            view! { <PavilionList cards=cards layout=layout on_select=on_select /> }.into_view()
        }}
        {move || {
            catalog.with(|c| c.selection()).map(|selection| {
                view! { <PavilionModal selection=selection on_close=on_close on_review=on_review /> }
            })
        }}
    }
}
