/// Component to display the catalog cards.
/// Renders each pavilion's image, name, approval summary and description.
use leptos::*;

use crate::models::pavilion::Pavilion;
use crate::views::catalog::{Layout, PavilionCard};

#[component]
pub fn PavilionList(
    cards: Vec<PavilionCard>,
    layout: Layout,
    on_select: Callback<i64>,
) -> impl IntoView {
    if cards.is_empty() {
        return view! { <p class="catalog__empty">{ "No pavilions to show." }</p> }.into_view();
    }

    view! {
        <ul class=layout.css_class()>
            {cards.into_iter().map(|card| {
                let PavilionCard { pavilion, summary } = card;
                let Pavilion { id, name, description, image_url } = pavilion;
                let alt = name.clone();
                view! {
                    <li class="pavilion-card">
                        <button class="pavilion-card__open" on:click=move |_| on_select.call(id)>
                            <img src=image_url alt=alt />
                            <h2>{ name }</h2>
                        </button>
                        <p class="pavilion-card__summary">{ summary }</p>
                        <p class="pavilion-card__description">{ description }</p>
                    </li>
                }
            }).collect::<Vec<_>>()}
        </ul>
    }
    .into_view()
}
