use leptos::*;
use leptos_router::A;

use crate::components::review_form::ReviewDialog;
use crate::components::reviews_list::ReviewsList;
use crate::models::pavilion::Pavilion;
use crate::models::review::Review;
use crate::views::catalog::Selection;

/// In-place detail of the selected catalog entry: full description, summary,
/// every review of the pavilion and a review dialog.
#[component]
pub fn PavilionModal(
    selection: Selection,
    on_close: Callback<()>,
    on_review: Callback<Review>,
) -> impl IntoView {
    let Selection { pavilion, summary, reviews } = selection;
    let detail_path = pavilion.detail_path();
    let Pavilion { id, name, description, image_url } = pavilion;
    let alt = name.clone();

    view! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <button class="modal__close" on:click=move |_| on_close.call(())>{ "Close" }</button>
                <h2>{ name }</h2>
                <img src=image_url alt=alt />
                <p class="modal__description">{ description }</p>
                <p class="summary">{ summary }</p>
                <A href=detail_path>{ "Open pavilion page" }</A>
                <ReviewDialog pavilion_id=id on_created=on_review />
                <ReviewsList reviews=reviews />
            </div>
        </div>
    }
}
