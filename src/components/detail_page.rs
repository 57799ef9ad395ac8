use leptos::*;
use leptos_meta::Title;
use leptos_router::{use_params_map, A};

use crate::components::review_form::ReviewDialog;
use crate::components::reviews_list::ReviewsList;
use crate::models::pavilion::Pavilion;
use crate::models::review::Review;
use crate::store::ApiClient;
use crate::views::detail::{Detail, DetailStatus};

#[component]
pub fn DetailPage() -> impl IntoView {
    let params = use_params_map();
    let pavilion_id = move || params.with(|p| p.get("id").and_then(|id| id.parse::<i64>().ok()));
    let detail = create_rw_signal(Detail::default());

    create_effect(move |_| {
        let id = pavilion_id();
        detail.set(Detail::default());
        spawn_local(async move {
            let loaded = match id {
                Some(id) => Detail::load(&ApiClient::default(), id).await,
                None => Detail::not_found(),
            };
            detail.set(loaded);
        });
    });

    let on_created = Callback::new(move |review: Review| detail.update(|d| d.prepend(review)));

    view! {
        <Title text="Pavilion" />
        <A href="/">{ "Back to all pavilions" }</A>
        {move || match detail.with(|d| d.status()) {
            DetailStatus::Loading => view! { <p class="loading">{ "Loading..." }</p> }.into_view(),
            DetailStatus::NotFound => {
                view! { <p class="not-found">{ "Pavilion not found." }</p> }.into_view()
            }
            DetailStatus::Ready => {
                let (pavilion, summary, reviews) =
                    detail.with(|d| (d.pavilion().cloned(), d.summary(), d.reviews().to_vec()));
                pavilion
                    .map(|Pavilion { id, name, description, image_url }| {
                        let alt = name.clone();
                        view! {
                            <article class="pavilion">
                                <h1>{ name }</h1>
                                <img src=image_url alt=alt />
                                <p>{ description }</p>
                                <p class="summary">{ summary }</p>
                                <ReviewDialog pavilion_id=id on_created=on_created />
                                <ReviewsList reviews=reviews />
                            </article>
                        }
                    })
                    .into_view()
            }
        }}
    }
}
