use leptos::ev::SubmitEvent;
use leptos::*;

use crate::models::review::Review;
use crate::store::ApiClient;
use crate::views::detail::{submit_review, ReviewDraft};

/// Review form for one pavilion. Calls `on_created` with the stored review.
#[component]
pub fn ReviewForm(pavilion_id: i64, on_created: Callback<Review>) -> impl IntoView {
    let draft = create_rw_signal(ReviewDraft::new(pavilion_id));
    let again_group = format!("again-{}", pavilion_id);

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            if let Some(review) = submit_review(draft, &ApiClient::default()).await {
                on_created.call(review);
            }
        });
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <h3>{ "Submit Review" }</h3>
            <input
                type="text"
                placeholder="Name (optional)"
                prop:value=move || draft.with(|d| d.name().to_string())
                on:input=move |e| draft.update(|d| d.set_name(event_target_value(&e)))
            />
            <textarea
                placeholder="Write your review here"
                prop:value=move || draft.with(|d| d.comment().to_string())
                on:input=move |e| draft.update(|d| d.set_comment(event_target_value(&e)))
            />
            <fieldset>
                <legend>{ "Would you visit again?" }</legend>
                <label>
                    <input
                        type="radio"
                        name=again_group.clone()
                        prop:checked=move || draft.with(|d| d.again() == Some(true))
                        on:change=move |_| draft.update(|d| d.set_again(true))
                    />
                    { "Yes" }
                </label>
                <label>
                    <input
                        type="radio"
                        name=again_group
                        prop:checked=move || draft.with(|d| d.again() == Some(false))
                        on:change=move |_| draft.update(|d| d.set_again(false))
                    />
                    { "No" }
                </label>
            </fieldset>
            {move || {
                draft
                    .with(|d| d.notice().map(str::to_string))
                    .map(|notice| view! { <p class="notice notice--error" role="alert">{ notice }</p> })
            }}
            <button type="submit" disabled=move || !draft.with(|d| d.can_submit())>
                {move || if draft.with(|d| d.is_in_flight()) { "Submitting..." } else { "Submit Review" }}
            </button>
        </form>
    }
}

/// A "Write a review" button that opens a [`ReviewForm`] and closes it again
/// once the review is stored.
#[component]
pub fn ReviewDialog(pavilion_id: i64, on_created: Callback<Review>) -> impl IntoView {
    let (open, set_open) = create_signal(false);

    let created = Callback::new(move |review: Review| {
        // the dialog may already be gone if its modal was closed mid-submit
        let _ = set_open.try_set(false);
        on_created.call(review);
    });

    view! {
        <div class="review-dialog">
            {move || if open.get() {
                view! {
                    <div class="review-dialog__body">
                        <ReviewForm pavilion_id=pavilion_id on_created=created />
                        <button type="button" on:click=move |_| set_open.set(false)>{ "Cancel" }</button>
                    </div>
                }
                .into_view()
            } else {
                view! {
                    <button type="button" on:click=move |_| set_open.set(true)>{ "Write a review" }</button>
                }
                .into_view()
            }}
        </div>
    }
}
