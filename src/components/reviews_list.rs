use leptos::*;
use crate::models::review::Review;

#[component]
pub fn ReviewsList(reviews: Vec<Review>) -> impl IntoView {
    if reviews.is_empty() {
        return view! {
            <div class="reviews">
                <h3>{ "Reviews" }</h3>
                <p class="reviews__empty">{ "No reviews yet. Be the first!" }</p>
            </div>
        }
        .into_view();
    }

    view! {
        <div class="reviews">
            <h3>{ "Reviews" }</h3>
            <ul>
                {
                    reviews.into_iter().map(|review| {
                        let name = review.display_name().to_string();
                        let verdict = match review.again {
                            Some(true) => "Would return",
                            Some(false) => "Would not return",
                            None => "",
                        };
                        let posted = review.created_at.format("%Y-%m-%d %H:%M").to_string();
                        view! {
                            <li class="review">
                                <strong>{ name }</strong>
                                <span class="review__verdict">{ verdict }</span>
                                <p>{ review.comment }</p>
                                <time>{ posted }</time>
                            </li>
                        }
                    }).collect::<Vec<_>>()
                }
            </ul>
        </div>
    }
    .into_view()
}
