/// Review statistics derived from already-fetched reviews.
/// Used by the catalog for ordering and by every view that shows a summary line.
use crate::models::pavilion::Pavilion;
use crate::models::review::Review;

/// Message shown for a pavilion nobody has rated.
pub const NO_RATINGS: &str = "No ratings yet";

/// Ratio reported for a pavilion with no rated reviews. Below every real ratio.
pub const UNRANKED: f64 = -1.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub yes: usize,
    pub total: usize,
}

/// Counts the rated reviews of one pavilion. Reviews without an `again` flag are skipped.
pub fn tally(pavilion_id: i64, reviews: &[Review]) -> Tally {
    reviews
        .iter()
        .filter(|review| review.pavilion_id == pavilion_id)
        .filter_map(|review| review.again)
        .fold(Tally::default(), |acc, again| Tally {
            yes: acc.yes + usize::from(again),
            total: acc.total + 1,
        })
}

pub fn summary(pavilion_id: i64, reviews: &[Review]) -> String {
    match tally(pavilion_id, reviews) {
        Tally { total: 0, .. } => NO_RATINGS.to_string(),
        Tally { yes, total } => format!("{}/{} people would return", yes, total),
    }
}

pub fn approval_ratio(pavilion_id: i64, reviews: &[Review]) -> f64 {
    match tally(pavilion_id, reviews) {
        Tally { total: 0, .. } => UNRANKED,
        Tally { yes, total } => yes as f64 / total as f64,
    }
}

/// Orders pavilions by approval, best first. Unrated pavilions go last.
/// The sort is stable: equal ratios keep their input order.
pub fn sort_by_approval(pavilions: &[Pavilion], reviews: &[Review]) -> Vec<Pavilion> {
    let mut ranked: Vec<(f64, &Pavilion)> = pavilions
        .iter()
        .map(|pavilion| (approval_ratio(pavilion.id, reviews), pavilion))
        .collect();
    ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
    ranked.into_iter().map(|(_, pavilion)| pavilion.clone()).collect()
}
