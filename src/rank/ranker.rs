//! Three-pass, tie-aware ranking of city summaries.

use crate::rank::recommendation::Recommendation;
use crate::types::summary::CitySummary;
use log::info;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// The ranked list plus the advice derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedForecast {
    /// Sorted by `rank`, best first.
    pub summaries: Vec<CitySummary>,
    pub recommendation: Recommendation,
}

/// Orders cities by daytime temperature, then favorable hours, then accumulated rank.
///
/// Each pass stable-sorts the whole list by its key. A city without a rank yet receives its
/// position in that pass (cities with equal keys share a position). A city that already has
/// a rank gets it incremented by one, plus one for every city sharing its rank that sorts
/// strictly ahead of it in this pass. Missing averages sort after every present value.
///
/// The first pass ranks every city with competition positions (1, 1, 3), so the gaps it
/// leaves are wide enough for the later passes to split a tie without overtaking the next
/// group. Two cities end with equal ranks only when they tie in every pass.
pub struct Ranker;

impl Ranker {
    /// Ranks the collected summaries. Any rank already present is discarded first.
    ///
    /// # Examples
    ///
    /// ```
    /// use travel_forecast::{CitySummary, Ranker, Recommendation};
    ///
    /// let city = |name: &str, temp: f64, hours: f64| CitySummary {
    ///     average_temperature: Some(temp),
    ///     average_favorable_hours: Some(hours),
    ///     ..CitySummary::empty(name)
    /// };
    ///
    /// let ranked = Ranker::rank(vec![city("LONDON", 14.0, 2.0), city("ROMA", 24.0, 6.0)]);
    /// assert_eq!(ranked.summaries[0].city, "ROMA");
    /// assert_eq!(ranked.recommendation, Recommendation::Single("ROMA".into()));
    /// ```
    pub fn rank(mut summaries: Vec<CitySummary>) -> RankedForecast {
        for summary in &mut summaries {
            summary.rank = None;
        }

        apply_pass(&mut summaries, |s| {
            Reverse(s.average_temperature.map(OrderedFloat))
        });
        apply_pass(&mut summaries, |s| {
            Reverse(s.average_favorable_hours.map(OrderedFloat))
        });
        apply_pass(&mut summaries, |s| s.rank.unwrap_or(u32::MAX));

        summaries.sort_by_key(|s| s.rank);
        let recommendation = Recommendation::from_ranked(&summaries);
        info!(
            "Ranked {} cities. {}",
            summaries.len(),
            recommendation
        );
        RankedForecast {
            summaries,
            recommendation,
        }
    }
}

fn apply_pass<K, F>(summaries: &mut [CitySummary], key: F)
where
    K: Ord,
    F: Fn(&CitySummary) -> K,
{
    summaries.sort_by_key(|s| key(s));
    let entering: Vec<(Option<u32>, K)> = summaries.iter().map(|s| (s.rank, key(s))).collect();

    let mut next_position = 1;
    let mut previous: Option<(&K, u32)> = None;
    for (index, summary) in summaries.iter_mut().enumerate() {
        let (rank, current) = &entering[index];
        match rank {
            Some(rank) => {
                let ahead = entering[..index]
                    .iter()
                    .filter(|(other_rank, other_key)| {
                        *other_rank == Some(*rank) && other_key < current
                    })
                    .count() as u32;
                summary.rank = Some(rank + 1 + ahead);
            }
            None => {
                let position = match previous {
                    Some((previous_key, position)) if previous_key == current => position,
                    _ => next_position,
                };
                summary.rank = Some(position);
                next_position += 1;
                previous = Some((current, position));
            }
        }
    }
}
