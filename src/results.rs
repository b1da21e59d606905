use std::cmp::Ordering;

use thiserror::Error;
use tracing::info;

use crate::models::Offer;
use crate::search::SearchOutcome;

/// The search step reported a failure
#[derive(Error, Debug, PartialEq)]
#[error("{0}")]
pub struct SearchFailed(pub String);

#[derive(Debug, PartialEq)]
pub enum ProcessedResults {
    /// The search succeeded but returned nothing
    Empty,
    /// Offers ordered cheapest first
    Sorted(Vec<Offer>),
}

/// Turn a search outcome into offers ready to persist
pub fn process(outcome: SearchOutcome) -> Result<ProcessedResults, SearchFailed> {
    let mut offers = match outcome {
        SearchOutcome::Success(offers) => offers,
        SearchOutcome::Failure { error_message } => return Err(SearchFailed(error_message)),
    };

    sort_by_price(&mut offers);

    info!("📈 Found {} flights", offers.len());

    let Some(cheapest) = offers.first() else {
        info!("🚫 No flights found matching your criteria.");
        return Ok(ProcessedResults::Empty);
    };

    info!(
        "Cheapest offer: {} {}",
        cheapest.price.grand_total, cheapest.price.currency
    );

    Ok(ProcessedResults::Sorted(offers))
}

/// Stable ascending sort on grand total; unparseable prices go last
pub fn sort_by_price(offers: &mut [Offer]) {
    offers.sort_by(|a, b| compare_amounts(a.price.amount(), b.price.amount()));
}

fn compare_amounts(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn offer(id: &str, total: &str) -> Offer {
        serde_json::from_value(json!({
            "id": id,
            "price": { "grandTotal": total, "currency": "USD" },
            "itineraries": []
        }))
        .unwrap()
    }

    fn ids(offers: &[Offer]) -> Vec<&str> {
        offers
            .iter()
            .map(|offer| offer.extra["id"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn sorts_ascending_and_keeps_ties_in_order() {
        let outcome = SearchOutcome::Success(vec![
            offer("a", "200.00"),
            offer("b", "50.50"),
            offer("c", "50.50"),
            offer("d", "999.99"),
        ]);

        let ProcessedResults::Sorted(offers) = process(outcome).unwrap() else {
            panic!("expected sorted offers");
        };

        assert_eq!(ids(&offers), ["b", "c", "a", "d"]);
    }

    #[test]
    fn compares_numerically_not_lexically() {
        let mut offers = vec![offer("a", "1000.00"), offer("b", "99.00"), offer("c", "250")];
        sort_by_price(&mut offers);
        assert_eq!(ids(&offers), ["b", "c", "a"]);
    }

    #[test]
    fn unpriced_offers_sort_last_in_original_order() {
        let mut offers = vec![
            offer("x", "n/a"),
            offer("a", "300.00"),
            offer("y", ""),
            offer("b", "100.00"),
        ];
        sort_by_price(&mut offers);
        assert_eq!(ids(&offers), ["b", "a", "x", "y"]);
    }

    #[test]
    fn empty_success_is_reported_as_empty() {
        assert_eq!(
            process(SearchOutcome::Success(Vec::new())),
            Ok(ProcessedResults::Empty)
        );
    }

    #[test]
    fn failure_carries_message() {
        let err = process(SearchOutcome::Failure {
            error_message: "Unknown error".to_string(),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }
}
