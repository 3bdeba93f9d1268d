//! Property-based tests for the query engine.
//!
//! The filtered view is always an order-preserving subsequence of the
//! collection, every item in it matches the criteria, and the counters agree
//! with the collection they were computed from.

use bookmark_alpha::services::query_engine;
use bookmark_alpha::types::bookmark::{Bookmark, FilterCriteria};
use chrono::{TimeZone, Utc};
use proptest::prelude::*;

fn arb_bookmark() -> impl Strategy<Value = Bookmark> {
    (
        "[a-zA-Z ]{1,20}",
        "[a-z]{3,10}",
        prop_oneof![Just("Docs"), Just("News"), Just("Tools"), Just("Imported")],
        "[a-z ]{0,20}",
        any::<bool>(),
        0i64..2_000_000_000,
    )
        .prop_map(|(title, host, category, description, favorite, secs)| Bookmark {
            id: String::new(),
            title,
            url: format!("https://{}.com", host),
            category: category.to_string(),
            description,
            image_url: String::new(),
            favorite,
            date_added: Utc.timestamp_opt(secs, 0).unwrap(),
        })
}

fn arb_collection() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec(arb_bookmark(), 0..30).prop_map(|mut items| {
        for (i, b) in items.iter_mut().enumerate() {
            b.id = i.to_string();
        }
        items
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        prop_oneof![Just(String::new()), "[a-zA-Z]{1,3}"],
        prop_oneof![Just(""), Just("Docs"), Just("News"), Just("Tools")],
        any::<bool>(),
    )
        .prop_map(|(search_text, category, favorites_only)| FilterCriteria {
            search_text,
            category: category.to_string(),
            favorites_only,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn filter_is_ordered_subsequence_of_matches(
        items in arb_collection(),
        criteria in arb_criteria(),
    ) {
        let filtered = query_engine::filter(&items, &criteria);

        let expected: Vec<&Bookmark> = items
            .iter()
            .filter(|b| query_engine::matches(b, &criteria))
            .collect();
        prop_assert_eq!(&filtered, &expected);

        let positions: Vec<usize> = filtered
            .iter()
            .map(|b| b.id.parse::<usize>().unwrap())
            .collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

        for b in &filtered {
            if criteria.favorites_only {
                prop_assert!(b.favorite);
            }
            if !criteria.category.is_empty() {
                prop_assert_eq!(&b.category, &criteria.category);
            }
        }
    }

    #[test]
    fn wildcard_criteria_keep_everything(items in arb_collection()) {
        let filtered = query_engine::filter(&items, &FilterCriteria::default());
        prop_assert_eq!(filtered.len(), items.len());
    }

    #[test]
    fn stats_agree_with_collection(items in arb_collection()) {
        let stats = query_engine::stats(&items);
        let categories = query_engine::categories(&items);

        prop_assert_eq!(stats.total, items.len());
        prop_assert_eq!(stats.category_count, categories.len());
        prop_assert_eq!(stats.favorite_count, items.iter().filter(|b| b.favorite).count());
        prop_assert!(stats.today_count <= stats.total);
    }
}
