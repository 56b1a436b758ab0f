//! Property tests for the record set query operations.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use tickstats::domain::record::Record;
use tickstats::domain::record_set::RecordSet;

const NAMES: [&str; 3] = ["AAA", "BBB", "CCC"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
}

fn arb_record() -> impl Strategy<Value = Record> {
    (0..NAMES.len(), proptest::option::weighted(0.9, 0i64..60), 0u32..100_000).prop_map(
        |(name, offset, cents)| {
            Record::new(
                NAMES[name],
                offset.map(|d| base_date() + Duration::days(d)),
                cents as f64 / 100.0,
            )
        },
    )
}

fn arb_set() -> impl Strategy<Value = RecordSet> {
    proptest::collection::vec(arb_record(), 1..40).prop_map(RecordSet::new)
}

/// Records with pairwise distinct dates and distinct prices.
fn arb_distinct_set() -> impl Strategy<Value = RecordSet> {
    proptest::collection::btree_set(0i64..365, 1..30)
        .prop_flat_map(|days| {
            let prices: Vec<u32> = (0..days.len() as u32).map(|i| i * 7 + 1).collect();
            (Just(days), Just(prices).prop_shuffle())
        })
        .prop_map(|(days, prices)| {
            days.into_iter()
                .zip(prices)
                .map(|(d, p)| Record::new("AAA", Some(base_date() + Duration::days(d)), p as f64))
                .collect()
        })
}

proptest! {
    #[test]
    fn get_is_empty_iff_no_record_has_the_name(set in arb_set(), idx in 0..NAMES.len() + 1) {
        let name = NAMES.get(idx).copied().unwrap_or("UNKNOWN");
        let present = set.iter().any(|r| r.name() == name);
        prop_assert_eq!(set.get(name).is_empty(), !present);
    }

    #[test]
    fn get_returns_only_matching_names_in_date_order(set in arb_set()) {
        let selected = set.get("AAA");
        prop_assert!(selected.iter().all(|r| r.name() == "AAA"));
        let dates: Vec<_> = selected.iter().map(|r| r.date()).collect();
        prop_assert!(dates.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn ascending_and_descending_are_reverses(set in arb_distinct_set(), by_price in any::<bool>()) {
        let asc: Vec<Record> = set.order(false, by_price).records().to_vec();
        let mut desc: Vec<Record> = set.order(true, by_price).records().to_vec();
        desc.reverse();
        prop_assert_eq!(asc, desc);
    }

    #[test]
    fn filter_is_idempotent(set in arb_set(), a in 0i64..60, len in 0i64..60) {
        let start = base_date() + Duration::days(a);
        let end = start + Duration::days(len);
        let once = set.filter(start, end);
        let twice = once.filter(start, end);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.iter().all(|r| r.date().is_some_and(|d| start <= d && d <= end)));
    }

    #[test]
    fn filter_with_start_after_end_is_empty(set in arb_set(), a in 1i64..60, gap in 1i64..30) {
        let start = base_date() + Duration::days(a);
        let end = start - Duration::days(gap);
        prop_assert!(set.filter(start, end).is_empty());
    }

    #[test]
    fn identical_prices_have_mean_p_and_zero_stdev(cents in 0u32..1_000_000, n in 2usize..20) {
        let p = cents as f64 / 1000.0;
        let set: RecordSet = (0..n)
            .map(|i| Record::new("AAA", Some(base_date() + Duration::days(i as i64)), p))
            .collect();
        prop_assert!((set.mean().unwrap() - p).abs() < 1e-9);
        prop_assert_eq!(set.stdev().unwrap(), 0.0);
    }

    #[test]
    fn buy_sell_brackets_every_price(set in arb_set()) {
        let bs = set.buy_sell().unwrap();
        prop_assert!(set.iter().all(|r| bs.buy_price <= r.price() && r.price() <= bs.sell_price));
        prop_assert!(bs.profit >= 0.0);
    }

    #[test]
    fn queries_do_not_mutate_the_source(set in arb_set()) {
        let before = set.clone();
        let _ = set.get("AAA").order(true, true).filter(base_date(), base_date() + Duration::days(30));
        let _ = set.buy_sell();
        prop_assert_eq!(set, before);
    }
}
