use chrono::{TimeZone, Utc};
use pricewatch_core::{Platform, ScrapedProduct, DEFAULT_DISCOUNT, DEFAULT_REVIEWS, NOT_FOUND};

use super::*;

// -----------------------------------------------------------------------
// parse_price
// -----------------------------------------------------------------------

#[test]
fn price_strips_currency_and_grouping() {
    assert_eq!(parse_price("$1,299.99"), Some(1299.99));
    assert_eq!(parse_price("US $389.00"), Some(389.0));
    assert_eq!(parse_price("₦ 145,000"), Some(145_000.0));
}

#[test]
fn price_sentinel_and_empty_are_none() {
    assert_eq!(parse_price("Not Found"), None);
    assert_eq!(parse_price(""), None);
    assert_eq!(parse_price("   "), None);
}

#[test]
fn price_without_digits_is_none() {
    assert_eq!(parse_price("See price in cart"), None);
}

#[test]
fn price_with_two_decimal_points_is_none() {
    assert_eq!(parse_price("$10.00 - $12.50"), None);
}

// -----------------------------------------------------------------------
// parse_discount
// -----------------------------------------------------------------------

#[test]
fn discount_takes_first_digit_run() {
    assert!((parse_discount("10% OFF") - 10.0).abs() < f64::EPSILON);
    assert!((parse_discount("-17%") - 17.0).abs() < f64::EPSILON);
}

#[test]
fn discount_defaults_to_zero() {
    assert!(parse_discount("Not Found").abs() < f64::EPSILON);
    assert!(parse_discount("").abs() < f64::EPSILON);
    assert!(parse_discount("Sale").abs() < f64::EPSILON);
    assert!(parse_discount("0%").abs() < f64::EPSILON);
}

// -----------------------------------------------------------------------
// parse_rating / parse_reviews
// -----------------------------------------------------------------------

#[test]
fn rating_reads_first_decimal() {
    assert_eq!(parse_rating("4.5"), Some(4.5));
    assert_eq!(parse_rating("4.0"), Some(4.0));
    assert_eq!(parse_rating("4 out of 5"), Some(4.0));
    assert_eq!(parse_rating("Not Found"), None);
}

#[test]
fn reviews_remove_group_separators() {
    assert_eq!(parse_reviews("1,234"), 1234);
    assert_eq!(parse_reviews("12,345 ratings"), 12_345);
    assert_eq!(parse_reviews("87"), 87);
    assert_eq!(parse_reviews("0"), 0);
    assert_eq!(parse_reviews(""), 0);
}

// -----------------------------------------------------------------------
// normalize_record
// -----------------------------------------------------------------------

#[test]
fn normalize_record_leaves_record_untouched() {
    let record = ScrapedProduct {
        platform: Platform::Jumia,
        title: "Tecno Spark 10".to_string(),
        url: "https://www.jumia.com.ng/tecno.html".to_string(),
        price: "₦ 145,000".to_string(),
        discount: "-18%".to_string(),
        rating: "4.3".to_string(),
        reviews: "312".to_string(),
    }
    .stamp(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
    let before = record.clone();

    let metrics = normalize_record(&record);

    assert_eq!(
        metrics,
        RecordMetrics {
            price: Some(145_000.0),
            discount_pct: 18.0,
            rating: Some(4.3),
            reviews: 312,
        }
    );
    assert_eq!(record, before);
}

#[test]
fn normalize_record_with_sentinels() {
    let record = ScrapedProduct {
        platform: Platform::Ebay,
        title: NOT_FOUND.to_string(),
        url: "https://www.ebay.com/itm/1".to_string(),
        price: NOT_FOUND.to_string(),
        discount: DEFAULT_DISCOUNT.to_string(),
        rating: NOT_FOUND.to_string(),
        reviews: DEFAULT_REVIEWS.to_string(),
    }
    .stamp(Utc::now());
    let metrics = normalize_record(&record);
    assert_eq!(metrics.price, None);
    assert_eq!(metrics.rating, None);
    assert_eq!(metrics.reviews, 0);
    assert!(metrics.discount_pct.abs() < f64::EPSILON);
}
