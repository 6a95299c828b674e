use super::*;

// -----------------------------------------------------------------------
// collapse_whitespace
// -----------------------------------------------------------------------

#[test]
fn collapse_whitespace_joins_runs() {
    assert_eq!(collapse_whitespace("  Angry \n\t Birds   2 "), "Angry Birds 2");
}

#[test]
fn collapse_whitespace_empty_stays_empty() {
    assert_eq!(collapse_whitespace(" \n "), "");
}

#[test]
fn remove_line_breaks_keeps_spaces() {
    assert_eq!(remove_line_breaks("\n\tGreat app\n"), "Great app");
    assert_eq!(remove_line_breaks("a  b"), "a  b");
}

#[test]
fn text_or_not_found_uses_sentinel() {
    assert_eq!(text_or_not_found(None), "Not Found");
    assert_eq!(text_or_not_found(Some("x".to_owned())), "x");
}

// -----------------------------------------------------------------------
// paid_from_pricing_text
// -----------------------------------------------------------------------

#[test]
fn free_pricing_is_not_paid() {
    assert!(!paid_from_pricing_text("Free"));
    assert!(!paid_from_pricing_text("Free with In-App Purchases"));
}

#[test]
fn priced_app_is_paid() {
    assert!(paid_from_pricing_text("$2.99"));
}

#[test]
fn free_check_is_case_sensitive() {
    assert!(paid_from_pricing_text("free"));
}

// -----------------------------------------------------------------------
// category_id_from_url
// -----------------------------------------------------------------------

#[test]
fn category_id_from_genre_url() {
    assert_eq!(
        category_id_from_url("https://itunes.apple.com/us/genre/ios-shopping/id6024?mt=8"),
        "6024"
    );
}

#[test]
fn category_id_without_id_prefix_is_kept() {
    assert_eq!(
        category_id_from_url("https://itunes.apple.com/us/genre/ios-shopping/6024"),
        "6024"
    );
}

#[test]
fn category_id_short_path_is_na() {
    assert_eq!(
        category_id_from_url("https://itunes.apple.com/us/genre"),
        CATEGORY_ID_FALLBACK
    );
}

#[test]
fn category_id_empty_segment_is_na() {
    assert_eq!(
        category_id_from_url("https://itunes.apple.com/us/genre/ios-shopping/"),
        "na"
    );
}

#[test]
fn category_id_without_genre_path_is_na() {
    assert_eq!(category_id_from_url("Not Found"), "na");
    assert_eq!(category_id_from_url("/us/genre/"), "na");
}

#[test]
fn category_id_from_relative_href() {
    assert_eq!(category_id_from_url("/us/genre/ios-shopping/id6024"), "6024");
    assert_eq!(
        category_id_from_url("/us/genre/ios-shopping/id6024?mt=8#top"),
        "6024"
    );
}

// -----------------------------------------------------------------------
// geo_and_app_id
// -----------------------------------------------------------------------

#[test]
fn geo_and_app_id_from_detail_url() {
    let (geo, id) = geo_and_app_id("https://itunes.apple.com/us/app/some-app/id123456789?mt=8");
    assert_eq!(geo.as_deref(), Some("us"));
    assert_eq!(id.as_deref(), Some("123456789"));
}

#[test]
fn geo_without_app_id_on_short_path() {
    let (geo, id) = geo_and_app_id("https://itunes.apple.com/gb/app");
    assert_eq!(geo.as_deref(), Some("gb"));
    assert!(id.is_none());
}

#[test]
fn geo_and_app_id_malformed_url() {
    assert_eq!(geo_and_app_id("not a url"), (None, None));
}

// -----------------------------------------------------------------------
// review_count_from_label
// -----------------------------------------------------------------------

#[test]
fn review_count_from_well_formed_label() {
    assert_eq!(
        review_count_from_label("4.5 stars, 1,234 Ratings").as_deref(),
        Some("1,234")
    );
}

#[test]
fn review_count_small_number() {
    assert_eq!(
        review_count_from_label("3 stars, 17 Ratings").as_deref(),
        Some("17")
    );
}

#[test]
fn review_count_unset_without_ratings_word() {
    assert!(review_count_from_label("4.5 stars, 1,234 reviews").is_none());
}

#[test]
fn review_count_unset_without_comma() {
    assert!(review_count_from_label("1234 Ratings").is_none());
}

#[test]
fn review_count_unset_for_sentinel() {
    assert!(review_count_from_label(NOT_FOUND).is_none());
}

// -----------------------------------------------------------------------
// rating_count_from_text / rating_value_from_text
// -----------------------------------------------------------------------

#[test]
fn rating_count_strips_suffix_and_separators() {
    assert_eq!(rating_count_from_text("1,234 Ratings"), 1234);
    assert_eq!(rating_count_from_text(" 56 Ratings "), 56);
}

#[test]
fn rating_count_garbage_is_zero() {
    assert_eq!(rating_count_from_text("1.2K Ratings"), 0);
    assert_eq!(rating_count_from_text(""), 0);
}

#[test]
fn rating_value_parses_leading_number() {
    assert!((rating_value_from_text("4.5") - 4.5).abs() < f64::EPSILON);
    assert!((rating_value_from_text("4.7 out of 5") - 4.7).abs() < f64::EPSILON);
}

#[test]
fn rating_value_garbage_is_zero() {
    assert!(rating_value_from_text("n/a").abs() < f64::EPSILON);
}

// -----------------------------------------------------------------------
// join_delimited
// -----------------------------------------------------------------------

#[test]
fn join_delimited_in_app_purchases() {
    let entries = vec![vec!["Gem Pack", "$0.99"], vec!["Coin Chest", "$4.99"]];
    assert_eq!(
        join_delimited(entries, INAPP_ITEM_SEP, INAPP_FIELD_SEP),
        "Gem Pack $0.99||Coin Chest $4.99||"
    );
}

#[test]
fn join_delimited_single_field_entries() {
    let hrefs = [["https://a"], ["https://b"]];
    assert_eq!(
        join_delimited(hrefs, ALSO_BOUGHT_SEP, ""),
        "https://a||https://b||"
    );
}

#[test]
fn join_delimited_reviews() {
    let reviews = [["5 stars", "Love it"], ["1 star", "Crashes"]];
    assert_eq!(
        join_delimited(reviews, REVIEW_ITEM_SEP, REVIEW_FIELD_SEP),
        "5 stars:Love it|1 star:Crashes|"
    );
}

#[test]
fn join_delimited_no_entries_is_empty() {
    let none: Vec<Vec<String>> = Vec::new();
    assert_eq!(join_delimited(none, "||", " "), "");
}

// -----------------------------------------------------------------------
// standardize_label
// -----------------------------------------------------------------------

#[test]
fn standardize_label_lowercases_and_underscores() {
    assert_eq!(standardize_label("Family Sharing"), "family_sharing");
    assert_eq!(standardize_label("  Game  Center \n"), "game_center");
}
