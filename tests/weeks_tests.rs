use classtop::models::weeks::{MAX_WEEK, WeekSet};

fn weeks(v: &[u32]) -> WeekSet {
    v.iter().copied().collect()
}

#[test]
fn parse_ranges_and_singletons() {
    assert_eq!(WeekSet::parse("1-3,5"), weeks(&[1, 2, 3, 5]));
    assert_eq!(WeekSet::parse(" 2 , 1-2 ,4"), weeks(&[1, 2, 4]));
    assert_eq!(WeekSet::parse("10"), weeks(&[10]));
}

#[test]
fn parse_is_permissive() {
    assert_eq!(WeekSet::parse("1,x,3"), weeks(&[1, 3]));
    assert_eq!(WeekSet::parse("5-3"), WeekSet::every_week());
    assert_eq!(WeekSet::parse("a-3,4"), weeks(&[4]));
    assert_eq!(WeekSet::parse(""), WeekSet::every_week());
    assert_eq!(WeekSet::parse(",,"), WeekSet::every_week());
}

#[test]
fn format_collapses_runs() {
    assert_eq!(weeks(&[1, 2, 3, 5, 7, 8]).to_string(), "1-3,5,7-8");
    assert_eq!(weeks(&[4]).to_string(), "4");
    assert_eq!(WeekSet::every_week().to_string(), "");
}

#[test]
fn format_then_parse_is_identity() {
    for set in [
        weeks(&[1, 2, 3, 4, 5, 6, 7, 8, 10]),
        weeks(&[2, 4, 6, 8]),
        weeks(&[16]),
        WeekSet::every_week(),
    ] {
        assert_eq!(WeekSet::parse(&set.to_string()), set);
    }
}

#[test]
fn storage_form_is_a_json_array() {
    let set = weeks(&[3, 1, 2]);
    assert_eq!(set.to_json(), "[1,2,3]");
    assert_eq!(WeekSet::from_json("[1,2,3]"), set);
    assert_eq!(WeekSet::from_json("not json"), WeekSet::every_week());
}

#[test]
fn empty_set_matches_every_week() {
    assert!(WeekSet::every_week().includes(1));
    assert!(WeekSet::every_week().includes(17));
    assert!(weeks(&[1, 3]).includes(3));
    assert!(!weeks(&[1, 3]).includes(2));
}

#[test]
fn tokens_past_the_last_week_are_skipped() {
    assert_eq!(WeekSet::parse("1-4294967295,3"), weeks(&[3]));
    assert_eq!(WeekSet::parse("2,61,99999999999999999999"), weeks(&[2]));
    assert_eq!(WeekSet::parse(&format!("{}", MAX_WEEK)).len(), 1);

    assert_eq!(WeekSet::out_of_range("1-8,70-2"), Some(70));
    assert_eq!(WeekSet::out_of_range("1-8,x,9-2"), None);
}
