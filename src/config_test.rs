use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = Config::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.channel, "default");
    assert!(cfg.session.leave_on_cancel);
}

#[test]
fn reads_overrides() {
    let cfg = Config::from_lookup(lookup_from(&[
        ("DRAGBOARD_CHANNEL", "kanban"),
        ("DRAGBOARD_LEAVE_ON_CANCEL", "false"),
    ]))
    .unwrap();
    assert_eq!(cfg.channel, "kanban");
    assert!(!cfg.session.leave_on_cancel);
}

#[test]
fn rejects_blank_channel() {
    let err = Config::from_lookup(lookup_from(&[("DRAGBOARD_CHANNEL", "  ")])).unwrap_err().to_string();
    assert!(err.contains("DRAGBOARD_CHANNEL"));
}

#[test]
fn rejects_unparseable_leave_flag() {
    let err = Config::from_lookup(lookup_from(&[("DRAGBOARD_LEAVE_ON_CANCEL", "maybe")])).unwrap_err().to_string();
    assert!(err.contains("invalid DRAGBOARD_LEAVE_ON_CANCEL: maybe"));
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert!(parse_bool("K", Some("1"), false).unwrap());
    assert!(parse_bool("K", Some(" yes "), false).unwrap());
    assert!(!parse_bool("K", Some("off"), true).unwrap());
    assert!(parse_bool("K", None, true).unwrap());
    assert!(!parse_bool("K", Some(""), false).unwrap());
}
