#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use pagemeter_core::error::ErrorKind;
use pagemeter_core::{Counter, Registry};
use pagemeter_server::bindings::{normalize_path, RouteBindings};
use pagemeter_server::pages::{render::render, time_in_colombo};

#[test]
fn normalize() {
    assert_eq!(normalize_path(""), "/");
    assert_eq!(normalize_path("/"), "/");
    assert_eq!(normalize_path("//"), "/");
    assert_eq!(normalize_path("/gandalf"), "/gandalf");
    assert_eq!(normalize_path("/gandalf/"), "/gandalf");
}

#[test]
fn binding_to_missing_counter_fails_validation() {
    let mut reg = Registry::new();
    reg.register(Counter::for_requests("node_gandalf_request_total", "x").unwrap())
        .unwrap();

    let mut b = RouteBindings::new();
    b.bind("/gandalf", "node_gandalf_request_total").unwrap();
    assert!(b.validate(&reg).is_ok());

    b.bind("/colombo", "node_colombo_request_total").unwrap();
    let err = b.validate(&reg).expect_err("colombo counter missing");
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn lookup_is_exact() {
    let mut b = RouteBindings::new();
    b.bind("/gandalf/", "g_total").unwrap();
    assert_eq!(b.lookup("/gandalf"), Some("g_total"));
    assert_eq!(b.lookup("/gandalf/x"), None);
    assert_eq!(b.lookup("/unknown"), None);
    assert!(b.bind("/gandalf", "other_total").is_err());
    assert_eq!(b.len(), 1);
}

#[test]
fn render_substitutes_and_escapes() {
    let out = render("<p>{{ a }}|{{b}}|{{ missing }}</p>", &[("a", "x<y"), ("b", "\"q\"")]);
    assert_eq!(out, "<p>x&lt;y|&quot;q&quot;|{{ missing }}</p>");
    assert_eq!(render("no placeholders", &[]), "no placeholders");
    assert_eq!(render("open {{ only", &[("only", "v")]), "open {{ only");
}

#[test]
fn colombo_is_utc_plus_five_thirty() {
    use chrono::{TimeZone, Utc};
    let now = Utc.with_ymd_and_hms(2026, 10, 14, 9, 34, 5).unwrap();
    assert_eq!(time_in_colombo(now).unwrap(), "10/14/2026, 3:04:05 PM");
}
