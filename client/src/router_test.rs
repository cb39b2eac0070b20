use super::*;

use std::rc::Rc;

use crate::state::storage::MemoryStorage;

fn route(path: &str) -> &'static Route {
    Router::new().resolve(path).unwrap()
}

// =============================================================
// guard
// =============================================================

#[test]
fn protected_routes_redirect_to_entry_without_token() {
    for r in ROUTES.iter().filter(|r| r.requires_auth) {
        assert_eq!(guard(r, None), Navigation::Redirect("/"), "route {}", r.path);
        assert_eq!(guard(r, Some("")), Navigation::Redirect("/"), "route {}", r.path);
    }
}

#[test]
fn entry_redirects_to_landing_with_token() {
    assert_eq!(guard(route("/"), Some("abc123")), Navigation::Redirect("/employees"));
}

#[test]
fn entry_is_allowed_without_token() {
    assert_eq!(guard(route("/"), None), Navigation::Allow);
}

#[test]
fn protected_routes_allowed_with_token() {
    assert_eq!(guard(route("/employees"), Some("abc123")), Navigation::Allow);
    assert_eq!(guard(route("/positions"), Some("abc123")), Navigation::Allow);
}

// =============================================================
// Router
// =============================================================

#[test]
fn resolve_ignores_trailing_slash_query_and_fragment() {
    let router = Router::new();
    assert_eq!(router.resolve("/positions/").map(|r| r.name), Some("positions"));
    assert_eq!(router.resolve("/employees?cursor=x").map(|r| r.name), Some("employees"));
    assert_eq!(router.resolve("/#top").map(|r| r.name), Some("login"));
    assert_eq!(router.resolve("").map(|r| r.name), Some("login"));
    assert!(router.resolve("/payroll").is_none());
}

#[test]
fn by_name_finds_routes() {
    let router = Router::new();
    assert_eq!(router.by_name("employees").map(|r| r.view), Some(View::Employees));
    assert!(router.by_name("missing").is_none());
}

#[test]
fn navigate_to_positions_without_token_lands_on_entry() {
    let outcome = Router::new().navigate_with_token("/positions", None);
    assert_eq!(outcome.route().map(|r| r.path), Some("/"));
    assert_eq!(
        outcome,
        RouteOutcome::Arrived { route: route("/"), redirected_from: Some("/positions".to_owned()) }
    );
}

#[test]
fn navigate_to_entry_with_token_lands_on_employees() {
    let outcome = Router::new().navigate_with_token("/", Some("abc123"));
    assert_eq!(outcome.route().map(|r| r.path), Some("/employees"));
    assert!(outcome.was_redirected());
}

#[test]
fn navigate_allowed_route_is_not_redirected() {
    let outcome = Router::new().navigate_with_token("/positions", Some("abc123"));
    assert_eq!(outcome.route().map(|r| r.view), Some(View::Positions));
    assert!(!outcome.was_redirected());
}

#[test]
fn navigate_unknown_path_is_not_found() {
    let outcome = Router::new().navigate_with_token("/payroll", Some("abc123"));
    assert_eq!(outcome, RouteOutcome::NotFound { path: "/payroll".to_owned() });
}

#[test]
fn navigate_reads_session_token() {
    let session = SessionStore::new(Rc::new(MemoryStorage::with_entry("token", "abc123")), "token");
    let outcome = Router::new().navigate("/", &session);
    assert_eq!(outcome.route().map(|r| r.path), Some("/employees"));

    session.logout();
    let outcome = Router::new().navigate("/employees", &session);
    assert_eq!(outcome.route().map(|r| r.path), Some("/"));
}
