use super::*;
use crate::loader::test_helpers::static_route;

fn table(routes: &[(&str, &str)]) -> Result<RouteTable, RouteTableError> {
    RouteTable::new(routes.iter().map(|(path, name)| static_route(path, name)).collect())
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_returns_exact_match() {
    let table = table(&[("/", "home"), ("/chat", "chat")]).unwrap();
    assert_eq!(table.resolve("/chat").unwrap().name(), "chat");
    assert_eq!(table.resolve("/").unwrap().name(), "home");
}

#[test]
fn resolve_unregistered_path_is_none() {
    let table = table(&[("/", "home"), ("/chat", "chat")]).unwrap();
    assert!(table.resolve("/missing").is_none());
}

#[test]
fn resolve_is_exact_not_prefix() {
    let table = table(&[("/", "home"), ("/chat", "chat")]).unwrap();
    assert!(table.resolve("/chat/").is_none());
    assert!(table.resolve("/chat/1").is_none());
    assert!(table.resolve("/CHAT").is_none());
}

#[test]
fn every_registered_route_resolves_to_itself() {
    let table = table(&[("/", "home"), ("/chat", "chat"), ("/calendar", "calendar"), ("/phone", "phone")]).unwrap();
    for route in table.iter() {
        let resolved = table.resolve(route.path()).unwrap();
        assert_eq!(resolved.name(), route.name());
    }
}

#[test]
fn home_is_root_route() {
    let table = table(&[("/chat", "chat"), ("/", "home")]).unwrap();
    assert_eq!(table.home().name(), "home");
    assert_eq!(table.home().path(), HOME_PATH);
}

// =============================================================================
// Validation
// =============================================================================

#[test]
fn empty_table_rejected() {
    assert_eq!(RouteTable::new(Vec::new()).unwrap_err(), RouteTableError::Empty);
}

#[test]
fn duplicate_name_rejected() {
    let err = table(&[("/", "home"), ("/chat", "home")]).unwrap_err();
    assert_eq!(err, RouteTableError::DuplicateName("home".into()));
}

#[test]
fn duplicate_path_rejected() {
    let err = table(&[("/", "home"), ("/", "landing")]).unwrap_err();
    assert_eq!(err, RouteTableError::DuplicatePath("/".into()));
}

#[test]
fn relative_path_rejected() {
    let err = table(&[("/", "home"), ("chat", "chat")]).unwrap_err();
    assert_eq!(err, RouteTableError::InvalidPath("chat".into()));
}

#[test]
fn missing_home_rejected() {
    let err = table(&[("/chat", "chat")]).unwrap_err();
    assert_eq!(err, RouteTableError::MissingHome);
}

// =============================================================================
// Lookup helpers
// =============================================================================

#[test]
fn by_name_and_registered() {
    let table = table(&[("/", "home"), ("/chat", "chat")]).unwrap();
    assert_eq!(table.by_name("chat").unwrap().path(), "/chat");
    assert!(table.by_name("phone").is_none());
    let lookalike = static_route("/chat", "chat");
    let registered = table.registered(&lookalike).unwrap();
    assert!(std::ptr::eq(registered, table.by_name("chat").unwrap()));
    assert!(table.registered(&static_route("/talk", "chat")).is_none());
    assert_eq!(table.len(), 2);
    assert!(!table.is_empty());
}

#[test]
fn debug_omits_loader() {
    let route = static_route("/chat", "chat");
    let text = format!("{route:?}");
    assert!(text.contains("/chat"));
    assert!(text.contains("chat"));
}
