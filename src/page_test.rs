use super::*;

#[test]
fn static_page_renders_its_view() {
    let page = StaticPage::new(PageView::new("Chat").line("Messages"));
    let view = page.render();
    assert_eq!(view.title, "Chat");
    assert_eq!(view.body, vec!["Messages".to_string()]);
}

#[test]
fn into_module_shares_one_instance() {
    let module = StaticPage::new(PageView::new("Home")).into_module();
    let other = Arc::clone(&module);
    assert!(Arc::ptr_eq(&module, &other));
    assert_eq!(other.render().title, "Home");
}

#[test]
fn manifest_body_defaults_to_empty() {
    let manifest: PageManifest = serde_json::from_str(r#"{"title":"Phone"}"#).unwrap();
    assert_eq!(manifest.title, "Phone");
    assert!(manifest.body.is_empty());
}

#[test]
fn manifest_rejects_missing_title() {
    let result: Result<PageManifest, _> = serde_json::from_str(r#"{"body":["x"]}"#);
    assert!(result.is_err());
}

#[test]
fn not_found_view_mentions_path() {
    let view = not_found_view("/missing");
    assert_eq!(view.title, "Page not found");
    assert!(view.body[0].contains("/missing"));
}
