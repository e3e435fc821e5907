use super::*;

#[test]
fn new_history_is_empty() {
    let history = History::new(HistoryMode::Web);
    assert!(history.current().is_none());
    assert!(history.location().is_none());
    assert!(!history.can_go_back());
    assert!(!history.can_go_forward());
}

#[test]
fn push_moves_to_new_entry() {
    let mut history = History::new(HistoryMode::Web);
    history.push("/");
    history.push("/chat");
    assert_eq!(history.current(), Some("/chat"));
    assert_eq!(history.index(), 1);
    assert!(history.can_go_back());
}

#[test]
fn push_after_back_truncates_forward_entries() {
    let mut history = History::new(HistoryMode::Web);
    history.push("/");
    history.push("/chat");
    history.push("/calendar");
    let (idx, path) = history.peek(-1).unwrap();
    let path = path.to_string();
    assert!(history.set_index(idx, &path));

    history.push("/phone");
    assert_eq!(history.entries(), ["/", "/chat", "/phone"]);
    assert!(!history.can_go_forward());
}

#[test]
fn peek_past_either_end_is_none() {
    let mut history = History::new(HistoryMode::Web);
    history.push("/");
    assert!(history.peek(-1).is_none());
    assert!(history.peek(1).is_none());
    assert_eq!(history.peek(0), Some((0, "/")));
}

#[test]
fn replace_overwrites_current_entry() {
    let mut history = History::new(HistoryMode::Web);
    history.push("/");
    history.push("/chat");
    history.replace("/settings");
    assert_eq!(history.entries(), ["/", "/settings"]);
    assert_eq!(history.index(), 1);
}

#[test]
fn replace_on_empty_history_pushes() {
    let mut history = History::new(HistoryMode::Web);
    history.replace("/");
    assert_eq!(history.entries(), ["/"]);
}

#[test]
fn set_index_rejects_stale_target() {
    let mut history = History::new(HistoryMode::Web);
    history.push("/");
    history.push("/chat");
    assert!(!history.set_index(0, "/chat"));
    assert!(!history.set_index(5, "/"));
    assert_eq!(history.index(), 1);
}

// =============================================================================
// Modes and locations
// =============================================================================

#[test]
fn web_location_is_clean_path() {
    let mut history = History::new(HistoryMode::Web);
    history.push("/chat");
    assert_eq!(history.location().as_deref(), Some("/chat"));
}

#[test]
fn hash_location_uses_fragment() {
    let mut history = History::new(HistoryMode::Hash);
    history.push("/chat");
    assert_eq!(history.location().as_deref(), Some("#/chat"));
}

#[test]
fn parse_location_accepts_both_forms() {
    assert_eq!(parse_location("/chat"), "/chat");
    assert_eq!(parse_location("#/chat"), "/chat");
    assert_eq!(parse_location("/chat?tab=2"), "/chat");
    assert_eq!(parse_location("/chat#top"), "/chat");
    assert_eq!(parse_location("calendar"), "/calendar");
    assert_eq!(parse_location(""), "/");
    assert_eq!(parse_location("#"), "/");
}

#[test]
fn history_mode_parses_and_displays() {
    assert_eq!("web".parse::<HistoryMode>(), Ok(HistoryMode::Web));
    assert_eq!("hash".parse::<HistoryMode>(), Ok(HistoryMode::Hash));
    assert_eq!("memory".parse::<HistoryMode>(), Err("memory".to_string()));
    assert_eq!(HistoryMode::Hash.to_string(), "hash");
    assert_eq!(HistoryMode::default(), HistoryMode::Web);
}
