use objcdecl::entries::{load_entries, RoundTrip, Summary};
use objcdecl::parser::ast::Decl;
use objcdecl::parser::{parse, Hint};
use objcdecl::topic::{is_skippable, Topic, TopicKind};
use std::fs;
use std::path::Path;

#[test]
fn test_demo_file_round_trips() {
    let path = Path::new("demos/appkit.txt");
    let text = fs::read_to_string(path).expect("Failed to read demo file");

    let entries = load_entries(&text).expect("Loading failed");
    let summary = Summary::of(&entries);

    for entry in entries.iter().filter(|e| e.is_failure()) {
        println!("line {}: {} -> {:?}", entry.line, entry.source, entry.result);
    }
    assert_eq!(summary.total, 24);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.exact + summary.equivalent, 23);

    let skipped: Vec<_> = entries.iter().filter(|e| e.is_skipped()).collect();
    assert!(skipped[0].source.contains("NS_ENUM"));
}

#[test]
fn test_demo_labels_select_hints() {
    let text = fs::read_to_string(Path::new("demos/appkit.txt")).expect("Failed to read demo file");
    let entries = load_entries(&text).expect("Loading failed");

    let labeled: Vec<_> = entries.iter().filter(|e| e.kind.is_some()).collect();
    assert_eq!(labeled.len(), 4);
    assert_eq!(labeled[0].hint(), Hint::EnumCase);
    assert_eq!(labeled[1].hint(), Hint::Variable);
    assert!(labeled[2..].iter().all(|e| e.hint() == Hint::Function));
    assert!(labeled.iter().all(|e| e.result.is_ok()));
}

#[test]
fn test_json_topics() {
    let text = r#"[
        {
            "Path": "documentation/appkit/nswindow/1419672-close",
            "Title": "close",
            "Type": "Instance Method",
            "Description": "Removes the window from the screen.",
            "Declaration": "- (void)close;"
        },
        {
            "Title": "NSWindowDidResizeNotification",
            "Type": "Global Variable",
            "Declaration": "NSNotificationName const NSWindowDidResizeNotification;"
        },
        {
            "Title": "NSBackingStoreRetained",
            "Type": "enumeration case",
            "Declaration": "NSBackingStoreRetained = 0"
        }
    ]"#;

    let topics: Vec<Topic> = serde_json::from_str(text).expect("Invalid topics");
    assert_eq!(topics[0].topic_kind(), Some(TopicKind::InstanceMethod));
    assert_eq!(topics[1].hint(), Hint::Variable);
    assert_eq!(topics[2].hint(), Hint::EnumCase);
    assert_eq!(topics[1].path, "");
    for topic in &topics {
        let stmt = topic.parse().expect("Topic failed to parse");
        assert!(matches!(stmt.decl, Decl::Method(_) | Decl::Variable(_)));
    }

    let entries = load_entries(text).expect("Loading failed");
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].round_trip, RoundTrip::Exact);
    assert_eq!(entries[2].canonical.as_deref(), Some("NSBackingStoreRetained = 0;"));
    assert_eq!(entries[2].round_trip, RoundTrip::Equivalent);
}

#[test]
fn test_unlabeled_bare_declarations_fail() {
    let entries = load_entries("NSString *NSStringFromClass(Class aClass);\n").expect("Loading failed");
    assert!(entries[0].is_failure());
    assert_eq!(entries[0].round_trip, RoundTrip::NotParsed);
}

#[test]
fn test_function_label_covers_const_return() {
    let text = "Function\tconst char *NSGetSizeAndAlignment(const char *typePtr, NSUInteger *sizep, ...);\n";
    let entries = load_entries(text).expect("Loading failed");
    assert!(!entries[0].is_failure(), "{:?}", entries[0].result);
    assert_eq!(entries[0].round_trip, RoundTrip::Exact);
}

#[test]
fn test_skip_policy() {
    let skippable = ["typedef NS_ENUM(NSInteger, NSFoo);", "typedef - (void)close;"];
    for source in skippable {
        let err = parse(source).unwrap_err();
        assert!(is_skippable(&err), "{} should be skippable: {}", source, err);
    }

    let fatal = ["@property (sticky) id value;", "- (void)close", "@end"];
    for source in fatal {
        let err = parse(source).unwrap_err();
        assert!(!is_skippable(&err), "{} should fail: {}", source, err);
    }
}
