// Integration tests for the declaration parser and canonical printer

use objcdecl::entries::collapse_whitespace;
use objcdecl::parser::ast::*;
use objcdecl::parser::{parse, parse_with_hint, Hint, ParseError};

/// Declarations already in canonical form: printing their parse gives them back.
const CANONICAL: &[&str] = &[
    "- (void)setValue:(id)value forKey:(NSString *)key;",
    "+ (instancetype)alloc;",
    "+ (instancetype)arrayWithObjects:(id)firstObj, ...;",
    "- (nullable instancetype)initWithCoder:(NSCoder *)coder;",
    "- (BOOL)writeToURL:(NSURL *)url error:(NSError * _Nullable * _Nullable)error;",
    "- (BOOL)getValue:(NSError ** _Nullable)error;",
    "- (BOOL)getResourceValue:(id *)value forKey:(NSURLResourceKey)key;",
    "- (void)enumerateObjectsUsingBlock:(void (^)(ObjectType obj, NSUInteger idx, BOOL *stop))block;",
    "- (oneway void)release;",
    "- (unsigned long long)fileSize;",
    "- (__kindof NSView *)makeViewWithIdentifier:(NSUserInterfaceItemIdentifier)identifier owner:(nullable id)owner;",
    "@property (nonatomic, readonly, nullable) NSString *name;",
    "@property (class, readonly) NSApplication *sharedApplication;",
    "@property (weak) id<NSWindowDelegate> delegate;",
    "@property (copy, getter=isEnabled, setter=setEnabled:) BOOL enabled;",
    "@property (copy) void (^completionHandler)(NSError *error);",
    "@property NSArray<NSDictionary<NSString *, id> *> *items;",
    "@property (readonly) const char *UTF8String;",
    "@interface NSWindow : NSResponder",
    "@interface NSArray<__covariant ObjectType> : NSObject <NSCopying, NSSecureCoding>",
    "@interface NSObject <NSObject>",
    "@protocol NSWindowDelegate <NSObject>",
    "@protocol NSCoding",
    "enum Color { Red, Green = 1, Blue };",
    "enum : NSUInteger { NSFoo = 1 << 0, NSBar = 1 << 1 };",
    "struct CGPoint { CGFloat x; CGFloat y; };",
    "const CGFloat NSFontWeightBold;",
    "typedef NSString *NSNotificationName;",
    "typedef void (^NSHandler)(BOOL success);",
    "typedef int (*NSCompareFunc)(const void *, const void *);",
    "typedef enum NSEventType : NSUInteger { NSEventTypeLeftMouseDown = 1 } NSEventType;",
    "typedef struct _NSRange { NSUInteger location; NSUInteger length; } NSRange;",
    "typedef const struct __CFString *CFStringRef;",
];

fn canonical(source: &str) -> String {
    parse(source)
        .unwrap_or_else(|e| panic!("{} failed: {}", source, e))
        .to_string()
}

#[test]
fn test_round_trip() {
    for source in CANONICAL {
        assert_eq!(canonical(source), collapse_whitespace(source), "round trip of {}", source);
    }
}

#[test]
fn test_round_trip_ignores_whitespace() {
    let spaced = "-   (void)setValue:(id)value\n\tforKey:(NSString *)key;";
    assert_eq!(
        canonical(spaced),
        "- (void)setValue:(id)value forKey:(NSString *)key;"
    );
}

#[test]
fn test_idempotence() {
    let loose = [
        "@property(strong,nonatomic)NSString*title;",
        "-(NSError**)lastError;",
        "@property (assign, readwrite) NSInteger count;",
        "typedef enum{A=1,B}Letters;",
        "struct{int a;}",
        "@interface NSMutableArray<ObjectType>:NSArray<ObjectType>",
    ];
    for source in loose.iter().chain(CANONICAL) {
        let once = canonical(source);
        let twice = canonical(&once);
        assert_eq!(once, twice, "idempotence of {}", source);
        assert_eq!(parse(&once).unwrap(), parse(source).unwrap(), "tree of {}", source);
    }
}

#[test]
fn test_determinism() {
    for source in CANONICAL {
        assert_eq!(parse(source).unwrap(), parse(source).unwrap());
    }
}

#[test]
fn test_method_alignment() {
    for source in CANONICAL.iter().filter(|s| s.starts_with(['-', '+'])) {
        let Decl::Method(m) = parse(source).unwrap().decl else {
            panic!("Expected method for {}", source);
        };
        let n = m.fixed_args().len();
        if n > 0 {
            assert_eq!(m.name_parts.len(), n, "{}", source);
        } else {
            assert_eq!(m.name_parts.len(), 1, "{}", source);
            assert!(m.args.is_empty());
        }
    }
}

#[test]
fn test_scenario_instance_method() {
    let stmt = parse("- (void)setValue:(id)value forKey:(NSString *)key;").unwrap();
    let Decl::Method(m) = stmt.decl else {
        panic!("Expected method");
    };
    assert!(!m.is_class);
    assert_eq!(m.return_type, TypeInfo::named("void"));
    assert_eq!(m.name_parts, vec!["setValue", "forKey"]);
    assert_eq!(
        m.args,
        vec![
            ArgInfo::new(TypeInfo::named("id"), "value"),
            ArgInfo::new(TypeInfo::named("NSString").with_pointer(), "key"),
        ]
    );
}

#[test]
fn test_scenario_class_method() {
    let Decl::Method(m) = parse("+ (instancetype)alloc;").unwrap().decl else {
        panic!("Expected method");
    };
    assert!(m.is_class);
    assert!(m.args.is_empty());
    assert_eq!(m.name_parts, vec!["alloc"]);
    assert!(!m.variadic);
}

#[test]
fn test_scenario_property() {
    let Decl::Property(p) = parse("@property (nonatomic, readonly, nullable) NSString *name;")
        .unwrap()
        .decl
    else {
        panic!("Expected property");
    };
    let attrs: Vec<(PropertyAttr, AttrValue)> = p.attrs.into_iter().collect();
    assert_eq!(
        attrs,
        vec![
            (PropertyAttr::Nonatomic, AttrValue::Flag),
            (PropertyAttr::Readonly, AttrValue::Flag),
            (PropertyAttr::Nullable, AttrValue::Flag),
        ]
    );
    assert_eq!(p.ty, TypeInfo::named("NSString").with_pointer());
    assert_eq!(p.name, "name");
}

#[test]
fn test_scenario_enum() {
    let Decl::Enum(e) = parse("enum Color { Red, Green = 1, Blue };").unwrap().decl else {
        panic!("Expected enum");
    };
    let cases: Vec<(&str, Option<&str>)> = e
        .cases
        .iter()
        .map(|c| (c.name.as_str(), c.value.as_deref()))
        .collect();
    assert_eq!(cases, vec![("Red", None), ("Green", Some("1")), ("Blue", None)]);
    assert!(e.cases.iter().all(|c| c.ty.is_none()));
}

#[test]
fn test_scenario_variadic_method() {
    let Decl::Method(m) = parse("- (void)appendFormat:(NSString *)format, ...;").unwrap().decl else {
        panic!("Expected method");
    };
    assert!(m.variadic);
    let last = m.args.last().unwrap();
    assert_eq!(last.name.as_deref(), Some("..."));
    assert!(last.ty.is_none());
}

#[test]
fn test_nested_generics_boundary() {
    let source = "@property NSArray<NSDictionary<NSString *, id> *> *items;";
    let Decl::Property(p) = parse(source).unwrap().decl else {
        panic!("Expected property");
    };
    let expected = TypeInfo::named("NSArray")
        .with_param(
            TypeInfo::named("NSDictionary")
                .with_param(TypeInfo::named("NSString").with_pointer())
                .with_param(TypeInfo::named("id"))
                .with_pointer(),
        )
        .with_pointer();
    assert_eq!(p.ty, expected);
    assert_eq!(p.ty.to_string(), "NSArray<NSDictionary<NSString *, id> *> *");
}

#[test]
fn test_typedef_alias_names() {
    let stmt = parse("typedef void (^NSHandler)(BOOL success);").unwrap();
    assert!(stmt.is_typedef());
    assert_eq!(stmt.typedef, None);
    assert_eq!(stmt.alias_name(), Some("NSHandler"));

    let stmt = parse("typedef enum Foo : NSInteger { A } Foo;").unwrap();
    assert!(matches!(stmt.decl, Decl::Enum(_)));
    assert_eq!(stmt.alias_name(), Some("Foo"));

    let stmt = parse("typedef enum Foo Bar;").unwrap();
    match &stmt.decl {
        Decl::TypeAlias(ty) => assert_eq!(ty.name(), Some("enum Foo")),
        other => panic!("Expected type alias, got {:?}", other),
    }
    assert_eq!(stmt.alias_name(), Some("Bar"));
}

#[test]
fn test_hinted_round_trips() {
    let cases = [
        (Hint::EnumCase, "NSWindowStyleMaskTitled = 1 << 0;"),
        (Hint::EnumCase, "NSCompositeClear;"),
        (Hint::Variable, "NSNotificationName const NSWindowDidResizeNotification;"),
        (Hint::Variable, "NSString * const NSAppKitVersionString;"),
        (Hint::Function, "void NSBeep(void);"),
        (Hint::Function, "NSString *NSStringFromClass(Class aClass);"),
        (Hint::Function, "void NSLog(NSString *format, ...);"),
        (Hint::Function, "CGFloat NSWidth(NSRect aRect);"),
        (Hint::Function, "const char *NSGetSizeAndAlignment(const char *typePtr, NSUInteger *sizep, ...);"),
    ];
    for (hint, source) in cases {
        let stmt = parse_with_hint(source, hint).unwrap_or_else(|e| panic!("{}: {}", source, e));
        assert_eq!(stmt.to_string(), source);
        assert_eq!(parse_with_hint(&stmt.to_string(), hint).unwrap(), stmt);
    }
}

#[test]
fn test_errors_carry_positions() {
    let err = parse("- (void)setValue:(id)value forKey (id)key;").unwrap_err();
    assert_eq!(err.location(), SourceLocation::new(1, 35));
    assert!(err.to_string().contains("found '('"));

    let err = parse("- (NSArray<NSString *)items;").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));

    let err = parse("- (NSArray<NSString *").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedGroup { delimiter: '>', .. }));

    let err = parse("enum Color { Red, Green").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedGroup { delimiter: '}', .. }));

    let err = parse("@property (copy id name;").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { .. }));

    let err = parse("@property (nonatomic, zippy) id name;").unwrap_err();
    assert!(matches!(err, ParseError::UnrecognizedAttribute { .. }));

    let err = parse("enum Color { Red,").unwrap_err();
    assert!(matches!(err, ParseError::UnterminatedGroup { delimiter: '}', .. }));

    let err = parse("").unwrap_err();
    assert!(matches!(err, ParseError::UnknownStartToken { .. }));
}

#[test]
fn test_parse_across_threads() {
    let handles: Vec<_> = CANONICAL
        .iter()
        .map(|source| std::thread::spawn(move || canonical(source)))
        .collect();
    for (handle, source) in handles.into_iter().zip(CANONICAL) {
        assert_eq!(handle.join().unwrap(), *source);
    }
}
