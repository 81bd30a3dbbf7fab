//! End-to-end tests for the composer: dedup protocol and load/store bridge.

use std::cell::RefCell;
use std::rc::Rc;

use canvas_composer::{
    Collaborators, Composer, ComposerConfig, ComposerError, LoadOutcome, RuleListener, RuleStore,
};
use canvas_model::{Channel, RuleKey, Selector, StoredPayload};
use canvas_persistence::{
    FileStorage, MemoryStorage, PersistenceError, StorageConfig, StorageManager,
};
use proptest::prelude::*;
use tempfile::tempdir;

fn classes(names: &[&str]) -> Vec<Selector> {
    names.iter().map(|name| Selector::class(*name)).collect()
}

fn plain() -> Composer {
    Composer::init(ComposerConfig::default(), Collaborators::new()).unwrap()
}

fn with_storage(storage: impl StorageManager + 'static) -> Composer {
    Composer::init(
        ComposerConfig::default(),
        Collaborators::new().with_storage(storage),
    )
    .unwrap()
}

fn keys(composer: &Composer) -> Vec<RuleKey> {
    composer.get_all().iter().map(|rule| rule.key()).collect()
}

/// Populates a composer with a mix of plain, stateful and responsive rules.
fn populate(composer: &mut Composer) {
    composer
        .add(&classes(&["btn"]), None, None)
        .set_style("color", "red");
    composer
        .add(&classes(&["btn"]), Some("hover"), Some("480px"))
        .set_style("color", "blue");
    let card = [Selector::id("main"), Selector::class("card")];
    let rule = composer.add(&card, None, Some("768px"));
    rule.set_style("margin", "0 auto");
    rule.set_style("padding", "4px");
}

struct FailingStorage;

impl StorageManager for FailingStorage {
    fn config(&self) -> StorageConfig {
        StorageConfig {
            autoload: false,
            ..StorageConfig::default()
        }
    }

    fn store(&mut self, _payload: &StoredPayload) {}

    fn load_cached(&self) -> canvas_persistence::Result<StoredPayload> {
        Err(PersistenceError::Unavailable {
            reason: "backend offline".to_string(),
        })
    }
}

/// Records the rule count of every collection it is subscribed to.
struct RecordingListener(Rc<RefCell<Vec<usize>>>);

impl RuleListener for RecordingListener {
    fn listen_rules(&mut self, rules: &RuleStore) {
        self.0.borrow_mut().push(rules.len());
    }
}

#[test]
fn add_is_idempotent() {
    let mut composer = plain();
    let selectors = classes(&["a", "b"]);

    let first: *const _ = composer.add(&selectors, Some("hover"), None);
    let second: *const _ = composer.add(&selectors, Some("hover"), None);
    assert_eq!(first, second);
    assert_eq!(composer.get_all().len(), 1);
}

#[test]
fn selector_order_is_irrelevant_to_identity() {
    let mut composer = plain();
    composer.add(&classes(&["a", "b"]), Some(""), Some(""));
    composer.add(&classes(&["b", "a"]), Some(""), Some(""));
    assert_eq!(composer.get_all().len(), 1);
}

#[test]
fn missing_state_and_width_equal_empty() {
    let mut composer = plain();
    composer.add(&classes(&["x"]), None, None);
    composer.add(&classes(&["x"]), Some(""), Some(""));
    assert_eq!(composer.get_all().len(), 1);
    assert!(composer.get(&classes(&["x"]), Some(""), None).is_some());
}

#[test]
fn hover_button_scenario() {
    let mut composer = plain();
    let btn = classes(&["btn"]);

    let created: *const _ = composer.add(&btn, Some("hover"), Some("480px"));
    assert_eq!(composer.get_all().len(), 1);

    let found = composer.get(&btn, Some("hover"), Some("480px")).unwrap();
    assert!(std::ptr::eq(found, created));
    assert!(composer.get(&btn, Some(""), Some("480px")).is_none());
}

#[test]
fn no_subset_or_superset_matching() {
    let mut composer = plain();
    composer.add(&classes(&["a", "b"]), None, None);
    assert!(composer.get(&classes(&["a"]), None, None).is_none());
    assert!(composer.get(&classes(&["a", "b", "c"]), None, None).is_none());
    assert!(composer.get(&[Selector::id("a"), Selector::class("b")], None, None).is_none());
}

#[test]
fn style_channel_round_trip_is_exact() {
    let mut source = with_storage(MemoryStorage::new(StorageConfig {
        store_css: false,
        ..StorageConfig::default()
    }));
    populate(&mut source);
    let payload = source.store(true).unwrap().unwrap();

    let mut target = plain();
    let outcome = target.load(Some(payload)).unwrap();
    assert_eq!(outcome.channel(), Some(Channel::Style));
    assert_eq!(target.get_all(), source.get_all());
}

#[test]
fn css_channel_round_trip_preserves_identity() {
    let mut source = with_storage(MemoryStorage::new(StorageConfig {
        store_styles: false,
        ..StorageConfig::default()
    }));
    populate(&mut source);
    let payload = source.store(true).unwrap().unwrap();

    let mut target = plain();
    let outcome = target.load(Some(payload)).unwrap();
    assert_eq!(outcome.channel(), Some(Channel::Css));

    let mut expected = keys(&source);
    let mut actual = keys(&target);
    expected.sort();
    actual.sort();
    assert_eq!(actual, expected);
}

#[test]
fn css_channel_round_trip_keeps_values_with_separators() {
    let mut source = with_storage(MemoryStorage::new(StorageConfig {
        store_styles: false,
        ..StorageConfig::default()
    }));
    let hero = source.add(&classes(&["hero"]), None, Some("480px"));
    hero.set_style("background-image", "url(data:image/png;base64,AAAA)");
    hero.set_style("content", "\"a;b}\"");
    let payload = source.store(true).unwrap().unwrap();

    let mut target = plain();
    target.load(Some(payload)).unwrap();
    let rule = target
        .get(&classes(&["hero"]), None, Some("480px"))
        .unwrap();
    assert_eq!(rule.style, source.get_all()[0].style);
    assert_eq!(
        rule.style.get("background-image").map(String::as_str),
        Some("url(data:image/png;base64,AAAA)")
    );
}

#[test]
fn css_channel_round_trip_keeps_unstyled_rules() {
    let mut source = with_storage(MemoryStorage::new(StorageConfig {
        store_styles: false,
        ..StorageConfig::default()
    }));
    populate(&mut source);
    source.add(&classes(&["placeholder"]), Some("focus"), Some("768px"));
    let payload = source.store(true).unwrap().unwrap();

    let mut target = plain();
    target.load(Some(payload)).unwrap();
    assert_eq!(target.get_all().len(), source.get_all().len());
    let rule = target
        .get(&classes(&["placeholder"]), Some("focus"), Some("768px"))
        .unwrap();
    assert!(rule.style.is_empty());
}

#[test]
fn corrupt_styles_degrade_to_empty() {
    let mut composer = plain();
    populate(&mut composer);

    let outcome = composer
        .load(Some(StoredPayload::from_styles("not json")))
        .unwrap();
    assert!(outcome.is_degraded());
    assert!(outcome.descriptors().is_empty());
    assert!(composer.get_all().is_empty());
}

#[test]
fn wrong_descriptor_shape_degrades() {
    let mut composer = plain();
    for styles in [
        r#"{"selectors":["a"]}"#,
        r#"[{"selectors":"a"}]"#,
        r#"[{"selectors":["a"],"style":{"top":0}}]"#,
        r#"[{"selectors":[""]}]"#,
    ] {
        let outcome = composer
            .load(Some(StoredPayload::from_styles(styles)))
            .unwrap();
        assert!(outcome.is_degraded(), "expected degraded load for {styles}");
    }
}

#[test]
fn css_parse_errors_propagate_and_keep_rules() {
    let mut composer = plain();
    populate(&mut composer);
    let before = composer.get_all().clone();

    let result = composer.load(Some(StoredPayload::from_css(".btn{color:red;")));
    assert!(matches!(result, Err(ComposerError::Parse(_))));
    assert_eq!(composer.get_all(), &before);
}

#[test]
fn styles_take_precedence_over_css() {
    let mut composer = plain();
    let payload = StoredPayload {
        css: Some(".from-css{top:0;}".to_string()),
        styles: Some(r#"[{"selectors":["from-styles"]}]"#.to_string()),
    };
    composer.load(Some(payload)).unwrap();
    assert!(composer.get(&classes(&["from-styles"]), None, None).is_some());
    assert!(composer.get(&classes(&["from-css"]), None, None).is_none());
}

#[test]
fn empty_payload_clears_rules() {
    let mut composer = plain();
    populate(&mut composer);
    assert_eq!(
        composer.load(Some(StoredPayload::default())).unwrap(),
        LoadOutcome::Empty
    );
    assert!(composer.get_all().is_empty());
}

#[test]
fn channel_gating() {
    let mut composer = with_storage(MemoryStorage::new(StorageConfig {
        store_css: true,
        store_styles: false,
        ..StorageConfig::default()
    }));
    populate(&mut composer);

    let payload = composer.store(false).unwrap().unwrap();
    assert!(payload.contains(Channel::Css));
    assert!(!payload.contains(Channel::Style));
    assert_eq!(composer.storage_key(), vec![Channel::Css]);
}

#[test]
fn storage_read_errors_propagate() {
    let mut composer = with_storage(FailingStorage);
    let result = composer.load(None);
    assert!(matches!(result, Err(ComposerError::Storage(_))));
}

#[test]
fn autoload_at_init_failure_propagates() {
    let storage = MemoryStorage::new(StorageConfig::default())
        .with_cached(StoredPayload::from_css("div{color:red}"));
    let result = Composer::init(
        ComposerConfig::default(),
        Collaborators::new().with_storage(storage),
    );
    assert!(matches!(result, Err(ComposerError::Parse(_))));
}

#[test]
fn autoload_replaces_initial_rules() {
    let storage = MemoryStorage::new(StorageConfig::default())
        .with_cached(StoredPayload::from_styles(r##"[{"selectors":["#main"]}]"##));
    let composer = Composer::init(
        ComposerConfig::with_css(".initial{top:0;}"),
        Collaborators::new().with_storage(storage),
    )
    .unwrap();

    assert_eq!(composer.get_all().len(), 1);
    assert!(composer.get(&[Selector::id("main")], None, None).is_some());
}

#[test]
fn listener_subscribed_only_in_autosave_mode() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let storage = MemoryStorage::new(StorageConfig::default())
        .with_cached(StoredPayload::from_styles(r#"[{"selectors":["a"]}]"#));
    Composer::init(
        ComposerConfig::default(),
        Collaborators::new()
            .with_storage(storage)
            .with_listener(RecordingListener(Rc::clone(&calls))),
    )
    .unwrap();
    assert_eq!(*calls.borrow(), vec![1]);

    let calls = Rc::new(RefCell::new(Vec::new()));
    let storage = MemoryStorage::new(StorageConfig {
        autosave: false,
        ..StorageConfig::default()
    });
    Composer::init(
        ComposerConfig::default(),
        Collaborators::new()
            .with_storage(storage)
            .with_listener(RecordingListener(Rc::clone(&calls))),
    )
    .unwrap();
    assert!(calls.borrow().is_empty());

    let calls = Rc::new(RefCell::new(Vec::new()));
    Composer::init(
        ComposerConfig::default(),
        Collaborators::new().with_listener(RecordingListener(Rc::clone(&calls))),
    )
    .unwrap();
    assert!(calls.borrow().is_empty());
}

#[test]
fn file_storage_round_trip_across_instances() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("styles.json");

    let mut first = with_storage(FileStorage::new(&path));
    populate(&mut first);
    first.store(false).unwrap();

    let second = with_storage(FileStorage::new(&path));
    assert_eq!(second.get_all(), first.get_all());
}

#[test]
fn rendered_css_snapshot() {
    let mut composer = plain();
    populate(&mut composer);
    composer.add(&classes(&["empty"]), None, None);
    insta::assert_snapshot!(composer.render(), @r"
    .btn{color:red;}
    .empty{}
    @media (max-width: 480px){
    .btn:hover{color:blue;}
    }
    @media (max-width: 768px){
    #main.card{margin:0 auto;padding:4px;}
    }
    ");
}

proptest! {
    #[test]
    fn add_twice_grows_store_by_at_most_one(
        names in prop::collection::vec("[a-z][a-z0-9]{0,4}", 0..5),
        state in "(|hover|focus)",
        width in "(|480px|768px)",
    ) {
        let mut composer = plain();
        let selectors: Vec<Selector> = names.iter().map(|name| Selector::class(name.as_str())).collect();
        let state = (!state.is_empty()).then_some(state.as_str());
        let width = (!width.is_empty()).then_some(width.as_str());

        let first: *const _ = composer.add(&selectors, state, width);
        let second: *const _ = composer.add(&selectors, state, width);
        prop_assert_eq!(first, second);
        prop_assert_eq!(composer.get_all().len(), 1);
    }
}
