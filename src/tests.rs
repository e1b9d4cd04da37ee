use crate::*;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use std::collections::HashMap;

#[derive(Debug, PartialEq)]
struct Person {
    age: u32,
}

fn when(f: impl Fn(&Person) -> bool + Send + Sync + 'static) -> Option<Condition<Person>> {
    Some(Arc::new(
        move |ctx: &ItemContext<'_, Person>| -> Result<bool, ConditionError> { Ok(f(ctx.item())) },
    ))
}

fn label(prefix: &'static str) -> RenderFn<Person, String> {
    Arc::new(move |ctx: &ItemContext<'_, Person>| format!("{prefix}:{}", ctx.item().age))
}

fn decl() -> TemplateDeclaration<Person, String> {
    TemplateDeclaration::new()
}

fn people() -> TemplateRegistry<Person, String> {
    let mut r = TemplateRegistry::new();
    r.register("adult", when(|p| p.age >= 18), label("adult"));
    r.register("default", None, label("default"));
    r
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct MockView {
    container: u32,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("mock render failed on `{0}`")]
struct MockError(String);

/// Applies trees to containers only when flushed.
#[derive(Default)]
struct MockEngine {
    next_container: u32,
    realized: HashMap<u32, String>,
    pending: Vec<(u32, String)>,
    mounts: usize,
    updates: usize,
    flushes: usize,
    fail_on: Option<String>,
}

impl MockEngine {
    fn render(&mut self, tree: String, container: u32) -> Result<MockView, MockError> {
        if self.fail_on.as_deref() == Some(tree.as_str()) {
            return Err(MockError(tree));
        }
        self.pending.push((container, tree));
        Ok(MockView { container })
    }

    fn content(&self, view: &MockView) -> Option<&str> {
        self.realized.get(&view.container).map(String::as_str)
    }
}

impl RenderEngine for MockEngine {
    type Tree = String;
    type Container = u32;
    type View = MockView;
    type ViewId = u32;
    type Error = MockError;

    fn create_container(&mut self) -> u32 {
        self.next_container += 1;
        self.next_container
    }

    fn mount(&mut self, tree: String, container: &mut u32) -> Result<MockView, MockError> {
        self.mounts += 1;
        self.render(tree, *container)
    }

    fn update(&mut self, tree: String, container: &mut u32) -> Result<MockView, MockError> {
        self.updates += 1;
        self.render(tree, *container)
    }

    fn flush_pending_updates(&mut self) {
        self.flushes += 1;
        for (container, tree) in self.pending.drain(..) {
            self.realized.insert(container, tree);
        }
    }

    fn view_id(&self, view: &MockView) -> u32 {
        view.container
    }
}

#[derive(Default)]
struct MockHost {
    templates: Vec<KeyedTemplate>,
}

impl ListHost for MockHost {
    fn set_item_templates(&mut self, templates: Vec<KeyedTemplate>) {
        self.templates = templates;
    }
}

fn bridge_with(
    declare: impl FnOnce(&mut TemplateScope<'_, Person, String>),
) -> (ListBridge<Person, MockEngine>, MockHost) {
    let mut builder: ListBuilder<Person, MockEngine> = ListBridge::builder(BridgeOptions::new());
    declare(&mut builder.scope());
    let mut host = MockHost::default();
    let bridge = builder.finish(&mut host);
    (bridge, host)
}

#[test]
fn context_exposes_bindings_under_configured_names() {
    let names = ContextNames::default();
    let p = Person { age: 3 };
    let ctx = ItemContext::build(&p, 4, &names);
    assert!(ctx.is_even());
    assert!(!ctx.is_odd());
    assert!(matches!(ctx.get("item"), Some(ContextValue::Item(q)) if q.age == 3));
    assert_eq!(ctx.get("index"), Some(ContextValue::Index(4)));
    assert_eq!(ctx.get(EVEN_NAME), Some(ContextValue::Flag(true)));
    assert_eq!(ctx.get(ODD_NAME), Some(ContextValue::Flag(false)));
    assert_eq!(ctx.get("row"), None);

    let names = ContextNames::new("row", "$index");
    let ctx = ItemContext::build(&p, 7, &names);
    assert!(ctx.is_odd());
    assert!(matches!(ctx.get("row"), Some(ContextValue::Item(_))));
    assert_eq!(ctx.get("$index"), Some(ContextValue::Index(7)));
    assert_eq!(ctx.get("item"), None);
}

#[test]
fn selects_adult_and_default() {
    let r = people();
    let names = ContextNames::default();
    let items = [Person { age: 10 }, Person { age: 25 }];
    let selected: Vec<&str> = items
        .iter()
        .enumerate()
        .map(|(i, p)| select(&r, &ItemContext::build(p, i, &names), DEFAULT_TEMPLATE))
        .collect();
    assert_eq!(selected, vec!["default", "adult"]);
}

#[test]
fn first_registered_condition_wins() {
    let mut r = TemplateRegistry::new();
    r.register("teen", when(|p| p.age >= 13), label("teen"));
    r.register("adult", when(|p| p.age >= 18), label("adult"));
    r.register("default", None, label("default"));

    let names = ContextNames::default();
    for (i, age) in [30, 5, 40, 14].into_iter().enumerate() {
        let p = Person { age };
        let got = select(&r, &ItemContext::build(&p, i, &names), DEFAULT_TEMPLATE);
        let want = if age >= 13 { "teen" } else { "default" };
        assert_eq!(got, want);
    }
}

#[test]
fn failing_condition_is_a_non_match() {
    let mut r = TemplateRegistry::new();
    r.register(
        "broken",
        Some(Arc::new(
            |_: &ItemContext<'_, Person>| -> Result<bool, ConditionError> {
                Err(ConditionError::new("no such field"))
            },
        )),
        label("broken"),
    );
    r.register(
        "panicky",
        Some(Arc::new(
            |_: &ItemContext<'_, Person>| -> Result<bool, ConditionError> { panic!("boom") },
        )),
        label("panicky"),
    );
    r.register("adult", when(|p| p.age >= 18), label("adult"));

    let names = ContextNames::default();
    let adult = Person { age: 20 };
    let child = Person { age: 2 };
    assert_eq!(
        select(&r, &ItemContext::build(&adult, 0, &names), DEFAULT_TEMPLATE),
        "adult"
    );
    assert_eq!(
        select(&r, &ItemContext::build(&child, 1, &names), DEFAULT_TEMPLATE),
        DEFAULT_TEMPLATE
    );
}

#[test]
fn unconditional_named_template_is_never_selected() {
    let mut r = TemplateRegistry::new();
    r.register("header", None, label("header"));
    let names = ContextNames::default();
    let p = Person { age: 1 };
    assert_eq!(
        select(&r, &ItemContext::build(&p, 0, &names), "fallback"),
        "fallback"
    );
}

#[test]
fn registry_replaces_in_place_and_keeps_order() {
    let mut r = people();
    r.register("kid", when(|p| p.age < 12), label("kid"));
    r.register("adult", when(|p| p.age >= 21), label("adult21"));

    assert_eq!(r.len(), 3);
    assert_eq!(r.names(), vec!["adult", "default", "kid"]);
    assert_eq!(
        r.keyed_templates(),
        vec![
            KeyedTemplate::new("adult"),
            KeyedTemplate::new("default"),
            KeyedTemplate::new("kid"),
        ]
    );
    assert_eq!(r.keyed_template("kid"), Some(KeyedTemplate::new("kid")));
    assert_eq!(r.keyed_template("nope"), None);
    assert!(r.get("kid").unwrap().has_condition());
    assert!(!r.get("default").unwrap().has_condition());
    assert!(r.get("default").unwrap().condition().is_none());

    let names = ContextNames::default();
    let p = Person { age: 19 };
    let ctx = ItemContext::build(&p, 0, &names);
    assert_eq!(select(&r, &ctx, DEFAULT_TEMPLATE), DEFAULT_TEMPLATE);
    assert_eq!(r.get("adult").unwrap().render(&ctx), "adult21:19");
    assert_eq!(
        r.get("nope").unwrap_err(),
        TemplateNotFound {
            name: "nope".to_string()
        }
    );
}

#[test]
fn scope_resolves_declaration_names() {
    let mut builder: ListBuilder<Person, MockEngine> = ListBridge::builder(BridgeOptions::new());
    {
        let mut scope = builder.scope();
        let a = scope.declare(
            decl()
                .with_if(|ctx| ctx.item().age > 60)
                .with_render(|_| "senior".to_string()),
        );
        let b = scope.declare(
            decl()
                .with_name("even")
                .with_if(|ctx| ctx.is_even())
                .with_render(|_| "even".to_string()),
        );
        let c = scope.declare(decl().with_render(|_| "plain".to_string()));
        let d = scope.declare(decl().with_name("nothing"));

        let mut nested = scope.child();
        let e = nested.declare(
            decl()
                .with_if(|ctx| ctx.index() == 0)
                .with_render(|_| "first".to_string()),
        );

        assert_eq!(a.as_deref(), Some("v-template-0"));
        assert_eq!(b.as_deref(), Some("even"));
        assert_eq!(c.as_deref(), Some("default"));
        assert_eq!(d, None);
        assert_eq!(e.as_deref(), Some("v-template-1"));
    }
    assert_eq!(
        builder.registry().names(),
        vec!["v-template-0", "even", "default", "v-template-1"]
    );
}

#[test]
fn finish_hands_keyed_templates_to_host() {
    let (bridge, host) = bridge_with(|scope| {
        scope.declare(
            decl()
                .with_name("adult")
                .with_if(|ctx| ctx.item().age >= 18)
                .with_render(|ctx| format!("adult:{}", ctx.item().age)),
        );
        scope.declare(
            decl().with_render(|ctx| format!("default:{}", ctx.item().age)),
        );
    });
    assert_eq!(
        host.templates,
        vec![KeyedTemplate::new("adult"), KeyedTemplate::new("default")]
    );
    assert_eq!(bridge.template_for(&Person { age: 40 }, 0), "adult");
    assert_eq!(bridge.template_for(&Person { age: 4 }, 1), "default");
}

#[test]
fn patch_binds_empty_slot_then_reuses_its_container() {
    let r = people();
    let names = ContextNames::default();
    let mut engine = MockEngine::default();
    let mut slots: SlotManager<MockEngine> = SlotManager::new();

    let slot = slots.allocate();
    assert_eq!(slot.index(), 0);
    assert_eq!(slots.slot(slot), Some(&ViewSlot::Empty));

    let kid = Person { age: 10 };
    let view = slots
        .patch(&mut engine, &r, "default", &ItemContext::build(&kid, 0, &names), slot)
        .unwrap();
    assert!(slots.slot(slot).unwrap().is_bound());
    assert_eq!(slots.slot(slot).unwrap().template(), Some("default"));
    assert_eq!(engine.content(&view), Some("default:10"));
    let container = *slots.slot(slot).unwrap().container().unwrap();

    let grown = Person { age: 25 };
    let reused = slots
        .patch(&mut engine, &r, "adult", &ItemContext::build(&grown, 1, &names), slot)
        .unwrap();
    assert_eq!(slots.slot(slot).unwrap().container(), Some(&container));
    assert_eq!(slots.slot(slot).unwrap().template(), Some("adult"));
    assert_eq!(engine.content(&reused), Some("adult:25"));
    assert_eq!((engine.mounts, engine.updates), (1, 1));
    assert_eq!(slots.recover(&engine, &reused), Some(slot));
}

#[test]
fn every_patch_path_flushes() {
    let r = people();
    let names = ContextNames::default();
    let mut engine = MockEngine::default();
    let mut slots: SlotManager<MockEngine> = SlotManager::new();
    let p = Person { age: 30 };
    let ctx = ItemContext::build(&p, 0, &names);

    let slot = slots.allocate();
    slots.patch(&mut engine, &r, "adult", &ctx, slot).unwrap();
    assert_eq!(engine.flushes, 1);
    assert!(engine.pending.is_empty());

    slots.patch(&mut engine, &r, "adult", &ctx, slot).unwrap();
    assert_eq!(engine.flushes, 2);

    let err = slots.patch(&mut engine, &r, "ghost", &ctx, slot).unwrap_err();
    assert!(matches!(err, PatchError::TemplateMissing { ref name } if name == "ghost"));
    assert_eq!(engine.flushes, 3);

    engine.fail_on = Some("adult:30".to_string());
    let fresh = slots.allocate();
    let err = slots.patch(&mut engine, &r, "adult", &ctx, fresh).unwrap_err();
    assert!(matches!(err, PatchError::Render(MockError(_))));
    assert_eq!(engine.flushes, 4);
    assert_eq!(slots.slot(fresh), Some(&ViewSlot::Empty));
}

#[test]
fn patch_rejects_foreign_slot() {
    let r = people();
    let names = ContextNames::default();
    let mut engine = MockEngine::default();
    let mut slots: SlotManager<MockEngine> = SlotManager::new();
    let p = Person { age: 1 };
    let err = slots
        .patch(&mut engine, &r, "default", &ItemContext::build(&p, 0, &names), SlotId(9))
        .unwrap_err();
    assert!(matches!(err, PatchError::UnknownSlot(9)));
}

#[test]
fn bridge_recycles_views_through_their_slots() {
    let (mut bridge, _) = bridge_with(|scope| {
        scope.declare(
            decl()
                .with_name("adult")
                .with_if(|ctx| ctx.item().age >= 18)
                .with_render(|ctx| format!("adult:{}", ctx.item().age)),
        );
        scope.declare(
            decl().with_render(|ctx| format!("default:{}", ctx.item().age)),
        );
    });
    let mut engine = MockEngine::default();

    let first = bridge
        .on_slot_needed(&mut engine, &Person { age: 10 }, 0, None)
        .unwrap();
    assert_eq!(engine.content(&first), Some("default:10"));
    assert_eq!(bridge.slots().len(), 1);

    let again = bridge
        .on_slot_needed(&mut engine, &Person { age: 25 }, 7, Some(&first))
        .unwrap();
    assert_eq!(again, first);
    assert_eq!(engine.content(&again), Some("adult:25"));
    assert_eq!(bridge.slots().len(), 1);

    let stranger = MockView { container: 99 };
    let other = bridge
        .on_slot_needed(&mut engine, &Person { age: 5 }, 8, Some(&stranger))
        .unwrap();
    assert_ne!(other, first);
    assert_eq!(bridge.slots().len(), 2);
}

#[test]
fn failed_requests_do_not_leave_empty_slots() {
    let (mut bridge, _) = bridge_with(|scope| {
        scope.declare(decl().with_render(|ctx| format!("default:{}", ctx.item().age)));
    });
    let mut engine = MockEngine::default();
    engine.fail_on = Some("default:1".to_string());

    for index in 0..5 {
        let err = bridge
            .on_slot_needed(&mut engine, &Person { age: 1 }, index, None)
            .unwrap_err();
        assert!(matches!(err, BridgeError::Patch(PatchError::Render(_))));
    }
    assert_eq!(bridge.slots().len(), 0);

    let view = bridge
        .on_slot_needed(&mut engine, &Person { age: 2 }, 5, None)
        .unwrap();
    assert_eq!(bridge.slots().len(), 1);

    // A view nobody recognises gets a fresh slot; it is dropped again when the patch fails.
    let stranger = MockView { container: 77 };
    assert!(
        bridge
            .on_slot_needed(&mut engine, &Person { age: 1 }, 6, Some(&stranger))
            .is_err()
    );
    assert_eq!(bridge.slots().len(), 1);

    // A known, bound slot survives a failed re-render.
    assert!(
        bridge
            .on_slot_needed(&mut engine, &Person { age: 1 }, 7, Some(&view))
            .is_err()
    );
    assert_eq!(bridge.slots().len(), 1);
    assert!(bridge.slots().slot(SlotId(0)).unwrap().is_bound());
}

#[test]
fn release_unbound_only_drops_the_trailing_empty_slot() {
    let r = people();
    let names = ContextNames::default();
    let mut engine = MockEngine::default();
    let mut slots: SlotManager<MockEngine> = SlotManager::new();
    let p = Person { age: 4 };

    let bound = slots.allocate();
    slots
        .patch(&mut engine, &r, "default", &ItemContext::build(&p, 0, &names), bound)
        .unwrap();
    assert!(!slots.release_unbound(bound));

    let first = slots.allocate();
    let second = slots.allocate();
    assert!(!slots.release_unbound(first));
    assert!(slots.release_unbound(second));
    assert!(slots.release_unbound(first));
    assert_eq!(slots.len(), 1);
}

#[test]
fn render_failure_is_not_fatal_to_the_list() {
    let (mut bridge, _) = bridge_with(|scope| {
        scope.declare(decl().with_render(|ctx| format!("default:{}", ctx.item().age)));
    });
    let mut engine = MockEngine::default();
    engine.fail_on = Some("default:13".to_string());

    let err = bridge
        .on_slot_needed(&mut engine, &Person { age: 13 }, 0, None)
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Patch(PatchError::Render(MockError(ref tree))) if tree == "default:13"
    ));
    assert!(!bridge.is_failed());

    let view = bridge
        .on_slot_needed(&mut engine, &Person { age: 14 }, 1, None)
        .unwrap();
    assert_eq!(engine.content(&view), Some("default:14"));
    assert!(!bridge.is_failed());
}

#[test]
fn missing_template_fails_the_list() {
    let (mut bridge, _) = bridge_with(|scope| {
        scope.declare(
            decl()
                .with_name("adult")
                .with_if(|ctx| ctx.item().age >= 18)
                .with_render(|_| "adult".to_string()),
        );
    });
    let mut engine = MockEngine::default();

    let ok = bridge.on_slot_needed(&mut engine, &Person { age: 30 }, 0, None);
    assert!(ok.is_ok());
    assert!(!bridge.is_failed());

    let err = bridge
        .on_slot_needed(&mut engine, &Person { age: 3 }, 1, None)
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Patch(PatchError::TemplateMissing { ref name }) if name == "default"
    ));
    assert!(bridge.is_failed());

    let flushes = engine.flushes;
    let err = bridge
        .on_slot_needed(&mut engine, &Person { age: 30 }, 2, None)
        .unwrap_err();
    assert!(matches!(err, BridgeError::Failed { ref name } if name == "default"));
    assert_eq!(engine.flushes, flushes + 1);
}

#[test]
fn custom_default_and_names_flow_into_templates() {
    let options = BridgeOptions::new()
        .with_alias("person")
        .with_index_name("$index")
        .with_default_template("fallback");
    let mut builder: ListBuilder<Person, MockEngine> = ListBridge::builder(options);
    let name = builder.scope().declare(decl().with_render(|ctx| {
        match (ctx.get("person"), ctx.get("$index")) {
            (Some(ContextValue::Item(p)), Some(ContextValue::Index(i))) => {
                format!("{i}:{}", p.age)
            }
            _ => String::from("unbound"),
        }
    }));
    assert_eq!(name.as_deref(), Some("fallback"));

    let mut bridge = builder.finish(&mut MockHost::default());
    let mut engine = MockEngine::default();
    let view = bridge
        .on_slot_needed(&mut engine, &Person { age: 8 }, 3, None)
        .unwrap();
    assert_eq!(engine.content(&view), Some("3:8"));
}

#[cfg(feature = "serde")]
#[test]
fn item_context_serializes_as_bindings() {
    let names = ContextNames::new("n", "i");
    let ctx = ItemContext::build(&5u32, 1, &names);
    let json = serde_json::to_value(ctx).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "n": 5, "i": 1, "$even": false, "$odd": true })
    );
}
