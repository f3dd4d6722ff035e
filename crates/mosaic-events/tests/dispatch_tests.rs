//! Integration tests for delegated event dispatch
//!
//! These tests run the ancestor walk against an in-memory element tree:
//! 1. A declaration on an ancestor catches events from its descendants
//! 2. The nearest declaration wins
//! 3. The walk stops at the root
//! 4. Unknown handler names are ignored

use mosaic_events::{Delegator, DispatchOutcome, DomNode, HandlerRegistry};
use rstest::{fixture, rstest};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct MockElement {
	attrs: HashMap<String, String>,
	parent: Option<MockNode>,
}

#[derive(Clone)]
struct MockNode(Rc<MockElement>);

impl MockNode {
	fn new(parent: Option<&MockNode>, attrs: &[(&str, &str)]) -> Self {
		Self(Rc::new(MockElement {
			attrs: attrs
				.iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
			parent: parent.cloned(),
		}))
	}
}

impl DomNode for MockNode {
	fn attribute(&self, name: &str) -> Option<String> {
		self.0.attrs.get(name).cloned()
	}

	fn parent(&self) -> Option<Self> {
		self.0.parent.clone()
	}

	fn same_node(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.0, &other.0)
	}
}

#[derive(Debug, Clone, PartialEq)]
struct MockEvent {
	kind: &'static str,
	id: u32,
}

/// `body > #root > main > form[data-submit=post-submit] > div > button`
struct Page {
	body: MockNode,
	root: MockNode,
	form: MockNode,
	button: MockNode,
	nav_link: MockNode,
}

#[fixture]
fn page() -> Page {
	let body = MockNode::new(None, &[("data-submit", "outside-root")]);
	let root = MockNode::new(Some(&body), &[("id", "root")]);
	let main = MockNode::new(Some(&root), &[]);
	let form = MockNode::new(Some(&main), &[("data-submit", "post-submit")]);
	let wrapper = MockNode::new(Some(&form), &[]);
	let button = MockNode::new(Some(&wrapper), &[("type", "submit")]);
	let nav_link = MockNode::new(Some(&main), &[("href", "/profile"), ("data-click", "navigate")]);
	Page {
		body,
		root,
		form,
		button,
		nav_link,
	}
}

fn recording_registry() -> (Rc<HandlerRegistry<MockEvent>>, Rc<RefCell<Vec<(String, MockEvent)>>>) {
	let registry = Rc::new(HandlerRegistry::new());
	let calls = Rc::new(RefCell::new(Vec::new()));
	for name in ["post-submit", "navigate", "outside-root"] {
		let calls = Rc::clone(&calls);
		registry.register(name, move |event: &MockEvent| {
			calls.borrow_mut().push((name.to_string(), event.clone()));
		});
	}
	(registry, calls)
}

#[rstest]
fn test_submit_on_descendant_reaches_declared_handler_once(page: Page) {
	let (registry, calls) = recording_registry();
	let delegator = Delegator::new(registry);
	let event = MockEvent {
		kind: "submit",
		id: 1,
	};

	let outcome = delegator.dispatch("submit", page.button.clone(), &page.root, &event);

	assert_eq!(
		outcome,
		DispatchOutcome::Handled {
			handler: "post-submit".into()
		}
	);
	assert_eq!(*calls.borrow(), vec![("post-submit".to_string(), event)]);
	assert_eq!(calls.borrow()[0].1.kind, "submit");
}

#[rstest]
fn test_declaration_on_target_itself(page: Page) {
	let (registry, calls) = recording_registry();
	let delegator = Delegator::new(registry);
	let event = MockEvent {
		kind: "submit",
		id: 2,
	};

	assert!(
		delegator
			.dispatch("submit", page.form.clone(), &page.root, &event)
			.is_handled()
	);
	assert_eq!(calls.borrow().len(), 1);
}

#[rstest]
fn test_event_type_selects_attribute(page: Page) {
	let (registry, calls) = recording_registry();
	let delegator = Delegator::new(registry);
	let click = MockEvent {
		kind: "click",
		id: 3,
	};

	// The button sits inside a form that only declares a submit handler.
	let outcome = delegator.dispatch("click", page.button.clone(), &page.root, &click);
	assert_eq!(outcome, DispatchOutcome::Unmatched);

	let outcome = delegator.dispatch("click", page.nav_link.clone(), &page.root, &click);
	assert_eq!(
		outcome,
		DispatchOutcome::Handled {
			handler: "navigate".into()
		}
	);
	assert_eq!(calls.borrow()[0].0, "navigate");
}

#[rstest]
fn test_walk_stops_at_root(page: Page) {
	let (registry, calls) = recording_registry();
	let delegator = Delegator::new(registry);
	let event = MockEvent {
		kind: "submit",
		id: 4,
	};

	// `body` declares a handler, but it lies above the root.
	let outcome = delegator.dispatch("submit", page.root.clone(), &page.root, &event);

	assert_eq!(outcome, DispatchOutcome::Unmatched);
	assert!(calls.borrow().is_empty());
	assert!(page.body.attribute("data-submit").is_some());
}

#[rstest]
fn test_unknown_handler_is_ignored(page: Page) {
	let registry = Rc::new(HandlerRegistry::<MockEvent>::new());
	let delegator = Delegator::new(registry);
	let event = MockEvent {
		kind: "submit",
		id: 5,
	};

	let outcome = delegator.dispatch("submit", page.button.clone(), &page.root, &event);

	assert_eq!(
		outcome,
		DispatchOutcome::UnknownHandler {
			handler: "post-submit".into()
		}
	);
}

#[rstest]
fn test_nearest_declaration_wins() {
	let root = MockNode::new(None, &[("data-click", "outer")]);
	let inner = MockNode::new(Some(&root), &[("data-click", "inner")]);
	let leaf = MockNode::new(Some(&inner), &[]);
	let delegator = Delegator::<MockEvent>::new(Rc::new(HandlerRegistry::new()));

	assert_eq!(
		delegator.find_declaration("click", leaf, &root).as_deref(),
		Some("inner")
	);
	assert_eq!(
		delegator.find_declaration("click", root.clone(), &root).as_deref(),
		Some("outer")
	);
}

#[rstest]
fn test_custom_prefix(page: Page) {
	let root = MockNode::new(None, &[]);
	let button = MockNode::new(Some(&root), &[("data-on-click", "save")]);
	let delegator =
		Delegator::<MockEvent>::new(Rc::new(HandlerRegistry::new())).with_prefix("data-on-");

	assert_eq!(delegator.attribute_name("click"), "data-on-click");
	assert_eq!(
		delegator.find_declaration("click", button, &root).as_deref(),
		Some("save")
	);
	// The default prefix no longer matches.
	assert_eq!(
		delegator.find_declaration("submit", page.button.clone(), &page.root),
		None
	);
}

#[rstest]
fn test_handler_may_register_more_handlers(page: Page) {
	let registry = Rc::new(HandlerRegistry::<MockEvent>::new());
	{
		let weak = Rc::downgrade(&registry);
		registry.register("post-submit", move |_| {
			if let Some(registry) = weak.upgrade() {
				registry.register("late", |_| {});
			}
		});
	}
	let delegator = Delegator::new(Rc::clone(&registry));

	delegator.dispatch(
		"submit",
		page.button.clone(),
		&page.root,
		&MockEvent {
			kind: "submit",
			id: 6,
		},
	);

	assert!(registry.contains("late"));
}
