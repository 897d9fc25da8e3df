use std::rc::Rc;

use stackdom::prelude::*;
use stackdom::{
    make_builder, BuildError, Boundary, ElementDescriptor, StackItem, StructuralError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn texts(node: &Node) -> Vec<String> {
    node.children
        .iter()
        .filter_map(|child| child.text().and_then(PropValue::as_str).map(str::to_string))
        .collect()
}

#[test]
fn test_leaf_props_round_trip_with_injected_key() {
    init_logger();
    let given = props! { "href" => "/docs", "title" => "Docs" };
    let expected = given.clone();

    let fragment = Root::new()
        .run_cycle(move || a(Some(given), ()))
        .unwrap();

    let node = &fragment.nodes[0];
    assert!(node.children.is_empty());
    let mut props = node.props.clone();
    assert_eq!(props.remove("key"), Some(PropValue::Int(1)));
    assert_eq!(props, expected);
}

#[test]
fn test_nested_containers_keep_one_child_per_level() {
    init_logger();
    let fragment = render(|| {
        div(None, || {
            div(None, || {
                h1(None, "x");
            });
        });
    })
    .unwrap();

    assert_eq!(fragment.depth(), 3);
    let outer = &fragment.nodes[0];
    assert_eq!((outer.tag, outer.children.len()), (Tag::Div, 1));
    let inner = &outer.children[0];
    assert_eq!((inner.tag, inner.children.len()), (Tag::Div, 1));
    assert_eq!(inner.children[0].tag, Tag::H1);
    assert_eq!(texts(inner), vec!["x"]);
}

#[test]
fn test_siblings_are_not_nested() {
    init_logger();
    let fragment = render(|| {
        div(None, || {
            h1(None, "a");
            h1(None, "b");
        });
    })
    .unwrap();

    let container = &fragment.nodes[0];
    assert_eq!(container.children.len(), 2);
    assert_eq!(texts(container), vec!["a", "b"]);
    assert_eq!(fragment.depth(), 2);
}

#[test]
fn test_depth_and_order_follow_calls() {
    init_logger();
    let fragment = render(|| {
        ul(None, || {
            for (i, label) in ["one", "two", "three"].into_iter().enumerate() {
                li(Some(props! { "data-index" => i }), || {
                    span(None, label);
                    if i == 1 {
                        ol(None, || {
                            li(None, "nested");
                        });
                    }
                });
            }
        });
        p(None, "footer");
    })
    .unwrap();

    assert_eq!(fragment.len(), 2);
    assert_eq!(fragment.depth(), 4);
    let list = &fragment.nodes[0];
    let indices: Vec<_> = list
        .children
        .iter()
        .map(|li| li.prop("data-index").and_then(PropValue::as_int))
        .collect();
    assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
    assert_eq!(list.children[1].children.len(), 2);
    assert_eq!(list.children[1].children[1].tag, Tag::Ol);
    assert_eq!(fragment.nodes[1].tag, Tag::P);
}

#[test]
fn test_keys_are_unique_within_a_cycle() {
    init_logger();
    let fragment = render(|| {
        ol(None, || {
            li(None, "a");
            li(None, "b");
        });
        ol(None, || {
            li(None, "c");
        });
    })
    .unwrap();

    fn collect(node: &Node, keys: &mut Vec<i64>) {
        keys.extend(node.prop("key").and_then(PropValue::as_int));
        for child in &node.children {
            collect(child, keys);
        }
    }
    let mut keys = Vec::new();
    for node in fragment.iter() {
        collect(node, &mut keys);
    }
    let mut unique = keys.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(keys.len(), 5);
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn test_consecutive_cycles_are_independent() {
    init_logger();
    let mut root = Root::new();
    let first = root
        .render_to(&mut HtmlRenderer::new(), || {
            div(None, || {
                button(None, "first");
            });
        })
        .unwrap();
    let second = root
        .render_to(&mut HtmlRenderer::new(), || {
            span(None, "second");
        })
        .unwrap();

    assert_eq!(first, "<div><button>first</button></div>");
    assert_eq!(second, "<span>second</span>");
}

#[test]
fn test_state_slots_follow_call_order() {
    init_logger();
    let mut seen = Vec::new();
    let fragment = render(|| {
        let (count, set_count) = declare_state(1);
        let (label, set_label) = declare_state(String::from("items"));
        set_count.set(99);
        set_label.set(String::from("changed"));
        seen.push((*count, (*label).clone(), set_count.slot(), set_label.slot()));
        span(None, *count);
    })
    .unwrap();

    assert_eq!(
        seen,
        vec![(1, String::from("items"), Some(0), Some(1))]
    );
    assert_eq!(fragment.nodes[0].text(), Some(&PropValue::Int(1)));
}

#[test]
fn test_state_marker_shares_the_returned_value() {
    init_logger();
    Root::new()
        .build(|cx| {
            let (value, _) = cx.declare_state(vec![1, 2, 3]);
            match cx.buffer().last() {
                Some(StackItem::State(marker)) => {
                    let stored = marker.value::<Vec<i32>>().unwrap();
                    assert!(Rc::ptr_eq(&stored, &value));
                }
                other => panic!("expected a state marker, got {other:?}"),
            }
        })
        .unwrap();
}

#[test]
fn test_make_builder_records_like_tag_functions() {
    init_logger();
    let heading = make_builder(Tag::H1);
    let html = render_to(&mut HtmlRenderer::new(), || {
        heading.build(Some(props! { "id" => "t" }), "Title");
    })
    .unwrap();
    assert_eq!(html, "<h1 id=\"t\">Title</h1>");
}

#[test]
fn test_builders_outside_a_cycle_record_nothing() {
    init_logger();
    div(None, || {
        span(None, "lost");
    });
    let fragment = render(|| p(None, "kept")).unwrap();
    assert_eq!(fragment.count(), 1);
    assert_eq!(fragment.nodes[0].tag, Tag::P);
}

#[test]
fn test_callbacks_pass_through_to_nodes() {
    init_logger();
    let clicked = Rc::new(std::cell::Cell::new(0));
    let handler = {
        let clicked = clicked.clone();
        Callback::new(move || clicked.set(clicked.get() + 1))
    };

    let fragment = render(move || {
        button(Some(props! { "onclick" => handler }), "Press");
    })
    .unwrap();

    let callback = fragment.nodes[0]
        .prop("onclick")
        .and_then(PropValue::as_callback)
        .unwrap();
    callback.call();
    callback.call();
    assert_eq!(clicked.get(), 2);
}

// Unbalanced buffers: rejected by default, reconstructed as recorded when
// validation is disabled.

fn unterminated(cx: &mut BuildContext) {
    cx.open(Tag::Div, None);
    cx.leaf(Tag::Span, None, Some("inside".into()));
    cx.leaf(Tag::P, None, Some("meant as sibling".into()));
}

#[test]
fn test_unterminated_parent_is_rejected() {
    init_logger();
    let err = Root::new().build(unterminated).unwrap_err();
    assert_eq!(
        err,
        BuildError::Structural(StructuralError::UnclosedParent {
            tag: Tag::Div,
            position: 0,
        })
    );
}

#[test]
fn test_unterminated_parent_swallows_later_siblings_without_validation() {
    init_logger();
    let fragment = Root::new().validate(false).build(unterminated).unwrap();

    assert_eq!(fragment.len(), 1);
    let div = &fragment.nodes[0];
    assert_eq!(div.children.len(), 2);
    assert_eq!(div.children[1].tag, Tag::P);
}

#[test]
fn test_stray_end_truncates_top_level_without_validation() {
    init_logger();
    let build = |cx: &mut BuildContext| {
        cx.leaf(Tag::Span, None, None);
        cx.close();
        cx.leaf(Tag::P, None, None);
    };

    let err = Root::new().build(build).unwrap_err();
    assert_eq!(
        err,
        BuildError::Structural(StructuralError::UnexpectedEnd { position: 1 })
    );

    let fragment = Root::new().validate(false).build(build).unwrap();
    assert_eq!(fragment.len(), 1);
    assert_eq!(fragment.nodes[0].tag, Tag::Span);
}

#[test]
fn test_hand_written_buffer_reconstructs() {
    init_logger();
    let items = vec![
        StackItem::Boundary(Boundary::Begin),
        StackItem::Element(ElementDescriptor {
            tag: Tag::Ul,
            props: Props::new(),
            opens_parent: true,
        }),
        StackItem::Element(ElementDescriptor {
            tag: Tag::Li,
            props: props! { "children" => "x" },
            opens_parent: false,
        }),
        StackItem::Boundary(Boundary::End),
    ];

    let fragment = stackdom::reconstruct(items, &RootConfig::default()).unwrap();
    let mut html = HtmlRenderer::new();
    assert_eq!(fragment.render(&mut html), "<ul><li>x</li></ul>");
}

#[test]
fn test_explicit_build_inside_ambient_cycle_stays_separate() {
    init_logger();
    let mut inner = None;
    let outer = Root::new()
        .run_cycle(|| {
            inner = Some(Root::new().build(|_cx| {
                span(None, "meant for inner");
            }));
        })
        .unwrap();

    assert_eq!(inner.unwrap().unwrap().count(), 0);
    assert_eq!(outer.count(), 0);
}

#[test]
fn test_root_key_attribute_reaches_renderer() {
    init_logger();
    let html = Root::new()
        .key_attribute("data-key")
        .render_to(&mut HtmlRenderer::new(), || {
            span(None, "x");
        })
        .unwrap();
    assert_eq!(html, "<span>x</span>");
}
