use super::*;
use crate::{
    animation::anim::Anim,
    animation::ops::tween,
    assets::{PassthroughAssets, StaticAssets},
    elements::{Counter, Element, Image, LayerProps, LeafOutput, TextReveal},
    foundation::error::ErrorKind,
};

fn env<'a>(assets: &'a dyn AssetResolver, fields: &'a FieldCache) -> WalkEnv<'a> {
    WalkEnv {
        fps: Fps::integer(30).unwrap(),
        canvas: Canvas {
            width: 1280,
            height: 720,
        },
        assets,
        fields,
    }
}

fn counter(to: f64) -> Node {
    Node::leaf(Element::Counter(Counter {
        from: to,
        to,
        start_frame: 0,
        duration: 1,
        ease: crate::animation::ease::Ease::Linear,
        decimals: 0,
        prefix: String::new(),
        suffix: String::new(),
        color: Default::default(),
        font_size: 32.0,
    }))
}

fn texts(out: &WalkOutput) -> Vec<(&str, &str)> {
    out.layers
        .iter()
        .map(|l| match &l.content {
            LeafOutput::Text(t) => (l.path.as_str(), t.text.as_str()),
            other => panic!("unexpected {other:?}"),
        })
        .collect()
}

#[test]
fn nested_windows_compose_local_frames() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let root = Node::group(vec![
        Node::group(vec![counter(1.0).named("c").window(10, 20)])
            .named("act")
            .window(100, 50),
    ]);

    assert!(walk(&root, 109, &env, WalkOpts::default()).layers.is_empty());
    let out = walk(&root, 110, &env, WalkOpts::default());
    assert_eq!(out.layers.len(), 1);
    assert_eq!(out.layers[0].path, "act/c");
    assert_eq!(out.layers[0].local_frame, 0);
    let out = walk(&root, 129, &env, WalkOpts::default());
    assert_eq!(out.layers[0].local_frame, 19);
    assert!(walk(&root, 130, &env, WalkOpts::default()).layers.is_empty());
}

#[test]
fn later_siblings_draw_on_top() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let root = Node::group(vec![counter(1.0), counter(2.0).named("top")]);
    let out = walk(&root, 5, &env, WalkOpts::default());
    assert_eq!(texts(&out), vec![("#0", "1"), ("top", "2")]);
}

#[test]
fn series_places_children_back_to_back() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let root = Node::series(vec![
        counter(1.0).window(0, 10),
        counter(2.0).window(0, 5),
        counter(3.0).window(2, 5),
    ]);

    let at = |f| -> Vec<String> {
        texts(&walk(&root, f, &env, WalkOpts::default()))
            .into_iter()
            .map(|(_, t)| t.to_owned())
            .collect()
    };
    assert_eq!(at(0), ["1"]);
    assert_eq!(at(9), ["1"]);
    assert_eq!(at(10), ["2"]);
    assert_eq!(at(14), ["2"]);
    assert!(at(16).is_empty());
    assert_eq!(at(17), ["3"]);
    let out = walk(&root, 17, &env, WalkOpts::default());
    assert_eq!(out.layers[0].path, "#2");
    assert_eq!(out.layers[0].local_frame, 0);
}

#[test]
fn loop_wraps_and_expires() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let typed = Node::leaf(Element::TextReveal(TextReveal::typewriter("abcdefghij", 0)));
    let root = Node::looped(typed, 5, Some(2));

    let frame_of = |f| {
        walk(&root, f, &env, WalkOpts::default())
            .layers
            .first()
            .map(|l| l.local_frame)
    };
    assert_eq!(frame_of(0), Some(0));
    assert_eq!(frame_of(4), Some(4));
    assert_eq!(frame_of(5), Some(0));
    assert_eq!(frame_of(9), Some(4));
    assert_eq!(frame_of(10), None);
}

#[test]
fn freeze_pins_child_frame() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let typed = Node::leaf(Element::TextReveal(TextReveal::typewriter("hello world", 0)));
    let root = Node::freeze(typed, 5);
    let a = walk(&root, 0, &env, WalkOpts::default());
    let b = walk(&root, 300, &env, WalkOpts::default());
    assert_eq!(a.layers[0].local_frame, 5);
    assert_eq!(texts(&a), texts(&b));
}

#[test]
fn layer_props_are_resolved_at_local_frame() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let props = LayerProps {
        opacity: tween(0.0, 1.0, 0, 10, None).unwrap(),
        x: Anim::constant(40.0),
        ..LayerProps::default()
    };
    let root = Node::group(vec![counter(1.0).with_layer(props).at(20)]);
    let out = walk(&root, 25, &env, WalkOpts::default());
    let layer = &out.layers[0];
    assert!((layer.opacity - 0.5).abs() < 1e-12);
    assert_eq!(layer.transform.translate.x, 40.0);
}

#[test]
fn failing_leaf_only_aborts_its_subtree() {
    let fields = FieldCache::default();
    let assets = StaticAssets::new("/static");
    let env = env(&assets, &fields);
    let root = Node::group(vec![
        counter(1.0).named("before"),
        Node::leaf(Element::Image(Image::new("missing.png"))).named("logo"),
        counter(2.0).named("after"),
    ]);

    let out = walk(&root, 0, &env, WalkOpts::default());
    assert_eq!(texts(&out), vec![("before", "1"), ("after", "2")]);
    assert_eq!(out.errors.len(), 1);
    assert_eq!(out.errors[0].path, "logo");
    assert_eq!(out.errors[0].kind, ErrorKind::MissingAssetReference);
}

#[test]
fn pruned_and_unpruned_walks_agree() {
    let fields = FieldCache::default();
    let env = env(&PassthroughAssets, &fields);
    let root = Node::group(vec![
        Node::series(vec![counter(1.0).window(0, 7), counter(2.0).window(3, 9)])
            .named("s")
            .window(10, 40),
        Node::looped(counter(3.0).window(1, 2), 4, Some(3)).at(5),
        Node::freeze(counter(4.0).window(0, 3), 2).window(30, 10),
    ])
    .named("root");

    let full = WalkOpts {
        prune_inactive: false,
    };
    for f in -5..80 {
        assert_eq!(
            walk(&root, f, &env, WalkOpts::default()),
            walk(&root, f, &env, full),
            "frame {f}"
        );
    }
}
