use super::*;
use crate::{
    assets::PassthroughAssets,
    foundation::core::{Canvas, Fps},
    procedural::cache::FieldCache,
};

fn render(leaf: &dyn LeafRenderer, frame: i64) -> Option<TextOutput> {
    let fields = FieldCache::default();
    let ctx = FrameCtx {
        frame,
        duration: None,
        fps: Fps::integer(30).unwrap(),
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        assets: &PassthroughAssets,
        fields: &fields,
    };
    match leaf.render(&ctx).unwrap() {
        Some(LeafOutput::Text(out)) => Some(out),
        None => None,
        Some(other) => panic!("unexpected output {other:?}"),
    }
}

#[test]
fn typewriter_reveals_chars_per_frame() {
    let t = TextReveal::typewriter("Build videos from code", 30);
    let out = render(&t, 45).unwrap();
    assert_eq!(out.text, "Build videos");
    assert_eq!(out.text.chars().count(), 12);
    assert!(out.caret);
}

#[test]
fn typewriter_hidden_before_start() {
    let t = TextReveal::typewriter("Build videos from code", 30);
    assert_eq!(render(&t, 20), None);
    assert_eq!(render(&t, 30).unwrap().text, "");
}

#[test]
fn caret_blinks_on_local_frame() {
    let t = TextReveal::typewriter("abc", 0);
    // sin(11 * 0.3) < 0
    assert!(!render(&t, 11).unwrap().caret);
    let no_caret = TextReveal {
        caret: false,
        ..TextReveal::typewriter("abc", 0)
    };
    assert!(!render(&no_caret, 45).unwrap().caret);
}

#[test]
fn typewriter_counts_chars_not_bytes() {
    let t = TextReveal::typewriter("héllo wörld", 0);
    assert_eq!(render(&t, 5).unwrap().text, "héll");
    assert_eq!(render(&t, 1_000).unwrap().text, "héllo wörld");
}

#[test]
fn fade_and_slide_up() {
    let fade = TextReveal::typewriter("Hi", 0).with_style(RevealStyle::Fade);
    let out = render(&fade, 10).unwrap();
    assert_eq!(out.text, "Hi");
    assert_eq!(out.opacity, 0.5);
    assert!(!out.caret);

    let slide = TextReveal::typewriter("Hi", 0).with_style(RevealStyle::SlideUp);
    let start = render(&slide, 0).unwrap();
    assert_eq!(start.opacity, 0.0);
    assert_eq!(start.offset_y, SLIDE_DISTANCE);
    let end = render(&slide, 20).unwrap();
    assert_eq!(end.opacity, 1.0);
    assert_eq!(end.offset_y, 0.0);
}

#[test]
fn word_by_word() {
    let t = TextReveal::typewriter("one two three", 0).with_style(RevealStyle::WordByWord);
    assert_eq!(render(&t, 0).unwrap().text, "one");
    assert_eq!(render(&t, 6).unwrap().text, "one two");
    assert_eq!(render(&t, 600).unwrap().text, "one two three");
}

#[test]
fn reveal_validation() {
    let bad = TextReveal {
        chars_per_frame: 0.0,
        ..TextReveal::typewriter("x", 0)
    };
    assert!(matches!(bad.validate(), Err(CadenceError::Validation(_))));
    let bad = TextReveal {
        font_size: -1.0,
        ..TextReveal::typewriter("x", 0)
    };
    assert!(bad.validate().is_err());
}

#[test]
fn counter_formats_value() {
    let c: Counter = serde_json::from_str(
        r#"{ "from": 0, "to": 100, "duration": 10, "ease": "linear", "decimals": 1, "prefix": "$", "suffix": "k" }"#,
    )
    .unwrap();
    c.validate().unwrap();
    assert_eq!(render(&c, -5).unwrap().text, "$0.0k");
    assert_eq!(render(&c, 5).unwrap().text, "$50.0k");
    assert_eq!(render(&c, 50).unwrap().text, "$100.0k");
}

#[test]
fn counter_defaults_to_out_cubic() {
    let c: Counter = serde_json::from_str(r#"{ "to": 10 }"#).unwrap();
    assert_eq!(c.ease, Ease::OutCubic);
    assert_eq!(c.duration, 60);
    assert!(c.value_at(30) > 5.0);
}
