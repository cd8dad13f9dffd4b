use super::*;
use crate::{
    animation::ops::tween,
    assets::PassthroughAssets,
    procedural::field::{FieldWindow, Motion},
};

fn ctx(frame: i64, fields: &FieldCache) -> FrameCtx<'_> {
    FrameCtx {
        frame,
        duration: None,
        fps: Fps::integer(30).unwrap(),
        canvas: Canvas {
            width: 1920,
            height: 1080,
        },
        assets: &PassthroughAssets,
        fields,
    }
}

#[test]
fn element_dispatches_to_leaf() {
    let fields = FieldCache::default();
    let el = Element::TextReveal(TextReveal::typewriter("hello", 0));
    el.validate().unwrap();
    let Some(LeafOutput::Text(out)) = el.render(&ctx(5, &fields)).unwrap() else {
        panic!("expected text output");
    };
    assert_eq!(out.text, "hell");
    assert!(el.asset_refs().is_empty());

    let img = Element::Image(Image::new("logo.png"));
    assert_eq!(img.asset_refs(), vec!["logo.png"]);
}

#[test]
fn element_json_is_tagged_by_type() {
    let el: Element = serde_json::from_str(
        r#"{ "type": "particles", "count": 8, "window": { "duration": 60, "fade": 5 }, "motion": "radial" }"#,
    )
    .unwrap();
    let Element::Particles(p) = &el else {
        panic!("expected particles");
    };
    assert_eq!(p.count, 8);
    assert_eq!(p.motion, Motion::Radial);
    assert_eq!(
        p.window,
        FieldWindow {
            start: 0,
            duration: 60,
            fade: 5
        }
    );

    let burst: Element = serde_json::from_str(
        r##"{ "type": "burst", "origin": { "x": 50, "y": 50 }, "start_frame": 10, "color": "#ff0000" }"##,
    )
    .unwrap();
    let Element::Burst(b) = &burst else {
        panic!("expected burst");
    };
    assert_eq!(b.params.start_frame, 10);
    assert_eq!(b.params.count, 12);
    assert_eq!(b.color, crate::foundation::core::Rgba8::rgba(255, 0, 0, 255));
}

#[test]
fn layer_props_default_to_identity() {
    let props = LayerProps::default();
    let (opacity, transform) = props
        .resolve(SampleCtx::new(10, Fps::integer(30).unwrap()))
        .unwrap();
    assert_eq!(opacity, 1.0);
    assert_eq!(transform, Transform2D::default());
}

#[test]
fn layer_props_sample_animations() {
    let props = LayerProps {
        opacity: tween(0.0, 2.0, 0, 10, None).unwrap(),
        y: tween(100.0, 0.0, 0, 10, None).unwrap(),
        rotation_deg: Anim::constant(180.0),
        ..LayerProps::default()
    };
    let fps = Fps::integer(30).unwrap();
    let (opacity, transform) = props.resolve(SampleCtx::new(5, fps)).unwrap();
    assert_eq!(opacity, 1.0);
    assert_eq!(transform.translate, Vec2::new(0.0, 50.0));
    assert!((transform.rotation_rad - std::f64::consts::PI).abs() < 1e-12);
    let (opacity, _) = props.resolve(SampleCtx::new(2, fps)).unwrap();
    assert!((opacity - 0.4).abs() < 1e-12);
}
