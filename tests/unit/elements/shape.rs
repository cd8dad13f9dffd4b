use super::*;
use crate::{
    animation::ops::tween,
    assets::PassthroughAssets,
    foundation::core::{Canvas, Fps},
    procedural::cache::FieldCache,
};

fn render(shape: &Shape, frame: i64) -> ShapeOutput {
    let fields = FieldCache::default();
    let ctx = FrameCtx {
        frame,
        duration: None,
        fps: Fps::integer(30).unwrap(),
        canvas: Canvas {
            width: 100,
            height: 100,
        },
        assets: &PassthroughAssets,
        fields: &fields,
    };
    match shape.render(&ctx).unwrap() {
        Some(LeafOutput::Shape(out)) => out,
        other => panic!("unexpected output {other:?}"),
    }
}

#[test]
fn static_fill_and_full_draw() {
    let s = Shape::filled(Geometry::Circle { radius: 10.0 }, Rgba8::rgba(1, 2, 3, 255));
    s.validate().unwrap();
    let out = render(&s, 7);
    assert_eq!(out.fill, Rgba8::rgba(1, 2, 3, 255));
    assert_eq!(out.draw_progress, 1.0);
    assert_eq!(out.geometry, Geometry::Circle { radius: 10.0 });
}

#[test]
fn path_cycle_chooses_path_by_frame() {
    let s = Shape::filled(
        Geometry::PathCycle {
            paths: vec!["M0 0".into(), "M1 1".into(), "M2 2".into()],
            frames_per_path: 10,
        },
        Rgba8::WHITE,
    );
    let d = |frame| match render(&s, frame).geometry {
        Geometry::Path { d } => d,
        other => panic!("unexpected geometry {other:?}"),
    };
    assert_eq!(d(0), "M0 0");
    assert_eq!(d(25), "M2 2");
    assert_eq!(d(35), "M0 0");
}

#[test]
fn fill_ramp_and_draw_animation() {
    let s = Shape {
        fill_ramp: Some(ColorRamp {
            input_range: vec![0.0, 10.0],
            colors: vec![Rgba8::rgba(0, 0, 0, 255), Rgba8::rgba(255, 255, 255, 255)],
        }),
        draw: Some(tween(0.0, 2.0, 0, 10, None).unwrap()),
        ..Shape::filled(
            Geometry::Rect {
                width: 10.0,
                height: 5.0,
                corner_radius: 0.0,
            },
            Rgba8::WHITE,
        )
    };
    s.validate().unwrap();
    let out = render(&s, 5);
    assert_eq!(out.fill, Rgba8::rgba(128, 128, 128, 255));
    assert_eq!(out.draw_progress, 1.0);
    assert_eq!(render(&s, 2).draw_progress, 0.4);
    assert_eq!(render(&s, 99).fill, Rgba8::rgba(255, 255, 255, 255));
}

#[test]
fn invalid_geometry_is_rejected() {
    for g in [
        Geometry::Circle { radius: 0.0 },
        Geometry::Rect {
            width: 1.0,
            height: -1.0,
            corner_radius: 0.0,
        },
        Geometry::Path { d: " ".into() },
        Geometry::PathCycle {
            paths: vec![],
            frames_per_path: 1,
        },
    ] {
        assert!(Shape::filled(g, Rgba8::WHITE).validate().is_err());
    }
    let bad_ramp = Shape {
        fill_ramp: Some(ColorRamp {
            input_range: vec![0.0],
            colors: vec![Rgba8::WHITE],
        }),
        ..Shape::filled(Geometry::Circle { radius: 1.0 }, Rgba8::WHITE)
    };
    assert!(matches!(
        bad_ramp.validate(),
        Err(CadenceError::InvalidRange(_))
    ));
}
