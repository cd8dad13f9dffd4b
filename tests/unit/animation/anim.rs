use super::*;
use crate::animation::interpolate::InterpolateOpts;

fn ctx(frame: i64) -> SampleCtx {
    SampleCtx::new(frame, Fps::integer(30).unwrap())
}

fn ramp(len: f64) -> Anim {
    Anim::Interpolate(
        Interpolation::new(vec![0.0, len], vec![0.0, len], InterpolateOpts::clamped()).unwrap(),
    )
}

#[test]
fn constant_ignores_frame() {
    let anim = Anim::constant(3.5);
    assert_eq!(anim.sample(ctx(-100)).unwrap(), 3.5);
    assert_eq!(anim.sample(ctx(100)).unwrap(), 3.5);
    assert_eq!(anim.as_constant(), Some(3.5));
}

#[test]
fn delay_shifts_frames() {
    let anim = Anim::Expr(Expr::Delay {
        inner: Box::new(ramp(10.0)),
        by: 4,
    });
    assert_eq!(anim.sample(ctx(4)).unwrap(), 0.0);
    assert_eq!(anim.sample(ctx(9)).unwrap(), 5.0);
    assert_eq!(anim.sample(ctx(0)).unwrap(), 0.0);
}

#[test]
fn reverse_maps_frames() {
    let anim = Anim::Expr(Expr::Reverse {
        inner: Box::new(ramp(9.0)),
        duration: 10,
    });
    assert_eq!(anim.sample(ctx(0)).unwrap(), 9.0);
    assert_eq!(anim.sample(ctx(9)).unwrap(), 0.0);
    assert_eq!(anim.sample(ctx(50)).unwrap(), 0.0);
}

#[test]
fn loop_modes() {
    assert_eq!(loop_frame(7, 5, LoopMode::Repeat), 2);
    assert_eq!(loop_frame(-1, 5, LoopMode::Repeat), 4);
    let pp: Vec<i64> = (0..10).map(|f| loop_frame(f, 4, LoopMode::PingPong)).collect();
    assert_eq!(pp, vec![0, 1, 2, 3, 2, 1, 0, 1, 2, 3]);
    assert_eq!(loop_frame(17, 1, LoopMode::PingPong), 0);
}

#[test]
fn speed_and_mix() {
    let fast = Anim::Expr(Expr::Speed {
        inner: Box::new(ramp(100.0)),
        factor: 2.0,
    });
    assert_eq!(fast.sample(ctx(5)).unwrap(), 10.0);

    let mixed = Anim::Expr(Expr::Mix {
        a: Box::new(Anim::constant(0.0)),
        b: Box::new(Anim::constant(10.0)),
        t: Box::new(Anim::constant(2.0)),
    });
    assert_eq!(mixed.sample(ctx(0)).unwrap(), 10.0);
}

#[test]
fn invalid_expressions_are_rejected() {
    let bad = Anim::Expr(Expr::Loop {
        inner: Box::new(Anim::constant(1.0)),
        period: 0,
        mode: LoopMode::Repeat,
    });
    assert!(matches!(bad.validate(), Err(CadenceError::Animation(_))));
    assert!(matches!(
        bad.sample(ctx(3)),
        Err(CadenceError::Animation(_))
    ));

    let slow = Anim::Expr(Expr::Speed {
        inner: Box::new(Anim::constant(1.0)),
        factor: 0.0,
    });
    assert!(slow.validate().is_err());
}

#[test]
fn json_shapes() {
    let anim: Anim = serde_json::from_str(
        r#"{ "delay": { "inner": { "interpolate": { "input_range": [0, 10], "output_range": [0, 1], "extrapolate_left": "clamp", "extrapolate_right": "clamp" } }, "by": 10 } }"#,
    )
    .unwrap();
    assert_eq!(anim.sample(ctx(15)).unwrap(), 0.5);

    let c: Anim = serde_json::from_str(r#"{ "constant": 2 }"#).unwrap();
    assert_eq!(c, Anim::Constant(2.0));

    let s: Anim = serde_json::from_str(r#"{ "spring": { "from": 1, "to": 2 } }"#).unwrap();
    assert_eq!(s.sample(ctx(0)).unwrap(), 1.0);

    let text = serde_json::to_string(&anim).unwrap();
    let back: Anim = serde_json::from_str(&text).unwrap();
    assert_eq!(back, anim);
}
