use super::*;
use crate::{animation::anim::SampleCtx, foundation::core::Fps};

fn at(anim: &Anim, frame: i64) -> f64 {
    anim.sample(SampleCtx::new(frame, Fps::integer(30).unwrap()))
        .unwrap()
}

#[test]
fn tween_clamps_and_eases() {
    let t = tween(10.0, 20.0, 5, 10, None).unwrap();
    assert_eq!(at(&t, 0), 10.0);
    assert_eq!(at(&t, 10), 15.0);
    assert_eq!(at(&t, 99), 20.0);

    let eased = tween(0.0, 1.0, 0, 10, Some(Ease::InQuad)).unwrap();
    assert_eq!(at(&eased, 5), 0.25);
}

#[test]
fn fade_in_out_envelope() {
    let fade = fade_in_out(100, 10).unwrap();
    assert_eq!(at(&fade, -5), 0.0);
    assert_eq!(at(&fade, 5), 0.5);
    assert_eq!(at(&fade, 50), 1.0);
    assert_eq!(at(&fade, 95), 0.5);
    assert_eq!(at(&fade, 100), 0.0);
    assert!(fade_in_out(10, 5).is_err());
}

#[test]
fn sequence_switches_at_boundary() {
    let s = sequence(Anim::constant(1.0), 10, Anim::constant(2.0)).unwrap();
    assert_eq!(at(&s, 9), 1.0);
    assert_eq!(at(&s, 10), 2.0);
}

#[test]
fn stagger_orders_by_offset() {
    let ramp = || tween(0.0, 10.0, 0, 10, None).unwrap();
    let s = stagger(vec![(20, ramp()), (5, ramp())]).unwrap();
    assert_eq!(at(&s, 5), 0.0);
    assert_eq!(at(&s, 10), 5.0);
    assert_eq!(at(&s, 25), 5.0);
    assert_eq!(at(&stagger(Vec::new()).unwrap(), 3), 0.0);
}

#[test]
fn loop_helper_repeats() {
    let l = loop_(tween(0.0, 4.0, 0, 4, None).unwrap(), 4, LoopMode::Repeat);
    assert_eq!(at(&l, 5), 1.0);
    let r = reverse(tween(0.0, 4.0, 0, 4, None).unwrap(), 5);
    assert_eq!(at(&r, 0), 4.0);
    let d = delay(Anim::constant(1.0), 3);
    assert_eq!(at(&d, 0), 1.0);
    assert_eq!(at(&speed(Anim::constant(2.0), 3.0), 7), 2.0);
    assert_eq!(
        at(&mix(Anim::constant(0.0), Anim::constant(8.0), Anim::constant(0.25)), 0),
        2.0
    );
}
