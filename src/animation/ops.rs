use crate::{
    animation::anim::{Anim, Expr, LoopMode},
    animation::ease::Ease,
    animation::interpolate::{InterpolateOpts, Interpolation},
    foundation::error::CadenceResult,
};

/// Shift `inner` later by `by_frames`.
pub fn delay(inner: Anim, by_frames: i64) -> Anim {
    Anim::Expr(Expr::Delay {
        inner: Box::new(inner),
        by: by_frames,
    })
}

/// Play `inner` `factor` times faster.
pub fn speed(inner: Anim, factor: f64) -> Anim {
    Anim::Expr(Expr::Speed {
        inner: Box::new(inner),
        factor,
    })
}

/// Play the first `duration_frames` of `inner` backwards.
pub fn reverse(inner: Anim, duration_frames: u64) -> Anim {
    Anim::Expr(Expr::Reverse {
        inner: Box::new(inner),
        duration: duration_frames,
    })
}

/// Repeat the first `period_frames` of `inner`.
pub fn loop_(inner: Anim, period_frames: u64, mode: LoopMode) -> Anim {
    Anim::Expr(Expr::Loop {
        inner: Box::new(inner),
        period: period_frames,
        mode,
    })
}

/// Blend `a` toward `b` by `t`.
pub fn mix(a: Anim, b: Anim, t: Anim) -> Anim {
    Anim::Expr(Expr::Mix {
        a: Box::new(a),
        b: Box::new(b),
        t: Box::new(t),
    })
}

/// `from -> to` over `[start, start + duration]`, clamped outside, optionally eased.
pub fn tween(
    from: f64,
    to: f64,
    start: i64,
    duration: u64,
    ease: Option<Ease>,
) -> CadenceResult<Anim> {
    let start = start as f64;
    let opts = InterpolateOpts {
        ease,
        ..InterpolateOpts::clamped()
    };
    let curve = Interpolation::new(
        vec![start, start + duration as f64],
        vec![from, to],
        opts,
    )?;
    Ok(Anim::Interpolate(curve))
}

/// Opacity envelope `0 -> 1 -> 1 -> 0` over `[0, duration)` with `fade` frames on each side.
pub fn fade_in_out(duration: u64, fade: u64) -> CadenceResult<Anim> {
    let d = duration as f64;
    let f = fade as f64;
    let curve = Interpolation::new(
        vec![0.0, f, d - f, d],
        vec![0.0, 1.0, 1.0, 0.0],
        InterpolateOpts::clamped(),
    )?;
    Ok(Anim::Interpolate(curve))
}

/// Switch from `a` to `b` at `a_len`; `b` restarts at its frame 0 on the switch.
pub fn sequence(a: Anim, a_len: i64, b: Anim) -> CadenceResult<Anim> {
    let b_local = delay(b, a_len);
    let step = Interpolation::new(
        vec![a_len as f64 - 1.0, a_len as f64],
        vec![0.0, 1.0],
        InterpolateOpts::clamped(),
    )?;
    Ok(mix(a, b_local, Anim::Interpolate(step)))
}

/// Chain animations at increasing offsets; each one takes over at its offset.
pub fn stagger(mut anims: Vec<(i64, Anim)>) -> CadenceResult<Anim> {
    anims.sort_by_key(|(offset, _)| *offset);
    let mut iter = anims.into_iter();
    let Some((first_offset, first_anim)) = iter.next() else {
        return Ok(Anim::constant(0.0));
    };

    let mut out = delay(first_anim, first_offset);
    for (offset, anim) in iter {
        out = sequence(out, offset, anim)?;
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ops.rs"]
mod tests;
