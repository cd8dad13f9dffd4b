use super::*;

#[test]
fn boundary_knots_are_exact() {
    let input = [0.0, 0.3, 1.7, 9.1];
    let output = [0.1, 0.7, -3.3, 0.3];
    let opts = InterpolateOpts::default();
    for (x, y) in input.iter().zip(output.iter()) {
        assert_eq!(interpolate(*x, &input, &output, &opts).unwrap(), *y);
    }
}

#[test]
fn two_point_linear() {
    let v = interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0], &InterpolateOpts::default()).unwrap();
    assert_eq!(v, 50.0);
}

#[test]
fn extend_is_the_default() {
    let opts = InterpolateOpts::default();
    assert_eq!(interpolate(20.0, &[0.0, 10.0], &[0.0, 1.0], &opts).unwrap(), 2.0);
    assert_eq!(interpolate(-10.0, &[0.0, 10.0], &[0.0, 1.0], &opts).unwrap(), -1.0);
}

#[test]
fn clamp_pins_to_nearest_boundary() {
    let opts = InterpolateOpts::clamped();
    let input = [10.0, 20.0, 30.0];
    let output = [1.0, 5.0, 2.0];
    assert_eq!(interpolate(-100.0, &input, &output, &opts).unwrap(), 1.0);
    assert_eq!(interpolate(9.999, &input, &output, &opts).unwrap(), 1.0);
    assert_eq!(interpolate(30.001, &input, &output, &opts).unwrap(), 2.0);
    assert_eq!(interpolate(1e9, &input, &output, &opts).unwrap(), 2.0);
}

#[test]
fn identity_passes_input_through() {
    let opts = InterpolateOpts {
        extrapolate_left: Extrapolate::Identity,
        extrapolate_right: Extrapolate::Identity,
        ease: None,
    };
    assert_eq!(interpolate(-7.0, &[0.0, 1.0], &[5.0, 6.0], &opts).unwrap(), -7.0);
    assert_eq!(interpolate(42.0, &[0.0, 1.0], &[5.0, 6.0], &opts).unwrap(), 42.0);
    assert_eq!(interpolate(0.5, &[0.0, 1.0], &[5.0, 6.0], &opts).unwrap(), 5.5);
}

#[test]
fn multi_point_fade_curve() {
    let input = [0.0, 20.0, 80.0, 100.0];
    let output = [0.0, 1.0, 1.0, 0.0];
    let opts = InterpolateOpts::clamped();
    assert_eq!(interpolate(10.0, &input, &output, &opts).unwrap(), 0.5);
    assert_eq!(interpolate(50.0, &input, &output, &opts).unwrap(), 1.0);
    assert_eq!(interpolate(90.0, &input, &output, &opts).unwrap(), 0.5);
}

#[test]
fn easing_shapes_segment_progress() {
    let opts = InterpolateOpts::clamped().with_ease(Ease::InQuad);
    let v = interpolate(5.0, &[0.0, 10.0], &[0.0, 100.0], &opts).unwrap();
    assert_eq!(v, 25.0);
}

#[test]
fn degenerate_ranges_are_errors() {
    let opts = InterpolateOpts::default();
    let zero_width = interpolate(1.0, &[0.0, 0.0], &[0.0, 1.0], &opts).unwrap_err();
    assert!(matches!(zero_width, CadenceError::InvalidRange(_)));
    let decreasing = interpolate(1.0, &[0.0, 2.0, 1.0], &[0.0, 1.0, 2.0], &opts).unwrap_err();
    assert!(matches!(decreasing, CadenceError::InvalidRange(_)));
    let mismatched = interpolate(1.0, &[0.0, 1.0], &[0.0], &opts).unwrap_err();
    assert!(matches!(mismatched, CadenceError::InvalidRange(_)));
    let short = interpolate(1.0, &[0.0], &[0.0], &opts).unwrap_err();
    assert!(matches!(short, CadenceError::InvalidRange(_)));
    let nan = interpolate(f64::NAN, &[0.0, 1.0], &[0.0, 1.0], &opts).unwrap_err();
    assert!(matches!(nan, CadenceError::Validation(_)));
}

#[test]
fn validated_interpolation_from_json() {
    let json = r#"{
        "input_range": [0, 30],
        "output_range": [0, 1],
        "extrapolate_left": "clamp",
        "extrapolate_right": "clamp",
        "ease": "out_cubic"
    }"#;
    let interp: Interpolation = serde_json::from_str(json).unwrap();
    assert_eq!(interp.sample(-5.0), 0.0);
    assert_eq!(interp.sample(30.0), 1.0);
    assert_eq!(interp.sample(100.0), 1.0);

    let bad = r#"{"input_range": [5, 5], "output_range": [0, 1]}"#;
    assert!(serde_json::from_str::<Interpolation>(bad).is_err());
}

#[test]
fn colours_blend_per_channel() {
    let colors = [Rgba8::rgba(0, 0, 0, 255), Rgba8::rgba(200, 100, 50, 255)];
    let c = interpolate_color(5.0, &[0.0, 10.0], &colors, &InterpolateOpts::clamped()).unwrap();
    assert_eq!(c, Rgba8::rgba(100, 50, 25, 255));
    let end = interpolate_color(99.0, &[0.0, 10.0], &colors, &InterpolateOpts::clamped()).unwrap();
    assert_eq!(end, colors[1]);

    let identity = InterpolateOpts {
        extrapolate_left: Extrapolate::Identity,
        ..InterpolateOpts::default()
    };
    assert!(interpolate_color(1.0, &[0.0, 10.0], &colors, &identity).is_err());
}

#[test]
fn extended_elastic_curve_never_yields_nan() {
    let input = [0.0, 10.0];
    let output = [0.0, 1.0];
    let in_elastic = InterpolateOpts::default().with_ease(Ease::InElastic);
    let out_elastic = InterpolateOpts::default().with_ease(Ease::OutElastic);

    let err = interpolate(2000.0, &input, &output, &in_elastic).unwrap_err();
    assert!(matches!(err, CadenceError::InvalidRange(_)), "{err}");
    let err = interpolate(-2000.0, &input, &output, &out_elastic).unwrap_err();
    assert!(matches!(err, CadenceError::InvalidRange(_)), "{err}");

    let colors = [Rgba8::rgba(0, 0, 0, 255), Rgba8::rgba(255, 255, 255, 255)];
    assert!(interpolate_color(2000.0, &input, &colors, &in_elastic).is_err());

    let curve = Interpolation::new(input.to_vec(), output.to_vec(), in_elastic).unwrap();
    assert_eq!(curve.sample(2000.0), 1.0);
    let curve = Interpolation::new(input.to_vec(), output.to_vec(), out_elastic).unwrap();
    assert_eq!(curve.sample(-2000.0), 0.0);
    assert!(curve.sample(5.0).is_finite());
}
