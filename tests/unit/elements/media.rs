use super::*;
use crate::{
    assets::StaticAssets,
    foundation::core::{Canvas, Fps},
    procedural::cache::FieldCache,
};

fn render(image: &Image, assets: &StaticAssets) -> CadenceResult<Option<LeafOutput>> {
    let fields = FieldCache::default();
    let ctx = FrameCtx {
        frame: 0,
        duration: Some(10),
        fps: Fps::integer(30).unwrap(),
        canvas: Canvas {
            width: 640,
            height: 360,
        },
        assets,
        fields: &fields,
    };
    image.render(&ctx)
}

#[test]
fn resolves_through_asset_resolver() {
    let assets = StaticAssets::from_files("/static", ["img/logo.png"]).unwrap();
    let image = Image {
        width: Some(200.0),
        ..Image::new("./img/logo.png")
    };
    image.validate().unwrap();
    let Some(LeafOutput::Image(out)) = render(&image, &assets).unwrap() else {
        panic!("expected image output");
    };
    assert_eq!(out.src, "/static/img/logo.png");
    assert_eq!(out.width, 200.0);
    assert_eq!(out.height, 360.0);
    assert_eq!(out.fit, Fit::Cover);
}

#[test]
fn missing_asset_is_reported() {
    let assets = StaticAssets::new("/static");
    let err = render(&Image::new("nope.png"), &assets).unwrap_err();
    assert!(matches!(err, CadenceError::MissingAssetReference(_)));
}

#[test]
fn validation_rejects_escaping_paths_and_bad_sizes() {
    assert!(Image::new("../x.png").validate().is_err());
    let bad = Image {
        height: Some(0.0),
        ..Image::new("x.png")
    };
    assert!(bad.validate().is_err());
}
