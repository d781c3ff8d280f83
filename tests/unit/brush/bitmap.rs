use super::*;

fn half_mask() -> BrushImage {
    // Left column opaque, right column transparent.
    BrushImage::from_rgba(image::RgbaImage::from_fn(2, 2, |x, _| {
        image::Rgba([0, 0, 0, if x == 0 { 255 } else { 0 }])
    }))
}

#[test]
fn pending_image_yields_no_stamp() {
    let out = build_stamp(Extent::new(4, 4), HexColor::default(), &BrushImage::pending());
    assert!(out.is_none());
}

#[test]
fn stamp_takes_color_from_brush_and_alpha_from_mask() {
    let color = HexColor::rgb(10, 20, 30);
    let stamp = build_stamp(Extent::new(2, 2), color, &half_mask()).unwrap();
    assert_eq!(stamp.extent(), Extent::new(2, 2));
    assert_eq!(stamp.rgba(0, 1), Some(Rgba8::new(10, 20, 30, 255)));
    assert_eq!(stamp.get(1, 0), Some(0));
}

#[test]
fn stamp_is_stretched_to_brush_size() {
    let stamp = build_stamp(Extent::new(7, 3), HexColor::rgb(1, 2, 3), &BrushImage::solid(2))
        .unwrap();
    assert_eq!((stamp.width(), stamp.height()), (7, 3));
    for p in stamp.pixels() {
        let c = Rgba8::from_packed(*p);
        assert_eq!((c.r, c.g, c.b), (1, 2, 3));
        assert!(c.a > 250);
    }
}

#[test]
fn zero_sized_brush_builds_empty_stamp() {
    let stamp = build_stamp(Extent::new(0, 5), HexColor::default(), &BrushImage::solid(4)).unwrap();
    assert!(stamp.extent().is_empty());
    assert!(stamp.pixels().is_empty());
}

#[test]
fn round_mask_is_opaque_in_center_and_clear_in_corners() {
    let BrushImage::Ready(img) = BrushImage::round(16) else {
        panic!("round mask should be ready");
    };
    assert_eq!(img.get_pixel(8, 8)[3], 255);
    assert_eq!(img.get_pixel(0, 0)[3], 0);
}

#[test]
fn decode_reads_png_bytes() {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([9, 9, 9, 77]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let decoded = BrushImage::decode(&buf).unwrap();
    let stamp = build_stamp(Extent::new(3, 2), HexColor::rgb(200, 0, 0), &decoded).unwrap();
    assert_eq!(stamp.rgba(2, 1), Some(Rgba8::new(200, 0, 0, 77)));

    assert!(BrushImage::decode(b"not an image").is_err());
}
