use super::*;

fn px(r: u8, g: u8, b: u8, a: u8) -> u32 {
    Rgba8::new(r, g, b, a).pack()
}

#[test]
fn over_opacity_0_is_noop() {
    let dst = px(1, 2, 3, 4);
    let src = px(200, 200, 200, 200);
    assert_eq!(over(dst, src, 0.0), dst);
}

#[test]
fn over_src_alpha_0_is_noop() {
    let dst = px(10, 20, 30, 40);
    let src = px(255, 255, 255, 0);
    assert_eq!(over(dst, src, 1.0), dst);
}

#[test]
fn over_src_opaque_replaces_dst() {
    let dst = px(0, 0, 0, 255);
    let src = px(255, 0, 0, 255);
    assert_eq!(over(dst, src, 1.0), src);
}

#[test]
fn over_dst_transparent_returns_src_with_scaled_alpha() {
    let dst = px(0, 0, 0, 0);
    let src = px(100, 110, 120, 200);
    assert_eq!(over(dst, src, 1.0), src);
    assert_eq!(over(dst, px(100, 110, 120, 255), 0.5), px(100, 110, 120, 128));
}

#[test]
fn over_half_opacity_on_opaque_dst_mixes_evenly() {
    let dst = px(0, 0, 0, 255);
    let src = px(255, 255, 255, 255);
    let out = Rgba8::from_packed(over(dst, src, 0.5));
    assert_eq!(out.a, 255);
    assert_eq!(out.r, 128);
}

#[test]
fn destination_out_full_coverage_clears_pixel() {
    let dst = px(10, 20, 30, 255);
    assert_eq!(destination_out(dst, px(0, 0, 0, 255), 1.0), 0);
}

#[test]
fn destination_out_partial_scales_alpha_and_keeps_color() {
    let dst = px(10, 20, 30, 255);
    let out = Rgba8::from_packed(destination_out(dst, px(99, 99, 99, 255), 0.5));
    assert_eq!((out.r, out.g, out.b), (10, 20, 30));
    assert_eq!(out.a, 127);

    let out = Rgba8::from_packed(destination_out(dst, px(0, 0, 0, 128), 1.0));
    assert_eq!(out.a, 127);
}

#[test]
fn destination_out_ignores_transparent_source() {
    let dst = px(10, 20, 30, 200);
    assert_eq!(destination_out(dst, px(255, 255, 255, 0), 1.0), dst);
}
