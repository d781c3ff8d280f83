use super::*;

const RED: u32 = 0xff00_00ff;
const BLUE: u32 = 0xffff_0000;

#[test]
fn from_pixels_rejects_wrong_length() {
    assert!(PixelBuffer::from_pixels(2, 2, vec![0; 3]).is_err());
    assert!(PixelBuffer::from_pixels(2, 2, vec![0; 4]).is_ok());
}

#[test]
fn get_and_put_respect_bounds() {
    let mut b = PixelBuffer::new(3, 2);
    b.put(2, 1, RED);
    b.put(3, 1, BLUE);
    b.put(0, 2, BLUE);
    assert_eq!(b.get(2, 1), Some(RED));
    assert_eq!(b.get(3, 1), None);
    assert_eq!(b.pixels().iter().filter(|&&p| p == BLUE).count(), 0);
}

#[test]
fn rgba_image_round_trip_keeps_byte_order() {
    let mut b = PixelBuffer::new(2, 1);
    b.put(1, 0, Rgba8::new(1, 2, 3, 4).pack());
    let img = b.to_rgba_image();
    assert_eq!(img.get_pixel(1, 0).0, [1, 2, 3, 4]);
    assert_eq!(PixelBuffer::from_rgba_image(&img), b);
}

#[test]
fn resize_preserving_keeps_top_left() {
    let mut b = PixelBuffer::filled(2, 2, RED);
    b.resize_preserving(Extent::new(3, 1));
    assert_eq!(b.pixels(), &[RED, RED, 0]);
}

#[test]
fn draw_clips_at_edges() {
    let mut dst = PixelBuffer::new(3, 3);
    let stamp = PixelBuffer::filled(2, 2, RED);
    dst.draw(&stamp, -1, 2, 1.0, BlendOp::Over);
    assert_eq!(dst.get(0, 2), Some(RED));
    assert_eq!(dst.pixels().iter().filter(|&&p| p == RED).count(), 1);

    dst.draw(&stamp, 5, 5, 1.0, BlendOp::Over);
    dst.draw(&stamp, -2, -2, 1.0, BlendOp::Over);
    assert_eq!(dst.pixels().iter().filter(|&&p| p == RED).count(), 1);
}

#[test]
fn composite_requires_equal_sizes() {
    let mut a = PixelBuffer::new(2, 2);
    let b = PixelBuffer::new(3, 2);
    assert!(a.composite(&b, 1.0, BlendOp::Over).is_err());
    assert!(a.copy_from(&b).is_err());
}

#[test]
fn composite_destination_out_cuts_holes() {
    let mut surface = PixelBuffer::filled(2, 1, BLUE);
    let mut ink = PixelBuffer::new(2, 1);
    ink.put(0, 0, RED);
    surface.composite(&ink, 1.0, BlendOp::DestinationOut).unwrap();
    assert_eq!(surface.pixels(), &[0, BLUE]);
}
