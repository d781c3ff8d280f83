use super::*;
use crate::foundation::rng::Pcg32;

const A: u32 = 0xff00_00ff;
const B: u32 = 0xff00_ff00;
const C: u32 = 0x80ff_0000;

/// Buffer from an ASCII picture: `#` is B, anything else A.
fn picture(rows: &[&str]) -> PixelBuffer {
    let h = rows.len() as u32;
    let w = rows[0].len() as u32;
    let pixels = rows
        .iter()
        .flat_map(|r| r.bytes().map(|b| if b == b'#' { B } else { A }))
        .collect();
    PixelBuffer::from_pixels(w, h, pixels).unwrap()
}

/// Explicit-stack 4-connected fill used as the reference.
fn reference_fill(buffer: &mut PixelBuffer, x: u32, y: u32, fill: u32) {
    let (w, h) = (buffer.width() as i64, buffer.height() as i64);
    let target = buffer.get(x, y).unwrap();
    if target == fill {
        return;
    }
    let mut stack = vec![(x as i64, y as i64)];
    while let Some((cx, cy)) = stack.pop() {
        if cx < 0 || cy < 0 || cx >= w || cy >= h {
            continue;
        }
        if buffer.get(cx as u32, cy as u32) != Some(target) {
            continue;
        }
        buffer.put(cx as u32, cy as u32, fill);
        stack.extend([(cx + 1, cy), (cx - 1, cy), (cx, cy + 1), (cx, cy - 1)]);
    }
}

fn assert_matches_reference(buffer: &PixelBuffer, x: u32, y: u32) {
    let mut expected = buffer.clone();
    reference_fill(&mut expected, x, y, C);
    let mut actual = buffer.clone();
    flood_fill(&mut actual, i64::from(x), i64::from(y), C).unwrap();
    assert_eq!(actual, expected, "seed ({x}, {y})");
}

#[test]
fn filling_region_already_target_color_is_noop() {
    let mut buf = PixelBuffer::filled(5, 4, C);
    let before = buf.clone();
    let stats = flood_fill(&mut buf, 2, 2, C).unwrap();
    assert_eq!(buf, before);
    assert_eq!(stats, FillStats::default());
}

#[test]
fn fill_is_contained_to_rectangle() {
    for (rx, ry, rw, rh) in [(1u32, 1u32, 1u32, 1u32), (2, 1, 3, 2), (1, 2, 5, 1)] {
        let mut buf = PixelBuffer::filled(8, 6, B);
        for yy in ry..ry + rh {
            for xx in rx..rx + rw {
                buf.put(xx, yy, A);
            }
        }
        let stats = flood_fill(&mut buf, i64::from(rx), i64::from(ry + rh - 1), C).unwrap();
        assert_eq!(stats.filled, (rw * rh) as usize);
        for yy in 0..6 {
            for xx in 0..8 {
                let inside = (rx..rx + rw).contains(&xx) && (ry..ry + rh).contains(&yy);
                assert_eq!(buf.get(xx, yy), Some(if inside { C } else { B }));
            }
        }
    }
}

#[test]
fn full_buffer_region_is_filled_completely() {
    let mut buf = PixelBuffer::filled(9, 7, A);
    let stats = flood_fill(&mut buf, 4, 3, C).unwrap();
    assert_eq!(stats.filled, 63);
    assert!(buf.pixels().iter().all(|&p| p == C));
}

#[test]
fn checkerboard_fills_single_cell_only() {
    let mut buf = PixelBuffer::new(6, 6);
    for y in 0..6 {
        for x in 0..6 {
            buf.put(x, y, if (x + y) % 2 == 0 { A } else { B });
        }
    }
    let stats = flood_fill(&mut buf, 2, 2, C).unwrap();
    assert_eq!(stats.filled, 1);
    assert_eq!(buf.get(2, 2), Some(C));
    assert_eq!(buf.get(3, 3), Some(A));
    assert_eq!(buf.get(1, 1), Some(A));
}

#[test]
fn u_shape_seeded_in_either_arm_fills_whole_shape() {
    let buf = picture(&[
        "#########",
        "#..#.#..#",
        "#..#.#..#",
        "#..#.#..#",
        "#..###..#",
        "#.......#",
        "#########",
    ]);
    assert_matches_reference(&buf, 1, 1);
    assert_matches_reference(&buf, 7, 1);
    assert_matches_reference(&buf, 4, 5);
    assert_matches_reference(&buf, 4, 1);
}

#[test]
fn upside_down_comb_reaches_every_tooth() {
    let buf = picture(&[
        "...........",
        ".#.#.#.#.#.",
        ".#.#.#.#.#.",
        "##.#.#.#.##",
        "...#...#...",
        "...........",
    ]);
    for (x, y) in [(0, 0), (2, 3), (10, 5), (4, 4)] {
        assert_matches_reference(&buf, x, y);
    }
}

#[test]
fn spiral_fills_entire_corridor() {
    let buf = picture(&[
        "#############",
        "#...........#",
        "#.#########.#",
        "#.#.......#.#",
        "#.#.#####.#.#",
        "#.#.#...#.#.#",
        "#.#.#.#.#.#.#",
        "#.#.#.#...#.#",
        "#.#.#.#####.#",
        "#.#.#.......#",
        "#.#.#########",
        "#.#..........",
        "#############",
    ]);
    assert_matches_reference(&buf, 5, 6);
    assert_matches_reference(&buf, 1, 1);
    assert_matches_reference(&buf, 12, 11);
}

#[test]
fn random_noise_matches_reference() {
    let mut rng = Pcg32::new(0x5eed);
    for _ in 0..20 {
        let (w, h) = (17u32, 13u32);
        let pixels = (0..w * h)
            .map(|_| if rng.next_u32() % 100 < 38 { B } else { A })
            .collect();
        let buf = PixelBuffer::from_pixels(w, h, pixels).unwrap();
        let x = rng.next_u32() % w;
        let y = rng.next_u32() % h;
        assert_matches_reference(&buf, x, y);
    }
}

#[test]
fn seed_on_edges_and_corners() {
    let buf = picture(&["..#..", ".#.#.", "#...#", "....."]);
    for (x, y) in [(0, 0), (4, 0), (0, 3), (4, 3), (2, 1), (2, 0)] {
        assert_matches_reference(&buf, x, y);
    }
}

#[test]
fn out_of_bounds_seed_is_rejected_without_writes() {
    let mut buf = PixelBuffer::filled(3, 3, A);
    let before = buf.clone();
    for (x, y) in [(-1, 0), (0, -1), (3, 0), (0, 3)] {
        let err = flood_fill(&mut buf, x, y, C).unwrap_err();
        assert!(matches!(err, PaintError::OutOfBounds { .. }));
    }
    assert_eq!(buf, before);
}

#[test]
fn pixels_originally_fill_color_do_not_bridge_regions() {
    // Column of C separates two A regions; C pixels are not part of either.
    let mut buf = PixelBuffer::filled(5, 3, A);
    for y in 0..3 {
        buf.put(2, y, C);
    }
    let stats = flood_fill(&mut buf, 0, 0, C).unwrap();
    assert_eq!(stats.filled, 6);
    assert_eq!(buf.get(4, 1), Some(A));
}
