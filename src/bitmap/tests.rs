// SPDX-FileCopyrightText: The pixelfont authors
// SPDX-License-Identifier: MPL-2.0

use super::*;

fn cross_3x3() -> Bitmap {
    #[rustfmt::skip]
    let pixels = vec![
        false, true, false,
        true, true, true,
        false, true, false,
    ];
    Bitmap::new(3, 3, pixels).unwrap()
}

#[test]
fn rejects_mismatched_pixel_count() {
    let err = Bitmap::new(3, 3, vec![true; 8]).unwrap_err();
    assert_eq!(
        BitmapError {
            width: 3,
            height: 3,
            count: 8,
        },
        err
    );
}

#[test]
fn pixel_lookup_is_row_major() {
    let bitmap = cross_3x3();
    assert_eq!(Some(false), bitmap.pixel(0, 0));
    assert_eq!(Some(true), bitmap.pixel(1, 0));
    assert_eq!(Some(true), bitmap.pixel(0, 1));
    assert_eq!(None, bitmap.pixel(3, 0));
    assert_eq!(None, bitmap.pixel(0, 3));
}

#[test]
fn packed_len_per_mode() {
    assert_eq!(2, Bitmap::packed_len(3, 3, true));
    assert_eq!(3, Bitmap::packed_len(3, 3, false));
    assert_eq!(2, Bitmap::packed_len(16, 1, false));
    assert_eq!(0, Bitmap::packed_len(0, 5, true));
    assert_eq!(0, Bitmap::packed_len(0, 5, false));
}

#[test]
fn compact_packing_pads_only_the_final_byte() {
    let packed = cross_3x3().to_packed(true);
    // Bits in stream order: 010 111 010, LSB-first.
    assert_eq!(vec![0b1011_1010, 0b0000_0000], packed);
    assert_eq!(cross_3x3(), Bitmap::from_packed(3, 3, true, &packed));
}

#[test]
fn row_aligned_packing_pads_every_row() {
    let packed = cross_3x3().to_packed(false);
    assert_eq!(vec![0b0000_0010, 0b0000_0111, 0b0000_0010], packed);
    assert_eq!(cross_3x3(), Bitmap::from_packed(3, 3, false, &packed));
}

#[test]
fn wide_rows_span_multiple_bytes() {
    let mut pixels = vec![false; 10];
    pixels[0] = true;
    pixels[9] = true;
    let bitmap = Bitmap::new(10, 1, pixels).unwrap();
    let packed = bitmap.to_packed(false);
    assert_eq!(vec![0b0000_0001, 0b0000_0010], packed);
    assert_eq!(bitmap, Bitmap::from_packed(10, 1, false, &packed));
}

#[test]
fn empty_bitmap_packs_to_nothing() {
    let bitmap = Bitmap::new(0, 4, Vec::new()).unwrap();
    assert!(bitmap.to_packed(true).is_empty());
    assert!(bitmap.to_packed(false).is_empty());
    assert_eq!(bitmap, Bitmap::from_packed(0, 4, false, &[]));
}
