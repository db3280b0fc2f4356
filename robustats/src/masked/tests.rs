use ndarray::{array, ArrayD};

use super::*;

fn grid() -> ArrayD<f64> {
    array![[0.0, 1.0, 2.0], [3.0, 4.0, 5.0]].into_dyn()
}

#[test]
fn test_new_has_empty_mask() {
    let m = MaskedArray::new(grid());
    assert_eq!(m.shape(), &[2, 3]);
    assert_eq!(m.count(), 6);
    assert!(m.mask().iter().all(|&b| !b));
}

#[test]
fn test_with_mask_rejects_shape_mismatch() {
    let mask = ArrayD::from_elem(ndarray::IxDyn(&[3, 2]), false);
    let err = MaskedArray::with_mask(grid(), mask).unwrap_err();
    assert_eq!(
        err,
        Error::ShapeMismatch {
            data: vec![2, 3],
            mask: vec![3, 2],
        }
    );
}

#[test]
fn test_masked_invalid_flags_non_finite() {
    let data = array![1.0, f64::NAN, f64::INFINITY, -2.0].into_dyn();
    let m = MaskedArray::masked_invalid(data);
    assert_eq!(m.compressed(), vec![1.0, -2.0]);
    assert_eq!(m.count(), 2);
}

#[test]
fn test_filled_and_compressed() {
    let mask = array![[false, true, false], [true, false, false]].into_dyn();
    let m = MaskedArray::with_mask(grid(), mask).unwrap();
    assert_eq!(m.compressed(), vec![0.0, 2.0, 4.0, 5.0]);
    let filled = m.filled(-1.0);
    assert_eq!(filled, array![[0.0, -1.0, 2.0], [-1.0, 4.0, 5.0]].into_dyn());
}

#[test]
fn test_mask_value() {
    let mut m = MaskedArray::from_vec(vec![0.0, 1.0, 0.0, 2.0]);
    m.mask_value(0.0);
    assert_eq!(m.compressed(), vec![1.0, 2.0]);
}

#[test]
fn test_non_standard_layout_is_normalized() {
    let transposed = grid().reversed_axes();
    let m = MaskedArray::new(transposed);
    assert_eq!(m.shape(), &[3, 2]);
    assert_eq!(m.values_flat(), &[0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
}

// ---------------------------------------------------------------------------
// Lanes
// ---------------------------------------------------------------------------

#[test]
fn test_lanes_flat() {
    let lanes = Lanes::new(&[2, 3], &Axes::Flat).unwrap();
    assert_eq!(lanes.lane_count(), 1);
    assert_eq!(lanes.lane(0), &[0, 1, 2, 3, 4, 5]);
    assert!(lanes.reduced_shape().is_empty());
    assert_eq!(lanes.lane_shape(), &[2, 3]);
}

#[test]
fn test_lanes_along_axis_0() {
    let lanes = Lanes::new(&[2, 3], &Axes::along(0)).unwrap();
    assert_eq!(lanes.lane_count(), 3);
    assert_eq!(lanes.reduced_shape(), &[3]);
    assert_eq!(lanes.lane(0), &[0, 3]);
    assert_eq!(lanes.lane(1), &[1, 4]);
    assert_eq!(lanes.lane(2), &[2, 5]);
}

#[test]
fn test_lanes_along_axis_1() {
    let lanes = Lanes::new(&[2, 3], &Axes::from(1)).unwrap();
    assert_eq!(lanes.lane_count(), 2);
    assert_eq!(lanes.lane(0), &[0, 1, 2]);
    assert_eq!(lanes.lane(1), &[3, 4, 5]);
}

#[test]
fn test_lanes_multiple_axes() {
    // shape (2, 2, 2): reduce over axes 0 and 2, keep axis 1.
    let lanes = Lanes::new(&[2, 2, 2], &Axes::along_many([2, 0])).unwrap();
    assert_eq!(lanes.reduced_shape(), &[2]);
    assert_eq!(lanes.lane_shape(), &[2, 2]);
    assert_eq!(lanes.lane(0), &[0, 1, 4, 5]);
    assert_eq!(lanes.lane(1), &[2, 3, 6, 7]);
}

#[test]
fn test_lanes_invalid_axes() {
    assert_eq!(
        Lanes::new(&[2, 3], &Axes::along(2)).unwrap_err(),
        Error::AxisOutOfBounds { axis: 2, ndim: 2 }
    );
    assert_eq!(
        Lanes::new(&[2, 3], &Axes::along_many([1, 1])).unwrap_err(),
        Error::DuplicateAxis(1)
    );
}

#[test]
fn test_lanes_reduce_keeps_order() {
    let m = MaskedArray::new(grid());
    let lanes = Lanes::new(m.shape(), &Axes::along(1)).unwrap();
    let sums = lanes.reduce(|lane| m.lane_values(lane).iter().sum());
    assert_eq!(sums, array![3.0, 12.0].into_dyn());
}
