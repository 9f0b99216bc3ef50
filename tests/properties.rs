use proptest::prelude::*;

use rust_synapse::{Error, Init, Matrix, standard_synapse_range};

fn matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
    prop::collection::vec(-10.0_f32..10.0, rows * cols)
        .prop_map(move |v| Matrix::from_flat(rows, cols, v).unwrap())
}

fn shape() -> impl Strategy<Value = (usize, usize)> {
    (1_usize..8, 1_usize..8)
}

fn pair_same_shape() -> impl Strategy<Value = (Matrix, Matrix)> {
    shape().prop_flat_map(|(r, c)| (matrix(r, c), matrix(r, c)))
}

fn pair_for_multiply() -> impl Strategy<Value = (Matrix, Matrix)> {
    (1_usize..6, 1_usize..6, 1_usize..6).prop_flat_map(|(m, k, n)| (matrix(m, k), matrix(k, n)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn new_has_shape_and_zero_cells((r, c) in shape()) {
        let m = Matrix::new(r, c).unwrap();
        prop_assert_eq!(m.shape(), (r, c));
        prop_assert!(m.as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn product_shape_is_outer_dims((a, b) in pair_for_multiply()) {
        let c = a.multiply(&b, false).unwrap();
        prop_assert_eq!(c.shape(), (a.rows(), b.cols()));
    }

    #[test]
    fn identity_is_right_neutral(a in shape().prop_flat_map(|(r, c)| matrix(r, c))) {
        let id = Matrix::identity(a.cols(), a.cols()).unwrap();
        prop_assert_eq!(a.multiply(&id, false).unwrap(), a);
    }

    #[test]
    fn normalize_divides_by_inner_dim((a, b) in pair_for_multiply()) {
        let sum = a.multiply(&b, false).unwrap();
        let mean = a.multiply(&b, true).unwrap();
        let k = a.cols() as f32;
        for (s, m) in sum.as_slice().iter().zip(mean.as_slice()) {
            prop_assert!((s / k - m).abs() <= 1e-5 * (1.0 + s.abs()));
        }
    }

    #[test]
    fn add_commutes((a, b) in pair_same_shape()) {
        prop_assert_eq!(a.add(&b).unwrap(), b.add(&a).unwrap());
    }

    #[test]
    fn clone_is_deep(a in shape().prop_flat_map(|(r, c)| matrix(r, c))) {
        let mut b = a.clone();
        prop_assert_eq!(&a, &b);
        b.set_to_one().set_cell(0, 0, 42.0).unwrap();
        prop_assert_ne!(a.get_cell(0, 0).unwrap(), 42.0);
    }

    #[test]
    fn zeroed_redimension_preserves_overlap(
        a in shape().prop_flat_map(|(r, c)| matrix(r, c)),
        (r2, c2) in shape(),
    ) {
        let b = a.redimension_zeroed(r2, c2).unwrap();
        prop_assert_eq!(b.shape(), (r2, c2));
        for i in 0..r2 {
            for j in 0..c2 {
                let got = b.get_cell(i, j).unwrap();
                if i < a.rows() && j < a.cols() {
                    prop_assert_eq!(got, a.get_cell(i, j).unwrap());
                } else {
                    prop_assert_eq!(got, 0.0);
                }
            }
        }
    }

    #[test]
    fn synapse_redimension_fills_new_cells_in_range(
        a in shape().prop_flat_map(|(r, c)| matrix(r, c)),
        (r2, c2) in shape(),
        seed in any::<u64>(),
    ) {
        let b = a.redimension_with_seed(r2, c2, Init::Synapse, seed).unwrap();
        let range = standard_synapse_range(c2).unwrap();
        for i in 0..r2 {
            for j in 0..c2 {
                let got = b.get_cell(i, j).unwrap();
                if i < a.rows() && j < a.cols() {
                    prop_assert_eq!(got, a.get_cell(i, j).unwrap());
                } else {
                    prop_assert!((-range..=range).contains(&got));
                }
            }
        }
    }

    #[test]
    fn tolerant_copy_leaves_outside_cells_untouched(
        src in shape().prop_flat_map(|(r, c)| matrix(r, c)),
        (r, c) in shape(),
    ) {
        let mut dst = Matrix::new(r, c).unwrap();
        dst.set_to_one();
        dst.set_all_values(&src, true).unwrap();
        for i in 0..r {
            for j in 0..c {
                let got = dst.get_cell(i, j).unwrap();
                if i < src.rows() && j < src.cols() {
                    prop_assert_eq!(got, src.get_cell(i, j).unwrap());
                } else {
                    prop_assert_eq!(got, 1.0);
                }
            }
        }
    }

    #[test]
    fn synapse_init_stays_in_range((r, c) in shape(), seed in any::<u64>()) {
        let mut m = Matrix::new(r, c).unwrap();
        m.init_synapse_with_seed(seed);
        let range = standard_synapse_range(c).unwrap();
        prop_assert!(m.as_slice().iter().all(|v| (-range..=range).contains(v)));
    }
}

#[test]
fn mismatches_are_rejected() {
    let a = Matrix::new(2, 3).unwrap();
    assert!(matches!(
        a.multiply(&Matrix::new(2, 2).unwrap(), false),
        Err(Error::DimensionMismatch(_))
    ));
    assert!(matches!(
        a.add(&Matrix::new(3, 2).unwrap()),
        Err(Error::DimensionMismatch(_))
    ));
    assert!(matches!(
        Matrix::new(3, 3).unwrap().get_cell(5, 0),
        Err(Error::IndexOutOfRange(_))
    ));
}

#[test]
fn shrink_then_grow_loses_discarded_cells() {
    let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let b = a.redimension_zeroed(1, 1).unwrap().redimension_zeroed(2, 3).unwrap();
    assert_eq!(b.to_rows(), vec![vec![1.0, 0.0, 0.0], vec![0.0, 0.0, 0.0]]);
}
