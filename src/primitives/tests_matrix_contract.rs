// =========================================================================
// Matrix storage contract: shape bookkeeping for row-major storage.
// =========================================================================

use super::*;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_from_rows_round_trips_every_cell(
        rows in 0usize..6,
        cols in 0usize..6,
        seed in prop::collection::vec(0u8..2, 36),
    ) {
        let nested: Vec<Vec<u8>> = (0..rows)
            .map(|i| (0..cols).map(|j| seed[i * 6 + j]).collect())
            .collect();
        let m = Matrix::from_rows(&nested, cols).expect("rectangular input");

        prop_assert_eq!(m.shape(), (rows, cols));
        for (i, row) in nested.iter().enumerate() {
            prop_assert_eq!(m.row(i), row.as_slice());
        }
    }

    #[test]
    fn prop_data_length_mismatch_rejected(rows in 1usize..5, cols in 1usize..5, extra in 1usize..3) {
        let data = vec![0u8; rows * cols + extra];
        prop_assert!(Matrix::from_vec(rows, cols, data).is_err());
    }
}
