//! Fixed-arity feature vectors for the two models.

use ndarray::{Array2, ArrayView1, aview1};

/// Workload signature consumed by the partitioning model.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartitionFeatures {
    /// Partition load average.
    pub part_avg: f64,
    /// Partition load skew.
    pub part_skew: f64,
    /// Record access average.
    pub rec_avg: f64,
    /// Cache hit/latency measure.
    pub hit_rate: f64,
    /// Fraction of reads.
    pub read_rate: f64,
    /// Observed conflict rate.
    pub conf_rate: f64,
}

impl PartitionFeatures {
    pub const LEN: usize = 6;

    pub fn new(
        part_avg: f64,
        part_skew: f64,
        rec_avg: f64,
        hit_rate: f64,
        read_rate: f64,
        conf_rate: f64,
    ) -> Self {
        Self {
            part_avg,
            part_skew,
            rec_avg,
            hit_rate,
            read_rate,
            conf_rate,
        }
    }

    pub fn to_array(self) -> [f64; Self::LEN] {
        [
            self.part_avg,
            self.part_skew,
            self.rec_avg,
            self.hit_rate,
            self.read_rate,
            self.conf_rate,
        ]
    }
}

/// Workload signature consumed by the concurrency-control model.
///
/// Partition load average and skew are not part of this model's input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConcurrencyFeatures {
    pub rec_avg: f64,
    pub hit_rate: f64,
    pub read_rate: f64,
    pub conf_rate: f64,
}

impl ConcurrencyFeatures {
    pub const LEN: usize = 4;

    pub fn new(rec_avg: f64, hit_rate: f64, read_rate: f64, conf_rate: f64) -> Self {
        Self {
            rec_avg,
            hit_rate,
            read_rate,
            conf_rate,
        }
    }

    pub fn to_array(self) -> [f64; Self::LEN] {
        [self.rec_avg, self.hit_rate, self.read_rate, self.conf_rate]
    }
}

impl From<PartitionFeatures> for ConcurrencyFeatures {
    fn from(features: PartitionFeatures) -> Self {
        Self {
            rec_avg: features.rec_avg,
            hit_rate: features.hit_rate,
            read_rate: features.read_rate,
            conf_rate: features.conf_rate,
        }
    }
}

/// Stack fixed-size rows into an `n x N` matrix.
pub fn to_matrix<const N: usize>(rows: &[[f64; N]]) -> Array2<f64> {
    let mut matrix = Array2::zeros((rows.len(), N));
    for (mut dst, src) in matrix.rows_mut().into_iter().zip(rows) {
        let view: ArrayView1<f64> = aview1(src);
        dst.assign(&view);
    }
    matrix
}

/// Single-row matrix for one prediction query.
pub fn single_row<const N: usize>(row: [f64; N]) -> Array2<f64> {
    to_matrix(&[row])
}
