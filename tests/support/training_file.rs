use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// One synthetic workload sample as written to a training file.
#[derive(Debug, Clone, Copy)]
pub struct Sample {
    pub features: [f64; 6],
    pub primary: u8,
    pub secondary: Option<u8>,
}

/// Render samples in the tab-separated training format with a five-column prefix.
pub fn render(samples: &[Sample]) -> String {
    let mut text = String::new();
    for (idx, sample) in samples.iter().enumerate() {
        let _ = write!(text, "{idx}\t10\t1\t0.5000\t3");
        for value in sample.features {
            let _ = write!(text, "\t{value:.4}");
        }
        let _ = write!(text, "\t{}", sample.primary);
        if let Some(secondary) = sample.secondary {
            let _ = write!(text, "\t{secondary}");
        }
        text.push('\n');
    }
    text
}

pub fn write_samples(dir: &Path, name: &str, samples: &[Sample]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, render(samples)).expect("write training file");
    path
}

/// Workload where a high conflict rate means a hot partition and the read rate
/// decides between outcome codes 1 and 2.
pub fn synthetic_workload(seed: u64, count: usize) -> Vec<Sample> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let conf_rate: f64 = rng.random_range(0.0..1.0);
            let read_rate: f64 = rng.random_range(0.0..1.0);
            let features = [
                rng.random_range(0.0..100.0),
                rng.random_range(0.0..2.0),
                rng.random_range(1.0..20.0),
                rng.random_range(0.0..1.0),
                read_rate,
                conf_rate,
            ];
            let primary = if conf_rate < 0.3 {
                0
            } else if read_rate < 0.5 {
                1
            } else {
                2
            };
            Sample {
                features,
                primary,
                secondary: None,
            }
        })
        .collect()
}
