//! Helpers shared by the pipeline stages.
//!
//! - The rayon [`THREAD_POOL`] used for per-sample aggregation. Its size is
//!   read from the `DREAMING_NUM_THREADS` environment variable.
//! - [`poisson_adjust`], the occupancy correction applied to partially
//!   occupied wells.
//! - Macros for builder-style `with_*` setters and getters.

use once_cell::sync::Lazy;
use rayon::{
    ThreadPool,
    ThreadPoolBuilder,
};

use crate::data_structs::typedef::CountType;

pub const THREADS_ENV: &str = "DREAMING_NUM_THREADS";

pub static THREAD_POOL: Lazy<ThreadPool> = Lazy::new(|| {
    let num_threads: Option<usize> = std::env::var(THREADS_ENV)
        .ok()
        .and_then(|str| str.parse::<usize>().ok());
    ThreadPoolBuilder::new()
        .num_threads(num_threads.unwrap_or(0))
        .build()
        .expect("Failed to create thread pool")
});

pub fn n_threads() -> usize {
    THREAD_POOL.current_num_threads()
}

/// Corrects the number of wells showing a peak for wells that held more than
/// one template of the same methylation state.
///
/// Under Poisson loading, `c` positive wells out of `n` imply
/// `-ln(1 - c/n) * n` templates, rounded half away from zero.
/// `c` must be below `n`: a fully occupied column has no finite estimate.
pub fn poisson_adjust(
    count: usize,
    n_wells: usize,
) -> CountType {
    debug_assert!(count < n_wells, "saturated column has no Poisson estimate");
    let n = n_wells as f64;
    let occupancy = count as f64 / n;
    (-(1.0 - occupancy).ln() * n).round()
}

#[macro_export]
macro_rules! getter_fn {
    ($field_name: ident, $field_type: ty) => {
        pub fn $field_name(&self) -> &$field_type {
            &self.$field_name
        }
    };
}

#[macro_export]
macro_rules! with_field_fn {
    ($field_name: ident, $field_type: ty) => {
        paste::paste! {
            pub fn [<with_$field_name>](mut self, value: $field_type) -> Self {
            self.$field_name = value;
            self
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 12, 0.0)]
    #[case(1, 12, 1.0)]
    #[case(6, 12, 8.0)]
    #[case(11, 12, 30.0)]
    fn test_poisson_adjust_values(
        #[case] count: usize,
        #[case] n_wells: usize,
        #[case] expected: CountType,
    ) {
        assert_eq!(poisson_adjust(count, n_wells), expected);
    }

    #[test]
    fn test_poisson_adjust_monotonic_and_bounded() {
        for n_wells in [4usize, 12, 48, 96] {
            let mut previous = 0.0;
            for count in 1..n_wells {
                let adjusted = poisson_adjust(count, n_wells);
                assert!(
                    adjusted >= previous,
                    "not monotonic at {count}/{n_wells}"
                );
                assert!(
                    adjusted >= count as CountType,
                    "adjusted below raw at {count}/{n_wells}"
                );
                previous = adjusted;
            }
        }
    }

    #[test]
    fn test_poisson_adjust_rounds_to_nearest() {
        // 2.77 and 1.386 before rounding
        assert_eq!(poisson_adjust(2, 4), 3.0);
        assert_eq!(poisson_adjust(1, 2), 1.0);
    }
}
