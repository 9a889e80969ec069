// File: crates/chart-report/tests/common/mod.rs
// Purpose: Shared dataset fixtures for report pipeline tests.

#![allow(dead_code)]

use chart_report::DataSet;

// A whole multiple of ten minutes, so bucket boundaries line up with samples.
pub const T0: i64 = 1_700_000_400_000;
pub const MINUTE: i64 = 60_000;

pub fn minutes(n: usize) -> Vec<i64> {
    (0..n as i64).map(|i| T0 + i * MINUTE).collect()
}

/// A host with `CPU_ALL` User%, Sys%, Wait% over `n` minutes.
pub fn cpu_host(name: &str, n: usize) -> DataSet {
    let user: Vec<f64> = (0..n).map(|i| 20.0 + (i % 10) as f64).collect();
    let sys: Vec<f64> = (0..n).map(|i| 5.0 + (i % 3) as f64).collect();
    let wait = vec![1.0; n];
    DataSet::new(name, minutes(n))
        .with_type("CPU_ALL", vec!["User%".into(), "Sys%".into(), "Wait%".into()], vec![user, sys, wait])
        .expect("aligned columns")
}

/// A host with only `MEM` memfree over `n` minutes.
pub fn mem_host(name: &str, n: usize) -> DataSet {
    DataSet::new(name, minutes(n))
        .with_type("MEM", vec!["memfree".into()], vec![vec![2048.0; n]])
        .expect("aligned columns")
}
