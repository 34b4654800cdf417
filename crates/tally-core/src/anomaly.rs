//! Z-score anomaly detection

use tracing::debug;

use crate::error::{ensure_finite, Error, Result};
use crate::models::AnomalyRecord;
use crate::trend::{mean, std_dev};

/// Flag values at least `threshold` standard deviations from the mean
///
/// The boundary is inclusive. A constant series has no spread, so nothing in
/// it is anomalous.
pub fn detect_anomalies(values: &[f64], threshold: f64) -> Result<Vec<AnomalyRecord>> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(Error::validation(format!(
            "Anomaly threshold must be a positive number (got {})",
            threshold
        )));
    }
    ensure_finite(values, "Anomaly series")?;

    let m = mean(values);
    let sd = std_dev(values);

    let records: Vec<AnomalyRecord> = values
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            if sd == 0.0 {
                return AnomalyRecord {
                    index,
                    value,
                    is_anomaly: false,
                    z_score: 0.0,
                };
            }
            AnomalyRecord {
                index,
                value,
                is_anomaly: (value - m).abs() >= threshold * sd,
                z_score: (value - m) / sd,
            }
        })
        .collect();

    debug!(
        points = values.len(),
        anomalies = records.iter().filter(|r| r.is_anomaly).count(),
        threshold,
        "Detected anomalies"
    );

    Ok(records)
}
