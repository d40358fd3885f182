use async_trait::async_trait;
use rand::Rng;

/// Distance between two locations in miles. A real deployment would back
/// this with a routing or maps provider; the estimator is a capability so
/// fare math never depends on where the number comes from.
#[async_trait]
pub trait DistanceEstimator: Send + Sync {
    async fn estimate(&self, pickup: &str, drop: &str) -> anyhow::Result<f64>;
}

/// Stand-in estimator: uniform draw from 5 to 25 miles.
pub struct RandomDistanceEstimator;

#[async_trait]
impl DistanceEstimator for RandomDistanceEstimator {
    async fn estimate(&self, _pickup: &str, _drop: &str) -> anyhow::Result<f64> {
        Ok(rand::thread_rng().gen_range(5.0..=25.0))
    }
}
