#[cfg(test)]
#[path = "ticker_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Vitals;

pub const VITALS_PERIOD: Duration = Duration::from_secs(2);

/// Emits a fresh random-walk reading every `period` until cancelled or
/// until the receiver goes away.
pub async fn run_vitals(
    period: Duration,
    tx: mpsc::UnboundedSender<Vitals>,
    cancel_token: CancellationToken,
) -> Result<()> {
    let mut rng = StdRng::from_entropy();
    let mut vitals = Vitals::default();
    let mut ticker = tokio::time::interval(period);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => {
                tracing::debug!("Vitals ticker cancelled");
                return Ok(());
            }
            _ = ticker.tick() => {
                vitals.step(&mut rng);
                if tx.send(vitals).is_err() {
                    tracing::debug!("Vitals receiver dropped");
                    return Ok(());
                }
            }
        }
    }
}
