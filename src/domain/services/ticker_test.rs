use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::run_vitals;

#[tokio::test]
async fn it_streams_readings_until_cancelled() -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let token = CancellationToken::new();
    let handle = tokio::spawn(run_vitals(Duration::from_millis(5), tx, token.clone()));

    for _ in 0..3 {
        let vitals = rx.recv().await.unwrap();
        assert!((60..=100).contains(&vitals.bpm));
        assert!((95..=100).contains(&vitals.spo2));
        assert!((10..=40).contains(&vitals.stress));
    }

    token.cancel();
    handle.await??;
    return Ok(());
}

#[tokio::test]
async fn it_stops_when_the_receiver_is_dropped() -> Result<()> {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);

    run_vitals(Duration::from_millis(5), tx, CancellationToken::new()).await?;
    return Ok(());
}
