// src/probe.rs
use craftping::tokio::ping;
use futures::future::join_all;
use log::debug;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::models::server::{ServerRecord, ServerStatusView};

// One status query against a record's host:port. Probe failures never
// escape; anything that goes wrong collapses into an offline view.
pub async fn probe(record: &ServerRecord, limit: Duration) -> ServerStatusView {
    let outcome = timeout(limit, async {
        match TcpStream::connect((record.host.as_str(), record.port)).await {
            Ok(mut stream) => ping(&mut stream, &record.host, record.port)
                .await
                .map_err(|err| err.to_string()),
            Err(err) => Err(err.to_string()),
        }
    })
    .await;

    match outcome {
        Ok(Ok(pong)) => ServerStatusView::online(record, &pong),
        Ok(Err(reason)) => {
            debug!("Probe of {}:{} failed: {}", record.host, record.port, reason);
            ServerStatusView::offline(record)
        }
        Err(_) => {
            debug!(
                "Probe of {}:{} timed out after {}ms",
                record.host,
                record.port,
                limit.as_millis()
            );
            ServerStatusView::offline(record)
        }
    }
}

// Concurrent fan-out over all records; results come back in input order.
pub async fn probe_all(records: &[ServerRecord], limit: Duration) -> Vec<ServerStatusView> {
    join_all(records.iter().map(|record| probe(record, limit))).await
}
