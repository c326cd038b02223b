//! Tessera replay - drive the snapshot engine from recorded files.
//!
//! # Usage
//!
//! ```bash
//! tessera-replay --reference-data refdata.json --events session.jsonl
//!
//! # Publish every resolvable update
//! tessera-replay -r refdata.json -e session.jsonl --min-publish-interval-ms 0
//! ```
//!
//! Published snapshots are written to stdout as JSON, one per line.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use tessera_engine::{
    ChannelPublisher, EngineConfig, LaneDispatcher, PricingEngineBuilder, ReferenceDataConsumer,
    TopOfBookConsumer, TradeDataConsumer,
};
use tessera_traits::{DataStreamState, MarketEvent, PartitionKey, PartitionedMessage};

mod cli;
mod input;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(interval) = cli.min_publish_interval_ms {
        config.min_publish_interval_ms = interval;
    }

    tessera_engine::init_tracing(&config.log_filter)?;
    info!("Tessera replay v{}", env!("CARGO_PKG_VERSION"));

    let reference_data = input::load_reference_data(&cli.reference_data)?;
    let events = input::load_events(&cli.events)?;

    // Build engine
    // Lossless: lanes wait for the printer rather than drop snapshots
    let (publisher, mut snapshots) = ChannelPublisher::new(config.broadcast_capacity);
    let publisher = Arc::new(publisher);
    let engine = Arc::new(
        PricingEngineBuilder::new()
            .with_config(config)
            .with_publisher(publisher.clone())
            .build()?,
    );

    let pretty = cli.pretty;
    let printer = tokio::spawn(async move {
        let mut printed = 0_usize;
        while let Some(snapshot) = snapshots.recv().await {
            let line = if pretty {
                serde_json::to_string_pretty(&snapshot)
            } else {
                serde_json::to_string(&snapshot)
            };
            match line {
                Ok(line) => {
                    println!("{line}");
                    printed += 1;
                }
                Err(e) => warn!("Failed to encode snapshot: {}", e),
            }
        }
        printed
    });

    // Reference data first, as a single-partition stream
    let reference_consumer = ReferenceDataConsumer::new(engine.clone(), 1);
    let partition = PartitionKey::new("reference-data", 0);
    reference_consumer.on_message(PartitionedMessage::state(
        partition.clone(),
        DataStreamState::Start,
    ));
    for record in reference_data {
        reference_consumer.on_message(PartitionedMessage::data(partition.clone(), record));
    }
    reference_consumer.on_message(PartitionedMessage::state(partition, DataStreamState::Done));
    reference_consumer.barrier().wait().await;
    info!(
        "Loaded {} instruments and {} curves",
        engine.reference_data().len(),
        engine.market_data().len()
    );

    // Market data
    let lanes = Arc::new(LaneDispatcher::spawn(engine.clone()));
    let trades = TradeDataConsumer::new(lanes.clone(), 1);
    let books = TopOfBookConsumer::new(lanes.clone(), 1);
    let trade_partition = PartitionKey::new("trades", 0);
    let book_partition = PartitionKey::new("top-of-book", 0);

    trades
        .on_message(PartitionedMessage::state(
            trade_partition.clone(),
            DataStreamState::Start,
        ))
        .await?;
    books
        .on_message(PartitionedMessage::state(
            book_partition.clone(),
            DataStreamState::Start,
        ))
        .await?;

    let total = events.len();
    for event in events {
        match event {
            MarketEvent::Trade(trade) => {
                trades
                    .on_message(PartitionedMessage::data(trade_partition.clone(), trade))
                    .await?;
            }
            MarketEvent::TopOfBook(book) => {
                books
                    .on_message(PartitionedMessage::data(book_partition.clone(), book))
                    .await?;
            }
        }
    }

    trades
        .on_message(PartitionedMessage::state(trade_partition, DataStreamState::Done))
        .await?;
    books
        .on_message(PartitionedMessage::state(book_partition, DataStreamState::Done))
        .await?;
    trades.barrier().wait().await;
    books.barrier().wait().await;

    lanes.flush().await?;
    info!(
        "Replayed {} events across {} instruments",
        total,
        engine.active_instruments()
    );

    // Release every sender so the printer sees the end of the stream
    drop(trades);
    drop(books);
    match Arc::try_unwrap(lanes) {
        Ok(lanes) => lanes.shutdown().await,
        Err(_) => warn!("Lanes still shared at shutdown"),
    }
    drop(reference_consumer);
    drop(engine);
    drop(publisher);

    let printed = printer.await?;
    info!("Published {} snapshots", printed);
    Ok(())
}
