//! Stream lifecycle markers.
//!
//! Every inbound partition opens with a `START` marker and, once the
//! producer has delivered everything it intends to replay, closes with a
//! `DONE` marker. Data messages arrive in between.

use serde::{Deserialize, Serialize};

use crate::ids::PartitionKey;

/// Lifecycle marker of one stream partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataStreamState {
    /// Partition has started delivering
    Start,
    /// Partition has delivered everything
    Done,
}

/// A message on a partition: payload or lifecycle marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMessage<T> {
    /// Payload
    Data(T),
    /// Lifecycle marker
    State(DataStreamState),
}

/// A stream message together with the partition it arrived on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionedMessage<T> {
    /// Source partition
    pub partition: PartitionKey,
    /// Message body
    pub message: StreamMessage<T>,
}

impl<T> PartitionedMessage<T> {
    /// Wraps a payload.
    pub fn data(partition: PartitionKey, payload: T) -> Self {
        Self {
            partition,
            message: StreamMessage::Data(payload),
        }
    }

    /// Wraps a lifecycle marker.
    pub fn state(partition: PartitionKey, state: DataStreamState) -> Self {
        Self {
            partition,
            message: StreamMessage::State(state),
        }
    }
}
