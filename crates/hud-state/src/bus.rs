//! Latest-value topic bus
//!
//! Holds the most recent record per topic together with the frame and time it
//! arrived. Reads never block; a topic that was never delivered simply has no
//! value and reports frame 0 / time 0.

use std::collections::HashMap;

use tracing::debug;

use crate::messages::{
    CarControl, CarParams, CarState, ControlsState, DeviceState, GpsLocation, Message, ModelV2,
    RadarState, Topic,
};

#[derive(Debug, Clone, Copy, Default)]
struct Receipt {
    frame: u64,
    time_ns: u64,
}

/// Pull-based view over published topics
#[derive(Debug, Default)]
pub struct TopicBus {
    /// Current frame, advanced once per update
    frame: u64,
    /// Time of the latest update (ns since boot)
    now_ns: u64,
    latest: HashMap<Topic, Message>,
    receipts: HashMap<Topic, Receipt>,
}

macro_rules! topic_reader {
    ($name:ident, $variant:ident, $ty:ty) => {
        pub fn $name(&self) -> Option<&$ty> {
            match self.latest.get(&Topic::$variant) {
                Some(Message::$variant(m)) => Some(m),
                _ => None,
            }
        }
    };
}

impl TopicBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame and store the records delivered since the last one
    pub fn update<I>(&mut self, messages: I, now_ns: u64)
    where
        I: IntoIterator<Item = Message>,
    {
        self.frame += 1;
        self.now_ns = now_ns;

        for msg in messages {
            let topic = msg.topic();
            self.receipts.insert(
                topic,
                Receipt {
                    frame: self.frame,
                    time_ns: now_ns,
                },
            );
            self.latest.insert(topic, msg);
        }

        debug!("Bus frame {} ({} topics known)", self.frame, self.latest.len());
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn now_ns(&self) -> u64 {
        self.now_ns
    }

    /// Whether the topic was delivered in the current frame
    pub fn updated(&self, topic: Topic) -> bool {
        self.receipts
            .get(&topic)
            .is_some_and(|r| r.frame == self.frame)
    }

    /// Frame the topic was last received in (0 if never)
    pub fn rcv_frame(&self, topic: Topic) -> u64 {
        self.receipts.get(&topic).map(|r| r.frame).unwrap_or(0)
    }

    /// Time the topic was last received (0 if never)
    pub fn rcv_time_ns(&self, topic: Topic) -> u64 {
        self.receipts.get(&topic).map(|r| r.time_ns).unwrap_or(0)
    }

    pub fn latest(&self, topic: Topic) -> Option<&Message> {
        self.latest.get(&topic)
    }

    topic_reader!(car_state, CarState, CarState);
    topic_reader!(controls_state, ControlsState, ControlsState);
    topic_reader!(model, ModelV2, ModelV2);
    topic_reader!(radar_state, RadarState, RadarState);
    topic_reader!(car_control, CarControl, CarControl);
    topic_reader!(car_params, CarParams, CarParams);
    topic_reader!(gps, GpsLocationExternal, GpsLocation);
    topic_reader!(device_state, DeviceState, DeviceState);
}
