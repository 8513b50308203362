//! Recorded topic messages played back as a state source
//!
//! Each line of a recording is a JSON array holding the messages delivered in
//! one tick, e.g.
//!
//! ```text
//! [{"topic":"deviceState","data":{"started":true}},{"topic":"carState","data":{"clu_speed_ms":12.5}}]
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use hud_state::Message;
use tracing::{debug, info, warn};

use crate::OnroadError;

/// Non-blocking supplier of the messages delivered since the last tick
pub trait StateSource {
    /// Messages for the next tick; `None` once the source is exhausted
    fn poll(&mut self) -> Option<Vec<Message>>;
}

/// JSON-lines replay
pub struct ReplaySource<R> {
    reader: R,
    line: u64,
    skipped: u64,
}

impl ReplaySource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, OnroadError> {
        let file = File::open(path)?;
        info!("Replaying {}", path.display());
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            skipped: 0,
        }
    }

    /// Lines read so far
    pub fn lines(&self) -> u64 {
        self.line
    }

    /// Lines that failed to parse
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: BufRead> StateSource for ReplaySource<R> {
    fn poll(&mut self) -> Option<Vec<Message>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => {
                    debug!("Replay finished after {} lines", self.line);
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Replay read failed at line {}: {}", self.line + 1, e);
                    return None;
                }
            }
            self.line += 1;

            if buf.iter().all(u8::is_ascii_whitespace) {
                return Some(Vec::new());
            }
            match serde_json::from_slice::<Vec<Message>>(&buf) {
                Ok(messages) => return Some(messages),
                Err(e) => {
                    self.skipped += 1;
                    warn!("Skipping replay line {}: {}", self.line, e);
                }
            }
        }
    }
}
