use std::{collections::VecDeque, io::BufRead};

use crate::foundation::error::{AnimateError, AnimateResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
/// One mutation of the evolving graph.
pub enum GraphEvent {
    NodeAdded {
        id: String,
    },
    EdgeAdded {
        id: String,
        from: String,
        to: String,
        #[serde(default)]
        directed: bool,
    },
    AttributeChanged {
        node: String,
        key: String,
        value: String,
    },
    /// Boundary between simulation steps; the step number is informational.
    StepBegins {
        #[serde(default)]
        step: f64,
    },
}

impl GraphEvent {
    pub fn node_added(id: impl Into<String>) -> Self {
        Self::NodeAdded { id: id.into() }
    }

    pub fn edge_added(
        id: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
        directed: bool,
    ) -> Self {
        Self::EdgeAdded {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            directed,
        }
    }

    pub fn attribute(node: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::AttributeChanged {
            node: node.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn step(step: f64) -> Self {
        Self::StepBegins { step }
    }
}

/// Pull-based, single-consumer event stream. `Ok(None)` marks the end of the stream.
pub trait EventSource {
    fn next_event(&mut self) -> AnimateResult<Option<GraphEvent>>;
}

/// In-memory event stream.
#[derive(Clone, Debug, Default)]
pub struct EventList {
    events: VecDeque<GraphEvent>,
}

impl EventList {
    pub fn new(events: impl IntoIterator<Item = GraphEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: GraphEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for EventList {
    fn next_event(&mut self) -> AnimateResult<Option<GraphEvent>> {
        Ok(self.events.pop_front())
    }
}

/// Event log with one JSON object per line. Blank lines and `#` comments are skipped.
pub struct JsonLinesSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Number of lines consumed so far.
    pub fn line_no(&self) -> usize {
        self.line_no
    }
}

impl JsonLinesSource<std::io::BufReader<std::fs::File>> {
    pub fn open(path: impl AsRef<std::path::Path>) -> AnimateResult<Self> {
        use anyhow::Context as _;

        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("open event log '{}'", path.display()))?;
        Ok(Self::new(std::io::BufReader::new(file)))
    }
}

impl<R: BufRead> EventSource for JsonLinesSource<R> {
    fn next_event(&mut self) -> AnimateResult<Option<GraphEvent>> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_line(&mut self.buf)
                .map_err(|e| AnimateError::io(format!("event log line {}: {e}", self.line_no + 1)))?;
            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = self.buf.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            return serde_json::from_str(line)
                .map(Some)
                .map_err(|e| AnimateError::serde(format!("event log line {}: {e}", self.line_no)));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/events/source.rs"]
mod tests;
