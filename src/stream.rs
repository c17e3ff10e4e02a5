use std::fmt;

/// Memory-backed text buffer passed between pipeline stages.
///
/// A stage writes into a fresh `Stream` and hands it over by value; the next stage
/// only ever reads it. Nothing keeps a reference to a stream once it has been moved on.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Stream {
    buf: String,
}

impl Stream {
    /// An empty stream, as seen by the first stage of every pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Consume the stream and return the collected text.
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl From<String> for Stream {
    fn from(buf: String) -> Self {
        Self { buf }
    }
}

impl From<&str> for Stream {
    fn from(text: &str) -> Self {
        Self {
            buf: text.to_owned(),
        }
    }
}

impl fmt::Write for Stream {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}
