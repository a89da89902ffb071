//! In-memory [`UserInterface`] for tests.
//!
//! Output is kept as an ordered transcript so tests can assert both what
//! was shown and in which order (a handler header before its report).

use super::UserInterface;

/// Output channel a line was written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Message,
    Success,
    Warning,
    Error,
    Header,
    Raw,
}

/// Records every line written through [`UserInterface`].
#[derive(Debug, Default)]
pub struct MockUI {
    transcript: Vec<(Channel, String)>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every captured line, in write order.
    pub fn transcript(&self) -> &[(Channel, String)] {
        &self.transcript
    }

    /// Lines written to one channel, in write order.
    pub fn lines(&self, channel: Channel) -> Vec<&str> {
        self.transcript
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, line)| line.as_str())
            .collect()
    }

    pub fn headers(&self) -> Vec<&str> {
        self.lines(Channel::Header)
    }

    pub fn raw_output(&self) -> String {
        self.lines(Channel::Raw).join("\n")
    }

    /// Whether any line on `channel` contains `needle`.
    pub fn contains(&self, channel: Channel, needle: &str) -> bool {
        self.transcript
            .iter()
            .any(|(c, line)| *c == channel && line.contains(needle))
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.contains(Channel::Message, needle)
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.contains(Channel::Success, needle)
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.contains(Channel::Warning, needle)
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.contains(Channel::Error, needle)
    }

    fn push(&mut self, channel: Channel, line: &str) {
        self.transcript.push((channel, line.to_string()));
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.push(Channel::Message, msg);
    }

    fn success(&mut self, msg: &str) {
        self.push(Channel::Success, msg);
    }

    fn warning(&mut self, msg: &str) {
        self.push(Channel::Warning, msg);
    }

    fn error(&mut self, msg: &str) {
        self.push(Channel::Error, msg);
    }

    fn show_header(&mut self, identifier: &str) {
        self.push(Channel::Header, identifier);
    }

    fn raw(&mut self, text: &str) {
        self.push(Channel::Raw, text);
    }
}
