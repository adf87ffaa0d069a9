//! Output channel with nested buffering
//!
//! Text written while no frame is open goes straight to the sink. Opening a
//! frame redirects all writes into that frame's buffer until it is popped,
//! which hands the buffered text back to the caller.

use std::fmt;
use std::io::{self, Write};

/// What opened an output frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameLabel {
    /// A content capture, carrying the identifier given at start (if any)
    Capture(Option<String>),
    /// A buffered render
    Render,
}

/// A popped frame and the text it buffered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub label: FrameLabel,
    pub text: String,
}

/// Stack of output frames in front of a sink
pub struct OutputStack {
    sink: Box<dyn Write + Send>,
    frames: Vec<Frame>,
}

impl Default for OutputStack {
    fn default() -> Self {
        Self::new(Box::new(io::stdout()))
    }
}

impl fmt::Debug for OutputStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStack")
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl OutputStack {
    /// Create a stack writing unbuffered output to `sink`
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self {
            sink,
            frames: Vec::new(),
        }
    }

    /// Replace the sink
    pub fn set_sink(&mut self, sink: Box<dyn Write + Send>) {
        self.sink = sink;
    }

    /// Write text to the top frame, or to the sink when nothing is buffering
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.text.push_str(text);
                Ok(())
            }
            None => self.sink.write_all(text.as_bytes()),
        }
    }

    /// Flush the sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }

    /// Open a new frame on top of the stack
    pub fn push(&mut self, label: FrameLabel) {
        self.frames.push(Frame {
            label,
            text: String::new(),
        });
    }

    /// Pop the top frame
    pub fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Label of the top frame
    pub fn top(&self) -> Option<&FrameLabel> {
        self.frames.last().map(|f| &f.label)
    }

    /// Total number of open frames
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Number of open capture frames
    pub fn capture_depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f.label, FrameLabel::Capture(_)))
            .count()
    }

    /// Pop every frame above `depth` and return them, topmost first
    pub fn unwind_to(&mut self, depth: usize) -> Vec<Frame> {
        let mut popped = Vec::new();
        while self.frames.len() > depth {
            if let Some(frame) = self.frames.pop() {
                popped.push(frame);
            }
        }
        popped
    }
}
