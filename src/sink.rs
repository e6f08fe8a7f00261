//! Rendering sink abstraction
//!
//! The gauge is drawn by an external collaborator owned by the host UI.
//! The core only needs to read its initial extent once and push a height
//! on every tick, so that is the whole contract.

/// Target the gauge renders into. Implemented by the host UI layer.
pub trait RenderSink {
    /// Current extent of the target, read once at session start to seed the
    /// gauge value. `None` means the target is absent.
    fn extent(&self) -> Option<u32>;

    /// Consume a new gauge height. Called on every tick.
    fn set_height(&mut self, value: u32);
}

/// In-memory sink used by the demo binary and tests. Records every height
/// written so assertions can replay the tick sequence.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    extent: Option<u32>,
    heights: Vec<u32>,
}

impl MemorySink {
    pub fn new(extent: u32) -> Self {
        Self {
            extent: Some(extent),
            heights: Vec::new(),
        }
    }

    /// A sink whose target is missing, for exercising the unavailable path.
    pub fn detached() -> Self {
        Self {
            extent: None,
            heights: Vec::new(),
        }
    }

    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn last_height(&self) -> Option<u32> {
        self.heights.last().copied()
    }
}

impl RenderSink for MemorySink {
    fn extent(&self) -> Option<u32> {
        self.extent
    }

    fn set_height(&mut self, value: u32) {
        self.heights.push(value);
    }
}
