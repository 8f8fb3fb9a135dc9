//! Guard for the host's frame loop.
//!
//! At most one loop runs at a time: `start` on an active loop is refused and
//! `cancel` drops the pending handle.  The host feeds it frame timestamps and
//! gets back the delta to simulate.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameLoop {
    handle: Option<u64>,
    next_handle: u64,
    last_time: Option<f64>,
}

impl FrameLoop {
    pub fn new() -> Self {
        FrameLoop::default()
    }

    /// Returns `false` if a loop is already active.
    pub fn start(&mut self) -> bool {
        if self.handle.is_some() {
            return false;
        }
        self.next_handle += 1;
        self.handle = Some(self.next_handle);
        self.last_time = None;
        true
    }

    pub fn cancel(&mut self) {
        self.handle = None;
        self.last_time = None;
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<u64> {
        self.handle
    }

    /// Delta in ms since the previous frame, or `None` when no loop is
    /// active.  The first frame after `start` yields zero.
    pub fn tick(&mut self, timestamp: f64) -> Option<f64> {
        self.handle?;
        let delta = match self.last_time {
            Some(last) => (timestamp - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(timestamp);
        Some(delta)
    }
}
