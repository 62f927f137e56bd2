// Touch anchor for the single active drag
use crate::model::{Displacement, Point};

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct TouchAnchor {
    last: Option<Point>,
}

impl TouchAnchor {
    /// Starts a drag at `p`, replacing any previous anchor.
    pub fn start(&mut self, p: Point) {
        self.last = Some(p);
    }

    /// Displacement from the previous raw sample to `p`, then re-anchors at `p`.
    /// `None` when no drag is active.
    pub fn advance(&mut self, p: Point) -> Option<Displacement> {
        let prev = self.last?;
        self.last = Some(p);
        Some(Displacement::between(prev, p))
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn is_active(&self) -> bool {
        self.last.is_some()
    }
}
