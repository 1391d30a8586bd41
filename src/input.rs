//! Edge-triggered input routing
//!
//! An [`InputGroup`] is a fixed set of inputs, each tagged with the event code it
//! reports. When the group's interrupt fires, [`InputGroup::service`] hands every
//! latched rising edge to the handler and acknowledges it afterwards.
//!
//! Edges latched in the same interrupt are delivered one at a time in declaration
//! order. That order comes from the scan, not from when the edges happened.

/// An input with a latched rising-edge flag
pub trait EdgeInput {
    /// Enables rising-edge detection.
    fn listen(&mut self);

    /// Whether a rising edge is latched and not yet acknowledged.
    fn rising_edge_pending(&self) -> bool;

    /// Clears the latched edge.
    fn acknowledge(&mut self);
}

pub struct InputGroup<P, const N: usize> {
    inputs: [(u8, P); N],
}

impl<P: EdgeInput, const N: usize> InputGroup<P, N> {
    /// Builds a group from `(event code, input)` pairs.
    pub fn new(inputs: [(u8, P); N]) -> Self {
        Self { inputs }
    }

    /// Enables edge detection on every input in the group.
    pub fn listen(&mut self) {
        for (_, input) in self.inputs.iter_mut() {
            input.listen();
        }
    }

    /// Delivers each pending edge to `handler` and returns how many fired.
    pub fn service<F: FnMut(u8)>(&mut self, mut handler: F) -> usize {
        let mut delivered = 0;
        for (code, input) in self.inputs.iter_mut() {
            if input.rising_edge_pending() {
                handler(*code);
                input.acknowledge();
                delivered += 1;
            }
        }
        delivered
    }

    pub fn codes(&self) -> [u8; N] {
        let mut codes = [0; N];
        for (slot, (code, _)) in codes.iter_mut().zip(self.inputs.iter()) {
            *slot = *code;
        }
        codes
    }
}
