//! Gesture events delivered by the host.

/// One step of a pointer gesture, in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Pointer pressed
    Start { x: i32, y: i32 },
    /// Pointer dragged while pressed
    Move { x: i32, y: i32 },
    /// Pointer released
    End,
    /// Gesture aborted by the host (e.g. focus lost, right click)
    Cancel,
}
