// Event infrastructure for the progress engine.
//
// The engine never renders anything; it emits facts on the bus and the host
// UI layer decides how to celebrate them.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::ProgressEvent;

// Internal modules
mod bus;
mod events;
