//! Registration handlers.

mod register_for_event;

pub use register_for_event::{
    RegisterForEventCommand, RegisterForEventHandler, RegisterForEventResult,
};
