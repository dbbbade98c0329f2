mod bus;
mod handler;

pub use self::bus::{DynEventBus, EventBusTrait};
pub use self::handler::{DynEventHandler, EventHandler};
