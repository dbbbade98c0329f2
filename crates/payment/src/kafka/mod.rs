mod consumer;

pub use self::consumer::OrderEventHandler;
