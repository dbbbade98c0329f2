mod consumer;

pub use self::consumer::PaymentEventHandler;
