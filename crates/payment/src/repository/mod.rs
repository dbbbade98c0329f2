mod command;
mod memory;
mod query;

pub use self::command::PaymentCommandRepository;
pub use self::memory::InMemoryPaymentRepository;
pub use self::query::PaymentQueryRepository;
