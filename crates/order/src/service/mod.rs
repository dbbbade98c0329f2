mod command;
mod query;

pub use self::command::OrderCommandService;
pub use self::query::OrderQueryService;

use shared::errors::ServiceError;

pub(crate) fn validation_errors(errors: validator::ValidationErrors) -> ServiceError {
    ServiceError::Validation(errors.to_string().split('\n').map(str::to_string).collect())
}
