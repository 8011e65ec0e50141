mod builders;
mod execution;

pub(crate) use execution::{execute_order, extract_error_detail};

#[cfg(test)]
pub(crate) use builders::build_order_request;
#[cfg(test)]
pub(crate) use execution::classify_response;
