pub(crate) const DEFAULT_USER_AGENT: &str = concat!("orderstorm/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_ORDER_URL: &str = "http://localhost:8080/v1/order/create-from-cart";

/// Output of the data preparation step.
pub(crate) const DEFAULT_USERS_FILE: &str = "user_data.json";

pub(crate) const DEFAULT_PAYMENT_METHOD: &str = "COD";

/// Config filenames checked when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILES: [&str; 2] = ["orderstorm.toml", "orderstorm.json"];
