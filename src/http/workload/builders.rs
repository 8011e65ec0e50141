use reqwest::{Client, Request, Url};
use serde::Serialize;

use crate::domain::{Identifier, UserContext};

/// Every order asks for exactly one unit.
const ORDER_QUANTITY: u32 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderBody<'ctx> {
    user_id: &'ctx Identifier,
    address_id: &'ctx Identifier,
    payment_method: &'ctx str,
    selected_items: [SelectedItem<'ctx>; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectedItem<'ctx> {
    product_id: &'ctx Identifier,
    size_id: &'ctx Identifier,
    quantity: u32,
}

/// Builds the order-creation POST for `user`. The body depends only on the
/// user context and payment method, so repeated iterations send identical
/// payloads.
pub(crate) fn build_order_request(
    client: &Client,
    target: &Url,
    user: &UserContext,
    payment_method: &str,
) -> Result<Request, reqwest::Error> {
    let body = OrderBody {
        user_id: &user.user_id,
        address_id: &user.address_id,
        payment_method,
        selected_items: [SelectedItem {
            product_id: &user.target_product.product_id,
            size_id: &user.target_product.size_id,
            quantity: ORDER_QUANTITY,
        }],
    };
    client
        .post(target.clone())
        .bearer_auth(&user.auth_token)
        .json(&body)
        .build()
}
