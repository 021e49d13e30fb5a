use super::{CartStore, CustomerInfo, Order, OrderStore, PaymentMethod};
use crate::CheckoutError;
use tracing::{info, warn};

/// Simulated checkout: turns the cart into an order and empties the cart.
///
/// No payment is taken. Fails without touching either store when a customer
/// field is blank or the cart is empty. If the cart cannot be cleared the
/// placed order is withdrawn again, so a retry does not duplicate it.
pub fn checkout(
    cart: &mut CartStore,
    orders: &mut OrderStore,
    customer: CustomerInfo,
    payment_method: PaymentMethod,
) -> Result<Order, CheckoutError> {
    customer.validate()?;
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let order = orders.place(cart.items().to_vec(), cart.total(), payment_method, customer)?;
    if let Err(err) = cart.clear() {
        if let Err(rollback) = orders.discard(&order.id) {
            warn!(order = %order.id, %rollback, "could not withdraw order");
        }
        return Err(err.into());
    }
    info!(order = %order.id, total = order.total, payment = payment_method.label(), "order placed");
    Ok(order)
}
