//! Creates an SBP payment, then polls it until the user pays or it is canceled.
//!
//! ```sh
//! YOOKASSA_ACCOUNT_ID=... YOOKASSA_SECRET_KEY=... RUST_LOG=yookassa_kit=debug \
//!     cargo run --example create_payment
//! ```

use std::time::Duration;

use tracing_subscriber::EnvFilter;
use yookassa_kit::{
    client::Client,
    confirmation::Confirmation,
    handler::PaymentHandler,
    metadata::{INVOICE_ID, Metadata},
    payment::{Payment, Status},
    payment_method::{PaymentMethod, PaymentMethodType},
    types::Amount,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = Client::from_env()?;
    let mut handler = PaymentHandler::new(&client);

    let request = Payment::builder()
        .amount(Amount::rub("100.00"))
        .capture(true)
        .confirmation(Confirmation::redirect("https://shop.example/return"))
        .payment_method(PaymentMethod::of_type(PaymentMethodType::Sbp))
        .description("Order No. 72")
        .metadata(Metadata::from_entries([(INVOICE_ID, "inv-72")])?)
        .build();

    let created = handler
        .set_idempotency_key("order-72")
        .create_payment(&request)
        .await?;
    let payment_id = created.id.clone().unwrap_or_default();
    tracing::info!(%payment_id, "Payment created");

    loop {
        let payment = handler.find_payment(&payment_id).await?;
        match payment.status {
            Some(status) if status.is_final() => {
                tracing::info!(status = status.as_str(), "Payment finished");
                if status == Status::Succeeded {
                    let sbp = payment.sbp_payment_method()?;
                    tracing::info!(operation = ?sbp.sbp_operation_id, "Paid via SBP");
                }
                break;
            }
            _ => tokio::time::sleep(Duration::from_secs(3)).await,
        }
    }

    Ok(())
}
