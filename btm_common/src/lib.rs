mod money;

pub mod helpers;
pub mod op;
mod secret;

pub use money::{Money, MoneyConversionError, NT_CURRENCY_CODE};
pub use secret::Secret;
