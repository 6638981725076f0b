//! User-facing notification text

use rust_decimal::Decimal;

/// Message sent after a successful credit
pub fn credit_message(reward: Decimal, balance: Decimal, ads_watched: u64) -> String {
    format!(
        "🎉 Ad reward credited: +${:.2}\nNew balance: ${:.2}\nAds watched: {}",
        reward, balance, ads_watched
    )
}
