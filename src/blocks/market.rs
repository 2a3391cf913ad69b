//! Market snapshot: exchange rates for configured pairs plus one crypto price.
//!
//! Unlike the other blocks, failures here degrade a single line: one bad pair
//! leaves the remaining rates (and the crypto price) intact.

use crate::api::{ApiClient, MARKET_TIMEOUT};
use crate::models::{Block, CryptoPrices, CurrencyPair, FAILED_PLACEHOLDER, FxRates};
use crate::utils::group_thousands;
use std::error::Error;
use tracing::{instrument, warn};

const MARKET_HEADING: &str = "### 💱 Market Snapshot";

/// Coin to price and the currency to price it in.
#[derive(Debug, Clone, Copy)]
pub struct CryptoQuote<'a> {
    /// Id understood by the price API, e.g. `bitcoin`.
    pub id: &'a str,
    /// Ticker shown in the report, e.g. `BTC`.
    pub symbol: &'a str,
    /// Quote currency, e.g. `usd`.
    pub vs: &'a str,
}

/// Spot rate for one pair, as units of `quote` per one `base`.
#[instrument(level = "debug", skip(api))]
pub async fn fetch_rate(api: &ApiClient, fx_base_url: &str, pair: &CurrencyPair) -> Result<f64, Box<dyn Error>> {
    let url = format!("{}/latest", fx_base_url.trim_end_matches('/'));
    let response: FxRates = api
        .get_json(
            &url,
            &[("from", pair.base.as_str()), ("to", pair.quote.as_str())],
            MARKET_TIMEOUT,
        )
        .await?;
    response
        .rates
        .get(&pair.quote)
        .copied()
        .ok_or_else(|| format!("rate for {} missing from response", pair.quote).into())
}

/// Spot price of one coin.
#[instrument(level = "debug", skip(api))]
pub async fn fetch_crypto_price(
    api: &ApiClient,
    crypto_base_url: &str,
    quote: &CryptoQuote<'_>,
) -> Result<f64, Box<dyn Error>> {
    let url = format!("{}/simple/price", crypto_base_url.trim_end_matches('/'));
    let vs = quote.vs.to_lowercase();
    let prices: CryptoPrices = api
        .get_json(&url, &[("ids", quote.id), ("vs_currencies", vs.as_str())], MARKET_TIMEOUT)
        .await?;
    prices
        .get(quote.id)
        .and_then(|by_currency| by_currency.get(&vs))
        .copied()
        .ok_or_else(|| format!("price for {}/{} missing from response", quote.id, vs).into())
}

/// `- USD/EUR: 0.9234`
pub fn render_rate(pair: &CurrencyPair, rate: f64) -> String {
    format!("- {pair}: {rate:.4}")
}

/// `- BTC/USD: $67,013`; the `$` prefix is only used for USD.
pub fn render_crypto(quote: &CryptoQuote<'_>, price: f64) -> String {
    let vs = quote.vs.to_uppercase();
    let prefix = if vs == "USD" { "$" } else { "" };
    format!(
        "- {}/{}: {}{}",
        quote.symbol.to_uppercase(),
        vs,
        prefix,
        group_thousands(price.round() as i64)
    )
}

fn failed_line(label: &str) -> String {
    format!("- {label}: {FAILED_PLACEHOLDER}")
}

/// One line per configured pair followed by the crypto price.
#[instrument(level = "info", skip_all, fields(pairs = pairs.len()))]
pub async fn market_block(
    api: &ApiClient,
    fx_base_url: &str,
    pairs: &[CurrencyPair],
    crypto_base_url: &str,
    crypto: &CryptoQuote<'_>,
) -> Block {
    let mut lines = Vec::with_capacity(pairs.len() + 1);

    for pair in pairs {
        match fetch_rate(api, fx_base_url, pair).await {
            Ok(rate) => lines.push(render_rate(pair, rate)),
            Err(e) => {
                warn!(%pair, error = %e, "Exchange rate lookup failed");
                lines.push(failed_line(&pair.to_string()));
            }
        }
    }

    match fetch_crypto_price(api, crypto_base_url, crypto).await {
        Ok(price) => lines.push(render_crypto(crypto, price)),
        Err(e) => {
            warn!(coin = crypto.id, error = %e, "Crypto price lookup failed");
            let label = format!("{}/{}", crypto.symbol.to_uppercase(), crypto.vs.to_uppercase());
            lines.push(failed_line(&label));
        }
    }

    Block::ready(MARKET_HEADING, lines.join("\n"))
}
