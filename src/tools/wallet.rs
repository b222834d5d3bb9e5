use serde_json::json;

use super::{handler, require_str, ToolDefinition};
use crate::http::RequestSpec;

pub(crate) fn tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition::new(
        "deva_gas_faucet",
        "Request a small amount of ETH on Base network for gas fees. Pricing: 350₭ ($0.35) per drip.",
        json!({
            "type": "object",
            "properties": {
                "wallet_address": { "type": "string", "description": "0x wallet address to receive ETH." }
            },
            "required": ["wallet_address"]
        }),
        handler(|args, context| async move {
            let wallet_address = require_str(&args, "wallet_address")?;
            context
                .client
                .execute_raw(
                    RequestSpec::post("/agents/gas-faucet")
                        .body(json!({ "wallet_address": wallet_address })),
                )
                .await
        }),
    )]
}
