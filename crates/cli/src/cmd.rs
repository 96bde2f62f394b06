//! Wiring of configuration, wallet, backend and bridge.

use crate::{
    opts::{GlobalOpts, Polypay},
    utils,
};
use eyre::{Result, WrapErr};
use polypay_bridge::{ShopContracts, UiBridge};
use polypay_config::Config;
use polypay_orders::OrderReconciler;
use polypay_wallet::{Eip1193Provider, HttpTransport, SessionManager, WalletProvider};
use reqwest::Url;
use std::sync::Arc;

/// Loads the configuration, letting `global` override it.
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    let path = global.config.clone().unwrap_or_else(Config::config_path);
    let figment = Config::figment_with_file(&path).merge(global.clone());
    Config::from_provider(figment).wrap_err_with(|| format!("failed to load {}", path.display()))
}

/// The wallet provider configured by `wallet_url`, if any.
pub fn wallet_provider(config: &Config) -> Result<Option<Arc<dyn WalletProvider>>> {
    let Some(url) = &config.wallet_url else { return Ok(None) };
    let url: Url = url.parse().wrap_err_with(|| format!("invalid wallet URL `{url}`"))?;
    let provider = Eip1193Provider::new(HttpTransport::new(url))
        .with_poll_interval(config.receipt_poll_interval());
    Ok(Some(Arc::new(provider)))
}

/// Builds the bridge described by `config`.
pub fn build_bridge(config: &Config) -> Result<UiBridge> {
    let target = config.target_network()?;
    let manager = SessionManager::new(wallet_provider(config)?, target);
    let orders = OrderReconciler::new(&config.backend_url)?;
    let contracts = ShopContracts {
        token: config.token_address,
        sale: config.sale_address,
        dao: config.dao_address,
        receiver: config.shop_receiver,
        token_price: config.token_price_wei()?,
    };
    Ok(UiBridge::new(manager, orders, contracts))
}

/// Runs the command, returning the process exit code.
pub async fn run(args: Polypay) -> Result<i32> {
    let config = load_config(&args.global)?;
    trace!(?config, "loaded config");

    let Some(action) = args.cmd.clone().into_action() else {
        return networks(&config, args.global.json);
    };

    let bridge = build_bridge(&config)?;
    let notice = bridge.dispatch(action).await;
    if args.global.json {
        println!("{}", serde_json::to_string_pretty(&notice)?);
    } else {
        println!("{}", utils::format_notice(&notice));
    }
    Ok(utils::exit_code(&notice))
}

fn networks(config: &Config, json: bool) -> Result<i32> {
    let registry = config.registry()?;
    if json {
        let profiles: Vec<_> = registry.iter().collect();
        println!("{}", serde_json::to_string_pretty(&profiles)?);
        return Ok(0);
    }
    for profile in registry.iter() {
        let marker = if profile.chain_id == config.chain_id { "*" } else { " " };
        println!("{marker} {profile} {}", profile.rpc_urls.join(", "));
    }
    Ok(0)
}
