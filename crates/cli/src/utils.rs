use polypay_bridge::{Notice, NoticeLevel, RetryHint};
use yansi::Paint;

/// Initializes a tracing Subscriber for logging
pub fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Renders a notice for the terminal.
pub fn format_notice(notice: &Notice) -> String {
    let label = match notice.level {
        NoticeLevel::Info => "info".cyan().to_string(),
        NoticeLevel::Success => "success".green().to_string(),
        NoticeLevel::Warning => "warning".yellow().to_string(),
        NoticeLevel::Error => "error".red().to_string(),
    };
    let mut out = format!("{label}: {notice}");
    match notice.retry {
        RetryHint::InstallWallet => out.push_str("\n  hint: configure `wallet_url` to use a wallet"),
        RetryHint::DoNotRetry => out.push_str(&format!("\n  {}", "do not repeat this action".bold())),
        RetryHint::SafeToRetry | RetryHint::None => {}
    }
    out
}

/// Process exit code for a notice.
pub fn exit_code(notice: &Notice) -> i32 {
    match (notice.level, notice.retry) {
        (NoticeLevel::Error, _) => 1,
        (_, RetryHint::DoNotRetry) => 2,
        _ => 0,
    }
}
