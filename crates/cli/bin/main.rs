use clap::Parser;
use eyre::Result;
use polypay_cli::{cmd, handler, opts::Polypay, utils};

fn main() -> Result<()> {
    handler::install();
    utils::subscriber();
    let args = Polypay::parse();
    let code = main_args(args)?;
    std::process::exit(code)
}

#[tokio::main]
async fn main_args(args: Polypay) -> Result<i32> {
    cmd::run(args).await
}
