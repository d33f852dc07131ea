use clap::Parser;

use qrefine::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	qrefine::run(Args::parse()).await
}
