use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = rank_api::Args::parse();

	rank_api::run(args).await
}
