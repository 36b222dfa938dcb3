use anyhow::Result;
use touchline_observability::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing("touchline_api");
    touchline_api::serve().await
}
