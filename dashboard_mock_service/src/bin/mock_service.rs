use dashboard_mock_service::{MockService, DEFAULT_ADDR};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn parse_arg_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let addr = parse_arg_value(&args, "--addr")
        .or_else(|| std::env::var("DASHBOARD_MOCK_ADDR").ok())
        .unwrap_or_else(|| DEFAULT_ADDR.to_string());
    let addr_file = parse_arg_value(&args, "--addr-file").map(PathBuf::from);
    let run_for = parse_arg_value(&args, "--run-for-ms")
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis);
    let seed = args.iter().any(|a| a == "--seed");

    let mut service = MockService::spawn_with_addr(&addr).await?;
    if seed {
        service.state().seed_defaults();
    }

    if let Some(path) = &addr_file {
        fs::write(path, service.listen_addr().to_string())?;
    }

    println!("mock_service listening on {}", service.base_url());

    match run_for {
        Some(max) => tokio::time::sleep(max).await,
        None => tokio::signal::ctrl_c().await?,
    }

    service.shutdown();
    Ok(())
}
