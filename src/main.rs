use invoice_forge::{app, AppConfig, InvoiceError};
use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

fn main() {
    // 初始化日志 - 本地时间格式, 默认 info 级别, 可由 RUST_LOG 覆盖
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run() {
        error!("An error occurred: {}", e);
        eprintln!("An error occurred: {}", e);
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {}", cause);
            source = cause.source();
        }
        eprintln!("{:#?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), InvoiceError> {
    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting with config: {:?}", config);

    let summary = app::run(&config, &mut rand::thread_rng())?;
    for path in &summary.files {
        info!("  {}", path.display());
    }
    Ok(())
}
