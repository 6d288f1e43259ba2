use stockbook::{
    api::{self, AppState},
    bootstrap, init_with_filter, AppError,
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let (_, config) = bootstrap::load_config()?;
    init_with_filter(config.log_filter.as_deref());

    let inventory = bootstrap::open_inventory(&config)?;
    let listener = TcpListener::bind(config.bind_address.as_str())
        .await
        .map_err(|err| AppError::InvalidBind(format!("{}: {err}", config.bind_address)))?;
    api::serve(
        listener,
        AppState::new(inventory),
        api::wait_for_shutdown_signal(),
    )
    .await
}
