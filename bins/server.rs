use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

fn init_logging() {
    // Load .env early so RUST_LOG and friends take effect
    dotenv().ok();
    common::utils::logging::init_logging_default();
    info!(service = "server", event = "logger_init", "tracing subscriber initialized");
}

fn main() -> std::process::ExitCode {
    init_logging();

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    // Panic hook: log unhandled panics before the process dies
    std::panic::set_hook(Box::new({
        let service_id = service_id;
        move |info| {
            error!(
                service = "server",
                event = "panic",
                %service_id,
                pid,
                message = %info,
                "unhandled panic occurred"
            );
        }
    }));

    // Thread count: config.toml first, then TOKIO_WORKER_THREADS
    let worker_threads = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => cfg.server.worker_threads,
        Err(_) => std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    };

    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads { builder.worker_threads(w); }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "server", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "server",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "clinic server starting"
    );

    // Run the server in its own task and watch for Ctrl+C
    let exit_code = rt.block_on(async move {
        let server_task = tokio::spawn(async move {
            if let Err(e) = server::run().await {
                error!(service = "server", event = "run_failed", error = %e, "server::run returned error");
                Err(e)
            } else {
                Ok(())
            }
        });

        tokio::select! {
            res = server_task => {
                match res {
                    Ok(Ok(())) => {
                        info!(service = "server", event = "stop", %service_id, pid, "server stopped normally");
                        std::process::ExitCode::SUCCESS
                    }
                    Ok(Err(_)) => {
                        // error already logged above
                        std::process::ExitCode::FAILURE
                    }
                    Err(e) => {
                        error!(service = "server", event = "task_join_error", error = %e, "server task join error");
                        std::process::ExitCode::FAILURE
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!(service = "server", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    });

    exit_code
}
