#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod telemetry;

use crate::adapters::contact_log::ContactLog;
use crate::adapters::mail::Mailer;
use crate::adapters::mail::sendgrid::SendGridMailer;
use crate::config::Config;
use crate::services::contact_service::ContactService;
use crate::services::health_service::HealthService;
use std::sync::Arc;
use tokio::sync::watch;

/// Fully wired application services, ready to hand to the routers.
#[derive(Clone, Debug)]
pub struct App {
    pub contact_service: ContactService,
    pub health_service: HealthService,
}

impl App {
    /// Wires services from configuration. Pure construction, no I/O.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let log = Arc::new(ContactLog::new(&config.storage.data_dir));

        let mailer: Option<Arc<dyn Mailer>> = config
            .mail
            .sendgrid_api_key
            .as_ref()
            .map(|key| Arc::new(SendGridMailer::new(&config.mail.api_base, key)) as Arc<dyn Mailer>);

        Self {
            contact_service: ContactService::new(mailer, log, config.mail.clone()),
            health_service: HealthService::new(config.storage.data_dir.clone()),
        }
    }
}

/// Installs a panic hook that records the panic through tracing before
/// delegating to the previous hook.
pub fn setup_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        default_hook(info);
    }));
}

/// Spawns a task that flips the shutdown channel on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => tracing::error!(error = %e, "Failed to install SIGTERM handler"),
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
