//! Logger module
//!
//! Provides logging utilities for the gateway including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Rating and contact mailer events
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;
pub use writer::Level;

use crate::config::Config;
use crate::contact::{FieldError, MailError};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. An unknown level falls back to `info`.
pub fn init(config: &Config) -> std::io::Result<()> {
    let level = config.logging.level.parse().unwrap_or_else(|e: String| {
        eprintln!("[WARN] {e}, using 'info'");
        Level::Info
    });
    writer::init(
        level,
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn write(level: Level, message: &str) {
    match writer::get() {
        Some(w) => w.write(level, message),
        None if level <= Level::Warn => eprintln!("{message}"),
        None => println!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write(Level::Info, "======================================");
    write(Level::Info, "Contact gateway started");
    write(Level::Info, &format!("Listening on: http://{addr}"));
    write(Level::Info, &format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write(Level::Info, &format!("Worker threads: {workers}"));
    }
    write(
        Level::Info,
        &format!(
            "Mail transport: {:?} -> {}",
            config.mail.transport, config.mail.to_email
        ),
    );
    write(
        Level::Info,
        &format!("Max body size: {} bytes", config.http.max_body_size),
    );
    if let Some(ref path) = config.logging.access_log_file {
        write(Level::Info, &format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write(Level::Info, &format!("Error log: {path}"));
    }
    write(Level::Info, "======================================\n");
}

pub fn log_shutdown(active: usize) {
    write(
        Level::Info,
        &format!("[Shutdown] Stopped accepting connections, {active} still active"),
    );
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write(Level::Debug, &format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write(
        Level::Error,
        &format!("[ERROR] Failed to serve connection: {err:?}"),
    );
}

pub fn log_error(message: &str) {
    write(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write(Level::Warn, &format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_rating_lookup(widget_id: &str, box_num: i64) {
    write(
        Level::Debug,
        &format!("[Rating] widget_id={widget_id:?} box_num={box_num}"),
    );
}

pub fn log_contact_rejected(errors: &[FieldError]) {
    let fields: Vec<String> = errors
        .iter()
        .map(|e| format!("{}:{:?}", e.field, e.error))
        .collect();
    write(
        Level::Info,
        &format!("[Contact] Submission rejected: {}", fields.join(", ")),
    );
}

pub fn log_mail_sent(transport: &str, to: &str) {
    write(
        Level::Info,
        &format!("[Contact] Mail handed to {transport} for {to}"),
    );
}

pub fn log_mail_failed(transport: &str, err: &MailError) {
    write(
        Level::Error,
        &format!("[ERROR] [Contact] {transport} transport failed: {err}"),
    );
}

pub fn log_mail_preview(message: &str) {
    write(Level::Info, "[Contact] Mail not delivered (log transport):");
    for line in message.lines() {
        write(Level::Info, &format!("    {line}"));
    }
}
