//! Port availability helpers for the web server

use std::net::TcpListener;

/// Number of consecutive ports tried by [`find_available_port`]
pub const PORT_SCAN_ATTEMPTS: u16 = 10;

/// Whether `host:port` can currently be bound
pub fn is_port_available(host: &str, port: u16) -> bool {
    TcpListener::bind((host, port)).is_ok()
}

/// First bindable port in `start..start + PORT_SCAN_ATTEMPTS`
pub fn find_available_port(host: &str, start: u16) -> Option<u16> {
    (0..PORT_SCAN_ATTEMPTS)
        .filter_map(|offset| start.checked_add(offset))
        .find(|port| is_port_available(host, *port))
}
