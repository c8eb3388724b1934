//! Live Channel State
//!
//! Connection lifecycle of the push channel, kept free of browser types.
//! The provider translates socket and storage events into calls here and
//! carries out the returned [`Command`]s.
//!
//! Each socket gets an id when it is requested. Events from any socket
//! other than the current one are ignored, so a socket that is still
//! closing after a token change cannot disturb its replacement.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Reconnect attempts after an unexpected close before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
const BASE_BACKOFF_MS: u32 = 1_000;
const MAX_BACKOFF_MS: u32 = 30_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Open,
    /// Provider torn down; terminal
    Closed,
}

/// Side effect requested by the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open socket `socket` at `url`
    Connect { socket: u64, url: String },
    /// Close the current socket, if any
    Close,
    /// Arm the reconnect timer
    ScheduleReconnect { delay_ms: u32, attempt: u32 },
    /// Drop the reconnect timer, if armed
    CancelReconnect,
}

#[derive(Debug, Clone)]
pub struct ChannelState {
    endpoint: String,
    state: ConnectionState,
    token: Option<String>,
    socket: u64,
    attempts: u32,
}

impl ChannelState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            state: ConnectionState::Disconnected,
            token: None,
            socket: 0,
            attempts: 0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Provider mounted with whatever token is stored
    pub fn mount(&mut self, token: Option<String>) -> Vec<Command> {
        self.token = token;
        self.connect_if_possible()
    }

    /// Stored token may have changed (storage event or same-tab signal)
    pub fn token_changed(&mut self, token: Option<String>) -> Vec<Command> {
        if self.state == ConnectionState::Closed {
            return Vec::new();
        }
        let live = matches!(self.state, ConnectionState::Connecting | ConnectionState::Open);
        if token == self.token && live {
            return Vec::new();
        }
        let mut commands = vec![Command::CancelReconnect];
        if live {
            commands.push(Command::Close);
            self.state = ConnectionState::Disconnected;
        }
        self.token = token;
        self.attempts = 0;
        commands.extend(self.connect_if_possible());
        commands
    }

    /// Handshake completed on `socket`
    pub fn opened(&mut self, socket: u64) {
        if socket == self.socket && self.state == ConnectionState::Connecting {
            self.state = ConnectionState::Open;
            self.attempts = 0;
        }
    }

    /// Transport closed or errored on `socket`
    pub fn closed(&mut self, socket: u64) -> Vec<Command> {
        let live = matches!(self.state, ConnectionState::Connecting | ConnectionState::Open);
        if socket != self.socket || !live {
            return Vec::new();
        }
        self.state = ConnectionState::Disconnected;
        if self.token.is_none() || self.attempts >= MAX_RECONNECT_ATTEMPTS {
            return Vec::new();
        }
        let delay_ms = backoff_delay(self.attempts);
        self.attempts += 1;
        vec![Command::ScheduleReconnect {
            delay_ms,
            attempt: self.attempts,
        }]
    }

    /// Reconnect timer fired
    pub fn reconnect_due(&mut self) -> Vec<Command> {
        if self.state != ConnectionState::Disconnected {
            return Vec::new();
        }
        self.connect_if_possible()
    }

    /// Provider unmounted
    pub fn teardown(&mut self) -> Vec<Command> {
        let commands = vec![Command::CancelReconnect, Command::Close];
        self.state = ConnectionState::Closed;
        commands
    }

    fn connect_if_possible(&mut self) -> Vec<Command> {
        let Some(token) = self.token.as_deref() else {
            self.state = ConnectionState::Disconnected;
            return Vec::new();
        };
        self.socket += 1;
        self.state = ConnectionState::Connecting;
        vec![Command::Connect {
            socket: self.socket,
            url: socket_url(&self.endpoint, token),
        }]
    }
}

/// `<endpoint>?token=<credential>`, appending to an existing query string
pub fn socket_url(endpoint: &str, token: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!(
        "{}{}token={}",
        endpoint,
        separator,
        utf8_percent_encode(token, NON_ALPHANUMERIC)
    )
}

/// 1s, 2s, 4s, ... capped at 30s
pub fn backoff_delay(attempt: u32) -> u32 {
    BASE_BACKOFF_MS
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(MAX_BACKOFF_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WS: &str = "ws://localhost:8000/ws/notifications";

    fn connect(socket: u64, token: &str) -> Command {
        Command::Connect {
            socket,
            url: socket_url(WS, token),
        }
    }

    #[test]
    fn test_no_token_no_attempt() {
        let mut channel = ChannelState::new(WS);
        assert!(channel.mount(None).is_empty());
        assert_eq!(channel.state(), ConnectionState::Disconnected);
        assert!(channel.reconnect_due().is_empty());
    }

    #[test]
    fn test_mount_with_token_connects() {
        let mut channel = ChannelState::new(WS);
        assert_eq!(channel.mount(Some("abc".into())), vec![connect(1, "abc")]);
        assert_eq!(channel.state(), ConnectionState::Connecting);
        channel.opened(1);
        assert_eq!(channel.state(), ConnectionState::Open);
    }

    #[test]
    fn test_token_change_closes_before_connecting() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("old".into()));
        channel.opened(1);

        let commands = channel.token_changed(Some("new".into()));
        assert_eq!(commands, vec![Command::CancelReconnect, Command::Close, connect(2, "new")]);
    }

    #[test]
    fn test_same_token_while_open_is_noop() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("t".into()));
        channel.opened(1);
        assert!(channel.token_changed(Some("t".into())).is_empty());
    }

    #[test]
    fn test_logout_closes_without_reconnect() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("t".into()));
        channel.opened(1);
        let commands = channel.token_changed(None);
        assert_eq!(commands, vec![Command::CancelReconnect, Command::Close]);
        assert_eq!(channel.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_login_after_idle_connects() {
        let mut channel = ChannelState::new(WS);
        channel.mount(None);
        let commands = channel.token_changed(Some("t".into()));
        assert_eq!(commands, vec![Command::CancelReconnect, connect(1, "t")]);
    }

    #[test]
    fn test_stale_socket_events_ignored() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("a".into()));
        channel.opened(1);
        channel.token_changed(Some("b".into()));

        channel.opened(1);
        assert_eq!(channel.state(), ConnectionState::Connecting);
        assert!(channel.closed(1).is_empty());
        assert_eq!(channel.state(), ConnectionState::Connecting);
        channel.opened(2);
        assert_eq!(channel.state(), ConnectionState::Open);
    }

    #[test]
    fn test_backoff_is_bounded() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("t".into()));

        let mut delays = Vec::new();
        for socket in 1..=6 {
            match channel.closed(socket).as_slice() {
                [Command::ScheduleReconnect { delay_ms, .. }] => {
                    delays.push(*delay_ms);
                    assert_eq!(channel.reconnect_due(), vec![connect(socket + 1, "t")]);
                }
                [] => break,
                other => panic!("unexpected commands {:?}", other),
            }
        }
        assert_eq!(delays, vec![1_000, 2_000, 4_000, 8_000, 16_000]);
        assert_eq!(channel.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_open_resets_backoff() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("t".into()));
        channel.closed(1);
        channel.reconnect_due();
        channel.opened(2);
        assert_eq!(
            channel.closed(2),
            vec![Command::ScheduleReconnect { delay_ms: 1_000, attempt: 1 }]
        );
    }

    #[test]
    fn test_teardown_is_terminal() {
        let mut channel = ChannelState::new(WS);
        channel.mount(Some("t".into()));
        assert_eq!(channel.teardown(), vec![Command::CancelReconnect, Command::Close]);
        assert_eq!(channel.state(), ConnectionState::Closed);
        assert!(channel.token_changed(Some("u".into())).is_empty());
        assert!(channel.closed(1).is_empty());
        assert!(channel.reconnect_due().is_empty());
    }

    #[test]
    fn test_socket_url() {
        assert_eq!(socket_url(WS, "a.b c"), format!("{}?token=a%2Eb%20c", WS));
        assert_eq!(socket_url("wss://x/ws?v=2", "t"), "wss://x/ws?v=2&token=t");
        assert_eq!(backoff_delay(10), 30_000);
    }
}
