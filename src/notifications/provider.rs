//! Notification Provider
//!
//! Owns the push socket for the current session and exposes the
//! notification list through context. Socket, timer and listener handles
//! are browser objects, so they live in a local-only `StoredValue`; the
//! [`NotificationChannel`] handle itself is `Copy` and can be captured by
//! any view closure.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::binding::SessionBinding;
use super::book::NotificationBook;
use super::cache::LocalStorageCache;
use super::channel::{ChannelState, Command, ConnectionState};
use super::SyncRequest;
use crate::api;
use crate::components::{use_toasts, Toasts};
use crate::config::{use_config, AppConfig};
use crate::models::{parse_notification, Notification};
use crate::session::{self, use_session, Session, SessionSignal, TOKEN_CHANGED_EVENT, TOKEN_KEY, USER_KEY};

/// An open socket together with the handlers keeping it alive
struct LiveSocket {
    ws: WebSocket,
    _on_open: Closure<dyn FnMut(JsValue)>,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(JsValue)>,
}

impl LiveSocket {
    /// Detach handlers first so no event from this socket fires afterwards
    fn close(self) {
        self.ws.set_onopen(None);
        self.ws.set_onmessage(None);
        self.ws.set_onclose(None);
        self.ws.set_onerror(None);
        if let Err(e) = self.ws.close() {
            log::warn!("closing notification socket failed: {}", session::describe(&e));
        }
    }
}

/// Browser-side resources of one mounted provider
struct Live {
    channel: ChannelState,
    binding: SessionBinding,
    socket: Option<LiveSocket>,
    reconnect: Option<Timeout>,
    listeners: Vec<(&'static str, Closure<dyn FnMut(web_sys::Event)>)>,
}

/// Handle to the live notification channel, provided via context
#[derive(Clone, Copy)]
pub struct NotificationChannel {
    book: RwSignal<NotificationBook<LocalStorageCache>>,
    connection: RwSignal<ConnectionState>,
    config: StoredValue<AppConfig>,
    session: SessionSignal,
    toasts: Toasts,
    live: StoredValue<Live, LocalStorage>,
}

impl NotificationChannel {
    /// Open the cache, register token listeners and connect if signed in.
    ///
    /// Must run inside the owner that should own the connection; the
    /// socket is closed when that owner is cleaned up.
    pub fn start(config: AppConfig, session: SessionSignal, toasts: Toasts) -> Self {
        let current = session.get_untracked();
        let key = current.cache_key(&config.cache_key_prefix);
        let channel = Self {
            book: RwSignal::new(NotificationBook::open(LocalStorageCache::new(key.clone()))),
            connection: RwSignal::new(ConnectionState::Disconnected),
            live: StoredValue::new_local(Live {
                channel: ChannelState::new(config.ws_url.clone()),
                binding: SessionBinding::new(key, current.token.clone()),
                socket: None,
                reconnect: None,
                listeners: Vec::new(),
            }),
            config: StoredValue::new(config),
            session,
            toasts,
        };

        channel.listen();
        let commands = channel
            .live
            .try_update_value(|live| live.channel.mount(current.token.clone()))
            .unwrap_or_default();
        channel.execute(commands);
        if current.is_authenticated() {
            channel.load_unread();
        } else {
            log::debug!("no session token; notification channel stays disconnected");
        }

        on_cleanup(move || channel.teardown());
        channel
    }

    // ========================
    // Public Operations
    // ========================

    /// Current notifications, most recent first (tracked)
    pub fn notifications(&self) -> Vec<Notification> {
        self.book.with(|book| book.items().to_vec())
    }

    pub fn unread_count(&self) -> usize {
        self.book.with(|book| book.unread_count())
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.connection.get()
    }

    /// Ingest one notification; an id already held is left untouched
    pub fn add_notification(&self, notification: Notification) -> bool {
        self.book.try_update(|book| book.add(notification)).unwrap_or(false)
    }

    pub fn mark_as_read(&self, id: &str) {
        if let Some(Some(request)) = self.book.try_update(|book| book.mark_read(id)) {
            self.sync(request);
        }
    }

    pub fn mark_all_as_read(&self) {
        if let Some(request) = self.book.try_update(|book| book.mark_all_read()) {
            self.sync(request);
        }
    }

    /// Local-only; the server is not told
    pub fn dismiss(&self, id: &str) {
        self.book.try_update(|book| book.dismiss(id));
    }

    // ========================
    // Server Sync
    // ========================

    /// Fire-and-forget; local state stays as it is on failure
    fn sync(&self, request: SyncRequest) {
        let config = self.config.get_value();
        let session = self.session.get_untracked();
        spawn_local(async move {
            if let Err(e) = api::send_sync(&config, &session, &request).await {
                log::warn!("notification sync {:?} failed: {}", request, e);
            }
        });
    }

    /// Merges only if the session binding is unchanged when the fetch lands
    fn load_unread(&self) {
        let Some(ticket) = self.live.try_update_value(|live| live.binding.begin_fetch()) else {
            return;
        };
        let channel = *self;
        let config = self.config.get_value();
        let session = self.session.get_untracked();
        spawn_local(async move {
            match api::fetch_unread(&config, &session).await {
                Ok(unread) => {
                    let current = channel
                        .live
                        .try_with_value(|live| live.binding.accepts(&ticket))
                        .unwrap_or(false)
                        && channel
                            .book
                            .try_with_untracked(|book| book.cache().key() == ticket.key())
                            .unwrap_or(false);
                    if !current {
                        log::debug!("dropping unread fetch for a previous session");
                        return;
                    }
                    let added = channel.book.try_update(|book| book.merge(unread)).unwrap_or(0);
                    log::debug!("merged {} unread notifications from server", added);
                }
                Err(e) => log::warn!("failed to fetch unread notifications: {}", e),
            }
        });
    }

    // ========================
    // Connection Lifecycle
    // ========================

    fn execute(&self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Connect { socket, url } => self.connect(socket, &url),
                Command::Close => {
                    if let Some(Some(old)) = self.live.try_update_value(|live| live.socket.take()) {
                        log::info!("closing notification socket");
                        old.close();
                    }
                }
                Command::ScheduleReconnect { delay_ms, attempt } => {
                    log::info!("notification socket reconnect {} in {}ms", attempt, delay_ms);
                    let channel = *self;
                    let timer = Timeout::new(delay_ms, move || {
                        let commands = channel
                            .live
                            .try_update_value(|live| live.channel.reconnect_due())
                            .unwrap_or_default();
                        channel.execute(commands);
                    });
                    self.live.try_update_value(|live| live.reconnect = Some(timer));
                }
                Command::CancelReconnect => {
                    self.live.try_update_value(|live| live.reconnect = None);
                }
            }
        }
        self.publish_state();
    }

    fn connect(&self, socket: u64, url: &str) {
        if let Some(Some(old)) = self.live.try_update_value(|live| live.socket.take()) {
            old.close();
        }
        log::info!("opening notification socket #{}", socket);
        let ws = match WebSocket::new(url) {
            Ok(ws) => ws,
            Err(e) => {
                log::error!("notification socket #{} failed to open: {}", socket, session::describe(&e));
                let commands = self
                    .live
                    .try_update_value(|live| live.channel.closed(socket))
                    .unwrap_or_default();
                self.execute(commands);
                return;
            }
        };

        let channel = *self;
        let on_open = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
            log::info!("notification socket #{} connected", socket);
            channel.live.try_update_value(|live| live.channel.opened(socket));
            channel.publish_state();
        });
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));

        let on_message = Closure::<dyn FnMut(MessageEvent)>::new(move |event: MessageEvent| {
            match event.data().as_string() {
                Some(text) => channel.receive(&text),
                None => log::warn!("dropping non-text push message on socket #{}", socket),
            }
        });
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        // The dead socket stays in place until the next connect; dropping it
        // here would free the closure that is currently running.
        let on_close = Closure::<dyn FnMut(CloseEvent)>::new(move |event: CloseEvent| {
            log::info!(
                "notification socket #{} closed: code={} reason={}",
                socket,
                event.code(),
                event.reason()
            );
            let commands = channel
                .live
                .try_update_value(|live| live.channel.closed(socket))
                .unwrap_or_default();
            channel.execute(commands);
        });
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        let on_error = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| {
            log::warn!("notification socket #{} reported an error", socket);
        });
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        let live_socket = LiveSocket {
            ws,
            _on_open: on_open,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        };
        if let Some(Some(orphan)) = self.live.try_update_value(|live| live.socket.replace(live_socket)) {
            orphan.close();
        }
    }

    fn receive(&self, text: &str) {
        match parse_notification(text) {
            Ok(notification) => {
                log::debug!("push notification {} received", notification.id);
                self.toasts.push(notification.kind, format!("🔔 {}", notification.message));
                self.add_notification(notification);
            }
            Err(e) => log::warn!("dropping unparsable push message: {}", e),
        }
    }

    fn publish_state(&self) {
        if let Some(state) = self.live.try_with_value(|live| live.channel.state()) {
            self.connection.try_set(state);
        }
    }

    // ========================
    // Token Listeners
    // ========================

    fn listen(&self) {
        let Some(window) = web_sys::window() else { return };
        let channel = *self;

        // Cross-tab: only token/user writes matter; `clear()` has no key
        let on_storage = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let key = event.dyn_ref::<web_sys::StorageEvent>().and_then(|e| e.key());
            if matches!(key.as_deref(), None | Some(TOKEN_KEY) | Some(USER_KEY)) {
                channel.session_changed();
            }
        });
        let on_same_tab = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
            channel.session_changed();
        });

        let mut listeners = Vec::new();
        for (name, handler) in [("storage", on_storage), (TOKEN_CHANGED_EVENT, on_same_tab)] {
            match window.add_event_listener_with_callback(name, handler.as_ref().unchecked_ref()) {
                Ok(()) => listeners.push((name, handler)),
                Err(e) => log::error!("failed to listen for {}: {}", name, session::describe(&e)),
            }
        }
        self.live.try_update_value(|live| live.listeners = listeners);
    }

    fn session_changed(&self) {
        let next = Session::load();
        self.session.try_set(next.clone());

        let prefix = self.config.with_value(|config| config.cache_key_prefix.clone());
        let key = next.cache_key(&prefix);
        let change = self
            .live
            .try_update_value(|live| live.binding.change(key.clone(), next.token.clone()))
            .unwrap_or_default();
        if change.rebind {
            log::debug!("notification cache switched to {}", key);
            self.book.try_set(NotificationBook::open(LocalStorageCache::new(key)));
        }

        let commands = self
            .live
            .try_update_value(|live| live.channel.token_changed(next.token.clone()))
            .unwrap_or_default();
        self.execute(commands);
        if change.fetch_unread {
            self.load_unread();
        }
    }

    fn teardown(&self) {
        let listeners = self
            .live
            .try_update_value(|live| std::mem::take(&mut live.listeners))
            .unwrap_or_default();
        if let Some(window) = web_sys::window() {
            for (name, handler) in &listeners {
                let _ = window.remove_event_listener_with_callback(name, handler.as_ref().unchecked_ref());
            }
        }
        let commands = self
            .live
            .try_update_value(|live| live.channel.teardown())
            .unwrap_or_default();
        self.execute(commands);
        log::debug!("notification channel torn down");
    }
}

/// Mounts the live notification channel for its children
#[component]
pub fn NotificationProvider(children: Children) -> impl IntoView {
    let channel = NotificationChannel::start(use_config(), use_session(), use_toasts());
    provide_context(channel);
    children()
}

pub fn use_notifications() -> NotificationChannel {
    expect_context::<NotificationChannel>()
}
