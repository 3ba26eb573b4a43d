use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::{bus_loop, event_loop};
use crate::host::{HostCommand, HostEvent};
use crate::io::watcher_io;
use crate::state::AppState;

/// How often pending page mutations are looked at
const WATCH_INTERVAL: Duration = Duration::from_millis(50);

/// Centralized channel management
pub struct ChannelSet {
    pub host_to_app: (AsyncSender<HostEvent>, AsyncReceiver<HostEvent>),
    pub app_to_host: (AsyncSender<HostCommand>, AsyncReceiver<HostCommand>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            host_to_app: kanal::bounded_async(256), // pointer and scroll bursts
            app_to_host: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Where the host delivers page events
    pub fn host_sender(&self) -> AsyncSender<HostEvent> {
        self.channels.host_to_app.0.clone()
    }

    /// Requests the engine makes of the host
    pub fn host_commands(&self) -> AsyncReceiver<HostCommand> {
        self.channels.app_to_host.1.clone()
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Subscribe before anything can publish
        let bus_rx = self.state.core.bus.subscribe();

        // Host events
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.host_to_app.1.clone(),
            self.channels.app_to_host.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Page-local bus
        tasks.spawn(bus_loop(
            self.state.clone(),
            bus_rx,
            self.channels.app_to_host.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Mutation watcher
        tasks.spawn(watcher_io(
            self.state.clone(),
            WATCH_INTERVAL,
            self.cancel_token.child_token(),
            self.channels.app_to_host.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
