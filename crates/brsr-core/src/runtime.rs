//! Shell runtime
//!
//! One task owns the [`Browser`] and drains a single queue. User commands
//! arrive through a [`ShellHandle`] and carry a reply channel; native
//! events and container measurements are fire-and-forget. Each message is
//! applied to completion before the next one is taken, so commands and
//! events never interleave on the same tab.
//!
//! Layout frames tick only while a container measurement is waiting. After
//! every message or frame the current [`BrowserSnapshot`] is published when
//! it changed.

use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;

use crate::browser::{Browser, TELEMETRY_CAPACITY};
use crate::config::Config;
use crate::error::CoreError;
use crate::events::{InboundEvent, RoutedTelemetry};
use crate::geometry::ContainerBox;
use crate::host::SurfaceHost;
use crate::snapshot::BrowserSnapshot;
use crate::Result;

type Reply<T> = oneshot::Sender<Result<T>>;

enum ShellMessage {
    CreateTab {
        url: Option<String>,
        reply: Reply<String>,
    },
    CloseTab {
        tab_id: String,
        reply: Reply<()>,
    },
    SelectTab {
        tab_id: String,
        reply: Reply<()>,
    },
    Navigate {
        tab_id: String,
        url: String,
        reply: Reply<()>,
    },
    Back {
        tab_id: String,
        reply: Reply<()>,
    },
    Forward {
        tab_id: String,
        reply: Reply<()>,
    },
    Reload {
        tab_id: String,
        reply: Reply<()>,
    },
    Event(InboundEvent),
    ObserveContainer(ContainerBox),
    Shutdown(oneshot::Sender<()>),
}

/// Create the queue shared by a [`ShellHandle`] and a [`ShellRuntime`]
pub fn shell_channel() -> (ShellHandle, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (snapshots, snapshot_rx) = watch::channel(BrowserSnapshot::default());
    let (telemetry, _) = broadcast::channel(TELEMETRY_CAPACITY);

    let handle = ShellHandle {
        tx,
        snapshots: snapshot_rx,
        telemetry: telemetry.clone(),
    };
    let inbox = Inbox {
        rx,
        snapshots,
        telemetry,
    };

    (handle, inbox)
}

/// Receiving end of the shell queue, consumed by [`ShellRuntime::new`]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<ShellMessage>,
    snapshots: watch::Sender<BrowserSnapshot>,
    telemetry: broadcast::Sender<RoutedTelemetry>,
}

#[derive(Clone)]
pub struct ShellHandle {
    tx: mpsc::UnboundedSender<ShellMessage>,
    snapshots: watch::Receiver<BrowserSnapshot>,
    telemetry: broadcast::Sender<RoutedTelemetry>,
}

impl ShellHandle {
    pub async fn create_tab(&self, url: Option<String>) -> Result<String> {
        self.request(|reply| ShellMessage::CreateTab { url, reply })
            .await
    }

    pub async fn close_tab(&self, tab_id: String) -> Result<()> {
        self.request(|reply| ShellMessage::CloseTab { tab_id, reply })
            .await
    }

    pub async fn select_tab(&self, tab_id: String) -> Result<()> {
        self.request(|reply| ShellMessage::SelectTab { tab_id, reply })
            .await
    }

    pub async fn navigate(&self, tab_id: String, url: String) -> Result<()> {
        self.request(|reply| ShellMessage::Navigate { tab_id, url, reply })
            .await
    }

    pub async fn back(&self, tab_id: String) -> Result<()> {
        self.request(|reply| ShellMessage::Back { tab_id, reply })
            .await
    }

    pub async fn forward(&self, tab_id: String) -> Result<()> {
        self.request(|reply| ShellMessage::Forward { tab_id, reply })
            .await
    }

    pub async fn reload(&self, tab_id: String) -> Result<()> {
        self.request(|reply| ShellMessage::Reload { tab_id, reply })
            .await
    }

    /// Queue an event reported by the native layer
    pub fn notify(&self, event: impl Into<InboundEvent>) {
        if self.tx.send(ShellMessage::Event(event.into())).is_err() {
            tracing::debug!("Dropping native event, shell is closed");
        }
    }

    /// Queue a container measurement for the next layout frame
    pub fn observe_container(&self, container: ContainerBox) {
        if self
            .tx
            .send(ShellMessage::ObserveContainer(container))
            .is_err()
        {
            tracing::debug!("Dropping container measurement, shell is closed");
        }
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> BrowserSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BrowserSnapshot> {
        self.snapshots.clone()
    }

    pub fn subscribe_telemetry(&self) -> broadcast::Receiver<RoutedTelemetry> {
        self.telemetry.subscribe()
    }

    /// Ask the runtime to close every surface and stop. Resolves once the
    /// surfaces are closed, or at once if the runtime is already gone.
    pub async fn shutdown(&self) {
        let (done, stopped) = oneshot::channel();
        if self.tx.send(ShellMessage::Shutdown(done)).is_ok() {
            let _ = stopped.await;
        }
    }

    /// Whether the runtime has stopped taking messages
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    async fn request<T>(&self, message: impl FnOnce(Reply<T>) -> ShellMessage) -> Result<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(message(reply))
            .map_err(|_| CoreError::ShellClosed)?;
        response.await.map_err(|_| CoreError::ShellClosed)?
    }
}

enum Step {
    Message(Option<ShellMessage>),
    Frame,
}

pub struct ShellRuntime<H> {
    browser: Browser<H>,
    rx: mpsc::UnboundedReceiver<ShellMessage>,
    snapshots: watch::Sender<BrowserSnapshot>,
    frame_interval: std::time::Duration,
}

impl<H: SurfaceHost> ShellRuntime<H> {
    pub fn new(config: &Config, host: H, inbox: Inbox) -> Self {
        Self {
            browser: Browser::with_telemetry(config, host, inbox.telemetry),
            rx: inbox.rx,
            snapshots: inbox.snapshots,
            frame_interval: config.frame_interval(),
        }
    }

    /// Drain the queue until shutdown is requested or every handle is gone,
    /// then close all surfaces
    pub async fn run(mut self) {
        tracing::info!("Shell runtime started");

        let mut stopped = None;
        let mut frames = tokio::time::interval(self.frame_interval);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let needs_frame = self.browser.needs_frame();

            let step = tokio::select! {
                biased;
                message = self.rx.recv() => Step::Message(message),
                _ = frames.tick(), if needs_frame => Step::Frame,
            };

            match step {
                Step::Message(None) => break,
                Step::Message(Some(ShellMessage::Shutdown(done))) => {
                    stopped = Some(done);
                    break;
                }
                Step::Message(Some(message)) => self.apply(message).await,
                Step::Frame => self.browser.on_frame().await,
            }

            self.publish();
        }

        self.rx.close();
        self.browser.shutdown().await;
        self.publish();

        if let Some(done) = stopped {
            let _ = done.send(());
        }

        tracing::info!("Shell runtime stopped");
    }

    async fn apply(&mut self, message: ShellMessage) {
        match message {
            ShellMessage::CreateTab { url, reply } => {
                let result = self.browser.create_tab(url.as_deref()).await;
                self.respond(reply, result);
            }
            ShellMessage::CloseTab { tab_id, reply } => {
                let result = self.browser.close_tab(&tab_id).await;
                self.respond(reply, result);
            }
            ShellMessage::SelectTab { tab_id, reply } => {
                let result = self.browser.select_tab(&tab_id).await;
                self.respond(reply, result);
            }
            ShellMessage::Navigate { tab_id, url, reply } => {
                let result = self.browser.navigate(&tab_id, &url).await;
                self.respond(reply, result);
            }
            ShellMessage::Back { tab_id, reply } => {
                let result = self.browser.back(&tab_id).await;
                self.respond(reply, result);
            }
            ShellMessage::Forward { tab_id, reply } => {
                let result = self.browser.forward(&tab_id).await;
                self.respond(reply, result);
            }
            ShellMessage::Reload { tab_id, reply } => {
                let result = self.browser.reload(&tab_id).await;
                self.respond(reply, result);
            }
            ShellMessage::Event(event) => self.browser.handle_event(event),
            ShellMessage::ObserveContainer(container) => {
                self.browser.observe_container(container)
            }
            ShellMessage::Shutdown(_) => {}
        }
    }

    /// Publish before replying so callers observe their own command
    fn respond<T>(&self, reply: Reply<T>, result: Result<T>) {
        self.publish();
        // A dropped receiver means the caller stopped waiting
        let _ = reply.send(result);
    }

    fn publish(&self) {
        let next = self.browser.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
