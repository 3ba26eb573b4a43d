use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};
use lexi_capability::{Availability, Capabilities, CapabilityError, Factory, ProgressSink, Session};
use lexi_config::Config;
use lexi_dom::{Document, NodeId};
use lexi_store::{MemoryStore, Store};
use lexi_types::UserSettings;
use lexi_ui::content::ACTION_ATTR;
use lexi_ui::{Action, SurfaceKind};
use tokio::task::JoinSet;
use tokio::time::{Instant, sleep};

use crate::controller::AppController;
use crate::host::{HostCommand, HostEvent};
use crate::page::text_page;
use crate::state::{AppState, Page};

pub const URL: &str = "https://news.example.com/nobel";
pub const ARTICLE: &str = "Nobel prize announced\n\n\
    The laureate spoke about photosynthesis and the committee applauded.";

/// Capability that is always ready and always answers with `output`
pub struct Canned<O> {
    output: O,
}

pub fn canned<O>(output: O) -> Arc<Canned<O>> {
    Arc::new(Canned { output })
}

struct CannedSession<O> {
    output: O,
}

#[async_trait]
impl<I, O> Session<I, O> for CannedSession<O>
where
    I: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    async fn invoke(&self, _input: I) -> Result<O, CapabilityError> {
        Ok(self.output.clone())
    }
}

#[async_trait]
impl<Opts, I, O> Factory<Opts, I, O> for Canned<O>
where
    Opts: Send + Sync + 'static,
    I: Send + 'static,
    O: Clone + Send + Sync + 'static,
{
    async fn availability(&self, _options: &Opts) -> Result<Availability, CapabilityError> {
        Ok(Availability::Ready)
    }

    async fn create(
        &self,
        _options: Opts,
        _progress: Option<ProgressSink>,
    ) -> Result<Box<dyn Session<I, O>>, CapabilityError> {
        Ok(Box::new(CannedSession {
            output: self.output.clone(),
        }))
    }
}

/// Short delays everywhere so flows finish quickly
pub fn fast_config() -> Config {
    let mut config = Config::default();
    config.overlay.animation_fast_ms = 5;
    config.overlay.animation_normal_ms = 5;
    config.overlay.click_outside_delay_ms = 0;
    config.overlay.tooltip_show_delay_ms = 30;
    config.overlay.tooltip_hide_delay_ms = 30;
    config.selection.settle_delay_ms = 5;
    config.article.prompt_delay_ms = 10;
    config
}

pub fn translating(text: &str) -> Capabilities {
    Capabilities {
        translator: Some(canned(text.to_string())),
        ..Capabilities::default()
    }
}

/// A running engine over [`ARTICLE`] with an in-memory store
pub struct Harness {
    pub state: Arc<AppState>,
    pub controller: AppController,
    pub events: AsyncSender<HostEvent>,
    pub commands: AsyncReceiver<HostCommand>,
    _tasks: JoinSet<anyhow::Result<()>>,
}

impl Harness {
    pub fn start(caps: Capabilities) -> Self {
        Self::with_page(caps, text_page(URL, ARTICLE).unwrap())
    }

    pub fn with_page(caps: Capabilities, doc: Document) -> Self {
        let config = fast_config();
        let store = Store::new(Arc::new(MemoryStore::new()), config.limits.clone());
        let state = Arc::new(AppState::new(
            config,
            UserSettings::default(),
            doc,
            store,
            caps,
        ));

        let controller = AppController::new(state.clone());
        let tasks = controller.spawn_tasks();
        Self {
            events: controller.host_sender(),
            commands: controller.host_commands(),
            state,
            controller,
            _tasks: tasks,
        }
    }

    pub async fn send(&self, event: HostEvent) {
        self.events.send(event).await.expect("send failed");
    }

    /// Count from the next highlight report
    pub async fn highlighted(&self) -> usize {
        loop {
            match tokio::time::timeout(Duration::from_secs(2), self.commands.recv()).await {
                Ok(Ok(HostCommand::Highlighted { count })) => return count,
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => panic!("Channel error: {}", e),
                Err(_) => panic!("Timeout - no highlight report"),
            }
        }
    }

    pub async fn notice(&self) -> String {
        loop {
            match tokio::time::timeout(Duration::from_secs(2), self.commands.recv()).await {
                Ok(Ok(HostCommand::Notice(text))) => return text,
                Ok(Ok(_)) => continue,
                Ok(Err(e)) => panic!("Channel error: {}", e),
                Err(_) => panic!("Timeout - no notice"),
            }
        }
    }

    /// Poll the page until `f` has an answer
    pub async fn until_page<T>(&self, what: &str, f: impl Fn(&Page) -> Option<T>) -> T {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(found) = f(&*self.state.page.lock().await) {
                return found;
            }
            if Instant::now() > deadline {
                panic!("Timeout - {what}");
            }
            sleep(Duration::from_millis(5)).await;
        }
    }

    /// Button for `action` on the live surface of `kind`, once it is rendered
    pub async fn button(&self, kind: SurfaceKind, action: Action) -> NodeId {
        self.until_page(&format!("{action} on {kind}"), |page| {
            let ticket = page.overlay.ticket(kind)?;
            let root = page.overlay.root(ticket)?;
            page.doc
                .query_attr(root, ACTION_ATTR, Some(action.as_str()))
                .into_iter()
                .next()
        })
        .await
    }

    pub async fn press(&self, kind: SurfaceKind, action: Action) {
        let target = self.button(kind, action).await;
        self.send(HostEvent::Click { target }).await;
    }

    /// Text of the live surface of `kind` once it contains `needle`
    pub async fn surface_text(&self, kind: SurfaceKind, needle: &str) -> String {
        self.until_page(&format!("'{needle}' in {kind}"), |page| {
            let ticket = page.overlay.ticket(kind)?;
            let root = page.overlay.root(ticket)?;
            let text = page.doc.text_content(root);
            text.contains(needle).then_some(text)
        })
        .await
    }

    /// Highlight span for `word`
    pub async fn highlight_of(&self, word: &str) -> NodeId {
        self.until_page(&format!("highlight of {word}"), |page| {
            let body = page.doc.body();
            page.doc
                .query_attr(body, "data-word", Some(word))
                .into_iter()
                .next()
        })
        .await
    }

    /// First paragraph and its text node
    pub async fn paragraph(&self) -> (NodeId, NodeId) {
        let page = self.state.page.lock().await;
        let p = page.doc.query_tag(page.doc.body(), "p")[0];
        (p, page.doc.children(p)[0])
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        self.controller.shutdown();
    }
}
