//! Paginated fetcher
//!
//! The fetcher owns the pagination cursor and a single worker task. Every
//! navigation call becomes a `Command` pushed onto an unbounded FIFO queue;
//! the worker takes one command at a time, runs its request to completion,
//! updates the cursor and reports the page through the callback. Because the
//! queue has exactly one consumer, results arrive in the order the calls were
//! made regardless of network latency.
//!
//! The callback always runs on the worker task.

use super::types::{Direction, LinkSet, PageResult, RequestExecutor};
use crate::decode::Parser;
use crate::error::{Error, Result};
use crate::request::{Request, RequestTemplate};
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

/// Callback receiving each page, boxed for the worker
type PageCallback<T> = Box<dyn FnMut(PageResult<T>) + Send>;

/// Unit of work on the serial queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Issue the seed request
    Seed,
    /// Follow the current link for a direction
    Follow(Direction),
}

/// State shared between the fetcher handle and its worker
struct Shared {
    /// Set by the first `start`, never cleared
    started: AtomicBool,
    /// Current cursor, written only by the worker
    links: watch::Sender<LinkSet>,
}

/// Link-following fetcher for one paginated collection
///
/// Navigation methods never block; they enqueue and return. Must be created
/// inside a tokio runtime.
///
/// ```rust,ignore
/// let (fetcher, mut pages) = PaginatedFetcher::channel(
///     LibraryRequest::new(1, MediaKind::Anime),
///     Arc::new(client),
///     Arc::new(LibraryEntryParser::new()),
/// );
/// fetcher.start();
/// let first_page = pages.recv().await;
/// fetcher.next();
/// ```
pub struct PaginatedFetcher<T> {
    commands: mpsc::UnboundedSender<Command>,
    shared: Arc<Shared>,
    _items: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> PaginatedFetcher<T> {
    /// Create a fetcher that reports every page to `on_page`
    pub fn new<R, P, F>(
        template: R,
        executor: Arc<dyn RequestExecutor>,
        parser: Arc<P>,
        on_page: F,
    ) -> Self
    where
        R: RequestTemplate + 'static,
        P: Parser<Item = T> + ?Sized + 'static,
        F: FnMut(PageResult<T>) + Send + 'static,
    {
        let (links, _) = watch::channel(LinkSet::default());
        let shared = Arc::new(Shared {
            started: AtomicBool::new(false),
            links,
        });
        let (commands, queue) = mpsc::unbounded_channel();

        let worker = Worker {
            template: Box::new(template),
            executor,
            parser,
            shared: Arc::clone(&shared),
        };
        tokio::spawn(worker.run(queue, Box::new(on_page)));

        Self {
            commands,
            shared,
            _items: PhantomData,
        }
    }

    /// Create a fetcher that delivers pages through a channel
    ///
    /// Results produced after the receiver is dropped are discarded.
    pub fn channel<R, P>(
        template: R,
        executor: Arc<dyn RequestExecutor>,
        parser: Arc<P>,
    ) -> (Self, mpsc::UnboundedReceiver<PageResult<T>>)
    where
        R: RequestTemplate + 'static,
        P: Parser<Item = T> + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let fetcher = Self::new(template, executor, parser, move |page| {
            let _ = tx.send(page);
        });
        (fetcher, rx)
    }

    /// Issue the seed request
    ///
    /// Always performs a request, even when the fetcher is already active.
    /// The fetcher counts as started from this call on, so navigation queued
    /// behind the seed follows the seed's links.
    pub fn start(&self) {
        self.shared.started.store(true, Ordering::SeqCst);
        self.enqueue(Command::Seed);
    }

    /// Fetch the next page
    pub fn next(&self) {
        self.navigate(Direction::Next);
    }

    /// Fetch the previous page
    pub fn prev(&self) {
        self.navigate(Direction::Previous);
    }

    /// Fetch the first page
    pub fn first(&self) {
        self.navigate(Direction::First);
    }

    /// Fetch the last page
    pub fn last(&self) {
        self.navigate(Direction::Last);
    }

    /// Fetch the page in the given direction
    ///
    /// Until `start` has been called, any navigation issues the seed request
    /// instead.
    pub fn navigate(&self, direction: Direction) {
        if !self.is_started() {
            debug!("Seed request not issued yet, starting instead of '{direction}'");
            self.start();
            return;
        }
        self.enqueue(Command::Follow(direction));
    }

    /// Snapshot of the current links
    pub fn links(&self) -> LinkSet {
        self.shared.links.borrow().clone()
    }

    /// Watch the links as pages arrive
    pub fn subscribe_links(&self) -> watch::Receiver<LinkSet> {
        self.shared.links.subscribe()
    }

    /// Check whether the seed request has been queued
    pub fn is_started(&self) -> bool {
        self.shared.started.load(Ordering::SeqCst)
    }

    fn enqueue(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Pagination worker has stopped, dropping {command:?}");
        }
    }
}

impl<T> std::fmt::Debug for PaginatedFetcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFetcher")
            .field("started", &self.shared.started.load(Ordering::SeqCst))
            .field("links", &*self.shared.links.borrow())
            .finish_non_exhaustive()
    }
}

/// Serial consumer of the command queue
struct Worker<P: ?Sized> {
    template: Box<dyn RequestTemplate>,
    executor: Arc<dyn RequestExecutor>,
    parser: Arc<P>,
    shared: Arc<Shared>,
}

impl<P> Worker<P>
where
    P: Parser + ?Sized + 'static,
{
    /// Drain the queue until every handle is gone
    async fn run(
        self,
        mut queue: mpsc::UnboundedReceiver<Command>,
        mut on_page: PageCallback<P::Item>,
    ) {
        while let Some(command) = queue.recv().await {
            let page = self.handle(command).await;
            on_page(page);
        }
        debug!("Pagination worker finished");
    }

    async fn handle(&self, command: Command) -> PageResult<P::Item> {
        match command {
            Command::Seed => self.perform(&self.template.build()).await,
            Command::Follow(direction) => {
                let links = self.shared.links.borrow().clone();
                let link = links.resolve(direction).inspect_err(|_| {
                    debug!("No '{direction}' link in current page");
                })?;
                self.perform(&Request::for_link(link)).await
            }
        }
    }

    async fn perform(&self, request: &Request) -> PageResult<P::Item> {
        let body = self.executor.execute(request).await.inspect_err(|e| {
            warn!("Page request to {} failed: {e}", request.url);
        })?;

        let envelope = decode_envelope(&body)?;

        let links = LinkSet::from_envelope(&envelope);
        debug!(?links, "Replacing pagination links");
        self.shared.links.send_replace(links);

        Ok(self.parser.parse(&envelope))
    }
}

/// Decode a response body into its JSON envelope
fn decode_envelope(body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Err(Error::invalid_response("empty response body"));
    }
    serde_json::from_str(body)
        .map_err(|e| Error::invalid_response(format!("response is not JSON: {e}")))
}
