//! Shared utilities for runner integration tests.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures_util::{stream, StreamExt};
use tokio::time::Instant;
use westend_remarks::blockchain::{
    BlockHash, ChainError, ChainResult, RemarkChain, StatusStream, TxStatusUpdate, Wallet,
};

/// How the mock answers one `submit_remark` call.
#[allow(dead_code)]
pub enum SubmitBehavior {
    /// Emit these statuses, then end the subscription.
    Statuses(Vec<TxStatusUpdate>),
    /// Emit these statuses, then never produce anything again.
    Hang(Vec<TxStatusUpdate>),
    /// Fail the submission itself.
    Reject(String),
}

/// A submission seen by the mock.
#[derive(Debug, Clone)]
pub struct Submission {
    pub remark: String,
    pub at: Instant,
}

#[derive(Default)]
pub struct MockState {
    pub submissions: Mutex<Vec<Submission>>,
    pub disconnects: AtomicUsize,
    /// Status subscriptions dropped so far.
    pub released: AtomicUsize,
}

/// In-memory chain that records what the runner does.
pub struct MockChain {
    pub state: Arc<MockState>,
    pub head: Result<u64, String>,
    behaviors: Mutex<VecDeque<SubmitBehavior>>,
}

impl MockChain {
    pub fn new(head: u64, behaviors: Vec<SubmitBehavior>) -> Self {
        Self {
            state: Arc::new(MockState::default()),
            head: Ok(head),
            behaviors: Mutex::new(behaviors.into()),
        }
    }

    #[allow(dead_code)]
    pub fn failing_head(message: &str) -> Self {
        let mut chain = Self::new(0, Vec::new());
        chain.head = Err(message.to_string());
        chain
    }
}

/// Increments a counter when the status stream is dropped.
struct ReleaseGuard(Arc<MockState>);

impl Drop for ReleaseGuard {
    fn drop(&mut self) {
        self.0.released.fetch_add(1, Ordering::SeqCst);
    }
}

fn tracked(statuses: Vec<TxStatusUpdate>, hang: bool, state: Arc<MockState>) -> StatusStream {
    let guard = ReleaseGuard(state);
    let emitted = stream::iter(statuses.into_iter().map(Ok));
    let tail: StatusStream = if hang {
        stream::pending().boxed()
    } else {
        stream::empty().boxed()
    };
    emitted
        .chain(tail)
        .map(move |status| {
            let _keep = &guard;
            status
        })
        .boxed()
}

#[async_trait]
impl RemarkChain for MockChain {
    async fn chain_name(&self) -> ChainResult<String> {
        Ok("Westend".to_string())
    }

    fn query_modules(&self) -> Vec<String> {
        vec!["system".to_string(), "balances".to_string()]
    }

    async fn head_number(&self) -> ChainResult<u64> {
        match &self.head {
            Ok(n) => Ok(*n),
            Err(message) => Err(ChainError::Rpc(message.clone())),
        }
    }

    async fn submit_remark(&self, _wallet: &Wallet, remark: &[u8]) -> ChainResult<StatusStream> {
        self.state.submissions.lock().unwrap().push(Submission {
            remark: String::from_utf8_lossy(remark).into_owned(),
            at: Instant::now(),
        });

        let behavior = self
            .behaviors
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SubmitBehavior::Statuses(Vec::new()));

        match behavior {
            SubmitBehavior::Statuses(statuses) => Ok(tracked(statuses, false, self.state.clone())),
            SubmitBehavior::Hang(statuses) => Ok(tracked(statuses, true, self.state.clone())),
            SubmitBehavior::Reject(message) => Err(ChainError::Submission(message)),
        }
    }

    async fn disconnect(self) {
        self.state.disconnects.fetch_add(1, Ordering::SeqCst);
    }
}

/// The usual happy-path status sequence ending in a best-block inclusion.
pub fn included_in(byte: u8) -> Vec<TxStatusUpdate> {
    vec![
        TxStatusUpdate::Validated,
        TxStatusUpdate::Broadcasted,
        TxStatusUpdate::InBlock(BlockHash([byte; 32])),
    ]
}

pub fn dev_wallet() -> Wallet {
    Wallet::from_uri("//Alice").unwrap()
}

/// Shared buffer that collects formatted log output.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Route this thread's log output into a buffer for the guard's lifetime.
pub fn capture_logs() -> (tracing::subscriber::DefaultGuard, LogBuffer) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    (tracing::subscriber::set_default(subscriber), buffer)
}
