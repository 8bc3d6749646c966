use std::sync::Arc;
use striker_control::{CommandSink, MotionCommand};
use tokio::sync::broadcast;

/// Broadcast topic with bounded capacity.
/// `T` must be `Send + Sync` because we hop across threads.
#[derive(Debug, Clone)]
pub struct Topic<T> {
    tx: broadcast::Sender<Arc<T>>,
}

impl<T: Send + Sync + 'static> Topic<T> {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Fails when nobody is subscribed; the message is then dropped.
    pub fn publish(&self, msg: T) -> Result<usize, broadcast::error::SendError<Arc<T>>> {
        self.tx.send(Arc::new(msg))
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<T>> {
        self.tx.subscribe()
    }
}

/// Commands go to whoever listens on the topic; a topic with no actuator is an error.
impl CommandSink for Topic<MotionCommand> {
    type Error = broadcast::error::SendError<Arc<MotionCommand>>;

    fn send(&mut self, command: MotionCommand) -> Result<(), Self::Error> {
        self.publish(command).map(|_| ())
    }
}
