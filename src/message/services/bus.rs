//! Synchronous publish/subscribe bus with retained history.

use crate::agent::domain::AgentName;
use crate::message::domain::{
    AgentMessage, DeliveryError, HistoryFilter, OutboundMessage, Recipient,
};
use mockable::Clock;
use std::num::NonZeroUsize;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

/// Subscriber callback invoked for each delivered message.
pub type MessageCallback = Arc<dyn Fn(&AgentMessage) -> Result<(), DeliveryError> + Send + Sync>;

/// Result type for bus operations.
pub type MessageBusResult<T> = Result<T, MessageBusError>;

/// Errors returned by [`MessageBus`].
#[derive(Debug, Clone, Error)]
pub enum MessageBusError {
    /// A subscriber callback failed. Later subscribers were not invoked.
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Internal state could not be accessed.
    #[error("message bus unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

fn unavailable(err: impl std::fmt::Display) -> MessageBusError {
    MessageBusError::Unavailable(Arc::new(std::io::Error::other(err.to_string())))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Direct,
    Broadcast,
}

#[derive(Clone)]
struct Registration {
    subscriber: AgentName,
    channel: Channel,
    callback: MessageCallback,
}

impl Registration {
    fn receives(&self, recipient: &Recipient) -> bool {
        match recipient {
            Recipient::Broadcast => self.channel == Channel::Broadcast,
            Recipient::Agent(name) => self.channel == Channel::Direct && &self.subscriber == name,
        }
    }
}

#[derive(Default)]
struct BusState {
    history: Vec<AgentMessage>,
    registrations: Vec<Registration>,
}

/// In-process message bus.
///
/// Direct messages reach callbacks subscribed under the recipient name;
/// broadcast messages reach every broadcast-channel callback. Repeated
/// subscriptions are not deduplicated and each receives its own delivery.
pub struct MessageBus<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<BusState>>,
    clock: Arc<C>,
}

impl<C> Clone for MessageBus<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<C> MessageBus<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty bus.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(BusState::default())),
            clock,
        }
    }

    /// Stamps and records `message`, then delivers it to matching
    /// subscribers in subscription order.
    ///
    /// The message stays in the history even when delivery fails.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Delivery`] with the first callback error,
    /// or [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn send(&self, message: OutboundMessage) -> MessageBusResult<AgentMessage> {
        let stamped = message.stamp(self.clock.utc());
        debug!(
            from = %stamped.sender(),
            to = %stamped.recipient(),
            kind = %stamped.kind(),
            "message sent"
        );
        let targets: Vec<MessageCallback> = {
            let mut state = self.state.write().map_err(unavailable)?;
            state.history.push(stamped.clone());
            state
                .registrations
                .iter()
                .filter(|registration| registration.receives(stamped.recipient()))
                .map(|registration| Arc::clone(&registration.callback))
                .collect()
        };
        for callback in targets {
            callback(&stamped)?;
        }
        Ok(stamped)
    }

    /// Registers `callback` for messages addressed to `subscriber` and for
    /// broadcasts.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn subscribe(&self, subscriber: AgentName, callback: MessageCallback) -> MessageBusResult<()> {
        let mut state = self.state.write().map_err(unavailable)?;
        state.registrations.push(Registration {
            subscriber: subscriber.clone(),
            channel: Channel::Direct,
            callback: Arc::clone(&callback),
        });
        state.registrations.push(Registration {
            subscriber,
            channel: Channel::Broadcast,
            callback,
        });
        Ok(())
    }

    /// Registers `callback` for broadcasts only.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn subscribe_broadcast(
        &self,
        subscriber: AgentName,
        callback: MessageCallback,
    ) -> MessageBusResult<()> {
        let mut state = self.state.write().map_err(unavailable)?;
        state.registrations.push(Registration {
            subscriber,
            channel: Channel::Broadcast,
            callback,
        });
        Ok(())
    }

    /// Subscribes a bounded mailbox and returns its receiving half.
    ///
    /// A send that finds the mailbox full fails with
    /// [`DeliveryError::MailboxFull`] instead of waiting.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn subscribe_mailbox(
        &self,
        subscriber: AgentName,
        capacity: NonZeroUsize,
    ) -> MessageBusResult<mpsc::Receiver<AgentMessage>> {
        let (sender, receiver) = mpsc::channel(capacity.get());
        let owner = subscriber.clone();
        let callback: MessageCallback = Arc::new(move |message: &AgentMessage| {
            sender.try_send(message.clone()).map_err(|err| match err {
                TrySendError::Full(_) => DeliveryError::MailboxFull {
                    subscriber: owner.clone(),
                },
                TrySendError::Closed(_) => DeliveryError::MailboxClosed {
                    subscriber: owner.clone(),
                },
            })
        });
        self.subscribe(subscriber, callback)?;
        Ok(receiver)
    }

    /// Removes every registration taken under `subscriber`.
    ///
    /// Returns the number of registrations removed.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn unsubscribe(&self, subscriber: &AgentName) -> MessageBusResult<usize> {
        let mut state = self.state.write().map_err(unavailable)?;
        let before = state.registrations.len();
        state
            .registrations
            .retain(|registration| &registration.subscriber != subscriber);
        Ok(before.saturating_sub(state.registrations.len()))
    }

    /// Returns retained messages matching `filter`, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn history(&self, filter: &HistoryFilter) -> MessageBusResult<Vec<AgentMessage>> {
        let state = self.state.read().map_err(unavailable)?;
        Ok(state
            .history
            .iter()
            .filter(|message| filter.matches(message))
            .cloned()
            .collect())
    }

    /// Drops the history. Subscriptions are kept.
    ///
    /// # Errors
    ///
    /// Returns [`MessageBusError::Unavailable`] when lock acquisition fails.
    pub fn clear(&self) -> MessageBusResult<()> {
        let mut state = self.state.write().map_err(unavailable)?;
        state.history.clear();
        Ok(())
    }
}
