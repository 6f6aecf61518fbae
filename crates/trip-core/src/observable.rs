//! Change notifications
//!
//! Views subscribe to the store and are told the kind of change that
//! happened, plus the affected item when there is one. The store never
//! interprets the kind; it forwards whatever the caller asked for.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};

/// Granularity of a state change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UpdateType {
    /// A single item changed in place
    Patch,
    /// The list changed
    Minor,
    /// Everything should be redrawn
    Major,
    /// Initial load finished (successfully or not)
    Init,
}

/// Handle returned by [`Observable::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<P> = Arc<dyn Fn(UpdateType, Option<&P>) + Send + Sync>;

/// Publish/subscribe helper owned by the store
pub struct Observable<P> {
    handlers: Mutex<Vec<(SubscriptionId, Handler<P>)>>,
    next_id: AtomicU64,
}

impl<P> Default for Observable<P> {
    fn default() -> Self {
        Self {
            handlers: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<P> Observable<P> {
    /// Create an observable with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, called for every notification until unsubscribed
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(UpdateType, Option<&P>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.lock();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Number of registered handlers
    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    /// Call every handler, in subscription order
    ///
    /// Handlers run on a snapshot of the list, so they may subscribe or
    /// unsubscribe without deadlocking.
    pub(crate) fn notify(&self, kind: UpdateType, payload: Option<&P>) {
        let snapshot: Vec<Handler<P>> = self
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();

        for handler in snapshot {
            handler(kind, payload);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Handler<P>)>> {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder() -> (
        Arc<Mutex<Vec<(UpdateType, Option<String>)>>>,
        impl Fn(UpdateType, Option<&String>) + Send + Sync + 'static,
    ) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let handler = move |kind: UpdateType, payload: Option<&String>| {
            sink.lock().unwrap().push((kind, payload.cloned()));
        };
        (seen, handler)
    }

    #[test]
    fn test_notify_reaches_subscriber() {
        let observable = Observable::<String>::new();
        let (seen, handler) = recorder();
        observable.subscribe(handler);

        observable.notify(UpdateType::Minor, Some(&"p1".to_string()));
        observable.notify(UpdateType::Init, None);

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (UpdateType::Minor, Some("p1".to_string())),
                (UpdateType::Init, None),
            ]
        );
    }

    #[test]
    fn test_handlers_run_in_subscription_order() {
        let observable = Observable::<String>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            observable.subscribe(move |_, _| order.lock().unwrap().push(tag));
        }

        observable.notify(UpdateType::Major, None);
        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_unsubscribe() {
        let observable = Observable::<String>::new();
        let (seen, handler) = recorder();
        let id = observable.subscribe(handler);

        assert!(observable.unsubscribe(id));
        assert!(!observable.unsubscribe(id));
        assert_eq!(observable.subscriber_count(), 0);

        observable.notify(UpdateType::Patch, None);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_handler_can_subscribe_during_notify() {
        let observable = Arc::new(Observable::<String>::new());
        let inner = Arc::clone(&observable);
        observable.subscribe(move |_, _| {
            inner.subscribe(|_, _| {});
        });

        observable.notify(UpdateType::Init, None);
        assert_eq!(observable.subscriber_count(), 2);
    }

    #[test]
    fn test_update_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&UpdateType::Init).unwrap(),
            "\"INIT\""
        );
        let kind: UpdateType = serde_json::from_str("\"PATCH\"").unwrap();
        assert_eq!(kind, UpdateType::Patch);
    }
}
