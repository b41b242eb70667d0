//! Topic-based event bus implementation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::CombatEvent;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, strum::Display, strum::EnumIter)]
pub enum Topic {
    /// Health and death
    Vitals,
    /// Hits, poise, staggers, attacks
    Combat,
    /// State machine transitions
    State,
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&CombatEvent)>;

/// Membership change requested while subscribers were being notified.
enum Pending {
    Add(Topic, SubscriptionId, Callback),
    Remove(SubscriptionId),
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    live: HashMap<SubscriptionId, Topic>,
    pending: Vec<Pending>,
}

#[derive(Default)]
struct Shared {
    topics: RefCell<HashMap<Topic, Vec<(SubscriptionId, Callback)>>>,
    registry: RefCell<Registry>,
}

/// Topic-based event bus
///
/// Cloning yields another handle to the same subscribers. A callback that
/// publishes while it is being notified has its event dropped (and traced):
/// notifications never re-enter. Subscribing or unsubscribing from inside a
/// callback is deferred until the current delivery finishes; a subscription
/// removed mid-delivery is not called again.
#[derive(Clone, Default)]
pub struct EventBus {
    shared: Rc<Shared>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `event` to every subscriber of its topic.
    pub fn publish(&self, event: CombatEvent) {
        let topic = event.topic();

        match self.shared.topics.try_borrow_mut() {
            Ok(mut topics) => {
                match topics.get_mut(&topic) {
                    Some(subscribers) if !subscribers.is_empty() => {
                        for (id, callback) in subscribers.iter_mut() {
                            if self.is_live(*id) {
                                callback(&event);
                            }
                        }
                    }
                    _ => {
                        // No subscribers for this topic - this is normal, not an error
                        tracing::trace!(target: "combat_runtime::events", ?topic, ?event, "no subscribers");
                    }
                }
                drop(topics);
                self.apply_pending();
            }
            Err(_) => {
                tracing::debug!(
                    target: "combat_runtime::events",
                    ?topic,
                    ?event,
                    "event published from inside a callback, skipped"
                );
            }
        }
    }

    /// Subscribe to a specific topic.
    pub fn subscribe(
        &self,
        topic: Topic,
        callback: impl FnMut(&CombatEvent) + 'static,
    ) -> SubscriptionId {
        let mut registry = self.shared.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.live.insert(id, topic);

        let callback: Callback = Box::new(callback);
        match self.shared.topics.try_borrow_mut() {
            Ok(mut topics) => topics.entry(topic).or_default().push((id, callback)),
            Err(_) => registry.pending.push(Pending::Add(topic, id, callback)),
        }
        id
    }

    /// Subscribe to every topic with one shared callback.
    pub fn subscribe_all(&self, callback: impl FnMut(&CombatEvent) + 'static) -> Vec<SubscriptionId> {
        let shared = Rc::new(RefCell::new(callback));
        <Topic as strum::IntoEnumIterator>::iter()
            .map(|topic| {
                let shared = Rc::clone(&shared);
                self.subscribe(topic, move |event| {
                    let mut callback = shared.borrow_mut();
                    (*callback)(event)
                })
            })
            .collect()
    }

    /// Removes a subscription. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.shared.registry.borrow_mut();
        let Some(topic) = registry.live.remove(&id) else {
            return false;
        };

        match self.shared.topics.try_borrow_mut() {
            Ok(mut topics) => {
                if let Some(subscribers) = topics.get_mut(&topic) {
                    subscribers.retain(|(sub, _)| *sub != id);
                }
            }
            Err(_) => registry.pending.push(Pending::Remove(id)),
        }
        true
    }

    /// Number of subscribers on `topic`.
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.shared
            .registry
            .borrow()
            .live
            .values()
            .filter(|&&live| live == topic)
            .count()
    }

    fn is_live(&self, id: SubscriptionId) -> bool {
        self.shared.registry.borrow().live.contains_key(&id)
    }

    fn apply_pending(&self) {
        let pending = std::mem::take(&mut self.shared.registry.borrow_mut().pending);
        if pending.is_empty() {
            return;
        }
        let mut topics = self.shared.topics.borrow_mut();
        for change in pending {
            match change {
                Pending::Add(topic, id, callback) => {
                    topics.entry(topic).or_default().push((id, callback));
                }
                Pending::Remove(id) => {
                    for subscribers in topics.values_mut() {
                        subscribers.retain(|(sub, _)| *sub != id);
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::CombatantId;

    fn died(id: u32) -> CombatEvent {
        CombatEvent::Died {
            entity: CombatantId(id),
            killer: None,
        }
    }

    #[test]
    fn subscribers_only_see_their_topic() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(Topic::Vitals, move |event| sink.borrow_mut().push(event.clone()));

        bus.publish(died(1));
        bus.publish(CombatEvent::AttackStarted {
            entity: CombatantId(1),
            attack: "slash".into(),
        });

        assert_eq!(*seen.borrow(), vec![died(1)]);
    }

    #[test]
    fn reentrant_publish_is_dropped() {
        let bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let inner_bus = bus.clone();
        let counter = Rc::clone(&count);
        bus.subscribe(Topic::Vitals, move |_| {
            *counter.borrow_mut() += 1;
            inner_bus.publish(died(2));
        });

        bus.publish(died(1));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn one_shot_subscriber_can_unsubscribe_itself() {
        let bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let slot = Rc::new(RefCell::new(None));

        let inner_bus = bus.clone();
        let counter = Rc::clone(&count);
        let own_id = Rc::clone(&slot);
        let id = bus.subscribe(Topic::Vitals, move |_| {
            *counter.borrow_mut() += 1;
            if let Some(id) = own_id.borrow_mut().take() {
                assert!(inner_bus.unsubscribe(id));
            }
        });
        *slot.borrow_mut() = Some(id);

        bus.publish(died(1));
        bus.publish(died(2));
        assert_eq!(*count.borrow(), 1);
        assert_eq!(bus.subscriber_count(Topic::Vitals), 0);
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn subscriptions_made_during_delivery_start_with_the_next_event() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = bus.clone();
        let sink = Rc::clone(&seen);
        let mut armed = true;
        bus.subscribe(Topic::Vitals, move |_| {
            if std::mem::take(&mut armed) {
                let sink = Rc::clone(&sink);
                inner_bus.subscribe(Topic::Vitals, move |event| sink.borrow_mut().push(event.clone()));
            }
        });

        bus.publish(died(1));
        assert!(seen.borrow().is_empty());
        assert_eq!(bus.subscriber_count(Topic::Vitals), 2);

        bus.publish(died(2));
        assert_eq!(*seen.borrow(), vec![died(2)]);
    }

    #[test]
    fn subscriber_removed_mid_delivery_is_skipped() {
        let bus = EventBus::new();
        let count = Rc::new(RefCell::new(0));
        let victim = Rc::new(RefCell::new(None));

        let inner_bus = bus.clone();
        let target = Rc::clone(&victim);
        bus.subscribe(Topic::Vitals, move |_| {
            if let Some(id) = target.borrow_mut().take() {
                inner_bus.unsubscribe(id);
            }
        });
        let counter = Rc::clone(&count);
        let id = bus.subscribe(Topic::Vitals, move |_| *counter.borrow_mut() += 1);
        *victim.borrow_mut() = Some(id);

        bus.publish(died(1));
        bus.publish(died(2));
        assert_eq!(*count.borrow(), 0);
        assert_eq!(bus.subscriber_count(Topic::Vitals), 1);
    }

    #[test]
    fn unsubscribe_and_subscribe_all() {
        let bus = EventBus::new();
        let ids = bus.subscribe_all(|_| {});
        assert_eq!(ids.len(), 3);
        assert_eq!(bus.subscriber_count(Topic::State), 1);
        assert!(bus.unsubscribe(ids[2]));
        assert!(!bus.unsubscribe(ids[2]));
    }
}
