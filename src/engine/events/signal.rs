use std::sync::{Arc, Weak};

use log::warn;
use parking_lot::Mutex;

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub struct ListenerId(pub u64);

type Listener<T> = Arc<Mutex<dyn FnMut(&T) + Send>>;

struct SignalInner<T> {
  next_id: u64,
  listeners: Vec<(ListenerId, Listener<T>)>,
}

impl<T> SignalInner<T> {
  fn contains(&self, id: ListenerId) -> bool {
    self.listeners.iter().any(|(listener_id, _)| *listener_id == id)
  }

  fn remove(&mut self, id: ListenerId) -> bool {
    let before = self.listeners.len();
    self.listeners.retain(|(listener_id, _)| *listener_id != id);
    before != self.listeners.len()
  }
}

// Ordered list of subscribers, invoked synchronously in the order they connected.
// Connecting or disconnecting from inside a callback is allowed: a dispatch
// runs over a snapshot and skips listeners disconnected since it started.
pub struct Signal<T> {
  inner: Arc<Mutex<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
  fn clone(&self) -> Self {
    Self {
      inner: self.inner.clone()
    }
  }
}

impl<T: 'static> Default for Signal<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: 'static> Signal<T> {
  pub fn new() -> Signal<T> {
    Self {
      inner: Arc::new(Mutex::new(SignalInner {
        next_id: 1,
        listeners: Vec::new()
      }))
    }
  }

  pub fn connect<F>(&self, callback: F) -> Connection<T>
    where F: FnMut(&T) + Send + 'static {
    let listener: Listener<T> = Arc::new(Mutex::new(callback));
    let mut inner = self.inner.lock();
    let id = ListenerId(inner.next_id);
    inner.next_id += 1;
    inner.listeners.push((id, listener));
    Connection {
      id,
      signal: Arc::downgrade(&self.inner)
    }
  }

  pub fn disconnect(&self, id: ListenerId) -> bool {
    self.inner.lock().remove(id)
  }

  pub fn disconnect_all(&self) {
    self.inner.lock().listeners.clear();
  }

  pub fn listener_count(&self) -> usize {
    self.inner.lock().listeners.len()
  }

  // Invokes every connected listener with `value`, returns how many ran.
  pub fn fire(&self, value: &T) -> usize {
    let snapshot: Vec<(ListenerId, Listener<T>)> = self.inner.lock().listeners.clone();
    let mut fired = 0;
    for (id, listener) in snapshot {
      if !self.inner.lock().contains(id) {
        continue;
      }
      match listener.try_lock() {
        Some(mut callback) => {
          (&mut *callback)(value);
          fired += 1;
        },
        None => warn!("listener {:?} fired re-entrantly, skipping", id)
      }
    }
    fired
  }
}

// Handle returned by `Signal::connect`. Dropping it keeps the listener connected.
pub struct Connection<T> {
  id: ListenerId,
  signal: Weak<Mutex<SignalInner<T>>>,
}

impl<T> Connection<T> {
  pub fn id(&self) -> ListenerId {
    self.id
  }

  pub fn is_connected(&self) -> bool {
    self.signal.upgrade().map_or(false, |inner| inner.lock().contains(self.id))
  }

  pub fn disconnect(&self) -> bool {
    match self.signal.upgrade() {
      Some(inner) => inner.lock().remove(self.id),
      None => false
    }
  }
}
