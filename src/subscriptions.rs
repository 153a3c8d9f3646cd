/// Teardown handles for everything a mounted site attached to the page.
///
/// Dropping the set detaches every listener; [`Subscriptions::dispose`] does
/// the same explicitly. Each teardown runs at most once.
#[derive(Default)]
pub struct Subscriptions {
    teardowns: Vec<Box<dyn FnOnce()>>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, teardown: impl FnOnce() + 'static) {
        self.teardowns.push(Box::new(teardown));
    }

    pub fn len(&self) -> usize {
        self.teardowns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teardowns.is_empty()
    }

    pub fn dispose(mut self) {
        self.run_teardowns();
    }

    fn run_teardowns(&mut self) {
        // Last attached, first detached.
        while let Some(teardown) = self.teardowns.pop() {
            teardown();
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.run_teardowns();
    }
}

/// How the page went away on `pagehide`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageHide {
    /// Kept in the back/forward cache; restored pages keep their listeners.
    Cached,
    Unloaded,
}

impl PageHide {
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            Self::Cached
        } else {
            Self::Unloaded
        }
    }
}

/// Holds the listeners of the currently mounted site.
#[derive(Default)]
pub struct MountSlot {
    current: Option<Subscriptions>,
}

impl MountSlot {
    /// Stores a new mount and hands back the one it replaces.
    pub fn install(&mut self, subscriptions: Subscriptions) -> Option<Subscriptions> {
        self.current.replace(subscriptions)
    }

    /// Takes the mounted listeners out when the page is really going away.
    pub fn release(&mut self, hide: PageHide) -> Option<Subscriptions> {
        match hide {
            PageHide::Cached => None,
            PageHide::Unloaded => self.current.take(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.current.is_some()
    }
}
