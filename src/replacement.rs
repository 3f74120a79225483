//! Page replacement policies.
//!
//! The manager tells a policy about every load and every access and asks it
//! for a victim when all frames are taken. Policies only ever see page numbers.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;

/// Which policy a manager was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolicyKind {
    #[default]
    Fifo,
    Lru,
}

impl PolicyKind {
    /// Fresh policy state for this kind.
    pub fn build(self) -> Box<dyn ReplacementPolicy> {
        match self {
            PolicyKind::Fifo => Box::new(Fifo::new()),
            PolicyKind::Lru => Box::new(Lru::new()),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Fifo => write!(f, "FIFO"),
            PolicyKind::Lru => write!(f, "LRU"),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    /// Accepts `fifo`/`lru` in any case, or the menu numbers `1`/`2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fifo" | "1" => Ok(PolicyKind::Fifo),
            "lru" | "2" => Ok(PolicyKind::Lru),
            other => Err(format!("Unknown replacement policy: {} (expected fifo or lru)", other)),
        }
    }
}

/// Decides which resident page gives up its frame.
pub trait ReplacementPolicy: Send {
    fn kind(&self) -> PolicyKind;

    /// `page` was just loaded into a frame.
    fn on_load(&mut self, page: usize);

    /// `page` was accessed. Called after every successful access, including
    /// the one that loaded it.
    fn on_access(&mut self, _page: usize) {}

    /// Remove and return the page to evict, or `None` if nothing is tracked.
    fn select_victim(&mut self) -> Option<usize>;

    /// Tracked pages, next victim last.
    fn resident(&self) -> Vec<usize>;
}

/// First in, first out. Re-accessing a page does not move it.
#[derive(Debug, Default)]
pub struct Fifo {
    queue: VecDeque<usize>,
}

impl Fifo {
    pub fn new() -> Self {
        Fifo {
            queue: VecDeque::new(),
        }
    }
}

impl ReplacementPolicy for Fifo {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Fifo
    }

    fn on_load(&mut self, page: usize) {
        self.queue.push_back(page);
    }

    fn select_victim(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    fn resident(&self) -> Vec<usize> {
        self.queue.iter().rev().copied().collect()
    }
}

#[derive(Debug, Clone, Copy)]
struct Link {
    prev: Option<usize>,
    next: Option<usize>,
}

/// Least recently used.
///
/// A doubly linked list threaded through a page -> link map, so moving a page
/// to the front and dropping the tail are both O(1). `head` is the most
/// recently used page.
#[derive(Debug, Default)]
pub struct Lru {
    links: HashMap<usize, Link>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl Lru {
    pub fn new() -> Self {
        Lru {
            links: HashMap::new(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn unlink(&mut self, page: usize) -> Option<Link> {
        let link = self.links.remove(&page)?;
        match link.prev {
            Some(prev) => {
                if let Some(l) = self.links.get_mut(&prev) {
                    l.next = link.next;
                }
            }
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => {
                if let Some(l) = self.links.get_mut(&next) {
                    l.prev = link.prev;
                }
            }
            None => self.tail = link.prev,
        }
        Some(link)
    }

    fn push_front(&mut self, page: usize) {
        let old_head = self.head;
        self.links.insert(
            page,
            Link {
                prev: None,
                next: old_head,
            },
        );
        match old_head {
            Some(h) => {
                if let Some(l) = self.links.get_mut(&h) {
                    l.prev = Some(page);
                }
            }
            None => self.tail = Some(page),
        }
        self.head = Some(page);
    }
}

impl ReplacementPolicy for Lru {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }

    fn on_load(&mut self, page: usize) {
        // a page is loaded at most once while resident, but never let a
        // duplicate corrupt the list
        self.unlink(page);
        self.push_front(page);
    }

    fn on_access(&mut self, page: usize) {
        if self.head == Some(page) {
            return;
        }
        if self.unlink(page).is_some() {
            self.push_front(page);
        }
    }

    fn select_victim(&mut self) -> Option<usize> {
        let victim = self.tail?;
        self.unlink(victim);
        Some(victim)
    }

    fn resident(&self) -> Vec<usize> {
        let mut pages = Vec::with_capacity(self.links.len());
        let mut cursor = self.head;
        while let Some(page) = cursor {
            pages.push(page);
            cursor = self.links.get(&page).and_then(|l| l.next);
        }
        pages
    }
}
