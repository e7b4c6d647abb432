// src/crawl/frontier.rs
// =============================================================================
// The traversal state of one crawl: a FIFO queue of pages still to visit and
// the set of canonical URLs already taken off that queue.
//
// Both live in a single struct that the orchestrator owns exclusively for
// the duration of one crawl call. Nothing is shared between crawls.
//
// Breadth-first order falls out of the FIFO discipline: every depth-d item is
// pushed before any depth-(d+1) item can be popped.
// =============================================================================

use std::collections::{HashSet, VecDeque};

// A page waiting in the queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierItem {
    pub url: String,
    pub depth: usize, // link hops from the seed (seed = 0)
}

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<FrontierItem>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn with_seed(seed: &str) -> Self {
        let mut frontier = Self::default();
        frontier.queue.push_back(FrontierItem {
            url: seed.to_string(),
            depth: 0,
        });
        frontier
    }

    pub fn pop(&mut self) -> Option<FrontierItem> {
        self.queue.pop_front()
    }

    /// Marks a canonical URL as visited. Returns false if it already was.
    pub fn mark_visited(&mut self, canonical: &str) -> bool {
        self.visited.insert(canonical.to_string())
    }

    pub fn is_visited(&self, canonical: &str) -> bool {
        self.visited.contains(canonical)
    }

    /// Queues a discovered link unless it has already been visited.
    pub fn push(&mut self, url: String, depth: usize) -> bool {
        if self.is_visited(&url) {
            return false;
        }
        self.queue.push_back(FrontierItem { url, depth });
        true
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
