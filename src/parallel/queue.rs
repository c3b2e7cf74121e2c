use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Condvar, Mutex};

/// A multi-producer multi-consumer FIFO with a blocking `get`.
///
/// `put` never blocks; admission control is the producers' business
/// (workers check [`WorkQueue::len`] before forking a branch, a single
/// atomic load that never touches the mutex).
pub struct WorkQueue<T> {
    contents: Mutex<VecDeque<T>>,
    ready: Condvar,
    queue_length: AtomicUsize,
    total_puts: AtomicUsize,
}

impl<T> WorkQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        WorkQueue {
            contents: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
            queue_length: AtomicUsize::new(0),
            total_puts: AtomicUsize::new(0),
        }
    }

    /// Push an item and wake one waiting consumer.
    pub fn put(&self, item: T) {
        self.total_puts.fetch_add(1, Ordering::AcqRel);
        {
            let mut contents = self.contents.lock().unwrap();
            contents.push_back(item);
            self.queue_length.fetch_add(1, Ordering::AcqRel);
        }
        self.ready.notify_one();
    }

    /// Pop the oldest item, blocking until one is available.
    pub fn get(&self) -> T {
        let mut contents = self.contents.lock().unwrap();
        while contents.is_empty() {
            contents = self.ready.wait(contents).unwrap();
        }
        self.queue_length.fetch_sub(1, Ordering::AcqRel);
        contents.pop_front().unwrap()
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.queue_length.load(Ordering::Acquire)
    }

    /// Returns whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many items were ever enqueued.
    pub fn total_puts(&self) -> usize {
        self.total_puts.load(Ordering::Acquire)
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        WorkQueue::new()
    }
}
