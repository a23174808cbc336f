//! Dissemination barrier: lock-free rendezvous in `⌈log₂ P⌉` rounds.
//!
//! Each participant owns one arrival slot. In round `r` a thread publishes
//! `r` to its own slot, spins until the peer `2^(r-1)` positions ahead
//! (mod P) has published the same round, then clears that peer's slot to
//! acknowledge. Arrival signals spread by doubling, so no thread passes the
//! barrier before every thread has reached it and no shared counter is
//! contended by all P threads at once.
//!
//! Threads busy-wait (`spin_loop`), never sleep. A participant that never
//! calls [`SpinBarrier::wait`] deadlocks the rest; that is the accepted
//! failure mode of lock-step computation.

use std::hint;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One arrival slot per cache line.
#[repr(align(64))]
struct Slot(AtomicUsize);

/// Busy-wait dissemination barrier for a fixed set of threads.
pub struct SpinBarrier {
    slots: Vec<Slot>,
    rounds: usize,
}

impl SpinBarrier {
    /// Create a barrier for `participants` threads, identified `0..P`.
    pub fn new(participants: usize) -> Self {
        assert!(participants > 0, "barrier needs at least one participant");
        let rounds = participants.next_power_of_two().trailing_zeros() as usize;
        Self {
            slots: (0..participants).map(|_| Slot(AtomicUsize::new(0))).collect(),
            rounds,
        }
    }

    #[inline]
    pub fn participants(&self) -> usize {
        self.slots.len()
    }

    /// Block (spinning) until every participant has called `wait` for the
    /// current rendezvous.
    ///
    /// The acquire load on each observed slot pairs with the release store
    /// that published it, so writes made by any thread before its call are
    /// visible to every thread after its own call returns.
    pub fn wait(&self, id: usize) {
        let participants = self.slots.len();
        for round in 1..=self.rounds {
            // The slot may still hold the previous round's value until the
            // observer acknowledges it.
            while self.slots[id].0.load(Ordering::Acquire) != 0 {
                hint::spin_loop();
            }
            self.slots[id].0.store(round, Ordering::Release);

            let peer = (id + (1 << (round - 1))) % participants;
            while self.slots[peer].0.load(Ordering::Acquire) != round {
                hint::spin_loop();
            }
            self.slots[peer].0.store(0, Ordering::Release);
        }
    }
}
