//! Per-thread storage slots and the execution identity of the current thread.

use std::cell::Cell;

/// The value every thread's constant slot is declared with.
pub const TLS_VALUE: i32 = 50;

thread_local! {
    static ID: Cell<i32> = const { Cell::new(0) };
    static VALUE: i32 = const { TLS_VALUE };
}

/// A view of the current thread's private slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalSlots {
    /// Contents of the identifier slot
    pub id: i32,
    /// Contents of the constant value slot
    pub value: i32,
    /// Address of this thread's identifier slot
    pub id_addr: usize,
    /// Address of this thread's constant value slot
    pub value_addr: usize,
}

/// Store `id` in the current thread's identifier slot.
pub fn assign_id(id: i32) {
    ID.with(|slot| slot.set(id));
}

/// Read both slots of the current thread along with their addresses.
pub fn snapshot() -> LocalSlots {
    let (id, id_addr) = ID.with(|slot| (slot.get(), slot as *const Cell<i32> as usize));
    let (value, value_addr) = VALUE.with(|slot| (*slot, slot as *const i32 as usize));
    LocalSlots {
        id,
        value,
        id_addr,
        value_addr,
    }
}

/// The OS thread id of the caller.
#[cfg(target_os = "linux")]
pub fn execution_identity() -> i32 {
    // gettid cannot fail
    unsafe { libc::syscall(libc::SYS_gettid) as i32 }
}

/// A process-unique number assigned to the calling thread on first use.
#[cfg(not(target_os = "linux"))]
pub fn execution_identity() -> i32 {
    use std::sync::atomic::{AtomicI32, Ordering};

    static NEXT: AtomicI32 = AtomicI32::new(1);
    thread_local! {
        static IDENTITY: i32 = NEXT.fetch_add(1, Ordering::Relaxed);
    }
    IDENTITY.with(|id| *id)
}
