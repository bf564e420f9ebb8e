use core::{
    cell::UnsafeCell,
    fmt::{self, Debug, Formatter},
    hint::spin_loop,
    ops::{Deref, DerefMut},
    sync::atomic::{AtomicU8, Ordering},
};

const LOCKED: u8 = 0x0;
const FREE: u8 = 0x1;

/// A spin lock around a value, acquired with a single atomic operation.
pub(crate) struct SpinLock<T> {
    data: UnsafeCell<T>,
    state: AtomicU8,
}

unsafe impl<T: Send> Send for SpinLock<T> {}
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T: Default> Default for SpinLock<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> SpinLock<T> {
    /// Create a new, unlocked instance.
    pub(crate) const fn new(value: T) -> Self {
        Self {
            data: UnsafeCell::new(value),
            state: AtomicU8::new(FREE),
        }
    }

    #[inline]
    fn state(&self) -> u8 {
        self.state.load(Ordering::Relaxed)
    }

    /// Check if a guard is held.
    #[inline]
    pub(crate) fn is_locked(&self) -> bool {
        self.state() == LOCKED
    }

    /// Unwrap an owned lock instance.
    #[cfg(test)]
    pub(crate) fn into_inner(self) -> T {
        self.data.into_inner()
    }

    /// Try to acquire an exclusive lock.
    pub(crate) fn try_lock(&self) -> Option<SpinGuard<'_, T>> {
        if self.state.swap(LOCKED, Ordering::Acquire) == FREE {
            Some(SpinGuard { lock: self })
        } else {
            None
        }
    }

    /// In a spin loop, wait to acquire the lock.
    pub(crate) fn spin_lock(&self) -> SpinGuard<'_, T> {
        loop {
            if let Some(guard) = self.try_lock() {
                break guard;
            }
            // use a relaxed check in spin loop
            while self.is_locked() {
                spin_loop();
            }
        }
    }
}

impl<T> Debug for SpinLock<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpinLock({})",
            if self.is_locked() { "Locked" } else { "Free" }
        )
    }
}

/// An exclusive guard for the value of a [`SpinLock`]
pub(crate) struct SpinGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> Deref for SpinGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*self.lock.data.get() }
    }
}

impl<T> DerefMut for SpinGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *self.lock.data.get() }
    }
}

impl<T: Debug> Debug for SpinGuard<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SpinGuard").field(&**self).finish()
    }
}

impl<T> Drop for SpinGuard<'_, T> {
    fn drop(&mut self) {
        self.lock.state.store(FREE, Ordering::Release);
    }
}
