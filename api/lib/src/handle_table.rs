// Copyright (C) Microsoft Corporation. All rights reserved.

use std::collections::HashMap;
use std::ops::Deref;

use parking_lot::Mutex;

use super::*;

const INDEX_BITS: u32 = 24;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// Largest number of live entries a single table can hold.
pub(crate) const MAX_TABLE_ENTRIES: u32 = INDEX_MASK - 1;

/// Opaque identifier of a host-owned object.
///
/// The top 8 bits name the table that issued the handle and the low 24 bits
/// index into it. A handle never resolves in a table other than its issuer.
#[repr(transparent)]
#[derive(Debug, Eq, Hash, PartialEq, Copy, Clone)]
pub struct Handle(u32);

impl Handle {
    fn new(handle_type: HandleType, index: u32) -> Self {
        Handle(((handle_type as u32) << INDEX_BITS) | (index & INDEX_MASK))
    }

    fn type_tag(self) -> u32 {
        self.0 >> INDEX_BITS
    }

    fn index(self) -> u32 {
        self.0 & INDEX_MASK
    }
}

impl Deref for Handle {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u32> for Handle {
    fn from(value: u32) -> Self {
        Handle(value)
    }
}

impl From<Handle> for u32 {
    fn from(handle: Handle) -> Self {
        handle.0
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum HandleType {
    ArrayOutput = 1,
    Options,
    SymmetricKey,
    SymmetricState,
    SymmetricTag,
    PublicKey,
    SecretKey,
    KeyPair,
    Signature,
    SignatureState,
    VerificationState,
}

/// Registry of live objects of one category.
///
/// Every operation takes the table lock for its whole duration, so a `close`
/// can never free an entry another thread is still using.
pub(crate) struct HandleTable<T> {
    handle_type: HandleType,
    max_entries: usize,
    inner: Mutex<HandleTableInner<T>>,
}

struct HandleTableInner<T> {
    table: HashMap<u32, T>,
    id_counter: u32,
}

impl<T> HandleTable<T> {
    pub(crate) fn new(handle_type: HandleType, max_entries: u32) -> Self {
        Self {
            handle_type,
            max_entries: max_entries.clamp(1, MAX_TABLE_ENTRIES) as usize,
            inner: Mutex::new(HandleTableInner {
                table: HashMap::new(),
                id_counter: 0,
            }),
        }
    }

    /// Inserts `obj` and returns its fresh handle.
    pub(crate) fn register(&self, obj: T) -> CryptoResult<Handle> {
        let mut inner = self.inner.lock();
        if inner.table.len() >= self.max_entries {
            tracing::debug!(handle_type = ?self.handle_type, "handle table full");
            return Err(CryptoErrno::TooManyHandles);
        }

        loop {
            inner.id_counter = inner.id_counter.wrapping_add(1) & INDEX_MASK;
            if inner.id_counter != 0 && !inner.table.contains_key(&inner.id_counter) {
                break;
            }
        }
        let index = inner.id_counter;
        inner.table.insert(index, obj);
        Ok(Handle::new(self.handle_type, index))
    }

    fn index(&self, handle: Handle) -> CryptoResult<u32> {
        if handle.type_tag() != self.handle_type as u32 {
            return Err(CryptoErrno::InvalidHandle);
        }
        Ok(handle.index())
    }

    /// Returns a clone of the entry.
    pub(crate) fn get(&self, handle: Handle) -> CryptoResult<T>
    where
        T: Clone,
    {
        self.with(handle, |obj| Ok(obj.clone()))
    }

    /// Runs `f` on a shared reference to the entry under the table lock.
    pub(crate) fn with<R>(
        &self,
        handle: Handle,
        f: impl FnOnce(&T) -> CryptoResult<R>,
    ) -> CryptoResult<R> {
        let index = self.index(handle)?;
        let inner = self.inner.lock();
        let obj = inner.table.get(&index).ok_or(CryptoErrno::InvalidHandle)?;
        f(obj)
    }

    /// Runs `f` on a mutable reference to the entry under the table lock.
    pub(crate) fn with_mut<R>(
        &self,
        handle: Handle,
        f: impl FnOnce(&mut T) -> CryptoResult<R>,
    ) -> CryptoResult<R> {
        let index = self.index(handle)?;
        let mut inner = self.inner.lock();
        let obj = inner
            .table
            .get_mut(&index)
            .ok_or(CryptoErrno::InvalidHandle)?;
        f(obj)
    }

    /// Removes the entry and drops it.
    pub(crate) fn close(&self, handle: Handle) -> CryptoResult<()> {
        let index = self.index(handle)?;
        let removed = self.inner.lock().table.remove(&index);
        match removed {
            Some(obj) => {
                drop(obj);
                Ok(())
            }
            None => Err(CryptoErrno::InvalidHandle),
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().table.len()
    }
}
