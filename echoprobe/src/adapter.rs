//! The boundary between the engine and the system under test.
//!
//! A concrete adapter may do network or storage I/O, retry, or wait for
//! confirmation internally. The engine only sees one `write` and one `read`
//! per round, each of which completes or fails.

use crate::AdapterError;

/// A single shared mutable value that can be set and read back.
pub trait Adapter<V> {
    fn write(&mut self, value: &V) -> Result<(), AdapterError>;

    fn read(&mut self) -> Result<V, AdapterError>;
}

impl<V, A: Adapter<V> + ?Sized> Adapter<V> for &mut A {
    fn write(&mut self, value: &V) -> Result<(), AdapterError> {
        (**self).write(value)
    }

    fn read(&mut self) -> Result<V, AdapterError> {
        (**self).read()
    }
}

impl<V, A: Adapter<V> + ?Sized> Adapter<V> for Box<A> {
    fn write(&mut self, value: &V) -> Result<(), AdapterError> {
        (**self).write(value)
    }

    fn read(&mut self) -> Result<V, AdapterError> {
        (**self).read()
    }
}

/// In-memory echo of the last written value.
#[derive(Debug, Clone)]
pub struct MemoryCell<V> {
    value: Option<V>,
}

impl<V> Default for MemoryCell<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryCell<V> {
    pub fn new() -> Self {
        Self { value: None }
    }

    pub fn with_value(value: V) -> Self {
        Self { value: Some(value) }
    }

    pub fn get(&self) -> Option<&V> {
        self.value.as_ref()
    }
}

impl<V: Clone> Adapter<V> for MemoryCell<V> {
    fn write(&mut self, value: &V) -> Result<(), AdapterError> {
        self.value = Some(value.clone());
        Ok(())
    }

    fn read(&mut self) -> Result<V, AdapterError> {
        self.value
            .clone()
            .ok_or_else(|| AdapterError::new("no value written"))
    }
}

/// Which call of an adapter a fault applies to, counted from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fault {
    DropWrite(u64),
    FailWrite(u64),
    FailRead(u64),
}

/// Wraps an adapter and injects faults at chosen call indices.
///
/// Used to check that the harness itself notices a broken target.
#[derive(Debug, Clone)]
pub struct Faulty<A> {
    inner: A,
    faults: Vec<Fault>,
    writes: u64,
    reads: u64,
}

impl<A> Faulty<A> {
    pub fn new(inner: A) -> Self {
        Self {
            inner,
            faults: Vec::new(),
            writes: 0,
            reads: 0,
        }
    }

    /// The `n`-th write reports success without reaching the inner adapter
    pub fn drop_write(mut self, n: u64) -> Self {
        self.faults.push(Fault::DropWrite(n));
        self
    }

    /// The `n`-th write fails
    pub fn fail_write(mut self, n: u64) -> Self {
        self.faults.push(Fault::FailWrite(n));
        self
    }

    /// The `n`-th read fails
    pub fn fail_read(mut self, n: u64) -> Self {
        self.faults.push(Fault::FailRead(n));
        self
    }

    pub fn writes(&self) -> u64 {
        self.writes
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn into_inner(self) -> A {
        self.inner
    }
}

impl<V, A: Adapter<V>> Adapter<V> for Faulty<A> {
    fn write(&mut self, value: &V) -> Result<(), AdapterError> {
        let call = self.writes;
        self.writes += 1;

        if self.faults.contains(&Fault::FailWrite(call)) {
            return Err(AdapterError::new(format!("injected write failure at call {}", call)));
        }
        if self.faults.contains(&Fault::DropWrite(call)) {
            return Ok(());
        }
        self.inner.write(value)
    }

    fn read(&mut self) -> Result<V, AdapterError> {
        let call = self.reads;
        self.reads += 1;

        if self.faults.contains(&Fault::FailRead(call)) {
            return Err(AdapterError::new(format!("injected read failure at call {}", call)));
        }
        self.inner.read()
    }
}
