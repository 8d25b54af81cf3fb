//! VM Memory Model
//!
//! Zero-indexed, growable cell storage owned by a single process.
//! Any address touched by a load or store is valid afterward: memory grows
//! to fit with zero fill, bounded only by the configured cell limit.

use crate::error::Fault;

#[derive(Debug, Clone)]
pub struct Memory {
    cells: Vec<i64>,
    limit: usize,
}

impl Memory {
    pub fn new(image: Vec<i64>, limit: usize) -> Self {
        Memory { cells: image, limit }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Grow to include `address`. No-op when already in range.
    fn ensure(&mut self, address: usize) -> Result<(), Fault> {
        if address < self.cells.len() {
            return Ok(());
        }
        if address >= self.limit {
            return Err(Fault::MemoryLimit {
                address: address as i64,
                limit: self.limit,
            });
        }
        self.cells.resize(address + 1, 0);
        Ok(())
    }

    pub fn load(&mut self, address: usize) -> Result<i64, Fault> {
        self.ensure(address)?;
        Ok(self.cells[address])
    }

    pub fn store(&mut self, address: usize, value: i64) -> Result<(), Fault> {
        self.ensure(address)?;
        self.cells[address] = value;
        Ok(())
    }

    /// Read without growing; `None` past the current end.
    pub fn get(&self, address: usize) -> Option<i64> {
        self.cells.get(address).copied()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.cells
    }
}
