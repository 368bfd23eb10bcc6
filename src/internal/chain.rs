use fnv::FnvHashSet;

use crate::internal::{consts, Sectors};

// ========================================================================= //

/// An allocation table mapping each sector index to the one that follows it.
pub struct SectorChain {
    next: Vec<u32>,
}

impl SectorChain {
    pub fn new(next: Vec<u32>) -> SectorChain {
        SectorChain { next }
    }

    pub fn len(&self) -> usize {
        self.next.len()
    }

    /// Returns the sector after `sector_id`, or `END_OF_CHAIN` when the
    /// index lies outside the table.
    pub fn next(&self, sector_id: u32) -> u32 {
        self.next
            .get(sector_id as usize)
            .copied()
            .unwrap_or(consts::END_OF_CHAIN)
    }

    /// Walks the chain starting at `start`.
    pub fn walk(&self, start: u32) -> ChainIter<'_> {
        ChainIter { chain: self, current: start, seen: FnvHashSet::default() }
    }

    /// Concatenates the sectors of the chain starting at `start`.
    pub fn read(&self, sectors: &Sectors, start: u32) -> Vec<u8> {
        let mut data = Vec::new();
        for sector_id in self.walk(start) {
            data.extend_from_slice(sectors.sector(sector_id));
        }
        data
    }
}

// ========================================================================= //

/// Iterator over the sector indices of one chain.
///
/// Stops at `END_OF_CHAIN`, at any other special marker, or at the first
/// sector that was already visited, so a corrupted table cannot loop.
pub struct ChainIter<'a> {
    chain: &'a SectorChain,
    current: u32,
    seen: FnvHashSet<u32>,
}

impl<'a> ChainIter<'a> {
    /// Returns true if the walk was cut short by a repeated sector.
    pub fn hit_cycle(&self) -> bool {
        self.current <= consts::MAX_REGULAR_SECTOR
            && self.seen.contains(&self.current)
    }
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.current;
        if current > consts::MAX_REGULAR_SECTOR || !self.seen.insert(current)
        {
            return None;
        }
        self.current = self.chain.next(current);
        Some(current)
    }
}

// ========================================================================= //


// ========================================================================= //
