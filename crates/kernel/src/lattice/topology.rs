use tensegrity_types::UnitCellIndex;

use super::params::LatticeParameters;

/// Wrap a possibly negative or overflowing index into `0..bound`.
pub fn wrap(index: i64, bound: usize) -> usize {
    index.rem_euclid(bound as i64) as usize
}

/// Index neighbors of one unit cell under toroidal wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellNeighborhood {
    pub cell: UnitCellIndex,
    /// `(i + 1) mod q`
    pub ip: usize,
    /// `(i - 1) mod q`
    pub im: usize,
    /// `(k + 1) mod p`
    pub kp: usize,
    /// `(k - 1) mod p`
    pub km: usize,
}

impl CellNeighborhood {
    pub fn resolve(params: &LatticeParameters, cell: UnitCellIndex) -> Self {
        let (p, q) = (params.p(), params.q());
        let (i, k) = (cell.i % q, cell.k % p);
        Self {
            cell,
            ip: (i + 1) % q,
            im: (i + q - 1) % q,
            kp: (k + 1) % p,
            km: (k + p - 1) % p,
        }
    }

    /// Cell at offset `(di, dk)` with each component in `{-1, 0, 1}`.
    pub fn resolve_offset(&self, di: i8, dk: i8) -> UnitCellIndex {
        let i = match di {
            1 => self.ip,
            -1 => self.im,
            _ => self.cell.i,
        };
        let k = match dk {
            1 => self.kp,
            -1 => self.km,
            _ => self.cell.k,
        };
        UnitCellIndex::new(i, k)
    }

    /// The cells the unit-cell template reads, in template order:
    /// self, `(ip,kp)`, `(ip,km)`, `(ip,k)`, `(i,kp)`, `(im,k)`, `(im,km)`.
    pub fn referenced_cells(&self) -> [UnitCellIndex; 7] {
        [
            self.cell,
            self.resolve_offset(1, 1),
            self.resolve_offset(1, -1),
            self.resolve_offset(1, 0),
            self.resolve_offset(0, 1),
            self.resolve_offset(-1, 0),
            self.resolve_offset(-1, -1),
        ]
    }
}
