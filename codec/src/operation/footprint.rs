//! State archival operations. Their footprint travels in the transaction's
//! resource data, so the operation payloads are nearly empty.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::xdr::{ExtensionPoint, ReadXdr, WriteXdr, XdrReader, XdrWriter};

/// Extends the live-until ledger of every footprint entry to `extend_to`
/// ledgers from now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtendFootprintTtlOp {
    pub ext: ExtensionPoint,
    pub extend_to: u32,
}

impl WriteXdr for ExtendFootprintTtlOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.ext.write_xdr(w)?;
        w.write_u32(self.extend_to);
        Ok(())
    }
}

impl ReadXdr for ExtendFootprintTtlOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            ext: ExtensionPoint::read_xdr(r)?,
            extend_to: r.read_u32()?,
        })
    }
}

/// Restores archived footprint entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RestoreFootprintOp {
    pub ext: ExtensionPoint,
}

impl WriteXdr for RestoreFootprintOp {
    fn write_xdr(&self, w: &mut XdrWriter) -> Result<()> {
        self.ext.write_xdr(w)
    }
}

impl ReadXdr for RestoreFootprintOp {
    fn read_xdr(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self {
            ext: ExtensionPoint::read_xdr(r)?,
        })
    }
}
