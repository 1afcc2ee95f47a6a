// Copyright (C) Microsoft Corporation. All rights reserved.

use guestcrypto_crypto::HashKind;
use guestcrypto_crypto::HmacContext;

use super::*;

pub(crate) struct HmacState {
    ctx: HmacContext,
}

impl HmacState {
    pub(crate) fn open(kind: HashKind, key: &SymmetricKey) -> CryptoResult<Self> {
        Ok(Self {
            ctx: HmacContext::new(kind, key.raw())?,
        })
    }

    pub(crate) fn absorb(&mut self, data: &[u8]) -> CryptoResult<()> {
        Ok(self.ctx.update(data)?)
    }

    /// MAC over everything absorbed so far. The state stays usable.
    pub(crate) fn squeeze_tag(&mut self) -> CryptoResult<SymmetricTag> {
        Ok(SymmetricTag::new(self.ctx.tag()?))
    }
}
