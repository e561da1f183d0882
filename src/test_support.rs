use rand::RngCore;

/// Random source that returns the same word forever, for pinning probability draws.
pub struct FixedRng(pub u64);

impl FixedRng {
    /// Every `random::<f64>()` is 0.0, so every chance check succeeds.
    pub fn always_low() -> Self {
        FixedRng(0)
    }

    /// Every `random::<f64>()` is just under 1.0, so every chance check below 1 fails.
    pub fn always_high() -> Self {
        FixedRng(u64::MAX)
    }
}

impl RngCore for FixedRng {
    fn next_u32(&mut self) -> u32 {
        (self.0 >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for (i, byte) in dst.iter_mut().enumerate() {
            *byte = self.0.to_le_bytes()[i % 8];
        }
    }
}
