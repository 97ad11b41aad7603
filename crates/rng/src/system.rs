//! Provide entropy from the operating system.
//!
//! This is only ever used to pick a world seed when none was configured. Nothing that is
//! expected to be reproducible may read from here.

/// Returns a random `u64` value.
///
/// When the system cannot provide entropy, a warning is logged and zero is returned.
pub fn entropy() -> u64 {
    entropy_from(getrandom::getrandom)
}

/// Builds a `u64` out of the bytes written by `fill`.
///
/// Whatever `fill` wrote before failing is discarded.
fn entropy_from(fill: impl FnOnce(&mut [u8]) -> Result<(), getrandom::Error>) -> u64 {
    let mut bytes = [0u8; 8];
    match fill(&mut bytes) {
        Ok(()) => u64::from_ne_bytes(bytes),
        Err(err) => {
            log::warn!("failed to read entropy from the system, falling back to zero: {err}");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_bytes_become_the_value() {
        let value = entropy_from(|buf| {
            buf.copy_from_slice(&7u64.to_ne_bytes());
            Ok(())
        });
        assert_eq!(value, 7);
    }

    #[test]
    fn failed_reads_fall_back_to_zero() {
        let value = entropy_from(|buf| {
            buf[0] = 0xff;
            Err(getrandom::Error::UNSUPPORTED)
        });
        assert_eq!(value, 0);
    }
}
