use rand::Rng;
use slotbook_core::errors::{SlotError, SlotResult};

/// Upper bound on random draws before allocation gives up.
pub const MAX_ID_ATTEMPTS: usize = 32;

/// Draws random 64-bit ids until one is not `taken`.
///
/// With a 2^64 id space a collision is practically impossible, so the bound
/// only matters for a broken RNG; hitting it is reported as `InvalidState`.
pub fn allocate_id<R, F>(rng: &mut R, taken: F) -> SlotResult<String>
where
    R: Rng,
    F: Fn(&str) -> bool,
{
    for _ in 0..MAX_ID_ATTEMPTS {
        let candidate = format!("{:016x}", rng.r#gen::<u64>());
        if !taken(&candidate) {
            return Ok(candidate);
        }
    }

    Err(SlotError::InvalidState(format!(
        "id space exhausted after {MAX_ID_ATTEMPTS} attempts"
    )))
}
