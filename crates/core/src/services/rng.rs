use crate::errors::CoreError;

/// Draw a uniform sample in [0, 1) from the platform random source.
///
/// Uses `getrandom` so the same code runs in the browser (WASM) and
/// natively. Everything in the core that needs randomness also accepts
/// a pre-drawn sample, so tests never have to touch this.
pub fn random_unit() -> Result<f64, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)?;
    // 53 random bits → the full f64 mantissa range of [0, 1)
    let n = u64::from_le_bytes(bytes) >> 11;
    Ok(n as f64 / (1u64 << 53) as f64)
}
