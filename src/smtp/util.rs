use rand::{Rng, distributions::Alphanumeric};

/// Random alphanumeric local part for catch-all detection.
pub(crate) fn random_local_part(len: usize) -> String {
    let length = len.clamp(10, 32);
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(|byte| char::from(byte).to_ascii_lowercase())
        .collect()
}
