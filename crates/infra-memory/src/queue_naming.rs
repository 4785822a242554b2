// Queue naming rules enforced by the backend (SQS-compatible)

use conveyor_core::domain::queue::FIFO_EXTENSION;
use conveyor_core::domain::QueueName;

/// Maximum queue name length, FIFO extension included
pub const MAX_QUEUE_NAME_LENGTH: usize = 80;

/// Validate a queue name
///
/// Rules: 1-80 characters, ASCII alphanumerics, `-` and `_` only, with an
/// optional trailing `.fifo`.
pub fn validate_queue_name(queue: &QueueName) -> Result<(), String> {
    let name = queue.as_str();

    if name.is_empty() {
        return Err("queue name is empty".to_string());
    }
    if name.len() > MAX_QUEUE_NAME_LENGTH {
        return Err(format!(
            "queue name too long: {} > {} characters",
            name.len(),
            MAX_QUEUE_NAME_LENGTH
        ));
    }

    let stem = name.strip_suffix(FIFO_EXTENSION).unwrap_or(name);
    if stem.is_empty() {
        return Err("queue name has no characters before .fifo".to_string());
    }
    if !stem
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(format!(
            "queue name {name:?} must be alphanumeric, '-' or '_'"
        ));
    }

    Ok(())
}
