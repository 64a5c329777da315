/// Whole-number percentage of `completed` out of `total`, rounded half up.
///
/// Returns 0 when `total` is 0. Not clamped: a `completed` count above
/// `total` yields more than 100.
#[must_use]
pub fn completion_percentage(completed: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let completed = completed as u128;
    let total = total as u128;
    let rounded = (200 * completed + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
