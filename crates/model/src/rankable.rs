//! The capability contract for rankable items.
//!
//! The ranking engine never knows the concrete item type. Anything that
//! exposes engagement counters, a creation time and a writable weight slot
//! can be ranked.

/// Capability set an item must expose to be scored and ranked.
///
/// ## Design Note
/// - Readers take `&self`; the only writer is `set_weight`, which the ranker
///   calls through a `&mut` borrow held for one ranking call
/// - The trait is object safe so boosters can inspect `&dyn Rankable`
/// - `watch_seconds` and `owner_id` are optional and default to `None`
pub trait Rankable {
    /// Opaque identifier, matched against weight maps and blacklists.
    fn id(&self) -> &str;

    /// User id of the item's author, if the item type knows it.
    ///
    /// Blacklists hold user ids, so exposing the author lets a blacklist
    /// match every post of a user rather than individual post ids.
    fn owner_id(&self) -> Option<&str> {
        None
    }

    fn upvote_count(&self) -> u32;

    fn comment_count(&self) -> u32;

    fn share_count(&self) -> u32;

    fn favorite_count(&self) -> u32;

    /// Total watch time in seconds. `None` scores the same as zero.
    fn watch_seconds(&self) -> Option<u64> {
        None
    }

    /// Creation time in seconds since the Unix epoch.
    fn created_at(&self) -> i64;

    /// Current weight slot. `None` and `Some(0.0)` both mean "no override".
    fn weight(&self) -> Option<f64>;

    fn set_weight(&mut self, weight: f64);

    fn is_anonymous(&self) -> bool;

    /// Demographic label of the author, e.g. a gender label like "Female".
    fn demographic(&self) -> &str;
}
