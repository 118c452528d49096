/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default radius for the proximity query, in meters
pub const DEFAULT_NEARBY_RADIUS_METERS: f64 = 5_000.0;
