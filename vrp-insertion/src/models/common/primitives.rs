/// Represents a time duration.
pub type Duration = f64;

/// Represents a timestamp.
pub type Timestamp = f64;

/// Represents a distance.
pub type Distance = f64;

/// Specifies cost value.
pub type Cost = f64;

/// Specifies location type: an index in routing matrix.
pub type Location = usize;

/// Specifies signed capacity demand: positive values are picked up, negative are dropped off.
pub type Demand = i32;
