// defaults used by the binary when no configuration is given
pub const DEFAULT_MEMORY_SIZE: usize = 1024;
pub const DEFAULT_PAGE_SIZE: usize = 64;
pub const DEFAULT_SEGMENTS: [&str; 3] = ["code", "data", "stack"];

// name given to a segment whose name was left empty
pub const SEGMENT_NAME_PREFIX: &str = "Segment";

// written to batch output for an access that was rejected
pub const INVALID_ADDRESS: i64 = -1;
