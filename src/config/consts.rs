/// Default alignment applied to planned value sizes (no padding)
pub const DEFAULT_ALIGNMENT: usize = 1;
/// Largest alignment accepted from configuration
pub const MAX_ALIGNMENT: usize = 4096;
