/// Hex conversion utility
pub use bintext::hex;
